/// Receives events emitted while a simulation runs.
///
/// An observer is handed each event in order and may answer with an action.
/// The action type `A` is chosen by the emitter: a simulation that cannot be
/// steered uses an uninhabited type such as [`std::convert::Infallible`], so
/// observers can only ever return `None`.
///
/// Implementations are provided for:
///
/// - `()`, which ignores every event
/// - any closure `FnMut(&E) -> Option<A>`
///
/// # Example
///
/// ```
/// use heatloop_core::Observer;
///
/// let mut seen = Vec::new();
/// let mut observer = |event: &u32| -> Option<()> {
///     seen.push(*event);
///     None
/// };
///
/// assert!(observer.observe(&3_u32).is_none());
/// assert!(observer.observe(&5_u32).is_none());
/// assert_eq!(seen, [3, 5]);
/// ```
pub trait Observer<E, A> {
    /// Observes a single event.
    ///
    /// Returns `Some(action)` to request an action from the emitter, or `None`
    /// to let it continue unchanged.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
