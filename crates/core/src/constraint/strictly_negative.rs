use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly negative (less than zero).
///
/// # Examples
///
/// ```
/// use heatloop_core::constraint::StrictlyNegative;
///
/// assert_eq!(StrictlyNegative::new(-10.0).unwrap().get(), -10.0);
/// assert!(StrictlyNegative::new(0.0).is_err());
/// assert!(StrictlyNegative::new(5.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyNegative;

impl StrictlyNegative {
    /// Constructs `Constrained<T, StrictlyNegative>` if the value is less than zero.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::Positive`] if the value is greater than zero.
    /// - [`ConstraintError::Zero`] if the value is zero.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyNegative>, ConstraintError> {
        Constrained::<T, StrictlyNegative>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Less) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Greater) => Err(ConstraintError::Positive),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
