use num_traits::Float;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a floating-point value is finite.
///
/// Pair it with a sign constraint to bound a value on both sides:
///
/// ```
/// use heatloop_core::constraint::{Constrained, Finite, NonNegative};
///
/// type Rate = Constrained<f64, (Finite, NonNegative)>;
///
/// assert!(Rate::new(2.5).is_ok());
/// assert!(Rate::new(f64::INFINITY).is_err());
/// assert!(Rate::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Finite;

impl Finite {
    /// Constructs `Constrained<T, Finite>` if the value is neither infinite nor NaN.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::NotFinite`] if the value is infinite.
    /// - [`ConstraintError::NotANumber`] if the value is NaN.
    pub fn new<T: Float>(value: T) -> Result<Constrained<T, Finite>, ConstraintError> {
        Constrained::<T, Finite>::new(value)
    }
}

impl<T: Float> Constraint<T> for Finite {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if value.is_infinite() {
            Err(ConstraintError::NotFinite)
        } else {
            Ok(())
        }
    }
}
