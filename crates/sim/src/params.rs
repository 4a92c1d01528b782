use heatloop_core::constraint::{Finite, NonNegative, StrictlyNegative, StrictlyPositive};

use crate::{Error, Parameter};

/// Loss constant used when only the gains are supplied.
pub const DEFAULT_LOSS_CONSTANT: f64 = -10.0;

/// Validated PID gains and process loss for one simulator configuration.
///
/// The integral and derivative gains are derived from the proportional gain
/// and the integral/derivative times:
///
/// ```text
/// integral_gain   = proportional_gain / integral_time
/// derivative_gain = proportional_gain * derivative_time
/// ```
///
/// Parameters are never partially mutated. To change them, build a new value
/// and hand it to [`Simulator::update_with`](crate::Simulator::update_with).
///
/// # Example
///
/// ```
/// use heatloop_sim::ControllerParameters;
///
/// let params = ControllerParameters::new(10.0, 10.0, 2.0, -10.0).unwrap();
/// assert_eq!(params.integral_gain(), 1.0);
/// assert_eq!(params.derivative_gain(), 20.0);
///
/// assert!(ControllerParameters::new(1.0, 1.0, 1.0, 5.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerParameters {
    proportional_gain: f64,
    integral_time: f64,
    derivative_time: f64,
    loss_constant: f64,
}

impl ControllerParameters {
    /// Validates and stores a set of controller parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if:
    ///
    /// - `proportional_gain` or `derivative_time` is negative,
    /// - `integral_time` is zero or negative,
    /// - `loss_constant` is zero or positive,
    /// - or any value is infinite or NaN.
    pub fn new(
        proportional_gain: f64,
        integral_time: f64,
        derivative_time: f64,
        loss_constant: f64,
    ) -> Result<Self, Error> {
        Ok(Self {
            proportional_gain: Parameter::ProportionalGain
                .check::<_, (Finite, NonNegative)>(proportional_gain)?,
            integral_time: Parameter::IntegralTime
                .check::<_, (Finite, StrictlyPositive)>(integral_time)?,
            derivative_time: Parameter::DerivativeTime
                .check::<_, (Finite, NonNegative)>(derivative_time)?,
            loss_constant: Parameter::LossConstant
                .check::<_, (Finite, StrictlyNegative)>(loss_constant)?,
        })
    }

    /// Validates gains and pairs them with [`DEFAULT_LOSS_CONSTANT`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] under the same rules as [`Self::new`].
    pub fn with_default_loss(
        proportional_gain: f64,
        integral_time: f64,
        derivative_time: f64,
    ) -> Result<Self, Error> {
        Self::new(
            proportional_gain,
            integral_time,
            derivative_time,
            DEFAULT_LOSS_CONSTANT,
        )
    }

    #[must_use]
    pub fn proportional_gain(&self) -> f64 {
        self.proportional_gain
    }

    #[must_use]
    pub fn integral_time(&self) -> f64 {
        self.integral_time
    }

    #[must_use]
    pub fn derivative_time(&self) -> f64 {
        self.derivative_time
    }

    /// Constant subtracted from the process state every step.
    #[must_use]
    pub fn loss_constant(&self) -> f64 {
        self.loss_constant
    }

    /// Returns `proportional_gain / integral_time`.
    #[must_use]
    pub fn integral_gain(&self) -> f64 {
        self.proportional_gain / self.integral_time
    }

    /// Returns `proportional_gain * derivative_time`.
    #[must_use]
    pub fn derivative_gain(&self) -> f64 {
        self.proportional_gain * self.derivative_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use heatloop_core::constraint::ConstraintError;

    fn rejected(result: Result<ControllerParameters, Error>) -> (Parameter, ConstraintError) {
        match result {
            Err(Error::InvalidParameter { parameter, source }) => (parameter, source),
            Ok(params) => panic!("expected rejection, got {params:?}"),
        }
    }

    #[test]
    fn derives_gains() {
        let params = ControllerParameters::new(4.0, 8.0, 0.25, -1.0).unwrap();

        assert_relative_eq!(params.integral_gain(), 0.5);
        assert_relative_eq!(params.derivative_gain(), 1.0);
        assert_relative_eq!(params.loss_constant(), -1.0);
    }

    #[test]
    fn zero_gain_and_derivative_time_are_allowed() {
        let params = ControllerParameters::new(0.0, 1.0, 0.0, -1.0).unwrap();

        assert_relative_eq!(params.integral_gain(), 0.0);
        assert_relative_eq!(params.derivative_gain(), 0.0);
    }

    #[test]
    fn default_loss_is_minus_ten() {
        let params = ControllerParameters::with_default_loss(10.0, 10.0, 2.0).unwrap();
        assert_relative_eq!(params.loss_constant(), -10.0);
    }

    #[test]
    fn rejects_negative_gain_and_times() {
        assert_eq!(
            rejected(ControllerParameters::new(-1.0, 1.0, 1.0, -1.0)),
            (Parameter::ProportionalGain, ConstraintError::Negative)
        );
        assert_eq!(
            rejected(ControllerParameters::new(1.0, -1.0, 1.0, -1.0)),
            (Parameter::IntegralTime, ConstraintError::Negative)
        );
        assert_eq!(
            rejected(ControllerParameters::new(1.0, 1.0, -1.0, -1.0)),
            (Parameter::DerivativeTime, ConstraintError::Negative)
        );
    }

    #[test]
    fn rejects_zero_integral_time() {
        assert_eq!(
            rejected(ControllerParameters::new(1.0, 0.0, 1.0, -1.0)),
            (Parameter::IntegralTime, ConstraintError::Zero)
        );
    }

    #[test]
    fn rejects_non_negative_loss() {
        assert_eq!(
            rejected(ControllerParameters::new(1.0, 1.0, 1.0, 5.0)),
            (Parameter::LossConstant, ConstraintError::Positive)
        );
        assert_eq!(
            rejected(ControllerParameters::new(1.0, 1.0, 1.0, 0.0)),
            (Parameter::LossConstant, ConstraintError::Zero)
        );
    }

    #[test]
    fn rejects_nan() {
        assert_eq!(
            rejected(ControllerParameters::new(f64::NAN, 1.0, 1.0, -1.0)),
            (Parameter::ProportionalGain, ConstraintError::NotANumber)
        );
        assert_eq!(
            rejected(ControllerParameters::new(1.0, 1.0, 1.0, f64::NAN)),
            (Parameter::LossConstant, ConstraintError::NotANumber)
        );
    }

    #[test]
    fn rejects_infinities() {
        assert_eq!(
            rejected(ControllerParameters::new(f64::INFINITY, 1.0, 0.0, -1.0)),
            (Parameter::ProportionalGain, ConstraintError::NotFinite)
        );
        assert_eq!(
            rejected(ControllerParameters::new(1.0, f64::INFINITY, 0.0, -1.0)),
            (Parameter::IntegralTime, ConstraintError::NotFinite)
        );
        assert_eq!(
            rejected(ControllerParameters::new(1.0, 1.0, f64::INFINITY, -1.0)),
            (Parameter::DerivativeTime, ConstraintError::NotFinite)
        );
        assert_eq!(
            rejected(ControllerParameters::new(1.0, 1.0, 0.0, f64::NEG_INFINITY)),
            (Parameter::LossConstant, ConstraintError::NotFinite)
        );
    }

    #[test]
    fn first_violation_is_reported() {
        let (parameter, _) = rejected(ControllerParameters::new(-1.0, -1.0, -1.0, 1.0));
        assert_eq!(parameter, Parameter::ProportionalGain);
    }
}
