use std::fmt;

use heatloop_core::constraint::{Constrained, Constraint, ConstraintError};

/// Errors returned when configuring or running a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter `{parameter}`: {source}")]
    InvalidParameter {
        parameter: Parameter,
        #[source]
        source: ConstraintError,
    },
}

impl Error {
    /// Returns the parameter that failed validation.
    #[must_use]
    pub fn parameter(&self) -> Parameter {
        match self {
            Self::InvalidParameter { parameter, .. } => *parameter,
        }
    }
}

/// Names an input accepted by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    ProportionalGain,
    IntegralTime,
    DerivativeTime,
    LossConstant,
    InitialSetpoint,
    DurationSteps,
    RampRate,
}

impl Parameter {
    /// Checks `value` against constraint `C`, attributing a failure to `self`.
    pub(crate) fn check<T, C: Constraint<T>>(self, value: T) -> Result<T, Error> {
        Constrained::<T, C>::new(value)
            .map(Constrained::into_inner)
            .map_err(|source| Error::InvalidParameter {
                parameter: self,
                source,
            })
    }

    fn name(self) -> &'static str {
        match self {
            Self::ProportionalGain => "proportional_gain",
            Self::IntegralTime => "integral_time",
            Self::DerivativeTime => "derivative_time",
            Self::LossConstant => "loss_constant",
            Self::InitialSetpoint => "initial_setpoint",
            Self::DurationSteps => "duration_steps",
            Self::RampRate => "ramp_rate",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use heatloop_core::constraint::{NonNegative, StrictlyNegative};

    #[test]
    fn check_passes_valid_value_through() {
        let value = Parameter::RampRate.check::<_, NonNegative>(2.5);
        assert_eq!(value, Ok(2.5));
    }

    #[test]
    fn check_attributes_failure_to_parameter() {
        let err = Parameter::LossConstant
            .check::<_, StrictlyNegative>(5.0)
            .unwrap_err();

        assert_eq!(err.parameter(), Parameter::LossConstant);
        assert_eq!(
            err,
            Error::InvalidParameter {
                parameter: Parameter::LossConstant,
                source: ConstraintError::Positive,
            }
        );
    }

    #[test]
    fn message_names_parameter_and_reason() {
        let err = Parameter::InitialSetpoint
            .check::<_, NonNegative>(-5.0)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid parameter `initial_setpoint`: value must not be negative"
        );
    }
}
