use heatloop_core::constraint::{Finite, NonNegative, StrictlyPositive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Parameter};

/// How the process state is clamped to be non-negative after each update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClampPolicy {
    /// Leave the first update unclamped and clamp every later one.
    ///
    /// A large loss constant can therefore drive the first measured value
    /// below zero.
    #[default]
    SkipFirstStep,
    /// Clamp every update, including the first.
    EveryStep,
}

impl ClampPolicy {
    /// Returns `true` if the update produced by control step `index` is clamped.
    #[must_use]
    pub fn clamps(self, index: usize) -> bool {
        match self {
            Self::SkipFirstStep => index > 0,
            Self::EveryStep => true,
        }
    }
}

/// How the integral term sums the error history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IntegralMode {
    /// Re-sum the entire recorded error history at every step.
    ///
    /// Total work over a run grows quadratically with its length.
    #[default]
    Resum,
    /// Keep a running accumulator of the error history.
    ///
    /// Sums in the same order as [`IntegralMode::Resum`], so both modes
    /// produce identical traces.
    RunningSum,
}

/// Setpoint trajectory and loop options for a single run.
///
/// The setpoint ramps linearly from `initial_setpoint`:
///
/// ```text
/// setpoint[t] = initial_setpoint + t * ramp_rate,   t = 0 .. duration_steps - 1
/// ```
///
/// # Example
///
/// ```
/// use heatloop_sim::{ClampPolicy, RunConfig};
///
/// let config = RunConfig::new(50.0, 200, 10.0)
///     .unwrap()
///     .with_clamp_policy(ClampPolicy::EveryStep);
///
/// assert_eq!(config.setpoint_at(3), 80.0);
/// assert_eq!(config.control_steps(), 199);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    initial_setpoint: f64,
    duration_steps: usize,
    ramp_rate: f64,
    clamp_policy: ClampPolicy,
    integral_mode: IntegralMode,
}

impl RunConfig {
    /// Validates a setpoint trajectory.
    ///
    /// The clamp policy and integral mode start at their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `duration_steps` is zero, or if
    /// `initial_setpoint` or `ramp_rate` is negative, infinite, or NaN.
    pub fn new(
        initial_setpoint: f64,
        duration_steps: usize,
        ramp_rate: f64,
    ) -> Result<Self, Error> {
        Ok(Self {
            initial_setpoint: Parameter::InitialSetpoint
                .check::<_, (Finite, NonNegative)>(initial_setpoint)?,
            duration_steps: Parameter::DurationSteps
                .check::<_, StrictlyPositive>(duration_steps)?,
            ramp_rate: Parameter::RampRate.check::<_, (Finite, NonNegative)>(ramp_rate)?,
            ..Self::default()
        })
    }

    /// Returns `self` with the given clamp policy, keeping other fields unchanged.
    #[must_use]
    pub fn with_clamp_policy(self, clamp_policy: ClampPolicy) -> Self {
        Self {
            clamp_policy,
            ..self
        }
    }

    /// Returns `self` with the given integral mode, keeping other fields unchanged.
    #[must_use]
    pub fn with_integral_mode(self, integral_mode: IntegralMode) -> Self {
        Self {
            integral_mode,
            ..self
        }
    }

    #[must_use]
    pub fn initial_setpoint(&self) -> f64 {
        self.initial_setpoint
    }

    #[must_use]
    pub fn duration_steps(&self) -> usize {
        self.duration_steps
    }

    #[must_use]
    pub fn ramp_rate(&self) -> f64 {
        self.ramp_rate
    }

    #[must_use]
    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp_policy
    }

    #[must_use]
    pub fn integral_mode(&self) -> IntegralMode {
        self.integral_mode
    }

    /// Number of control steps in the run.
    ///
    /// The last setpoint is recorded but never drives an update, so a run of
    /// `N` time steps performs `N - 1` control steps.
    #[must_use]
    pub fn control_steps(&self) -> usize {
        self.duration_steps - 1
    }

    /// Returns the setpoint at time step `t`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn setpoint_at(&self, t: usize) -> f64 {
        self.initial_setpoint + t as f64 * self.ramp_rate
    }
}

/// A constant setpoint of 50 held for 200 steps.
impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_setpoint: 50.0,
            duration_steps: 200,
            ramp_rate: 0.0,
            clamp_policy: ClampPolicy::default(),
            integral_mode: IntegralMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use heatloop_core::constraint::ConstraintError;

    #[test]
    fn defaults() {
        let config = RunConfig::default();

        assert_eq!(config.initial_setpoint(), 50.0);
        assert_eq!(config.duration_steps(), 200);
        assert_eq!(config.ramp_rate(), 0.0);
        assert_eq!(config.clamp_policy(), ClampPolicy::SkipFirstStep);
        assert_eq!(config.integral_mode(), IntegralMode::Resum);
    }

    #[test]
    fn setpoint_ramps_linearly() {
        let config = RunConfig::new(10.0, 5, 2.5).unwrap();
        let setpoints: Vec<f64> = (0..5).map(|t| config.setpoint_at(t)).collect();

        assert_eq!(setpoints, vec![10.0, 12.5, 15.0, 17.5, 20.0]);
    }

    #[test]
    fn builders_keep_trajectory() {
        let config = RunConfig::new(1.0, 3, 0.5)
            .unwrap()
            .with_clamp_policy(ClampPolicy::EveryStep)
            .with_integral_mode(IntegralMode::RunningSum);

        assert_eq!(config.initial_setpoint(), 1.0);
        assert_eq!(config.duration_steps(), 3);
        assert_eq!(config.ramp_rate(), 0.5);
        assert_eq!(config.clamp_policy(), ClampPolicy::EveryStep);
        assert_eq!(config.integral_mode(), IntegralMode::RunningSum);
    }

    #[test]
    fn rejects_zero_duration() {
        assert_eq!(
            RunConfig::new(10.0, 0, 0.0),
            Err(Error::InvalidParameter {
                parameter: Parameter::DurationSteps,
                source: ConstraintError::Zero,
            })
        );
    }

    #[test]
    fn rejects_negative_setpoint_and_ramp() {
        let err = RunConfig::new(-5.0, 10, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Parameter::InitialSetpoint);

        let err = RunConfig::new(5.0, 10, -0.1).unwrap_err();
        assert_eq!(err.parameter(), Parameter::RampRate);
    }

    #[test]
    fn rejects_infinite_setpoint_and_ramp() {
        assert_eq!(
            RunConfig::new(f64::INFINITY, 10, 0.0),
            Err(Error::InvalidParameter {
                parameter: Parameter::InitialSetpoint,
                source: ConstraintError::NotFinite,
            })
        );
        assert_eq!(
            RunConfig::new(5.0, 10, f64::INFINITY).unwrap_err().parameter(),
            Parameter::RampRate
        );
    }

    #[test]
    fn single_step_run_has_no_control_steps() {
        let config = RunConfig::new(0.0, 1, 0.0).unwrap();
        assert_eq!(config.control_steps(), 0);
    }

    #[test]
    fn skip_first_step_leaves_only_index_zero_unclamped() {
        assert!(!ClampPolicy::SkipFirstStep.clamps(0));
        assert!(ClampPolicy::SkipFirstStep.clamps(1));
        assert!(ClampPolicy::EveryStep.clamps(0));
    }
}
