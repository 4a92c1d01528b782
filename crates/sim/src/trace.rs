#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound on the time steps reserved before a run starts.
///
/// Longer runs grow their series as steps are recorded.
const MAX_RESERVED_STEPS: usize = 1 << 16;

/// Time series recorded by one simulation run.
///
/// For a run of `N` time steps:
///
/// - [`time_steps`](Self::time_steps), [`setpoints`](Self::setpoints) and
///   [`measured`](Self::measured) each hold `N` values,
/// - [`errors`](Self::errors) and [`outputs`](Self::outputs) hold one value per
///   control step, `N - 1` in total.
///
/// `measured[0]` is always zero. The last setpoint is recorded but never
/// drives a control step.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct SimulationTrace {
    pub(crate) time_steps: Vec<usize>,
    pub(crate) setpoints: Vec<f64>,
    pub(crate) errors: Vec<f64>,
    pub(crate) measured: Vec<f64>,
    pub(crate) outputs: Vec<f64>,
}

impl SimulationTrace {
    pub(crate) fn with_capacity(duration_steps: usize) -> Self {
        let duration_steps = duration_steps.min(MAX_RESERVED_STEPS);
        Self {
            time_steps: Vec::with_capacity(duration_steps),
            setpoints: Vec::with_capacity(duration_steps),
            errors: Vec::with_capacity(duration_steps),
            measured: Vec::with_capacity(duration_steps),
            outputs: Vec::with_capacity(duration_steps),
        }
    }

    #[must_use]
    pub fn time_steps(&self) -> &[usize] {
        &self.time_steps
    }

    #[must_use]
    pub fn setpoints(&self) -> &[f64] {
        &self.setpoints
    }

    #[must_use]
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    #[must_use]
    pub fn measured(&self) -> &[f64] {
        &self.measured
    }

    #[must_use]
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Number of time steps in the run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time_steps.len()
    }

    /// Returns `true` if the trace holds no time steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time_steps.is_empty()
    }

    /// Sum of the recorded errors up to and including control step `index`.
    ///
    /// Returns `None` if `index` is past the last control step.
    #[must_use]
    pub fn error_sum(&self, index: usize) -> Option<f64> {
        self.errors.get(..=index).map(|errors| errors.iter().sum())
    }

    /// Pairs each time step with its measured value and setpoint.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.time_steps
            .iter()
            .zip(&self.measured)
            .zip(&self.setpoints)
            .map(|((&t, &measured), &setpoint)| (t, measured, setpoint))
    }
}
