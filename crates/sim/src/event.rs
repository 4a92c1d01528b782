/// Event emitted by the simulator for each control step.
///
/// Control step `index` turns `setpoint[index]` and `measured[index]` into
/// `measured[index + 1]`. Steps are emitted in order, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The control step number.
    pub index: usize,

    /// Setpoint driving this step.
    pub setpoint: f64,

    /// Process state before the update.
    pub measured: f64,

    /// `setpoint - measured`.
    pub error: f64,

    /// Proportional term contribution.
    pub proportional: f64,

    /// Integral term contribution.
    pub integral: f64,

    /// Derivative term contribution (zero on the first step).
    pub derivative: f64,

    /// Control output after clamping to be non-negative.
    pub output: f64,

    /// Setpoint at the following time step, `setpoint[index + 1]`.
    pub next_setpoint: f64,

    /// Process state after the update, `measured[index + 1]`.
    pub next_measured: f64,
}

impl Event {
    /// Returns the control action before it was clamped.
    #[must_use]
    pub fn unclamped_output(&self) -> f64 {
        self.proportional + self.integral + self.derivative
    }

    /// Returns `true` if a negative control action was clamped to zero.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.unclamped_output() < 0.0
    }
}
