use std::convert::Infallible;

use heatloop_core::Observer;
use tracing::debug;

use crate::{ControllerParameters, Error, Event, RunConfig, SimulationTrace, control};

/// A PID controller driving a single-zone heating process.
///
/// The simulator owns its [`ControllerParameters`] and the
/// [`SimulationTrace`] of its most recent run. Each successful run replaces
/// the stored trace; a failed call leaves both parameters and trace untouched.
///
/// # Example
///
/// ```
/// use heatloop_sim::Simulator;
///
/// let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
/// let trace = sim.run(10.0, 5, 0.0).unwrap();
///
/// assert_eq!(trace.setpoints(), [10.0; 5]);
/// assert_eq!(trace.errors()[0], 10.0);
/// assert_eq!(trace.measured()[1], 19.0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    parameters: ControllerParameters,
    trace: Option<SimulationTrace>,
}

impl Simulator {
    /// Creates a simulator from raw controller parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the parameters are rejected by
    /// [`ControllerParameters::new`].
    pub fn new(
        proportional_gain: f64,
        integral_time: f64,
        derivative_time: f64,
        loss_constant: f64,
    ) -> Result<Self, Error> {
        ControllerParameters::new(
            proportional_gain,
            integral_time,
            derivative_time,
            loss_constant,
        )
        .map(Self::from_parameters)
    }

    /// Creates a simulator from already validated parameters.
    #[must_use]
    pub fn from_parameters(parameters: ControllerParameters) -> Self {
        Self {
            parameters,
            trace: None,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &ControllerParameters {
        &self.parameters
    }

    /// Runs a simulation with default loop options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the trajectory is rejected by
    /// [`RunConfig::new`]. The previous trace is kept.
    pub fn run(
        &mut self,
        initial_setpoint: f64,
        duration_steps: usize,
        ramp_rate: f64,
    ) -> Result<&SimulationTrace, Error> {
        let config = RunConfig::new(initial_setpoint, duration_steps, ramp_rate)?;
        Ok(self.run_with(config))
    }

    /// Runs a simulation with a validated configuration.
    pub fn run_with(&mut self, config: RunConfig) -> &SimulationTrace {
        self.run_observed(config, ())
    }

    /// Runs a simulation, handing each control step to `observer`.
    pub fn run_observed<O>(&mut self, config: RunConfig, observer: O) -> &SimulationTrace
    where
        O: Observer<Event, Infallible>,
    {
        debug!(
            steps = config.duration_steps(),
            initial_setpoint = config.initial_setpoint(),
            ramp_rate = config.ramp_rate(),
            clamp_policy = ?config.clamp_policy(),
            integral_mode = ?config.integral_mode(),
            "starting run"
        );

        let trace = control::simulate(&self.parameters, &config, observer);

        debug!(
            final_measured = trace.measured().last().copied(),
            final_setpoint = trace.setpoints().last().copied(),
            "run complete"
        );

        self.trace.insert(trace)
    }

    /// Replaces the parameters and runs again.
    ///
    /// Both the parameters and the trajectory are validated before anything
    /// is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either the parameters or the
    /// trajectory are rejected. The simulator is left unchanged.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        proportional_gain: f64,
        integral_time: f64,
        derivative_time: f64,
        loss_constant: f64,
        initial_setpoint: f64,
        duration_steps: usize,
        ramp_rate: f64,
    ) -> Result<&SimulationTrace, Error> {
        let parameters = ControllerParameters::new(
            proportional_gain,
            integral_time,
            derivative_time,
            loss_constant,
        )?;
        let config = RunConfig::new(initial_setpoint, duration_steps, ramp_rate)?;
        Ok(self.update_with(parameters, config))
    }

    /// Replaces the parameters with validated ones and runs again.
    pub fn update_with(
        &mut self,
        parameters: ControllerParameters,
        config: RunConfig,
    ) -> &SimulationTrace {
        debug!(?parameters, "replacing controller parameters");
        self.parameters = parameters;
        self.run_with(config)
    }

    /// Returns the trace of the most recent run, if any.
    #[must_use]
    pub fn trace(&self) -> Option<&SimulationTrace> {
        self.trace.as_ref()
    }

    /// Time steps of the most recent run, or an empty slice before the first.
    #[must_use]
    pub fn time_steps(&self) -> &[usize] {
        self.trace.as_ref().map(SimulationTrace::time_steps).unwrap_or_default()
    }

    /// Setpoints of the most recent run, or an empty slice before the first.
    #[must_use]
    pub fn setpoints(&self) -> &[f64] {
        self.trace.as_ref().map(SimulationTrace::setpoints).unwrap_or_default()
    }

    /// Errors of the most recent run, or an empty slice before the first.
    #[must_use]
    pub fn errors(&self) -> &[f64] {
        self.trace.as_ref().map(SimulationTrace::errors).unwrap_or_default()
    }

    /// Measured values of the most recent run, or an empty slice before the first.
    #[must_use]
    pub fn measured(&self) -> &[f64] {
        self.trace.as_ref().map(SimulationTrace::measured).unwrap_or_default()
    }

    /// Control outputs of the most recent run, or an empty slice before the first.
    #[must_use]
    pub fn outputs(&self) -> &[f64] {
        self.trace.as_ref().map(SimulationTrace::outputs).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{ClampPolicy, Parameter};

    #[test]
    fn demonstration_run_completes() {
        let mut sim = Simulator::new(10.0, 10.0, 2.0, -10.0).unwrap();
        let trace = sim.run(50.0, 200, 10.0).unwrap();

        assert_eq!(trace.len(), 200);
        assert_eq!(trace.measured()[0], 0.0);
        assert_eq!(trace.measured().len(), 200);
        assert_eq!(trace.errors().len(), 199);
    }

    #[test]
    fn trace_lengths_follow_duration() {
        let mut sim = Simulator::new(1.0, 2.0, 0.5, -0.5).unwrap();

        for n in [1, 2, 3, 17] {
            sim.run(5.0, n, 1.0).unwrap();
            assert_eq!(sim.time_steps().len(), n);
            assert_eq!(sim.setpoints().len(), n);
            assert_eq!(sim.measured().len(), n);
            assert_eq!(sim.errors().len(), n - 1);
            assert_eq!(sim.outputs().len(), n - 1);
        }
    }

    #[test]
    fn setpoints_are_exactly_linear() {
        let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
        sim.run(12.5, 50, 0.3).unwrap();

        for (t, &setpoint) in sim.setpoints().iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let expected = 12.5 + t as f64 * 0.3;
            assert_eq!(setpoint, expected);
        }
        assert_eq!(sim.time_steps(), (0..50).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn accessors_are_empty_before_first_run() {
        let sim = Simulator::new(1.0, 1.0, 1.0, -1.0).unwrap();

        assert!(sim.trace().is_none());
        assert!(sim.time_steps().is_empty());
        assert!(sim.setpoints().is_empty());
        assert!(sim.errors().is_empty());
        assert!(sim.measured().is_empty());
        assert!(sim.outputs().is_empty());
    }

    #[test]
    fn rejected_run_keeps_previous_trace() {
        let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
        let before = sim.run(10.0, 5, 0.0).unwrap().clone();

        let err = sim.run(-5.0, 10, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Parameter::InitialSetpoint);
        assert!(sim.run(5.0, 0, 0.0).is_err());
        assert!(sim.run(5.0, 10, -1.0).is_err());

        assert_eq!(sim.trace(), Some(&before));
    }

    #[test]
    fn update_replaces_parameters_and_reruns() {
        let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
        sim.run(10.0, 5, 0.0).unwrap();

        let trace = sim.update(2.0, 4.0, 1.0, -2.0, 20.0, 8, 1.0).unwrap();
        assert_eq!(trace.len(), 8);
        assert_eq!(trace.setpoints()[0], 20.0);

        let params = sim.parameters();
        assert_relative_eq!(params.proportional_gain(), 2.0);
        assert_relative_eq!(params.integral_gain(), 0.5);
        assert_relative_eq!(params.derivative_gain(), 2.0);
        assert_relative_eq!(params.loss_constant(), -2.0);
    }

    #[test]
    fn failed_update_changes_nothing() {
        let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
        let before = sim.run(10.0, 5, 0.0).unwrap().clone();
        let params_before = *sim.parameters();

        // Invalid loss constant.
        let err = sim.update(2.0, 2.0, 2.0, 1.0, 10.0, 5, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Parameter::LossConstant);

        // Valid parameters, invalid trajectory.
        let err = sim.update(2.0, 2.0, 2.0, -1.0, 10.0, 0, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Parameter::DurationSteps);

        assert_eq!(sim.parameters(), &params_before);
        assert_eq!(sim.trace(), Some(&before));
    }

    #[test]
    fn run_observed_reports_every_control_step() {
        let mut sim = Simulator::new(10.0, 10.0, 2.0, -10.0).unwrap();
        let mut indices = Vec::new();

        let config = RunConfig::new(50.0, 12, 10.0).unwrap();
        sim.run_observed(config, |event: &Event| -> Option<Infallible> {
            indices.push(event.index);
            None
        });

        assert_eq!(indices, (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn clamp_policy_flows_through_run_with() {
        let mut sim = Simulator::new(0.0, 1.0, 0.0, -10.0).unwrap();

        sim.run(50.0, 3, 0.0).unwrap();
        assert_eq!(sim.measured()[1], -10.0);

        let config = RunConfig::new(50.0, 3, 0.0)
            .unwrap()
            .with_clamp_policy(ClampPolicy::EveryStep);
        sim.run_with(config);
        assert_eq!(sim.measured()[1], 0.0);
    }
}
