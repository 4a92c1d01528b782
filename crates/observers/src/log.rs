use heatloop_core::Observer;
use heatloop_sim::Event;
use tracing::{debug, trace};

/// An observer that records control steps through `tracing`.
///
/// Every `every`-th step is emitted at `TRACE` level. Steps where a negative
/// control action was clamped to zero are always emitted at `DEBUG` level.
#[derive(Debug, Clone, Copy)]
pub struct StepLogger {
    every: usize,
    logged: usize,
}

impl StepLogger {
    /// Creates a logger that records every step.
    #[must_use]
    pub fn new() -> Self {
        Self::every(1)
    }

    /// Creates a logger that records one step out of every `every`.
    ///
    /// A value of zero is treated as one.
    #[must_use]
    pub fn every(every: usize) -> Self {
        Self {
            every: every.max(1),
            logged: 0,
        }
    }

    /// Number of steps recorded so far.
    #[must_use]
    pub fn logged(&self) -> usize {
        self.logged
    }
}

impl Default for StepLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Observer<Event, A> for StepLogger {
    fn observe(&mut self, event: &Event) -> Option<A> {
        if event.is_saturated() {
            debug!(
                step = event.index,
                action = event.unclamped_output(),
                "control action clamped to zero"
            );
        }

        if event.index % self.every == 0 {
            trace!(
                step = event.index,
                setpoint = event.setpoint,
                measured = event.measured,
                error = event.error,
                p = event.proportional,
                i = event.integral,
                d = event.derivative,
                output = event.output,
                "control step"
            );
            self.logged += 1;
        }

        None
    }
}

/// Allows `&mut StepLogger` to be passed to a run so [`StepLogger::logged`]
/// can be read afterwards.
impl<A> Observer<Event, A> for &mut StepLogger {
    fn observe(&mut self, event: &Event) -> Option<A> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use heatloop_sim::{RunConfig, Simulator};

    #[test]
    fn records_every_nth_step() {
        let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
        let mut logger = StepLogger::every(3);

        // Ten time steps give nine control steps: 0, 3, 6 are recorded.
        sim.run_observed(RunConfig::new(10.0, 10, 0.0).unwrap(), &mut logger);

        assert_eq!(logger.logged(), 3);
    }

    #[test]
    fn zero_interval_records_everything() {
        let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
        let mut logger = StepLogger::every(0);

        sim.run_observed(RunConfig::new(10.0, 5, 0.0).unwrap(), &mut logger);

        assert_eq!(logger.logged(), 4);
    }

    #[test]
    fn never_returns_an_action() {
        let mut logger = StepLogger::new();
        let event = Event {
            index: 0,
            setpoint: 1.0,
            measured: 0.0,
            error: 1.0,
            proportional: 1.0,
            integral: 1.0,
            derivative: 0.0,
            output: 2.0,
            next_setpoint: 1.0,
            next_measured: 1.0,
        };

        let action: Option<Infallible> = logger.observe(&event);
        assert!(action.is_none());
    }
}
