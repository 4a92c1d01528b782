use heatloop_core::Observer;
use heatloop_sim::Event;

/// The largest excursion of the process above its setpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Time step at which the excursion occurred.
    pub index: usize,

    /// `measured - setpoint` at that step.
    pub excess: f64,

    pub measured: f64,
    pub setpoint: f64,
}

/// An observer that tracks overshoot during a run.
///
/// The measured value at each time step, including the last one, is compared
/// with the setpoint at the same time step. Only excursions strictly above the
/// setpoint count, and the earliest step wins a tie.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overshoot {
    peak: Option<Peak>,
}

impl Overshoot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the largest excursion seen, or `None` if the process never
    /// rose above its setpoint.
    #[must_use]
    pub fn peak(&self) -> Option<Peak> {
        self.peak
    }
}

impl Overshoot {
    fn consider(&mut self, index: usize, measured: f64, setpoint: f64) {
        let excess = measured - setpoint;
        let is_new_peak = excess > 0.0 && self.peak.is_none_or(|peak| excess > peak.excess);

        if is_new_peak {
            self.peak = Some(Peak {
                index,
                excess,
                measured,
                setpoint,
            });
        }
    }
}

/// Compares both samples an event touches, so the final time step of a run
/// is covered even though no control step starts from it.
impl<A> Observer<Event, A> for Overshoot {
    fn observe(&mut self, event: &Event) -> Option<A> {
        self.consider(event.index, event.measured, event.setpoint);
        self.consider(event.index + 1, event.next_measured, event.next_setpoint);
        None
    }
}

/// Allows `&mut Overshoot` to be passed to a run so [`Overshoot::peak`] can be
/// read afterwards.
impl<A> Observer<Event, A> for &mut Overshoot {
    fn observe(&mut self, event: &Event) -> Option<A> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use heatloop_sim::{RunConfig, Simulator};

    #[test]
    fn finds_peak_above_setpoint() {
        // Scenario with a known first-step overshoot: 0 -> 19 against a setpoint of 10.
        let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
        let mut overshoot = Overshoot::new();

        let trace = sim.run_observed(RunConfig::new(10.0, 5, 0.0).unwrap(), &mut overshoot);

        let peak = overshoot.peak().expect("process overshoots");
        assert_eq!(peak.index, 1);
        assert_relative_eq!(peak.excess, 9.0);
        assert_relative_eq!(peak.measured, trace.measured()[1]);
        assert_relative_eq!(peak.setpoint, 10.0);
    }

    #[test]
    fn final_sample_is_compared() {
        // Two time steps: the only overshoot is measured[1] = 19 against 10.
        let mut sim = Simulator::new(1.0, 1.0, 0.0, -1.0).unwrap();
        let mut overshoot = Overshoot::new();

        let trace = sim.run_observed(RunConfig::new(10.0, 2, 0.0).unwrap(), &mut overshoot);
        assert_eq!(trace.measured(), [0.0, 19.0]);

        let peak = overshoot.peak().expect("last sample overshoots");
        assert_eq!(peak.index, 1);
        assert_relative_eq!(peak.excess, 9.0);
    }

    #[test]
    fn peak_matches_trace_maximum() {
        let mut sim = Simulator::new(5.0, 1.0, 3.0, -1.0).unwrap();
        let mut overshoot = Overshoot::new();

        let trace = sim.run_observed(RunConfig::new(10.0, 40, 0.5).unwrap(), &mut overshoot);
        let (index, excess) = trace
            .points()
            .map(|(t, measured, setpoint)| (t, measured - setpoint))
            .fold((0, f64::NEG_INFINITY), |best, (t, excess)| {
                if excess > best.1 { (t, excess) } else { best }
            });

        let peak = overshoot.peak().expect("large gain overshoots");
        assert_eq!(peak.index, index);
        assert_relative_eq!(peak.excess, excess);
    }

    #[test]
    fn no_peak_when_process_stays_below_setpoint() {
        // Zero gain: the heater never turns on.
        let mut sim = Simulator::new(0.0, 1.0, 0.0, -1.0).unwrap();
        let mut overshoot = Overshoot::new();

        sim.run_observed(RunConfig::new(10.0, 20, 0.0).unwrap(), &mut overshoot);

        assert_eq!(overshoot.peak(), None);
    }
}
