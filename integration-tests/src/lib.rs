//! Shared fixtures for the heatloop integration tests.

use heatloop_sim::{Error, SimulationTrace, Simulator};

/// Gains used by the reference demonstration.
pub const REFERENCE_GAINS: (f64, f64, f64, f64) = (10.0, 10.0, 2.0, -10.0);

/// Builds a simulator with the reference demonstration gains.
///
/// # Panics
///
/// Never, the reference gains are valid.
#[must_use]
pub fn reference_simulator() -> Simulator {
    let (p, ti, td, loss) = REFERENCE_GAINS;
    Simulator::new(p, ti, td, loss).expect("reference gains are valid")
}

/// Runs a fresh simulator and returns an owned copy of its trace.
///
/// # Errors
///
/// Propagates any validation error from construction or the run.
pub fn run_once(
    gains: (f64, f64, f64, f64),
    initial_setpoint: f64,
    duration_steps: usize,
    ramp_rate: f64,
) -> Result<SimulationTrace, Error> {
    let (p, ti, td, loss) = gains;
    let mut sim = Simulator::new(p, ti, td, loss)?;
    sim.run(initial_setpoint, duration_steps, ramp_rate).cloned()
}
