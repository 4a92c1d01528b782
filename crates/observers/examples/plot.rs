//! Interactive visualizations of heatloop runs.
//!
//! Each mode runs the simulator and opens an interactive plot window showing
//! the measured value against the setpoint.
//!
//! # Usage
//!
//! ```text
//! cargo run --example plot --features plot -- step
//! cargo run --example plot --features plot -- ramp
//! cargo run --example plot --features plot -- gains
//! cargo run --example plot --features plot -- gains 4.0
//! ```
//!
//! # Modes
//!
//! - **step**: Hold a constant setpoint of 50. Shows the process rising,
//!   overshooting, and the heater output switching off.
//!
//! - **ramp**: The reference demonstration: a setpoint starting at 50 and
//!   climbing 10 per step for 200 steps.
//!
//! - **gains [p]**: Overlay two runs with different proportional gains
//!   against the same ramp. Try `2.0`, `4.0`, `20.0`.

use std::{convert::Infallible, error::Error};

use heatloop_core::Observer;
use heatloop_observers::{EVENT_TRACES, Overshoot, PlotObserver, ShowConfig};
use heatloop_sim::{ControllerParameters, Event, RunConfig, Simulator};

fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "step".into());
    match mode.as_str() {
        "step" => step(),
        "ramp" => ramp(),
        "gains" => {
            let p = std::env::args()
                .nth(2)
                .as_deref()
                .map(str::parse::<f64>)
                .transpose()
                .unwrap_or_else(|_| {
                    eprintln!("Invalid gain: expected a number, e.g. 4.0");
                    std::process::exit(1);
                })
                .unwrap_or(4.0);
            gains(p)
        }
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: plot [step|ramp|gains [p]]");
            std::process::exit(1);
        }
    }
}

// --- Step --------------------------------------------------------------------

/// Constant setpoint with the event-level traces, including heater output.
fn step() -> Result<(), Box<dyn Error>> {
    let mut sim = Simulator::new(2.0, 5.0, 0.5, -2.0)?;
    let mut obs = PlotObserver::new(EVENT_TRACES);
    let mut overshoot = Overshoot::new();

    let config = RunConfig::new(50.0, 80, 0.0)?;
    sim.run_observed(config, |event: &Event| -> Option<Infallible> {
        obs.observe(event).or(overshoot.observe(event))
    });

    let title = match overshoot.peak() {
        Some(peak) => format!("Step: overshoot {:.1} at step {}", peak.excess, peak.index),
        None => "Step: no overshoot".to_owned(),
    };
    obs.show(ShowConfig::new().title(title).legend())?;
    Ok(())
}

// --- Ramp --------------------------------------------------------------------

/// The reference demonstration, plotted over every time step.
fn ramp() -> Result<(), Box<dyn Error>> {
    let mut sim = Simulator::new(10.0, 10.0, 2.0, -10.0)?;
    let trace = sim.run(50.0, 200, 10.0)?;

    let mut obs = PlotObserver::new(["Measured", "Setpoint"]);
    obs.record_trace(trace);

    obs.show(
        ShowConfig::new()
            .title("Ramp: 50 + 10·t")
            .legend()
            .y_label("temperature"),
    )?;
    Ok(())
}

// --- Gains -------------------------------------------------------------------

/// Overlays the reference gains with a second proportional gain.
#[allow(clippy::cast_precision_loss)]
fn gains(p: f64) -> Result<(), Box<dyn Error>> {
    let config = RunConfig::new(50.0, 100, 5.0)?;
    let reference = ControllerParameters::new(10.0, 10.0, 2.0, -10.0)?;
    let candidate = ControllerParameters::new(p, 10.0, 2.0, -10.0)?;

    let mut sim = Simulator::from_parameters(reference);
    let reference_measured = sim.run_with(config).measured().to_vec();
    let trace = sim.update_with(candidate, config);

    let candidate_name = format!("Measured (p = {p})");
    let mut obs = PlotObserver::new([
        "Setpoint",
        "Measured (p = 10)",
        candidate_name.as_str(),
    ]);
    for (t, measured, setpoint) in trace.points() {
        obs.record(
            t as f64,
            [Some(setpoint), Some(reference_measured[t]), Some(measured)],
        );
    }

    obs.show(ShowConfig::new().title("Gain comparison").legend())?;
    Ok(())
}
