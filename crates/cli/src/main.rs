//! # heatloop
//!
//! Runs one PID heating simulation and prints the result.
//!
//! With no arguments the reference demonstration is run: gains `p = 10`,
//! integral time `10`, derivative time `2`, loss `-10`, and a setpoint
//! starting at `50` that climbs `10` per step for `200` steps.
//!
//! ```text
//! heatloop
//! heatloop --ramp-rate 0 --duration 60 --every 5
//! heatloop --format json > trace.json
//! heatloop --plot            # requires the `plot` feature
//! ```

use std::{convert::Infallible, error::Error, io::Write, process};

use clap::{Parser, ValueEnum};
use heatloop_core::Observer;
use heatloop_observers::{Overshoot, StepLogger};
use heatloop_sim::{
    ClampPolicy, ControllerParameters, DEFAULT_LOSS_CONSTANT, Event, IntegralMode, RunConfig,
    SimulationTrace, Simulator,
};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// Simulate a PID controller driving a single-zone heating process.
#[derive(Parser, Debug)]
#[command(name = "heatloop")]
#[command(version)]
#[command(about = "Simulate a PID controller driving a single-zone heating process")]
struct Args {
    /// Proportional gain.
    #[arg(short = 'p', long, default_value_t = 10.0, allow_negative_numbers = true)]
    proportional_gain: f64,

    /// Integral time; the integral gain is `p / integral_time`.
    #[arg(short = 'i', long, default_value_t = 10.0, allow_negative_numbers = true)]
    integral_time: f64,

    /// Derivative time; the derivative gain is `p * derivative_time`.
    #[arg(short = 'd', long, default_value_t = 2.0, allow_negative_numbers = true)]
    derivative_time: f64,

    /// Constant loss applied every step (must be negative).
    #[arg(long, default_value_t = DEFAULT_LOSS_CONSTANT, allow_negative_numbers = true)]
    loss: f64,

    /// Setpoint at step 0.
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    setpoint: f64,

    /// Number of time steps to simulate.
    #[arg(short = 'n', long, default_value_t = 200)]
    duration: usize,

    /// Setpoint increase per step.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    ramp_rate: f64,

    /// Clamp the first state update as well as the later ones.
    #[arg(long)]
    clamp_every_step: bool,

    /// Use a running accumulator for the integral term.
    #[arg(long)]
    running_sum: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Print one table row every N steps (the last step is always printed).
    #[arg(long, default_value_t = 10)]
    every: usize,

    /// Open an interactive plot of measured value against setpoint.
    #[arg(long)]
    plot: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned columns for reading in a terminal.
    Table,
    /// The full trace as JSON.
    Json,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let parameters = ControllerParameters::new(
        args.proportional_gain,
        args.integral_time,
        args.derivative_time,
        args.loss,
    )?;
    let config = run_config(args)?;

    info!(
        p = parameters.proportional_gain(),
        ki = parameters.integral_gain(),
        kd = parameters.derivative_gain(),
        loss = parameters.loss_constant(),
        steps = config.duration_steps(),
        "simulating"
    );

    let mut sim = Simulator::from_parameters(parameters);
    let mut logger = StepLogger::every(args.every);
    let mut overshoot = Overshoot::new();

    let trace = sim.run_observed(config, watch(&mut logger, &mut overshoot));

    match overshoot.peak() {
        Some(peak) => info!(
            step = peak.index,
            excess = peak.excess,
            "peak overshoot above setpoint"
        ),
        None => info!("process never rose above its setpoint"),
    }

    let mut stdout = std::io::stdout().lock();
    match args.format {
        Format::Table => write_table(&mut stdout, trace, args.every)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut stdout, trace)?;
            writeln!(stdout)?;
        }
    }
    drop(stdout);

    if args.plot {
        show_plot(trace)?;
    }

    Ok(())
}

/// Feeds each control step to both observers.
///
/// Both always see the event; the first action returned, if any, is passed on.
fn watch<'a>(
    logger: &'a mut StepLogger,
    overshoot: &'a mut Overshoot,
) -> impl FnMut(&Event) -> Option<Infallible> + 'a {
    move |event: &Event| -> Option<Infallible> {
        logger.observe(event).or(overshoot.observe(event))
    }
}

/// Builds the run configuration from command-line arguments.
fn run_config(args: &Args) -> Result<RunConfig, heatloop_sim::Error> {
    let clamp_policy = if args.clamp_every_step {
        ClampPolicy::EveryStep
    } else {
        ClampPolicy::SkipFirstStep
    };
    let integral_mode = if args.running_sum {
        IntegralMode::RunningSum
    } else {
        IntegralMode::Resum
    };

    Ok(RunConfig::new(args.setpoint, args.duration, args.ramp_rate)?
        .with_clamp_policy(clamp_policy)
        .with_integral_mode(integral_mode))
}

/// Writes one row per `every` time steps, plus the final step.
fn write_table<W: Write>(
    out: &mut W,
    trace: &SimulationTrace,
    every: usize,
) -> std::io::Result<()> {
    let every = every.max(1);
    let last = trace.len().saturating_sub(1);

    writeln!(
        out,
        "{:>6} | {:>12} | {:>12} | {:>12} | {:>12}",
        "step", "setpoint", "measured", "error", "output"
    )?;
    writeln!(out, "{}", "-".repeat(6 + 4 * 15))?;

    for (t, measured, setpoint) in trace.points() {
        if t % every != 0 && t != last {
            continue;
        }

        // The final time step has no control step, so no error or output.
        let error = trace
            .errors()
            .get(t)
            .map_or_else(String::new, |e| format!("{e:.3}"));
        let output = trace
            .outputs()
            .get(t)
            .map_or_else(String::new, |o| format!("{o:.3}"));
        writeln!(
            out,
            "{t:>6} | {setpoint:>12.3} | {measured:>12.3} | {error:>12} | {output:>12}"
        )?;
    }

    Ok(())
}

#[cfg(feature = "plot")]
fn show_plot(trace: &SimulationTrace) -> Result<(), Box<dyn Error>> {
    use heatloop_observers::{PlotObserver, ShowConfig};

    let mut obs = PlotObserver::new(["Measured", "Setpoint"]);
    obs.record_trace(trace);
    obs.show(ShowConfig::new().title("heatloop").legend())?;
    Ok(())
}

#[cfg(not(feature = "plot"))]
fn show_plot(_trace: &SimulationTrace) -> Result<(), Box<dyn Error>> {
    tracing::warn!("plotting requested, but heatloop was built without the `plot` feature");
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
///
/// Logs go to stderr so that stdout carries only the table or JSON trace.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
