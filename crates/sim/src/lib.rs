//! A discrete-time PID controller driving a single-zone heating process.
//!
//! Given controller gains and a setpoint trajectory, the [`Simulator`]
//! produces a time series of simulated measured temperature versus commanded
//! setpoint, useful for building tuning intuition or for plotting.
//!
//! # Overview
//!
//! - [`ControllerParameters`]: validated gains and process loss
//! - [`RunConfig`]: setpoint ramp, duration, and loop options
//!   ([`ClampPolicy`], [`IntegralMode`])
//! - [`Simulator`]: owns the parameters and the most recent
//!   [`SimulationTrace`]
//! - [`Event`]: emitted to an [`Observer`](heatloop_core::Observer) after
//!   each control step
//!
//! # Example
//!
//! ```
//! use heatloop_sim::Simulator;
//!
//! let mut sim = Simulator::new(10.0, 10.0, 2.0, -10.0)?;
//! let trace = sim.run(50.0, 200, 10.0)?;
//!
//! assert_eq!(trace.measured()[0], 0.0);
//! assert_eq!(trace.setpoints()[199], 50.0 + 199.0 * 10.0);
//! # Ok::<(), heatloop_sim::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`SimulationTrace`],
//!   [`ClampPolicy`], and [`IntegralMode`].

mod config;
mod control;
mod error;
mod event;
mod params;
mod simulator;
mod trace;

pub use config::{ClampPolicy, IntegralMode, RunConfig};
pub use error::{Error, Parameter};
pub use event::Event;
pub use params::{ControllerParameters, DEFAULT_LOSS_CONSTANT};
pub use simulator::Simulator;
pub use trace::SimulationTrace;
