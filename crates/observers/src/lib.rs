//! Reusable observers for heatloop simulations.
//!
//! This crate provides [`Observer`] implementations that watch the control
//! steps of a [`Simulator`] run.
//!
//! - [`StepLogger`]: records control steps through `tracing`
//! - [`Overshoot`]: tracks the largest excursion of the process above its
//!   setpoint
//!
//! # Features
//!
//! - `plot`: Enables [`PlotObserver`] for visualizing a run via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: heatloop_core::Observer
//! [`Simulator`]: heatloop_sim::Simulator

mod log;
mod overshoot;

#[cfg(feature = "plot")]
mod plot;

pub use log::StepLogger;
pub use overshoot::{Overshoot, Peak};

#[cfg(feature = "plot")]
pub use plot::{EVENT_TRACES, PlotObserver, Plottable, ShowConfig};
