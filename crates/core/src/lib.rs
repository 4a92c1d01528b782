//! Core traits and types for heatloop.
//!
//! This crate defines the shared abstractions that the simulator, observers,
//! and command-line front end build on:
//!
//! - [`Observer`]: receives events from a running simulation and optionally
//!   returns control actions
//! - [`constraint`]: type-level numeric constraints checked at construction,
//!   used to validate controller and run parameters

pub mod constraint;
mod observer;

pub use observer::Observer;
