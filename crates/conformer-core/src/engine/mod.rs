//! # Engine Module
//!
//! Stateful components driven by the viewer's controllers.
//!
//! - [`thermostat`] - Ensemble policy and per-frame population assignment
//! - [`handler`] - Per-frame trackball rotation, rotation centers and scale
//! - [`config`] - Population configuration and its builder
//! - [`error`] - The failure taxonomy shared by the engine

pub mod config;
pub mod error;
pub mod handler;
pub mod thermostat;
