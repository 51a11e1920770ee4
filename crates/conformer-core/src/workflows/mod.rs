//! High-level procedures combining the core models with the engine.

pub mod populate;
