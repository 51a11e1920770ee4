//! # Core Module
//!
//! Fundamental building blocks consumed by the engine layer.
//!
//! - **Molecular Representation** ([`models`]) - Frames (conformers) and the molecule holding them
//! - **Rendering Transforms** ([`transform`]) - The model-view transform stack abstraction
//! - **Energy Tables** ([`io`]) - Per-frame energies read from files or pasted text
//! - **Geometry** ([`utils`]) - Axis/angle and centroid helpers

pub mod io;
pub mod models;
pub mod transform;
pub mod utils;
