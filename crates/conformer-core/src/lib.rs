//! # Conformers Core Library
//!
//! Numerical core of a multi-conformer molecular viewer: statistical populations
//! over simulation frames and per-frame trackball transforms for rendering.
//!
//! ## Architecture
//!
//! The crate follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Frame`), the
//!   rendering transform stack abstraction, energy tables and geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** The `Thermostat` that assigns uniform or
//!   Boltzmann populations and the `MoleculeHandler` that tracks quaternion rotation
//!   state, rotation centers and scale for every frame.
//!
//! - **[`workflows`]: The Public API.** One-call procedures tying the layers together,
//!   such as computing a population report for a loaded molecule.

pub mod core;
pub mod engine;
pub mod workflows;
