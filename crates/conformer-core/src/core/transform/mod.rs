//! Rendering transform stack.
//!
//! Renderers expose an ambient "current model-view matrix" that is mutated in place.
//! [`TransformStack`] captures the operations the engine needs from it, and
//! [`MatrixStack`] is an in-memory implementation for renderers without one.

pub mod stack;

pub use stack::{MatrixStack, TransformStack};
