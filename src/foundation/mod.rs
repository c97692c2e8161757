//! Shared primitives: canvas geometry, frame counts and the crate error type.

/// Canvas dimensions and frame counts.
pub mod core;
/// Crate error type.
pub mod error;
