//! Runtime values exchanged with a drawing context.
//!
//! Everything a caller can pass into, or get back from, a context method is a [`Value`]. Opaque
//! resource objects are [`Handle`]s whose identity is their allocation, not their contents.

/// Opaque resource handles and their kinds.
pub mod handle;
/// The [`Value`] enum and image payloads.
pub mod model;
/// Typed views over binary data.
pub mod typed;
