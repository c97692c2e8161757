//! Interception of drawing-context calls.
//!
//! [`context::RecordingCanvas`] stands in front of the host's context factory. Requests for a WebGL
//! context get an [`interceptor::InstrumentedContext`] that forwards every call to the real context
//! and records it; every other request is passed through untouched.

/// Context and factory boundaries, recorder options.
pub mod context;
/// The instrumented context and its capture session.
pub mod interceptor;
/// JSON-lines capture logs replayed through the recorder.
pub mod log;
