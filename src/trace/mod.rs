//! Trace construction: typed statements, handle naming, value encoding and script compilation.
//!
//! Encoding produces typed [`statement::Expr`] / [`statement::Statement`] records. Text is only
//! produced when a statement is displayed or the trace is compiled into a script.

/// Script assembly and export.
pub mod compiler;
/// Runtime value to script expression encoding.
pub mod encoder;
/// Symbolic names for opaque handles.
pub mod registry;
/// Statement and expression records.
pub mod statement;
