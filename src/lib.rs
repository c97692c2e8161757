//! gl-recorder captures every call made against a WebGL drawing context and turns the session
//! into a replayable JavaScript trace.
//!
//! # Pipeline overview
//!
//! 1. **Intercept**: [`RecordingCanvas`] stands in for the host's context factory and hands out an
//!    [`InstrumentedContext`] for `"webgl"` / `"experimental-webgl"` requests.
//! 2. **Observe**: every call is forwarded to the real context; the result goes back to the caller
//!    unchanged.
//! 3. **Encode**: arguments and results become typed [`Statement`]s. Opaque handles get stable
//!    symbolic names from the [`IdentityRegistry`]; frame boundaries seen on the [`FrameCounter`]
//!    become `yield;` markers and canvas resizes become size assignments.
//! 4. **Export**: the trace compiles into an `async function* render(gl)` script and is offered as
//!    `trace.js` through a [`DownloadHost`].
//!
//! Recording never changes what the caller observes: values the recorder cannot encode are logged
//! and written as `null`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod capture;
mod foundation;
mod frame;
mod trace;
mod value;

pub use capture::context::{
    ContextFactory, DrawingContext, RECORDED_CONTEXT_TYPES, RecorderOpts, RecordingCanvas,
    RequestedContext, is_recorded_context_type,
};
pub use capture::interceptor::InstrumentedContext;
pub use capture::log::{LogEntry, LoggedContext, LoggedValue, TaggedValue, parse_log, replay_log};
pub use foundation::core::{CanvasSize, FrameCount};
pub use foundation::error::{RecorderError, RecorderResult};
pub use frame::counter::FrameCounter;
pub use frame::scheduler::{AnimationScheduler, FrameCallback, ManualScheduler, ObservedScheduler};
pub use trace::compiler::{
    DEFAULT_TRACE_FILENAME, DirectoryDownloadHost, DownloadHost, LinkId, TRACE_MIME_TYPE,
    TraceArtifact, compile_trace, offer_download,
};
pub use trace::encoder::{ValueEncoder, bitmap_data_url};
pub use trace::registry::IdentityRegistry;
pub use trace::statement::{Expr, Statement, SymbolicRef, Trace};
pub use value::handle::{Handle, ResourceKind};
pub use value::model::{ImageBitmap, ImageElement, Value};
pub use value::typed::{ElementType, TypedArray};
