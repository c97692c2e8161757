use crate::capture::interceptor::InstrumentedContext;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::RecorderResult;
use crate::frame::counter::FrameCounter;
use crate::trace::compiler::DEFAULT_TRACE_FILENAME;
use crate::value::model::Value;

/// Context type identifiers that get recorded.
pub const RECORDED_CONTEXT_TYPES: [&str; 2] = ["webgl", "experimental-webgl"];

/// Whether a request for `context_type` is recorded.
pub fn is_recorded_context_type(context_type: &str) -> bool {
    RECORDED_CONTEXT_TYPES.contains(&context_type)
}

/// A stateful, call-based drawing context.
///
/// The method set is discovered at runtime through [`DrawingContext::method_names`]; nothing
/// about the API is hardcoded.
pub trait DrawingContext {
    /// Names of every callable method.
    fn method_names(&self) -> Vec<String>;
    /// Non-method properties and their values.
    fn properties(&self) -> Vec<(String, Value)>;
    /// Invoke `method` with `args`.
    fn call(&mut self, method: &str, args: &[Value]) -> RecorderResult<Value>;
    /// Current size of the drawing surface.
    fn canvas_size(&self) -> CanvasSize;
}

/// Host capability that hands out drawing contexts (`canvas.getContext`).
pub trait ContextFactory {
    /// Context type returned by this factory.
    type Context: DrawingContext;

    /// Request a context of `context_type`. `options` are passed along opaquely.
    fn get_context(
        &mut self,
        context_type: &str,
        options: Option<&serde_json::Value>,
    ) -> Option<Self::Context>;
}

/// Options for recorded contexts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecorderOpts {
    pub(crate) download_filename: String,
    pub(crate) header_comment: Option<String>,
}

impl Default for RecorderOpts {
    fn default() -> Self {
        Self {
            download_filename: DEFAULT_TRACE_FILENAME.to_string(),
            header_comment: Some("Recorded with gl-recorder".to_string()),
        }
    }
}

impl RecorderOpts {
    /// Return options with a different export file name.
    pub fn with_download_filename(mut self, filename: impl Into<String>) -> Self {
        self.download_filename = filename.into();
        self
    }

    /// Return options with a different header comment, or none.
    pub fn with_header_comment(mut self, header: Option<String>) -> Self {
        self.header_comment = header;
        self
    }

    /// Export file name.
    pub fn download_filename(&self) -> &str {
        &self.download_filename
    }

    /// Header comment placed at the top of compiled scripts.
    pub fn header_comment(&self) -> Option<&str> {
        self.header_comment.as_deref()
    }
}

/// What a [`RecordingCanvas`] hands back for a context request.
pub enum RequestedContext<C> {
    /// Recorded WebGL context.
    Recorded(InstrumentedContext<C>),
    /// Any other context type, exactly as the factory returned it.
    Passthrough(C),
}

impl<C> RequestedContext<C> {
    /// The instrumented context, if this request was recorded.
    pub fn recorded(&self) -> Option<&InstrumentedContext<C>> {
        match self {
            RequestedContext::Recorded(ctx) => Some(ctx),
            RequestedContext::Passthrough(_) => None,
        }
    }

    /// Owned instrumented context, if this request was recorded.
    pub fn into_recorded(self) -> Option<InstrumentedContext<C>> {
        match self {
            RequestedContext::Recorded(ctx) => Some(ctx),
            RequestedContext::Passthrough(_) => None,
        }
    }
}

impl<C: DrawingContext> DrawingContext for RequestedContext<C> {
    fn method_names(&self) -> Vec<String> {
        match self {
            RequestedContext::Recorded(ctx) => ctx.method_names(),
            RequestedContext::Passthrough(ctx) => ctx.method_names(),
        }
    }

    fn properties(&self) -> Vec<(String, Value)> {
        match self {
            RequestedContext::Recorded(ctx) => ctx.properties(),
            RequestedContext::Passthrough(ctx) => ctx.properties(),
        }
    }

    fn call(&mut self, method: &str, args: &[Value]) -> RecorderResult<Value> {
        match self {
            RequestedContext::Recorded(ctx) => ctx.call(method, args),
            RequestedContext::Passthrough(ctx) => ctx.call(method, args),
        }
    }

    fn canvas_size(&self) -> CanvasSize {
        match self {
            RequestedContext::Recorded(ctx) => ctx.canvas_size(),
            RequestedContext::Passthrough(ctx) => ctx.canvas_size(),
        }
    }
}

/// Context factory wrapper that records WebGL contexts.
pub struct RecordingCanvas<F> {
    factory: F,
    frames: FrameCounter,
    opts: RecorderOpts,
}

impl<F: ContextFactory> RecordingCanvas<F> {
    /// Wrap `factory`; recorded contexts read frame boundaries off `frames`.
    pub fn new(factory: F, frames: FrameCounter) -> Self {
        Self::with_opts(factory, frames, RecorderOpts::default())
    }

    /// Wrap `factory` with explicit options.
    pub fn with_opts(factory: F, frames: FrameCounter, opts: RecorderOpts) -> Self {
        Self {
            factory,
            frames,
            opts,
        }
    }

    /// Request a context. WebGL requests start a fresh capture session each time.
    pub fn get_context(
        &mut self,
        context_type: &str,
        options: Option<&serde_json::Value>,
    ) -> Option<RequestedContext<F::Context>> {
        let context = self.factory.get_context(context_type, options)?;
        if !is_recorded_context_type(context_type) {
            return Some(RequestedContext::Passthrough(context));
        }
        Some(RequestedContext::Recorded(InstrumentedContext::new(
            context,
            self.frames.clone(),
            self.opts.clone(),
        )))
    }

    /// The wrapped factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Frame counter shared with recorded contexts.
    pub fn frames(&self) -> &FrameCounter {
        &self.frames
    }
}
