use std::collections::BTreeSet;

use crate::capture::context::{DrawingContext, RecorderOpts};
use crate::foundation::core::{CanvasSize, FrameCount};
use crate::foundation::error::{RecorderError, RecorderResult};
use crate::frame::counter::FrameCounter;
use crate::trace::compiler::{DownloadHost, TraceArtifact, compile_trace, offer_download};
use crate::trace::encoder::ValueEncoder;
use crate::trace::registry::IdentityRegistry;
use crate::trace::statement::{Statement, Trace};
use crate::value::model::Value;

/// Drawing context that records every call made through it.
///
/// Calls are forwarded to the wrapped context first; the result is handed back unchanged. Recording
/// is a side effect only and never fails a call.
pub struct InstrumentedContext<C> {
    inner: C,
    methods: BTreeSet<String>,
    properties: Vec<(String, Value)>,
    session: CaptureSession,
}

struct CaptureSession {
    frames: FrameCounter,
    last_frame: FrameCount,
    last_size: CanvasSize,
    trace: Trace,
    encoder: ValueEncoder,
    opts: RecorderOpts,
}

impl<C: DrawingContext> InstrumentedContext<C> {
    /// Wrap `inner` and start a capture session. The trace opens with the current canvas size.
    #[tracing::instrument(skip_all)]
    pub fn new(inner: C, frames: FrameCounter, opts: RecorderOpts) -> Self {
        let methods: BTreeSet<String> = inner.method_names().into_iter().collect();
        let properties = inner.properties();
        let size = inner.canvas_size();

        let mut trace = Trace::new();
        trace.push(Statement::SetCanvasWidth(size.width));
        trace.push(Statement::SetCanvasHeight(size.height));

        tracing::debug!(
            methods = methods.len(),
            width = size.width,
            height = size.height,
            "capture session started"
        );

        Self {
            inner,
            methods,
            properties,
            session: CaptureSession {
                last_frame: frames.current(),
                frames,
                last_size: size,
                trace,
                encoder: ValueEncoder::new(),
                opts,
            },
        }
    }

    /// Statements recorded so far.
    pub fn trace(&self) -> &Trace {
        &self.session.trace
    }

    /// Handle names assigned so far.
    pub fn registry(&self) -> &IdentityRegistry {
        self.session.encoder.registry()
    }

    /// Options this session was started with.
    pub fn opts(&self) -> &RecorderOpts {
        &self.session.opts
    }

    /// Property value captured when the session started.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// The wrapped context. Calls made on it directly are not recorded.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Stop recording and return the wrapped context.
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Compile the current trace into a script.
    pub fn compile_trace(&self) -> String {
        compile_trace(
            &self.session.trace,
            self.registry().kinds(),
            self.session.opts.header_comment(),
        )
    }

    /// Compiled trace packaged for download.
    pub fn artifact(&self) -> TraceArtifact {
        TraceArtifact::new(
            self.session.opts.download_filename(),
            self.compile_trace(),
        )
    }

    /// Offer the compiled trace through `host`. Failures are not reported.
    pub fn download_trace(&self, host: &mut dyn DownloadHost) {
        offer_download(host, &self.artifact());
    }
}

impl CaptureSession {
    fn record(&mut self, method: &str, args: &[Value], result: &Value, size: CanvasSize) {
        let frame = self.frames.current();
        if frame != self.last_frame {
            tracing::debug!(from = self.last_frame.0, to = frame.0, "frame boundary");
            self.last_frame = frame;
            self.trace.push(Statement::Yield);
        }

        if size != self.last_size {
            tracing::debug!(width = size.width, height = size.height, "canvas resized");
            self.last_size = size;
            self.trace.push(Statement::SetCanvasWidth(size.width));
            self.trace.push(Statement::SetCanvasHeight(size.height));
        }

        let args = args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                self.encoder
                    .encode_argument(arg, &mut self.trace, method, i)
            })
            .collect();
        let target = self.encoder.encode_result(result);

        self.trace.push(Statement::Call {
            target,
            method: method.to_string(),
            args,
        });
    }
}

impl<C: DrawingContext> DrawingContext for InstrumentedContext<C> {
    fn method_names(&self) -> Vec<String> {
        self.methods.iter().cloned().collect()
    }

    fn properties(&self) -> Vec<(String, Value)> {
        self.properties.clone()
    }

    fn call(&mut self, method: &str, args: &[Value]) -> RecorderResult<Value> {
        if !self.methods.contains(method) {
            return Err(RecorderError::unknown_method(method));
        }
        let result = self.inner.call(method, args)?;
        let size = self.inner.canvas_size();
        self.session.record(method, args, &result, size);
        Ok(result)
    }

    fn canvas_size(&self) -> CanvasSize {
        self.inner.canvas_size()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/interceptor.rs"]
mod tests;
