use std::cell::Cell;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::capture::context::{
    ContextFactory, DrawingContext, RecorderOpts, RecordingCanvas, RequestedContext,
};
use crate::capture::interceptor::InstrumentedContext;
use crate::foundation::core::{CanvasSize, FrameCount};
use crate::foundation::error::{RecorderError, RecorderResult};
use crate::frame::counter::FrameCounter;
use crate::frame::scheduler::ManualScheduler;
use crate::value::handle::{Handle, ResourceKind};
use crate::value::model::{ImageBitmap, ImageElement, Value};
use crate::value::typed::{ElementType, TypedArray};

/// One call in a capture log.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    /// Frame count when the call was made. Must not decrease.
    #[serde(default)]
    pub frame: u64,
    /// Canvas size at call time; keeps the previous size when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasSize>,
    /// Context method name.
    pub method: String,
    /// Arguments.
    #[serde(default)]
    pub args: Vec<LoggedValue>,
    /// Value the real context returned.
    #[serde(default = "LoggedValue::undefined")]
    pub result: LoggedValue,
}

/// JSON form of a [`Value`].
///
/// Primitives and arrays are plain JSON; everything else is a single-key object naming the kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum LoggedValue {
    /// `null`
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// Text.
    String(String),
    /// Plain array.
    Array(Vec<LoggedValue>),
    /// Everything that is not plain JSON.
    Tagged(TaggedValue),
}

impl LoggedValue {
    fn undefined() -> Self {
        LoggedValue::Tagged(TaggedValue::Opaque("undefined".to_string()))
    }
}

/// Non-JSON values in a capture log.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggedValue {
    /// Raw bytes of an `ArrayBuffer`, as signed bytes.
    Buffer(Vec<i8>),
    /// Typed view.
    Typed {
        /// Constructor name.
        #[serde(rename = "type")]
        element_type: ElementType,
        /// Elements as numbers.
        data: Vec<f64>,
    },
    /// Loaded image.
    Image {
        /// Image URL.
        src: String,
    },
    /// Decoded bitmap.
    Bitmap {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Straight-alpha RGBA8 pixels.
        rgba: Vec<u8>,
    },
    /// Resource handle; equal `(kind, id)` pairs are the same resource.
    Handle {
        /// Resource kind.
        kind: ResourceKind,
        /// Log-local id.
        id: u64,
    },
    /// Anything else, described. `"undefined"` stands for no value.
    Opaque(String),
}

/// Maps log-local handle ids to live handles so repeated ids keep their identity.
#[derive(Debug, Default)]
struct HandleTable {
    handles: HashMap<(ResourceKind, u64), Handle>,
}

impl HandleTable {
    fn value(&mut self, logged: &LoggedValue) -> Value {
        match logged {
            LoggedValue::Null => Value::Null,
            LoggedValue::Bool(b) => Value::Bool(*b),
            LoggedValue::Number(n) => Value::Number(*n),
            LoggedValue::String(s) => Value::String(s.clone()),
            LoggedValue::Array(items) => Value::Array(items.iter().map(|v| self.value(v)).collect()),
            LoggedValue::Tagged(tagged) => match tagged {
                TaggedValue::Buffer(bytes) => {
                    Value::ArrayBuffer(Arc::from(bytes.iter().map(|&b| b as u8).collect::<Vec<_>>()))
                }
                TaggedValue::Typed { element_type, data } => {
                    Value::TypedArray(TypedArray::from_numbers(*element_type, data))
                }
                TaggedValue::Image { src } => Value::Image(ImageElement::new(src.clone())),
                TaggedValue::Bitmap {
                    width,
                    height,
                    rgba,
                } => Value::ImageBitmap(ImageBitmap {
                    width: *width,
                    height: *height,
                    rgba8: Arc::new(rgba.clone()),
                }),
                TaggedValue::Handle { kind, id } => Value::Handle(
                    self.handles
                        .entry((*kind, *id))
                        .or_insert_with(|| Handle::new(*kind))
                        .clone(),
                ),
                TaggedValue::Opaque(desc) if desc == "undefined" => Value::Undefined,
                TaggedValue::Opaque(desc) => Value::Opaque(desc.clone()),
            },
        }
    }
}

/// Headless context that answers calls with the results a capture log recorded.
pub struct LoggedContext {
    methods: BTreeSet<String>,
    results: VecDeque<(String, Value)>,
    canvas: Rc<Cell<CanvasSize>>,
}

impl LoggedContext {
    /// Calls still expected.
    pub fn remaining(&self) -> usize {
        self.results.len()
    }
}

impl DrawingContext for LoggedContext {
    fn method_names(&self) -> Vec<String> {
        self.methods.iter().cloned().collect()
    }

    fn properties(&self) -> Vec<(String, Value)> {
        Vec::new()
    }

    fn call(&mut self, method: &str, _args: &[Value]) -> RecorderResult<Value> {
        match self.results.pop_front() {
            Some((expected, result)) if expected == method => Ok(result),
            Some((expected, _)) => Err(RecorderError::context(format!(
                "log expected a call to '{expected}', got '{method}'"
            ))),
            None => Err(RecorderError::context(format!(
                "log has no entry left for '{method}'"
            ))),
        }
    }

    fn canvas_size(&self) -> CanvasSize {
        self.canvas.get()
    }
}

struct LogFactory {
    context: Option<LoggedContext>,
}

impl ContextFactory for LogFactory {
    type Context = LoggedContext;

    fn get_context(
        &mut self,
        _context_type: &str,
        _options: Option<&serde_json::Value>,
    ) -> Option<LoggedContext> {
        self.context.take()
    }
}

/// Parse a JSON-lines capture log. Blank lines are skipped.
pub fn parse_log(text: &str) -> RecorderResult<Vec<LogEntry>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|err| {
                RecorderError::validation(format!("capture log line {}: {err}", i + 1))
            })
        })
        .collect()
}

/// Replay `entries` through a recorded WebGL context and return it, ready to compile.
///
/// The first entry's frame and size are the starting state, so the trace opens without a yield.
/// Each later frame jump runs one [`ManualScheduler`] frame and then moves the counter straight to
/// the entry's frame, so large gaps cost the same as small ones. The canvas takes each entry's
/// size right before its call.
#[tracing::instrument(skip_all, fields(entries = entries.len()))]
pub fn replay_log(
    entries: &[LogEntry],
    opts: RecorderOpts,
) -> RecorderResult<InstrumentedContext<LoggedContext>> {
    let mut table = HandleTable::default();
    let calls: Vec<(String, Vec<Value>, Value)> = entries
        .iter()
        .map(|e| {
            let args = e.args.iter().map(|a| table.value(a)).collect();
            (e.method.clone(), args, table.value(&e.result))
        })
        .collect();

    let initial = entries
        .first()
        .and_then(|e| e.canvas)
        .unwrap_or_default();
    let canvas = Rc::new(Cell::new(initial));
    let context = LoggedContext {
        methods: calls.iter().map(|(m, _, _)| m.clone()).collect(),
        results: calls
            .iter()
            .map(|(m, _, r)| (m.clone(), r.clone()))
            .collect(),
        canvas: canvas.clone(),
    };

    let scheduler = Rc::new(ManualScheduler::new());
    let frames = FrameCounter::start(scheduler.clone());
    frames.advance_to(FrameCount(entries.first().map_or(0, |e| e.frame)));
    let mut host = RecordingCanvas::with_opts(
        LogFactory {
            context: Some(context),
        },
        frames.clone(),
        opts,
    );
    let Some(RequestedContext::Recorded(mut gl)) = host.get_context("webgl", None) else {
        return Err(RecorderError::validation("log context was not recorded"));
    };

    for (entry, (method, args, _)) in entries.iter().zip(&calls) {
        if entry.frame < frames.current().0 {
            return Err(RecorderError::validation(format!(
                "capture log frames must not decrease ({} after {})",
                entry.frame,
                frames.current().0
            )));
        }
        if entry.frame > frames.current().0 {
            scheduler.run_frame();
            frames.advance_to(FrameCount(entry.frame));
        }
        if let Some(size) = entry.canvas {
            canvas.set(size);
        }
        gl.call(method, args)?;
    }

    Ok(gl)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/log.rs"]
mod tests;
