use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::trace::statement::Expr;
use crate::value::handle::{Handle, ResourceKind};
use crate::value::model::ImageElement;

struct StubContext {
    size: Rc<Cell<CanvasSize>>,
    calls: Vec<String>,
}

impl DrawingContext for StubContext {
    fn method_names(&self) -> Vec<String> {
        ["createTexture", "texImage2D", "fail"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn properties(&self) -> Vec<(String, Value)> {
        vec![("drawingBufferWidth".to_string(), Value::from(300))]
    }

    fn call(&mut self, method: &str, _args: &[Value]) -> RecorderResult<Value> {
        self.calls.push(method.to_string());
        match method {
            "createTexture" => Ok(Value::from(Handle::new(ResourceKind::Texture))),
            "fail" => Err(RecorderError::context("lost context")),
            _ => Ok(Value::Undefined),
        }
    }

    fn canvas_size(&self) -> CanvasSize {
        self.size.get()
    }
}

fn stub() -> (InstrumentedContext<StubContext>, Rc<Cell<CanvasSize>>, FrameCounter) {
    let size = Rc::new(Cell::new(CanvasSize::default()));
    let frames = FrameCounter::new();
    let ctx = InstrumentedContext::new(
        StubContext {
            size: size.clone(),
            calls: vec![],
        },
        frames.clone(),
        RecorderOpts::default(),
    );
    (ctx, size, frames)
}

#[test]
fn session_opens_with_canvas_size() {
    let (ctx, _, _) = stub();
    assert_eq!(
        ctx.trace().statements(),
        &[
            Statement::SetCanvasWidth(300),
            Statement::SetCanvasHeight(150)
        ]
    );
}

#[test]
fn image_load_precedes_the_call_that_uses_it() {
    let (mut ctx, _, frames) = stub();
    let tex = ctx.call("createTexture", &[]).unwrap();
    frames.tick();
    ctx.call(
        "texImage2D",
        &[Value::from(3553), Value::from(ImageElement::new("tex.png"))],
    )
    .unwrap();

    let tail = &ctx.trace().statements()[2..];
    assert_eq!(
        tail[0],
        Statement::Call {
            target: Some(ctx.registry().lookup(tex.as_handle().unwrap()).unwrap()),
            method: "createTexture".to_string(),
            args: vec![],
        }
    );
    assert_eq!(tail[1], Statement::Yield);
    assert!(matches!(tail[2], Statement::LoadImage { .. }));
    assert_eq!(
        tail[3],
        Statement::Call {
            target: None,
            method: "texImage2D".to_string(),
            args: vec![Expr::Literal("3553".to_string()), Expr::Local("image0".to_string())],
        }
    );
}

#[test]
fn failing_call_propagates_and_records_nothing() {
    let (mut ctx, size, frames) = stub();
    frames.tick();
    size.set(CanvasSize::new(10, 10));

    let err = ctx.call("fail", &[]).unwrap_err();
    assert!(matches!(err, RecorderError::Context(_)));
    assert_eq!(ctx.trace().len(), 2);
    assert_eq!(ctx.inner().calls, vec!["fail".to_string()]);
}

#[test]
fn unknown_method_is_not_forwarded() {
    let (mut ctx, _, _) = stub();
    let err = ctx.call("drawSomething", &[]).unwrap_err();
    assert!(matches!(err, RecorderError::UnknownMethod(ref m) if m == "drawSomething"));
    assert!(ctx.inner().calls.is_empty());
    assert_eq!(ctx.trace().len(), 2);
}

#[test]
fn properties_are_copied_through() {
    let (ctx, _, _) = stub();
    assert_eq!(ctx.property("drawingBufferWidth"), Some(&Value::from(300)));
    assert_eq!(ctx.property("missing"), None);
    assert_eq!(ctx.properties().len(), 1);
    assert_eq!(ctx.method_names().len(), 3);
}

#[test]
fn artifact_uses_configured_file_name() {
    let size = Rc::new(Cell::new(CanvasSize::new(1, 1)));
    let ctx = InstrumentedContext::new(
        StubContext {
            size,
            calls: vec![],
        },
        FrameCounter::new(),
        RecorderOpts::default()
            .with_download_filename("capture.js")
            .with_header_comment(None),
    );
    let artifact = ctx.artifact();
    assert_eq!(artifact.filename, "capture.js");
    assert_eq!(
        artifact.text,
        "async function* render(gl) {\n  gl.canvas.width = 1;\n  gl.canvas.height = 1;\n}\n"
    );
}
