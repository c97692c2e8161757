use super::*;

#[test]
fn symbolic_refs_use_pluralized_kind() {
    let sym = SymbolicRef {
        kind: ResourceKind::Program,
        index: 2,
    };
    assert_eq!(sym.to_string(), "WebGLPrograms[2]");
}

#[test]
fn call_with_target_assigns() {
    let stmt = Statement::Call {
        target: Some(SymbolicRef {
            kind: ResourceKind::Buffer,
            index: 0,
        }),
        method: "createBuffer".to_string(),
        args: vec![],
    };
    assert_eq!(stmt.to_string(), "WebGLBuffers[0] = gl.createBuffer();");
}

#[test]
fn call_joins_arguments() {
    let stmt = Statement::Call {
        target: None,
        method: "bufferData".to_string(),
        args: vec![
            Expr::Literal("34962".to_string()),
            Expr::TypedArray {
                element_type: ElementType::Float32Array,
                elements: vec![1.0, 2.5, -3.0],
            },
            Expr::Null,
        ],
    };
    assert_eq!(
        stmt.to_string(),
        "gl.bufferData(34962, new Float32Array([1,2.5,-3]), null);"
    );
}

#[test]
fn byte_buffer_rebuilds_from_signed_bytes() {
    let expr = Expr::ByteBuffer(vec![0, 127, -128, -1]);
    assert_eq!(expr.to_string(), "(new Int8Array([0,127,-128,-1])).buffer");
}

#[test]
fn canvas_and_yield_statements() {
    assert_eq!(
        Statement::SetCanvasWidth(640).to_string(),
        "gl.canvas.width = 640;"
    );
    assert_eq!(
        Statement::SetCanvasHeight(480).to_string(),
        "gl.canvas.height = 480;"
    );
    assert_eq!(Statement::Yield.to_string(), "yield;");
    assert!(Statement::Yield.is_suspension());
    assert!(!Statement::SetCanvasWidth(1).is_suspension());
}

#[test]
fn image_load_escapes_quotes() {
    let stmt = Statement::LoadImage {
        binding: "image0".to_string(),
        src: "a'b\\c.png".to_string(),
    };
    let text = stmt.to_string();
    assert!(text.starts_with("var image0 = await new Promise("));
    assert!(text.contains("i.src = 'a\\'b\\\\c.png';"));
    assert!(stmt.is_suspension());
}

#[test]
fn js_number_matches_host_formatting() {
    assert_eq!(js_number(1.0), "1");
    assert_eq!(js_number(-0.0), "0");
    assert_eq!(js_number(0.25), "0.25");
    assert_eq!(js_number(1e21), "1e+21");
    assert_eq!(js_number(1.5e-7), "1.5e-7");
    assert_eq!(js_number(f64::NAN), "NaN");
    assert_eq!(js_number(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(js_number(f64::from(0.1f32)), "0.10000000149011612");
}

#[test]
fn trace_is_append_only_in_order() {
    let mut trace = Trace::new();
    assert!(trace.is_empty());
    trace.push(Statement::SetCanvasWidth(300));
    trace.push(Statement::Yield);
    assert_eq!(trace.len(), 2);
    assert_eq!(
        trace.lines().collect::<Vec<_>>(),
        vec!["gl.canvas.width = 300;".to_string(), "yield;".to_string()]
    );
}
