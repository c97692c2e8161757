use std::sync::Arc;

use base64::Engine as _;

use super::*;
use crate::value::handle::{Handle, ResourceKind};
use crate::value::model::ImageElement;
use crate::value::typed::{ElementType, TypedArray};

fn encode(value: Value) -> (Option<Expr>, Trace) {
    let mut enc = ValueEncoder::new();
    let mut trace = Trace::new();
    let expr = enc.encode(&value, &mut trace);
    (expr, trace)
}

fn text(value: Value) -> String {
    encode(value).0.expect("value should encode").to_string()
}

#[test]
fn primitives_encode_as_json_literals() {
    assert_eq!(text(Value::Number(1.0)), "1");
    assert_eq!(text(Value::Number(0.5)), "0.5");
    assert_eq!(text(Value::Number(-16384.0)), "-16384");
    assert_eq!(text(Value::Number(f64::NAN)), "null");
    assert_eq!(text(Value::Bool(true)), "true");
    assert_eq!(text(Value::from("a\"b")), "\"a\\\"b\"");
    assert_eq!(text(Value::Null), "null");
}

#[test]
fn primitive_list_literal_parses_back_equal() {
    let list = Value::Array(vec![Value::from(1), Value::from(true), Value::from("x")]);
    let literal = text(list);
    let parsed: serde_json::Value = serde_json::from_str(&literal).unwrap();
    assert_eq!(parsed, serde_json::json!([1, true, "x"]));
}

#[test]
fn large_numbers_print_like_host_numbers() {
    assert_eq!(text(Value::Number(9007199254740994.0)), "9007199254740994");
    assert_eq!(text(Value::Number(1e21)), "1e+21");
    assert_eq!(text(Value::Number(-0.0)), "0");
    assert_eq!(
        text(Value::Array(vec![Value::Number(2e20), Value::Number(0.5)])),
        "[200000000000000000000,0.5]"
    );
}

#[test]
fn nested_arrays_encode_but_mixed_arrays_do_not() {
    let nested = Value::Array(vec![Value::Array(vec![Value::from(1), Value::from(2)])]);
    assert_eq!(text(nested), "[[1,2]]");

    let mixed = Value::Array(vec![Value::from(1), Value::Undefined]);
    assert_eq!(encode(mixed).0, None);
}

#[test]
fn array_buffer_uses_signed_bytes() {
    let bytes: Arc<[u8]> = Arc::from(vec![0u8, 1, 127, 128, 255]);
    assert_eq!(
        text(Value::ArrayBuffer(bytes)),
        "(new Int8Array([0,1,127,-128,-1])).buffer"
    );
}

#[test]
fn typed_views_keep_their_constructor() {
    assert_eq!(
        text(Value::from(TypedArray::Uint16(vec![1, 2, 3]))),
        "new Uint16Array([1,2,3])"
    );
    let expr = encode(Value::from(TypedArray::Float32(vec![1.0, 2.0, 3.0])))
        .0
        .unwrap();
    let Expr::TypedArray {
        element_type,
        elements,
    } = &expr
    else {
        panic!("expected typed array expression");
    };
    assert_eq!(*element_type, ElementType::Float32Array);
    assert_eq!(
        TypedArray::from_numbers(*element_type, elements),
        TypedArray::Float32(vec![1.0, 2.0, 3.0])
    );
    assert_eq!(expr.to_string(), "new Float32Array([1,2,3])");
}

#[test]
fn images_append_load_statement_and_reference_local() {
    let mut enc = ValueEncoder::new();
    let mut trace = Trace::new();

    let first = enc.encode(&Value::from(ImageElement::new("a.png")), &mut trace);
    let second = enc.encode(&Value::from(ImageElement::new("b.png")), &mut trace);

    assert_eq!(first, Some(Expr::Local("image0".to_string())));
    assert_eq!(second, Some(Expr::Local("image1".to_string())));
    assert_eq!(
        trace.statements()[1],
        Statement::LoadImage {
            binding: "image1".to_string(),
            src: "b.png".to_string(),
        }
    );
}

#[test]
fn bitmaps_become_png_data_urls() {
    let bitmap = ImageBitmap {
        width: 2,
        height: 1,
        rgba8: Arc::new(vec![255, 0, 0, 255, 0, 0, 255, 128]),
    };
    let (expr, trace) = encode(Value::from(bitmap));
    assert_eq!(expr, Some(Expr::Local("image0".to_string())));

    let Statement::LoadImage { src, .. } = &trace.statements()[0] else {
        panic!("expected image load");
    };
    let b64 = src.strip_prefix("data:image/png;base64,").unwrap();
    let png = base64::engine::general_purpose::STANDARD
        .decode(b64)
        .unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.into_raw(), vec![255, 0, 0, 255, 0, 0, 255, 128]);
}

#[test]
fn malformed_bitmap_is_unsupported() {
    let bitmap = ImageBitmap {
        width: 4,
        height: 4,
        rgba8: Arc::new(vec![0; 3]),
    };
    assert!(bitmap_data_url(&bitmap).is_err());
    let (expr, trace) = encode(Value::from(bitmap));
    assert_eq!(expr, None);
    assert!(trace.is_empty());
}

#[test]
fn handles_encode_as_symbols() {
    let mut enc = ValueEncoder::new();
    let mut trace = Trace::new();
    let prog = Handle::new(ResourceKind::Program);
    let loc = Handle::new(ResourceKind::UniformLocation);

    let a = enc.encode(&Value::from(prog.clone()), &mut trace).unwrap();
    let b = enc.encode(&Value::from(loc), &mut trace).unwrap();
    let c = enc.encode(&Value::from(prog), &mut trace).unwrap();

    assert_eq!(a.to_string(), "WebGLPrograms[0]");
    assert_eq!(b.to_string(), "WebGLUniformLocations[0]");
    assert_eq!(c, a);
    assert!(trace.is_empty());
}

#[test]
fn unsupported_arguments_become_null() {
    let mut enc = ValueEncoder::new();
    let mut trace = Trace::new();

    let undefined = enc.encode_argument(&Value::Undefined, &mut trace, "uniform1f", 1);
    let opaque = enc.encode_argument(
        &Value::Opaque("HTMLVideoElement".to_string()),
        &mut trace,
        "texImage2D",
        5,
    );

    assert_eq!(undefined, Expr::Null);
    assert_eq!(opaque, Expr::Null);
    assert!(trace.is_empty());
}

#[test]
fn only_handle_results_get_a_slot() {
    let mut enc = ValueEncoder::new();
    let shader = Handle::new(ResourceKind::Shader);

    assert_eq!(enc.encode_result(&Value::Number(0.0)), None);
    assert_eq!(enc.encode_result(&Value::Undefined), None);

    let slot = enc.encode_result(&Value::from(shader.clone())).unwrap();
    assert_eq!(slot.to_string(), "WebGLShaders[0]");
    assert_eq!(enc.encode_result(&Value::from(shader)), Some(slot));
    assert_eq!(enc.registry().kinds(), &[ResourceKind::Shader]);
}
