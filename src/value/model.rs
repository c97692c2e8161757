use std::sync::Arc;

use crate::value::handle::Handle;
use crate::value::typed::TypedArray;

/// An image element that has finished loading from `src`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageElement {
    /// URL the image was loaded from.
    pub src: String,
}

impl ImageElement {
    /// Image loaded from `src`.
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}

/// Decoded off-screen bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8, row-major, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

/// Any value passed to, or returned from, a drawing-context method.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value (`undefined`).
    Undefined,
    /// `null`
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// Text.
    String(String),
    /// Plain ordered sequence.
    Array(Vec<Value>),
    /// Raw fixed-size binary buffer.
    ArrayBuffer(Arc<[u8]>),
    /// Typed view over binary data.
    TypedArray(TypedArray),
    /// Loaded image element.
    Image(ImageElement),
    /// Decoded bitmap.
    ImageBitmap(ImageBitmap),
    /// Opaque resource handle.
    Handle(Handle),
    /// Host object without a script encoding, described for diagnostics.
    Opaque(String),
}

impl Value {
    /// Short, human-readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => format!("{s:?}"),
            Value::Array(items) => format!("Array({})", items.len()),
            Value::ArrayBuffer(bytes) => format!("ArrayBuffer({})", bytes.len()),
            Value::TypedArray(view) => format!("{}({})", view.element_type(), view.len()),
            Value::Image(img) => format!("Image({})", img.src),
            Value::ImageBitmap(bmp) => format!("ImageBitmap({}x{})", bmp.width, bmp.height),
            Value::Handle(h) => h.kind().to_string(),
            Value::Opaque(desc) => desc.clone(),
        }
    }

    /// The handle inside, if this is one.
    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            Value::Handle(h) => Some(h),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Handle> for Value {
    fn from(v: Handle) -> Self {
        Value::Handle(v)
    }
}

impl From<TypedArray> for Value {
    fn from(v: TypedArray) -> Self {
        Value::TypedArray(v)
    }
}

impl From<ImageElement> for Value {
    fn from(v: ImageElement) -> Self {
        Value::Image(v)
    }
}

impl From<ImageBitmap> for Value {
    fn from(v: ImageBitmap) -> Self {
        Value::ImageBitmap(v)
    }
}
