use std::io::Cursor;

use anyhow::Context as _;
use base64::Engine as _;

use crate::foundation::error::{RecorderError, RecorderResult};
use crate::trace::registry::IdentityRegistry;
use crate::trace::statement::{Expr, Statement, SymbolicRef, Trace, js_number};
use crate::value::model::{ImageBitmap, Value};

/// Turns runtime values into script expressions.
///
/// Rules, first match wins:
///
/// 1. primitives, `null` and arrays of those: JSON literal
/// 2. `ArrayBuffer`: rebuilt from signed bytes
/// 3. typed views: rebuilt with the same constructor
/// 4. loaded images: an awaited load statement is appended to the trace, the argument refers to
///    its local
/// 5. bitmaps: rasterized to a PNG data URL, then as 4
/// 6. tracked handles: `<kind>s[<index>]`
///
/// Anything else is unsupported.
#[derive(Debug, Default)]
pub struct ValueEncoder {
    registry: IdentityRegistry,
    images: u32,
}

impl ValueEncoder {
    /// Encoder with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle names assigned so far.
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Encode `value`, appending any statements it depends on to `trace`.
    /// Returns `None` when the value has no encoding.
    pub fn encode(&mut self, value: &Value, trace: &mut Trace) -> Option<Expr> {
        if let Some(json) = json_literal(value) {
            return Some(Expr::Literal(json));
        }

        match value {
            Value::ArrayBuffer(bytes) => Some(Expr::ByteBuffer(
                bytes.iter().map(|&b| b as i8).collect(),
            )),
            Value::TypedArray(view) => Some(Expr::TypedArray {
                element_type: view.element_type(),
                elements: view.to_f64_vec(),
            }),
            Value::Image(img) => Some(self.load_image(img.src.clone(), trace)),
            Value::ImageBitmap(bitmap) => match bitmap_data_url(bitmap) {
                Ok(url) => Some(self.load_image(url, trace)),
                Err(err) => {
                    tracing::debug!(error = %err, "bitmap rasterization failed");
                    None
                }
            },
            Value::Handle(handle) => Some(Expr::Symbol(self.registry.resolve(handle))),
            _ => None,
        }
    }

    /// Encode argument `position` of a `method` call. Unsupported values are logged and become
    /// `null`.
    pub fn encode_argument(
        &mut self,
        value: &Value,
        trace: &mut Trace,
        method: &str,
        position: usize,
    ) -> Expr {
        self.encode(value, trace).unwrap_or_else(|| {
            tracing::warn!(
                method,
                position,
                value = %value.describe(),
                "unsupported value"
            );
            Expr::Null
        })
    }

    /// Symbolic slot for a call result. Only tracked handles get one; other results are dropped
    /// from the script.
    pub fn encode_result(&mut self, value: &Value) -> Option<SymbolicRef> {
        value.as_handle().map(|h| self.registry.resolve(h))
    }

    fn load_image(&mut self, src: String, trace: &mut Trace) -> Expr {
        let binding = format!("image{}", self.images);
        self.images += 1;
        trace.push(Statement::LoadImage {
            binding: binding.clone(),
            src,
        });
        Expr::Local(binding)
    }
}

/// JSON literal for primitives, `null` and (nested) arrays of those.
fn json_literal(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(json_number(*n)),
        Value::String(s) => Some(serde_json::Value::String(s.clone()).to_string()),
        Value::Array(items) => items
            .iter()
            .map(json_literal)
            .collect::<Option<Vec<_>>>()
            .map(|items| format!("[{}]", items.join(","))),
        _ => None,
    }
}

// `JSON.stringify` prints finite numbers like `Number.prototype.toString` and the rest as `null`.
fn json_number(n: f64) -> String {
    if n.is_finite() {
        js_number(n)
    } else {
        "null".to_string()
    }
}

/// Draw `bitmap` onto a scratch RGBA surface and export it as a PNG data URL.
pub fn bitmap_data_url(bitmap: &ImageBitmap) -> RecorderResult<String> {
    let surface =
        image::RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.rgba8.as_ref().clone())
            .ok_or_else(|| {
                RecorderError::encoding(format!(
                    "bitmap buffer of {} bytes does not match {}x{}",
                    bitmap.rgba8.len(),
                    bitmap.width,
                    bitmap.height
                ))
            })?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(surface)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("encode bitmap as png")?;

    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/trace/encoder.rs"]
mod tests;
