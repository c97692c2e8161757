use std::fmt;

/// Element type of a typed view, named after the host constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementType {
    /// `Int8Array`
    Int8Array,
    /// `Uint8Array`
    Uint8Array,
    /// `Uint8ClampedArray`
    Uint8ClampedArray,
    /// `Int16Array`
    Int16Array,
    /// `Uint16Array`
    Uint16Array,
    /// `Int32Array`
    Int32Array,
    /// `Uint32Array`
    Uint32Array,
    /// `Float32Array`
    Float32Array,
    /// `Float64Array`
    Float64Array,
}

impl ElementType {
    /// Constructor name used in generated code.
    pub fn constructor_name(self) -> &'static str {
        match self {
            ElementType::Int8Array => "Int8Array",
            ElementType::Uint8Array => "Uint8Array",
            ElementType::Uint8ClampedArray => "Uint8ClampedArray",
            ElementType::Int16Array => "Int16Array",
            ElementType::Uint16Array => "Uint16Array",
            ElementType::Int32Array => "Int32Array",
            ElementType::Uint32Array => "Uint32Array",
            ElementType::Float32Array => "Float32Array",
            ElementType::Float64Array => "Float64Array",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constructor_name())
    }
}

/// A typed view over binary data, with its elements.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    /// Signed bytes.
    Int8(Vec<i8>),
    /// Unsigned bytes.
    Uint8(Vec<u8>),
    /// Unsigned bytes with clamping conversion.
    Uint8Clamped(Vec<u8>),
    /// Signed 16-bit integers.
    Int16(Vec<i16>),
    /// Unsigned 16-bit integers.
    Uint16(Vec<u16>),
    /// Signed 32-bit integers.
    Int32(Vec<i32>),
    /// Unsigned 32-bit integers.
    Uint32(Vec<u32>),
    /// 32-bit floats.
    Float32(Vec<f32>),
    /// 64-bit floats.
    Float64(Vec<f64>),
}

impl TypedArray {
    /// Element type of this view.
    pub fn element_type(&self) -> ElementType {
        match self {
            TypedArray::Int8(_) => ElementType::Int8Array,
            TypedArray::Uint8(_) => ElementType::Uint8Array,
            TypedArray::Uint8Clamped(_) => ElementType::Uint8ClampedArray,
            TypedArray::Int16(_) => ElementType::Int16Array,
            TypedArray::Uint16(_) => ElementType::Uint16Array,
            TypedArray::Int32(_) => ElementType::Int32Array,
            TypedArray::Uint32(_) => ElementType::Uint32Array,
            TypedArray::Float32(_) => ElementType::Float32Array,
            TypedArray::Float64(_) => ElementType::Float64Array,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
        }
    }

    /// Whether the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements widened to `f64`, the way the host reads them back as numbers.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            TypedArray::Int8(v) => v.iter().map(|&x| f64::from(x)).collect(),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => {
                v.iter().map(|&x| f64::from(x)).collect()
            }
            TypedArray::Int16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            TypedArray::Uint16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            TypedArray::Int32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            TypedArray::Uint32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            TypedArray::Float32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            TypedArray::Float64(v) => v.clone(),
        }
    }

    /// Build a view from plain numbers using the host's element conversion rules: integer types
    /// truncate and wrap, `Uint8ClampedArray` clamps and rounds half to even, non-finite input
    /// becomes zero for integer types.
    pub fn from_numbers(ty: ElementType, numbers: &[f64]) -> Self {
        match ty {
            ElementType::Int8Array => {
                TypedArray::Int8(numbers.iter().map(|&x| wrap_int(x, 8) as i8).collect())
            }
            ElementType::Uint8Array => {
                TypedArray::Uint8(numbers.iter().map(|&x| wrap_int(x, 8) as u8).collect())
            }
            ElementType::Uint8ClampedArray => {
                TypedArray::Uint8Clamped(numbers.iter().map(|&x| clamp_u8(x)).collect())
            }
            ElementType::Int16Array => {
                TypedArray::Int16(numbers.iter().map(|&x| wrap_int(x, 16) as i16).collect())
            }
            ElementType::Uint16Array => {
                TypedArray::Uint16(numbers.iter().map(|&x| wrap_int(x, 16) as u16).collect())
            }
            ElementType::Int32Array => {
                TypedArray::Int32(numbers.iter().map(|&x| wrap_int(x, 32) as i32).collect())
            }
            ElementType::Uint32Array => {
                TypedArray::Uint32(numbers.iter().map(|&x| wrap_int(x, 32) as u32).collect())
            }
            ElementType::Float32Array => {
                TypedArray::Float32(numbers.iter().map(|&x| x as f32).collect())
            }
            ElementType::Float64Array => TypedArray::Float64(numbers.to_vec()),
        }
    }
}

// Truncate toward zero and reduce modulo 2^bits; callers narrow with `as`.
fn wrap_int(x: f64, bits: u32) -> u64 {
    if !x.is_finite() {
        return 0;
    }
    let modulus = 2f64.powi(bits as i32);
    x.trunc().rem_euclid(modulus) as u64
}

fn clamp_u8(x: f64) -> u8 {
    if x.is_nan() {
        return 0;
    }
    x.clamp(0.0, 255.0).round_ties_even() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/value/typed.rs"]
mod tests;
