//! Sample data types.
//!
//! Images remember the numeric type their samples arrived in so callers can
//! inspect it through [`dimensions`](crate::image::dimensions), even though
//! every sample is promoted to `f64` for arithmetic.
//!
//! # Usage
//!
//! ```rust
//! use freqfx_core::SampleType;
//!
//! assert_eq!(SampleType::U8.max_value(), 255.0);
//! assert_eq!(SampleType::U16.to_string(), "uint16");
//! ```

/// Numeric type of an image's source samples.
///
/// Integer formats:
/// - `U8` - 8-bit unsigned [0, 255] (display)
/// - `U16` - 16-bit unsigned [0, 65535]
///
/// Floating-point formats:
/// - `F16` - 16-bit half-precision IEEE 754
/// - `F32` - 32-bit single-precision IEEE 754
/// - `F64` - 64-bit double precision (filter output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleType {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 16-bit half-precision float.
    F16,
    /// 32-bit single-precision float.
    F32,
    /// 64-bit double-precision float.
    #[default]
    F64,
}

impl SampleType {
    /// Largest representable value for integer formats, `f64::MAX` for floats.
    #[inline]
    pub const fn max_value(&self) -> f64 {
        match self {
            Self::U8 => 255.0,
            Self::U16 => 65535.0,
            Self::F16 => 65504.0,
            Self::F32 => f32::MAX as f64,
            Self::F64 => f64::MAX,
        }
    }

    /// Short numpy-style name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::F16 => "float16",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
