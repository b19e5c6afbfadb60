//! Error types for filter construction and application.

use thiserror::Error;

/// Error type for frequency-domain filter operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Transfer function shape doesn't match the image bands, or the number
    /// of band-specific filters doesn't match the band count.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Expected shape or count
        expected: String,
        /// Actual shape or count
        got: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Inverse transform left significant imaginary energy behind.
    ///
    /// Usually means the transfer function is not symmetric about the
    /// zero-frequency origin.
    #[error("imaginary residue {residue:e} in band {band} exceeds tolerance")]
    ImaginaryResidue {
        /// Band that failed
        band: usize,
        /// Largest imaginary magnitude observed
        residue: f64,
    },

    /// Named preset is not in the filter bank.
    #[error("preset not found: {name}")]
    PresetNotFound {
        /// Requested preset name
        name: String,
    },

    /// I/O error reading preset files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error from core buffer construction.
    #[error(transparent)]
    Core(#[from] freqfx_core::Error),
}

impl FilterError {
    /// Creates a [`FilterError::ShapeMismatch`] from two `(rows, cols)` shapes.
    pub fn shape_mismatch(expected: (usize, usize), got: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            got: format!("{}x{}", got.0, got.1),
        }
    }
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
