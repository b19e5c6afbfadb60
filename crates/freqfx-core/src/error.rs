//! Error types for freqfx-core operations.
//!
//! The [`Error`] enum covers the failure modes of building and inspecting
//! images and transfer functions:
//! - Shape validation (zero-sized axes, buffer length mismatches)
//! - Band indexing
//! - Transfer function value range
//!
//! # Usage
//!
//! ```rust
//! use freqfx_core::{Error, Result};
//!
//! fn check_band(band: usize, bands: usize) -> Result<()> {
//!     if band >= bands {
//!         return Err(Error::BandOutOfRange { band, bands });
//!     }
//!     Ok(())
//! }
//! assert!(check_band(3, 3).is_err());
//! ```
//!
//! # Used By
//!
//! - [`crate::image::Image`] - Buffer construction and band access
//! - [`crate::transfer::TransferFunction`] - Value validation
//! - `freqfx-ops` - Wrapped by `FilterError::Core`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing core buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Image or transfer function has an unusable shape.
    ///
    /// Returned when any axis is zero or the element count would overflow.
    #[error("invalid dimensions: {rows}x{cols}x{bands} ({reason})")]
    InvalidDimensions {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
        /// Requested bands
        bands: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Sample buffer length doesn't match the declared shape.
    #[error("data length mismatch: expected {expected} samples, got {got}")]
    DataLength {
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        got: usize,
    },

    /// Band index is outside the image.
    #[error("band {band} out of range for image with {bands} band(s)")]
    BandOutOfRange {
        /// Requested band
        band: usize,
        /// Number of bands in the image
        bands: usize,
    },

    /// Transfer function contains a value outside [0, 1] or a non-finite value.
    #[error("invalid transfer function: {0}")]
    InvalidTransfer(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(
        rows: usize,
        cols: usize,
        bands: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            rows,
            cols,
            bands,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DataLength`] error.
    #[inline]
    pub fn data_length(expected: usize, got: usize) -> Self {
        Self::DataLength { expected, got }
    }

    /// Returns `true` if this is a shape-related error.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::InvalidDimensions { .. } | Self::DataLength { .. })
    }
}
