//! # freqfx-core
//!
//! Core types for frequency-domain image filtering.
//!
//! This crate provides the foundational types used throughout freqfx:
//!
//! - [`Image`] - Multi-band sample buffer promoted to `f64`
//! - [`Dimensions`] / [`dimensions`] - Canonical (rows, cols, bands, dtype) shape
//! - [`SampleType`] - Source sample type tag (u8, u16, f16, f32, f64)
//! - [`TransferFunction`] - Immutable [0, 1] weighting surface in centered
//!   spectral coordinates
//!
//! ## Crate Structure
//!
//! ```text
//! freqfx-core (this crate)
//!    ^
//!    |
//!    +-- freqfx-ops (shape generation, composition, FFT application)
//!    +-- freqfx-tests (integration tests)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod image;
pub mod transfer;

pub use error::{Error, Result};
pub use format::SampleType;
pub use image::{dimensions, Dimensions, Image};
pub use transfer::TransferFunction;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use freqfx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::format::SampleType;
    pub use crate::image::{dimensions, Dimensions, Image};
    pub use crate::transfer::TransferFunction;
}
