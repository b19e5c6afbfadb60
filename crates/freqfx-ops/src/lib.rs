//! # freqfx-ops
//!
//! Frequency-domain filtering for multi-band images.
//!
//! Filters are built as transfer functions over the centered spectrum of a
//! band and applied by multiplication between a forward and inverse 2D FFT.
//!
//! # Modules
//!
//! - [`shape`] - Primitive surfaces (radial, ring, notch) in three rolloffs
//! - [`compose`] - The six filter kinds and their complements
//! - [`apply`] - Applying a transfer function to an image
//! - [`spectrum`] - Log-magnitude display and dominant frequencies
//! - [`preset`] - Named filter banks in YAML
//! - [`fft`] - 2D FFT and spectrum centering
//! - [`parallel`] - Batch filtering (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use freqfx_core::Image;
//! use freqfx_ops::{apply_frequency_filter, compose_for, Center, FilterDescriptor, Shape};
//!
//! let img = Image::filled(64, 64, 1, 100.0).unwrap();
//!
//! // Remove a periodic pattern at (+-10, +-10) from zero frequency
//! let notch = FilterDescriptor::notchreject(Center::new(10.0, 10.0), 3.0, Shape::Ideal);
//! let h = compose_for(&img, &notch).unwrap();
//! let out = apply_frequency_filter(&img, &h, 0.0).unwrap();
//! assert!((out.get(0, 0, 0) - 100.0).abs() < 1e-9);
//! ```
//!
//! # Logging
//!
//! Operations emit `tracing` events (`trace!` on entry, `debug!` on
//! completion). No subscriber is installed; callers choose one.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod apply;
pub mod compose;
pub mod fft;
pub mod preset;
pub mod shape;
pub mod spectrum;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use apply::{apply_banded, apply_frequency_filter, FrequencyFilter};
pub use compose::{complement, compose_filter, compose_for, FilterDescriptor, FilterKind};
pub use error::{FilterError, FilterResult};
pub use preset::{FilterBank, NamedFilter};
pub use shape::{generate_shape, Center, Geometry, Shape};
pub use spectrum::{dominant_frequencies, log_magnitude_spectrum, SpectralPeak};
