//! Multi-band image buffer and dimension inspection.
//!
//! This module provides:
//! - [`Image`] - Owned rows × cols × bands sample buffer
//! - [`Dimensions`] - Canonical (rows, cols, bands, dtype) description
//! - [`dimensions`] - Shape introspection used by every filter component
//!
//! # Memory Layout
//!
//! Samples are stored in **row-major** order with bands interleaved, the
//! same layout as a `(rows, cols, bands)` array:
//!
//! ```text
//! Memory: [b0 b1 b2 b0 b1 b2 ...]  ← Row 0
//!         [b0 b1 b2 b0 b1 b2 ...]  ← Row 1
//!         ...
//! ```
//!
//! Every sample is promoted to `f64` on construction. The original sample
//! type is kept as a [`SampleType`] tag.
//!
//! # Usage
//!
//! ```rust
//! use freqfx_core::{dimensions, Image, SampleType};
//!
//! let pixels = vec![100u8; 64 * 64 * 3];
//! let img = Image::from_u8(64, 64, 3, &pixels).unwrap();
//!
//! let dims = dimensions(&img);
//! assert_eq!(dims.as_tuple(), (64, 64, 3, SampleType::U8));
//! assert_eq!(img.get(10, 10, 2), 100.0);
//! ```

use crate::{Error, Result, SampleType};
use half::f16;
use std::sync::Arc;

/// Canonical shape description of an [`Image`].
///
/// A single-band (2D) image reports `bands == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Number of bands (1 for single-band images)
    pub bands: usize,
    /// Source sample type
    pub dtype: SampleType,
}

impl Dimensions {
    /// Returns `(rows, cols, bands, dtype)`.
    #[inline]
    pub fn as_tuple(&self) -> (usize, usize, usize, SampleType) {
        (self.rows, self.cols, self.bands, self.dtype)
    }

    /// Returns the `(rows, cols)` shape of a single band.
    #[inline]
    pub fn band_shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of samples in a single band.
    #[inline]
    pub fn band_len(&self) -> usize {
        self.rows * self.cols
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{} {}", self.rows, self.cols, self.bands, self.dtype)
    }
}

/// Returns the canonical (rows, cols, bands, dtype) description of an image.
///
/// # Example
///
/// ```rust
/// use freqfx_core::{dimensions, Image};
///
/// let img = Image::new(32, 48, 1).unwrap();
/// let dims = dimensions(&img);
/// assert_eq!((dims.rows, dims.cols, dims.bands), (32, 48, 1));
/// ```
#[inline]
pub fn dimensions(image: &Image) -> Dimensions {
    image.dimensions()
}

/// Validates a rows × cols × bands shape and returns the sample count.
pub(crate) fn checked_len(rows: usize, cols: usize, bands: usize) -> Result<usize> {
    if rows == 0 || cols == 0 || bands == 0 {
        return Err(Error::invalid_dimensions(
            rows,
            cols,
            bands,
            "every axis must be > 0",
        ));
    }
    rows.checked_mul(cols)
        .and_then(|v| v.checked_mul(bands))
        .ok_or_else(|| Error::invalid_dimensions(rows, cols, bands, "sample count overflows"))
}

/// Owned multi-band image with `f64` samples.
///
/// The buffer lives in an [`Arc<Vec<f64>>`], so cloning is cheap and
/// mutation goes through copy-on-write. Filtering never touches the
/// caller's buffer: outputs are always fresh images.
///
/// # Example
///
/// ```rust
/// use freqfx_core::Image;
///
/// let mut img = Image::filled(8, 8, 1, 0.5).unwrap();
/// img.set(2, 3, 0, 1.0);
/// assert_eq!(img.get(2, 3, 0), 1.0);
/// assert_eq!(img.get(0, 0, 0), 0.5);
/// ```
#[derive(Clone)]
pub struct Image {
    /// Sample buffer (Arc for cheap cloning)
    data: Arc<Vec<f64>>,
    rows: usize,
    cols: usize,
    bands: usize,
    /// Type the samples were ingested from
    sample_type: SampleType,
}

impl Image {
    /// Creates a zero-filled `f64` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if any axis is zero.
    pub fn new(rows: usize, cols: usize, bands: usize) -> Result<Self> {
        Self::filled(rows, cols, bands, 0.0)
    }

    /// Creates an image with every sample set to `value`.
    pub fn filled(rows: usize, cols: usize, bands: usize, value: f64) -> Result<Self> {
        let len = checked_len(rows, cols, bands)?;
        Ok(Self {
            data: Arc::new(vec![value; len]),
            rows,
            cols,
            bands,
            sample_type: SampleType::F64,
        })
    }

    /// Creates an image from interleaved `f64` samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len() != rows * cols * bands`.
    pub fn from_f64(rows: usize, cols: usize, bands: usize, data: Vec<f64>) -> Result<Self> {
        let expected = checked_len(rows, cols, bands)?;
        if data.len() != expected {
            return Err(Error::data_length(expected, data.len()));
        }
        Ok(Self {
            data: Arc::new(data),
            rows,
            cols,
            bands,
            sample_type: SampleType::F64,
        })
    }

    /// Creates an image from interleaved 8-bit samples.
    pub fn from_u8(rows: usize, cols: usize, bands: usize, data: &[u8]) -> Result<Self> {
        Self::promote(rows, cols, bands, data, SampleType::U8, |v| v as f64)
    }

    /// Creates an image from interleaved 16-bit samples.
    pub fn from_u16(rows: usize, cols: usize, bands: usize, data: &[u16]) -> Result<Self> {
        Self::promote(rows, cols, bands, data, SampleType::U16, |v| v as f64)
    }

    /// Creates an image from interleaved half-float samples.
    pub fn from_f16(rows: usize, cols: usize, bands: usize, data: &[f16]) -> Result<Self> {
        Self::promote(rows, cols, bands, data, SampleType::F16, f16::to_f64)
    }

    /// Creates an image from interleaved `f32` samples.
    pub fn from_f32(rows: usize, cols: usize, bands: usize, data: &[f32]) -> Result<Self> {
        Self::promote(rows, cols, bands, data, SampleType::F32, |v| v as f64)
    }

    fn promote<T: Copy>(
        rows: usize,
        cols: usize,
        bands: usize,
        data: &[T],
        sample_type: SampleType,
        to_f64: impl Fn(T) -> f64,
    ) -> Result<Self> {
        let expected = checked_len(rows, cols, bands)?;
        if data.len() != expected {
            return Err(Error::data_length(expected, data.len()));
        }
        Ok(Self {
            data: Arc::new(data.iter().map(|&v| to_f64(v)).collect()),
            rows,
            cols,
            bands,
            sample_type,
        })
    }

    /// Interleaves planar bands (each `rows * cols` long) into one image.
    ///
    /// # Example
    ///
    /// ```rust
    /// use freqfx_core::Image;
    ///
    /// let r = vec![1.0; 4];
    /// let g = vec![2.0; 4];
    /// let img = Image::from_bands(2, 2, vec![r, g]).unwrap();
    /// assert_eq!(img.bands(), 2);
    /// assert_eq!(img.get(1, 1, 1), 2.0);
    /// ```
    pub fn from_bands(rows: usize, cols: usize, planes: Vec<Vec<f64>>) -> Result<Self> {
        let bands = planes.len();
        let len = checked_len(rows, cols, bands)?;
        let plane_len = rows * cols;
        if let Some(bad) = planes.iter().find(|p| p.len() != plane_len) {
            return Err(Error::data_length(plane_len, bad.len()));
        }
        let mut data = vec![0.0; len];
        for (b, plane) in planes.iter().enumerate() {
            for (i, &v) in plane.iter().enumerate() {
                data[i * bands + b] = v;
            }
        }
        Ok(Self {
            data: Arc::new(data),
            rows,
            cols,
            bands,
            sample_type: SampleType::F64,
        })
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of bands.
    #[inline]
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Returns the source sample type.
    #[inline]
    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Returns the canonical shape description.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: self.rows,
            cols: self.cols,
            bands: self.bands,
            dtype: self.sample_type,
        }
    }

    /// Number of pixels (rows * cols).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize, band: usize) -> usize {
        (row * self.cols + col) * self.bands + band
    }

    /// Returns the sample at (row, col, band).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize, band: usize) -> f64 {
        debug_assert!(row < self.rows && col < self.cols && band < self.bands);
        self.data[self.offset(row, col, band)]
    }

    /// Sets the sample at (row, col, band).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, band: usize, value: f64) {
        debug_assert!(row < self.rows && col < self.cols && band < self.bands);
        let offset = self.offset(row, col, band);
        Arc::make_mut(&mut self.data)[offset] = value;
    }

    /// Copies one band out as a planar `rows * cols` buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BandOutOfRange`] if `band >= bands`.
    pub fn band(&self, band: usize) -> Result<Vec<f64>> {
        if band >= self.bands {
            return Err(Error::BandOutOfRange {
                band,
                bands: self.bands,
            });
        }
        Ok(self
            .data
            .iter()
            .skip(band)
            .step_by(self.bands)
            .copied()
            .collect())
    }

    /// Splits the image into planar bands.
    pub fn to_bands(&self) -> Vec<Vec<f64>> {
        let n = self.pixel_count();
        let mut planes: Vec<Vec<f64>> = (0..self.bands).map(|_| Vec::with_capacity(n)).collect();
        for chunk in self.data.chunks_exact(self.bands) {
            for (plane, &v) in planes.iter_mut().zip(chunk) {
                plane.push(v);
            }
        }
        planes
    }

    /// Rounds and clips every sample into [0, 255] for display.
    ///
    /// NaN maps to 0.
    pub fn to_u8_clamped(&self) -> Vec<u8> {
        let max = SampleType::U8.max_value();
        self.data
            .iter()
            .map(|&v| if v.is_nan() { 0 } else { v.round().clamp(0.0, max) as u8 })
            .collect()
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("bands", &self.bands)
            .field("dtype", &self.sample_type)
            .finish()
    }
}
