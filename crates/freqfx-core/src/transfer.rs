//! Frequency-domain transfer functions.
//!
//! A [`TransferFunction`] is a real-valued `rows × cols` weighting surface
//! laid out in **centered** spectral coordinates: the zero-frequency term sits
//! at index `(rows / 2, cols / 2)`. Every value is finite and lies in [0, 1].
//!
//! Transfer functions are immutable once built and share their buffer through
//! an [`Arc`], so one filter can be applied to many same-sized images (or from
//! many threads) without copying.
//!
//! # Usage
//!
//! ```rust
//! use freqfx_core::TransferFunction;
//!
//! let pass = TransferFunction::from_vec(2, 2, vec![1.0, 0.25, 0.5, 0.0]).unwrap();
//! let reject = pass.complement();
//! for (p, r) in pass.data().iter().zip(reject.data()) {
//!     assert_eq!(p + r, 1.0);
//! }
//! ```

use crate::image::checked_len;
use crate::{Error, Result};
use std::sync::Arc;

/// Immutable 2D frequency weighting surface with values in [0, 1].
#[derive(Clone, PartialEq)]
pub struct TransferFunction {
    data: Arc<Vec<f64>>,
    rows: usize,
    cols: usize,
}

impl TransferFunction {
    /// Wraps a row-major buffer, validating shape and range.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] / [`Error::DataLength`] for a bad shape
    /// - [`Error::InvalidTransfer`] if a value is non-finite or outside [0, 1]
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = checked_len(rows, cols, 1)?;
        if data.len() != expected {
            return Err(Error::data_length(expected, data.len()));
        }
        if let Some((i, v)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(Error::InvalidTransfer(format!(
                "value {} at ({}, {}) is outside [0, 1]",
                v,
                i / cols,
                i % cols
            )));
        }
        Ok(Self {
            data: Arc::new(data),
            rows,
            cols,
        })
    }

    /// Builds a transfer function by evaluating `f(u, v)` over the grid.
    ///
    /// Results are clamped into [0, 1]. A NaN result is rejected.
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> f64,
    {
        let len = checked_len(rows, cols, 1)?;
        let mut data = Vec::with_capacity(len);
        for u in 0..rows {
            for v in 0..cols {
                data.push(f(u, v).clamp(0.0, 1.0));
            }
        }
        Self::from_vec(rows, cols, data)
    }

    /// All-pass filter (every weight 1).
    pub fn ones(rows: usize, cols: usize) -> Result<Self> {
        Self::constant(rows, cols, 1.0)
    }

    /// All-stop filter (every weight 0).
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::constant(rows, cols, 0.0)
    }

    /// Uniform filter with weight `value`.
    pub fn constant(rows: usize, cols: usize, value: f64) -> Result<Self> {
        let len = checked_len(rows, cols, 1)?;
        Self::from_vec(rows, cols, vec![value; len])
    }

    /// Returns `1 - H` elementwise.
    ///
    /// `h + h.complement() == 1` holds exactly for every weight in [0, 1].
    pub fn complement(&self) -> Self {
        Self {
            data: Arc::new(self.data.iter().map(|&w| 1.0 - w).collect()),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major weights.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Weight at (u, v).
    #[inline]
    pub fn get(&self, u: usize, v: usize) -> f64 {
        debug_assert!(u < self.rows && v < self.cols);
        self.data[u * self.cols + v]
    }

    /// Smallest and largest weight.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &w| {
                (lo.min(w), hi.max(w))
            })
    }
}

impl std::fmt::Debug for TransferFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (lo, hi) = self.min_max();
        f.debug_struct("TransferFunction")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("min", &lo)
            .field("max", &hi)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_range() {
        assert!(TransferFunction::from_vec(1, 2, vec![0.0, 1.0]).is_ok());
        assert!(TransferFunction::from_vec(1, 2, vec![0.0, 1.5]).is_err());
        assert!(TransferFunction::from_vec(1, 2, vec![-0.1, 0.5]).is_err());
        assert!(TransferFunction::from_vec(1, 2, vec![f64::NAN, 0.5]).is_err());
    }

    #[test]
    fn test_from_vec_shape() {
        let err = TransferFunction::from_vec(2, 2, vec![0.0; 3]).unwrap_err();
        assert!(err.is_shape_error());
        assert!(TransferFunction::from_vec(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_from_fn_clamps() {
        let h = TransferFunction::from_fn(2, 3, |u, v| (u + v) as f64 - 0.5).unwrap();
        assert_eq!(h.get(0, 0), 0.0);
        assert_eq!(h.get(0, 1), 0.5);
        assert_eq!(h.get(1, 2), 1.0);
    }

    #[test]
    fn test_complement_exact() {
        let h = TransferFunction::from_fn(16, 16, |u, v| ((u * 16 + v) as f64 / 255.0).sqrt())
            .unwrap();
        let c = h.complement();
        for (a, b) in h.data().iter().zip(c.data()) {
            assert_eq!(a + b, 1.0);
        }
    }

    #[test]
    fn test_ones_zeros() {
        let ones = TransferFunction::ones(4, 5).unwrap();
        assert_eq!(ones.shape(), (4, 5));
        assert_eq!(ones.min_max(), (1.0, 1.0));
        assert_eq!(ones.complement(), TransferFunction::zeros(4, 5).unwrap());
    }
}
