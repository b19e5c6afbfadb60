//! 2D FFT plumbing over `rustfft`.
//!
//! Convention matches numpy:
//! - Forward transform ([`Fft2::forward`]): unnormalized
//! - Inverse transform ([`Fft2::inverse`]): scaled by `1 / (rows * cols)`
//!
//! Buffers are row-major `rows × cols` slices of [`Complex<f64>`].
//!
//! # Centering
//!
//! Filters are defined with zero frequency at `(rows / 2, cols / 2)`. Two
//! ways of moving the spectrum there are provided:
//!
//! - [`modulate_checkerboard`] - multiply the spatial signal by `(-1)^(x+y)`
//!   before the forward transform (exact for even sizes only)
//! - [`fft_shift`] / [`ifft_shift`] - explicit quadrant swap of the spectrum
//!
//! [`Centering::for_shape`] picks the checkerboard whenever it is exact.
//!
//! # Example
//!
//! ```rust
//! use freqfx_ops::fft::{to_complex, Fft2};
//!
//! let plan = Fft2::new(4, 4);
//! let mut buf = to_complex(&[1.0; 16]);
//! plan.forward(&mut buf);
//! assert!((buf[0].re - 16.0).abs() < 1e-12);
//! plan.inverse(&mut buf);
//! assert!((buf[5].re - 1.0).abs() < 1e-12);
//! ```

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Planned 2D transform for a fixed `rows × cols` shape.
///
/// Plans are built once and can be reused for every band of an image.
pub struct Fft2 {
    rows: usize,
    cols: usize,
    row_fwd: Arc<dyn Fft<f64>>,
    row_inv: Arc<dyn Fft<f64>>,
    col_fwd: Arc<dyn Fft<f64>>,
    col_inv: Arc<dyn Fft<f64>>,
}

impl Fft2 {
    /// Plans forward and inverse transforms for `rows × cols` buffers.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            rows,
            cols,
            row_fwd: planner.plan_fft_forward(cols),
            row_inv: planner.plan_fft_inverse(cols),
            col_fwd: planner.plan_fft_forward(rows),
            col_inv: planner.plan_fft_inverse(rows),
        }
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Unnormalized forward transform, in place.
    pub fn forward(&self, buf: &mut [Complex<f64>]) {
        debug_assert_eq!(buf.len(), self.rows * self.cols);
        // Row-wise FFT
        for row in buf.chunks_exact_mut(self.cols) {
            self.row_fwd.process(row);
        }
        self.process_columns(buf, self.col_fwd.as_ref());
    }

    /// Inverse transform scaled by `1 / (rows * cols)`, in place.
    pub fn inverse(&self, buf: &mut [Complex<f64>]) {
        debug_assert_eq!(buf.len(), self.rows * self.cols);
        self.process_columns(buf, self.col_inv.as_ref());
        for row in buf.chunks_exact_mut(self.cols) {
            self.row_inv.process(row);
        }

        let scale = 1.0 / (self.rows * self.cols) as f64;
        for c in buf.iter_mut() {
            *c *= scale;
        }
    }

    /// Column-wise pass through a gather buffer.
    fn process_columns(&self, buf: &mut [Complex<f64>], fft: &dyn Fft<f64>) {
        let mut col_buf = vec![Complex::new(0.0, 0.0); self.rows];
        for x in 0..self.cols {
            for y in 0..self.rows {
                col_buf[y] = buf[y * self.cols + x];
            }
            fft.process(&mut col_buf);
            for y in 0..self.rows {
                buf[y * self.cols + x] = col_buf[y];
            }
        }
    }
}

impl std::fmt::Debug for Fft2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft2")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

/// How the zero-frequency term is moved to the array center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Centering {
    /// Spatial `(-1)^(x+y)` modulation before and after the transform.
    Checkerboard,
    /// Explicit quadrant swap of the spectrum.
    QuadrantSwap,
}

impl Centering {
    /// Checkerboard when both axes are even, quadrant swap otherwise.
    ///
    /// For an odd axis `(-1)^x` is not periodic over the axis, so the
    /// modulation would smear the spectrum instead of shifting it.
    pub fn for_shape(rows: usize, cols: usize) -> Self {
        if rows % 2 == 0 && cols % 2 == 0 {
            Self::Checkerboard
        } else {
            Self::QuadrantSwap
        }
    }
}

/// Sign of the checkerboard pattern at (x, y).
#[inline]
pub fn checkerboard_sign(x: usize, y: usize) -> f64 {
    if (x + y) % 2 == 0 { 1.0 } else { -1.0 }
}

/// Multiplies a `rows × cols` buffer by `(-1)^(x+y)` in place.
///
/// The operation is its own inverse.
pub fn modulate_checkerboard(buf: &mut [Complex<f64>], rows: usize, cols: usize) {
    debug_assert_eq!(buf.len(), rows * cols);
    for (x, row) in buf.chunks_exact_mut(cols).enumerate() {
        for (y, c) in row.iter_mut().enumerate() {
            if (x + y) % 2 == 1 {
                *c = -*c;
            }
        }
    }
}

/// Circularly shifts a buffer by `(dr, dc)`.
fn roll<T: Copy>(buf: &[T], rows: usize, cols: usize, dr: usize, dc: usize) -> Vec<T> {
    debug_assert_eq!(buf.len(), rows * cols);
    let mut out = buf.to_vec();
    for u in 0..rows {
        let du = (u + dr) % rows;
        for v in 0..cols {
            out[du * cols + (v + dc) % cols] = buf[u * cols + v];
        }
    }
    out
}

/// Moves the zero-frequency term from `(0, 0)` to `(rows / 2, cols / 2)`.
pub fn fft_shift<T: Copy>(buf: &[T], rows: usize, cols: usize) -> Vec<T> {
    roll(buf, rows, cols, rows / 2, cols / 2)
}

/// Inverse of [`fft_shift`]; moves `(rows / 2, cols / 2)` back to `(0, 0)`.
pub fn ifft_shift<T: Copy>(buf: &[T], rows: usize, cols: usize) -> Vec<T> {
    roll(buf, rows, cols, rows - rows / 2, cols - cols / 2)
}

/// Promotes real samples to complex.
pub fn to_complex(src: &[f64]) -> Vec<Complex<f64>> {
    src.iter().map(|&v| Complex::new(v, 0.0)).collect()
}

/// Transforms a real `rows × cols` band and returns its centered spectrum.
pub fn centered_spectrum(plan: &Fft2, band: &[f64]) -> Vec<Complex<f64>> {
    let (rows, cols) = plan.shape();
    let mut buf = to_complex(band);
    match Centering::for_shape(rows, cols) {
        Centering::Checkerboard => {
            modulate_checkerboard(&mut buf, rows, cols);
            plan.forward(&mut buf);
            buf
        }
        Centering::QuadrantSwap => {
            plan.forward(&mut buf);
            fft_shift(&buf, rows, cols)
        }
    }
}

/// Inverse of [`centered_spectrum`]; returns the complex spatial signal.
pub fn from_centered_spectrum(plan: &Fft2, spectrum: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
    let (rows, cols) = plan.shape();
    match Centering::for_shape(rows, cols) {
        Centering::Checkerboard => {
            let mut buf = spectrum;
            plan.inverse(&mut buf);
            modulate_checkerboard(&mut buf, rows, cols);
            buf
        }
        Centering::QuadrantSwap => {
            let mut buf = ifft_shift(&spectrum, rows, cols);
            plan.inverse(&mut buf);
            buf
        }
    }
}
