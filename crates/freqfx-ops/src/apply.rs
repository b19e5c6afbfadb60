//! Frequency-domain filter application.
//!
//! Each band goes through the same pipeline:
//!
//! ```text
//! band ─► center ─► FFT2 ─► × H ─► IFFT2 ─► un-center ─► real part ─► + delta
//! ```
//!
//! Centering uses the `(-1)^(x+y)` checkerboard for even-sized images and an
//! explicit quadrant swap otherwise (see [`crate::fft::Centering`]). Bands
//! are never mixed; a single transfer function applies identically to every
//! band unless band-specific filters are supplied through [`apply_banded`].
//!
//! Output samples are `f64` with no clipping. Converting to a display range
//! is the caller's job (e.g. [`Image::to_u8_clamped`]).
//!
//! # Example
//!
//! ```rust
//! use freqfx_core::Image;
//! use freqfx_ops::apply::apply_frequency_filter;
//! use freqfx_ops::compose::{compose_for, FilterDescriptor};
//! use freqfx_ops::shape::Shape;
//!
//! let img = Image::from_u8(64, 64, 1, &[100u8; 64 * 64]).unwrap();
//! let h = compose_for(&img, &FilterDescriptor::lowpass(8.0, Shape::Ideal)).unwrap();
//! let out = apply_frequency_filter(&img, &h, 0.0).unwrap();
//! assert!((out.get(10, 10, 0) - 100.0).abs() < 1e-9);
//! ```

use crate::fft::{centered_spectrum, from_centered_spectrum, Fft2};
use crate::{FilterError, FilterResult};
use freqfx_core::{dimensions, Image, TransferFunction};
use tracing::{debug, trace};

/// Largest tolerated imaginary residue, relative to the band's peak
/// magnitude (or 1, whichever is larger).
pub const IMAGINARY_TOLERANCE: f64 = 1e-6;

/// A transfer function bundled with a planned transform of matching size.
///
/// Build once and apply to any number of same-sized images. The filter is
/// read-only, so a shared reference can be used from several threads.
///
/// # Example
///
/// ```rust
/// use freqfx_core::{Image, TransferFunction};
/// use freqfx_ops::apply::FrequencyFilter;
///
/// let filter = FrequencyFilter::new(TransferFunction::ones(16, 16).unwrap());
/// let img = Image::filled(16, 16, 3, 7.0).unwrap();
/// let out = filter.apply(&img, 0.0).unwrap();
/// assert!((out.get(3, 4, 2) - 7.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct FrequencyFilter {
    transfer: TransferFunction,
    plan: Fft2,
}

impl FrequencyFilter {
    /// Plans a transform sized to `transfer`.
    pub fn new(transfer: TransferFunction) -> Self {
        let plan = Fft2::new(transfer.rows(), transfer.cols());
        Self { transfer, plan }
    }

    /// The wrapped transfer function.
    #[inline]
    pub fn transfer(&self) -> &TransferFunction {
        &self.transfer
    }

    /// Filters every band of `image` and adds `delta` to the result.
    ///
    /// # Errors
    ///
    /// - [`FilterError::ShapeMismatch`] if the filter and band shapes differ
    /// - [`FilterError::ImaginaryResidue`] if the filter leaves significant
    ///   imaginary energy (a filter not symmetric about zero frequency)
    pub fn apply(&self, image: &Image, delta: f64) -> FilterResult<Image> {
        let dims = dimensions(image);
        check_shape(dims.band_shape(), &self.transfer)?;

        trace!(
            rows = dims.rows,
            cols = dims.cols,
            bands = dims.bands,
            delta,
            "apply_frequency_filter"
        );

        let filtered = image
            .to_bands()
            .iter()
            .enumerate()
            .map(|(b, plane)| filter_band(&self.plan, plane, &self.transfer, delta, b))
            .collect::<FilterResult<Vec<_>>>()?;

        debug!(rows = dims.rows, cols = dims.cols, bands = dims.bands, "Applied frequency filter");
        Ok(Image::from_bands(dims.rows, dims.cols, filtered)?)
    }
}

/// Applies `h` to every band of `image` and adds `delta`.
///
/// The caller's image is never modified; the result is a new `f64` image
/// with the same shape.
///
/// # Errors
///
/// See [`FrequencyFilter::apply`].
pub fn apply_frequency_filter(
    image: &Image,
    h: &TransferFunction,
    delta: f64,
) -> FilterResult<Image> {
    FrequencyFilter::new(h.clone()).apply(image, delta)
}

/// Applies one transfer function per band.
///
/// # Errors
///
/// - [`FilterError::ShapeMismatch`] if `filters.len()` differs from the band
///   count or any filter shape differs from the band shape
/// - [`FilterError::ImaginaryResidue`] as for [`apply_frequency_filter`]
pub fn apply_banded(
    image: &Image,
    filters: &[TransferFunction],
    delta: f64,
) -> FilterResult<Image> {
    let dims = dimensions(image);
    if filters.len() != dims.bands {
        return Err(FilterError::ShapeMismatch {
            expected: format!("{} filter(s)", dims.bands),
            got: format!("{} filter(s)", filters.len()),
        });
    }
    for h in filters {
        check_shape(dims.band_shape(), h)?;
    }

    trace!(rows = dims.rows, cols = dims.cols, bands = dims.bands, delta, "apply_banded");

    let plan = Fft2::new(dims.rows, dims.cols);
    let filtered = image
        .to_bands()
        .iter()
        .zip(filters)
        .enumerate()
        .map(|(b, (plane, h))| filter_band(&plan, plane, h, delta, b))
        .collect::<FilterResult<Vec<_>>>()?;

    Ok(Image::from_bands(dims.rows, dims.cols, filtered)?)
}

fn check_shape(band_shape: (usize, usize), h: &TransferFunction) -> FilterResult<()> {
    if h.shape() != band_shape {
        return Err(FilterError::shape_mismatch(band_shape, h.shape()));
    }
    Ok(())
}

/// Runs one planar band through the centered transform pipeline.
fn filter_band(
    plan: &Fft2,
    band: &[f64],
    h: &TransferFunction,
    delta: f64,
    index: usize,
) -> FilterResult<Vec<f64>> {
    let mut spectrum = centered_spectrum(plan, band);
    for (c, &w) in spectrum.iter_mut().zip(h.data()) {
        *c *= w;
    }
    let spatial = from_centered_spectrum(plan, spectrum);

    // NaN never wins a max(), so non-finite input falls through to the output
    let residue = spatial.iter().fold(0.0f64, |m, c| m.max(c.im.abs()));
    let peak = band
        .iter()
        .filter(|v| v.is_finite())
        .fold(1.0f64, |m, v| m.max(v.abs()));
    if residue > IMAGINARY_TOLERANCE * peak {
        return Err(FilterError::ImaginaryResidue {
            band: index,
            residue,
        });
    }

    Ok(spatial.iter().map(|c| c.re + delta).collect())
}
