//! Spectrum inspection helpers.
//!
//! Useful for picking notch offsets: periodic interference shows up as
//! isolated bright peaks mirrored through the zero-frequency origin.

use crate::fft::{centered_spectrum, Fft2};
use crate::shape::Center;
use crate::{FilterError, FilterResult};
use freqfx_core::Image;
use tracing::{debug, trace};

/// Display ceiling of [`log_magnitude_spectrum`].
pub const SPECTRUM_PEAK: f64 = 255.0;

/// A single centered frequency and its magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralPeak {
    /// Offset from the zero-frequency origin.
    pub offset: Center,
    /// Spectral magnitude `|F(u, v)|`.
    pub magnitude: f64,
}

fn band_magnitudes(image: &Image, band: usize) -> FilterResult<Vec<f64>> {
    if band >= image.bands() {
        return Err(FilterError::InvalidParameter(format!(
            "band {band} out of range for {} band(s)",
            image.bands()
        )));
    }
    let plane = image.band(band)?;
    let plan = Fft2::new(image.rows(), image.cols());
    Ok(centered_spectrum(&plan, &plane).iter().map(|c| c.norm()).collect())
}

/// Centered log-magnitude spectrum of one band, scaled to `[0, 255]`.
///
/// Each sample is `log10(1 + |F|)`, rescaled so the strongest frequency maps
/// to [`SPECTRUM_PEAK`]. An all-zero band yields all zeros.
///
/// # Errors
///
/// [`FilterError::InvalidParameter`] if `band` is out of range.
pub fn log_magnitude_spectrum(image: &Image, band: usize) -> FilterResult<Vec<f64>> {
    trace!(rows = image.rows(), cols = image.cols(), band, "log_magnitude_spectrum");

    let mut spectrum: Vec<f64> = band_magnitudes(image, band)?
        .into_iter()
        .map(f64::ln_1p)
        .map(|v| v / std::f64::consts::LN_10)
        .collect();

    let max = spectrum
        .iter()
        .filter(|v| v.is_finite())
        .fold(0.0f64, |m, &v| m.max(v));
    if max > 0.0 {
        let scale = SPECTRUM_PEAK / max;
        for v in &mut spectrum {
            *v *= scale;
        }
    }
    Ok(spectrum)
}

/// The `count` strongest frequencies of one band, strongest first.
///
/// Offsets are relative to the zero-frequency origin `(rows / 2, cols / 2)`,
/// so the mean of the band always appears at `(0, 0)`. Equal magnitudes keep
/// row-major order.
///
/// # Errors
///
/// [`FilterError::InvalidParameter`] if `band` is out of range.
pub fn dominant_frequencies(
    image: &Image,
    band: usize,
    count: usize,
) -> FilterResult<Vec<SpectralPeak>> {
    trace!(rows = image.rows(), cols = image.cols(), band, count, "dominant_frequencies");

    let magnitudes = band_magnitudes(image, band)?;
    let (rows, cols) = (image.rows(), image.cols());
    let (u0, v0) = ((rows / 2) as f64, (cols / 2) as f64);

    let mut order: Vec<usize> = (0..magnitudes.len()).collect();
    // Stable sort keeps index order among ties; NaN sorts last
    order.sort_by(|&a, &b| {
        magnitudes[b]
            .partial_cmp(&magnitudes[a])
            .unwrap_or_else(|| magnitudes[a].is_nan().cmp(&magnitudes[b].is_nan()))
    });

    let peaks: Vec<SpectralPeak> = order
        .into_iter()
        .take(count)
        .map(|i| SpectralPeak {
            offset: Center::new((i / cols) as f64 - u0, (i % cols) as f64 - v0),
            magnitude: magnitudes[i],
        })
        .collect();

    debug!(found = peaks.len(), "Ranked dominant frequencies");
    Ok(peaks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    /// Cosine with `k` cycles down the rows.
    fn row_cosine(rows: usize, cols: usize, k: usize, mean: f64) -> Image {
        let data = (0..rows * cols)
            .map(|i| {
                let r = (i / cols) as f64;
                mean + 10.0 * (2.0 * PI * k as f64 * r / rows as f64).cos()
            })
            .collect();
        Image::from_f64(rows, cols, 1, data).unwrap()
    }

    #[test]
    fn test_log_spectrum_range() {
        let img = row_cosine(32, 32, 4, 50.0);
        let spec = log_magnitude_spectrum(&img, 0).unwrap();
        assert_eq!(spec.len(), 32 * 32);
        let max = spec.iter().cloned().fold(f64::MIN, f64::max);
        let min = spec.iter().cloned().fold(f64::MAX, f64::min);
        assert_abs_diff_eq!(max, 255.0, epsilon = 1e-9);
        assert!(min >= 0.0);
        // DC dominates a positive-mean image
        assert_abs_diff_eq!(spec[16 * 32 + 16], 255.0, epsilon = 1e-9);
    }

    #[test]
    fn test_log_spectrum_of_zeros() {
        let img = Image::new(8, 8, 1).unwrap();
        let spec = log_magnitude_spectrum(&img, 0).unwrap();
        assert!(spec.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_dominant_frequencies_finds_cosine() {
        let img = row_cosine(32, 32, 4, 50.0);
        let peaks = dominant_frequencies(&img, 0, 3).unwrap();
        assert_eq!(peaks.len(), 3);
        assert_eq!(peaks[0].offset, Center::new(0.0, 0.0));
        assert_abs_diff_eq!(peaks[0].magnitude, 50.0 * 1024.0, epsilon = 1e-6);
        // The cosine splits into a mirrored pair
        assert_eq!(peaks[1].offset, peaks[2].offset.mirrored());
        assert_eq!(peaks[1].offset.u.abs(), 4.0);
        assert_eq!(peaks[1].offset.v, 0.0);
        assert_abs_diff_eq!(peaks[1].magnitude, 5.0 * 1024.0, epsilon = 1e-6);
        assert_abs_diff_eq!(peaks[1].magnitude, peaks[2].magnitude, epsilon = 1e-6);
    }

    #[test]
    fn test_dominant_frequencies_odd_size() {
        let img = row_cosine(15, 9, 2, 0.0);
        let peaks = dominant_frequencies(&img, 0, 2).unwrap();
        let mut rows: Vec<f64> = peaks.iter().map(|p| p.offset.u).collect();
        rows.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(rows, vec![-2.0, 2.0]);
    }

    #[test]
    fn test_count_larger_than_spectrum() {
        let img = Image::filled(4, 4, 1, 1.0).unwrap();
        let peaks = dominant_frequencies(&img, 0, 100).unwrap();
        assert_eq!(peaks.len(), 16);
        assert_eq!(peaks[0].offset, Center::ORIGIN);
        assert_abs_diff_eq!(peaks[0].magnitude, 16.0, epsilon = 1e-12);
        assert!(peaks[1..].iter().all(|p| p.magnitude < 1e-12));
    }

    #[test]
    fn test_bad_band() {
        let img = Image::filled(4, 4, 2, 1.0).unwrap();
        assert!(matches!(
            log_magnitude_spectrum(&img, 2),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            dominant_frequencies(&img, 5, 1),
            Err(FilterError::InvalidParameter(_))
        ));
    }
}
