//! Parallel filtering across independent images using Rayon.
//!
//! Each image is still filtered on a single thread; parallelism only spans
//! whole images (or whole filter variants), so results are identical to the
//! sequential path.
//!
//! # Example
//!
//! ```rust
//! use freqfx_core::{Image, TransferFunction};
//! use freqfx_ops::parallel;
//!
//! let frames: Vec<Image> = (0..4)
//!     .map(|i| Image::filled(32, 32, 1, i as f64).unwrap())
//!     .collect();
//! let h = TransferFunction::ones(32, 32).unwrap();
//! let out = parallel::apply_batch(&frames, &h, 0.0).unwrap();
//! assert_eq!(out.len(), 4);
//! ```

use crate::apply::FrequencyFilter;
use crate::FilterResult;
use freqfx_core::{Image, TransferFunction};
use rayon::prelude::*;
use tracing::debug;

/// Applies one transfer function to many same-sized images in parallel.
///
/// The transform is planned once and shared read-only by all workers.
/// Output order matches input order.
///
/// # Errors
///
/// Fails if any image fails; see
/// [`apply_frequency_filter`](crate::apply::apply_frequency_filter).
pub fn apply_batch(
    images: &[Image],
    h: &TransferFunction,
    delta: f64,
) -> FilterResult<Vec<Image>> {
    let filter = FrequencyFilter::new(h.clone());
    let out = images
        .par_iter()
        .map(|img| filter.apply(img, delta))
        .collect::<FilterResult<Vec<_>>>()?;

    debug!(images = out.len(), rows = h.rows(), cols = h.cols(), "Applied filter batch");
    Ok(out)
}

/// Applies several transfer functions to the same image in parallel.
///
/// Returns one filtered image per entry of `filters`, in order. Pairs well
/// with [`FilterBank::build_all`](crate::preset::FilterBank::build_all).
pub fn apply_variants(
    image: &Image,
    filters: &[TransferFunction],
    delta: f64,
) -> FilterResult<Vec<Image>> {
    filters
        .par_iter()
        .map(|h| FrequencyFilter::new(h.clone()).apply(image, delta))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::apply_frequency_filter;
    use crate::compose::{compose_filter, FilterDescriptor};
    use crate::shape::Shape;
    use crate::FilterError;

    fn frame(seed: usize) -> Image {
        let data = (0..24 * 20).map(|i| ((i * 31 + seed * 17) % 97) as f64).collect();
        Image::from_f64(24, 20, 1, data).unwrap()
    }

    #[test]
    fn test_batch_matches_sequential() {
        let frames: Vec<Image> = (0..6).map(frame).collect();
        let h = compose_filter(&FilterDescriptor::lowpass(5.0, Shape::Gaussian), 24, 20).unwrap();
        let batch = apply_batch(&frames, &h, 2.0).unwrap();
        for (img, out) in frames.iter().zip(&batch) {
            let seq = apply_frequency_filter(img, &h, 2.0).unwrap();
            assert_eq!(out.data(), seq.data());
        }
    }

    #[test]
    fn test_batch_empty() {
        let h = TransferFunction::ones(8, 8).unwrap();
        assert!(apply_batch(&[], &h, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_batch_fails_on_mismatch() {
        let frames = vec![frame(0), Image::filled(8, 8, 1, 1.0).unwrap()];
        let h = TransferFunction::ones(24, 20).unwrap();
        assert!(matches!(
            apply_batch(&frames, &h, 0.0),
            Err(FilterError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_variants() {
        let img = frame(3);
        let filters = vec![
            TransferFunction::ones(24, 20).unwrap(),
            TransferFunction::zeros(24, 20).unwrap(),
        ];
        let out = apply_variants(&img, &filters, 0.0).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out[0].get(5, 5, 0) - img.get(5, 5, 0)).abs() < 1e-9);
        assert!(out[1].get(5, 5, 0).abs() < 1e-12);
    }
}
