//! Integration tests for freqfx crates.
//!
//! End-to-end scenarios that cross the core buffer types, filter
//! construction, application and presets.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use freqfx_core::{dimensions, Image, SampleType, TransferFunction};
    use freqfx_ops::{
        apply_banded, apply_frequency_filter, complement, compose_filter, compose_for,
        dominant_frequencies, Center, FilterBank, FilterDescriptor, FilterKind, Shape,
    };
    use std::f64::consts::PI;

    const SHAPES: [Shape; 3] = [
        Shape::Ideal,
        Shape::Gaussian,
        Shape::Butterworth { order: 2.0 },
    ];

    fn textured(rows: usize, cols: usize, bands: usize) -> Image {
        let data = (0..rows * cols * bands)
            .map(|i| ((i * 7919 + 13) % 251) as f64)
            .collect();
        Image::from_f64(rows, cols, bands, data).unwrap()
    }

    fn descriptors() -> Vec<FilterDescriptor> {
        let mut out = Vec::new();
        for shape in SHAPES {
            out.push(FilterDescriptor::lowpass(5.0, shape));
            out.push(FilterDescriptor::bandreject(6.0, 3.0, shape));
            out.push(FilterDescriptor::notchreject(Center::new(3.0, 4.0), 2.0, shape));
        }
        out
    }

    /// 64x64 constant image through an ideal lowpass at the spectrum center.
    #[test]
    fn test_constant_image_lowpass() {
        let img = Image::from_u8(64, 64, 1, &[100u8; 64 * 64]).unwrap();
        assert_eq!(dimensions(&img).as_tuple(), (64, 64, 1, SampleType::U8));

        let lowpass = FilterDescriptor::lowpass(8.0, Shape::Ideal)
            .with_center(Center::absolute(64, 64, 32, 32));
        let h = compose_for(&img, &lowpass).unwrap();
        let out = apply_frequency_filter(&img, &h, 0.0).unwrap();

        for &v in out.data() {
            assert_abs_diff_eq!(v, 100.0, epsilon = 1e-9);
        }
        assert!(out.to_u8_clamped().iter().all(|&v| v == 100));
    }

    /// Periodic interference at (+-10, +-10) is removed by a notch reject.
    #[test]
    fn test_notch_removes_interference() {
        let (rows, cols) = (64, 64);
        let data = (0..rows * cols)
            .map(|i| {
                let (r, c) = ((i / cols) as f64, (i % cols) as f64);
                100.0 + 20.0 * (2.0 * PI * 10.0 * (r + c) / 64.0).cos()
            })
            .collect();
        let img = Image::from_f64(rows, cols, 1, data).unwrap();

        let peaks = dominant_frequencies(&img, 0, 3).unwrap();
        assert_eq!(peaks[0].offset, Center::ORIGIN);
        for p in &peaks[1..] {
            assert_eq!((p.offset.u.abs(), p.offset.v.abs()), (10.0, 10.0));
        }

        for shape in [Shape::Gaussian, Shape::Butterworth { order: 2.0 }] {
            let notch = FilterDescriptor::notchreject(Center::new(10.0, 10.0), 3.0, shape);
            let h = compose_for(&img, &notch).unwrap();
            assert!(h.get(42, 42) < 1e-9, "{shape}");
            assert!(h.get(22, 22) < 1e-9, "{shape}");
            assert!(h.get(32, 0) > 0.99, "{shape}");

            let out = apply_frequency_filter(&img, &h, 0.0).unwrap();
            let (lo, hi) = out
                .data()
                .iter()
                .fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            assert!(hi - lo < 1e-6, "{shape}: residual ripple {}", hi - lo);
            assert_abs_diff_eq!(lo, 100.0 * h.get(32, 32), epsilon = 1e-6);
        }
    }

    /// Alternating-row stripes sit on the Nyquist row and can be notched.
    #[test]
    fn test_notch_removes_alternating_rows() {
        let (rows, cols) = (64, 64);
        let data = (0..rows * cols)
            .map(|i| if (i / cols) % 2 == 0 { 120.0 } else { 80.0 })
            .collect();
        let img = Image::from_f64(rows, cols, 1, data).unwrap();

        let peaks = dominant_frequencies(&img, 0, 2).unwrap();
        assert_eq!(peaks[1].offset, Center::new(-32.0, 0.0));

        for shape in [Shape::Ideal, Shape::Gaussian] {
            for offset in [Center::new(-32.0, 0.0), Center::new(32.0, 0.0)] {
                let notch = FilterDescriptor::notchreject(offset, 1.0, shape);
                let h = compose_for(&img, &notch).unwrap();
                let out = apply_frequency_filter(&img, &h, 0.0).unwrap();
                for &v in out.data() {
                    assert_abs_diff_eq!(v, 100.0, epsilon = 1e-9);
                }
            }
        }
    }

    /// An impulse has a flat spectrum; after filtering, its spectrum is H.
    #[test]
    fn test_notch_attenuates_impulse_spectrum() {
        let mut img = Image::new(64, 64, 1).unwrap();
        img.set(32, 32, 0, 1.0);

        for shape in [Shape::Gaussian, Shape::Butterworth { order: 2.0 }] {
            let notch = FilterDescriptor::notchreject(Center::new(10.0, 10.0), 3.0, shape);
            let h = compose_for(&img, &notch).unwrap();
            let out = apply_frequency_filter(&img, &h, 0.0).unwrap();

            let spectrum = dominant_frequencies(&out, 0, 64 * 64).unwrap();
            for p in &spectrum {
                let (u, v) = ((p.offset.u + 32.0) as usize, (p.offset.v + 32.0) as usize);
                assert_abs_diff_eq!(p.magnitude, h.get(u, v), epsilon = 1e-9);
            }
            let at_notch = spectrum
                .iter()
                .find(|p| p.offset == Center::new(10.0, 10.0))
                .unwrap();
            assert!(at_notch.magnitude < 1e-9, "{shape}");
        }
    }

    /// apply(H) + apply(1 - H) == apply(1), on even and odd shapes.
    #[test]
    fn test_complement_round_trip() {
        for (rows, cols) in [(32, 32), (15, 21), (16, 9)] {
            let img = textured(rows, cols, 3);
            let identity =
                apply_frequency_filter(&img, &TransferFunction::ones(rows, cols).unwrap(), 0.0)
                    .unwrap();

            for d in descriptors() {
                let h = compose_filter(&d, rows, cols).unwrap();
                let a = apply_frequency_filter(&img, &h, 0.0).unwrap();
                let b = apply_frequency_filter(&img, &complement(&h), 0.0).unwrap();
                for ((x, y), z) in a.data().iter().zip(b.data()).zip(identity.data()) {
                    assert_abs_diff_eq!(x + y, *z, epsilon = 1e-8);
                }
                for (z, orig) in identity.data().iter().zip(img.data()) {
                    assert_abs_diff_eq!(*z, *orig, epsilon = 1e-8);
                }
            }
        }
    }

    /// Every kind and rolloff stays in [0, 1] and pairs sum to exactly one.
    #[test]
    fn test_family_bounds_and_pairs() {
        for base in descriptors() {
            for d in [base, base.complement()] {
                let h = compose_filter(&d, 33, 40).unwrap();
                let (lo, hi) = h.min_max();
                assert!(lo >= 0.0 && hi <= 1.0, "{} {}", d.kind, d.shape);

                let partner = compose_filter(&d.complement(), 33, 40).unwrap();
                assert!(h.data().iter().zip(partner.data()).all(|(a, b)| a + b == 1.0));
            }
        }
    }

    #[test]
    fn test_delta_offset() {
        let img = textured(20, 20, 2);
        let h = compose_filter(&FilterDescriptor::highpass(3.0, Shape::Gaussian), 20, 20).unwrap();
        let plain = apply_frequency_filter(&img, &h, 0.0).unwrap();
        let shifted = apply_frequency_filter(&img, &h, 128.0).unwrap();
        for (a, b) in plain.data().iter().zip(shifted.data()) {
            assert_abs_diff_eq!(b - a, 128.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_broadcast_matches_banded() {
        let img = textured(24, 18, 3);
        let bandpass = FilterDescriptor::bandpass(5.0, 4.0, Shape::Butterworth { order: 1.0 });
        let h = compose_filter(&bandpass, 24, 18).unwrap();
        let broadcast = apply_frequency_filter(&img, &h, 0.0).unwrap();
        let banded = apply_banded(&img, &[h.clone(), h.clone(), h], 0.0).unwrap();
        assert_eq!(broadcast.data(), banded.data());
    }

    #[test]
    fn test_input_is_untouched() {
        let img = textured(16, 16, 1);
        let before = img.data().to_vec();
        let h = TransferFunction::zeros(16, 16).unwrap();
        let _ = apply_frequency_filter(&img, &h, 5.0).unwrap();
        assert_eq!(img.data(), before.as_slice());
    }

    #[test]
    fn test_preset_pipeline() {
        use std::io::Write;

        let yaml = r#"
name: cleanup
filters:
  - name: moire
    kind: notchreject
    shape: { type: gaussian }
    center: { u: 3, v: 4 }
    radius: 2
  - name: smooth
    kind: lowpass
    shape: { type: butterworth, order: 2 }
    radius: 6
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleanup.yaml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(yaml.as_bytes())
            .unwrap();

        let bank = FilterBank::from_file(&path).unwrap();
        assert_eq!(bank.get("moire").unwrap().kind, FilterKind::Notchreject);

        let img = textured(32, 32, 1);
        let built = bank.build_all(32, 32).unwrap();
        let filters: Vec<TransferFunction> = built.into_iter().map(|(_, h)| h).collect();

        let variants = freqfx_ops::parallel::apply_variants(&img, &filters, 0.0).unwrap();
        for (h, out) in filters.iter().zip(&variants) {
            let seq = apply_frequency_filter(&img, h, 0.0).unwrap();
            assert_eq!(out.data(), seq.data());
        }
    }

    #[test]
    fn test_batch_of_frames() {
        let frames: Vec<Image> = (0..5)
            .map(|i| Image::filled(16, 12, 2, i as f64).unwrap())
            .collect();
        let h = compose_filter(&FilterDescriptor::lowpass(2.0, Shape::Gaussian), 16, 12).unwrap();
        let out = freqfx_ops::parallel::apply_batch(&frames, &h, 0.0).unwrap();
        for (i, img) in out.iter().enumerate() {
            assert_eq!(img.sample_type(), SampleType::F64);
            assert_abs_diff_eq!(img.get(7, 5, 1), i as f64, epsilon = 1e-9);
        }
    }
}
