//! Integration tests for the fourier crates.
//!
//! End-to-end checks through the public [`fourier::Image`] and
//! [`fourier::SharedImage`] surfaces: file round trips, whole pipelines,
//! aliasing and the error classes callers can match on.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use fourier::{CannyParams, ColorSpace, Error, Image, Kernel, SharedImage};
    use tempfile::tempdir;

    fn mean_abs_diff(a: &[u8], b: &[u8]) -> f64 {
        assert_eq!(a.len(), b.len());
        let total: u64 = a.iter().zip(b).map(|(x, y)| x.abs_diff(*y) as u64).sum();
        total as f64 / a.len() as f64
    }

    /// decode -> encode -> decode keeps geometry and stays close at quality 100
    #[test]
    fn test_jpeg_roundtrip_rgb() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.jpg");
        let second = dir.path().join("second.jpg");

        fixtures::gradient_rgb(48, 32).write_jpeg(&first, 100).unwrap();
        let decoded = Image::read_jpeg(&first).unwrap();
        decoded.write_jpeg(&second, 100).unwrap();
        let again = Image::read_jpeg(&second).unwrap();

        assert_eq!((again.width(), again.height()), (48, 32));
        assert_eq!(again.channels(), decoded.channels());
        assert_eq!(again.color_space(), ColorSpace::Rgb);
        let diff = mean_abs_diff(decoded.buffer().as_slice(), again.buffer().as_slice());
        assert!(diff < 4.0, "mean diff {}", diff);
    }

    #[test]
    fn test_jpeg_roundtrip_gray() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.jpg");

        let mut img = fixtures::gradient_rgb(24, 24);
        img.to_gray().unwrap();
        img.write_jpeg(&path, 100).unwrap();

        let back = Image::read_jpeg(&path).unwrap();
        assert_eq!(back.color_space(), ColorSpace::Gray);
        assert_eq!(back.channels(), 1);
        assert_eq!((back.width(), back.height()), (24, 24));
        let diff = mean_abs_diff(img.buffer().as_slice(), back.buffer().as_slice());
        assert!(diff < 2.0, "mean diff {}", diff);
    }

    /// YCbCr samples go into the JPEG unconverted and decode back as RGB
    #[test]
    fn test_ycbcr_jpeg_decodes_studio_range() {
        let mut img = fixtures::uniform_rgb(16, 16, 0);
        for y in 0..16 {
            for x in 8..16 {
                for c in 0..3 {
                    img.set_sample(x, y, c, 255).unwrap();
                }
            }
        }
        img.to_ycbcr().unwrap();
        let bytes = img.encode_jpeg(100).unwrap();

        let back = Image::from_jpeg_bytes(&bytes).unwrap();
        assert_eq!(back.color_space(), ColorSpace::Rgb);
        assert_eq!((back.width(), back.height()), (16, 16));
        for c in 0..3 {
            assert!(back.sample(2, 8, c).unwrap().abs_diff(16) <= 3);
            assert!(back.sample(13, 8, c).unwrap().abs_diff(235) <= 3);
        }
    }

    #[test]
    fn test_arithmetic_blend() {
        let mut base = fixtures::uniform_rgb(8, 8, 100);
        let overlay = fixtures::uniform_rgb(8, 8, 60);
        base.mul_scalar(0.5).unwrap();
        base.add(&overlay).unwrap();
        assert!(base.buffer().as_slice().iter().all(|&v| v == 110));

        let shared = SharedImage::new(base);
        shared.add(&shared.clone()).unwrap();
        shared.sqrt().unwrap();
        // 220 -> 14.83 -> 15
        assert_eq!(shared.with(|img| img.sample(3, 3, 1)).unwrap().unwrap(), 15);

        let gray = fixtures::noise_gray(8, 8, 3);
        assert!(shared.with_mut(|img| img.add(&gray)).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_bright_column_regression() {
        let mut img = fixtures::bright_column();
        img.canny_edge_detect(&CannyParams::default()).unwrap();

        for y in 0..5 {
            for x in 0..5 {
                let expect = if (x == 1 || x == 3) && (1..=3).contains(&y) { 255 } else { 0 };
                assert_eq!(img.sample(x, y, 0).unwrap(), expect, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let params = [
            CannyParams::default(),
            CannyParams {
                std_dev: 0.5,
                size_f: 1,
                upper_threshold: 1.0,
                lower_threshold: 0.0,
            },
            CannyParams {
                std_dev: 3.0,
                size_f: 4,
                upper_threshold: 200.0,
                lower_threshold: 100.0,
            },
        ];
        for value in [0u8, 77, 255] {
            for p in &params {
                let mut img = fixtures::uniform_rgb(17, 11, value);
                img.canny_edge_detect(p).unwrap();
                assert!(img.buffer().as_slice().iter().all(|&v| v == 0), "value {} {:?}", value, p);
            }
        }
    }

    #[test]
    fn test_blur_size_zero_is_identity() {
        let original = fixtures::noise_gray(19, 13, 7);
        let mut img = original.copy();
        img.gaussian_blur(2.5, 0).unwrap();
        assert_eq!(img, original);

        let mut rgb = fixtures::gradient_rgb(9, 9);
        let before = rgb.copy();
        rgb.gaussian_blur(1.0, 0).unwrap();
        assert_eq!(rgb, before);
    }

    #[test]
    fn test_fft_blur_matches_direct() {
        let original = fixtures::noise_gray(37, 23, 42);
        let mut fft = original.copy();
        let mut direct = original.copy();
        fft.gaussian_blur(1.4, 2).unwrap();
        direct.gaussian_blur_naive(1.4, 2).unwrap();

        for (a, b) in fft.buffer().as_slice().iter().zip(direct.buffer().as_slice()) {
            assert!(a.abs_diff(*b) <= 1, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_to_gray_is_idempotent() {
        let mut once = fixtures::gradient_rgb(10, 6);
        once.to_gray().unwrap();
        let mut twice = once.copy();
        twice.to_gray().unwrap();
        assert_eq!(once, twice);

        let mut from_ycc = fixtures::gradient_rgb(10, 6);
        from_ycc.to_ycbcr().unwrap();
        from_ycc.to_gray().unwrap();
        assert_eq!(from_ycc, once);
    }

    #[test]
    fn test_bad_thresholds_leave_buffer_untouched() {
        let mut img = fixtures::gradient_rgb(8, 8);
        let before = img.copy();
        let err = img
            .canny_edge_detect(&CannyParams {
                upper_threshold: 10.0,
                lower_threshold: 20.0,
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(img, before);
    }

    #[test]
    fn test_full_pipeline() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.jpg");
        let output = dir.path().join("edges.jpg");

        let mut src = fixtures::uniform_rgb(32, 32, 30);
        for y in 8..24 {
            for x in 8..24 {
                for c in 0..3 {
                    src.set_sample(x, y, c, 220).unwrap();
                }
            }
        }
        src.write_jpeg(&input, 100).unwrap();

        let mut img = Image::read_jpeg(&input).unwrap();
        img.to_ycbcr().unwrap();
        img.gaussian_blur(1.0, 1).unwrap();
        img.canny_edge_detect(&CannyParams::default()).unwrap();
        img.write_jpeg(&output, 100).unwrap();

        let edges = Image::read_jpeg(&output).unwrap();
        assert_eq!(edges.color_space(), ColorSpace::Gray);
        assert_eq!((edges.width(), edges.height()), (32, 32));
        // square outline, not the interior or the far background
        assert!(img.sample(8, 16, 0).unwrap() == 255 || img.sample(7, 16, 0).unwrap() == 255);
        assert_eq!(img.sample(16, 16, 0).unwrap(), 0);
        assert_eq!(img.sample(1, 1, 0).unwrap(), 0);
    }

    #[test]
    fn test_params_file_drives_canny() {
        let p: CannyParams =
            serde_yaml::from_str("upper_threshold: 250.0\nlower_threshold: 240.0\n").unwrap();
        assert_eq!(p.std_dev, 1.4);

        let mut img = fixtures::bright_column();
        img.canny_edge_detect(&p).unwrap();
        assert!(img.buffer().as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_shared_handles_alias() {
        let a = SharedImage::new(fixtures::gradient_rgb(8, 8));
        let b = a.clone();
        b.to_gray().unwrap();
        assert_eq!(a.color_space().unwrap(), ColorSpace::Gray);
        assert_eq!(a.channels().unwrap(), 1);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_deep_copy_does_not_alias() {
        let a = SharedImage::new(fixtures::gradient_rgb(8, 8));
        let copy = a.deep_copy().unwrap();
        copy.canny_edge_detect(&CannyParams::default()).unwrap();
        assert_eq!(a.color_space().unwrap(), ColorSpace::Rgb);
        assert_eq!(copy.color_space().unwrap(), ColorSpace::Gray);

        let mut plain = fixtures::gradient_rgb(8, 8);
        let snapshot = plain.copy();
        plain.to_ycbcr().unwrap();
        assert_eq!(snapshot.color_space(), ColorSpace::Rgb);
        assert_ne!(snapshot, plain);
    }

    #[test]
    fn test_error_classes() {
        let dir = tempdir().unwrap();

        let err = Image::read_jpeg(dir.path().join("missing.jpg")).unwrap_err();
        assert!(err.is_io_error());

        let bogus = dir.path().join("bogus.jpg");
        std::fs::write(&bogus, b"not a jpeg at all").unwrap();
        assert!(Image::read_jpeg(&bogus).unwrap_err().is_format_error());

        let img = fixtures::gradient_rgb(4, 4);
        assert!(img.write_jpeg(dir.path().join("q.jpg"), 101).unwrap_err().is_invalid_parameter());
        assert!(!dir.path().join("q.jpg").exists());
        let nested = dir.path().join("no").join("dir.jpg");
        assert!(img.write_jpeg(nested, 90).unwrap_err().is_io_error());

        let mut gray = fixtures::noise_gray(4, 4, 1);
        assert!(matches!(gray.to_rgb(), Err(Error::UnsupportedConversion { .. })));
        assert!(gray.gaussian_blur(0.0, 2).unwrap_err().is_invalid_parameter());
        assert!(gray.gaussian_blur(1.0, -1).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_custom_kernel_convolution() {
        let mut img = fixtures::bright_column();
        // horizontal [1 0 -1] difference
        let k = Kernel::new(vec![1.0, 0.0, -1.0], 3, 1).unwrap();
        img.convolve(&k).unwrap();
        // column x=1 sees +255 from its right neighbour; negatives clamp to 0
        assert_eq!(img.sample(1, 2, 0).unwrap(), 255);
        assert_eq!(img.sample(3, 2, 0).unwrap(), 0);
        assert_eq!(img.sample(2, 2, 0).unwrap(), 0);
    }
}
