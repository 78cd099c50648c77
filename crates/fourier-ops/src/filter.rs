//! Direct spatial convolution.
//!
//! The reference engine: every output sample is the explicit weighted sum
//! over the kernel footprint. Slower than [`fft`](crate::fft) for large
//! kernels but exact, and the engine behind the naive Gaussian and box blurs.
//!
//! All functions compute a true convolution (the kernel is mirrored), so for
//! any kernel they agree with the frequency-domain engine.
//!
//! # Example
//!
//! ```rust
//! use fourier_ops::{BorderMode, filter::convolve_plane_direct, kernel::box_1d};
//!
//! let src = vec![3.0f32; 8 * 8];
//! let k = box_1d(1).unwrap();
//! let out = convolve_plane_direct(&src, 8, 8, &k, BorderMode::Clamp).unwrap();
//! assert!((out[0] - 3.0).abs() < 1e-6);
//! ```

use fourier_core::{Error, PixelBuffer, Result};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::border::BorderMode;
use crate::kernel::{Kernel, box_1d, gaussian_2d};

/// Convolves a `width x height` plane with `kernel` in the spatial domain.
///
/// # Errors
///
/// [`Error::InvalidDimensions`] if the plane length is not `width * height`.
pub fn convolve_plane_direct(
    plane: &[f32],
    width: usize,
    height: usize,
    kernel: &Kernel,
    border: BorderMode,
) -> Result<Vec<f32>> {
    trace!(
        width,
        height,
        kernel_w = kernel.width,
        kernel_h = kernel.height,
        ?border,
        "convolve_plane_direct"
    );

    if plane.len() != width * height {
        return Err(Error::invalid_dimensions(
            width as u32,
            height as u32,
            format!("expected {} values, got {}", width * height, plane.len()),
        ));
    }

    let mut dst = vec![0.0f32; width * height];
    if dst.is_empty() {
        return Ok(dst);
    }
    let (rx, ry) = kernel.radius();
    let (rx, ry) = (rx as isize, ry as isize);

    let fill_row = |(y, row): (usize, &mut [f32])| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for ky in 0..kernel.height {
                let sy = y as isize - (ky as isize - ry);
                for kx in 0..kernel.width {
                    let w = kernel.data[ky * kernel.width + kx];
                    if w == 0.0 {
                        continue;
                    }
                    let sx = x as isize - (kx as isize - rx);
                    sum += w * border.sample(plane, width, height, sx, sy);
                }
            }
            *out = sum;
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(width).enumerate().for_each(fill_row);
    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(width).enumerate().for_each(fill_row);

    Ok(dst)
}

/// Separable convolution: a 1D `row` kernel horizontally, then its transpose vertically.
pub fn convolve_plane_separable(
    plane: &[f32],
    width: usize,
    height: usize,
    row: &Kernel,
    border: BorderMode,
) -> Result<Vec<f32>> {
    let horizontal = Kernel::new(row.data.clone(), row.data.len(), 1)?;
    let tmp = convolve_plane_direct(plane, width, height, &horizontal, border)?;
    convolve_plane_direct(&tmp, width, height, &horizontal.transposed(), border)
}

/// Applies `f` to every channel plane and writes the results back.
///
/// Nothing is written until every channel has been computed.
fn map_channels<F>(buffer: &mut PixelBuffer, f: F) -> Result<()>
where
    F: Fn(&[f32], usize, usize) -> Result<Vec<f32>>,
{
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let planes = (0..buffer.channels())
        .map(|c| buffer.channel_plane(c).and_then(|p| f(&p, w, h)))
        .collect::<Result<Vec<_>>>()?;
    for (c, plane) in planes.iter().enumerate() {
        buffer.store_plane(c, plane)?;
    }
    Ok(())
}

/// Convolves every channel of `buffer` with an arbitrary kernel in place.
pub fn convolve_buffer_direct(
    buffer: &mut PixelBuffer,
    kernel: &Kernel,
    border: BorderMode,
) -> Result<()> {
    trace!(kernel_w = kernel.width, kernel_h = kernel.height, "convolve_buffer_direct");
    map_channels(buffer, |p, w, h| convolve_plane_direct(p, w, h, kernel, border))
}

/// Gaussian blur by direct 2D convolution with the full `(2*size_f+1)^2` kernel.
///
/// Same result as [`fft::blur`](crate::fft::blur) within one sample value.
pub fn gaussian_blur_naive(
    buffer: &mut PixelBuffer,
    std_dev: f32,
    size_f: i32,
    border: BorderMode,
) -> Result<()> {
    let kernel = gaussian_2d(std_dev, size_f)?;
    convolve_buffer_direct(buffer, &kernel, border)
}

/// Uniform blur over a `(2*size_f+1)^2` window, applied as two 1D passes.
pub fn box_blur(buffer: &mut PixelBuffer, size_f: i32, border: BorderMode) -> Result<()> {
    let row = box_1d(size_f)?;
    trace!(size_f, ?border, "box_blur");
    map_channels(buffer, |p, w, h| convolve_plane_separable(p, w, h, &row, border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_impulse_response_is_kernel() {
        let mut src = vec![0.0f32; 7 * 7];
        src[3 * 7 + 3] = 1.0;
        let k = gaussian_2d(1.0, 2).unwrap();
        let out = convolve_plane_direct(&src, 7, 7, &k, BorderMode::Zero).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                assert_relative_eq!(out[(y + 1) * 7 + x + 1], k.data[y * 5 + x], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_true_convolution_mirrors_kernel() {
        // kernel weights only the left tap; output at x reads x + 1
        let k = Kernel::new(vec![1.0, 0.0, 0.0], 3, 1).unwrap();
        let src = [1.0, 2.0, 3.0, 4.0];
        let out = convolve_plane_direct(&src, 4, 1, &k, BorderMode::Zero).unwrap();
        assert_eq!(out, vec![2.0, 3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_separable_equals_full() {
        let src: Vec<f32> = (0..11 * 9).map(|i| (i * 31 % 97) as f32).collect();
        let row = box_1d(2).unwrap();
        let full = Kernel::outer(&row, &row);
        for border in [BorderMode::Zero, BorderMode::Clamp] {
            let a = convolve_plane_separable(&src, 11, 9, &row, border).unwrap();
            let b = convolve_plane_direct(&src, 11, 9, &full, border).unwrap();
            for (x, y) in a.iter().zip(&b) {
                assert_relative_eq!(*x, *y, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_box_blur_uniform_clamp() {
        let mut buf = PixelBuffer::from_vec(6, 6, 1, vec![77; 36]).unwrap();
        box_blur(&mut buf, 2, BorderMode::Clamp).unwrap();
        assert!(buf.as_slice().iter().all(|&v| v == 77));
    }

    #[test]
    fn test_box_blur_zero_border() {
        let mut buf = PixelBuffer::from_vec(3, 1, 1, vec![90, 90, 90]).unwrap();
        box_blur(&mut buf, 1, BorderMode::Zero).unwrap();
        // single row: only the middle kernel row lands inside the image
        assert_eq!(buf.as_slice(), &[20, 30, 20]);
    }

    #[test]
    fn test_naive_rejects_bad_params() {
        let mut buf = PixelBuffer::from_vec(2, 2, 1, vec![1, 2, 3, 4]).unwrap();
        assert!(gaussian_blur_naive(&mut buf, -1.0, 1, BorderMode::Zero).is_err());
        assert!(box_blur(&mut buf, -1, BorderMode::Zero).is_err());
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_length_mismatch() {
        let k = Kernel::identity();
        assert!(convolve_plane_direct(&[0.0; 5], 2, 2, &k, BorderMode::Zero).is_err());
    }
}
