//! Pixel and buffer level color space conversion.
//!
//! All transforms use the BT.601 studio-swing matrices for 8-bit data:
//!
//! ```text
//! Y  =  16 + ( 65.738 R + 129.057 G +  25.064 B) / 256
//! Cb = 128 + (-37.945 R -  74.494 G + 112.439 B) / 256
//! Cr = 128 + (112.439 R -  94.154 G -  18.285 B) / 256
//!
//! R = (298.082 Y                + 408.583 Cr) / 256 - 222.921
//! G = (298.082 Y - 100.291 Cb - 208.120 Cr) / 256 + 135.576
//! B = (298.082 Y + 516.412 Cb              ) / 256 - 276.836
//! ```
//!
//! Results are rounded half away from zero and clamped to [0, 255]. An
//! RGB -> YCbCr -> RGB round trip stays within 2 of the input per sample.
//!
//! # Example
//!
//! ```rust
//! use fourier_color::convert::Bt601;
//!
//! let ycc = [255.0_f32, 0.0, 0.0].rgb_to_ycbcr();
//! assert!((ycc[0] - 81.48).abs() < 0.01);
//! ```

use fourier_core::{ColorSpace, Error, PixelBuffer, Result, quantize};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// RGB -> YCbCr matrix rows, already divided by 256.
const RGB_TO_YCC: [[f32; 3]; 3] = [
    [65.738 / 256.0, 129.057 / 256.0, 25.064 / 256.0],
    [-37.945 / 256.0, -74.494 / 256.0, 112.439 / 256.0],
    [112.439 / 256.0, -94.154 / 256.0, -18.285 / 256.0],
];
const YCC_OFFSET: [f32; 3] = [16.0, 128.0, 128.0];

/// YCbCr -> RGB matrix rows, already divided by 256.
const YCC_TO_RGB: [[f32; 3]; 3] = [
    [298.082 / 256.0, 0.0, 408.583 / 256.0],
    [298.082 / 256.0, -100.291 / 256.0, -208.120 / 256.0],
    [298.082 / 256.0, 516.412 / 256.0, 0.0],
];
const RGB_OFFSET: [f32; 3] = [-222.921, 135.576, -276.836];

#[inline]
fn mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// BT.601 transforms on a single unquantized pixel.
pub trait Bt601: Sized {
    /// RGB -> YCbCr.
    fn rgb_to_ycbcr(self) -> Self;

    /// YCbCr -> RGB.
    fn ycbcr_to_rgb(self) -> Self;

    /// Luma (the Y component of [`rgb_to_ycbcr`](Self::rgb_to_ycbcr)).
    fn luma(self) -> f32;
}

impl Bt601 for [f32; 3] {
    #[inline]
    fn rgb_to_ycbcr(self) -> Self {
        let v = mul(&RGB_TO_YCC, self);
        [v[0] + YCC_OFFSET[0], v[1] + YCC_OFFSET[1], v[2] + YCC_OFFSET[2]]
    }

    #[inline]
    fn ycbcr_to_rgb(self) -> Self {
        let v = mul(&YCC_TO_RGB, self);
        [v[0] + RGB_OFFSET[0], v[1] + RGB_OFFSET[1], v[2] + RGB_OFFSET[2]]
    }

    #[inline]
    fn luma(self) -> f32 {
        let m = &RGB_TO_YCC[0];
        m[0] * self[0] + m[1] * self[1] + m[2] * self[2] + YCC_OFFSET[0]
    }
}

#[inline]
fn load(px: &[u8]) -> [f32; 3] {
    [px[0] as f32, px[1] as f32, px[2] as f32]
}

#[inline]
fn store(px: &mut [u8], v: [f32; 3]) {
    px[0] = quantize(v[0]);
    px[1] = quantize(v[1]);
    px[2] = quantize(v[2]);
}

/// Returns `true` if `from -> to` has a defined transform.
///
/// Same-space pairs are always supported (no-op). Grayscale cannot be
/// expanded back to color.
pub fn is_supported(from: ColorSpace, to: ColorSpace) -> bool {
    from == to || from != ColorSpace::Gray
}

/// Converts a buffer between color spaces into a new buffer.
///
/// Same-space conversion returns an identical copy. Converting to
/// [`ColorSpace::Gray`] yields a one-channel buffer. The input is never
/// modified, so a failed conversion leaves the caller's data intact.
///
/// # Errors
///
/// - [`Error::UnsupportedConversion`] for `Gray -> Rgb` and `Gray -> YCbCr`
/// - [`Error::InvalidDimensions`] if the buffer channel count does not match `from`
pub fn convert(buffer: &PixelBuffer, from: ColorSpace, to: ColorSpace) -> Result<PixelBuffer> {
    trace!(%from, %to, width = buffer.width(), height = buffer.height(), "convert");

    if !is_supported(from, to) {
        return Err(Error::unsupported_conversion(from, to));
    }
    if buffer.channels() != from.channels() {
        return Err(Error::invalid_dimensions(
            buffer.width(),
            buffer.height(),
            format!(
                "{} buffer must have {} channels, got {}",
                from,
                from.channels(),
                buffer.channels()
            ),
        ));
    }
    if from == to {
        return Ok(buffer.clone());
    }

    match (from, to) {
        (ColorSpace::Rgb, ColorSpace::YCbCr) => Ok(map_pixels(buffer.clone(), Bt601::rgb_to_ycbcr)),
        (ColorSpace::YCbCr, ColorSpace::Rgb) => Ok(map_pixels(buffer.clone(), Bt601::ycbcr_to_rgb)),
        (ColorSpace::Rgb, ColorSpace::Gray) => reduce(buffer, |px| quantize(load(px).luma())),
        (ColorSpace::YCbCr, ColorSpace::Gray) => reduce(buffer, |px| px[0]),
        _ => Err(Error::unsupported_conversion(from, to)),
    }
}

fn map_pixels(mut buffer: PixelBuffer, f: fn([f32; 3]) -> [f32; 3]) -> PixelBuffer {
    let apply = |px: &mut [u8]| store(px, f(load(px)));

    #[cfg(feature = "parallel")]
    buffer.as_mut_slice().par_chunks_exact_mut(3).for_each(apply);
    #[cfg(not(feature = "parallel"))]
    buffer.as_mut_slice().chunks_exact_mut(3).for_each(apply);

    buffer
}

fn reduce<F>(buffer: &PixelBuffer, f: F) -> Result<PixelBuffer>
where
    F: Fn(&[u8]) -> u8 + Sync,
{
    debug!(pixels = buffer.pixel_count(), "reducing to single channel");

    #[cfg(feature = "parallel")]
    let gray: Vec<u8> = buffer.as_slice().par_chunks_exact(3).map(&f).collect();
    #[cfg(not(feature = "parallel"))]
    let gray: Vec<u8> = buffer.as_slice().chunks_exact(3).map(&f).collect();

    PixelBuffer::from_vec(buffer.width(), buffer.height(), 1, gray)
}
