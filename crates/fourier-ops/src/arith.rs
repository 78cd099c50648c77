//! Elementwise sample arithmetic.
//!
//! Every sample is lifted to `f32`, combined and written back through
//! [`quantize`], so results round half away from zero and saturate to
//! `[0, 255]`. Interleaved channels are independent, which makes the
//! per-channel operation a plain walk over the raw samples.
//!
//! # Example
//!
//! ```rust
//! use fourier_core::PixelBuffer;
//! use fourier_ops::arith;
//!
//! let mut a = PixelBuffer::from_vec(2, 1, 1, vec![100, 200]).unwrap();
//! let b = PixelBuffer::from_vec(2, 1, 1, vec![50, 100]).unwrap();
//! arith::add(&mut a, &b).unwrap();
//! assert_eq!(a.as_slice(), &[150, 255]);
//! ```

use fourier_core::{Error, PixelBuffer, Result, quantize};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn check_geometry(a: &PixelBuffer, b: &PixelBuffer) -> Result<()> {
    if a.dimensions() != b.dimensions() || a.channels() != b.channels() {
        return Err(Error::invalid_parameter(format!(
            "operands differ: {}x{}x{} vs {}x{}x{}",
            a.width(),
            a.height(),
            a.channels(),
            b.width(),
            b.height(),
            b.channels()
        )));
    }
    Ok(())
}

fn check_finite(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid_parameter(format!("{} must be finite, got {}", name, value)));
    }
    Ok(())
}

fn map_samples<F>(buffer: &mut PixelBuffer, f: F)
where
    F: Fn(f32) -> f32 + Sync + Send,
{
    let apply = |v: &mut u8| *v = quantize(f(*v as f32));
    #[cfg(feature = "parallel")]
    buffer.as_mut_slice().par_iter_mut().for_each(apply);
    #[cfg(not(feature = "parallel"))]
    buffer.as_mut_slice().iter_mut().for_each(apply);
}

fn zip_samples<F>(buffer: &mut PixelBuffer, other: &PixelBuffer, f: F) -> Result<()>
where
    F: Fn(f32, f32) -> f32 + Sync + Send,
{
    check_geometry(buffer, other)?;
    let apply = |(v, o): (&mut u8, &u8)| *v = quantize(f(*v as f32, *o as f32));
    #[cfg(feature = "parallel")]
    buffer
        .as_mut_slice()
        .par_iter_mut()
        .zip(other.as_slice().par_iter())
        .for_each(apply);
    #[cfg(not(feature = "parallel"))]
    buffer.as_mut_slice().iter_mut().zip(other.as_slice()).for_each(apply);
    Ok(())
}

/// Adds `other` to `buffer` sample by sample.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if the geometry or channel count differs.
/// `buffer` is untouched in that case.
pub fn add(buffer: &mut PixelBuffer, other: &PixelBuffer) -> Result<()> {
    trace!("arith::add");
    zip_samples(buffer, other, |a, b| a + b)
}

/// Multiplies `buffer` by `other` sample by sample.
pub fn mul(buffer: &mut PixelBuffer, other: &PixelBuffer) -> Result<()> {
    trace!("arith::mul");
    zip_samples(buffer, other, |a, b| a * b)
}

/// Adds `value` to every sample.
///
/// # Errors
///
/// [`Error::InvalidParameter`] for a NaN or infinite `value`.
pub fn add_scalar(buffer: &mut PixelBuffer, value: f32) -> Result<()> {
    check_finite("addend", value)?;
    trace!(value, "arith::add_scalar");
    map_samples(buffer, |v| v + value);
    Ok(())
}

/// Scales every sample by `factor`.
pub fn mul_scalar(buffer: &mut PixelBuffer, factor: f32) -> Result<()> {
    check_finite("factor", factor)?;
    trace!(factor, "arith::mul_scalar");
    map_samples(buffer, |v| v * factor);
    Ok(())
}

/// Raises every sample to `exponent`.
///
/// A zero sample under a negative exponent saturates to 255.
pub fn pow(buffer: &mut PixelBuffer, exponent: f32) -> Result<()> {
    check_finite("exponent", exponent)?;
    trace!(exponent, "arith::pow");
    map_samples(buffer, |v| v.powf(exponent));
    Ok(())
}

/// Replaces every sample by its square root.
pub fn sqrt(buffer: &mut PixelBuffer) {
    trace!("arith::sqrt");
    map_samples(buffer, f32::sqrt);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(data: &[u8]) -> PixelBuffer {
        PixelBuffer::from_vec(data.len() as u32, 1, 1, data.to_vec()).unwrap()
    }

    #[test]
    fn test_add_saturates() {
        let mut a = gray(&[0, 100, 200, 255]);
        add(&mut a, &gray(&[5, 100, 100, 1])).unwrap();
        assert_eq!(a.as_slice(), &[5, 200, 255, 255]);
    }

    #[test]
    fn test_mul_images() {
        let mut a = gray(&[0, 2, 15, 16]);
        mul(&mut a, &gray(&[9, 3, 17, 16])).unwrap();
        assert_eq!(a.as_slice(), &[0, 6, 255, 255]);
    }

    #[test]
    fn test_channels_stay_separate() {
        let mut a = PixelBuffer::from_vec(1, 1, 3, vec![10, 20, 30]).unwrap();
        let b = PixelBuffer::from_vec(1, 1, 3, vec![1, 2, 3]).unwrap();
        mul(&mut a, &b).unwrap();
        assert_eq!(a.as_slice(), &[10, 40, 90]);
    }

    #[test]
    fn test_mismatch_leaves_buffer_untouched() {
        let mut a = gray(&[1, 2, 3]);
        assert!(add(&mut a, &gray(&[1, 2])).unwrap_err().is_invalid_parameter());
        let rgb = PixelBuffer::from_vec(1, 1, 3, vec![1, 2, 3]).unwrap();
        let mut one = gray(&[7]);
        assert!(mul(&mut one, &rgb).is_err());
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(one.as_slice(), &[7]);
    }

    #[test]
    fn test_scalar_ops_round_and_clamp() {
        let mut a = gray(&[10, 20, 250]);
        add_scalar(&mut a, -15.5).unwrap();
        // -5.5 clamps, 4.5 rounds away from zero, 234.5 -> 235
        assert_eq!(a.as_slice(), &[0, 5, 235]);

        let mut b = gray(&[3, 100, 200]);
        mul_scalar(&mut b, 0.5).unwrap();
        assert_eq!(b.as_slice(), &[2, 50, 100]);
        mul_scalar(&mut b, 3.0).unwrap();
        assert_eq!(b.as_slice(), &[6, 150, 255]);
    }

    #[test]
    fn test_pow_and_sqrt() {
        let mut a = gray(&[0, 2, 3, 16]);
        pow(&mut a, 2.0).unwrap();
        assert_eq!(a.as_slice(), &[0, 4, 9, 255]);

        let mut b = gray(&[0, 4, 10, 255]);
        sqrt(&mut b);
        assert_eq!(b.as_slice(), &[0, 2, 3, 16]);

        let mut c = gray(&[0, 1, 4]);
        pow(&mut c, -1.0).unwrap();
        assert_eq!(c.as_slice(), &[255, 1, 0]);
    }

    #[test]
    fn test_non_finite_scalars_rejected() {
        let mut a = gray(&[1, 2]);
        assert!(add_scalar(&mut a, f32::NAN).unwrap_err().is_invalid_parameter());
        assert!(mul_scalar(&mut a, f32::INFINITY).is_err());
        assert!(pow(&mut a, f32::NEG_INFINITY).is_err());
        assert_eq!(a.as_slice(), &[1, 2]);
    }
}
