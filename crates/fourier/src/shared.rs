//! Reference-counted image handle.
//!
//! [`SharedImage`] wraps an [`Image`] in `Arc<RwLock<_>>`. Cloning the
//! handle aliases the same image: a mutation through one clone is visible
//! through every other. [`SharedImage::deep_copy`] is the explicit way to get
//! an independent image.
//!
//! Mutating operations take the write lock for their whole duration, so
//! concurrent calls through aliases are serialized. A lock poisoned by a
//! panicking writer surfaces as [`Error::LockPoisoned`].
//!
//! ```rust
//! use fourier::{ColorSpace, Image, SharedImage};
//!
//! let a = SharedImage::new(Image::new(4, 4, ColorSpace::Rgb));
//! let b = a.clone();
//! b.to_gray().unwrap();
//! assert_eq!(a.color_space().unwrap(), ColorSpace::Gray);
//!
//! let c = a.deep_copy().unwrap();
//! assert!(!c.ptr_eq(&a));
//! ```

use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fourier_core::{ColorSpace, Error, Result};
use fourier_ops::{CannyParams, Kernel};

use crate::Image;

/// Shared, aliasable handle to an [`Image`].
#[derive(Clone)]
pub struct SharedImage {
    inner: Arc<RwLock<Image>>,
}

impl SharedImage {
    /// Wraps an image in a new handle.
    pub fn new(image: Image) -> Self {
        Self {
            inner: Arc::new(RwLock::new(image)),
        }
    }

    /// Acquires shared read access.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Image>> {
        self.inner.read().map_err(|_| Error::LockPoisoned)
    }

    /// Acquires exclusive write access.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Image>> {
        self.inner.write().map_err(|_| Error::LockPoisoned)
    }

    /// Runs `f` with read access.
    pub fn with<T>(&self, f: impl FnOnce(&Image) -> T) -> Result<T> {
        Ok(f(&*self.read()?))
    }

    /// Runs `f` with exclusive write access.
    pub fn with_mut<T>(&self, f: impl FnOnce(&mut Image) -> Result<T>) -> Result<T> {
        f(&mut *self.write()?)
    }

    /// Returns a new handle to an independent copy of the image.
    pub fn deep_copy(&self) -> Result<Self> {
        self.with(|img| Self::new(img.copy()))
    }

    /// Returns `true` if both handles alias the same image.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of handles aliasing this image.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Returns the image if this is the last handle, otherwise gives the handle back.
    pub fn try_into_inner(self) -> std::result::Result<Image, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => lock.into_inner().map_err(|e| Self::new(e.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> Result<u32> {
        self.with(Image::width)
    }

    /// Height in pixels.
    pub fn height(&self) -> Result<u32> {
        self.with(Image::height)
    }

    /// Channels per pixel.
    pub fn channels(&self) -> Result<usize> {
        self.with(Image::channels)
    }

    /// Current color space.
    pub fn color_space(&self) -> Result<ColorSpace> {
        self.with(Image::color_space)
    }

    /// See [`Image::to_ycbcr`].
    pub fn to_ycbcr(&self) -> Result<()> {
        self.with_mut(Image::to_ycbcr)
    }

    /// See [`Image::to_rgb`].
    pub fn to_rgb(&self) -> Result<()> {
        self.with_mut(Image::to_rgb)
    }

    /// See [`Image::to_gray`].
    pub fn to_gray(&self) -> Result<()> {
        self.with_mut(Image::to_gray)
    }

    /// See [`Image::gaussian_blur`].
    pub fn gaussian_blur(&self, std_dev: f32, size_f: i32) -> Result<()> {
        self.with_mut(|img| img.gaussian_blur(std_dev, size_f))
    }

    /// See [`Image::gaussian_blur_naive`].
    pub fn gaussian_blur_naive(&self, std_dev: f32, size_f: i32) -> Result<()> {
        self.with_mut(|img| img.gaussian_blur_naive(std_dev, size_f))
    }

    /// See [`Image::box_blur`].
    pub fn box_blur(&self, size_f: i32) -> Result<()> {
        self.with_mut(|img| img.box_blur(size_f))
    }

    /// See [`Image::convolve`].
    pub fn convolve(&self, kernel: &Kernel) -> Result<()> {
        self.with_mut(|img| img.convolve(kernel))
    }

    /// See [`Image::canny_edge_detect`].
    pub fn canny_edge_detect(&self, params: &CannyParams) -> Result<()> {
        self.with_mut(|img| img.canny_edge_detect(params))
    }

    /// See [`Image::add`].
    ///
    /// `other` is snapshotted before the write lock is taken, so it may be a
    /// clone of this handle.
    pub fn add(&self, other: &SharedImage) -> Result<()> {
        let rhs = other.with(Image::copy)?;
        self.with_mut(|img| img.add(&rhs))
    }

    /// See [`Image::mul`]. `other` may alias this handle.
    pub fn mul(&self, other: &SharedImage) -> Result<()> {
        let rhs = other.with(Image::copy)?;
        self.with_mut(|img| img.mul(&rhs))
    }

    /// See [`Image::add_scalar`].
    pub fn add_scalar(&self, value: f32) -> Result<()> {
        self.with_mut(|img| img.add_scalar(value))
    }

    /// See [`Image::mul_scalar`].
    pub fn mul_scalar(&self, factor: f32) -> Result<()> {
        self.with_mut(|img| img.mul_scalar(factor))
    }

    /// See [`Image::pow`].
    pub fn pow(&self, exponent: f32) -> Result<()> {
        self.with_mut(|img| img.pow(exponent))
    }

    /// See [`Image::sqrt`].
    pub fn sqrt(&self) -> Result<()> {
        self.with_mut(|img| {
            img.sqrt();
            Ok(())
        })
    }

    /// See [`Image::encode_jpeg`].
    pub fn encode_jpeg(&self, quality: i32) -> Result<Vec<u8>> {
        self.read()?.encode_jpeg(quality)
    }

    /// See [`Image::write_jpeg`].
    pub fn write_jpeg<P: AsRef<Path>>(&self, path: P, quality: i32) -> Result<()> {
        self.read()?.write_jpeg(path, quality)
    }

    /// See [`Image::dump`].
    pub fn dump(&self) -> Result<String> {
        self.with(Image::dump)
    }
}

impl From<Image> for SharedImage {
    fn from(image: Image) -> Self {
        Self::new(image)
    }
}

impl fmt::Debug for SharedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedImage")
            .field("handles", &self.handle_count())
            .field("image", &self.inner.read().ok().map(|img| img.to_string()))
            .finish()
    }
}

impl fmt::Display for SharedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.read() {
            Ok(img) => fmt::Display::fmt(&*img, f),
            Err(_) => f.write_str("Image { <poisoned> }"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clone_aliases() {
        let a = SharedImage::new(Image::new(6, 6, ColorSpace::Rgb));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.handle_count(), 2);

        b.with_mut(|img| img.set_sample(1, 1, 0, 99)).unwrap();
        assert_eq!(a.with(|img| img.sample(1, 1, 0)).unwrap().unwrap(), 99);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let a = SharedImage::new(Image::new(6, 6, ColorSpace::Rgb));
        let c = a.deep_copy().unwrap();
        assert!(!a.ptr_eq(&c));
        c.to_gray().unwrap();
        assert_eq!(a.color_space().unwrap(), ColorSpace::Rgb);
        assert_eq!(c.color_space().unwrap(), ColorSpace::Gray);
    }

    #[test]
    fn test_concurrent_mutation_is_serialized() {
        let shared = SharedImage::new(Image::new(16, 16, ColorSpace::Gray));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let s = shared.clone();
                thread::spawn(move || {
                    s.with_mut(|img| {
                        let v = img.sample(0, 0, 0)?;
                        img.set_sample(0, 0, 0, v + 1)?;
                        img.gaussian_blur(1.0, i)
                    })
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }
        assert_eq!(shared.handle_count(), 1);
    }

    #[test]
    fn test_arithmetic_with_aliased_operand() {
        let mut img = Image::new(3, 3, ColorSpace::Gray);
        img.add_scalar(7.0).unwrap();
        let a = SharedImage::new(img);
        let b = a.clone();
        a.add(&b).unwrap();
        a.mul(&b).unwrap();
        assert_eq!(a.with(|img| img.sample(2, 2, 0)).unwrap().unwrap(), 196);

        b.sqrt().unwrap();
        b.pow(2.0).unwrap();
        assert_eq!(a.with(|img| img.sample(0, 0, 0)).unwrap().unwrap(), 196);

        let other = SharedImage::new(Image::new(3, 3, ColorSpace::Rgb));
        assert!(a.mul(&other).unwrap_err().is_invalid_parameter());
        assert!(a.mul_scalar(f32::NAN).is_err());
    }

    #[test]
    fn test_try_into_inner() {
        let a = SharedImage::new(Image::new(2, 2, ColorSpace::Gray));
        let b = a.clone();
        let a = a.try_into_inner().unwrap_err();
        drop(b);
        let img = a.try_into_inner().unwrap();
        assert_eq!(img.width(), 2);
    }

    #[test]
    fn test_display_matches_image() {
        let img = Image::new(3, 3, ColorSpace::YCbCr);
        let text = img.to_string();
        assert_eq!(SharedImage::from(img).to_string(), text);
    }
}
