//! The [`Image`] type: one pixel buffer plus its color space.
//!
//! Every operation mutates the image in place and validates its arguments
//! first, so a rejected call leaves the samples byte-for-byte unchanged.
//!
//! # Duplication
//!
//! `Image` is not `Clone`. Duplicating one is always explicit:
//!
//! - [`Image::copy`] allocates an independent deep copy
//! - [`SharedImage`](crate::SharedImage) is a reference-counted handle whose
//!   clones alias the same image
//!
//! # Example
//!
//! ```rust
//! use fourier::{ColorSpace, Image};
//!
//! let mut img = Image::new(8, 8, ColorSpace::Rgb);
//! img.to_ycbcr().unwrap();
//! img.gaussian_blur(1.4, 2).unwrap();
//! assert_eq!(img.color_space(), ColorSpace::YCbCr);
//! ```

use std::fmt;
use std::path::Path;

use fourier_core::{ColorSpace, Error, PixelBuffer, Result};
use fourier_io::jpeg;
use fourier_ops::canny::{self, CannyParams};
use fourier_ops::{BorderMode, Kernel, arith, fft, filter};
use tracing::{debug, trace};

/// An 8-bit raster image.
#[derive(Debug, PartialEq, Eq)]
pub struct Image {
    buffer: PixelBuffer,
    color_space: ColorSpace,
}

impl Image {
    /// Creates a black image.
    pub fn new(width: u32, height: u32, color_space: ColorSpace) -> Self {
        Self {
            buffer: PixelBuffer::for_space(width, height, color_space),
            color_space,
        }
    }

    /// Wraps an existing buffer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if the buffer channel count does not
    /// match `color_space`.
    pub fn from_buffer(buffer: PixelBuffer, color_space: ColorSpace) -> Result<Self> {
        if buffer.channels() != color_space.channels() {
            return Err(Error::invalid_dimensions(
                buffer.width(),
                buffer.height(),
                format!(
                    "{} needs {} channels, buffer has {}",
                    color_space,
                    color_space.channels(),
                    buffer.channels()
                ),
            ));
        }
        Ok(Self { buffer, color_space })
    }

    /// Decodes a JPEG held in memory.
    pub fn from_jpeg_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = jpeg::decode(bytes)?;
        Self::from_buffer(decoded.buffer, decoded.color_space)
    }

    /// Reads a JPEG file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file is missing or unreadable, [`Error::Format`]
    /// if it is not a valid JPEG.
    pub fn read_jpeg<P: AsRef<Path>>(path: P) -> Result<Self> {
        let decoded = jpeg::read(path)?;
        Self::from_buffer(decoded.buffer, decoded.color_space)
    }

    /// Returns an independent deep copy.
    pub fn copy(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            color_space: self.color_space,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Interleaved channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.buffer.channels()
    }

    /// Current color space.
    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// The underlying samples.
    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Mutable raw samples. The geometry cannot change through this slice.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    /// Reads sample `(x, y, channel)`.
    pub fn sample(&self, x: u32, y: u32, channel: usize) -> Result<u8> {
        self.buffer.get(x, y, channel)
    }

    /// Writes sample `(x, y, channel)`.
    pub fn set_sample(&mut self, x: u32, y: u32, channel: usize, value: u8) -> Result<()> {
        self.buffer.set(x, y, channel, value)
    }

    /// Consumes the image and returns its buffer.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    // ------------------------------------------------------------------------
    // Color
    // ------------------------------------------------------------------------

    /// Converts to `target` in place. Converting to the current space is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedConversion`] when expanding grayscale to color.
    pub fn convert_to(&mut self, target: ColorSpace) -> Result<()> {
        if target == self.color_space {
            return Ok(());
        }
        let converted = fourier_color::convert(&self.buffer, self.color_space, target)?;
        debug!(from = %self.color_space, to = %target, "converted color space");
        self.buffer = converted;
        self.color_space = target;
        Ok(())
    }

    /// RGB to YCbCr (BT.601).
    pub fn to_ycbcr(&mut self) -> Result<()> {
        self.convert_to(ColorSpace::YCbCr)
    }

    /// YCbCr to RGB (BT.601).
    pub fn to_rgb(&mut self) -> Result<()> {
        self.convert_to(ColorSpace::Rgb)
    }

    /// Reduces to a single luma channel.
    pub fn to_gray(&mut self) -> Result<()> {
        self.convert_to(ColorSpace::Gray)
    }

    // ------------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------------

    /// Gaussian blur through the frequency domain, zero-padded at the borders.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] for `std_dev <= 0` or `size_f < 0`.
    pub fn gaussian_blur(&mut self, std_dev: f32, size_f: i32) -> Result<()> {
        trace!(std_dev, size_f, "Image::gaussian_blur");
        fft::blur(&mut self.buffer, std_dev, size_f, BorderMode::Zero)
    }

    /// Gaussian blur by direct spatial convolution.
    ///
    /// Matches [`gaussian_blur`](Self::gaussian_blur) within one sample value.
    pub fn gaussian_blur_naive(&mut self, std_dev: f32, size_f: i32) -> Result<()> {
        trace!(std_dev, size_f, "Image::gaussian_blur_naive");
        filter::gaussian_blur_naive(&mut self.buffer, std_dev, size_f, BorderMode::Zero)
    }

    /// Uniform blur over a `(2 * size_f + 1)^2` window.
    pub fn box_blur(&mut self, size_f: i32) -> Result<()> {
        trace!(size_f, "Image::box_blur");
        filter::box_blur(&mut self.buffer, size_f, BorderMode::Zero)
    }

    /// Convolves every channel with an arbitrary odd-sized kernel.
    pub fn convolve(&mut self, kernel: &Kernel) -> Result<()> {
        trace!(kw = kernel.width, kh = kernel.height, "Image::convolve");
        let kernel = Kernel::new(kernel.data.clone(), kernel.width, kernel.height)?;
        filter::convolve_buffer_direct(&mut self.buffer, &kernel, BorderMode::Zero)
    }

    /// Replaces the image with its Canny edge map.
    ///
    /// Color images are reduced to luma first. Afterwards the image is
    /// [`ColorSpace::Gray`] with samples in {0, 255}.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `params` fails validation.
    pub fn canny_edge_detect(&mut self, params: &CannyParams) -> Result<()> {
        params.validate()?;
        trace!(?params, "Image::canny_edge_detect");

        let gray;
        let source = if self.color_space == ColorSpace::Gray {
            &self.buffer
        } else {
            debug!(stage = %canny::CannyStage::Grayscale, from = %self.color_space);
            gray = fourier_color::convert(&self.buffer, self.color_space, ColorSpace::Gray)?;
            &gray
        };

        let (w, h) = source.dimensions();
        let plane = source.channel_plane(0)?;
        let edges = canny::detect(&plane, w as usize, h as usize, params)?;

        self.buffer = PixelBuffer::from_vec(w, h, 1, edges)?;
        self.color_space = ColorSpace::Gray;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------------

    fn check_operand(&self, other: &Image) -> Result<()> {
        if self.color_space != other.color_space {
            return Err(Error::invalid_parameter(format!(
                "color spaces differ: {} vs {}",
                self.color_space, other.color_space
            )));
        }
        Ok(())
    }

    /// Adds `other` sample by sample, saturating at 255.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if the color space, width or height
    /// differs. The image is untouched in that case.
    pub fn add(&mut self, other: &Image) -> Result<()> {
        self.check_operand(other)?;
        arith::add(&mut self.buffer, &other.buffer)
    }

    /// Multiplies by `other` sample by sample, saturating at 255.
    ///
    /// Same errors as [`add`](Self::add).
    pub fn mul(&mut self, other: &Image) -> Result<()> {
        self.check_operand(other)?;
        arith::mul(&mut self.buffer, &other.buffer)
    }

    /// Adds `value` to every sample. Rejects NaN and infinities.
    pub fn add_scalar(&mut self, value: f32) -> Result<()> {
        arith::add_scalar(&mut self.buffer, value)
    }

    /// Scales every sample by `factor`. Rejects NaN and infinities.
    pub fn mul_scalar(&mut self, factor: f32) -> Result<()> {
        arith::mul_scalar(&mut self.buffer, factor)
    }

    /// Raises every sample to `exponent`. Rejects NaN and infinities.
    pub fn pow(&mut self, exponent: f32) -> Result<()> {
        arith::pow(&mut self.buffer, exponent)
    }

    /// Replaces every sample by its square root.
    pub fn sqrt(&mut self) {
        arith::sqrt(&mut self.buffer)
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Encodes the image as JPEG at `quality` (0-100).
    pub fn encode_jpeg(&self, quality: i32) -> Result<Vec<u8>> {
        jpeg::encode(&self.buffer, self.color_space, quality)
    }

    /// Writes the image as a JPEG file at `quality` (0-100).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] for a quality outside [0, 100],
    /// [`Error::Io`] if the destination cannot be written.
    pub fn write_jpeg<P: AsRef<Path>>(&self, path: P, quality: i32) -> Result<()> {
        jpeg::write(path, &self.buffer, self.color_space, quality)
    }

    /// Renders every sample as text.
    pub fn dump(&self) -> String {
        fourier_io::dump(&self.buffer, self.color_space)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Image {{ Width: {}, Height: {}, Channels: {}, Color space: {} }}",
            self.width(),
            self.height(),
            self.channels(),
            self.color_space
        )
    }
}
