//! Interleaved 8-bit sample storage.
//!
//! [`PixelBuffer`] owns the raw samples of an image. Pixels are stored in
//! **row-major** order, top-to-bottom, with channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Sample `(x, y, c)` lives at index `(y * width + x) * channels + c`.
//!
//! The numeric core works on planar `f32` data; [`PixelBuffer::channel_plane`]
//! and [`PixelBuffer::store_plane`] move one channel between the two layouts.

use crate::{ColorSpace, Error, Result, quantize};

/// Owned interleaved 8-bit pixel storage.
///
/// Invariant: `data.len() == width * height * channels`, with `channels`
/// either 1 or 3.
///
/// `PixelBuffer` implements `Clone` as a deep copy of the samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: usize,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `channels` is not 1 or 3.
    pub fn new(width: u32, height: u32, channels: usize) -> Result<Self> {
        check_channels(width, height, channels)?;
        Ok(Self {
            data: vec![0; width as usize * height as usize * channels],
            width,
            height,
            channels,
        })
    }

    /// Creates a zero-filled buffer with the channel count of `space`.
    ///
    /// ```rust
    /// use fourier_core::{ColorSpace, PixelBuffer};
    ///
    /// let buf = PixelBuffer::for_space(4, 2, ColorSpace::Rgb);
    /// assert_eq!(buf.len(), 4 * 2 * 3);
    /// ```
    pub fn for_space(width: u32, height: u32, space: ColorSpace) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * space.channels()],
            width,
            height,
            channels: space.channels(),
        }
    }

    /// Wraps existing interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length does not equal
    /// `width * height * channels` or the channel count is not 1 or 3.
    pub fn from_vec(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        check_channels(width, height, channels)?;
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns the raw samples.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Interleaved samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * self.channels;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    #[inline]
    fn index(&self, x: u32, y: u32, channel: usize) -> Result<usize> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return Err(Error::OutOfBounds {
                x,
                y,
                channel,
                width: self.width,
                height: self.height,
                channels: self.channels,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * self.channels + channel)
    }

    /// Reads sample `(x, y, channel)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for coordinates outside the buffer.
    #[inline]
    pub fn get(&self, x: u32, y: u32, channel: usize) -> Result<u8> {
        let i = self.index(x, y, channel)?;
        Ok(self.data[i])
    }

    /// Writes sample `(x, y, channel)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for coordinates outside the buffer.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, channel: usize, value: u8) -> Result<()> {
        let i = self.index(x, y, channel)?;
        self.data[i] = value;
        Ok(())
    }

    /// Fills every pixel with the given per-channel values.
    ///
    /// Extra values are ignored, missing ones leave their channel untouched.
    pub fn fill(&mut self, values: &[u8]) {
        let n = values.len().min(self.channels);
        for px in self.data.chunks_exact_mut(self.channels) {
            px[..n].copy_from_slice(&values[..n]);
        }
    }

    /// Extracts one channel as a planar `f32` array of `width * height` values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `channel >= channels`.
    pub fn channel_plane(&self, channel: usize) -> Result<Vec<f32>> {
        self.check_channel(channel)?;
        Ok(self
            .data
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .map(|&v| v as f32)
            .collect())
    }

    /// Writes a planar `f32` array back into one channel.
    ///
    /// Values are rounded to nearest and clamped to [0, 255].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `channel >= channels`, or
    /// [`Error::InvalidDimensions`] if the plane length is not `width * height`.
    pub fn store_plane(&mut self, channel: usize, plane: &[f32]) -> Result<()> {
        self.check_channel(channel)?;
        if plane.len() != self.pixel_count() {
            return Err(Error::invalid_dimensions(
                self.width,
                self.height,
                format!("plane has {} values, expected {}", plane.len(), self.pixel_count()),
            ));
        }
        let channels = self.channels;
        for (dst, &v) in self.data.iter_mut().skip(channel).step_by(channels).zip(plane) {
            *dst = quantize(v);
        }
        Ok(())
    }

    fn check_channel(&self, channel: usize) -> Result<()> {
        if channel >= self.channels {
            return Err(Error::invalid_parameter(format!(
                "channel {} out of range for {}-channel buffer",
                channel, self.channels
            )));
        }
        Ok(())
    }
}

fn check_channels(width: u32, height: u32, channels: usize) -> Result<()> {
    if channels != 1 && channels != 3 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            format!("unsupported channel count {}", channels),
        ));
    }
    Ok(())
}
