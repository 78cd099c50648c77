//! JPEG format support.
//!
//! Reading and writing of baseline JPEG through `jpeg-decoder` and
//! `jpeg-encoder`.
//!
//! # Color handling
//!
//! | Stored as          | Decoded to           |
//! |--------------------|----------------------|
//! | 3-component color  | [`ColorSpace::Rgb`]  |
//! | grayscale          | [`ColorSpace::Gray`] |
//! | 16-bit grayscale   | [`ColorSpace::Gray`] (high byte) |
//! | CMYK               | [`ColorSpace::Rgb`]  |
//!
//! On write, RGB and Gray buffers are encoded as such; YCbCr buffers are
//! handed to the encoder as YCbCr so the stored samples are not transformed
//! a second time. A file written from YCbCr therefore decodes as RGB.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fourier_io::jpeg;
//!
//! let decoded = jpeg::read("photo.jpg")?;
//! jpeg::write("copy.jpg", &decoded.buffer, decoded.color_space, 100)?;
//! ```

use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use fourier_core::{ColorSpace, Error, PixelBuffer, Result, quantize};
use tracing::{debug, trace};

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 100;

/// A decoded JPEG image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// [`ColorSpace::Rgb`] or [`ColorSpace::Gray`].
    pub color_space: ColorSpace,
    /// Interleaved samples.
    pub buffer: PixelBuffer,
}

/// Validates a quality level and narrows it to `u8`.
///
/// # Errors
///
/// [`Error::InvalidParameter`] outside [0, 100].
pub fn check_quality(quality: i32) -> Result<u8> {
    u8::try_from(quality)
        .ok()
        .filter(|q| *q <= 100)
        .ok_or_else(|| {
            Error::invalid_parameter(format!(
                "JPEG quality must be in [0, 100], got {}",
                quality
            ))
        })
}

// ============================================================================
// JpegReader
// ============================================================================

/// JPEG decoder.
#[derive(Debug, Clone, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Decodes JPEG data from memory.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] for corrupt or truncated data.
    pub fn decode(&self, bytes: &[u8]) -> Result<Decoded> {
        self.decode_from(Cursor::new(bytes))
    }

    /// Reads and decodes a JPEG file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be opened, [`Error::Format`] if its
    /// content is not a valid JPEG.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Decoded> {
        let path = path.as_ref();
        trace!(path = %path.display(), "jpeg::read");
        let file = std::fs::File::open(path)?;
        self.decode_from(BufReader::new(file))
    }

    fn decode_from<R: Read>(&self, reader: R) -> Result<Decoded> {
        let mut decoder = jpeg_decoder::Decoder::new(reader);
        let pixels = decoder
            .decode()
            .map_err(|e| Error::format(format!("JPEG decode failed: {}", e)))?;
        let info = decoder
            .info()
            .ok_or_else(|| Error::format("missing JPEG info"))?;

        let width = info.width as u32;
        let height = info.height as u32;

        let (color_space, data) = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => (ColorSpace::Rgb, pixels),
            jpeg_decoder::PixelFormat::L8 => (ColorSpace::Gray, pixels),
            jpeg_decoder::PixelFormat::L16 => {
                // keep the high byte
                (ColorSpace::Gray, pixels.chunks_exact(2).map(|l16| l16[0]).collect())
            }
            jpeg_decoder::PixelFormat::CMYK32 => {
                let rgb = pixels
                    .chunks_exact(4)
                    .flat_map(|cmyk| {
                        let k = 1.0 - cmyk[3] as f32 / 255.0;
                        [
                            quantize((255.0 - cmyk[0] as f32) * k),
                            quantize((255.0 - cmyk[1] as f32) * k),
                            quantize((255.0 - cmyk[2] as f32) * k),
                        ]
                    })
                    .collect();
                (ColorSpace::Rgb, rgb)
            }
        };

        debug!(width, height, format = ?info.pixel_format, %color_space, "decoded JPEG");

        let buffer = PixelBuffer::from_vec(width, height, color_space.channels(), data)
            .map_err(|e| Error::format(format!("decoder returned inconsistent data: {}", e)))?;
        Ok(Decoded {
            width,
            height,
            color_space,
            buffer,
        })
    }
}

// ============================================================================
// JpegWriter
// ============================================================================

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegWriterOptions {
    /// Quality level 0-100. Default: 100.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// JPEG encoder.
#[derive(Debug, Clone, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Creates a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with the given options.
    pub fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }

    /// Encodes a buffer to JPEG bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if quality exceeds 100
    /// - [`Error::InvalidDimensions`] if a side exceeds 65535 or the buffer
    ///   channel count does not match `space`
    /// - [`Error::Format`] if the encoder fails
    pub fn encode(&self, buffer: &PixelBuffer, space: ColorSpace) -> Result<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let quality = check_quality(self.options.quality as i32)?;
        let (w, h) = buffer.dimensions();
        if buffer.channels() != space.channels() {
            return Err(Error::invalid_dimensions(
                w,
                h,
                format!(
                    "{} needs {} channels, buffer has {}",
                    space,
                    space.channels(),
                    buffer.channels()
                ),
            ));
        }
        let (Ok(w16), Ok(h16)) = (u16::try_from(w), u16::try_from(h)) else {
            return Err(Error::invalid_dimensions(w, h, "JPEG sides are limited to 65535"));
        };

        let color_type = match space {
            ColorSpace::Rgb => ColorType::Rgb,
            ColorSpace::YCbCr => ColorType::Ycbcr,
            ColorSpace::Gray => ColorType::Luma,
        };

        trace!(width = w, height = h, quality, %space, "jpeg::encode");

        let mut out = Vec::new();
        // jpeg-encoder expects 1-100
        let encoder = Encoder::new(&mut out, quality.max(1));
        encoder
            .encode(buffer.as_slice(), w16, h16, color_type)
            .map_err(|e: jpeg_encoder::EncodingError| {
                Error::format(format!("JPEG encode failed: {}", e))
            })?;

        debug!(bytes = out.len(), "encoded JPEG");
        Ok(out)
    }

    /// Encodes a buffer and writes it to `path`.
    ///
    /// The file is only created once encoding has succeeded.
    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        buffer: &PixelBuffer,
        space: ColorSpace,
    ) -> Result<()> {
        let bytes = self.encode(buffer, space)?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Decodes JPEG data from memory.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    JpegReader::new().decode(bytes)
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Decoded> {
    JpegReader::new().read(path)
}

/// Encodes a buffer at the given quality (0-100).
pub fn encode(buffer: &PixelBuffer, space: ColorSpace, quality: i32) -> Result<Vec<u8>> {
    let quality = check_quality(quality)?;
    JpegWriter::with_options(JpegWriterOptions { quality }).encode(buffer, space)
}

/// Writes a buffer as JPEG at the given quality (0-100).
pub fn write<P: AsRef<Path>>(
    path: P,
    buffer: &PixelBuffer,
    space: ColorSpace,
    quality: i32,
) -> Result<()> {
    let quality = check_quality(quality)?;
    JpegWriter::with_options(JpegWriterOptions { quality }).write(path, buffer, space)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgb(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push((x * 8) as u8);
                data.push((y * 8) as u8);
                data.push(128);
            }
        }
        PixelBuffer::from_vec(width, height, 3, data).unwrap()
    }

    #[test]
    fn test_memory_roundtrip() {
        let buf = gradient_rgb(32, 24);
        let bytes = encode(&buf, ColorSpace::Rgb, 100).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (32, 24));
        assert_eq!(decoded.color_space, ColorSpace::Rgb);
        assert_eq!(decoded.buffer.len(), buf.len());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        write(&path, &gradient_rgb(16, 16), ColorSpace::Rgb, 90).unwrap();
        let decoded = read(&path).unwrap();
        assert_eq!(decoded.buffer.dimensions(), (16, 16));
    }

    #[test]
    fn test_gray_roundtrip() {
        let buf = PixelBuffer::from_vec(8, 8, 1, vec![200; 64]).unwrap();
        let decoded = decode(&encode(&buf, ColorSpace::Gray, 100).unwrap()).unwrap();
        assert_eq!(decoded.color_space, ColorSpace::Gray);
        assert_eq!(decoded.buffer.channels(), 1);
        assert!(decoded.buffer.as_slice().iter().all(|&v| v.abs_diff(200) <= 2));
    }

    #[test]
    fn test_ycbcr_samples_are_stored_as_is() {
        // left half studio black, right half studio white, neutral chroma
        let mut data = Vec::with_capacity(16 * 8 * 3);
        for _ in 0..8 {
            for x in 0..16 {
                data.extend_from_slice(&[if x < 8 { 16 } else { 235 }, 128, 128]);
            }
        }
        let buf = PixelBuffer::from_vec(16, 8, 3, data).unwrap();
        let decoded = decode(&encode(&buf, ColorSpace::YCbCr, 100).unwrap()).unwrap();

        assert_eq!(decoded.color_space, ColorSpace::Rgb);
        assert_eq!(decoded.buffer.dimensions(), (16, 8));
        assert_eq!(decoded.buffer.channels(), 3);
        for c in 0..3 {
            assert!(decoded.buffer.get(1, 4, c).unwrap().abs_diff(16) <= 3);
            assert!(decoded.buffer.get(14, 4, c).unwrap().abs_diff(235) <= 3);
        }
    }

    #[test]
    fn test_quality_range() {
        let buf = gradient_rgb(8, 8);
        assert!(encode(&buf, ColorSpace::Rgb, 101).unwrap_err().is_invalid_parameter());
        assert!(encode(&buf, ColorSpace::Rgb, -1).unwrap_err().is_invalid_parameter());
        assert!(encode(&buf, ColorSpace::Rgb, 0).is_ok());
    }

    #[test]
    fn test_quality_affects_size() {
        let buf = gradient_rgb(64, 64);
        let low = encode(&buf, ColorSpace::Rgb, 20).unwrap();
        let high = encode(&buf, ColorSpace::Rgb, 100).unwrap();
        assert!(high.len() >= low.len());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read(dir.path().join("nope.jpg")).unwrap_err();
        assert!(err.is_io_error());
    }

    #[test]
    fn test_garbage_is_format_error() {
        let err = decode(b"definitely not a jpeg").unwrap_err();
        assert!(err.is_format_error());
        assert!(decode(&[]).unwrap_err().is_format_error());
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.jpg");
        let err = write(&path, &gradient_rgb(4, 4), ColorSpace::Rgb, 100).unwrap_err();
        assert!(err.is_io_error());
    }

    #[test]
    fn test_channel_mismatch() {
        let gray = PixelBuffer::new(4, 4, 1).unwrap();
        assert!(encode(&gray, ColorSpace::Rgb, 100).is_err());
    }
}
