//! Color space definitions.
//!
//! The engine works with exactly three color spaces:
//!
//! - [`ColorSpace::Rgb`] - red, green, blue (3 channels)
//! - [`ColorSpace::YCbCr`] - BT.601 luma plus blue/red chroma (3 channels)
//! - [`ColorSpace::Gray`] - single intensity channel
//!
//! The channel count of a [`PixelBuffer`](crate::PixelBuffer) is derived from
//! its color space and nothing else.
//!
//! # Usage
//!
//! ```
//! use fourier_core::ColorSpace;
//!
//! assert_eq!(ColorSpace::Rgb.channels(), 3);
//! assert_eq!(ColorSpace::Gray.channels(), 1);
//! assert_eq!(ColorSpace::YCbCr.channel_names(), &["Y", "Cb", "Cr"]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Color space of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Luma, blue-difference chroma, red-difference chroma.
    YCbCr,
    /// Single intensity channel.
    Gray,
}

impl ColorSpace {
    /// All supported color spaces.
    pub const ALL: [ColorSpace; 3] = [ColorSpace::Rgb, ColorSpace::YCbCr, ColorSpace::Gray];

    /// Number of interleaved channels for this color space.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            ColorSpace::Rgb | ColorSpace::YCbCr => 3,
            ColorSpace::Gray => 1,
        }
    }

    /// Channel names in storage order.
    pub const fn channel_names(self) -> &'static [&'static str] {
        match self {
            ColorSpace::Rgb => &["R", "G", "B"],
            ColorSpace::YCbCr => &["Y", "Cb", "Cr"],
            ColorSpace::Gray => &["Y"],
        }
    }

    /// Canonical display name.
    pub const fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::YCbCr => "YCbCr",
            ColorSpace::Gray => "Gray",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "ycbcr" | "ycc" => Ok(ColorSpace::YCbCr),
            "gray" | "grey" | "grayscale" => Ok(ColorSpace::Gray),
            other => Err(Error::invalid_parameter(format!(
                "unknown color space '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_counts() {
        assert_eq!(ColorSpace::Rgb.channels(), 3);
        assert_eq!(ColorSpace::YCbCr.channels(), 3);
        assert_eq!(ColorSpace::Gray.channels(), 1);
        for cs in ColorSpace::ALL {
            assert_eq!(cs.channel_names().len(), cs.channels());
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("RGB".parse::<ColorSpace>().unwrap(), ColorSpace::Rgb);
        assert_eq!("ycbcr".parse::<ColorSpace>().unwrap(), ColorSpace::YCbCr);
        assert_eq!("Grey".parse::<ColorSpace>().unwrap(), ColorSpace::Gray);
        assert!("cmyk".parse::<ColorSpace>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ColorSpace::YCbCr.to_string(), "YCbCr");
    }
}
