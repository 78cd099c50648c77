//! # fourier-color
//!
//! Color space conversion between RGB, YCbCr and grayscale.
//!
//! | From  | To    | Transform                          |
//! |-------|-------|------------------------------------|
//! | RGB   | YCbCr | BT.601 forward matrix              |
//! | YCbCr | RGB   | BT.601 inverse matrix              |
//! | RGB   | Gray  | BT.601 luma                        |
//! | YCbCr | Gray  | keep Y                             |
//! | Gray  | *     | unsupported                        |
//!
//! # Quick Start
//!
//! ```rust
//! use fourier_color::convert;
//! use fourier_core::{ColorSpace, PixelBuffer};
//!
//! let rgb = PixelBuffer::from_vec(1, 1, 3, vec![255, 255, 255]).unwrap();
//! let gray = convert(&rgb, ColorSpace::Rgb, ColorSpace::Gray).unwrap();
//! assert_eq!(gray.as_slice(), &[235]);
//! ```

#![warn(missing_docs)]

pub mod convert;

pub use convert::{Bt601, convert, is_supported};
