//! Synthetic images shared by the integration tests and benches.

use fourier::{ColorSpace, Image, PixelBuffer};

/// 5x5 gray image, black except for a 255 column at x = 2.
///
/// Canny with default parameters marks exactly x = 1 and x = 3 for rows 1..=3.
pub fn bright_column() -> Image {
    let mut data = vec![0u8; 25];
    for y in 0..5 {
        data[y * 5 + 2] = 255;
    }
    gray(5, 5, data)
}

/// Gray image from raw samples.
pub fn gray(width: u32, height: u32, data: Vec<u8>) -> Image {
    let buffer = PixelBuffer::from_vec(width, height, 1, data).expect("fixture geometry");
    Image::from_buffer(buffer, ColorSpace::Gray).expect("fixture color space")
}

/// RGB image where every sample equals `value`.
pub fn uniform_rgb(width: u32, height: u32, value: u8) -> Image {
    let data = vec![value; (width * height * 3) as usize];
    let buffer = PixelBuffer::from_vec(width, height, 3, data).expect("fixture geometry");
    Image::from_buffer(buffer, ColorSpace::Rgb).expect("fixture color space")
}

/// Smooth RGB gradient with a little per-channel variation.
///
/// Low-frequency content survives JPEG well, so round trips stay close.
pub fn gradient_rgb(width: u32, height: u32) -> Image {
    assert!(width > 1 && height > 1);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = x * 255 / (width - 1);
            let g = y * 255 / (height - 1);
            let b = (x + y) * 255 / (width + height - 2);
            data.extend_from_slice(&[r as u8, g as u8, b as u8]);
        }
    }
    let buffer = PixelBuffer::from_vec(width, height, 3, data).expect("fixture geometry");
    Image::from_buffer(buffer, ColorSpace::Rgb).expect("fixture color space")
}

/// Deterministic pseudo-random gray plane (xorshift).
pub fn noise_gray(width: u32, height: u32, seed: u32) -> Image {
    let mut state = seed.max(1);
    let data = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    gray(width, height, data)
}
