//! Border handling for convolution.
//!
//! Kernels near the image edge reach outside the original bounds. The
//! [`BorderMode`] decides what those samples are:
//!
//! ```text
//! plane:   a b c d
//! Zero:  0 0 | a b c d | 0 0
//! Clamp: a a | a b c d | d d
//! ```

/// How samples outside the image bounds are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Outside samples are zero; energy is lost at the borders.
    #[default]
    Zero,
    /// Outside samples replicate the nearest edge sample.
    Clamp,
}

impl BorderMode {
    /// Reads `plane[(y, x)]` with out-of-range coordinates resolved by the mode.
    #[inline]
    pub fn sample(self, plane: &[f32], width: usize, height: usize, x: isize, y: isize) -> f32 {
        let inside = x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height;
        if inside {
            return plane[y as usize * width + x as usize];
        }
        match self {
            BorderMode::Zero => 0.0,
            BorderMode::Clamp => {
                let cx = x.clamp(0, width as isize - 1) as usize;
                let cy = y.clamp(0, height as isize - 1) as usize;
                plane[cy * width + cx]
            }
        }
    }
}

/// Pads a plane by `rx` columns and `ry` rows on each side with replicated edges.
///
/// Returns the extended plane and its dimensions.
pub fn extend_clamped(
    plane: &[f32],
    width: usize,
    height: usize,
    rx: usize,
    ry: usize,
) -> (Vec<f32>, usize, usize) {
    let ew = width + 2 * rx;
    let eh = height + 2 * ry;
    let mut out = Vec::with_capacity(ew * eh);
    for ey in 0..eh {
        let sy = ey.saturating_sub(ry).min(height - 1);
        let row = &plane[sy * width..(sy + 1) * width];
        out.extend(std::iter::repeat_n(row[0], rx));
        out.extend_from_slice(row);
        out.extend(std::iter::repeat_n(row[width - 1], rx));
    }
    (out, ew, eh)
}

/// Copies the `width x height` window at `(ox, oy)` out of a larger plane.
pub fn crop(
    plane: &[f32],
    stride: usize,
    ox: usize,
    oy: usize,
    width: usize,
    height: usize,
) -> Vec<f32> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let start = (oy + y) * stride + ox;
        out.extend_from_slice(&plane[start..start + width]);
    }
    out
}
