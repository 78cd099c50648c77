//! Canny edge detection.
//!
//! The detector runs a fixed sequence of stages over a single-channel plane:
//!
//! ```text
//! Grayscale -> Smoothing -> Gradient -> NonMaxSuppression -> Hysteresis
//! ```
//!
//! - **Smoothing**: Gaussian through the frequency domain with replicated
//!   borders, rounded to 8-bit samples
//! - **Gradient**: Sobel pair on interior pixels, direction quantized to
//!   0/45/90/135 degrees; the one-pixel frame gets zero magnitude
//! - **Non-maximum suppression**: keep a magnitude only if it is `>=` both
//!   neighbours along its direction
//! - **Hysteresis**: strong pixels seed an 8-connected flood fill through weak ones
//!
//! Grayscale conversion happens in the caller, which owns the color data.
//!
//! # Example
//!
//! ```rust
//! use fourier_ops::canny::{CannyParams, detect};
//!
//! let plane = vec![128.0f32; 16 * 16];
//! let edges = detect(&plane, 16, 16, &CannyParams::default()).unwrap();
//! assert!(edges.iter().all(|&v| v == 0));
//! ```

use std::fmt;

use fourier_core::{Error, Result, quantize};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::border::BorderMode;
use crate::fft::FftConvolver;
use crate::kernel::{SOBEL_X, SOBEL_Y, gaussian_2d};

pub use crate::params::CannyParams;

/// tan(22.5 deg), boundary between axis-aligned and diagonal directions.
const TAN_22_5: f32 = 0.414_213_57;

/// Edge sample value in the output map.
pub const EDGE: u8 = 255;

/// Pipeline stage, reported in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannyStage {
    /// Reduce color input to one intensity channel.
    Grayscale,
    /// Gaussian smoothing.
    Smoothing,
    /// Sobel gradient.
    Gradient,
    /// Non-maximum suppression.
    NonMaxSuppression,
    /// Double threshold and hysteresis.
    Hysteresis,
    /// Edge map complete.
    Done,
}

impl fmt::Display for CannyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CannyStage::Grayscale => "grayscale",
            CannyStage::Smoothing => "smoothing",
            CannyStage::Gradient => "gradient",
            CannyStage::NonMaxSuppression => "non-max suppression",
            CannyStage::Hysteresis => "hysteresis",
            CannyStage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Gradient direction quantized to four orientations.
///
/// Image coordinates: +x right, +y down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// 0 deg: compare left and right.
    #[default]
    Horizontal,
    /// 45 deg: compare up-left and down-right.
    Diagonal45,
    /// 90 deg: compare up and down.
    Vertical,
    /// 135 deg: compare up-right and down-left.
    Diagonal135,
}

impl Direction {
    /// Quantizes a gradient vector.
    #[inline]
    pub fn quantize(gx: f32, gy: f32) -> Self {
        let ax = gx.abs();
        let ay = gy.abs();
        if ay <= ax * TAN_22_5 {
            Direction::Horizontal
        } else if ax <= ay * TAN_22_5 {
            Direction::Vertical
        } else if (gx > 0.0) == (gy > 0.0) {
            Direction::Diagonal45
        } else {
            Direction::Diagonal135
        }
    }

    /// Orientation in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Direction::Horizontal => 0,
            Direction::Diagonal45 => 45,
            Direction::Vertical => 90,
            Direction::Diagonal135 => 135,
        }
    }

    /// `(dx, dy)` of the first neighbour; the second is its mirror.
    #[inline]
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Diagonal45 => (1, 1),
            Direction::Vertical => (0, 1),
            Direction::Diagonal135 => (-1, 1),
        }
    }
}

/// Per-pixel class after double thresholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeClass {
    /// Below the lower threshold.
    #[default]
    None,
    /// Between the thresholds; kept only if connected to a strong pixel.
    Weak,
    /// At or above the upper threshold.
    Strong,
}

/// Gradient magnitude and quantized direction of a plane.
#[derive(Debug, Clone)]
pub struct Gradient {
    /// Magnitude `sqrt(gx^2 + gy^2)`, zero on the border frame.
    pub magnitude: Vec<f32>,
    /// Quantized direction per pixel.
    pub direction: Vec<Direction>,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

/// Gaussian smoothing stage.
///
/// Replicated borders keep flat regions flat up to the image edge. The
/// result is rounded to 8-bit precision.
pub fn smooth(
    plane: &[f32],
    width: usize,
    height: usize,
    std_dev: f32,
    size_f: i32,
) -> Result<Vec<f32>> {
    let kernel = gaussian_2d(std_dev, size_f)?;
    let blurred = FftConvolver::new(width, height, &kernel, BorderMode::Clamp)?.apply(plane)?;
    Ok(blurred.into_iter().map(|v| quantize(v) as f32).collect())
}

/// Sobel gradient stage.
pub fn gradient(plane: &[f32], width: usize, height: usize) -> Gradient {
    let mut magnitude = vec![0.0f32; width * height];
    let mut direction = vec![Direction::default(); width * height];

    if width >= 3 && height >= 3 {
        let fill_row = |(y, (mag_row, dir_row)): (usize, (&mut [f32], &mut [Direction]))| {
            if y == 0 || y == height - 1 {
                return;
            }
            for x in 1..width - 1 {
                let mut gx = 0.0f32;
                let mut gy = 0.0f32;
                for ky in 0..3 {
                    let row = &plane[(y + ky - 1) * width..];
                    for kx in 0..3 {
                        let v = row[x + kx - 1];
                        gx += SOBEL_X[ky * 3 + kx] * v;
                        gy += SOBEL_Y[ky * 3 + kx] * v;
                    }
                }
                mag_row[x] = (gx * gx + gy * gy).sqrt();
                dir_row[x] = Direction::quantize(gx, gy);
            }
        };

        #[cfg(feature = "parallel")]
        magnitude
            .par_chunks_mut(width)
            .zip(direction.par_chunks_mut(width))
            .enumerate()
            .for_each(fill_row);
        #[cfg(not(feature = "parallel"))]
        magnitude
            .chunks_mut(width)
            .zip(direction.chunks_mut(width))
            .enumerate()
            .for_each(fill_row);
    }

    Gradient {
        magnitude,
        direction,
        width,
        height,
    }
}

/// Non-maximum suppression stage.
///
/// Thins ridges: a magnitude survives only if it is `>=` both neighbours
/// along its quantized direction.
pub fn suppress(grad: &Gradient) -> Vec<f32> {
    let (w, h) = (grad.width, grad.height);
    let mut out = vec![0.0f32; w * h];
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            let m = grad.magnitude[i];
            if m == 0.0 {
                continue;
            }
            let (dx, dy) = grad.direction[i].step();
            let a = grad.magnitude[((y as isize + dy) as usize) * w + (x as isize + dx) as usize];
            let b = grad.magnitude[((y as isize - dy) as usize) * w + (x as isize - dx) as usize];
            if m >= a && m >= b {
                out[i] = m;
            }
        }
    }
    out
}

/// Double threshold.
///
/// Zero magnitudes are never edges, whatever the thresholds.
pub fn classify(magnitude: &[f32], upper: f32, lower: f32) -> Vec<EdgeClass> {
    magnitude
        .iter()
        .map(|&m| {
            if m <= 0.0 {
                EdgeClass::None
            } else if m >= upper {
                EdgeClass::Strong
            } else if m >= lower {
                EdgeClass::Weak
            } else {
                EdgeClass::None
            }
        })
        .collect()
}

/// Hysteresis: strong pixels and weak pixels 8-connected to them become [`EDGE`].
pub fn hysteresis(classes: &[EdgeClass], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    let mut stack: Vec<usize> = classes
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == EdgeClass::Strong)
        .map(|(i, _)| i)
        .collect();
    for &i in &stack {
        out[i] = EDGE;
    }

    while let Some(i) = stack.pop() {
        let (x, y) = ((i % width) as isize, (i / width) as isize);
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if out[n] == 0 && classes[n] == EdgeClass::Weak {
                    out[n] = EDGE;
                    stack.push(n);
                }
            }
        }
    }
    out
}

/// Runs smoothing, gradient, suppression and hysteresis on a grayscale plane.
///
/// Returns a `width x height` map with samples in {0, 255}.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `params` fails [`CannyParams::validate`];
/// [`Error::InvalidDimensions`] if the plane length is not `width * height`.
pub fn detect(plane: &[f32], width: usize, height: usize, params: &CannyParams) -> Result<Vec<u8>> {
    params.validate()?;
    if plane.len() != width * height {
        return Err(Error::invalid_dimensions(
            width as u32,
            height as u32,
            format!("expected {} values, got {}", width * height, plane.len()),
        ));
    }
    trace!(width, height, ?params, "canny::detect");
    if plane.is_empty() {
        return Ok(Vec::new());
    }

    debug!(stage = %CannyStage::Smoothing, std_dev = params.std_dev, size_f = params.size_f);
    let smoothed = smooth(plane, width, height, params.std_dev, params.size_f)?;

    debug!(stage = %CannyStage::Gradient);
    let grad = gradient(&smoothed, width, height);

    debug!(stage = %CannyStage::NonMaxSuppression);
    let thin = suppress(&grad);

    debug!(
        stage = %CannyStage::Hysteresis,
        upper = params.upper_threshold,
        lower = params.lower_threshold
    );
    let classes = classify(&thin, params.upper_threshold, params.lower_threshold);
    let edges = hysteresis(&classes, width, height);

    debug!(
        stage = %CannyStage::Done,
        edges = edges.iter().filter(|&&v| v == EDGE).count()
    );
    Ok(edges)
}
