//! Plain-text dump of raw samples.
//!
//! ```text
//! Color space: RGB
//! Channel: R
//! [0, 12, 255, ]
//! [3, 4, 5, ]
//! ---
//! Channel: G
//! ...
//! ```
//!
//! Every channel lists its rows top to bottom, each value followed by `", "`,
//! and ends with a `---` line.

use fourier_core::{ColorSpace, PixelBuffer};

/// Renders every sample of `buffer` as text.
///
/// Channel names come from `space`; a buffer whose channel count differs
/// from the space falls back to numbered channels.
pub fn dump(buffer: &PixelBuffer, space: ColorSpace) -> String {
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let channels = buffer.channels();
    let names = space.channel_names();
    // ~5 bytes per sample
    let mut out = String::with_capacity(32 + channels * (16 + h * (3 + w * 5)));

    out.push_str(&format!("Color space: {}\n", space));
    for c in 0..channels {
        match names.get(c).filter(|_| names.len() == channels) {
            Some(name) => out.push_str(&format!("Channel: {}\n", name)),
            None => out.push_str(&format!("Channel: {}\n", c)),
        }
        for y in 0..h {
            out.push('[');
            for v in buffer.row(y as u32).iter().skip(c).step_by(channels) {
                out.push_str(&format!("{}, ", v));
            }
            out.push_str("]\n");
        }
        out.push_str("---\n");
    }
    out
}
