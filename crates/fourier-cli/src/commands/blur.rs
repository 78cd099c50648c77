//! Blur command
//!
//! Gaussian blur through the FFT (default), by direct convolution, or a box blur.

use super::ParamsFile;
use crate::{BlurArgs, BlurMethod};
use anyhow::{Context, Result};
use fourier::BlurParams;
use tracing::{info, trace};

/// Merges command-line overrides into the loaded parameters.
fn resolve(args: &BlurArgs, params: &ParamsFile) -> BlurParams {
    let mut p = params.blur;
    if let Some(v) = args.std_dev {
        p.std_dev = v;
    }
    if let Some(v) = args.size_f {
        p.size_f = v;
    }
    p
}

pub fn run(args: BlurArgs, params: &ParamsFile, verbose: bool) -> Result<()> {
    let p = resolve(&args, params);
    trace!(input = %args.input.display(), method = ?args.method, ?p, "blur::run");

    let mut image = super::load_image(&args.input)?;
    info!(
        method = ?args.method,
        std_dev = p.std_dev,
        size_f = p.size_f,
        w = image.width(),
        h = image.height(),
        "Applying blur"
    );

    if verbose {
        println!(
            "Applying {:?} blur (std_dev={}, size_f={}) to {}",
            args.method, p.std_dev, p.size_f, args.input.display()
        );
    }

    match args.method {
        BlurMethod::Fft => image.gaussian_blur(p.std_dev, p.size_f),
        BlurMethod::Naive => image.gaussian_blur_naive(p.std_dev, p.size_f),
        BlurMethod::Box => image.box_blur(p.size_f),
    }
    .context("Blur failed")?;

    super::save_image(&args.output, &image, args.quality)?;

    if verbose {
        println!("Done.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(std_dev: Option<f32>, size_f: Option<i32>) -> BlurArgs {
        BlurArgs {
            input: PathBuf::from("in.jpg"),
            output: PathBuf::from("out.jpg"),
            std_dev,
            size_f,
            method: BlurMethod::Fft,
            quality: 100,
        }
    }

    #[test]
    fn test_defaults_without_flags() {
        let p = resolve(&args(None, None), &ParamsFile::default());
        assert_eq!(p, BlurParams::default());
    }

    #[test]
    fn test_flags_override_individually() {
        let mut file = ParamsFile::default();
        file.blur.std_dev = 3.0;
        file.blur.size_f = 5;
        let p = resolve(&args(None, Some(1)), &file);
        assert_eq!(p.std_dev, 3.0);
        assert_eq!(p.size_f, 1);
    }
}
