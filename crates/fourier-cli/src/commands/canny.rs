//! Canny edge detection command.

use super::ParamsFile;
use crate::CannyArgs;
use anyhow::{Context, Result};
use fourier::CannyParams;
use tracing::{info, trace};

/// Merges command-line overrides into the loaded parameters.
fn resolve(args: &CannyArgs, params: &ParamsFile) -> CannyParams {
    let mut p = params.canny;
    if let Some(v) = args.std_dev {
        p.std_dev = v;
    }
    if let Some(v) = args.size_f {
        p.size_f = v;
    }
    if let Some(v) = args.upper {
        p.upper_threshold = v;
    }
    if let Some(v) = args.lower {
        p.lower_threshold = v;
    }
    p
}

pub fn run(args: CannyArgs, params: &ParamsFile, verbose: bool) -> Result<()> {
    let p = resolve(&args, params);
    trace!(input = %args.input.display(), ?p, "canny::run");

    let mut image = super::load_image(&args.input)?;
    info!(
        w = image.width(),
        h = image.height(),
        upper = p.upper_threshold,
        lower = p.lower_threshold,
        "Detecting edges"
    );

    if verbose {
        println!(
            "Canny on {} (std_dev={}, size_f={}, upper={}, lower={})",
            args.input.display(),
            p.std_dev,
            p.size_f,
            p.upper_threshold,
            p.lower_threshold
        );
    }

    image
        .canny_edge_detect(&p)
        .context("Edge detection failed")?;
    super::save_image(&args.output, &image, args.quality)?;

    if verbose {
        println!("Done.");
    }
    Ok(())
}
