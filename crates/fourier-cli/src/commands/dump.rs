//! Text dump command.

use crate::DumpArgs;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use tracing::trace;

pub fn run(args: DumpArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), "dump::run");

    let mut image = super::load_image(&args.input)?;
    if let Some(space) = args.color_space {
        image
            .convert_to(space)
            .with_context(|| format!("Cannot dump {} as {}", args.input.display(), space))?;
    }
    if verbose {
        eprintln!("{}", image);
    }

    let text = image.dump();
    match &args.output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write: {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}
