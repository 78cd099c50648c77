//! fourier - image engine CLI
//!
//! Color conversion, FFT Gaussian blur, Canny edges and sample dumps over JPEG files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fourier::ColorSpace;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "fourier")]
#[command(author, version, about = "8-bit image engine: color, FFT blur, Canny edges")]
#[command(long_about = "
Reads a JPEG, applies one operation and writes the result as JPEG.

Examples:
  fourier info photo.jpg                        # Show geometry and color space
  fourier gray photo.jpg -o gray.jpg            # Reduce to luma
  fourier ycbcr photo.jpg -o ycc.jpg            # Store YCbCr samples
  fourier rgb raw.jpg -o rgb.jpg --assume ycbcr # Inverse transform
  fourier blur photo.jpg -o soft.jpg -s 2.0 -f 3
  fourier blur photo.jpg -o soft.jpg --method naive
  fourier canny photo.jpg -o edges.jpg --upper 90 --lower 30
  fourier --params canny.yaml canny photo.jpg -o edges.jpg
  fourier dump tiny.jpg --as ycbcr              # Print every sample
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// YAML file with `blur:` and `canny:` parameter sections
    #[arg(short, long, global = true, value_name = "FILE")]
    params: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image geometry and color space
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert to single-channel luma
    #[command(visible_alias = "g")]
    Gray(ConvertArgs),

    /// Convert RGB to YCbCr
    Ycbcr(ConvertArgs),

    /// Convert YCbCr back to RGB
    Rgb(ConvertArgs),

    /// Apply Gaussian or box blur
    #[command(visible_alias = "b")]
    Blur(BlurArgs),

    /// Canny edge detection
    #[command(visible_alias = "c")]
    Canny(CannyArgs),

    /// Print every sample as text
    #[command(visible_alias = "d")]
    Dump(DumpArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input files
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input file
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Interpret the decoded samples as this color space (e.g. ycbcr)
    #[arg(long, value_name = "SPACE")]
    assume: Option<ColorSpace>,

    /// JPEG quality (0-100)
    #[arg(short, long, default_value = "100")]
    quality: i32,
}

/// Blur implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum BlurMethod {
    /// Frequency-domain Gaussian
    #[default]
    Fft,
    /// Direct spatial Gaussian
    Naive,
    /// Uniform box
    Box,
}

#[derive(Args)]
struct BlurArgs {
    /// Input file
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Gaussian standard deviation (default 1.4)
    #[arg(short = 's', long)]
    std_dev: Option<f32>,

    /// Kernel size factor; kernel side is 2 * f + 1 (default 2)
    #[arg(short = 'f', long)]
    size_f: Option<i32>,

    /// Blur implementation
    #[arg(short, long, value_enum, default_value_t = BlurMethod::Fft)]
    method: BlurMethod,

    /// JPEG quality (0-100)
    #[arg(short, long, default_value = "100")]
    quality: i32,
}

#[derive(Args)]
struct CannyArgs {
    /// Input file
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Smoothing standard deviation (default 1.4)
    #[arg(short = 's', long)]
    std_dev: Option<f32>,

    /// Smoothing kernel size factor (default 2)
    #[arg(short = 'f', long)]
    size_f: Option<i32>,

    /// Strong edge threshold (default 76.8)
    #[arg(short, long)]
    upper: Option<f32>,

    /// Weak edge threshold (default 25.6)
    #[arg(short, long)]
    lower: Option<f32>,

    /// JPEG quality (0-100)
    #[arg(short, long, default_value = "100")]
    quality: i32,
}

#[derive(Args)]
struct DumpArgs {
    /// Input file
    input: PathBuf,

    /// Convert to this color space before dumping (rgb, ycbcr, gray)
    #[arg(long = "as", value_name = "SPACE")]
    color_space: Option<ColorSpace>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "fourier=debug" } else { "fourier=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let params = commands::load_params(cli.params.as_deref())?;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Gray(args) => commands::color::run(args, ColorSpace::Gray, cli.verbose),
        Commands::Ycbcr(args) => commands::color::run(args, ColorSpace::YCbCr, cli.verbose),
        Commands::Rgb(args) => commands::color::run(args, ColorSpace::Rgb, cli.verbose),
        Commands::Blur(args) => commands::blur::run(args, &params, cli.verbose),
        Commands::Canny(args) => commands::canny::run(args, &params, cli.verbose),
        Commands::Dump(args) => commands::dump::run(args, cli.verbose),
    }
}
