use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use restore::quality::{mse, psnr};
use restore::{BorderPolicy, Image, RestoreConfig, Restorer, Roi};

#[derive(Parser, Debug)]
#[command(name = "restore")]
#[command(version, about = "Restore saturated (0/255) pixels by robust-weighted diffusion", long_about = None)]
struct Cli {
    /// Damaged input image
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the restored image (format from extension)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Horizontal origin of the region to restore
    #[arg(value_name = "X")]
    x: usize,

    /// Vertical origin of the region to restore
    #[arg(value_name = "Y")]
    y: usize,

    /// Side length of the square region
    #[arg(value_name = "EXTENT")]
    extent: usize,

    /// Known-good image; prints MSE and PSNR of the result against it
    #[arg(short, long, value_name = "FILE")]
    reference: Option<PathBuf>,

    /// Restoration config file (.yaml, .yml or .json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of sweep passes (overrides the config file)
    #[arg(long, value_name = "N")]
    passes: Option<usize>,

    /// Gradient threshold of the weight kernel (overrides the config file)
    #[arg(long, value_name = "ALPHA")]
    alpha: Option<f64>,

    /// Border handling (overrides the config file)
    #[arg(long, value_enum, value_name = "POLICY")]
    border: Option<BorderArg>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Directory for rolling log files
    #[arg(long, value_name = "DIR", default_value = "logs")]
    log_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BorderArg {
    /// Region must keep a one-pixel margin from the image edge
    RequireMargin,
    /// Region may touch the edge; missing neighbors are ignored
    SkipAbsent,
}

impl From<BorderArg> for BorderPolicy {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::RequireMargin => BorderPolicy::RequireMargin,
            BorderArg::SkipAbsent => BorderPolicy::SkipAbsent,
        }
    }
}

impl Cli {
    fn roi(&self) -> Roi {
        Roi::new(self.x, self.y, self.extent)
    }

    /// Config file values (or defaults) with command-line overrides applied.
    fn restore_config(&self) -> Result<RestoreConfig> {
        let mut config = match &self.config {
            Some(path) => RestoreConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RestoreConfig::default(),
        };

        if let Some(passes) = self.passes {
            config.passes = passes;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(border) = self.border {
            config.border = border.into();
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    common::log_setup::setup_logging(&cli.log_level, &cli.log_dir)?;
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.restore_config()?;
    let roi = cli.roi();

    let mut image = Image::load(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    tracing::info!(
        path = %cli.input.display(),
        width = image.width(),
        height = image.height(),
        "Loaded input"
    );

    let started = Instant::now();
    let mut restorer = Restorer::new(&image, roi, config).context("Invalid restoration setup")?;
    let report = restorer.run(&mut image);
    let elapsed = started.elapsed();

    image
        .save(&cli.output)
        .with_context(|| format!("Failed to save {}", cli.output.display()))?;

    println!("Run-time in seconds: {:.6}", elapsed.as_secs_f64());
    println!(
        "Restored {} damaged pixels in {} passes ({} updates)",
        report.damaged_in_roi, report.passes, report.updates
    );

    if let Some(path) = &cli.reference {
        let reference = Image::load(path)
            .with_context(|| format!("Failed to load reference {}", path.display()))?;
        let mse = mse(&image, &reference).context("Reference does not match the input")?;
        println!("MSE: {mse:.4}");
        println!("PSNR: {:.4}", psnr(mse));
    }

    Ok(())
}
