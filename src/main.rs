use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgsqueeze::models::{AppConfig, CompressionRequest, CompressionStats, ImageFormat};
use imgsqueeze::services::{inspect, Compressor};
use imgsqueeze::RasterCodec;

#[derive(Parser)]
#[command(name = "imgsqueeze")]
#[command(about = "Content-aware image pre-compression")]
#[command(version)]
struct Cli {
    /// YAML configuration file (also read from IMGSQUEEZE_CONFIG)
    #[arg(long, global = true, env = "IMGSQUEEZE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress an image file
    Compress {
        /// Source image
        input: PathBuf,

        /// Output path (default: <dir>/<prefix><stem><ext> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quality between 0.0 and 1.0 (default from config)
        #[arg(short, long, value_parser = parse_quality)]
        quality: Option<f32>,

        /// Source format: png, jpeg, webp or other (default: extension, then magic bytes)
        #[arg(long)]
        format: Option<ImageFormat>,
    },
    /// Show the content profile and the quality the JPEG path would use
    Inspect {
        /// Source image
        input: PathBuf,

        /// Quality between 0.0 and 1.0 (default from config)
        #[arg(short, long, value_parser = parse_quality)]
        quality: Option<f32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgsqueeze=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::Compress {
            input,
            output,
            quality,
            format,
        } => run_compress_command(&config, &input, output, quality, format).await,
        Commands::Inspect {
            input,
            quality,
            json,
        } => run_inspect_command(&config, &input, quality, json),
    }
}

/// Compress one file and report the savings
async fn run_compress_command(
    config: &AppConfig,
    input: &Path,
    output: Option<PathBuf>,
    quality: Option<f32>,
    format: Option<ImageFormat>,
) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let format = resolve_format(format, input, &bytes);
    let quality = quality.unwrap_or(config.default_quality);
    let original_len = bytes.len();

    tracing::debug!(input = %input.display(), %format, quality, "Compressing");

    let compressor = Compressor::with_raster_codec(config.codec_options());
    let result = compressor
        .compress_async(CompressionRequest::new(bytes, format, quality))
        .await?;

    let output = output.unwrap_or_else(|| config.output_path_for(input, result.format));
    std::fs::write(&output, &result.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let stats = CompressionStats::new(original_len, result.bytes.len());
    tracing::info!(
        output = %output.display(),
        path = %result.path,
        quality = result.quality,
        reduction_percent = stats.reduction_percent,
        "Compressed image"
    );

    println!("Wrote {} ({})", output.display(), result.format.mime_type());
    println!("  Strategy: {}", result.path);
    println!("  Quality:  {:.2}", result.quality);
    println!(
        "  Size:     {} -> {} bytes ({}% smaller, {})",
        stats.original_bytes,
        stats.compressed_bytes,
        stats.display_percent(),
        stats.tier.label()
    );

    Ok(())
}

/// Print the content report for one file
fn run_inspect_command(
    config: &AppConfig,
    input: &Path,
    quality: Option<f32>,
    json: bool,
) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let format = resolve_format(None, input, &bytes);
    let quality = quality.unwrap_or(config.default_quality);

    let codec = RasterCodec::new(config.codec_options());
    let report = inspect(&codec, &bytes, format, quality)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({}, {}x{})", input.display(), report.format, report.width, report.height);
    println!("  Alpha:            {}", if report.has_alpha { "yes" } else { "no" });
    println!("  Complexity:       {:.2}", report.complexity);
    println!(
        "  Uniform areas:    {:.1}%{}",
        report.uniform_ratio * 100.0,
        if report.has_uniform_areas { " (flat)" } else { "" }
    );
    println!(
        "  High contrast:    {:.1}%{}",
        report.contrast_ratio * 100.0,
        if report.has_high_frequency { " (detailed)" } else { "" }
    );
    println!("  PNG quantizer:    {}", report.quantize_mode);
    println!(
        "  JPEG quality:     {:.2} -> {:.2}{}",
        report.requested_quality,
        report.effective_quality,
        if report.would_smooth { " (smoothed)" } else { "" }
    );

    Ok(())
}

/// Explicit flag first, then file extension, then magic bytes
fn resolve_format(explicit: Option<ImageFormat>, input: &Path, bytes: &[u8]) -> ImageFormat {
    explicit
        .or_else(|| ImageFormat::from_path(input))
        .unwrap_or_else(|| ImageFormat::sniff(bytes))
}

fn parse_quality(s: &str) -> Result<f32, String> {
    let quality: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&quality) {
        Ok(quality)
    } else {
        Err(format!("quality must be between 0.0 and 1.0, got {quality}"))
    }
}
