use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lumen_core::geometry::{CropRegion, ResizeSpec};
use lumen_core::image_buf::FilterSettings;
use lumen_core::presets;
use lumen_export::{ExportFormat, ExportSpec};
use lumen_tasks::{BackgroundScheduler, Processor};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(version, about = "Photo filter pipeline and export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply filter settings to an image and write a JPEG preview
    Apply {
        /// Input image file
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Filter settings JSON file
        #[arg(short, long, value_name = "FILE")]
        settings: Option<PathBuf>,

        /// Built-in preset applied on top of the settings
        #[arg(short, long, value_name = "NAME")]
        preset: Option<String>,
    },

    /// Crop by percentage region and write a JPEG preview
    Crop {
        input: PathBuf,

        /// Region as percentages (x,y,width,height)
        #[arg(long, value_name = "X,Y,W,H")]
        region: String,

        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Resize to target dimensions and write a JPEG preview
    Resize {
        input: PathBuf,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        /// Derive one dimension from the source aspect ratio
        #[arg(long)]
        keep_aspect: bool,

        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Apply filters, then encode at an export format and quality
    Export {
        input: PathBuf,

        /// jpeg, png or webp
        #[arg(long, default_value = "jpeg")]
        format: String,

        /// 10-100, meaningful for lossy formats only
        #[arg(long, default_value = "90")]
        quality: u8,

        /// Output filename without extension
        #[arg(long)]
        name: String,

        /// Output directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        settings: Option<PathBuf>,

        #[arg(short, long, value_name = "NAME")]
        preset: Option<String>,
    },

    /// List the built-in presets
    Presets,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let processor = Processor::new(Arc::new(BackgroundScheduler));

    match cli.command {
        Commands::Apply {
            input,
            out,
            settings,
            preset,
        } => {
            let image = lumen_export::io::load(&input)?;
            let settings = resolve_settings(settings.as_deref(), preset.as_deref())?;
            let encoded = processor.apply_filters(&image, &settings).wait().await?;
            fs::write(&out, &encoded.bytes)
                .with_context(|| format!("failed to write: {}", out.display()))?;
            info!(path = %out.display(), "wrote filtered preview");
        }

        Commands::Crop { input, region, out } => {
            let image = lumen_export::io::load(&input)?;
            let region = parse_region(&region)?;
            let encoded = processor.crop_image(&image, region).wait().await?;
            fs::write(&out, &encoded.bytes)
                .with_context(|| format!("failed to write: {}", out.display()))?;
            info!(path = %out.display(), w = encoded.width, h = encoded.height, "wrote crop");
        }

        Commands::Resize {
            input,
            width,
            height,
            keep_aspect,
            out,
        } => {
            let image = lumen_export::io::load(&input)?;
            let spec = ResizeSpec {
                width,
                height,
                maintain_aspect_ratio: keep_aspect,
            };
            let encoded = processor.resize_image(&image, spec).wait().await?;
            fs::write(&out, &encoded.bytes)
                .with_context(|| format!("failed to write: {}", out.display()))?;
            info!(path = %out.display(), w = encoded.width, h = encoded.height, "wrote resize");
        }

        Commands::Export {
            input,
            format,
            quality,
            name,
            out_dir,
            settings,
            preset,
        } => {
            let image = lumen_export::io::load(&input)?;
            let settings = resolve_settings(settings.as_deref(), preset.as_deref())?;
            let spec = ExportSpec {
                format: ExportFormat::from_name(&format)?,
                quality,
                filename: name,
            };
            let encoded = processor
                .export_image(&image, &settings, &spec)
                .wait()
                .await?;
            let path = lumen_export::io::save(&encoded, &out_dir, &spec.filename)?;
            info!(path = %path.display(), "export complete");
        }

        Commands::Presets => {
            for preset in presets::builtin() {
                println!("{}", preset.name);
            }
        }
    }

    Ok(())
}

/// Load settings from JSON (or start neutral) and overlay a preset on top.
fn resolve_settings(
    settings_path: Option<&std::path::Path>,
    preset_name: Option<&str>,
) -> Result<FilterSettings> {
    let mut settings = match settings_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid settings JSON: {}", path.display()))?
        }
        None => FilterSettings::default(),
    };

    if let Some(name) = preset_name {
        let Some(preset) = presets::by_name(name) else {
            bail!("unknown preset: {name}");
        };
        settings = preset.overlay.apply_to(&settings);
    }

    Ok(settings)
}

/// Parse "x,y,w,h" percentages.
fn parse_region(raw: &str) -> Result<CropRegion> {
    let parts: Vec<f32> = raw
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid region: {raw}"))?;
    if parts.len() != 4 {
        bail!("region needs four comma-separated values, got {}", parts.len());
    }
    Ok(CropRegion {
        x: parts[0],
        y: parts[1],
        width: parts[2],
        height: parts[3],
    })
}
