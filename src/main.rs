mod load;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lustra_core::params::{AdjustmentParams, Look};
use lustra_core::session::EditSession;

#[derive(Parser)]
#[command(name = "lustra")]
#[command(version, about = "Apply parametric adjustments and looks to a photo", long_about = None)]
struct Cli {
    /// Input photo (JPEG or PNG)
    input: PathBuf,

    /// Output image; format follows the extension
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,

    /// Read all parameters from a JSON file instead of flags
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,

    /// Downsample so the longest edge fits N pixels (0 = keep full size)
    #[arg(long, value_name = "N", default_value_t = 0)]
    max_edge: u32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    exposure: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    brilliance: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    highlights: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    shadows: f32,

    /// Contrast; neutral is 1
    #[arg(long, value_parser = slider, default_value_t = 1.0)]
    contrast: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    brightness: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    black_point: f32,

    /// Saturation; neutral is 1
    #[arg(long, value_parser = slider, default_value_t = 1.0)]
    saturation: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    vibrance: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    warmth: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    tint: f32,

    #[arg(long, value_parser = slider, default_value_t = 0.0)]
    gradient: f32,

    /// Named look applied after all adjustments
    #[arg(long, value_enum)]
    look: Option<LookArg>,

    /// Look intensity in [0, 1]
    #[arg(long, value_parser = unit, default_value_t = 0.5)]
    intensity: f32,
}

#[derive(Clone, Copy, ValueEnum)]
enum LookArg {
    Vivid,
    VividWarm,
}

/// Sliders are range-validated here, at the parameter surface; the core
/// only re-clamps where its own numeric model demands it (tint).
fn slider(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (-100.0..=100.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is outside [-100, 100]"))
    }
}

fn unit(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is outside [0, 1]"))
    }
}

impl Cli {
    fn adjustment_params(&self) -> Result<AdjustmentParams> {
        if let Some(path) = &self.params {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return serde_json::from_str(&json)
                .with_context(|| format!("invalid parameters in {}", path.display()));
        }

        let look = match self.look {
            None => Look::None,
            Some(LookArg::Vivid) => Look::Vivid {
                intensity: self.intensity,
            },
            Some(LookArg::VividWarm) => Look::VividWarm {
                intensity: self.intensity,
            },
        };

        Ok(AdjustmentParams {
            exposure: self.exposure,
            brilliance: self.brilliance,
            highlights: self.highlights,
            shadows: self.shadows,
            contrast: self.contrast,
            brightness: self.brightness,
            black_point: self.black_point,
            saturation: self.saturation,
            vibrance: self.vibrance,
            warmth: self.warmth,
            tint: self.tint,
            gradient: self.gradient,
            look,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let params = cli.adjustment_params()?;

    let t0 = std::time::Instant::now();
    let mut image = load::decode(&cli.input)?;
    if cli.max_edge > 0 {
        image = image.downsample(cli.max_edge);
    }
    info!(
        elapsed_ms = t0.elapsed().as_millis(),
        w = image.width,
        h = image.height,
        "image loaded"
    );

    let mut session = EditSession::new();
    session.load_image(image);
    session.edit(|p| *p = params);

    let t1 = std::time::Instant::now();
    let result = session.recompute().context("recompute produced no image")?;
    info!(elapsed_ms = t1.elapsed().as_millis(), "pipeline complete");

    load::encode(result, &cli.out)?;
    info!(out = %cli.out.display(), "result written");
    Ok(())
}
