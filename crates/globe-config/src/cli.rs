//! Command-line argument parsing for the viewer.

use std::path::PathBuf;

use clap::Parser;
use globe_projection::{Pole, ProjectionKind};

use crate::Config;

/// Flat-globe viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "globe-viewer", about = "Headless flat-globe frame composer")]
pub struct CliArgs {
    /// Map projection (equirectangular, mercator, sinusoidal, modified-sinusoidal,
    /// polar-equidistant, ups, transverse-mercator, cautra).
    #[arg(long)]
    pub projection: Option<ProjectionKind>,

    /// Central meridian in degrees, required by transverse Mercator.
    #[arg(long, allow_negative_numbers = true)]
    pub central_meridian: Option<f64>,

    /// Pole for the polar projections (north, south).
    #[arg(long)]
    pub pole: Option<Pole>,

    /// Draw a flat map (true) or a round globe (false).
    #[arg(long)]
    pub flat: Option<bool>,

    /// Number of frames to render.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(kind) = args.projection {
            self.globe.projection = kind;
        }
        if let Some(cm) = args.central_meridian {
            self.globe.central_meridian_deg = Some(cm);
        }
        if let Some(pole) = args.pole {
            self.globe.pole = Some(pole);
        }
        if let Some(flat) = args.flat {
            self.globe.flat = flat;
        }
        if let Some(frames) = args.frames {
            self.view.frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
