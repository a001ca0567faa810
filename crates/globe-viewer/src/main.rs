//! The binary entry point for the flat-globe viewer.

use clap::Parser;
use globe_config::{CliArgs, Config};
use globe_viewer::{PlatformDirs, Viewer, ViewerError};
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to initialize platform directories: {e}");
        std::process::exit(1);
    }

    let loaded = Config::load_or_create(&dirs.config_dir);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    config.apply_cli_overrides(&args);

    globe_log::init_logging(Some(dirs.log_dir.as_path()), cfg!(debug_assertions), Some(&config));
    if let Err(e) = &loaded {
        warn!("Using default config: {e}");
    }
    config.sanitize();

    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), ViewerError> {
    let mut viewer = Viewer::from_config(config)?;
    for stats in viewer.run(config.view.frames)? {
        info!(
            frame = stats.frame_index,
            populated = ?stats.populated,
            drawn = stats.drawn,
            "Frame rendered"
        );
    }
    let picked = viewer.context().picked.len();
    info!(
        frames = viewer.pipeline().frames_finished(),
        vertices = viewer.pipeline().prepared_vertices(),
        picked,
        "Done"
    );
    Ok(())
}
