//! Structured logging for the flat-globe viewer.
//!
//! Console output goes through a `tracing` fmt layer with an uptime timer.
//! Debug builds can also write JSON lines to a file for post-mortem analysis
//! of frame composition. `RUST_LOG` overrides the configured level.

use std::path::Path;
use std::sync::Mutex;

use globe_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Used when neither `RUST_LOG` nor the config set a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE: &str = "globe-viewer.log";

/// Filter directives taken from the config, or [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => config.debug.log_level.trim().to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Installs the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file
/// * `debug_build` - file logging only happens in debug builds
/// * `config` - source of the log level and the `json_log` switch
///
/// ```no_run
/// use globe_config::Config;
/// use globe_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry().with(env_filter).with(console_layer);

    let json_log = config.is_none_or(|c| c.debug.json_log);
    if debug_build
        && json_log
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(Mutex::new(log_file))
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};

    #[test]
    fn test_filter_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,globe_frame=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "debug,globe_frame=trace");
    }

    #[test]
    fn test_filter_falls_back_to_default() {
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        for directives in ["info", "debug,globe_frame=trace", "warn,globe_projection=debug", "error"] {
            assert!(EnvFilter::try_new(directives).is_ok(), "Failed to parse filter: {directives}");
        }
    }

    #[test]
    fn test_json_layer_writes_structured_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        let file = std::fs::File::create(&path).unwrap();

        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("debug"))
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false).json());
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(offset = 1, "Terrain tessellated");
            tracing::trace!("filtered out");
        });

        let lines: Vec<String> = BufReader::new(std::fs::File::open(&path).unwrap())
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 1);
        let event: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(event["level"], "DEBUG");
        assert_eq!(event["fields"]["message"], "Terrain tessellated");
        assert_eq!(event["fields"]["offset"], 1);
    }
}
