//! Configuration for the flat-globe viewer.
//!
//! Settings persist to disk as RON and can be overridden from the command
//! line. Projection and ellipsoid settings are validated when they are turned
//! into their runtime types.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, EllipsoidConfig, GlobeConfig, ViewConfig};
pub use error::ConfigError;
