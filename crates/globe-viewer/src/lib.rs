//! Headless flat-globe viewer.
//!
//! Wires configuration, logging, a grid tessellator and a logging render
//! pipeline through the frame composer. Nothing is rasterized.

pub mod grid;
pub mod pipeline;
pub mod platform;
pub mod session;

pub use grid::{GridMesh, GridTessellator};
pub use pipeline::{DrawRecord, TracingPipeline, ViewerGlobe};
pub use platform::{PlatformDirs, PlatformError};
pub use session::{Camera, Viewer, ViewerError};
