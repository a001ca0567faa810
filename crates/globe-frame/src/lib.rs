//! Frame composition for a globe that may be drawn flat.
//!
//! The [`FrameComposer`] runs a [`RenderPipeline`] once per visible copy of
//! the world, so a continuous flat map wraps seamlessly across the
//! antimeridian. With [`TerrainSource::Single`] the same composer drives a
//! round globe, where only one copy exists.

mod composer;
mod context;
mod error;
mod globe;
mod offset;
mod pipeline;
mod view;

pub use composer::{FrameComposer, FrameState, FrameStats, TerrainSource};
pub use context::{DEFAULT_PICK_SIZE, DrawContext, PassContext, PickedObject};
pub use error::{BoxError, FrameError, PassStage};
pub use globe::{FlatGlobe, Globe, GlobeModel, Tessellation, Tessellator};
pub use offset::Offset;
pub use pipeline::RenderPipeline;
pub use view::View;
