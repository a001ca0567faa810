//! Frame composition errors.

use std::fmt;

use crate::Offset;

/// Boxed error returned by external collaborators (tessellators, render pipelines).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The render pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassStage {
    Prepare,
    Pick,
    Draw,
}

impl fmt::Display for PassStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassStage::Prepare => f.write_str("prepare"),
            PassStage::Pick => f.write_str("pick"),
            PassStage::Draw => f.write_str("draw"),
        }
    }
}

/// Errors that abort a repaint. Frame finalization still runs for all of them.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An integer that is not one of -1, 0, 1 was used as a globe offset.
    #[error("invalid globe offset {0}, expected -1, 0 or 1")]
    InvalidOffset(i32),

    /// The pipeline failed to set up the frame.
    #[error("frame initialization failed: {0}")]
    Initialize(#[source] BoxError),

    /// The terrain tessellator failed for one offset.
    #[error("terrain tessellation failed at offset {offset}: {source}")]
    Tessellation {
        offset: Offset,
        #[source]
        source: BoxError,
    },

    /// A prepare, pick or draw call failed for one offset.
    #[error("{stage} pass failed at offset {offset}: {source}")]
    Pass {
        stage: PassStage,
        offset: Offset,
        #[source]
        source: BoxError,
    },

    /// Clearing the screen between passes failed.
    #[error("screen clear failed: {0}")]
    Clear(#[source] BoxError),
}
