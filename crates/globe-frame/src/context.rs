use glam::DVec2;
use globe_math::{Frustum, Position, Region};

use crate::{Globe, Offset, View};

/// Default pick aperture, in pixels.
pub const DEFAULT_PICK_SIZE: DVec2 = DVec2::new(3.0, 3.0);

/// Something the pick pass found under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedObject {
    pub id: u64,
    /// World copy the object was found in.
    pub offset: Offset,
    pub position: Option<Position>,
}

/// Per-frame state shared by the composer and the render pipeline.
#[derive(Debug)]
pub struct DrawContext<G> {
    pub globe: G,
    pub view: View,
    /// Incremented once per repaint.
    pub frame_index: u64,
    /// Cursor position in window pixels, if picking is requested this frame.
    pub pick_point: Option<DVec2>,
    pub pick_size: DVec2,
    /// View frustum in model coordinates, set by `apply_view`.
    pub model_frustum: Option<Frustum>,
    /// Frustum under the pick point, set by `create_pick_frustum`.
    pub pick_frustum: Option<Frustum>,
    pub picked: Vec<PickedObject>,
}

impl<G: Globe> DrawContext<G> {
    pub fn new(globe: G, view: View) -> Self {
        Self {
            globe,
            view,
            frame_index: 0,
            pick_point: None,
            pick_size: DEFAULT_PICK_SIZE,
            model_frustum: None,
            pick_frustum: None,
            picked: Vec::new(),
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }
}

/// What a single prepare, pick or draw call operates on.
#[derive(Debug)]
pub struct PassContext<'a, T> {
    pub geometry: &'a T,
    pub sector: Region,
    pub offset: Offset,
}

impl<T> Clone for PassContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PassContext<'_, T> {}
