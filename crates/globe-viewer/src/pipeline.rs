//! A render pipeline that records and logs what it would draw.

use globe_frame::{BoxError, DrawContext, FlatGlobe, Offset, PassContext, PickedObject, RenderPipeline};
use globe_math::Region;
use tracing::{debug, trace};

use crate::grid::{GridMesh, GridTessellator};

/// The globe type the viewer renders.
pub type ViewerGlobe = FlatGlobe<GridTessellator>;

/// One draw call as seen by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub frame: u64,
    pub offset: Offset,
    pub sector: Region,
    pub vertices: usize,
}

/// Stands in for a GPU pipeline: nothing is rasterized, every pass is logged.
#[derive(Debug, Default)]
pub struct TracingPipeline {
    frames_finished: u64,
    prepared_vertices: usize,
    current: Vec<DrawRecord>,
    last_frame: Vec<DrawRecord>,
}

impl TracingPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_finished(&self) -> u64 {
        self.frames_finished
    }

    pub fn prepared_vertices(&self) -> usize {
        self.prepared_vertices
    }

    /// Draw calls of the most recently finished frame.
    pub fn last_frame(&self) -> &[DrawRecord] {
        &self.last_frame
    }
}

impl RenderPipeline<ViewerGlobe> for TracingPipeline {
    fn initialize_frame(&mut self, dc: &mut DrawContext<ViewerGlobe>) -> Result<(), BoxError> {
        self.current.clear();
        trace!(frame = dc.frame_index, "Begin frame");
        Ok(())
    }

    fn prepare(&mut self, _dc: &mut DrawContext<ViewerGlobe>, pass: &PassContext<'_, GridMesh>) -> Result<(), BoxError> {
        self.prepared_vertices += pass.geometry.vertices.len();
        trace!(offset = %pass.offset, vertices = pass.geometry.vertices.len(), "Prepare");
        Ok(())
    }

    /// Reports the first grid vertex inside the pick frustum.
    fn pick(&mut self, dc: &mut DrawContext<ViewerGlobe>, pass: &PassContext<'_, GridMesh>) -> Result<(), BoxError> {
        let Some(frustum) = &dc.pick_frustum else {
            return Ok(());
        };
        let hit = pass
            .geometry
            .vertices
            .iter()
            .enumerate()
            .find(|(_, vertex)| frustum.contains_point(**vertex));

        if let Some((index, vertex)) = hit {
            let position = dc.globe.model().cartesian_to_geographic(*vertex);
            debug!(offset = %pass.offset, %position, "Picked terrain vertex");
            dc.picked.push(PickedObject {
                id: index as u64,
                offset: pass.offset,
                position: Some(position),
            });
        }
        Ok(())
    }

    fn draw(&mut self, dc: &mut DrawContext<ViewerGlobe>, pass: &PassContext<'_, GridMesh>) -> Result<(), BoxError> {
        let record = DrawRecord {
            frame: dc.frame_index,
            offset: pass.offset,
            sector: pass.sector,
            vertices: pass.geometry.vertices.len(),
        };
        debug!(
            frame = record.frame,
            offset = %record.offset,
            west = record.sector.min_longitude.degrees(),
            east = record.sector.max_longitude.degrees(),
            vertices = record.vertices,
            "Draw terrain"
        );
        self.current.push(record);
        Ok(())
    }

    fn finalize_frame(&mut self, dc: &mut DrawContext<ViewerGlobe>) {
        self.frames_finished += 1;
        self.last_frame = std::mem::take(&mut self.current);
        trace!(frame = dc.frame_index, "End frame");
    }
}
