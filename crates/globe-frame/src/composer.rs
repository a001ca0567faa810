//! Fans a single render pipeline out over every visible copy of the world.
//!
//! A flat map that tiles horizontally can show the same longitude more than
//! once near the antimeridian. Rather than teaching the pipeline about this,
//! the composer tessellates terrain for each visible copy and calls the
//! unmodified pipeline once per copy, handing it the matching geometry.

use tracing::{debug, trace};

use crate::{
    DrawContext, FrameError, Globe, Offset, PassContext, PassStage, RenderPipeline, Tessellation,
};

/// How many terrain sets a frame produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerrainSource {
    /// Round globe: one terrain set at the centre offset, always built.
    Single,
    /// Flat globe: one terrain set per world copy that intersects the view.
    #[default]
    TriOffset,
}

impl TerrainSource {
    pub fn offsets(self) -> &'static [Offset] {
        match self {
            TerrainSource::Single => &[Offset::Center],
            TerrainSource::TriOffset => &Offset::ORDER,
        }
    }

    /// Whether copies outside the view frustum are skipped.
    fn culls(self) -> bool {
        matches!(self, TerrainSource::TriOffset)
    }
}

/// Terrain built for the current frame, one slot per offset.
#[derive(Debug)]
pub struct FrameState<T> {
    slots: [Option<Tessellation<T>>; 3],
}

impl<T> Default for FrameState<T> {
    fn default() -> Self {
        Self {
            slots: [None, None, None],
        }
    }
}

impl<T> FrameState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    pub fn get(&self, offset: Offset) -> Option<&Tessellation<T>> {
        self.slots[offset.index()].as_ref()
    }

    pub fn set(&mut self, offset: Offset, tessellation: Option<Tessellation<T>>) {
        self.slots[offset.index()] = tessellation;
    }

    /// Offsets holding terrain, in evaluation order.
    pub fn populated(&self) -> Vec<Offset> {
        Offset::ORDER
            .into_iter()
            .filter(|offset| self.get(*offset).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Summary of one repaint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame_index: u64,
    /// Offsets that received terrain, in evaluation order.
    pub populated: Vec<Offset>,
    pub prepared: usize,
    pub picked: usize,
    pub drawn: usize,
}

/// Drives one repaint: view setup, terrain per offset, then the prepare,
/// pick and draw passes over every populated offset.
#[derive(Debug)]
pub struct FrameComposer<T> {
    source: TerrainSource,
    state: FrameState<T>,
}

impl<T> FrameComposer<T> {
    pub fn new(source: TerrainSource) -> Self {
        Self {
            source,
            state: FrameState::new(),
        }
    }

    pub fn source(&self) -> TerrainSource {
        self.source
    }

    /// Terrain slots. Empty outside of a repaint.
    pub fn state(&self) -> &FrameState<T> {
        &self.state
    }

    /// Runs a full frame.
    ///
    /// `finalize_frame` runs on every exit path, including errors and
    /// panics raised by the pipeline, and the globe is left at the centre
    /// offset.
    pub fn repaint<G, P>(&mut self, dc: &mut DrawContext<G>, pipeline: &mut P) -> Result<FrameStats, FrameError>
    where
        G: Globe<Geometry = T>,
        P: RenderPipeline<G>,
    {
        let source = self.source;
        let mut frame = FrameScope {
            dc,
            pipeline,
            state: &mut self.state,
        };

        initialize_frame(frame.dc, frame.pipeline)?;
        apply_view(frame.dc);
        create_pick_frustum(frame.dc);
        create_terrain(source, frame.state, frame.dc)?;

        let mut stats = FrameStats {
            frame_index: frame.dc.frame_index,
            populated: frame.state.populated(),
            ..FrameStats::default()
        };

        stats.prepared = run_pass(PassStage::Prepare, frame.state, frame.dc, frame.pipeline)?;
        frame.pipeline.clear(frame.dc).map_err(FrameError::Clear)?;
        stats.picked = run_pass(PassStage::Pick, frame.state, frame.dc, frame.pipeline)?;
        frame.pipeline.clear(frame.dc).map_err(FrameError::Clear)?;
        stats.drawn = run_pass(PassStage::Draw, frame.state, frame.dc, frame.pipeline)?;

        debug!(
            frame = stats.frame_index,
            populated = ?stats.populated,
            drawn = stats.drawn,
            "Frame composed"
        );
        Ok(stats)
    }

    pub fn initialize_frame<G, P>(&mut self, dc: &mut DrawContext<G>, pipeline: &mut P) -> Result<(), FrameError>
    where
        G: Globe<Geometry = T>,
        P: RenderPipeline<G>,
    {
        self.state.clear();
        initialize_frame(dc, pipeline)
    }

    pub fn apply_view<G: Globe>(&self, dc: &mut DrawContext<G>) {
        apply_view(dc);
    }

    pub fn create_pick_frustum<G: Globe>(&self, dc: &mut DrawContext<G>) {
        create_pick_frustum(dc);
    }

    /// Builds terrain for every offset the source yields. Returns the number
    /// of populated slots.
    pub fn create_terrain<G: Globe<Geometry = T>>(&mut self, dc: &mut DrawContext<G>) -> Result<usize, FrameError> {
        create_terrain(self.source, &mut self.state, dc)?;
        Ok(self.state.populated().len())
    }

    pub fn pre_render<G, P>(&self, dc: &mut DrawContext<G>, pipeline: &mut P) -> Result<usize, FrameError>
    where
        G: Globe<Geometry = T>,
        P: RenderPipeline<G>,
    {
        run_pass(PassStage::Prepare, &self.state, dc, pipeline)
    }

    pub fn pick<G, P>(&self, dc: &mut DrawContext<G>, pipeline: &mut P) -> Result<usize, FrameError>
    where
        G: Globe<Geometry = T>,
        P: RenderPipeline<G>,
    {
        run_pass(PassStage::Pick, &self.state, dc, pipeline)
    }

    pub fn draw<G, P>(&self, dc: &mut DrawContext<G>, pipeline: &mut P) -> Result<usize, FrameError>
    where
        G: Globe<Geometry = T>,
        P: RenderPipeline<G>,
    {
        run_pass(PassStage::Draw, &self.state, dc, pipeline)
    }

    /// Ends a frame driven step by step.
    pub fn finalize_frame<G, P>(&mut self, dc: &mut DrawContext<G>, pipeline: &mut P)
    where
        G: Globe<Geometry = T>,
        P: RenderPipeline<G>,
    {
        finalize_frame(&mut self.state, dc, pipeline);
    }
}

/// Borrows everything a repaint touches and finalizes the frame when dropped.
struct FrameScope<'a, G: Globe, P: RenderPipeline<G>> {
    dc: &'a mut DrawContext<G>,
    pipeline: &'a mut P,
    state: &'a mut FrameState<G::Geometry>,
}

impl<G: Globe, P: RenderPipeline<G>> Drop for FrameScope<'_, G, P> {
    fn drop(&mut self) {
        finalize_frame(self.state, self.dc, self.pipeline);
    }
}

fn initialize_frame<G: Globe, P: RenderPipeline<G>>(dc: &mut DrawContext<G>, pipeline: &mut P) -> Result<(), FrameError> {
    dc.frame_index += 1;
    dc.model_frustum = None;
    dc.pick_frustum = None;
    dc.picked.clear();
    pipeline.initialize_frame(dc).map_err(FrameError::Initialize)
}

fn apply_view<G>(dc: &mut DrawContext<G>) {
    dc.model_frustum = Some(dc.view.frustum_in_model_coordinates());
}

fn create_pick_frustum<G>(dc: &mut DrawContext<G>) {
    dc.pick_frustum = dc.pick_point.map(|point| dc.view.pick_frustum(point, dc.pick_size));
}

/// Every offset of the source is evaluated; visibility of one copy says
/// nothing about the others.
fn create_terrain<G: Globe>(
    source: TerrainSource,
    state: &mut FrameState<G::Geometry>,
    dc: &mut DrawContext<G>,
) -> Result<(), FrameError> {
    state.clear();
    let frustum = match &dc.model_frustum {
        Some(frustum) => frustum.clone(),
        None => dc.view.frustum_in_model_coordinates(),
    };

    for &offset in source.offsets() {
        dc.globe.set_offset(offset);
        if source.culls() && !dc.globe.intersects(&frustum) {
            debug!(%offset, "Globe copy outside view");
            continue;
        }
        let tessellation = dc
            .globe
            .tessellate(&dc.view)
            .map_err(|source| FrameError::Tessellation { offset, source })?;
        debug!(%offset, sector = ?tessellation.sector, "Terrain tessellated");
        state.set(offset, Some(tessellation));
    }
    Ok(())
}

/// Calls one pipeline stage for each populated offset, in evaluation order,
/// with the globe switched to that offset first.
fn run_pass<G: Globe, P: RenderPipeline<G>>(
    stage: PassStage,
    state: &FrameState<G::Geometry>,
    dc: &mut DrawContext<G>,
    pipeline: &mut P,
) -> Result<usize, FrameError> {
    let mut invoked = 0;
    for offset in Offset::ORDER {
        let Some(tessellation) = state.get(offset) else {
            continue;
        };
        dc.globe.set_offset(offset);
        let pass = PassContext {
            geometry: &tessellation.geometry,
            sector: tessellation.sector,
            offset,
        };
        trace!(%stage, %offset, "Render pass");
        let result = match stage {
            PassStage::Prepare => pipeline.prepare(dc, &pass),
            PassStage::Pick => pipeline.pick(dc, &pass),
            PassStage::Draw => pipeline.draw(dc, &pass),
        };
        result.map_err(|source| FrameError::Pass { stage, offset, source })?;
        invoked += 1;
    }
    Ok(invoked)
}

fn finalize_frame<G: Globe, P: RenderPipeline<G>>(
    state: &mut FrameState<G::Geometry>,
    dc: &mut DrawContext<G>,
    pipeline: &mut P,
) {
    pipeline.finalize_frame(dc);
    dc.globe.set_offset(Offset::Center);
    state.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use globe_math::Region;

    fn tess(tag: &'static str) -> Tessellation<&'static str> {
        Tessellation {
            geometry: tag,
            sector: Region::FULL_SPHERE,
        }
    }

    #[test]
    fn test_source_offsets() {
        assert_eq!(TerrainSource::Single.offsets(), &[Offset::Center]);
        assert_eq!(TerrainSource::TriOffset.offsets(), &Offset::ORDER);
        assert!(!TerrainSource::Single.culls());
    }

    #[test]
    fn test_state_slots_by_offset() {
        let mut state = FrameState::new();
        assert!(state.is_empty());
        state.set(Offset::Left, Some(tess("left")));
        state.set(Offset::Center, Some(tess("center")));
        assert_eq!(state.get(Offset::Left).unwrap().geometry, "left");
        assert!(state.get(Offset::Right).is_none());
        assert_eq!(state.populated(), vec![Offset::Center, Offset::Left]);

        state.clear();
        assert!(state.is_empty());
    }
}
