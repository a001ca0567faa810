use crate::{BoxError, DrawContext, Globe, PassContext};

/// The stages of a frame the composer delegates to the renderer.
///
/// `prepare`, `pick` and `draw` are called once per populated world copy,
/// with the globe already set to that copy's offset. `finalize_frame` is
/// called exactly once per repaint, including when a stage fails or panics.
pub trait RenderPipeline<G: Globe> {
    fn initialize_frame(&mut self, _dc: &mut DrawContext<G>) -> Result<(), BoxError> {
        Ok(())
    }

    fn prepare(&mut self, dc: &mut DrawContext<G>, pass: &PassContext<'_, G::Geometry>) -> Result<(), BoxError>;

    fn pick(&mut self, dc: &mut DrawContext<G>, pass: &PassContext<'_, G::Geometry>) -> Result<(), BoxError>;

    fn draw(&mut self, dc: &mut DrawContext<G>, pass: &PassContext<'_, G::Geometry>) -> Result<(), BoxError>;

    /// Clears the screen between the pick and draw passes.
    fn clear(&mut self, _dc: &mut DrawContext<G>) -> Result<(), BoxError> {
        Ok(())
    }

    fn finalize_frame(&mut self, _dc: &mut DrawContext<G>) {}
}
