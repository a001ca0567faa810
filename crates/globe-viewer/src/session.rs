//! Headless viewer session: one globe, one composer, a camera panning east.

use glam::DVec2;
use globe_config::{Config, ConfigError, ViewConfig};
use globe_frame::{DrawContext, FlatGlobe, FrameComposer, FrameError, FrameStats, GlobeModel, Offset, TerrainSource, View};
use globe_math::Angle;
use globe_projection::MapProjection;
use tracing::info;

use crate::grid::{GridMesh, GridTessellator};
use crate::pipeline::{TracingPipeline, ViewerGlobe};

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Top-down camera over the flat map.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub latitude_deg: f64,
    /// Unbounded; on a continuous projection each full turn east moves the
    /// camera one world copy right.
    pub longitude_deg: f64,
    pub span_deg: f64,
    pub altitude_m: f64,
    pub pan_deg_per_frame: f64,
    pub viewport: DVec2,
}

impl From<&ViewConfig> for Camera {
    fn from(view: &ViewConfig) -> Self {
        Self {
            latitude_deg: view.center_latitude_deg,
            longitude_deg: view.center_longitude_deg,
            span_deg: view.span_deg,
            altitude_m: view.altitude_m,
            pan_deg_per_frame: view.pan_deg_per_frame,
            viewport: DVec2::new(view.width_px as f64, view.height_px as f64),
        }
    }
}

impl Camera {
    pub fn view(&self, model: &GlobeModel) -> View {
        // Only continuous projections have copies to move into; seamed ones
        // wrap back onto the centre copy.
        let longitude = Angle::from_degrees(self.longitude_deg).normalized_longitude();
        let turns = if model.projection.is_continuous() {
            ((self.longitude_deg - longitude.degrees()) / 360.0).round()
        } else {
            0.0
        };

        let centre_copy = GlobeModel {
            offset: Offset::Center,
            ..*model
        };
        let target = centre_copy.geographic_to_cartesian(
            Angle::from_degrees(self.latitude_deg),
            longitude,
            0.0,
        );

        let half_width = model.world_width() * self.span_deg / 720.0;
        let half_height = half_width * self.viewport.y / self.viewport.x;
        View::top_down(
            DVec2::new(target.x + turns * model.world_width(), target.y),
            DVec2::new(half_width, half_height),
            self.altitude_m,
            self.viewport,
        )
    }

    pub fn pan(&mut self) {
        self.longitude_deg += self.pan_deg_per_frame;
    }
}

/// Everything needed to render frames from a [`Config`].
pub struct Viewer {
    composer: FrameComposer<GridMesh>,
    dc: DrawContext<ViewerGlobe>,
    pipeline: TracingPipeline,
    camera: Camera,
}

impl Viewer {
    pub fn from_config(config: &Config) -> Result<Self, ViewerError> {
        let ellipsoid = config.globe.build_ellipsoid()?;
        let projection = config.globe.build_projection()?;
        let globe = FlatGlobe::new(ellipsoid, projection, GridTessellator::default())
            .with_elevation_range(config.globe.min_elevation_m, config.globe.max_elevation_m);

        let source = if config.globe.flat {
            TerrainSource::TriOffset
        } else {
            TerrainSource::Single
        };
        let camera = Camera::from(&config.view);
        let view = camera.view(globe.model());

        let mut dc = DrawContext::new(globe, view);
        dc.pick_point = Some(camera.viewport / 2.0);

        info!(
            projection = projection.name(),
            continuous = projection.is_continuous(),
            ?source,
            "Viewer ready"
        );
        Ok(Self {
            composer: FrameComposer::new(source),
            dc,
            pipeline: TracingPipeline::new(),
            camera,
        })
    }

    /// Renders one frame, then pans the camera.
    pub fn frame(&mut self) -> Result<FrameStats, ViewerError> {
        let view = self.camera.view(self.dc.globe.model());
        self.dc.set_view(view);
        let stats = self.composer.repaint(&mut self.dc, &mut self.pipeline)?;
        self.camera.pan();
        Ok(stats)
    }

    pub fn run(&mut self, frames: u32) -> Result<Vec<FrameStats>, ViewerError> {
        (0..frames).map(|_| self.frame()).collect()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pipeline(&self) -> &TracingPipeline {
        &self.pipeline
    }

    pub fn context(&self) -> &DrawContext<ViewerGlobe> {
        &self.dc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globe_projection::{Ellipsoid, Projection, Sinusoidal};

    fn equirectangular() -> GlobeModel {
        GlobeModel::new(Ellipsoid::WGS84, Projection::default())
    }

    #[test]
    fn test_camera_wraps_into_next_copy() {
        let model = equirectangular();
        let r = model.ellipsoid.equatorial_radius();
        let mut camera = Camera::from(&ViewConfig::default());
        camera.longitude_deg = 190.0;

        let eye = camera.view(&model).eye();
        assert!((eye.x - r * 190f64.to_radians()).abs() < 1e-3);
    }

    #[test]
    fn test_camera_stays_on_centre_copy_when_seamed() {
        let model = GlobeModel::new(Ellipsoid::WGS84, Projection::Sinusoidal(Sinusoidal));
        let mut camera = Camera::from(&ViewConfig::default());
        camera.latitude_deg = 0.0;
        camera.longitude_deg = 190.0;
        let wrapped = camera.view(&model).eye();

        camera.longitude_deg = -170.0;
        let direct = camera.view(&model).eye();
        assert!((wrapped.x - direct.x).abs() < 1e-6);
        assert!(wrapped.x < 0.0);
    }

    #[test]
    fn test_camera_span() {
        let model = equirectangular();
        let camera = Camera::from(&ViewConfig::default());
        let view = camera.view(&model);
        let edge = view.unproject_to_plane(DVec2::new(1.0, 0.0)).unwrap();
        let lon = model.cartesian_to_geographic(edge).longitude.degrees();
        assert!((lon - 190.0).abs() < 1e-6);
    }
}
