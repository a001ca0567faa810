//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use globe_math::{Angle, Region};
use globe_projection::{
    DEFAULT_MERCATOR_LATITUDE_LIMIT, Ellipsoid, Mercator, Pole, Projection, ProjectionKind,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Globe shape and map projection.
    pub globe: GlobeConfig,
    /// Camera and frame loop.
    pub view: ViewConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Globe and projection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Draw the globe as a flat map. A round globe only ever has one copy.
    pub flat: bool,
    pub projection: ProjectionKind,
    /// Required by the polar projections.
    pub pole: Option<Pole>,
    /// Required by transverse Mercator.
    pub central_meridian_deg: Option<f64>,
    pub central_latitude_deg: Option<f64>,
    /// Half-width of the transverse Mercator band.
    pub tm_width_deg: Option<f64>,
    /// Mercator latitude cutoff, applied symmetrically.
    pub mercator_max_latitude_deg: f64,
    pub ellipsoid: EllipsoidConfig,
    /// Terrain elevation bounds used for culling.
    pub min_elevation_m: f64,
    pub max_elevation_m: f64,
}

/// Reference ellipsoid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EllipsoidConfig {
    pub equatorial_radius_m: f64,
    pub eccentricity_squared: f64,
}

/// Camera and frame-loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub width_px: u32,
    pub height_px: u32,
    /// Geographic point under the centre of the screen at the first frame.
    pub center_latitude_deg: f64,
    pub center_longitude_deg: f64,
    /// Visible width of the map, in degrees of longitude at the equator.
    pub span_deg: f64,
    pub altitude_m: f64,
    /// Eastward camera motion per frame.
    pub pan_deg_per_frame: f64,
    /// Number of frames the viewer renders before exiting.
    pub frames: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file next to the config in debug builds.
    pub json_log: bool,
}

// --- Default implementations ---

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            flat: true,
            projection: ProjectionKind::Equirectangular,
            pole: None,
            central_meridian_deg: None,
            central_latitude_deg: None,
            tm_width_deg: None,
            mercator_max_latitude_deg: DEFAULT_MERCATOR_LATITUDE_LIMIT,
            ellipsoid: EllipsoidConfig::default(),
            min_elevation_m: -11_000.0,
            max_elevation_m: 8_850.0,
        }
    }
}

impl Default for EllipsoidConfig {
    fn default() -> Self {
        Self {
            equatorial_radius_m: Ellipsoid::WGS84.equatorial_radius(),
            eccentricity_squared: Ellipsoid::WGS84.eccentricity_squared(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width_px: 1280,
            height_px: 720,
            center_latitude_deg: 0.0,
            center_longitude_deg: 160.0,
            span_deg: 60.0,
            altitude_m: 100_000.0,
            pan_deg_per_frame: 10.0,
            frames: 8,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_log: true,
        }
    }
}

// --- Runtime types ---

impl GlobeConfig {
    /// Builds the configured projection.
    ///
    /// Fails when a parameter the projection requires is missing or out of
    /// range; nothing is silently defaulted.
    pub fn build_projection(&self) -> Result<Projection, ConfigError> {
        if self.projection == ProjectionKind::Mercator {
            let limit = self.mercator_max_latitude_deg;
            let limits = Region::from_degrees(-limit, limit, -180.0, 180.0);
            return Ok(Projection::Mercator(Mercator::with_limits(limits)?));
        }

        let projection = Projection::build(
            self.projection,
            self.pole,
            self.central_meridian_deg.map(Angle::from_degrees),
            self.central_latitude_deg.map(Angle::from_degrees),
            self.tm_width_deg.map(Angle::from_degrees),
        )?;
        Ok(projection)
    }

    pub fn build_ellipsoid(&self) -> Result<Ellipsoid, ConfigError> {
        Ok(Ellipsoid::new(
            self.ellipsoid.equatorial_radius_m,
            self.ellipsoid.eccentricity_squared,
        )?)
    }
}

impl Config {
    /// Clamps view settings the viewer cannot work with. Returns true if
    /// anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        let view = &mut self.view;

        if view.width_px == 0 || view.height_px == 0 {
            log::warn!(
                "Viewport {}x{} is empty, using 1x1 minimum",
                view.width_px,
                view.height_px
            );
            view.width_px = view.width_px.max(1);
            view.height_px = view.height_px.max(1);
            changed = true;
        }
        if view.span_deg.is_nan() || view.span_deg <= 0.0 || view.span_deg > 360.0 {
            log::warn!("View span {} deg out of range, clamping to (0, 360]", view.span_deg);
            view.span_deg = if view.span_deg.is_nan() {
                ViewConfig::default().span_deg
            } else {
                view.span_deg.clamp(1e-6, 360.0)
            };
            changed = true;
        }
        if view.altitude_m.is_nan() || view.altitude_m <= 0.0 {
            log::warn!("View altitude {} m is not positive, using default", view.altitude_m);
            view.altitude_m = ViewConfig::default().altitude_m;
            changed = true;
        }

        let globe = &mut self.globe;
        if globe.min_elevation_m > globe.max_elevation_m {
            log::warn!(
                "Elevation range [{}, {}] is inverted, swapping",
                globe.min_elevation_m,
                globe.max_elevation_m
            );
            std::mem::swap(&mut globe.min_elevation_m, &mut globe.max_elevation_m);
            changed = true;
        }
        changed
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Returns `Some(new_config)` if the file on disk differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents =
            std::fs::read_to_string(config_dir.join(CONFIG_FILE)).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
