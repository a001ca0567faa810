//! The globe seam: what the frame composer needs from a globe, and a flat
//! globe that satisfies it by projecting the ellipsoid onto a plane.

use std::f64::consts::PI;

use glam::{DVec2, DVec3};
use globe_math::{Aabb, Angle, Frustum, Position, Region};
use globe_projection::{Ellipsoid, MapProjection, Projection};

use crate::{BoxError, Offset, View};

/// Samples per edge when bounding the projected limits.
const BOUNDARY_SAMPLES: usize = 32;

/// Samples per screen axis when estimating the visible sector.
const SCREEN_SAMPLES: usize = 9;

/// Lowest and highest terrain on Earth, in meters.
const DEFAULT_ELEVATION_RANGE: (f64, f64) = (-11_000.0, 8_850.0);

/// Terrain geometry for one offset, plus the geographic sector it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tessellation<T> {
    pub geometry: T,
    pub sector: Region,
}

/// The globe as seen by the frame composer.
pub trait Globe {
    type Geometry;

    fn offset(&self) -> Offset;

    /// Selects which horizontal copy of the world subsequent calls address.
    fn set_offset(&mut self, offset: Offset);

    /// Whether the world copy at the current offset can be seen through `frustum`.
    fn intersects(&self, frustum: &Frustum) -> bool;

    /// Produces terrain for the current offset.
    fn tessellate(&mut self, view: &View) -> Result<Tessellation<Self::Geometry>, BoxError>;
}

/// Turns a globe model and a view into terrain geometry.
pub trait Tessellator {
    type Geometry;

    fn tessellate(&mut self, model: &GlobeModel, view: &View) -> Result<Tessellation<Self::Geometry>, BoxError>;
}

/// Shape and placement of a flat globe: ellipsoid, projection and active offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeModel {
    pub ellipsoid: Ellipsoid,
    pub projection: Projection,
    pub offset: Offset,
    /// Terrain elevation bounds in meters, used for the z extent.
    pub elevation_range: (f64, f64),
}

impl GlobeModel {
    pub fn new(ellipsoid: Ellipsoid, projection: Projection) -> Self {
        Self {
            ellipsoid,
            projection,
            offset: Offset::Center,
            elevation_range: DEFAULT_ELEVATION_RANGE,
        }
    }

    /// Horizontal width of one copy of the world.
    pub fn world_width(&self) -> f64 {
        2.0 * PI * self.ellipsoid.equatorial_radius()
    }

    /// Translation applied to the current copy of the world.
    pub fn offset_vector(&self) -> DVec3 {
        DVec3::new(self.world_width() * self.offset.as_i32() as f64, 0.0, 0.0)
    }

    pub fn geographic_to_cartesian(&self, latitude: Angle, longitude: Angle, elevation: f64) -> DVec3 {
        self.projection
            .geographic_to_cartesian(&self.ellipsoid, latitude, longitude, elevation, self.offset_vector())
    }

    pub fn cartesian_to_geographic(&self, point: DVec3) -> Position {
        self.projection
            .cartesian_to_geographic(&self.ellipsoid, point, self.offset_vector())
    }

    /// Bounding box of the projected limits at the current offset.
    ///
    /// The limit boundary is sampled rather than only its corners, since
    /// curved projections bulge between them.
    pub fn extent(&self) -> Aabb {
        let limits = self.projection.limits();
        let (low, high) = self.elevation_range;
        let lat = |t: f64| limits.min_latitude + limits.delta_lat() * t;
        let lon = |t: f64| limits.min_longitude + limits.delta_lon() * t;

        let mut points = Vec::with_capacity(8 * (BOUNDARY_SAMPLES + 1));
        for i in 0..=BOUNDARY_SAMPLES {
            let t = i as f64 / BOUNDARY_SAMPLES as f64;
            for (la, lo) in [
                (limits.min_latitude, lon(t)),
                (limits.max_latitude, lon(t)),
                (lat(t), limits.min_longitude),
                (lat(t), limits.max_longitude),
            ] {
                points.push(self.geographic_to_cartesian(la, lo, low));
                points.push(self.geographic_to_cartesian(la, lo, high));
            }
        }

        let origin = self.offset_vector();
        Aabb::from_points(points).unwrap_or_else(|| Aabb::new(origin, origin))
    }

    /// Geographic sector under the view at the current offset, clipped to the
    /// projection limits. `None` if no part of the screen reaches the map plane
    /// or the visible area lies outside the limits.
    pub fn visible_sector(&self, view: &View) -> Option<Region> {
        let mut bounds: Option<Region> = None;
        for i in 0..SCREEN_SAMPLES {
            for j in 0..SCREEN_SAMPLES {
                let ndc = DVec2::new(
                    -1.0 + 2.0 * i as f64 / (SCREEN_SAMPLES - 1) as f64,
                    -1.0 + 2.0 * j as f64 / (SCREEN_SAMPLES - 1) as f64,
                );
                let Some(point) = view.unproject_to_plane(ndc) else {
                    continue;
                };
                let pos = self.cartesian_to_geographic(point);
                let cell = Region::new(pos.latitude, pos.latitude, pos.longitude, pos.longitude);
                bounds = Some(match bounds {
                    Some(b) => b.union(&cell),
                    None => cell,
                });
            }
        }
        bounds?.intersection(&self.projection.limits())
    }
}

/// A globe rendered as a flat map. Terrain comes from the wrapped tessellator.
#[derive(Debug)]
pub struct FlatGlobe<T> {
    model: GlobeModel,
    tessellator: T,
}

impl<T: Tessellator> FlatGlobe<T> {
    pub fn new(ellipsoid: Ellipsoid, projection: Projection, tessellator: T) -> Self {
        Self {
            model: GlobeModel::new(ellipsoid, projection),
            tessellator,
        }
    }

    pub fn with_elevation_range(mut self, low: f64, high: f64) -> Self {
        self.model.elevation_range = (low.min(high), low.max(high));
        self
    }

    pub fn model(&self) -> &GlobeModel {
        &self.model
    }

    pub fn projection(&self) -> &Projection {
        &self.model.projection
    }

    pub fn tessellator(&self) -> &T {
        &self.tessellator
    }
}

impl<T: Tessellator> Globe for FlatGlobe<T> {
    type Geometry = T::Geometry;

    fn offset(&self) -> Offset {
        self.model.offset
    }

    fn set_offset(&mut self, offset: Offset) {
        self.model.offset = offset;
    }

    fn intersects(&self, frustum: &Frustum) -> bool {
        // A seamed map has exactly one copy.
        if self.model.offset != Offset::Center && !self.model.projection.is_continuous() {
            return false;
        }
        frustum.intersects_aabb(&self.model.extent())
    }

    fn tessellate(&mut self, view: &View) -> Result<Tessellation<Self::Geometry>, BoxError> {
        self.tessellator.tessellate(&self.model, view)
    }
}
