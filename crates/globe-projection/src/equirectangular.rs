use glam::DVec3;
use globe_math::{Angle, Position, Region};

use crate::{Ellipsoid, MapProjection};

/// Plate carrée: longitude and latitude scaled linearly by the equatorial radius.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Equirectangular;

impl MapProjection for Equirectangular {
    fn name(&self) -> &'static str {
        "Equirectangular"
    }

    fn is_continuous(&self) -> bool {
        true
    }

    fn limits(&self) -> Region {
        Region::FULL_SPHERE
    }

    fn geographic_to_cartesian(
        &self,
        ellipsoid: &Ellipsoid,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
        offset: DVec3,
    ) -> DVec3 {
        let r = ellipsoid.equatorial_radius();
        DVec3::new(r * longitude.radians() + offset.x, r * latitude.radians(), elevation)
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        let r = ellipsoid.equatorial_radius();
        Position::from_radians(point.y / r, (point.x - offset.x) / r, point.z)
    }

    fn north_pointing_tangent(&self, _: &Ellipsoid, _: Angle, _: Angle) -> DVec3 {
        DVec3::Y
    }
}
