use glam::DVec3;
use globe_math::{Angle, Position, Region};

use crate::conformal::geodetic_from_conformal;
use crate::{Ellipsoid, MapProjection, ProjectionError};

/// Default latitude limit, in degrees, beyond which input is clamped.
pub const DEFAULT_MERCATOR_LATITUDE_LIMIT: f64 = 78.0;

/// Ellipsoidal Mercator with configurable projection limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mercator {
    limits: Region,
}

impl Mercator {
    /// Mercator clamped to `±78°` latitude over the full longitude range.
    pub fn new() -> Self {
        Self {
            limits: Region::from_degrees(
                -DEFAULT_MERCATOR_LATITUDE_LIMIT,
                DEFAULT_MERCATOR_LATITUDE_LIMIT,
                -180.0,
                180.0,
            ),
        }
    }

    /// Mercator clamped to custom limits.
    ///
    /// The poles project to infinity, so the latitude range must stay strictly
    /// inside `(-90°, 90°)`.
    pub fn with_limits(limits: Region) -> Result<Self, ProjectionError> {
        for lat in [limits.min_latitude, limits.max_latitude] {
            if !lat.is_finite() || lat.radians().abs() >= Angle::POS90.radians() {
                return Err(ProjectionError::InvalidParameter {
                    parameter: "mercator latitude limit",
                    value: lat.degrees(),
                    reason: "must lie strictly between -90 and 90 degrees",
                });
            }
        }
        for lon in [limits.min_longitude, limits.max_longitude] {
            if !lon.is_finite() || lon.radians().abs() > Angle::POS180.radians() {
                return Err(ProjectionError::InvalidParameter {
                    parameter: "mercator longitude limit",
                    value: lon.degrees(),
                    reason: "must lie within -180 and 180 degrees",
                });
            }
        }
        Ok(Self { limits })
    }
}

impl Default for Mercator {
    fn default() -> Self {
        Self::new()
    }
}

impl MapProjection for Mercator {
    fn name(&self) -> &'static str {
        "Mercator"
    }

    fn is_continuous(&self) -> bool {
        true
    }

    fn limits(&self) -> Region {
        self.limits
    }

    fn geographic_to_cartesian(
        &self,
        ellipsoid: &Ellipsoid,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
        offset: DVec3,
    ) -> DVec3 {
        let (latitude, longitude) = self.limits.clamp(latitude, longitude);

        let r = ellipsoid.equatorial_radius();
        let ecc = ellipsoid.eccentricity();
        let sin_phi = latitude.sin();

        let s = ((1.0 + sin_phi) / (1.0 - sin_phi))
            * ((1.0 - ecc * sin_phi) / (1.0 + ecc * sin_phi)).powf(ecc);

        DVec3::new(
            r * longitude.radians() + offset.x,
            0.5 * r * s.ln(),
            elevation,
        )
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        let r = ellipsoid.equatorial_radius();
        let t = (-point.y / r).exp();
        let chi = std::f64::consts::FRAC_PI_2 - 2.0 * t.atan();
        let lat = geodetic_from_conformal(chi, ellipsoid.eccentricity_squared());
        Position::from_radians(lat, (point.x - offset.x) / r, point.z)
    }

    fn north_pointing_tangent(&self, _: &Ellipsoid, _: Angle, _: Angle) -> DVec3 {
        DVec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equator_maps_to_zero_northing() {
        let p = Mercator::new().geographic_to_cartesian(
            &Ellipsoid::WGS84,
            Angle::ZERO,
            Angle::from_degrees(90.0),
            0.0,
            DVec3::ZERO,
        );
        assert!(p.y.abs() < 1e-6);
        assert!((p.x - Ellipsoid::WGS84.equatorial_radius() * std::f64::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_latitude_clamped_to_limits() {
        let m = Mercator::new();
        let e = Ellipsoid::WGS84;
        let at_limit = m.geographic_to_cartesian(&e, Angle::from_degrees(78.0), Angle::ZERO, 0.0, DVec3::ZERO);
        let beyond = m.geographic_to_cartesian(&e, Angle::from_degrees(89.9), Angle::ZERO, 0.0, DVec3::ZERO);
        assert_eq!(at_limit, beyond);
        let south = m.geographic_to_cartesian(&e, Angle::from_degrees(-90.0), Angle::ZERO, 0.0, DVec3::ZERO);
        assert!((south.y + at_limit.y).abs() < 1e-6);
    }

    #[test]
    fn test_known_northing() {
        // WGS84 Mercator northing at 45 degrees north.
        let p = Mercator::new().geographic_to_cartesian(
            &Ellipsoid::WGS84,
            Angle::from_degrees(45.0),
            Angle::ZERO,
            0.0,
            DVec3::ZERO,
        );
        assert!((p.y - 5_591_295.918_553_4).abs() < 1e-3, "y = {}", p.y);
    }

    #[test]
    fn test_with_limits_rejects_pole() {
        assert!(Mercator::with_limits(Region::from_degrees(-85.0, 90.0, -180.0, 180.0)).is_err());
        assert!(Mercator::with_limits(Region::from_degrees(-85.0, 85.0, -190.0, 180.0)).is_err());
        let m = Mercator::with_limits(Region::from_degrees(-85.0, 85.0, -180.0, 180.0)).unwrap();
        assert!((m.limits().max_latitude.degrees() - 85.0).abs() < 1e-12);
    }
}
