//! Sinusoidal and modified sinusoidal pseudo-cylindrical projections.
//!
//! Both scale longitude by a power of `cos(latitude)`; the plain form uses
//! exponent 1, the modified form 0.3, which widens the high latitudes.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;
use globe_math::{Angle, Position, Region};

use crate::{Ellipsoid, MapProjection};

const MODIFIED_EXPONENT: f64 = 0.3;

/// Equal-area sinusoidal projection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sinusoidal;

/// Sinusoidal variant with `cos(latitude)^0.3` longitude scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModifiedSinusoidal;

/// Shared forward transform: `x = R·λ·cos(φ)^k`, `y = R·φ`.
fn forward(ellipsoid: &Ellipsoid, latitude: Angle, longitude: Angle, elevation: f64, offset: DVec3, k: f64) -> DVec3 {
    let r = ellipsoid.equatorial_radius();
    let lat_cos = latitude.cos();
    let x = if lat_cos > 0.0 {
        r * longitude.radians() * lat_cos.powf(k)
    } else {
        0.0
    };
    DVec3::new(x + offset.x, r * latitude.radians(), elevation)
}

/// Shared inverse, clamping recovered latitude to `±π/2` and longitude to `±π`.
fn inverse(ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3, k: f64) -> Position {
    let r = ellipsoid.equatorial_radius();
    let lat = (point.y / r).clamp(-FRAC_PI_2, FRAC_PI_2);
    let lat_cos = lat.cos();
    let lon = if lat_cos > 0.0 {
        ((point.x - offset.x) / r / lat_cos.powf(k)).clamp(-PI, PI)
    } else {
        0.0
    };
    Position::from_radians(lat, lon, point.z)
}

impl MapProjection for Sinusoidal {
    fn name(&self) -> &'static str {
        "Sinusoidal"
    }

    fn is_continuous(&self) -> bool {
        false
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
        forward(ellipsoid, latitude, longitude, elevation, offset, 1.0)
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        inverse(ellipsoid, point, offset, 1.0)
    }

    /// Partial derivative of the forward transform with respect to latitude.
    fn north_pointing_tangent(&self, ellipsoid: &Ellipsoid, latitude: Angle, longitude: Angle) -> DVec3 {
        let r = ellipsoid.equatorial_radius();
        DVec3::new(-r * longitude.radians() * latitude.sin(), r, 0.0).normalize()
    }
}

impl MapProjection for ModifiedSinusoidal {
    fn name(&self) -> &'static str {
        "Modified Sinusoidal"
    }

    fn is_continuous(&self) -> bool {
        false
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
        forward(ellipsoid, latitude, longitude, elevation, offset, MODIFIED_EXPONENT)
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        inverse(ellipsoid, point, offset, MODIFIED_EXPONENT)
    }

    /// d/dφ of `R·λ·cos(φ)^0.3` is `-0.3·R·λ·sin(φ)·cos(φ)^-0.7`.
    fn north_pointing_tangent(&self, ellipsoid: &Ellipsoid, latitude: Angle, longitude: Angle) -> DVec3 {
        let lat_cos = latitude.cos();
        if lat_cos <= 0.0 {
            return DVec3::Y;
        }
        let r = ellipsoid.equatorial_radius();
        let dx = -MODIFIED_EXPONENT * r * longitude.radians() * latitude.sin()
            * lat_cos.powf(MODIFIED_EXPONENT - 1.0);
        DVec3::new(dx, r, 0.0).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(d: f64) -> Angle {
        Angle::from_degrees(d)
    }

    #[test]
    fn test_sinusoidal_narrows_toward_poles() {
        let e = Ellipsoid::WGS84;
        let eq = Sinusoidal.geographic_to_cartesian(&e, deg(0.0), deg(90.0), 0.0, DVec3::ZERO);
        let mid = Sinusoidal.geographic_to_cartesian(&e, deg(60.0), deg(90.0), 0.0, DVec3::ZERO);
        assert!((mid.x - eq.x * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pole_collapses_to_meridian() {
        let e = Ellipsoid::WGS84;
        let p = Sinusoidal.geographic_to_cartesian(&e, deg(90.0), deg(120.0), 0.0, DVec3::ZERO);
        assert!(p.x.abs() < 1e-3, "x = {}", p.x);
        let back = Sinusoidal.cartesian_to_geographic(&e, DVec3::new(0.0, p.y, 0.0), DVec3::ZERO);
        assert!((back.latitude.degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_clamps_outside_outline() {
        let e = Ellipsoid::WGS84;
        let r = e.equatorial_radius();
        // Far east of the outline at 60N: the recovered longitude would exceed pi.
        let p = DVec3::new(3.0 * r, 60.0_f64.to_radians() * r, 0.0);
        let back = Sinusoidal.cartesian_to_geographic(&e, p, DVec3::ZERO);
        assert_eq!(back.longitude.radians(), PI);
        // North of the pole: latitude clamps to pi/2.
        let above = Sinusoidal.cartesian_to_geographic(&e, DVec3::new(0.0, 2.0 * r, 0.0), DVec3::ZERO);
        assert_eq!(above.latitude.radians(), FRAC_PI_2);
    }

    #[test]
    fn test_modified_is_wider_than_plain() {
        let e = Ellipsoid::WGS84;
        let plain = Sinusoidal.geographic_to_cartesian(&e, deg(70.0), deg(100.0), 0.0, DVec3::ZERO);
        let modified = ModifiedSinusoidal.geographic_to_cartesian(&e, deg(70.0), deg(100.0), 0.0, DVec3::ZERO);
        assert!(modified.x > plain.x);
        assert_eq!(modified.y, plain.y);
    }

    #[test]
    fn test_modified_tangent_matches_finite_difference() {
        let e = Ellipsoid::WGS84;
        let (lat, lon) = (deg(40.0), deg(-120.0));
        let h = 1e-6;
        let p0 = ModifiedSinusoidal.geographic_to_cartesian(&e, lat, lon, 0.0, DVec3::ZERO);
        let p1 = ModifiedSinusoidal.geographic_to_cartesian(&e, Angle::from_radians(lat.radians() + h), lon, 0.0, DVec3::ZERO);
        let numeric = (p1 - p0).normalize();
        let analytic = ModifiedSinusoidal.north_pointing_tangent(&e, lat, lon);
        assert!((numeric - analytic).length() < 1e-5, "{numeric:?} vs {analytic:?}");
    }

    #[test]
    fn test_tangent_on_central_meridian_points_north() {
        let t = Sinusoidal.north_pointing_tangent(&Ellipsoid::WGS84, deg(45.0), deg(0.0));
        assert!((t - DVec3::Y).length() < 1e-12);
    }
}
