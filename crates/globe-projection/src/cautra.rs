//! Regional conformal projection used for European air traffic displays.
//!
//! A double projection: geodetic latitude is first mapped onto a conformal
//! sphere, which is then projected stereographically about a fixed reference
//! point in central France.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use globe_math::{Angle, Position, Region};

use crate::conformal::{conformal_latitude, geodetic_from_conformal};
use crate::{Ellipsoid, MapProjection};

/// Latitude of the stereographic tangent point, in degrees.
const REFERENCE_LATITUDE: f64 = 47.0;
/// Longitude of the stereographic tangent point, in degrees.
const REFERENCE_LONGITUDE: f64 = 0.0;
/// Longitudes beyond this magnitude are clamped; the antipode is unbounded.
const LONGITUDE_LIMIT: f64 = 160.0;
/// Points closer than this to the origin are the reference point.
const ORIGIN_EPSILON: f64 = 1.0e-4;
/// Latitude step used to estimate the north-pointing tangent.
const TANGENT_DELTA_LAT: f64 = 1e-7;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cautra;

/// Constants of the conformal sphere for one ellipsoid.
struct ConformalSphere {
    /// Gaussian radius of curvature at the reference latitude.
    radius: f64,
    sin_chi0: f64,
    cos_chi0: f64,
    lambda0: f64,
}

impl ConformalSphere {
    fn new(ellipsoid: &Ellipsoid) -> Self {
        let e2 = ellipsoid.eccentricity_squared();
        let phi0 = REFERENCE_LATITUDE.to_radians();
        let sin_phi0 = phi0.sin();
        let radius = ellipsoid.equatorial_radius() * (1.0 - e2).sqrt() / (1.0 - e2 * sin_phi0 * sin_phi0);
        let chi0 = conformal_latitude(phi0, ellipsoid.eccentricity());
        Self {
            radius,
            sin_chi0: chi0.sin(),
            cos_chi0: chi0.cos(),
            lambda0: REFERENCE_LONGITUDE.to_radians(),
        }
    }
}

impl MapProjection for Cautra {
    fn name(&self) -> &'static str {
        "Cautra"
    }

    fn is_continuous(&self) -> bool {
        false
    }

    fn limits(&self) -> Region {
        Region::from_degrees(-90.0, 90.0, -LONGITUDE_LIMIT, LONGITUDE_LIMIT)
    }

    fn geographic_to_cartesian(
        &self,
        ellipsoid: &Ellipsoid,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
        offset: DVec3,
    ) -> DVec3 {
        // Only longitude is clamped here.
        let limit = Angle::from_degrees(LONGITUDE_LIMIT);
        let longitude = longitude.clamp(-limit, limit);

        let sphere = ConformalSphere::new(ellipsoid);
        let chi = conformal_latitude(latitude.radians(), ellipsoid.eccentricity());
        let (sin_chi, cos_chi) = chi.sin_cos();
        let dlam = longitude.radians() - sphere.lambda0;
        let cos_dlam = dlam.cos();

        let k = 2.0 / (1.0 + sphere.sin_chi0 * sin_chi + sphere.cos_chi0 * cos_chi * cos_dlam);
        let x = sphere.radius * k * cos_chi * dlam.sin();
        let y = sphere.radius * k * (sphere.cos_chi0 * sin_chi - sphere.sin_chi0 * cos_chi * cos_dlam);

        DVec3::new(x + offset.x, y, elevation)
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        let sphere = ConformalSphere::new(ellipsoid);
        let x = point.x - offset.x;
        let y = point.y;
        let rho = x.hypot(y);
        if rho < ORIGIN_EPSILON {
            return Position::from_degrees(REFERENCE_LATITUDE, REFERENCE_LONGITUDE, point.z);
        }

        // Stereographic substitution: angular distance from the reference point.
        let c = 2.0 * (rho / (2.0 * sphere.radius)).atan();
        let (sin_c, cos_c) = c.sin_cos();

        let sin_chi = (cos_c * sphere.sin_chi0 + y * sin_c * sphere.cos_chi0 / rho).clamp(-1.0, 1.0);
        let chi = sin_chi.asin();

        // Longitude quadrant follows the signs of u and v.
        let u = rho * sphere.cos_chi0 * cos_c - y * sphere.sin_chi0 * sin_c;
        let v = x * sin_c;
        let dlam = v.atan2(u);

        let lat = geodetic_from_conformal(chi, ellipsoid.eccentricity_squared()).clamp(-FRAC_PI_2, FRAC_PI_2);
        Position::from_radians(lat, sphere.lambda0 + dlam, point.z)
    }

    fn north_pointing_tangent(&self, ellipsoid: &Ellipsoid, latitude: Angle, longitude: Angle) -> DVec3 {
        let lat = latitude.radians();
        let (south, north) = if lat + TANGENT_DELTA_LAT <= FRAC_PI_2 {
            (lat, lat + TANGENT_DELTA_LAT)
        } else {
            (lat - TANGENT_DELTA_LAT, lat)
        };
        let p1 = self.geographic_to_cartesian(ellipsoid, Angle::from_radians(south), longitude, 0.0, DVec3::ZERO);
        let p2 = self.geographic_to_cartesian(ellipsoid, Angle::from_radians(north), longitude, 0.0, DVec3::ZERO);
        (p2 - p1).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(d: f64) -> Angle {
        Angle::from_degrees(d)
    }

    #[test]
    fn test_reference_point_is_origin() {
        let e = Ellipsoid::WGS84;
        let p = Cautra.geographic_to_cartesian(&e, deg(REFERENCE_LATITUDE), deg(REFERENCE_LONGITUDE), 7.0, DVec3::ZERO);
        assert!(p.truncate().length() < 1e-6, "{p:?}");
        assert_eq!(p.z, 7.0);

        let back = Cautra.cartesian_to_geographic(&e, DVec3::new(0.0, 0.0, 7.0), DVec3::ZERO);
        assert!((back.latitude.degrees() - REFERENCE_LATITUDE).abs() < 1e-12);
        assert_eq!(back.elevation, 7.0);
    }

    #[test]
    fn test_longitude_clamp_is_bit_identical() {
        let e = Ellipsoid::WGS84;
        for lat in [-60.0, 0.0, 47.0, 80.0] {
            let clamped = Cautra.geographic_to_cartesian(&e, deg(lat), deg(170.0), 100.0, DVec3::ZERO);
            let limit = Cautra.geographic_to_cartesian(&e, deg(lat), deg(160.0), 100.0, DVec3::ZERO);
            assert_eq!(clamped.to_array(), limit.to_array());

            let west = Cautra.geographic_to_cartesian(&e, deg(lat), deg(-175.0), 100.0, DVec3::ZERO);
            let west_limit = Cautra.geographic_to_cartesian(&e, deg(lat), deg(-160.0), 100.0, DVec3::ZERO);
            assert_eq!(west.to_array(), west_limit.to_array());
        }
    }

    #[test]
    fn test_quadrants_recovered() {
        let e = Ellipsoid::WGS84;
        for (lat, lon) in [(60.0, 120.0), (60.0, -120.0), (-30.0, 150.0), (-30.0, -150.0), (10.0, 5.0)] {
            let p = Cautra.geographic_to_cartesian(&e, deg(lat), deg(lon), 0.0, DVec3::ZERO);
            let back = Cautra.cartesian_to_geographic(&e, p, DVec3::ZERO);
            assert!((back.latitude.degrees() - lat).abs() < 1e-8, "lat {lat} lon {lon}: {back}");
            assert!((back.longitude.degrees() - lon).abs() < 1e-8, "lat {lat} lon {lon}: {back}");
        }
    }

    #[test]
    fn test_tangent_is_unit() {
        let t = Cautra.north_pointing_tangent(&Ellipsoid::WGS84, deg(47.0), deg(0.0));
        assert!((t - DVec3::Y).length() < 1e-6);
        let polar = Cautra.north_pointing_tangent(&Ellipsoid::WGS84, deg(90.0), deg(20.0));
        assert!((polar.length() - 1.0).abs() < 1e-9);
    }
}
