//! Azimuthal projections centred on a pole: polar equidistant and UPS.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use globe_math::{Angle, Position, Region};
use serde::{Deserialize, Serialize};

use crate::conformal::geodetic_from_conformal;
use crate::{Ellipsoid, MapProjection, ProjectionError};

/// Points closer than this to the projection origin are treated as the pole.
const POLE_RADIUS_EPSILON: f64 = 1.0e-4;

/// UPS central scale factor.
const UPS_SCALE: f64 = 0.994;

/// Which pole an azimuthal projection is centred on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pole {
    North,
    South,
}

impl Pole {
    pub fn latitude(self) -> Angle {
        match self {
            Pole::North => Angle::POS90,
            Pole::South => Angle::NEG90,
        }
    }

    /// Position of the pole itself at the given elevation.
    fn position(self, elevation: f64) -> Position {
        Position::new(self.latitude(), Angle::ZERO, elevation)
    }

    /// Planar (x, y) for radius `r` along longitude `lambda`.
    fn planar(self, r: f64, lambda: f64) -> (f64, f64) {
        match self {
            Pole::North => (r * lambda.sin(), -r * lambda.cos()),
            Pole::South => (r * lambda.sin(), r * lambda.cos()),
        }
    }

    /// Longitude recovered from planar (x, y).
    fn longitude(self, x: f64, y: f64) -> f64 {
        match self {
            Pole::North => x.atan2(-y),
            Pole::South => x.atan2(y),
        }
    }

    /// Unit vector pointing toward geographic north at longitude `lambda`.
    fn north_tangent(self, lambda: f64) -> DVec3 {
        match self {
            Pole::North => DVec3::new(-lambda.sin(), lambda.cos(), 0.0),
            Pole::South => DVec3::new(lambda.sin(), lambda.cos(), 0.0),
        }
    }
}

impl fmt::Display for Pole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pole::North => write!(f, "north"),
            Pole::South => write!(f, "south"),
        }
    }
}

impl FromStr for Pole {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Pole::North),
            "south" | "s" => Ok(Pole::South),
            _ => Err(ProjectionError::UnknownName {
                what: "pole",
                name: s.to_string(),
            }),
        }
    }
}

/// Azimuthal equidistant projection about a pole: radial distance is
/// proportional to angular distance from the pole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarEquidistant {
    pole: Pole,
}

impl PolarEquidistant {
    pub fn new(pole: Pole) -> Self {
        Self { pole }
    }

    pub fn pole(&self) -> Pole {
        self.pole
    }
}

impl MapProjection for PolarEquidistant {
    fn name(&self) -> &'static str {
        "Polar Equidistant"
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
        // Exact equality: only the pole itself short-circuits, nearby latitudes project normally.
        if latitude == self.pole.latitude() {
            return DVec3::new(offset.x, 0.0, elevation);
        }

        let r = ellipsoid.equatorial_radius();
        let a = match self.pole {
            Pole::North => r * (FRAC_PI_2 - latitude.radians()),
            Pole::South => r * (FRAC_PI_2 + latitude.radians()),
        };
        let (x, y) = self.pole.planar(a, longitude.radians());
        DVec3::new(x + offset.x, y, elevation)
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        let x = point.x - offset.x;
        let y = point.y;
        let rho = x.hypot(y);
        if rho < POLE_RADIUS_EPSILON {
            return self.pole.position(point.z);
        }

        // Points beyond the antipodal circle map to its edge.
        let c = (rho / ellipsoid.equatorial_radius()).min(PI);
        let lat = match self.pole {
            Pole::North => c.cos().asin(),
            Pole::South => (-c.cos()).asin(),
        };
        Position::from_radians(lat, self.pole.longitude(x, y), point.z)
    }

    fn north_pointing_tangent(&self, _: &Ellipsoid, _: Angle, longitude: Angle) -> DVec3 {
        self.pole.north_tangent(longitude.radians())
    }
}

/// Universal Polar Stereographic: ellipsoidal polar stereographic with a
/// central scale factor of 0.994.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniversalPolarStereographic {
    pole: Pole,
}

impl UniversalPolarStereographic {
    pub fn new(pole: Pole) -> Self {
        Self { pole }
    }

    pub fn pole(&self) -> Pole {
        self.pole
    }
}

/// `sqrt((1+e)^(1+e) * (1-e)^(1-e))`, the UPS radius normaliser.
fn ups_normaliser(e: f64) -> f64 {
    ((1.0 + e).powf(1.0 + e) * (1.0 - e).powf(1.0 - e)).sqrt()
}

impl MapProjection for UniversalPolarStereographic {
    fn name(&self) -> &'static str {
        "Universal Polar Stereographic"
    }

    fn is_continuous(&self) -> bool {
        false
    }

    fn limits(&self) -> Region {
        match self.pole {
            Pole::North => Region::from_degrees(0.0, 90.0, -180.0, 180.0),
            Pole::South => Region::from_degrees(-90.0, 0.0, -180.0, 180.0),
        }
    }

    fn geographic_to_cartesian(
        &self,
        ellipsoid: &Ellipsoid,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
        offset: DVec3,
    ) -> DVec3 {
        // Exact equality: only the pole itself short-circuits, nearby latitudes project normally.
        if latitude == self.pole.latitude() {
            return DVec3::new(offset.x, 0.0, elevation);
        }

        // Latitude measured toward the active pole; the far hemisphere clamps to the equator.
        let phi = match self.pole {
            Pole::North => latitude.radians().max(0.0),
            Pole::South => (-latitude.radians()).max(0.0),
        };

        let e = ellipsoid.eccentricity();
        let sp = phi.sin();
        let t = (((1.0 - sp) / (1.0 + sp)) * ((1.0 + e * sp) / (1.0 - e * sp)).powf(e)).sqrt();
        let r = 2.0 * ellipsoid.equatorial_radius() * UPS_SCALE * t / ups_normaliser(e);

        let (x, y) = self.pole.planar(r, longitude.radians());
        DVec3::new(x + offset.x, y, elevation)
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        let x = point.x - offset.x;
        let y = point.y;
        let rho = x.hypot(y);
        if rho < POLE_RADIUS_EPSILON {
            return self.pole.position(point.z);
        }

        let e = ellipsoid.eccentricity();
        let t = rho * ups_normaliser(e) / (2.0 * ellipsoid.equatorial_radius() * UPS_SCALE);
        let chi = FRAC_PI_2 - 2.0 * t.atan();
        let lat = geodetic_from_conformal(chi, ellipsoid.eccentricity_squared());

        let lat = match self.pole {
            Pole::North => lat,
            Pole::South => -lat,
        };
        Position::from_radians(lat, self.pole.longitude(x, y), point.z)
    }

    fn north_pointing_tangent(&self, _: &Ellipsoid, _: Angle, longitude: Angle) -> DVec3 {
        self.pole.north_tangent(longitude.radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(d: f64) -> Angle {
        Angle::from_degrees(d)
    }

    #[test]
    fn test_pole_parse() {
        assert_eq!("North".parse::<Pole>().unwrap(), Pole::North);
        assert_eq!("s".parse::<Pole>().unwrap(), Pole::South);
        assert!(matches!(
            "east".parse::<Pole>(),
            Err(ProjectionError::UnknownName { what: "pole", .. })
        ));
    }

    #[test]
    fn test_only_exact_pole_short_circuits() {
        let e = Ellipsoid::WGS84;
        let shift = DVec3::new(500.0, 0.0, 0.0);
        for pole in [Pole::North, Pole::South] {
            let sign = pole.latitude().degrees().signum();
            let equidistant = PolarEquidistant::new(pole);
            let ups = UniversalPolarStereographic::new(pole);

            let at_pole = deg(90.0 * sign);
            assert_eq!(equidistant.geographic_to_cartesian(&e, at_pole, deg(40.0), 12.0, shift), DVec3::new(500.0, 0.0, 12.0));
            assert_eq!(ups.geographic_to_cartesian(&e, at_pole, deg(40.0), 12.0, shift), DVec3::new(500.0, 0.0, 12.0));

            let near = deg((90.0 - 1e-6) * sign);
            let p = equidistant.geographic_to_cartesian(&e, near, deg(40.0), 12.0, shift);
            assert!((p.truncate() - shift.truncate()).length() > 0.0, "{pole}");
            let q = ups.geographic_to_cartesian(&e, near, deg(40.0), 12.0, shift);
            assert!((q.truncate() - shift.truncate()).length() > 0.0, "{pole}");
        }
    }

    #[test]
    fn test_equidistant_radius_is_arc_length() {
        let e = Ellipsoid::WGS84;
        let p = PolarEquidistant::new(Pole::North).geographic_to_cartesian(&e, deg(0.0), deg(0.0), 0.0, DVec3::ZERO);
        // Equator at the prime meridian sits a quarter circumference below the pole.
        assert!(p.x.abs() < 1e-6);
        assert!((p.y + e.equatorial_radius() * FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_equidistant_inverse_caps_radius() {
        let e = Ellipsoid::WGS84;
        let far = DVec3::new(0.0, -4.0 * e.equatorial_radius(), 0.0);
        let pos = PolarEquidistant::new(Pole::North).cartesian_to_geographic(&e, far, DVec3::ZERO);
        assert!((pos.latitude.degrees() + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_ups_far_hemisphere_clamped_to_equator() {
        let e = Ellipsoid::WGS84;
        let ups = UniversalPolarStereographic::new(Pole::North);
        let equator = ups.geographic_to_cartesian(&e, deg(0.0), deg(30.0), 0.0, DVec3::ZERO);
        let south = ups.geographic_to_cartesian(&e, deg(-45.0), deg(30.0), 0.0, DVec3::ZERO);
        assert_eq!(equator, south);

        let ups_s = UniversalPolarStereographic::new(Pole::South);
        let north = ups_s.geographic_to_cartesian(&e, deg(20.0), deg(30.0), 0.0, DVec3::ZERO);
        let eq_s = ups_s.geographic_to_cartesian(&e, deg(0.0), deg(30.0), 0.0, DVec3::ZERO);
        assert_eq!(north, eq_s);
    }

    #[test]
    fn test_ups_known_radius() {
        // UPS northing at 87N on the prime meridian, before the 2,000 km false origin.
        let e = Ellipsoid::WGS84;
        let p = UniversalPolarStereographic::new(Pole::North).geographic_to_cartesian(&e, deg(87.0), deg(0.0), 0.0, DVec3::ZERO);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y + 333_144.485).abs() < 1.0, "y = {}", p.y);
    }

    #[test]
    fn test_tangent_points_at_pole() {
        let e = Ellipsoid::WGS84;
        let proj = PolarEquidistant::new(Pole::North);
        let lon = deg(60.0);
        let p = proj.geographic_to_cartesian(&e, deg(50.0), lon, 0.0, DVec3::ZERO);
        let t = proj.north_pointing_tangent(&e, deg(50.0), lon);
        // Moving north heads straight for the origin.
        let to_pole = (-p).normalize();
        assert!((t - to_pole).length() < 1e-9);
    }
}
