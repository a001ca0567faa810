use serde::{Deserialize, Serialize};

use crate::Angle;

/// A geographic bounding rectangle.
///
/// Used both as a projection's domain of validity and as the sector covered
/// by a tessellated terrain geometry set.
///
/// Invariant: `min_latitude <= max_latitude` and `min_longitude <= max_longitude`.
/// [`Region::new`] enforces this by swapping bounds if needed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min_latitude: Angle,
    pub max_latitude: Angle,
    pub min_longitude: Angle,
    pub max_longitude: Angle,
}

impl Region {
    /// The whole globe: `[-90°, 90°] x [-180°, 180°]`.
    pub const FULL_SPHERE: Region = Region {
        min_latitude: Angle::NEG90,
        max_latitude: Angle::POS90,
        min_longitude: Angle::NEG180,
        max_longitude: Angle::POS180,
    };

    pub fn new(
        min_latitude: Angle,
        max_latitude: Angle,
        min_longitude: Angle,
        max_longitude: Angle,
    ) -> Self {
        let (min_latitude, max_latitude) = if min_latitude <= max_latitude {
            (min_latitude, max_latitude)
        } else {
            (max_latitude, min_latitude)
        };
        let (min_longitude, max_longitude) = if min_longitude <= max_longitude {
            (min_longitude, max_longitude)
        } else {
            (max_longitude, min_longitude)
        };
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    pub fn from_degrees(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self::new(
            Angle::from_degrees(min_lat),
            Angle::from_degrees(max_lat),
            Angle::from_degrees(min_lon),
            Angle::from_degrees(max_lon),
        )
    }

    pub fn delta_lat(&self) -> Angle {
        self.max_latitude - self.min_latitude
    }

    pub fn delta_lon(&self) -> Angle {
        self.max_longitude - self.min_longitude
    }

    /// Returns true if the location lies inside or on the boundary.
    pub fn contains(&self, latitude: Angle, longitude: Angle) -> bool {
        latitude >= self.min_latitude
            && latitude <= self.max_latitude
            && longitude >= self.min_longitude
            && longitude <= self.max_longitude
    }

    /// Clamps a location to the nearest point inside the region.
    pub fn clamp(&self, latitude: Angle, longitude: Angle) -> (Angle, Angle) {
        (
            latitude.clamp(self.min_latitude, self.max_latitude),
            longitude.clamp(self.min_longitude, self.max_longitude),
        )
    }

    /// The overlap of two regions, or `None` if they are disjoint.
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let min_latitude = max_angle(self.min_latitude, other.min_latitude);
        let max_latitude = min_angle(self.max_latitude, other.max_latitude);
        let min_longitude = max_angle(self.min_longitude, other.min_longitude);
        let max_longitude = min_angle(self.max_longitude, other.max_longitude);
        if min_latitude > max_latitude || min_longitude > max_longitude {
            return None;
        }
        Some(Region {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        })
    }

    /// Smallest region enclosing both.
    pub fn union(&self, other: &Region) -> Region {
        Region {
            min_latitude: min_angle(self.min_latitude, other.min_latitude),
            max_latitude: max_angle(self.max_latitude, other.max_latitude),
            min_longitude: min_angle(self.min_longitude, other.min_longitude),
            max_longitude: max_angle(self.max_longitude, other.max_longitude),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::FULL_SPHERE
    }
}

fn min_angle(a: Angle, b: Angle) -> Angle {
    if a <= b { a } else { b }
}

fn max_angle(a: Angle, b: Angle) -> Angle {
    if a >= b { a } else { b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_bounds() {
        let r = Region::from_degrees(10.0, -10.0, 20.0, -20.0);
        assert!(r.min_latitude < r.max_latitude);
        assert!(r.min_longitude < r.max_longitude);
        assert!((r.delta_lat().degrees() - 20.0).abs() < 1e-9);
        assert!((r.delta_lon().degrees() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let r = Region::from_degrees(-78.0, 78.0, -180.0, 180.0);
        let (lat, lon) = r.clamp(Angle::from_degrees(85.0), Angle::from_degrees(10.0));
        assert_eq!(lat, r.max_latitude);
        assert!((lon.degrees() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_contains_boundary() {
        let r = Region::from_degrees(0.0, 10.0, 0.0, 10.0);
        assert!(r.contains(Angle::from_degrees(0.0), Angle::from_degrees(10.0)));
        assert!(!r.contains(Angle::from_degrees(-0.1), Angle::from_degrees(5.0)));
    }

    #[test]
    fn test_intersection_and_union() {
        let a = Region::from_degrees(0.0, 20.0, 0.0, 20.0);
        let b = Region::from_degrees(10.0, 30.0, 15.0, 40.0);
        let i = a.intersection(&b).unwrap();
        assert!((i.min_latitude.degrees() - 10.0).abs() < 1e-9);
        assert!((i.max_longitude.degrees() - 20.0).abs() < 1e-9);
        let u = a.union(&b);
        assert!((u.max_longitude.degrees() - 40.0).abs() < 1e-9);

        let disjoint = Region::from_degrees(50.0, 60.0, 50.0, 60.0);
        assert!(a.intersection(&disjoint).is_none());
    }
}
