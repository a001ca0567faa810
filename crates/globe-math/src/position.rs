use std::fmt;

use crate::Angle;

/// A geographic position: latitude, longitude, and elevation in meters.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub latitude: Angle,
    pub longitude: Angle,
    /// Elevation above the ellipsoid in meters.
    pub elevation: f64,
}

impl Position {
    pub const fn new(latitude: Angle, longitude: Angle, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    pub fn from_degrees(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self::new(
            Angle::from_degrees(latitude),
            Angle::from_degrees(longitude),
            elevation,
        )
    }

    pub const fn from_radians(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self::new(
            Angle::from_radians(latitude),
            Angle::from_radians(longitude),
            elevation,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat = self.latitude.degrees();
        let lon = self.longitude.degrees();
        let lat_dir = if lat >= 0.0 { "N" } else { "S" };
        let lon_dir = if lon >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}, {:.1}m",
            lat.abs(),
            lat_dir,
            lon.abs(),
            lon_dir,
            self.elevation,
        )
    }
}
