use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A geographic angle. Stored in radians, with degree accessors.
///
/// Serializes as degrees so configuration files stay human-readable.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { radians: 0.0 };
    pub const POS90: Angle = Angle { radians: FRAC_PI_2 };
    pub const NEG90: Angle = Angle {
        radians: -FRAC_PI_2,
    };
    pub const POS180: Angle = Angle { radians: PI };
    pub const NEG180: Angle = Angle { radians: -PI };

    /// Creates an angle from a value in radians.
    #[inline]
    pub const fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    /// Creates an angle from a value in degrees.
    #[inline]
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    #[inline]
    pub const fn radians(self) -> f64 {
        self.radians
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }

    #[inline]
    pub fn sin(self) -> f64 {
        self.radians.sin()
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.radians.cos()
    }

    /// Returns true when the underlying value is neither NaN nor infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.radians.is_finite()
    }

    /// Clamps this angle into `[min, max]`.
    #[inline]
    pub fn clamp(self, min: Angle, max: Angle) -> Angle {
        Angle::from_radians(self.radians.clamp(min.radians, max.radians))
    }

    /// Wraps a longitude into `[-180°, 180°]`.
    pub fn normalized_longitude(self) -> Angle {
        if (-PI..=PI).contains(&self.radians) {
            return self;
        }
        let wrapped = (self.radians + PI).rem_euclid(2.0 * PI) - PI;
        Angle::from_radians(wrapped)
    }

    /// Absolute difference between two angles, in radians.
    #[inline]
    pub fn abs_diff(self, other: Angle) -> f64 {
        (self.radians - other.radians).abs()
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.radians + rhs.radians)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.radians - rhs.radians)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_radians(-self.radians)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::from_radians(self.radians * rhs)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}\u{00B0}", self.degrees())
    }
}

impl Serialize for Angle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.degrees())
    }
}

impl<'de> Deserialize<'de> for Angle {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Angle::from_degrees)
    }
}
