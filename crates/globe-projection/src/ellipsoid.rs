use crate::ProjectionError;

/// Shape parameters of the globe that the projections read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    equatorial_radius: f64,
    eccentricity_squared: f64,
}

impl Ellipsoid {
    /// WGS84 reference ellipsoid.
    pub const WGS84: Ellipsoid = Ellipsoid {
        equatorial_radius: 6_378_137.0,
        eccentricity_squared: 0.006_694_379_990_14,
    };

    /// Create an ellipsoid.
    ///
    /// Rejects a non-finite or non-positive radius and an eccentricity squared
    /// outside `[0, 1)`.
    pub fn new(equatorial_radius: f64, eccentricity_squared: f64) -> Result<Self, ProjectionError> {
        if !equatorial_radius.is_finite() || equatorial_radius <= 0.0 {
            return Err(ProjectionError::InvalidParameter {
                parameter: "equatorial radius",
                value: equatorial_radius,
                reason: "must be finite and positive",
            });
        }
        if !(0.0..1.0).contains(&eccentricity_squared) {
            return Err(ProjectionError::InvalidParameter {
                parameter: "eccentricity squared",
                value: eccentricity_squared,
                reason: "must lie in [0, 1)",
            });
        }
        Ok(Self {
            equatorial_radius,
            eccentricity_squared,
        })
    }

    /// A sphere of the given radius.
    pub fn sphere(radius: f64) -> Result<Self, ProjectionError> {
        Self::new(radius, 0.0)
    }

    #[inline]
    pub fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    #[inline]
    pub fn eccentricity_squared(&self) -> f64 {
        self.eccentricity_squared
    }

    #[inline]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared.sqrt()
    }

    /// Flattening derived from the eccentricity.
    pub fn flattening(&self) -> f64 {
        1.0 - (1.0 - self.eccentricity_squared).sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
