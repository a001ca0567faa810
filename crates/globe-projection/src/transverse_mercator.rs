//! Ellipsoidal transverse Mercator about a configurable central meridian.
//!
//! Uses the Krüger series to sixth order in the third flattening `n`, which
//! stays sub-millimetre well beyond the default 30° half-width.

use glam::DVec3;
use globe_math::{Angle, Position, Region};
use tracing::debug;

use crate::{Ellipsoid, MapProjection, ProjectionError};

/// Southernmost latitude accepted before clamping.
pub const TM_MIN_LATITUDE: f64 = -82.0;
/// Northernmost latitude accepted before clamping.
pub const TM_MAX_LATITUDE: f64 = 86.0;
/// Default longitude half-width around the central meridian, in degrees.
pub const DEFAULT_TM_WIDTH: f64 = 30.0;

/// Latitude step used to estimate the north-pointing tangent.
const TANGENT_DELTA_LAT: f64 = 1e-7;

/// Transverse Mercator centred on `central_meridian`, valid within
/// `central_meridian ± width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransverseMercator {
    central_meridian: Angle,
    central_latitude: Angle,
    width: Angle,
}

impl TransverseMercator {
    /// Transverse Mercator about `central_meridian` with the default width
    /// and the equator as origin of northings.
    pub fn new(central_meridian: Angle) -> Result<Self, ProjectionError> {
        if !central_meridian.is_finite() || central_meridian.radians().abs() > Angle::POS180.radians() {
            return Err(ProjectionError::InvalidParameter {
                parameter: "central meridian",
                value: central_meridian.degrees(),
                reason: "must lie within -180 and 180 degrees",
            });
        }
        Ok(Self {
            central_meridian,
            central_latitude: Angle::ZERO,
            width: Angle::from_degrees(DEFAULT_TM_WIDTH),
        })
    }

    /// Builds from optional parameters; the central meridian is required.
    pub fn from_parts(
        central_meridian: Option<Angle>,
        central_latitude: Option<Angle>,
        width: Option<Angle>,
    ) -> Result<Self, ProjectionError> {
        let central_meridian = central_meridian.ok_or(ProjectionError::MissingParameter {
            projection: "Transverse Mercator",
            parameter: "central_meridian",
        })?;
        let mut tm = Self::new(central_meridian)?;
        if let Some(lat) = central_latitude {
            tm = tm.with_central_latitude(lat)?;
        }
        if let Some(width) = width {
            tm = tm.with_width(width)?;
        }
        Ok(tm)
    }

    /// Sets the latitude whose meridian point maps to northing zero.
    pub fn with_central_latitude(mut self, latitude: Angle) -> Result<Self, ProjectionError> {
        let lat = latitude.degrees();
        if !latitude.is_finite() || !(TM_MIN_LATITUDE..=TM_MAX_LATITUDE).contains(&lat) {
            return Err(ProjectionError::InvalidParameter {
                parameter: "central latitude",
                value: lat,
                reason: "must lie within the projection's latitude limits",
            });
        }
        self.central_latitude = latitude;
        Ok(self)
    }

    /// Sets the longitude half-width around the central meridian.
    pub fn with_width(mut self, width: Angle) -> Result<Self, ProjectionError> {
        if !width.is_finite() || width.radians() <= 0.0 || width.radians() > Angle::POS90.radians() {
            return Err(ProjectionError::InvalidParameter {
                parameter: "width",
                value: width.degrees(),
                reason: "must lie in (0, 90] degrees",
            });
        }
        self.width = width;
        Ok(self)
    }

    pub fn central_meridian(&self) -> Angle {
        self.central_meridian
    }

    pub fn central_latitude(&self) -> Angle {
        self.central_latitude
    }

    pub fn width(&self) -> Angle {
        self.width
    }

    /// Northing of the central latitude on the central meridian.
    fn false_northing(&self, series: &KrugerSeries) -> f64 {
        series.forward(self.central_latitude.radians(), 0.0).1
    }
}

impl MapProjection for TransverseMercator {
    fn name(&self) -> &'static str {
        "Transverse Mercator"
    }

    fn is_continuous(&self) -> bool {
        false
    }

    fn limits(&self) -> Region {
        Region::new(
            Angle::from_degrees(TM_MIN_LATITUDE),
            Angle::from_degrees(TM_MAX_LATITUDE),
            self.central_meridian - self.width,
            self.central_meridian + self.width,
        )
    }

    fn geographic_to_cartesian(
        &self,
        ellipsoid: &Ellipsoid,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
        offset: DVec3,
    ) -> DVec3 {
        let (latitude, longitude) = self.limits().clamp(latitude, longitude);

        let series = KrugerSeries::new(ellipsoid);
        let (easting, northing) = series.forward(
            latitude.radians(),
            (longitude - self.central_meridian).radians(),
        );
        DVec3::new(
            easting + offset.x,
            northing - self.false_northing(&series),
            elevation,
        )
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        let series = KrugerSeries::new(ellipsoid);
        let (lat, dlon) = series.inverse(point.x - offset.x, point.y + self.false_northing(&series));
        Position::new(
            Angle::from_radians(lat),
            self.central_meridian + Angle::from_radians(dlon),
            point.z,
        )
    }

    fn north_pointing_tangent(&self, ellipsoid: &Ellipsoid, latitude: Angle, longitude: Angle) -> DVec3 {
        let lat = latitude.radians();
        let max_lat = TM_MAX_LATITUDE.to_radians();
        let min_lat = TM_MIN_LATITUDE.to_radians();

        let (south, north) = if lat + TANGENT_DELTA_LAT <= max_lat {
            (lat, lat + TANGENT_DELTA_LAT)
        } else if lat - TANGENT_DELTA_LAT >= min_lat {
            (lat - TANGENT_DELTA_LAT, lat)
        } else {
            debug!(latitude = %latitude, "no room for a tangent step, using +Y");
            return DVec3::Y;
        };

        let p1 = self.geographic_to_cartesian(ellipsoid, Angle::from_radians(south), longitude, 0.0, DVec3::ZERO);
        let p2 = self.geographic_to_cartesian(ellipsoid, Angle::from_radians(north), longitude, 0.0, DVec3::ZERO);
        (p2 - p1).normalize()
    }
}

/// Krüger series coefficients for one ellipsoid.
struct KrugerSeries {
    /// Rectifying radius.
    a_hat: f64,
    e: f64,
    e2: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl KrugerSeries {
    fn new(ellipsoid: &Ellipsoid) -> Self {
        let f = ellipsoid.flattening();
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let a_hat = ellipsoid.equatorial_radius() / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1_983_433.0 * n6 / 1_935_360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0 + 167_603.0 * n6 / 181_440.0,
            49561.0 * n4 / 161_280.0 - 179.0 * n5 / 168.0 + 6_601_661.0 * n6 / 7_257_600.0,
            34729.0 * n5 / 80640.0 - 3_418_889.0 * n6 / 1_995_840.0,
            212_378_941.0 * n6 / 319_334_400.0,
        ];
        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604_800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1_118_711.0 * n6 / 3_870_720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161_280.0 - 11.0 * n5 / 504.0 - 830_251.0 * n6 / 7_257_600.0,
            4583.0 * n5 / 161_280.0 - 108_847.0 * n6 / 3_991_680.0,
            20_648_693.0 * n6 / 638_668_800.0,
        ];

        Self {
            a_hat,
            e: ellipsoid.eccentricity(),
            e2: ellipsoid.eccentricity_squared(),
            alpha,
            beta,
        }
    }

    /// `tau' = tan` of the conformal latitude for `tau = tan(phi)`.
    fn conformal_tau(&self, tau: f64) -> f64 {
        let sigma = (self.e * (self.e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
        tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt()
    }

    /// (easting, northing) relative to the equator on the central meridian.
    fn forward(&self, phi: f64, dlam: f64) -> (f64, f64) {
        let tau_p = self.conformal_tau(phi.tan());
        let cos_lam = dlam.cos();
        let xi_p = tau_p.atan2(cos_lam);
        let eta_p = (dlam.sin() / (tau_p * tau_p + cos_lam * cos_lam).sqrt()).asinh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += alpha * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        (self.a_hat * eta, self.a_hat * xi)
    }

    /// (latitude, longitude from the central meridian) for an easting/northing.
    fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let xi = northing / self.a_hat;
        let eta = easting / self.a_hat;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_p -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta = eta_p.sinh();
        let cos_xi = xi_p.cos();
        let tau_p = xi_p.sin() / (sinh_eta * sinh_eta + cos_xi * cos_xi).sqrt();
        let dlam = sinh_eta.atan2(cos_xi);

        // Newton iteration for tau = tan(phi) from the conformal tau'.
        let mut tau = tau_p;
        for _ in 0..8 {
            let tau_i = self.conformal_tau(tau);
            let delta = (tau_p - tau_i) / (1.0 + tau_i * tau_i).sqrt()
                * (1.0 + (1.0 - self.e2) * tau * tau)
                / ((1.0 - self.e2) * (1.0 + tau * tau).sqrt());
            tau += delta;
            if delta.abs() < 1e-12 {
                break;
            }
        }

        (tau.atan(), dlam)
    }
}
