//! Conformal (isometric) latitude helpers shared by the Mercator family.

use std::f64::consts::FRAC_PI_4;

/// Conformal latitude `chi` of geodetic latitude `phi` on an ellipsoid with
/// eccentricity `e`.
pub(crate) fn conformal_latitude(phi: f64, e: f64) -> f64 {
    let esp = e * phi.sin();
    let ratio = ((1.0 - esp) / (1.0 + esp)).powf(e / 2.0);
    2.0 * ((FRAC_PI_4 + phi / 2.0).tan() * ratio).atan() - std::f64::consts::FRAC_PI_2
}

/// Geodetic latitude recovered from conformal latitude `chi` with the
/// four-term trigonometric series in e², e⁴, e⁶, e⁸.
pub(crate) fn geodetic_from_conformal(chi: f64, e2: f64) -> f64 {
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let e8 = e4 * e4;

    chi + (e2 / 2.0 + 5.0 * e4 / 24.0 + e6 / 12.0 + 13.0 * e8 / 360.0) * (2.0 * chi).sin()
        + (7.0 * e4 / 48.0 + 29.0 * e6 / 240.0 + 811.0 * e8 / 11520.0) * (4.0 * chi).sin()
        + (7.0 * e6 / 120.0 + 81.0 * e8 / 1120.0) * (6.0 * chi).sin()
        + (4279.0 * e8 / 161_280.0) * (8.0 * chi).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ellipsoid;

    #[test]
    fn test_series_inverts_conformal_latitude() {
        let e2 = Ellipsoid::WGS84.eccentricity_squared();
        let e = e2.sqrt();
        for deg in (-89..=89).step_by(7) {
            let phi = (deg as f64).to_radians();
            let chi = conformal_latitude(phi, e);
            let back = geodetic_from_conformal(chi, e2);
            assert!((back - phi).abs() < 1e-10, "{deg}\u{00B0}: {back} vs {phi}");
        }
    }

    #[test]
    fn test_sphere_is_identity() {
        for deg in [-60.0_f64, 0.0, 33.0, 80.0] {
            let phi = deg.to_radians();
            assert!((conformal_latitude(phi, 0.0) - phi).abs() < 1e-14);
            assert!((geodetic_from_conformal(phi, 0.0) - phi).abs() < 1e-15);
        }
    }
}
