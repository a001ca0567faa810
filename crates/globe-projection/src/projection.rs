//! The projection contract and the closed set of supported projections.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use globe_math::{Angle, Position, Region};
use serde::{Deserialize, Serialize};

use crate::{
    Cautra, Ellipsoid, Equirectangular, Mercator, ModifiedSinusoidal, PolarEquidistant, Pole,
    ProjectionError, Sinusoidal, TransverseMercator, UniversalPolarStereographic,
};

/// Conversion between geographic positions and flat-globe model coordinates.
///
/// Forward and inverse never fail: input outside [`limits`](Self::limits) is
/// clamped in whatever way each projection defines. `offset` is an additive
/// shift applied to x only, so the same math serves every horizontal copy of
/// the world.
pub trait MapProjection {
    fn name(&self) -> &'static str;

    /// True if the projected world tiles horizontally without a seam.
    fn is_continuous(&self) -> bool;

    /// Domain of validity. Input outside it is clamped.
    fn limits(&self) -> Region;

    fn geographic_to_cartesian(
        &self,
        ellipsoid: &Ellipsoid,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
        offset: DVec3,
    ) -> DVec3;

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position;

    /// Unit vector in the projected plane pointing toward geographic north.
    fn north_pointing_tangent(&self, ellipsoid: &Ellipsoid, latitude: Angle, longitude: Angle) -> DVec3;
}

/// Names of the supported projections, as used in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionKind {
    Equirectangular,
    Mercator,
    Sinusoidal,
    ModifiedSinusoidal,
    PolarEquidistant,
    UniversalPolarStereographic,
    TransverseMercator,
    Cautra,
}

impl ProjectionKind {
    pub const ALL: [ProjectionKind; 8] = [
        ProjectionKind::Equirectangular,
        ProjectionKind::Mercator,
        ProjectionKind::Sinusoidal,
        ProjectionKind::ModifiedSinusoidal,
        ProjectionKind::PolarEquidistant,
        ProjectionKind::UniversalPolarStereographic,
        ProjectionKind::TransverseMercator,
        ProjectionKind::Cautra,
    ];

    /// Short identifier accepted by [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            ProjectionKind::Equirectangular => "equirectangular",
            ProjectionKind::Mercator => "mercator",
            ProjectionKind::Sinusoidal => "sinusoidal",
            ProjectionKind::ModifiedSinusoidal => "modified-sinusoidal",
            ProjectionKind::PolarEquidistant => "polar-equidistant",
            ProjectionKind::UniversalPolarStereographic => "ups",
            ProjectionKind::TransverseMercator => "transverse-mercator",
            ProjectionKind::Cautra => "cautra",
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProjectionKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        ProjectionKind::ALL
            .into_iter()
            .find(|kind| kind.key() == normalized)
            .ok_or_else(|| ProjectionError::UnknownName {
                what: "projection",
                name: s.to_string(),
            })
    }
}

/// One of the eight supported projections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Equirectangular(Equirectangular),
    Mercator(Mercator),
    Sinusoidal(Sinusoidal),
    ModifiedSinusoidal(ModifiedSinusoidal),
    PolarEquidistant(PolarEquidistant),
    UniversalPolarStereographic(UniversalPolarStereographic),
    TransverseMercator(TransverseMercator),
    Cautra(Cautra),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            Projection::Equirectangular($p) => $body,
            Projection::Mercator($p) => $body,
            Projection::Sinusoidal($p) => $body,
            Projection::ModifiedSinusoidal($p) => $body,
            Projection::PolarEquidistant($p) => $body,
            Projection::UniversalPolarStereographic($p) => $body,
            Projection::TransverseMercator($p) => $body,
            Projection::Cautra($p) => $body,
        }
    };
}

impl Projection {
    /// Builds a projection of the given kind.
    ///
    /// The polar projections require `pole`; transverse Mercator requires
    /// `central_meridian`. Parameters irrelevant to `kind` are ignored.
    pub fn build(
        kind: ProjectionKind,
        pole: Option<Pole>,
        central_meridian: Option<Angle>,
        central_latitude: Option<Angle>,
        width: Option<Angle>,
    ) -> Result<Self, ProjectionError> {
        let require_pole = |projection: &'static str| {
            pole.ok_or(ProjectionError::MissingParameter {
                projection,
                parameter: "pole",
            })
        };

        Ok(match kind {
            ProjectionKind::Equirectangular => Projection::Equirectangular(Equirectangular),
            ProjectionKind::Mercator => Projection::Mercator(Mercator::new()),
            ProjectionKind::Sinusoidal => Projection::Sinusoidal(Sinusoidal),
            ProjectionKind::ModifiedSinusoidal => Projection::ModifiedSinusoidal(ModifiedSinusoidal),
            ProjectionKind::PolarEquidistant => {
                Projection::PolarEquidistant(PolarEquidistant::new(require_pole("Polar Equidistant")?))
            }
            ProjectionKind::UniversalPolarStereographic => Projection::UniversalPolarStereographic(
                UniversalPolarStereographic::new(require_pole("Universal Polar Stereographic")?),
            ),
            ProjectionKind::TransverseMercator => Projection::TransverseMercator(
                TransverseMercator::from_parts(central_meridian, central_latitude, width)?,
            ),
            ProjectionKind::Cautra => Projection::Cautra(Cautra),
        })
    }

    pub fn kind(&self) -> ProjectionKind {
        match self {
            Projection::Equirectangular(_) => ProjectionKind::Equirectangular,
            Projection::Mercator(_) => ProjectionKind::Mercator,
            Projection::Sinusoidal(_) => ProjectionKind::Sinusoidal,
            Projection::ModifiedSinusoidal(_) => ProjectionKind::ModifiedSinusoidal,
            Projection::PolarEquidistant(_) => ProjectionKind::PolarEquidistant,
            Projection::UniversalPolarStereographic(_) => ProjectionKind::UniversalPolarStereographic,
            Projection::TransverseMercator(_) => ProjectionKind::TransverseMercator,
            Projection::Cautra(_) => ProjectionKind::Cautra,
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Equirectangular(Equirectangular)
    }
}

impl MapProjection for Projection {
    fn name(&self) -> &'static str {
        dispatch!(self, p => p.name())
    }

    fn is_continuous(&self) -> bool {
        dispatch!(self, p => p.is_continuous())
    }

    fn limits(&self) -> Region {
        dispatch!(self, p => p.limits())
    }

    fn geographic_to_cartesian(
        &self,
        ellipsoid: &Ellipsoid,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
        offset: DVec3,
    ) -> DVec3 {
        dispatch!(self, p => p.geographic_to_cartesian(ellipsoid, latitude, longitude, elevation, offset))
    }

    fn cartesian_to_geographic(&self, ellipsoid: &Ellipsoid, point: DVec3, offset: DVec3) -> Position {
        dispatch!(self, p => p.cartesian_to_geographic(ellipsoid, point, offset))
    }

    fn north_pointing_tangent(&self, ellipsoid: &Ellipsoid, latitude: Angle, longitude: Angle) -> DVec3 {
        dispatch!(self, p => p.north_pointing_tangent(ellipsoid, latitude, longitude))
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_is_lenient() {
        assert_eq!("Transverse_Mercator".parse::<ProjectionKind>().unwrap(), ProjectionKind::TransverseMercator);
        assert_eq!("modified sinusoidal".parse::<ProjectionKind>().unwrap(), ProjectionKind::ModifiedSinusoidal);
        assert_eq!(" UPS ".parse::<ProjectionKind>().unwrap(), ProjectionKind::UniversalPolarStereographic);
        assert!("robinson".parse::<ProjectionKind>().is_err());
    }

    #[test]
    fn test_kind_key_round_trips() {
        for kind in ProjectionKind::ALL {
            assert_eq!(kind.to_string().parse::<ProjectionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_and_pole_ron_round_trip() {
        for kind in ProjectionKind::ALL {
            let text = ron::to_string(&kind).unwrap();
            assert_eq!(ron::from_str::<ProjectionKind>(&text).unwrap(), kind);
        }
        assert_eq!(ron::to_string(&ProjectionKind::UniversalPolarStereographic).unwrap(), "UniversalPolarStereographic");
        for pole in [Pole::North, Pole::South] {
            let text = ron::to_string(&Some(pole)).unwrap();
            assert_eq!(ron::from_str::<Option<Pole>>(&text).unwrap(), Some(pole));
        }
        assert!(ron::from_str::<ProjectionKind>("Robinson").is_err());
    }

    #[test]
    fn test_build_requires_pole() {
        for kind in [ProjectionKind::PolarEquidistant, ProjectionKind::UniversalPolarStereographic] {
            let err = Projection::build(kind, None, None, None, None).unwrap_err();
            assert!(matches!(err, ProjectionError::MissingParameter { parameter: "pole", .. }));
            let built = Projection::build(kind, Some(Pole::South), None, None, None).unwrap();
            assert_eq!(built.kind(), kind);
        }
    }

    #[test]
    fn test_build_requires_central_meridian() {
        let err = Projection::build(ProjectionKind::TransverseMercator, None, None, None, None).unwrap_err();
        assert!(matches!(err, ProjectionError::MissingParameter { parameter: "central_meridian", .. }));
        let tm = Projection::build(
            ProjectionKind::TransverseMercator,
            None,
            Some(Angle::from_degrees(-93.0)),
            None,
            Some(Angle::from_degrees(10.0)),
        )
        .unwrap();
        assert!((tm.limits().min_longitude.degrees() + 103.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_every_kind() {
        for kind in ProjectionKind::ALL {
            let p = Projection::build(kind, Some(Pole::North), Some(Angle::ZERO), None, None).unwrap();
            assert_eq!(p.kind(), kind);
            assert!(!p.name().is_empty());
        }
    }
}
