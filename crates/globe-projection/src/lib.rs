//! Geographic-to-flat projections for the 2D globe.
//!
//! Eight projections share the [`MapProjection`] contract and are collected in
//! the closed [`Projection`] enum:
//!
//! | Projection | Continuous |
//! |---|---|
//! | [`Equirectangular`] | yes |
//! | [`Mercator`] | yes |
//! | [`Sinusoidal`] | no |
//! | [`ModifiedSinusoidal`] | no |
//! | [`PolarEquidistant`] | no |
//! | [`UniversalPolarStereographic`] | no |
//! | [`TransverseMercator`] | no |
//! | [`Cautra`] | no |
//!
//! Only continuous projections tile horizontally, so only they are drawn at
//! the left and right offsets.
//!
//! ```rust
//! use globe_math::Angle;
//! use globe_projection::{Ellipsoid, MapProjection, Mercator};
//! use glam::DVec3;
//!
//! let mercator = Mercator::new();
//! let p = mercator.geographic_to_cartesian(
//!     &Ellipsoid::WGS84,
//!     Angle::from_degrees(51.5),
//!     Angle::from_degrees(-0.12),
//!     35.0,
//!     DVec3::ZERO,
//! );
//! let back = mercator.cartesian_to_geographic(&Ellipsoid::WGS84, p, DVec3::ZERO);
//! assert!((back.latitude.degrees() - 51.5).abs() < 1e-9);
//! ```

mod cautra;
mod conformal;
mod ellipsoid;
mod equirectangular;
mod error;
mod mercator;
mod polar;
mod projection;
mod sinusoidal;
mod transverse_mercator;

pub use cautra::Cautra;
pub use ellipsoid::Ellipsoid;
pub use equirectangular::Equirectangular;
pub use error::ProjectionError;
pub use mercator::{DEFAULT_MERCATOR_LATITUDE_LIMIT, Mercator};
pub use polar::{PolarEquidistant, Pole, UniversalPolarStereographic};
pub use projection::{MapProjection, Projection, ProjectionKind};
pub use sinusoidal::{ModifiedSinusoidal, Sinusoidal};
pub use transverse_mercator::{
    DEFAULT_TM_WIDTH, TM_MAX_LATITUDE, TM_MIN_LATITUDE, TransverseMercator,
};
