//! Geographic value types and f64 culling math shared by the projection and frame crates.
//!
//! Angles are stored in radians, positions carry elevation in meters, and
//! projected points are plain [`glam::DVec3`] values in the flat globe's
//! model coordinates.

mod aabb;
mod angle;
mod frustum;
mod position;
mod region;

pub use aabb::Aabb;
pub use angle::Angle;
pub use frustum::Frustum;
pub use position::Position;
pub use region::Region;

pub use glam::{DMat4, DVec2, DVec3, DVec4};
