//! View frustum in model coordinates, extracted from a view-projection matrix.
//!
//! Flat-globe model coordinates span tens of millions of meters, so the planes
//! are kept in f64 rather than the f32 used for per-chunk culling.

use glam::{DMat4, DVec3, DVec4};

use crate::Aabb;

const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// Six inward-pointing planes: left, right, bottom, top, near, far.
///
/// Each `DVec4(a, b, c, d)` holds the normalized inward normal in `(a, b, c)`
/// and the signed distance term in `d`.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    planes: [DVec4; 6],
}

impl Frustum {
    /// Extract frustum planes using the Gribb-Hartmann method.
    ///
    /// Expects a `[0, 1]` depth range, as produced by glam's `*_rh` projections.
    pub fn from_view_projection(vp: &DMat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [DVec4::ZERO; 6];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];
        planes[NEAR] = rows[2];
        planes[FAR] = rows[3] - rows[2];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 0.0 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    pub fn planes(&self) -> &[DVec4; 6] {
        &self.planes
    }

    /// Returns true if the point is inside or on every plane.
    pub fn contains_point(&self, p: DVec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(p) + plane.w >= 0.0)
    }

    /// Test whether an AABB is at least partially inside the frustum.
    ///
    /// Uses the p-vertex method. Conservative near frustum corners: may report
    /// an intersection for a box that is just outside, never the reverse.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();
            let p = DVec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            if normal.dot(p) + plane.w < 0.0 {
                return false;
            }
        }
        true
    }
}
