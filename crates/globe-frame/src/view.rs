//! View and projection matrices for looking at the flat globe.

use glam::{DMat4, DVec2, DVec3, DVec4};
use globe_math::Frustum;

/// Camera state for one frame, in flat-globe model coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Model to eye transform.
    pub view: DMat4,
    /// Eye to clip transform, `[0, 1]` depth range.
    pub projection: DMat4,
    /// Viewport size in pixels.
    pub viewport: DVec2,
}

impl View {
    pub fn new(view: DMat4, projection: DMat4, viewport: DVec2) -> Self {
        Self {
            view,
            projection,
            viewport,
        }
    }

    /// Orthographic view looking straight down −Z onto the map plane.
    ///
    /// `center` is the model-space (x, y) under the middle of the screen and
    /// `half_extent` the half width and height of the visible area in meters.
    /// The near and far planes enclose `z` in `[-altitude, altitude]`.
    pub fn top_down(center: DVec2, half_extent: DVec2, altitude: f64, viewport: DVec2) -> Self {
        let eye = DVec3::new(center.x, center.y, altitude);
        let view = DMat4::look_to_rh(eye, DVec3::NEG_Z, DVec3::Y);
        let projection = DMat4::orthographic_rh(
            -half_extent.x,
            half_extent.x,
            -half_extent.y,
            half_extent.y,
            0.0,
            2.0 * altitude,
        );
        Self::new(view, projection, viewport)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection * self.view
    }

    /// Eye position in model coordinates.
    pub fn eye(&self) -> DVec3 {
        self.view.inverse().w_axis.truncate()
    }

    /// The full view frustum, expressed in model coordinates.
    pub fn frustum_in_model_coordinates(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection())
    }

    /// Sub-frustum covering a `size` pixel rectangle centred on `point`.
    ///
    /// `point` is in window pixels with the origin at the top-left corner.
    /// The pick matrix rescales clip space so that the rectangle fills it,
    /// in the manner of `gluPickMatrix`.
    pub fn pick_frustum(&self, point: DVec2, size: DVec2) -> Frustum {
        let size = size.max(DVec2::ONE);
        let sx = self.viewport.x / size.x;
        let sy = self.viewport.y / size.y;
        let tx = (self.viewport.x - 2.0 * point.x) / size.x;
        // Window y grows downward, clip y grows upward.
        let ty = (2.0 * point.y - self.viewport.y) / size.y;

        let pick = DMat4::from_cols(
            DVec4::new(sx, 0.0, 0.0, 0.0),
            DVec4::new(0.0, sy, 0.0, 0.0),
            DVec4::new(0.0, 0.0, 1.0, 0.0),
            DVec4::new(tx, ty, 0.0, 1.0),
        );
        Frustum::from_view_projection(&(pick * self.view_projection()))
    }

    /// Model-space point on the `z = 0` map plane under a window pixel, if the
    /// pixel's ray reaches the plane inside the depth range.
    pub fn unproject_to_plane(&self, ndc: DVec2) -> Option<DVec3> {
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(DVec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(DVec3::new(ndc.x, ndc.y, 1.0));
        let dz = far.z - near.z;
        if dz.abs() < f64::EPSILON {
            return None;
        }
        let t = -near.z / dz;
        (0.0..=1.0).contains(&t).then(|| near + (far - near) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globe_math::Aabb;

    fn map_view() -> View {
        View::top_down(DVec2::new(1000.0, 500.0), DVec2::new(100.0, 50.0), 10_000.0, DVec2::new(800.0, 400.0))
    }

    #[test]
    fn test_top_down_frustum_bounds_visible_area() {
        let frustum = map_view().frustum_in_model_coordinates();
        assert!(frustum.contains_point(DVec3::new(1000.0, 500.0, 0.0)));
        assert!(frustum.contains_point(DVec3::new(1099.0, 549.0, 8000.0)));
        assert!(!frustum.contains_point(DVec3::new(1101.0, 500.0, 0.0)));
        assert!(!frustum.contains_point(DVec3::new(1000.0, 449.0, 0.0)));
        assert!(!frustum.contains_point(DVec3::new(1000.0, 500.0, 10_001.0)));
    }

    #[test]
    fn test_eye_position() {
        let eye = map_view().eye();
        assert!((eye - DVec3::new(1000.0, 500.0, 10_000.0)).length() < 1e-6);
    }

    #[test]
    fn test_pick_frustum_is_narrow() {
        let view = map_view();
        // Screen centre, 4x4 pixels: each pixel covers 0.25 m.
        let pick = view.pick_frustum(DVec2::new(400.0, 200.0), DVec2::new(4.0, 4.0));
        assert!(pick.contains_point(DVec3::new(1000.0, 500.0, 0.0)));
        assert!(pick.contains_point(DVec3::new(1000.4, 500.4, 0.0)));
        assert!(!pick.contains_point(DVec3::new(1001.0, 500.0, 0.0)));
    }

    #[test]
    fn test_pick_frustum_follows_window_y_down() {
        let view = map_view();
        // Top-left quadrant of the window sees the north-west of the area.
        let pick = view.pick_frustum(DVec2::new(200.0, 100.0), DVec2::new(8.0, 8.0));
        assert!(pick.contains_point(DVec3::new(950.0, 525.0, 0.0)));
        assert!(!pick.intersects_aabb(&Aabb::new(DVec3::new(1000.0, 450.0, -1.0), DVec3::new(1100.0, 500.0, 1.0))));
    }

    #[test]
    fn test_unproject_to_plane() {
        let view = map_view();
        let centre = view.unproject_to_plane(DVec2::ZERO).unwrap();
        assert!((centre - DVec3::new(1000.0, 500.0, 0.0)).length() < 1e-6);
        let corner = view.unproject_to_plane(DVec2::new(1.0, 1.0)).unwrap();
        assert!((corner - DVec3::new(1100.0, 550.0, 0.0)).length() < 1e-6);
    }
}
