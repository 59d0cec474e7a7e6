use glam::{Mat4, Vec3};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    /// Vertical field of view, in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.5, 6.0),
            target: Vec3::ZERO,
            up: Vec3::Z,

            fov_y: 60.0,
            near: 0.01,
            far: 10.0,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Right-handed perspective with wgpu's `[0, 1]` depth range.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// Width over height, falling back to square for a zero-height (minimised) viewport.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_maps_to_view_origin() {
        let camera = Camera::default();
        let eye_in_view = camera.view_matrix().transform_point3(camera.eye);
        assert!(eye_in_view.length() < 1e-5);

        let target_in_view = camera.view_matrix().transform_point3(camera.target);
        assert!(target_in_view.x.abs() < 1e-5 && target_in_view.y.abs() < 1e-5);
        assert!(target_in_view.z < 0.0);
    }

    #[test]
    fn target_projects_inside_depth_range() {
        let camera = Camera::default();
        let clip = camera.view_projection_matrix(1.0) * camera.target.extend(1.0);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
        assert!((clip.x / clip.w).abs() < 1e-5);
    }

    #[test]
    fn degenerate_viewport_has_unit_aspect() {
        assert_eq!(aspect_ratio(1280, 720), 1280.0 / 720.0);
        assert_eq!(aspect_ratio(800, 0), 1.0);
        assert_eq!(aspect_ratio(0, 0), 1.0);
    }
}
