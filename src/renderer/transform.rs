//! Per-frame model/view/projection matrices and the normal transform.

use glam::{Mat3, Mat4, Vec3};
use serde::Deserialize;

use crate::renderer::camera::{Camera, aspect_ratio};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Animation {
    /// Converts one tick (a frame duration in milliseconds) into animation time.
    /// Tied to the frame cadence, not to wall-clock time.
    pub tick_scale: f32,
    pub x_speed: f32,
    pub y_speed: f32,
    pub model_scale: Vec3,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            tick_scale: 0.03,
            x_speed: 1.0,
            y_speed: 2.0,
            model_scale: Vec3::new(0.2, 0.2, 1.0),
        }
    }
}

/// Accumulated rotation angles, in degrees. Never wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub rx: f32,
    pub ry: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTransforms {
    pub model_view_projection: Mat4,
    pub model: Mat4,
    pub model_cofactor: Mat4,
}

/// Cofactor matrix of the upper-left 3x3 block of `m`, equal to
/// `det(m) * inverse(transpose(m))`. Maps normals up to a positive factor, so
/// consumers must renormalise. Translation is dropped.
pub fn cofactor(m: Mat4) -> Mat4 {
    let a = Mat3::from_mat4(m);
    // Column k of the cofactor matrix is the cross product of the other two columns.
    let c = Mat3::from_cols(
        a.y_axis.cross(a.z_axis),
        a.z_axis.cross(a.x_axis),
        a.x_axis.cross(a.y_axis),
    );
    Mat4::from_mat3(c)
}

#[derive(Clone, Debug)]
pub struct TransformPipeline {
    camera: Camera,
    animation: Animation,
    rotation: RotationState,
}

impl TransformPipeline {
    pub fn new(camera: Camera, animation: Animation) -> Self {
        Self {
            camera,
            animation,
            rotation: RotationState::default(),
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn advance(&mut self, delta_ticks: u32) {
        let t = delta_ticks as f32 * self.animation.tick_scale;
        self.rotation.rx += self.animation.x_speed * t;
        self.rotation.ry += self.animation.y_speed * t;
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rx = Mat4::from_axis_angle(Vec3::X, self.rotation.rx.to_radians());
        let ry = Mat4::from_axis_angle(Vec3::Y, self.rotation.ry.to_radians());
        rx * ry * Mat4::from_scale(self.animation.model_scale)
    }

    pub fn transforms(&self, width: u32, height: u32) -> FrameTransforms {
        let model = self.model_matrix();
        let view_proj = self.camera.view_projection_matrix(aspect_ratio(width, height));

        FrameTransforms {
            model_view_projection: view_proj * model,
            model,
            model_cofactor: cofactor(model),
        }
    }

    pub fn tick(&mut self, delta_ticks: u32, width: u32, height: u32) -> FrameTransforms {
        self.advance(delta_ticks);
        self.transforms(width, height)
    }
}
