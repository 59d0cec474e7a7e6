use glam::Vec3;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 4.0),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::ONE,
        }
    }
}

/// Phong material with separate diffuse colours for the two faces of the surface.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse_front: Vec3,
    pub diffuse_back: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::new(0.4, 0.4, 1.0),
            diffuse_front: Vec3::new(0.4, 0.4, 1.0),
            diffuse_back: Vec3::new(1.0, 0.4, 0.4),
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightingParams {
    pub view_position: Vec3,
    pub light: Light,
    pub material: Material,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            view_position: Vec3::new(0.0, 3.0, 2.0),
            light: Light::default(),
            material: Material::default(),
        }
    }
}
