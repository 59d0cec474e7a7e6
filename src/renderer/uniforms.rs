use bytemuck::{Pod, Zeroable};

use crate::renderer::lighting::{Light, LightingParams, Material};
use crate::renderer::transform::FrameTransforms;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub model_cofactor: [[f32; 4]; 4],
}

impl From<&FrameTransforms> for TransformUniform {
    fn from(t: &FrameTransforms) -> Self {
        Self {
            mvp: t.model_view_projection.to_cols_array_2d(),
            model: t.model.to_cols_array_2d(),
            model_cofactor: t.model_cofactor.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewUniform {
    pub view_pos: [f32; 3],
    pub _padding: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 3],
    pub shininess: f32,
    pub diffuse_front: [f32; 3],
    pub _pad1: f32,
    pub diffuse_back: [f32; 3],
    pub _pad2: f32,
    pub specular: [f32; 3],
    pub _pad3: f32,
}

impl From<&Material> for MaterialUniform {
    fn from(m: &Material) -> Self {
        Self {
            ambient: m.ambient.to_array(),
            shininess: m.shininess,
            diffuse_front: m.diffuse_front.to_array(),
            _pad1: 0.0,
            diffuse_back: m.diffuse_back.to_array(),
            _pad2: 0.0,
            specular: m.specular.to_array(),
            _pad3: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub ambient: [f32; 3],
    pub _pad1: f32,
    pub diffuse: [f32; 3],
    pub _pad2: f32,
    pub specular: [f32; 3],
    pub _pad3: f32,
}

impl From<&Light> for LightUniform {
    fn from(l: &Light) -> Self {
        Self {
            position: l.position.to_array(),
            _pad0: 0.0,
            ambient: l.ambient.to_array(),
            _pad1: 0.0,
            diffuse: l.diffuse.to_array(),
            _pad2: 0.0,
            specular: l.specular.to_array(),
            _pad3: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformBlock {
    Transforms(TransformUniform),
    View(ViewUniform),
    Material(MaterialUniform),
    Light(LightUniform),
}

impl UniformBlock {
    pub fn name(&self) -> &'static str {
        match self {
            UniformBlock::Transforms(_) => "vs_params",
            UniformBlock::View(_) => "fs_params",
            UniformBlock::Material(_) => "fs_material",
            UniformBlock::Light(_) => "fs_light",
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            UniformBlock::Transforms(u) => bytemuck::bytes_of(u),
            UniformBlock::View(u) => bytemuck::bytes_of(u),
            UniformBlock::Material(u) => bytemuck::bytes_of(u),
            UniformBlock::Light(u) => bytemuck::bytes_of(u),
        }
    }

    pub fn frame_blocks(transforms: &FrameTransforms, lighting: &LightingParams) -> [UniformBlock; 4] {
        [
            UniformBlock::Transforms(transforms.into()),
            UniformBlock::View(ViewUniform {
                view_pos: lighting.view_position.to_array(),
                _padding: 0.0,
            }),
            UniformBlock::Material((&lighting.material).into()),
            UniformBlock::Light((&lighting.light).into()),
        ]
    }
}

pub trait UniformConsumer {
    fn apply(&mut self, block: &UniformBlock);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_sizes_match_wgsl_layouts() {
        assert_eq!(size_of::<TransformUniform>(), 3 * 64);
        assert_eq!(size_of::<ViewUniform>(), 16);
        assert_eq!(size_of::<MaterialUniform>(), 64);
        assert_eq!(size_of::<LightUniform>(), 64);
    }

    #[test]
    fn material_packs_shininess_after_ambient() {
        let m = MaterialUniform::from(&Material::default());
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&m));
        assert_eq!(&floats[0..4], &[0.4, 0.4, 1.0, 32.0]);
        assert_eq!(&floats[8..11], &[1.0, 0.4, 0.4]);
    }

    #[test]
    fn frame_blocks_are_named_and_ordered() {
        let transforms = FrameTransforms {
            model_view_projection: glam::Mat4::IDENTITY,
            model: glam::Mat4::IDENTITY,
            model_cofactor: glam::Mat4::IDENTITY,
        };
        let blocks = UniformBlock::frame_blocks(&transforms, &LightingParams::default());
        let names: Vec<_> = blocks.iter().map(UniformBlock::name).collect();
        assert_eq!(names, ["vs_params", "fs_params", "fs_material", "fs_light"]);
        assert_eq!(blocks[0].bytes().len(), 192);

        match blocks[1] {
            UniformBlock::View(v) => assert_eq!(v.view_pos, [0.0, 3.0, 2.0]),
            other => panic!("unexpected block {other:?}"),
        }
    }
}
