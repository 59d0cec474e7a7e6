//! Per-frame orchestration: animation state in, mesh plus uniform payloads out.

use crate::math::Mesh;
use crate::renderer::lighting::LightingParams;
use crate::renderer::transform::{FrameTransforms, RotationState, TransformPipeline};
use crate::renderer::uniforms::{UniformBlock, UniformConsumer};

/// Everything the backend needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub mesh: &'a Mesh,
    pub transforms: FrameTransforms,
    pub lighting: &'a LightingParams,
}

impl Frame<'_> {
    pub fn submit(&self, consumer: &mut impl UniformConsumer) {
        for block in UniformBlock::frame_blocks(&self.transforms, self.lighting) {
            consumer.apply(&block);
        }
    }
}

pub struct FrameOrchestrator {
    mesh: Mesh,
    pipeline: TransformPipeline,
    lighting: LightingParams,
    frames: u64,
}

impl FrameOrchestrator {
    pub fn new(mesh: Mesh, pipeline: TransformPipeline, lighting: LightingParams) -> Self {
        Self {
            mesh,
            pipeline,
            lighting,
            frames: 0,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn rotation(&self) -> RotationState {
        self.pipeline.rotation()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advances the animation by one tick of `delta_ticks` duration and
    /// assembles the payload for a `width` x `height` drawable.
    pub fn tick(&mut self, delta_ticks: u32, width: u32, height: u32) -> Frame<'_> {
        let transforms = self.pipeline.tick(delta_ticks, width, height);
        self.frames += 1;

        Frame {
            mesh: &self.mesh,
            transforms,
            lighting: &self.lighting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Domain, build_surface_mesh, field::Sinc};
    use crate::renderer::camera::Camera;
    use crate::renderer::transform::Animation;

    #[derive(Default)]
    struct RecordingConsumer {
        blocks: Vec<(&'static str, Vec<u8>)>,
    }

    impl UniformConsumer for RecordingConsumer {
        fn apply(&mut self, block: &UniformBlock) {
            self.blocks.push((block.name(), block.bytes().to_vec()));
        }
    }

    fn orchestrator() -> FrameOrchestrator {
        let domain = Domain { nx: 8, ny: 8, groupx: 2, groupy: 2, ..Domain::default() };
        let mesh = build_surface_mesh(&Sinc, &domain).unwrap();
        let pipeline = TransformPipeline::new(Camera::default(), Animation::default());
        FrameOrchestrator::new(mesh, pipeline, LightingParams::default())
    }

    #[test]
    fn ticking_leaves_mesh_untouched() {
        let mut orchestrator = orchestrator();
        let before = orchestrator.mesh().clone();

        for _ in 0..10 {
            let frame = orchestrator.tick(16, 720, 720);
            assert_eq!(frame.mesh.vertex_bytes(), before.vertex_bytes());
        }

        assert_eq!(orchestrator.mesh(), &before);
        assert_eq!(orchestrator.frames(), 10);
    }

    #[test]
    fn each_tick_produces_fresh_transforms() {
        let mut orchestrator = orchestrator();
        let first = orchestrator.tick(16, 720, 720).transforms;
        let second = orchestrator.tick(16, 720, 720).transforms;

        assert_ne!(first.model, second.model);
        let t = 16.0_f32 * 0.03;
        assert_eq!(orchestrator.rotation().rx, t + t);
    }

    #[test]
    fn lighting_is_constant_across_frames() {
        let mut orchestrator = orchestrator();
        let a = *orchestrator.tick(16, 720, 720).lighting;
        let b = *orchestrator.tick(16, 1024, 768).lighting;
        assert_eq!(a, b);
        assert_eq!(a, LightingParams::default());
    }

    #[test]
    fn submit_sends_four_blocks_per_frame() {
        let mut orchestrator = orchestrator();
        let mut consumer = RecordingConsumer::default();

        let frame = orchestrator.tick(16, 720, 720);
        frame.submit(&mut consumer);

        let names: Vec<_> = consumer.blocks.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["vs_params", "fs_params", "fs_material", "fs_light"]);

        let mvp = frame.transforms.model_view_projection.to_cols_array();
        assert_eq!(&consumer.blocks[0].1[..64], bytemuck::cast_slice::<f32, u8>(&mvp));
    }
}
