pub mod camera;
pub mod gpu;
pub mod lighting;
pub mod transform;
pub mod uniforms;

pub use gpu::GpuState;
pub use transform::TransformPipeline;
