//! Error types for plot configuration and the GPU backend.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Invalid startup configuration. Always fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {axis} bounds: [{min}, {max}]")]
    InvalidBounds { axis: Axis, min: f64, max: f64 },

    #[error("n{axis} must be at least 1")]
    ZeroCells { axis: Axis },

    #[error("group{axis} must be at least 1")]
    ZeroGroup { axis: Axis },

    #[error("group{axis} = {group} exceeds n{axis} = {cells}")]
    GroupExceedsCells { axis: Axis, group: u32, cells: u32 },

    #[error("grid of {vertices} vertices exceeds the 16-bit index limit of {limit}")]
    GridTooLarge { vertices: u64, limit: u64 },

    #[error("unknown scalar field '{0}' (expected one of: sinc, saddle, gaussian, waves)")]
    UnknownField(String),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures of the wgpu backend. Not retried.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("out of GPU memory")]
    OutOfMemory,

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
