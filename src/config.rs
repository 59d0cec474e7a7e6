//! Startup configuration: TOML file plus command-line overrides.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::math::{Domain, ScalarField, field_by_name};
use crate::renderer::camera::Camera;
use crate::renderer::lighting::LightingParams;
use crate::renderer::transform::Animation;

#[derive(Parser, Debug, Default)]
#[command(name = "plot3d", about = "Animated, lit 3D surface plot")]
pub struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scalar field to plot (sinc, saddle, gaussian, waves).
    #[arg(short, long)]
    pub field: Option<String>,

    /// Frame duration in milliseconds, also the animation tick.
    #[arg(long)]
    pub frame_ms: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub frame_ms: u32,
    pub overlay: bool,
    pub clear_color: [f64; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "plot3d".to_string(),
            width: 720,
            height: 720,
            frame_ms: 1000 / 60,
            overlay: true,
            clear_color: [0.25, 0.5, 0.75, 1.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub field: String,
    pub window: WindowConfig,
    pub domain: Domain,
    pub camera: Camera,
    pub animation: Animation,
    pub lighting: LightingParams,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            field: "sinc".to_string(),
            window: WindowConfig::default(),
            domain: Domain::default(),
            camera: Camera::default(),
            animation: Animation::default(),
            lighting: LightingParams::default(),
        }
    }
}

impl PlotConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Resolves the file named on the command line, then applies CLI overrides
    /// and validates the result.
    pub fn from_cli(cli: &Cli) -> ConfigResult<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::load(path)?
            }
            None => {
                log::info!("No configuration file given, using defaults");
                Self::default()
            }
        };

        if let Some(field) = &cli.field {
            config.field = field.clone();
        }
        if let Some(frame_ms) = cli.frame_ms {
            config.window.frame_ms = frame_ms;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.domain.validate()?;
        field_by_name(&self.field)?;
        Ok(())
    }

    pub fn scalar_field(&self) -> ConfigResult<Box<dyn ScalarField>> {
        field_by_name(&self.field)
    }
}
