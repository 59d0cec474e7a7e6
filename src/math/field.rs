use glam::DVec2;

use crate::error::ConfigError;

/// Below this radius `sin(r)/r` is replaced by its series expansion.
pub const SINC_SERIES_RADIUS: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    pub z: f64,
    pub gradient: DVec2,
}

/// A scalar function `z = f(x, y)` with an analytic, numerically stable gradient.
pub trait ScalarField {
    fn evaluate(&self, x: f64, y: f64) -> FieldSample;

    fn name(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Sinc;

impl ScalarField for Sinc {
    fn evaluate(&self, x: f64, y: f64) -> FieldSample {
        let r = (x * x + y * y).sqrt();
        let r2 = r * r;

        if r < SINC_SERIES_RADIUS {
            return FieldSample {
                z: 1.0 - r2 / 6.0 + r2 * r2 / 120.0,
                gradient: DVec2::new(x, y) * (-2.0 / 3.0),
            };
        }

        let (sin_r, cos_r) = r.sin_cos();
        let d_dr = (r * cos_r - sin_r) / r2;
        FieldSample {
            z: sin_r / r,
            gradient: DVec2::new(x, y) * (d_dr / r),
        }
    }

    fn name(&self) -> &'static str {
        "sinc"
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Saddle;

impl ScalarField for Saddle {
    fn evaluate(&self, x: f64, y: f64) -> FieldSample {
        FieldSample {
            z: (x * x - y * y) / 16.0,
            gradient: DVec2::new(x / 8.0, -y / 8.0),
        }
    }

    fn name(&self) -> &'static str {
        "saddle"
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Gaussian;

impl ScalarField for Gaussian {
    fn evaluate(&self, x: f64, y: f64) -> FieldSample {
        let z = (-(x * x + y * y) / 8.0).exp();
        FieldSample {
            z,
            gradient: DVec2::new(x, y) * (-z / 4.0),
        }
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Waves;

impl ScalarField for Waves {
    fn evaluate(&self, x: f64, y: f64) -> FieldSample {
        FieldSample {
            z: (x.sin() + y.sin()) / 2.0,
            gradient: DVec2::new(x.cos(), y.cos()) / 2.0,
        }
    }

    fn name(&self) -> &'static str {
        "waves"
    }
}

pub fn field_by_name(name: &str) -> Result<Box<dyn ScalarField>, ConfigError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "sinc" => Ok(Box::new(Sinc)),
        "saddle" => Ok(Box::new(Saddle)),
        "gaussian" => Ok(Box::new(Gaussian)),
        "waves" => Ok(Box::new(Waves)),
        _ => Err(ConfigError::UnknownField(name.to_string())),
    }
}
