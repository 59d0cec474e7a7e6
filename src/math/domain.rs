use serde::Deserialize;

use crate::error::{Axis, ConfigError};

/// Largest vertex count addressable by the 16-bit index buffer.
pub const MAX_GRID_VERTICES: u64 = u16::MAX as u64 + 1;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Domain {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub nx: u32,
    pub ny: u32,
    pub groupx: u32,
    pub groupy: u32,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            x1: -8.0,
            x2: 8.0,
            y1: -8.0,
            y2: 8.0,
            nx: 50,
            ny: 50,
            groupx: 5,
            groupy: 5,
        }
    }
}

impl Domain {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_axis(Axis::X, self.x1, self.x2, self.nx, self.groupx)?;
        check_axis(Axis::Y, self.y1, self.y2, self.ny, self.groupy)?;

        let vertices = self.vertex_count();
        if vertices > MAX_GRID_VERTICES {
            return Err(ConfigError::GridTooLarge {
                vertices,
                limit: MAX_GRID_VERTICES,
            });
        }
        Ok(())
    }

    /// Saturates at `u64::MAX` so oversized grids still fail validation.
    pub fn vertex_count(&self) -> u64 {
        (self.nx as u64 + 1).saturating_mul(self.ny as u64 + 1)
    }

    pub fn triangle_count(&self) -> u64 {
        (self.nx as u64 * self.ny as u64).saturating_mul(2)
    }

    pub fn step(&self) -> (f64, f64) {
        (
            (self.x2 - self.x1) / self.nx as f64,
            (self.y2 - self.y1) / self.ny as f64,
        )
    }
}

fn check_axis(axis: Axis, min: f64, max: f64, cells: u32, group: u32) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(ConfigError::InvalidBounds { axis, min, max });
    }
    if cells == 0 {
        return Err(ConfigError::ZeroCells { axis });
    }
    if group == 0 {
        return Err(ConfigError::ZeroGroup { axis });
    }
    if group > cells {
        return Err(ConfigError::GroupExceedsCells { axis, group, cells });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domain_is_valid() {
        let domain = Domain::default();
        domain.validate().unwrap();
        assert_eq!(domain.vertex_count(), 51 * 51);
        assert_eq!(domain.step(), (16.0 / 50.0, 16.0 / 50.0));
    }

    #[test]
    fn rejects_inverted_and_degenerate_bounds() {
        let inverted = Domain { x1: 1.0, x2: -1.0, ..Domain::default() };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidBounds { axis: Axis::X, .. })
        ));

        let flat = Domain { y1: 2.0, y2: 2.0, ..Domain::default() };
        assert!(matches!(
            flat.validate(),
            Err(ConfigError::InvalidBounds { axis: Axis::Y, .. })
        ));

        let nan = Domain { x2: f64::NAN, ..Domain::default() };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn rejects_zero_cells_and_groups() {
        let no_cells = Domain { ny: 0, ..Domain::default() };
        assert!(matches!(
            no_cells.validate(),
            Err(ConfigError::ZeroCells { axis: Axis::Y })
        ));

        let no_group = Domain { groupx: 0, ..Domain::default() };
        assert!(matches!(
            no_group.validate(),
            Err(ConfigError::ZeroGroup { axis: Axis::X })
        ));

        let wide_group = Domain { nx: 4, groupx: 5, ..Domain::default() };
        assert!(matches!(
            wide_group.validate(),
            Err(ConfigError::GroupExceedsCells { axis: Axis::X, group: 5, cells: 4 })
        ));
    }

    #[test]
    fn enforces_sixteen_bit_index_ceiling() {
        // 256 x 256 samples is exactly 65536 vertices.
        let largest = Domain { nx: 255, ny: 255, ..Domain::default() };
        largest.validate().unwrap();

        let too_large = Domain { nx: 256, ny: 255, ..Domain::default() };
        match too_large.validate() {
            Err(ConfigError::GridTooLarge { vertices, limit }) => {
                assert_eq!(vertices, 257 * 256);
                assert_eq!(limit, 65536);
            }
            other => panic!("expected GridTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn maximal_cell_counts_are_rejected_without_overflow() {
        let huge = Domain { nx: u32::MAX, ny: u32::MAX, groupx: 1, groupy: 1, ..Domain::default() };
        assert_eq!(huge.vertex_count(), u64::MAX);
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::GridTooLarge { vertices: u64::MAX, limit: MAX_GRID_VERTICES })
        ));

        let one_axis = Domain { nx: u32::MAX, ny: 1, groupx: 1, groupy: 1, ..Domain::default() };
        assert!(matches!(one_axis.validate(), Err(ConfigError::GridTooLarge { .. })));
    }
}
