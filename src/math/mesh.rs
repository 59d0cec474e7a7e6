use bytemuck::{Pod, Zeroable};

use crate::error::ConfigError;
use crate::math::domain::Domain;
use crate::math::field::ScalarField;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Offset inside the enclosing grid-line group, in `[0, 1)`.
    pub cell_local: [f32; 2],
    pub gradient: [f32; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<[u16; 3]>,
    z_min: f32,
    z_max: f32,
}

impl Mesh {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u16; 3]] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of `u16` entries in the index buffer.
    pub fn index_count(&self) -> u32 {
        (self.indices.len() * 3) as u32
    }

    pub fn z_range(&self) -> (f32, f32) {
        (self.z_min, self.z_max)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[inline]
fn grid_index(i: u32, j: u32, ny: u32) -> u16 {
    (i * (ny + 1) + j) as u16
}

#[inline]
fn group_offset(origin: f64, step: f64, i: u32, group: u32) -> f64 {
    let coord = origin + i as f64 * step;
    let anchor = origin + ((i / group) * group) as f64 * step;
    (coord - anchor) / (group as f64 * step)
}

/// Emits `(nx+1)*(ny+1)` vertices and two triangles per cell. Fails before
/// allocating if `domain` is invalid or too large for 16-bit indices.
pub fn build_surface_mesh(field: &dyn ScalarField, domain: &Domain) -> Result<Mesh, ConfigError> {
    domain.validate()?;

    let Domain { x1, y1, nx, ny, groupx, groupy, .. } = *domain;
    let (dx, dy) = domain.step();

    let mut vertices = Vec::with_capacity(domain.vertex_count() as usize);
    let mut z_min = f32::MAX;
    let mut z_max = f32::MIN;

    for i in 0..=nx {
        let x = x1 + i as f64 * dx;
        let x_bar = group_offset(x1, dx, i, groupx);

        for j in 0..=ny {
            let y = y1 + j as f64 * dy;
            let y_bar = group_offset(y1, dy, j, groupy);

            let sample = field.evaluate(x, y);
            let z = sample.z as f32;
            if z.is_finite() {
                z_min = z_min.min(z);
                z_max = z_max.max(z);
            }

            vertices.push(Vertex {
                position: [x as f32, y as f32, z],
                cell_local: [x_bar as f32, y_bar as f32],
                gradient: [sample.gradient.x as f32, sample.gradient.y as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity(domain.triangle_count() as usize);
    for i in 0..nx {
        for j in 0..ny {
            let a = grid_index(i, j, ny);
            let b = grid_index(i + 1, j, ny);
            let c = grid_index(i, j + 1, ny);
            let d = grid_index(i + 1, j + 1, ny);

            indices.push([a, b, c]);
            indices.push([c, b, d]);
        }
    }

    log::info!(
        "Built {} surface: {} vertices, {} triangles, z in [{:.3}, {:.3}]",
        field.name(),
        vertices.len(),
        indices.len(),
        z_min,
        z_max
    );

    Ok(Mesh {
        vertices,
        indices,
        z_min,
        z_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::field::{Gaussian, Saddle, Sinc};

    fn small_domain() -> Domain {
        Domain {
            x1: -8.0,
            x2: 8.0,
            y1: -8.0,
            y2: 8.0,
            nx: 2,
            ny: 2,
            groupx: 1,
            groupy: 1,
        }
    }

    fn signed_area(mesh: &Mesh, tri: [u16; 3]) -> f32 {
        let p = |k: u16| mesh.vertices()[k as usize].position;
        let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
        (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
    }

    #[test]
    fn three_by_three_grid_around_origin() {
        let mesh = build_surface_mesh(&Sinc, &small_domain()).unwrap();

        assert_eq!(mesh.vertices().len(), 9);
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.index_count(), 24);

        let centre = mesh.vertices()[1 * 3 + 1];
        assert_eq!(centre.position, [0.0, 0.0, 1.0]);
        assert_eq!(centre.gradient, [0.0, 0.0]);
    }

    #[test]
    fn index_buffer_covers_every_cell() {
        let domain = Domain {
            nx: 7,
            ny: 11,
            groupx: 3,
            groupy: 4,
            ..Domain::default()
        };
        let mesh = build_surface_mesh(&Saddle, &domain).unwrap();
        let vertex_count = (domain.nx + 1) * (domain.ny + 1);

        assert_eq!(mesh.index_count(), 6 * domain.nx * domain.ny);
        assert_eq!(mesh.index_bytes().len(), 6 * 7 * 11 * 2);
        assert_eq!(mesh.vertex_bytes().len(), vertex_count as usize * 28);
        for tri in mesh.triangles() {
            assert!(tri.iter().all(|&k| (k as u32) < vertex_count));
        }
    }

    #[test]
    fn triangles_only_join_adjacent_grid_points() {
        let domain = Domain { nx: 5, ny: 4, groupx: 1, groupy: 1, ..Domain::default() };
        let mesh = build_surface_mesh(&Gaussian, &domain).unwrap();
        let stride = domain.ny + 1;

        for tri in mesh.triangles() {
            for &a in tri {
                for &b in tri {
                    let (ia, ja) = (a as u32 / stride, a as u32 % stride);
                    let (ib, jb) = (b as u32 / stride, b as u32 % stride);
                    assert!(ia.abs_diff(ib) <= 1 && ja.abs_diff(jb) <= 1);
                }
            }
        }
    }

    #[test]
    fn winding_is_consistent() {
        let domain = Domain { nx: 6, ny: 9, groupx: 2, groupy: 3, ..Domain::default() };
        let mesh = build_surface_mesh(&Sinc, &domain).unwrap();

        let first = signed_area(&mesh, mesh.triangles()[0]).signum();
        assert_ne!(first, 0.0);
        for &tri in mesh.triangles() {
            assert_eq!(signed_area(&mesh, tri).signum(), first);
        }
    }

    #[test]
    fn vertices_follow_row_major_layout() {
        let domain = Domain { nx: 4, ny: 3, groupx: 2, groupy: 3, ..Domain::default() };
        let mesh = build_surface_mesh(&Saddle, &domain).unwrap();
        let (dx, dy) = domain.step();

        for i in 0..=domain.nx {
            for j in 0..=domain.ny {
                let v = mesh.vertices()[(i * (domain.ny + 1) + j) as usize];
                assert_eq!(v.position[0], (domain.x1 + i as f64 * dx) as f32);
                assert_eq!(v.position[1], (domain.y1 + j as f64 * dy) as f32);
            }
        }
    }

    #[test]
    fn cell_local_coordinates_stay_in_unit_square() {
        let domains = [
            Domain::default(),
            Domain { x1: -1.3, x2: 2.9, y1: 0.1, y2: 0.7, nx: 37, ny: 13, groupx: 6, groupy: 13 },
            Domain { nx: 3, ny: 3, groupx: 3, groupy: 1, ..Domain::default() },
        ];

        for domain in domains {
            let mesh = build_surface_mesh(&Sinc, &domain).unwrap();
            for v in mesh.vertices() {
                let [u, w] = v.cell_local;
                assert!((0.0..1.0).contains(&u), "u = {u}");
                assert!((0.0..1.0).contains(&w), "v = {w}");
            }
        }
    }

    #[test]
    fn cell_local_restarts_at_each_group() {
        let domain = Domain { nx: 10, ny: 10, groupx: 5, groupy: 5, ..Domain::default() };
        let mesh = build_surface_mesh(&Sinc, &domain).unwrap();

        let u = |i: u32| mesh.vertices()[(i * 11) as usize].cell_local[0];
        assert_eq!(u(0), 0.0);
        assert_eq!(u(5), 0.0);
        assert_eq!(u(10), 0.0);
        assert!((u(2) - 0.4).abs() < 1e-6);
        assert!((u(9) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn building_twice_is_bit_identical() {
        let domain = Domain::default();
        let a = build_surface_mesh(&Sinc, &domain).unwrap();
        let b = build_surface_mesh(&Sinc, &domain).unwrap();

        assert_eq!(a.vertex_bytes(), b.vertex_bytes());
        assert_eq!(a.index_bytes(), b.index_bytes());
    }

    #[test]
    fn malformed_domain_fails_before_sampling() {
        let domain = Domain { groupy: 0, ..Domain::default() };
        assert!(matches!(
            build_surface_mesh(&Sinc, &domain),
            Err(ConfigError::ZeroGroup { .. })
        ));

        let huge = Domain { nx: 300, ny: 300, ..Domain::default() };
        assert!(matches!(
            build_surface_mesh(&Sinc, &huge),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn z_range_spans_sampled_heights() {
        let mesh = build_surface_mesh(&Sinc, &small_domain()).unwrap();
        let (lo, hi) = mesh.z_range();
        assert_eq!(hi, 1.0);
        assert!(lo < 0.2);
    }
}
