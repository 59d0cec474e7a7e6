pub mod domain;
pub mod field;
pub mod mesh;

pub use domain::Domain;
pub use field::{ScalarField, field_by_name};
pub use mesh::{Mesh, Vertex, build_surface_mesh};
