//! Grid storage and geometry
pub mod geometry;
pub mod mesh;
pub mod shapes;

pub use geometry::ElementGeometry;
pub use mesh::TriangleMesh;
