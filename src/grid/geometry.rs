//! Geometry of a single flat triangle
use crate::grid::mesh::TriangleMesh;
use crate::types::RealScalar;

/// Dot product of two vectors in 3D
pub(crate) fn dot<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> T {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product of two vectors in 3D
pub(crate) fn cross<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean norm of a vector in 3D
pub(crate) fn norm<T: RealScalar>(a: &[T; 3]) -> T {
    dot(a, a).sqrt()
}

/// Geometry of a flat triangle
///
/// The reference triangle has vertices (0, 0), (1, 0) and (0, 1). The map to the physical cell is
/// `x = c0 + s (c1 - c0) + t (c2 - c0)`, so the Jacobian is constant on the cell. The normal is
/// not normalised: its length is the integration element, i.e. twice the area of the cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeometry<T: RealScalar> {
    /// The corners of the cell
    pub corners: [[T; 3]; 3],
    /// The two columns of the Jacobian of the reference map
    pub jacobian: [[T; 3]; 2],
    /// The normal (with the normal sign applied), scaled by the integration element
    pub normal: [T; 3],
    /// The integration element
    pub integration_element: T,
}

impl<T: RealScalar> ElementGeometry<T> {
    /// Compute the geometry of a cell of a mesh
    pub fn new(mesh: &TriangleMesh<T>, cell: usize) -> Self {
        Self::from_corners(mesh.cell_corners(cell), mesh.normal_sign(cell))
    }

    /// Compute the geometry of a cell given its corners and its normal sign
    pub fn from_corners(corners: [[T; 3]; 3], normal_sign: T) -> Self {
        let mut jacobian = [[T::zero(); 3]; 2];
        for i in 0..3 {
            jacobian[0][i] = corners[1][i] - corners[0][i];
            jacobian[1][i] = corners[2][i] - corners[0][i];
        }
        let mut normal = cross(&jacobian[0], &jacobian[1]);
        let integration_element = norm(&normal);
        for n in normal.iter_mut() {
            *n *= normal_sign;
        }
        Self {
            corners,
            jacobian,
            normal,
            integration_element,
        }
    }

    /// Map a point on the reference triangle to the physical cell
    pub fn global_point(&self, point: &[T; 2]) -> [T; 3] {
        let mut result = self.corners[0];
        for (i, r) in result.iter_mut().enumerate() {
            *r += point[0] * self.jacobian[0][i] + point[1] * self.jacobian[1][i];
        }
        result
    }

    /// The unit normal of the cell
    pub fn unit_normal(&self) -> [T; 3] {
        let mut n = self.normal;
        for v in n.iter_mut() {
            *v = *v / self.integration_element;
        }
        n
    }

    /// The area of the cell
    pub fn area(&self) -> T {
        self.integration_element / (T::one() + T::one())
    }
}
