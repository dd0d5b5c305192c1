//! 3x3 rotation matrices for reference-frame transformations.
//!
//! A rotation matrix here is always a *passive* (frame) rotation in the
//! right-handed aerospace convention: positive angles rotate the coordinate
//! frame counterclockwise when looking from the positive axis toward the
//! origin, so the coordinates of a fixed vector rotate the other way. The
//! elementary rotations are
//!
//! ```text
//! Rx(θ) = | 1    0       0     |      Rz(θ) = |  cos θ  sin θ  0 |
//!         | 0    cos θ   sin θ |              | -sin θ  cos θ  0 |
//!         | 0   -sin θ   cos θ |              |    0      0    1 |
//!
//! Ry(θ) = | cos θ  0  -sin θ |
//!         |   0    1     0   |
//!         | sin θ  0   cos θ |
//! ```
//!
//! Rotations compose by multiplication with the rightmost matrix acting
//! first: to apply rotation A then rotation B, compute `B * A`. For a proper
//! rotation the inverse is the transpose, which is both exact and cheap.
//!
//! ```
//! use orbit_core::{Angle, RotationMatrix3, Vector3};
//!
//! let rz = RotationMatrix3::about_z(Angle::from_degrees(90.0));
//! let v = rz * Vector3::x_axis();
//! // Frame rotation: +X expressed in the rotated frame points along -Y
//! assert!((v.y + 1.0).abs() < 1e-15);
//! ```

use crate::angle::Angle;
use crate::matrix::Vector3;
use std::fmt;

/// A 3x3 proper rotation matrix (orthonormal, determinant +1), row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationMatrix3 {
    elements: [[f64; 3]; 3],
}

impl RotationMatrix3 {
    /// The identity matrix.
    pub fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Creates a matrix from a row-major 3x3 array.
    ///
    /// Does not validate that the result is a proper rotation; use
    /// [`is_rotation_matrix`](Self::is_rotation_matrix) to check.
    pub fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    /// Creates a matrix whose rows are the given vectors.
    pub fn from_rows(r0: Vector3, r1: Vector3, r2: Vector3) -> Self {
        Self::from_array([r0.to_array(), r1.to_array(), r2.to_array()])
    }

    /// Creates a matrix whose columns are the given vectors.
    pub fn from_columns(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self::from_array([
            [c0.x, c1.x, c2.x],
            [c0.y, c1.y, c2.y],
            [c0.z, c1.z, c2.z],
        ])
    }

    /// Elementary passive rotation about the X-axis.
    pub fn about_x(angle: Angle) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_array([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])
    }

    /// Elementary passive rotation about the Y-axis.
    pub fn about_y(angle: Angle) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_array([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    /// Elementary passive rotation about the Z-axis.
    pub fn about_z(angle: Angle) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_array([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Returns the element at `(row, col)`, 0-based. Panics out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    /// Returns a reference to the underlying row-major array.
    pub fn elements(&self) -> &[[f64; 3]; 3] {
        &self.elements
    }

    /// Returns row `i` as a vector.
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::from_array(self.elements[i])
    }

    /// Returns column `j` as a vector.
    pub fn column(&self, j: usize) -> Vector3 {
        Vector3::new(
            self.elements[0][j],
            self.elements[1][j],
            self.elements[2][j],
        )
    }

    /// Applies a further X-axis rotation in place: `self` becomes `Rx(θ) * self`.
    pub fn rotate_x(&mut self, theta: f64) {
        let (s, c) = theta.sin_cos();
        for j in 0..3 {
            let a1 = c * self.elements[1][j] + s * self.elements[2][j];
            let a2 = -s * self.elements[1][j] + c * self.elements[2][j];
            self.elements[1][j] = a1;
            self.elements[2][j] = a2;
        }
    }

    /// Applies a further Y-axis rotation in place: `self` becomes `Ry(θ) * self`.
    pub fn rotate_y(&mut self, theta: f64) {
        let (s, c) = theta.sin_cos();
        for j in 0..3 {
            let a0 = c * self.elements[0][j] - s * self.elements[2][j];
            let a2 = s * self.elements[0][j] + c * self.elements[2][j];
            self.elements[0][j] = a0;
            self.elements[2][j] = a2;
        }
    }

    /// Applies a further Z-axis rotation in place: `self` becomes `Rz(θ) * self`.
    pub fn rotate_z(&mut self, theta: f64) {
        let (s, c) = theta.sin_cos();
        for j in 0..3 {
            let a0 = c * self.elements[0][j] + s * self.elements[1][j];
            let a1 = -s * self.elements[0][j] + c * self.elements[1][j];
            self.elements[0][j] = a0;
            self.elements[1][j] = a1;
        }
    }

    /// Matrix product `self * other` (`other` acts first on a vector).
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 3]; 3];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..3 {
                    *cell += self.elements[i][k] * other.elements[k][j];
                }
            }
        }
        Self::from_array(result)
    }

    /// Standard matrix-vector product `M * v`.
    pub fn apply(&self, v: &Vector3) -> Vector3 {
        Vector3::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
        )
    }

    /// Returns the transpose. For a proper rotation this is the inverse.
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self::from_array([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Determinant; +1 for a proper rotation, -1 for a reflection.
    pub fn determinant(&self) -> f64 {
        let m = &self.elements;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Checks orthonormality (`M Mᵀ = I`) and determinant +1 within `tolerance`.
    pub fn is_rotation_matrix(&self, tolerance: f64) -> bool {
        if (self.determinant() - 1.0).abs() > tolerance {
            return false;
        }
        let product = self.multiply(&self.transpose());
        let identity = Self::identity();
        for i in 0..3 {
            for j in 0..3 {
                if (product.elements[i][j] - identity.elements[i][j]).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Maximum absolute element-wise difference from another matrix.
    pub fn max_difference(&self, other: &Self) -> f64 {
        let mut max_diff: f64 = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                max_diff = max_diff.max((self.elements[i][j] - other.elements[i][j]).abs());
            }
        }
        max_diff
    }
}

impl std::ops::Mul for RotationMatrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&RotationMatrix3> for RotationMatrix3 {
    type Output = RotationMatrix3;

    fn mul(self, rhs: &RotationMatrix3) -> RotationMatrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Mul<RotationMatrix3> for &RotationMatrix3 {
    type Output = RotationMatrix3;

    fn mul(self, rhs: RotationMatrix3) -> RotationMatrix3 {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&RotationMatrix3> for &RotationMatrix3 {
    type Output = RotationMatrix3;

    fn mul(self, rhs: &RotationMatrix3) -> RotationMatrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Mul<Vector3> for RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.apply(&v)
    }
}

impl std::ops::Mul<Vector3> for &RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.apply(&v)
    }
}

impl std::ops::Index<(usize, usize)> for RotationMatrix3 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl fmt::Display for RotationMatrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RotationMatrix3:")?;
        for row in &self.elements {
            writeln!(f, "  [{:12.9} {:12.9} {:12.9}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
