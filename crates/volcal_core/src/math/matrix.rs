//! Fixed-size 2x2 matrix.
//!
//! State vectors in this workspace have exactly two components, so Jacobians
//! and covariances are stored inline as `[[T; 2]; 2]` (row-major) rather than
//! pulling in a general linear algebra crate.

use std::ops::Index;

use crate::traits::Float;

/// Row-major 2x2 matrix.
///
/// # Examples
///
/// ```
/// use volcal_core::math::Matrix2;
///
/// let j = Matrix2::new([[0.9_f64, 0.0], [-0.5, 0.0]]);
/// assert_eq!(j[(1, 0)], -0.5);
/// assert_eq!(j.apply([1.0, 3.0]), [0.9, -0.5]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix2<T: Float> {
    rows: [[T; 2]; 2],
}

impl<T: Float> Matrix2<T> {
    /// Create a matrix from its rows.
    #[inline]
    pub fn new(rows: [[T; 2]; 2]) -> Self {
        Self { rows }
    }

    /// All-zero matrix.
    #[inline]
    pub fn zeros() -> Self {
        Self::new([[T::zero(); 2]; 2])
    }

    /// Identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self::new([[T::one(), T::zero()], [T::zero(), T::one()]])
    }

    /// Element at `(row, col)`, `None` if out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Borrow the rows.
    #[inline]
    pub fn rows(&self) -> &[[T; 2]; 2] {
        &self.rows
    }

    /// Column `col` as an array (panics if `col > 1`).
    #[inline]
    pub fn column(&self, col: usize) -> [T; 2] {
        [self.rows[0][col], self.rows[1][col]]
    }

    /// Matrix-vector product `A * v`.
    #[inline]
    pub fn apply(&self, v: [T; 2]) -> [T; 2] {
        [
            self.rows[0][0] * v[0] + self.rows[0][1] * v[1],
            self.rows[1][0] * v[0] + self.rows[1][1] * v[1],
        ]
    }

    /// Transpose `Aᵀ`.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new([
            [self.rows[0][0], self.rows[1][0]],
            [self.rows[0][1], self.rows[1][1]],
        ])
    }

    /// Matrix product `A * B`.
    pub fn matmul(&self, other: &Self) -> Self {
        let mut out = [[T::zero(); 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.rows[i][0] * other.rows[0][j] + self.rows[i][1] * other.rows[1][j];
            }
        }
        Self::new(out)
    }

    /// Element-wise sum `A + B`.
    pub fn add_matrix(&self, other: &Self) -> Self {
        let mut out = self.rows;
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = *cell + other.rows[i][j];
            }
        }
        Self::new(out)
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> T {
        self.rows[0][0] * self.rows[1][1] - self.rows[0][1] * self.rows[1][0]
    }

    /// Exact symmetry check (`a01 == a10`).
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.rows[0][1] == self.rows[1][0]
    }

    /// Check that every element is finite.
    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|x| x.is_finite())
    }
}

impl<T: Float> Default for Matrix2<T> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Float> Index<(usize, usize)> for Matrix2<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.rows[row][col]
    }
}

impl<T: Float> From<[[T; 2]; 2]> for Matrix2<T> {
    fn from(rows: [[T; 2]; 2]) -> Self {
        Self::new(rows)
    }
}
