// THEORY:
// The `Matrix` module is the numeric foundation of the crate. Everything in the
// image pipeline (colorspace conversion, recoloring filters, geometric
// transforms) is expressed as a product of small dense matrices, so this type
// favours clarity over speed: a flat row-major `Vec<f64>` plus its shape.
//
// Key architectural principles:
// 1.  **Shape is the invariant**: `data.len() == rows * cols` at all times. Any
//     operation that would break this (ragged input, incompatible product)
//     returns an error instead of a half-built matrix.
// 2.  **Value semantics**: binary operations build a fresh result. The few
//     mutating methods (`transpose`, `invert`, the scalar ops) replace the
//     internal storage wholesale.
// 3.  **Permissive reads**: out-of-bounds reads are logged and fall back to the
//     (0,0) element, mirroring how pixel lookups degrade elsewhere in the crate.
// 4.  **Cofactors by expansion**: determinants and inverses use recursive
//     cofactor expansion and the adjugate, not row reduction. Minors are
//     extracted with cyclic (wraparound) indexing, see `cof`.

use crate::error::{Result, RudimentsError};
use std::fmt;
use std::ops::Index;
use tracing::warn;

/// Element equality threshold used by `approx_eq`.
pub const EPSILON: f64 = 0.001;

/// Determinants with a magnitude below this are treated as zero.
const SINGULAR_THRESHOLD: f64 = 1e-12;

/// A dense, row-major matrix of `f64` values.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a new `rows x cols` matrix filled with zeros.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a new `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::new(n, n);
        for i in 0..n {
            matrix.data[i * n + i] = 1.0;
        }
        matrix
    }

    /// Builds a matrix from a slice of rows. Every row must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(row_count * col_count);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != col_count {
                return Err(RudimentsError::invalid_parameter(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    col_count
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: row_count,
            cols: col_count,
            data,
        })
    }

    /// Builds a column vector (`n x 1`) from a slice.
    pub fn from_vector(vector: &[f64]) -> Self {
        Self {
            rows: vector.len(),
            cols: 1,
            data: vector.to_vec(),
        }
    }

    /// Builds a matrix from a fixed-size array of rows.
    pub fn from_array<const R: usize, const C: usize>(rows: [[f64; C]; R]) -> Self {
        Self {
            rows: R,
            cols: C,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Homogeneous 2-D rotation by `theta` radians (counter-clockwise).
    pub fn rotation(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::from_array([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Homogeneous 2-D scaling.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::from_array([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Homogeneous 2-D translation.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::from_array([[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]])
    }

    // --- Shape & access ---

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The row-major element storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// A single row as a slice, if it exists.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.rows {
            Some(&self.data[i * self.cols..(i + 1) * self.cols])
        } else {
            None
        }
    }

    /// Checked element read.
    pub fn try_get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Element read. An out-of-bounds position is logged and the value at
    /// (0,0) is returned instead; an empty matrix reads as 0.0.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if self.data.is_empty() {
            warn!("matrix not set yet, returning 0.0");
            return 0.0;
        }
        match self.try_get(i, j) {
            Some(value) => value,
            None => {
                warn!(
                    row = i,
                    col = j,
                    "matrix position out of bounds, returning value at (0,0)"
                );
                self.data[0]
            }
        }
    }

    /// Element write. Out-of-bounds positions are logged and ignored.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        if i < self.rows && j < self.cols {
            self.data[i * self.cols + j] = value;
        } else {
            warn!(row = i, col = j, "ignoring write outside matrix bounds");
        }
    }

    // --- Elementwise scalar algebra ---

    /// Adds `value` to every element.
    pub fn add(&mut self, value: f64) {
        if value == 0.0 {
            return;
        }
        self.data.iter_mut().for_each(|v| *v += value);
    }

    /// Multiplies every element by `value`.
    pub fn multiply(&mut self, value: f64) {
        if value == 1.0 {
            return;
        }
        self.data.iter_mut().for_each(|v| *v *= value);
    }

    /// Divides every element by `value`. Dividing by zero is rejected and
    /// leaves the matrix unchanged.
    pub fn divide(&mut self, value: f64) -> Result<()> {
        if value == 0.0 {
            return Err(RudimentsError::DivideByZero);
        }
        if value != 1.0 {
            self.data.iter_mut().for_each(|v| *v /= value);
        }
        Ok(())
    }

    /// Replaces every element with its remainder modulo `value`.
    pub fn modulo(&mut self, value: f64) -> Result<()> {
        if value == 0.0 {
            return Err(RudimentsError::DivideByZero);
        }
        self.data.iter_mut().for_each(|v| *v %= value);
        Ok(())
    }

    // --- Equality ---

    /// Elementwise comparison within `EPSILON`. Matrices of different shapes
    /// are never equal.
    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= EPSILON)
    }

    // --- Statistics ---

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Sum of the absolute values of all elements.
    pub fn mag(&self) -> f64 {
        self.data.iter().map(|v| v.abs()).sum()
    }

    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.sum() / self.data.len() as f64)
        }
    }

    /// The most frequent element. Counts every element against every other
    /// element; on ties the earliest element in row-major order wins.
    pub fn mode(&self) -> Option<f64> {
        let counts: Vec<usize> = self
            .data
            .iter()
            .map(|a| self.data.iter().filter(|b| a == *b).count())
            .collect();
        let best = counts.iter().copied().max()?;
        counts
            .iter()
            .position(|&count| count == best)
            .map(|index| self.data[index])
    }

    // --- Products ---

    /// Standard matrix product `self x other`.
    pub fn cross(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(RudimentsError::dimension_mismatch(
                (self.rows, self.cols),
                (other.rows, other.cols),
            ));
        }
        let mut result = Matrix::new(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self.data[i * self.cols + k] * other.data[k * other.cols + j];
                }
                result.data[i * other.cols + j] = acc;
            }
        }
        Ok(result)
    }

    /// Inner product computed as `transpose(self) x other`, element (0,0).
    pub fn dot(&self, other: &Matrix) -> Result<f64> {
        let product = self.transposed().cross(other)?;
        product.try_get(0, 0).ok_or_else(|| {
            RudimentsError::dimension_mismatch((self.rows, self.cols), (other.rows, other.cols))
        })
    }

    // --- Determinant, cofactors, inverse ---

    /// Determinant by recursive cofactor expansion along the first row.
    pub fn det(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(RudimentsError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.det_unchecked())
    }

    fn det_unchecked(&self) -> f64 {
        match self.rows {
            0 => 1.0,
            1 => self.data[0],
            2 => self.data[0] * self.data[3] - self.data[1] * self.data[2],
            n => (0..n)
                .map(|j| self.data[j] * self.cofactor_sign(0, j) * self.minor(0, j).det_unchecked())
                .sum(),
        }
    }

    /// The `(rows-1) x (cols-1)` minor matrix of element `(row, col)`.
    ///
    /// Elements are taken cyclically: entry `(i-1, j-1)` of the result is
    /// `self[(row + i) % rows][(col + j) % cols]` for `i, j` in `1..n`. This is
    /// not the textbook row/column deletion order. For odd `n` the cyclic
    /// minor's determinant already carries the `(-1)^(row+col)` cofactor sign;
    /// for even `n` it does not, which `det` and `adj` account for.
    pub fn cof(&self, row: usize, col: usize) -> Result<Matrix> {
        if row >= self.rows || col >= self.cols {
            return Err(RudimentsError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.minor(row, col))
    }

    fn minor(&self, row: usize, col: usize) -> Matrix {
        let (rows, cols) = (self.rows, self.cols);
        let mut result = Matrix::new(rows - 1, cols - 1);
        for i in 1..rows {
            for j in 1..cols {
                result.data[(i - 1) * (cols - 1) + (j - 1)] =
                    self.data[((row + i) % rows) * cols + (col + j) % cols];
            }
        }
        result
    }

    // Even-sized cyclic minors lose the checkerboard sign.
    fn cofactor_sign(&self, row: usize, col: usize) -> f64 {
        if self.rows % 2 == 0 && (row + col) % 2 == 1 {
            -1.0
        } else {
            1.0
        }
    }

    /// The adjugate: the transpose of the cofactor matrix.
    pub fn adj(&self) -> Result<Matrix> {
        if !self.is_square() {
            return Err(RudimentsError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let n = self.rows;
        let mut result = Matrix::new(n, n);
        if n == 1 {
            result.data[0] = 1.0;
            return Ok(result);
        }
        for i in 0..n {
            for j in 0..n {
                result.data[j * n + i] =
                    self.cofactor_sign(i, j) * self.minor(i, j).det_unchecked();
            }
        }
        Ok(result)
    }

    /// Returns the inverse `adj(self) / det(self)`.
    pub fn inverse(&self) -> Result<Matrix> {
        let determinant = self.det()?;
        if determinant.abs() < SINGULAR_THRESHOLD {
            return Err(RudimentsError::Singular { determinant });
        }
        let mut result = self.adj()?;
        result.divide(determinant)?;
        Ok(result)
    }

    /// Inverts this matrix in place. On error the matrix is left unchanged.
    pub fn invert(&mut self) -> Result<()> {
        *self = self.inverse()?;
        Ok(())
    }

    // --- Transpose ---

    /// Returns the transpose of this matrix.
    pub fn transposed(&self) -> Matrix {
        let mut result = Matrix::new(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        result
    }

    /// Transposes this matrix in place.
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, "{}\t", self.data[i * self.cols + j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
