use rand::Rng;
use std::f32::consts::PI;
use std::ops::{Index, IndexMut};

use crate::error::MatrixError;
use crate::math::element::Element;

/// Dense row-major matrix. `data.len() == rows * cols` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Obtains a zero-filled buffer for a `rows x cols` matrix, reporting
/// overflow or allocator refusal instead of aborting.
fn alloc<T: Element>(rows: usize, cols: usize) -> Result<Vec<T>, MatrixError> {
    let len = rows
        .checked_mul(cols)
        .ok_or(MatrixError::Allocation { rows, cols })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| MatrixError::Allocation { rows, cols })?;
    buf.resize(len, T::default());
    Ok(buf)
}

impl<T: Element> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix<T>, MatrixError> {
        Ok(Matrix { rows, cols, data: alloc(rows, cols)? })
    }

    /// Wraps a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Matrix<T>, MatrixError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::DataLength { rows, cols, len: data.len() });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from nested rows, e.g. `vec![vec![1, 2], vec![3, 4]]`.
    pub fn from_data(data: Vec<Vec<T>>) -> Result<Matrix<T>, MatrixError> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if data.iter().any(|row| row.len() != cols) {
            return Err(MatrixError::RaggedRows);
        }
        let mut flat = Vec::new();
        flat.try_reserve_exact(rows * cols)
            .map_err(|_| MatrixError::Allocation { rows, cols })?;
        for row in data {
            flat.extend(row);
        }
        Ok(Matrix { rows, cols, data: flat })
    }

    /// Column vector holding `values`.
    pub fn column(values: Vec<T>) -> Matrix<T> {
        Matrix { rows: values.len(), cols: 1, data: values }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Checked `self[(r, c)] = value`.
    pub fn set(&mut self, r: usize, c: usize, value: T) -> Result<(), MatrixError> {
        if r >= self.rows || c >= self.cols {
            return Err(MatrixError::OutOfBounds { row: r, col: c, rows: self.rows, cols: self.cols });
        }
        self.data[r * self.cols + c] = value;
        Ok(())
    }

    pub fn transpose(&self) -> Result<Matrix<T>, MatrixError> {
        let mut res = Matrix::zeros(self.cols, self.rows)?;

        for r in 0..self.rows {
            for c in 0..self.cols {
                res.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }

        Ok(res)
    }

    /// `self += other`, elementwise.
    pub fn add(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        self.zip_in_place("add", other, |a, b| a + b)
    }

    /// `self -= other`, elementwise.
    pub fn sub(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        self.zip_in_place("sub", other, |a, b| a - b)
    }

    /// Hadamard product, in place.
    pub fn mul_elem(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        self.zip_in_place("mul_elem", other, |a, b| a * b)
    }

    pub fn mul_scalar(&mut self, k: T) {
        for x in &mut self.data {
            *x = *x * k;
        }
    }

    /// Naive `a · b`; requires `a.cols == b.rows`.
    pub fn matmul(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        if a.cols != b.rows {
            return Err(MatrixError::ShapeMismatch {
                op: "matmul",
                left: a.shape(),
                right: b.shape(),
            });
        }

        let mut res = Matrix::zeros(a.rows, b.cols)?;

        for i in 0..a.rows {
            for j in 0..b.cols {
                let mut sum = T::default();

                for k in 0..a.cols {
                    sum = sum + a.data[i * a.cols + k] * b.data[k * b.cols + j];
                }

                res.data[i * b.cols + j] = sum;
            }
        }

        Ok(res)
    }

    /// Applies `f` to every element, producing a matrix of the same shape.
    pub fn map<U, F>(&self, f: F) -> Result<Matrix<U>, MatrixError>
    where
        U: Element,
        F: Fn(T) -> U,
    {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| MatrixError::Allocation { rows: self.rows, cols: self.cols })?;
        data.extend(self.data.iter().map(|&x| f(x)));
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    /// Flat inner product; only the total lengths must agree.
    pub fn dot(&self, other: &Matrix<T>) -> Result<T, MatrixError> {
        if self.data.len() != other.data.len() {
            return Err(MatrixError::ShapeMismatch {
                op: "dot",
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .fold(T::default(), |acc, (&a, &b)| acc + a * b))
    }

    fn zip_in_place<F>(&mut self, op: &'static str, other: &Matrix<T>, f: F) -> Result<(), MatrixError>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = f(*a, b);
        }
        Ok(())
    }
}

impl<T: Element + PartialOrd> Matrix<T> {
    /// Flat index of the largest element; the first one wins on ties.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for (i, &x) in self.data.iter().enumerate() {
            if best.map_or(true, |(_, current)| x > current) {
                best = Some((i, x));
            }
        }
        best.map(|(i, _)| i)
    }
}

impl Matrix<f32> {
    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
        // Both uniforms in (0, 1] so ln(u1) is finite.
        let u1: f32 = 1.0 - rng.gen::<f32>();
        let u2: f32 = 1.0 - rng.gen::<f32>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Every element drawn independently from the standard normal distribution.
    pub fn random_normal<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Matrix<f32>, MatrixError> {
        let mut res = Matrix::zeros(rows, cols)?;
        for x in &mut res.data {
            *x = Self::sample_standard_normal(rng);
        }
        Ok(res)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (r, c): (usize, usize)) -> &T {
        assert!(r < self.rows && c < self.cols, "index ({r}, {c}) out of bounds");
        &self.data[r * self.cols + c]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        assert!(r < self.rows && c < self.cols, "index ({r}, {c}) out of bounds");
        &mut self.data[r * self.cols + c]
    }
}
