use crate::error::MatrixError;
use crate::math::matrix::Matrix;

/// Quadratic cost: ½·Σ(a − y)².
///
/// The ½ makes `a − y` the exact gradient with respect to the output.
pub struct QuadraticCost;

impl QuadraticCost {
    pub fn cost(output: &Matrix<f32>, target: &Matrix<f32>) -> Result<f32, MatrixError> {
        let mut diff = output.clone();
        diff.sub(target)?;
        Ok(0.5 * diff.dot(&diff)?)
    }

    /// ∂C/∂a = a − y
    pub fn derivative(output: &Matrix<f32>, target: &Matrix<f32>) -> Result<Matrix<f32>, MatrixError> {
        let mut diff = output.clone();
        diff.sub(target)?;
        Ok(diff)
    }
}
