use crate::error::MatrixError;
use crate::loss::quadratic::QuadraticCost;
use crate::math::matrix::Matrix;

/// A labeled training or evaluation example.
///
/// The network only ever sees samples through this trait; it never depends on
/// how a concrete sample stores its pixels or label.
pub trait Sample {
    /// Input column vector, one row per input neuron.
    fn to_input(&self) -> Result<Matrix<f32>, MatrixError>;

    /// Desired output column vector, one row per output neuron.
    fn to_target(&self) -> Result<Matrix<f32>, MatrixError>;

    /// Index of the hot component of the target.
    ///
    /// Must agree with `to_target()?.argmax()`: [`Network::validate`] scores a
    /// prediction against this value, never against the target vector.
    ///
    /// [`Network::validate`]: crate::network::Network::validate
    fn label(&self) -> usize;

    /// Scalar cost of `output` against this sample's target.
    fn cost(&self, output: &Matrix<f32>) -> Result<f32, MatrixError> {
        QuadraticCost::cost(output, &self.to_target()?)
    }
}

impl<S: Sample + ?Sized> Sample for &S {
    fn to_input(&self) -> Result<Matrix<f32>, MatrixError> {
        (**self).to_input()
    }

    fn to_target(&self) -> Result<Matrix<f32>, MatrixError> {
        (**self).to_target()
    }

    fn label(&self) -> usize {
        (**self).label()
    }

    fn cost(&self, output: &Matrix<f32>) -> Result<f32, MatrixError> {
        (**self).cost(output)
    }
}
