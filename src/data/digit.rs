use crate::error::MatrixError;
use crate::math::matrix::Matrix;
use crate::sample::Sample;

/// Number of digit classes, and the width of every target vector.
pub const CLASSES: usize = 10;

/// A grayscale digit image with its class label.
#[derive(Debug, Clone, PartialEq)]
pub struct Digit {
    /// Pixel intensities scaled to `[0, 1]`, row-major.
    pub pixels: Vec<f32>,
    pub label: u8,
}

impl Digit {
    pub fn from_bytes(pixels: &[u8], label: u8) -> Digit {
        Digit {
            pixels: pixels.iter().map(|&p| f32::from(p) / 255.0).collect(),
            label,
        }
    }
}

impl Sample for Digit {
    fn to_input(&self) -> Result<Matrix<f32>, MatrixError> {
        Ok(Matrix::column(self.pixels.clone()))
    }

    /// One-hot over [`CLASSES`]; a label outside it is an error.
    fn to_target(&self) -> Result<Matrix<f32>, MatrixError> {
        let mut target = Matrix::zeros(CLASSES, 1)?;
        target.set(usize::from(self.label), 0, 1.0)?;
        Ok(target)
    }

    fn label(&self) -> usize {
        usize::from(self.label)
    }
}
