use rand::Rng;
use tracing::debug;

use crate::activation::sigmoid::Sigmoid;
use crate::error::{MatrixError, NetworkError};
use crate::math::matrix::Matrix;

/// Fully connected sigmoid network.
///
/// For every layer transition `i`, `weights[i]` is `layer_sizes[i + 1] x layer_sizes[i]`
/// and `biases[i]` is `layer_sizes[i + 1] x 1`. Every constructor checks this.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub(crate) layer_sizes: Vec<usize>,
    pub(crate) weights: Vec<Matrix<f32>>,
    pub(crate) biases: Vec<Matrix<f32>>,
}

impl Network {
    /// Builds a network whose weights and biases are drawn from N(0, 1).
    pub fn random<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Network, NetworkError> {
        check_topology(layer_sizes)?;

        let mut weights = Vec::with_capacity(layer_sizes.len() - 1);
        let mut biases = Vec::with_capacity(layer_sizes.len() - 1);
        for pair in layer_sizes.windows(2) {
            weights.push(Matrix::<f32>::random_normal(pair[1], pair[0], rng)?);
            biases.push(Matrix::<f32>::random_normal(pair[1], 1, rng)?);
        }

        debug!(?layer_sizes, "initialised network from N(0, 1)");
        Ok(Network { layer_sizes: layer_sizes.to_vec(), weights, biases })
    }

    /// Builds a network from explicit parameters after checking every shape.
    pub fn from_parameters(
        layer_sizes: Vec<usize>,
        weights: Vec<Matrix<f32>>,
        biases: Vec<Matrix<f32>>,
    ) -> Result<Network, NetworkError> {
        check_topology(&layer_sizes)?;
        let transitions = layer_sizes.len() - 1;
        if weights.len() != transitions || biases.len() != transitions {
            return Err(NetworkError::InvalidTopology(format!(
                "{} layers need {transitions} weight and bias matrices, got {} and {}",
                layer_sizes.len(),
                weights.len(),
                biases.len()
            )));
        }

        for (i, pair) in layer_sizes.windows(2).enumerate() {
            if weights[i].shape() != (pair[1], pair[0]) {
                return Err(NetworkError::InvalidTopology(format!(
                    "weights[{i}] is {}x{}, expected {}x{}",
                    weights[i].rows(),
                    weights[i].cols(),
                    pair[1],
                    pair[0]
                )));
            }
            if biases[i].shape() != (pair[1], 1) {
                return Err(NetworkError::InvalidTopology(format!(
                    "biases[{i}] is {}x{}, expected {}x1",
                    biases[i].rows(),
                    biases[i].cols(),
                    pair[1]
                )));
            }
        }

        Ok(Network { layer_sizes, weights, biases })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn weights(&self) -> &[Matrix<f32>] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix<f32>] {
        &self.biases
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    /// Forward pass: `a_{i+1} = σ(W_i · a_i + b_i)`. Returns the output activation.
    pub fn feed(&self, input: &Matrix<f32>) -> Result<Matrix<f32>, NetworkError> {
        self.check_input(input)?;

        let mut activation = input.clone();
        for (w, b) in self.weights.iter().zip(&self.biases) {
            let mut z = Matrix::matmul(w, &activation)?;
            z.add(b)?;
            activation = z.map(Sigmoid::function)?;
        }
        Ok(activation)
    }

    /// Index of the strongest output neuron for `input`.
    pub fn predict(&self, input: &Matrix<f32>) -> Result<usize, NetworkError> {
        let output = self.feed(input)?;
        classify(&output)
    }

    pub(crate) fn check_input(&self, input: &Matrix<f32>) -> Result<(), NetworkError> {
        if input.shape() != (self.input_size(), 1) {
            return Err(MatrixError::ShapeMismatch {
                op: "feed",
                left: (self.input_size(), 1),
                right: input.shape(),
            }
            .into());
        }
        Ok(())
    }
}

/// Predicted class of an output vector; lowest index wins ties.
pub fn classify(output: &Matrix<f32>) -> Result<usize, NetworkError> {
    output
        .argmax()
        .ok_or_else(|| NetworkError::InvalidTopology("output layer is empty".to_owned()))
}

fn check_topology(layer_sizes: &[usize]) -> Result<(), NetworkError> {
    if layer_sizes.len() < 2 {
        return Err(NetworkError::InvalidTopology(format!(
            "need at least 2 layers, got {}",
            layer_sizes.len()
        )));
    }
    if let Some(i) = layer_sizes.iter().position(|&n| n == 0) {
        return Err(NetworkError::InvalidTopology(format!("layer {i} has zero width")));
    }
    Ok(())
}
