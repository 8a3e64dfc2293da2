use std::mem;

use tracing::trace;

use crate::error::NetworkError;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Per-layer cost gradients, shaped like a network's weights and biases.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix<f32>>,
    pub biases: Vec<Matrix<f32>>,
}

impl Gradients {
    /// Zero gradients matching every parameter of `network`.
    pub fn zeros_like(network: &Network) -> Result<Gradients, NetworkError> {
        let weights = network
            .weights()
            .iter()
            .map(|w| Matrix::zeros(w.rows(), w.cols()))
            .collect::<Result<Vec<_>, _>>()?;
        let biases = network
            .biases()
            .iter()
            .map(|b| Matrix::zeros(b.rows(), b.cols()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Gradients { weights, biases })
    }

    pub fn scale(&mut self, k: f32) {
        for m in self.weights.iter_mut().chain(self.biases.iter_mut()) {
            m.mul_scalar(k);
        }
    }

    /// True when every matrix has the shape of the matching network parameter.
    pub fn fits(&self, network: &Network) -> bool {
        self.weights.len() == network.weights().len()
            && self.biases.len() == network.biases().len()
            && self
                .weights
                .iter()
                .zip(network.weights())
                .all(|(g, w)| g.shape() == w.shape())
            && self
                .biases
                .iter()
                .zip(network.biases())
                .all(|(g, b)| g.shape() == b.shape())
    }
}

/// Scratch region for one mini-batch step.
///
/// Owns the gradient accumulators, plus the forward trace (`a_0..a_{L-1}`,
/// `z_0..z_{L-2}`) and the error terms (`δ_{L-2}..δ_0`, output layer first) of
/// the sample currently being back-propagated. Everything in it is released
/// together when the arena is dropped at the end of the step; only
/// [`BatchArena::into_gradients`] moves data out. Products computed on the way
/// (transposes, `σ'(z)`, `δ · aᵀ`) are transient and freed per layer.
#[derive(Debug)]
pub struct BatchArena {
    pub(crate) grads: Gradients,
    pub(crate) activations: Vec<Matrix<f32>>,
    pub(crate) pre_activations: Vec<Matrix<f32>>,
    pub(crate) deltas: Vec<Matrix<f32>>,
    samples: usize,
    cost: f64,
}

impl BatchArena {
    pub fn for_network(network: &Network) -> Result<BatchArena, NetworkError> {
        let depth = network.layer_sizes().len();
        let arena = BatchArena {
            grads: Gradients::zeros_like(network)?,
            activations: Vec::with_capacity(depth),
            pre_activations: Vec::with_capacity(depth - 1),
            deltas: Vec::with_capacity(depth - 1),
            samples: 0,
            cost: 0.0,
        };
        trace!(bytes = arena.footprint_bytes(), "batch arena opened");
        Ok(arena)
    }

    /// Drops the previous sample's trace and seeds it with `input` as `a_0`.
    pub(crate) fn begin_sample(&mut self, input: Matrix<f32>) {
        self.activations.clear();
        self.pre_activations.clear();
        self.deltas.clear();
        self.activations.push(input);
    }

    pub(crate) fn finish_sample(&mut self, cost: f32) {
        self.samples += 1;
        self.cost += f64::from(cost);
    }

    /// Samples accumulated so far.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Mean cost of the accumulated samples.
    pub fn mean_cost(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.cost / self.samples as f64
        }
    }

    /// Bytes currently held by matrix buffers in the arena.
    pub fn footprint_bytes(&self) -> usize {
        self.grads
            .weights
            .iter()
            .chain(&self.grads.biases)
            .chain(&self.activations)
            .chain(&self.pre_activations)
            .chain(&self.deltas)
            .map(|m| m.len() * mem::size_of::<f32>())
            .sum()
    }

    pub fn into_gradients(self) -> Gradients {
        self.grads
    }
}
