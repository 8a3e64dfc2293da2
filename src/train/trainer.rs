use tracing::debug;

use crate::activation::sigmoid::Sigmoid;
use crate::error::NetworkError;
use crate::loss::quadratic::QuadraticCost;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::sample::Sample;
use crate::train::arena::{BatchArena, Gradients};

impl Network {
    /// Un-scaled cost gradient for a single sample.
    pub fn backprop<S: Sample + ?Sized>(&self, sample: &S) -> Result<Gradients, NetworkError> {
        let mut arena = BatchArena::for_network(self)?;
        self.accumulate(sample, &mut arena)?;
        Ok(arena.into_gradients())
    }

    /// One gradient-descent step on the batch-averaged quadratic cost.
    ///
    /// Gradients are summed in a [`BatchArena`], scaled by `eta / batch.len()`
    /// and only then subtracted from the weights and biases, so a failure on
    /// any sample leaves the network untouched. Returns the mean cost of the
    /// batch as measured before the update.
    pub fn train_batch<S: Sample>(&mut self, batch: &[S], eta: f32) -> Result<f64, NetworkError> {
        if batch.is_empty() {
            return Err(NetworkError::EmptyBatch);
        }
        if !eta.is_finite() {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "learning rate must be finite, got {eta}"
            )));
        }

        let mut arena = BatchArena::for_network(self)?;
        for sample in batch {
            self.accumulate(sample, &mut arena)?;
        }
        let mean_cost = arena.mean_cost();
        debug!(
            samples = arena.samples(),
            bytes = arena.footprint_bytes(),
            mean_cost,
            "mini-batch accumulated"
        );

        let mut grads = arena.into_gradients();
        grads.scale(eta / batch.len() as f32);
        self.apply(&grads)?;
        Ok(mean_cost)
    }

    /// Forward pass retaining every `z_l` and `a_l`, then the backward pass,
    /// adding this sample's gradient into the arena's accumulators.
    ///
    /// Transition `l` maps `a_l` to `z_l = W_l · a_l + b_l` and `a_{l+1} = σ(z_l)`.
    /// With `last = L - 2`:
    ///   δ_last = (a_{L-1} − y) ⊙ σ'(z_last)
    ///   δ_l    = (W_{l+1}ᵀ · δ_{l+1}) ⊙ σ'(z_l)
    ///   ∇b_l  += δ_l,   ∇W_l += δ_l · a_lᵀ
    pub(crate) fn accumulate<S: Sample + ?Sized>(
        &self,
        sample: &S,
        arena: &mut BatchArena,
    ) -> Result<(), NetworkError> {
        let input = sample.to_input()?;
        self.check_input(&input)?;
        let target = sample.to_target()?;

        arena.begin_sample(input);
        for (l, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            let mut z = Matrix::matmul(w, &arena.activations[l])?;
            z.add(b)?;
            let a = z.map(Sigmoid::function)?;
            arena.pre_activations.push(z);
            arena.activations.push(a);
        }

        let last = self.weights.len() - 1;
        let output = &arena.activations[last + 1];
        let cost = sample.cost(output)?;

        let mut delta = QuadraticCost::derivative(output, &target)?;
        delta.mul_elem(&arena.pre_activations[last].map(Sigmoid::derivative)?)?;

        for l in (0..=last).rev() {
            arena.grads.biases[l].add(&delta)?;
            let weight_grad = Matrix::matmul(&delta, &arena.activations[l].transpose()?)?;
            arena.grads.weights[l].add(&weight_grad)?;

            let prev = if l > 0 {
                let mut prev = Matrix::matmul(&self.weights[l].transpose()?, &delta)?;
                prev.mul_elem(&arena.pre_activations[l - 1].map(Sigmoid::derivative)?)?;
                Some(prev)
            } else {
                None
            };
            arena.deltas.push(delta);
            match prev {
                Some(prev) => delta = prev,
                None => break,
            }
        }

        arena.finish_sample(cost);
        Ok(())
    }

    /// `W_i -= ∇W_i`, `b_i -= ∇b_i`. Shapes are checked up front so either
    /// every parameter moves or none does.
    fn apply(&mut self, grads: &Gradients) -> Result<(), NetworkError> {
        if !grads.fits(self) {
            return Err(NetworkError::InvalidTopology(
                "gradient shapes do not match the network".to_owned(),
            ));
        }
        for (w, g) in self.weights.iter_mut().zip(&grads.weights) {
            w.sub(g)?;
        }
        for (b, g) in self.biases.iter_mut().zip(&grads.biases) {
            b.sub(g)?;
        }
        Ok(())
    }
}
