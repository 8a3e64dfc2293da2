use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::error::NetworkError;
use crate::network::network::Network;
use crate::sample::Sample;
use crate::train::epoch_stats::EpochStats;

/// Numerator and denominator of the share of each epoch's shuffle used for training.
const TRAIN_SHARE: (usize, usize) = (5, 6);

impl Network {
    /// Mini-batch stochastic gradient descent.
    ///
    /// Each epoch shuffles all samples with `rng`, trains on the first 5/6 in
    /// consecutive batches of `batch_size` (a trailing remainder becomes one
    /// smaller batch averaged over its own length) and evaluates on the rest.
    pub fn sgd<S, R>(
        &mut self,
        samples: &[S],
        epochs: usize,
        batch_size: usize,
        eta: f32,
        rng: &mut R,
    ) -> Result<Vec<EpochStats>, NetworkError>
    where
        S: Sample,
        R: Rng + ?Sized,
    {
        if batch_size == 0 {
            return Err(NetworkError::InvalidHyperparameter(
                "batch size must be at least 1".to_owned(),
            ));
        }
        if !(eta.is_finite() && eta > 0.0) {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "learning rate must be positive, got {eta}"
            )));
        }

        let mut order: Vec<&S> = samples.iter().collect();
        let train_len = order.len() * TRAIN_SHARE.0 / TRAIN_SHARE.1;
        if train_len == 0 {
            warn!(samples = order.len(), "too few samples to form a training split");
        } else if train_len == order.len() {
            warn!(samples = order.len(), "too few samples to hold any out for evaluation");
        }

        let mut history = Vec::with_capacity(epochs);
        for epoch in 1..=epochs {
            let t_start = Instant::now();

            order.shuffle(rng);
            let (train, held_out) = order.split_at(train_len);

            let mut batches = 0;
            let mut cost_sum = 0.0;
            for batch in train.chunks(batch_size) {
                cost_sum += self.train_batch(batch, eta)? * batch.len() as f64;
                batches += 1;
            }

            let eval = self.validate(held_out.iter().copied())?;
            let stats = EpochStats {
                epoch,
                total_epochs: epochs,
                trained: train.len(),
                batches,
                train_cost: if train.is_empty() { 0.0 } else { cost_sum / train.len() as f64 },
                evaluated: eval.total,
                correct: eval.correct,
                accuracy: eval.accuracy(),
                eval_cost: eval.mean_cost(),
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            info!(
                train_cost = stats.train_cost,
                elapsed_ms = stats.elapsed_ms,
                "Epoch {epoch}/{epochs}: {eval}"
            );
            history.push(stats);
        }

        Ok(history)
    }
}
