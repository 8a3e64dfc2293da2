use serde::{Deserialize, Serialize};

/// Per-epoch summary produced by [`Network::sgd`](crate::network::Network::sgd).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Samples in the training prefix.
    pub trained: usize,
    /// Mini-batch steps taken, including a trailing short batch.
    pub batches: usize,
    /// Mean per-sample cost seen during the sweep, before each batch's update.
    pub train_cost: f64,
    /// Samples in the held-out suffix.
    pub evaluated: usize,
    pub correct: usize,
    /// `correct / evaluated`, or `0.0` when nothing was held out.
    pub accuracy: f64,
    pub eval_cost: f64,
    pub elapsed_ms: u64,
}
