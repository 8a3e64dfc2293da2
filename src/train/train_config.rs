use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;

/// Topology and hyperparameters for a training run.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub layer_sizes: Vec<usize>,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f32,
    /// Seed for weight initialisation and shuffling; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            layer_sizes: vec![784, 30, 10],
            epochs: 30,
            batch_size: 10,
            learning_rate: 3.0,
            seed: None,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.layer_sizes.len() < 2 {
            return Err(NetworkError::InvalidTopology(format!(
                "need at least 2 layers, got {}",
                self.layer_sizes.len()
            )));
        }
        if self.layer_sizes.contains(&0) {
            return Err(NetworkError::InvalidTopology("layer widths must be positive".to_owned()));
        }
        if self.epochs == 0 {
            return Err(NetworkError::InvalidHyperparameter("epochs must be at least 1".to_owned()));
        }
        if self.batch_size == 0 {
            return Err(NetworkError::InvalidHyperparameter(
                "batch size must be at least 1".to_owned(),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// File name for the weights produced by this run, e.g.
    /// `mlp_e30_b10_lr3_20261015-142501.bin`.
    pub fn weights_file_name(&self, timestamp: NaiveDateTime) -> String {
        format!(
            "mlp_e{}_b{}_lr{}_{}.bin",
            self.epochs,
            self.batch_size,
            self.learning_rate,
            timestamp.format("%Y%m%d-%H%M%S")
        )
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a config from a JSON file; missing fields take their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> std::io::Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
