pub mod activation;
pub mod data;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod sample;
pub mod telemetry;
pub mod train;

// Convenience re-exports
pub use activation::sigmoid::Sigmoid;
pub use error::{DatasetError, MatrixError, NetworkError};
pub use loss::quadratic::QuadraticCost;
pub use math::matrix::Matrix;
pub use network::evaluation::Evaluation;
pub use network::network::Network;
pub use sample::Sample;
pub use train::arena::{BatchArena, Gradients};
pub use train::epoch_stats::EpochStats;
pub use train::train_config::TrainConfig;
