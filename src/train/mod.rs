pub mod arena;
pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use arena::{BatchArena, Gradients};
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
