pub mod evaluation;
pub mod network;
pub mod persist;

pub use evaluation::Evaluation;
pub use network::{classify, Network};
pub use persist::MAGIC;
