pub mod digit;
pub mod idx;

use std::path::Path;

use tracing::info;

use crate::error::DatasetError;

pub use digit::{Digit, CLASSES};

/// Standard MNIST file names inside a data directory.
pub const TRAIN_IMAGES: &str = "train-images-idx3-ubyte";
pub const TRAIN_LABELS: &str = "train-labels-idx1-ubyte";
pub const TEST_IMAGES: &str = "t10k-images-idx3-ubyte";
pub const TEST_LABELS: &str = "t10k-labels-idx1-ubyte";

/// Parses an in-memory IDX image/label pair into digit samples.
pub fn parse_digits(
    image_bytes: &[u8],
    image_path: &Path,
    label_bytes: &[u8],
    label_path: &Path,
) -> Result<Vec<Digit>, DatasetError> {
    let images = idx::parse_images(image_bytes, image_path)?;
    let labels = idx::parse_labels(label_bytes, label_path)?;
    if images.count != labels.len() {
        return Err(DatasetError::CountMismatch { images: images.count, labels: labels.len() });
    }

    labels
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            if usize::from(label) >= CLASSES {
                return Err(DatasetError::InvalidFormat {
                    path: label_path.to_path_buf(),
                    reason: format!("label {label} at index {i} is not below {CLASSES}"),
                });
            }
            Ok(Digit::from_bytes(images.image(i), label))
        })
        .collect()
}

/// Reads an IDX image/label file pair from disk.
pub fn load_digits(image_path: &Path, label_path: &Path) -> Result<Vec<Digit>, DatasetError> {
    let image_bytes = idx::read_file(image_path)?;
    let label_bytes = idx::read_file(label_path)?;
    let digits = parse_digits(&image_bytes, image_path, &label_bytes, label_path)?;
    info!(
        images = %image_path.display(),
        count = digits.len(),
        "loaded digits"
    );
    Ok(digits)
}
