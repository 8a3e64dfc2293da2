use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the dense matrix engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible for `op`.
    #[error("shape mismatch in {op}: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// The element buffer for a `rows x cols` matrix could not be obtained.
    #[error("cannot allocate a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },

    #[error("buffer of length {len} does not fit a {rows}x{cols} matrix")]
    DataLength { rows: usize, cols: usize, len: usize },

    #[error("rows of uneven length")]
    RaggedRows,

    #[error("index ({row}, {col}) is outside a {rows}x{cols} matrix")]
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
}

/// Failures raised while building, training or (de)serializing a network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid weight file: {0}")]
    InvalidFormat(String),

    #[error("weight data ended unexpectedly")]
    UnexpectedEndOfData,

    #[error("mini-batch is empty")]
    EmptyBatch,

    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for NetworkError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            NetworkError::UnexpectedEndOfData
        } else {
            NetworkError::Io(err)
        }
    }
}

/// Failures raised while reading an IDX image/label file pair.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {reason}", .path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("{}: data ended unexpectedly", .path.display())]
    UnexpectedEndOfData { path: PathBuf },

    #[error("image file declares {images} items but label file declares {labels}")]
    CountMismatch { images: usize, labels: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_maps_to_unexpected_end_of_data() {
        let err: NetworkError = io::Error::new(io::ErrorKind::UnexpectedEof, "short").into();
        assert!(matches!(err, NetworkError::UnexpectedEndOfData));

        let err: NetworkError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, NetworkError::Io(_)));
    }

    #[test]
    fn shape_mismatch_names_both_shapes() {
        let err = MatrixError::ShapeMismatch { op: "matmul", left: (2, 3), right: (2, 2) };
        assert_eq!(err.to_string(), "shape mismatch in matmul: 2x3 vs 2x2");
    }
}
