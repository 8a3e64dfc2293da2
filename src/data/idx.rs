//! IDX image/label files as used by MNIST.
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-3:   0x00000803  (uint8 data, 3 dimensions)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (big-endian u32)
//! bytes 12-15:  cols        (big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes 0-3:    0x00000801  (uint8 data, 1 dimension)
//! bytes 4-7:    N           (number of labels, big-endian u32)
//! bytes 8..:    N bytes, each a class index
//! ```

use std::io;
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::DatasetError;

pub const IMAGE_MAGIC: u32 = 0x0000_0803;
pub const LABEL_MAGIC: u32 = 0x0000_0801;

/// Raw pixel block of an IDX3 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdxImages {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
    /// `count * rows * cols` bytes, one image after another.
    pub pixels: Vec<u8>,
}

impl IdxImages {
    pub fn pixels_per_image(&self) -> usize {
        self.rows * self.cols
    }

    pub fn image(&self, i: usize) -> &[u8] {
        let n = self.pixels_per_image();
        &self.pixels[i * n..(i + 1) * n]
    }
}

pub fn parse_images(bytes: &[u8], path: &Path) -> Result<IdxImages, DatasetError> {
    let mut reader = bytes;
    let magic = read_u32(&mut reader, path)?;
    if magic != IMAGE_MAGIC {
        return Err(invalid(path, format!(
            "image magic is {magic:#010x}, expected {IMAGE_MAGIC:#010x}"
        )));
    }

    let count = read_u32(&mut reader, path)? as usize;
    let rows = read_u32(&mut reader, path)? as usize;
    let cols = read_u32(&mut reader, path)? as usize;

    let len = count
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| invalid(path, format!("{count} images of {rows}x{cols} overflow usize")))?;
    if reader.len() < len {
        return Err(DatasetError::UnexpectedEndOfData { path: path.to_path_buf() });
    }

    Ok(IdxImages { count, rows, cols, pixels: reader[..len].to_vec() })
}

pub fn parse_labels(bytes: &[u8], path: &Path) -> Result<Vec<u8>, DatasetError> {
    let mut reader = bytes;
    let magic = read_u32(&mut reader, path)?;
    if magic != LABEL_MAGIC {
        return Err(invalid(path, format!(
            "label magic is {magic:#010x}, expected {LABEL_MAGIC:#010x}"
        )));
    }

    let count = read_u32(&mut reader, path)? as usize;
    if reader.len() < count {
        return Err(DatasetError::UnexpectedEndOfData { path: path.to_path_buf() });
    }
    Ok(reader[..count].to_vec())
}

fn read_u32(reader: &mut &[u8], path: &Path) -> Result<u32, DatasetError> {
    reader.read_u32::<BigEndian>().map_err(|e| eof_or_io(e, path))
}

pub(crate) fn eof_or_io(err: io::Error, path: &Path) -> DatasetError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        DatasetError::UnexpectedEndOfData { path: path.to_path_buf() }
    } else {
        DatasetError::Io { path: path.to_path_buf(), source: err }
    }
}

fn invalid(path: &Path, reason: String) -> DatasetError {
    DatasetError::InvalidFormat { path: path.to_path_buf(), reason }
}

/// Reads a whole file, tagging failures with its path.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, DatasetError> {
    std::fs::read(path).map_err(|e| DatasetError::Io { path: path.to_path_buf(), source: e })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn image_file(count: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for word in [IMAGE_MAGIC, count, rows, cols] {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes.extend_from_slice(pixels);
        bytes
    }

    pub(crate) fn label_file(labels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
        bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        bytes.extend_from_slice(labels);
        bytes
    }

    #[test]
    fn parses_images() {
        let bytes = image_file(2, 1, 3, &[0, 1, 2, 3, 4, 5]);
        let images = parse_images(&bytes, Path::new("img")).unwrap();
        assert_eq!((images.count, images.rows, images.cols), (2, 1, 3));
        assert_eq!(images.image(1), &[3, 4, 5]);
    }

    #[test]
    fn parses_labels() {
        let labels = parse_labels(&label_file(&[7, 2, 1]), Path::new("lbl")).unwrap();
        assert_eq!(labels, vec![7, 2, 1]);
    }

    #[test]
    fn wrong_magic_is_invalid_format() {
        let bytes = label_file(&[1]);
        let err = parse_images(&bytes, Path::new("train-images")).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidFormat { .. }));
        assert!(err.to_string().starts_with("train-images: "));
    }

    #[test]
    fn truncated_header_and_body_are_end_of_data() {
        let bytes = image_file(2, 2, 2, &[0; 5]);
        assert!(matches!(
            parse_images(&bytes, Path::new("img")),
            Err(DatasetError::UnexpectedEndOfData { .. })
        ));
        assert!(matches!(
            parse_images(&bytes[..10], Path::new("img")),
            Err(DatasetError::UnexpectedEndOfData { .. })
        ));
        let labels = label_file(&[1, 2, 3]);
        assert!(matches!(
            parse_labels(&labels[..9], Path::new("lbl")),
            Err(DatasetError::UnexpectedEndOfData { .. })
        ));
    }
}
