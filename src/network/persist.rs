//! Binary weight file.
//!
//! ```text
//! u32 magic
//! u32 layer_count
//! u32[layer_count] layer_sizes
//! (layer_count - 1) x { u32 rows, u32 cols, f32[rows * cols] }   weights, row-major
//! (layer_count - 1) x { u32 rows, u32 cols, f32[rows * cols] }   biases
//! ```
//!
//! Everything is little-endian; floats are stored as their raw bit pattern.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::info;

use crate::error::NetworkError;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// First four bytes of every weight file (`"FMLW"` on disk).
pub const MAGIC: u32 = 0x574C_4D46;

impl Network {
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), NetworkError> {
        writer.write_u32::<LittleEndian>(MAGIC)?;
        writer.write_u32::<LittleEndian>(to_u32(self.layer_sizes.len())?)?;
        for &size in &self.layer_sizes {
            writer.write_u32::<LittleEndian>(to_u32(size)?)?;
        }
        for w in &self.weights {
            write_matrix(writer, w)?;
        }
        for b in &self.biases {
            write_matrix(writer, b)?;
        }
        Ok(())
    }

    /// Reads a network written by [`Network::serialize`]. Nothing is returned
    /// unless the whole structure was read and every shape checked out.
    pub fn deserialize<R: Read>(reader: &mut R) -> Result<Network, NetworkError> {
        let magic = reader.read_u32::<LittleEndian>()?;
        if magic != MAGIC {
            return Err(NetworkError::InvalidFormat(format!(
                "bad magic {magic:#010x}, expected {MAGIC:#010x}"
            )));
        }

        let layer_count = reader.read_u32::<LittleEndian>()? as usize;
        if layer_count < 2 {
            return Err(NetworkError::InvalidFormat(format!(
                "layer count {layer_count} is below 2"
            )));
        }

        let mut layer_sizes = Vec::new();
        for i in 0..layer_count {
            let size = reader.read_u32::<LittleEndian>()? as usize;
            if size == 0 {
                return Err(NetworkError::InvalidFormat(format!("layer {i} has zero width")));
            }
            layer_sizes.push(size);
        }

        let mut weights = Vec::new();
        for (i, pair) in layer_sizes.windows(2).enumerate() {
            weights.push(read_matrix(reader, "weights", i, (pair[1], pair[0]))?);
        }
        let mut biases = Vec::new();
        for (i, pair) in layer_sizes.windows(2).enumerate() {
            biases.push(read_matrix(reader, "biases", i, (pair[1], 1))?);
        }

        Network::from_parameters(layer_sizes, weights, biases)
    }

    /// Writes the network to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), NetworkError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.serialize(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), layers = ?self.layer_sizes, "saved network");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network, NetworkError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let network = Network::deserialize(&mut reader)?;
        info!(path = %path.display(), layers = ?network.layer_sizes, "loaded network");
        Ok(network)
    }
}

fn to_u32(n: usize) -> Result<u32, NetworkError> {
    u32::try_from(n).map_err(|_| NetworkError::InvalidFormat(format!("{n} does not fit in u32")))
}

fn write_matrix<W: Write>(writer: &mut W, m: &Matrix<f32>) -> Result<(), NetworkError> {
    writer.write_u32::<LittleEndian>(to_u32(m.rows())?)?;
    writer.write_u32::<LittleEndian>(to_u32(m.cols())?)?;
    for &x in m.as_slice() {
        writer.write_f32::<LittleEndian>(x)?;
    }
    Ok(())
}

fn read_matrix<R: Read>(
    reader: &mut R,
    kind: &str,
    index: usize,
    expected: (usize, usize),
) -> Result<Matrix<f32>, NetworkError> {
    let rows = reader.read_u32::<LittleEndian>()? as usize;
    let cols = reader.read_u32::<LittleEndian>()? as usize;
    if (rows, cols) != expected {
        return Err(NetworkError::InvalidFormat(format!(
            "{kind}[{index}] is {rows}x{cols}, layer sizes require {}x{}",
            expected.0, expected.1
        )));
    }

    // Buffers grow with the bytes actually present, never with the header.
    let byte_len = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| NetworkError::InvalidFormat(format!("{kind}[{index}] is too large")))?;
    let mut bytes = Vec::new();
    (&mut *reader).take(byte_len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != byte_len {
        return Err(NetworkError::UnexpectedEndOfData);
    }

    let data = bytes.chunks_exact(4).map(LittleEndian::read_f32).collect();
    Ok(Matrix::from_vec(rows, cols, data)?)
}
