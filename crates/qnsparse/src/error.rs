//! Error types for qnsparse.

use thiserror::Error;

/// Errors that can occur when addressing quantum-number block-sparse storage.
///
/// A block that is absent because it violates charge conservation is *not* an
/// error; lookups report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Sub-block choice past the number of sub-blocks of an axis.
    #[error("block index {index} out of range for axis {axis} with {nblocks} blocks")]
    BlockIndexOutOfBounds {
        axis: usize,
        index: usize,
        nblocks: usize,
    },

    /// Element coordinate past the total dimension of an axis.
    #[error("index {index} out of bounds for axis {axis} of dimension {dim_size}")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        dim_size: usize,
    },

    /// Computed offset lies past the end of the data buffer.
    #[error("offset {offset} out of range for storage of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// A stored block does not map back to itself under the given index set.
    #[error("block coordinate {coord} does not match the given index set")]
    IndexSetMismatch { coord: usize },

    /// Non-zero write into a block forbidden by charge conservation.
    #[error("setting element {indices:?} non-zero would violate the tensor's flux")]
    SymmetryViolation { indices: Vec<usize> },
}

/// Result type for qnsparse operations.
pub type Result<T> = std::result::Result<T, TensorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TensorError::WrongNumberOfIndices {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "wrong number of indices: expected 2, got 3");

        let err = TensorError::BlockIndexOutOfBounds {
            axis: 1,
            index: 4,
            nblocks: 2,
        };
        assert_eq!(
            err.to_string(),
            "block index 4 out of range for axis 1 with 2 blocks"
        );
    }
}
