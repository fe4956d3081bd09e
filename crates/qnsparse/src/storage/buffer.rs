//! Data buffer abstraction for block-sparse storage.
//!
//! Storage is generic over where its elements live, mirroring the `DataT`
//! parameter of NDTensors.jl. [`CpuBuffer`] is the `Vec`-backed default.

use crate::scalar::Scalar;

/// Flat, contiguous element storage.
///
/// The length is fixed when the buffer is created; only contents change.
pub trait DataBuffer<T: Scalar>: Clone + std::fmt::Debug + PartialEq {
    /// Create a buffer of `len` zeros.
    fn zeros(len: usize) -> Self;

    /// Number of elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_slice(&self) -> &[T];

    fn as_mut_slice(&mut self) -> &mut [T];

    /// Overwrite every element with `value`.
    fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }
}

/// CPU data buffer backed by `Vec<T>`.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuBuffer<T: Scalar> {
    data: Vec<T>,
}

impl<T: Scalar> CpuBuffer<T> {
    /// Consume the buffer and return the underlying Vec.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Scalar> DataBuffer<T> for CpuBuffer<T> {
    #[inline]
    fn zeros(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}
