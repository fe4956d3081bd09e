//! QnTensor - a flux-conserving block-sparse tensor.
//!
//! `QnTensor` owns its index set, its flux and its [`QnBlockSparse`] storage,
//! so callers address it without passing the index set around.

use crate::charge::Charge;
use crate::error::{Result, TensorError};
use crate::index::QnIndexSet;
use crate::radix;
use crate::scalar::Scalar;
use crate::storage::blocksparse::{Block, QnBlockSparse};
use crate::storage::{CpuBuffer, DataBuffer};

/// A block-sparse tensor whose stored blocks all carry the same net charge.
///
/// # Example
///
/// ```
/// use qnsparse::{Arrow, QnIndex, QnIndexSet, QnTensor};
///
/// let a = QnIndex::new([(0i32, 2), (1, 3)], Arrow::Out);
/// let b = QnIndex::new([(0i32, 2), (-1, 2)], Arrow::Out);
/// let mut t: QnTensor<i32, f64> = QnTensor::zeros(QnIndexSet::new(vec![a, b]), 0);
///
/// assert_eq!(t.shape(), vec![5, 4]);
/// assert_eq!(t.nnz(), 10);
///
/// t.set(&[3, 2], 1.5).unwrap();
/// assert_eq!(t.get(&[3, 2]).unwrap(), 1.5);
///
/// // (0, 2) lies in a block of net charge -1
/// assert_eq!(t.get(&[0, 2]).unwrap(), 0.0);
/// assert!(t.set(&[0, 2], 1.0).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct QnTensor<Q: Charge, ElT: Scalar, D: DataBuffer<ElT> = CpuBuffer<ElT>> {
    inds: QnIndexSet<Q>,
    flux: Q,
    storage: QnBlockSparse<ElT, D>,
}

impl<Q: Charge, ElT: Scalar, D: DataBuffer<ElT>> QnTensor<Q, ElT, D> {
    /// Create a tensor with every flux-conserving block set to zero.
    pub fn zeros(inds: QnIndexSet<Q>, flux: Q) -> Self {
        let storage = QnBlockSparse::zeros(&inds, &flux);
        Self {
            inds,
            flux,
            storage,
        }
    }

    #[inline]
    pub fn inds(&self) -> &QnIndexSet<Q> {
        &self.inds
    }

    /// Net charge shared by every stored block.
    #[inline]
    pub fn flux(&self) -> &Q {
        &self.flux
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.inds.rank()
    }

    /// Dense shape (total dimension of every axis).
    pub fn shape(&self) -> Vec<usize> {
        self.inds.dense_shape()
    }

    /// Number of stored elements.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.storage.nnz()
    }

    /// Number of stored blocks.
    #[inline]
    pub fn nnzblocks(&self) -> usize {
        self.storage.nnzblocks()
    }

    #[inline]
    pub fn storage(&self) -> &QnBlockSparse<ElT, D> {
        &self.storage
    }

    /// Mutable access to the stored values. The block layout cannot change.
    #[inline]
    pub fn storage_mut(&mut self) -> &mut QnBlockSparse<ElT, D> {
        &mut self.storage
    }

    /// Whether the block with sub-block choices `block` is stored.
    ///
    /// Invalid block tuples are reported as not stored.
    pub fn isblocknz(&self, block: &[usize]) -> bool {
        self.inds.is_valid_block(block)
            && self
                .storage
                .blockoffsets()
                .contains(radix::encode(block, &self.inds.nblocks()))
    }

    /// Data of one block in column-major order, or `None` if it is
    /// structurally zero.
    pub fn blockview(&self, block: &[usize]) -> Result<Option<&[ElT]>> {
        self.storage.block(&self.inds, block)
    }

    /// Mutable data of one block.
    pub fn blockview_mut(&mut self, block: &[usize]) -> Result<Option<&mut [ElT]>> {
        self.storage.block_mut(&self.inds, block)
    }

    /// Reference to a stored element, or `None` if it is structurally zero.
    pub fn element(&self, indices: &[usize]) -> Result<Option<&ElT>> {
        self.storage.element(&self.inds, indices)
    }

    /// Mutable reference to a stored element.
    pub fn element_mut(&mut self, indices: &[usize]) -> Result<Option<&mut ElT>> {
        self.storage.element_mut(&self.inds, indices)
    }

    /// Value of an element; structurally-zero elements read as zero.
    pub fn get(&self, indices: &[usize]) -> Result<ElT> {
        Ok(self.element(indices)?.copied().unwrap_or_else(ElT::zero))
    }

    /// Write an element.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::SymmetryViolation`] when a non-zero value is
    /// written into a structurally-zero block. Writing zero there is a no-op.
    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<()> {
        match self.storage.element_mut(&self.inds, indices)? {
            Some(slot) => *slot = value,
            None if value == ElT::zero() => {}
            None => {
                return Err(TensorError::SymmetryViolation {
                    indices: indices.to_vec(),
                });
            }
        }
        Ok(())
    }

    /// Iterate over stored blocks in storage order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (Block, &[ElT])> + '_ {
        // the index set is the one the storage was built from
        self.storage.iter_blocks(&self.inds).into_iter().flatten()
    }

    /// Set every stored element to `value`.
    pub fn fill(&mut self, value: ElT) {
        self.storage.fill(value);
    }

    /// Multiply every stored element by a real factor.
    pub fn scale(&mut self, factor: f64) {
        for x in self.storage.as_mut_slice() {
            *x = x.scale_real(factor);
        }
    }

    /// Frobenius norm. Structurally-zero blocks contribute nothing.
    pub fn norm(&self) -> f64 {
        self.storage
            .as_slice()
            .iter()
            .map(|&x| x.abs_sqr())
            .sum::<f64>()
            .sqrt()
    }
}

impl<Q, ElT, D> PartialEq for QnTensor<Q, ElT, D>
where
    Q: Charge,
    ElT: Scalar,
    D: DataBuffer<ElT>,
{
    fn eq(&self, other: &Self) -> bool {
        self.inds == other.inds && self.flux == other.flux && self.storage == other.storage
    }
}

impl<Q, ElT, D> std::fmt::Display for QnTensor<Q, ElT, D>
where
    Q: Charge,
    ElT: Scalar,
    D: DataBuffer<ElT>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "QnTensor(shape={:?}, flux={:?}, nnzblocks={}, nnz={})",
            self.shape(),
            self.flux,
            self.nnzblocks(),
            self.nnz()
        )
    }
}
