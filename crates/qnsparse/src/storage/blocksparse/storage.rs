//! Quantum-number block-sparse storage.
//!
//! `QnBlockSparse` owns the table of retained blocks and the flat buffer that
//! holds them. It does not own the index set: like ITensor's `QDense`, every
//! query is made relative to the [`QnIndexSet`] the storage was built from.
//! [`crate::QnTensor`] bundles the two.

use std::marker::PhantomData;
use std::ops::Range;

use smallvec::SmallVec;

use crate::charge::Charge;
use crate::error::{Result, TensorError};
use crate::index::QnIndexSet;
use crate::radix;
use crate::scalar::Scalar;
use crate::storage::buffer::{CpuBuffer, DataBuffer};

use super::block::Block;
use super::block_offsets::BlockOffsets;

/// Block-sparse storage holding only flux-conserving blocks.
///
/// # Type Parameters
///
/// - `ElT`: Element type (e.g., `f64`, `c64`)
/// - `D`: Data buffer type (e.g., `CpuBuffer<ElT>`)
///
/// # Example
///
/// ```
/// use qnsparse::{Arrow, QnIndex, QnIndexSet};
/// use qnsparse::storage::blocksparse::QnBlockSparse;
///
/// let a = QnIndex::new([(0i32, 2), (1, 3)], Arrow::Out);
/// let b = QnIndex::new([(0i32, 2), (-1, 2)], Arrow::Out);
/// let is = QnIndexSet::new(vec![a, b]);
///
/// let mut storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &0);
/// assert_eq!(storage.nnzblocks(), 2);
/// assert_eq!(storage.nnz(), 10);
///
/// // element (3, 2) lives in block (1, 1) at local (1, 0)
/// *storage.element_mut(&is, &[3, 2]).unwrap().unwrap() = 7.0;
/// assert_eq!(storage.block(&is, &[1, 1]).unwrap().unwrap()[1], 7.0);
///
/// // block (0, 1) has net charge -1: structurally zero
/// assert!(storage.block(&is, &[0, 1]).unwrap().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct QnBlockSparse<ElT: Scalar, D: DataBuffer<ElT> = CpuBuffer<ElT>> {
    /// Flat storage for all retained blocks
    data: D,
    /// Mapping from composite block coordinates to offsets in data
    blockoffsets: BlockOffsets,
    _phantom: PhantomData<ElT>,
}

/// Type alias for CPU-backed storage.
pub type CpuQnBlockSparse<ElT> = QnBlockSparse<ElT, CpuBuffer<ElT>>;

impl<ElT: Scalar, D: DataBuffer<ElT>> QnBlockSparse<ElT, D> {
    /// Create zero-initialized storage for every block of `is` whose net
    /// charge equals `flux`.
    pub fn zeros<Q: Charge>(is: &QnIndexSet<Q>, flux: &Q) -> Self {
        let blockoffsets = BlockOffsets::from_flux(is, flux);
        let data = D::zeros(blockoffsets.total_nnz());
        Self {
            data,
            blockoffsets,
            _phantom: PhantomData,
        }
    }

    /// Number of stored elements.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Number of retained blocks.
    #[inline]
    pub fn nnzblocks(&self) -> usize {
        self.blockoffsets.nnzblocks()
    }

    #[inline]
    pub fn blockoffsets(&self) -> &BlockOffsets {
        &self.blockoffsets
    }

    #[inline]
    pub fn data(&self) -> &D {
        &self.data
    }

    #[inline]
    pub fn as_slice(&self) -> &[ElT] {
        self.data.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ElT] {
        self.data.as_mut_slice()
    }

    /// Overwrite every stored element with `value`.
    pub fn fill(&mut self, value: ElT) {
        self.data.fill(value);
    }

    /// Offset of a block's first element, or `None` if the block is
    /// structurally zero.
    pub fn block_offset<Q: Charge>(
        &self,
        is: &QnIndexSet<Q>,
        block: &[usize],
    ) -> Result<Option<usize>> {
        Ok(self.locate_block(is, block)?.map(|range| range.start))
    }

    /// Data of one block, in column-major order.
    ///
    /// `block` holds one sub-block choice per axis. Returns `Ok(None)` when
    /// the block is structurally zero.
    ///
    /// # Errors
    ///
    /// - [`TensorError::WrongNumberOfIndices`] if `block.len() != is.rank()`
    /// - [`TensorError::BlockIndexOutOfBounds`] if a choice is out of range
    pub fn block<Q: Charge>(
        &self,
        is: &QnIndexSet<Q>,
        block: &[usize],
    ) -> Result<Option<&[ElT]>> {
        let range = self.locate_block(is, block)?;
        Ok(range.map(|range| &self.data.as_slice()[range]))
    }

    /// Mutable data of one block. See [`QnBlockSparse::block`].
    pub fn block_mut<Q: Charge>(
        &mut self,
        is: &QnIndexSet<Q>,
        block: &[usize],
    ) -> Result<Option<&mut [ElT]>> {
        match self.locate_block(is, block)? {
            Some(range) => Ok(Some(&mut self.data.as_mut_slice()[range])),
            None => Ok(None),
        }
    }

    /// One element, addressed by global coordinates along each axis.
    ///
    /// Returns `Ok(None)` when the element lies in a structurally-zero block.
    ///
    /// # Errors
    ///
    /// - [`TensorError::WrongNumberOfIndices`] if `indices.len() != is.rank()`
    /// - [`TensorError::IndexOutOfBounds`] if a coordinate exceeds its axis
    pub fn element<Q: Charge>(
        &self,
        is: &QnIndexSet<Q>,
        indices: &[usize],
    ) -> Result<Option<&ElT>> {
        let position = self.locate_element(is, indices)?;
        Ok(position.map(|i| &self.data.as_slice()[i]))
    }

    /// Mutable element. See [`QnBlockSparse::element`].
    pub fn element_mut<Q: Charge>(
        &mut self,
        is: &QnIndexSet<Q>,
        indices: &[usize],
    ) -> Result<Option<&mut ElT>> {
        match self.locate_element(is, indices)? {
            Some(i) => Ok(Some(&mut self.data.as_mut_slice()[i])),
            None => Ok(None),
        }
    }

    /// Iterate over retained blocks in storage order.
    ///
    /// Every entry is resolved against `is` before the iterator is returned.
    ///
    /// # Errors
    ///
    /// Fails like [`QnBlockSparse::block`] when a decoded block does not fit
    /// `is`, and with [`TensorError::IndexSetMismatch`] when `is` does not map
    /// an entry back to its own offset.
    pub fn iter_blocks<'a, Q: Charge>(
        &'a self,
        is: &'a QnIndexSet<Q>,
    ) -> Result<impl Iterator<Item = (Block, &'a [ElT])> + 'a> {
        let radices = is.nblocks();
        let mut blocks = Vec::with_capacity(self.nnzblocks());
        for entry in self.blockoffsets.iter() {
            let block = Block::from(radix::decode(entry.block, &radices));
            match self.locate_block(is, block.coords())? {
                Some(range) if range.start == entry.offset => blocks.push((block, range)),
                _ => return Err(TensorError::IndexSetMismatch { coord: entry.block }),
            }
        }
        let data = self.data.as_slice();
        Ok(blocks.into_iter().map(move |(block, range)| (block, &data[range])))
    }

    /// Resolve a block-choice tuple to its range in the buffer.
    fn locate_block<Q: Charge>(
        &self,
        is: &QnIndexSet<Q>,
        block: &[usize],
    ) -> Result<Option<Range<usize>>> {
        is.check_block(block)?;

        let coord = radix::encode(block, &is.nblocks());
        let Some(offset) = self.blockoffsets.get(coord) else {
            return Ok(None);
        };
        let end = offset + is.block_volume(block);
        self.check_end(end)?;
        Ok(Some(offset..end))
    }

    /// Resolve global element coordinates to a position in the buffer.
    fn locate_element<Q: Charge>(
        &self,
        is: &QnIndexSet<Q>,
        indices: &[usize],
    ) -> Result<Option<usize>> {
        is.check_rank(indices.len())?;

        let mut blocks: SmallVec<[usize; 8]> = SmallVec::with_capacity(indices.len());
        let mut locals: SmallVec<[usize; 8]> = SmallVec::with_capacity(indices.len());
        let mut sizes: SmallVec<[usize; 8]> = SmallVec::with_capacity(indices.len());
        for (axis, (&i, index)) in indices.iter().zip(is).enumerate() {
            let (block, local) = index.find_block(i).ok_or(TensorError::IndexOutOfBounds {
                axis,
                index: i,
                dim_size: index.dim(),
            })?;
            blocks.push(block);
            locals.push(local);
            sizes.push(index.block_size(block));
        }

        let coord = radix::encode(&blocks, &is.nblocks());
        let Some(offset) = self.blockoffsets.get(coord) else {
            return Ok(None);
        };
        // within a block the radix of each axis is the chosen sub-block's size
        let position = offset + radix::encode(&locals, &sizes);
        self.check_end(position + 1)?;
        Ok(Some(position))
    }

    /// Check that `..end` lies inside the buffer.
    fn check_end(&self, end: usize) -> Result<()> {
        if end > self.data.len() {
            return Err(TensorError::OffsetOutOfRange {
                offset: end - 1,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

impl<ElT: Scalar, D: DataBuffer<ElT>> PartialEq for QnBlockSparse<ElT, D> {
    fn eq(&self, other: &Self) -> bool {
        self.blockoffsets == other.blockoffsets && self.data == other.data
    }
}

impl<ElT: Scalar, D: DataBuffer<ElT>> std::fmt::Display for QnBlockSparse<ElT, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "QnBlockSparse(nnzblocks={}, nnz={})",
            self.nnzblocks(),
            self.nnz()
        )
    }
}
