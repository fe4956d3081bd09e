//! Composite indices carrying quantum numbers.
//!
//! A [`QnIndex`] is one tensor axis split into sub-blocks, each labelled by a
//! charge, together with an [`Arrow`]. A [`QnIndexSet`] is the ordered list of
//! axes of a tensor.

use smallvec::SmallVec;

use crate::charge::{Arrow, Charge};
use crate::error::{Result, TensorError};

use super::block_dim::BlockDim;

/// One axis with quantum-number block structure.
///
/// # Example
/// ```
/// use qnsparse::{Arrow, QN, QnIndex};
///
/// let s = QnIndex::new([(QN::new(&[1]), 1), (QN::new(&[-1]), 1)], Arrow::Out);
/// assert_eq!(s.nblocks(), 2);
/// assert_eq!(s.dim(), 2);
/// assert_eq!(s.qn(1), &QN::new(&[-1]));
/// assert_eq!(s.dag().dir(), Arrow::In);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QnIndex<Q> {
    blockdim: BlockDim,
    qns: Vec<Q>,
    dir: Arrow,
}

impl<Q: Charge> QnIndex<Q> {
    /// Create an index from `(charge, size)` sectors and an orientation.
    pub fn new<I>(sectors: I, dir: Arrow) -> Self
    where
        I: IntoIterator<Item = (Q, usize)>,
    {
        let (qns, sizes): (Vec<Q>, Vec<usize>) = sectors.into_iter().unzip();
        Self {
            blockdim: BlockDim::new(sizes),
            qns,
            dir,
        }
    }

    /// Number of sub-blocks.
    #[inline]
    pub fn nblocks(&self) -> usize {
        self.qns.len()
    }

    /// Total dimension (sum of sub-block sizes).
    #[inline]
    pub fn dim(&self) -> usize {
        self.blockdim.total_size()
    }

    #[inline]
    pub fn block_size(&self, block: usize) -> usize {
        self.blockdim.block_size(block)
    }

    /// Charge of sub-block `block`.
    #[inline]
    pub fn qn(&self, block: usize) -> &Q {
        &self.qns[block]
    }

    #[inline]
    pub fn dir(&self) -> Arrow {
        self.dir
    }

    /// The same index with its arrow reversed.
    pub fn dag(&self) -> Self {
        Self {
            blockdim: self.blockdim.clone(),
            qns: self.qns.clone(),
            dir: self.dir.rev(),
        }
    }

    #[inline]
    pub fn block_dim(&self) -> &BlockDim {
        &self.blockdim
    }

    /// Split a global coordinate into `(sub-block, local coordinate)`.
    #[inline]
    pub fn find_block(&self, index: usize) -> Option<(usize, usize)> {
        self.blockdim.find_block(index)
    }

    /// Iterate over `(charge, size)` sectors.
    pub fn sectors(&self) -> impl Iterator<Item = (&Q, usize)> + '_ {
        self.qns.iter().zip(self.blockdim.block_sizes().iter().copied())
    }
}

impl<Q: Charge + std::fmt::Display> std::fmt::Display for QnIndex<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QnIndex(dim={}, dir={}, [", self.dim(), self.dir)?;
        for (i, (qn, size)) in self.sectors().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{qn}=>{size}")?;
        }
        write!(f, "])")
    }
}

/// The ordered axes of a block-sparse tensor.
///
/// # Example
/// ```
/// use qnsparse::{Arrow, QnIndex, QnIndexSet};
///
/// let a = QnIndex::new([(0i32, 2), (1, 3)], Arrow::Out);
/// let b = QnIndex::new([(0i32, 2), (-1, 2)], Arrow::Out);
/// let is = QnIndexSet::new(vec![a, b]);
///
/// assert_eq!(is.rank(), 2);
/// assert_eq!(is.dense_shape(), vec![5, 4]);
/// assert_eq!(is.block_volume(&[1, 1]), 6);
/// assert_eq!(is.block_charge(&[1, 1]), 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QnIndexSet<Q> {
    indices: Vec<QnIndex<Q>>,
}

impl<Q: Charge> QnIndexSet<Q> {
    pub fn new(indices: Vec<QnIndex<Q>>) -> Self {
        Self { indices }
    }

    /// The empty index set of a scalar.
    pub fn scalar() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QnIndex<Q>> {
        self.indices.iter()
    }

    /// Number of sub-blocks of every axis, the radices of block coordinates.
    pub fn nblocks(&self) -> SmallVec<[usize; 8]> {
        self.indices.iter().map(QnIndex::nblocks).collect()
    }

    /// Total dimension of every axis.
    pub fn dense_shape(&self) -> Vec<usize> {
        self.indices.iter().map(QnIndex::dim).collect()
    }

    /// Number of elements of the block selected by `block`.
    ///
    /// # Panics
    /// Panics if a choice is out of range for its axis.
    pub fn block_volume(&self, block: &[usize]) -> usize {
        debug_assert_eq!(block.len(), self.rank());
        block
            .iter()
            .zip(&self.indices)
            .map(|(&b, index)| index.block_size(b))
            .product()
    }

    /// Shape of the block selected by `block`.
    ///
    /// # Panics
    /// Panics if a choice is out of range for its axis.
    pub fn block_shape(&self, block: &[usize]) -> Vec<usize> {
        debug_assert_eq!(block.len(), self.rank());
        block
            .iter()
            .zip(&self.indices)
            .map(|(&b, index)| index.block_size(b))
            .collect()
    }

    /// Net charge of a block: the sum of its sub-block charges, each oriented
    /// by the arrow of its axis.
    ///
    /// # Panics
    /// Panics if a choice is out of range for its axis.
    pub fn block_charge(&self, block: &[usize]) -> Q {
        debug_assert_eq!(block.len(), self.rank());
        block
            .iter()
            .zip(&self.indices)
            .fold(Q::default(), |acc, (&b, index)| {
                acc + index.qn(b).clone().oriented(index.dir())
            })
    }

    /// Whether `block` names an existing sub-block on every axis.
    pub fn is_valid_block(&self, block: &[usize]) -> bool {
        self.check_block(block).is_ok()
    }

    /// Check that `block` has one choice per axis, each naming an existing
    /// sub-block.
    ///
    /// # Errors
    ///
    /// - [`TensorError::WrongNumberOfIndices`] if `block.len() != self.rank()`
    /// - [`TensorError::BlockIndexOutOfBounds`] for the first axis whose
    ///   choice is out of range
    pub fn check_block(&self, block: &[usize]) -> Result<()> {
        self.check_rank(block.len())?;
        for (axis, (&choice, index)) in block.iter().zip(&self.indices).enumerate() {
            if !index.block_dim().is_valid_block(choice) {
                return Err(TensorError::BlockIndexOutOfBounds {
                    axis,
                    index: choice,
                    nblocks: index.nblocks(),
                });
            }
        }
        Ok(())
    }

    /// Check that a tuple of `len` coordinates matches the rank.
    pub fn check_rank(&self, len: usize) -> Result<()> {
        if len != self.rank() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: self.rank(),
                actual: len,
            });
        }
        Ok(())
    }
}

impl<Q> std::ops::Index<usize> for QnIndexSet<Q> {
    type Output = QnIndex<Q>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.indices[index]
    }
}

impl<Q> FromIterator<QnIndex<Q>> for QnIndexSet<Q> {
    fn from_iter<I: IntoIterator<Item = QnIndex<Q>>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl<'a, Q> IntoIterator for &'a QnIndexSet<Q> {
    type Item = &'a QnIndex<Q>;
    type IntoIter = std::slice::Iter<'a, QnIndex<Q>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}
