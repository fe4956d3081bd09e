//! BlockDim type for the sub-block sizes of one axis.
//!
//! A BlockDim mirrors NDTensors.jl's `BlockDim = Vector{Int}`: the sizes of the
//! sub-blocks an axis is split into, in order.

/// Sub-block sizes of a single axis.
///
/// Stores block sizes and precomputes cumulative starts.
///
/// # Example
/// ```
/// use qnsparse::index::BlockDim;
///
/// let dim = BlockDim::new(vec![2, 3, 4]);
/// assert_eq!(dim.nblocks(), 3);
/// assert_eq!(dim.total_size(), 9);
/// assert_eq!(dim.block_size(1), 3);
/// assert_eq!(dim.block_offset(2), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockDim {
    /// Size of each block
    block_sizes: Vec<usize>,
    /// Cumulative offsets: cumulative[i] = sum of block_sizes[0..i]
    cumulative: Vec<usize>,
}

impl BlockDim {
    /// Create a new BlockDim from block sizes.
    pub fn new(block_sizes: Vec<usize>) -> Self {
        let mut cumulative = Vec::with_capacity(block_sizes.len() + 1);
        cumulative.push(0);
        let mut total = 0usize;
        for &size in &block_sizes {
            total += size;
            cumulative.push(total);
        }
        Self {
            block_sizes,
            cumulative,
        }
    }

    #[inline]
    pub fn nblocks(&self) -> usize {
        self.block_sizes.len()
    }

    /// Total size (sum of all block sizes).
    #[inline]
    pub fn total_size(&self) -> usize {
        self.cumulative[self.block_sizes.len()]
    }

    /// Size of block `block_index`.
    ///
    /// # Panics
    /// Panics if block_index is out of bounds.
    #[inline]
    pub fn block_size(&self, block_index: usize) -> usize {
        self.block_sizes[block_index]
    }

    /// First global coordinate covered by block `block_index`.
    ///
    /// # Panics
    /// Panics if block_index is out of bounds.
    #[inline]
    pub fn block_offset(&self, block_index: usize) -> usize {
        self.cumulative[block_index]
    }

    #[inline]
    pub fn block_sizes(&self) -> &[usize] {
        &self.block_sizes
    }

    /// Split a global coordinate into `(block_index, offset_within_block)`.
    ///
    /// Walks the blocks in order, subtracting sizes until the remainder fits
    /// inside the current block, so empty blocks are never selected. Returns
    /// `None` when `index >= total_size()`.
    ///
    /// # Example
    /// ```
    /// use qnsparse::index::BlockDim;
    ///
    /// let dim = BlockDim::new(vec![2, 0, 3]);
    /// assert_eq!(dim.find_block(1), Some((0, 1)));
    /// assert_eq!(dim.find_block(2), Some((2, 0)));
    /// assert_eq!(dim.find_block(5), None);
    /// ```
    pub fn find_block(&self, index: usize) -> Option<(usize, usize)> {
        let mut remainder = index;
        for (block_index, &size) in self.block_sizes.iter().enumerate() {
            if remainder < size {
                return Some((block_index, remainder));
            }
            remainder -= size;
        }
        None
    }

    /// Check if block index is valid.
    #[inline]
    pub fn is_valid_block(&self, block_index: usize) -> bool {
        block_index < self.nblocks()
    }
}

impl std::fmt::Display for BlockDim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockDim({:?})", self.block_sizes)
    }
}

impl From<Vec<usize>> for BlockDim {
    fn from(block_sizes: Vec<usize>) -> Self {
        Self::new(block_sizes)
    }
}

impl<const N: usize> From<[usize; N]> for BlockDim {
    fn from(block_sizes: [usize; N]) -> Self {
        Self::new(block_sizes.to_vec())
    }
}
