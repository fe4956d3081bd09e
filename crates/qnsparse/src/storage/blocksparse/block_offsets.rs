//! BlockOffsets: the table of retained blocks.
//!
//! Each entry pairs a composite block coordinate (the mixed-radix encoding of a
//! block's sub-block choices) with the offset of that block's first element in
//! the flat data buffer. Entries are kept in the order they were enumerated; a
//! hash map from coordinate to offset gives O(1) lookup.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::charge::Charge;
use crate::counter::Counter;
use crate::index::QnIndexSet;
use crate::radix;

/// One retained block: where its data starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockOffset {
    /// Composite block coordinate
    pub block: usize,
    /// Offset of the block's first element in the data buffer
    pub offset: usize,
}

impl BlockOffset {
    #[inline]
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// Insertion-ordered table of retained blocks.
///
/// # Example
/// ```
/// use qnsparse::{Arrow, QnIndex, QnIndexSet};
/// use qnsparse::storage::blocksparse::{BlockOffset, BlockOffsets};
///
/// let a = QnIndex::new([(0i32, 2), (1, 3)], Arrow::Out);
/// let b = QnIndex::new([(0i32, 2), (-1, 2)], Arrow::Out);
/// let is = QnIndexSet::new(vec![a, b]);
///
/// let offsets = BlockOffsets::from_flux(&is, &0);
/// assert_eq!(
///     offsets.entries(),
///     &[BlockOffset::new(0, 0), BlockOffset::new(3, 4)]
/// );
/// assert_eq!(offsets.total_nnz(), 10);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BlockOffsets {
    entries: Vec<BlockOffset>,
    /// Composite block coordinate -> offset
    lookup: HashMap<usize, usize>,
    /// Total number of stored elements
    total_nnz: usize,
}

impl BlockOffsets {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate every block of `is` whose net charge equals `flux`.
    ///
    /// Blocks are visited with axis 0 varying fastest and laid out back to back
    /// in that order. A rank-0 index set always yields the single scalar entry
    /// `(0, 0)` of size 1, whatever the flux.
    pub fn from_flux<Q: Charge>(is: &QnIndexSet<Q>, flux: &Q) -> Self {
        let mut offsets = Self::new();
        if is.rank() == 0 {
            offsets.push(0, 1);
            return offsets;
        }

        let radices = is.nblocks();
        let counter = Counter::from_extents(&radices);
        let candidates = counter.total();
        for block in counter {
            if is.block_charge(block.coords()) != *flux {
                continue;
            }
            let coord = radix::encode(block.coords(), &radices);
            let volume = is.block_volume(block.coords());
            trace!(%block, coord, volume, offset = offsets.total_nnz, "retaining block");
            offsets.push(coord, volume);
        }

        debug!(
            rank = is.rank(),
            candidates = ?candidates,
            nnzblocks = offsets.nnzblocks(),
            nnz = offsets.total_nnz,
            flux = ?flux,
            "enumerated flux-conserving blocks"
        );
        offsets
    }

    /// Append a block of `volume` elements at the current end of storage.
    fn push(&mut self, block: usize, volume: usize) {
        let offset = self.total_nnz;
        let previous = self.lookup.insert(block, offset);
        debug_assert!(previous.is_none(), "block {block} enumerated twice");
        self.entries.push(BlockOffset::new(block, offset));
        self.total_nnz += volume;
    }

    /// Offset of the block with composite coordinate `block`.
    ///
    /// Returns `None` if the block is not present.
    #[inline]
    pub fn get(&self, block: usize) -> Option<usize> {
        self.lookup.get(&block).copied()
    }

    #[inline]
    pub fn contains(&self, block: usize) -> bool {
        self.lookup.contains_key(&block)
    }

    /// Number of retained blocks.
    #[inline]
    pub fn nnzblocks(&self) -> usize {
        self.entries.len()
    }

    /// Total number of stored elements.
    #[inline]
    pub fn total_nnz(&self) -> usize {
        self.total_nnz
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in enumeration order.
    #[inline]
    pub fn entries(&self) -> &[BlockOffset] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockOffset> {
        self.entries.iter()
    }
}

impl PartialEq for BlockOffsets {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.total_nnz == other.total_nnz
    }
}

impl Eq for BlockOffsets {}

impl std::fmt::Display for BlockOffsets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BlockOffsets(nnzblocks={}, total_nnz={})",
            self.nnzblocks(),
            self.total_nnz
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::Arrow;
    use crate::index::QnIndex;
    use crate::qn::QN;

    fn example_indices() -> QnIndexSet<i32> {
        QnIndexSet::new(vec![
            QnIndex::new([(0, 2), (1, 3)], Arrow::Out),
            QnIndex::new([(0, 2), (-1, 2)], Arrow::Out),
        ])
    }

    #[test]
    fn test_block_offsets_empty() {
        let offsets = BlockOffsets::new();
        assert_eq!(offsets.nnzblocks(), 0);
        assert_eq!(offsets.total_nnz(), 0);
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_from_flux_example() {
        let offsets = BlockOffsets::from_flux(&example_indices(), &0);
        // (A0, B0) -> coord 0, volume 4; (A1, B1) -> coord 1 + 1*2 = 3, volume 6
        assert_eq!(
            offsets.entries(),
            &[BlockOffset::new(0, 0), BlockOffset::new(3, 4)]
        );
        assert_eq!(offsets.total_nnz(), 10);
        assert_eq!(offsets.get(3), Some(4));
        assert!(!offsets.contains(1));
        assert!(!offsets.contains(2));
    }

    #[test]
    fn test_from_flux_other_target() {
        let is = example_indices();
        let plus = BlockOffsets::from_flux(&is, &1);
        // only (A1, B0): coord 1, volume 3*2
        assert_eq!(plus.entries(), &[BlockOffset::new(1, 0)]);
        assert_eq!(plus.total_nnz(), 6);

        let minus = BlockOffsets::from_flux(&is, &-1);
        assert_eq!(minus.entries(), &[BlockOffset::new(2, 0)]);
        assert_eq!(minus.total_nnz(), 4);

        let none = BlockOffsets::from_flux(&is, &5);
        assert!(none.is_empty());
        assert_eq!(none.total_nnz(), 0);
    }

    #[test]
    fn test_from_flux_scalar_ignores_flux() {
        let is: QnIndexSet<QN> = QnIndexSet::scalar();
        for flux in [QN::default(), QN::new(&[3])] {
            let offsets = BlockOffsets::from_flux(&is, &flux);
            assert_eq!(offsets.entries(), &[BlockOffset::new(0, 0)]);
            assert_eq!(offsets.total_nnz(), 1);
        }
    }

    #[test]
    fn test_from_flux_respects_arrows() {
        let s = QnIndex::new([(QN::new(&[1]), 1), (QN::new(&[-1]), 1)], Arrow::Out);
        let is = QnIndexSet::new(vec![s.clone(), s.dag()]);
        let offsets = BlockOffsets::from_flux(&is, &QN::default());
        // diagonal blocks (0,0) and (1,1)
        let coords: Vec<usize> = offsets.iter().map(|e| e.block).collect();
        assert_eq!(coords, vec![0, 3]);
    }

    #[test]
    fn test_from_flux_axis_without_blocks() {
        let is = QnIndexSet::new(vec![
            QnIndex::new([(0i32, 2)], Arrow::Out),
            QnIndex::new(Vec::<(i32, usize)>::new(), Arrow::Out),
        ]);
        let offsets = BlockOffsets::from_flux(&is, &0);
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_from_flux_wide_axes_with_empty_axis() {
        // 10^20 candidate tuples on the other axes, none reachable
        let wide = QnIndex::new((0..10).map(|q| (q, 1usize)), Arrow::Out);
        let mut indices = vec![wide; 20];
        indices.push(QnIndex::new(Vec::<(i32, usize)>::new(), Arrow::Out));
        let offsets = BlockOffsets::from_flux(&QnIndexSet::new(indices), &0);
        assert!(offsets.is_empty());
        assert_eq!(offsets.total_nnz(), 0);
    }

    #[test]
    fn test_block_offsets_display() {
        let offsets = BlockOffsets::from_flux(&example_indices(), &0);
        assert_eq!(
            format!("{}", offsets),
            "BlockOffsets(nnzblocks=2, total_nnz=10)"
        );
    }
}
