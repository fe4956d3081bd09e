//! Block type for quantum-number block-sparse storage.
//!
//! A `Block` is a tuple of sub-block choices, one per composite index of the
//! tensor. It is what the enumeration counter yields and what lookups accept.

use smallvec::SmallVec;

/// A tuple of sub-block choices.
///
/// Uses `SmallVec<[usize; 8]>` so tensors of rank up to 8 never allocate.
///
/// # Example
/// ```
/// use qnsparse::storage::blocksparse::Block;
///
/// let block = Block::new(&[1, 0, 2]);
/// assert_eq!(block.ndims(), 3);
/// assert_eq!(block[2], 2);
/// assert_eq!(format!("{block}"), "Block(1, 0, 2)");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block {
    coords: SmallVec<[usize; 8]>,
}

impl Block {
    /// Create a new Block from sub-block choices.
    pub fn new(coords: &[usize]) -> Self {
        Self {
            coords: SmallVec::from_slice(coords),
        }
    }

    /// Number of positions (the tensor rank).
    #[inline]
    pub fn ndims(&self) -> usize {
        self.coords.len()
    }

    /// Sub-block choices as a slice.
    #[inline]
    pub fn coords(&self) -> &[usize] {
        &self.coords
    }
}

impl std::ops::Index<usize> for Block {
    type Output = usize;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.coords[index]
    }
}

impl FromIterator<usize> for Block {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block(")?;
        for (i, &c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> From<[usize; N]> for Block {
    fn from(coords: [usize; N]) -> Self {
        Self::new(&coords)
    }
}

impl From<&[usize]> for Block {
    fn from(coords: &[usize]) -> Self {
        Self::new(coords)
    }
}

impl From<Vec<usize>> for Block {
    fn from(coords: Vec<usize>) -> Self {
        Self::new(&coords)
    }
}
