//! Multi-dimensional counter over block choices.
//!
//! [`Counter`] walks every tuple of a Cartesian product of per-axis ranges,
//! axis 0 varying fastest. It is the driver of block enumeration.

use std::iter::FusedIterator;
use std::ops::RangeInclusive;

use smallvec::SmallVec;

use crate::storage::blocksparse::Block;

/// Odometer over per-axis inclusive ranges.
///
/// Yields `Π (last - first + 1)` tuples; an axis with an empty range makes the
/// whole sequence empty, and a counter with no axes yields the empty tuple
/// once. [`Counter::reset`] rewinds it.
///
/// # Example
/// ```
/// use qnsparse::counter::Counter;
///
/// let tuples: Vec<Vec<usize>> = Counter::new([0..=1, 5..=6])
///     .map(|b| b.coords().to_vec())
///     .collect();
/// assert_eq!(tuples, vec![vec![0, 5], vec![1, 5], vec![0, 6], vec![1, 6]]);
/// ```
#[derive(Clone, Debug)]
pub struct Counter {
    /// First value of each axis
    first: SmallVec<[usize; 8]>,
    /// Last value of each axis (inclusive)
    last: SmallVec<[usize; 8]>,
    current: SmallVec<[usize; 8]>,
    /// Some axis has an empty range
    empty: bool,
    done: bool,
}

impl Counter {
    /// Create a counter from per-axis inclusive ranges.
    pub fn new<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = RangeInclusive<usize>>,
    {
        let mut empty = false;
        let (first, last) = ranges
            .into_iter()
            .map(|r| {
                empty |= r.is_empty();
                (*r.start(), *r.end())
            })
            .unzip();
        Self::from_bounds(first, last, empty)
    }

    /// Create a counter where axis `j` runs over `0..extents[j]`.
    ///
    /// A zero extent yields an empty sequence.
    pub fn from_extents(extents: &[usize]) -> Self {
        let first = SmallVec::from_elem(0, extents.len());
        let last = extents.iter().map(|&e| e.saturating_sub(1)).collect();
        Self::from_bounds(first, last, extents.contains(&0))
    }

    fn from_bounds(first: SmallVec<[usize; 8]>, last: SmallVec<[usize; 8]>, empty: bool) -> Self {
        Self {
            current: first.clone(),
            first,
            last,
            empty,
            done: empty,
        }
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.first.len()
    }

    /// Total number of tuples in a full pass, or `None` if it does not fit in
    /// a `usize`.
    ///
    /// An empty axis makes the total zero however large the other axes are.
    pub fn total(&self) -> Option<usize> {
        if self.empty {
            return Some(0);
        }
        self.first
            .iter()
            .zip(&self.last)
            .try_fold(1usize, |acc, (&f, &l)| {
                (l - f).checked_add(1).and_then(|n| acc.checked_mul(n))
            })
    }

    /// Rewind to the first tuple.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.first);
        self.done = self.empty;
    }

    /// Whether the sequence is exhausted.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    fn advance(&mut self) {
        for axis in 0..self.current.len() {
            if self.current[axis] < self.last[axis] {
                self.current[axis] += 1;
                return;
            }
            self.current[axis] = self.first[axis];
        }
        self.done = true;
    }
}

impl Iterator for Counter {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.done {
            return None;
        }
        let block = Block::new(&self.current);
        self.advance();
        Some(block)
    }
}

impl FusedIterator for Counter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(counter: Counter) -> Vec<Vec<usize>> {
        counter.map(|b| b.coords().to_vec()).collect()
    }

    #[test]
    fn test_counter_order() {
        let tuples = collect(Counter::from_extents(&[2, 3]));
        assert_eq!(
            tuples,
            vec![
                vec![0, 0],
                vec![1, 0],
                vec![0, 1],
                vec![1, 1],
                vec![0, 2],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_counter_total() {
        let counter = Counter::from_extents(&[2, 3, 4]);
        assert_eq!(counter.rank(), 3);
        assert_eq!(counter.total(), Some(24));
        assert_eq!(counter.count(), 24);
    }

    #[test]
    fn test_counter_offset_ranges() {
        let tuples = collect(Counter::new([2..=3, 1..=1]));
        assert_eq!(tuples, vec![vec![2, 1], vec![3, 1]]);
    }

    #[test]
    fn test_counter_empty_axis() {
        let counter = Counter::from_extents(&[3, 0, 2]);
        assert!(counter.is_done());
        assert_eq!(counter.total(), Some(0));
        assert_eq!(collect(counter), Vec::<Vec<usize>>::new());

        #[allow(clippy::reversed_empty_ranges)]
        let counter = Counter::new([0..=1, 1..=0]);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_counter_total_with_empty_axis_does_not_overflow() {
        let mut extents = vec![usize::MAX; 4];
        extents.push(0);
        let counter = Counter::from_extents(&extents);
        assert_eq!(counter.total(), Some(0));
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_counter_total_too_large() {
        assert_eq!(Counter::from_extents(&[usize::MAX, 2]).total(), None);
        assert_eq!(Counter::new([0..=usize::MAX]).total(), None);
    }

    #[test]
    fn test_counter_range_ending_at_max() {
        let counter = Counter::new([usize::MAX - 1..=usize::MAX, 3..=3]);
        assert_eq!(counter.total(), Some(2));
        let tuples = collect(counter);
        assert_eq!(tuples, vec![vec![usize::MAX - 1, 3], vec![usize::MAX, 3]]);
    }

    #[test]
    fn test_counter_no_axes() {
        let counter = Counter::from_extents(&[]);
        assert_eq!(counter.total(), Some(1));
        assert_eq!(collect(counter), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_counter_reset() {
        let mut counter = Counter::from_extents(&[2, 2]);
        let first_pass: Vec<Block> = counter.by_ref().collect();
        assert!(counter.is_done());
        assert_eq!(counter.next(), None);

        counter.reset();
        assert!(!counter.is_done());
        let second_pass: Vec<Block> = counter.collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 4);
    }
}
