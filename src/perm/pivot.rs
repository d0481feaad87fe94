use super::*;
use crate::assert;

/// Row or diagonal permutation accumulated by a decomposition, one transposition at a time.
///
/// `order()[i]` is the index, in the original matrix, of the row that ended up at position `i`
/// of the factorization. The inverse mapping is updated along with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PivotTracker {
    order: Vec<usize>,
    reverse: Vec<usize>,
    transpositions: usize,
}

impl PivotTracker {
    /// Creates the identity permutation of dimension `n`.
    pub fn new(n: usize) -> Self {
        let mut this = Self::default();
        this.reset(n);
        this
    }

    /// Reinitializes the tracker to the identity permutation of dimension `n`, keeping the
    /// allocations.
    pub fn reset(&mut self, n: usize) {
        self.order.clear();
        self.order.extend(0..n);
        self.reverse.clear();
        self.reverse.extend(0..n);
        self.transpositions = 0;
    }

    /// Records the transposition of positions `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    pub fn change(&mut self, a: usize, b: usize) {
        let n = self.order.len();
        assert!(all(a < n, b < n));
        if a == b {
            return;
        }

        self.order.swap(a, b);
        self.reverse[self.order[a]] = a;
        self.reverse[self.order[b]] = b;
        self.transpositions += 1;
    }

    /// Returns the dimension of the permutation.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the permutation has dimension zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maps each position of the factorization to the original row index.
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Maps each original row index to its position in the factorization.
    #[inline]
    pub fn reverse_order(&self) -> &[usize] {
        &self.reverse
    }

    /// Returns `1` after an even number of transpositions, and `-1` after an odd number.
    #[inline]
    pub fn signum(&self) -> i32 {
        if self.transpositions % 2 == 0 {
            1
        } else {
            -1
        }
    }

    /// Returns `true` if at least one transposition was recorded since the last reset.
    #[inline]
    pub fn is_modified(&self) -> bool {
        self.transpositions > 0
    }

    /// Returns the number of transpositions recorded since the last reset.
    #[inline]
    pub fn transposition_count(&self) -> usize {
        self.transpositions
    }

    /// Returns a view of the tracked permutation.
    #[inline]
    pub fn as_perm(&self) -> PermRef<'_> {
        PermRef::new_trusted(&self.order, &self.reverse)
    }
}
