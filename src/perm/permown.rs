use super::*;
use crate::assert;

/// Permutation matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perm {
    pub(super) forward: Box<[usize]>,
    pub(super) inverse: Box<[usize]>,
}

impl Perm {
    /// Returns the identity permutation of dimension `n`.
    #[inline]
    pub fn identity(n: usize) -> Self {
        let forward: Box<[usize]> = (0..n).collect();
        Self {
            inverse: forward.clone(),
            forward,
        }
    }

    /// Convert `self` to a permutation view.
    #[inline]
    pub fn as_ref(&self) -> PermRef<'_> {
        PermRef {
            forward: &self.forward,
            inverse: &self.inverse,
        }
    }

    /// Creates a new permutation from its forward array, computing the inverse.
    ///
    /// # Panics
    ///
    /// Panics if `forward` is not a permutation of `0..forward.len()`.
    #[inline]
    #[track_caller]
    pub fn from_forward(forward: Box<[usize]>) -> Self {
        let n = forward.len();
        let mut inverse = vec![usize::MAX; n].into_boxed_slice();
        for (i, &p) in forward.iter().enumerate() {
            assert!(p < n);
            assert!(inverse[p] == usize::MAX);
            inverse[p] = i;
        }
        Self { forward, inverse }
    }

    /// Creates a new permutation, by checking the validity of the inputs.
    ///
    /// # Panics
    ///
    /// The function panics if any of the following conditions are violated:
    /// `forward` and `inverse` must have the same length, be valid permutations, and be inverse
    /// permutations of each other.
    #[inline]
    #[track_caller]
    pub fn new_checked(forward: Box<[usize]>, inverse: Box<[usize]>) -> Self {
        PermRef::new_checked(&forward, &inverse);
        Self { forward, inverse }
    }

    /// Returns the permutation as an array.
    #[inline]
    pub fn into_arrays(self) -> (Box<[usize]>, Box<[usize]>) {
        (self.forward, self.inverse)
    }

    /// Returns the dimension of the permutation.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if the permutation has dimension zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Returns the inverse permutation.
    #[inline]
    pub fn into_inverse(self) -> Self {
        Self {
            forward: self.inverse,
            inverse: self.forward,
        }
    }
}
