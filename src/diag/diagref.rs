use super::*;
use crate::assert;

/// Diagonal matrix view over the main diagonal of a matrix.
///
/// No storage is allocated: the elements are read from the underlying matrix.
pub struct DiagRef<'a, E> {
    pub(crate) inner: MatRef<'a, E>,
}

impl<E: Copy + core::fmt::Debug> core::fmt::Debug for DiagRef<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries((0..self.dim()).map(|i| self.read(i)))
            .finish()
    }
}

impl<E> Clone for DiagRef<'_, E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for DiagRef<'_, E> {}

impl<'short, E> Reborrow<'short> for DiagRef<'_, E> {
    type Target = DiagRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        *self
    }
}

impl<'short, E> ReborrowMut<'short> for DiagRef<'_, E> {
    type Target = DiagRef<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        *self
    }
}

impl<E> IntoConst for DiagRef<'_, E> {
    type Target = Self;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}

impl<'a, E: Copy> DiagRef<'a, E> {
    /// Returns the number of elements on the diagonal.
    #[inline]
    pub fn dim(&self) -> usize {
        Ord::min(self.inner.nrows(), self.inner.ncols())
    }

    /// Reads the `i`-th diagonal element.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[track_caller]
    #[inline]
    pub fn read(&self, i: usize) -> E {
        assert!(i < self.dim());
        self.inner.read(i, i)
    }

    /// Returns an iterator over the diagonal elements.
    #[inline]
    pub fn iter(self) -> impl Iterator<Item = E> + 'a {
        (0..self.dim()).map(move |i| self.inner.read(i, i))
    }

    /// Returns the diagonal elements as a vector.
    #[inline]
    pub fn to_vec(&self) -> Vec<E> {
        self.iter().collect()
    }
}

impl<E: ComplexField> DiagRef<'_, E> {
    /// Returns the diagonal as a dense square matrix.
    pub fn to_mat(&self) -> Mat<E> {
        let n = self.dim();
        let this = *self;
        Mat::from_fn(n, n, |i, j| if i == j { this.read(i) } else { E::zero() })
    }

    /// Returns the largest absolute value on the diagonal, or zero if it is empty.
    pub fn norm_max(&self) -> E::Real {
        let mut max = E::Real::zero();
        for value in self.iter() {
            let abs = value.abs();
            if abs > max {
                max = abs;
            }
        }
        max
    }
}
