//! Zero-copy triangular views over a matrix buffer.

use crate::{assert, entity::ComplexField, linalg::matmul::triangular::BlockStructure, mat::*};

/// Read-only view over the part of a matrix described by a [`BlockStructure`].
///
/// Elements outside the structure read as zero, and a unit diagonal reads as one, without
/// touching the underlying buffer.
#[derive(Clone, Copy)]
pub struct TriangularRef<'a, E> {
    inner: MatRef<'a, E>,
    structure: BlockStructure,
}

impl<E: ComplexField> core::fmt::Debug for TriangularRef<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_owned().fmt(f)
    }
}

impl<'a, E: ComplexField> TriangularRef<'a, E> {
    /// Creates a view over `inner`, restricted to `structure`.
    #[inline]
    pub fn new(inner: MatRef<'a, E>, structure: BlockStructure) -> Self {
        Self { inner, structure }
    }

    /// Returns the number of rows of the view.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    /// Returns the number of columns of the view.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    /// Returns the structure of the view.
    #[inline]
    pub fn structure(&self) -> BlockStructure {
        self.structure
    }

    /// Returns the underlying buffer, including the elements hidden by the structure.
    #[inline]
    pub fn storage(&self) -> MatRef<'a, E> {
        self.inner
    }

    /// Reads the value of the element at the given indices, as seen through the structure.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> E {
        assert!(all(row < self.nrows(), col < self.ncols()));
        let inner = self.inner;
        self.structure.mask(row, col, || inner.read(row, col))
    }

    /// Materializes the view.
    pub fn to_owned(&self) -> Mat<E> {
        let this = *self;
        Mat::from_fn(self.nrows(), self.ncols(), |i, j| this.read(i, j))
    }
}
