use super::*;
use crate::assert;

/// Immutable view over a matrix, similar to an immutable reference to a 2D strided [prim@slice].
pub struct MatRef<'a, E> {
    pub(super) data: &'a [E],
    pub(super) nrows: usize,
    pub(super) ncols: usize,
    pub(super) row_stride: usize,
    pub(super) col_stride: usize,
}

impl<E> Clone for MatRef<'_, E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for MatRef<'_, E> {}

impl<'short, E> Reborrow<'short> for MatRef<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        *self
    }
}

impl<'short, E> ReborrowMut<'short> for MatRef<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        *self
    }
}

impl<E> IntoConst for MatRef<'_, E> {
    type Target = Self;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}

impl<'a, E: Copy> MatRef<'a, E> {
    /// Creates a view over a column-major slice of length `nrows * ncols`.
    ///
    /// # Panics
    ///
    /// Panics if the length of the slice doesn't match the dimensions.
    #[track_caller]
    #[inline]
    pub fn from_column_major_slice(data: &'a [E], nrows: usize, ncols: usize) -> Self {
        check_slice_len(data.len(), nrows, ncols);
        Self {
            data,
            nrows,
            ncols,
            row_stride: 1,
            col_stride: nrows,
        }
    }

    /// Creates a view over a row-major slice of length `nrows * ncols`.
    ///
    /// # Panics
    ///
    /// Panics if the length of the slice doesn't match the dimensions.
    #[track_caller]
    #[inline]
    pub fn from_row_major_slice(data: &'a [E], nrows: usize, ncols: usize) -> Self {
        MatRef::from_column_major_slice(data, ncols, nrows).transpose()
    }

    /// Returns the number of rows of the matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the number of rows and columns of the matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Returns the row stride of the matrix, specified in number of elements, not in bytes.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Returns the column stride of the matrix, specified in number of elements, not in bytes.
    #[inline]
    pub fn col_stride(&self) -> usize {
        self.col_stride
    }

    /// Returns a reference to the element at the given indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn get(self, row: usize, col: usize) -> &'a E {
        assert!(all(row < self.nrows, col < self.ncols));
        &self.data[elem_offset(row, col, self.row_stride, self.col_stride)]
    }

    /// Reads the value of the element at the given indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> E {
        *(*self).get(row, col)
    }

    /// Returns a view over the transpose of `self`.
    #[inline]
    #[must_use]
    pub fn transpose(self) -> Self {
        Self {
            data: self.data,
            nrows: self.ncols,
            ncols: self.nrows,
            row_stride: self.col_stride,
            col_stride: self.row_stride,
        }
    }

    /// Returns a view over the submatrix starting at `(row_start, col_start)`, with dimensions
    /// `(nrows, ncols)`.
    ///
    /// # Panics
    ///
    /// Panics if the submatrix is not contained in `self`.
    #[track_caller]
    #[inline]
    pub fn submatrix(self, row_start: usize, col_start: usize, nrows: usize, ncols: usize) -> Self {
        assert!(all(
            row_start <= self.nrows,
            col_start <= self.ncols,
            nrows <= self.nrows - row_start,
            ncols <= self.ncols - col_start,
        ));
        let offset = if nrows == 0 || ncols == 0 {
            self.data.len()
        } else {
            elem_offset(row_start, col_start, self.row_stride, self.col_stride)
        };
        Self {
            data: tail(self.data, offset),
            nrows,
            ncols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
        }
    }

    /// Returns a view over the diagonal of the matrix.
    #[inline]
    pub fn diagonal(self) -> DiagRef<'a, E> {
        DiagRef { inner: self }
    }

    /// Returns an owned copy of the matrix.
    #[inline]
    pub fn to_owned(&self) -> Mat<E> {
        let this = *self;
        Mat::from_fn(this.nrows, this.ncols, |i, j| this.read(i, j))
    }

    /// Returns `true` if consecutive elements of each column are adjacent in memory.
    #[inline]
    pub fn is_col_major(&self) -> bool {
        self.row_stride == 1
    }
}

impl<'a, E: ComplexField> MatRef<'a, E> {
    /// Returns the maximum absolute value of the elements of the matrix, or zero if it is empty.
    #[inline]
    pub fn norm_max(&self) -> E::Real {
        norm_max(*self)
    }

    /// Returns an owned copy of the conjugate transpose of the matrix.
    #[inline]
    pub fn to_adjoint(&self) -> Mat<E> {
        let this = *self;
        Mat::from_fn(this.ncols, this.nrows, |i, j| this.read(j, i).conj())
    }
}

impl<E: Copy + Debug> Debug for MatRef<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt_rows(*self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use crate::debug_assert;

    #[test]
    fn transpose_is_free() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let m = MatRef::from_column_major_slice(&data, 3, 2);
        let t = m.transpose();

        assert!(t.shape() == (2, 3));
        assert!(all(t.row_stride() == 3, t.col_stride() == 1));
        for i in 0..3 {
            for j in 0..2 {
                assert!(m.read(i, j) == t.read(j, i));
            }
        }
        debug_assert!(!t.is_col_major());
    }

    #[test]
    #[should_panic]
    fn read_out_of_bounds() {
        let data = [1.0, 2.0];
        let m = MatRef::from_column_major_slice(&data, 2, 1);
        m.read(0, 1);
    }
}
