use super::*;
use crate::assert;

/// Mutable view over a matrix, similar to a mutable reference to a 2D strided [prim@slice].
pub struct MatMut<'a, E> {
    pub(super) data: &'a mut [E],
    pub(super) nrows: usize,
    pub(super) ncols: usize,
    pub(super) row_stride: usize,
    pub(super) col_stride: usize,
}

impl<'short, E> Reborrow<'short> for MatMut<'_, E> {
    type Target = MatRef<'short, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        MatRef {
            data: &*self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
        }
    }
}

impl<'short, E> ReborrowMut<'short> for MatMut<'_, E> {
    type Target = MatMut<'short, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        MatMut {
            data: &mut *self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
        }
    }
}

impl<'a, E> IntoConst for MatMut<'a, E> {
    type Target = MatRef<'a, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        MatRef {
            data: self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
        }
    }
}

impl<'a, E: Copy> MatMut<'a, E> {
    /// Creates a mutable view over a column-major slice of length `nrows * ncols`.
    ///
    /// # Panics
    ///
    /// Panics if the length of the slice doesn't match the dimensions.
    #[track_caller]
    #[inline]
    pub fn from_column_major_slice_mut(data: &'a mut [E], nrows: usize, ncols: usize) -> Self {
        check_slice_len(data.len(), nrows, ncols);
        Self {
            data,
            nrows,
            ncols,
            row_stride: 1,
            col_stride: nrows,
        }
    }

    /// Creates a mutable view over a row-major slice of length `nrows * ncols`.
    ///
    /// # Panics
    ///
    /// Panics if the length of the slice doesn't match the dimensions.
    #[track_caller]
    #[inline]
    pub fn from_row_major_slice_mut(data: &'a mut [E], nrows: usize, ncols: usize) -> Self {
        MatMut::from_column_major_slice_mut(data, ncols, nrows).transpose_mut()
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

    /// Reads the value of the element at the given indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> E {
        self.rb().read(row, col)
    }

    /// Returns a mutable reference to the element at the given indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn get_mut(self, row: usize, col: usize) -> &'a mut E {
        assert!(all(row < self.nrows, col < self.ncols));
        &mut self.data[elem_offset(row, col, self.row_stride, self.col_stride)]
    }

    /// Writes the value to the element at the given indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        *self.rb_mut().get_mut(row, col) = value;
    }

    /// Swaps the elements at `(row0, col0)` and `(row1, col1)`.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn swap_elems(&mut self, row0: usize, col0: usize, row1: usize, col1: usize) {
        assert!(all(
            row0 < self.nrows,
            row1 < self.nrows,
            col0 < self.ncols,
            col1 < self.ncols,
        ));
        let a = elem_offset(row0, col0, self.row_stride, self.col_stride);
        let b = elem_offset(row1, col1, self.row_stride, self.col_stride);
        self.data.swap(a, b);
    }

    /// Returns a view over the transpose of `self`.
    #[inline]
    #[must_use]
    pub fn transpose_mut(self) -> Self {
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
    pub fn submatrix_mut(
        self,
        row_start: usize,
        col_start: usize,
        nrows: usize,
        ncols: usize,
    ) -> Self {
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
            data: tail_mut(self.data, offset),
            nrows,
            ncols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
        }
    }

    /// Returns a view over the diagonal of the matrix.
    #[inline]
    pub fn diagonal(&self) -> DiagRef<'_, E> {
        self.rb().diagonal()
    }

    /// Copies the values from `other` into `self`.
    ///
    /// # Panics
    ///
    /// Panics if the two matrices don't have the same shape.
    #[track_caller]
    pub fn copy_from(&mut self, other: MatRef<'_, E>) {
        assert!(all(self.nrows == other.nrows(), self.ncols == other.ncols()));
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                self.write(i, j, other.read(i, j));
            }
        }
    }

    /// Fills the elements of `self` with `constant`.
    pub fn fill(&mut self, constant: E) {
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                self.write(i, j, constant);
            }
        }
    }

    /// Returns an owned copy of the matrix.
    #[inline]
    pub fn to_owned(&self) -> Mat<E> {
        self.rb().to_owned()
    }
}

impl<E: ComplexField> MatMut<'_, E> {
    /// Overwrites `self` with the identity matrix.
    pub fn fill_identity(&mut self) {
        self.fill(E::zero());
        for i in 0..Ord::min(self.nrows, self.ncols) {
            self.write(i, i, E::one());
        }
    }

    /// Returns `true` if `self` is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        let this = self.rb();
        (0..this.ncols()).all(|j| {
            (0..this.nrows()).all(|i| {
                let expected = if i == j { E::one() } else { E::zero() };
                this.read(i, j) == expected
            })
        })
    }
}

impl<E: Copy + Debug> Debug for MatMut<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt_rows(self.rb(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use crate::mat;

    #[test]
    fn row_major_view() {
        let mut data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut m = MatMut::from_row_major_slice_mut(&mut data, 2, 3);
        m.write(1, 0, -4.0);
        m.swap_elems(0, 0, 1, 2);
        assert!(m.to_owned() == mat![[6.0, 2.0, 3.0], [-4.0, 5.0, 1.0]]);
        assert!(data == [6.0, 2.0, 3.0, -4.0, 5.0, 1.0]);
    }

    #[test]
    fn identity_checks() {
        let mut m = Mat::<f64>::zeros(3, 3);
        assert!(m.as_mut().is_identity() == false);
        m.as_mut().fill_identity();
        assert!(m.as_mut().is_identity() == true);

        let mut sub = m.as_mut().submatrix_mut(1, 0, 2, 3);
        sub.copy_from(mat![[7.0, 8.0, 9.0], [1.0, 2.0, 3.0]].as_ref());
        assert!(m == mat![[1.0, 0.0, 0.0], [7.0, 8.0, 9.0], [1.0, 2.0, 3.0]]);
    }
}
