use super::*;

/// Heap allocated resizable matrix, stored in column-major order.
#[derive(Clone)]
pub struct Mat<E> {
    data: Vec<E>,
    nrows: usize,
    ncols: usize,
}

impl<E> Default for Mat<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Mat<E> {
    /// Returns an empty matrix of dimension `0×0`.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            nrows: 0,
            ncols: 0,
        }
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with the provided function.
    #[inline]
    pub fn from_fn(nrows: usize, ncols: usize, f: impl FnMut(usize, usize) -> E) -> Self {
        let mut f = f;
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
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

    /// Returns the column-major storage of the matrix.
    #[inline]
    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    /// Returns a view over the matrix.
    #[inline]
    pub fn as_ref(&self) -> MatRef<'_, E> {
        MatRef {
            data: &self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: 1,
            col_stride: self.nrows,
        }
    }

    /// Returns a mutable view over the matrix.
    #[inline]
    pub fn as_mut(&mut self) -> MatMut<'_, E> {
        MatMut {
            data: &mut self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            row_stride: 1,
            col_stride: self.nrows,
        }
    }
}

impl<E: Copy> Mat<E> {
    /// Reads the value of the element at the given indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> E {
        self.as_ref().read(row, col)
    }

    /// Writes the value to the element at the given indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[track_caller]
    #[inline]
    pub fn write(&mut self, row: usize, col: usize, value: E) {
        self.as_mut().write(row, col, value)
    }

    /// Resizes the matrix in-place so that the new dimensions are `(new_nrows, new_ncols)`.
    /// Elements that are inside both the old and new shapes keep their values. New elements are
    /// created with the given function `f`, so that elements at indices `(i, j)` are created by
    /// calling `f(i, j)`.
    ///
    /// The allocation is reused when the number of rows doesn't change.
    pub fn resize_with(
        &mut self,
        new_nrows: usize,
        new_ncols: usize,
        f: impl FnMut(usize, usize) -> E,
    ) {
        let mut f = f;
        let old_nrows = self.nrows;
        let old_ncols = self.ncols;

        if new_nrows == old_nrows {
            self.data.truncate(new_nrows * Ord::min(old_ncols, new_ncols));
            for j in old_ncols..new_ncols {
                for i in 0..new_nrows {
                    self.data.push(f(i, j));
                }
            }
        } else {
            let old = core::mem::take(&mut self.data);
            let mut data = Vec::with_capacity(new_nrows * new_ncols);
            for j in 0..new_ncols {
                for i in 0..new_nrows {
                    data.push(if i < old_nrows && j < old_ncols {
                        old[i + j * old_nrows]
                    } else {
                        f(i, j)
                    });
                }
            }
            self.data = data;
        }

        self.nrows = new_nrows;
        self.ncols = new_ncols;
    }

    /// Returns a view over the diagonal of the matrix.
    #[inline]
    pub fn diagonal(&self) -> DiagRef<'_, E> {
        self.as_ref().diagonal()
    }

    /// Returns an owned transpose of the matrix.
    #[inline]
    pub fn transpose(&self) -> Mat<E> {
        self.as_ref().transpose().to_owned()
    }
}

impl<E: ComplexField> Mat<E> {
    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros.
    #[inline]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |_, _| E::zero())
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros, except the main
    /// diagonal which is filled with ones.
    #[inline]
    #[doc(alias = "eye")]
    pub fn identity(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |i, j| if i == j { E::one() } else { E::zero() })
    }

    /// Returns the maximum absolute value of the elements of the matrix, or zero if it is empty.
    #[inline]
    pub fn norm_max(&self) -> E::Real {
        self.as_ref().norm_max()
    }

    /// Returns an owned conjugate transpose of the matrix.
    #[inline]
    pub fn adjoint(&self) -> Mat<E> {
        self.as_ref().to_adjoint()
    }
}

impl<E: PartialEq> PartialEq for Mat<E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}

impl<E: Copy + Debug> Debug for Mat<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt_rows(self.as_ref(), f)
    }
}
