//! The in-place elimination primitives shared by the LU and LDL decompositions.
//!
//! A [`DecompositionStore`] is a mutable matrix buffer that is overwritten, column by column,
//! with the combined factors of a decomposition. Its dimensions never change while a
//! decomposition runs.

use crate::{
    assert,
    diag::DiagRef,
    entity::{ComplexField, RealField},
    linalg::{matmul::triangular::BlockStructure, triangular::TriangularRef, triangular_solve},
    mat::*,
    Side,
};
use reborrow::*;

/// Returns `true` if `value` is numerically zero relative to `reference`, i.e.
/// `|value| <= epsilon * reference`.
///
/// `reference` is typically the largest absolute value of the matrix being decomposed, clamped
/// below by the smallest positive normal number so that the zero matrix has a nonzero scale.
#[inline]
pub fn is_negligible<E: ComplexField>(value: E, reference: E::Real) -> bool {
    value.abs() <= E::Real::epsilon() * reference
}

/// Returns the scale that [`is_negligible`] compares pivots against, for a matrix whose largest
/// absolute value is `norm_max`.
#[inline]
pub fn negligible_reference<R: RealField>(norm_max: R) -> R {
    let min = R::min_positive();
    if norm_max > min {
        norm_max
    } else {
        min
    }
}

/// Mutable matrix buffer that the decompositions overwrite with their factors.
pub trait DecompositionStore<E: ComplexField> {
    /// Returns the number of rows of the buffer.
    fn nrows(&self) -> usize;
    /// Returns the number of columns of the buffer.
    fn ncols(&self) -> usize;
    /// Reads the element at `(row, col)`.
    fn read(&self, row: usize, col: usize) -> E;
    /// Writes `value` to the element at `(row, col)`.
    fn write(&mut self, row: usize, col: usize, value: E);
    /// Returns the largest absolute value of the buffer.
    fn norm_max(&self) -> E::Real;

    /// Returns the index of the row, starting at `row`, holding the element of largest absolute
    /// value in column `col`. Ties resolve to the lowest index.
    fn index_of_largest_in_column(&self, row: usize, col: usize) -> usize;

    /// Returns the row index of the diagonal element of largest absolute value, starting at
    /// `(row, col)` and moving down the diagonal. Ties resolve to the lowest index.
    fn index_of_largest_on_diagonal(&self, row: usize, col: usize) -> usize;

    /// Swaps the rows `a` and `b`.
    fn exchange_rows(&mut self, a: usize, b: usize);

    /// Swaps the rows `a` and `b`, then the columns `a` and `b`, so that a self-adjoint buffer
    /// stays self-adjoint.
    fn exchange_hermitian(&mut self, a: usize, b: usize);

    /// Divides every element of column `col` below `row` by the pivot at `(row, col)`, writes the
    /// quotients back into the buffer and copies them into `destination`, at the same row
    /// indices.
    fn divide_and_copy_column(&mut self, row: usize, col: usize, destination: &mut [E]);

    /// Rank one update of the trailing block: `A[i, j] -= multipliers[i] * A[pivot, j]` for every
    /// `i > pivot` and `j > pivot`.
    fn apply_lu(&mut self, pivot: usize, multipliers: &[E]);

    /// Self-adjoint rank one update of the trailing block with the diagonal pivot
    /// `d = A[pivot, pivot]`: `A[i, j] -= multipliers[i] * d * conj(multipliers[j])` for every
    /// `i, j > pivot`. Row `pivot` is set to `d * conj(multipliers[j])` so both triangles stay
    /// consistent.
    fn apply_ldl(&mut self, pivot: usize, multipliers: &[E]);

    /// Returns a view over one triangular half of the buffer.
    ///
    /// The lower view has `min(nrows, ncols)` columns, and the upper view has
    /// `min(nrows, ncols)` rows.
    fn triangular(&self, side: Side, unit_diagonal: bool) -> TriangularRef<'_, E>;

    /// Returns a view over the diagonal of the buffer.
    fn diagonal(&self) -> DiagRef<'_, E>;

    /// Solves `T × X = self` in place by forward substitution, where `T` is the lower triangular
    /// operator read from `body`.
    fn substitute_forwards(
        &mut self,
        body: MatRef<'_, E>,
        unit_diagonal: bool,
        conjugated: bool,
        identity: bool,
    );

    /// Solves `T × X = self` in place by backward substitution, where `T` is the upper
    /// triangular operator read from `body`.
    fn substitute_backwards(
        &mut self,
        body: MatRef<'_, E>,
        unit_diagonal: bool,
        conjugated: bool,
        identity: bool,
    );
}

impl<E: ComplexField> DecompositionStore<E> for MatMut<'_, E> {
    #[inline]
    fn nrows(&self) -> usize {
        MatMut::nrows(self)
    }

    #[inline]
    fn ncols(&self) -> usize {
        MatMut::ncols(self)
    }

    #[inline]
    #[track_caller]
    fn read(&self, row: usize, col: usize) -> E {
        MatMut::read(self, row, col)
    }

    #[inline]
    #[track_caller]
    fn write(&mut self, row: usize, col: usize, value: E) {
        MatMut::write(self, row, col, value)
    }

    #[inline]
    fn norm_max(&self) -> E::Real {
        self.rb().norm_max()
    }

    #[track_caller]
    fn index_of_largest_in_column(&self, row: usize, col: usize) -> usize {
        let m = MatMut::nrows(self);
        assert!(all(row < m, col < MatMut::ncols(self)));

        let mut best = row;
        let mut best_abs = MatMut::read(self, row, col).abs();
        for i in row + 1..m {
            let abs = MatMut::read(self, i, col).abs();
            if abs > best_abs {
                best = i;
                best_abs = abs;
            }
        }
        best
    }

    #[track_caller]
    fn index_of_largest_on_diagonal(&self, row: usize, col: usize) -> usize {
        let (m, n) = self.shape();
        assert!(all(row < m, col < n));

        let len = Ord::min(m - row, n - col);
        let mut best = 0;
        let mut best_abs = MatMut::read(self, row, col).abs();
        for k in 1..len {
            let abs = MatMut::read(self, row + k, col + k).abs();
            if abs > best_abs {
                best = k;
                best_abs = abs;
            }
        }
        row + best
    }

    #[track_caller]
    fn exchange_rows(&mut self, a: usize, b: usize) {
        crate::perm::swap_rows_idx(self.rb_mut(), a, b);
    }

    #[track_caller]
    fn exchange_hermitian(&mut self, a: usize, b: usize) {
        crate::perm::swap_rows_idx(self.rb_mut(), a, b);
        crate::perm::swap_cols_idx(self.rb_mut(), a, b);
    }

    #[track_caller]
    fn divide_and_copy_column(&mut self, row: usize, col: usize, destination: &mut [E]) {
        let m = MatMut::nrows(self);
        assert!(all(row < m, col < MatMut::ncols(self), destination.len() >= m));

        let pivot = MatMut::read(self, row, col);
        for i in row + 1..m {
            let quotient = MatMut::read(self, i, col) / pivot;
            MatMut::write(self, i, col, quotient);
            destination[i] = quotient;
        }
    }

    #[track_caller]
    fn apply_lu(&mut self, pivot: usize, multipliers: &[E]) {
        let (m, n) = self.shape();
        assert!(multipliers.len() >= m);

        for j in pivot + 1..n {
            let pivot_row = MatMut::read(self, pivot, j);
            if pivot_row == E::zero() {
                continue;
            }
            for i in pivot + 1..m {
                let value = MatMut::read(self, i, j) - multipliers[i] * pivot_row;
                MatMut::write(self, i, j, value);
            }
        }
    }

    #[track_caller]
    fn apply_ldl(&mut self, pivot: usize, multipliers: &[E]) {
        let n = MatMut::nrows(self);
        assert!(all(MatMut::ncols(self) == n, multipliers.len() >= n));

        let d = MatMut::read(self, pivot, pivot).real();
        for j in pivot + 1..n {
            let scaled = multipliers[j].conj().scale_real(d);
            for i in j..n {
                let value = MatMut::read(self, i, j) - multipliers[i] * scaled;
                MatMut::write(self, i, j, value);
            }

            let diag = MatMut::read(self, j, j).real();
            MatMut::write(self, j, j, E::from_real(diag));
            for i in j + 1..n {
                let mirrored = MatMut::read(self, i, j).conj();
                MatMut::write(self, j, i, mirrored);
            }
            MatMut::write(self, pivot, j, scaled);
        }
    }

    fn triangular(&self, side: Side, unit_diagonal: bool) -> TriangularRef<'_, E> {
        let (m, n) = self.shape();
        let size = Ord::min(m, n);
        let this = self.rb();
        match side {
            Side::Lower => TriangularRef::new(
                this.submatrix(0, 0, m, size),
                if unit_diagonal {
                    BlockStructure::UnitTriangularLower
                } else {
                    BlockStructure::TriangularLower
                },
            ),
            Side::Upper => TriangularRef::new(
                this.submatrix(0, 0, size, n),
                if unit_diagonal {
                    BlockStructure::UnitTriangularUpper
                } else {
                    BlockStructure::TriangularUpper
                },
            ),
        }
    }

    #[inline]
    fn diagonal(&self) -> DiagRef<'_, E> {
        MatMut::diagonal(self)
    }

    #[track_caller]
    fn substitute_forwards(
        &mut self,
        body: MatRef<'_, E>,
        unit_diagonal: bool,
        conjugated: bool,
        identity: bool,
    ) {
        triangular_solve::substitute_forwards(
            body,
            unit_diagonal,
            conjugated,
            identity,
            self.rb_mut(),
        )
    }

    #[track_caller]
    fn substitute_backwards(
        &mut self,
        body: MatRef<'_, E>,
        unit_diagonal: bool,
        conjugated: bool,
        identity: bool,
    ) {
        triangular_solve::substitute_backwards(
            body,
            unit_diagonal,
            conjugated,
            identity,
            self.rb_mut(),
        )
    }
}
