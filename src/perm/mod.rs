//! Permutation matrices and the pivot bookkeeping of the decompositions.

use crate::{assert, entity::ComplexField, mat::*};
use reborrow::*;

mod permown;
mod permref;
mod pivot;

pub use permown::Perm;
pub use permref::PermRef;
pub use pivot::PivotTracker;

/// Swaps the two rows at indices `a` and `b` in the given matrix.
///
/// # Panics
///
/// Panics if either `a` or `b` is out of bounds.
///
/// # Example
///
/// ```
/// use trifact::{mat, perm::swap_rows_idx};
///
/// let mut m = mat![
///     [1.0, 2.0, 3.0],
///     [4.0, 5.0, 6.0],
///     [7.0, 8.0, 9.0],
///     [10.0, 14.0, 12.0],
/// ];
///
/// swap_rows_idx(m.as_mut(), 0, 2);
///
/// let swapped = mat![
///     [7.0, 8.0, 9.0],
///     [4.0, 5.0, 6.0],
///     [1.0, 2.0, 3.0],
///     [10.0, 14.0, 12.0],
/// ];
///
/// assert_eq!(m, swapped);
/// ```
#[track_caller]
#[inline]
pub fn swap_rows_idx<E: Copy>(mat: MatMut<'_, E>, a: usize, b: usize) {
    let mut mat = mat;
    assert!(all(a < mat.nrows(), b < mat.nrows()));
    if a != b {
        for j in 0..mat.ncols() {
            mat.swap_elems(a, j, b, j);
        }
    }
}

/// Swaps the two columns at indices `a` and `b` in the given matrix.
///
/// # Panics
///
/// Panics if either `a` or `b` is out of bounds.
///
/// # Example
///
/// ```
/// use trifact::{mat, perm::swap_cols_idx};
///
/// let mut m = mat![
///     [1.0, 2.0, 3.0],
///     [4.0, 5.0, 6.0],
///     [7.0, 8.0, 9.0],
///     [10.0, 14.0, 12.0],
/// ];
///
/// swap_cols_idx(m.as_mut(), 0, 2);
///
/// let swapped = mat![
///     [3.0, 2.0, 1.0],
///     [6.0, 5.0, 4.0],
///     [9.0, 8.0, 7.0],
///     [12.0, 14.0, 10.0],
/// ];
///
/// assert_eq!(m, swapped);
/// ```
#[track_caller]
#[inline]
pub fn swap_cols_idx<E: Copy>(mat: MatMut<'_, E>, a: usize, b: usize) {
    swap_rows_idx(mat.transpose_mut(), a, b)
}

/// Computes a permutation of the rows of the source matrix using the given permutation, and
/// stores the result in the destination matrix, so that `dst[i, :] = src[forward[i], :]`.
///
/// # Panics
///
/// - Panics if the matrices do not have the same shape.
/// - Panics if the size of the permutation doesn't match the number of rows of the matrices.
#[inline]
#[track_caller]
pub fn permute_rows<E: Copy>(dst: MatMut<'_, E>, src: MatRef<'_, E>, perm_indices: PermRef<'_>) {
    let mut dst = dst;
    assert!(all(
        src.nrows() == dst.nrows(),
        src.ncols() == dst.ncols(),
        perm_indices.len() == src.nrows(),
    ));

    let perm = perm_indices.arrays().0;
    for j in 0..src.ncols() {
        for (i, &p) in perm.iter().enumerate() {
            dst.write(i, j, src.read(p, j));
        }
    }
}

/// Computes a permutation of the columns of the source matrix using the given permutation, and
/// stores the result in the destination matrix, so that `dst[:, j] = src[:, forward[j]]`.
///
/// # Panics
///
/// - Panics if the matrices do not have the same shape.
/// - Panics if the size of the permutation doesn't match the number of columns of the matrices.
#[inline]
#[track_caller]
pub fn permute_cols<E: Copy>(dst: MatMut<'_, E>, src: MatRef<'_, E>, perm_indices: PermRef<'_>) {
    assert!(all(
        src.nrows() == dst.nrows(),
        src.ncols() == dst.ncols(),
        perm_indices.len() == src.ncols(),
    ));

    permute_rows(dst.transpose_mut(), src.transpose(), perm_indices);
}

/// Applies `perm` to the rows and `perm` to the columns of the square matrix `src`, so that
/// `dst = P src Pᵀ`.
///
/// # Panics
///
/// Panics if the matrices are not square with the same dimension as the permutation.
#[track_caller]
pub fn permute_symmetric<E: ComplexField>(
    dst: MatMut<'_, E>,
    src: MatRef<'_, E>,
    perm_indices: PermRef<'_>,
) {
    let mut dst = dst;
    let n = perm_indices.len();
    assert!(all(
        src.nrows() == n,
        src.ncols() == n,
        dst.nrows() == n,
        dst.ncols() == n,
    ));

    let perm = perm_indices.arrays().0;
    for (j, &pj) in perm.iter().enumerate() {
        for (i, &pi) in perm.iter().enumerate() {
            dst.write(i, j, src.read(pi, pj));
        }
    }
}
