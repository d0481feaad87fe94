//! Matrix multiplication.

use crate::{entity::ComplexField, mat::*};

pub mod triangular;

/// Computes the matrix product `[alpha * dst] + beta * lhs * rhs` and stores the result in
/// `dst`.
///
/// If `alpha` is not provided, the previous contents of `dst` are not read.
///
/// # Panics
///
/// Panics if the matrix dimensions are not compatible for matrix multiplication, i.e.
///  - `dst.nrows() == lhs.nrows()`
///  - `dst.ncols() == rhs.ncols()`
///  - `lhs.ncols() == rhs.nrows()`
///
/// # Example
///
/// ```
/// use trifact::{linalg::matmul::matmul, mat, Mat};
///
/// let lhs = mat![[0.0, 2.0], [1.0, 3.0]];
/// let rhs = mat![[4.0, 6.0], [5.0, 7.0]];
///
/// let mut acc = Mat::<f64>::zeros(2, 2);
/// let target = mat![
///     [
///         2.5 * (lhs.read(0, 0) * rhs.read(0, 0) + lhs.read(0, 1) * rhs.read(1, 0)),
///         2.5 * (lhs.read(0, 0) * rhs.read(0, 1) + lhs.read(0, 1) * rhs.read(1, 1)),
///     ],
///     [
///         2.5 * (lhs.read(1, 0) * rhs.read(0, 0) + lhs.read(1, 1) * rhs.read(1, 0)),
///         2.5 * (lhs.read(1, 0) * rhs.read(0, 1) + lhs.read(1, 1) * rhs.read(1, 1)),
///     ],
/// ];
///
/// matmul(acc.as_mut(), lhs.as_ref(), rhs.as_ref(), None, 2.5);
///
/// assert_eq!(acc, target);
/// ```
#[track_caller]
#[inline]
pub fn matmul<E: ComplexField>(
    dst: MatMut<'_, E>,
    lhs: MatRef<'_, E>,
    rhs: MatRef<'_, E>,
    alpha: Option<E>,
    beta: E,
) {
    triangular::matmul(
        dst,
        lhs,
        triangular::BlockStructure::Rectangular,
        rhs,
        triangular::BlockStructure::Rectangular,
        alpha,
        beta,
    )
}
