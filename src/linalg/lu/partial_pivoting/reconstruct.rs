use crate::{
    assert,
    entity::ComplexField,
    linalg::matmul::triangular::{self, BlockStructure},
    mat::*,
    perm::{permute_rows, PermRef},
};

/// Computes the reconstructed matrix $A = P^{-1} L U$, given its LU factors and the row
/// permutation, and stores the result in `dst`.
///
/// # Panics
///
/// - Panics if the destination shape doesn't match the shape of the matrix.
/// - Panics if `row_perm` doesn't have the same dimension as the number of rows of the matrix.
#[track_caller]
pub fn reconstruct<E: ComplexField>(
    dst: MatMut<'_, E>,
    lu_factors: MatRef<'_, E>,
    row_perm: PermRef<'_>,
) {
    let m = lu_factors.nrows();
    let n = lu_factors.ncols();
    let size = Ord::min(m, n);
    assert!(all(dst.nrows() == m, dst.ncols() == n, row_perm.len() == m));

    let mut lu = Mat::zeros(m, n);
    triangular::matmul(
        lu.as_mut(),
        lu_factors.submatrix(0, 0, m, size),
        BlockStructure::UnitTriangularLower,
        lu_factors.submatrix(0, 0, size, n),
        BlockStructure::TriangularUpper,
        None,
        E::one(),
    );

    permute_rows(dst, lu.as_ref(), row_perm.inverse());
}
