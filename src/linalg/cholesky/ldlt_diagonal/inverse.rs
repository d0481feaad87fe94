use super::solve::solve_permuted_in_place;
use crate::{
    assert,
    entity::ComplexField,
    linalg::lu::partial_pivoting::inverse::{fill_permuted_identity, is_identity_perm},
    mat::*,
    perm::{permute_rows, PermRef},
};
use reborrow::*;

/// Computes the inverse of a self-adjoint matrix $A$ from its LDL factors and the symmetric
/// permutation $P$, and stores the result in `dst`.
///
/// # Panics
///
/// - Panics if `ldl_factors` is not a square matrix.
/// - Panics if the destination shape doesn't match the shape of the matrix.
/// - Panics if `perm` doesn't have the same dimension as `ldl_factors`.
#[track_caller]
pub fn invert<E: ComplexField>(dst: MatMut<'_, E>, ldl_factors: MatRef<'_, E>, perm: PermRef<'_>) {
    let mut dst = dst;
    let n = ldl_factors.nrows();
    assert!(all(
        ldl_factors.ncols() == n,
        dst.nrows() == n,
        dst.ncols() == n,
        perm.len() == n,
    ));

    // A^-1 = Pᵀ L^-H D^-1 L^-1 P
    if is_identity_perm(perm) {
        dst.fill_identity();
        solve_permuted_in_place(ldl_factors, true, dst.rb_mut());
    } else {
        let mut temp = Mat::zeros(n, n);
        fill_permuted_identity(temp.as_mut(), perm);
        solve_permuted_in_place(ldl_factors, false, temp.as_mut());
        permute_rows(dst.rb_mut(), temp.as_ref(), perm.inverse());
    }
}
