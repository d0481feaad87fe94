use crate::{
    assert,
    entity::ComplexField,
    linalg::triangular_solve::{substitute_backwards, substitute_forwards},
    mat::*,
    perm::PermRef,
};
use num_traits::{One, Zero};
use reborrow::*;

/// Returns `true` if `perm` is the identity permutation.
#[inline]
pub(crate) fn is_identity_perm(perm: PermRef<'_>) -> bool {
    perm.arrays().0.iter().enumerate().all(|(i, &p)| i == p)
}

/// Overwrites `dst` with the rows of the identity matrix, permuted by `perm`.
pub(crate) fn fill_permuted_identity<E: ComplexField>(dst: MatMut<'_, E>, perm: PermRef<'_>) {
    let mut dst = dst;
    let forward = perm.arrays().0;
    for j in 0..dst.ncols() {
        for (i, &p) in forward.iter().enumerate() {
            dst.write(i, j, if p == j { E::one() } else { E::zero() });
        }
    }
}

/// Computes the inverse of a square matrix $A$ from its LU factors and the permutation $P$, and
/// stores the result in `dst`.
///
/// When no rows were exchanged, the right hand side of the substitution is the identity and the
/// forward pass only touches the lower triangle of each column.
///
/// # Panics
///
/// - Panics if `lu_factors` is not a square matrix.
/// - Panics if the destination shape doesn't match the shape of the matrix.
/// - Panics if `row_perm` doesn't have the same dimension as `lu_factors`.
#[track_caller]
pub fn invert<E: ComplexField>(dst: MatMut<'_, E>, lu_factors: MatRef<'_, E>, row_perm: PermRef<'_>) {
    let mut dst = dst;
    let n = lu_factors.nrows();
    assert!(all(
        lu_factors.ncols() == n,
        dst.nrows() == n,
        dst.ncols() == n,
        row_perm.len() == n,
    ));

    // A^-1 = U^-1 L^-1 P
    let identity = is_identity_perm(row_perm);
    if identity {
        dst.fill_identity();
    } else {
        fill_permuted_identity(dst.rb_mut(), row_perm);
    }

    substitute_forwards(lu_factors, true, false, identity, dst.rb_mut());
    substitute_backwards(lu_factors, false, false, false, dst.rb_mut());
}
