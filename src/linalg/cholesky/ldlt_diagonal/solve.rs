use crate::{
    assert,
    entity::ComplexField,
    linalg::triangular_solve::{substitute_backwards, substitute_forwards},
    mat::*,
    perm::{permute_rows, PermRef},
};
use reborrow::*;

/// Divides each row of `rhs` by the matching diagonal element of `factors`.
fn divide_by_diagonal<E: ComplexField>(factors: MatRef<'_, E>, rhs: MatMut<'_, E>) {
    let mut rhs = rhs;
    for i in 0..rhs.nrows() {
        let d = factors.read(i, i).real();
        for j in 0..rhs.ncols() {
            let value = rhs.read(i, j);
            rhs.write(i, j, value / E::from_real(d));
        }
    }
}

/// Solves $LDL^H Y = \text{temp}$ in place, where `temp` is already permuted.
pub(crate) fn solve_permuted_in_place<E: ComplexField>(
    ldl_factors: MatRef<'_, E>,
    identity: bool,
    temp: MatMut<'_, E>,
) {
    let mut temp = temp;
    substitute_forwards(ldl_factors, true, false, identity, temp.rb_mut());
    divide_by_diagonal(ldl_factors, temp.rb_mut());
    substitute_backwards(ldl_factors, true, true, false, temp.rb_mut());
}

/// Given the LDL factors of a self-adjoint matrix $A$ and the symmetric permutation $P$,
/// computes the solution of the linear system $A X = B$, and stores the result in `rhs`.
///
/// The rows of the solution are in the same order as the rows of `rhs`.
///
/// # Panics
///
/// - Panics if `ldl_factors` is not a square matrix.
/// - Panics if `perm` doesn't have the same dimension as `ldl_factors`.
/// - Panics if `rhs` doesn't have the same number of rows as the dimension of `ldl_factors`.
#[track_caller]
pub fn solve_in_place<E: ComplexField>(
    ldl_factors: MatRef<'_, E>,
    perm: PermRef<'_>,
    rhs: MatMut<'_, E>,
) {
    let mut rhs = rhs;
    let n = ldl_factors.nrows();
    assert!(all(
        ldl_factors.ncols() == n,
        perm.len() == n,
        rhs.nrows() == n,
    ));

    // P A Pᵀ = L D Lᴴ
    // X = Pᵀ L^-H D^-1 L^-1 P B

    let mut temp = Mat::zeros(n, rhs.ncols());
    permute_rows(temp.as_mut(), rhs.rb(), perm);
    solve_permuted_in_place(ldl_factors, false, temp.as_mut());
    permute_rows(rhs.rb_mut(), temp.as_ref(), perm.inverse());
}

/// Given the LDL factors of a self-adjoint matrix $A$ and the symmetric permutation $P$,
/// computes the solution of the linear system $A X = B$, and returns it.
#[track_caller]
pub fn solve<E: ComplexField>(
    ldl_factors: MatRef<'_, E>,
    perm: PermRef<'_>,
    rhs: MatRef<'_, E>,
) -> Mat<E> {
    let mut dst = rhs.to_owned();
    solve_in_place(ldl_factors, perm, dst.as_mut());
    dst
}
