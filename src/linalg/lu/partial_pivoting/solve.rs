use crate::{
    assert,
    entity::ComplexField,
    linalg::triangular_solve::{substitute_backwards, substitute_forwards},
    mat::*,
    perm::{permute_rows, PermRef},
};
use reborrow::*;

/// Given the LU factors of a square matrix $A$ and the permutation $P$, computes the solution of
/// the linear system $A X = B$, and stores the result in `rhs`.
///
/// The rows of the solution are in the same order as the rows of `rhs`.
///
/// # Panics
///
/// - Panics if `lu_factors` is not a square matrix.
/// - Panics if `row_perm` doesn't have the same dimension as `lu_factors`.
/// - Panics if `rhs` doesn't have the same number of rows as the dimension of `lu_factors`.
#[track_caller]
pub fn solve_in_place<E: ComplexField>(
    lu_factors: MatRef<'_, E>,
    row_perm: PermRef<'_>,
    rhs: MatMut<'_, E>,
) {
    let mut rhs = rhs;
    let n = lu_factors.nrows();
    assert!(all(
        lu_factors.ncols() == n,
        row_perm.len() == n,
        rhs.nrows() == n,
    ));

    // LU = P × A
    // X = U^-1 L^-1 P B

    let mut temp = Mat::zeros(n, rhs.ncols());
    permute_rows(temp.as_mut(), rhs.rb(), row_perm);
    substitute_forwards(lu_factors, true, false, false, temp.as_mut());
    substitute_backwards(lu_factors, false, false, false, temp.as_mut());
    rhs.copy_from(temp.as_ref());
}

/// Given the LU factors of a square matrix $A$ and the permutation $P$, computes the solution of
/// the linear system $A^\top X = B$, and stores the result in `rhs`.
///
/// # Panics
///
/// - Panics if `lu_factors` is not a square matrix.
/// - Panics if `row_perm` doesn't have the same dimension as `lu_factors`.
/// - Panics if `rhs` doesn't have the same number of rows as the dimension of `lu_factors`.
#[track_caller]
pub fn solve_transpose_in_place<E: ComplexField>(
    lu_factors: MatRef<'_, E>,
    row_perm: PermRef<'_>,
    rhs: MatMut<'_, E>,
) {
    let mut rhs = rhs;
    let n = lu_factors.nrows();
    assert!(all(
        lu_factors.ncols() == n,
        row_perm.len() == n,
        rhs.nrows() == n,
    ));

    // Aᵀ = Uᵀ Lᵀ P
    // X = Pᵀ L^-T U^-T B

    let mut temp = rhs.to_owned();
    substitute_forwards(lu_factors.transpose(), false, false, false, temp.as_mut());
    substitute_backwards(lu_factors.transpose(), true, false, false, temp.as_mut());
    permute_rows(rhs.rb_mut(), temp.as_ref(), row_perm.inverse());
}

/// Given the LU factors of a square matrix $A$ and the permutation $P$, computes the solution of
/// the linear system $A X = B$, and returns it.
#[track_caller]
pub fn solve<E: ComplexField>(
    lu_factors: MatRef<'_, E>,
    row_perm: PermRef<'_>,
    rhs: MatRef<'_, E>,
) -> Mat<E> {
    let mut dst = rhs.to_owned();
    solve_in_place(lu_factors, row_perm, dst.as_mut());
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        linalg::{lu::partial_pivoting::compute::lu_in_place, matmul::matmul},
        perm::PivotTracker,
    };
    use assert_approx_eq::assert_approx_eq;
    use core::assert;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_system(n: usize, k: usize, rng: &mut StdRng) -> (Mat<f64>, Mat<f64>) {
        let a = Mat::from_fn(n, n, |i, j| {
            let v = rng.gen::<f64>();
            if i == j {
                v + n as f64
            } else {
                v
            }
        });
        let b = Mat::from_fn(n, k, |_, _| rng.gen::<f64>());
        (a, b)
    }

    fn factorize(a: &Mat<f64>) -> (Mat<f64>, PivotTracker) {
        let mut lu = a.clone();
        let mut pivot = PivotTracker::default();
        let mut multipliers = vec![0.0; a.nrows()];
        lu_in_place(&mut lu.as_mut(), &mut pivot, &mut multipliers, Default::default());
        (lu, pivot)
    }

    #[test]
    fn solve_round_trip() {
        let mut rng = StdRng::seed_from_u64(0);
        for n in [1, 2, 10, 100] {
            let (a, b) = random_system(n, 3, &mut rng);
            let (lu, pivot) = factorize(&a);

            let x = solve(lu.as_ref(), pivot.as_perm(), b.as_ref());
            let mut ax = Mat::zeros(n, 3);
            matmul(ax.as_mut(), a.as_ref(), x.as_ref(), None, 1.0);

            for j in 0..3 {
                for i in 0..n {
                    assert_approx_eq!(ax.read(i, j), b.read(i, j));
                }
            }
        }
    }

    #[test]
    fn transpose_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = 12;
        let (a, b) = random_system(n, 2, &mut rng);
        let (lu, pivot) = factorize(&a);

        let mut x = b.clone();
        solve_transpose_in_place(lu.as_ref(), pivot.as_perm(), x.as_mut());
        let mut atx = Mat::zeros(n, 2);
        matmul(atx.as_mut(), a.as_ref().transpose(), x.as_ref(), None, 1.0);

        for j in 0..2 {
            for i in 0..n {
                assert_approx_eq!(atx.read(i, j), b.read(i, j));
            }
        }
    }
}
