use crate::{
    assert,
    entity::ComplexField,
    linalg::matmul::triangular::{self, BlockStructure},
    mat::*,
    perm::{permute_symmetric, PermRef},
};
use num_traits::{One, Zero};

/// Computes the reconstructed matrix $A = P^\top LDL^H P$, given its LDL factors and the
/// symmetric permutation, and stores the result in `dst`.
///
/// # Panics
///
/// - Panics if `ldl_factors` is not a square matrix.
/// - Panics if the destination shape doesn't match the shape of the matrix.
/// - Panics if `perm` doesn't have the same dimension as `ldl_factors`.
#[track_caller]
pub fn reconstruct<E: ComplexField>(dst: MatMut<'_, E>, ldl_factors: MatRef<'_, E>, perm: PermRef<'_>) {
    let n = ldl_factors.nrows();
    assert!(all(
        ldl_factors.ncols() == n,
        dst.nrows() == n,
        dst.ncols() == n,
        perm.len() == n,
    ));

    // rebuilt from L and D, a zero pivot leaves its upper row untouched
    let dlh = Mat::from_fn(n, n, |i, j| {
        if i <= j {
            let d = ldl_factors.read(i, i).real();
            let l = if i == j { E::one() } else { ldl_factors.read(j, i).conj() };
            l.scale_real(d)
        } else {
            E::zero()
        }
    });
    let mut ldlh = Mat::zeros(n, n);
    triangular::matmul(
        ldlh.as_mut(),
        ldl_factors,
        BlockStructure::UnitTriangularLower,
        dlh.as_ref(),
        BlockStructure::TriangularUpper,
        None,
        E::one(),
    );

    permute_symmetric(dst, ldlh.as_ref(), perm.inverse());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{linalg::cholesky::ldlt_diagonal::compute::ldlt_in_place, perm::PivotTracker};
    use assert_approx_eq::assert_approx_eq;
    use core::assert;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn round_trip() {
        let mut rng = StdRng::seed_from_u64(0);
        for n in [1, 4, 13] {
            let mut a = Mat::zeros(n, n);
            for j in 0..n {
                for i in j..n {
                    let v = rng.gen::<f64>() - 0.5;
                    a.write(i, j, v);
                    a.write(j, i, v);
                }
            }

            let mut ldl = a.clone();
            let mut pivot = PivotTracker::default();
            let mut multipliers = vec![0.0; n];
            let info = ldlt_in_place(&mut ldl.as_mut(), &mut pivot, &mut multipliers, Default::default());
            if info.zero_pivot_count != 0 {
                continue;
            }

            let mut back = Mat::zeros(n, n);
            reconstruct(back.as_mut(), ldl.as_ref(), pivot.as_perm());
            for j in 0..n {
                for i in 0..n {
                    assert_approx_eq!(back.read(i, j), a.read(i, j));
                }
            }
        }
    }
}
