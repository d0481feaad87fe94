use crate::{
    assert,
    entity::ComplexField,
    linalg::store::{is_negligible, negligible_reference, DecompositionStore},
    perm::PivotTracker,
};
use num_traits::Zero;

/// LU factorization tuning parameters.
#[derive(Copy, Clone, Debug)]
#[non_exhaustive]
pub struct PartialPivLuParams {
    /// Whether rows are exchanged to bring the largest remaining element of each column onto the
    /// diagonal. Enabled by default.
    pub pivoting: bool,
}

impl Default for PartialPivLuParams {
    #[inline]
    fn default() -> Self {
        Self { pivoting: true }
    }
}

/// Information about the resulting LU factorization.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialPivLuInfo {
    /// Number of transpositions that were performed, can be used to compute the determinant of
    /// $P$.
    pub transposition_count: usize,
    /// Number of pivots that were numerically zero and were replaced by an exact zero.
    pub zero_pivot_count: usize,
}

/// Returns the length of the multiplier scratch space needed by [`lu_in_place`].
#[inline]
pub fn lu_in_place_scratch_len(nrows: usize, _ncols: usize) -> usize {
    nrows
}

/// Computes the LU decomposition of the given matrix with partial pivoting, replacing the matrix
/// with its factors in place.
///
/// The decomposition is such that:
/// $$PA = LU,$$
/// where $P$ is a permutation matrix, $L$ is a unit lower triangular matrix, and $U$ is an upper
/// triangular matrix. For an $m\times n$ matrix, $L$ is $m\times\min(m, n)$ and $U$ is
/// $\min(m, n)\times n$.
///
/// $L$ is stored in the strictly lower triangular half of `matrix`, with an implicit unit
/// diagonal, $U$ is stored in the upper triangular half of `matrix`, and the permutation
/// representing $P$ is recorded in `pivot`, which is reset first.
///
/// A pivot that is negligible relative to the largest element of the input is replaced by an
/// exact zero and its column is not eliminated. The factorization still completes, and the
/// rank deficiency shows up on the diagonal of $U$.
///
/// # Panics
///
/// Panics if `multipliers` is shorter than [`lu_in_place_scratch_len`].
#[track_caller]
pub fn lu_in_place<E: ComplexField, S: DecompositionStore<E> + ?Sized>(
    matrix: &mut S,
    pivot: &mut PivotTracker,
    multipliers: &mut [E],
    params: PartialPivLuParams,
) -> PartialPivLuInfo {
    let m = matrix.nrows();
    let n = matrix.ncols();
    assert!(multipliers.len() >= lu_in_place_scratch_len(m, n));

    pivot.reset(m);
    let reference = negligible_reference(matrix.norm_max());
    let mut zero_pivot_count = 0usize;

    for k in 0..Ord::min(m, n) {
        if params.pivoting {
            let p = matrix.index_of_largest_in_column(k, k);
            if p != k {
                matrix.exchange_rows(p, k);
                pivot.change(p, k);
            }
        }

        let d = matrix.read(k, k);
        if is_negligible(d, reference) {
            log::debug!(target: "trifact", "lu: negligible pivot {d:?} at column {k}");
            matrix.write(k, k, E::zero());
            zero_pivot_count += 1;
        } else {
            matrix.divide_and_copy_column(k, k, multipliers);
            matrix.apply_lu(k, multipliers);
        }
    }

    PartialPivLuInfo {
        transposition_count: pivot.transposition_count(),
        zero_pivot_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use crate::{
        c64,
        linalg::{matmul::triangular::product, store::DecompositionStore},
        mat,
        perm::permute_rows,
        Mat, Side,
    };
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn factorize(a: &Mat<f64>, params: PartialPivLuParams) -> (Mat<f64>, PivotTracker, PartialPivLuInfo) {
        let mut lu = a.clone();
        let mut pivot = PivotTracker::default();
        let mut multipliers = vec![0.0; a.nrows()];
        let info = lu_in_place(&mut lu.as_mut(), &mut pivot, &mut multipliers, params);
        (lu, pivot, info)
    }

    fn check_reconstruction(a: &Mat<f64>, lu: &mut Mat<f64>, pivot: &PivotTracker) {
        let store = lu.as_mut();
        let l = store.triangular(Side::Lower, true);
        let u = store.triangular(Side::Upper, false);
        let lu_product = product(l.storage(), l.structure(), u.storage(), u.structure());

        let mut pa = Mat::zeros(a.nrows(), a.ncols());
        permute_rows(pa.as_mut(), a.as_ref(), pivot.as_perm());

        for j in 0..a.ncols() {
            for i in 0..a.nrows() {
                assert_approx_eq!(lu_product.read(i, j), pa.read(i, j));
            }
        }
    }

    #[test]
    fn reconstructs_random_matrices() {
        let mut rng = StdRng::seed_from_u64(0);
        for (m, n) in [(1, 1), (2, 2), (3, 3), (10, 10), (24, 24), (8, 3), (3, 8), (50, 50)] {
            let a = Mat::from_fn(m, n, |_, _| rng.gen::<f64>() - 0.5);
            let (mut lu, pivot, info) = factorize(&a, Default::default());
            assert!(info.zero_pivot_count == 0);
            assert!(info.transposition_count == pivot.transposition_count());
            check_reconstruction(&a, &mut lu, &pivot);

            // partial pivoting keeps every multiplier bounded by one.
            for j in 0..Ord::min(m, n) {
                for i in j + 1..m {
                    assert!(lu.read(i, j).abs() <= 1.0);
                }
            }
        }
    }

    #[test]
    fn exchange_selects_largest() {
        let a = mat![[4.0, 3.0], [6.0, 3.0]];
        let (lu, pivot, info) = factorize(&a, Default::default());

        assert_eq!(pivot.order(), &[1, 0]);
        assert!(info.transposition_count == 1);
        assert!(lu.read(0, 0) == 6.0);
        assert!(lu.read(0, 1) == 3.0);
        assert_approx_eq!(lu.read(1, 0), 4.0 / 6.0);
        assert_approx_eq!(lu.read(1, 1), 1.0);
    }

    #[test]
    fn without_pivoting() {
        let a = mat![[4.0, 3.0], [6.0, 3.0]];
        let mut params = PartialPivLuParams::default();
        params.pivoting = false;
        let (mut lu, pivot, info) = factorize(&a, params);

        assert!(!pivot.is_modified());
        assert!(info.transposition_count == 0);
        assert_approx_eq!(lu.read(1, 0), 1.5);
        assert_approx_eq!(lu.read(1, 1), -1.5);
        check_reconstruction(&a, &mut lu, &pivot);
    }

    #[test]
    fn singular_input_completes() {
        let a = mat![[1.0, 2.0], [2.0, 4.0]];
        let (lu, pivot, info) = factorize(&a, Default::default());

        assert_eq!(pivot.order(), &[1, 0]);
        assert!(info.zero_pivot_count == 1);
        assert!(lu.read(1, 1) == 0.0);
        assert!(lu.read(0, 0) == 2.0);

        let zero = Mat::<f64>::zeros(3, 3);
        let (lu, pivot, info) = factorize(&zero, Default::default());
        assert!(info.zero_pivot_count == 3);
        assert!(!pivot.is_modified());
        assert!(lu == zero);
    }

    #[test]
    fn complex_input() {
        let a = mat![
            [c64::new(1.0, 1.0), c64::new(2.0, 0.0)],
            [c64::new(0.0, 3.0), c64::new(1.0, -1.0)],
        ];
        let mut lu = a.clone();
        let mut pivot = PivotTracker::default();
        let mut multipliers = vec![c64::new(0.0, 0.0); 2];
        lu_in_place(&mut lu.as_mut(), &mut pivot, &mut multipliers, Default::default());

        assert_eq!(pivot.order(), &[1, 0]);
        // l = (1 + i) / 3i, u11 = 2 - l (1 - i)
        let l = c64::new(1.0, 1.0) / c64::new(0.0, 3.0);
        let u11 = c64::new(2.0, 0.0) - l * c64::new(1.0, -1.0);
        assert_approx_eq!(lu.read(1, 0).re, l.re);
        assert_approx_eq!(lu.read(1, 0).im, l.im);
        assert_approx_eq!(lu.read(1, 1).re, u11.re);
        assert_approx_eq!(lu.read(1, 1).im, u11.im);
    }
}
