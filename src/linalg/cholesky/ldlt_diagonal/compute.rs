use crate::{
    assert,
    entity::{ComplexField, RealField},
    linalg::store::{is_negligible, negligible_reference, DecompositionStore},
    perm::PivotTracker,
};
use num_traits::Zero;

/// Dynamic LDL regularization.
///
/// Diagonal pivots whose absolute value is below `threshold` are replaced by `threshold`, with
/// the sign of the original pivot (positive for an exact zero), before they are tested for
/// being negligible. The regularization is disabled unless `threshold` is finite and positive.
#[derive(Copy, Clone, Debug)]
pub struct LdltRegularization<E: ComplexField> {
    /// Smallest absolute value a diagonal pivot is allowed to take.
    pub threshold: E::Real,
}

impl<E: ComplexField> Default for LdltRegularization<E> {
    #[inline]
    fn default() -> Self {
        Self {
            threshold: E::Real::zero(),
        }
    }
}

impl<E: ComplexField> LdltRegularization<E> {
    /// Creates a regularization with the given threshold.
    #[inline]
    pub fn with_threshold(threshold: E::Real) -> Self {
        Self { threshold }
    }

    /// Returns `true` if the threshold is finite and positive.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.threshold.is_finite() && self.threshold > E::Real::zero()
    }

    /// Returns the regularized value of the pivot `d`.
    #[inline]
    pub fn apply(&self, d: E::Real) -> E::Real {
        let threshold = self.threshold;
        if !self.is_enabled() || d.abs() >= threshold {
            d
        } else if d < E::Real::zero() {
            -threshold
        } else {
            threshold
        }
    }
}

/// LDL factorization tuning parameters.
#[derive(Copy, Clone, Debug)]
#[non_exhaustive]
pub struct LdltParams<E: ComplexField> {
    /// Whether rows and columns are symmetrically exchanged to bring the largest remaining
    /// diagonal element to the pivot position. Enabled by default.
    pub pivoting: bool,
    /// Regularization of small pivots. Disabled by default.
    pub regularization: LdltRegularization<E>,
}

impl<E: ComplexField> Default for LdltParams<E> {
    #[inline]
    fn default() -> Self {
        Self {
            pivoting: true,
            regularization: LdltRegularization::default(),
        }
    }
}

/// Information about the resulting LDL factorization.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LdltInfo {
    /// Number of symmetric transpositions that were performed.
    pub transposition_count: usize,
    /// Number of pivots that were numerically zero and were replaced by an exact zero.
    pub zero_pivot_count: usize,
    /// Number of zero pivots whose column still had non-negligible entries below the diagonal.
    /// If nonzero, the factors don't reproduce the input matrix.
    pub breakdown_count: usize,
    /// Number of pivots that were replaced by the regularization threshold.
    pub dynamic_regularization_count: usize,
}

/// Returns the length of the multiplier scratch space needed by [`ldlt_in_place`].
#[inline]
pub fn ldlt_in_place_scratch_len(dim: usize) -> usize {
    dim
}

/// Computes the LDL decomposition with diagonal pivoting of the given self-adjoint matrix,
/// replacing the matrix with its factors in place.
///
/// The decomposition is such that:
/// $$PAP^\top = LDL^H,$$
/// where $P$ is a permutation matrix, $L$ is a unit lower triangular matrix, and $D$ is a real
/// diagonal matrix.
///
/// Only the lower triangular half of `matrix` is read: it is mirrored to the upper half before
/// the elimination starts. Afterwards, $L$ is stored in the strictly lower triangular half with
/// an implicit unit diagonal, $D$ on the diagonal, $DL^H$ in the strictly upper triangular half,
/// and the permutation representing $P$ is recorded in `pivot`, which is reset first.
///
/// A pivot that is negligible relative to the largest element of the input, after
/// regularization, is replaced by an exact zero and its column is not eliminated. If that column
/// has non-negligible entries below the diagonal, as for indefinite matrices with a zero diagonal,
/// the elimination breaks down and this is reported in [`LdltInfo::breakdown_count`].
///
/// # Panics
///
/// - Panics if `matrix` is not square.
/// - Panics if `multipliers` is shorter than [`ldlt_in_place_scratch_len`].
#[track_caller]
pub fn ldlt_in_place<E: ComplexField, S: DecompositionStore<E> + ?Sized>(
    matrix: &mut S,
    pivot: &mut PivotTracker,
    multipliers: &mut [E],
    params: LdltParams<E>,
) -> LdltInfo {
    let n = matrix.nrows();
    assert!(all(
        matrix.ncols() == n,
        multipliers.len() >= ldlt_in_place_scratch_len(n),
    ));

    for j in 0..n {
        let diag = matrix.read(j, j).real();
        matrix.write(j, j, E::from_real(diag));
        for i in j + 1..n {
            let mirrored = matrix.read(i, j).conj();
            matrix.write(j, i, mirrored);
        }
    }

    pivot.reset(n);
    let reference = negligible_reference(matrix.norm_max());
    let regularization = params.regularization;
    let mut zero_pivot_count = 0usize;
    let mut breakdown_count = 0usize;
    let mut dynamic_regularization_count = 0usize;

    for k in 0..n {
        if params.pivoting {
            let p = matrix.index_of_largest_on_diagonal(k, k);
            if p != k {
                matrix.exchange_hermitian(p, k);
                pivot.change(p, k);
            }
        }

        let raw = matrix.read(k, k).real();
        let d = regularization.apply(raw);
        if d != raw {
            log::debug!(target: "trifact", "ldlt: pivot {raw:?} at column {k} regularized to {d:?}");
            dynamic_regularization_count += 1;
        }
        matrix.write(k, k, E::from_real(d));

        if is_negligible(E::from_real(d), reference) {
            log::debug!(target: "trifact", "ldlt: negligible pivot {d:?} at column {k}");
            matrix.write(k, k, E::zero());
            zero_pivot_count += 1;
            if (k + 1..n).any(|i| !is_negligible(matrix.read(i, k), reference)) {
                log::debug!(target: "trifact", "ldlt: elimination breaks down at column {k}");
                breakdown_count += 1;
            }
        } else {
            matrix.divide_and_copy_column(k, k, multipliers);
            matrix.apply_ldl(k, multipliers);
        }
    }

    LdltInfo {
        transposition_count: pivot.transposition_count(),
        zero_pivot_count,
        breakdown_count,
        dynamic_regularization_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use crate::{
        c64,
        linalg::{
            matmul::triangular::{product, BlockStructure},
            store::DecompositionStore,
        },
        mat,
        perm::permute_symmetric,
        Mat, Side,
    };
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn factorize<E: ComplexField>(a: &Mat<E>, params: LdltParams<E>) -> (Mat<E>, PivotTracker, LdltInfo) {
        let mut ldl = a.clone();
        let mut pivot = PivotTracker::default();
        let mut multipliers = vec![E::zero(); a.nrows()];
        let info = ldlt_in_place(&mut ldl.as_mut(), &mut pivot, &mut multipliers, params);
        (ldl, pivot, info)
    }

    // returns L D Lᴴ
    fn recombine<E: ComplexField>(ldl: &mut Mat<E>) -> Mat<E> {
        let n = ldl.nrows();
        let store = ldl.as_mut();
        let l = store.triangular(Side::Lower, true).to_owned();
        let d = store.diagonal().to_mat();
        let ld = product(
            l.as_ref(),
            BlockStructure::Rectangular,
            d.as_ref(),
            BlockStructure::Rectangular,
        );
        let lh = l.adjoint();
        let out = product(
            ld.as_ref(),
            BlockStructure::Rectangular,
            lh.as_ref(),
            BlockStructure::Rectangular,
        );
        assert!(out.nrows() == n);
        out
    }

    fn random_symmetric(n: usize, rng: &mut StdRng) -> Mat<f64> {
        let mut a = Mat::zeros(n, n);
        for j in 0..n {
            for i in j..n {
                let v = rng.gen::<f64>() - 0.5;
                a.write(i, j, v);
                a.write(j, i, v);
            }
        }
        a
    }

    #[test]
    fn reconstructs_symmetric_indefinite() {
        let mut rng = StdRng::seed_from_u64(0);
        for n in [1, 2, 3, 10, 32] {
            let mut a = random_symmetric(n, &mut rng);
            for j in 0..n {
                let v = if j % 2 == 0 { 5.0 } else { -5.0 } + rng.gen::<f64>();
                a.write(j, j, v);
            }

            let (mut ldl, pivot, info) = factorize(&a, Default::default());
            assert!(info.zero_pivot_count == 0);
            assert!(info.dynamic_regularization_count == 0);

            let mut pap = Mat::zeros(n, n);
            permute_symmetric(pap.as_mut(), a.as_ref(), pivot.as_perm());
            let out = recombine(&mut ldl);
            for j in 0..n {
                for i in 0..n {
                    assert_approx_eq!(out.read(i, j), pap.read(i, j));
                }
            }

            // the upper half holds D Lᴴ
            for j in 0..n {
                for i in 0..j {
                    assert_approx_eq!(ldl.read(i, j), ldl.read(i, i) * ldl.read(j, i));
                }
            }
        }
    }

    #[test]
    fn diagonal_pivoting_picks_largest() {
        let a = mat![[1.0, 2.0, 3.0], [2.0, -9.0, 1.0], [3.0, 1.0, 4.0]];
        let (_, pivot, info) = factorize(&a, Default::default());
        assert!(pivot.order()[0] == 1);
        assert!(info.transposition_count >= 1);

        let mut params = LdltParams::default();
        params.pivoting = false;
        let (ldl, pivot, _) = factorize(&a, params);
        assert!(!pivot.is_modified());
        assert!(ldl.read(0, 0) == 1.0);
        assert!(ldl.read(1, 0) == 2.0);
        assert!(ldl.read(1, 1) == -13.0);
    }

    #[test]
    fn only_lower_half_is_read() {
        let full = mat![[4.0, 2.0], [2.0, 3.0]];
        let lower = mat![[4.0, f64::NAN], [2.0, 3.0]];
        let (a, _, _) = factorize(&full, Default::default());
        let (b, _, _) = factorize(&lower, Default::default());
        assert!(a == b);
    }

    #[test]
    fn regularization_lifts_small_pivots() {
        let a = mat![[1.0, 1.0], [1.0, 1.0]];

        let (ldl, _, info) = factorize(&a, Default::default());
        assert!(info.zero_pivot_count == 1);
        assert!(info.breakdown_count == 0);
        assert!(ldl.read(1, 1) == 0.0);

        let mut params = LdltParams::default();
        params.regularization = LdltRegularization::with_threshold(1e-3);
        let (ldl, _, info) = factorize(&a, params);
        assert!(info.zero_pivot_count == 0);
        assert!(info.dynamic_regularization_count == 1);
        assert!(ldl.read(1, 1) == 1e-3);

        let b = mat![[-1.0, 0.0], [0.0, -1e-9]];
        let (ldl, _, info) = factorize(&b, params);
        assert!(info.dynamic_regularization_count == 1);
        assert!(ldl.read(1, 1) == -1e-3);
    }

    #[test]
    fn regularization_threshold_must_be_finite_and_positive() {
        for threshold in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let reg = LdltRegularization::<f64>::with_threshold(threshold);
            assert!(!reg.is_enabled());
            assert!(reg.apply(1e-20) == 1e-20);
        }
        let reg = LdltRegularization::<f64>::with_threshold(0.5);
        assert!(reg.apply(0.0) == 0.5);
        assert!(reg.apply(-0.25) == -0.5);
        assert!(reg.apply(2.0) == 2.0);
    }

    #[test]
    fn hermitian_complex() {
        let a = mat![
            [c64::new(4.0, 0.0), c64::new(1.0, -2.0), c64::new(0.0, 1.0)],
            [c64::new(1.0, 2.0), c64::new(6.0, 0.0), c64::new(2.0, 0.0)],
            [c64::new(0.0, -1.0), c64::new(2.0, 0.0), c64::new(5.0, 0.0)],
        ];
        let (mut ldl, pivot, _) = factorize(&a, Default::default());

        for i in 0..3 {
            assert!(ldl.read(i, i).im == 0.0);
        }

        let mut pap = Mat::zeros(3, 3);
        permute_symmetric(pap.as_mut(), a.as_ref(), pivot.as_perm());
        let out = recombine(&mut ldl);
        for j in 0..3 {
            for i in 0..3 {
                assert_approx_eq!(out.read(i, j).re, pap.read(i, j).re);
                assert_approx_eq!(out.read(i, j).im, pap.read(i, j).im);
            }
        }
    }

    #[test]
    fn zero_diagonal_breaks_down() {
        let a = mat![[0.0, 1.0], [1.0, 0.0]];
        let (ldl, pivot, info) = factorize(&a, Default::default());
        assert!(!pivot.is_modified());
        assert!(info.zero_pivot_count == 2);
        assert!(info.breakdown_count == 1);
        assert!(ldl.read(0, 0) == 0.0);
        assert!(ldl.read(1, 0) == 1.0);
    }
}
