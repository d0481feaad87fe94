//! High level decompositions that own their factor storage.
//!
//! [`PartialPivLu`] and [`Ldlt`] keep the in-place factors, the pivot tracker and the multiplier
//! scratch space of the last decomposition, and reuse them when [`Decomposition::decompose`] is
//! called again. Singular inputs still decompose: the rank deficiency is reported when the
//! factorization is used to solve, invert or compute a determinant.

use crate::{
    diag::DiagRef,
    entity::{ComplexField, RealField},
    error::{DecompositionError, Result},
    linalg::{
        cholesky::ldlt_diagonal::{self, compute::LdltInfo, compute::LdltParams},
        lu::partial_pivoting::{
            self,
            compute::{PartialPivLuInfo, PartialPivLuParams},
        },
        matmul::triangular::BlockStructure,
        triangular::TriangularRef,
    },
    mat::*,
    perm::PivotTracker,
};
use num_traits::One;

#[cfg(feature = "perf-warn")]
#[track_caller]
fn warn_non_column_major<E: Copy>(matrix: MatRef<'_, E>) {
    if !matrix.is_col_major() && crate::__perf_warn!(DECOMPOSE_WARN) {
        log::warn!(
            target: "trifact_perf",
            "decomposing a {}x{} matrix that is not column major, the input is copied into a column major buffer",
            matrix.nrows(),
            matrix.ncols(),
        );
    }
}

/// Operations shared by the in-place pivoted decompositions.
///
/// The required methods expose the state of the factorization; everything else is derived from
/// the factors and the pivot record.
pub trait Decomposition<E: ComplexField> {
    /// Decomposes `matrix`, replacing any previous factorization.
    ///
    /// Returns `false` if the shape of `matrix` can't be decomposed, in which case the
    /// decomposition is left uncomputed. Numerically singular inputs return `true`.
    fn decompose(&mut self, matrix: MatRef<'_, E>) -> bool;

    /// Discards the current factorization, and resets the pivot record to the identity.
    fn reset(&mut self);

    /// Returns `true` if a factorization is available.
    fn is_computed(&self) -> bool;

    /// Returns the combined in-place factors.
    fn factors(&self) -> MatRef<'_, E>;

    /// Returns the pivot record of the last decomposition.
    fn pivot(&self) -> &PivotTracker;

    /// Returns the determinant of the decomposed matrix.
    fn determinant(&self) -> Result<E>;

    /// Solves the linear system in place, with the solution rows in the order of the rows of
    /// `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` doesn't have as many rows as the decomposed matrix.
    fn solve_in_place(&self, rhs: MatMut<'_, E>) -> Result<()>;

    /// Writes the inverse of the decomposed matrix into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` doesn't have the shape of the decomposed matrix.
    fn get_inverse(&self, dst: MatMut<'_, E>) -> Result<()>;

    /// Rebuilds the decomposed matrix from its factors.
    fn reconstruct(&self) -> Result<Mat<E>>;

    /// Number of rows of the decomposed matrix.
    #[inline]
    fn nrows(&self) -> usize {
        self.factors().nrows()
    }

    /// Number of columns of the decomposed matrix.
    #[inline]
    fn ncols(&self) -> usize {
        self.factors().ncols()
    }

    /// Returns the threshold below which a diagonal element of the factors is numerically zero:
    /// the largest diagonal magnitude (at least the smallest positive normal value), scaled by
    /// the largest dimension and the machine epsilon.
    fn rank_threshold(&self) -> E::Real {
        let factors = self.factors();
        let largest = factors
            .diagonal()
            .iter()
            .map(|d| d.abs())
            .fold(E::Real::min_positive(), |acc, d| if d > acc { d } else { acc });
        let dim = Ord::max(factors.nrows(), factors.ncols());
        largest * E::Real::from_f64(dim as f64) * E::Real::epsilon()
    }

    /// Counts the diagonal elements of the factors whose absolute value is strictly greater than
    /// `threshold`.
    fn count_significant(&self, threshold: E::Real) -> usize {
        self.factors()
            .diagonal()
            .iter()
            .filter(|d| d.abs() > threshold)
            .count()
    }

    /// Returns the numerical rank, using [`Decomposition::rank_threshold`].
    #[inline]
    fn rank(&self) -> usize {
        self.count_significant(self.rank_threshold())
    }

    /// Returns `true` if the numerical rank is the smallest dimension of the matrix.
    #[inline]
    fn is_full_rank(&self) -> bool {
        self.rank() == Ord::min(self.nrows(), self.ncols())
    }

    /// Returns `true` if the decomposed matrix is square and of full numerical rank.
    #[inline]
    fn is_solvable(&self) -> bool {
        self.is_computed() && self.nrows() == self.ncols() && self.is_full_rank()
    }

    /// Solves the linear system, and returns the solution.
    fn solve(&self, rhs: MatRef<'_, E>) -> Result<Mat<E>> {
        let mut x = rhs.to_owned();
        self.solve_in_place(x.as_mut())?;
        Ok(x)
    }

    /// Decomposes `body`, then solves the linear system `body × X = rhs`.
    fn solve_system(&mut self, body: MatRef<'_, E>, rhs: MatRef<'_, E>) -> Result<Mat<E>> {
        if !self.decompose(body) {
            return Err(DecompositionError::NotSquare {
                nrows: body.nrows(),
                ncols: body.ncols(),
            });
        }
        self.solve(rhs)
    }

    /// Returns the inverse of the decomposed matrix.
    fn inverse(&self) -> Result<Mat<E>> {
        let mut inv = Mat::zeros(self.nrows(), self.ncols());
        self.get_inverse(inv.as_mut())?;
        Ok(inv)
    }

    /// Maps each decomposition row to the row of the original matrix it came from.
    #[inline]
    fn pivot_order(&self) -> &[usize] {
        self.pivot().order()
    }

    /// Inverse of [`Decomposition::pivot_order`].
    #[inline]
    fn reverse_pivot_order(&self) -> &[usize] {
        self.pivot().reverse_order()
    }

    /// Returns `true` if the last decomposition exchanged any rows.
    #[inline]
    fn is_pivoted(&self) -> bool {
        self.pivot().is_modified()
    }
}

fn check_computed(computed: bool) -> Result<()> {
    if computed {
        Ok(())
    } else {
        Err(DecompositionError::NotComputed)
    }
}

fn check_square(nrows: usize, ncols: usize) -> Result<()> {
    if nrows == ncols {
        Ok(())
    } else {
        Err(DecompositionError::NotSquare { nrows, ncols })
    }
}

fn check_solvable<E: ComplexField, D: Decomposition<E> + ?Sized>(dec: &D) -> Result<()> {
    check_computed(dec.is_computed())?;
    check_square(dec.nrows(), dec.ncols())?;
    let rank = dec.rank();
    let dim = dec.nrows();
    if rank == dim {
        Ok(())
    } else {
        log::debug!(target: "trifact", "system is not solvable: rank {rank} of {dim}");
        Err(DecompositionError::NotSolvable { rank, dim })
    }
}

fn check_invertible<E: ComplexField, D: Decomposition<E> + ?Sized>(dec: &D) -> Result<()> {
    check_solvable::<E, D>(dec).map_err(|err| match err {
        DecompositionError::NotSolvable { rank, dim } => DecompositionError::NotInvertible { rank, dim },
        err => err,
    })
}

/// LU decomposition with partial pivoting, $PA = LU$.
#[derive(Clone, Debug)]
pub struct PartialPivLu<E: ComplexField> {
    factors: Mat<E>,
    pivot: PivotTracker,
    multipliers: Vec<E>,
    params: PartialPivLuParams,
    info: PartialPivLuInfo,
    computed: bool,
}

impl<E: ComplexField> Default for PartialPivLu<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ComplexField> PartialPivLu<E> {
    /// Creates an empty decomposition with default parameters.
    #[inline]
    pub fn new() -> Self {
        Self::with_params(PartialPivLuParams::default())
    }

    /// Creates an empty decomposition with the given parameters.
    #[inline]
    pub fn with_params(params: PartialPivLuParams) -> Self {
        Self {
            factors: Mat::new(),
            pivot: PivotTracker::default(),
            multipliers: Vec::new(),
            params,
            info: PartialPivLuInfo::default(),
            computed: false,
        }
    }

    /// Decomposes `matrix` with default parameters.
    #[track_caller]
    pub fn compute(matrix: MatRef<'_, E>) -> Self {
        let mut lu = Self::new();
        lu.decompose(matrix);
        lu
    }

    /// Returns the parameters used by [`Decomposition::decompose`].
    #[inline]
    pub fn params(&self) -> PartialPivLuParams {
        self.params
    }

    /// Returns information about the last decomposition.
    #[inline]
    pub fn info(&self) -> PartialPivLuInfo {
        self.info
    }

    /// Returns a view over the unit lower triangular factor $L$.
    pub fn l(&self) -> TriangularRef<'_, E> {
        let (m, n) = self.factors.shape();
        TriangularRef::new(
            self.factors.as_ref().submatrix(0, 0, m, Ord::min(m, n)),
            BlockStructure::UnitTriangularLower,
        )
    }

    /// Returns a view over the upper triangular factor $U$.
    pub fn u(&self) -> TriangularRef<'_, E> {
        let (m, n) = self.factors.shape();
        TriangularRef::new(
            self.factors.as_ref().submatrix(0, 0, Ord::min(m, n), n),
            BlockStructure::TriangularUpper,
        )
    }

    /// Returns the factor $L$.
    #[inline]
    pub fn compute_l(&self) -> Mat<E> {
        self.l().to_owned()
    }

    /// Returns the factor $U$.
    #[inline]
    pub fn compute_u(&self) -> Mat<E> {
        self.u().to_owned()
    }

    /// Solves $A^\top X = B$ in place.
    pub fn solve_transpose_in_place(&self, rhs: MatMut<'_, E>) -> Result<()> {
        check_solvable::<E, _>(self)?;
        partial_pivoting::solve::solve_transpose_in_place(self.factors.as_ref(), self.pivot.as_perm(), rhs);
        Ok(())
    }
}

impl<E: ComplexField> Decomposition<E> for PartialPivLu<E> {
    #[track_caller]
    fn decompose(&mut self, matrix: MatRef<'_, E>) -> bool {
        #[cfg(feature = "perf-warn")]
        warn_non_column_major(matrix);

        let (m, n) = matrix.shape();
        self.factors.resize_with(m, n, |_, _| E::zero());
        self.factors.as_mut().copy_from(matrix);
        self.multipliers.clear();
        self.multipliers
            .resize(partial_pivoting::compute::lu_in_place_scratch_len(m, n), E::zero());

        self.info = partial_pivoting::compute::lu_in_place(
            &mut self.factors.as_mut(),
            &mut self.pivot,
            &mut self.multipliers,
            self.params,
        );
        self.computed = true;
        true
    }

    fn reset(&mut self) {
        self.computed = false;
        self.info = PartialPivLuInfo::default();
        self.pivot.reset(self.factors.nrows());
    }

    #[inline]
    fn is_computed(&self) -> bool {
        self.computed
    }

    #[inline]
    fn factors(&self) -> MatRef<'_, E> {
        self.factors.as_ref()
    }

    #[inline]
    fn pivot(&self) -> &PivotTracker {
        &self.pivot
    }

    fn determinant(&self) -> Result<E> {
        check_computed(self.computed)?;
        check_square(self.nrows(), self.ncols())?;
        let det = self.factors.diagonal().iter().fold(E::one(), |acc, d| acc * d);
        Ok(if self.pivot.signum() < 0 { -det } else { det })
    }

    #[track_caller]
    fn solve_in_place(&self, rhs: MatMut<'_, E>) -> Result<()> {
        check_solvable::<E, _>(self)?;
        partial_pivoting::solve::solve_in_place(self.factors.as_ref(), self.pivot.as_perm(), rhs);
        Ok(())
    }

    #[track_caller]
    fn get_inverse(&self, dst: MatMut<'_, E>) -> Result<()> {
        check_invertible::<E, _>(self)?;
        partial_pivoting::inverse::invert(dst, self.factors.as_ref(), self.pivot.as_perm());
        Ok(())
    }

    fn reconstruct(&self) -> Result<Mat<E>> {
        check_computed(self.computed)?;
        let mut dst = Mat::zeros(self.nrows(), self.ncols());
        partial_pivoting::reconstruct::reconstruct(dst.as_mut(), self.factors.as_ref(), self.pivot.as_perm());
        Ok(dst)
    }
}

/// LDL decomposition of a self-adjoint matrix with diagonal pivoting, $PAP^\top = LDL^H$.
///
/// Only the lower triangular half of the decomposed matrix is read. If the elimination breaks
/// down, see [`LdltInfo::breakdown_count`], the determinant and the reconstruction are refused.
#[derive(Clone, Debug)]
pub struct Ldlt<E: ComplexField> {
    factors: Mat<E>,
    pivot: PivotTracker,
    multipliers: Vec<E>,
    params: LdltParams<E>,
    info: LdltInfo,
    computed: bool,
}

impl<E: ComplexField> Default for Ldlt<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ComplexField> Ldlt<E> {
    /// Creates an empty decomposition with default parameters.
    #[inline]
    pub fn new() -> Self {
        Self::with_params(LdltParams::default())
    }

    /// Creates an empty decomposition with the given parameters.
    #[inline]
    pub fn with_params(params: LdltParams<E>) -> Self {
        Self {
            factors: Mat::new(),
            pivot: PivotTracker::default(),
            multipliers: Vec::new(),
            params,
            info: LdltInfo::default(),
            computed: false,
        }
    }

    /// Decomposes `matrix` with the given parameters.
    ///
    /// Fails if `matrix` is not square.
    #[track_caller]
    pub fn compute(matrix: MatRef<'_, E>, params: LdltParams<E>) -> Result<Self> {
        let mut ldl = Self::with_params(params);
        check_square(matrix.nrows(), matrix.ncols())?;
        ldl.decompose(matrix);
        Ok(ldl)
    }

    /// Returns the parameters used by [`Decomposition::decompose`].
    #[inline]
    pub fn params(&self) -> LdltParams<E> {
        self.params
    }

    /// Returns information about the last decomposition.
    #[inline]
    pub fn info(&self) -> LdltInfo {
        self.info
    }

    /// Returns a view over the unit lower triangular factor $L$.
    #[inline]
    pub fn l(&self) -> TriangularRef<'_, E> {
        TriangularRef::new(self.factors.as_ref(), BlockStructure::UnitTriangularLower)
    }

    /// Returns a view over the diagonal factor $D$.
    #[inline]
    pub fn d(&self) -> DiagRef<'_, E> {
        self.factors.diagonal()
    }

    /// Returns the factor $L$.
    #[inline]
    pub fn compute_l(&self) -> Mat<E> {
        self.l().to_owned()
    }

    /// Returns the factor $D$ as a diagonal matrix.
    #[inline]
    pub fn compute_d(&self) -> Mat<E> {
        self.d().to_mat()
    }

    // a zero pivot over a nonzero column leaves factors unrelated to the input
    fn check_factors(&self) -> Result<()> {
        check_computed(self.computed)?;
        if self.info.breakdown_count == 0 {
            Ok(())
        } else {
            let rank = self.rank();
            let dim = self.nrows();
            log::debug!(target: "trifact", "ldlt: factors are unusable after a breakdown, rank {rank} of {dim}");
            Err(DecompositionError::NotSolvable { rank, dim })
        }
    }
}

impl<E: ComplexField> Decomposition<E> for Ldlt<E> {
    #[track_caller]
    fn decompose(&mut self, matrix: MatRef<'_, E>) -> bool {
        let (m, n) = matrix.shape();
        if m != n {
            log::debug!(target: "trifact", "ldlt: cannot decompose a {m}x{n} matrix");
            self.reset();
            return false;
        }

        #[cfg(feature = "perf-warn")]
        warn_non_column_major(matrix);

        self.factors.resize_with(n, n, |_, _| E::zero());
        self.factors.as_mut().copy_from(matrix);
        self.multipliers.clear();
        self.multipliers
            .resize(ldlt_diagonal::compute::ldlt_in_place_scratch_len(n), E::zero());

        self.info = ldlt_diagonal::compute::ldlt_in_place(
            &mut self.factors.as_mut(),
            &mut self.pivot,
            &mut self.multipliers,
            self.params,
        );
        self.computed = true;
        true
    }

    fn reset(&mut self) {
        self.computed = false;
        self.info = LdltInfo::default();
        self.pivot.reset(self.factors.nrows());
    }

    #[inline]
    fn is_computed(&self) -> bool {
        self.computed
    }

    #[inline]
    fn factors(&self) -> MatRef<'_, E> {
        self.factors.as_ref()
    }

    #[inline]
    fn pivot(&self) -> &PivotTracker {
        &self.pivot
    }

    // det(P) = ±1 appears twice, so only D contributes
    fn determinant(&self) -> Result<E> {
        self.check_factors()?;
        let det = self.d().iter().fold(E::Real::one(), |acc, d| acc * d.real());
        Ok(E::from_real(det))
    }

    #[track_caller]
    fn solve_in_place(&self, rhs: MatMut<'_, E>) -> Result<()> {
        check_solvable::<E, _>(self)?;
        ldlt_diagonal::solve::solve_in_place(self.factors.as_ref(), self.pivot.as_perm(), rhs);
        Ok(())
    }

    #[track_caller]
    fn get_inverse(&self, dst: MatMut<'_, E>) -> Result<()> {
        check_invertible::<E, _>(self)?;
        ldlt_diagonal::inverse::invert(dst, self.factors.as_ref(), self.pivot.as_perm());
        Ok(())
    }

    fn reconstruct(&self) -> Result<Mat<E>> {
        self.check_factors()?;
        let n = self.nrows();
        let mut dst = Mat::zeros(n, n);
        ldlt_diagonal::reconstruct::reconstruct(dst.as_mut(), self.factors.as_ref(), self.pivot.as_perm());
        Ok(dst)
    }
}

impl<E: ComplexField> MatRef<'_, E> {
    /// Returns the LU decomposition of `self` with partial pivoting.
    #[track_caller]
    pub fn partial_piv_lu(&self) -> PartialPivLu<E> {
        PartialPivLu::compute(*self)
    }

    /// Returns the LDL decomposition of `self` with diagonal pivoting, reading only its lower
    /// triangular half.
    #[track_caller]
    pub fn ldlt(&self, params: LdltParams<E>) -> Result<Ldlt<E>> {
        Ldlt::compute(*self, params)
    }

    /// Returns the determinant of `self`.
    #[track_caller]
    pub fn determinant(&self) -> Result<E> {
        check_square(self.nrows(), self.ncols())?;
        self.partial_piv_lu().determinant()
    }
}

impl<E: ComplexField> Mat<E> {
    /// Returns the LU decomposition of `self` with partial pivoting.
    #[track_caller]
    pub fn partial_piv_lu(&self) -> PartialPivLu<E> {
        self.as_ref().partial_piv_lu()
    }

    /// Returns the LDL decomposition of `self` with diagonal pivoting, reading only its lower
    /// triangular half.
    #[track_caller]
    pub fn ldlt(&self, params: LdltParams<E>) -> Result<Ldlt<E>> {
        self.as_ref().ldlt(params)
    }

    /// Returns the determinant of `self`.
    #[track_caller]
    pub fn determinant(&self) -> Result<E> {
        self.as_ref().determinant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert, c64, col,
        linalg::{cholesky::ldlt_diagonal::compute::LdltRegularization, matmul::matmul},
        mat,
    };
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn assert_mat_approx_eq(a: &Mat<f64>, b: &Mat<f64>) {
        assert!(a.shape() == b.shape());
        for j in 0..a.ncols() {
            for i in 0..a.nrows() {
                assert_approx_eq!(a.read(i, j), b.read(i, j));
            }
        }
    }

    fn random_mat(n: usize, rng: &mut StdRng) -> Mat<f64> {
        let mut a = Mat::from_fn(n, n, |_, _| rng.gen::<f64>());
        for i in 0..n {
            a.write(i, i, a.read(i, i) + n as f64);
        }
        a
    }

    #[test]
    fn pivoted_two_by_two() {
        let a = mat![[4.0, 3.0], [6.0, 3.0]];
        let b = col![1.0, 1.0];
        let lu = a.partial_piv_lu();

        assert!(lu.is_pivoted());
        assert_eq!(lu.pivot_order(), &[1, 0]);
        assert_eq!(lu.reverse_pivot_order(), &[1, 0]);
        assert!(lu.info().transposition_count == 1);

        let x = lu.solve(b.as_ref()).unwrap();
        assert_approx_eq!(x.read(0, 0), 0.0);
        assert_approx_eq!(x.read(1, 0), 1.0 / 3.0);

        assert_approx_eq!(lu.determinant().unwrap(), -6.0);
        assert_approx_eq!(a.determinant().unwrap(), -6.0);

        assert_mat_approx_eq(&lu.compute_l(), &mat![[1.0, 0.0], [4.0 / 6.0, 1.0]]);
        assert_mat_approx_eq(&lu.compute_u(), &mat![[6.0, 3.0], [0.0, 1.0]]);
    }

    #[test]
    fn single_swap_flips_determinant() {
        let lu = mat![[0.0, 1.0], [1.0, 0.0]].partial_piv_lu();
        assert!(lu.is_pivoted());
        assert!(lu.pivot().signum() == -1);
        assert!(lu.determinant().unwrap() == -1.0);

        let lu = mat![[2.0, 0.0], [0.0, 3.0]].partial_piv_lu();
        assert!(!lu.is_pivoted());
        assert!(lu.determinant().unwrap() == 6.0);
    }

    #[test]
    fn singular_input_is_not_solvable() {
        let a = mat![[1.0, 2.0], [2.0, 4.0]];
        let lu = a.partial_piv_lu();

        assert!(lu.is_computed());
        assert!(!lu.is_solvable());
        assert!(lu.rank() == 1);
        assert!(lu.determinant().unwrap() == 0.0);
        assert!(lu.solve(col![1.0, 1.0].as_ref()) == Err(DecompositionError::NotSolvable { rank: 1, dim: 2 }));
        assert!(lu.inverse() == Err(DecompositionError::NotInvertible { rank: 1, dim: 2 }));

        let ldl = a.ldlt(Default::default()).unwrap();
        assert!(!ldl.is_solvable());
        assert!(ldl.inverse() == Err(DecompositionError::NotInvertible { rank: 1, dim: 2 }));
    }

    #[test]
    fn rank_threshold_boundary() {
        let eps = f64::EPSILON;

        // threshold is 1 * 2 * eps
        let lu = mat![[1.0, 0.0], [0.0, 2.0 * eps]].partial_piv_lu();
        assert!(lu.rank_threshold() == 2.0 * eps);
        assert!(lu.count_significant(lu.rank_threshold()) == 1);
        assert!(!lu.is_solvable());

        let lu = mat![[1.0, 0.0], [0.0, 4.0 * eps]].partial_piv_lu();
        assert!(lu.count_significant(lu.rank_threshold()) == 2);
        assert!(lu.is_solvable());

        let lu = mat![[1.0, 0.0], [0.0, eps]].partial_piv_lu();
        assert!(!lu.is_solvable());
        assert!(lu.solve(col![1.0, 1.0].as_ref()).is_err());

        assert!(lu.count_significant(0.0) == 1);
        assert!(lu.count_significant(-1.0) == 2);
    }

    #[test]
    fn solve_round_trip() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut lu = PartialPivLu::new();
        for n in [1, 2, 10, 100] {
            let a = Mat::from_fn(n, n, |_, _| rng.gen::<f64>() - 0.5);
            let b = Mat::from_fn(n, 3, |_, _| rng.gen::<f64>());

            let x = lu.solve_system(a.as_ref(), b.as_ref()).unwrap();
            let mut ax = Mat::zeros(n, 3);
            matmul(ax.as_mut(), a.as_ref(), x.as_ref(), None, 1.0);
            assert_mat_approx_eq(&ax, &b);
        }
    }

    #[test]
    fn invert_twice() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [1, 3, 17] {
            let a = random_mat(n, &mut rng);
            let inv = a.partial_piv_lu().inverse().unwrap();
            let back = inv.partial_piv_lu().inverse().unwrap();
            assert_mat_approx_eq(&back, &a);

            let mut preallocated = Mat::zeros(n, n);
            a.partial_piv_lu().get_inverse(preallocated.as_mut()).unwrap();
            assert_mat_approx_eq(&preallocated, &inv);
        }
    }

    #[test]
    fn reconstruct_and_reuse() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut lu = PartialPivLu::new();
        assert!(lu.determinant() == Err(DecompositionError::NotComputed));

        for (m, n) in [(5, 5), (6, 3), (3, 6), (4, 4)] {
            let a = Mat::from_fn(m, n, |_, _| rng.gen::<f64>());
            assert!(lu.decompose(a.as_ref()));
            assert_mat_approx_eq(&lu.reconstruct().unwrap(), &a);
        }

        lu.reset();
        assert!(!lu.is_computed());
        assert!(!lu.is_pivoted());
        assert_eq!(lu.pivot_order(), &[0, 1, 2, 3]);
        assert!(lu.solve(col![1.0, 2.0, 3.0, 4.0].as_ref()) == Err(DecompositionError::NotComputed));
    }

    #[test]
    fn rectangular_errors() {
        let a = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let lu = a.partial_piv_lu();
        assert!(lu.is_computed());
        assert!(lu.is_full_rank());
        assert!(!lu.is_solvable());
        assert!(lu.determinant() == Err(DecompositionError::NotSquare { nrows: 2, ncols: 3 }));
        assert!(lu.inverse() == Err(DecompositionError::NotSquare { nrows: 2, ncols: 3 }));
        assert!(a.determinant() == Err(DecompositionError::NotSquare { nrows: 2, ncols: 3 }));

        assert!(a.ldlt(Default::default()).unwrap_err() == DecompositionError::NotSquare { nrows: 2, ncols: 3 });
        let mut ldl = Ldlt::new();
        assert!(!ldl.decompose(a.as_ref()));
        assert!(!ldl.is_computed());
        assert!(
            ldl.solve_system(a.as_ref(), col![1.0, 1.0].as_ref())
                == Err(DecompositionError::NotSquare { nrows: 2, ncols: 3 })
        );
    }

    #[test]
    fn ldlt_solve_invert_determinant() {
        let a = mat![[1.0, 2.0, 0.0], [2.0, -6.0, 1.0], [0.0, 1.0, 3.0]];
        let ldl = a.ldlt(Default::default()).unwrap();

        assert!(ldl.is_pivoted());
        assert!(ldl.is_solvable());
        assert_approx_eq!(ldl.determinant().unwrap(), a.determinant().unwrap());

        let b = col![1.0, -1.0, 2.0];
        let x = ldl.solve(b.as_ref()).unwrap();
        let mut ax = Mat::zeros(3, 1);
        matmul(ax.as_mut(), a.as_ref(), x.as_ref(), None, 1.0);
        assert_mat_approx_eq(&ax, &b);

        let inv = ldl.inverse().unwrap();
        let back = inv.ldlt(Default::default()).unwrap().inverse().unwrap();
        assert_mat_approx_eq(&back, &a);

        assert_mat_approx_eq(&ldl.reconstruct().unwrap(), &a);

        // P A Pᵀ = L D Lᵀ
        let l = ldl.compute_l();
        let mut ld = Mat::zeros(3, 3);
        matmul(ld.as_mut(), l.as_ref(), ldl.compute_d().as_ref(), None, 1.0);
        let mut ldlt = Mat::zeros(3, 3);
        matmul(ldlt.as_mut(), ld.as_ref(), l.transpose().as_ref(), None, 1.0);
        let order = ldl.pivot_order();
        let pap = Mat::from_fn(3, 3, |i, j| a.read(order[i], order[j]));
        assert_mat_approx_eq(&ldlt, &pap);
    }

    #[test]
    fn ldlt_regularization() {
        let a = mat![[1.0, 1.0], [1.0, 1.0]];
        let mut params = LdltParams::default();
        params.regularization = LdltRegularization::with_threshold(1e-6);

        let ldl = a.ldlt(params).unwrap();
        assert!(ldl.info().dynamic_regularization_count == 1);
        assert!(ldl.is_solvable());
        assert!(ldl.d().to_vec() == vec![1.0, 1e-6]);
        assert_approx_eq!(ldl.determinant().unwrap(), 1e-6);

        let ldl = a.ldlt(Default::default()).unwrap();
        assert!(!ldl.is_solvable());
    }

    #[test]
    fn ldlt_hermitian() {
        let a = mat![
            [c64::new(2.0, 0.0), c64::new(1.0, -1.0)],
            [c64::new(1.0, 1.0), c64::new(-3.0, 0.0)],
        ];
        let mut ldl = Ldlt::new();
        assert!(ldl.decompose(a.as_ref()));

        let det = ldl.determinant().unwrap();
        assert_approx_eq!(det.re, -8.0);
        assert!(det.im == 0.0);

        let inv = ldl.inverse().unwrap();
        let mut prod = Mat::zeros(2, 2);
        matmul(prod.as_mut(), a.as_ref(), inv.as_ref(), None, c64::new(1.0, 0.0));
        for j in 0..2 {
            for i in 0..2 {
                assert_approx_eq!(prod.read(i, j).re, if i == j { 1.0 } else { 0.0 });
                assert_approx_eq!(prod.read(i, j).im, 0.0);
            }
        }
    }

    #[test]
    fn transpose_solve() {
        let a = mat![[4.0, 3.0, 1.0], [6.0, 3.0, 2.0], [1.0, 5.0, 7.0]];
        let lu = a.partial_piv_lu();
        let b = col![1.0, 2.0, 3.0];
        let mut x = b.clone();
        lu.solve_transpose_in_place(x.as_mut()).unwrap();

        let mut atx = Mat::zeros(3, 1);
        matmul(atx.as_mut(), a.transpose().as_ref(), x.as_ref(), None, 1.0);
        assert_mat_approx_eq(&atx, &b);
    }

    #[test]
    fn ldlt_zero_diagonal_is_rejected() {
        let a = mat![[0.0, 1.0], [1.0, 0.0]];
        let ldl = a.ldlt(Default::default()).unwrap();

        assert!(ldl.is_computed());
        assert!(!ldl.is_solvable());
        assert!(ldl.info().breakdown_count == 1);
        assert!(ldl.determinant() == Err(DecompositionError::NotSolvable { rank: 0, dim: 2 }));
        assert!(ldl.reconstruct() == Err(DecompositionError::NotSolvable { rank: 0, dim: 2 }));
        assert!(ldl.solve(col![1.0, 1.0].as_ref()) == Err(DecompositionError::NotSolvable { rank: 0, dim: 2 }));
        assert!(ldl.inverse() == Err(DecompositionError::NotInvertible { rank: 0, dim: 2 }));

        // the same matrix is fine for LU
        assert!(a.determinant() == Ok(-1.0));
    }

    #[test]
    fn ldlt_singular_without_breakdown() {
        let a = mat![[1.0, 2.0], [2.0, 4.0]];
        let ldl = a.ldlt(Default::default()).unwrap();

        assert!(ldl.info().zero_pivot_count == 1);
        assert!(ldl.info().breakdown_count == 0);
        assert!(ldl.determinant() == Ok(0.0));
        assert_mat_approx_eq(&ldl.reconstruct().unwrap(), &a);
    }

    #[test]
    fn ldlt_rejected_shape_clears_pivoting() {
        let a = mat![[1.0, 2.0, 0.0], [2.0, -6.0, 1.0], [0.0, 1.0, 3.0]];
        let mut ldl = Ldlt::new();
        assert!(ldl.decompose(a.as_ref()));
        assert!(ldl.is_pivoted());

        let rect = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert!(!ldl.decompose(rect.as_ref()));
        assert!(!ldl.is_computed());
        assert!(!ldl.is_pivoted());
        assert_eq!(ldl.pivot_order(), &[0, 1, 2]);
        assert!(ldl.info() == LdltInfo::default());
        assert!(ldl.determinant() == Err(DecompositionError::NotComputed));
    }
}
