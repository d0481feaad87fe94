//! `trifact` computes pivoted triangular decompositions of dense matrices, in place.
//!
//! Two factorizations are provided:
//! - the LU decomposition with partial (row) pivoting, $PA = LU$,
//! - the LDL decomposition with optional diagonal pivoting and regularization,
//! $PAP^\top = LDL^H$.
//!
//! Both overwrite a single matrix buffer with their combined factors, record the pivoting in a
//! [`perm::PivotTracker`], and are used through the [`linalg::solvers::Decomposition`] trait to
//! solve linear systems, compute inverses and determinants, and estimate the numerical rank.
//!
//! ```
//! use trifact::{col, mat, linalg::solvers::{Decomposition, PartialPivLu}};
//!
//! let a = mat![[4.0, 3.0], [6.0, 3.0f64]];
//! let lu = a.partial_piv_lu();
//!
//! assert!(lu.is_pivoted());
//! assert_eq!(lu.pivot_order(), &[1, 0]);
//!
//! let x = lu.solve(col![1.0, 1.0].as_ref()).unwrap();
//! assert!(x.read(0, 0).abs() < 1e-12);
//! assert!((x.read(1, 0) - 1.0 / 3.0).abs() < 1e-12);
//!
//! assert!((lu.determinant().unwrap() + 6.0).abs() < 1e-12);
//! # let _: &PartialPivLu<f64> = &lu;
//! ```

#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![allow(non_snake_case)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use equator::{assert, debug_assert};

pub mod diag;
pub mod entity;
pub mod error;
pub mod linalg;
pub mod mat;
pub mod perm;

pub use entity::{c32, c64, ComplexField, RealField};
pub use error::{DecompositionError, Result};
pub use mat::{Mat, MatMut, MatRef};
pub use reborrow;

/// Specifies whether the triangular lower or upper part of a matrix should be accessed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// Lower half should be accessed.
    Lower,
    /// Upper half should be accessed.
    Upper,
}

/// Creates a [`Mat`] containing the arguments, given row by row.
///
/// ```
/// use trifact::mat;
///
/// let matrix = mat![
///     [1.0, 5.0, 9.0],
///     [2.0, 6.0, 10.0],
///     [3.0, 7.0, 11.0],
///     [4.0, 8.0, 12.0f64],
/// ];
///
/// assert_eq!(matrix.read(0, 0), 1.0);
/// assert_eq!(matrix.read(3, 0), 4.0);
/// assert_eq!(matrix.read(0, 2), 9.0);
/// assert_eq!(matrix.read(3, 2), 12.0);
/// ```
#[macro_export]
macro_rules! mat {
    () => {
        {
            compile_error!("number of columns in the matrix is ambiguous");
        }
    };

    ($([$($v:expr),* $(,)?] ),* $(,)?) => {
        {
            let rows = [$([$($v),*]),*];
            let nrows = rows.len();
            let ncols = rows[0].len();

            $crate::mat::Mat::<_>::from_fn(nrows, ncols, |i, j| rows[i][j])
        }
    };
}

/// Creates a single column [`Mat`] containing the arguments.
///
/// ```
/// use trifact::col;
///
/// let b = col![3.0, 5.0, 7.0];
///
/// assert_eq!(b.nrows(), 3);
/// assert_eq!(b.ncols(), 1);
/// assert_eq!(b.read(2, 0), 7.0);
/// ```
#[macro_export]
macro_rules! col {
    ($($v:expr),+ $(,)?) => {{
        let data = [$($v),+];
        let n = data.len();

        $crate::mat::Mat::<_>::from_fn(n, 1, |i, _| data[i])
    }};
}

#[cfg(feature = "perf-warn")]
#[macro_export]
#[doc(hidden)]
macro_rules! __perf_warn {
    ($name: ident) => {{
        #[inline(always)]
        #[allow(non_snake_case)]
        fn $name() -> &'static ::core::sync::atomic::AtomicBool {
            static $name: ::core::sync::atomic::AtomicBool =
                ::core::sync::atomic::AtomicBool::new(false);
            &$name
        }
        ::core::matches!(
            $name().compare_exchange(
                false,
                true,
                ::core::sync::atomic::Ordering::Relaxed,
                ::core::sync::atomic::Ordering::Relaxed,
            ),
            Ok(_)
        )
    }};
}
