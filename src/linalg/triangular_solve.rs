//! Triangular solve module.
//!
//! Both substitutions solve `T × X = rhs` in place, where `T` is the triangular operator read from
//! `body`:
//! - forwards, `T` is lower triangular: `body` itself, or the conjugate transpose of the upper
//! half of `body` when `conjugated` is set,
//! - backwards, `T` is upper triangular: `body` itself, or the conjugate transpose of the lower
//! half of `body` when `conjugated` is set.
//!
//! When `identity` is set, the caller promises that `rhs` holds the identity matrix. The
//! structurally zero part of the solution is then skipped instead of computed.

use crate::{assert, entity::ComplexField, mat::*};

#[inline(always)]
fn operator<E: ComplexField>(body: MatRef<'_, E>, conjugated: bool, row: usize, col: usize) -> E {
    if conjugated {
        body.read(col, row).conj()
    } else {
        body.read(row, col)
    }
}

#[track_caller]
fn check_dims<E: ComplexField>(body: MatRef<'_, E>, rhs: &MatMut<'_, E>, identity: bool) {
    assert!(all(body.nrows() == body.ncols(), rhs.nrows() == body.ncols()));
    if identity {
        assert!(rhs.ncols() == rhs.nrows());
    }
}

/// Forward substitution of `T × X = rhs`, where `T` is lower triangular, storing the result in
/// `rhs`.
///
/// # Panics
///
/// - Panics if `body` is not square.
/// - Panics if `rhs.nrows() != body.ncols()`.
/// - Panics if `identity` is set and `rhs` is not square.
#[track_caller]
pub fn substitute_forwards<E: ComplexField>(
    body: MatRef<'_, E>,
    unit_diagonal: bool,
    conjugated: bool,
    identity: bool,
    rhs: MatMut<'_, E>,
) {
    let mut rhs = rhs;
    check_dims(body, &rhs, identity);
    let n = body.nrows();

    for j in 0..rhs.ncols() {
        // with an identity right hand side, the leading `j` entries of the solution are zero.
        let start = if identity { j } else { 0 };
        for i in start..n {
            let mut acc = rhs.read(i, j);
            for k in start..i {
                acc = acc - operator(body, conjugated, i, k) * rhs.read(k, j);
            }
            if !unit_diagonal {
                acc = acc / operator(body, conjugated, i, i);
            }
            rhs.write(i, j, acc);
        }
    }
}

/// Backward substitution of `T × X = rhs`, where `T` is upper triangular, storing the result in
/// `rhs`.
///
/// # Panics
///
/// - Panics if `body` is not square.
/// - Panics if `rhs.nrows() != body.ncols()`.
/// - Panics if `identity` is set and `rhs` is not square.
#[track_caller]
pub fn substitute_backwards<E: ComplexField>(
    body: MatRef<'_, E>,
    unit_diagonal: bool,
    conjugated: bool,
    identity: bool,
    rhs: MatMut<'_, E>,
) {
    let mut rhs = rhs;
    check_dims(body, &rhs, identity);
    let n = body.nrows();

    for j in 0..rhs.ncols() {
        // with an identity right hand side, the trailing entries below `j` are zero.
        let end = if identity { j + 1 } else { n };
        for i in (0..end).rev() {
            let mut acc = rhs.read(i, j);
            for k in i + 1..end {
                acc = acc - operator(body, conjugated, i, k) * rhs.read(k, j);
            }
            if !unit_diagonal {
                acc = acc / operator(body, conjugated, i, i);
            }
            rhs.write(i, j, acc);
        }
    }
}

/// Computes the solution of `triangular_lower × X = rhs`, and stores the result in `rhs`.
///
/// `triangular_lower` is interpreted as a lower triangular matrix (diagonal included).
/// Its strictly upper triangular part is not accessed.
#[track_caller]
#[inline]
pub fn solve_lower_triangular_in_place<E: ComplexField>(
    triangular_lower: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
) {
    substitute_forwards(triangular_lower, false, false, false, rhs)
}

/// Computes the solution of `triangular_lower × X = rhs`, and stores the result in `rhs`.
///
/// `triangular_lower` is interpreted as a lower triangular matrix, and its diagonal elements are
/// implicitly considered to be `1.0`. Its diagonal and strictly upper triangular part are not
/// accessed.
#[track_caller]
#[inline]
pub fn solve_unit_lower_triangular_in_place<E: ComplexField>(
    triangular_lower: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
) {
    substitute_forwards(triangular_lower, true, false, false, rhs)
}

/// Computes the solution of `triangular_upper × X = rhs`, and stores the result in `rhs`.
///
/// `triangular_upper` is interpreted as an upper triangular matrix (diagonal included).
/// Its strictly lower triangular part is not accessed.
#[track_caller]
#[inline]
pub fn solve_upper_triangular_in_place<E: ComplexField>(
    triangular_upper: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
) {
    substitute_backwards(triangular_upper, false, false, false, rhs)
}

/// Computes the solution of `triangular_lowerᴴ × X = rhs`, and stores the result in `rhs`.
///
/// `triangular_lower` is interpreted as a lower triangular matrix, and its diagonal elements are
/// implicitly considered to be `1.0`. Its diagonal and strictly upper triangular part are not
/// accessed.
#[track_caller]
#[inline]
pub fn solve_unit_lower_adjoint_in_place<E: ComplexField>(
    triangular_lower: MatRef<'_, E>,
    rhs: MatMut<'_, E>,
) {
    substitute_backwards(triangular_lower, true, true, false, rhs)
}
