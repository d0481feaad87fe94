//! Errors reported when a decomposition is used.

use thiserror::Error;

/// Result type alias using [`DecompositionError`].
pub type Result<T> = core::result::Result<T, DecompositionError>;

/// Failure to use a decomposition.
///
/// Computing a decomposition never fails for numerical reasons: singular inputs still produce a
/// complete factorization, with their negligible pivots set to zero. These conditions are raised
/// when the factorization is *used* for something it cannot support.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionError {
    /// The operation requires a square matrix.
    #[error("matrix is not square: {nrows}x{ncols}")]
    NotSquare {
        /// Number of rows of the decomposed matrix.
        nrows: usize,
        /// Number of columns of the decomposed matrix.
        ncols: usize,
    },

    /// The matrix is rank deficient, so it has no inverse.
    #[error("matrix is not invertible: numerical rank {rank} of {dim}")]
    NotInvertible {
        /// Number of pivots above the rank threshold.
        rank: usize,
        /// Dimension of the matrix.
        dim: usize,
    },

    /// The matrix is rank deficient, so the equation system has no unique solution.
    #[error("equation system is not solvable: numerical rank {rank} of {dim}")]
    NotSolvable {
        /// Number of pivots above the rank threshold.
        rank: usize,
        /// Dimension of the matrix.
        dim: usize,
    },

    /// No decomposition has been computed since creation or the last reset.
    #[error("decomposition has not been computed")]
    NotComputed,
}
