//! Linear algebra module.
//!
//! Contains the low level in-place decomposition routines, and the high level wrappers in
//! [`solvers`] that own their storage.
//!
//! # In-place factors
//! The decompositions overwrite their input buffer with the combined factors: the strictly lower
//! triangular half holds the multipliers of the unit lower triangular factor $L$, and the
//! diagonal and upper half hold $U$ (for LU) or $D$ and $DL^H$ (for LDL). The elimination goes
//! through the [`store::DecompositionStore`] trait, so that any buffer exposing its primitives
//! can be factorized in place.
//!
//! # Scratch space
//! The low level routines don't allocate during the elimination. They take the pivot record and
//! a slice of multiplier scratch space from the caller, whose required length is given by the
//! functions ending in `_scratch_len`, for example
//! [`lu::partial_pivoting::compute::lu_in_place_scratch_len`]. The scratch space may be reused
//! across decompositions.

pub mod cholesky;
pub mod lu;
pub mod matmul;
pub mod solvers;
pub mod store;
pub mod triangular;
pub mod triangular_solve;
