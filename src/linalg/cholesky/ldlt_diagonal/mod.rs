//! The diagonally pivoted LDL decomposition of a self-adjoint matrix $A$ is such that:
//! $$PAP^\top = LDL^H,$$
//! where $P$ is a permutation matrix, $D$ is a real diagonal matrix, and $L$ is a unit lower
//! triangular matrix.
//!
//! Without pivoting, the decomposition may have poor numerical stability properties when used
//! with indefinite matrices. Pivoting brings the largest remaining diagonal element to the pivot
//! position at each step, and the regularization threshold keeps near-zero pivots away from
//! zero for ill-conditioned systems.

/// Computing the decomposition.
pub mod compute;
/// Computing the inverse of the original matrix from the decomposition.
pub mod inverse;
/// Reconstructing the original matrix from the decomposition.
pub mod reconstruct;
/// Solving a linear system using the decomposition.
pub mod solve;
