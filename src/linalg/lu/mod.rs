//! Low level implementation of the LU decomposition.

pub mod partial_pivoting;
