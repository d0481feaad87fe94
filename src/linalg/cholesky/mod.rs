//! The only decomposition provided here is the diagonal LDL decomposition of a self-adjoint
//! matrix, with optional diagonal pivoting.

pub mod ldlt_diagonal;
