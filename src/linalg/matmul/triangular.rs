//! Matrix multiplication where some of the operands are triangular.

use crate::{assert, entity::ComplexField, mat::*};

/// Describes the parts of the matrix that must be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStructure {
    /// The full matrix is accessed.
    Rectangular,
    /// The lower triangular half (including the diagonal) is accessed.
    TriangularLower,
    /// The lower triangular half (excluding the diagonal) is accessed.
    StrictTriangularLower,
    /// The lower triangular half (excluding the diagonal, which is assumed to be equal to
    /// `1.0`) is accessed.
    UnitTriangularLower,
    /// The upper triangular half (including the diagonal) is accessed.
    TriangularUpper,
    /// The upper triangular half (excluding the diagonal) is accessed.
    StrictTriangularUpper,
    /// The upper triangular half (excluding the diagonal, which is assumed to be equal to
    /// `1.0`) is accessed.
    UnitTriangularUpper,
}

impl BlockStructure {
    /// Checks if `self` is full.
    #[inline]
    pub fn is_dense(self) -> bool {
        matches!(self, BlockStructure::Rectangular)
    }

    /// Checks if `self` is triangular lower (either inclusive or exclusive).
    #[inline]
    pub fn is_lower(self) -> bool {
        use BlockStructure::*;
        matches!(
            self,
            TriangularLower | StrictTriangularLower | UnitTriangularLower
        )
    }

    /// Checks if `self` is triangular upper (either inclusive or exclusive).
    #[inline]
    pub fn is_upper(self) -> bool {
        use BlockStructure::*;
        matches!(
            self,
            TriangularUpper | StrictTriangularUpper | UnitTriangularUpper
        )
    }

    /// Checks if the diagonal of `self` is implicitly one.
    #[inline]
    pub fn is_unit(self) -> bool {
        use BlockStructure::*;
        matches!(self, UnitTriangularLower | UnitTriangularUpper)
    }

    /// Returns the block structure corresponding to the transposed matrix.
    #[inline]
    pub fn transpose(self) -> Self {
        use BlockStructure::*;
        match self {
            Rectangular => Rectangular,
            TriangularLower => TriangularUpper,
            StrictTriangularLower => StrictTriangularUpper,
            UnitTriangularLower => UnitTriangularUpper,
            TriangularUpper => TriangularLower,
            StrictTriangularUpper => StrictTriangularLower,
            UnitTriangularUpper => UnitTriangularLower,
        }
    }

    /// Returns the value of the element at `(row, col)` of a matrix with this structure, whose
    /// stored value is `stored`.
    #[inline]
    pub fn mask<E: ComplexField>(self, row: usize, col: usize, stored: impl FnOnce() -> E) -> E {
        use BlockStructure::*;
        let visible = match self {
            Rectangular => true,
            TriangularLower => row >= col,
            StrictTriangularLower | UnitTriangularLower => row > col,
            TriangularUpper => row <= col,
            StrictTriangularUpper | UnitTriangularUpper => row < col,
        };
        if visible {
            stored()
        } else if self.is_unit() && row == col {
            E::one()
        } else {
            E::zero()
        }
    }
}

/// Computes the matrix product `[alpha * dst] + beta * lhs * rhs` and stores the result in
/// `dst`, where only the parts of `lhs` and `rhs` described by their block structure are read.
///
/// If `alpha` is not provided, the previous contents of `dst` are not read.
///
/// # Panics
///
/// Panics if the matrix dimensions are not compatible for matrix multiplication, i.e.
///  - `dst.nrows() == lhs.nrows()`
///  - `dst.ncols() == rhs.ncols()`
///  - `lhs.ncols() == rhs.nrows()`
#[track_caller]
pub fn matmul<E: ComplexField>(
    dst: MatMut<'_, E>,
    lhs: MatRef<'_, E>,
    lhs_structure: BlockStructure,
    rhs: MatRef<'_, E>,
    rhs_structure: BlockStructure,
    alpha: Option<E>,
    beta: E,
) {
    let mut dst = dst;
    assert!(all(
        dst.nrows() == lhs.nrows(),
        dst.ncols() == rhs.ncols(),
        lhs.ncols() == rhs.nrows(),
    ));

    let inner = lhs.ncols();
    for j in 0..dst.ncols() {
        for i in 0..dst.nrows() {
            // the range of `k` where both operands can be nonzero.
            let mut k_begin = 0;
            let mut k_end = inner;
            if lhs_structure.is_lower() {
                k_end = Ord::min(k_end, i + 1);
            } else if lhs_structure.is_upper() {
                k_begin = Ord::max(k_begin, i);
            }
            if rhs_structure.is_lower() {
                k_begin = Ord::max(k_begin, j);
            } else if rhs_structure.is_upper() {
                k_end = Ord::min(k_end, j + 1);
            }

            let mut acc = E::zero();
            for k in k_begin..k_end {
                let l = lhs_structure.mask(i, k, || lhs.read(i, k));
                let r = rhs_structure.mask(k, j, || rhs.read(k, j));
                acc = acc + l * r;
            }

            let value = match alpha {
                Some(alpha) => alpha * dst.read(i, j) + beta * acc,
                None => beta * acc,
            };
            dst.write(i, j, value);
        }
    }
}

/// Returns the product `lhs * rhs` as a new matrix, reading only the parts of `lhs` and `rhs`
/// described by their block structure.
#[track_caller]
pub fn product<E: ComplexField>(
    lhs: MatRef<'_, E>,
    lhs_structure: BlockStructure,
    rhs: MatRef<'_, E>,
    rhs_structure: BlockStructure,
) -> Mat<E> {
    let mut dst = Mat::zeros(lhs.nrows(), rhs.ncols());
    matmul(
        dst.as_mut(),
        lhs,
        lhs_structure,
        rhs,
        rhs_structure,
        None,
        E::one(),
    );
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use crate::mat;

    #[test]
    fn triangular_operands_ignore_other_half() {
        let lhs = mat![[2.0, 100.0], [3.0, 4.0]];
        let rhs = mat![[1.0, 5.0], [-100.0, 6.0]];

        let full = product(
            lhs.as_ref(),
            BlockStructure::Rectangular,
            rhs.as_ref(),
            BlockStructure::Rectangular,
        );
        assert!(full == mat![[-9998.0, 610.0], [-397.0, 39.0]]);

        let tri = product(
            lhs.as_ref(),
            BlockStructure::TriangularLower,
            rhs.as_ref(),
            BlockStructure::TriangularUpper,
        );
        assert!(tri == mat![[2.0, 10.0], [3.0, 39.0]]);

        let unit = product(
            lhs.as_ref(),
            BlockStructure::UnitTriangularLower,
            rhs.as_ref(),
            BlockStructure::TriangularUpper,
        );
        assert!(unit == mat![[1.0, 5.0], [3.0, 21.0]]);
    }

    #[test]
    fn accumulates_into_destination() {
        let lhs = mat![[1.0, 2.0]];
        let rhs = mat![[3.0], [4.0]];
        let mut dst = mat![[10.0]];

        matmul(
            dst.as_mut(),
            lhs.as_ref(),
            BlockStructure::Rectangular,
            rhs.as_ref(),
            BlockStructure::Rectangular,
            Some(2.0),
            -1.0,
        );
        assert!(dst == mat![[9.0]]);
    }

    #[test]
    fn structure_transpose() {
        assert!(BlockStructure::UnitTriangularLower.transpose() == BlockStructure::UnitTriangularUpper);
        assert!(BlockStructure::Rectangular.is_dense());
        assert!(BlockStructure::StrictTriangularUpper.is_upper());
        assert!(!BlockStructure::StrictTriangularUpper.is_unit());
    }
}
