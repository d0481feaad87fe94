//! Dense matrix storage and strided views.
//!
//! [`Mat`] owns a column-major buffer. [`MatRef`] and [`MatMut`] are views over any buffer with
//! arbitrary non-negative row and column strides, so that transposes and submatrices are free.

use crate::{assert, diag::DiagRef, entity::ComplexField};
use core::fmt::Debug;
use num_traits::Zero;
use reborrow::*;

mod mat_index;
mod matmut;
mod matown;
mod matref;

pub use matmut::MatMut;
pub use matown::Mat;
pub use matref::MatRef;

#[inline(always)]
fn elem_offset(row: usize, col: usize, row_stride: usize, col_stride: usize) -> usize {
    row * row_stride + col * col_stride
}

// the tail of a buffer starting at `offset`, or an empty slice if the view is empty and the
// offset lands past the end.
#[inline]
fn tail<E>(data: &[E], offset: usize) -> &[E] {
    data.get(offset..).unwrap_or_default()
}

#[inline]
fn tail_mut<E>(data: &mut [E], offset: usize) -> &mut [E] {
    data.get_mut(offset..).unwrap_or_default()
}

#[track_caller]
fn check_slice_len(len: usize, nrows: usize, ncols: usize) {
    assert!(len == nrows * ncols);
}

fn fmt_rows<E: Copy + Debug>(mat: MatRef<'_, E>, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    struct DebugRow<'a, T> {
        mat: MatRef<'a, T>,
        row: usize,
    }

    impl<T: Copy + Debug> Debug for DebugRow<'_, T> {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.debug_list()
                .entries((0..self.mat.ncols()).map(|j| self.mat.read(self.row, j)))
                .finish()
        }
    }

    f.debug_list()
        .entries((0..mat.nrows()).map(|row| DebugRow { mat, row }))
        .finish()
}

fn norm_max<E: ComplexField>(mat: MatRef<'_, E>) -> E::Real {
    let mut max = E::Real::zero();
    for j in 0..mat.ncols() {
        for i in 0..mat.nrows() {
            let abs = mat.read(i, j).abs();
            if abs > max {
                max = abs;
            }
        }
    }
    max
}
