//! Diagonal views.

use crate::{assert, entity::ComplexField, mat::Mat, mat::MatRef};
use num_traits::Zero;
use reborrow::*;

mod diagref;

pub use diagref::DiagRef;
