//! Dense `f64` matrices with an in-place Gauss-Jordan reduction engine.
//!
//! The core entry points are [`Mat::find_pivot`], [`Mat::pivot`] and
//! [`Mat::row_reduce`], which together reduce a matrix to (approximate)
//! reduced row-echelon form.

pub mod mat;
mod util;

pub use mat::{Mat, MatDims, MatIndex, OutOfBoundsError, Pivot, PivotError};
