mod index;
mod mat;
/// Pivot selection and application
mod pivot;
/// Gauss-Jordan reduction driver
mod reduce;

pub use index::{MatDims, MatIndex, OutOfBoundsError};
pub use mat::Mat;
pub use pivot::{Pivot, PivotError};
