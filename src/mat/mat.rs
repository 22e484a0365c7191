use std::fmt;
use std::ops::{Index, IndexMut};

use crate::util::mem::calloc;

use super::index::{MatDims, MatIndex, OutOfBoundsError};

type MatElement = f64;

/// Dense row-major matrix of `f64` entries.
///
/// The matrix exclusively owns its storage; extraction helpers ([`Mat::row`],
/// [`Mat::col`], [`Mat::transpose`]) return fresh, independent matrices, while
/// the row operations mutate in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Mat {
	pub(super) dims: MatDims,
	pub(super) data: Box<[f64]>,
}

impl Mat {
	/// Tolerance below which an entry is treated as zero.
	pub const EPS: f64 = 1e-12;

	/// Create matrix full of zeroes
	pub fn zeroes(rows: usize, cols: usize) -> Self {
		Self::zeroes_dim(MatDims { rows, cols })
	}

	#[inline]
	pub(super) fn zeroes_dim(dims: MatDims) -> Self {
		Self {
			dims,
			data: calloc(dims.len()),
		}
	}

	/// Create matrix from data
	pub fn create(rows: usize, cols: usize, raw: &[f64]) -> Self {
		let dims = MatDims { rows, cols };
		assert_eq!(dims.len(), raw.len(), "Data length mismatch");

		let mut data = calloc(raw.len());
		data.copy_from_slice(raw);
		Self {
			dims,
			data,
		}
	}

	/// Build a matrix from a flat row-major vector of entries and a row count,
	/// such that `m[(i, j)] == values[i * cols + j]`.
	///
	/// The column count is `values.len() / nrow`; any remainder is silently
	/// dropped. A negative `nrow` yields `None`, and `nrow == 0` yields a
	/// valid 0x0 matrix.
	pub fn from_vector(values: &[f64], nrow: isize) -> Option<Self> {
		if nrow < 0 {
			return None;
		}
		if nrow == 0 {
			return Some(Self::zeroes(0, 0));
		}
		let nrow = nrow as usize;
		let ncol = values.len() / nrow;
		Some(Self::create(nrow, ncol, &values[..nrow * ncol]))
	}

	/// Create identity matrix of dimension
	pub fn identity(dim: usize) -> Mat {
		let mut res = Self::zeroes(dim, dim);
		for i in 0..dim {
			res[(i, i)] = 1.;
		}
		res
	}

	#[inline]
	pub fn rows(&self) -> usize {
		self.dims.rows
	}

	#[inline]
	pub fn cols(&self) -> usize {
		self.dims.cols
	}

	#[inline]
	pub fn dims(&self) -> MatDims {
		self.dims
	}

	/// Upper bound on the number of pivots (`min(rows, cols)`)
	#[inline]
	pub fn rank(&self) -> usize {
		self.dims.rank()
	}

	pub fn get(&self, idx: MatIndex) -> Result<&MatElement, OutOfBoundsError> {
		let offset = self.dims.compute_offset(idx)?;
		Ok(unsafe { self.data.get_unchecked(offset) })
	}

	pub fn get_mut(&mut self, idx: MatIndex) -> Result<&mut MatElement, OutOfBoundsError> {
		let offset = self.dims.compute_offset(idx)?;
		Ok(unsafe { self.data.get_unchecked_mut(offset) })
	}

	#[inline]
	pub(super) fn row_slice(&self, i: usize) -> &[f64] {
		let start = i * self.cols();
		&self.data[start..start + self.cols()]
	}

	#[inline]
	fn row_slice_mut(&mut self, i: usize) -> &mut [f64] {
		let cols = self.cols();
		let start = i * cols;
		&mut self.data[start..start + cols]
	}

	/// Extract row `i` as a fresh 1-by-cols matrix
	pub fn row(&self, i: usize) -> Mat {
		assert!(i < self.rows(), "row index out of bounds");
		Self::create(1, self.cols(), self.row_slice(i))
	}

	/// Extract column `j` as a fresh rows-by-1 matrix
	pub fn col(&self, j: usize) -> Mat {
		assert!(j < self.cols(), "column index out of bounds");
		let mut res = Self::zeroes(self.rows(), 1);
		for i in 0..self.rows() {
			res[(i, 0)] = self[(i, j)];
		}
		res
	}

	/// Matrix transpose
	pub fn transpose(&self) -> Self {
		let mut res = Self::zeroes(self.dims.cols, self.dims.rows);
		for i in 0..self.dims.rows {
			for j in 0..self.dims.cols {
				res[(j, i)] = self[(i, j)];
			}
		}
		res
	}

	/// Multiply every entry of row `i` by `factor`, in place
	pub fn scale_row(&mut self, i: usize, factor: f64) {
		for elem in self.row_slice_mut(i) {
			*elem *= factor;
		}
	}

	/// Add row `src` element-wise into row `dst`, in place. Row `src` is
	/// unchanged and row `dst` holds the sum.
	pub fn add_row(&mut self, src: usize, dst: usize) {
		assert!(src < self.rows(), "row index out of bounds");
		assert!(dst < self.rows(), "row index out of bounds");
		let cols = self.cols();
		for n in 0..cols {
			let v = self.data[src * cols + n];
			self.data[dst * cols + n] += v;
		}
	}

	/// Exchange rows `i` and `j` in place
	pub fn swap_rows(&mut self, i: usize, j: usize) {
		assert!(i < self.rows(), "row index out of bounds");
		assert!(j < self.rows(), "row index out of bounds");
		if i == j {
			return;
		}

		let cols = self.cols();
		let (lo, hi) = if i < j { (i, j) } else { (j, i) };
		let (left, right) = self.data.split_at_mut(hi * cols);
		let lo_start = lo * cols;
		left[lo_start..lo_start + cols].swap_with_slice(&mut right[..cols]);
	}

	/// Exchange columns `i` and `j` in place
	pub fn swap_cols(&mut self, i: usize, j: usize) {
		assert!(i < self.cols(), "column index out of bounds");
		assert!(j < self.cols(), "column index out of bounds");
		if i == j {
			return;
		}

		for r in 0..self.rows() {
			let a = self.dims.compute_offset_unchecked(MatIndex { row: r, col: i });
			let b = self.dims.compute_offset_unchecked(MatIndex { row: r, col: j });
			self.data.swap(a, b);
		}
	}
}

impl Index<(usize, usize)> for Mat {
	type Output = MatElement;

	fn index(&self, index: (usize, usize)) -> &Self::Output {
		self.get(MatIndex::from(index)).unwrap()
	}
}

impl IndexMut<(usize, usize)> for Mat {
	fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
		self.get_mut(MatIndex::from(index)).unwrap()
	}
}

impl fmt::Display for Mat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-by-{} matrix", self.rows(), self.cols())?;
		for i in 0..self.rows() {
			write!(f, "\n[")?;
			for (n, v) in self.row_slice(i).iter().enumerate() {
				if n > 0 {
					write!(f, " ")?;
				}
				write!(f, "{v}")?;
			}
			write!(f, "]")?;
		}
		Ok(())
	}
}

impl float_cmp::ApproxEq for &Mat {
	type Margin = float_cmp::F64Margin;

	fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
		self.dims == other.dims
			&& <&[f64] as float_cmp::ApproxEq>::approx_eq(&self.data[..], &other.data[..], margin)
	}
}
