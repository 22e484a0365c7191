use std::fmt;

use thiserror::Error;

use crate::util::mem::calloc;

use super::index::MatIndex;
use super::mat::Mat;

/// Coordinate selected to be normalized to 1 and used to zero out the rest
/// of its column.
///
/// Pivots are transient: produced by [`Mat::find_pivot`] and consumed by
/// [`Mat::pivot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub row: usize,
    pub col: usize,
}

impl From<Pivot> for MatIndex {
    fn from(p: Pivot) -> Self {
        MatIndex { row: p.row, col: p.col }
    }
}

impl fmt::Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Error generated when [applying a pivot](Mat::pivot)
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum PivotError {
    #[error("pivot {0} is out of bounds")]
    OutOfBounds(Pivot),
    /// The entry at the pivot coordinate is zero, so its row cannot be
    /// normalized. [`Mat::find_pivot`] never selects such an entry.
    #[error("entry at pivot {0} is zero")]
    ZeroPivot(Pivot),
}

impl Mat {
    /// Find the next coordinate to pivot on, treating entries within
    /// [`Mat::EPS`] of zero as zero.
    pub fn find_pivot(&self) -> Option<Pivot> {
        self.find_pivot_with(Self::EPS)
    }

    /// Find the next coordinate to pivot on, with an explicit tolerance.
    ///
    /// Columns `0..rank` are scanned left to right, rows top to bottom. The
    /// first entry beyond `eps` of zero is the candidate:
    /// - A non-unit entry is returned, unless its row already holds exactly
    ///   one entry within `eps` of 1 in an earlier column (that row was
    ///   pivoted before).
    /// - A unit entry may be a completed pivot: the bottom-right corner
    ///   element is skipped, and otherwise it is returned only if some entry
    ///   below it exceeds `eps` or it sits in the last row.
    ///
    /// Returns `None` once no column yields a pivot. Pure read scan; never
    /// returns a coordinate holding an entry within `eps` of zero.
    pub fn find_pivot_with(&self, eps: f64) -> Option<Pivot> {
        // ones[i]: entries within eps of 1 in row i, over the columns
        // finished so far.
        let mut ones = calloc::<u32>(self.rows());

        for j in 0..self.rank() {
            for i in 0..self.rows() {
                let v = self[(i, j)];
                if v.abs() <= eps {
                    continue;
                }
                if (v - 1.).abs() > eps {
                    if ones[i] == 1 {
                        // row was already pivoted on
                        continue;
                    }
                    return Some(Pivot { row: i, col: j });
                }
                // unit entry; the corner element leaves nothing to eliminate
                if i + 1 == self.rows() && j + 1 == self.cols() {
                    continue;
                }
                let zeroed = ((i + 1)..self.rows()).all(|k| self[(k, j)].abs() <= eps);
                if !zeroed || i + 1 == self.rows() {
                    return Some(Pivot { row: i, col: j });
                }
            }

            for i in 0..self.rows() {
                if (self[(i, j)] - 1.).abs() < eps {
                    ones[i] += 1;
                }
            }
        }
        None
    }

    /// Apply one Gauss-Jordan step at `p`: normalize row `p.row` so the
    /// pivot entry becomes exactly 1, then eliminate column `p.col` from
    /// every other row.
    ///
    /// Elimination composes the row primitives: the pivot row is temporarily
    /// scaled by the negated factor, added into the target row, then
    /// restored by the inverse scale.
    pub fn pivot(&mut self, p: Pivot) -> Result<(), PivotError> {
        let entry = *self.get(p.into()).map_err(|_| PivotError::OutOfBounds(p))?;
        if entry == 0. {
            return Err(PivotError::ZeroPivot(p));
        }

        self.scale_row(p.row, entry.recip());
        for i in 0..self.rows() {
            if i == p.row {
                continue;
            }
            let factor = self[(i, p.col)];
            if factor != 0. {
                self.scale_row(p.row, -factor);
                self.add_row(p.row, i);
                self.scale_row(p.row, (-factor).recip());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Pivot, PivotError};
    use crate::mat::Mat;

    /// (entries, row count, expected pivot)
    const PIVOT_CASES: &[(&[f64], isize, Option<(usize, usize)>)] = &[
        (&[0., 0., 1., -1., 5., 6., 7., 9.], 4, Some((1, 0))),
        (&[4.4, 5., 6., 7.5], 2, Some((0, 0))),
        (&[1., 9. / 10., 5. / 6., 0., 5., 3.], 2, Some((1, 1))),
        (&[-1., 0., 4., 5., 6., 7.], 3, Some((0, 0))),
        (&[1., 2., 3., 4., 5., 6., 7., 8.], 8, Some((0, 0))),
        (&[-2., 0., 4., 5., 9.2, 0.3], 2, Some((0, 0))),
        (&[0., 0., 0., 1., 9.2, 0.], 2, Some((1, 0))),
        (&[0., 0., 0., 0., 9.2, 0.], 2, Some((1, 1))),
        (&[1., 0., 0., 0., 1., 0., 0., 0., 1.], 3, None),
        (&[3., 4., 5., 7., 9., 1., 0., 8., 5., 4., 3., -7.], 4, Some((0, 0))),
        (&[5.5, 6.7, 9., 0.1, 3., 4., 5.6, 8.], 2, Some((0, 0))),
        (
            &[
                0., 6.7, 9., 0.1,
                3., 4., 5.6, 8.,
                0.3, 0.5, 0.6, 0.11,
                3. / 4., 5. / 7., 8. / 9., 0.,
            ],
            4,
            Some((1, 0)),
        ),
    ];

    #[test]
    fn find_pivot_cases() {
        for (i, (vec, nrow, want)) in PIVOT_CASES.iter().enumerate() {
            let m = Mat::from_vector(vec, *nrow).unwrap();
            let got = m.find_pivot().map(|p| (p.row, p.col));
            assert_eq!(got, *want, "wrong pivot on case {i}");
        }
    }

    #[test]
    fn find_pivot_identity_reduced() {
        let m = Mat::identity(3);
        assert_eq!(m.find_pivot(), None);
    }

    #[test]
    fn find_pivot_tolerance() {
        let m = Mat::from_vector(&[1e-9, 0., 0., 0.], 2).unwrap();
        // above the default tolerance, below a coarse one
        assert_eq!(m.find_pivot(), Some(Pivot { row: 0, col: 0 }));
        assert_eq!(m.find_pivot_with(1e-6), None);
    }

    #[test]
    fn pivot_eliminates_column() {
        let mut m = Mat::from_vector(&[0., 0., 1., -1., 5., 6., 7., 9.], 4).unwrap();
        m.pivot(Pivot { row: 1, col: 0 }).unwrap();

        let want = Mat::from_vector(&[0., 0., 1., -1., 0., 11., 0., 16.], 4).unwrap();
        assert_eq!(m, want);
    }

    #[test]
    fn pivot_normalizes_row() {
        let mut m = Mat::from_vector(&[2., 4., 0., 3.], 2).unwrap();
        m.pivot(Pivot { row: 0, col: 0 }).unwrap();
        assert_eq!(m[(0, 0)], 1.);
        assert_eq!(m[(0, 1)], 2.);
    }

    #[test]
    fn pivot_zero_entry_rejected() {
        let original = Mat::from_vector(&[0., 1., 2., 3.], 2).unwrap();
        let mut m = original.clone();
        let p = Pivot { row: 0, col: 0 };
        assert_eq!(m.pivot(p), Err(PivotError::ZeroPivot(p)));
        assert_eq!(m, original);
    }

    #[test]
    fn pivot_out_of_bounds_rejected() {
        let mut m = Mat::zeroes(2, 2);
        let p = Pivot { row: 2, col: 0 };
        assert_eq!(m.pivot(p), Err(PivotError::OutOfBounds(p)));
    }
}
