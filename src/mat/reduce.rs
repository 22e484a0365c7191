use super::mat::Mat;
use super::pivot::PivotError;

impl Mat {
    /// Reduce to (approximate) reduced row-echelon form in place, treating
    /// entries within [`Mat::EPS`] of zero as zero.
    pub fn row_reduce(&mut self) -> Result<(), PivotError> {
        self.row_reduce_with(Self::EPS)
    }

    /// Reduce to (approximate) reduced row-echelon form in place, with an
    /// explicit tolerance.
    ///
    /// Runs up to `rank` locate/eliminate cycles, stopping early once
    /// [`Mat::find_pivot_with`] finds nothing, then makes one cleanup pass:
    /// each entry exactly equal to 1 swaps its row up into the next unplaced
    /// slot, and entries within `eps` of zero snap to exactly 0. Pivot rows
    /// end up first, in order of discovery.
    pub fn row_reduce_with(&mut self, eps: f64) -> Result<(), PivotError> {
        for _ in 0..self.rank() {
            match self.find_pivot_with(eps) {
                Some(p) => self.pivot(p)?,
                None => break,
            }
        }

        // The cleanup reads live state: after a swap, the remainder of row i
        // is the swapped-in row.
        let mut placed = 0;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                if self[(i, j)] == 1. {
                    self.swap_rows(placed, i);
                    placed += 1;
                }
                if self[(i, j)].abs() < eps {
                    self[(i, j)] = 0.;
                }
            }
        }
        Ok(())
    }
}
