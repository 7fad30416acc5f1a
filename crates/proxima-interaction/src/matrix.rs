//! Dense row-major matrix of interaction values.

/// Value of a cell nobody has written.
pub const NO_INTERACTION: f64 = 0.0;

/// A fixed-size `rows × cols` matrix stored row-major in one allocation.
///
/// Every cell starts at [`NO_INTERACTION`]. Bounds are the caller's
/// responsibility: accessors take `row < rows` and `col < cols` as given and
/// panic otherwise, like slice indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Allocate a zero-filled matrix.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![NO_INTERACTION; rows * cols] }
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read one cell.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.offset(row, col)]
    }

    /// Overwrite one cell.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let offset = self.offset(row, col);
        self.data[offset] = value;
    }

    /// Borrow one row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.cols)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of bounds");
        row * self.cols + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let m = DenseMatrix::zeros(3, 4);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.iter_rows().flatten().all(|&v| v == NO_INTERACTION));
    }

    #[test]
    fn set_overwrites_single_cell() {
        let mut m = DenseMatrix::zeros(2, 3);
        m.set(1, 2, 4.5);
        m.set(1, 2, 1.25);

        assert_eq!(m.get(1, 2), 1.25);
        assert_eq!(m.row(1), &[0.0, 0.0, 1.25]);
        assert_eq!(m.row(0), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn iter_rows_yields_every_row() {
        let mut m = DenseMatrix::zeros(3, 2);
        m.set(2, 0, 1.0);
        let rows: Vec<&[f64]> = m.iter_rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[1.0, 0.0]);
    }
}
