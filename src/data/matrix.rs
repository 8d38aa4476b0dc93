//! Matrix: dense row-major `[rows, cols]` storage for per-point fields.
//!
//! Every per-point quantity in this crate is a matrix whose rows are points
//! (global indices for base fields, compact vertex indices for boundary-only
//! fields) and whose columns are the per-point components.

use crate::bound_error::BoundVarError;
use crate::data::storage::{Storage, VecStorage};

/// Dense row-major matrix over a pluggable [`Storage`] backend.
///
/// # Invariants
///
/// `data.len() == rows * cols` at all times.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<V, S: Storage<V> = VecStorage<V>> {
    rows: usize,
    cols: usize,
    data: S,
    _marker: core::marker::PhantomData<V>,
}

impl<V: Clone, S: Storage<V>> Matrix<V, S> {
    /// Allocate a `rows x cols` matrix with every entry set to `fill`.
    pub fn filled(rows: usize, cols: usize, fill: V) -> Self {
        let len = rows
            .checked_mul(cols)
            .expect("matrix element count overflows usize");
        Self {
            rows,
            cols,
            data: S::with_len(len, fill),
            _marker: core::marker::PhantomData,
        }
    }

    /// Copy `src` into every row.
    ///
    /// # Errors
    /// `StorageShapeMismatch` if `src.len() != cols`.
    pub fn fill_rows(&mut self, src: &[V]) -> Result<(), BoundVarError> {
        for row in 0..self.rows {
            self.write_row(row, src)?;
        }
        Ok(())
    }

    /// Overwrite row `row` with `src`.
    ///
    /// # Errors
    /// `StorageShapeMismatch` if `src.len() != cols`, `PointOutOfRange` if
    /// `row >= rows`.
    pub fn write_row(&mut self, row: usize, src: &[V]) -> Result<(), BoundVarError> {
        let offset = self.row_offset(row, src.len())?;
        self.data.write_at(offset, src)
    }

    /// Copy row `row` into `dst`.
    ///
    /// # Errors
    /// As for [`write_row`](Self::write_row).
    pub fn read_row(&self, row: usize, dst: &mut [V]) -> Result<(), BoundVarError> {
        let offset = self.row_offset(row, dst.len())?;
        self.data.read_into(offset, dst)
    }

    /// Overwrite every entry with `value`.
    pub fn fill(&mut self, value: V) {
        self.data.fill(value);
    }
}

impl<V, S: Storage<V>> Matrix<V, S> {
    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "matrix index ({row}, {col}) out of bounds for shape [{}, {}]",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Shared reference to element `(row, col)`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> &V {
        let off = self.offset(row, col);
        &self.data.as_slice()[off]
    }

    /// Mutable reference to element `(row, col)`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut V {
        let off = self.offset(row, col);
        &mut self.data.as_mut_slice()[off]
    }

    fn row_offset(&self, row: usize, len: usize) -> Result<usize, BoundVarError> {
        if len != self.cols {
            return Err(BoundVarError::StorageShapeMismatch {
                expected: self.cols,
                found: len,
            });
        }
        if row >= self.rows {
            return Err(BoundVarError::PointOutOfRange {
                point: row,
                n_point: self.rows,
            });
        }
        Ok(row * self.cols)
    }

    /// Read-only view of one row.
    ///
    /// # Panics
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row(&self, row: usize) -> &[V] {
        assert!(row < self.rows, "row {row} out of bounds ({} rows)", self.rows);
        let start = row * self.cols;
        &self.data.as_slice()[start..start + self.cols]
    }

    /// Entire buffer in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        self.data.as_slice()
    }
}

impl<V: Clone> Matrix<V> {
    /// Copy the contents of `src` (same shape) into `self`.
    ///
    /// # Panics
    /// Panics if the shapes differ.
    pub fn copy_from(&mut self, src: &Matrix<V>) {
        assert_eq!(
            (self.rows, self.cols),
            (src.rows, src.cols),
            "matrix shapes must match"
        );
        self.data.as_mut_slice().clone_from_slice(src.as_slice());
    }
}

impl<V> Default for Matrix<V> {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: VecStorage::default(),
            _marker: core::marker::PhantomData,
        }
    }
}
