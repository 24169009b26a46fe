//! Compressed sparse constraint matrices.

mod transpose;

pub use transpose::{CompressedView, MatrixTranspose, Transposed};

use crate::enums::MatrixFormat;
use crate::error::HighsError;

/// Matrices with fewer entries are transposed in a single chunk.
const PARALLEL_MIN_NZ: usize = 1 << 16;

fn transposer(num_nz: usize) -> MatrixTranspose {
    let transposer = MatrixTranspose::new();
    if num_nz < PARALLEL_MIN_NZ {
        transposer.with_chunk_count(1).with_parallel(false)
    } else {
        transposer
    }
}

/// Sparse matrix in compressed column or row storage.
///
/// For `RowwisePartitioned`, `p_end[i]` splits row `i` into the entries
/// `start[i]..p_end[i]` and `p_end[i]..start[i + 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct HighsSparseMatrix {
    pub format: MatrixFormat,
    pub num_col: usize,
    pub num_row: usize,
    pub start: Vec<usize>,
    pub p_end: Vec<usize>,
    pub index: Vec<usize>,
    pub value: Vec<f64>,
}

impl Default for HighsSparseMatrix {
    fn default() -> Self {
        Self {
            format: MatrixFormat::Colwise,
            num_col: 0,
            num_row: 0,
            start: vec![0],
            p_end: Vec::new(),
            index: Vec::new(),
            value: Vec::new(),
        }
    }
}

impl HighsSparseMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a matrix from full compressed arrays (`start` has one entry per
    /// vector plus the closing offset).
    pub fn from_parts(
        format: MatrixFormat,
        num_col: usize,
        num_row: usize,
        start: Vec<usize>,
        index: Vec<usize>,
        value: Vec<f64>,
    ) -> Self {
        Self {
            format,
            num_col,
            num_row,
            start,
            p_end: Vec::new(),
            index,
            value,
        }
    }

    /// Build a matrix from per-vector starts without the closing offset, as
    /// HiGHS APIs take them. The closing offset is `index.len()`.
    pub fn from_vectors(
        format: MatrixFormat,
        num_col: usize,
        num_row: usize,
        starts: &[usize],
        index: &[usize],
        value: &[f64],
    ) -> Self {
        let mut start = Vec::with_capacity(starts.len() + 1);
        start.extend_from_slice(starts);
        start.push(index.len());
        Self::from_parts(format, num_col, num_row, start, index.to_vec(), value.to_vec())
    }

    /// Number of stored vectors: columns when column-wise, rows otherwise.
    pub fn num_vectors(&self) -> usize {
        if self.format.is_rowwise() {
            self.num_row
        } else {
            self.num_col
        }
    }

    /// Length of each stored vector.
    pub fn vector_dim(&self) -> usize {
        if self.format.is_rowwise() {
            self.num_col
        } else {
            self.num_row
        }
    }

    pub fn num_nz(&self) -> usize {
        self.start.get(self.num_vectors()).copied().unwrap_or(0)
    }

    pub fn is_colwise(&self) -> bool {
        self.format == MatrixFormat::Colwise
    }

    pub fn is_rowwise(&self) -> bool {
        self.format.is_rowwise()
    }

    /// Check the compressed layout: start length and monotonicity, the
    /// closing offset, and partition ends. Index ranges are not checked here.
    pub fn validate_shape(&self) -> Result<(), HighsError> {
        let num_vectors = self.num_vectors();
        if self.start.len() != num_vectors + 1 {
            return Err(HighsError::LengthMismatch {
                what: "matrix start",
                expected: num_vectors + 1,
                got: self.start.len(),
            });
        }
        if self.start[0] != 0 {
            return Err(HighsError::InvalidStart {
                reason: format!("start[0] is {} rather than 0", self.start[0]),
            });
        }
        if let Some(pos) = self.start.windows(2).position(|w| w[0] > w[1]) {
            return Err(HighsError::InvalidStart {
                reason: format!(
                    "start[{}] = {} exceeds start[{}] = {}",
                    pos,
                    self.start[pos],
                    pos + 1,
                    self.start[pos + 1]
                ),
            });
        }
        let num_nz = self.start[num_vectors];
        if self.index.len() != num_nz {
            return Err(HighsError::LengthMismatch {
                what: "matrix index",
                expected: num_nz,
                got: self.index.len(),
            });
        }
        if self.value.len() != num_nz {
            return Err(HighsError::LengthMismatch {
                what: "matrix value",
                expected: num_nz,
                got: self.value.len(),
            });
        }
        if self.format == MatrixFormat::RowwisePartitioned {
            if self.p_end.len() != num_vectors {
                return Err(HighsError::LengthMismatch {
                    what: "matrix p_end",
                    expected: num_vectors,
                    got: self.p_end.len(),
                });
            }
            for (row, &end) in self.p_end.iter().enumerate() {
                if end < self.start[row] || end > self.start[row + 1] {
                    return Err(HighsError::InvalidStart {
                        reason: format!("p_end[{}] = {} outside its row", row, end),
                    });
                }
            }
        }
        Ok(())
    }

    /// Convert to column-wise storage in place.
    pub fn ensure_colwise(&mut self) {
        if self.is_colwise() {
            return;
        }
        let transposed = self.transposed();
        self.format = MatrixFormat::Colwise;
        self.install(transposed);
    }

    /// Convert to (unpartitioned) row-wise storage in place.
    pub fn ensure_rowwise(&mut self) {
        match self.format {
            MatrixFormat::Rowwise => {}
            MatrixFormat::RowwisePartitioned => {
                self.format = MatrixFormat::Rowwise;
                self.p_end.clear();
            }
            MatrixFormat::Colwise => {
                let transposed = self.transposed();
                self.format = MatrixFormat::Rowwise;
                self.install(transposed);
            }
        }
    }

    fn transposed(&self) -> Transposed {
        transposer(self.index.len()).transpose(CompressedView {
            num_vectors: self.num_vectors(),
            num_targets: self.vector_dim(),
            start: &self.start,
            index: &self.index,
            value: &self.value,
        })
    }

    fn install(&mut self, transposed: Transposed) {
        self.start = transposed.start;
        self.index = transposed.index;
        self.value = transposed.value;
        self.p_end.clear();
    }

    /// Append column-wise vectors. `block` must hold `num_row`-dimensional
    /// columns; the matrix is converted to column-wise storage first.
    pub fn add_cols(&mut self, block: &HighsSparseMatrix) {
        self.ensure_colwise();
        let offset = self.index.len();
        self.start
            .extend(block.start.iter().skip(1).map(|&s| s + offset));
        self.index.extend_from_slice(&block.index);
        self.value.extend_from_slice(&block.value);
        self.num_col += block.num_col;
    }

    /// Append row-wise vectors. `block` must hold `num_col`-dimensional rows;
    /// the matrix stays column-wise.
    pub fn add_rows(&mut self, block: &HighsSparseMatrix) {
        self.ensure_colwise();
        let new_cols = transposer(block.index.len()).transpose(CompressedView {
            num_vectors: block.num_row,
            num_targets: self.num_col,
            start: &block.start,
            index: &block.index,
            value: &block.value,
        });

        let num_nz = self.index.len() + new_cols.index.len();
        let mut start = Vec::with_capacity(self.num_col + 1);
        let mut index = Vec::with_capacity(num_nz);
        let mut value = Vec::with_capacity(num_nz);
        start.push(0);
        for col in 0..self.num_col {
            let old = self.start[col]..self.start[col + 1];
            index.extend_from_slice(&self.index[old.clone()]);
            value.extend_from_slice(&self.value[old]);
            let new = new_cols.start[col]..new_cols.start[col + 1];
            index.extend(new_cols.index[new.clone()].iter().map(|&r| r + self.num_row));
            value.extend_from_slice(&new_cols.value[new]);
            start.push(index.len());
        }
        self.start = start;
        self.index = index;
        self.value = value;
        self.num_row += block.num_row;
    }

    /// Remove the columns flagged in `mask` (length `num_col`).
    pub fn delete_cols(&mut self, mask: &[bool]) {
        self.ensure_colwise();
        let mut start = vec![0];
        let mut index = Vec::new();
        let mut value = Vec::new();
        for col in 0..self.num_col {
            if mask[col] {
                continue;
            }
            let range = self.start[col]..self.start[col + 1];
            index.extend_from_slice(&self.index[range.clone()]);
            value.extend_from_slice(&self.value[range]);
            start.push(index.len());
        }
        self.num_col = start.len() - 1;
        self.start = start;
        self.index = index;
        self.value = value;
    }

    /// Remove the rows flagged in `mask` (length `num_row`) and renumber the
    /// remaining ones.
    pub fn delete_rows(&mut self, mask: &[bool]) {
        self.ensure_colwise();
        let mut new_index = Vec::with_capacity(self.num_row);
        let mut kept = 0;
        for &deleted in mask {
            new_index.push(kept);
            if !deleted {
                kept += 1;
            }
        }

        let mut start = vec![0];
        let mut index = Vec::new();
        let mut value = Vec::new();
        for col in 0..self.num_col {
            for el in self.start[col]..self.start[col + 1] {
                let row = self.index[el];
                if !mask[row] {
                    index.push(new_index[row]);
                    value.push(self.value[el]);
                }
            }
            start.push(index.len());
        }
        self.num_row = kept;
        self.start = start;
        self.index = index;
        self.value = value;
    }

    fn find(&self, row: usize, col: usize) -> Option<usize> {
        let (vector, target) = if self.is_rowwise() {
            (row, col)
        } else {
            (col, row)
        };
        (self.start[vector]..self.start[vector + 1]).find(|&el| self.index[el] == target)
    }

    /// Coefficient at (`row`, `col`); structural zeros read as 0.
    pub fn get_coeff(&self, row: usize, col: usize) -> Result<f64, HighsError> {
        self.check_entry(row, col)?;
        Ok(self.find(row, col).map_or(0.0, |el| self.value[el]))
    }

    /// Set the coefficient at (`row`, `col`). A zero value removes the entry.
    pub fn change_coeff(&mut self, row: usize, col: usize, value: f64) -> Result<(), HighsError> {
        self.check_entry(row, col)?;
        self.ensure_colwise();
        match self.find(row, col) {
            Some(el) if value == 0.0 => {
                self.index.remove(el);
                self.value.remove(el);
                for s in &mut self.start[col + 1..] {
                    *s -= 1;
                }
            }
            Some(el) => self.value[el] = value,
            None if value == 0.0 => {}
            None => {
                let el = self.start[col + 1];
                self.index.insert(el, row);
                self.value.insert(el, value);
                for s in &mut self.start[col + 1..] {
                    *s += 1;
                }
            }
        }
        Ok(())
    }

    fn check_entry(&self, row: usize, col: usize) -> Result<(), HighsError> {
        if row >= self.num_row {
            return Err(HighsError::IndexOutOfRange {
                kind: "row",
                index: row,
                len: self.num_row,
            });
        }
        if col >= self.num_col {
            return Err(HighsError::IndexOutOfRange {
                kind: "column",
                index: col,
                len: self.num_col,
            });
        }
        Ok(())
    }

    /// Entries of column `col` as (row indices, values).
    pub fn col_entries(&self, col: usize) -> (Vec<usize>, Vec<f64>) {
        if self.is_colwise() {
            let range = self.start[col]..self.start[col + 1];
            return (self.index[range.clone()].to_vec(), self.value[range].to_vec());
        }
        self.scan(col)
    }

    /// Entries of row `row` as (column indices, values).
    pub fn row_entries(&self, row: usize) -> (Vec<usize>, Vec<f64>) {
        if self.is_rowwise() {
            let range = self.start[row]..self.start[row + 1];
            return (self.index[range.clone()].to_vec(), self.value[range].to_vec());
        }
        self.scan(row)
    }

    fn scan(&self, target: usize) -> (Vec<usize>, Vec<f64>) {
        let mut index = Vec::new();
        let mut value = Vec::new();
        for vector in 0..self.num_vectors() {
            for el in self.start[vector]..self.start[vector + 1] {
                if self.index[el] == target {
                    index.push(vector);
                    value.push(self.value[el]);
                }
            }
        }
        (index, value)
    }

    /// Row activities `A x` for a column vector `x` of length `num_col`.
    pub fn product(&self, x: &[f64]) -> Vec<f64> {
        let mut result = vec![0.0; self.num_row];
        for vector in 0..self.num_vectors() {
            for el in self.start[vector]..self.start[vector + 1] {
                if self.is_rowwise() {
                    result[vector] += self.value[el] * x[self.index[el]];
                } else {
                    result[self.index[el]] += self.value[el] * x[vector];
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // [1 0 2]
    // [0 3 4]
    fn sample() -> HighsSparseMatrix {
        HighsSparseMatrix::from_parts(
            MatrixFormat::Colwise,
            3,
            2,
            vec![0, 1, 2, 4],
            vec![0, 1, 0, 1],
            vec![1.0, 3.0, 2.0, 4.0],
        )
    }

    #[test]
    fn test_default_is_empty_colwise() {
        let matrix = HighsSparseMatrix::new();
        assert!(matrix.is_colwise());
        assert_eq!(matrix.start, vec![0]);
        assert_eq!(matrix.num_nz(), 0);
        assert!(matrix.validate_shape().is_ok());
    }

    #[test]
    fn test_from_vectors_closes_start() {
        let matrix = HighsSparseMatrix::from_vectors(
            MatrixFormat::Colwise,
            3,
            2,
            &[0, 1, 2],
            &[0, 1, 0, 1],
            &[1.0, 3.0, 2.0, 4.0],
        );
        assert_eq!(matrix, sample());

        let bad = HighsSparseMatrix::from_vectors(MatrixFormat::Colwise, 2, 2, &[0], &[], &[]);
        assert!(bad.validate_shape().is_err());
    }

    #[test]
    fn test_validate_shape_errors() {
        let mut matrix = sample();
        matrix.start = vec![0, 2, 1, 4];
        assert_eq!(
            matrix.validate_shape().map_err(|e| e.code()),
            Err("MATRIX_INVALID_START")
        );

        let mut matrix = sample();
        matrix.value.pop();
        assert_eq!(
            matrix.validate_shape().map_err(|e| e.code()),
            Err("LENGTH_MISMATCH")
        );

        let mut matrix = sample();
        matrix.start[0] = 1;
        assert!(matrix.validate_shape().is_err());
    }

    #[test]
    fn test_orientation_round_trip() {
        let mut matrix = sample();
        matrix.ensure_rowwise();
        assert_eq!(matrix.format, MatrixFormat::Rowwise);
        assert_eq!(matrix.start, vec![0, 2, 4]);
        assert_eq!(matrix.index, vec![0, 2, 1, 2]);
        assert_eq!(matrix.value, vec![1.0, 2.0, 3.0, 4.0]);

        matrix.ensure_colwise();
        assert_eq!(matrix, sample());
    }

    #[test]
    fn test_large_matrix_orientation_round_trip() {
        let n = PARALLEL_MIN_NZ;
        let num_nz = 2 * n - 1;
        // Column j holds rows j and j + 1; the last column only row n - 1.
        let mut matrix = HighsSparseMatrix::from_parts(
            MatrixFormat::Colwise,
            n,
            n,
            (0..=n).map(|j| (2 * j).min(num_nz)).collect(),
            (0..n).flat_map(|j| [j, j + 1]).take(num_nz).collect(),
            (0..n).flat_map(|_| [1.0, -1.0]).take(num_nz).collect(),
        );
        let original = matrix.clone();
        matrix.ensure_rowwise();
        assert_eq!(matrix.start[n], num_nz);
        assert_eq!(&matrix.index[..3], &[0, 0, 1]);
        assert_eq!(&matrix.value[..3], &[1.0, -1.0, 1.0]);
        matrix.ensure_colwise();
        assert_eq!(matrix, original);
    }

    #[test]
    fn test_partitioned_to_colwise() {
        let mut matrix = sample();
        matrix.ensure_rowwise();
        matrix.format = MatrixFormat::RowwisePartitioned;
        matrix.p_end = vec![1, 3];
        assert!(matrix.validate_shape().is_ok());
        matrix.ensure_colwise();
        assert_eq!(matrix, sample());
    }

    #[test]
    fn test_add_rows_and_cols() {
        let mut matrix = sample();
        let row = HighsSparseMatrix::from_parts(
            MatrixFormat::Rowwise,
            3,
            1,
            vec![0, 2],
            vec![1, 2],
            vec![5.0, 6.0],
        );
        matrix.add_rows(&row);
        assert_eq!(matrix.num_row, 3);
        assert_eq!(matrix.get_coeff(2, 1), Ok(5.0));
        assert_eq!(matrix.get_coeff(2, 2), Ok(6.0));
        assert_eq!(matrix.get_coeff(2, 0), Ok(0.0));

        let col = HighsSparseMatrix::from_parts(
            MatrixFormat::Colwise,
            1,
            3,
            vec![0, 1],
            vec![2],
            vec![7.0],
        );
        matrix.add_cols(&col);
        assert_eq!(matrix.num_col, 4);
        assert_eq!(matrix.get_coeff(2, 3), Ok(7.0));
        assert!(matrix.validate_shape().is_ok());
    }

    #[test]
    fn test_delete_rows_renumbers() {
        let mut matrix = sample();
        matrix.delete_rows(&[true, false]);
        assert_eq!(matrix.num_row, 1);
        assert_eq!(matrix.start, vec![0, 0, 1, 2]);
        assert_eq!(matrix.index, vec![0, 0]);
        assert_eq!(matrix.value, vec![3.0, 4.0]);
    }

    #[test]
    fn test_delete_cols() {
        let mut matrix = sample();
        matrix.delete_cols(&[false, true, false]);
        assert_eq!(matrix.num_col, 2);
        assert_eq!(matrix.start, vec![0, 1, 3]);
        assert_eq!(matrix.value, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_change_coeff_insert_update_remove() {
        let mut matrix = sample();
        matrix.change_coeff(1, 0, 9.0).unwrap();
        assert_eq!(matrix.get_coeff(1, 0), Ok(9.0));
        assert_eq!(matrix.num_nz(), 5);

        matrix.change_coeff(0, 2, -1.0).unwrap();
        assert_eq!(matrix.get_coeff(0, 2), Ok(-1.0));

        matrix.change_coeff(1, 1, 0.0).unwrap();
        assert_eq!(matrix.get_coeff(1, 1), Ok(0.0));
        assert_eq!(matrix.num_nz(), 4);
        assert!(matrix.validate_shape().is_ok());
    }

    #[test]
    fn test_coeff_out_of_range() {
        let mut matrix = sample();
        assert!(matrix.get_coeff(2, 0).is_err());
        assert!(matrix.change_coeff(0, 3, 1.0).is_err());
    }

    #[test]
    fn test_entries_and_product() {
        let matrix = sample();
        assert_eq!(matrix.row_entries(1), (vec![1, 2], vec![3.0, 4.0]));
        assert_eq!(matrix.col_entries(2), (vec![0, 1], vec![2.0, 4.0]));
        assert_eq!(matrix.product(&[1.0, 1.0, 1.0]), vec![3.0, 7.0]);

        let mut rowwise = sample();
        rowwise.ensure_rowwise();
        assert_eq!(rowwise.col_entries(2), (vec![0, 1], vec![2.0, 4.0]));
        assert_eq!(rowwise.product(&[1.0, 2.0, 0.0]), vec![1.0, 6.0]);
    }
}
