//! Read access to the incumbent model.

use highspy_core::{HighsError, HighsLp, HighsModel, ObjSense, kHighsInf};

use super::Highs;
use crate::error::NativeError;

/// Cost, bounds and nonzero count of a set of columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColsData {
    pub costs: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub num_nz: usize,
}

/// Bounds and nonzero count of a set of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowsData {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub num_nz: usize,
}

/// Matrix entries of a set of vectors; vector `k` owns
/// `index[start[k]..start[k + 1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entries {
    pub start: Vec<usize>,
    pub index: Vec<usize>,
    pub value: Vec<f64>,
}

impl Default for Entries {
    fn default() -> Self {
        Self {
            start: vec![0],
            index: Vec::new(),
            value: Vec::new(),
        }
    }
}

impl Entries {
    fn push(&mut self, (index, value): (Vec<usize>, Vec<f64>)) {
        self.index.extend(index);
        self.value.extend(value);
        self.start.push(self.index.len());
    }

    pub fn num_nz(&self) -> usize {
        self.index.len()
    }
}

fn check_indices(kind: &'static str, indices: &[usize], len: usize) -> Result<(), NativeError> {
    match indices.iter().find(|&&index| index >= len) {
        Some(&index) => Err(HighsError::IndexOutOfRange { kind, index, len }.into()),
        None => Ok(()),
    }
}

fn find_name(names: &[String], kind: &'static str, name: &str) -> Result<usize, NativeError> {
    names
        .iter()
        .position(|existing| existing == name)
        .ok_or_else(|| {
            HighsError::UnknownName {
                kind,
                name: name.to_string(),
            }
            .into()
        })
}

impl Highs {
    pub fn get_lp(&self) -> &HighsLp {
        &self.model.lp
    }

    pub fn get_model(&self) -> &HighsModel {
        &self.model
    }

    pub fn get_num_col(&self) -> usize {
        self.model.lp.num_col
    }

    pub fn get_num_row(&self) -> usize {
        self.model.lp.num_row
    }

    pub fn get_num_nz(&self) -> usize {
        self.model.lp.a_matrix.num_nz()
    }

    pub fn get_hessian_num_nz(&self) -> usize {
        self.model.hessian.num_nz()
    }

    pub fn get_objective_sense(&self) -> ObjSense {
        self.model.lp.sense
    }

    pub fn get_objective_offset(&self) -> f64 {
        self.model.lp.offset
    }

    pub fn get_infinity(&self) -> f64 {
        kHighsInf
    }

    pub fn get_col(&self, col: usize) -> Result<ColsData, NativeError> {
        self.get_cols(&[col])
    }

    pub fn get_cols(&self, indices: &[usize]) -> Result<ColsData, NativeError> {
        let lp = &self.model.lp;
        check_indices("column", indices, lp.num_col)?;
        Ok(ColsData {
            costs: indices.iter().map(|&c| lp.col_cost[c]).collect(),
            lower: indices.iter().map(|&c| lp.col_lower[c]).collect(),
            upper: indices.iter().map(|&c| lp.col_upper[c]).collect(),
            num_nz: indices
                .iter()
                .map(|&c| lp.a_matrix.start[c + 1] - lp.a_matrix.start[c])
                .sum(),
        })
    }

    pub fn get_col_entries(&self, col: usize) -> Result<Entries, NativeError> {
        self.get_cols_entries(&[col])
    }

    pub fn get_cols_entries(&self, indices: &[usize]) -> Result<Entries, NativeError> {
        let matrix = &self.model.lp.a_matrix;
        check_indices("column", indices, matrix.num_col)?;
        let mut entries = Entries::default();
        for &col in indices {
            entries.push(matrix.col_entries(col));
        }
        Ok(entries)
    }

    pub fn get_row(&self, row: usize) -> Result<RowsData, NativeError> {
        self.get_rows(&[row])
    }

    pub fn get_rows(&self, indices: &[usize]) -> Result<RowsData, NativeError> {
        let lp = &self.model.lp;
        check_indices("row", indices, lp.num_row)?;
        let entries = self.get_rows_entries(indices)?;
        Ok(RowsData {
            lower: indices.iter().map(|&r| lp.row_lower[r]).collect(),
            upper: indices.iter().map(|&r| lp.row_upper[r]).collect(),
            num_nz: entries.num_nz(),
        })
    }

    pub fn get_row_entries(&self, row: usize) -> Result<Entries, NativeError> {
        self.get_rows_entries(&[row])
    }

    /// Entries of the given rows. The matrix is column-wise, so each row is
    /// gathered by a scan.
    pub fn get_rows_entries(&self, indices: &[usize]) -> Result<Entries, NativeError> {
        let matrix = &self.model.lp.a_matrix;
        check_indices("row", indices, matrix.num_row)?;
        let mut entries = Entries::default();
        for &row in indices {
            entries.push(matrix.row_entries(row));
        }
        Ok(entries)
    }

    pub fn get_coeff(&self, row: usize, col: usize) -> Result<f64, NativeError> {
        Ok(self.model.lp.a_matrix.get_coeff(row, col)?)
    }

    pub fn get_col_name(&self, col: usize) -> Result<&str, NativeError> {
        let lp = &self.model.lp;
        check_indices("column", &[col], lp.num_col)?;
        Ok(lp.col_names.get(col).map_or("", String::as_str))
    }

    pub fn get_col_by_name(&self, name: &str) -> Result<usize, NativeError> {
        find_name(&self.model.lp.col_names, "column", name)
    }

    pub fn get_row_name(&self, row: usize) -> Result<&str, NativeError> {
        let lp = &self.model.lp;
        check_indices("row", &[row], lp.num_row)?;
        Ok(lp.row_names.get(row).map_or("", String::as_str))
    }

    pub fn get_row_by_name(&self, name: &str) -> Result<usize, NativeError> {
        find_name(&self.model.lp.row_names, "row", name)
    }
}
