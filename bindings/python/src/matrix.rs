//! `HighsSparseMatrix` and `HighsHessian` value classes.

use highspy_core::{HighsHessian, HighsSparseMatrix};
use pyo3::prelude::*;

use crate::enums::{PyHessianFormat, PyMatrixFormat};

/// Compressed sparse matrix; attributes carry a trailing underscore.
#[pyclass(name = "HighsSparseMatrix")]
#[derive(Debug, Clone)]
pub struct PyHighsSparseMatrix {
    #[pyo3(get, set, name = "format_")]
    pub format: PyMatrixFormat,
    #[pyo3(get, set, name = "num_col_")]
    pub num_col: usize,
    #[pyo3(get, set, name = "num_row_")]
    pub num_row: usize,
    #[pyo3(get, set, name = "start_")]
    pub start: Vec<usize>,
    #[pyo3(get, set, name = "p_end_")]
    pub p_end: Vec<usize>,
    #[pyo3(get, set, name = "index_")]
    pub index: Vec<usize>,
    #[pyo3(get, set, name = "value_")]
    pub value: Vec<f64>,
}

#[pymethods]
impl PyHighsSparseMatrix {
    #[new]
    fn new() -> Self {
        Self::from(&HighsSparseMatrix::new())
    }

    fn __repr__(&self) -> String {
        format!(
            "HighsSparseMatrix(format={:?}, num_col={}, num_row={}, num_nz={})",
            self.format,
            self.num_col,
            self.num_row,
            self.index.len()
        )
    }
}

impl From<&HighsSparseMatrix> for PyHighsSparseMatrix {
    fn from(matrix: &HighsSparseMatrix) -> Self {
        PyHighsSparseMatrix {
            format: matrix.format.into(),
            num_col: matrix.num_col,
            num_row: matrix.num_row,
            start: matrix.start.clone(),
            p_end: matrix.p_end.clone(),
            index: matrix.index.clone(),
            value: matrix.value.clone(),
        }
    }
}

impl From<&PyHighsSparseMatrix> for HighsSparseMatrix {
    fn from(matrix: &PyHighsSparseMatrix) -> Self {
        HighsSparseMatrix {
            format: matrix.format.into(),
            num_col: matrix.num_col,
            num_row: matrix.num_row,
            start: matrix.start.clone(),
            p_end: matrix.p_end.clone(),
            index: matrix.index.clone(),
            value: matrix.value.clone(),
        }
    }
}

#[pyclass(name = "HighsHessian")]
#[derive(Debug, Clone)]
pub struct PyHighsHessian {
    #[pyo3(get, set, name = "dim_")]
    pub dim: usize,
    #[pyo3(get, set, name = "format_")]
    pub format: PyHessianFormat,
    #[pyo3(get, set, name = "start_")]
    pub start: Vec<usize>,
    #[pyo3(get, set, name = "index_")]
    pub index: Vec<usize>,
    #[pyo3(get, set, name = "value_")]
    pub value: Vec<f64>,
}

#[pymethods]
#[allow(non_snake_case)]
impl PyHighsHessian {
    #[new]
    fn new() -> Self {
        Self::from(&HighsHessian::new())
    }

    fn numNz(&self) -> usize {
        HighsHessian::from(self).num_nz()
    }

    fn __repr__(&self) -> String {
        format!(
            "HighsHessian(dim={}, format={:?}, num_nz={})",
            self.dim,
            self.format,
            self.index.len()
        )
    }
}

impl From<&HighsHessian> for PyHighsHessian {
    fn from(hessian: &HighsHessian) -> Self {
        PyHighsHessian {
            dim: hessian.dim,
            format: hessian.format.into(),
            start: hessian.start.clone(),
            index: hessian.index.clone(),
            value: hessian.value.clone(),
        }
    }
}

impl From<&PyHighsHessian> for HighsHessian {
    fn from(hessian: &PyHighsHessian) -> Self {
        HighsHessian {
            dim: hessian.dim,
            format: hessian.format.into(),
            start: hessian.start.clone(),
            index: hessian.index.clone(),
            value: hessian.value.clone(),
        }
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHighsSparseMatrix>()?;
    m.add_class::<PyHighsHessian>()?;
    Ok(())
}
