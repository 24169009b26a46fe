//! `HighsLp` and `HighsModel`.
//!
//! Nested objects are held as Python references so that
//! `lp.a_matrix_.value_ = [...]` edits the matrix owned by `lp`.

use highspy_core::{HighsLp, HighsModel};
use pyo3::prelude::*;

use crate::enums::{PyHighsVarType, PyObjSense};
use crate::matrix::{PyHighsHessian, PyHighsSparseMatrix};

#[pyclass(name = "HighsLp")]
#[derive(Debug)]
pub struct PyHighsLp {
    #[pyo3(get, set, name = "num_col_")]
    pub num_col: usize,
    #[pyo3(get, set, name = "num_row_")]
    pub num_row: usize,
    #[pyo3(get, set, name = "col_cost_")]
    pub col_cost: Vec<f64>,
    #[pyo3(get, set, name = "col_lower_")]
    pub col_lower: Vec<f64>,
    #[pyo3(get, set, name = "col_upper_")]
    pub col_upper: Vec<f64>,
    #[pyo3(get, set, name = "row_lower_")]
    pub row_lower: Vec<f64>,
    #[pyo3(get, set, name = "row_upper_")]
    pub row_upper: Vec<f64>,
    #[pyo3(get, set, name = "a_matrix_")]
    pub a_matrix: Py<PyHighsSparseMatrix>,
    #[pyo3(get, set, name = "sense_")]
    pub sense: PyObjSense,
    #[pyo3(get, set, name = "offset_")]
    pub offset: f64,
    #[pyo3(get, set, name = "model_name_")]
    pub model_name: String,
    #[pyo3(get, set, name = "col_names_")]
    pub col_names: Vec<String>,
    #[pyo3(get, set, name = "row_names_")]
    pub row_names: Vec<String>,
    #[pyo3(get, set, name = "integrality_")]
    pub integrality: Vec<PyHighsVarType>,
}

#[pymethods]
impl PyHighsLp {
    #[new]
    fn new(py: Python<'_>) -> PyResult<Self> {
        Self::from_core(py, &HighsLp::new())
    }

    fn __repr__(&self) -> String {
        format!(
            "HighsLp(num_col={}, num_row={}, sense={:?})",
            self.num_col, self.num_row, self.sense
        )
    }
}

impl PyHighsLp {
    pub fn from_core(py: Python<'_>, lp: &HighsLp) -> PyResult<Self> {
        Ok(PyHighsLp {
            num_col: lp.num_col,
            num_row: lp.num_row,
            col_cost: lp.col_cost.clone(),
            col_lower: lp.col_lower.clone(),
            col_upper: lp.col_upper.clone(),
            row_lower: lp.row_lower.clone(),
            row_upper: lp.row_upper.clone(),
            a_matrix: Py::new(py, PyHighsSparseMatrix::from(&lp.a_matrix))?,
            sense: lp.sense.into(),
            offset: lp.offset,
            model_name: lp.model_name.clone(),
            col_names: lp.col_names.clone(),
            row_names: lp.row_names.clone(),
            integrality: lp.integrality.iter().map(|&v| v.into()).collect(),
        })
    }

    pub fn to_core(&self, py: Python<'_>) -> HighsLp {
        let a_matrix = self.a_matrix.borrow(py);
        HighsLp {
            num_col: self.num_col,
            num_row: self.num_row,
            col_cost: self.col_cost.clone(),
            col_lower: self.col_lower.clone(),
            col_upper: self.col_upper.clone(),
            row_lower: self.row_lower.clone(),
            row_upper: self.row_upper.clone(),
            a_matrix: (&*a_matrix).into(),
            sense: self.sense.into(),
            offset: self.offset,
            model_name: self.model_name.clone(),
            col_names: self.col_names.clone(),
            row_names: self.row_names.clone(),
            integrality: self.integrality.iter().map(|&v| v.into()).collect(),
        }
    }
}

/// An LP together with an optional Hessian.
#[pyclass(name = "HighsModel")]
#[derive(Debug)]
pub struct PyHighsModel {
    #[pyo3(get, set, name = "lp_")]
    pub lp: Py<PyHighsLp>,
    #[pyo3(get, set, name = "hessian_")]
    pub hessian: Py<PyHighsHessian>,
}

#[pymethods]
impl PyHighsModel {
    #[new]
    fn new(py: Python<'_>) -> PyResult<Self> {
        Self::from_core(py, &HighsModel::new())
    }
}

impl PyHighsModel {
    pub fn from_core(py: Python<'_>, model: &HighsModel) -> PyResult<Self> {
        Ok(PyHighsModel {
            lp: Py::new(py, PyHighsLp::from_core(py, &model.lp)?)?,
            hessian: Py::new(py, PyHighsHessian::from(&model.hessian))?,
        })
    }

    pub fn to_core(&self, py: Python<'_>) -> HighsModel {
        let lp = self.lp.borrow(py).to_core(py);
        let hessian = (&*self.hessian.borrow(py)).into();
        HighsModel { lp, hessian }
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHighsLp>()?;
    m.add_class::<PyHighsModel>()?;
    Ok(())
}
