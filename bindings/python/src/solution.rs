//! `HighsSolution`, `HighsBasis` and `HighsInfo` result classes.

use highspy_core::{HighsBasis, HighsInfo, HighsSolution};
use pyo3::prelude::*;

use crate::enums::{PyBasisValidity, PyHighsBasisStatus, PySolutionStatus};

#[pyclass(name = "HighsSolution")]
#[derive(Debug, Clone)]
pub struct PyHighsSolution {
    #[pyo3(get, set)]
    pub value_valid: bool,
    #[pyo3(get, set)]
    pub dual_valid: bool,
    #[pyo3(get, set)]
    pub col_value: Vec<f64>,
    #[pyo3(get, set)]
    pub col_dual: Vec<f64>,
    #[pyo3(get, set)]
    pub row_value: Vec<f64>,
    #[pyo3(get, set)]
    pub row_dual: Vec<f64>,
}

#[pymethods]
impl PyHighsSolution {
    #[new]
    fn new() -> Self {
        Self::from(&HighsSolution::new())
    }

    fn __repr__(&self) -> String {
        format!(
            "HighsSolution(value_valid={}, dual_valid={}, num_col={}, num_row={})",
            self.value_valid,
            self.dual_valid,
            self.col_value.len(),
            self.row_value.len()
        )
    }
}

impl From<&HighsSolution> for PyHighsSolution {
    fn from(solution: &HighsSolution) -> Self {
        PyHighsSolution {
            value_valid: solution.value_valid,
            dual_valid: solution.dual_valid,
            col_value: solution.col_value.clone(),
            col_dual: solution.col_dual.clone(),
            row_value: solution.row_value.clone(),
            row_dual: solution.row_dual.clone(),
        }
    }
}

impl From<&PyHighsSolution> for HighsSolution {
    fn from(solution: &PyHighsSolution) -> Self {
        HighsSolution {
            value_valid: solution.value_valid,
            dual_valid: solution.dual_valid,
            col_value: solution.col_value.clone(),
            col_dual: solution.col_dual.clone(),
            row_value: solution.row_value.clone(),
            row_dual: solution.row_dual.clone(),
        }
    }
}

#[pyclass(name = "HighsBasis")]
#[derive(Debug, Clone)]
pub struct PyHighsBasis {
    #[pyo3(get, set)]
    pub valid: bool,
    #[pyo3(get, set)]
    pub alien: bool,
    #[pyo3(get, set)]
    pub was_alien: bool,
    #[pyo3(get, set)]
    pub debug_id: i32,
    #[pyo3(get, set)]
    pub debug_update_count: i32,
    #[pyo3(get, set)]
    pub debug_origin_name: String,
    #[pyo3(get, set)]
    pub col_status: Vec<PyHighsBasisStatus>,
    #[pyo3(get, set)]
    pub row_status: Vec<PyHighsBasisStatus>,
}

#[pymethods]
impl PyHighsBasis {
    #[new]
    fn new() -> Self {
        Self::from(&HighsBasis::new())
    }
}

impl From<&HighsBasis> for PyHighsBasis {
    fn from(basis: &HighsBasis) -> Self {
        PyHighsBasis {
            valid: basis.valid,
            alien: basis.alien,
            was_alien: basis.was_alien,
            debug_id: basis.debug_id,
            debug_update_count: basis.debug_update_count,
            debug_origin_name: basis.debug_origin_name.clone(),
            col_status: basis.col_status.iter().map(|&s| s.into()).collect(),
            row_status: basis.row_status.iter().map(|&s| s.into()).collect(),
        }
    }
}

impl From<&PyHighsBasis> for HighsBasis {
    fn from(basis: &PyHighsBasis) -> Self {
        HighsBasis {
            valid: basis.valid,
            alien: basis.alien,
            was_alien: basis.was_alien,
            debug_id: basis.debug_id,
            debug_update_count: basis.debug_update_count,
            debug_origin_name: basis.debug_origin_name.clone(),
            col_status: basis.col_status.iter().map(|&s| s.into()).collect(),
            row_status: basis.row_status.iter().map(|&s| s.into()).collect(),
        }
    }
}

/// Read-only snapshot of the run statistics.
#[pyclass(name = "HighsInfo", frozen)]
#[derive(Debug, Clone)]
pub struct PyHighsInfo {
    #[pyo3(get)]
    pub valid: bool,
    #[pyo3(get)]
    pub mip_node_count: i64,
    #[pyo3(get)]
    pub simplex_iteration_count: i32,
    #[pyo3(get)]
    pub ipm_iteration_count: i32,
    #[pyo3(get)]
    pub qp_iteration_count: i32,
    #[pyo3(get)]
    pub crossover_iteration_count: i32,
    #[pyo3(get)]
    pub primal_solution_status: PySolutionStatus,
    #[pyo3(get)]
    pub dual_solution_status: PySolutionStatus,
    #[pyo3(get)]
    pub basis_validity: PyBasisValidity,
    #[pyo3(get)]
    pub objective_function_value: f64,
    #[pyo3(get)]
    pub mip_dual_bound: f64,
    #[pyo3(get)]
    pub mip_gap: f64,
    #[pyo3(get)]
    pub max_integrality_violation: f64,
    #[pyo3(get)]
    pub num_primal_infeasibilities: i32,
    #[pyo3(get)]
    pub max_primal_infeasibility: f64,
    #[pyo3(get)]
    pub sum_primal_infeasibilities: f64,
    #[pyo3(get)]
    pub num_dual_infeasibilities: i32,
    #[pyo3(get)]
    pub max_dual_infeasibility: f64,
    #[pyo3(get)]
    pub sum_dual_infeasibilities: f64,
}

#[pymethods]
impl PyHighsInfo {
    #[new]
    fn new() -> Self {
        Self::from(&HighsInfo::new())
    }
}

impl From<&HighsInfo> for PyHighsInfo {
    fn from(info: &HighsInfo) -> Self {
        PyHighsInfo {
            valid: info.valid,
            mip_node_count: info.mip_node_count,
            simplex_iteration_count: info.simplex_iteration_count,
            ipm_iteration_count: info.ipm_iteration_count,
            qp_iteration_count: info.qp_iteration_count,
            crossover_iteration_count: info.crossover_iteration_count,
            primal_solution_status: info.primal_solution_status.into(),
            dual_solution_status: info.dual_solution_status.into(),
            basis_validity: info.basis_validity.into(),
            objective_function_value: info.objective_function_value,
            mip_dual_bound: info.mip_dual_bound,
            mip_gap: info.mip_gap,
            max_integrality_violation: info.max_integrality_violation,
            num_primal_infeasibilities: info.num_primal_infeasibilities,
            max_primal_infeasibility: info.max_primal_infeasibility,
            sum_primal_infeasibilities: info.sum_primal_infeasibilities,
            num_dual_infeasibilities: info.num_dual_infeasibilities,
            max_dual_infeasibility: info.max_dual_infeasibility,
            sum_dual_infeasibilities: info.sum_dual_infeasibilities,
        }
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHighsSolution>()?;
    m.add_class::<PyHighsBasis>()?;
    m.add_class::<PyHighsInfo>()?;
    Ok(())
}
