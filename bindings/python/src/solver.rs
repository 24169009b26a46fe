//! The `Highs` solver class.
//!
//! Methods keep the camelCase names and positional signatures of the HiGHS
//! bindings. Rejected input is logged and reported as `HighsStatus.kError`;
//! queries that produce a value return a `(status, value...)` tuple.

use highspy_core::{HessianFormat, HighsVarType, InfoValue, MatrixFormat, ObjSense};
use highspy_native::{HessianArrays, Highs, ModelArrays, NativeError};
use pyo3::IntoPyObjectExt;
use pyo3::prelude::*;
use pyo3::types::PyTuple;
use tracing::{debug, error};

use crate::enums::{
    PyBasisValidity, PyHessianFormat, PyHighsBasisStatus, PyHighsInfoType, PyHighsModelStatus,
    PyHighsOptionType, PyHighsStatus, PyHighsVarType, PyMatrixFormat, PyObjSense,
    PySolutionStatus,
};
use crate::errors::{argument_error, native_error_to_py, status_of};
use crate::lp::{PyHighsLp, PyHighsModel};
use crate::matrix::PyHighsHessian;
use crate::options::{PyHighsOptions, option_value_from_py, option_value_to_py};
use crate::solution::{PyHighsBasis, PyHighsInfo, PyHighsSolution};

fn check_count(operation: &str, what: &str, count: usize, len: usize) -> PyResult<()> {
    if count != len {
        return Err(argument_error(
            operation,
            format!("{what} count {count} does not match {len} supplied entries"),
        ));
    }
    Ok(())
}

/// Pair a query result with its status, substituting `fallback` on error.
fn value_of<T>(operation: &str, result: Result<T, NativeError>, fallback: T) -> (PyHighsStatus, T) {
    match result {
        Ok(value) => (PyHighsStatus::Ok, value),
        Err(err) => {
            error!(
                component = "python",
                operation = operation,
                status = "error",
                code = err.code(),
                "{}",
                err
            );
            (PyHighsStatus::Error, fallback)
        }
    }
}

fn extract_format(operation: &str, value: &Bound<'_, PyAny>) -> PyResult<MatrixFormat> {
    if let Ok(format) = value.extract::<PyMatrixFormat>() {
        return Ok(format.into());
    }
    let code: i32 = value.extract()?;
    MatrixFormat::from_code(code)
        .ok_or_else(|| argument_error(operation, format!("unknown matrix format {code}")))
}

fn extract_sense(operation: &str, value: &Bound<'_, PyAny>) -> PyResult<ObjSense> {
    if let Ok(sense) = value.extract::<PyObjSense>() {
        return Ok(sense.into());
    }
    let code: i32 = value.extract()?;
    ObjSense::from_code(code)
        .ok_or_else(|| argument_error(operation, format!("unknown objective sense {code}")))
}

/// Integrality given as `HighsVarType` members or their integer codes.
fn extract_var_types(operation: &str, value: &Bound<'_, PyAny>) -> PyResult<Vec<HighsVarType>> {
    if let Ok(types) = value.extract::<Vec<PyHighsVarType>>() {
        return Ok(types.into_iter().map(HighsVarType::from).collect());
    }
    let codes: Vec<i32> = value.extract()?;
    codes
        .into_iter()
        .map(|code| {
            HighsVarType::from_code(code)
                .ok_or_else(|| argument_error(operation, format!("unknown variable type {code}")))
        })
        .collect()
}

/// Owned LP arrays extracted from positional `passModel` arguments.
struct LpArgs {
    num_col: usize,
    num_row: usize,
    num_nz: usize,
    a_format: MatrixFormat,
    sense: ObjSense,
    offset: f64,
    col_cost: Vec<f64>,
    col_lower: Vec<f64>,
    col_upper: Vec<f64>,
    row_lower: Vec<f64>,
    row_upper: Vec<f64>,
    a_start: Vec<usize>,
    a_index: Vec<usize>,
    a_value: Vec<f64>,
    integrality: Option<Vec<HighsVarType>>,
}

impl LpArgs {
    /// `dims` is where `num_col, num_row, num_nz` begin, `[format, sense]`
    /// locate the codes, and the eight arrays start at `arrays`, after the
    /// offset. Integrality, when present, is the last argument.
    fn extract(
        operation: &str,
        args: &Bound<'_, PyTuple>,
        dims: usize,
        [format, sense]: [usize; 2],
        offset: usize,
        arrays: usize,
    ) -> PyResult<Self> {
        let last = args.len() - 1;
        let integrality = if last > arrays + 7 {
            Some(extract_var_types(operation, &args.get_item(last)?)?)
        } else {
            None
        };
        Ok(LpArgs {
            num_col: args.get_item(dims)?.extract()?,
            num_row: args.get_item(dims + 1)?.extract()?,
            num_nz: args.get_item(dims + 2)?.extract()?,
            a_format: extract_format(operation, &args.get_item(format)?)?,
            sense: extract_sense(operation, &args.get_item(sense)?)?,
            offset: args.get_item(offset)?.extract()?,
            col_cost: args.get_item(arrays)?.extract()?,
            col_lower: args.get_item(arrays + 1)?.extract()?,
            col_upper: args.get_item(arrays + 2)?.extract()?,
            row_lower: args.get_item(arrays + 3)?.extract()?,
            row_upper: args.get_item(arrays + 4)?.extract()?,
            a_start: args.get_item(arrays + 5)?.extract()?,
            a_index: args.get_item(arrays + 6)?.extract()?,
            a_value: args.get_item(arrays + 7)?.extract()?,
            integrality,
        })
    }

    fn arrays(&self) -> ModelArrays<'_> {
        ModelArrays {
            num_col: self.num_col,
            num_row: self.num_row,
            num_nz: self.num_nz,
            a_format: self.a_format,
            sense: self.sense,
            offset: self.offset,
            col_cost: &self.col_cost,
            col_lower: &self.col_lower,
            col_upper: &self.col_upper,
            row_lower: &self.row_lower,
            row_upper: &self.row_upper,
            a_start: &self.a_start,
            a_index: &self.a_index,
            a_value: &self.a_value,
            integrality: self.integrality.as_deref(),
        }
    }
}

struct HessianArgs {
    dim: usize,
    num_nz: usize,
    format: HessianFormat,
    start: Vec<usize>,
    index: Vec<usize>,
    value: Vec<f64>,
}

impl HessianArgs {
    fn arrays(&self) -> HessianArrays<'_> {
        HessianArrays {
            dim: self.dim,
            num_nz: self.num_nz,
            format: self.format,
            start: &self.start,
            index: &self.index,
            value: &self.value,
        }
    }
}

fn extract_hessian_format(operation: &str, value: &Bound<'_, PyAny>) -> PyResult<HessianFormat> {
    if let Ok(format) = value.extract::<PyHessianFormat>() {
        return Ok(format.into());
    }
    let code: i32 = value.extract()?;
    HessianFormat::from_code(code)
        .ok_or_else(|| argument_error(operation, format!("unknown Hessian format {code}")))
}

fn info_value_to_py(py: Python<'_>, value: InfoValue) -> PyResult<Py<PyAny>> {
    match value {
        InfoValue::Int(v) => v.into_py_any(py),
        InfoValue::Int64(v) => v.into_py_any(py),
        InfoValue::Double(v) => v.into_py_any(py),
    }
}

/// A HiGHS solver instance holding one model.
#[pyclass(name = "Highs", unsendable)]
pub struct PyHighs {
    inner: Highs,
}

#[pymethods]
#[allow(non_snake_case)]
impl PyHighs {
    #[new]
    fn new() -> PyResult<Self> {
        let inner = Highs::new().map_err(|err| native_error_to_py(&err))?;
        debug!(component = "python", operation = "new", status = "success");
        Ok(PyHighs { inner })
    }

    fn clear(&mut self) -> PyHighsStatus {
        status_of("clear", self.inner.clear())
    }

    fn clearModel(&mut self) -> PyHighsStatus {
        status_of("clear_model", self.inner.clear_model())
    }

    fn clearSolver(&mut self) -> PyHighsStatus {
        status_of("clear_solver", self.inner.clear_solver())
    }

    fn version(&self) -> String {
        self.inner.version()
    }

    fn versionMajor(&self) -> i32 {
        self.inner.version_major()
    }

    fn versionMinor(&self) -> i32 {
        self.inner.version_minor()
    }

    fn versionPatch(&self) -> i32 {
        self.inner.version_patch()
    }

    /// Load a model.
    ///
    /// Accepts a single `HighsModel` or `HighsLp`, the LP array form
    /// `(num_col, num_row, num_nz, a_format, sense, offset, col_cost,
    /// col_lower, col_upper, row_lower, row_upper, a_start, a_index,
    /// a_value[, integrality])`, or the QP array form `(num_col, num_row,
    /// num_nz, q_num_nz, a_format, q_format, sense, offset, col_cost,
    /// col_lower, col_upper, row_lower, row_upper, a_start, a_index, a_value,
    /// q_start, q_index, q_value, integrality)`.
    #[pyo3(signature = (*args))]
    fn passModel(&mut self, py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<PyHighsStatus> {
        const OPERATION: &str = "pass_model";
        match args.len() {
            1 => {
                let arg = args.get_item(0)?;
                if let Ok(model) = arg.extract::<PyRef<'_, PyHighsModel>>() {
                    let model = model.to_core(py);
                    return Ok(status_of(OPERATION, self.inner.pass_model(model)));
                }
                if let Ok(lp) = arg.extract::<PyRef<'_, PyHighsLp>>() {
                    let lp = lp.to_core(py);
                    return Ok(status_of(OPERATION, self.inner.pass_lp(lp)));
                }
                Err(argument_error(
                    OPERATION,
                    "expected a HighsModel or HighsLp",
                ))
            }
            14 | 15 => {
                let lp = LpArgs::extract(OPERATION, args, 0, [3, 4], 5, 6)?;
                Ok(status_of(
                    OPERATION,
                    self.inner.pass_model_arrays(lp.arrays()),
                ))
            }
            20 => {
                let lp = LpArgs::extract(OPERATION, args, 0, [4, 6], 7, 8)?;
                let hessian = HessianArgs {
                    dim: lp.num_col,
                    num_nz: args.get_item(3)?.extract()?,
                    format: extract_hessian_format(OPERATION, &args.get_item(5)?)?,
                    start: args.get_item(16)?.extract()?,
                    index: args.get_item(17)?.extract()?,
                    value: args.get_item(18)?.extract()?,
                };
                Ok(status_of(
                    OPERATION,
                    self.inner.pass_qp_arrays(lp.arrays(), hessian.arrays()),
                ))
            }
            other => Err(argument_error(
                OPERATION,
                format!("expected 1, 14, 15 or 20 arguments, got {other}"),
            )),
        }
    }

    /// Replace the Hessian: a `HighsHessian`, or the array form
    /// `(dim, num_nz, format, start, index, value)`.
    #[pyo3(signature = (*args))]
    fn passHessian(&mut self, args: &Bound<'_, PyTuple>) -> PyResult<PyHighsStatus> {
        const OPERATION: &str = "pass_hessian";
        match args.len() {
            1 => {
                let hessian = args.get_item(0)?.extract::<PyRef<'_, PyHighsHessian>>()?;
                Ok(status_of(OPERATION, self.inner.pass_hessian((&*hessian).into())))
            }
            6 => {
                let hessian = HessianArgs {
                    dim: args.get_item(0)?.extract()?,
                    num_nz: args.get_item(1)?.extract()?,
                    format: extract_hessian_format(OPERATION, &args.get_item(2)?)?,
                    start: args.get_item(3)?.extract()?,
                    index: args.get_item(4)?.extract()?,
                    value: args.get_item(5)?.extract()?,
                };
                Ok(status_of(
                    OPERATION,
                    self.inner.pass_hessian_arrays(hessian.arrays()),
                ))
            }
            other => Err(argument_error(
                OPERATION,
                format!("expected 1 or 6 arguments, got {other}"),
            )),
        }
    }

    fn passColName(&mut self, col: usize, name: &str) -> PyHighsStatus {
        status_of("pass_col_name", self.inner.pass_col_name(col, name))
    }

    fn passRowName(&mut self, row: usize, name: &str) -> PyHighsStatus {
        status_of("pass_row_name", self.inner.pass_row_name(row, name))
    }

    fn addCol(
        &mut self,
        cost: f64,
        lower: f64,
        upper: f64,
        num_new_nz: usize,
        indices: Vec<usize>,
        values: Vec<f64>,
    ) -> PyResult<PyHighsStatus> {
        check_count("add_col", "nonzero", num_new_nz, indices.len())?;
        Ok(status_of(
            "add_col",
            self.inner.add_col(cost, lower, upper, &indices, &values),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn addCols(
        &mut self,
        num_new_col: usize,
        costs: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        num_new_nz: usize,
        starts: Vec<usize>,
        indices: Vec<usize>,
        values: Vec<f64>,
    ) -> PyResult<PyHighsStatus> {
        check_count("add_cols", "column", num_new_col, costs.len())?;
        check_count("add_cols", "nonzero", num_new_nz, indices.len())?;
        Ok(status_of(
            "add_cols",
            self.inner
                .add_cols(&costs, &lower, &upper, &starts, &indices, &values),
        ))
    }

    fn addRow(
        &mut self,
        lower: f64,
        upper: f64,
        num_new_nz: usize,
        indices: Vec<usize>,
        values: Vec<f64>,
    ) -> PyResult<PyHighsStatus> {
        check_count("add_row", "nonzero", num_new_nz, indices.len())?;
        Ok(status_of(
            "add_row",
            self.inner.add_row(lower, upper, &indices, &values),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn addRows(
        &mut self,
        num_new_row: usize,
        lower: Vec<f64>,
        upper: Vec<f64>,
        num_new_nz: usize,
        starts: Vec<usize>,
        indices: Vec<usize>,
        values: Vec<f64>,
    ) -> PyResult<PyHighsStatus> {
        check_count("add_rows", "row", num_new_row, lower.len())?;
        check_count("add_rows", "nonzero", num_new_nz, indices.len())?;
        Ok(status_of(
            "add_rows",
            self.inner
                .add_rows(&lower, &upper, &starts, &indices, &values),
        ))
    }

    fn addVar(&mut self, lower: f64, upper: f64) -> PyHighsStatus {
        status_of("add_var", self.inner.add_var(lower, upper))
    }

    fn addVars(
        &mut self,
        num_new_var: usize,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> PyResult<PyHighsStatus> {
        check_count("add_vars", "variable", num_new_var, lower.len())?;
        Ok(status_of("add_vars", self.inner.add_vars(&lower, &upper)))
    }

    fn changeColCost(&mut self, col: usize, cost: f64) -> PyHighsStatus {
        status_of("change_col_cost", self.inner.change_col_cost(col, cost))
    }

    fn changeColsCost(
        &mut self,
        num_set_entries: usize,
        indices: Vec<usize>,
        cost: Vec<f64>,
    ) -> PyResult<PyHighsStatus> {
        check_count("change_cols_cost", "entry", num_set_entries, indices.len())?;
        Ok(status_of(
            "change_cols_cost",
            self.inner.change_cols_cost(&indices, &cost),
        ))
    }

    fn changeColBounds(&mut self, col: usize, lower: f64, upper: f64) -> PyHighsStatus {
        status_of(
            "change_col_bounds",
            self.inner.change_col_bounds(col, lower, upper),
        )
    }

    fn changeColsBounds(
        &mut self,
        num_set_entries: usize,
        indices: Vec<usize>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> PyResult<PyHighsStatus> {
        check_count("change_cols_bounds", "entry", num_set_entries, indices.len())?;
        Ok(status_of(
            "change_cols_bounds",
            self.inner.change_cols_bounds(&indices, &lower, &upper),
        ))
    }

    fn changeRowBounds(&mut self, row: usize, lower: f64, upper: f64) -> PyHighsStatus {
        status_of(
            "change_row_bounds",
            self.inner.change_row_bounds(row, lower, upper),
        )
    }

    fn changeColIntegrality(&mut self, col: usize, integrality: PyHighsVarType) -> PyHighsStatus {
        status_of(
            "change_col_integrality",
            self.inner.change_col_integrality(col, integrality.into()),
        )
    }

    fn changeColsIntegrality(
        &mut self,
        num_set_entries: usize,
        indices: Vec<usize>,
        integrality: &Bound<'_, PyAny>,
    ) -> PyResult<PyHighsStatus> {
        const OPERATION: &str = "change_cols_integrality";
        check_count(OPERATION, "entry", num_set_entries, indices.len())?;
        let integrality = extract_var_types(OPERATION, integrality)?;
        Ok(status_of(
            OPERATION,
            self.inner.change_cols_integrality(&indices, &integrality),
        ))
    }

    fn changeCoeff(&mut self, row: usize, col: usize, value: f64) -> PyHighsStatus {
        status_of("change_coeff", self.inner.change_coeff(row, col, value))
    }

    fn changeObjectiveSense(&mut self, sense: &Bound<'_, PyAny>) -> PyResult<PyHighsStatus> {
        let sense = extract_sense("change_objective_sense", sense)?;
        Ok(status_of(
            "change_objective_sense",
            self.inner.change_objective_sense(sense),
        ))
    }

    fn changeObjectiveOffset(&mut self, offset: f64) -> PyHighsStatus {
        status_of(
            "change_objective_offset",
            self.inner.change_objective_offset(offset),
        )
    }

    fn deleteCols(&mut self, num_set_entries: usize, indices: Vec<usize>) -> PyResult<PyHighsStatus> {
        check_count("delete_cols", "entry", num_set_entries, indices.len())?;
        Ok(status_of("delete_cols", self.inner.delete_cols(&indices)))
    }

    fn deleteVars(&mut self, num_set_entries: usize, indices: Vec<usize>) -> PyResult<PyHighsStatus> {
        check_count("delete_vars", "entry", num_set_entries, indices.len())?;
        Ok(status_of("delete_vars", self.inner.delete_vars(&indices)))
    }

    fn deleteRows(&mut self, num_set_entries: usize, indices: Vec<usize>) -> PyResult<PyHighsStatus> {
        check_count("delete_rows", "entry", num_set_entries, indices.len())?;
        Ok(status_of("delete_rows", self.inner.delete_rows(&indices)))
    }

    fn getLp(&self, py: Python<'_>) -> PyResult<PyHighsLp> {
        PyHighsLp::from_core(py, self.inner.get_lp())
    }

    fn getModel(&self, py: Python<'_>) -> PyResult<PyHighsModel> {
        PyHighsModel::from_core(py, self.inner.get_model())
    }

    fn getNumCol(&self) -> usize {
        self.inner.get_num_col()
    }

    fn getNumRow(&self) -> usize {
        self.inner.get_num_row()
    }

    fn getNumNz(&self) -> usize {
        self.inner.get_num_nz()
    }

    fn getHessianNumNz(&self) -> usize {
        self.inner.get_hessian_num_nz()
    }

    fn getObjectiveSense(&self) -> (PyHighsStatus, PyObjSense) {
        (PyHighsStatus::Ok, self.inner.get_objective_sense().into())
    }

    fn getObjectiveOffset(&self) -> (PyHighsStatus, f64) {
        (PyHighsStatus::Ok, self.inner.get_objective_offset())
    }

    fn getInfinity(&self) -> f64 {
        self.inner.get_infinity()
    }

    /// Returns `(status, cost, lower, upper, num_nz)`.
    fn getCol(&self, col: usize) -> (PyHighsStatus, f64, f64, f64, usize) {
        match self.inner.get_col(col) {
            Ok(data) => (
                PyHighsStatus::Ok,
                data.costs[0],
                data.lower[0],
                data.upper[0],
                data.num_nz,
            ),
            Err(err) => {
                let (status, ()) = value_of("get_col", Err(err), ());
                (status, 0.0, 0.0, 0.0, 0)
            }
        }
    }

    /// Returns `(status, num_col, costs, lower, upper, num_nz)`.
    fn getCols(
        &self,
        num_set_entries: usize,
        indices: Vec<usize>,
    ) -> PyResult<(PyHighsStatus, usize, Vec<f64>, Vec<f64>, Vec<f64>, usize)> {
        check_count("get_cols", "entry", num_set_entries, indices.len())?;
        let (status, data) = value_of("get_cols", self.inner.get_cols(&indices), Default::default());
        Ok((
            status,
            data.costs.len(),
            data.costs,
            data.lower,
            data.upper,
            data.num_nz,
        ))
    }

    /// Returns `(status, index, value)`.
    fn getColEntries(&self, col: usize) -> (PyHighsStatus, Vec<usize>, Vec<f64>) {
        let (status, entries) = value_of(
            "get_col_entries",
            self.inner.get_col_entries(col),
            Default::default(),
        );
        (status, entries.index, entries.value)
    }

    /// Returns `(status, start, index, value)`.
    fn getColsEntries(
        &self,
        num_set_entries: usize,
        indices: Vec<usize>,
    ) -> PyResult<(PyHighsStatus, Vec<usize>, Vec<usize>, Vec<f64>)> {
        check_count("get_cols_entries", "entry", num_set_entries, indices.len())?;
        let (status, entries) = value_of(
            "get_cols_entries",
            self.inner.get_cols_entries(&indices),
            Default::default(),
        );
        Ok((status, entries.start, entries.index, entries.value))
    }

    /// Returns `(status, lower, upper, num_nz)`.
    fn getRow(&self, row: usize) -> (PyHighsStatus, f64, f64, usize) {
        match self.inner.get_row(row) {
            Ok(data) => (PyHighsStatus::Ok, data.lower[0], data.upper[0], data.num_nz),
            Err(err) => {
                let (status, ()) = value_of("get_row", Err(err), ());
                (status, 0.0, 0.0, 0)
            }
        }
    }

    /// Returns `(status, num_row, lower, upper, num_nz)`.
    fn getRows(
        &self,
        num_set_entries: usize,
        indices: Vec<usize>,
    ) -> PyResult<(PyHighsStatus, usize, Vec<f64>, Vec<f64>, usize)> {
        check_count("get_rows", "entry", num_set_entries, indices.len())?;
        let (status, data) = value_of("get_rows", self.inner.get_rows(&indices), Default::default());
        Ok((status, data.lower.len(), data.lower, data.upper, data.num_nz))
    }

    fn getRowEntries(&self, row: usize) -> (PyHighsStatus, Vec<usize>, Vec<f64>) {
        let (status, entries) = value_of(
            "get_row_entries",
            self.inner.get_row_entries(row),
            Default::default(),
        );
        (status, entries.index, entries.value)
    }

    fn getRowsEntries(
        &self,
        num_set_entries: usize,
        indices: Vec<usize>,
    ) -> PyResult<(PyHighsStatus, Vec<usize>, Vec<usize>, Vec<f64>)> {
        check_count("get_rows_entries", "entry", num_set_entries, indices.len())?;
        let (status, entries) = value_of(
            "get_rows_entries",
            self.inner.get_rows_entries(&indices),
            Default::default(),
        );
        Ok((status, entries.start, entries.index, entries.value))
    }

    fn getCoeff(&self, row: usize, col: usize) -> (PyHighsStatus, f64) {
        value_of("get_coeff", self.inner.get_coeff(row, col), 0.0)
    }

    fn getColName(&self, col: usize) -> (PyHighsStatus, String) {
        value_of(
            "get_col_name",
            self.inner.get_col_name(col).map(str::to_string),
            String::new(),
        )
    }

    fn getColByName(&self, name: &str) -> (PyHighsStatus, usize) {
        value_of("get_col_by_name", self.inner.get_col_by_name(name), 0)
    }

    fn getRowName(&self, row: usize) -> (PyHighsStatus, String) {
        value_of(
            "get_row_name",
            self.inner.get_row_name(row).map(str::to_string),
            String::new(),
        )
    }

    fn getRowByName(&self, name: &str) -> (PyHighsStatus, usize) {
        value_of("get_row_by_name", self.inner.get_row_by_name(name), 0)
    }

    fn run(&mut self) -> PyHighsStatus {
        status_of("run", self.inner.run())
    }

    fn getModelStatus(&self) -> PyHighsModelStatus {
        self.inner.get_model_status().into()
    }

    fn getSolution(&self) -> PyHighsSolution {
        self.inner.get_solution().into()
    }

    fn getBasis(&self) -> PyHighsBasis {
        self.inner.get_basis().into()
    }

    fn getInfo(&self) -> PyHighsInfo {
        self.inner.get_info().into()
    }

    /// Returns `(status, value)` for the named info record.
    fn getInfoValue(&self, py: Python<'_>, name: &str) -> PyResult<(PyHighsStatus, Py<PyAny>)> {
        match self.inner.get_info_value(name) {
            Ok(value) => Ok((PyHighsStatus::Ok, info_value_to_py(py, value)?)),
            Err(err) => {
                let (status, ()) = value_of("get_info_value", Err(err), ());
                Ok((status, py.None()))
            }
        }
    }

    fn getInfoType(&self, name: &str) -> (PyHighsStatus, Option<PyHighsInfoType>) {
        value_of(
            "get_info_type",
            self.inner.get_info_type(name).map(|t| Some(t.into())),
            None,
        )
    }

    fn getObjectiveValue(&self) -> f64 {
        self.inner.get_objective_value()
    }

    fn getRunTime(&self) -> f64 {
        self.inner.get_run_time()
    }

    fn setSolution(&mut self, solution: PyRef<'_, PyHighsSolution>) -> PyHighsStatus {
        status_of("set_solution", self.inner.set_solution((&*solution).into()))
    }

    fn setBasis(&mut self, basis: PyRef<'_, PyHighsBasis>) -> PyHighsStatus {
        status_of("set_basis", self.inner.set_basis((&*basis).into()))
    }

    fn setOptionValue(&mut self, name: &str, value: &Bound<'_, PyAny>) -> PyResult<PyHighsStatus> {
        let value = option_value_from_py("set_option_value", value)?;
        Ok(status_of(
            "set_option_value",
            self.inner.set_option_value(name, value),
        ))
    }

    /// Returns `(status, value)`; the value is None for an unknown option.
    fn getOptionValue(&self, py: Python<'_>, name: &str) -> PyResult<(PyHighsStatus, Py<PyAny>)> {
        match self.inner.get_option_value(name) {
            Ok(value) => Ok((PyHighsStatus::Ok, option_value_to_py(py, value)?)),
            Err(err) => {
                let (status, ()) = value_of("get_option_value", Err(err), ());
                Ok((status, py.None()))
            }
        }
    }

    fn getOptionType(&self, name: &str) -> (PyHighsStatus, Option<PyHighsOptionType>) {
        value_of(
            "get_option_type",
            self.inner.get_option_type(name).map(|t| Some(t.into())),
            None,
        )
    }

    fn passOptions(&mut self, options: PyRef<'_, PyHighsOptions>) -> PyHighsStatus {
        status_of("pass_options", self.inner.pass_options(options.inner.clone()))
    }

    fn getOptions(&self) -> PyHighsOptions {
        PyHighsOptions {
            inner: self.inner.get_options().clone(),
        }
    }

    fn resetOptions(&mut self) -> PyHighsStatus {
        status_of("reset_options", self.inner.reset_options())
    }

    fn readOptions(&mut self, filename: &str) -> PyHighsStatus {
        status_of("read_options", self.inner.read_options(filename))
    }

    #[pyo3(signature = (filename, report_only_deviations=false))]
    fn writeOptions(&self, filename: &str, report_only_deviations: bool) -> PyHighsStatus {
        status_of(
            "write_options",
            self.inner.write_options(filename, report_only_deviations),
        )
    }

    fn readModel(&mut self, filename: &str) -> PyHighsStatus {
        status_of("read_model", self.inner.read_model(filename))
    }

    fn writeModel(&mut self, filename: &str) -> PyHighsStatus {
        status_of("write_model", self.inner.write_model(filename))
    }

    fn readSolution(&mut self, filename: &str) -> PyHighsStatus {
        status_of("read_solution", self.inner.read_solution(filename))
    }

    #[pyo3(signature = (filename, style=1))]
    fn writeSolution(&mut self, filename: &str, style: i32) -> PyHighsStatus {
        status_of("write_solution", self.inner.write_solution(filename, style))
    }

    fn readBasis(&mut self, filename: &str) -> PyHighsStatus {
        status_of("read_basis", self.inner.read_basis(filename))
    }

    fn writeBasis(&self, filename: &str) -> PyHighsStatus {
        status_of("write_basis", self.inner.write_basis(filename))
    }

    fn writeInfo(&self, filename: &str) -> PyHighsStatus {
        status_of("write_info", self.inner.write_info(filename))
    }

    #[staticmethod]
    fn modelStatusToString(status: PyHighsModelStatus) -> &'static str {
        Highs::model_status_to_string(status.into())
    }

    #[staticmethod]
    fn solutionStatusToString(status: PySolutionStatus) -> &'static str {
        Highs::solution_status_to_string(status.into())
    }

    #[staticmethod]
    fn basisStatusToString(status: PyHighsBasisStatus) -> &'static str {
        Highs::basis_status_to_string(status.into())
    }

    #[staticmethod]
    fn basisValidityToString(validity: PyBasisValidity) -> &'static str {
        Highs::basis_validity_to_string(validity.into())
    }

    fn __repr__(&self) -> String {
        format!(
            "Highs(num_col={}, num_row={}, model_status={:?})",
            self.inner.get_num_col(),
            self.inner.get_num_row(),
            self.inner.get_model_status()
        )
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHighs>()?;
    Ok(())
}
