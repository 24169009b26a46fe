//! The `Highs` solver handle.
//!
//! The handle keeps a Rust-owned incumbent model, stored column-wise, and
//! one native HiGHS instance. Edits are assessed and applied in Rust; the
//! model and options reach the native instance when [`Highs::run`] (or a
//! file writer) synchronizes it. Model files are parsed natively and
//! copied back into the Rust model.
//!
//! Methods follow the HiGHS calling convention and return a [`HighsStatus`]:
//! `Warning` means the input was accepted after normalization. Rejected
//! input is an `Err` and leaves the handle unchanged.

mod edit;
mod io;
mod query;
mod run;

use std::path::Path;

use highspy_core::{
    BasisValidity, HighsBasis, HighsBasisStatus, HighsInfo, HighsInfoType, HighsModel,
    HighsModelStatus, HighsOptionType, HighsOptions, HighsSolution, HighsStatus, InfoValue,
    OptionValue, SolutionStatus,
};
use tracing::debug;

use crate::error::NativeError;
use crate::ffi::{self, RawHighs};

pub use edit::{HessianArrays, ModelArrays};
pub use query::{ColsData, Entries, RowsData};

/// Outcome of a handle method: a status when accepted, an error when rejected.
pub type HighsResult = Result<HighsStatus, NativeError>;

/// Solver handle owning one native HiGHS instance.
pub struct Highs {
    raw: RawHighs,
    model: HighsModel,
    options: HighsOptions,
    model_status: HighsModelStatus,
    solution: HighsSolution,
    basis: HighsBasis,
    info: HighsInfo,
    objective_value: f64,
    run_time: f64,
    /// Solution supplied by the caller, passed as a warm start on the next run
    pending_solution: Option<HighsSolution>,
    /// Whether the native instance holds the current model and options
    native_synced: bool,
}

impl Highs {
    pub fn new() -> Result<Self, NativeError> {
        let raw = RawHighs::new()?;
        debug!(
            component = "highs",
            operation = "new",
            status = "ok",
            version = ?ffi::highs_version(),
            "Created solver handle"
        );
        Ok(Highs {
            raw,
            model: HighsModel::new(),
            options: HighsOptions::new(),
            model_status: HighsModelStatus::Notset,
            solution: HighsSolution::new(),
            basis: HighsBasis::new(),
            info: HighsInfo::new(),
            objective_value: 0.0,
            run_time: 0.0,
            pending_solution: None,
            native_synced: false,
        })
    }

    /// Clear the model and solver data and reset every option.
    pub fn clear(&mut self) -> HighsResult {
        self.options.reset();
        self.clear_model()
    }

    /// Clear the model and all solver data.
    pub fn clear_model(&mut self) -> HighsResult {
        self.model = HighsModel::new();
        self.clear_solver()
    }

    /// Clear the solution, basis, info and model status.
    pub fn clear_solver(&mut self) -> HighsResult {
        self.model_status = HighsModelStatus::Notset;
        self.solution.clear();
        self.basis.clear();
        self.info.invalidate();
        self.objective_value = 0.0;
        self.pending_solution = None;
        self.native_synced = false;
        Ok(HighsStatus::Ok)
    }

    /// Forget results after the model changed. A valid basis is kept so it
    /// can be extended or reused.
    fn model_changed(&mut self) {
        self.model_status = HighsModelStatus::Notset;
        self.solution.invalidate();
        self.info.invalidate();
        self.native_synced = false;
    }

    pub fn version(&self) -> String {
        ffi::highs_version().unwrap_or_default()
    }

    pub fn version_major(&self) -> i32 {
        ffi::version_major()
    }

    pub fn version_minor(&self) -> i32 {
        ffi::version_minor()
    }

    pub fn version_patch(&self) -> i32 {
        ffi::version_patch()
    }

    // Results

    pub fn get_model_status(&self) -> HighsModelStatus {
        self.model_status
    }

    pub fn get_solution(&self) -> &HighsSolution {
        &self.solution
    }

    pub fn get_basis(&self) -> &HighsBasis {
        &self.basis
    }

    pub fn get_info(&self) -> &HighsInfo {
        &self.info
    }

    pub fn get_info_value(&self, name: &str) -> Result<InfoValue, NativeError> {
        Ok(self.info.get_value(name)?)
    }

    pub fn get_info_type(&self, name: &str) -> Result<HighsInfoType, NativeError> {
        Ok(self.info.get_type(name)?)
    }

    pub fn get_objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn get_run_time(&self) -> f64 {
        self.run_time
    }

    /// Supply a solution to warm start the next run. Column values are
    /// required; missing row values are computed from the matrix.
    pub fn set_solution(&mut self, solution: HighsSolution) -> HighsResult {
        let lp = &self.model.lp;
        check_len("col_value", lp.num_col, solution.col_value.len())?;
        let mut solution = solution;
        if solution.row_value.is_empty() {
            solution.row_value = lp.a_matrix.product(&solution.col_value);
        }
        check_len("row_value", lp.num_row, solution.row_value.len())?;
        if !solution.col_dual.is_empty() {
            check_len("col_dual", lp.num_col, solution.col_dual.len())?;
        }
        if !solution.row_dual.is_empty() {
            check_len("row_dual", lp.num_row, solution.row_dual.len())?;
        }
        solution.value_valid = true;
        solution.dual_valid = !solution.col_dual.is_empty() && !solution.row_dual.is_empty();
        debug!(
            component = "highs",
            operation = "set_solution",
            status = "ok",
            num_col = lp.num_col,
            dual_valid = solution.dual_valid,
            objective_value = self.model.objective_value(&solution.col_value),
            "Stored warm-start solution"
        );
        self.pending_solution = Some(solution);
        Ok(HighsStatus::Ok)
    }

    /// Install a basis for the next run. It must be sized for the model and
    /// have one basic variable per row.
    pub fn set_basis(&mut self, basis: HighsBasis) -> HighsResult {
        let lp = &self.model.lp;
        check_len("col_status", lp.num_col, basis.col_status.len())?;
        check_len("row_status", lp.num_row, basis.row_status.len())?;
        if !basis.is_square() {
            return Err(NativeError::Model(highspy_core::HighsError::LengthMismatch {
                what: "basic variables",
                expected: lp.num_row,
                got: basis
                    .col_status
                    .iter()
                    .chain(&basis.row_status)
                    .filter(|&&s| s == HighsBasisStatus::Basic)
                    .count(),
            }));
        }
        self.basis = HighsBasis {
            valid: true,
            alien: false,
            was_alien: basis.alien,
            ..basis
        };
        self.info.basis_validity = BasisValidity::Valid;
        Ok(HighsStatus::Ok)
    }

    // Options

    pub fn set_option_value(&mut self, name: &str, value: impl Into<OptionValue>) -> HighsResult {
        self.options.set(name, value)?;
        self.native_synced = false;
        Ok(HighsStatus::Ok)
    }

    pub fn get_option_value(&self, name: &str) -> Result<OptionValue, NativeError> {
        Ok(self.options.get(name)?.clone())
    }

    pub fn get_option_type(&self, name: &str) -> Result<HighsOptionType, NativeError> {
        Ok(self.options.get_type(name)?)
    }

    pub fn reset_options(&mut self) -> HighsResult {
        self.options.reset();
        self.native_synced = false;
        Ok(HighsStatus::Ok)
    }

    pub fn pass_options(&mut self, options: HighsOptions) -> HighsResult {
        self.options = options;
        self.native_synced = false;
        Ok(HighsStatus::Ok)
    }

    pub fn get_options(&self) -> &HighsOptions {
        &self.options
    }

    pub fn read_options(&mut self, path: impl AsRef<Path>) -> HighsResult {
        self.options.read_file(path)?;
        self.native_synced = false;
        Ok(HighsStatus::Ok)
    }

    /// Write options to `path`; with `only_non_default` only changed ones.
    pub fn write_options(&self, path: impl AsRef<Path>, only_non_default: bool) -> HighsResult {
        self.options.write_file(path, only_non_default)?;
        Ok(HighsStatus::Ok)
    }

    // Strings

    pub fn model_status_to_string(status: HighsModelStatus) -> &'static str {
        status.as_str()
    }

    pub fn solution_status_to_string(status: SolutionStatus) -> &'static str {
        status.as_str()
    }

    pub fn basis_status_to_string(status: HighsBasisStatus) -> &'static str {
        status.as_str()
    }

    pub fn basis_validity_to_string(validity: BasisValidity) -> &'static str {
        validity.as_str()
    }
}

impl std::fmt::Debug for Highs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highs")
            .field("num_col", &self.model.lp.num_col)
            .field("num_row", &self.model.lp.num_row)
            .field("model_status", &self.model_status)
            .field("objective_value", &self.objective_value)
            .finish_non_exhaustive()
    }
}

pub(crate) fn check_len(what: &'static str, expected: usize, got: usize) -> Result<(), NativeError> {
    if expected != got {
        return Err(NativeError::Model(highspy_core::HighsError::LengthMismatch {
            what,
            expected,
            got,
        }));
    }
    Ok(())
}
