//! Model, basis, solution and info files.
//!
//! Models and solutions are written by the native instance, which also
//! parses model files. Basis files, solution files and info are handled on
//! the Rust side.

use std::path::Path;

use highspy_core::{HighsBasis, HighsError, HighsSolution, HighsStatus};
use tracing::{debug, info, warn};

use super::{Highs, HighsResult};
use crate::error::NativeError;
use crate::status::call_status;

fn path_str(path: &Path) -> Result<&str, NativeError> {
    path.to_str().ok_or_else(|| NativeError::InvalidString {
        what: "path",
        value: path.display().to_string(),
    })
}

impl Highs {
    /// Read a model file; the extension selects the format. On success the
    /// file's model replaces the incumbent and solver data is cleared. On
    /// failure the incumbent is unchanged.
    pub fn read_model(&mut self, path: impl AsRef<Path>) -> HighsResult {
        let path = path.as_ref();
        self.sync_options()?;
        let read = self
            .raw
            .read_model(path_str(path)?)
            .and_then(|code| Ok((code, self.raw.model()?)));
        let (code, model) = match read {
            Ok(read) => read,
            Err(err) => {
                // The native instance may hold part of the file.
                self.native_synced = false;
                warn!(
                    component = "highs",
                    operation = "read_model",
                    status = "error",
                    path = %path.display(),
                    error = %err,
                    "Model file not read"
                );
                return Err(err);
            }
        };
        self.model = model;
        self.clear_solver()?;
        self.native_synced = true;
        info!(
            component = "highs",
            operation = "read_model",
            status = "ok",
            path = %path.display(),
            num_col = self.model.lp.num_col,
            num_row = self.model.lp.num_row,
            num_nz = self.model.lp.a_matrix.num_nz(),
            "Model read"
        );
        call_status("Highs_readModel", code as i32)
    }

    /// Write the incumbent model; the file extension selects the format.
    pub fn write_model(&mut self, path: impl AsRef<Path>) -> HighsResult {
        let path = path.as_ref();
        self.sync_native()?;
        let code = self.raw.write_model(path_str(path)?)?;
        debug!(
            component = "highs",
            operation = "write_model",
            status = "ok",
            path = %path.display(),
            "Model written"
        );
        call_status("Highs_writeModel", code as i32)
    }

    /// Write the last solution. Style 0 is the raw format and 1 the
    /// pretty format.
    pub fn write_solution(&mut self, path: impl AsRef<Path>, style: i32) -> HighsResult {
        let pretty = match style {
            0 => false,
            1 => true,
            other => {
                warn!(
                    component = "highs",
                    operation = "write_solution",
                    status = "error",
                    style = other,
                    "Unsupported solution style"
                );
                return Err(HighsError::OptionValue {
                    name: "write_solution_style".to_string(),
                    value: other.to_string(),
                }
                .into());
            }
        };
        let path = path.as_ref();
        let code = self.raw.write_solution(path_str(path)?, pretty)?;
        call_status("Highs_writeSolution", code as i32)
    }

    /// Read a solution file for the incumbent model and keep it as the
    /// warm start for the next run.
    pub fn read_solution(&mut self, path: impl AsRef<Path>) -> HighsResult {
        let path = path.as_ref();
        let (solution, status) = HighsSolution::read_file(path, &self.model.lp)?;
        if !solution.value_valid {
            warn!(
                component = "highs",
                operation = "read_solution",
                status = "warning",
                path = %path.display(),
                "Solution file has no primal values"
            );
            return Ok(HighsStatus::Warning);
        }
        self.set_solution(solution)?;
        debug!(
            component = "highs",
            operation = "read_solution",
            status = %status,
            path = %path.display(),
            "Solution read"
        );
        Ok(status)
    }

    /// Read a basis file for the incumbent model. A file recording no
    /// basis invalidates the current one.
    pub fn read_basis(&mut self, path: impl AsRef<Path>) -> HighsResult {
        let path = path.as_ref();
        let (basis, status) = HighsBasis::read_file(path, &self.model.lp)?;
        if !basis.valid {
            self.basis.invalidate();
            self.info.basis_validity = self.basis.validity();
            return Ok(status);
        }
        self.set_basis(basis)?;
        debug!(
            component = "highs",
            operation = "read_basis",
            status = %status,
            path = %path.display(),
            "Basis read"
        );
        Ok(status)
    }

    pub fn write_basis(&self, path: impl AsRef<Path>) -> HighsResult {
        self.basis.write_file(path, &self.model.lp)?;
        Ok(HighsStatus::Ok)
    }

    /// Write every info record. Info from before a run is written with a
    /// warning.
    pub fn write_info(&self, path: impl AsRef<Path>) -> HighsResult {
        self.info.write_file(path)?;
        Ok(if self.info.valid {
            HighsStatus::Ok
        } else {
            HighsStatus::Warning
        })
    }
}
