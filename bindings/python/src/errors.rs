//! The `HighsError` exception.
//!
//! Solver methods keep the HiGHS convention and report rejected input as
//! `HighsStatus.kError`. The exception is raised only where no status can be
//! returned: malformed arguments and failures to create a solver instance.

use highspy_native::NativeError;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;
use tracing::error;

use crate::enums::PyHighsStatus;

pyo3::create_exception!(
    highspy,
    HighsError,
    PyException,
    "Raised when arguments cannot be converted or the solver cannot be created."
);

/// Convert a native error into a `HighsError` carrying its code.
pub fn native_error_to_py(err: &NativeError) -> PyErr {
    HighsError::new_err((err.to_string(), err.code()))
}

pub fn argument_error(operation: &str, message: impl Into<String>) -> PyErr {
    let message = message.into();
    error!(
        component = "python",
        operation = operation,
        status = "error",
        "{}",
        message
    );
    HighsError::new_err((message, "ARGUMENT_INVALID"))
}

/// Map a handle result to the status returned to Python, logging rejections.
pub fn status_of(operation: &str, result: Result<highspy_core::HighsStatus, NativeError>) -> PyHighsStatus {
    match result {
        Ok(status) => status.into(),
        Err(err) => {
            error!(
                component = "python",
                operation = operation,
                status = "error",
                code = err.code(),
                "{}",
                err
            );
            PyHighsStatus::Error
        }
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("HighsError", m.py().get_type::<HighsError>())?;
    Ok(())
}
