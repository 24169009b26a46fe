//! `HighsOptions`: the option registry as a Python object.
//!
//! Options are read and written as attributes (`options.time_limit = 10.0`).
//! Unknown names raise `AttributeError`; rejected values raise `HighsError`.

use highspy_core::{HighsOptions, OptionValue};
use highspy_native::NativeError;
use pyo3::IntoPyObjectExt;
use pyo3::exceptions::PyAttributeError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyString};

use crate::errors::{argument_error, native_error_to_py};

pub fn option_value_from_py(operation: &str, value: &Bound<'_, PyAny>) -> PyResult<OptionValue> {
    // bool is checked first: Python booleans are also ints.
    if value.is_instance_of::<PyBool>() {
        return Ok(OptionValue::Bool(value.extract()?));
    }
    if value.is_instance_of::<PyInt>() {
        return Ok(OptionValue::Int(value.extract()?));
    }
    if value.is_instance_of::<PyFloat>() {
        return Ok(OptionValue::Double(value.extract()?));
    }
    if value.is_instance_of::<PyString>() {
        return Ok(OptionValue::String(value.extract()?));
    }
    Err(argument_error(
        operation,
        "option values must be bool, int, float or str",
    ))
}

pub fn option_value_to_py(py: Python<'_>, value: OptionValue) -> PyResult<Py<PyAny>> {
    match value {
        OptionValue::Bool(v) => v.into_py_any(py),
        OptionValue::Int(v) => v.into_py_any(py),
        OptionValue::Double(v) => v.into_py_any(py),
        OptionValue::String(v) => v.into_py_any(py),
    }
}

fn unknown_option(name: &str) -> PyErr {
    PyAttributeError::new_err(format!("'HighsOptions' has no option '{name}'"))
}

#[pyclass(name = "HighsOptions")]
#[derive(Debug, Clone, Default)]
pub struct PyHighsOptions {
    pub inner: HighsOptions,
}

#[pymethods]
#[allow(non_snake_case)]
impl PyHighsOptions {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    fn __getattr__(&self, py: Python<'_>, name: &str) -> PyResult<Py<PyAny>> {
        let value = self.inner.get(name).map_err(|_| unknown_option(name))?;
        option_value_to_py(py, value.clone())
    }

    fn __setattr__(&mut self, name: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        if self.inner.get(name).is_err() {
            return Err(unknown_option(name));
        }
        let value = option_value_from_py("options_set", value)?;
        self.inner
            .set(name, value)
            .map_err(|err| native_error_to_py(&NativeError::from(err)))
    }

    /// Names of all options, in registry order.
    #[staticmethod]
    fn names() -> Vec<&'static str> {
        HighsOptions::names().collect()
    }

    /// Options that differ from their defaults, as `name = value` lines.
    fn nonDefault(&self) -> Vec<String> {
        self.inner
            .non_default()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!("HighsOptions({})", self.nonDefault().join(", "))
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHighsOptions>()?;
    Ok(())
}
