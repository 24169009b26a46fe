//! Python extension module `highspy.highs`.
//!
//! Defines the classes, enums and constants re-exported by the `highspy`
//! package, backed by the `highspy-native` solver handle.

mod enums;
mod errors;
mod logging;
mod lp;
mod matrix;
mod options;
mod solution;
mod solver;

use highspy_core::{kHighsIInf, kHighsInf};
use pyo3::prelude::*;

pub use enums::{
    PyBasisValidity, PyHessianFormat, PyHighsBasisStatus, PyHighsInfoType, PyHighsLogType,
    PyHighsModelStatus, PyHighsOptionType, PyHighsStatus, PyHighsVarType, PyMatrixFormat,
    PyObjSense, PySolutionStatus,
};
pub use errors::HighsError;
pub use lp::{PyHighsLp, PyHighsModel};
pub use matrix::{PyHighsHessian, PyHighsSparseMatrix};
pub use options::PyHighsOptions;
pub use solution::{PyHighsBasis, PyHighsInfo, PyHighsSolution};
pub use solver::PyHighs;

/// Names re-exported by the `highspy` package, in declaration order.
pub const EXPORTS: [&str; 22] = [
    "ObjSense",
    "MatrixFormat",
    "HessianFormat",
    "SolutionStatus",
    "BasisValidity",
    "HighsModelStatus",
    "HighsBasisStatus",
    "HighsVarType",
    "HighsStatus",
    "HighsLogType",
    "HighsSparseMatrix",
    "HighsLp",
    "HighsHessian",
    "HighsModel",
    "HighsSolution",
    "HighsBasis",
    "HighsInfo",
    "Highs",
    "kHighsInf",
    "HIGHS_VERSION_MAJOR",
    "HIGHS_VERSION_MINOR",
    "HIGHS_VERSION_PATCH",
];

#[pymodule]
fn highs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    enums::register(m)?;
    matrix::register(m)?;
    lp::register(m)?;
    options::register(m)?;
    solution::register(m)?;
    solver::register(m)?;
    errors::register(m)?;
    logging::register(m)?;

    m.add("kHighsInf", kHighsInf)?;
    m.add("kHighsIInf", kHighsIInf)?;
    // Read from the linked library so the triple matches the solver in use.
    m.add("HIGHS_VERSION_MAJOR", highspy_native::version_major())?;
    m.add("HIGHS_VERSION_MINOR", highspy_native::version_minor())?;
    m.add("HIGHS_VERSION_PATCH", highspy_native::version_patch())?;

    Ok(())
}
