//! Rust-owned model, solution and option types for the HiGHS solver.
//!
//! Nothing here links the native library: the data is validated and edited
//! in Rust and handed to HiGHS by `highspy-native`.

pub mod assess;
pub mod consts;
pub mod enums;
pub mod error;
pub mod hessian;
pub mod info;
pub mod log;
pub mod lp;
pub mod matrix;
pub mod model;
pub mod options;
pub mod solution;

pub use consts::{kHighsIInf, kHighsInf};
pub use enums::{
    BasisValidity, HessianFormat, HighsBasisStatus, HighsInfoType, HighsLogType, HighsModelStatus,
    HighsOptionType, HighsStatus, HighsVarType, MatrixFormat, ObjSense, SolutionStatus,
};
pub use error::HighsError;
pub use hessian::HighsHessian;
pub use info::{HighsInfo, InfoValue};
pub use lp::HighsLp;
pub use matrix::HighsSparseMatrix;
pub use model::HighsModel;
pub use options::{HighsOptions, OptionValue};
pub use solution::{HighsBasis, HighsSolution};
