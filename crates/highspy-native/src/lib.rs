//! Safe HiGHS solver handle.
//!
//! [`Highs`] owns a native HiGHS instance together with a Rust-side copy of
//! the model, its options and the results of the last run. Model data is
//! validated by `highspy-core` before it is accepted.

pub mod error;
mod ffi;
pub mod highs;
pub mod status;

pub use error::NativeError;
pub use ffi::{highs_version, version_major, version_minor, version_patch};
pub use highs::{ColsData, Entries, HessianArrays, Highs, HighsResult, ModelArrays, RowsData};
pub use status::{has_solution, model_status_label};
