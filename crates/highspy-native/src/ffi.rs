//! Owned HiGHS instance over the C API.
//!
//! This module contains unsafe code for interacting with the C library.
#![allow(unsafe_code)]

use std::ffi::{CStr, CString, c_char, c_void};
use std::ptr;

use highs_sys::HighsInt;
use highspy_core::{
    HessianFormat, HighsHessian, HighsLp, HighsModel, HighsSparseMatrix, HighsVarType,
    MatrixFormat, ObjSense, OptionValue,
};
use tracing::{debug, trace};

use crate::error::NativeError;

/// Convert a dimension or index to the native integer type.
pub(crate) fn to_highs_int(what: &'static str, value: usize) -> Result<HighsInt, NativeError> {
    HighsInt::try_from(value).map_err(|_| NativeError::TooLarge { what, value })
}

pub(crate) fn to_highs_ints(
    what: &'static str,
    values: &[usize],
) -> Result<Vec<HighsInt>, NativeError> {
    values.iter().map(|&v| to_highs_int(what, v)).collect()
}

fn c_string(what: &'static str, value: &str) -> Result<CString, NativeError> {
    CString::new(value).map_err(|_| NativeError::InvalidString {
        what,
        value: value.to_string(),
    })
}

/// Map a native return code to an error for calls that must succeed.
fn check(operation: &'static str, status: HighsInt) -> Result<HighsInt, NativeError> {
    if status == highs_sys::STATUS_ERROR {
        debug!(
            component = "ffi",
            operation = operation,
            status = "error",
            status_code = status,
            "Native call failed"
        );
        return Err(NativeError::Call {
            operation,
            status: status as i32,
        });
    }
    Ok(status)
}

/// Capacity HiGHS requires for name buffers.
const NAME_CAPACITY: usize = 512;

fn to_usize(what: &'static str, value: HighsInt) -> Result<usize, NativeError> {
    usize::try_from(value).map_err(|_| NativeError::Call {
        operation: what,
        status: value as i32,
    })
}

fn to_usizes(what: &'static str, values: &[HighsInt]) -> Result<Vec<usize>, NativeError> {
    values.iter().map(|&v| to_usize(what, v)).collect()
}

fn ptr_or_null<T>(values: &[T]) -> *const T {
    if values.is_empty() {
        ptr::null()
    } else {
        values.as_ptr()
    }
}

/// Unique owner of one native HiGHS instance; destroyed on drop.
pub(crate) struct RawHighs {
    ptr: *mut c_void,
}

// The instance is only reached through `&mut self` / `&self` of the owning
// handle, so it may move between threads but is never shared.
unsafe impl Send for RawHighs {}

impl RawHighs {
    pub(crate) fn new() -> Result<Self, NativeError> {
        let ptr = unsafe { highs_sys::Highs_create() };
        if ptr.is_null() {
            return Err(NativeError::CreateFailed);
        }
        trace!(
            component = "ffi",
            operation = "create",
            status = "ok",
            "Created native HiGHS instance"
        );
        Ok(RawHighs { ptr })
    }

    pub(crate) fn reset_options(&mut self) -> Result<(), NativeError> {
        let status = unsafe { highs_sys::Highs_resetOptions(self.ptr) };
        check("Highs_resetOptions", status).map(|_| ())
    }

    pub(crate) fn set_option(&mut self, name: &str, value: &OptionValue) -> Result<(), NativeError> {
        let c_name = c_string("option name", name)?;
        let status = match value {
            OptionValue::Bool(v) => unsafe {
                highs_sys::Highs_setBoolOptionValue(self.ptr, c_name.as_ptr(), HighsInt::from(*v))
            },
            OptionValue::Int(v) => unsafe {
                highs_sys::Highs_setIntOptionValue(self.ptr, c_name.as_ptr(), *v as HighsInt)
            },
            OptionValue::Double(v) => unsafe {
                highs_sys::Highs_setDoubleOptionValue(self.ptr, c_name.as_ptr(), *v)
            },
            OptionValue::String(v) => {
                let c_value = c_string("option value", v)?;
                unsafe {
                    highs_sys::Highs_setStringOptionValue(
                        self.ptr,
                        c_name.as_ptr(),
                        c_value.as_ptr(),
                    )
                }
            }
        };
        check("Highs_setOptionValue", status).map(|_| ())
    }

    /// Pass a column-wise LP, as a MIP when it has integrality data.
    pub(crate) fn pass_lp(&mut self, lp: &HighsLp) -> Result<HighsInt, NativeError> {
        let matrix = &lp.a_matrix;
        let num_col = to_highs_int("num_col", lp.num_col)?;
        let num_row = to_highs_int("num_row", lp.num_row)?;
        let num_nz = to_highs_int("num_nz", matrix.num_nz())?;
        let a_start = to_highs_ints("a_start", &matrix.start)?;
        let a_index = to_highs_ints("a_index", &matrix.index)?;
        let a_format = matrix.format.code() as HighsInt;
        let sense = lp.sense.code() as HighsInt;

        let status = if lp.is_mip() {
            let integrality: Vec<HighsInt> = (0..lp.num_col)
                .map(|col| lp.col_integrality(col).code() as HighsInt)
                .collect();
            unsafe {
                highs_sys::Highs_passMip(
                    self.ptr,
                    num_col,
                    num_row,
                    num_nz,
                    a_format,
                    sense,
                    lp.offset,
                    ptr_or_null(&lp.col_cost),
                    ptr_or_null(&lp.col_lower),
                    ptr_or_null(&lp.col_upper),
                    ptr_or_null(&lp.row_lower),
                    ptr_or_null(&lp.row_upper),
                    a_start.as_ptr(),
                    ptr_or_null(&a_index),
                    ptr_or_null(&matrix.value),
                    integrality.as_ptr(),
                )
            }
        } else {
            unsafe {
                highs_sys::Highs_passLp(
                    self.ptr,
                    num_col,
                    num_row,
                    num_nz,
                    a_format,
                    sense,
                    lp.offset,
                    ptr_or_null(&lp.col_cost),
                    ptr_or_null(&lp.col_lower),
                    ptr_or_null(&lp.col_upper),
                    ptr_or_null(&lp.row_lower),
                    ptr_or_null(&lp.row_upper),
                    a_start.as_ptr(),
                    ptr_or_null(&a_index),
                    ptr_or_null(&matrix.value),
                )
            }
        };
        check("Highs_passLp", status)
    }

    pub(crate) fn pass_hessian(&mut self, hessian: &HighsHessian) -> Result<HighsInt, NativeError> {
        let dim = to_highs_int("hessian dim", hessian.dim)?;
        let num_nz = to_highs_int("hessian num_nz", hessian.num_nz())?;
        let start = to_highs_ints("hessian start", &hessian.start)?;
        let index = to_highs_ints("hessian index", &hessian.index)?;
        let status = unsafe {
            highs_sys::Highs_passHessian(
                self.ptr,
                dim,
                num_nz,
                hessian.format.code() as HighsInt,
                start.as_ptr(),
                ptr_or_null(&index),
                ptr_or_null(&hessian.value),
            )
        };
        check("Highs_passHessian", status)
    }

    pub(crate) fn set_basis(
        &mut self,
        col_status: &[HighsInt],
        row_status: &[HighsInt],
    ) -> Result<HighsInt, NativeError> {
        let status = unsafe {
            highs_sys::Highs_setBasis(self.ptr, ptr_or_null(col_status), ptr_or_null(row_status))
        };
        check("Highs_setBasis", status)
    }

    /// Empty slices are passed as null, leaving that part unset.
    pub(crate) fn set_solution(
        &mut self,
        col_value: &[f64],
        row_value: &[f64],
        col_dual: &[f64],
        row_dual: &[f64],
    ) -> Result<HighsInt, NativeError> {
        let status = unsafe {
            highs_sys::Highs_setSolution(
                self.ptr,
                ptr_or_null(col_value),
                ptr_or_null(row_value),
                ptr_or_null(col_dual),
                ptr_or_null(row_dual),
            )
        };
        check("Highs_setSolution", status)
    }

    /// Run the solver and return the raw status code.
    pub(crate) fn run(&mut self) -> HighsInt {
        unsafe { highs_sys::Highs_run(self.ptr) }
    }

    pub(crate) fn model_status(&self) -> HighsInt {
        unsafe { highs_sys::Highs_getModelStatus(self.ptr) }
    }

    pub(crate) fn objective_value(&self) -> f64 {
        unsafe { highs_sys::Highs_getObjectiveValue(self.ptr) }
    }

    pub(crate) fn run_time(&self) -> f64 {
        unsafe { highs_sys::Highs_getRunTime(self.ptr) }
    }

    /// Column values, column duals, row values and row duals.
    pub(crate) fn solution(
        &self,
        num_col: usize,
        num_row: usize,
    ) -> Result<[Vec<f64>; 4], NativeError> {
        let mut col_value = vec![0.0; num_col];
        let mut col_dual = vec![0.0; num_col];
        let mut row_value = vec![0.0; num_row];
        let mut row_dual = vec![0.0; num_row];
        let status = unsafe {
            highs_sys::Highs_getSolution(
                self.ptr,
                col_value.as_mut_ptr(),
                col_dual.as_mut_ptr(),
                row_value.as_mut_ptr(),
                row_dual.as_mut_ptr(),
            )
        };
        check("Highs_getSolution", status)?;
        Ok([col_value, col_dual, row_value, row_dual])
    }

    pub(crate) fn basis(
        &self,
        num_col: usize,
        num_row: usize,
    ) -> Result<(Vec<HighsInt>, Vec<HighsInt>), NativeError> {
        let mut col_status: Vec<HighsInt> = vec![0; num_col];
        let mut row_status: Vec<HighsInt> = vec![0; num_row];
        let status = unsafe {
            highs_sys::Highs_getBasis(self.ptr, col_status.as_mut_ptr(), row_status.as_mut_ptr())
        };
        check("Highs_getBasis", status)?;
        Ok((col_status, row_status))
    }

    pub(crate) fn int_info(&self, name: &str) -> Option<HighsInt> {
        let c_name = CString::new(name).ok()?;
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(self.ptr, c_name.as_ptr(), &raw mut value)
        };
        (status == highs_sys::STATUS_OK).then_some(value)
    }

    pub(crate) fn int64_info(&self, name: &str) -> Option<i64> {
        let c_name = CString::new(name).ok()?;
        let mut value: i64 = 0;
        let status = unsafe {
            highs_sys::Highs_getInt64InfoValue(self.ptr, c_name.as_ptr(), &raw mut value)
        };
        (status == highs_sys::STATUS_OK).then_some(value)
    }

    pub(crate) fn double_info(&self, name: &str) -> Option<f64> {
        let c_name = CString::new(name).ok()?;
        let mut value: f64 = 0.0;
        let status = unsafe {
            highs_sys::Highs_getDoubleInfoValue(self.ptr, c_name.as_ptr(), &raw mut value)
        };
        (status == highs_sys::STATUS_OK).then_some(value)
    }

    pub(crate) fn read_model(&mut self, path: &str) -> Result<HighsInt, NativeError> {
        let c_path = c_string("model path", path)?;
        let status = unsafe { highs_sys::Highs_readModel(self.ptr, c_path.as_ptr()) };
        check("Highs_readModel", status)
    }

    /// Copy the native incumbent model out, column-wise with a triangular
    /// Hessian.
    pub(crate) fn model(&self) -> Result<HighsModel, NativeError> {
        let num_col = to_usize("Highs_getNumCol", unsafe { highs_sys::Highs_getNumCol(self.ptr) })?;
        let num_row = to_usize("Highs_getNumRow", unsafe { highs_sys::Highs_getNumRow(self.ptr) })?;
        let num_nz = to_usize("Highs_getNumNz", unsafe { highs_sys::Highs_getNumNz(self.ptr) })?;
        let q_num_nz = to_usize("Highs_getHessianNumNz", unsafe {
            highs_sys::Highs_getHessianNumNz(self.ptr)
        })?;

        let (mut out_num_col, mut out_num_row, mut out_num_nz, mut out_q_num_nz) = (0, 0, 0, 0);
        let mut sense: HighsInt = 0;
        let mut offset = 0.0;
        let mut col_cost = vec![0.0; num_col];
        let mut col_lower = vec![0.0; num_col];
        let mut col_upper = vec![0.0; num_col];
        let mut row_lower = vec![0.0; num_row];
        let mut row_upper = vec![0.0; num_row];
        let mut a_start: Vec<HighsInt> = vec![0; num_col];
        let mut a_index: Vec<HighsInt> = vec![0; num_nz];
        let mut a_value = vec![0.0; num_nz];
        let mut q_start: Vec<HighsInt> = vec![0; if q_num_nz > 0 { num_col } else { 0 }];
        let mut q_index: Vec<HighsInt> = vec![0; q_num_nz];
        let mut q_value = vec![0.0; q_num_nz];
        let mut integrality: Vec<HighsInt> = vec![0; num_col];
        let status = unsafe {
            highs_sys::Highs_getModel(
                self.ptr,
                MatrixFormat::Colwise.code() as HighsInt,
                HessianFormat::Triangular.code() as HighsInt,
                &raw mut out_num_col,
                &raw mut out_num_row,
                &raw mut out_num_nz,
                &raw mut out_q_num_nz,
                &raw mut sense,
                &raw mut offset,
                col_cost.as_mut_ptr(),
                col_lower.as_mut_ptr(),
                col_upper.as_mut_ptr(),
                row_lower.as_mut_ptr(),
                row_upper.as_mut_ptr(),
                a_start.as_mut_ptr(),
                a_index.as_mut_ptr(),
                a_value.as_mut_ptr(),
                q_start.as_mut_ptr(),
                q_index.as_mut_ptr(),
                q_value.as_mut_ptr(),
                integrality.as_mut_ptr(),
            )
        };
        check("Highs_getModel", status)?;

        // Start arrays come back without the closing offset.
        let mut start = to_usizes("a_start", &a_start)?;
        start.push(num_nz);
        let integrality: Vec<HighsVarType> = integrality
            .iter()
            .map(|&code| HighsVarType::from_code(code as i32).unwrap_or_default())
            .collect();
        let lp = HighsLp {
            num_col,
            num_row,
            col_cost,
            col_lower,
            col_upper,
            row_lower,
            row_upper,
            a_matrix: HighsSparseMatrix::from_parts(
                MatrixFormat::Colwise,
                num_col,
                num_row,
                start,
                to_usizes("a_index", &a_index)?,
                a_value,
            ),
            sense: ObjSense::from_code(sense as i32).unwrap_or_default(),
            offset,
            col_names: self.names(num_col, highs_sys::Highs_getColName),
            row_names: self.names(num_row, highs_sys::Highs_getRowName),
            integrality: if integrality.iter().all(|&t| t == HighsVarType::Continuous) {
                Vec::new()
            } else {
                integrality
            },
            ..HighsLp::default()
        };
        let hessian = HighsHessian::from_vectors(
            HessianFormat::Triangular,
            num_col,
            &to_usizes("q_start", &q_start)?,
            &to_usizes("q_index", &q_index)?,
            &q_value,
        );
        Ok(HighsModel { lp, hessian })
    }

    /// Column or row names, empty when the model has none.
    fn names(
        &self,
        count: usize,
        getter: unsafe extern "C" fn(*const c_void, HighsInt, *mut c_char) -> HighsInt,
    ) -> Vec<String> {
        let mut names = Vec::with_capacity(count);
        let mut buffer: Vec<c_char> = vec![0; NAME_CAPACITY];
        for index in 0..count {
            let Ok(index) = HighsInt::try_from(index) else {
                return Vec::new();
            };
            let status = unsafe { getter(self.ptr, index, buffer.as_mut_ptr()) };
            if status != highs_sys::STATUS_OK {
                return Vec::new();
            }
            let name = unsafe { CStr::from_ptr(buffer.as_ptr()) };
            names.push(name.to_string_lossy().into_owned());
        }
        names
    }

    pub(crate) fn write_model(&mut self, path: &str) -> Result<HighsInt, NativeError> {
        let c_path = c_string("model path", path)?;
        let status = unsafe { highs_sys::Highs_writeModel(self.ptr, c_path.as_ptr()) };
        check("Highs_writeModel", status)
    }

    pub(crate) fn write_solution(&self, path: &str, pretty: bool) -> Result<HighsInt, NativeError> {
        let c_path = c_string("solution path", path)?;
        let status = if pretty {
            unsafe { highs_sys::Highs_writeSolutionPretty(self.ptr, c_path.as_ptr()) }
        } else {
            unsafe { highs_sys::Highs_writeSolution(self.ptr, c_path.as_ptr()) }
        };
        check("Highs_writeSolution", status)
    }
}

impl Drop for RawHighs {
    fn drop(&mut self) {
        unsafe { highs_sys::Highs_destroy(self.ptr) };
        trace!(
            component = "ffi",
            operation = "destroy",
            status = "ok",
            "Destroyed native HiGHS instance"
        );
    }
}

/// Full version string of the linked HiGHS library.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

pub fn version_major() -> i32 {
    unsafe { highs_sys::Highs_versionMajor() as i32 }
}

pub fn version_minor() -> i32 {
    unsafe { highs_sys::Highs_versionMinor() as i32 }
}

pub fn version_patch() -> i32 {
    unsafe { highs_sys::Highs_versionPatch() as i32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_highs_int() {
        assert_eq!(to_highs_int("n", 5), Ok(5));
        assert!(matches!(
            to_highs_int("n", usize::MAX),
            Err(NativeError::TooLarge { what: "n", .. })
        ));
        assert_eq!(to_highs_ints("v", &[0, 3]), Ok(vec![0, 3]));
    }

    #[test]
    fn test_c_string_rejects_nul() {
        assert!(c_string("path", "a\0b").is_err());
        assert!(c_string("path", "model.mps").is_ok());
    }

    #[test]
    fn test_create_and_drop() {
        let mut raw = RawHighs::new().unwrap();
        raw.set_option("output_flag", &OptionValue::Bool(false))
            .unwrap();
        raw.reset_options().unwrap();
    }

    #[test]
    fn test_version_parts_match_string() {
        let version = highs_version().unwrap_or_default();
        let expected = format!("{}.{}.{}", version_major(), version_minor(), version_patch());
        assert!(
            version.starts_with(&expected),
            "version {version} should start with {expected}"
        );
    }
}
