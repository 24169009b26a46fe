//! Validation and normalization of model data before it reaches the solver.
//!
//! Each function checks one kind of data against the current options and
//! may normalize it in place (large bounds become infinite, tiny matrix
//! entries are dropped). Normalizations are reported as
//! [`HighsStatus::Warning`]; illegal data is an error and callers must then
//! discard the input.

use tracing::warn;

use crate::enums::{HighsStatus, MatrixFormat};
use crate::error::HighsError;
use crate::hessian::HighsHessian;
use crate::lp::HighsLp;
use crate::matrix::HighsSparseMatrix;
use crate::options::HighsOptions;

/// Map costs with `|c| >= infinite_cost` to signed infinity.
pub fn assess_costs(costs: &mut [f64], options: &HighsOptions) -> Result<HighsStatus, HighsError> {
    let infinite_cost = options.infinite_cost();
    for cost in costs.iter_mut() {
        if cost.abs() >= infinite_cost {
            *cost = f64::INFINITY.copysign(*cost);
        }
    }
    Ok(HighsStatus::Ok)
}

/// Check the bounds of columns or rows `first..first + lower.len()`.
///
/// `kind` names the vectors in messages ("column" or "row").
pub fn assess_bounds(
    kind: &'static str,
    first: usize,
    lower: &mut [f64],
    upper: &mut [f64],
    options: &HighsOptions,
) -> Result<HighsStatus, HighsError> {
    if lower.len() != upper.len() {
        return Err(HighsError::LengthMismatch {
            what: "upper bounds",
            expected: lower.len(),
            got: upper.len(),
        });
    }
    let infinite_bound = options.infinite_bound();
    let mut status = HighsStatus::Ok;
    let mut num_inconsistent = 0;
    for (offset, (lo, up)) in lower.iter_mut().zip(upper.iter_mut()).enumerate() {
        let index = first + offset;
        normalize_bound(lo, infinite_bound);
        normalize_bound(up, infinite_bound);
        if *lo == f64::INFINITY {
            return Err(HighsError::IllegalLowerBound {
                kind,
                index,
                value: *lo,
            });
        }
        if *up == f64::NEG_INFINITY {
            return Err(HighsError::IllegalUpperBound {
                kind,
                index,
                value: *up,
            });
        }
        if lo.is_nan() || up.is_nan() {
            return Err(HighsError::IllegalLowerBound {
                kind,
                index,
                value: f64::NAN,
            });
        }
        if *lo > *up {
            num_inconsistent += 1;
        }
    }
    if num_inconsistent > 0 {
        warn!(
            component = "assess",
            operation = "bounds",
            status = "warning",
            kind = kind,
            num_inconsistent = num_inconsistent,
            "Inconsistent bounds: lower bound exceeds upper bound"
        );
        status = HighsStatus::Warning;
    }
    Ok(status)
}

fn normalize_bound(bound: &mut f64, infinite_bound: f64) {
    if *bound >= infinite_bound {
        *bound = f64::INFINITY;
    } else if *bound <= -infinite_bound {
        *bound = f64::NEG_INFINITY;
    }
}

/// Check layout, indices and value magnitudes of `matrix`, dropping entries
/// with `|v| <= small_matrix_value`.
pub fn assess_matrix(
    matrix: &mut HighsSparseMatrix,
    options: &HighsOptions,
) -> Result<HighsStatus, HighsError> {
    matrix.validate_shape()?;
    if matrix.format != MatrixFormat::RowwisePartitioned {
        // Only the partitioned format reads p_end.
        matrix.p_end.clear();
    }
    let num_vectors = matrix.num_vectors();
    let dim = matrix.vector_dim();
    let kind = if matrix.is_rowwise() { "column" } else { "row" };
    let small = options.small_matrix_value();
    let large = options.large_matrix_value();

    let mut seen = vec![false; dim];
    for vector in 0..num_vectors {
        let range = matrix.start[vector]..matrix.start[vector + 1];
        for el in range.clone() {
            let index = matrix.index[el];
            if index >= dim {
                return Err(HighsError::IndexOutOfRange {
                    kind,
                    index,
                    len: dim,
                });
            }
            if seen[index] {
                return Err(HighsError::DuplicateIndex { vector, index });
            }
            seen[index] = true;
            let value = matrix.value[el];
            if value.is_nan() || value.abs() >= large {
                return Err(HighsError::LargeMatrixValue {
                    vector,
                    index,
                    value,
                });
            }
        }
        for el in range {
            seen[matrix.index[el]] = false;
        }
    }

    let num_dropped = drop_small_values(matrix, small);
    if num_dropped == 0 {
        return Ok(HighsStatus::Ok);
    }
    warn!(
        component = "assess",
        operation = "matrix",
        status = "warning",
        num_dropped = num_dropped,
        small_matrix_value = small,
        "Matrix entries with small magnitude removed"
    );
    Ok(HighsStatus::Warning)
}

fn drop_small_values(matrix: &mut HighsSparseMatrix, small: f64) -> usize {
    let num_vectors = matrix.num_vectors();
    let partitioned = matrix.format == MatrixFormat::RowwisePartitioned;
    let mut write = 0;
    let mut read_start = 0;
    for vector in 0..num_vectors {
        let read_end = matrix.start[vector + 1];
        let split = if partitioned { matrix.p_end[vector] } else { read_end };
        for el in read_start..read_end {
            if el == split && partitioned {
                matrix.p_end[vector] = write;
            }
            if matrix.value[el].abs() > small {
                matrix.index[write] = matrix.index[el];
                matrix.value[write] = matrix.value[el];
                write += 1;
            }
        }
        if partitioned && split == read_end {
            matrix.p_end[vector] = write;
        }
        read_start = read_end;
        matrix.start[vector + 1] = write;
    }
    let dropped = matrix.index.len() - write;
    matrix.index.truncate(write);
    matrix.value.truncate(write);
    dropped
}

/// Assess a whole LP: dimensions, costs, bounds and matrix.
pub fn assess_lp(lp: &mut HighsLp, options: &HighsOptions) -> Result<HighsStatus, HighsError> {
    lp.check_dimensions()?;
    let mut status = assess_costs(&mut lp.col_cost, options)?;
    status = status.worse(assess_bounds(
        "column",
        0,
        &mut lp.col_lower,
        &mut lp.col_upper,
        options,
    )?);
    status = status.worse(assess_bounds(
        "row",
        0,
        &mut lp.row_lower,
        &mut lp.row_upper,
        options,
    )?);
    status = status.worse(assess_matrix(&mut lp.a_matrix, options)?);
    Ok(status)
}

/// Validate a Hessian for `num_col` columns and store it lower-triangular.
pub fn assess_hessian(
    hessian: &mut HighsHessian,
    num_col: usize,
    options: &HighsOptions,
) -> Result<HighsStatus, HighsError> {
    if hessian.dim != 0 && hessian.dim != num_col {
        return Err(HighsError::InvalidHessian {
            reason: format!("dim {} does not match {} columns", hessian.dim, num_col),
        });
    }
    hessian.validate()?;
    let large = options.large_matrix_value();
    if let Some(&value) = hessian.value.iter().find(|v| v.is_nan() || v.abs() >= large) {
        return Err(HighsError::InvalidHessian {
            reason: format!("entry {} has large magnitude", value),
        });
    }
    if hessian.make_triangular() {
        warn!(
            component = "assess",
            operation = "hessian",
            status = "warning",
            "Hessian is not symmetric: off-diagonal pairs averaged"
        );
        return Ok(HighsStatus::Warning);
    }
    Ok(HighsStatus::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_bounds_become_infinite() {
        let options = HighsOptions::new();
        let mut lower = vec![-1e30, 0.0];
        let mut upper = vec![1e25, 1e20];
        let status = assess_bounds("column", 0, &mut lower, &mut upper, &options).unwrap();
        assert_eq!(status, HighsStatus::Ok);
        assert_eq!(lower, vec![f64::NEG_INFINITY, 0.0]);
        assert_eq!(upper, vec![f64::INFINITY, f64::INFINITY]);
    }

    #[test]
    fn test_illegal_bounds() {
        let options = HighsOptions::new();
        let err = assess_bounds("column", 3, &mut [1e30], &mut [2.0], &options).unwrap_err();
        assert_eq!(err.code(), "BOUND_ILLEGAL_LOWER");
        assert!(err.to_string().contains("column 3"));

        let err = assess_bounds("row", 0, &mut [0.0], &mut [-1e30], &options).unwrap_err();
        assert_eq!(err.code(), "BOUND_ILLEGAL_UPPER");
    }

    #[test]
    fn test_inconsistent_bounds_warn() {
        let options = HighsOptions::new();
        let status = assess_bounds("row", 0, &mut [1.0], &mut [0.0], &options).unwrap();
        assert_eq!(status, HighsStatus::Warning);
    }

    #[test]
    fn test_infinite_costs_allowed() {
        let options = HighsOptions::new();
        let mut costs = vec![1e30, -1e30, 2.0];
        assert_eq!(assess_costs(&mut costs, &options), Ok(HighsStatus::Ok));
        assert_eq!(costs, vec![f64::INFINITY, f64::NEG_INFINITY, 2.0]);
    }

    fn column(values: Vec<f64>) -> HighsSparseMatrix {
        let n = values.len();
        HighsSparseMatrix::from_parts(
            MatrixFormat::Colwise,
            1,
            4,
            vec![0, n],
            (0..n).collect(),
            values,
        )
    }

    #[test]
    fn test_matrix_small_values_dropped() {
        let options = HighsOptions::new();
        let mut matrix = column(vec![1e-12, 2.0, -1e-10, 3.0]);
        assert_eq!(
            assess_matrix(&mut matrix, &options),
            Ok(HighsStatus::Warning)
        );
        assert_eq!(matrix.start, vec![0, 2]);
        assert_eq!(matrix.index, vec![1, 3]);
        assert_eq!(matrix.value, vec![2.0, 3.0]);
    }

    #[test]
    fn test_matrix_large_value_rejected() {
        let options = HighsOptions::new();
        let mut matrix = column(vec![1.0, 1e100]);
        assert_eq!(
            assess_matrix(&mut matrix, &options).map_err(|e| e.code()),
            Err("MATRIX_LARGE_VALUE")
        );
        let mut matrix = column(vec![-1e60]);
        assert!(assess_matrix(&mut matrix, &options).is_err());
    }

    #[test]
    fn test_matrix_index_errors() {
        let options = HighsOptions::new();
        let mut matrix = column(vec![1.0, 2.0]);
        matrix.index = vec![1, 1];
        assert_eq!(
            assess_matrix(&mut matrix, &options).map_err(|e| e.code()),
            Err("MATRIX_DUPLICATE_INDEX")
        );

        let mut matrix = column(vec![1.0]);
        matrix.index = vec![4];
        assert_eq!(
            assess_matrix(&mut matrix, &options).map_err(|e| e.code()),
            Err("INDEX_OUT_OF_RANGE")
        );
    }

    #[test]
    fn test_partitioned_matrix_keeps_split() {
        let options = HighsOptions::new();
        let mut matrix = HighsSparseMatrix {
            format: MatrixFormat::RowwisePartitioned,
            num_col: 3,
            num_row: 1,
            start: vec![0, 3],
            p_end: vec![2],
            index: vec![0, 1, 2],
            value: vec![1e-12, 1.0, 2.0],
        };
        assert_eq!(
            assess_matrix(&mut matrix, &options),
            Ok(HighsStatus::Warning)
        );
        assert_eq!(matrix.start, vec![0, 2]);
        assert_eq!(matrix.p_end, vec![1]);
    }

    #[test]
    fn test_stray_p_end_ignored_for_colwise() {
        let options = HighsOptions::new();
        let mut matrix = HighsSparseMatrix::from_parts(
            MatrixFormat::Colwise,
            2,
            2,
            vec![0, 1, 2],
            vec![0, 1],
            vec![1e-12, 3.0],
        );
        matrix.p_end = vec![0];
        assert_eq!(
            assess_matrix(&mut matrix, &options),
            Ok(HighsStatus::Warning)
        );
        assert!(matrix.p_end.is_empty());
        assert_eq!(matrix.start, vec![0, 0, 1]);
        assert_eq!(matrix.value, vec![3.0]);
    }

    #[test]
    fn test_assess_lp_combines_status() {
        let options = HighsOptions::new();
        let mut lp = HighsLp {
            num_col: 1,
            num_row: 4,
            col_cost: vec![1.0],
            col_lower: vec![0.0],
            col_upper: vec![1.0],
            row_lower: vec![0.0; 4],
            row_upper: vec![1.0; 4],
            a_matrix: column(vec![1e-12, 1.0]),
            ..HighsLp::default()
        };
        assert_eq!(assess_lp(&mut lp, &options), Ok(HighsStatus::Warning));
        lp.row_upper.pop();
        assert!(assess_lp(&mut lp, &options).is_err());
    }

    #[test]
    fn test_assess_hessian_dimension() {
        let options = HighsOptions::new();
        let mut hessian = HighsHessian {
            dim: 2,
            start: vec![0, 1, 2],
            index: vec![0, 1],
            value: vec![1.0, 1.0],
            ..HighsHessian::default()
        };
        assert_eq!(
            assess_hessian(&mut hessian, 2, &options),
            Ok(HighsStatus::Ok)
        );
        assert!(assess_hessian(&mut hessian, 3, &options).is_err());
    }
}
