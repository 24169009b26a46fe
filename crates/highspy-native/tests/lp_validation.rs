#![allow(clippy::float_cmp)]

use highspy_core::{HighsStatus, kHighsInf};
use highspy_native::Highs;

const MY_INFINITY: f64 = 1e30;
const NUM_ROW: usize = 10;

fn highs_with_rows() -> Highs {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
    let mut highs = Highs::new().unwrap();
    highs.set_option_value("output_flag", false).unwrap();
    highs
        .add_rows(
            &[-kHighsInf; NUM_ROW],
            &[10.0; NUM_ROW],
            &[0; NUM_ROW],
            &[],
            &[],
        )
        .unwrap();
    highs
}

#[test]
fn test_column_costs_and_bounds() {
    let mut highs = highs_with_rows();

    // Large upper bounds become infinite.
    highs.add_col(1.0, 0.0, 1e25, &[], &[]).unwrap();
    assert_eq!(highs.get_col(0).unwrap().upper, vec![kHighsInf]);

    // Infinite costs are accepted.
    highs.add_col(MY_INFINITY, 0.0, MY_INFINITY, &[], &[]).unwrap();
    highs.add_col(-MY_INFINITY, 0.0, MY_INFINITY, &[], &[]).unwrap();
    assert_eq!(highs.get_col(2).unwrap().costs, vec![-kHighsInf]);

    // Inconsistent bounds are accepted with a warning.
    assert_eq!(
        highs.add_col(1.0, 0.0, -1.0, &[], &[]).unwrap(),
        HighsStatus::Warning
    );
    assert_eq!(
        highs.add_col(1.0, 1.0, 0.0, &[], &[]).unwrap(),
        HighsStatus::Warning
    );
    assert_eq!(highs.get_num_col(), 5);

    // Infinite lower or negative infinite upper bounds are illegal.
    let err = highs.add_col(1.0, MY_INFINITY, 0.0, &[], &[]).unwrap_err();
    assert_eq!(err.code(), "BOUND_ILLEGAL_LOWER");
    let err = highs.add_col(1.0, 0.0, -MY_INFINITY, &[], &[]).unwrap_err();
    assert_eq!(err.code(), "BOUND_ILLEGAL_UPPER");
    assert_eq!(highs.get_num_col(), 5);

    assert_eq!(
        highs.add_col(1.0, 0.0, 0.0, &[], &[]).unwrap(),
        HighsStatus::Ok
    );
}

#[test]
fn test_column_matrix_values() {
    let mut highs = highs_with_rows();
    let costs = [1.0, 2.0];
    let lower = [0.0, 0.0];
    let upper = [1.0, 1.0];
    let starts = [0, 4];
    let indices = [0, 2, 3, 9, 1, 3, 8];
    let mut values = [1.0, 1e-12, -1e-20, -1.0, -1e60, 1e100, -1.0];

    let err = highs
        .add_cols(&costs, &lower, &upper, &starts, &indices, &values)
        .unwrap_err();
    assert_eq!(err.code(), "MATRIX_LARGE_VALUE");
    assert_eq!(highs.get_num_col(), 0);
    assert_eq!(highs.get_num_nz(), 0);

    // With the large values replaced, the small ones are dropped.
    values[4] = -1.0;
    values[5] = 1.0;
    let status = highs
        .add_cols(&costs, &lower, &upper, &starts, &indices, &values)
        .unwrap();
    assert_eq!(status, HighsStatus::Warning);
    assert_eq!(highs.get_num_col(), 2);
    assert_eq!(highs.get_num_nz(), 5);

    assert_eq!(highs.get_coeff(2, 0).unwrap(), 0.0);
    assert_eq!(highs.get_coeff(9, 0).unwrap(), -1.0);
    assert_eq!(highs.get_coeff(3, 1).unwrap(), 1.0);

    let entries = highs.get_col_entries(0).unwrap();
    assert_eq!(entries.index, vec![0, 9]);
    assert_eq!(entries.value, vec![1.0, -1.0]);
}

#[test]
fn test_coefficient_access() {
    let mut highs = highs_with_rows();
    highs.add_col(1.0, 0.0, 1.0, &[0, 5], &[2.0, 3.0]).unwrap();

    assert_eq!(highs.get_coeff(NUM_ROW, 0).unwrap_err().code(), "INDEX_OUT_OF_RANGE");
    assert_eq!(highs.get_coeff(0, 1).unwrap_err().code(), "INDEX_OUT_OF_RANGE");
    assert_eq!(
        highs.change_coeff(NUM_ROW, 0, 1.0).unwrap_err().code(),
        "INDEX_OUT_OF_RANGE"
    );
    assert_eq!(highs.get_coeff(4, 0).unwrap(), 0.0);

    highs.change_coeff(4, 0, 7.0).unwrap();
    assert_eq!(highs.get_coeff(4, 0).unwrap(), 7.0);
    assert_eq!(highs.get_num_nz(), 3);

    assert_eq!(
        highs.change_coeff(4, 0, 1e-12).unwrap(),
        HighsStatus::Warning
    );
    assert_eq!(highs.get_coeff(4, 0).unwrap(), 0.0);
    assert_eq!(highs.get_num_nz(), 2);

    assert_eq!(
        highs.change_coeff(4, 0, 1e20).unwrap_err().code(),
        "MATRIX_LARGE_VALUE"
    );
}

#[test]
fn test_row_bounds_validation() {
    let mut highs = highs_with_rows();
    highs
        .change_row_bounds(0, -MY_INFINITY, 5.0)
        .unwrap();
    assert_eq!(highs.get_row(0).unwrap().lower, vec![-kHighsInf]);
    assert_eq!(
        highs.change_row_bounds(1, MY_INFINITY, MY_INFINITY).unwrap_err().code(),
        "BOUND_ILLEGAL_LOWER"
    );
    assert_eq!(highs.get_row(1).unwrap().upper, vec![10.0]);
    assert_eq!(
        highs.change_rows_bounds(&[0, NUM_ROW], &[0.0, 0.0], &[1.0, 1.0]).unwrap_err().code(),
        "INDEX_OUT_OF_RANGE"
    );
}
