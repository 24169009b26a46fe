#![allow(clippy::float_cmp)]

use highspy_core::{
    BasisValidity, HessianFormat, HighsBasisStatus, HighsHessian, HighsModelStatus,
    HighsOptionType, HighsStatus, HighsVarType, InfoValue, MatrixFormat, ObjSense, OptionValue,
    SolutionStatus, kHighsInf,
};
use highspy_native::{HessianArrays, Highs, ModelArrays, has_solution};

fn quiet_highs() -> Highs {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
    let mut highs = Highs::new().expect("failed to create handle");
    highs.set_option_value("output_flag", false).unwrap();
    highs
}

/// minimize 2x + 3y subject to x + y >= 5, x, y >= 0
fn simple_lp(highs: &mut Highs) {
    highs
        .pass_model_arrays(ModelArrays {
            num_col: 2,
            num_row: 1,
            num_nz: 2,
            a_format: MatrixFormat::Rowwise,
            sense: ObjSense::Minimize,
            offset: 0.0,
            col_cost: &[2.0, 3.0],
            col_lower: &[0.0, 0.0],
            col_upper: &[kHighsInf, kHighsInf],
            row_lower: &[5.0],
            row_upper: &[kHighsInf],
            a_start: &[0],
            a_index: &[0, 1],
            a_value: &[1.0, 1.0],
            integrality: None,
        })
        .unwrap();
}

#[test]
fn test_simple_lp() {
    let mut highs = quiet_highs();
    simple_lp(&mut highs);
    assert_eq!(highs.get_num_col(), 2);
    assert_eq!(highs.get_num_nz(), 2);

    assert_eq!(highs.run().unwrap(), HighsStatus::Ok);
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
    assert!(
        (highs.get_objective_value() - 10.0).abs() < 1e-6,
        "Expected objective value 10.0, got {}",
        highs.get_objective_value()
    );

    let solution = highs.get_solution();
    assert!(solution.value_valid);
    assert!(solution.dual_valid);
    assert!((solution.col_value[0] - 5.0).abs() < 1e-6);
    assert!((solution.row_value[0] - 5.0).abs() < 1e-6);

    let info = highs.get_info();
    assert!(info.valid);
    assert_eq!(info.primal_solution_status, SolutionStatus::Feasible);
    assert_eq!(info.basis_validity, BasisValidity::Valid);
    assert!(highs.get_basis().valid);
    assert_eq!(
        highs.get_info_value("objective_function_value").unwrap(),
        InfoValue::Double(info.objective_function_value)
    );
    assert!(has_solution(highs.get_model_status()));
}

#[test]
fn test_maximize_integer_column() {
    let mut highs = quiet_highs();
    // maximize x subject to x <= 1.5, x integer in [0, 10]
    highs.add_col(1.0, 0.0, 10.0, &[], &[]).unwrap();
    highs.add_row(-kHighsInf, 1.5, &[0], &[1.0]).unwrap();
    highs
        .change_col_integrality(0, HighsVarType::Integer)
        .unwrap();
    highs.change_objective_sense(ObjSense::Maximize).unwrap();
    assert!(highs.get_lp().is_mip());

    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
    let x = highs.get_solution().col_value[0];
    assert!((x - 1.0).abs() < 1e-6, "Expected x = 1, got {}", x);
}

#[test]
fn test_quadratic_objective() {
    let mut highs = quiet_highs();
    // minimize x^2 / 2 - x over [-10, 10]
    highs.add_col(-1.0, -10.0, 10.0, &[], &[]).unwrap();
    highs
        .pass_hessian(HighsHessian {
            dim: 1,
            format: HessianFormat::Triangular,
            start: vec![0, 1],
            index: vec![0],
            value: vec![1.0],
        })
        .unwrap();
    assert_eq!(highs.get_hessian_num_nz(), 1);

    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
    let x = highs.get_solution().col_value[0];
    assert!((x - 1.0).abs() < 1e-5, "Expected x ~1, got {}", x);
    assert!((highs.get_objective_value() + 0.5).abs() < 1e-5);
}

fn qp_arrays<'a>(cost: &'a [f64], lower: &'a [f64], upper: &'a [f64]) -> ModelArrays<'a> {
    ModelArrays {
        num_col: 1,
        num_row: 0,
        num_nz: 0,
        a_format: MatrixFormat::Colwise,
        sense: ObjSense::Minimize,
        offset: 0.0,
        col_cost: cost,
        col_lower: lower,
        col_upper: upper,
        row_lower: &[],
        row_upper: &[],
        a_start: &[0],
        a_index: &[],
        a_value: &[],
        integrality: None,
    }
}

#[test]
fn test_quadratic_model_from_arrays() {
    let mut highs = quiet_highs();
    let hessian = HessianArrays {
        dim: 1,
        num_nz: 1,
        format: HessianFormat::Triangular,
        start: &[0],
        index: &[0],
        value: &[1.0],
    };
    let status = highs
        .pass_qp_arrays(qp_arrays(&[-1.0], &[-10.0], &[10.0]), hessian)
        .unwrap();
    assert_eq!(status, HighsStatus::Ok);
    assert_eq!(highs.get_hessian_num_nz(), 1);
    highs.run().unwrap();
    assert!((highs.get_solution().col_value[0] - 1.0).abs() < 1e-5);

    // A Hessian that does not fit the columns leaves the model untouched.
    let wide = HessianArrays {
        dim: 2,
        num_nz: 2,
        format: HessianFormat::Triangular,
        start: &[0, 1],
        index: &[0, 1],
        value: &[1.0, 1.0],
    };
    assert!(
        highs
            .pass_qp_arrays(qp_arrays(&[5.0], &[0.0], &[1.0]), wide)
            .is_err()
    );
    assert_eq!(highs.get_lp().col_cost, vec![-1.0]);
    assert!(highs.pass_hessian_arrays(wide).is_err());

    let empty = HessianArrays {
        dim: 1,
        num_nz: 0,
        format: HessianFormat::Triangular,
        start: &[],
        index: &[],
        value: &[],
    };
    highs.pass_hessian_arrays(empty).unwrap();
    assert_eq!(highs.get_hessian_num_nz(), 0);
}

#[test]
fn test_infeasible_model() {
    let mut highs = quiet_highs();
    // x in [0, 1] and x >= 2
    highs.add_col(1.0, 0.0, 1.0, &[], &[]).unwrap();
    highs.add_row(2.0, kHighsInf, &[0], &[1.0]).unwrap();

    highs.run().unwrap();
    let status = highs.get_model_status();
    assert!(
        matches!(
            status,
            HighsModelStatus::Infeasible | HighsModelStatus::UnboundedOrInfeasible
        ),
        "unexpected status {status}"
    );
    assert!(!has_solution(status));
}

#[test]
fn test_unbounded_model() {
    let mut highs = quiet_highs();
    // minimize -x - y subject to x - y <= 1, x, y >= 0
    highs.add_vars(&[0.0, 0.0], &[kHighsInf, kHighsInf]).unwrap();
    highs.change_cols_cost(&[0, 1], &[-1.0, -1.0]).unwrap();
    highs
        .add_row(-kHighsInf, 1.0, &[0, 1], &[1.0, -1.0])
        .unwrap();

    highs.run().unwrap();
    let status = highs.get_model_status();
    assert!(
        matches!(
            status,
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible
        ),
        "unexpected status {status}"
    );
}

#[test]
fn test_warm_start_after_cost_change() {
    let mut highs = quiet_highs();
    simple_lp(&mut highs);
    highs.run().unwrap();
    assert!(highs.get_basis().valid);

    // Making x expensive moves the optimum to y = 5.
    highs.change_col_cost(0, 4.0).unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Notset);
    assert!(highs.get_basis().valid, "basis survives a cost change");

    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
    assert!((highs.get_objective_value() - 15.0).abs() < 1e-6);
    assert!((highs.get_solution().col_value[1] - 5.0).abs() < 1e-6);
}

#[test]
fn test_set_solution_fills_row_values() {
    let mut highs = quiet_highs();
    simple_lp(&mut highs);
    highs
        .set_solution(highspy_core::HighsSolution {
            col_value: vec![5.0, 0.0],
            ..Default::default()
        })
        .unwrap();
    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);

    let err = highs
        .set_solution(highspy_core::HighsSolution {
            col_value: vec![1.0],
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.code(), "LENGTH_MISMATCH");
}

#[test]
fn test_set_basis_rejects_non_square() {
    let mut highs = quiet_highs();
    simple_lp(&mut highs);
    let mut basis = highspy_core::HighsBasis::slack(&[0.0, 0.0], &[kHighsInf, kHighsInf], 1);
    basis.col_status[0] = HighsBasisStatus::Basic;
    assert_eq!(highs.set_basis(basis).unwrap_err().code(), "LENGTH_MISMATCH");

    let slack = highspy_core::HighsBasis::slack(&[0.0, 0.0], &[kHighsInf, kHighsInf], 1);
    assert_eq!(highs.set_basis(slack).unwrap(), HighsStatus::Ok);
    assert_eq!(highs.get_info().basis_validity, BasisValidity::Valid);
    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
}

#[test]
fn test_empty_model_uses_offset() {
    let mut highs = quiet_highs();
    highs.change_objective_offset(3.5).unwrap();
    assert_eq!(highs.run().unwrap(), HighsStatus::Ok);
    assert_eq!(highs.get_model_status(), HighsModelStatus::ModelEmpty);
    assert_eq!(highs.get_objective_value(), 3.5);
    assert!(highs.get_solution().value_valid);
    assert!(has_solution(highs.get_model_status()));
}

#[test]
fn test_empty_model_with_rows_excluding_zero() {
    let mut highs = quiet_highs();
    highs.add_row(1.0, 2.0, &[], &[]).unwrap();
    highs.add_row(-1.0, 1.0, &[], &[]).unwrap();
    assert_eq!(highs.run().unwrap(), HighsStatus::Ok);
    assert_eq!(highs.get_model_status(), HighsModelStatus::Infeasible);
    let info = highs.get_info();
    assert_eq!(info.primal_solution_status, SolutionStatus::Infeasible);
    assert_eq!(info.num_primal_infeasibilities, 1);
    assert!((info.max_primal_infeasibility - 1.0).abs() < 1e-12);
    assert!((info.sum_primal_infeasibilities - 1.0).abs() < 1e-12);
    assert_eq!(highs.get_solution().row_value, vec![0.0, 0.0]);

    highs.change_row_bounds(0, -1.0, 2.0).unwrap();
    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::ModelEmpty);
    assert_eq!(
        highs.get_info().primal_solution_status,
        SolutionStatus::Feasible
    );
}

#[test]
fn test_offset_change_keeps_status() {
    let mut highs = quiet_highs();
    simple_lp(&mut highs);
    highs.run().unwrap();
    highs.change_objective_offset(1.0).unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
    assert!((highs.get_objective_value() - 11.0).abs() < 1e-6);
}

#[test]
fn test_options_round_trip_through_handle() {
    let mut highs = quiet_highs();
    highs.set_option_value("time_limit", 10.0).unwrap();
    highs.set_option_value("presolve", "off").unwrap();
    assert_eq!(
        highs.get_option_value("time_limit").unwrap(),
        OptionValue::Double(10.0)
    );
    assert_eq!(
        highs.get_option_type("presolve").unwrap(),
        HighsOptionType::String
    );
    assert_eq!(
        highs.set_option_value("no_such_option", 1).unwrap_err().code(),
        "OPTION_UNKNOWN"
    );

    simple_lp(&mut highs);
    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);

    highs.reset_options().unwrap();
    assert_eq!(
        highs.get_option_value("presolve").unwrap(),
        OptionValue::String("choose".to_string())
    );
}

#[test]
fn test_names_and_queries() {
    let mut highs = quiet_highs();
    simple_lp(&mut highs);
    highs.pass_col_name(0, "x").unwrap();
    highs.pass_col_name(1, "y").unwrap();
    highs.pass_row_name(0, "demand").unwrap();
    assert_eq!(highs.pass_col_name(1, "x").unwrap_err().code(), "NAME_DUPLICATE");

    assert_eq!(highs.get_col_by_name("y").unwrap(), 1);
    assert_eq!(highs.get_row_name(0).unwrap(), "demand");
    assert_eq!(highs.get_col_by_name("z").unwrap_err().code(), "NAME_UNKNOWN");

    let cols = highs.get_cols(&[0, 1]).unwrap();
    assert_eq!(cols.costs, vec![2.0, 3.0]);
    assert_eq!(cols.num_nz, 2);
    let rows = highs.get_row_entries(0).unwrap();
    assert_eq!(rows.start, vec![0, 2]);
    assert_eq!(rows.index, vec![0, 1]);
    assert_eq!(highs.get_infinity(), kHighsInf);
}

#[test]
fn test_delete_rows_and_cols() {
    let mut highs = quiet_highs();
    simple_lp(&mut highs);
    highs.run().unwrap();

    highs.delete_rows(&[0]).unwrap();
    assert_eq!(highs.get_num_row(), 0);
    assert!(!highs.get_basis().valid);

    highs.delete_cols(&[1]).unwrap();
    assert_eq!(highs.get_num_col(), 1);
    assert_eq!(highs.get_num_nz(), 0);
    assert_eq!(
        highs.delete_cols(&[3]).unwrap_err().code(),
        "INDEX_OUT_OF_RANGE"
    );

    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
    assert_eq!(highs.get_objective_value(), 0.0);
}

#[test]
fn test_write_model_and_solution() {
    let dir = std::env::temp_dir().join(format!("highspy-native-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let mut highs = quiet_highs();
    simple_lp(&mut highs);

    let model_path = dir.join("model.mps");
    highs.write_model(&model_path).unwrap();
    assert!(model_path.exists());

    highs.run().unwrap();
    let solution_path = dir.join("solution.sol");
    highs.write_solution(&solution_path, 1).unwrap();
    assert!(solution_path.exists());
    assert_eq!(
        highs.write_solution(&solution_path, 7).unwrap_err().code(),
        "OPTION_ILLEGAL_VALUE"
    );
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_read_model_replaces_incumbent() {
    let dir = std::env::temp_dir().join(format!("highspy-read-model-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let model_path = dir.join("model.mps");
    let mut writer = quiet_highs();
    simple_lp(&mut writer);
    writer.write_model(&model_path).unwrap();

    let mut highs = quiet_highs();
    highs.add_col(1.0, 0.0, 1.0, &[], &[]).unwrap();
    assert!(highs.read_model(dir.join("missing.mps")).is_err());
    assert_eq!(highs.get_num_col(), 1);

    assert_ne!(highs.read_model(&model_path).unwrap(), HighsStatus::Error);
    assert_eq!(highs.get_num_col(), 2);
    assert_eq!(highs.get_num_row(), 1);
    assert_eq!(highs.get_num_nz(), 2);
    assert_eq!(highs.get_lp().col_cost, vec![2.0, 3.0]);
    assert_eq!(highs.get_lp().row_lower, vec![5.0]);
    assert_eq!(highs.get_model_status(), HighsModelStatus::Notset);

    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
    assert!((highs.get_objective_value() - 10.0).abs() < 1e-6);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_basis_solution_and_info_files() {
    let dir = std::env::temp_dir().join(format!("highspy-files-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let basis_path = dir.join("model.bas");
    let solution_path = dir.join("model.sol");
    let info_path = dir.join("info.txt");

    let mut solved = quiet_highs();
    simple_lp(&mut solved);
    assert_eq!(solved.write_info(&info_path).unwrap(), HighsStatus::Warning);
    solved.run().unwrap();
    solved.write_basis(&basis_path).unwrap();
    solved.write_solution(&solution_path, 0).unwrap();
    assert_eq!(solved.write_info(&info_path).unwrap(), HighsStatus::Ok);
    let info_text = std::fs::read_to_string(&info_path).unwrap();
    assert!(info_text.contains("objective_function_value = 10"));

    let mut highs = quiet_highs();
    simple_lp(&mut highs);
    assert_eq!(highs.read_basis(&basis_path).unwrap(), HighsStatus::Ok);
    assert!(highs.get_basis().valid);
    assert_eq!(highs.get_basis().col_status, solved.get_basis().col_status);
    assert_eq!(highs.get_basis().row_status, solved.get_basis().row_status);

    assert_eq!(highs.read_solution(&solution_path).unwrap(), HighsStatus::Ok);
    highs.run().unwrap();
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);
    assert!((highs.get_objective_value() - 10.0).abs() < 1e-6);

    highs.add_col(0.0, 0.0, 1.0, &[], &[]).unwrap();
    assert_eq!(
        highs.read_basis(&basis_path).unwrap_err().code(),
        "LENGTH_MISMATCH"
    );
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_agrees_with_row_problem() {
    use highs::{RowProblem, Sense};

    // maximize 2x + y subject to 3x + y <= 6, x, y in [0, 10]
    let mut problem = RowProblem::default();
    let x = problem.add_column(2.0, 0.0..10.0);
    let y = problem.add_column(1.0, 0.0..10.0);
    problem.add_row(..6.0, [(x, 3.0), (y, 1.0)]);
    let solved = problem.optimise(Sense::Maximise).solve();
    assert_eq!(solved.status(), highs::HighsModelStatus::Optimal);
    let columns = solved.get_solution().columns().to_vec();
    let expected = 2.0 * columns[0] + columns[1];

    let mut highs = quiet_highs();
    highs
        .add_vars(&[0.0, 0.0], &[10.0, 10.0])
        .unwrap();
    highs.change_cols_cost(&[0, 1], &[2.0, 1.0]).unwrap();
    highs
        .add_row(-kHighsInf, 6.0, &[0, 1], &[3.0, 1.0])
        .unwrap();
    highs.change_objective_sense(ObjSense::Maximize).unwrap();
    highs.run().unwrap();

    assert!(
        (highs.get_objective_value() - expected).abs() < 1e-6,
        "Expected objective {}, got {}",
        expected,
        highs.get_objective_value()
    );
}
