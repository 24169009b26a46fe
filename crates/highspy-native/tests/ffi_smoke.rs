use highspy_native::{Highs, highs_version, version_major};
use highspy_core::{HighsModelStatus, HighsStatus};

#[test]
fn test_minimize_single_column() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    // minimize x subject to 1 <= x
    let mut highs = Highs::new().expect("failed to create handle");
    highs.set_option_value("output_flag", false).unwrap();
    highs.add_var(1.0, f64::INFINITY).unwrap();
    highs.change_col_cost(0, 1.0).unwrap();

    let status = highs.run().expect("run failed");
    assert_eq!(status, HighsStatus::Ok);
    assert_eq!(highs.get_model_status(), HighsModelStatus::Optimal);

    let x = highs.get_solution().col_value[0];
    assert!((x - 1.0).abs() < 1e-6, "Expected x ~1.0, got {}", x);
    assert!(
        (highs.get_objective_value() - 1.0).abs() < 1e-6,
        "Expected objective ~1.0, got {}",
        highs.get_objective_value()
    );
}

#[test]
fn test_version_is_reported() {
    let version = highs_version().expect("missing version string");
    assert!(version.starts_with(&version_major().to_string()));
    let highs = Highs::new().unwrap();
    assert_eq!(highs.version(), version);
}
