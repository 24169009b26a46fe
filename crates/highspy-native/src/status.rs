//! Conversions between native return codes and status enums.

use highspy_core::{HighsModelStatus, HighsStatus};

use crate::error::NativeError;

pub(crate) fn call_status(operation: &'static str, code: i32) -> Result<HighsStatus, NativeError> {
    HighsStatus::from_code(code).ok_or(NativeError::Call {
        operation,
        status: code,
    })
}

pub(crate) fn model_status(code: i32) -> HighsModelStatus {
    HighsModelStatus::from_code(code).unwrap_or(HighsModelStatus::Unknown)
}

/// Short label for logs and bench records.
pub fn model_status_label(status: HighsModelStatus) -> &'static str {
    match status {
        HighsModelStatus::Notset => "notset",
        HighsModelStatus::LoadError => "load_error",
        HighsModelStatus::ModelError => "model_error",
        HighsModelStatus::PresolveError => "presolve_error",
        HighsModelStatus::SolveError => "solve_error",
        HighsModelStatus::PostsolveError => "postsolve_error",
        HighsModelStatus::ModelEmpty => "model_empty",
        HighsModelStatus::Optimal => "optimal",
        HighsModelStatus::Infeasible => "infeasible",
        HighsModelStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
        HighsModelStatus::Unbounded => "unbounded",
        HighsModelStatus::ObjectiveBound => "objective_bound",
        HighsModelStatus::ObjectiveTarget => "objective_target",
        HighsModelStatus::TimeLimit => "time_limit",
        HighsModelStatus::IterationLimit => "iteration_limit",
        HighsModelStatus::Unknown => "unknown",
        HighsModelStatus::SolutionLimit => "solution_limit",
        HighsModelStatus::Interrupt => "interrupt",
    }
}

/// Whether a run ending in `status` may carry a usable primal solution.
pub fn has_solution(status: HighsModelStatus) -> bool {
    matches!(
        status,
        HighsModelStatus::Optimal
            | HighsModelStatus::ModelEmpty
            | HighsModelStatus::TimeLimit
            | HighsModelStatus::IterationLimit
            | HighsModelStatus::SolutionLimit
            | HighsModelStatus::ObjectiveBound
            | HighsModelStatus::ObjectiveTarget
            | HighsModelStatus::Interrupt
    )
}
