//! Solving through the native instance.

use highs_sys::HighsInt;
use highspy_core::log::highs_log;
use highspy_core::{
    BasisValidity, HighsBasis, HighsBasisStatus, HighsInfo, HighsLogType, HighsModelStatus,
    HighsStatus, SolutionStatus,
};
use highspy_tools::current_rss;
use tracing::{debug, info};

use super::{Highs, HighsResult};
use crate::error::NativeError;
use crate::status::{call_status, model_status, model_status_label};

fn basis_statuses(codes: &[HighsInt]) -> Vec<HighsBasisStatus> {
    codes
        .iter()
        .map(|&code| HighsBasisStatus::from_code(code as i32).unwrap_or(HighsBasisStatus::Nonbasic))
        .collect()
}

/// Log category for the status a run ended with.
fn run_log_type(status: HighsModelStatus) -> HighsLogType {
    match status {
        HighsModelStatus::LoadError
        | HighsModelStatus::ModelError
        | HighsModelStatus::PresolveError
        | HighsModelStatus::SolveError
        | HighsModelStatus::PostsolveError => HighsLogType::Error,
        HighsModelStatus::Infeasible
        | HighsModelStatus::Unbounded
        | HighsModelStatus::UnboundedOrInfeasible => HighsLogType::Warning,
        _ => HighsLogType::Detailed,
    }
}

impl Highs {
    /// Solve the incumbent model.
    ///
    /// A model without columns is solved in place: its objective is the
    /// offset and the status is `ModelEmpty`.
    pub fn run(&mut self) -> HighsResult {
        if self.model.lp.num_col == 0 {
            self.run_empty();
            return Ok(HighsStatus::Ok);
        }

        self.sync_native()?;
        self.pass_warm_start()?;

        let rss_before = current_rss();
        let code = self.raw.run();
        let rss_after = current_rss();
        let status = call_status("Highs_run", code as i32)?;

        self.model_status = model_status(self.raw.model_status() as i32);
        self.objective_value = self.raw.objective_value();
        self.run_time = self.raw.run_time();
        self.read_info();
        self.read_solution()?;

        info!(
            component = "highs",
            operation = "run",
            status = %status,
            model_status = model_status_label(self.model_status),
            objective_value = self.objective_value,
            run_time = self.run_time,
            rss_before = ?rss_before,
            rss_after = ?rss_after,
            "Run finished"
        );
        highs_log(
            run_log_type(self.model_status),
            "run",
            &format!("Model status: {}", model_status_label(self.model_status)),
        );
        Ok(status)
    }

    /// Solve a model without columns: every row activity is zero, so the
    /// model is feasible exactly when each row admits zero.
    fn run_empty(&mut self) {
        let lp = &self.model.lp;
        let tolerance = self.options.primal_feasibility_tolerance();
        let mut num_infeasible = 0;
        let mut max_infeasibility: f64 = 0.0;
        let mut sum_infeasibility = 0.0;
        for (&lower, &upper) in lp.row_lower.iter().zip(&lp.row_upper) {
            let violation = lower.max(0.0).max(-upper.min(0.0));
            if violation > tolerance {
                num_infeasible += 1;
            }
            max_infeasibility = max_infeasibility.max(violation);
            sum_infeasibility += violation;
        }
        let feasible = num_infeasible == 0;

        self.model_status = if feasible {
            HighsModelStatus::ModelEmpty
        } else {
            HighsModelStatus::Infeasible
        };
        self.objective_value = lp.offset;
        self.run_time = 0.0;
        self.solution.col_value.clear();
        self.solution.col_dual.clear();
        self.solution.row_value = vec![0.0; lp.num_row];
        self.solution.row_dual = vec![0.0; lp.num_row];
        self.solution.value_valid = true;
        self.solution.dual_valid = feasible;
        self.basis = HighsBasis::slack(&[], &[], lp.num_row);
        self.info = HighsInfo {
            valid: true,
            primal_solution_status: if feasible {
                SolutionStatus::Feasible
            } else {
                SolutionStatus::Infeasible
            },
            dual_solution_status: if feasible {
                SolutionStatus::Feasible
            } else {
                SolutionStatus::None
            },
            basis_validity: BasisValidity::Valid,
            objective_function_value: lp.offset,
            num_primal_infeasibilities: num_infeasible,
            max_primal_infeasibility: max_infeasibility,
            sum_primal_infeasibilities: sum_infeasibility,
            num_dual_infeasibilities: 0,
            max_dual_infeasibility: 0.0,
            sum_dual_infeasibilities: 0.0,
            ..HighsInfo::default()
        };
        self.pending_solution = None;
        debug!(
            component = "highs",
            operation = "run",
            status = "ok",
            num_row = lp.num_row,
            num_infeasible = num_infeasible,
            "Model has no columns"
        );
    }

    /// Pass options and model to the native instance if either changed.
    pub(super) fn sync_native(&mut self) -> Result<(), NativeError> {
        if self.native_synced {
            return Ok(());
        }
        self.sync_options()?;
        self.raw.pass_lp(&self.model.lp)?;
        if self.model.is_qp() {
            self.raw.pass_hessian(&self.model.hessian)?;
        }
        self.native_synced = true;
        debug!(
            component = "highs",
            operation = "sync",
            status = "ok",
            num_col = self.model.lp.num_col,
            num_row = self.model.lp.num_row,
            "Native instance synchronized"
        );
        Ok(())
    }

    pub(super) fn sync_options(&mut self) -> Result<(), NativeError> {
        self.raw.reset_options()?;
        for (name, value) in self.options.non_default() {
            self.raw.set_option(name, value)?;
        }
        Ok(())
    }

    fn pass_warm_start(&mut self) -> Result<(), NativeError> {
        let lp = &self.model.lp;
        if self.basis.fits(lp.num_col, lp.num_row) && !self.basis.alien {
            let col_status: Vec<HighsInt> = self
                .basis
                .col_status
                .iter()
                .map(|s| s.code() as HighsInt)
                .collect();
            let row_status: Vec<HighsInt> = self
                .basis
                .row_status
                .iter()
                .map(|s| s.code() as HighsInt)
                .collect();
            self.raw.set_basis(&col_status, &row_status)?;
            debug!(
                component = "highs",
                operation = "warm_start",
                status = "ok",
                source = "basis",
                "Passed basis"
            );
        } else if let Some(solution) = self.pending_solution.take() {
            self.raw.set_solution(
                &solution.col_value,
                &solution.row_value,
                &solution.col_dual,
                &solution.row_dual,
            )?;
            debug!(
                component = "highs",
                operation = "warm_start",
                status = "ok",
                source = "solution",
                "Passed solution"
            );
        }
        Ok(())
    }

    fn read_info(&mut self) {
        let mut info = HighsInfo {
            valid: true,
            ..HighsInfo::default()
        };
        for name in HighsInfo::NAMES {
            let read = match name {
                "mip_node_count" => self.raw.int64_info(name).map(|v| info.mip_node_count = v),
                "simplex_iteration_count" => self
                    .raw
                    .int_info(name)
                    .map(|v| info.simplex_iteration_count = v as i32),
                "ipm_iteration_count" => self
                    .raw
                    .int_info(name)
                    .map(|v| info.ipm_iteration_count = v as i32),
                "crossover_iteration_count" => self
                    .raw
                    .int_info(name)
                    .map(|v| info.crossover_iteration_count = v as i32),
                "qp_iteration_count" => self
                    .raw
                    .int_info(name)
                    .map(|v| info.qp_iteration_count = v as i32),
                "primal_solution_status" => self.raw.int_info(name).map(|v| {
                    info.primal_solution_status =
                        SolutionStatus::from_code(v as i32).unwrap_or_default();
                }),
                "dual_solution_status" => self.raw.int_info(name).map(|v| {
                    info.dual_solution_status =
                        SolutionStatus::from_code(v as i32).unwrap_or_default();
                }),
                "basis_validity" => self.raw.int_info(name).map(|v| {
                    info.basis_validity = BasisValidity::from_code(v as i32).unwrap_or_default();
                }),
                "num_primal_infeasibilities" => self
                    .raw
                    .int_info(name)
                    .map(|v| info.num_primal_infeasibilities = v as i32),
                "num_dual_infeasibilities" => self
                    .raw
                    .int_info(name)
                    .map(|v| info.num_dual_infeasibilities = v as i32),
                "objective_function_value" => self
                    .raw
                    .double_info(name)
                    .map(|v| info.objective_function_value = v),
                "mip_dual_bound" => self.raw.double_info(name).map(|v| info.mip_dual_bound = v),
                "mip_gap" => self.raw.double_info(name).map(|v| info.mip_gap = v),
                "max_integrality_violation" => self
                    .raw
                    .double_info(name)
                    .map(|v| info.max_integrality_violation = v),
                "max_primal_infeasibility" => self
                    .raw
                    .double_info(name)
                    .map(|v| info.max_primal_infeasibility = v),
                "sum_primal_infeasibilities" => self
                    .raw
                    .double_info(name)
                    .map(|v| info.sum_primal_infeasibilities = v),
                "max_dual_infeasibility" => self
                    .raw
                    .double_info(name)
                    .map(|v| info.max_dual_infeasibility = v),
                "sum_dual_infeasibilities" => self
                    .raw
                    .double_info(name)
                    .map(|v| info.sum_dual_infeasibilities = v),
                _ => None,
            };
            if read.is_none() {
                debug!(
                    component = "highs",
                    operation = "read_info",
                    status = "skipped",
                    name = name,
                    "Info value not available"
                );
            }
        }
        self.info = info;
    }

    fn read_solution(&mut self) -> Result<(), NativeError> {
        let num_col = self.model.lp.num_col;
        let num_row = self.model.lp.num_row;
        let value_valid = self.info.primal_solution_status != SolutionStatus::None;
        let dual_valid = self.info.dual_solution_status != SolutionStatus::None;

        if value_valid || dual_valid {
            let [col_value, col_dual, row_value, row_dual] = self.raw.solution(num_col, num_row)?;
            self.solution.col_value = col_value;
            self.solution.col_dual = col_dual;
            self.solution.row_value = row_value;
            self.solution.row_dual = row_dual;
        } else {
            self.solution.clear();
        }
        self.solution.value_valid = value_valid;
        self.solution.dual_valid = dual_valid;

        if self.info.basis_validity == BasisValidity::Valid {
            let (col_status, row_status) = self.raw.basis(num_col, num_row)?;
            self.basis = HighsBasis {
                valid: true,
                alien: false,
                was_alien: false,
                debug_origin_name: "HiGHS".to_string(),
                col_status: basis_statuses(&col_status),
                row_status: basis_statuses(&row_status),
                ..HighsBasis::default()
            };
        } else {
            self.basis.invalidate();
        }
        self.pending_solution = None;
        Ok(())
    }
}
