//! Run statistics reported after a solve.

use std::fs;
use std::path::Path;

use crate::consts::{ILLEGAL_INFEASIBILITY_COUNT, ILLEGAL_INFEASIBILITY_MEASURE, kHighsInf};
use crate::enums::{BasisValidity, HighsInfoType, SolutionStatus};
use crate::error::HighsError;

/// Value of a single info record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfoValue {
    Int(i32),
    Int64(i64),
    Double(f64),
}

impl InfoValue {
    pub fn info_type(self) -> HighsInfoType {
        match self {
            InfoValue::Int(_) => HighsInfoType::Int,
            InfoValue::Int64(_) => HighsInfoType::Int64,
            InfoValue::Double(_) => HighsInfoType::Double,
        }
    }
}

impl std::fmt::Display for InfoValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InfoValue::Int(v) => write!(f, "{v}"),
            InfoValue::Int64(v) => write!(f, "{v}"),
            InfoValue::Double(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HighsInfo {
    pub valid: bool,
    pub mip_node_count: i64,
    pub simplex_iteration_count: i32,
    pub ipm_iteration_count: i32,
    pub qp_iteration_count: i32,
    pub crossover_iteration_count: i32,
    pub primal_solution_status: SolutionStatus,
    pub dual_solution_status: SolutionStatus,
    pub basis_validity: BasisValidity,
    pub objective_function_value: f64,
    pub mip_dual_bound: f64,
    pub mip_gap: f64,
    pub max_integrality_violation: f64,
    pub num_primal_infeasibilities: i32,
    pub max_primal_infeasibility: f64,
    pub sum_primal_infeasibilities: f64,
    pub num_dual_infeasibilities: i32,
    pub max_dual_infeasibility: f64,
    pub sum_dual_infeasibilities: f64,
}

impl Default for HighsInfo {
    fn default() -> Self {
        Self {
            valid: false,
            mip_node_count: -1,
            simplex_iteration_count: -1,
            ipm_iteration_count: -1,
            qp_iteration_count: -1,
            crossover_iteration_count: -1,
            primal_solution_status: SolutionStatus::None,
            dual_solution_status: SolutionStatus::None,
            basis_validity: BasisValidity::Invalid,
            objective_function_value: 0.0,
            mip_dual_bound: 0.0,
            mip_gap: kHighsInf,
            max_integrality_violation: ILLEGAL_INFEASIBILITY_MEASURE,
            num_primal_infeasibilities: ILLEGAL_INFEASIBILITY_COUNT,
            max_primal_infeasibility: ILLEGAL_INFEASIBILITY_MEASURE,
            sum_primal_infeasibilities: ILLEGAL_INFEASIBILITY_MEASURE,
            num_dual_infeasibilities: ILLEGAL_INFEASIBILITY_COUNT,
            max_dual_infeasibility: ILLEGAL_INFEASIBILITY_MEASURE,
            sum_dual_infeasibilities: ILLEGAL_INFEASIBILITY_MEASURE,
        }
    }
}

impl HighsInfo {
    /// Names of every info record, in the order HiGHS reports them.
    pub const NAMES: [&'static str; 18] = [
        "simplex_iteration_count",
        "ipm_iteration_count",
        "crossover_iteration_count",
        "qp_iteration_count",
        "primal_solution_status",
        "dual_solution_status",
        "basis_validity",
        "objective_function_value",
        "mip_node_count",
        "mip_dual_bound",
        "mip_gap",
        "max_integrality_violation",
        "num_primal_infeasibilities",
        "max_primal_infeasibility",
        "sum_primal_infeasibilities",
        "num_dual_infeasibilities",
        "max_dual_infeasibility",
        "sum_dual_infeasibilities",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    pub fn get_value(&self, name: &str) -> Result<InfoValue, HighsError> {
        let value = match name {
            "simplex_iteration_count" => InfoValue::Int(self.simplex_iteration_count),
            "ipm_iteration_count" => InfoValue::Int(self.ipm_iteration_count),
            "crossover_iteration_count" => InfoValue::Int(self.crossover_iteration_count),
            "qp_iteration_count" => InfoValue::Int(self.qp_iteration_count),
            "primal_solution_status" => InfoValue::Int(self.primal_solution_status.code()),
            "dual_solution_status" => InfoValue::Int(self.dual_solution_status.code()),
            "basis_validity" => InfoValue::Int(self.basis_validity.code()),
            "objective_function_value" => InfoValue::Double(self.objective_function_value),
            "mip_node_count" => InfoValue::Int64(self.mip_node_count),
            "mip_dual_bound" => InfoValue::Double(self.mip_dual_bound),
            "mip_gap" => InfoValue::Double(self.mip_gap),
            "max_integrality_violation" => InfoValue::Double(self.max_integrality_violation),
            "num_primal_infeasibilities" => InfoValue::Int(self.num_primal_infeasibilities),
            "max_primal_infeasibility" => InfoValue::Double(self.max_primal_infeasibility),
            "sum_primal_infeasibilities" => InfoValue::Double(self.sum_primal_infeasibilities),
            "num_dual_infeasibilities" => InfoValue::Int(self.num_dual_infeasibilities),
            "max_dual_infeasibility" => InfoValue::Double(self.max_dual_infeasibility),
            "sum_dual_infeasibilities" => InfoValue::Double(self.sum_dual_infeasibilities),
            _ => return Err(HighsError::UnknownInfo(name.to_string())),
        };
        Ok(value)
    }

    pub fn get_type(&self, name: &str) -> Result<HighsInfoType, HighsError> {
        self.get_value(name).map(InfoValue::info_type)
    }

    /// Render every record as `name = value`, preceded by a comment with
    /// its type.
    pub fn to_file_string(&self) -> String {
        let mut out = String::new();
        for name in Self::NAMES {
            let Ok(value) = self.get_value(name) else {
                continue;
            };
            let kind = match value.info_type() {
                HighsInfoType::Int => "integer",
                HighsInfoType::Int64 => "int64_t",
                HighsInfoType::Double => "double",
            };
            out.push_str(&format!("# [type: {kind}]\n{name} = {value}\n\n"));
        }
        out
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), HighsError> {
        let path = path.as_ref();
        fs::write(path, self.to_file_string()).map_err(|err| HighsError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        let info = HighsInfo::new();
        for name in HighsInfo::NAMES {
            assert!(info.get_value(name).is_ok(), "{name} should resolve");
        }
    }

    #[test]
    fn test_unknown_info() {
        let err = HighsInfo::new().get_value("no_such_info").unwrap_err();
        assert_eq!(err.code(), "INFO_UNKNOWN");
    }

    #[test]
    fn test_file_string_lists_every_record() {
        let info = HighsInfo {
            valid: true,
            simplex_iteration_count: 3,
            objective_function_value: 1.5,
            ..HighsInfo::default()
        };
        let text = info.to_file_string();
        assert!(text.contains("# [type: integer]\nsimplex_iteration_count = 3\n"));
        assert!(text.contains("objective_function_value = 1.5\n"));
        assert!(text.contains("# [type: int64_t]\nmip_node_count = -1\n"));
        assert_eq!(text.matches(" = ").count(), HighsInfo::NAMES.len());
    }

    #[test]
    fn test_types_and_defaults() {
        let info = HighsInfo::new();
        assert_eq!(info.get_type("mip_node_count"), Ok(HighsInfoType::Int64));
        assert_eq!(info.get_type("mip_gap"), Ok(HighsInfoType::Double));
        assert_eq!(info.get_type("basis_validity"), Ok(HighsInfoType::Int));
        assert_eq!(
            info.get_value("num_primal_infeasibilities"),
            Ok(InfoValue::Int(-1))
        );
        assert_eq!(info.get_value("mip_gap"), Ok(InfoValue::Double(f64::INFINITY)));
    }
}
