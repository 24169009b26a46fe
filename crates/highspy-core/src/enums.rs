//! Enumerations mirrored from the HiGHS library.
//!
//! Every enum carries the integer code used by the HiGHS C API, so values can
//! cross the FFI boundary with `code()` / `from_code()`.

use std::fmt;

/// Objective sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjSense {
    /// Minimize the objective
    #[default]
    Minimize,
    /// Maximize the objective
    Maximize,
}

impl ObjSense {
    pub fn code(self) -> i32 {
        match self {
            ObjSense::Minimize => 1,
            ObjSense::Maximize => -1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ObjSense::Minimize),
            -1 => Some(ObjSense::Maximize),
            _ => None,
        }
    }
}

/// Storage orientation of a sparse matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixFormat {
    #[default]
    Colwise,
    Rowwise,
    /// Row-wise with each row split into two parts at `p_end`.
    RowwisePartitioned,
}

impl MatrixFormat {
    pub fn code(self) -> i32 {
        match self {
            MatrixFormat::Colwise => 1,
            MatrixFormat::Rowwise => 2,
            MatrixFormat::RowwisePartitioned => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(MatrixFormat::Colwise),
            2 => Some(MatrixFormat::Rowwise),
            3 => Some(MatrixFormat::RowwisePartitioned),
            _ => None,
        }
    }

    /// Whether vectors of this format are rows.
    pub fn is_rowwise(self) -> bool {
        matches!(
            self,
            MatrixFormat::Rowwise | MatrixFormat::RowwisePartitioned
        )
    }
}

/// Storage format of a Hessian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HessianFormat {
    /// Lower triangle stored column-wise
    #[default]
    Triangular,
    /// Full square matrix stored column-wise
    Square,
}

impl HessianFormat {
    pub fn code(self) -> i32 {
        match self {
            HessianFormat::Triangular => 1,
            HessianFormat::Square => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(HessianFormat::Triangular),
            2 => Some(HessianFormat::Square),
            _ => None,
        }
    }
}

/// Status of a primal or dual solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolutionStatus {
    #[default]
    None,
    Infeasible,
    Feasible,
}

impl SolutionStatus {
    pub fn code(self) -> i32 {
        match self {
            SolutionStatus::None => 0,
            SolutionStatus::Infeasible => 1,
            SolutionStatus::Feasible => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SolutionStatus::None),
            1 => Some(SolutionStatus::Infeasible),
            2 => Some(SolutionStatus::Feasible),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolutionStatus::None => "None",
            SolutionStatus::Infeasible => "Infeasible",
            SolutionStatus::Feasible => "Feasible",
        }
    }
}

/// Whether a basis can be used by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BasisValidity {
    #[default]
    Invalid,
    Valid,
}

impl BasisValidity {
    pub fn code(self) -> i32 {
        match self {
            BasisValidity::Invalid => 0,
            BasisValidity::Valid => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(BasisValidity::Invalid),
            1 => Some(BasisValidity::Valid),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BasisValidity::Invalid => "Not valid",
            BasisValidity::Valid => "Valid",
        }
    }
}

/// Status of the model after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighsModelStatus {
    #[default]
    Notset,
    LoadError,
    ModelError,
    PresolveError,
    SolveError,
    PostsolveError,
    ModelEmpty,
    Optimal,
    Infeasible,
    UnboundedOrInfeasible,
    Unbounded,
    ObjectiveBound,
    ObjectiveTarget,
    TimeLimit,
    IterationLimit,
    Unknown,
    SolutionLimit,
    Interrupt,
}

impl HighsModelStatus {
    pub const ALL: [HighsModelStatus; 18] = [
        HighsModelStatus::Notset,
        HighsModelStatus::LoadError,
        HighsModelStatus::ModelError,
        HighsModelStatus::PresolveError,
        HighsModelStatus::SolveError,
        HighsModelStatus::PostsolveError,
        HighsModelStatus::ModelEmpty,
        HighsModelStatus::Optimal,
        HighsModelStatus::Infeasible,
        HighsModelStatus::UnboundedOrInfeasible,
        HighsModelStatus::Unbounded,
        HighsModelStatus::ObjectiveBound,
        HighsModelStatus::ObjectiveTarget,
        HighsModelStatus::TimeLimit,
        HighsModelStatus::IterationLimit,
        HighsModelStatus::Unknown,
        HighsModelStatus::SolutionLimit,
        HighsModelStatus::Interrupt,
    ];

    pub fn code(self) -> i32 {
        match self {
            HighsModelStatus::Notset => 0,
            HighsModelStatus::LoadError => 1,
            HighsModelStatus::ModelError => 2,
            HighsModelStatus::PresolveError => 3,
            HighsModelStatus::SolveError => 4,
            HighsModelStatus::PostsolveError => 5,
            HighsModelStatus::ModelEmpty => 6,
            HighsModelStatus::Optimal => 7,
            HighsModelStatus::Infeasible => 8,
            HighsModelStatus::UnboundedOrInfeasible => 9,
            HighsModelStatus::Unbounded => 10,
            HighsModelStatus::ObjectiveBound => 11,
            HighsModelStatus::ObjectiveTarget => 12,
            HighsModelStatus::TimeLimit => 13,
            HighsModelStatus::IterationLimit => 14,
            HighsModelStatus::Unknown => 15,
            HighsModelStatus::SolutionLimit => 16,
            HighsModelStatus::Interrupt => 17,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.code() == code)
    }

    /// Human-readable description, as HiGHS reports it.
    pub fn as_str(self) -> &'static str {
        match self {
            HighsModelStatus::Notset => "Not Set",
            HighsModelStatus::LoadError => "Load error",
            HighsModelStatus::ModelError => "Model error",
            HighsModelStatus::PresolveError => "Presolve error",
            HighsModelStatus::SolveError => "Solve error",
            HighsModelStatus::PostsolveError => "Postsolve error",
            HighsModelStatus::ModelEmpty => "Empty",
            HighsModelStatus::Optimal => "Optimal",
            HighsModelStatus::Infeasible => "Infeasible",
            HighsModelStatus::UnboundedOrInfeasible => "Primal infeasible or unbounded",
            HighsModelStatus::Unbounded => "Unbounded",
            HighsModelStatus::ObjectiveBound => "Bound on objective reached",
            HighsModelStatus::ObjectiveTarget => "Target for objective reached",
            HighsModelStatus::TimeLimit => "Time limit reached",
            HighsModelStatus::IterationLimit => "Iteration limit reached",
            HighsModelStatus::Unknown => "Unknown",
            HighsModelStatus::SolutionLimit => "Solution limit reached",
            HighsModelStatus::Interrupt => "Interrupted by user",
        }
    }
}

impl fmt::Display for HighsModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basis status of a column or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighsBasisStatus {
    /// At lower bound, including fixed variables
    #[default]
    Lower,
    Basic,
    /// At upper bound
    Upper,
    /// Free and nonbasic at zero
    Zero,
    /// Nonbasic without bound information
    Nonbasic,
}

impl HighsBasisStatus {
    pub fn code(self) -> i32 {
        match self {
            HighsBasisStatus::Lower => 0,
            HighsBasisStatus::Basic => 1,
            HighsBasisStatus::Upper => 2,
            HighsBasisStatus::Zero => 3,
            HighsBasisStatus::Nonbasic => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(HighsBasisStatus::Lower),
            1 => Some(HighsBasisStatus::Basic),
            2 => Some(HighsBasisStatus::Upper),
            3 => Some(HighsBasisStatus::Zero),
            4 => Some(HighsBasisStatus::Nonbasic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HighsBasisStatus::Lower => "At lower/fixed bound",
            HighsBasisStatus::Basic => "Basic",
            HighsBasisStatus::Upper => "At upper bound",
            HighsBasisStatus::Zero => "Free at zero",
            HighsBasisStatus::Nonbasic => "Nonbasic",
        }
    }

    /// Nonbasic status for a variable with the given bounds: at a finite
    /// lower bound if there is one, else at a finite upper bound, else zero.
    pub fn nonbasic_for_bounds(lower: f64, upper: f64) -> Self {
        if lower.is_finite() {
            HighsBasisStatus::Lower
        } else if upper.is_finite() {
            HighsBasisStatus::Upper
        } else {
            HighsBasisStatus::Zero
        }
    }
}

/// Integrality type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighsVarType {
    #[default]
    Continuous,
    Integer,
    SemiContinuous,
    SemiInteger,
}

impl HighsVarType {
    pub fn code(self) -> i32 {
        match self {
            HighsVarType::Continuous => 0,
            HighsVarType::Integer => 1,
            HighsVarType::SemiContinuous => 2,
            HighsVarType::SemiInteger => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(HighsVarType::Continuous),
            1 => Some(HighsVarType::Integer),
            2 => Some(HighsVarType::SemiContinuous),
            3 => Some(HighsVarType::SemiInteger),
            _ => None,
        }
    }

    /// Whether the column must take integer values when active.
    pub fn is_integral(self) -> bool {
        matches!(self, HighsVarType::Integer | HighsVarType::SemiInteger)
    }
}

/// Return status of a HiGHS call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighsStatus {
    Error,
    #[default]
    Ok,
    Warning,
}

impl HighsStatus {
    pub fn code(self) -> i32 {
        match self {
            HighsStatus::Error => -1,
            HighsStatus::Ok => 0,
            HighsStatus::Warning => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(HighsStatus::Error),
            0 => Some(HighsStatus::Ok),
            1 => Some(HighsStatus::Warning),
            _ => None,
        }
    }

    /// Combine two statuses, keeping the more severe one.
    pub fn worse(self, other: HighsStatus) -> HighsStatus {
        match (self, other) {
            (HighsStatus::Error, _) | (_, HighsStatus::Error) => HighsStatus::Error,
            (HighsStatus::Warning, _) | (_, HighsStatus::Warning) => HighsStatus::Warning,
            _ => HighsStatus::Ok,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HighsStatus::Error => "Error",
            HighsStatus::Ok => "OK",
            HighsStatus::Warning => "Warning",
        }
    }
}

impl fmt::Display for HighsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighsLogType {
    Info,
    Detailed,
    Verbose,
    Warning,
    Error,
}

impl HighsLogType {
    pub fn code(self) -> i32 {
        match self {
            HighsLogType::Info => 1,
            HighsLogType::Detailed => 2,
            HighsLogType::Verbose => 3,
            HighsLogType::Warning => 4,
            HighsLogType::Error => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(HighsLogType::Info),
            2 => Some(HighsLogType::Detailed),
            3 => Some(HighsLogType::Verbose),
            4 => Some(HighsLogType::Warning),
            5 => Some(HighsLogType::Error),
            _ => None,
        }
    }
}

/// Value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighsOptionType {
    Bool,
    Int,
    Double,
    String,
}

impl HighsOptionType {
    pub fn code(self) -> i32 {
        match self {
            HighsOptionType::Bool => 0,
            HighsOptionType::Int => 1,
            HighsOptionType::Double => 2,
            HighsOptionType::String => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HighsOptionType::Bool => "bool",
            HighsOptionType::Int => "HighsInt",
            HighsOptionType::Double => "double",
            HighsOptionType::String => "string",
        }
    }
}

/// Value type of an info record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighsInfoType {
    Int64,
    Int,
    Double,
}

impl HighsInfoType {
    pub fn code(self) -> i32 {
        match self {
            HighsInfoType::Int64 => -1,
            HighsInfoType::Int => 1,
            HighsInfoType::Double => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_status_codes_round_trip() {
        for status in HighsModelStatus::ALL {
            assert_eq!(HighsModelStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(HighsModelStatus::Optimal.code(), 7);
        assert_eq!(HighsModelStatus::Interrupt.code(), 17);
        assert_eq!(HighsModelStatus::from_code(18), None);
    }

    #[test]
    fn test_obj_sense_codes() {
        assert_eq!(ObjSense::Minimize.code(), 1);
        assert_eq!(ObjSense::Maximize.code(), -1);
        assert_eq!(ObjSense::from_code(0), None);
    }

    #[test]
    fn test_status_worse() {
        assert_eq!(HighsStatus::Ok.worse(HighsStatus::Ok), HighsStatus::Ok);
        assert_eq!(
            HighsStatus::Ok.worse(HighsStatus::Warning),
            HighsStatus::Warning
        );
        assert_eq!(
            HighsStatus::Warning.worse(HighsStatus::Error),
            HighsStatus::Error
        );
        assert_eq!(HighsStatus::Error.worse(HighsStatus::Ok), HighsStatus::Error);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(HighsModelStatus::Optimal.to_string(), "Optimal");
        assert_eq!(
            HighsModelStatus::UnboundedOrInfeasible.as_str(),
            "Primal infeasible or unbounded"
        );
        assert_eq!(HighsBasisStatus::Zero.as_str(), "Free at zero");
        assert_eq!(BasisValidity::Invalid.as_str(), "Not valid");
        assert_eq!(SolutionStatus::Feasible.as_str(), "Feasible");
        assert_eq!(HighsStatus::Ok.to_string(), "OK");
    }

    #[test]
    fn test_nonbasic_for_bounds() {
        assert_eq!(
            HighsBasisStatus::nonbasic_for_bounds(0.0, 1.0),
            HighsBasisStatus::Lower
        );
        assert_eq!(
            HighsBasisStatus::nonbasic_for_bounds(f64::NEG_INFINITY, 1.0),
            HighsBasisStatus::Upper
        );
        assert_eq!(
            HighsBasisStatus::nonbasic_for_bounds(f64::NEG_INFINITY, f64::INFINITY),
            HighsBasisStatus::Zero
        );
    }

    #[test]
    fn test_var_type_integrality() {
        assert!(HighsVarType::Integer.is_integral());
        assert!(HighsVarType::SemiInteger.is_integral());
        assert!(!HighsVarType::SemiContinuous.is_integral());
        assert_eq!(HighsVarType::from_code(3), Some(HighsVarType::SemiInteger));
    }

    #[test]
    fn test_matrix_format_orientation() {
        assert!(!MatrixFormat::Colwise.is_rowwise());
        assert!(MatrixFormat::Rowwise.is_rowwise());
        assert!(MatrixFormat::RowwisePartitioned.is_rowwise());
        assert_eq!(MatrixFormat::from_code(2), Some(MatrixFormat::Rowwise));
    }
}
