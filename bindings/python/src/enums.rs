//! Python enum wrappers for the HiGHS enumerations.
//!
//! Members follow the `kName` convention of the HiGHS bindings
//! (`ObjSense.kMinimize`) and compare equal to their integer codes.

use highspy_core::{
    BasisValidity, HessianFormat, HighsBasisStatus, HighsInfoType, HighsLogType, HighsModelStatus,
    HighsOptionType, HighsStatus, HighsVarType, MatrixFormat, ObjSense, SolutionStatus,
};
use pyo3::prelude::*;

macro_rules! py_enum {
    (
        $(#[$meta:meta])*
        $py:ident => $core:ident as $name:literal {
            $($variant:ident = $code:literal as $member:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[pyclass(from_py_object, name = $name, eq, eq_int)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $py {
            $(
                #[pyo3(name = $member)]
                $variant = $code,
            )+
        }

        impl From<$py> for $core {
            fn from(value: $py) -> Self {
                match value {
                    $($py::$variant => $core::$variant,)+
                }
            }
        }

        impl From<$core> for $py {
            fn from(value: $core) -> Self {
                match value {
                    $($core::$variant => $py::$variant,)+
                }
            }
        }
    };
}

py_enum! {
    /// Objective sense
    PyObjSense => ObjSense as "ObjSense" {
        Minimize = 1 as "kMinimize",
        Maximize = -1 as "kMaximize",
    }
}

py_enum! {
    PyMatrixFormat => MatrixFormat as "MatrixFormat" {
        Colwise = 1 as "kColwise",
        Rowwise = 2 as "kRowwise",
        RowwisePartitioned = 3 as "kRowwisePartitioned",
    }
}

py_enum! {
    PyHessianFormat => HessianFormat as "HessianFormat" {
        Triangular = 1 as "kTriangular",
        Square = 2 as "kSquare",
    }
}

py_enum! {
    PySolutionStatus => SolutionStatus as "SolutionStatus" {
        None = 0 as "kSolutionStatusNone",
        Infeasible = 1 as "kSolutionStatusInfeasible",
        Feasible = 2 as "kSolutionStatusFeasible",
    }
}

py_enum! {
    PyBasisValidity => BasisValidity as "BasisValidity" {
        Invalid = 0 as "kBasisValidityInvalid",
        Valid = 1 as "kBasisValidityValid",
    }
}

py_enum! {
    /// Status of the model after a run
    PyHighsModelStatus => HighsModelStatus as "HighsModelStatus" {
        Notset = 0 as "kNotset",
        LoadError = 1 as "kLoadError",
        ModelError = 2 as "kModelError",
        PresolveError = 3 as "kPresolveError",
        SolveError = 4 as "kSolveError",
        PostsolveError = 5 as "kPostsolveError",
        ModelEmpty = 6 as "kModelEmpty",
        Optimal = 7 as "kOptimal",
        Infeasible = 8 as "kInfeasible",
        UnboundedOrInfeasible = 9 as "kUnboundedOrInfeasible",
        Unbounded = 10 as "kUnbounded",
        ObjectiveBound = 11 as "kObjectiveBound",
        ObjectiveTarget = 12 as "kObjectiveTarget",
        TimeLimit = 13 as "kTimeLimit",
        IterationLimit = 14 as "kIterationLimit",
        Unknown = 15 as "kUnknown",
        SolutionLimit = 16 as "kSolutionLimit",
        Interrupt = 17 as "kInterrupt",
    }
}

py_enum! {
    PyHighsBasisStatus => HighsBasisStatus as "HighsBasisStatus" {
        Lower = 0 as "kLower",
        Basic = 1 as "kBasic",
        Upper = 2 as "kUpper",
        Zero = 3 as "kZero",
        Nonbasic = 4 as "kNonbasic",
    }
}

py_enum! {
    PyHighsVarType => HighsVarType as "HighsVarType" {
        Continuous = 0 as "kContinuous",
        Integer = 1 as "kInteger",
        SemiContinuous = 2 as "kSemiContinuous",
        SemiInteger = 3 as "kSemiInteger",
    }
}

py_enum! {
    /// Return status of a solver call
    PyHighsStatus => HighsStatus as "HighsStatus" {
        Error = -1 as "kError",
        Ok = 0 as "kOk",
        Warning = 1 as "kWarning",
    }
}

py_enum! {
    PyHighsLogType => HighsLogType as "HighsLogType" {
        Info = 1 as "kInfo",
        Detailed = 2 as "kDetailed",
        Verbose = 3 as "kVerbose",
        Warning = 4 as "kWarning",
        Error = 5 as "kError",
    }
}

py_enum! {
    PyHighsOptionType => HighsOptionType as "HighsOptionType" {
        Bool = 0 as "kBool",
        Int = 1 as "kInt",
        Double = 2 as "kDouble",
        String = 3 as "kString",
    }
}

py_enum! {
    PyHighsInfoType => HighsInfoType as "HighsInfoType" {
        Int64 = -1 as "kInt64",
        Int = 1 as "kInt",
        Double = 2 as "kDouble",
    }
}

/// Register enum classes with the Python module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyObjSense>()?;
    m.add_class::<PyMatrixFormat>()?;
    m.add_class::<PyHessianFormat>()?;
    m.add_class::<PySolutionStatus>()?;
    m.add_class::<PyBasisValidity>()?;
    m.add_class::<PyHighsModelStatus>()?;
    m.add_class::<PyHighsBasisStatus>()?;
    m.add_class::<PyHighsVarType>()?;
    m.add_class::<PyHighsStatus>()?;
    m.add_class::<PyHighsLogType>()?;
    m.add_class::<PyHighsOptionType>()?;
    m.add_class::<PyHighsInfoType>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_core() {
        for status in HighsModelStatus::ALL {
            assert_eq!(PyHighsModelStatus::from(status) as i32, status.code());
        }
        assert_eq!(PyHighsStatus::Error as i32, HighsStatus::Error.code());
        assert_eq!(PyObjSense::Maximize as i32, ObjSense::Maximize.code());
        assert_eq!(
            HighsInfoType::from(PyHighsInfoType::Int64),
            HighsInfoType::Int64
        );
    }
}
