//! Error types for model data, options and info.

use crate::enums::HighsOptionType;

/// Errors raised while validating or editing HiGHS data.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsError {
    /// Index outside `0..len`
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
    /// Array length does not match the declared dimension
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    /// Lower bound of +infinity
    IllegalLowerBound {
        kind: &'static str,
        index: usize,
        value: f64,
    },
    /// Upper bound of -infinity
    IllegalUpperBound {
        kind: &'static str,
        index: usize,
        value: f64,
    },
    /// Matrix entry too large in magnitude
    LargeMatrixValue {
        vector: usize,
        index: usize,
        value: f64,
    },
    /// Same index appears twice in one vector
    DuplicateIndex { vector: usize, index: usize },
    /// Start array is not a valid compressed layout
    InvalidStart { reason: String },
    /// Hessian data is malformed
    InvalidHessian { reason: String },
    /// Option name is not registered
    UnknownOption(String),
    /// Option value has the wrong type
    OptionType {
        name: String,
        expected: HighsOptionType,
    },
    /// Option value outside the allowed range or set
    OptionValue { name: String, value: String },
    /// Info name is not registered
    UnknownInfo(String),
    /// No column or row with this name
    UnknownName { kind: &'static str, name: String },
    /// Name used by more than one column or row
    DuplicateName { kind: &'static str, name: String },
    /// Options file line could not be parsed
    OptionFile { line: usize, reason: String },
    /// Basis or solution file line could not be parsed
    FileParse {
        kind: &'static str,
        line: usize,
        reason: String,
    },
    /// Filesystem failure
    Io { path: String, reason: String },
}

impl HighsError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            HighsError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            HighsError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            HighsError::IllegalLowerBound { .. } => "BOUND_ILLEGAL_LOWER",
            HighsError::IllegalUpperBound { .. } => "BOUND_ILLEGAL_UPPER",
            HighsError::LargeMatrixValue { .. } => "MATRIX_LARGE_VALUE",
            HighsError::DuplicateIndex { .. } => "MATRIX_DUPLICATE_INDEX",
            HighsError::InvalidStart { .. } => "MATRIX_INVALID_START",
            HighsError::InvalidHessian { .. } => "HESSIAN_INVALID",
            HighsError::UnknownOption(_) => "OPTION_UNKNOWN",
            HighsError::OptionType { .. } => "OPTION_WRONG_TYPE",
            HighsError::OptionValue { .. } => "OPTION_ILLEGAL_VALUE",
            HighsError::UnknownInfo(_) => "INFO_UNKNOWN",
            HighsError::UnknownName { .. } => "NAME_UNKNOWN",
            HighsError::DuplicateName { .. } => "NAME_DUPLICATE",
            HighsError::OptionFile { .. } => "OPTION_FILE_PARSE",
            HighsError::FileParse { .. } => "FILE_PARSE",
            HighsError::Io { .. } => "IO_FAILED",
        }
    }
}

impl std::fmt::Display for HighsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HighsError::IndexOutOfRange { kind, index, len } => write!(
                f,
                "[{}] {} index {} out of range [0, {})",
                self.code(),
                kind,
                index,
                len
            ),
            HighsError::LengthMismatch {
                what,
                expected,
                got,
            } => write!(
                f,
                "[{}] {} has length {} but {} was expected",
                self.code(),
                what,
                got,
                expected
            ),
            HighsError::IllegalLowerBound { kind, index, value } => write!(
                f,
                "[{}] {} {} has illegal lower bound {}",
                self.code(),
                kind,
                index,
                value
            ),
            HighsError::IllegalUpperBound { kind, index, value } => write!(
                f,
                "[{}] {} {} has illegal upper bound {}",
                self.code(),
                kind,
                index,
                value
            ),
            HighsError::LargeMatrixValue {
                vector,
                index,
                value,
            } => write!(
                f,
                "[{}] matrix vector {} has large value |{}| at index {}",
                self.code(),
                vector,
                value,
                index
            ),
            HighsError::DuplicateIndex { vector, index } => write!(
                f,
                "[{}] matrix vector {} has duplicate index {}",
                self.code(),
                vector,
                index
            ),
            HighsError::InvalidStart { reason } => {
                write!(f, "[{}] matrix start invalid: {}", self.code(), reason)
            }
            HighsError::InvalidHessian { reason } => {
                write!(f, "[{}] Hessian invalid: {}", self.code(), reason)
            }
            HighsError::UnknownOption(name) => {
                write!(f, "[{}] option \"{}\" is unknown", self.code(), name)
            }
            HighsError::OptionType { name, expected } => write!(
                f,
                "[{}] option \"{}\" expects a value of type {}",
                self.code(),
                name,
                expected.as_str()
            ),
            HighsError::OptionValue { name, value } => write!(
                f,
                "[{}] value \"{}\" is illegal for option \"{}\"",
                self.code(),
                value,
                name
            ),
            HighsError::UnknownInfo(name) => {
                write!(f, "[{}] info \"{}\" is unknown", self.code(), name)
            }
            HighsError::UnknownName { kind, name } => {
                write!(f, "[{}] {} name \"{}\" not found", self.code(), kind, name)
            }
            HighsError::DuplicateName { kind, name } => write!(
                f,
                "[{}] {} name \"{}\" is not unique",
                self.code(),
                kind,
                name
            ),
            HighsError::OptionFile { line, reason } => {
                write!(f, "[{}] line {}: {}", self.code(), line, reason)
            }
            HighsError::FileParse { kind, line, reason } => {
                write!(f, "[{}] {} file line {}: {}", self.code(), kind, line, reason)
            }
            HighsError::Io { path, reason } => {
                write!(f, "[{}] {}: {}", self.code(), path, reason)
            }
        }
    }
}

impl std::error::Error for HighsError {}
