//! Errors raised by the native solver handle.

use highspy_core::HighsError;

#[derive(Debug, Clone, PartialEq)]
pub enum NativeError {
    /// Model, option or info data was rejected
    Model(HighsError),
    /// `Highs_create` returned a null handle
    CreateFailed,
    /// A native call reported an error status
    Call { operation: &'static str, status: i32 },
    /// A name or path contained an interior NUL byte
    InvalidString { what: &'static str, value: String },
    /// A dimension does not fit in the native integer type
    TooLarge { what: &'static str, value: usize },
}

impl NativeError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            NativeError::Model(err) => err.code(),
            NativeError::CreateFailed => "NATIVE_CREATE_FAILED",
            NativeError::Call { .. } => "NATIVE_CALL_FAILED",
            NativeError::InvalidString { .. } => "NATIVE_INVALID_STRING",
            NativeError::TooLarge { .. } => "NATIVE_DIMENSION_TOO_LARGE",
        }
    }
}

impl std::fmt::Display for NativeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NativeError::Model(err) => write!(f, "{}", err),
            NativeError::CreateFailed => {
                write!(f, "[{}] failed to create a HiGHS instance", self.code())
            }
            NativeError::Call { operation, status } => write!(
                f,
                "[{}] {} returned status {}",
                self.code(),
                operation,
                status
            ),
            NativeError::InvalidString { what, value } => write!(
                f,
                "[{}] {} {:?} contains a NUL byte",
                self.code(),
                what,
                value
            ),
            NativeError::TooLarge { what, value } => write!(
                f,
                "[{}] {} {} exceeds the native integer range",
                self.code(),
                what,
                value
            ),
        }
    }
}

impl std::error::Error for NativeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NativeError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HighsError> for NativeError {
    fn from(err: HighsError) -> Self {
        NativeError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_keeps_code() {
        let err = NativeError::from(HighsError::UnknownOption("foo".to_string()));
        assert_eq!(err.code(), "OPTION_UNKNOWN");
        assert_eq!(err.to_string(), "[OPTION_UNKNOWN] option \"foo\" is unknown");
    }

    #[test]
    fn test_call_error_display() {
        let err = NativeError::Call {
            operation: "Highs_run",
            status: -1,
        };
        assert_eq!(
            err.to_string(),
            "[NATIVE_CALL_FAILED] Highs_run returned status -1"
        );
    }
}
