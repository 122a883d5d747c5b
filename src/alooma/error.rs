use std::fmt;

use crate::alooma::methods::MethodPath;

/// Stable error codes for adapter failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AloomaErrorCode {
    /// No alooma client handle is installed.
    GlobalMissing,
    /// The installed handle does not expose the requested method.
    NotCallable,
    /// Settings were written after the service had been created.
    SettingsFrozen,
    /// Anything else.
    Internal,
}

impl AloomaErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AloomaErrorCode::GlobalMissing => "alooma/global-missing",
            AloomaErrorCode::NotCallable => "alooma/not-callable",
            AloomaErrorCode::SettingsFrozen => "alooma/settings-frozen",
            AloomaErrorCode::Internal => "alooma/internal",
        }
    }
}

/// Error type shared by the adapter surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AloomaError {
    pub code: AloomaErrorCode,
    message: String,
}

pub type AloomaResult<T> = Result<T, AloomaError>;

impl AloomaError {
    pub fn new(code: AloomaErrorCode, message: impl Into<String>) -> Self {
        AloomaError {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AloomaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code.as_str())
    }
}

impl std::error::Error for AloomaError {}

pub(crate) fn global_missing(message: impl Into<String>) -> AloomaError {
    AloomaError::new(AloomaErrorCode::GlobalMissing, message)
}

/// Error an [`AloomaGlobal`](crate::alooma::AloomaGlobal) implementation
/// returns when `path` does not resolve to a function on the client.
pub fn not_callable(path: MethodPath) -> AloomaError {
    AloomaError::new(
        AloomaErrorCode::NotCallable,
        format!("`{path}` is not callable on the installed alooma handle"),
    )
}

pub(crate) fn settings_frozen(message: impl Into<String>) -> AloomaError {
    AloomaError::new(AloomaErrorCode::SettingsFrozen, message)
}

pub(crate) fn internal_error(message: impl Into<String>) -> AloomaError {
    AloomaError::new(AloomaErrorCode::Internal, message)
}
