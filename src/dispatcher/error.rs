use crate::validator::ValidationError;
use std::fmt;

/// Failure returned by a processing function.
///
/// The variant decides the response status; the message is only ever logged
/// (when tracing is enabled) and never sent to the client.
#[derive(Debug)]
pub enum ProcessError {
    /// The addressed resource does not exist (404)
    NotFound(String),
    /// Input passed schema validation but was rejected by the processing logic (400)
    Validation(String),
    /// Anything else (500)
    Internal(anyhow::Error),
}

impl ProcessError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ProcessError::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ProcessError::Validation(message.into())
    }

    /// HTTP status code this failure maps to.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            ProcessError::NotFound(_) => 404,
            ProcessError::Validation(_) => 400,
            ProcessError::Internal(_) => 500,
        }
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::NotFound(message) => write!(f, "Not found: {}", message),
            ProcessError::Validation(message) => write!(f, "Validation failed: {}", message),
            ProcessError::Internal(err) => write!(f, "Internal error: {:#}", err),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Internal(err) => Some(&**err),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ProcessError {
    fn from(err: anyhow::Error) -> Self {
        ProcessError::Internal(err)
    }
}

impl From<ValidationError> for ProcessError {
    fn from(err: ValidationError) -> Self {
        ProcessError::Validation(err.to_string())
    }
}
