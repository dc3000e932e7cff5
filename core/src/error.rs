//! Common error types for ontoc.

use thiserror::Error;

/// Errors raised while constructing identifiers and names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Identifier or api name does not follow the naming rules.
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },

    /// Namespace prefix does not follow the naming rules.
    #[error("Invalid namespace '{value}': {reason}")]
    InvalidNamespace { value: String, reason: String },

    /// A built-in validation pattern failed to compile.
    #[error("Invalid validation pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl CoreError {
    pub fn invalid_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_namespace(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNamespace {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
