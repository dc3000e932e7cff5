//! Session error types.

use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Naming error.
    #[error(transparent)]
    Core(#[from] ontoc_core::CoreError),

    /// Entity definition error.
    #[error(transparent)]
    Registry(#[from] ontoc_registry::RegistryError),

    /// Action compilation error.
    #[error(transparent)]
    Compile(#[from] ontoc_compiler::CompileError),

    /// Output rendering error.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SessionError {
    /// The compile error, if this failure came from the action compiler.
    pub fn as_compile_error(&self) -> Option<&ontoc_compiler::CompileError> {
        match self {
            SessionError::Compile(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
