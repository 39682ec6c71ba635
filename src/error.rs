//! Error types for the mirage crate.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during generator construction or generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unsupported value in user-supplied constraints.
    #[error("validation error: {0}")]
    Validation(String),

    /// No joint sample satisfies the supplied restrictions.
    #[error("{0}")]
    Infeasible(String),

    /// Embedded archive is empty or malformed.
    #[error("archive error: {0}")]
    Archive(String),

    /// Network definition violates the expected schema.
    #[error("network definition error: {0}")]
    Definition(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required field or data.
    #[error("missing required: {0}")]
    Missing(String),
}

impl Error {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an infeasibility error.
    pub fn infeasible(message: impl Into<String>) -> Self {
        Self::Infeasible(message.into())
    }

    /// Create an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive(message.into())
    }

    /// Create a network definition error.
    pub fn definition(message: impl Into<String>) -> Self {
        Self::Definition(message.into())
    }

    /// Create a missing data error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }
}
