/// Structured error types for mdlegal-core.
///
/// Uses `thiserror` so library consumers get composable errors.
/// The binary (mdlegal-cli) wraps these in `anyhow` at its edges.

use std::io;
use thiserror::Error;

use crate::record::RecordId;

/// Main error type for list management operations
#[derive(Error, Debug)]
pub enum ListError {
    /// Update or delete targeted an identifier that is not in the collection
    #[error("Record {id} not found")]
    NotFound { id: RecordId },

    /// Field name is not part of the entity schema for the requested role
    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: String, field: String },

    /// Mutation attempted before the collection finished loading
    #[error("Collection is not loaded")]
    NotLoaded,

    /// Commit or cancel with no draft open
    #[error("No draft is open")]
    NoDraft,

    /// Initial population failed; the view can retry
    #[error("Failed to load records: {reason}")]
    LoadFailed { reason: String },

    /// Settings blob rejected a key or value
    #[error("Settings error: {reason}")]
    Settings { reason: String },

    /// Field value could not be parsed for the target field
    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },
}

/// Result type alias for mdlegal-core operations
pub type Result<T> = std::result::Result<T, ListError>;

impl ListError {
    /// Create a not-found error
    pub fn not_found(id: RecordId) -> Self {
        Self::NotFound { id }
    }

    /// Create an unknown field error
    pub fn unknown_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Create a load failure
    pub fn load_failed(reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            reason: reason.into(),
        }
    }

    /// Create a settings error
    pub fn settings(reason: impl Into<String>) -> Self {
        Self::Settings {
            reason: reason.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Whether the view can recover by retrying the same step
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LoadFailed { .. })
    }
}
