//! Error types for the onboarding library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all onboarding operations.
#[derive(Error, Debug)]
pub enum OnboardError {
    /// Draft database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Inbound role signal that is not one of the known roles
    #[error("Invalid role '{value}': expected 'admin' or 'ops'")]
    InvalidRole { value: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors, including missing collaborator endpoints
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The collaborator could not be reached
    #[error("Cannot connect to backend at '{url}': {message}")]
    Transport { url: String, message: String },
    /// The collaborator answered with a non-success status
    #[error("Backend at '{url}' is not responding (HTTP {status})")]
    Api { url: String, status: u16 },
    /// The operation is not allowed while a submission is running
    #[error("A submission is in progress; wait for it to finish")]
    SubmissionInProgress,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> OnboardError {
        OnboardError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> OnboardError {
        OnboardError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl OnboardError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a tokio join failure from a blocking storage task.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        OnboardError::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| OnboardError::database(message).with_source(e))
    }
}

/// Result type alias for onboarding operations
pub type Result<T> = std::result::Result<T, OnboardError>;
