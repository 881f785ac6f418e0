//! Error types for the migration library.

use thiserror::Error;

/// Main error type for migration operations.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration error (missing environment variables, bad URLs, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API answered with a non-success status code
    #[error("HTTP {status} from {method} {url}: {body}")]
    Http {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connect, TLS, decode, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// A payload field is absent from the source entry
    #[error("Entry {entry} has no field '{field}'")]
    MissingField { entry: String, field: String },

    /// A destination match was found but carries no document identifier
    #[error("Existing entry for '{0}' has no documentId")]
    MissingDocumentId(String),

    /// Report could not be written
    #[error("Report error: {0}")]
    Report(#[from] csv::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MigrateError {
    /// Create an Http error from a failed response.
    pub fn http(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        MigrateError::Http {
            method: method.into(),
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Create an InvalidResponse error
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
