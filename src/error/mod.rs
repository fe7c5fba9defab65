use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed environment configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Completion client could not be built.
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Terminal read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transcript store errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    /// Turn text was empty after trimming.
    #[error("Turn content cannot be empty")]
    EmptyContent,
}

/// Completion endpoint errors
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Any status other than 200. Displays as the diagnostic shown to the user.
    #[error("Error: {status} - {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// 200 response without a usable text block.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was wrong with it
        message: String,
    },

    /// No response within the configured timeout.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CompletionError {
    /// Render the error as the text stored in place of an answer.
    ///
    /// Remote rejections keep the status code and raw body; every other
    /// failure is reported as a generic diagnostic.
    pub fn to_diagnostic(&self) -> String {
        match self {
            CompletionError::Api { .. } => self.to_string(),
            other => format!("An error occurred: {}", other),
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for transcript operations
pub type TranscriptResult<T> = Result<T, TranscriptError>;

/// Result type alias for completion calls
pub type CompletionResult<T> = Result<T, CompletionError>;
