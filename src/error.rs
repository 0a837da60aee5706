//! Error handling for the resume match client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing resume file or empty job description. Raised before any request is built.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The analysis call did not complete: connectivity, non-success status or a malformed body.
    #[error("Network error: {0}")]
    Network(String),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeMatchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ResumeMatchError::Validation(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ResumeMatchError::Network(_))
    }
}

pub type Result<T> = std::result::Result<T, ResumeMatchError>;

/// Convert transport errors to our custom error type
impl From<reqwest::Error> for ResumeMatchError {
    fn from(err: reqwest::Error) -> Self {
        ResumeMatchError::Network(err.to_string())
    }
}
