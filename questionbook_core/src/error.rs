//! Error types for question generation and grading

use thiserror::Error;

/// Errors surfaced by the question book
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Topic label not present in the catalog
    #[error("unknown topic: '{label}'")]
    UnknownTopic { label: String },

    /// The option builder could not collect enough unique choices
    #[error("only {found} unique options for correct value '{correct}' (need {required})")]
    DistractorStarvation {
        correct: String,
        found: usize,
        required: usize,
    },

    /// Configuration value rejected by validation
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A response handed to the grader does not match the item's answer shape
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenerateError>;
