// crates/core/src/error.rs
use thiserror::Error;

/// Errors that can occur while generating a response
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    #[error("Generator not available: {0}")]
    Unavailable(String),

    #[error("Generation failed: {0}")]
    Failed(String),
}
