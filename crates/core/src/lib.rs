// crates/core/src/lib.rs
//! Units of work behind the BhoomiSetu AI endpoints: text generation, the
//! rule-based chat responder, account scoring and review analysis.

pub mod chat;
pub mod error;
pub mod generate;
pub mod reviews;
pub mod scoring;

pub use chat::{ChatCompletionRequest, ChatCompletionResponse};
pub use error::GenerateError;
pub use generate::{GenerateRequest, GenerateResponse, LocalGenerator, TextGenerator};
