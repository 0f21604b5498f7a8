//! Error types for the drafting pipeline.
//!
//! None of these reach the caller of `draft_contract`; each is downgraded to
//! degraded document content at the stage that raised it.

use thiserror::Error;

use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Drafting model unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Model output is not a structured draft: {0}")]
    MalformedStructuredResponse(String),

    #[error("Required field `{field}` is missing")]
    ValidationGap { field: &'static str },

    #[error("Unknown {kind} value: {value:?}")]
    UnknownEnumValue { kind: &'static str, value: String },

    #[error("Drafting failed: {0}")]
    CatastrophicFailure(String),
}

impl From<LlmError> for DraftError {
    fn from(e: LlmError) -> Self {
        DraftError::UpstreamUnavailable(e.to_string())
    }
}
