//! Prose commentary on a finished report, written by an external chat model.

pub mod client;
pub mod prompt;
pub mod request;
pub mod service;

use axum::http::StatusCode;

pub use client::{CohereChatClient, CompletionGateway};
pub use prompt::ChatPrompt;
pub use request::{SummaryCategory, SummaryRequest, SUMMARY_CATEGORY_COUNT};
pub use service::{SummaryService, SummaryText, FALLBACK_TEXT};

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Missing COHERE_API_KEY")]
    MissingApiKey,
    #[error("Cohere error: {body}")]
    Upstream { status: u16, body: String },
    #[error("Cohere request failed: {0}")]
    Transport(String),
    #[error("Cohere returned an unreadable response: {0}")]
    MalformedResponse(String),
}

impl SummaryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SummaryError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            SummaryError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            SummaryError::Upstream { .. }
            | SummaryError::Transport(_)
            | SummaryError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
