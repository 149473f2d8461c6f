use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::client::CompletionGateway;
use super::prompt::build_prompt;
use super::request::SummaryRequest;
use super::SummaryError;

/// Returned when the model answers with no text at all.
pub const FALLBACK_TEXT: &str = "No commentary was received from the model.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryText {
    pub text: String,
}

pub struct SummaryService<G> {
    gateway: Option<Arc<G>>,
    language: String,
}

impl<G> SummaryService<G>
where
    G: CompletionGateway,
{
    /// `gateway` is `None` when no credentials are configured; each request then
    /// fails with [`SummaryError::MissingApiKey`].
    pub fn new(gateway: Option<Arc<G>>, language: impl Into<String>) -> Self {
        Self {
            gateway,
            language: language.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_some()
    }

    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryText, SummaryError> {
        request.validate()?;
        let gateway = self.gateway.as_ref().ok_or(SummaryError::MissingApiKey)?;

        let prompt = build_prompt(&request.rounded(), &self.language);
        let text = gateway.complete(&prompt).await?;
        let text = text.trim();

        info!(
            overall_pct = request.overall_pct,
            empty = text.is_empty(),
            "summary generated"
        );

        let text = if text.is_empty() { FALLBACK_TEXT } else { text };
        Ok(SummaryText {
            text: text.to_string(),
        })
    }
}
