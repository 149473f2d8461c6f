use std::future::Future;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::prompt::ChatPrompt;
use super::SummaryError;
use crate::config::SummaryConfig;

const SUMMARY_TEMPERATURE: f64 = 0.3;

/// Seam between the summary service and whichever chat model answers it.
pub trait CompletionGateway: Send + Sync {
    fn complete(
        &self,
        prompt: &ChatPrompt,
    ) -> impl Future<Output = Result<String, SummaryError>> + Send;
}

/// Cohere v2 chat endpoint, one request per prompt, no retries.
#[derive(Debug, Clone)]
pub struct CohereChatClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl CohereChatClient {
    /// `None` when no API key is configured.
    pub fn from_config(config: &SummaryConfig) -> Result<Option<Self>, SummaryError> {
        config
            .api_key
            .clone()
            .map(|api_key| Self::new(api_key, config))
            .transpose()
    }

    pub fn new(api_key: String, config: &SummaryConfig) -> Result<Self, SummaryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|err| SummaryError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/v2/chat", config.api_base.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, prompt: &ChatPrompt) -> Result<String, SummaryError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.preamble,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.message,
                },
            ],
            temperature: SUMMARY_TEMPERATURE,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "requesting summary");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| SummaryError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "summary provider rejected request");
            return Err(SummaryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| SummaryError::MalformedResponse(err.to_string()))?;
        Ok(completion_text(&payload))
    }
}

impl CompletionGateway for CohereChatClient {
    fn complete(
        &self,
        prompt: &ChatPrompt,
    ) -> impl Future<Output = Result<String, SummaryError>> + Send {
        self.send(prompt)
    }
}

/// Joins the text parts of `message.content`, skipping anything that is not text.
pub(crate) fn completion_text(payload: &Value) -> String {
    payload
        .pointer("/message/content")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}
