use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::TransportError;
use super::message::AiMessage;

/// Sends a validated message sequence to a hosted model and returns its text.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn run(&self, messages: &[AiMessage]) -> Result<String, TransportError>;

    fn model(&self) -> &str;
}

#[async_trait]
impl<T: ModelTransport + ?Sized> ModelTransport for Arc<T> {
    async fn run(&self, messages: &[AiMessage]) -> Result<String, TransportError> {
        (**self).run(messages).await
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}

#[derive(Serialize)]
struct RunRequest<'a> {
    messages: &'a [AiMessage],
}

#[derive(Debug, Deserialize)]
struct RunReply {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    output: Option<ModelOutput>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModelOutput {
    Text(String),
    Message { content: String },
    Other(serde_json::Value),
}

impl ModelOutput {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) | Self::Message { content: text } => text,
            Self::Other(value) => value.to_string(),
        }
    }
}

fn error_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) if text.is_empty() => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// HTTP transport for the hosted model service.
///
/// Posts `{"messages": [...]}` to `{base_url}/{model}` and reads back
/// `{"error": ..., "output": ...}`; a non-null `error` is returned verbatim as
/// [`TransportError::Upstream`].
pub struct HttpModelTransport {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl HttpModelTransport {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self, TransportError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let model = model.trim().trim_matches('/');
        if base_url.is_empty() || model.is_empty() {
            return Err(TransportError::EndpointMissing);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: format!("{base_url}/{model}"),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelTransport for HttpModelTransport {
    async fn run(&self, messages: &[AiMessage]) -> Result<String, TransportError> {
        let response = self
            .http
            .post(self.endpoint.as_str())
            .header(reqwest::header::AUTHORIZATION, format!("Key {}", self.api_key))
            .json(&RunRequest { messages })
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        let reply = serde_json::from_slice::<RunReply>(&bytes);
        if !status.is_success() {
            // Prefer the service's own error text when it sent one.
            if let Some(text) = reply.ok().and_then(|r| r.error).and_then(error_text) {
                return Err(TransportError::Upstream(text));
            }
            return Err(TransportError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).trim().to_string(),
            });
        }

        let reply = reply.map_err(|err| TransportError::Decode(err.to_string()))?;
        interpret_reply(reply)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn interpret_reply(reply: RunReply) -> Result<String, TransportError> {
    if let Some(text) = reply.error.and_then(error_text) {
        return Err(TransportError::Upstream(text));
    }
    reply
        .output
        .map(ModelOutput::into_text)
        .ok_or(TransportError::EmptyOutput)
}
