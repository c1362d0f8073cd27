use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("model endpoint is not configured")]
    EndpointMissing,
    #[error("model request failed: {0}")]
    Request(String),
    #[error("model returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("unreadable model response: {0}")]
    Decode(String),
    /// Error text reported by the model service, passed through verbatim.
    #[error("{0}")]
    Upstream(String),
    #[error("model returned no output")]
    EmptyOutput,
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Either prompt or messages array is required")]
    NoMessages,
    #[error("Input exceeds maximum length of {max} characters")]
    InputTooLong { max: usize },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl AiError {
    /// Rejected before reaching the transport.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoMessages | Self::InputTooLong { .. })
    }
}
