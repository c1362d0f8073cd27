//! Client side of the hosted-model gateway.

mod error;
mod gateway;
mod message;
pub mod prompts;
mod transport;

pub use error::{AiError, TransportError};
pub use gateway::{AiGateway, DEFAULT_MAX_INPUT_CHARS};
pub use message::{AiMessage, AiResponse, Role};
pub use prompts::{PromptTemplate, ScanKind};
pub use transport::{HttpModelTransport, ModelTransport};
