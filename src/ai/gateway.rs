use super::error::AiError;
use super::message::{AiMessage, AiResponse};
use super::prompts::{self, PromptTemplate, ScanKind};
use super::transport::ModelTransport;

pub const DEFAULT_MAX_INPUT_CHARS: usize = 100_000;

/// Validating front for a [`ModelTransport`].
///
/// The `try_*` entry points keep the error kind so callers can tell a
/// rejected input from an upstream failure; every other method folds the
/// outcome into an [`AiResponse`] and never fails.
pub struct AiGateway<T> {
    transport: T,
    max_input_chars: usize,
}

impl<T: ModelTransport> AiGateway<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    pub fn model(&self) -> &str {
        self.transport.model()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Rejects a caller-supplied input longer than the character budget.
    pub fn check_input(&self, input: &str) -> Result<(), AiError> {
        if input.chars().count() > self.max_input_chars {
            return Err(AiError::InputTooLong {
                max: self.max_input_chars,
            });
        }
        Ok(())
    }

    /// Trims every message and enforces the per-message character budget.
    pub fn validate(&self, messages: Vec<AiMessage>) -> Result<Vec<AiMessage>, AiError> {
        if messages.is_empty() {
            return Err(AiError::NoMessages);
        }
        for msg in &messages {
            self.check_input(&msg.content)?;
        }
        Ok(trim_messages(messages))
    }

    pub async fn try_chat(&self, messages: Vec<AiMessage>) -> Result<String, AiError> {
        let messages = self.validate(messages).map_err(rejected)?;
        self.send(&messages).await
    }

    /// Budgets `input` alone; the template text around it is not counted.
    pub async fn try_template(
        &self,
        input: &str,
        template: PromptTemplate,
    ) -> Result<String, AiError> {
        self.check_input(input).map_err(rejected)?;
        self.send(&trim_messages(template.into_messages())).await
    }

    async fn send(&self, messages: &[AiMessage]) -> Result<String, AiError> {
        tracing::debug!(count = messages.len(), model = self.model(), "ai request");
        self.transport.run(messages).await.map_err(|err| {
            tracing::error!(error = %err, model = self.model(), "ai upstream failure");
            AiError::from(err)
        })
    }

    pub async fn chat(&self, messages: Vec<AiMessage>) -> AiResponse {
        self.try_chat(messages).await.into()
    }

    /// Single user message.
    pub async fn query(&self, prompt: &str) -> AiResponse {
        self.chat(vec![AiMessage::user(prompt)]).await
    }

    async fn run(&self, input: &str, template: PromptTemplate) -> AiResponse {
        self.try_template(input, template).await.into()
    }

    pub async fn explain(&self, code: &str, language: Option<&str>) -> AiResponse {
        self.run(code, prompts::explain(code, language)).await
    }

    pub async fn fix(&self, code: &str, error_message: Option<&str>) -> AiResponse {
        self.run(code, prompts::fix(code, error_message)).await
    }

    pub async fn refactor(&self, code: &str, instructions: Option<&str>) -> AiResponse {
        self.run(code, prompts::refactor(code, instructions)).await
    }

    pub async fn tests(&self, code: &str, framework: Option<&str>) -> AiResponse {
        self.run(code, prompts::tests(code, framework)).await
    }

    pub async fn complete(&self, code: &str, cursor: Option<&str>) -> AiResponse {
        self.run(code, prompts::complete(code, cursor)).await
    }

    pub async fn generate(&self, description: &str, language: Option<&str>) -> AiResponse {
        self.run(description, prompts::generate(description, language)).await
    }

    pub async fn convert(&self, code: &str, from: &str, to: &str) -> AiResponse {
        self.run(code, prompts::convert(code, from, to)).await
    }

    pub async fn optimize(&self, code: &str) -> AiResponse {
        self.run(code, prompts::optimize(code)).await
    }

    pub async fn document(&self, code: &str) -> AiResponse {
        self.run(code, prompts::document(code)).await
    }

    pub async fn summarize(&self, code: &str, file_name: Option<&str>) -> AiResponse {
        self.run(code, prompts::summarize(code, file_name)).await
    }

    pub async fn find_dead_code(&self, code: &str) -> AiResponse {
        self.run(code, prompts::find_dead_code(code)).await
    }

    pub async fn improve_readability(&self, code: &str) -> AiResponse {
        self.run(code, prompts::improve_readability(code)).await
    }

    pub async fn terminal_fix(&self, error_output: &str, command: Option<&str>) -> AiResponse {
        self.run(error_output, prompts::terminal_fix(error_output, command)).await
    }

    pub async fn suggest_command(&self, description: &str) -> AiResponse {
        self.run(description, prompts::suggest_command(description)).await
    }

    pub async fn generate_project(
        &self,
        project_type: &str,
        options: Option<&serde_json::Value>,
    ) -> AiResponse {
        self.run(project_type, prompts::generate_project(project_type, options)).await
    }

    pub async fn scan(&self, project_context: &str, kind: ScanKind) -> AiResponse {
        self.run(project_context, prompts::scan(project_context, kind)).await
    }
}

fn rejected(err: AiError) -> AiError {
    tracing::warn!(error = %err, "ai request rejected");
    err
}

fn trim_messages(messages: Vec<AiMessage>) -> Vec<AiMessage> {
    messages
        .into_iter()
        .map(|mut msg| {
            let trimmed = msg.content.trim();
            if trimmed.len() != msg.content.len() {
                msg.content = trimmed.to_string();
            }
            msg
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/ai/gateway.rs"]
mod tests;
