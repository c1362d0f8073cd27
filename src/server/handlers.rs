use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ai::prompts::{self, PromptTemplate};
use crate::ai::{AiMessage, AiResponse, ScanKind};

use super::error::ApiError;
use super::AppState;

type ApiResult = Result<Json<AiResponse>, ApiError>;

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::warn!(error = %err, "rejecting malformed request body");
        ApiError::BadRequest(format!("Invalid JSON body: {err}"))
    })
}

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

async fn respond(state: &AppState, input: &str, template: PromptTemplate) -> ApiResult {
    let data = state.gateway.try_template(input, template).await?;
    Ok(Json(AiResponse::ok(data)))
}

#[derive(Debug, Default, Deserialize)]
struct ChatBody {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    messages: Option<Vec<AiMessage>>,
}

pub(super) async fn chat(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body: ChatBody = parse_body(&body)?;
    let messages = match (body.messages, body.prompt) {
        (Some(messages), _) => messages,
        (None, Some(prompt)) if !prompt.is_empty() => vec![AiMessage::user(prompt)],
        _ => {
            return Err(ApiError::BadRequest(
                "Either prompt or messages array is required".to_string(),
            ))
        }
    };
    let data = state.gateway.try_chat(messages).await?;
    Ok(Json(AiResponse::ok(data)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CodeBody {
    code: Option<String>,
    language: Option<String>,
    error_message: Option<String>,
    instructions: Option<String>,
    framework: Option<String>,
}

const CODE_REQUIRED: &str = "Code is required";

pub(super) async fn explain(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body: CodeBody = parse_body(&body)?;
    let code = required(body.code, CODE_REQUIRED)?;
    respond(&state, &code, prompts::explain(&code, body.language.as_deref())).await
}

pub(super) async fn fix(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body: CodeBody = parse_body(&body)?;
    let code = required(body.code, CODE_REQUIRED)?;
    respond(&state, &code, prompts::fix(&code, body.error_message.as_deref())).await
}

pub(super) async fn refactor(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body: CodeBody = parse_body(&body)?;
    let code = required(body.code, CODE_REQUIRED)?;
    respond(&state, &code, prompts::refactor(&code, body.instructions.as_deref())).await
}

pub(super) async fn tests(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body: CodeBody = parse_body(&body)?;
    let code = required(body.code, CODE_REQUIRED)?;
    respond(&state, &code, prompts::tests(&code, body.framework.as_deref())).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TerminalBody {
    error_output: Option<String>,
    command: Option<String>,
}

pub(super) async fn terminal(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body: TerminalBody = parse_body(&body)?;
    let output = required(body.error_output, "Terminal error output is required")?;
    respond(&state, &output, prompts::terminal_fix(&output, body.command.as_deref())).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProjectBody {
    project_type: Option<String>,
    options: Option<serde_json::Value>,
}

pub(super) async fn generate_project(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body: ProjectBody = parse_body(&body)?;
    let project_type = required(body.project_type, "Project type is required")?;
    respond(
        &state,
        &project_type,
        prompts::generate_project(&project_type, body.options.as_ref()),
    )
    .await
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ScanBody {
    project_context: Option<String>,
    scan_type: Option<String>,
}

pub(super) async fn scan(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let body: ScanBody = parse_body(&body)?;
    let context = required(body.project_context, "Project context is required")?;
    let kind = body
        .scan_type
        .as_deref()
        .map(ScanKind::from_name)
        .unwrap_or_default();
    respond(&state, &context, prompts::scan(&context, kind)).await
}

#[derive(Debug, Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
    model: String,
    timestamp: String,
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        model: state.gateway.model().to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
