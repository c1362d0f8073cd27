//! Fixed system prompts plus user-content templates for each AI operation.
//!
//! Inputs are trimmed before they are spliced into a template.

use serde::{Deserialize, Serialize};

use super::message::AiMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: &'static str,
    pub user: String,
}

impl PromptTemplate {
    fn new(system: &'static str, user: String) -> Self {
        Self { system, user }
    }

    pub fn into_messages(self) -> Vec<AiMessage> {
        vec![AiMessage::system(self.system), AiMessage::user(self.user)]
    }
}

fn fenced(code: &str, lang: &str) -> String {
    format!("```{lang}\n{}\n```", code.trim())
}

fn opt(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn explain(code: &str, language: Option<&str>) -> PromptTemplate {
    let language = opt(language);
    let hint = language.map(|l| format!(" ({l})")).unwrap_or_default();
    PromptTemplate::new(
        "You are an expert code educator. Give clear, thorough explanations that help developers understand code.",
        format!(
            "Explain the following code{hint} in detail. Walk through what each part does, the control flow, and any notable patterns:\n\n{}",
            fenced(code, language.unwrap_or_default())
        ),
    )
}

pub fn fix(code: &str, error_message: Option<&str>) -> PromptTemplate {
    let context = opt(error_message)
        .map(|e| format!("\n\nError message:\n{e}"))
        .unwrap_or_default();
    PromptTemplate::new(
        "You are an expert debugger. Find and fix every issue and always return the complete corrected code.",
        format!(
            "Fix the following code. Identify the bugs and errors, then give the corrected version and explain what was wrong:\n\n{}{context}",
            fenced(code, "")
        ),
    )
}

pub fn refactor(code: &str, instructions: Option<&str>) -> PromptTemplate {
    let extra = opt(instructions)
        .map(|i| format!("\n\nSpecific requirements: {i}"))
        .unwrap_or_default();
    PromptTemplate::new(
        "You are a senior software architect. Refactor code to be maintainable and performant. Return the refactored code with brief notes on major changes.",
        format!(
            "Refactor the following code to improve readability, performance, and adherence to best practices:{extra}\n\n{}",
            fenced(code, "")
        ),
    )
}

pub fn tests(code: &str, framework: Option<&str>) -> PromptTemplate {
    let hint = opt(framework)
        .map(|f| format!(" using {f}"))
        .unwrap_or_default();
    PromptTemplate::new(
        "You are a test automation expert. Write well-structured tests with good coverage and meaningful assertions.",
        format!(
            "Generate unit tests{hint} for the following code. Cover edge cases, error scenarios, and the happy path:\n\n{}",
            fenced(code, "")
        ),
    )
}

pub fn complete(code: &str, cursor: Option<&str>) -> PromptTemplate {
    let hint = opt(cursor)
        .map(|c| format!(" The cursor is at: {c}"))
        .unwrap_or_default();
    PromptTemplate::new(
        "You are a code completion engine. Give concise completions that fit the surrounding code.",
        format!(
            "Complete the following code, following its existing patterns and style.{hint}\n\n{}",
            fenced(code, "")
        ),
    )
}

pub fn generate(description: &str, language: Option<&str>) -> PromptTemplate {
    let hint = opt(language)
        .map(|l| format!(" in {l}"))
        .unwrap_or_default();
    PromptTemplate::new(
        "You are an expert programmer. Generate well-structured, documented code.",
        format!(
            "Generate clean, production-ready code{hint} from this description:\n\n{}",
            description.trim()
        ),
    )
}

pub fn convert(code: &str, from: &str, to: &str) -> PromptTemplate {
    let from = from.trim();
    let to = to.trim();
    PromptTemplate::new(
        "You are a polyglot programmer. Translate code accurately using idioms of the target language.",
        format!(
            "Convert the following {from} code to {to}, keeping the same behaviour:\n\n{}",
            fenced(code, from)
        ),
    )
}

pub fn optimize(code: &str) -> PromptTemplate {
    PromptTemplate::new(
        "You are a performance engineer. Identify bottlenecks and explain each optimization you apply.",
        format!(
            "Optimize the following code for performance while keeping it correct:\n\n{}",
            fenced(code, "")
        ),
    )
}

pub fn document(code: &str) -> PromptTemplate {
    PromptTemplate::new(
        "You are a documentation expert. Add clear documentation that explains what the code does and how.",
        format!(
            "Add documentation to the following code: doc comments for public items, inline comments for tricky logic, and a short module overview:\n\n{}",
            fenced(code, "")
        ),
    )
}

pub fn summarize(code: &str, file_name: Option<&str>) -> PromptTemplate {
    let context = opt(file_name)
        .map(|f| format!(" ({f})"))
        .unwrap_or_default();
    PromptTemplate::new(
        "You are a code analyst. Write structured summaries that let developers grasp a file quickly.",
        format!(
            "Summarize this code file{context}: its purpose, main components, dependencies, and key patterns:\n\n{}",
            fenced(code, "")
        ),
    )
}

pub fn find_dead_code(code: &str) -> PromptTemplate {
    PromptTemplate::new(
        "You are a static analysis expert. Point out dead code with exact locations and removal suggestions.",
        format!(
            "Find dead code in the following snippet: unused variables, unreachable branches, and deprecated patterns:\n\n{}",
            fenced(code, "")
        ),
    )
}

pub fn improve_readability(code: &str) -> PromptTemplate {
    PromptTemplate::new(
        "You are a clean code advocate. Make code easier to read without changing what it does.",
        format!(
            "Improve the readability of this code through better naming, clearer structure, and less complexity:\n\n{}",
            fenced(code, "")
        ),
    )
}

pub fn terminal_fix(error_output: &str, command: Option<&str>) -> PromptTemplate {
    let context = opt(command)
        .map(|c| format!("Command executed: {c}\n\n"))
        .unwrap_or_default();
    PromptTemplate::new(
        "You are a DevOps expert. Diagnose terminal errors and give actionable fixes with corrected commands.",
        format!(
            "{context}Analyze this terminal error and provide a solution:\n\n{}",
            error_output.trim()
        ),
    )
}

pub fn suggest_command(description: &str) -> PromptTemplate {
    PromptTemplate::new(
        "You are a command-line expert. Suggest precise, safe commands with short explanations.",
        format!(
            "Suggest the terminal command(s) to: {}\n\nGive the exact command(s) and a brief explanation.",
            description.trim()
        ),
    )
}

pub fn generate_project(project_type: &str, options: Option<&serde_json::Value>) -> PromptTemplate {
    let options = options
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .map(|s| format!("\n\nOptions: {s}"))
        .unwrap_or_default();
    PromptTemplate::new(
        "You are a project scaffolding expert. Generate complete starter projects with modern tooling.",
        format!(
            "Generate a complete {} project boilerplate with every file and configuration it needs: manifest, entry points, folder layout, and basic components.{options}",
            project_type.trim()
        ),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Bugs,
    Security,
    Performance,
    #[default]
    Improvements,
}

impl ScanKind {
    /// Unknown names fall back to `Improvements`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bugs" => Self::Bugs,
            "security" => Self::Security,
            "performance" => Self::Performance,
            _ => Self::Improvements,
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::Bugs => "Scan for potential bugs, logic errors, and edge cases",
            Self::Security => "Scan for security vulnerabilities and unsafe practices",
            Self::Performance => "Scan for performance issues and optimization opportunities",
            Self::Improvements => "Scan for code quality improvements and modernization opportunities",
        }
    }
}

pub fn scan(project_context: &str, kind: ScanKind) -> PromptTemplate {
    PromptTemplate::new(
        "You are a senior code reviewer. Give actionable feedback ordered by priority and location.",
        format!("{}:\n\n{}", kind.instruction(), project_context.trim()),
    )
}
