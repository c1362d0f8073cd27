use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageId {
    TypeScript,
    TypeScriptReact,
    JavaScript,
    JavaScriptReact,
    Json,
    Html,
    Css,
    Scss,
    Less,
    Markdown,
    Python,
    Rust,
    Go,
    Java,
    C,
    Cpp,
    Ruby,
    Php,
    Sql,
    Yaml,
    Xml,
    Shell,
    Dockerfile,
    Ignore,
    DotEnv,
    PlainText,
}

impl LanguageId {
    /// Maps a file name to its language by the text after the last `.`.
    ///
    /// Names without a dot, and unknown extensions, are plain text. The whole
    /// name counts as the extension for dotfiles, so `.gitignore` and `.env`
    /// resolve to their own languages.
    pub fn from_file_name(name: &str) -> Self {
        let Some(dot) = name.rfind('.') else {
            return Self::PlainText;
        };
        match name[dot..].to_ascii_lowercase().as_str() {
            ".ts" => Self::TypeScript,
            ".tsx" => Self::TypeScriptReact,
            ".js" => Self::JavaScript,
            ".jsx" => Self::JavaScriptReact,
            ".json" => Self::Json,
            ".html" => Self::Html,
            ".css" => Self::Css,
            ".scss" => Self::Scss,
            ".less" => Self::Less,
            ".md" => Self::Markdown,
            ".py" => Self::Python,
            ".rs" => Self::Rust,
            ".go" => Self::Go,
            ".java" => Self::Java,
            ".c" | ".h" => Self::C,
            ".cpp" | ".hpp" => Self::Cpp,
            ".rb" => Self::Ruby,
            ".php" => Self::Php,
            ".sql" => Self::Sql,
            ".yaml" | ".yml" => Self::Yaml,
            ".xml" => Self::Xml,
            ".sh" | ".bash" | ".zsh" => Self::Shell,
            ".dockerfile" => Self::Dockerfile,
            ".gitignore" => Self::Ignore,
            ".env" => Self::DotEnv,
            _ => Self::PlainText,
        }
    }

    pub fn from_language_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|lang| lang.language_id() == id)
    }

    pub const ALL: [Self; 26] = [
        Self::TypeScript,
        Self::TypeScriptReact,
        Self::JavaScript,
        Self::JavaScriptReact,
        Self::Json,
        Self::Html,
        Self::Css,
        Self::Scss,
        Self::Less,
        Self::Markdown,
        Self::Python,
        Self::Rust,
        Self::Go,
        Self::Java,
        Self::C,
        Self::Cpp,
        Self::Ruby,
        Self::Php,
        Self::Sql,
        Self::Yaml,
        Self::Xml,
        Self::Shell,
        Self::Dockerfile,
        Self::Ignore,
        Self::DotEnv,
        Self::PlainText,
    ];

    pub fn language_id(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::TypeScriptReact => "typescriptreact",
            Self::JavaScript => "javascript",
            Self::JavaScriptReact => "javascriptreact",
            Self::Json => "json",
            Self::Html => "html",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Less => "less",
            Self::Markdown => "markdown",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Ruby => "ruby",
            Self::Php => "php",
            Self::Sql => "sql",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
            Self::Shell => "shell",
            Self::Dockerfile => "dockerfile",
            Self::Ignore => "ignore",
            Self::DotEnv => "dotenv",
            Self::PlainText => "plaintext",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::TypeScriptReact => "TypeScript React",
            Self::JavaScript => "JavaScript",
            Self::JavaScriptReact => "JavaScript React",
            Self::Json => "JSON",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Scss => "SCSS",
            Self::Less => "Less",
            Self::Markdown => "Markdown",
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Java => "Java",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Ruby => "Ruby",
            Self::Php => "PHP",
            Self::Sql => "SQL",
            Self::Yaml => "YAML",
            Self::Xml => "XML",
            Self::Shell => "Shell Script",
            Self::Dockerfile => "Dockerfile",
            Self::Ignore => "Ignore",
            Self::DotEnv => "Environment",
            Self::PlainText => "Plain Text",
        }
    }
}

/// Display name for a language tag as stored on nodes and tabs; unknown tags
/// are shown as-is.
pub fn display_name_for(language: &str) -> String {
    LanguageId::from_language_id(language)
        .map(|lang| lang.display_name().to_string())
        .unwrap_or_else(|| language.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/models/language.rs"]
mod tests;
