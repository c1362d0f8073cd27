//! Workspace-derived context for AI requests.
//!
//! Everything here is a pure function of the tree; nothing is cached.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{FileNode, FileTree};

pub const DEFAULT_SUMMARY_LINES: usize = 50;

const PROJECT_MARKERS: &[(&[&str], &str)] = &[
    (&["next.config.js", "next.config.ts"], "Next.js"),
    (&["vite.config.ts", "vite.config.js"], "Vite/React"),
    (&["angular.json"], "Angular"),
    (&["vue.config.js"], "Vue.js"),
    (&["requirements.txt", "pyproject.toml"], "Python"),
    (&["cargo.toml"], "Rust"),
    (&["go.mod"], "Go"),
    (&["package.json"], "Node.js"),
];

/// Guesses the project flavour from well-known marker files anywhere in the tree.
pub fn detect_project_type(tree: &FileTree) -> &'static str {
    let names: Vec<String> = tree
        .files()
        .into_iter()
        .map(|file| file.name.to_lowercase())
        .collect();

    PROJECT_MARKERS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| names.iter().any(|n| n == m)))
        .map(|(_, label)| *label)
        .unwrap_or("Unknown")
}

/// Indented outline of the whole tree, root excluded. Folders end with `/`.
pub fn render_tree(tree: &FileTree) -> String {
    let mut out = String::new();
    for (node, depth) in tree.walk_with_depth(false) {
        let indent = "  ".repeat(depth as usize);
        let suffix = if node.is_folder() { "/" } else { "" };
        let _ = writeln!(out, "{indent}{}{suffix}", node.name);
    }
    out
}

const IMPORT_PATTERNS: [&str; 2] = [
    r#"import.*from\s+['"]([^'"]+)['"]"#,
    r#"require\(['"]([^'"]+)['"]\)"#,
];

fn import_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        IMPORT_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

/// Files referenced by `import ... from '...'` or `require('...')` in the
/// content of `file_id`, in reference order and without duplicates.
pub fn find_related_files(tree: &FileTree, file_id: &str) -> Vec<FileNode> {
    let Some(content) = tree.content(file_id) else {
        return Vec::new();
    };

    let mut specifiers = Vec::new();
    for pattern in import_patterns() {
        specifiers.extend(
            pattern
                .captures_iter(content)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        );
    }

    let files = tree.files();
    let mut related: Vec<FileNode> = Vec::new();
    for specifier in specifiers {
        let normalized = specifier.trim_start_matches(['@', '.', '/']);
        if normalized.is_empty() {
            continue;
        }
        let last = normalized.rsplit('/').next().unwrap_or(normalized);
        let hit = files
            .iter()
            .find(|f| f.path.contains(normalized) || file_stem(&f.name) == last);
        if let Some(hit) = hit {
            if hit.id != file_id && !related.iter().any(|r| r.id == hit.id) {
                related.push(hit.clone());
            }
        }
    }
    related
}

/// Keeps the head and tail of long content with a marker in between.
pub fn summarize_content(content: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() <= max_lines {
        return content.to_string();
    }

    let half = max_lines / 2;
    let head = lines[..half].join("\n");
    let tail = lines[lines.len() - half..].join("\n");
    format!(
        "{head}\n\n... ({} lines omitted) ...\n\n{tail}",
        lines.len() - max_lines
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectContext {
    pub project_type: &'static str,
    pub structure: String,
    pub current_file: Option<FileNode>,
    pub related_files: Vec<FileNode>,
    pub selected_code: Option<String>,
}

impl ProjectContext {
    pub fn build(tree: &FileTree, current_file: Option<&str>, selected_code: Option<&str>) -> Self {
        let current_file = current_file.and_then(|id| tree.get(id)).filter(FileNode::is_file);
        let related_files = current_file
            .as_ref()
            .map(|file| find_related_files(tree, &file.id))
            .unwrap_or_default();

        Self {
            project_type: detect_project_type(tree),
            structure: render_tree(tree),
            current_file,
            related_files,
            selected_code: selected_code
                .filter(|code| !code.is_empty())
                .map(str::to_string),
        }
    }

    pub fn format_for_prompt(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "## Project Type: {}\n\n", self.project_type);
        let _ = write!(out, "## Project Structure:\n```\n{}```\n\n", self.structure);

        if let Some(file) = &self.current_file {
            let _ = writeln!(out, "## Current File: {}", file.path);
            let _ = write!(
                out,
                "```{}\n{}\n```\n\n",
                file.language.as_deref().unwrap_or_default(),
                file.content.as_deref().unwrap_or_default()
            );
        }

        if !self.related_files.is_empty() {
            out.push_str("## Related Files:\n");
            for file in &self.related_files {
                let _ = writeln!(out, "- {}", file.path);
            }
            out.push('\n');
        }

        if let Some(code) = &self.selected_code {
            let _ = write!(out, "## Selected Code:\n```\n{code}\n```\n\n");
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    Explain,
    Fix,
    Refactor,
    Test,
    Optimize,
    Document,
}

impl ContextAction {
    fn lead(self) -> &'static str {
        match self {
            Self::Explain => "Explain this code in detail:",
            Self::Fix => "Fix any bugs or issues in this code:",
            Self::Refactor => "Refactor this code for better quality:",
            Self::Test => "Generate comprehensive tests for this code:",
            Self::Optimize => "Optimize this code for performance:",
            Self::Document => "Add documentation to this code:",
        }
    }
}

/// Single-shot prompt for a code action on a snippet.
pub fn action_prompt(
    action: ContextAction,
    code: &str,
    language: Option<&str>,
    extra: Option<&str>,
) -> String {
    let mut prompt = format!("{}\n\n", action.lead());
    if let Some(language) = language {
        let _ = writeln!(prompt, "Language: {language}");
    }
    let _ = write!(prompt, "```{}\n{code}\n```", language.unwrap_or_default());
    if let Some(extra) = extra.filter(|e| !e.is_empty()) {
        let _ = write!(prompt, "\n\nAdditional context:\n{extra}");
    }
    prompt
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/context.rs"]
mod tests;
