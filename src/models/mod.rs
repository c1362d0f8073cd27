//! Workspace data models.

pub mod file_tree;
pub mod language;

pub use file_tree::{FileNode, FileTree, FileTreeError, FileTreeRow, NodeKind, ROOT_ID};
pub use language::{display_name_for, LanguageId};
