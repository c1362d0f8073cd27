//! Workspace file tree.
//!
//! Nodes live in an arena keyed by `NodeKey`; the public API addresses them by
//! their string id. Children keep insertion order, which is also display order.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use std::fmt;

use super::language::LanguageId;

new_key_type! { struct NodeKey; }

pub const ROOT_ID: &str = "root";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTreeError {
    NotFound,
    ParentNotFolder,
    MoveIntoDescendant,
    RootImmovable,
    DuplicateId,
}

impl fmt::Display for FileTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTreeError::NotFound => write!(f, "node not found"),
            FileTreeError::ParentNotFolder => write!(f, "parent is not a folder"),
            FileTreeError::MoveIntoDescendant => {
                write!(f, "cannot move node into its own subtree")
            }
            FileTreeError::RootImmovable => write!(f, "root node cannot be moved"),
            FileTreeError::DuplicateId => write!(f, "node id already exists"),
        }
    }
}

impl std::error::Error for FileTreeError {}

#[derive(Debug, Clone)]
struct Node {
    id: String,
    kind: NodeKind,
    name: String,
    path: String,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    content: Option<String>,
    language: Option<LanguageId>,
    is_open: bool,
}

impl Node {
    fn new(id: String, kind: NodeKind, name: String, parent: Option<NodeKey>) -> Self {
        let (content, language) = match kind {
            NodeKind::File => (
                Some(String::new()),
                Some(LanguageId::from_file_name(&name)),
            ),
            NodeKind::Folder => (None, None),
        };
        Self {
            id,
            kind,
            name,
            path: String::new(),
            parent,
            children: Vec::new(),
            content,
            language,
            is_open: false,
        }
    }
}

/// Owned snapshot of a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub path: String,
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub is_open: bool,
}

impl FileNode {
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeRow {
    pub id: String,
    pub depth: u16,
    pub name: String,
    pub is_folder: bool,
    pub is_open: bool,
}

#[derive(Debug, Clone)]
pub struct FileTree {
    arena: SlotMap<NodeKey, Node>,
    root: NodeKey,
    index: FxHashMap<String, NodeKey>,
    next_id: u64,
}

impl FileTree {
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut arena = SlotMap::with_key();
        let mut root_node = Node::new(ROOT_ID.to_string(), NodeKind::Folder, root_name.into(), None);
        root_node.path = "/".to_string();
        root_node.is_open = true;
        let root = arena.insert(root_node);

        let mut index = FxHashMap::default();
        index.insert(ROOT_ID.to_string(), root);

        Self {
            arena,
            root,
            index,
            next_id: 1,
        }
    }

    pub fn root_id(&self) -> &str {
        &self.arena[self.root].id
    }

    /// Node count below the root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.arena[self.root].children.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn key(&self, id: &str) -> Option<NodeKey> {
        self.index.get(id).copied()
    }

    fn snapshot(&self, key: NodeKey) -> FileNode {
        let node = &self.arena[key];
        FileNode {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            path: node.path.clone(),
            parent_id: node.parent.map(|p| self.arena[p].id.clone()),
            content: node.content.clone(),
            language: node.language.map(|l| l.language_id().to_string()),
            is_open: node.is_open,
        }
    }

    pub fn get(&self, id: &str) -> Option<FileNode> {
        self.key(id).map(|key| self.snapshot(key))
    }

    pub fn kind(&self, id: &str) -> Option<NodeKind> {
        self.key(id).map(|key| self.arena[key].kind)
    }

    pub fn is_folder(&self, id: &str) -> bool {
        self.kind(id) == Some(NodeKind::Folder)
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.key(id).is_some_and(|key| self.arena[key].is_open)
    }

    pub fn content(&self, id: &str) -> Option<&str> {
        self.key(id)
            .and_then(|key| self.arena[key].content.as_deref())
    }

    pub fn children(&self, id: &str) -> Option<Vec<FileNode>> {
        let key = self.key(id)?;
        Some(
            self.arena[key]
                .children
                .iter()
                .map(|&child| self.snapshot(child))
                .collect(),
        )
    }

    pub fn toggle_folder(&mut self, id: &str) -> bool {
        let Some(key) = self.key(id) else {
            return false;
        };
        let node = &mut self.arena[key];
        if node.kind != NodeKind::Folder {
            return false;
        }
        node.is_open = !node.is_open;
        true
    }

    pub fn set_open(&mut self, id: &str, open: bool) -> bool {
        let Some(key) = self.key(id) else {
            return false;
        };
        let node = &mut self.arena[key];
        if node.kind != NodeKind::Folder || node.is_open == open {
            return false;
        }
        node.is_open = open;
        true
    }

    fn alloc_id(&mut self, kind: NodeKind) -> String {
        let prefix = match kind {
            NodeKind::File => "file",
            NodeKind::Folder => "folder",
        };
        loop {
            let id = format!("{prefix}-{}", self.next_id);
            self.next_id = self.next_id.saturating_add(1);
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    fn child_path(parent_path: &str, name: &str) -> String {
        if parent_path.ends_with('/') {
            format!("{parent_path}{name}")
        } else {
            format!("{parent_path}/{name}")
        }
    }

    fn attach(
        &mut self,
        parent: NodeKey,
        id: String,
        name: String,
        kind: NodeKind,
    ) -> NodeKey {
        let mut node = Node::new(id.clone(), kind, name, Some(parent));
        node.path = Self::child_path(&self.arena[parent].path, &node.name);
        let key = self.arena.insert(node);
        self.index.insert(id, key);

        let parent_node = &mut self.arena[parent];
        parent_node.children.push(key);
        parent_node.is_open = true;
        key
    }

    /// Appends a new node under `parent_id` and opens the parent.
    ///
    /// Returns `None` without touching the tree when the parent is missing or
    /// is a file.
    pub fn create_child(&mut self, parent_id: &str, name: &str, kind: NodeKind) -> Option<String> {
        let parent = self.key(parent_id)?;
        if self.arena[parent].kind != NodeKind::Folder {
            return None;
        }
        let id = self.alloc_id(kind);
        self.attach(parent, id.clone(), name.to_string(), kind);
        Some(id)
    }

    /// Inserts a node with a caller-chosen id.
    pub fn insert_with_id(
        &mut self,
        parent_id: &str,
        id: &str,
        name: &str,
        kind: NodeKind,
    ) -> Result<(), FileTreeError> {
        if self.index.contains_key(id) {
            return Err(FileTreeError::DuplicateId);
        }
        let parent = self.key(parent_id).ok_or(FileTreeError::NotFound)?;
        if self.arena[parent].kind != NodeKind::Folder {
            return Err(FileTreeError::ParentNotFolder);
        }
        self.attach(parent, id.to_string(), name.to_string(), kind);
        Ok(())
    }

    fn subtree_keys(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.get(current) {
                out.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn subtree_size(&self, id: &str) -> usize {
        self.key(id)
            .map(|key| self.subtree_keys(key).len())
            .unwrap_or(0)
    }

    /// Removes a node with its whole subtree and returns every removed id.
    ///
    /// Deleting the root empties the tree but keeps the root node itself.
    pub fn delete_node(&mut self, id: &str) -> FxHashSet<String> {
        let mut removed = FxHashSet::default();
        let Some(key) = self.key(id) else {
            return removed;
        };

        let targets: Vec<NodeKey> = if key == self.root {
            std::mem::take(&mut self.arena[self.root].children)
        } else {
            if let Some(parent) = self.arena[key].parent {
                self.arena[parent].children.retain(|&child| child != key);
            }
            vec![key]
        };

        for target in targets {
            for victim in self.subtree_keys(target) {
                if let Some(node) = self.arena.remove(victim) {
                    self.index.remove(&node.id);
                    removed.insert(node.id);
                }
            }
        }
        removed
    }

    fn refresh_paths(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(parent) = self.arena[current].parent else {
                continue;
            };
            let path = Self::child_path(&self.arena[parent].path, &self.arena[current].name);
            let node = &mut self.arena[current];
            node.path = path;
            stack.extend(node.children.iter().copied());
        }
    }

    /// Renames a node; files also get their language re-derived. Display paths
    /// of the node and its descendants follow the new name.
    pub fn rename_node(&mut self, id: &str, new_name: &str) -> bool {
        let Some(key) = self.key(id) else {
            return false;
        };
        let node = &mut self.arena[key];
        node.name = new_name.to_string();
        if node.kind == NodeKind::File {
            node.language = Some(LanguageId::from_file_name(new_name));
        }
        self.refresh_paths(key);
        true
    }

    fn is_ancestor(&self, ancestor: NodeKey, mut descendant: NodeKey) -> bool {
        while let Some(parent) = self.arena.get(descendant).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            descendant = parent;
        }
        false
    }

    pub fn move_node(&mut self, id: &str, new_parent_id: &str) -> Result<(), FileTreeError> {
        let key = self.key(id).ok_or(FileTreeError::NotFound)?;
        let new_parent = self.key(new_parent_id).ok_or(FileTreeError::NotFound)?;
        if key == self.root {
            return Err(FileTreeError::RootImmovable);
        }
        if self.arena[new_parent].kind != NodeKind::Folder {
            return Err(FileTreeError::ParentNotFolder);
        }
        if key == new_parent || self.is_ancestor(key, new_parent) {
            return Err(FileTreeError::MoveIntoDescendant);
        }

        let old_parent = self.arena[key].parent;
        if old_parent == Some(new_parent) {
            return Ok(());
        }
        if let Some(old_parent) = old_parent {
            self.arena[old_parent].children.retain(|&child| child != key);
        }
        self.arena[new_parent].children.push(key);
        self.arena[key].parent = Some(new_parent);
        self.refresh_paths(key);
        Ok(())
    }

    pub fn set_content(&mut self, id: &str, content: &str) -> bool {
        let Some(key) = self.key(id) else {
            return false;
        };
        let node = &mut self.arena[key];
        if node.kind != NodeKind::File {
            return false;
        }
        node.content = Some(content.to_string());
        true
    }

    /// Pre-order snapshot of every node, root first.
    pub fn walk(&self) -> Vec<FileNode> {
        self.subtree_keys(self.root)
            .into_iter()
            .map(|key| self.snapshot(key))
            .collect()
    }

    pub fn files(&self) -> Vec<FileNode> {
        self.subtree_keys(self.root)
            .into_iter()
            .filter(|&key| self.arena[key].kind == NodeKind::File)
            .map(|key| self.snapshot(key))
            .collect()
    }

    /// Pre-order walk with depth, root excluded; `visible_only` skips the
    /// contents of closed folders.
    pub(crate) fn walk_with_depth(&self, visible_only: bool) -> Vec<(FileNode, u16)> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeKey, u16)> = vec![(self.root, 0)];

        while let Some((key, depth)) = stack.pop() {
            let node = &self.arena[key];
            if key != self.root {
                result.push((self.snapshot(key), depth));
            }
            if visible_only && !node.is_open {
                continue;
            }
            let child_depth = if key == self.root { 0 } else { depth + 1 };
            for &child in node.children.iter().rev() {
                stack.push((child, child_depth));
            }
        }

        result
    }

    pub fn flatten_for_view(&self) -> Vec<FileTreeRow> {
        self.walk_with_depth(true)
            .into_iter()
            .map(|(node, depth)| FileTreeRow {
                is_folder: node.is_folder(),
                is_open: node.is_open,
                id: node.id,
                depth,
                name: node.name,
            })
            .collect()
    }
}

impl Default for FileTree {
    fn default() -> Self {
        Self::demo()
    }
}

const DEMO_APP_TSX: &str = r#"import React from 'react';
import { Button } from './components/Button';

function App() {
  return (
    <div className="min-h-screen bg-background">
      <header className="p-4 border-b">
        <h1 className="text-2xl font-bold text-primary">
          Welcome to codeshell
        </h1>
      </header>
      <main className="p-8">
        <Button variant="primary">
          Get Started
        </Button>
      </main>
    </div>
  );
}

export default App;
"#;

const DEMO_MAIN_TSX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';
import './index.css';

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
"#;

const DEMO_BUTTON_TSX: &str = r#"import React from 'react';

interface ButtonProps {
  variant?: 'primary' | 'secondary' | 'ghost';
  children: React.ReactNode;
  onClick?: () => void;
}

export function Button({ variant = 'primary', children, onClick }: ButtonProps) {
  return (
    <button onClick={onClick} className={`btn btn-${variant}`}>
      {children}
    </button>
  );
}
"#;

const DEMO_PACKAGE_JSON: &str = r#"{
  "name": "my-project",
  "version": "1.0.0",
  "type": "module",
  "scripts": {
    "dev": "vite",
    "build": "tsc && vite build",
    "preview": "vite preview"
  },
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0"
  }
}
"#;

const DEMO_README_MD: &str = r#"# My Project

Welcome to your new project!

## Getting Started

```bash
npm install
npm run dev
```
"#;

impl FileTree {
    /// The starter project every fresh workspace opens with.
    pub fn demo() -> Self {
        let mut tree = Self::new("my-project");
        let seed: [(&str, &str, &str, NodeKind, Option<&str>); 7] = [
            (ROOT_ID, "src", "src", NodeKind::Folder, None),
            ("src", "app-tsx", "App.tsx", NodeKind::File, Some(DEMO_APP_TSX)),
            ("src", "main-tsx", "main.tsx", NodeKind::File, Some(DEMO_MAIN_TSX)),
            ("src", "components", "components", NodeKind::Folder, None),
            (
                "components",
                "button-tsx",
                "Button.tsx",
                NodeKind::File,
                Some(DEMO_BUTTON_TSX),
            ),
            (
                ROOT_ID,
                "package-json",
                "package.json",
                NodeKind::File,
                Some(DEMO_PACKAGE_JSON),
            ),
            (ROOT_ID, "readme-md", "README.md", NodeKind::File, Some(DEMO_README_MD)),
        ];

        for (parent, id, name, kind, content) in seed {
            if tree.insert_with_id(parent, id, name, kind).is_ok() {
                if let Some(content) = content {
                    tree.set_content(id, content);
                }
            }
        }
        tree.set_open("components", false);
        tree
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
