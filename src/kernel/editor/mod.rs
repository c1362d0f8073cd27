//! Editor domain: groups of tabs over workspace files.

mod state;

pub use state::{EditorGroup, EditorState, EditorTab, GroupId, TabId};

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/state.rs"]
mod tests;
