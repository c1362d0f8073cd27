use crate::models::{display_name_for, FileNode, LanguageId, NodeKind};

use super::editor::{EditorTab, TabId};
use super::state::PersistedSession;
use super::status_bar::{LANGUAGE_ITEM, LINE_ITEM};
use super::{Action, Effect, WorkspaceState};

#[derive(Debug)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn unchanged() -> Self {
        Self::changed(false)
    }
}

/// Owner of the workspace state. All mutation goes through `dispatch`.
pub struct Store {
    state: WorkspaceState,
}

impl Store {
    pub fn new(state: WorkspaceState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn into_state(self) -> WorkspaceState {
        self.state
    }

    /// Active group, then its active tab id, then the tab.
    pub fn current_tab(&self) -> Option<&EditorTab> {
        self.state.editor.current_tab()
    }

    /// The tree node behind the current tab, if both still exist.
    pub fn current_file(&self) -> Option<FileNode> {
        let tab = self.current_tab()?;
        self.state.tree.get(&tab.file_id)
    }

    pub fn persisted_session(&self) -> PersistedSession {
        self.state.persisted_session()
    }

    /// Creates a node and returns its id; `None` when the parent is not a folder.
    pub fn create_node(&mut self, parent_id: &str, name: &str, kind: NodeKind) -> Option<String> {
        let id = self.state.tree.create_child(parent_id, name, kind);
        if id.is_none() {
            tracing::debug!(parent_id, name, "create ignored: parent is not a folder");
        }
        id
    }

    /// Opens a file from the tree in the active group and returns its tab.
    pub fn open_file(&mut self, file_id: &str) -> Option<TabId> {
        let Some(file) = self.state.tree.get(file_id) else {
            tracing::debug!(file_id, "open ignored: no such node");
            return None;
        };
        let tab_id = self.state.editor.open_file(&file)?;
        self.sync_language_item();
        Some(tab_id)
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::ToggleFolder { id } => {
                DispatchResult::changed(self.state.tree.toggle_folder(&id))
            }
            Action::CreateFile { parent_id, name } => DispatchResult::changed(
                self.create_node(&parent_id, &name, NodeKind::File).is_some(),
            ),
            Action::CreateFolder { parent_id, name } => DispatchResult::changed(
                self.create_node(&parent_id, &name, NodeKind::Folder).is_some(),
            ),
            Action::DeleteNode { id } => {
                let removed = self.state.tree.delete_node(&id);
                if removed.is_empty() {
                    tracing::debug!(id, "delete ignored: no such node");
                    return DispatchResult::unchanged();
                }
                let closed = self.state.editor.close_tabs_for_files(&removed);
                tracing::debug!(id, removed = removed.len(), closed, "node deleted");
                self.sync_language_item();
                DispatchResult::changed(true)
            }
            Action::RenameNode { id, new_name } => {
                if !self.state.tree.rename_node(&id, &new_name) {
                    tracing::debug!(id, "rename ignored: no such node");
                    return DispatchResult::unchanged();
                }
                self.refresh_open_tabs();
                self.sync_language_item();
                DispatchResult::changed(true)
            }
            Action::MoveNode { id, new_parent_id } => {
                match self.state.tree.move_node(&id, &new_parent_id) {
                    Ok(()) => {
                        self.refresh_open_tabs();
                        DispatchResult::changed(true)
                    }
                    Err(err) => {
                        tracing::warn!(id, new_parent_id, error = %err, "move rejected");
                        DispatchResult::unchanged()
                    }
                }
            }
            Action::OpenFile { file_id } => {
                let before = self.active_tab_id();
                let opened = self.open_file(&file_id);
                DispatchResult::changed(opened.is_some() && opened != before)
            }
            Action::CloseTab { tab_id } => {
                let changed = self.state.editor.close_tab(tab_id);
                if changed {
                    self.sync_language_item();
                }
                DispatchResult::changed(changed)
            }
            Action::SetActiveTab { tab_id } => {
                let changed = self.state.editor.set_active_tab(tab_id);
                if changed {
                    self.sync_language_item();
                }
                DispatchResult::changed(changed)
            }
            Action::NextTab => {
                let changed = self.state.editor.next_tab();
                if changed {
                    self.sync_language_item();
                }
                DispatchResult::changed(changed)
            }
            Action::PrevTab => {
                let changed = self.state.editor.prev_tab();
                if changed {
                    self.sync_language_item();
                }
                DispatchResult::changed(changed)
            }
            Action::UpdateTabContent { tab_id, content } => {
                DispatchResult::changed(self.state.editor.update_content(tab_id, content))
            }
            Action::SaveTab { tab_id } => {
                let saved = self.state.editor.save(tab_id, &mut self.state.tree);
                if !saved {
                    tracing::debug!(tab = %tab_id, "save ignored: tab or file missing");
                }
                DispatchResult::changed(saved)
            }
            Action::SplitEditor => {
                self.state.editor.split_group();
                DispatchResult::changed(true)
            }
            Action::SetActiveGroup { group } => {
                let changed = self.state.editor.set_active_group(group);
                if changed {
                    self.sync_language_item();
                }
                DispatchResult::changed(changed)
            }
            Action::UpdateSettings(patch) => {
                if self.state.settings.apply(patch) {
                    self.persist()
                } else {
                    DispatchResult::unchanged()
                }
            }
            Action::UpdateStatusBarItem { id, label } => {
                DispatchResult::changed(self.state.status_bar.update(&id, &label))
            }
            Action::CursorMoved { line, column } => DispatchResult::changed(
                self.state
                    .status_bar
                    .update(LINE_ITEM, &format!("Ln {line}, Col {column}")),
            ),
            Action::ToggleSidebar => {
                self.state.ui.sidebar_visible = !self.state.ui.sidebar_visible;
                self.persist()
            }
            Action::SetSidebarWidth { width } => {
                if self.state.ui.sidebar_width == width {
                    return DispatchResult::unchanged();
                }
                self.state.ui.sidebar_width = width;
                self.persist()
            }
            Action::SetActiveSidebarPanel { panel } => {
                let prev = self.state.ui.active_sidebar_panel;
                self.state.ui.active_sidebar_panel = panel;
                DispatchResult::changed(prev != panel)
            }
            Action::ToggleCommandPalette => {
                self.state.ui.command_palette_open = !self.state.ui.command_palette_open;
                DispatchResult::changed(true)
            }
            Action::SetCommandPaletteOpen { open } => {
                let prev = self.state.ui.command_palette_open;
                self.state.ui.command_palette_open = open;
                DispatchResult::changed(prev != open)
            }
        }
    }

    fn active_tab_id(&self) -> Option<TabId> {
        self.current_tab().map(|tab| tab.id)
    }

    fn persist(&self) -> DispatchResult {
        DispatchResult {
            effects: vec![Effect::PersistSession(self.state.persisted_session())],
            state_changed: true,
        }
    }

    fn refresh_open_tabs(&mut self) {
        let mut file_ids: Vec<String> = self
            .state
            .editor
            .tabs()
            .map(|tab| tab.file_id.clone())
            .collect();
        file_ids.sort_unstable();
        file_ids.dedup();
        for file_id in file_ids {
            if let Some(node) = self.state.tree.get(&file_id) {
                self.state.editor.refresh_file_metadata(&node);
            }
        }
    }

    fn sync_language_item(&mut self) {
        let language = self
            .current_tab()
            .map(|tab| display_name_for(&tab.language))
            .unwrap_or_else(|| LanguageId::PlainText.display_name().to_string());
        self.state.status_bar.update(LANGUAGE_ITEM, &language);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
