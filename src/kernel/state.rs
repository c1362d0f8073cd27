use serde::{Deserialize, Serialize};

use crate::models::FileTree;

use super::editor::EditorState;
use super::settings::WorkspaceSettings;
use super::status_bar::StatusBar;

pub const DEFAULT_SIDEBAR_WIDTH: u32 = 260;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarPanel {
    #[default]
    Explorer,
    Search,
    Git,
    Extensions,
    AiChat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub sidebar_visible: bool,
    pub sidebar_width: u32,
    pub active_sidebar_panel: SidebarPanel,
    pub command_palette_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sidebar_visible: true,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            active_sidebar_panel: SidebarPanel::Explorer,
            command_palette_open: false,
        }
    }
}

/// The slice of workspace state that survives a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSession {
    pub settings: WorkspaceSettings,
    pub sidebar_width: u32,
    pub sidebar_visible: bool,
}

impl Default for PersistedSession {
    fn default() -> Self {
        Self {
            settings: WorkspaceSettings::default(),
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            sidebar_visible: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkspaceState {
    pub tree: FileTree,
    pub editor: EditorState,
    pub settings: WorkspaceSettings,
    pub status_bar: StatusBar,
    pub ui: UiState,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new(FileTree::demo())
    }
}

impl WorkspaceState {
    pub fn new(tree: FileTree) -> Self {
        Self {
            tree,
            editor: EditorState::new(),
            settings: WorkspaceSettings::default(),
            status_bar: StatusBar::default(),
            ui: UiState::default(),
        }
    }

    /// Fresh workspace with the persisted slice restored on top.
    pub fn restore(tree: FileTree, session: PersistedSession) -> Self {
        let mut state = Self::new(tree);
        state.settings = session.settings;
        state.ui.sidebar_width = session.sidebar_width;
        state.ui.sidebar_visible = session.sidebar_visible;
        state
    }

    pub fn persisted_session(&self) -> PersistedSession {
        PersistedSession {
            settings: self.settings.clone(),
            sidebar_width: self.ui.sidebar_width,
            sidebar_visible: self.ui.sidebar_visible,
        }
    }
}
