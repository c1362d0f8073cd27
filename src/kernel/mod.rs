//! Headless workspace core (state/action/effect).

pub mod action;
pub mod context;
pub mod editor;
pub mod effect;
pub mod services;
pub mod settings;
pub mod state;
pub mod status_bar;
pub mod store;

pub use action::Action;
pub use context::{ContextAction, ProjectContext};
pub use editor::{EditorGroup, EditorState, EditorTab, GroupId, TabId};
pub use effect::Effect;
pub use settings::{SettingsPatch, Theme, WorkspaceSettings};
pub use state::{PersistedSession, SidebarPanel, UiState, WorkspaceState};
pub use status_bar::{StatusBar, StatusBarItem, StatusBarPosition};
pub use store::{DispatchResult, Store};
