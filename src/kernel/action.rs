use crate::kernel::editor::{GroupId, TabId};
use crate::kernel::settings::SettingsPatch;
use crate::kernel::state::SidebarPanel;

#[derive(Debug, Clone)]
pub enum Action {
    ToggleFolder {
        id: String,
    },
    CreateFile {
        parent_id: String,
        name: String,
    },
    CreateFolder {
        parent_id: String,
        name: String,
    },
    DeleteNode {
        id: String,
    },
    RenameNode {
        id: String,
        new_name: String,
    },
    MoveNode {
        id: String,
        new_parent_id: String,
    },
    OpenFile {
        file_id: String,
    },
    CloseTab {
        tab_id: TabId,
    },
    SetActiveTab {
        tab_id: TabId,
    },
    NextTab,
    PrevTab,
    UpdateTabContent {
        tab_id: TabId,
        content: String,
    },
    SaveTab {
        tab_id: TabId,
    },
    SplitEditor,
    SetActiveGroup {
        group: GroupId,
    },
    UpdateSettings(SettingsPatch),
    UpdateStatusBarItem {
        id: String,
        label: String,
    },
    CursorMoved {
        line: usize,
        column: usize,
    },
    ToggleSidebar,
    SetSidebarWidth {
        width: u32,
    },
    SetActiveSidebarPanel {
        panel: SidebarPanel,
    },
    ToggleCommandPalette,
    SetCommandPaletteOpen {
        open: bool,
    },
}
