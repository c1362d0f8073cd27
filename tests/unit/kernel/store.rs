use super::*;
use crate::kernel::settings::{SettingsPatch, Theme};
use crate::kernel::state::SidebarPanel;
use crate::kernel::status_bar::LANGUAGE_ITEM;
use crate::models::{FileTree, NodeKind, ROOT_ID};

fn demo_store() -> Store {
    Store::new(WorkspaceState::default())
}

fn empty_store() -> Store {
    Store::new(WorkspaceState::new(FileTree::new("scratch")))
}

fn language_label(store: &Store) -> String {
    store
        .state()
        .status_bar
        .get(LANGUAGE_ITEM)
        .unwrap()
        .label
        .clone()
}

#[test]
fn create_open_edit_save_then_delete_folder() {
    let mut store = empty_store();

    let src = store.create_node(ROOT_ID, "src", NodeKind::Folder).unwrap();
    let file = store.create_node(&src, "a.ts", NodeKind::File).unwrap();
    assert_eq!(store.state().tree.get(&file).unwrap().path, "/src/a.ts");

    let tab = store.open_file(&file).unwrap();
    assert_eq!(store.current_tab().unwrap().id, tab);
    assert_eq!(language_label(&store), "TypeScript");

    let result = store.dispatch(Action::UpdateTabContent {
        tab_id: tab,
        content: "let x".to_string(),
    });
    assert!(result.state_changed);
    assert!(store.current_tab().unwrap().is_dirty);

    store.dispatch(Action::SaveTab { tab_id: tab });
    assert!(!store.current_tab().unwrap().is_dirty);
    assert_eq!(store.state().tree.content(&file), Some("let x"));

    let result = store.dispatch(Action::DeleteNode { id: src.clone() });
    assert!(result.state_changed);
    assert!(!store.state().tree.contains(&src));
    assert!(!store.state().tree.contains(&file));
    assert!(store.current_tab().is_none());
    assert!(store.current_file().is_none());
}

#[test]
fn dispatch_create_reports_change() {
    let mut store = demo_store();
    let before = store.state().tree.len();

    let result = store.dispatch(Action::CreateFile {
        parent_id: "src".to_string(),
        name: "index.css".to_string(),
    });
    assert!(result.state_changed);
    assert_eq!(store.state().tree.len(), before + 1);

    let result = store.dispatch(Action::CreateFolder {
        parent_id: "readme-md".to_string(),
        name: "nope".to_string(),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().tree.len(), before + 1);
}

#[test]
fn settings_merge_and_persist_effect() {
    let mut store = demo_store();

    let result = store.dispatch(Action::UpdateSettings(SettingsPatch {
        font_size: Some(16),
        ..Default::default()
    }));
    assert!(result.state_changed);
    assert_eq!(result.effects.len(), 1);

    store.dispatch(Action::UpdateSettings(SettingsPatch {
        theme: Some(Theme::Light),
        ..Default::default()
    }));

    let settings = &store.state().settings;
    assert_eq!(settings.font_size, 16);
    assert_eq!(settings.theme, Theme::Light);
    assert_eq!(settings.tab_size, 2);

    let Effect::PersistSession(session) = &result.effects[0];
    assert_eq!(session.settings.font_size, 16);
}

#[test]
fn settings_noop_emits_nothing() {
    let mut store = demo_store();
    let result = store.dispatch(Action::UpdateSettings(SettingsPatch {
        font_size: Some(14),
        ..Default::default()
    }));
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn open_file_twice_keeps_one_tab() {
    let mut store = demo_store();
    let first = store.open_file("app-tsx").unwrap();
    store.open_file("readme-md").unwrap();
    let again = store.open_file("app-tsx").unwrap();

    assert_eq!(first, again);
    assert_eq!(store.state().editor.tabs().count(), 2);
    assert_eq!(store.current_tab().unwrap().id, first);
}

#[test]
fn open_folder_or_missing_is_noop() {
    let mut store = demo_store();
    assert!(!store
        .dispatch(Action::OpenFile {
            file_id: "src".to_string()
        })
        .state_changed);
    assert!(!store
        .dispatch(Action::OpenFile {
            file_id: "ghost".to_string()
        })
        .state_changed);
    assert!(store.current_tab().is_none());
}

#[test]
fn language_item_follows_active_tab() {
    let mut store = demo_store();
    let app = store.open_file("app-tsx").unwrap();
    store.open_file("package-json").unwrap();
    assert_eq!(language_label(&store), "JSON");

    store.dispatch(Action::SetActiveTab { tab_id: app });
    assert_eq!(language_label(&store), "TypeScript React");

    store.dispatch(Action::NextTab);
    assert_eq!(language_label(&store), "JSON");
}

#[test]
fn language_item_resets_when_last_tab_closes() {
    let mut store = demo_store();
    let tab = store.open_file("package-json").unwrap();
    assert_eq!(language_label(&store), "JSON");

    store.dispatch(Action::CloseTab { tab_id: tab });
    assert!(store.current_tab().is_none());
    assert_eq!(language_label(&store), "Plain Text");
}

#[test]
fn close_active_tab_promotes_neighbour() {
    let mut store = demo_store();
    let a = store.open_file("app-tsx").unwrap();
    let b = store.open_file("main-tsx").unwrap();
    let c = store.open_file("readme-md").unwrap();

    store.dispatch(Action::SetActiveTab { tab_id: b });
    store.dispatch(Action::CloseTab { tab_id: b });
    assert_eq!(store.current_tab().unwrap().id, c);

    store.dispatch(Action::CloseTab { tab_id: c });
    assert_eq!(store.current_tab().unwrap().id, a);
    assert_eq!(language_label(&store), "TypeScript React");

    assert!(!store.dispatch(Action::CloseTab { tab_id: c }).state_changed);
}

#[test]
fn rename_updates_open_tab() {
    let mut store = demo_store();
    let tab = store.open_file("app-tsx").unwrap();

    let result = store.dispatch(Action::RenameNode {
        id: "app-tsx".to_string(),
        new_name: "App.jsx".to_string(),
    });
    assert!(result.state_changed);

    let tab = store.state().editor.tab(tab).unwrap();
    assert_eq!(tab.file_name, "App.jsx");
    assert_eq!(tab.file_path, "/src/App.jsx");
    assert_eq!(tab.language, "javascriptreact");
    assert_eq!(language_label(&store), "JavaScript React");
}

#[test]
fn rename_folder_refreshes_descendant_paths() {
    let mut store = demo_store();
    let tab = store.open_file("button-tsx").unwrap();

    store.dispatch(Action::RenameNode {
        id: "src".to_string(),
        new_name: "lib".to_string(),
    });

    assert_eq!(
        store.state().editor.tab(tab).unwrap().file_path,
        "/lib/components/Button.tsx"
    );
}

#[test]
fn move_into_descendant_is_rejected() {
    let mut store = demo_store();
    let result = store.dispatch(Action::MoveNode {
        id: "src".to_string(),
        new_parent_id: "components".to_string(),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().tree.get("components").unwrap().parent_id.as_deref(), Some("src"));
}

#[test]
fn move_file_refreshes_tab_path() {
    let mut store = demo_store();
    let tab = store.open_file("readme-md").unwrap();

    let result = store.dispatch(Action::MoveNode {
        id: "readme-md".to_string(),
        new_parent_id: "src".to_string(),
    });
    assert!(result.state_changed);
    assert_eq!(store.state().editor.tab(tab).unwrap().file_path, "/src/README.md");
}

#[test]
fn delete_missing_node_is_noop() {
    let mut store = demo_store();
    let before = store.state().tree.len();
    assert!(!store
        .dispatch(Action::DeleteNode {
            id: "ghost".to_string()
        })
        .state_changed);
    assert_eq!(store.state().tree.len(), before);
}

#[test]
fn save_after_delete_keeps_tree_untouched() {
    let mut store = demo_store();
    let tab = store.open_file("readme-md").unwrap();
    store.dispatch(Action::UpdateTabContent {
        tab_id: tab,
        content: "changed".to_string(),
    });
    store.dispatch(Action::DeleteNode {
        id: "readme-md".to_string(),
    });

    assert!(!store.dispatch(Action::SaveTab { tab_id: tab }).state_changed);
    assert!(store.state().tree.get("readme-md").is_none());
}

#[test]
fn cursor_moved_updates_line_item() {
    let mut store = demo_store();
    assert!(store
        .dispatch(Action::CursorMoved { line: 12, column: 4 })
        .state_changed);
    assert_eq!(
        store.state().status_bar.get(LINE_ITEM).unwrap().label,
        "Ln 12, Col 4"
    );
}

#[test]
fn unknown_status_item_is_ignored() {
    let mut store = demo_store();
    let result = store.dispatch(Action::UpdateStatusBarItem {
        id: "nope".to_string(),
        label: "x".to_string(),
    });
    assert!(!result.state_changed);
    assert!(store.state().status_bar.get("nope").is_none());
}

#[test]
fn sidebar_changes_are_persisted() {
    let mut store = demo_store();

    let result = store.dispatch(Action::ToggleSidebar);
    assert!(!store.state().ui.sidebar_visible);
    assert_eq!(
        result.effects,
        vec![Effect::PersistSession(store.persisted_session())]
    );

    let result = store.dispatch(Action::SetSidebarWidth { width: 320 });
    assert_eq!(result.effects.len(), 1);
    assert!(store
        .dispatch(Action::SetSidebarWidth { width: 320 })
        .effects
        .is_empty());

    let session = store.persisted_session();
    assert_eq!(session.sidebar_width, 320);
    assert!(!session.sidebar_visible);
}

#[test]
fn ui_flags_do_not_persist() {
    let mut store = demo_store();

    let result = store.dispatch(Action::SetActiveSidebarPanel {
        panel: SidebarPanel::AiChat,
    });
    assert!(result.state_changed);
    assert!(result.effects.is_empty());

    store.dispatch(Action::ToggleCommandPalette);
    assert!(store.state().ui.command_palette_open);
    assert!(!store
        .dispatch(Action::SetCommandPaletteOpen { open: true })
        .state_changed);
}

#[test]
fn split_editor_opens_in_new_group() {
    let mut store = demo_store();
    let first = store.open_file("app-tsx").unwrap();

    store.dispatch(Action::SplitEditor);
    let second = store.open_file("app-tsx").unwrap();

    assert_ne!(first, second);
    assert_eq!(store.state().editor.groups.len(), 2);
    assert_eq!(store.state().editor.tabs_for_file("app-tsx").count(), 2);
}

#[test]
fn toggle_folder_flips_open_state() {
    let mut store = demo_store();
    assert!(!store.state().tree.is_open("components"));
    store.dispatch(Action::ToggleFolder {
        id: "components".to_string(),
    });
    assert!(store.state().tree.is_open("components"));
    assert!(!store
        .dispatch(Action::ToggleFolder {
            id: "readme-md".to_string()
        })
        .state_changed);
}
