use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;

use crate::models::{FileNode, FileTree};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(u64);

impl TabId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

impl Serialize for TabId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    pub const MAIN: GroupId = GroupId(0);

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::MAIN {
            write!(f, "main")
        } else {
            write!(f, "group-{}", self.0)
        }
    }
}

impl Serialize for GroupId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorTab {
    pub id: TabId,
    pub file_id: String,
    pub file_name: String,
    pub file_path: String,
    pub language: String,
    pub content: String,
    pub is_dirty: bool,
}

impl EditorTab {
    pub fn from_file(id: TabId, file: &FileNode) -> Self {
        Self {
            id,
            file_id: file.id.clone(),
            file_name: file.name.clone(),
            file_path: file.path.clone(),
            language: file
                .language
                .clone()
                .unwrap_or_else(|| "plaintext".to_string()),
            content: file.content.clone().unwrap_or_default(),
            is_dirty: false,
        }
    }

    pub fn display_title(&self) -> String {
        if self.is_dirty {
            format!("\u{25cf} {}", self.file_name)
        } else {
            self.file_name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorGroup {
    pub id: GroupId,
    pub tabs: Vec<EditorTab>,
    pub active_tab_id: Option<TabId>,
}

impl EditorGroup {
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    pub fn active_tab(&self) -> Option<&EditorTab> {
        let id = self.active_tab_id?;
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn position(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == tab_id)
    }

    pub fn contains(&self, tab_id: TabId) -> bool {
        self.position(tab_id).is_some()
    }

    pub fn find_by_file(&self, file_id: &str) -> Option<&EditorTab> {
        self.tabs.iter().find(|tab| tab.file_id == file_id)
    }

    pub fn set_active(&mut self, tab_id: TabId) -> bool {
        if !self.contains(tab_id) || self.active_tab_id == Some(tab_id) {
            return false;
        }
        self.active_tab_id = Some(tab_id);
        true
    }

    /// Removes a tab. When it was active, the tab that slides into its index
    /// takes over, then the one before it, else nothing is active.
    pub fn remove_tab(&mut self, tab_id: TabId) -> Option<EditorTab> {
        let index = self.position(tab_id)?;
        let removed = self.tabs.remove(index);
        if self.active_tab_id == Some(tab_id) {
            self.active_tab_id = self
                .tabs
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.tabs.get(i)))
                .map(|tab| tab.id);
        }
        Some(removed)
    }

    pub fn next_tab(&mut self) -> bool {
        self.cycle(1)
    }

    pub fn prev_tab(&mut self) -> bool {
        self.cycle(-1)
    }

    fn cycle(&mut self, step: isize) -> bool {
        let len = self.tabs.len();
        if len <= 1 {
            return false;
        }
        let current = self
            .active_tab_id
            .and_then(|id| self.position(id))
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(len as isize) as usize;
        let id = self.tabs[next].id;
        self.set_active(id)
    }
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub groups: Vec<EditorGroup>,
    active_group: GroupId,
    next_tab_id: u64,
    next_group_id: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            groups: vec![EditorGroup::new(GroupId::MAIN)],
            active_group: GroupId::MAIN,
            next_tab_id: 1,
            next_group_id: 1,
        }
    }

    fn alloc_tab_id(&mut self) -> TabId {
        let id = TabId::new(self.next_tab_id);
        self.next_tab_id = self.next_tab_id.saturating_add(1);
        id
    }

    pub fn active_group_id(&self) -> GroupId {
        self.active_group
    }

    pub fn group(&self, id: GroupId) -> Option<&EditorGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn group_mut(&mut self, id: GroupId) -> Option<&mut EditorGroup> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn active_group(&self) -> Option<&EditorGroup> {
        self.group(self.active_group)
    }

    pub fn set_active_group(&mut self, id: GroupId) -> bool {
        if self.active_group == id || self.group(id).is_none() {
            return false;
        }
        self.active_group = id;
        true
    }

    /// Adds an empty group to the right and focuses it.
    pub fn split_group(&mut self) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id = self.next_group_id.saturating_add(1);
        self.groups.push(EditorGroup::new(id));
        self.active_group = id;
        id
    }

    pub fn tab(&self, tab_id: TabId) -> Option<&EditorTab> {
        self.groups
            .iter()
            .flat_map(|g| g.tabs.iter())
            .find(|tab| tab.id == tab_id)
    }

    fn tab_mut(&mut self, tab_id: TabId) -> Option<&mut EditorTab> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.tabs.iter_mut())
            .find(|tab| tab.id == tab_id)
    }

    pub fn tabs(&self) -> impl Iterator<Item = &EditorTab> {
        self.groups.iter().flat_map(|g| g.tabs.iter())
    }

    pub fn tabs_for_file<'a>(&'a self, file_id: &'a str) -> impl Iterator<Item = &'a EditorTab> {
        self.tabs().filter(move |tab| tab.file_id == file_id)
    }

    /// Active group, then its active tab id, then the tab itself.
    pub fn current_tab(&self) -> Option<&EditorTab> {
        self.active_group()?.active_tab()
    }

    /// Opens `file` in the active group, or activates the tab already showing
    /// it there. Folders are ignored.
    pub fn open_file(&mut self, file: &FileNode) -> Option<TabId> {
        if !file.is_file() {
            return None;
        }
        let active = self.active_group;
        let existing = self
            .group(active)?
            .find_by_file(&file.id)
            .map(|tab| tab.id);
        if let Some(tab_id) = existing {
            self.group_mut(active)?.set_active(tab_id);
            return Some(tab_id);
        }

        let tab_id = self.alloc_tab_id();
        let group = self.group_mut(active)?;
        group.tabs.push(EditorTab::from_file(tab_id, file));
        group.active_tab_id = Some(tab_id);
        Some(tab_id)
    }

    pub fn close_tab(&mut self, tab_id: TabId) -> bool {
        let mut closed = false;
        for group in &mut self.groups {
            closed |= group.remove_tab(tab_id).is_some();
        }
        closed
    }

    /// Closes every tab bound to one of `file_ids`; returns how many closed.
    pub fn close_tabs_for_files(&mut self, file_ids: &FxHashSet<String>) -> usize {
        let doomed: Vec<TabId> = self
            .tabs()
            .filter(|tab| file_ids.contains(&tab.file_id))
            .map(|tab| tab.id)
            .collect();
        for &tab_id in &doomed {
            self.close_tab(tab_id);
        }
        doomed.len()
    }

    /// Only looks in the active group.
    pub fn set_active_tab(&mut self, tab_id: TabId) -> bool {
        let active = self.active_group;
        self.group_mut(active)
            .is_some_and(|group| group.set_active(tab_id))
    }

    pub fn next_tab(&mut self) -> bool {
        let active = self.active_group;
        self.group_mut(active).is_some_and(EditorGroup::next_tab)
    }

    pub fn prev_tab(&mut self) -> bool {
        let active = self.active_group;
        self.group_mut(active).is_some_and(EditorGroup::prev_tab)
    }

    /// Replaces the working copy and marks the tab dirty, even when the text
    /// is unchanged.
    pub fn update_content(&mut self, tab_id: TabId, content: String) -> bool {
        let Some(tab) = self.tab_mut(tab_id) else {
            return false;
        };
        tab.content = content;
        tab.is_dirty = true;
        true
    }

    /// Writes the working copy back into its file node and clears the dirty
    /// flag. Nothing changes when the tab or its node is gone.
    pub fn save(&mut self, tab_id: TabId, tree: &mut FileTree) -> bool {
        let Some(tab) = self.tab_mut(tab_id) else {
            return false;
        };
        if !tree.set_content(&tab.file_id, &tab.content) {
            return false;
        }
        tab.is_dirty = false;
        true
    }

    /// Refreshes display fields of every tab bound to `file`. Tabs keep their ids.
    pub fn refresh_file_metadata(&mut self, file: &FileNode) -> bool {
        let mut changed = false;
        for tab in self
            .groups
            .iter_mut()
            .flat_map(|g| g.tabs.iter_mut())
            .filter(|tab| tab.file_id == file.id)
        {
            tab.file_name = file.name.clone();
            tab.file_path = file.path.clone();
            if let Some(language) = &file.language {
                tab.language = language.clone();
            }
            changed = true;
        }
        changed
    }
}
