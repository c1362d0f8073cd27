use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBarItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub position: StatusBarPosition,
}

impl StatusBarItem {
    fn new(id: &str, label: &str, position: StatusBarPosition) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: None,
            position,
        }
    }

    fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

pub const LINE_ITEM: &str = "line";
pub const LANGUAGE_ITEM: &str = "language";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBar {
    items: Vec<StatusBarItem>,
}

impl Default for StatusBar {
    fn default() -> Self {
        use StatusBarPosition::{Left, Right};
        Self {
            items: vec![
                StatusBarItem::new("branch", "main", Left).with_icon("git-branch"),
                StatusBarItem::new("sync", "\u{2191}0 \u{2193}0", Left),
                StatusBarItem::new("problems", "0 \u{26a0} 0 \u{2715}", Left),
                StatusBarItem::new(LINE_ITEM, "Ln 1, Col 1", Right),
                StatusBarItem::new("encoding", "UTF-8", Right),
                StatusBarItem::new(LANGUAGE_ITEM, "TypeScript React", Right),
            ],
        }
    }
}

impl StatusBar {
    pub fn items(&self) -> &[StatusBarItem] {
        &self.items
    }

    pub fn items_at(&self, position: StatusBarPosition) -> impl Iterator<Item = &StatusBarItem> {
        self.items.iter().filter(move |item| item.position == position)
    }

    pub fn get(&self, id: &str) -> Option<&StatusBarItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replaces the label of `id`; unknown ids are ignored.
    pub fn update(&mut self, id: &str, label: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if item.label != label => {
                item.label = label.to_string();
                true
            }
            _ => false,
        }
    }
}
