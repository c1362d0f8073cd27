use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Synthwave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceSettings {
    pub theme: Theme,
    pub font_size: u32,
    pub font_family: String,
    pub tab_size: u32,
    pub word_wrap: bool,
    pub minimap: bool,
    pub line_numbers: bool,
    pub auto_save: bool,
    pub auto_save_delay: u64,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            font_size: 14,
            font_family: "JetBrains Mono".to_string(),
            tab_size: 2,
            word_wrap: false,
            minimap: true,
            line_numbers: true,
            auto_save: true,
            auto_save_delay: 1000,
        }
    }
}

/// Partial settings; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_numbers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save_delay: Option<u64>,
}

impl WorkspaceSettings {
    /// Shallow merge, last write wins. Returns whether any value changed.
    pub fn apply(&mut self, patch: SettingsPatch) -> bool {
        let before = self.clone();
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(font_family) = patch.font_family {
            self.font_family = font_family;
        }
        if let Some(tab_size) = patch.tab_size {
            self.tab_size = tab_size;
        }
        if let Some(word_wrap) = patch.word_wrap {
            self.word_wrap = word_wrap;
        }
        if let Some(minimap) = patch.minimap {
            self.minimap = minimap;
        }
        if let Some(line_numbers) = patch.line_numbers {
            self.line_numbers = line_numbers;
        }
        if let Some(auto_save) = patch.auto_save {
            self.auto_save = auto_save;
        }
        if let Some(auto_save_delay) = patch.auto_save_delay {
            self.auto_save_delay = auto_save_delay;
        }
        *self != before
    }
}
