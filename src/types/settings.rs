use serde::{Deserialize, Serialize};

/// Top-level tab engine settings, stored as `settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TabSettings {
    #[serde(default)]
    pub drag: DragSettings,
    #[serde(default)]
    pub tabs: NewTabSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

/// Drag-and-drop behaviour of the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DragSettings {
    /// When false, dropping on a tab never groups; every drop is a sibling move.
    pub tree_style_tabs: bool,
    /// Fraction of a tab's frame, from its leading edge, that means "insert next to".
    pub drop_leading_fraction: f32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            tree_style_tabs: true,
            drop_leading_fraction: 0.5,
        }
    }
}

/// Where new tabs appear in the normal section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NewTabPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTabSettings {
    pub new_tab_url: String,
    pub new_tab_position: NewTabPosition,
}

impl Default for NewTabSettings {
    fn default() -> Self {
        Self {
            new_tab_url: "about:blank".to_string(),
            new_tab_position: NewTabPosition::Bottom,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    pub restore_on_launch: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            restore_on_launch: true,
        }
    }
}
