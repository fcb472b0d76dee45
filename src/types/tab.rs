use serde::{Deserialize, Serialize};

use super::ids::{ContainerId, FolderId, TabId};

/// Title shown when neither a custom nor a page title is known.
pub const DEFAULT_TAB_TITLE: &str = "New Tab";

/// The three mutually exclusive sidebar sections a tab can live in.
///
/// Variant order is the display order: favorites first, normal tabs last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabSection {
    Favorite,
    Pinned,
    Normal,
}

impl TabSection {
    pub const ALL: [TabSection; 3] = [TabSection::Favorite, TabSection::Pinned, TabSection::Normal];

    /// Pinned and favorite tabs keep a saved URL snapshot.
    pub fn keeps_saved_url(self) -> bool {
        !matches!(self, TabSection::Normal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabSection::Favorite => "favorite",
            TabSection::Pinned => "pinned",
            TabSection::Normal => "normal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "favorite" => Some(TabSection::Favorite),
            "pinned" => Some(TabSection::Pinned),
            "normal" => Some(TabSection::Normal),
            _ => None,
        }
    }

    /// The section rendered directly below this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            TabSection::Favorite => Some(TabSection::Pinned),
            TabSection::Pinned => Some(TabSection::Normal),
            TabSection::Normal => None,
        }
    }
}

/// Opaque handle to the rendering surface backing a tab.
///
/// Owned by the rendering layer; the tab graph only attaches and detaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// A browser tab as stored in the tab graph.
///
/// `container`, `folder` and `parent` are identifier back-references into the
/// graph arena, never owning pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
    pub custom_title: Option<String>,
    pub page_title: Option<String>,
    pub favicon: Option<String>,
    pub section: TabSection,
    pub order: i64,
    pub parent: Option<TabId>,
    pub container: ContainerId,
    pub folder: Option<FolderId>,
    pub saved_url: Option<String>,
    pub created_at: i64,
    pub last_accessed_at: i64,
    /// Monotonic access stamp, breaks ties between equal `last_accessed_at`.
    pub access_seq: u64,
    /// Monotonic insertion stamp, breaks ties between equal `order` values.
    pub inserted_seq: u64,
    #[serde(skip)]
    pub render_handle: Option<RenderHandle>,
}

impl Tab {
    pub(crate) fn new(id: TabId, container: ContainerId, url: &str, now: i64) -> Self {
        Self {
            id,
            url: url.to_string(),
            custom_title: None,
            page_title: None,
            favicon: None,
            section: TabSection::Normal,
            order: 0,
            parent: None,
            container,
            folder: None,
            saved_url: None,
            created_at: now,
            last_accessed_at: now,
            access_seq: 0,
            inserted_seq: 0,
            render_handle: None,
        }
    }

    /// Custom title, then page title, then the "New Tab" placeholder.
    pub fn display_title(&self) -> &str {
        self.custom_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.page_title.as_deref().filter(|t| !t.is_empty()))
            .unwrap_or(DEFAULT_TAB_TITLE)
    }

    pub fn is_favorite(&self) -> bool {
        self.section == TabSection::Favorite
    }

    pub fn is_pinned(&self) -> bool {
        self.section == TabSection::Pinned
    }

    pub fn is_normal(&self) -> bool {
        self.section == TabSection::Normal
    }

    /// Reassigns the section and applies the saved URL rule.
    ///
    /// Entering pinned/favorite snapshots the current URL, returning to normal
    /// clears the snapshot and any folder membership is dropped when the tab
    /// leaves the pinned section.
    pub(crate) fn assign_section(&mut self, section: TabSection) {
        if self.section == section {
            return;
        }
        self.section = section;
        if section.keeps_saved_url() {
            self.saved_url = Some(self.url.clone());
        } else {
            self.saved_url = None;
        }
        if section != TabSection::Pinned {
            self.folder = None;
        }
    }
}
