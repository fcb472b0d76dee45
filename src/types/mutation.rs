use super::ids::{ContainerId, FolderId, TabId};
use super::tab::TabSection;

/// Whether a moved tab lands next to its drop target or inside its tab set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reparenting {
    Sibling,
    Child,
}

/// Where `reorder_tabs` should put the dragged tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderTarget {
    /// Adjacent to a specific tab.
    Tab(TabId),
    /// At the head of a section of the container.
    SectionHead(TabSection),
}

/// A set of sibling tabs sharing one ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub container: ContainerId,
    pub section: TabSection,
    pub folder: Option<FolderId>,
    pub parent: Option<TabId>,
}

impl Scope {
    /// The top-level list of a section, outside folders and tab sets.
    pub fn section_root(container: ContainerId, section: TabSection) -> Self {
        Self {
            container,
            section,
            folder: None,
            parent: None,
        }
    }

    /// The top-level members of a folder.
    pub fn folder_root(container: ContainerId, folder: FolderId) -> Self {
        Self {
            container,
            section: TabSection::Pinned,
            folder: Some(folder),
            parent: None,
        }
    }
}
