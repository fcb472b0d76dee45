use serde::{Deserialize, Serialize};

use super::ids::{ContainerId, FolderId};

/// A named, collapsible group of pinned tabs inside a space.
///
/// Membership is stored on the tab (`Tab::folder`); the folder itself only
/// records where it lives and how it is displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub container: ContainerId,
    pub name: String,
    pub is_open: bool,
    pub order: i64,
    pub created_at: i64,
}

/// How `delete_folder` treats a folder that still has members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderDeletion {
    /// Refuse to delete unless the folder is empty.
    OnlyIfEmpty,
    /// Delete the folder and move its tabs to the pinned section of the space.
    ReleaseTabs,
}
