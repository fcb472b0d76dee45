use thiserror::Error;

use super::ids::{ContainerId, FolderId, TabId};

// === TabError ===

/// Errors reported by id-addressed tab manager operations.
///
/// Drag-and-drop mutations never produce these; invalid drops are no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    /// Tab with the given ID was not found.
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),
    /// Folder with the given ID was not found.
    #[error("Folder not found: {0}")]
    FolderNotFound(FolderId),
    /// Space with the given ID was not found.
    #[error("Space not found: {0}")]
    ContainerNotFound(ContainerId),
    /// The folder still has tabs and the deletion mode requires it to be empty.
    #[error("Folder is not empty: {0}")]
    FolderNotEmpty(FolderId),
    /// The last remaining space cannot be deleted.
    #[error("Cannot delete the last space: {0}")]
    LastContainer(ContainerId),
    /// A drag payload or id string could not be decoded.
    #[error("Invalid tab identifier: {0}")]
    InvalidPayload(String),
}

// === StoreError ===

/// Errors raised by the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failed.
    #[error("Session database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Snapshot could not be encoded or decoded.
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The store refused the write.
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    Io(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
