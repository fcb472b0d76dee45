use serde::{Deserialize, Serialize};

use super::ids::ContainerId;

/// A space: the aggregate root that exclusively owns a set of tabs and folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabContainer {
    pub id: ContainerId,
    pub name: String,
    pub emoji: Option<String>,
    pub created_at: i64,
    /// Fixed at creation; breaks `created_at` ties.
    #[serde(default)]
    pub created_seq: u64,
    pub last_accessed_at: i64,
    pub access_seq: u64,
}
