use serde::{Deserialize, Serialize};

use super::container::TabContainer;
use super::folder::Folder;
use super::ids::{ContainerId, TabId};
use super::tab::Tab;

/// Everything the persistence collaborator needs to rebuild the tab graph.
///
/// Rendering handles are not part of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub containers: Vec<TabContainer>,
    pub folders: Vec<Folder>,
    pub tabs: Vec<Tab>,
    pub active_container: Option<ContainerId>,
    pub active_tab: Option<TabId>,
    pub timestamp: i64,
}
