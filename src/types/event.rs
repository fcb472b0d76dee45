use serde::Serialize;

use super::ids::{ContainerId, TabId};

/// Change notifications emitted by the tab manager after a mutation applies.
///
/// The UI re-reads the affected read models when it receives one; events carry
/// identifiers only, never graph data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TabEvent {
    /// Tabs or folders of a space changed. `animated` is set for drag hovers.
    ContainerChanged { container: ContainerId, animated: bool },
    /// A space was created, renamed or deleted.
    ContainersChanged,
    /// The active space or tab pointer moved.
    ActiveChanged {
        container: Option<ContainerId>,
        tab: Option<TabId>,
    },
}
