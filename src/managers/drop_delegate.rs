//! Drop delegates: one strategy per kind of drop target in the sidebar.
//!
//! A delegate turns a drag gesture into exactly one mutation of the space it
//! sits in. The mutation is applied as soon as the pointer enters the target
//! so the list reflows under the pointer; leaving the target does not undo it.

use crate::types::drag::{Axis, DropInfo, DropOperation, DropTargetItem};
use crate::types::ids::{ContainerId, FolderId, TabId};
use crate::types::mutation::{ReorderTarget, Reparenting};
use crate::types::settings::DragSettings;
use crate::types::tab::TabSection;

use super::tab_manager::TabManager;

/// Pointer position along a divider that separates "above" from "below".
const DIVIDER_SPLIT: f32 = 0.5;

pub trait DropDelegate {
    /// Space the drop target belongs to; the dragged tab ends up here.
    fn container(&self) -> ContainerId;

    /// Item highlighted while the drag hovers this target.
    fn target(&self) -> DropTargetItem;

    /// Applies this target's mutation for `dragged`.
    fn apply(&self, manager: &mut TabManager, dragged: TabId, info: &DropInfo) -> bool;

    /// Resolves the dragged tab and eagerly applies the mutation.
    ///
    /// Returns false for a missing or unknown payload and for drops the
    /// space rejects (self drop, would-be cycle); the graph is unchanged then.
    fn drop_entered(&self, manager: &mut TabManager, info: &DropInfo) -> bool {
        let Some(payload) = info.payload.as_ref() else {
            return false;
        };
        let Some(dragged) = manager.resolve_dragged(self.container(), payload) else {
            return false;
        };
        manager.set_drag_target(dragged, self.target());
        let applied = self.apply(manager, dragged, info);
        if !applied {
            log::debug!("Drop of {} on {:?} left the space unchanged", dragged, self.target());
        }
        applied
    }

    /// Tab drags only ever move.
    fn drop_updated(&self, _manager: &TabManager, _info: &DropInfo) -> DropOperation {
        DropOperation::Move
    }

    /// Ends the drag session. Returns whether the drop carried a payload.
    fn perform_drop(&self, manager: &mut TabManager, info: &DropInfo) -> bool {
        manager.end_drag();
        info.payload.is_some()
    }
}

/// Top of a section list; the dragged tab becomes the section's first tab.
#[derive(Debug, Clone, Copy)]
pub struct SectionHeadDropDelegate {
    pub container: ContainerId,
    pub section: TabSection,
}

impl DropDelegate for SectionHeadDropDelegate {
    fn container(&self) -> ContainerId {
        self.container
    }

    fn target(&self) -> DropTargetItem {
        DropTargetItem::SectionHead(self.section)
    }

    fn apply(&self, manager: &mut TabManager, dragged: TabId, _info: &DropInfo) -> bool {
        let section = self.section;
        manager.apply_drop(self.container, dragged, |space| {
            space.reorder_tabs(dragged, ReorderTarget::SectionHead(section), Reparenting::Sibling)
        })
    }
}

/// How a drop on a tab is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDropIntent {
    /// Insert next to the target tab.
    Sibling,
    /// Nest under the target tab.
    Child,
    /// Join the target's tab set.
    Tileset,
}

/// A tab row or tile; the leading part of its frame inserts next to it, the
/// rest nests under it.
#[derive(Debug, Clone, Copy)]
pub struct GeneralDropDelegate {
    pub container: ContainerId,
    pub tab: TabId,
    pub axis: Axis,
}

impl GeneralDropDelegate {
    pub fn intent(&self, settings: &DragSettings, info: &DropInfo) -> TabDropIntent {
        if !settings.tree_style_tabs {
            return TabDropIntent::Sibling;
        }
        if info.in_tileset_zone {
            return TabDropIntent::Tileset;
        }
        if info.fraction_along(self.axis) < settings.drop_leading_fraction {
            TabDropIntent::Sibling
        } else {
            TabDropIntent::Child
        }
    }
}

impl DropDelegate for GeneralDropDelegate {
    fn container(&self) -> ContainerId {
        self.container
    }

    fn target(&self) -> DropTargetItem {
        DropTargetItem::Tab(self.tab)
    }

    fn apply(&self, manager: &mut TabManager, dragged: TabId, info: &DropInfo) -> bool {
        let target = self.tab;
        let intent = self.intent(&manager.settings().drag, info);
        manager.apply_drop(self.container, dragged, |space| match intent {
            TabDropIntent::Sibling => {
                space.reorder_tabs(dragged, ReorderTarget::Tab(target), Reparenting::Sibling)
            }
            TabDropIntent::Child => {
                space.reorder_tabs(dragged, ReorderTarget::Tab(target), Reparenting::Child)
            }
            TabDropIntent::Tileset => space.combine_to_tileset(dragged, target),
        })
    }
}

/// Boundary between two sections. The upper half appends to the section
/// above, the lower half puts the tab at the head of the section below.
#[derive(Debug, Clone, Copy)]
pub struct DividerDropDelegate {
    pub container: ContainerId,
    pub above: TabSection,
    pub below: TabSection,
    pub axis: Axis,
}

impl DividerDropDelegate {
    /// Section the dragged tab lands in for this pointer position.
    pub fn landing_section(&self, info: &DropInfo) -> TabSection {
        if info.fraction_along(self.axis) < DIVIDER_SPLIT {
            self.above
        } else {
            self.below
        }
    }
}

impl DropDelegate for DividerDropDelegate {
    fn container(&self) -> ContainerId {
        self.container
    }

    fn target(&self) -> DropTargetItem {
        DropTargetItem::Divider(self.below)
    }

    fn apply(&self, manager: &mut TabManager, dragged: TabId, info: &DropInfo) -> bool {
        let section = self.landing_section(info);
        let at_head = section == self.below;
        manager.apply_drop(self.container, dragged, |space| {
            space.reorder_tabs_to_section(dragged, section, at_head)
        })
    }
}

/// A folder row; the dragged tab becomes the folder's first member.
#[derive(Debug, Clone, Copy)]
pub struct FolderDropDelegate {
    pub container: ContainerId,
    pub folder: FolderId,
}

impl DropDelegate for FolderDropDelegate {
    fn container(&self) -> ContainerId {
        self.container
    }

    fn target(&self) -> DropTargetItem {
        DropTargetItem::Folder(self.folder)
    }

    fn apply(&self, manager: &mut TabManager, dragged: TabId, _info: &DropInfo) -> bool {
        let folder = self.folder;
        manager.apply_drop(self.container, dragged, |space| space.move_tab_to_folder(dragged, folder))
    }
}

/// A tab shown inside an open folder; the dragged tab joins the folder if
/// needed and takes the target's position.
#[derive(Debug, Clone, Copy)]
pub struct FolderTabDropDelegate {
    pub container: ContainerId,
    pub folder: FolderId,
    pub tab: TabId,
}

impl DropDelegate for FolderTabDropDelegate {
    fn container(&self) -> ContainerId {
        self.container
    }

    fn target(&self) -> DropTargetItem {
        DropTargetItem::FolderTab(self.folder, self.tab)
    }

    fn apply(&self, manager: &mut TabManager, dragged: TabId, _info: &DropInfo) -> bool {
        let (folder, target) = (self.folder, self.tab);
        manager.apply_drop(self.container, dragged, |space| {
            let target_in_folder = space
                .graph()
                .tab(target)
                .is_some_and(|t| t.folder == Some(folder));
            if !target_in_folder {
                return false;
            }
            let joined = space.move_tab_to_folder(dragged, folder);
            let moved = space.reorder_in_folder(dragged, target);
            joined || moved
        })
    }
}
