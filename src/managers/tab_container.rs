//! Mutation contract of a space.
//!
//! `TabContainerMut` is the only way to reorder, reparent, retype, group or
//! file tabs. Every method either applies one complete, invariant-preserving
//! step and returns `true`, or leaves the graph untouched and returns `false`
//! (unknown id, self drop, would-be cycle, wrong space).

use crate::types::ids::{ContainerId, FolderId, TabId};
use crate::types::mutation::{ReorderTarget, Reparenting, Scope};
use crate::types::tab::TabSection;

use super::tab_graph::TabGraph;

/// Mutable view of one space inside the graph arena.
///
/// The dragged tab may come from any space; the destination is always this one.
pub struct TabContainerMut<'a> {
    graph: &'a mut TabGraph,
    id: ContainerId,
}

impl TabGraph {
    /// Opens the mutation contract of a space, `None` if it does not exist.
    pub fn container_mut(&mut self, id: ContainerId) -> Option<TabContainerMut<'_>> {
        self.container(id)?;
        Some(TabContainerMut { graph: self, id })
    }
}

impl<'a> TabContainerMut<'a> {
    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn graph(&self) -> &TabGraph {
        self.graph
    }

    /// Moves `from` next to a tab or to the head of a section.
    ///
    /// With a tab target, `Sibling` gives array-move semantics in the target's
    /// scope (a tab coming from earlier in the same list lands after the
    /// target, otherwise before it) and `Child` appends `from` to the target's
    /// children. Rejected when `from` is the target or one of its ancestors.
    pub fn reorder_tabs(&mut self, from: TabId, to: ReorderTarget, reparenting: Reparenting) -> bool {
        let target = match to {
            ReorderTarget::SectionHead(section) => {
                return self.reorder_tabs_to_section(from, section, true);
            }
            ReorderTarget::Tab(target) => target,
        };

        if !self.graph.contains_tab(from) || from == target {
            return false;
        }
        let Some(target_tab) = self.graph.tab_in_container(self.id, target) else {
            return false;
        };
        if self.graph.is_ancestor(from, target) {
            log::debug!("Rejected reorder of {} under its own descendant {}", from, target);
            return false;
        }

        let (dest, index) = match reparenting {
            Reparenting::Sibling => {
                let scope = Scope {
                    container: target_tab.container,
                    section: target_tab.section,
                    folder: target_tab.folder,
                    parent: target_tab.parent,
                };
                let Some(index) = self.graph.scope_members(&scope).iter().position(|t| *t == target)
                else {
                    return false;
                };
                (scope, index)
            }
            Reparenting::Child => {
                let scope = Scope {
                    container: target_tab.container,
                    section: target_tab.section,
                    folder: target_tab.folder,
                    parent: Some(target),
                };
                (scope, usize::MAX)
            }
        };

        let applied = self.graph.place(from, dest, index);
        if applied {
            log::debug!("Moved tab {} {:?} {}", from, reparenting, target);
        }
        applied
    }

    /// Drops `from` at the very top of a section's list.
    ///
    /// With `offset_target_type_order` the section's tabs shift down and `from`
    /// takes the head slot; without it `from` is appended after the last tab.
    /// Either way the tab leaves any folder or tab set and is retyped to `section`.
    pub fn reorder_tabs_to_section(
        &mut self,
        from: TabId,
        section: TabSection,
        offset_target_type_order: bool,
    ) -> bool {
        if !self.graph.contains_tab(from) {
            return false;
        }
        let dest = Scope::section_root(self.id, section);
        let index = if offset_target_type_order { 0 } else { usize::MAX };
        let applied = self.graph.place(from, dest, index);
        if applied {
            log::debug!("Moved tab {} to {} section of space {}", from, section.as_str(), self.id);
        }
        applied
    }

    /// Groups `source` into the tab set of `destination`.
    ///
    /// The set is rooted at `destination`'s top ancestor. Sets stay flat:
    /// `source`'s own children join the same set right after it. Rejected when
    /// the two are the same tab or `source` is an ancestor of `destination`.
    pub fn combine_to_tileset(&mut self, source: TabId, destination: TabId) -> bool {
        if source == destination || !self.graph.contains_tab(source) {
            return false;
        }
        if self.graph.tab_in_container(self.id, destination).is_none() {
            return false;
        }
        let Some(root) = self.graph.tab_set_root(destination) else {
            return false;
        };
        if root == source || self.graph.is_ancestor(source, root) {
            log::debug!("Rejected tileset {} into {}: would create a cycle", source, destination);
            return false;
        }

        let Some(root_tab) = self.graph.tab(root) else {
            return false;
        };
        let dest = Scope {
            container: root_tab.container,
            section: root_tab.section,
            folder: root_tab.folder,
            parent: Some(root),
        };
        let absorbed: Vec<TabId> = self.graph.children_of(source).iter().map(|t| t.id).collect();

        let mut applied = self.graph.place(source, dest, usize::MAX);
        for child in absorbed {
            applied |= self.graph.place(child, dest, usize::MAX);
        }
        if applied {
            log::debug!("Combined tab {} into tab set of {}", source, root);
        }
        applied
    }

    /// Files `tab` into `folder`, at the head of the folder's list.
    ///
    /// A tab that is already a member is left where it is; use
    /// [`reorder_in_folder`](Self::reorder_in_folder) to change its position.
    pub fn move_tab_to_folder(&mut self, tab: TabId, folder: FolderId) -> bool {
        let Some(current) = self.graph.tab(tab) else {
            return false;
        };
        if current.folder == Some(folder) {
            return false;
        }
        match self.graph.folder(folder) {
            Some(f) if f.container == self.id => {}
            _ => return false,
        }
        let applied = self.graph.place(tab, Scope::folder_root(self.id, folder), 0);
        if applied {
            log::debug!("Moved tab {} into folder {}", tab, folder);
        }
        applied
    }

    /// Pure list move of `from` onto `to`, both top-level members of the same folder.
    pub fn reorder_in_folder(&mut self, from: TabId, to: TabId) -> bool {
        if from == to {
            return false;
        }
        let (Some(from_scope), Some(to_scope)) = (self.graph.scope_of(from), self.graph.scope_of(to))
        else {
            return false;
        };
        if to_scope.container != self.id || to_scope.folder.is_none() || from_scope != to_scope {
            return false;
        }
        let Some(index) = self.graph.scope_members(&to_scope).iter().position(|t| *t == to) else {
            return false;
        };
        self.graph.place(from, to_scope, index)
    }

    /// Takes a tab out of its tab set and puts it right after the set's root.
    pub fn detach_from_tileset(&mut self, tab: TabId) -> bool {
        let Some(current) = self.graph.tab_in_container(self.id, tab) else {
            return false;
        };
        if current.parent.is_none() {
            return false;
        }
        let Some(root) = self.graph.tab_set_root(tab) else {
            return false;
        };
        let Some(root_scope) = self.graph.scope_of(root) else {
            return false;
        };
        let Some(index) = self.graph.scope_members(&root_scope).iter().position(|t| *t == root) else {
            return false;
        };
        self.graph.place(tab, root_scope, index + 1)
    }

    /// Moves a tab to the top level of `section`, used by pin/favorite toggles.
    ///
    /// Leaving normal appends to the end of the target section; returning to
    /// normal puts the tab at the head so it stays in view.
    pub fn retype(&mut self, tab: TabId, section: TabSection) -> bool {
        let Some(current) = self.graph.tab_in_container(self.id, tab) else {
            return false;
        };
        if current.section == section && current.parent.is_none() && current.folder.is_none() {
            return false;
        }
        let index = if section == TabSection::Normal { 0 } else { usize::MAX };
        self.graph.place(tab, Scope::section_root(self.id, section), index)
    }
}
