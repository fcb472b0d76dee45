//! Arena holding every space, folder and tab, keyed by identifier.
//!
//! All relationships (tab → container, tab → folder, tab → parent) are stored
//! as ids and resolved through lookups here, so the no-cycle rule is a plain
//! walk over indices. Invariant-preserving mutations are exposed through
//! [`TabContainerMut`](super::tab_container::TabContainerMut); this module only
//! offers read models and the low-level placement primitive they share.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::container::TabContainer;
use crate::types::folder::Folder;
use crate::types::ids::{ContainerId, FolderId, TabId};
use crate::types::mutation::Scope;
use crate::types::snapshot::GraphSnapshot;
use crate::types::tab::{Tab, TabSection};

/// Returns the current UNIX timestamp in milliseconds.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabGraph {
    containers: HashMap<ContainerId, TabContainer>,
    folders: HashMap<FolderId, Folder>,
    tabs: HashMap<TabId, Tab>,
    next_seq: u64,
}

impl TabGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Lookups ───

    pub fn container(&self, id: ContainerId) -> Option<&TabContainer> {
        self.containers.get(&id)
    }

    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(&id)
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.get(&id)
    }

    pub fn contains_tab(&self, id: TabId) -> bool {
        self.tabs.contains_key(&id)
    }

    /// Finds a tab only if it lives in the given space.
    pub fn tab_in_container(&self, container: ContainerId, id: TabId) -> Option<&Tab> {
        self.tabs.get(&id).filter(|t| t.container == container)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Spaces ordered from most to least recently used.
    pub fn containers_by_recency(&self) -> Vec<&TabContainer> {
        let mut list: Vec<&TabContainer> = self.containers.values().collect();
        list.sort_by_key(|c| Reverse((c.last_accessed_at, c.access_seq)));
        list
    }

    /// Spaces in creation order, as shown in the space switcher.
    pub fn containers(&self) -> Vec<&TabContainer> {
        let mut list: Vec<&TabContainer> = self.containers.values().collect();
        list.sort_by_key(|c| (c.created_at, c.created_seq, c.id));
        list
    }

    /// Every tab of every space, in no particular order.
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.values()
    }

    /// Every tab of a space, in no particular order.
    pub fn tabs_in(&self, container: ContainerId) -> impl Iterator<Item = &Tab> {
        self.tabs.values().filter(move |t| t.container == container)
    }

    /// Folders of a space sorted by their display order.
    pub fn folders_in(&self, container: ContainerId) -> Vec<&Folder> {
        let mut list: Vec<&Folder> = self
            .folders
            .values()
            .filter(|f| f.container == container)
            .collect();
        list.sort_by_key(|f| (f.order, Reverse(f.created_at)));
        list
    }

    // ─── Read models ───

    /// Top-level tabs of one section, sorted by `(section, order)`.
    ///
    /// Computed on every call from the tab list; there is no stored copy.
    pub fn section_tabs(&self, container: ContainerId, section: TabSection) -> Vec<&Tab> {
        self.sorted(self.tabs_in(container).filter(|t| {
            t.section == section && t.folder.is_none() && t.parent.is_none()
        }))
    }

    /// Top-level members of a folder in display order.
    pub fn folder_tabs(&self, folder: FolderId) -> Vec<&Tab> {
        self.sorted(
            self.tabs
                .values()
                .filter(|t| t.folder == Some(folder) && t.parent.is_none()),
        )
    }

    /// Direct children of a tab (its tab set) in display order.
    pub fn children_of(&self, parent: TabId) -> Vec<&Tab> {
        self.sorted(self.tabs.values().filter(|t| t.parent == Some(parent)))
    }

    /// Members of a scope in display order.
    pub fn scope_members(&self, scope: &Scope) -> Vec<TabId> {
        self.sorted(self.tabs.values().filter(|t| Self::scope_of_tab(t) == *scope))
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    pub fn scope_of(&self, id: TabId) -> Option<Scope> {
        self.tabs.get(&id).map(Self::scope_of_tab)
    }

    fn scope_of_tab(tab: &Tab) -> Scope {
        Scope {
            container: tab.container,
            section: tab.section,
            folder: tab.folder,
            parent: tab.parent,
        }
    }

    /// Orders by `(section, order)`; equal orders put the most recently inserted first.
    fn sorted<'a>(&'a self, tabs: impl Iterator<Item = &'a Tab>) -> Vec<&'a Tab> {
        let mut list: Vec<&Tab> = tabs.collect();
        list.sort_by_key(|t| (t.section, t.order, Reverse(t.inserted_seq)));
        list
    }

    // ─── Hierarchy ───

    /// Parent chain of a tab, nearest first.
    ///
    /// Stops on a missing parent or on a revisited id, so the walk terminates
    /// even on corrupted input.
    pub fn ancestors(&self, id: TabId) -> Vec<TabId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.tabs.get(&id).and_then(|t| t.parent);
        while let Some(parent) = current {
            if !seen.insert(parent) || !self.tabs.contains_key(&parent) {
                break;
            }
            chain.push(parent);
            current = self.tabs.get(&parent).and_then(|t| t.parent);
        }
        chain
    }

    /// True when `ancestor` appears in `descendant`'s parent chain.
    pub fn is_ancestor(&self, ancestor: TabId, descendant: TabId) -> bool {
        self.ancestors(descendant).contains(&ancestor)
    }

    /// Root of the tab set a tab belongs to (the tab itself when it has no parent).
    pub fn tab_set_root(&self, id: TabId) -> Option<TabId> {
        if !self.tabs.contains_key(&id) {
            return None;
        }
        Some(self.ancestors(id).last().copied().unwrap_or(id))
    }

    /// All descendants of a tab, parents before children.
    pub fn descendants(&self, id: TabId) -> Vec<TabId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        let mut seen = HashSet::from([id]);
        while let Some(current) = stack.pop() {
            for child in self.children_of(current) {
                if seen.insert(child.id) {
                    out.push(child.id);
                    stack.push(child.id);
                }
            }
        }
        out
    }

    // ─── Crate-internal mutation primitives ───

    pub(crate) fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    pub(crate) fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.get_mut(&id)
    }

    pub(crate) fn folder_mut(&mut self, id: FolderId) -> Option<&mut Folder> {
        self.folders.get_mut(&id)
    }

    pub(crate) fn container_entry_mut(&mut self, id: ContainerId) -> Option<&mut TabContainer> {
        self.containers.get_mut(&id)
    }

    pub(crate) fn insert_container(&mut self, container: TabContainer) {
        self.containers.insert(container.id, container);
    }

    pub(crate) fn insert_folder(&mut self, folder: Folder) {
        self.folders.insert(folder.id, folder);
    }

    /// Adds a tab at the end of the normal section's top level.
    pub(crate) fn insert_tab(&mut self, mut tab: Tab) {
        tab.inserted_seq = self.next_seq();
        tab.access_seq = tab.inserted_seq;
        tab.section = TabSection::Normal;
        tab.parent = None;
        tab.folder = None;
        tab.saved_url = None;
        let scope = Scope::section_root(tab.container, TabSection::Normal);
        tab.order = self
            .scope_members(&scope)
            .last()
            .and_then(|last| self.tabs.get(last))
            .map(|t| t.order + 1)
            .unwrap_or(0);
        self.tabs.insert(tab.id, tab);
    }

    /// Removes a tab and renumbers the scope it left. Children are not touched.
    pub(crate) fn remove_tab(&mut self, id: TabId) -> Option<Tab> {
        let tab = self.tabs.remove(&id)?;
        let scope = Self::scope_of_tab(&tab);
        let members = self.scope_members(&scope);
        self.renumber(&members);
        Some(tab)
    }

    pub(crate) fn remove_folder(&mut self, id: FolderId) -> Option<Folder> {
        self.folders.remove(&id)
    }

    /// Removes a space with all of its tabs and folders, returning the removed tabs.
    pub(crate) fn remove_container(&mut self, id: ContainerId) -> Vec<Tab> {
        self.containers.remove(&id);
        self.folders.retain(|_, f| f.container != id);
        let doomed: Vec<TabId> = self.tabs_in(id).map(|t| t.id).collect();
        doomed
            .into_iter()
            .filter_map(|tab_id| self.tabs.remove(&tab_id))
            .collect()
    }

    /// Moves `id` into `dest` at `index` (clamped, `Vec::insert` semantics on the
    /// destination list with `id` already removed).
    ///
    /// Rewrites container, section, folder and parent of the tab, carries its
    /// subtree along, and densely renumbers both the scope it left and the one
    /// it joined. Callers are responsible for the cycle guard. Returns false
    /// when the tab is unknown or already sits at that position.
    pub(crate) fn place(&mut self, id: TabId, dest: Scope, index: usize) -> bool {
        let Some(old_scope) = self.scope_of(id) else {
            return false;
        };

        let mut members = self.scope_members(&dest);
        let previous = members.iter().position(|m| *m == id);
        members.retain(|m| *m != id);
        let index = index.min(members.len());
        if old_scope == dest && previous == Some(index) {
            return false;
        }
        members.insert(index, id);

        if old_scope != dest {
            let subtree = self.descendants(id);
            if let Some(tab) = self.tabs.get_mut(&id) {
                tab.container = dest.container;
                tab.assign_section(dest.section);
                tab.folder = dest.folder;
                tab.parent = dest.parent;
            }
            for descendant in subtree {
                if let Some(tab) = self.tabs.get_mut(&descendant) {
                    tab.container = dest.container;
                    tab.assign_section(dest.section);
                    tab.folder = dest.folder;
                }
            }
            let left_behind = self.scope_members(&old_scope);
            self.renumber(&left_behind);
        }

        self.renumber(&members);
        true
    }

    /// Assigns dense orders `0..n` following the given sequence.
    pub(crate) fn renumber(&mut self, ordered: &[TabId]) {
        for (position, tab_id) in ordered.iter().enumerate() {
            if let Some(tab) = self.tabs.get_mut(tab_id) {
                tab.order = position as i64;
            }
        }
    }

    /// Assigns dense folder orders `0..n` within a space.
    pub(crate) fn renumber_folders(&mut self, container: ContainerId) {
        let ordered: Vec<FolderId> = self.folders_in(container).iter().map(|f| f.id).collect();
        for (position, folder_id) in ordered.into_iter().enumerate() {
            if let Some(folder) = self.folders.get_mut(&folder_id) {
                folder.order = position as i64;
            }
        }
    }

    /// Stamps a tab as just used.
    pub(crate) fn touch_tab(&mut self, id: TabId) {
        let seq = self.next_seq();
        if let Some(tab) = self.tabs.get_mut(&id) {
            tab.last_accessed_at = now_millis();
            tab.access_seq = seq;
        }
    }

    /// Stamps a space as just used.
    pub(crate) fn touch_container(&mut self, id: ContainerId) {
        let seq = self.next_seq();
        if let Some(container) = self.containers.get_mut(&id) {
            container.last_accessed_at = now_millis();
            container.access_seq = seq;
        }
    }

    /// Most recently accessed tab of a space, optionally skipping one.
    pub fn most_recent_tab(&self, container: ContainerId, excluding: Option<TabId>) -> Option<TabId> {
        self.tabs_in(container)
            .filter(|t| Some(t.id) != excluding)
            .max_by_key(|t| (t.last_accessed_at, t.access_seq))
            .map(|t| t.id)
    }

    // ─── Snapshots ───

    /// Copies the graph into a serializable snapshot with a stable ordering.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let mut containers: Vec<TabContainer> = self.containers.values().cloned().collect();
        containers.sort_by_key(|c| c.id);
        let mut folders: Vec<Folder> = self.folders.values().cloned().collect();
        folders.sort_by_key(|f| f.id);
        let mut tabs: Vec<Tab> = self.tabs.values().cloned().collect();
        tabs.sort_by_key(|t| t.id);
        GraphSnapshot {
            containers,
            folders,
            tabs,
            active_container: None,
            active_tab: None,
            timestamp: now_millis(),
        }
    }

    /// Rebuilds a graph from a snapshot, repairing anything that would break
    /// the graph rules: dangling references, parent cycles, folders on
    /// non-pinned tabs, missing or stale saved URLs and order ties.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let mut graph = TabGraph::new();
        let mut max_seq = 0;

        for container in &snapshot.containers {
            max_seq = max_seq.max(container.access_seq).max(container.created_seq);
            graph.insert_container(container.clone());
        }
        for folder in &snapshot.folders {
            if graph.containers.contains_key(&folder.container) {
                graph.insert_folder(folder.clone());
            }
        }
        for tab in &snapshot.tabs {
            if !graph.containers.contains_key(&tab.container) {
                continue;
            }
            max_seq = max_seq.max(tab.inserted_seq).max(tab.access_seq);
            let mut tab = tab.clone();
            tab.render_handle = None;
            graph.tabs.insert(tab.id, tab);
        }
        graph.next_seq = max_seq;

        graph.repair_memberships();
        graph.repair_parents();
        graph.normalize_all_scopes();
        graph
    }

    fn repair_memberships(&mut self) {
        let folders = &self.folders;
        for tab in self.tabs.values_mut() {
            let folder_ok = tab.folder.map_or(true, |f| {
                folders.get(&f).map_or(false, |f| f.container == tab.container)
            });
            if !folder_ok || tab.section != TabSection::Pinned {
                tab.folder = None;
            }
            if tab.section.keeps_saved_url() {
                if tab.saved_url.is_none() {
                    tab.saved_url = Some(tab.url.clone());
                }
            } else {
                tab.saved_url = None;
            }
        }
    }

    /// Cuts parent links that dangle, cross scopes, or close a cycle.
    fn repair_parents(&mut self) {
        let mut ids: Vec<TabId> = self.tabs.keys().copied().collect();
        ids.sort();
        for id in ids {
            let Some(tab) = self.tabs.get(&id) else { continue };
            let Some(parent_id) = tab.parent else { continue };
            let consistent = self.tabs.get(&parent_id).map_or(false, |p| {
                p.container == tab.container && p.section == tab.section && p.folder == tab.folder
            });
            if !consistent || self.parent_chain_cycles(id) {
                log::debug!("Dropping invalid parent link of tab {} during restore", id);
                if let Some(tab) = self.tabs.get_mut(&id) {
                    tab.parent = None;
                }
            }
        }
    }

    /// True when walking up from `id` leads back to `id`.
    fn parent_chain_cycles(&self, id: TabId) -> bool {
        let mut seen = HashSet::new();
        let mut current = self.tabs.get(&id).and_then(|t| t.parent);
        while let Some(parent) = current {
            if parent == id {
                return true;
            }
            if !seen.insert(parent) {
                return false;
            }
            current = self.tabs.get(&parent).and_then(|t| t.parent);
        }
        false
    }

    fn normalize_all_scopes(&mut self) {
        let scopes: HashSet<Scope> = self.tabs.values().map(Self::scope_of_tab).collect();
        for scope in scopes {
            let members = self.scope_members(&scope);
            self.renumber(&members);
        }
        let containers: Vec<ContainerId> = self.containers.keys().copied().collect();
        for container in containers {
            self.renumber_folders(container);
        }
    }
}
