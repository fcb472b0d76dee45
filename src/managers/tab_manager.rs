//! Facade over the tab graph.
//!
//! `TabManager` owns the arena, the active space/tab pointers and the single
//! drag session. Every applied change emits a [`TabEvent`] and hands a
//! snapshot to the persistence collaborator; a failed save is logged and the
//! in-memory change stands.

use tokio::sync::broadcast;

use crate::services::render_host::RenderHost;
use crate::types::container::TabContainer;
use crate::types::drag::{DragPayload, DragState, DropTargetItem};
use crate::types::errors::TabError;
use crate::types::event::TabEvent;
use crate::types::folder::{Folder, FolderDeletion};
use crate::types::ids::{ContainerId, FolderId, TabId};
use crate::types::mutation::{ReorderTarget, Reparenting, Scope};
use crate::types::settings::{NewTabPosition, TabSettings};
use crate::types::snapshot::GraphSnapshot;
use crate::types::tab::{Tab, TabSection};

use super::session_manager::{MemoryPersistence, TabPersistence};
use super::tab_container::TabContainerMut;
use super::tab_graph::{now_millis, TabGraph};

/// Name of the space created when nothing could be restored.
pub const DEFAULT_CONTAINER_NAME: &str = "Home";

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Trait defining the tab management interface.
pub trait TabManagerTrait {
    fn create_tab(&mut self, container: ContainerId, url: Option<&str>) -> Result<TabId, TabError>;
    fn activate_tab(&mut self, tab: TabId) -> Result<(), TabError>;
    fn close_tab(&mut self, tab: TabId) -> Result<(), TabError>;
    fn toggle_pin_tab(&mut self, tab: TabId) -> Result<(), TabError>;
    fn toggle_fav_tab(&mut self, tab: TabId) -> Result<(), TabError>;
    fn duplicate_tab(&mut self, tab: TabId) -> Result<TabId, TabError>;
    fn update_tab_url(&mut self, tab: TabId, url: &str) -> Result<(), TabError>;
    fn update_tab_title(&mut self, tab: TabId, title: &str) -> Result<(), TabError>;
    fn get_tab(&self, tab: TabId) -> Option<&Tab>;
    fn get_active_tab(&self) -> Option<&Tab>;
    fn tab_count(&self) -> usize;
}

pub struct TabManager {
    graph: TabGraph,
    active_container: Option<ContainerId>,
    active_tab: Option<TabId>,
    drag: DragState,
    settings: TabSettings,
    persistence: Box<dyn TabPersistence>,
    render_host: Option<Box<dyn RenderHost>>,
    events: broadcast::Sender<TabEvent>,
}

impl TabManager {
    /// Empty manager with default settings and an in-memory session store.
    pub fn new() -> Self {
        Self::with_parts(TabSettings::default(), Box::new(MemoryPersistence::new()))
    }

    pub fn with_parts(settings: TabSettings, persistence: Box<dyn TabPersistence>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            graph: TabGraph::new(),
            active_container: None,
            active_tab: None,
            drag: DragState::default(),
            settings,
            persistence,
            render_host: None,
            events,
        }
    }

    /// Wires in the rendering engine and attaches a surface to every existing tab.
    pub fn set_render_host(&mut self, host: Box<dyn RenderHost>) {
        self.render_host = Some(host);
        let pending: Vec<TabId> = self
            .graph
            .tabs()
            .filter(|t| t.render_handle.is_none())
            .map(|t| t.id)
            .collect();
        for tab in pending {
            self.attach_render(tab);
        }
    }

    /// Receiver for change notifications. Events sent before subscribing are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<TabEvent> {
        self.events.subscribe()
    }

    pub fn settings(&self) -> &TabSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: TabSettings) {
        self.settings = settings;
    }

    pub fn graph(&self) -> &TabGraph {
        &self.graph
    }

    pub fn active_container(&self) -> Option<ContainerId> {
        self.active_container
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab
    }

    // ─── Sessions ───

    /// Current graph plus active pointers, as handed to the persistence collaborator.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut snapshot = self.graph.to_snapshot();
        snapshot.active_container = self.active_container;
        snapshot.active_tab = self.active_tab;
        snapshot
    }

    /// Replaces the whole graph with a repaired copy of `snapshot`.
    ///
    /// Stale active pointers fall back to the most recently used space and tab.
    pub fn restore(&mut self, snapshot: &GraphSnapshot) {
        let previous: Vec<Tab> = self.graph.tabs().cloned().collect();
        for tab in &previous {
            self.detach_render(tab);
        }

        self.graph = TabGraph::from_snapshot(snapshot);
        self.drag.clear();

        let container = snapshot
            .active_container
            .filter(|c| self.graph.container(*c).is_some())
            .or_else(|| self.graph.containers_by_recency().first().map(|c| c.id));
        let tab = container.and_then(|c| {
            snapshot
                .active_tab
                .filter(|t| self.graph.tab_in_container(c, *t).is_some())
                .or_else(|| self.graph.most_recent_tab(c, None))
        });
        self.active_container = container;
        self.active_tab = tab;

        let pending: Vec<TabId> = self.graph.tabs().map(|t| t.id).collect();
        for id in pending {
            self.attach_render(id);
        }

        log::info!(
            "Restored session with {} spaces and {} tabs",
            self.graph.container_count(),
            self.graph.tab_count()
        );
        self.emit(TabEvent::ContainersChanged);
        self.emit(TabEvent::ActiveChanged { container, tab });
    }

    /// Restores the last saved session when enabled and makes sure a space exists.
    ///
    /// Returns true when a saved session was restored.
    pub fn bootstrap(&mut self) -> bool {
        let mut restored = false;
        if self.settings.session.restore_on_launch {
            match self.persistence.load() {
                Ok(Some(snapshot)) => {
                    self.restore(&snapshot);
                    restored = self.graph.container_count() > 0;
                }
                Ok(None) => log::debug!("No saved session to restore"),
                Err(e) => log::warn!("Failed to load saved session: {}", e),
            }
        }
        if self.graph.container_count() == 0 {
            self.create_container(DEFAULT_CONTAINER_NAME, None);
        }
        restored
    }

    // ─── Spaces ───

    /// Creates a space. The first space created becomes the active one.
    pub fn create_container(&mut self, name: &str, emoji: Option<&str>) -> ContainerId {
        let now = now_millis();
        let id = ContainerId::new();
        let access_seq = self.graph.next_seq();
        self.graph.insert_container(TabContainer {
            id,
            name: name.to_string(),
            emoji: emoji.map(str::to_string),
            created_at: now,
            created_seq: access_seq,
            last_accessed_at: now,
            access_seq,
        });
        log::info!("Created space '{}' ({})", name, id);

        if self.active_container.is_none() {
            self.set_active(Some(id), None);
        }
        self.commit(TabEvent::ContainersChanged);
        id
    }

    pub fn rename_container(&mut self, id: ContainerId, name: &str) -> Result<(), TabError> {
        let container = self
            .graph
            .container_entry_mut(id)
            .ok_or(TabError::ContainerNotFound(id))?;
        container.name = name.to_string();
        self.commit(TabEvent::ContainersChanged);
        Ok(())
    }

    pub fn set_container_emoji(&mut self, id: ContainerId, emoji: Option<&str>) -> Result<(), TabError> {
        let container = self
            .graph
            .container_entry_mut(id)
            .ok_or(TabError::ContainerNotFound(id))?;
        container.emoji = emoji.filter(|e| !e.is_empty()).map(str::to_string);
        self.commit(TabEvent::ContainersChanged);
        Ok(())
    }

    /// Deletes a space with every tab and folder it owns. The last space cannot be deleted.
    pub fn delete_container(&mut self, id: ContainerId) -> Result<(), TabError> {
        if self.graph.container(id).is_none() {
            return Err(TabError::ContainerNotFound(id));
        }
        if self.graph.container_count() <= 1 {
            return Err(TabError::LastContainer(id));
        }

        let removed = self.graph.remove_container(id);
        for tab in &removed {
            self.detach_render(tab);
        }
        if self.drag.dragged.is_some_and(|t| !self.graph.contains_tab(t)) {
            self.drag.clear();
        }
        log::info!("Deleted space {} with {} tabs", id, removed.len());

        if self.active_container == Some(id) {
            let next = self.graph.containers_by_recency().first().map(|c| c.id);
            let tab = next.and_then(|c| self.graph.most_recent_tab(c, None));
            self.set_active(next, tab);
        }
        self.commit(TabEvent::ContainersChanged);
        Ok(())
    }

    /// Makes a space active; its most recently used tab becomes the active tab.
    pub fn activate_container(&mut self, id: ContainerId) -> Result<(), TabError> {
        if self.graph.container(id).is_none() {
            return Err(TabError::ContainerNotFound(id));
        }
        self.graph.touch_container(id);
        let tab = self.graph.most_recent_tab(id, None);
        self.set_active(Some(id), tab);
        self.persist();
        Ok(())
    }

    /// Spaces in creation order.
    pub fn containers(&self) -> Vec<&TabContainer> {
        self.graph.containers()
    }

    pub fn containers_by_recency(&self) -> Vec<&TabContainer> {
        self.graph.containers_by_recency()
    }

    // ─── Tabs ───

    pub fn set_custom_title(&mut self, tab: TabId, title: Option<&str>) -> Result<(), TabError> {
        let entry = self.graph.tab_mut(tab).ok_or(TabError::TabNotFound(tab))?;
        entry.custom_title = title.filter(|t| !t.trim().is_empty()).map(str::to_string);
        let container = entry.container;
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(())
    }

    /// Navigates a pinned or favorite tab back to the URL captured when it was retyped.
    ///
    /// Returns false when there is no saved URL or the tab already shows it.
    pub fn restore_saved_url(&mut self, tab: TabId) -> Result<bool, TabError> {
        let entry = self.graph.tab_mut(tab).ok_or(TabError::TabNotFound(tab))?;
        let Some(saved) = entry.saved_url.clone() else {
            return Ok(false);
        };
        if entry.url == saved {
            return Ok(false);
        }
        entry.url = saved;
        let container = entry.container;
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(true)
    }

    /// Takes a tab out of its tab set; it lands right after the set's root.
    pub fn detach_from_tileset(&mut self, tab: TabId) -> Result<bool, TabError> {
        let container = self.container_of(tab)?;
        Ok(self.mutate(container, tab, false, |space| space.detach_from_tileset(tab)))
    }

    pub fn favorite_tabs(&self, container: ContainerId) -> Vec<&Tab> {
        self.graph.section_tabs(container, TabSection::Favorite)
    }

    pub fn pinned_tabs(&self, container: ContainerId) -> Vec<&Tab> {
        self.graph.section_tabs(container, TabSection::Pinned)
    }

    pub fn normal_tabs(&self, container: ContainerId) -> Vec<&Tab> {
        self.graph.section_tabs(container, TabSection::Normal)
    }

    pub fn folder_tabs(&self, folder: FolderId) -> Vec<&Tab> {
        self.graph.folder_tabs(folder)
    }

    pub fn children_of(&self, tab: TabId) -> Vec<&Tab> {
        self.graph.children_of(tab)
    }

    pub fn tab_set_root(&self, tab: TabId) -> Option<TabId> {
        self.graph.tab_set_root(tab)
    }

    // ─── Folders ───

    /// Creates an open, empty folder after the space's existing folders.
    pub fn create_folder(&mut self, container: ContainerId, name: &str) -> Result<FolderId, TabError> {
        if self.graph.container(container).is_none() {
            return Err(TabError::ContainerNotFound(container));
        }
        let id = FolderId::new();
        let order = self.graph.folders_in(container).len() as i64;
        self.graph.insert_folder(Folder {
            id,
            container,
            name: name.to_string(),
            is_open: true,
            order,
            created_at: now_millis(),
        });
        log::info!("Created folder '{}' ({}) in space {}", name, id, container);
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(id)
    }

    pub fn rename_folder(&mut self, id: FolderId, name: &str) -> Result<(), TabError> {
        let folder = self.graph.folder_mut(id).ok_or(TabError::FolderNotFound(id))?;
        folder.name = name.to_string();
        let container = folder.container;
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(())
    }

    /// Flips the open/closed flag and returns the new value.
    pub fn toggle_folder_open(&mut self, id: FolderId) -> Result<bool, TabError> {
        let folder = self.graph.folder_mut(id).ok_or(TabError::FolderNotFound(id))?;
        folder.is_open = !folder.is_open;
        let (container, is_open) = (folder.container, folder.is_open);
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(is_open)
    }

    /// Deletes a folder. With `ReleaseTabs` its members move to the end of the pinned section.
    pub fn delete_folder(&mut self, id: FolderId, mode: FolderDeletion) -> Result<(), TabError> {
        let container = self
            .graph
            .folder(id)
            .map(|f| f.container)
            .ok_or(TabError::FolderNotFound(id))?;
        let members: Vec<TabId> = self.graph.folder_tabs(id).iter().map(|t| t.id).collect();
        if !members.is_empty() && mode == FolderDeletion::OnlyIfEmpty {
            return Err(TabError::FolderNotEmpty(id));
        }

        let pinned = Scope::section_root(container, TabSection::Pinned);
        for member in &members {
            self.graph.place(*member, pinned, usize::MAX);
        }
        self.graph.remove_folder(id);
        self.graph.renumber_folders(container);
        if matches!(self.drag.targeted, Some(DropTargetItem::Folder(f) | DropTargetItem::FolderTab(f, _)) if f == id)
        {
            self.drag.targeted = None;
        }
        log::info!("Deleted folder {} ({} tabs released)", id, members.len());
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(())
    }

    pub fn folders(&self, container: ContainerId) -> Vec<&Folder> {
        self.graph.folders_in(container)
    }

    // ─── Space mutations ───

    pub fn reorder_tabs(
        &mut self,
        container: ContainerId,
        from: TabId,
        to: ReorderTarget,
        reparenting: Reparenting,
    ) -> bool {
        self.mutate(container, from, false, |space| space.reorder_tabs(from, to, reparenting))
    }

    pub fn reorder_tabs_to_section(
        &mut self,
        container: ContainerId,
        from: TabId,
        section: TabSection,
        offset_target_type_order: bool,
    ) -> bool {
        self.mutate(container, from, false, |space| {
            space.reorder_tabs_to_section(from, section, offset_target_type_order)
        })
    }

    pub fn combine_to_tileset(&mut self, container: ContainerId, source: TabId, destination: TabId) -> bool {
        self.mutate(container, source, false, |space| space.combine_to_tileset(source, destination))
    }

    pub fn move_tab_to_folder(&mut self, container: ContainerId, tab: TabId, folder: FolderId) -> bool {
        self.mutate(container, tab, false, |space| space.move_tab_to_folder(tab, folder))
    }

    pub fn reorder_in_folder(&mut self, container: ContainerId, from: TabId, to: TabId) -> bool {
        self.mutate(container, from, false, |space| space.reorder_in_folder(from, to))
    }

    /// Applies one drop-time mutation; the resulting event is marked as animated.
    pub fn apply_drop<F>(&mut self, container: ContainerId, dragged: TabId, apply: F) -> bool
    where
        F: FnOnce(&mut TabContainerMut<'_>) -> bool,
    {
        self.mutate(container, dragged, true, apply)
    }

    // ─── Drag session ───

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Starts a drag of `tab`, returning the payload to put on the pasteboard.
    pub fn begin_drag(&mut self, tab: TabId) -> Option<DragPayload> {
        if !self.graph.contains_tab(tab) {
            return None;
        }
        self.drag.dragged = Some(tab);
        self.drag.targeted = None;
        Some(DragPayload::for_tab(tab))
    }

    /// Finds the dragged tab, looking in the target space first and then everywhere.
    pub fn resolve_dragged(&self, container: ContainerId, payload: &DragPayload) -> Option<TabId> {
        let id = payload.tab_id()?;
        if self.graph.tab_in_container(container, id).is_some() {
            return Some(id);
        }
        let found = self.graph.contains_tab(id);
        if !found {
            log::debug!("Drag payload {} does not name a known tab", payload);
        }
        found.then_some(id)
    }

    pub(crate) fn set_drag_target(&mut self, dragged: TabId, target: DropTargetItem) {
        self.drag.dragged = Some(dragged);
        self.drag.targeted = Some(target);
    }

    pub fn end_drag(&mut self) {
        self.drag.clear();
    }

    // ─── Internals ───

    fn container_of(&self, tab: TabId) -> Result<ContainerId, TabError> {
        self.graph
            .tab(tab)
            .map(|t| t.container)
            .ok_or(TabError::TabNotFound(tab))
    }

    /// Runs one space mutation and publishes it when it applied.
    fn mutate<F>(&mut self, container: ContainerId, moved: TabId, animated: bool, apply: F) -> bool
    where
        F: FnOnce(&mut TabContainerMut<'_>) -> bool,
    {
        let source = self.graph.tab(moved).map(|t| t.container);
        let Some(mut space) = self.graph.container_mut(container) else {
            return false;
        };
        if !apply(&mut space) {
            return false;
        }

        if let Some(source) = source.filter(|s| *s != container) {
            // The moved subtree may carry the active tab out of the active space.
            let active_left = self.active_container == Some(source)
                && self
                    .active_tab
                    .and_then(|t| self.graph.tab(t))
                    .is_some_and(|t| t.container != source);
            if active_left {
                let next = self.graph.most_recent_tab(source, None);
                self.set_active(Some(source), next);
            }
            self.emit(TabEvent::ContainerChanged { container: source, animated });
        }
        self.commit(TabEvent::ContainerChanged { container, animated });
        true
    }

    fn retype(&mut self, tab: TabId, section: TabSection) -> Result<(), TabError> {
        let container = self.container_of(tab)?;
        self.mutate(container, tab, false, |space| space.retype(tab, section));
        Ok(())
    }

    /// Picks the tab to activate after the active one closed.
    fn successor_after_close(&self, container: ContainerId) -> (Option<ContainerId>, Option<TabId>) {
        if let Some(tab) = self.graph.most_recent_tab(container, None) {
            return (Some(container), Some(tab));
        }
        self.graph
            .containers_by_recency()
            .into_iter()
            .filter(|c| c.id != container)
            .find_map(|c| self.graph.most_recent_tab(c.id, None).map(|t| (Some(c.id), Some(t))))
            .unwrap_or((Some(container), None))
    }

    fn set_active(&mut self, container: Option<ContainerId>, tab: Option<TabId>) {
        if self.active_container == container && self.active_tab == tab {
            return;
        }
        self.active_container = container;
        self.active_tab = tab;
        self.emit(TabEvent::ActiveChanged { container, tab });
    }

    fn attach_render(&mut self, id: TabId) {
        let Some(host) = self.render_host.as_mut() else {
            return;
        };
        if let Some(tab) = self.graph.tab_mut(id) {
            if tab.render_handle.is_none() {
                tab.render_handle = Some(host.attach(id, &tab.url));
            }
        }
    }

    fn detach_render(&mut self, tab: &Tab) {
        if let (Some(host), Some(handle)) = (self.render_host.as_mut(), tab.render_handle) {
            host.detach(tab.id, handle);
        }
    }

    fn emit(&self, event: TabEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.persistence.save(&snapshot) {
            log::warn!("Failed to save session: {}", e);
        }
    }

    fn commit(&mut self, event: TabEvent) {
        self.emit(event);
        self.persist();
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabManagerTrait for TabManager {
    /// Opens a tab in the normal section, at the top or bottom per settings.
    /// The new tab is not activated.
    fn create_tab(&mut self, container: ContainerId, url: Option<&str>) -> Result<TabId, TabError> {
        if self.graph.container(container).is_none() {
            return Err(TabError::ContainerNotFound(container));
        }
        let url = url
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.tabs.new_tab_url.clone());
        let id = TabId::new();
        self.graph.insert_tab(Tab::new(id, container, &url, now_millis()));
        if self.settings.tabs.new_tab_position == NewTabPosition::Top {
            self.graph
                .place(id, Scope::section_root(container, TabSection::Normal), 0);
        }
        self.attach_render(id);
        log::info!("Created tab {} in space {}", id, container);
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(id)
    }

    /// Makes a tab (and its space) active, stamping both as just used.
    fn activate_tab(&mut self, tab: TabId) -> Result<(), TabError> {
        let container = self.container_of(tab)?;
        self.graph.touch_container(container);
        self.graph.touch_tab(tab);
        self.set_active(Some(container), Some(tab));
        self.persist();
        Ok(())
    }

    /// Closes a tab. Its children take its place in the list it lived in.
    ///
    /// When the active tab closes, the most recently used tab of the same
    /// space takes over, then the most recent tab of the most recently used
    /// other space, then nothing.
    fn close_tab(&mut self, tab: TabId) -> Result<(), TabError> {
        let scope = self.graph.scope_of(tab).ok_or(TabError::TabNotFound(tab))?;
        let position = self
            .graph
            .scope_members(&scope)
            .iter()
            .position(|t| *t == tab)
            .unwrap_or(0);
        let children: Vec<TabId> = self.graph.children_of(tab).iter().map(|t| t.id).collect();
        for (offset, child) in children.into_iter().enumerate() {
            self.graph.place(child, scope, position + 1 + offset);
        }

        let removed = self.graph.remove_tab(tab).ok_or(TabError::TabNotFound(tab))?;
        self.detach_render(&removed);
        if self.drag.dragged == Some(tab) {
            self.drag.clear();
        }
        if matches!(self.drag.targeted, Some(DropTargetItem::Tab(t) | DropTargetItem::FolderTab(_, t)) if t == tab) {
            self.drag.targeted = None;
        }
        log::info!("Closed tab {} in space {}", tab, removed.container);

        if self.active_tab == Some(tab) {
            let (container, successor) = self.successor_after_close(removed.container);
            if let Some(next) = successor {
                self.graph.touch_tab(next);
            }
            self.set_active(container, successor);
        }
        self.commit(TabEvent::ContainerChanged {
            container: removed.container,
            animated: false,
        });
        Ok(())
    }

    /// Pinned tabs go back to the head of the normal section; anything else
    /// is appended to the pinned section.
    fn toggle_pin_tab(&mut self, tab: TabId) -> Result<(), TabError> {
        let pinned = self.graph.tab(tab).ok_or(TabError::TabNotFound(tab))?.is_pinned();
        let target = if pinned { TabSection::Normal } else { TabSection::Pinned };
        self.retype(tab, target)
    }

    /// Favorites go back to the head of the normal section; anything else is
    /// appended to the favorites.
    fn toggle_fav_tab(&mut self, tab: TabId) -> Result<(), TabError> {
        let favorite = self.graph.tab(tab).ok_or(TabError::TabNotFound(tab))?.is_favorite();
        let target = if favorite { TabSection::Normal } else { TabSection::Favorite };
        self.retype(tab, target)
    }

    /// Opens a copy of a tab in the normal section, right after the source
    /// when the source is a top-level normal tab.
    fn duplicate_tab(&mut self, tab: TabId) -> Result<TabId, TabError> {
        let source = self.graph.tab(tab).cloned().ok_or(TabError::TabNotFound(tab))?;
        let id = TabId::new();
        let mut copy = Tab::new(id, source.container, &source.url, now_millis());
        copy.custom_title = source.custom_title.clone();
        copy.page_title = source.page_title.clone();
        copy.favicon = source.favicon.clone();
        self.graph.insert_tab(copy);

        let normal = Scope::section_root(source.container, TabSection::Normal);
        let after_source = if self.graph.scope_of(tab) == Some(normal) {
            self.graph
                .scope_members(&normal)
                .iter()
                .position(|t| *t == tab)
                .map(|p| p + 1)
        } else {
            None
        };
        let index = after_source.unwrap_or(match self.settings.tabs.new_tab_position {
            NewTabPosition::Top => 0,
            NewTabPosition::Bottom => usize::MAX,
        });
        self.graph.place(id, normal, index);
        self.attach_render(id);
        log::info!("Duplicated tab {} as {}", tab, id);
        self.commit(TabEvent::ContainerChanged {
            container: source.container,
            animated: false,
        });
        Ok(id)
    }

    /// Records a navigation. The saved URL of pinned/favorite tabs is kept.
    fn update_tab_url(&mut self, tab: TabId, url: &str) -> Result<(), TabError> {
        let entry = self.graph.tab_mut(tab).ok_or(TabError::TabNotFound(tab))?;
        entry.url = url.to_string();
        let container = entry.container;
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(())
    }

    fn update_tab_title(&mut self, tab: TabId, title: &str) -> Result<(), TabError> {
        let entry = self.graph.tab_mut(tab).ok_or(TabError::TabNotFound(tab))?;
        entry.page_title = Some(title.to_string());
        let container = entry.container;
        self.commit(TabEvent::ContainerChanged { container, animated: false });
        Ok(())
    }

    fn get_tab(&self, tab: TabId) -> Option<&Tab> {
        self.graph.tab(tab)
    }

    fn get_active_tab(&self) -> Option<&Tab> {
        self.active_tab.and_then(|id| self.graph.tab(id))
    }

    fn tab_count(&self) -> usize {
        self.graph.tab_count()
    }
}
