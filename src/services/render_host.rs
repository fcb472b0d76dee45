//! Boundary to the rendering engine.
//!
//! The tab manager asks the host for a surface when a tab is created and
//! gives it back when the tab is closed. It never looks inside the handle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::types::ids::TabId;
use crate::types::tab::RenderHandle;

pub trait RenderHost {
    /// Creates a rendering surface for a tab showing `url`.
    fn attach(&mut self, tab: TabId, url: &str) -> RenderHandle;
    /// Releases a surface previously returned by `attach`.
    fn detach(&mut self, tab: TabId, handle: RenderHandle);
}

#[derive(Debug, Default)]
struct HeadlessState {
    next_handle: u64,
    live: HashMap<TabId, RenderHandle>,
}

/// Host that hands out sequential handles and tracks which are live.
///
/// Used when no rendering engine is wired in (tests, the console demo).
/// Clones share the same bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderHost {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessRenderHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn is_attached(&self, tab: TabId) -> bool {
        self.state.borrow().live.contains_key(&tab)
    }
}

impl RenderHost for HeadlessRenderHost {
    fn attach(&mut self, tab: TabId, _url: &str) -> RenderHandle {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let handle = RenderHandle(state.next_handle);
        state.live.insert(tab, handle);
        handle
    }

    fn detach(&mut self, tab: TabId, handle: RenderHandle) {
        let mut state = self.state.borrow_mut();
        if state.live.get(&tab) == Some(&handle) {
            state.live.remove(&tab);
        }
    }
}
