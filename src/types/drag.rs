use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{FolderId, TabId};
use super::tab::TabSection;

/// The single item carried by a drag session: a tab id as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragPayload(String);

impl DragPayload {
    pub fn for_tab(id: TabId) -> Self {
        Self(id.to_string())
    }

    /// Wraps raw pasteboard text without validating it.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the tab id, `None` when the text is not an id.
    pub fn tab_id(&self) -> Option<TabId> {
        self.0.parse().ok()
    }
}

impl fmt::Display for DragPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drag operations understood by the platform; tab drags only ever propose `Move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOperation {
    Move,
    Copy,
    Link,
}

/// Layout axis of the list a drop target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// What the platform reports for one hover or drop event.
///
/// `location` is relative to the target's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DropInfo {
    pub payload: Option<DragPayload>,
    pub location: Point,
    pub frame: Size,
    /// Pointer is over the dedicated "group into tab set" affordance.
    pub in_tileset_zone: bool,
}

impl DropInfo {
    pub fn new(payload: Option<DragPayload>) -> Self {
        Self {
            payload,
            location: Point::default(),
            frame: Size::default(),
            in_tileset_zone: false,
        }
    }

    pub fn at(mut self, location: Point, frame: Size) -> Self {
        self.location = location;
        self.frame = frame;
        self
    }

    pub fn in_tileset_zone(mut self) -> Self {
        self.in_tileset_zone = true;
        self
    }

    /// Position of the pointer along `axis` as a fraction of the frame.
    pub fn fraction_along(&self, axis: Axis) -> f32 {
        let (pos, extent) = match axis {
            Axis::Horizontal => (self.location.x, self.frame.width),
            Axis::Vertical => (self.location.y, self.frame.height),
        };
        if extent <= 0.0 {
            return 0.0;
        }
        (pos / extent).clamp(0.0, 1.0)
    }
}

/// The item a drag is currently hovering, kept for highlight rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTargetItem {
    SectionHead(TabSection),
    Tab(TabId),
    Divider(TabSection),
    Folder(FolderId),
    FolderTab(FolderId, TabId),
}

/// Transient state of the one active drag session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub dragged: Option<TabId>,
    pub targeted: Option<DropTargetItem>,
}

impl DragState {
    pub fn clear(&mut self) {
        self.dragged = None;
        self.targeted = None;
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }
}
