//! Command handler for the sidebar bridge.
//!
//! The `handle_method` function dispatches JSON method calls from the UI
//! layer to the tab manager and the settings engine via the `App` struct.
//! Identifiers travel as hyphenated UUID strings.

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::drop_delegate::{
    DividerDropDelegate, DropDelegate, FolderDropDelegate, FolderTabDropDelegate, GeneralDropDelegate,
    SectionHeadDropDelegate,
};
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::drag::{Axis, DragPayload, DropInfo, Point, Size};
use crate::types::errors::TabError;
use crate::types::folder::FolderDeletion;
use crate::types::ids::{ContainerId, FolderId, TabId};
use crate::types::mutation::{ReorderTarget, Reparenting};
use crate::types::tab::{Tab, TabSection};

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn tab_param(params: &Value, key: &str) -> Result<TabId, String> {
    let raw = str_param(params, key)?;
    raw.parse()
        .map_err(|_| TabError::InvalidPayload(raw.to_string()).to_string())
}

fn container_param(params: &Value, key: &str) -> Result<ContainerId, String> {
    let raw = str_param(params, key)?;
    raw.parse().map_err(|_| format!("invalid space id: {}", raw))
}

fn folder_param(params: &Value, key: &str) -> Result<FolderId, String> {
    let raw = str_param(params, key)?;
    raw.parse().map_err(|_| format!("invalid folder id: {}", raw))
}

fn section_param(params: &Value, key: &str) -> Result<TabSection, String> {
    let raw = str_param(params, key)?;
    TabSection::parse(raw).ok_or_else(|| format!("invalid section: {}", raw))
}

/// Space named in `params["space"]`, or the active one.
fn space_or_active(manager: &TabManager, params: &Value) -> Result<ContainerId, String> {
    if params.get("space").is_some() {
        return container_param(params, "space");
    }
    manager.active_container().ok_or_else(|| "no active space".to_string())
}

fn tab_json(manager: &TabManager, tab: &Tab) -> Value {
    let children: Vec<Value> = manager
        .children_of(tab.id)
        .into_iter()
        .map(|child| tab_json(manager, child))
        .collect();
    json!({
        "id": tab.id.to_string(),
        "title": tab.display_title(),
        "url": tab.url,
        "saved_url": tab.saved_url,
        "favicon": tab.favicon,
        "section": tab.section.as_str(),
        "folder": tab.folder.map(|f| f.to_string()),
        "active": manager.active_tab_id() == Some(tab.id),
        "children": children,
    })
}

fn tab_list_json(manager: &TabManager, tabs: Vec<&Tab>) -> Value {
    Value::Array(tabs.into_iter().map(|t| tab_json(manager, t)).collect())
}

/// Builds the delegate for the drop target described in `params["target"]`.
fn delegate_for(container: ContainerId, target: &Value) -> Result<Box<dyn DropDelegate>, String> {
    let kind = str_param(target, "kind")?;
    let delegate: Box<dyn DropDelegate> = match kind {
        "section" => Box::new(SectionHeadDropDelegate {
            container,
            section: section_param(target, "section")?,
        }),
        "tab" => Box::new(GeneralDropDelegate {
            container,
            tab: tab_param(target, "tab")?,
            axis: Axis::Vertical,
        }),
        "divider" => Box::new(DividerDropDelegate {
            container,
            above: section_param(target, "above")?,
            below: section_param(target, "below")?,
            axis: Axis::Vertical,
        }),
        "folder" => Box::new(FolderDropDelegate {
            container,
            folder: folder_param(target, "folder")?,
        }),
        "folder_tab" => Box::new(FolderTabDropDelegate {
            container,
            folder: folder_param(target, "folder")?,
            tab: tab_param(target, "tab")?,
        }),
        other => return Err(format!("unknown drop target: {}", other)),
    };
    Ok(delegate)
}

/// Hover/drop event built from the bridge's normalized pointer position.
fn drop_info(params: &Value) -> DropInfo {
    let payload = params
        .get("payload")
        .and_then(|v| v.as_str())
        .map(DragPayload::from_text);
    let fraction = params.get("fraction").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    let info = DropInfo::new(payload).at(
        Point { x: 0.0, y: fraction },
        Size {
            width: 1.0,
            height: 1.0,
        },
    );
    if params.get("tileset").and_then(|v| v.as_bool()).unwrap_or(false) {
        info.in_tileset_zone()
    } else {
        info
    }
}

/// Dispatch a method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    let manager = &mut app.tab_manager;
    match method {
        // ─── Spaces ───
        "space.list" => {
            let active = manager.active_container();
            let spaces: Vec<Value> = manager
                .containers()
                .iter()
                .map(|c| {
                    json!({
                        "id": c.id.to_string(),
                        "name": c.name,
                        "emoji": c.emoji,
                        "active": active == Some(c.id),
                    })
                })
                .collect();
            Ok(json!(spaces))
        }
        "space.create" => {
            let name = str_param(params, "name")?;
            let emoji = params.get("emoji").and_then(|v| v.as_str());
            let id = manager.create_container(name, emoji);
            Ok(json!({"id": id.to_string()}))
        }
        "space.rename" => {
            let id = container_param(params, "id")?;
            let name = str_param(params, "name")?;
            manager.rename_container(id, name).map_err(|e| e.to_string())?;
            if let Some(emoji) = params.get("emoji") {
                manager
                    .set_container_emoji(id, emoji.as_str())
                    .map_err(|e| e.to_string())?;
            }
            Ok(json!({"ok": true}))
        }
        "space.delete" => {
            let id = container_param(params, "id")?;
            manager.delete_container(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "space.activate" => {
            let id = container_param(params, "id")?;
            manager.activate_container(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Tabs ───
        "tab.list" => {
            let space = space_or_active(manager, params)?;
            let folders: Vec<Value> = manager
                .folders(space)
                .iter()
                .map(|f| {
                    json!({
                        "id": f.id.to_string(),
                        "name": f.name,
                        "is_open": f.is_open,
                        "tabs": tab_list_json(manager, manager.folder_tabs(f.id)),
                    })
                })
                .collect();
            Ok(json!({
                "favorites": tab_list_json(manager, manager.favorite_tabs(space)),
                "pinned": tab_list_json(manager, manager.pinned_tabs(space)),
                "folders": folders,
                "normal": tab_list_json(manager, manager.normal_tabs(space)),
            }))
        }
        "tab.create" => {
            let space = space_or_active(manager, params)?;
            let url = params.get("url").and_then(|v| v.as_str());
            let id = manager.create_tab(space, url).map_err(|e| e.to_string())?;
            if params.get("activate").and_then(|v| v.as_bool()).unwrap_or(true) {
                manager.activate_tab(id).map_err(|e| e.to_string())?;
            }
            Ok(json!({"id": id.to_string()}))
        }
        "tab.activate" => {
            let id = tab_param(params, "id")?;
            manager.activate_tab(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.close" => {
            let id = tab_param(params, "id")?;
            manager.close_tab(id).map_err(|e| e.to_string())?;
            Ok(json!({"active": manager.active_tab_id().map(|t| t.to_string())}))
        }
        "tab.pin" => {
            let id = tab_param(params, "id")?;
            manager.toggle_pin_tab(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.favorite" => {
            let id = tab_param(params, "id")?;
            manager.toggle_fav_tab(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.duplicate" => {
            let id = tab_param(params, "id")?;
            let copy = manager.duplicate_tab(id).map_err(|e| e.to_string())?;
            Ok(json!({"id": copy.to_string()}))
        }
        "tab.navigate" => {
            let id = tab_param(params, "id")?;
            let url = str_param(params, "url")?;
            manager.update_tab_url(id, url).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.page_title" => {
            let id = tab_param(params, "id")?;
            let title = str_param(params, "title")?;
            manager.update_tab_title(id, title).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.rename" => {
            let id = tab_param(params, "id")?;
            let title = params.get("title").and_then(|v| v.as_str());
            manager.set_custom_title(id, title).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tab.restore_url" => {
            let id = tab_param(params, "id")?;
            let changed = manager.restore_saved_url(id).map_err(|e| e.to_string())?;
            Ok(json!({"changed": changed}))
        }
        "tab.detach" => {
            let id = tab_param(params, "id")?;
            let changed = manager.detach_from_tileset(id).map_err(|e| e.to_string())?;
            Ok(json!({"changed": changed}))
        }
        "tab.reorder" => {
            let space = space_or_active(manager, params)?;
            let from = tab_param(params, "from")?;
            let applied = if params.get("section").is_some() {
                let section = section_param(params, "section")?;
                let at_head = params.get("head").and_then(|v| v.as_bool()).unwrap_or(true);
                manager.reorder_tabs_to_section(space, from, section, at_head)
            } else {
                let to = tab_param(params, "to")?;
                let reparenting = if params.get("child").and_then(|v| v.as_bool()).unwrap_or(false) {
                    Reparenting::Child
                } else {
                    Reparenting::Sibling
                };
                manager.reorder_tabs(space, from, ReorderTarget::Tab(to), reparenting)
            };
            Ok(json!({"applied": applied}))
        }
        "tab.combine" => {
            let space = space_or_active(manager, params)?;
            let source = tab_param(params, "source")?;
            let destination = tab_param(params, "destination")?;
            let applied = manager.combine_to_tileset(space, source, destination);
            Ok(json!({"applied": applied}))
        }

        // ─── Folders ───
        "folder.create" => {
            let space = space_or_active(manager, params)?;
            let name = str_param(params, "name")?;
            let id = manager.create_folder(space, name).map_err(|e| e.to_string())?;
            Ok(json!({"id": id.to_string()}))
        }
        "folder.rename" => {
            let id = folder_param(params, "id")?;
            let name = str_param(params, "name")?;
            manager.rename_folder(id, name).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "folder.toggle" => {
            let id = folder_param(params, "id")?;
            let is_open = manager.toggle_folder_open(id).map_err(|e| e.to_string())?;
            Ok(json!({"is_open": is_open}))
        }
        "folder.delete" => {
            let id = folder_param(params, "id")?;
            let mode = if params.get("release_tabs").and_then(|v| v.as_bool()).unwrap_or(false) {
                FolderDeletion::ReleaseTabs
            } else {
                FolderDeletion::OnlyIfEmpty
            };
            manager.delete_folder(id, mode).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "folder.add_tab" => {
            let space = space_or_active(manager, params)?;
            let tab = tab_param(params, "tab")?;
            let folder = folder_param(params, "folder")?;
            let applied = manager.move_tab_to_folder(space, tab, folder);
            Ok(json!({"applied": applied}))
        }
        "folder.reorder" => {
            let space = space_or_active(manager, params)?;
            let from = tab_param(params, "from")?;
            let to = tab_param(params, "to")?;
            let applied = manager.reorder_in_folder(space, from, to);
            Ok(json!({"applied": applied}))
        }

        // ─── Drag and drop ───
        "drag.begin" => {
            let id = tab_param(params, "id")?;
            let payload = manager
                .begin_drag(id)
                .ok_or_else(|| TabError::TabNotFound(id).to_string())?;
            Ok(json!({"payload": payload.as_str()}))
        }
        "drag.enter" => {
            let space = space_or_active(manager, params)?;
            let target = params.get("target").ok_or("missing target")?;
            let delegate = delegate_for(space, target)?;
            let applied = delegate.drop_entered(manager, &drop_info(params));
            Ok(json!({"applied": applied}))
        }
        "drag.drop" => {
            let space = space_or_active(manager, params)?;
            let target = params.get("target").ok_or("missing target")?;
            let delegate = delegate_for(space, target)?;
            let accepted = delegate.perform_drop(manager, &drop_info(params));
            Ok(json!({"accepted": accepted}))
        }
        "drag.cancel" => {
            manager.end_drag();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let settings = app.settings_engine.get_settings();
            let json_val = serde_json::to_value(settings).map_err(|e| e.to_string())?;
            Ok(json_val)
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            app.apply_settings();
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            app.settings_engine.reset().map_err(|e| e.to_string())?;
            app.apply_settings();
            Ok(json!({"ok": true}))
        }

        // ─── Session ───
        "session.snapshot" => serde_json::to_value(manager.snapshot()).map_err(|e| e.to_string()),

        // ─── Ping ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
