//! Tabspace RPC bridge: JSON commands over stdin/stdout for the sidebar UI.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tab.pin", "params":{"id":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Change notifications follow the response as {"event":"container_changed", ...} lines.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use serde_json::{json, Value};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

use tabspace::app::App;
use tabspace::platform;
use tabspace::rpc_handler::handle_method;
use tabspace::types::event::TabEvent;

fn write_line(out: &mut impl Write, value: &Value) {
    let _ = writeln!(out, "{}", value);
    let _ = out.flush();
}

/// Forwards every event published while the last request ran.
fn forward_events(out: &mut impl Write, events: &mut Receiver<TabEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => match serde_json::to_value(&event) {
                Ok(value) => write_line(out, &value),
                Err(e) => log::warn!("Dropping unserializable event {:?}: {}", event, e),
            },
            Err(TryRecvError::Lagged(missed)) => log::warn!("Bridge missed {} events", missed),
            Err(_) => break,
        }
    }
}

fn main() {
    // TABSPACE_DATA_DIR overrides the platform data directory
    let db_path = std::env::var("TABSPACE_DATA_DIR")
        .map(|dir| PathBuf::from(dir).join(platform::SESSION_DB_FILE))
        .unwrap_or_else(|_| platform::default_session_db_path());
    if let Some(parent) = db_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let mut app = App::new(db_path.to_str().unwrap_or(platform::SESSION_DB_FILE), None)
        .expect("Failed to initialize Tabspace");
    let mut events = app.tab_manager.subscribe();
    app.startup();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_line(&mut out, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    forward_events(&mut out, &mut events);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_line(&mut out, &json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&mut app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        write_line(&mut out, &response);
        forward_events(&mut out, &mut events);
    }

    app.shutdown();
}
