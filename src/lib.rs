//! Tabspace — the tab organization engine of a browser sidebar.
//!
//! Spaces own tabs and folders; tabs live in one of three sections
//! (favorites, pinned, normal) and may be grouped into tab sets. Drag and
//! drop in the sidebar goes through the drop delegates in
//! [`managers::drop_delegate`], which translate each gesture into one
//! mutation of [`managers::tab_container::TabContainerMut`].
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
