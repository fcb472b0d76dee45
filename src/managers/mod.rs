// Tabspace state managers
// Managers own the tab graph and its mutations: the arena, the per-space mutation contract,
// drop delegates, the tab manager facade and session persistence.

pub mod drop_delegate;
pub mod session_manager;
pub mod tab_container;
pub mod tab_graph;
pub mod tab_manager;
