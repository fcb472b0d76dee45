// Tabspace shared type definitions
// Each submodule defines types used across the engine.

pub mod container;
pub mod drag;
pub mod errors;
pub mod event;
pub mod folder;
pub mod ids;
pub mod mutation;
pub mod settings;
pub mod snapshot;
pub mod tab;
