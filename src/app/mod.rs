// MindMap - app/mod.rs
//
// Application layer: editor/map orchestration, documents, session state.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod document;
pub mod session;
pub mod session_log;
pub mod settings;
pub mod state;
