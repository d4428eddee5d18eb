// MindMap - core/mod.rs
//
// Core business logic layer: the node tree, Markdown parsing, layout, and
// export.
// Dependencies: standard library plus serialisation crates.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod layout;
pub mod model;
pub mod parser;
