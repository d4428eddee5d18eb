// MindMap - ui/panels/mod.rs

pub mod about;
pub mod editor;
pub mod mindmap_view;
pub mod settings;
