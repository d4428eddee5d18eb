// MindMap - ui/theme.rs
//
// Colour scheme and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Convert an RGB triple from the settings layer.
pub fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Canvas background.
pub fn canvas_bg(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(32, 33, 36)
    } else {
        Color32::from_rgb(250, 250, 250)
    }
}

/// Parent-child connector curves.
pub const CONNECTOR: Color32 = Color32::from_rgb(150, 150, 150);
pub const CONNECTOR_WIDTH: f32 = 2.0;

/// Node under the pointer while dragging: where the drop will land.
pub const DROP_TARGET: Color32 = Color32::from_rgb(255, 100, 0);

/// The node being dragged.
pub const DRAG_SOURCE: Color32 = Color32::from_rgb(255, 165, 0);

/// Underline drawn below each node's text.
pub const UNDERLINE_WIDTH: f32 = 1.5;

/// Warning text in the status bar.
pub const WARNING_TEXT: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Layout constants.
pub const EDITOR_PANEL_WIDTH: f32 = 380.0;
pub const EDITOR_PANEL_MIN_WIDTH: f32 = 200.0;
