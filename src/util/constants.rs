// MindMap - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "MindMap";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "MindMap";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Title given to a mind map before any content names it.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Node text marking a synthetic root whose children form a forest.
pub const VIRTUAL_ROOT_TEXT: &str = "__virtual_root__";

// =============================================================================
// Markdown parsing
// =============================================================================

/// Deepest heading level recognised (`######`).
pub const MAX_HEADING_LEVEL: usize = 6;

/// Columns of leading whitespace that make up one list nesting level.
pub const LIST_INDENT_WIDTH: usize = 2;

/// Columns a tab character counts for when measuring list indentation.
pub const TAB_WIDTH: usize = 2;

/// Indent written per depth level when exporting a Markdown list.
pub const EXPORT_INDENT: &str = "  ";

// =============================================================================
// Layout (scene units, before zoom)
// =============================================================================

/// Height reserved for a leaf subtree (one line of text).
pub const LEAF_SUBTREE_HEIGHT: f32 = 50.0;

/// Horizontal gap between a parent's right edge and its children.
pub const HORIZONTAL_SPACING: f32 = 120.0;

/// Vertical gap between sibling subtrees.
pub const VERTICAL_SPACING: f32 = 40.0;

/// Left edge of the first column of nodes.
pub const LAYOUT_START_X: f32 = 100.0;

/// Vertical centre of a single root.
pub const ROOT_START_Y: f32 = 300.0;

/// Top of the first tree when laying out a forest under a virtual root.
pub const FOREST_START_Y: f32 = 100.0;

/// Extra height below the text for the node underline.
pub const UNDERLINE_ALLOWANCE: f32 = 4.0;

/// Gap between a node box and the end of a connector curve.
pub const CONNECTOR_GAP: f32 = 5.0;

/// Fraction of the horizontal distance used for Bezier control points.
pub const CONNECTOR_CURVATURE: f32 = 0.5;

/// Margin added around the node bounding box to form the scene rect.
pub const SCENE_MARGIN: f32 = 100.0;

// =============================================================================
// Zoom
// =============================================================================

/// Multiplicative zoom change per wheel notch.
pub const ZOOM_STEP: f32 = 1.15;

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f32 = 0.1;

/// Largest allowed zoom level.
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom level at startup and after "Reset Zoom".
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Pixel scroll (trackpads) needed for one zoom step.
pub const ZOOM_SCROLL_PIXELS: f32 = 50.0;

// =============================================================================
// Fonts
// =============================================================================

/// Default node font size in points.
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Smallest font size the settings accept.
pub const MIN_FONT_SIZE: u32 = 8;

/// Largest font size the settings accept.
pub const MAX_FONT_SIZE: u32 = 72;

/// Default font size of the Markdown editor pane.
pub const DEFAULT_EDITOR_FONT_SIZE: f32 = 12.0;

/// Smallest editor font size accepted from config.toml.
pub const MIN_EDITOR_FONT_SIZE: f32 = 8.0;

/// Largest editor font size accepted from config.toml.
pub const MAX_EDITOR_FONT_SIZE: f32 = 32.0;

// =============================================================================
// Documents
// =============================================================================

/// Extension appended by "Save As" when the chosen name has none.
pub const MARKDOWN_EXTENSION: &str = "md";

/// File name proposed by the "Save As" dialog.
pub const DEFAULT_SAVE_NAME: &str = "untitled.md";

/// Largest document accepted by "Open" (bytes).
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024; // 10 MB

// =============================================================================
// Session log
// =============================================================================

/// Default session log file, created in the current directory.
pub const SESSION_LOG_FILE_NAME: &str = "claude.log";

/// Header written once when the session log is created.
pub const SESSION_LOG_HEADER: [&str; 2] = [
    "# Session log",
    "# Format: [YYYY-MM-DD HH:MM:SS] message",
];

/// Message logged when no arguments are given.
pub const DEFAULT_SESSION_MESSAGE: &str = "Session started";

/// chrono format of the session log timestamp.
pub const SESSION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Files and logging
// =============================================================================

/// Config file name, resolved in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name, resolved in the platform data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Log level used when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
