// MindMap - app/state.rs
//
// Application state management. Holds the editor text, the mind map parsed
// from it, the open document, view transform, and drag-and-drop state.
// Owned by the eframe::App implementation.

use crate::app::document;
use crate::app::session::{SessionData, SESSION_VERSION};
use crate::app::settings::Settings;
use crate::core::export::{self, ExportFormat};
use crate::core::model::{MindMap, NodeId};
use crate::core::parser;
use crate::util::constants;
use crate::util::error::{DocumentError, ExportError, TreeError};
use std::path::{Path, PathBuf};

/// An in-progress node drag on the canvas, in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDrag {
    pub node: NodeId,
    /// Offset of the grab point from the node box's top-left corner.
    pub grab_offset: (f32, f32),
    /// Current pointer position.
    pub pointer: (f32, f32),
    /// Node that would become the new parent if released now.
    pub target: Option<NodeId>,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Markdown source shown in the editor pane.
    pub editor_text: String,

    /// Tree parsed from `editor_text`.
    pub mindmap: MindMap,

    /// Document backing the editor (None for an unsaved document).
    pub current_file: Option<PathBuf>,

    /// Node font settings.
    pub settings: Settings,

    /// Canvas zoom factor, within `MIN_ZOOM..=MAX_ZOOM`.
    zoom: f32,

    /// Pixel scroll collected towards the next zoom step.
    scroll_accum: f32,

    /// Canvas scroll offset in screen points.
    pub pan: (f32, f32),

    /// Node currently being dragged, if any.
    pub drag: Option<NodeDrag>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, failed session restore).
    pub warnings: Vec<String>,

    /// Error shown in a modal window until dismissed.
    pub error_message: Option<String>,

    pub show_settings: bool,
    pub show_about: bool,

    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,

    /// Markdown editor font size in points.
    pub editor_font_size: f32,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    /// Where `save_session` writes; `None` disables persistence.
    pub session_path: Option<PathBuf>,
}

impl AppState {
    /// Create an empty, untitled state.
    pub fn new(settings: Settings, debug_mode: bool) -> Self {
        Self {
            editor_text: String::new(),
            mindmap: MindMap::default(),
            current_file: None,
            settings,
            zoom: constants::DEFAULT_ZOOM,
            scroll_accum: 0.0,
            pan: (0.0, 0.0),
            drag: None,
            status_message: "Ready. Type a Markdown outline to build a mind map.".to_string(),
            warnings: Vec::new(),
            error_message: None,
            show_settings: false,
            show_about: false,
            dark_mode: false,
            editor_font_size: constants::DEFAULT_EDITOR_FONT_SIZE,
            debug_mode,
            session_path: None,
        }
    }

    // -------------------------------------------------------------------------
    // Editor and tree
    // -------------------------------------------------------------------------

    /// Replace the editor text and rebuild the map.
    pub fn set_editor_text(&mut self, text: impl Into<String>) {
        self.editor_text = text.into();
        self.on_text_changed();
    }

    /// Re-parse `editor_text` into a fresh tree.
    ///
    /// With a root the map title follows the root text; with nothing to
    /// parse the map is left empty and the title is kept.
    pub fn on_text_changed(&mut self) {
        self.drag = None;
        self.mindmap.clear();
        let Some(root) = parser::parse_into(&mut self.mindmap, &self.editor_text) else {
            return;
        };
        if let Err(e) = self.mindmap.set_root(root) {
            tracing::error!(error = %e, "Parsed root missing from map");
            return;
        }
        let title = self.mindmap.root_node().map(|n| n.text().to_string());
        if let Some(title) = title {
            self.mindmap.set_title(title);
        }
    }

    /// Move `node` under `new_parent` and rewrite the editor text from the
    /// tree. The rewritten text is not parsed again, so node ids survive.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        self.mindmap.reparent(node, new_parent)?;
        self.editor_text = export::to_markdown(&self.mindmap);
        self.status_message = "Node moved.".to_string();
        Ok(())
    }

    /// Finish a drag: reparent onto the current target if there is one.
    ///
    /// Returns true when the tree changed.
    pub fn finish_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let Some(target) = drag.target else {
            return false;
        };
        match self.reparent(drag.node, target) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Drop rejected");
                self.status_message = format!("Cannot move node: {e}");
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Documents
    // -------------------------------------------------------------------------

    /// Start an empty, untitled document.
    pub fn new_document(&mut self) {
        self.editor_text.clear();
        self.mindmap.clear();
        self.mindmap.set_title(constants::DEFAULT_TITLE);
        self.current_file = None;
        self.drag = None;
        self.status_message = "New document.".to_string();
        tracing::info!("New document");
    }

    /// Load `path` into the editor. On failure nothing changes.
    pub fn open_file(&mut self, path: &Path) -> Result<(), DocumentError> {
        let text = document::load(path)?;
        self.set_editor_text(text);
        self.current_file = Some(path.to_path_buf());
        self.status_message = format!(
            "Opened {} ({} nodes).",
            document::display_name(path),
            self.mindmap.all_nodes().len()
        );
        Ok(())
    }

    /// Save to the current file.
    ///
    /// Returns `Ok(false)` when there is no current file; the caller should
    /// ask for a path and call `save_as`.
    pub fn save(&mut self) -> Result<bool, DocumentError> {
        let Some(path) = self.current_file.clone() else {
            return Ok(false);
        };
        document::save(&path, &self.editor_text)?;
        self.status_message = format!("Saved {}.", document::display_name(&path));
        Ok(true)
    }

    /// Save to `path` (adding `.md` when it has no extension) and make it the
    /// current file. Returns the path actually written.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf, DocumentError> {
        let path = document::normalise_save_path(path);
        document::save(&path, &self.editor_text)?;
        self.status_message = format!("Saved {}.", document::display_name(&path));
        self.current_file = Some(path.clone());
        Ok(path)
    }

    /// Export the current tree to `path`. Returns the node count.
    pub fn export_to(&mut self, path: &Path, format: ExportFormat) -> Result<usize, ExportError> {
        let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let count = export::export(
            &self.mindmap,
            format,
            std::io::BufWriter::new(file),
            path,
        )?;
        tracing::info!(
            path = %path.display(),
            format = format.label(),
            nodes = count,
            "Mind map exported"
        );
        self.status_message = format!(
            "Exported {count} nodes to {}.",
            document::display_name(path)
        );
        Ok(count)
    }

    /// `MindMap - <file name>` or `MindMap - Untitled`.
    pub fn window_title(&self) -> String {
        let name = self
            .current_file
            .as_deref()
            .map(document::display_name)
            .unwrap_or_else(|| constants::DEFAULT_TITLE.to_string());
        format!("{} - {name}", constants::APP_NAME)
    }

    /// Suggested file name for save and export dialogs.
    pub fn suggested_file_name(&self, extension: &str) -> String {
        let stem = self
            .current_file
            .as_deref()
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned());
        match stem {
            Some(stem) => format!("{stem}.{extension}"),
            None if extension == constants::MARKDOWN_EXTENSION => {
                constants::DEFAULT_SAVE_NAME.to_string()
            }
            None => format!("mindmap.{extension}"),
        }
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Apply one wheel notch. A step that would leave
    /// `MIN_ZOOM..=MAX_ZOOM` is ignored rather than clamped.
    ///
    /// Returns true when the zoom changed.
    pub fn zoom_step(&mut self, zoom_in: bool) -> bool {
        let factor = if zoom_in {
            constants::ZOOM_STEP
        } else {
            1.0 / constants::ZOOM_STEP
        };
        let next = self.zoom * factor;
        if !(constants::MIN_ZOOM..=constants::MAX_ZOOM).contains(&next) {
            return false;
        }
        self.zoom = next;
        true
    }

    /// Feed one wheel event. Line and page events (mouse notches) step
    /// once each; pixel deltas accumulate until `ZOOM_SCROLL_PIXELS`.
    ///
    /// Returns true when the zoom changed.
    pub fn wheel_zoom(&mut self, delta: f32, per_notch: bool) -> bool {
        if delta == 0.0 {
            return false;
        }
        let zoom_in = delta > 0.0;
        if per_notch {
            self.scroll_accum = 0.0;
            return self.zoom_step(zoom_in);
        }
        // A direction change discards the partial scroll.
        if self.scroll_accum != 0.0 && (self.scroll_accum > 0.0) != zoom_in {
            self.scroll_accum = 0.0;
        }
        self.scroll_accum += delta;
        if self.scroll_accum.abs() < constants::ZOOM_SCROLL_PIXELS {
            return false;
        }
        self.scroll_accum = 0.0;
        self.zoom_step(zoom_in)
    }

    /// Back to 100% with the scene at its origin.
    pub fn reset_zoom(&mut self) {
        self.scroll_accum = 0.0;
        self.zoom = constants::DEFAULT_ZOOM;
        self.pan = (0.0, 0.0);
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan.0 += dx;
        self.pan.1 += dy;
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    /// Snapshot of the state worth persisting across restarts.
    pub fn session_snapshot(&self) -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            current_file: self.current_file.clone(),
            zoom: self.zoom,
            font_size: self.settings.font_size(),
            font_color: self.settings.font_color().map(str::to_string),
        }
    }

    /// Persist the session snapshot. Failures are logged and otherwise
    /// ignored.
    pub fn save_session(&self) {
        let Some(path) = self.session_path.as_deref() else {
            return;
        };
        if let Err(e) = crate::app::session::save(&self.session_snapshot(), path) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }

    /// Apply a restored session. A remembered document that can no longer
    /// be opened is reported as a warning and the editor stays empty.
    pub fn restore_session(&mut self, data: SessionData) {
        if (constants::MIN_ZOOM..=constants::MAX_ZOOM).contains(&data.zoom) {
            self.zoom = data.zoom;
        }
        self.settings = Settings::from_parts(data.font_size, data.font_color);

        if let Some(path) = data.current_file {
            if let Err(e) = self.open_file(&path) {
                tracing::warn!(error = %e, "Could not reopen last document");
                self.warnings
                    .push(format!("Could not reopen last document: {e}"));
            }
        }
    }
}
