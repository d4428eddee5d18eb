// MindMap - app/session.rs
//
// Session persistence: the last opened document, zoom level, and font
// settings survive application restarts.
//
// - Saved atomically (write temp, rename) so a crash during save never
//   corrupts the previous good session.
// - Load errors discard the session and start fresh; they are logged, never
//   surfaced as dialogs.
// - Document text is NOT persisted. The file is re-read on restore so the
//   editor always reflects what is on disk.

use crate::util::constants::SESSION_FILE_NAME;
use crate::util::error::SessionError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

/// Persistent session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version; must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Document open when the application last closed.
    pub current_file: Option<PathBuf>,

    /// Mind-map zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: f32,

    /// Node font size chosen in the settings dialog.
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Node font colour chosen in the settings dialog (`#RRGGBB`).
    #[serde(default)]
    pub font_color: Option<String>,
}

fn default_zoom() -> f32 {
    crate::util::constants::DEFAULT_ZOOM
}

fn default_font_size() -> u32 {
    crate::util::constants::DEFAULT_FONT_SIZE
}

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically (write temp, rename).
///
/// Creates parent directories as needed. Callers typically log the error
/// and continue.
pub fn save(data: &SessionData, path: &Path) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SessionError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(data).map_err(SessionError::Serialize)?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| SessionError::Write {
        path: tmp.clone(),
        operation: "write",
        source: e,
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        SessionError::Write {
            path: path.to_path_buf(),
            operation: "rename",
            source: e,
        }
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (missing file, malformed JSON, version
/// mismatch). The caller treats `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // A missing file is the normal first run.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed; starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch; starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session file loaded");
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_data() -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            current_file: Some(PathBuf::from("/tmp/plan.md")),
            zoom: 1.5,
            font_size: 18,
            font_color: Some("#336699".to_string()),
        }
    }

    #[test]
    fn test_session_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let original = sample_data();

        save(&original, &path).expect("save should create parent dirs");
        let loaded = load(&path).expect("load should return Some after valid save");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_session_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nonexistent.json")).is_none());
    }

    #[test]
    fn test_session_load_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_session_load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut data = sample_data();
        data.version = 99;
        save(&data, &path).unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_session_missing_optional_fields_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, br#"{"version":1,"current_file":null}"#).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.zoom, 1.0);
        assert_eq!(loaded.font_size, 14);
        assert_eq!(loaded.font_color, None);
    }

    #[test]
    fn test_session_save_ignores_leftover_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        save(&sample_data(), &path).unwrap();
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let mut updated = sample_data();
        updated.zoom = 0.5;
        save(&updated, &path).unwrap();
        assert_eq!(load(&path).unwrap().zoom, 0.5);
    }

    #[test]
    fn test_session_save_reports_unusable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"file").unwrap();

        let result = save(&sample_data(), &blocker.join("session.json"));
        match result {
            Err(SessionError::CreateDir { path, .. }) => assert_eq!(path, blocker),
            other => panic!("expected CreateDir error, got {other:?}"),
        }
    }
}
