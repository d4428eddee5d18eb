// MindMap - app/document.rs
//
// Opening and saving Markdown documents.
//
// - Open rejects files above MAX_DOCUMENT_BYTES and non-UTF-8 content, so a
//   failed open never half-replaces the editor text.
// - Save writes atomically (temp file, then rename) so a crash mid-save keeps
//   the previous version intact.
// - "Save As" appends `.md` to names chosen without an extension.

use crate::util::constants;
use crate::util::error::DocumentError;
use std::path::{Path, PathBuf};

/// Read a Markdown document.
pub fn load(path: &Path) -> Result<String, DocumentError> {
    let io_err = |operation, e| DocumentError::Io {
        path: path.to_path_buf(),
        operation,
        source: e,
    };

    let size = std::fs::metadata(path)
        .map_err(|e| io_err("metadata", e))?
        .len();
    if size > constants::MAX_DOCUMENT_BYTES {
        return Err(DocumentError::TooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_DOCUMENT_BYTES,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_err("read", e))?;
    let text = String::from_utf8(bytes).map_err(|e| DocumentError::InvalidEncoding {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), bytes = size, "Document opened");
    Ok(text)
}

/// Write `text` to `path` atomically.
pub fn save(path: &Path, text: &str) -> Result<(), DocumentError> {
    let io_err = |operation, e| DocumentError::Io {
        path: path.to_path_buf(),
        operation,
        source: e,
    };

    let tmp = temp_path(path);
    std::fs::write(&tmp, text.as_bytes()).map_err(|e| io_err("write", e))?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        io_err("rename", e)
    })?;

    tracing::info!(path = %path.display(), bytes = text.len(), "Document saved");
    Ok(())
}

/// Path "Save As" will actually write to: `.md` is added when the chosen
/// name has no extension.
pub fn normalise_save_path(path: &Path) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension(constants::MARKDOWN_EXTENSION)
    } else {
        path.to_path_buf()
    }
}

/// Sibling temp file used during atomic saves.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Display name of a document for window titles.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.md");
        save(&path, "- Plan\n  - Step").unwrap();
        assert_eq!(load(&path).unwrap(), "- Plan\n  - Step");
        assert!(!dir.path().join("plan.md.tmp").exists());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.md");
        save(&path, "old old old old").unwrap();
        save(&path, "new").unwrap();
        assert_eq!(load(&path).unwrap(), "new");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load(&dir.path().join("missing.md"));
        assert!(matches!(
            result,
            Err(DocumentError::Io {
                operation: "metadata",
                ..
            })
        ));
    }

    #[test]
    fn test_load_rejects_oversized_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.md");
        let f = std::fs::File::create(&path).unwrap();
        f.set_len(constants::MAX_DOCUMENT_BYTES + 1).unwrap();

        match load(&path) {
            Err(DocumentError::TooLarge { size, max_size, .. }) => {
                assert_eq!(size, constants::MAX_DOCUMENT_BYTES + 1);
                assert_eq!(max_size, constants::MAX_DOCUMENT_BYTES);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();
        assert!(matches!(
            load(&path),
            Err(DocumentError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_normalise_save_path() {
        assert_eq!(
            normalise_save_path(Path::new("/tmp/notes")),
            PathBuf::from("/tmp/notes.md")
        );
        assert_eq!(
            normalise_save_path(Path::new("/tmp/notes.txt")),
            PathBuf::from("/tmp/notes.txt")
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/a/b/plan.md")), "plan.md");
    }
}
