// MindMap - platform/fs.rs
//
// Small filesystem helpers that depend on the host platform.

use std::path::{Path, PathBuf};

/// Resolve the session log path: `file_name` in the current working directory.
///
/// Falls back to a relative path when the working directory cannot be read
/// (e.g. it was deleted underneath the process).
pub fn session_log_path(file_name: &str) -> PathBuf {
    match std::env::current_dir() {
        Ok(dir) => dir.join(file_name),
        Err(e) => {
            tracing::warn!(error = %e, "Cannot resolve current directory; using relative path");
            PathBuf::from(file_name)
        }
    }
}

/// Directory used by file dialogs: the current document's folder if known.
pub fn dialog_directory(current_file: Option<&Path>) -> Option<PathBuf> {
    current_file
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_log_path_is_in_current_dir() {
        let path = session_log_path("claude.log");
        assert_eq!(path.file_name().unwrap(), "claude.log");
        assert_eq!(path.parent(), std::env::current_dir().ok().as_deref());
    }

    #[test]
    fn test_dialog_directory() {
        assert_eq!(
            dialog_directory(Some(Path::new("/docs/plan.md"))),
            Some(PathBuf::from("/docs"))
        );
        assert_eq!(dialog_directory(Some(Path::new("plan.md"))), None);
        assert_eq!(dialog_directory(None), None);
    }
}
