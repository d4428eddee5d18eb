// MindMap - app/session_log.rs
//
// Append-only session log: one `[YYYY-MM-DD HH:MM:SS] message` line per
// call, with a fixed two-line header written when the file is created.
//
// Each entry is written with a single write on an O_APPEND handle so a
// line is never interleaved with another writer's line on local filesystems.
// Existing content is never rewritten or truncated.

use crate::util::constants;
use crate::util::error::SessionLogError;
use chrono::NaiveDateTime;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Message to log for the given CLI arguments.
///
/// Arguments are joined with single spaces; no arguments yields the default
/// marker.
pub fn message_from_args<S: AsRef<str>>(args: &[S]) -> String {
    if args.is_empty() {
        constants::DEFAULT_SESSION_MESSAGE.to_string()
    } else {
        args.iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Format one log line, including the trailing newline.
pub fn format_entry(timestamp: NaiveDateTime, message: &str) -> String {
    format!(
        "[{}] {message}\n",
        timestamp.format(constants::SESSION_TIMESTAMP_FORMAT)
    )
}

/// The header written to a newly created log file.
pub fn header() -> String {
    let mut out = String::new();
    for line in constants::SESSION_LOG_HEADER {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Append `message` stamped with `timestamp` to the log at `path`.
///
/// Creates the file with the header when it does not exist yet. Returns the
/// line that was written (without the trailing newline).
pub fn append(
    path: &Path,
    message: &str,
    timestamp: NaiveDateTime,
) -> Result<String, SessionLogError> {
    // create_new makes "create with header" race-free: only the process that
    // actually creates the file writes the header.
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(header().as_bytes())
                .map_err(|e| SessionLogError::Write {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            tracing::debug!(path = %path.display(), "Session log created");
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
        Err(e) => {
            return Err(SessionLogError::Open {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| SessionLogError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

    let entry = format_entry(timestamp, message);
    file.write_all(entry.as_bytes())
        .map_err(|e| SessionLogError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(path = %path.display(), "Session log entry appended");
    Ok(entry.trim_end_matches('\n').to_string())
}

/// Append using the current local time.
pub fn append_now(path: &Path, message: &str) -> Result<String, SessionLogError> {
    append(path, message, chrono::Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_message_from_args() {
        let none: [&str; 0] = [];
        assert_eq!(message_from_args(&none), "Session started");
        assert_eq!(
            message_from_args(&["fixed", "the", "parser"]),
            "fixed the parser"
        );
        // Arguments are kept verbatim, including inner whitespace.
        assert_eq!(message_from_args(&["a  b", "c"]), "a  b c");
    }

    #[test]
    fn test_format_entry_zero_pads_timestamp() {
        assert_eq!(
            format_entry(at(7, 5, 3), "hello"),
            "[2025-03-09 07:05:03] hello\n"
        );
    }

    #[test]
    fn test_first_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claude.log");

        append(&path, "one", at(9, 0, 0)).unwrap();
        append(&path, "two", at(9, 0, 1)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# Session log\n# Format: [YYYY-MM-DD HH:MM:SS] message\n\
             [2025-03-09 09:00:00] one\n\
             [2025-03-09 09:00:01] two\n"
        );
    }

    #[test]
    fn test_existing_file_is_only_appended_to() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claude.log");
        std::fs::write(&path, "pre-existing line without newline").unwrap();

        let written = append(&path, "note", at(12, 30, 0)).unwrap();
        assert_eq!(written, "[2025-03-09 12:30:00] note");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("pre-existing line without newline"));
        assert!(!content.contains("# Session log"), "no header for existing file");
        assert!(content.ends_with("[2025-03-09 12:30:00] note\n"));
    }

    #[test]
    fn test_missing_directory_is_an_open_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("claude.log");
        let result = append(&path, "x", at(0, 0, 0));
        assert!(matches!(result, Err(SessionLogError::Open { .. })));
    }
}
