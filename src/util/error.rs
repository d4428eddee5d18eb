// MindMap - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error keeps its cause available through `source()` for logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all MindMap operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum MindMapError {
    /// A tree edit violated the mind-map invariants.
    Tree(TreeError),

    /// Opening or saving a Markdown document failed.
    Document(DocumentError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Persisting the editor session failed.
    Session(SessionError),

    /// Appending to the session log failed.
    SessionLog(SessionLogError),
}

impl fmt::Display for MindMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(e) => write!(f, "Tree error: {e}"),
            Self::Document(e) => write!(f, "Document error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Session(e) => write!(f, "Session error: {e}"),
            Self::SessionLog(e) => write!(f, "Session log error: {e}"),
        }
    }
}

impl std::error::Error for MindMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tree(e) => Some(e),
            Self::Document(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Session(e) => Some(e),
            Self::SessionLog(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tree errors
// ---------------------------------------------------------------------------

/// Errors raised by structural edits of the node tree.
///
/// Node ids are carried as raw values (`NodeId::raw`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The referenced node does not exist in this mind map.
    NodeNotFound { id: u64 },

    /// Attaching `child` under `parent` would make a node its own ancestor.
    WouldCreateCycle { parent: u64, child: u64 },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { id } => write!(f, "node-{id} does not exist"),
            Self::WouldCreateCycle { parent, child } => write!(
                f,
                "cannot attach node-{child} under node-{parent}: node-{parent} is node-{child} or one of its descendants"
            ),
        }
    }
}

impl std::error::Error for TreeError {}

impl From<TreeError> for MindMapError {
    fn from(e: TreeError) -> Self {
        Self::Tree(e)
    }
}

// ---------------------------------------------------------------------------
// Document errors
// ---------------------------------------------------------------------------

/// Errors related to opening and saving Markdown documents.
#[derive(Debug)]
pub enum DocumentError {
    /// Document exceeds the maximum size accepted by "Open".
    TooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File content is not valid UTF-8.
    InvalidEncoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// I/O error reading or writing the document.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::InvalidEncoding { path, source } => {
                write!(f, "'{}': invalid UTF-8 encoding: {source}", path.display())
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DocumentError> for MindMapError {
    fn from(e: DocumentError) -> Self {
        Self::Document(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for MindMapError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MindMapError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

/// Errors raised while saving `session.json`.
#[derive(Debug)]
pub enum SessionError {
    /// The session directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// The snapshot could not be serialised.
    Serialize(serde_json::Error),

    /// Writing the temp file or renaming it into place failed.
    Write {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "cannot create session directory '{}': {source}",
                path.display()
            ),
            Self::Serialize(e) => write!(f, "failed to serialise session: {e}"),
            Self::Write {
                path,
                operation,
                source,
            } => write!(f, "{operation} failed for '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Serialize(e) => Some(e),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<SessionError> for MindMapError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

// ---------------------------------------------------------------------------
// Session log errors
// ---------------------------------------------------------------------------

/// Errors related to appending to the session log file.
#[derive(Debug)]
pub enum SessionLogError {
    /// The log file could not be opened or created.
    Open { path: PathBuf, source: io::Error },

    /// Writing the header or an entry failed.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for SessionLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open '{}': {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot append to '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SessionLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<SessionLogError> for MindMapError {
    fn from(e: SessionLogError) -> Self {
        Self::SessionLog(e)
    }
}

/// Convenience type alias for MindMap results.
pub type Result<T> = std::result::Result<T, MindMapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_tree_error_message_names_both_nodes() {
        let e = TreeError::WouldCreateCycle {
            parent: 3,
            child: 1,
        };
        let msg = e.to_string();
        assert!(msg.contains("node-3"), "{msg}");
        assert!(msg.contains("node-1"), "{msg}");
    }

    #[test]
    fn test_top_level_error_preserves_source_chain() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: MindMapError = SessionLogError::Open {
            path: PathBuf::from("claude.log"),
            source: io,
        }
        .into();

        assert!(err.to_string().starts_with("Session log error:"));
        let inner = err.source().expect("top-level error must expose its cause");
        assert!(inner.source().is_some(), "io::Error must remain in the chain");
    }
}
