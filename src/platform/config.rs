// MindMap - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for MindMap data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/mindmap/ or %APPDATA%\MindMap\config\)
    pub config_dir: PathBuf,

    /// Data directory for the session file.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
                data_dir: PathBuf::from("."),
            }
        }
    }

    /// Use `dir` for both config and data (the `--config-dir` override).
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            data_dir: dir.to_path_buf(),
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[session_log]` section.
    pub session_log: SessionLogSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Node font size in points.
    pub font_size: Option<u32>,
    /// Node font colour as `#RRGGBB`.
    pub font_color: Option<String>,
    /// Markdown editor font size in points.
    pub editor_font_size: Option<f32>,
}

/// `[session_log]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SessionLogSection {
    /// File name of the session log in the working directory.
    pub file_name: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Node font size in points.
    pub font_size: u32,
    /// Node font colour; `None` selects the depth palette.
    pub font_color: Option<String>,
    /// Markdown editor font size in points.
    pub editor_font_size: f32,

    // -- Session log --
    /// Session log file name.
    pub session_log_file: String,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: constants::DEFAULT_FONT_SIZE,
            font_color: None,
            editor_font_size: constants::DEFAULT_EDITOR_FONT_SIZE,
            session_log_file: constants::SESSION_LOG_FILE_NAME.to_string(),
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An
/// unparseable file yields defaults plus a warning; the application still
/// starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.clone(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.clone(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, field_warnings) = validate(raw);
    warnings.extend(field_warnings);
    (config, warnings)
}

/// Warning text for a rejected value.
fn rejected(field: &str, value: impl ToString, expected: impl ToString, fallback: &str) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    };
    format!("{err}. Using {fallback}.")
}

/// `#RRGGBB` with exactly six hex digits.
fn is_hex_colour(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Validate each field against named constants, accumulating all problems.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => warnings.push(rejected(
                "ui.theme",
                other,
                "\"dark\" or \"light\"",
                "light",
            )),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(rejected(
                "ui.font_size",
                size,
                format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
                &constants::DEFAULT_FONT_SIZE.to_string(),
            ));
        }
    }

    // -- UI: font_color --
    if let Some(colour) = raw.ui.font_color {
        if colour.is_empty() {
            // Explicitly empty: keep the depth palette.
        } else if is_hex_colour(&colour) {
            config.font_color = Some(colour);
        } else {
            warnings.push(rejected(
                "ui.font_color",
                colour,
                "#RRGGBB",
                "the depth palette",
            ));
        }
    }

    // -- UI: editor_font_size --
    if let Some(size) = raw.ui.editor_font_size {
        if (constants::MIN_EDITOR_FONT_SIZE..=constants::MAX_EDITOR_FONT_SIZE).contains(&size) {
            config.editor_font_size = size;
        } else {
            warnings.push(rejected(
                "ui.editor_font_size",
                size,
                format!(
                    "{}-{}",
                    constants::MIN_EDITOR_FONT_SIZE,
                    constants::MAX_EDITOR_FONT_SIZE
                ),
                &constants::DEFAULT_EDITOR_FONT_SIZE.to_string(),
            ));
        }
    }

    // -- Session log: file_name --
    if let Some(name) = raw.session_log.file_name {
        let is_plain_name = !name.is_empty()
            && Path::new(&name).file_name().map(|n| n == name.as_str()) == Some(true);
        if is_plain_name {
            config.session_log_file = name;
        } else {
            warnings.push(rejected(
                "session_log.file_name",
                name,
                "a plain file name",
                constants::SESSION_LOG_FILE_NAME,
            ));
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(rejected(
                "logging.level",
                level,
                valid.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    (config, warnings)
}
