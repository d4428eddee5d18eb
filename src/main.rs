// MindMap - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. The `log` and `convert` subcommands
// 4. eframe GUI launch (no subcommand)

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use mindmap::app;

pub use mindmap::core;
pub use mindmap::platform;
pub use mindmap::ui;
pub use mindmap::util;

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};

/// CJK-capable system fonts to try, in priority order.
#[cfg(target_os = "windows")]
fn cjk_font_candidates() -> &'static [(&'static str, &'static str)] {
    &[
        ("Yu Gothic", r"C:\Windows\Fonts\YuGothM.ttc"),
        ("Meiryo", r"C:\Windows\Fonts\meiryo.ttc"),
    ]
}

#[cfg(target_os = "macos")]
fn cjk_font_candidates() -> &'static [(&'static str, &'static str)] {
    &[
        ("Hiragino Sans", "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc"),
        ("Arial Unicode", "/Library/Fonts/Arial Unicode.ttf"),
    ]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn cjk_font_candidates() -> &'static [(&'static str, &'static str)] {
    &[
        ("Noto Sans CJK", "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
        ("Noto Sans CJK", "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc"),
        ("Droid Sans Fallback", "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf"),
    ]
}

/// Configure fonts for the egui context.
///
/// The egui built-in fonts have no CJK glyphs, so node text in Japanese or
/// Chinese would render as squares. The first CJK-capable system font found
/// is appended to both families as a fallback; the built-ins keep priority
/// for Latin text and monospace column alignment.
fn configure_fonts(ctx: &egui::Context) {
    for (name, path) in cjk_font_candidates() {
        match std::fs::read(path) {
            Ok(data) => {
                let mut fonts = egui::FontDefinitions::default();
                fonts
                    .font_data
                    .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    if let Some(list) = fonts.families.get_mut(&family) {
                        list.push((*name).to_owned());
                    }
                }
                ctx.set_fonts(fonts);
                tracing::info!(font = name, "CJK fallback font configured");
                return;
            }
            Err(e) => {
                tracing::debug!(font = name, path = %path, error = %e, "Fallback font not available");
            }
        }
    }
    tracing::warn!("No CJK-capable system font found; such text may render as squares");
}

/// MindMap - Markdown outlines as mind maps.
///
/// With no subcommand, opens the two-pane editor: Markdown on the left, the
/// generated mind map on the right.
#[derive(Parser, Debug)]
#[command(name = "mindmap", version, about)]
struct Cli {
    /// Markdown file to open in the editor.
    file: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Directory holding config.toml and session.json (overrides the platform default).
    #[arg(short = 'c', long = "config-dir", global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a timestamped note to the session log.
    Log {
        /// Log file (default: claude.log in the current directory).
        #[arg(short = 'f', long = "file")]
        file: Option<PathBuf>,

        /// Message words; joined with spaces. Defaults to "Session started".
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },

    /// Parse a Markdown outline and export the resulting tree.
    Convert {
        /// Markdown file to convert.
        file: PathBuf,

        /// Output format.
        #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::List)]
        format: Format,

        /// Output file (default: stdout).
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Normalised Markdown list.
    List,
    Json,
    Csv,
}

impl From<Format> for crate::core::export::ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::List => Self::List,
            Format::Json => Self::Json,
            Format::Csv => Self::Csv,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Config first: it may set the log level and file.
    let platform_paths = match cli.config_dir.as_deref() {
        Some(dir) => platform::config::PlatformPaths::from_dir(dir),
        None => platform::config::PlatformPaths::resolve(),
    };
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );
    for w in &config_warnings {
        tracing::warn!(warning = %w, "Configuration warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "MindMap starting"
    );

    let result = match cli.command {
        Some(Command::Log { file, message }) => run_log(file, &message, &config),
        Some(Command::Convert {
            file,
            format,
            output,
        }) => run_convert(&file, format.into(), output.as_deref()),
        None => {
            run_gui(cli.file, cli.debug, config, config_warnings, &platform_paths);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `mindmap log`: append one line and echo it.
fn run_log(
    file: Option<PathBuf>,
    message: &[String],
    config: &platform::config::AppConfig,
) -> util::error::Result<()> {
    let path = file.unwrap_or_else(|| platform::fs::session_log_path(&config.session_log_file));
    let message = app::session_log::message_from_args(message);
    let line = app::session_log::append_now(&path, &message)?;
    println!("{line}");
    Ok(())
}

/// `mindmap convert`: parse a document and export it.
fn run_convert(
    file: &Path,
    format: crate::core::export::ExportFormat,
    output: Option<&Path>,
) -> util::error::Result<()> {
    let text = app::document::load(file)?;
    let default_title = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| util::constants::DEFAULT_TITLE.to_string());
    let map = crate::core::parser::parse_document(&text, &default_title);

    let count = match output {
        Some(out) => {
            let f = std::fs::File::create(out).map_err(|e| util::error::ExportError::Io {
                path: out.to_path_buf(),
                source: e,
            })?;
            crate::core::export::export(&map, format, std::io::BufWriter::new(f), out)?
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            let count = crate::core::export::export(&map, format, &mut lock, Path::new("<stdout>"))?;
            lock.flush().map_err(|e| util::error::ExportError::Io {
                path: PathBuf::from("<stdout>"),
                source: e,
            })?;
            count
        }
    };

    tracing::info!(
        input = %file.display(),
        format = format.label(),
        nodes = count,
        "Document converted"
    );
    Ok(())
}

fn run_gui(
    file: Option<PathBuf>,
    debug: bool,
    config: platform::config::AppConfig,
    config_warnings: Vec<String>,
    platform_paths: &platform::config::PlatformPaths,
) {
    let settings = app::settings::Settings::from_parts(config.font_size, config.font_color);
    let mut state = app::state::AppState::new(settings, debug);
    state.dark_mode = config.dark_mode;
    state.editor_font_size = config.editor_font_size;
    state.warnings = config_warnings;

    let session_path = app::session::session_path(&platform_paths.data_dir);
    if let Some(data) = app::session::load(&session_path) {
        // A file named on the command line replaces the remembered one.
        let mut data = data;
        if file.is_some() {
            data.current_file = None;
        }
        state.restore_session(data);
    }
    state.session_path = Some(session_path);

    if let Some(ref path) = file {
        if let Err(e) = state.open_file(path) {
            tracing::warn!(error = %e, "Could not open file from command line");
            state.warnings.push(e.to_string());
        }
    }

    tracing::info!("Ready to launch GUI");

    let dark_mode = state.dark_mode;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(state.window_title())
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(gui::MindMapApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch MindMap GUI: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_log_is_subcommand_not_file() {
        let cli = parse(&["mindmap", "log"]);
        assert_eq!(cli.file, None);
        match cli.command {
            Some(Command::Log { file, message }) => {
                assert_eq!(file, None);
                assert!(message.is_empty());
            }
            other => panic!("expected log subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_log_keeps_hyphenated_words_as_message() {
        let cli = parse(&["mindmap", "log", "a", "-x"]);
        match cli.command {
            Some(Command::Log { message, .. }) => assert_eq!(message, vec!["a", "-x"]),
            other => panic!("expected log subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_log_file_option() {
        let cli = parse(&["mindmap", "log", "--file", "notes.log", "fixed", "parser"]);
        match cli.command {
            Some(Command::Log { file, message }) => {
                assert_eq!(file, Some(PathBuf::from("notes.log")));
                assert_eq!(message, vec!["fixed", "parser"]);
            }
            other => panic!("expected log subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_positional_file_opens_editor() {
        let cli = parse(&["mindmap", "plan.md"]);
        assert_eq!(cli.file, Some(PathBuf::from("plan.md")));
        assert!(cli.command.is_none());

        let cli = parse(&["mindmap", "./log"]);
        assert_eq!(cli.file, Some(PathBuf::from("./log")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_convert_arguments() {
        let cli = parse(&["mindmap", "convert", "plan.md", "-f", "csv", "-o", "plan.csv"]);
        match cli.command {
            Some(Command::Convert {
                file,
                format,
                output,
            }) => {
                assert_eq!(file, PathBuf::from("plan.md"));
                assert!(matches!(format, Format::Csv));
                assert_eq!(output, Some(PathBuf::from("plan.csv")));
            }
            other => panic!("expected convert subcommand, got {other:?}"),
        }
        assert!(Cli::try_parse_from(["mindmap", "convert", "plan.md", "-f", "xml"]).is_err());
    }

    #[test]
    fn test_run_log_writes_default_then_joined_message() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.log");
        let config = platform::config::AppConfig::default();

        run_log(Some(path.clone()), &[], &config).unwrap();
        let words = vec!["two".to_string(), "words".to_string()];
        run_log(Some(path.clone()), &words, &config).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].ends_with("] Session started"), "{}", lines[2]);
        assert!(lines[3].ends_with("] two words"), "{}", lines[3]);
    }
}
