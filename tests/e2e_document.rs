// MindMap - tests/e2e_document.rs
//
// End-to-end tests for the document pipeline and the session log.
//
// These tests exercise real fixture files on disk, real atomic saves in a
// temp directory, and the real session log append path. No mocks.

use mindmap::app::session;
use mindmap::app::session_log;
use mindmap::app::settings::Settings;
use mindmap::app::state::AppState;
use mindmap::core::export::{self, ExportFormat};
use mindmap::core::layout::compute_layout;
use mindmap::core::model::{MindMap, NodeId};
use mindmap::core::parser::parse_document;
use mindmap::platform::config::load_config;
use mindmap::util::constants;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> MindMap {
    let text = mindmap::app::document::load(&fixture(name)).expect("fixture should load");
    parse_document(&text, constants::DEFAULT_TITLE)
}

fn child_texts(map: &MindMap, id: NodeId) -> Vec<String> {
    map.node(id)
        .unwrap()
        .children()
        .iter()
        .map(|&c| map.node(c).unwrap().text().to_string())
        .collect()
}

// =============================================================================
// Parsing E2E
// =============================================================================

/// A list wins over headings in the same file; prose lines are ignored.
#[test]
fn e2e_list_fixture_builds_expected_tree() {
    let map = load_fixture("project_plan.md");
    assert_eq!(map.title(), "Project plan");

    let root = map.root().unwrap();
    assert_eq!(
        child_texts(&map, root),
        vec!["Phase 1: design", "Phase 2: build", "Testing"]
    );
    assert_eq!(map.all_nodes().len(), 7);
    assert!(!map.all_nodes().iter().any(|&id| map.node(id).unwrap().text() == "Notes"));
}

#[test]
fn e2e_heading_fixture_normalises_to_list() {
    let map = load_fixture("trip_headings.md");
    assert_eq!(map.title(), "Trip");
    assert_eq!(
        export::to_markdown(&map),
        "- Trip\n  - Packing\n    - Clothes\n    - Documents\n  - Route"
    );
}

#[test]
fn e2e_unicode_fixture_keeps_text_intact() {
    let map = load_fixture("unicode_outline.md");
    assert_eq!(map.title(), "プロジェクト計画");
    let root = map.root().unwrap();
    assert_eq!(child_texts(&map, root), vec!["フェーズ1", "フェーズ2"]);
}

/// Every node is laid out to the right of its parent.
#[test]
fn e2e_layout_places_children_right_of_parents() {
    let map = load_fixture("project_plan.md");
    let layout = compute_layout(&map, |node, _| (node.text().chars().count() as f32 * 8.0, 16.0));
    assert_eq!(layout.boxes.len(), map.all_nodes().len());
    for c in &layout.connectors {
        let parent = layout.box_for(c.parent).unwrap();
        let child = layout.box_for(c.child).unwrap();
        assert!(child.bounds.x > parent.bounds.right());
    }
}

// =============================================================================
// Editor round trip E2E
// =============================================================================

/// Open a copy of a fixture, drag a node, save, and reopen.
#[test]
fn e2e_reparent_save_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.md");
    fs::copy(fixture("project_plan.md"), &path).unwrap();

    let mut state = AppState::new(Settings::default(), false);
    state.open_file(&path).unwrap();

    let root = state.mindmap.root().unwrap();
    let children = state.mindmap.node(root).unwrap().children().to_vec();
    let (phase2, testing) = (children[1], children[2]);
    state.reparent(testing, phase2).unwrap();
    assert!(state.save().unwrap());

    let mut reopened = AppState::new(Settings::default(), false);
    reopened.open_file(&path).unwrap();
    assert_eq!(
        reopened.editor_text,
        "- Project plan\n  - Phase 1: design\n    - Requirements\n    - UI design\n  \
         - Phase 2: build\n    - Implementation\n    - Testing"
    );
    let root = reopened.mindmap.root().unwrap();
    assert_eq!(
        child_texts(&reopened.mindmap, root),
        vec!["Phase 1: design", "Phase 2: build"]
    );
}

#[test]
fn e2e_export_json_and_csv_files() {
    let dir = TempDir::new().unwrap();
    let mut state = AppState::new(Settings::default(), false);
    state.open_file(&fixture("trip_headings.md")).unwrap();

    let json_path = dir.path().join("trip.json");
    assert_eq!(state.export_to(&json_path, ExportFormat::Json).unwrap(), 5);
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["title"], "Trip");
    assert_eq!(value["root"]["children"][0]["children"][1]["text"], "Documents");

    let csv_path = dir.path().join("trip.csv");
    assert_eq!(state.export_to(&csv_path, ExportFormat::Csv).unwrap(), 5);
    let csv_text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_text.lines().count(), 6, "header plus five rows");
    assert!(csv_text.lines().last().unwrap().ends_with(",1,Route"));
}

// =============================================================================
// Session log E2E
// =============================================================================

#[test]
fn e2e_session_log_appends_in_call_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(constants::SESSION_LOG_FILE_NAME);

    let none: [&str; 0] = [];
    for args in [&none[..], &["first", "note"][..], &["second"][..]] {
        let message = session_log::message_from_args(args);
        session_log::append_now(&path, &message).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "# Session log");
    assert_eq!(lines[1], "# Format: [YYYY-MM-DD HH:MM:SS] message");

    let entry = Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\] (.*)$").unwrap();
    let messages: Vec<&str> = lines[2..]
        .iter()
        .map(|l| entry.captures(l).expect("entry format").get(1).unwrap().as_str())
        .collect();
    assert_eq!(messages, vec!["Session started", "first note", "second"]);
}

#[test]
fn e2e_session_log_never_rewrites_existing_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(constants::SESSION_LOG_FILE_NAME);
    session_log::append_now(&path, "one").unwrap();
    let before = fs::read_to_string(&path).unwrap();

    session_log::append_now(&path, "two").unwrap();
    let after = fs::read_to_string(&path).unwrap();
    assert!(after.starts_with(&before));
    assert_eq!(after.matches("# Session log").count(), 1);
}

// =============================================================================
// Config and session E2E
// =============================================================================

/// Config defaults flow into the state; session values override them.
#[test]
fn e2e_config_then_session_restore() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(constants::CONFIG_FILE_NAME),
        "[ui]\nfont_size = 18\ntheme = \"dark\"\n",
    )
    .unwrap();
    let (config, warnings) = load_config(dir.path());
    assert!(warnings.is_empty());

    let doc = dir.path().join("trip.md");
    fs::copy(fixture("trip_headings.md"), &doc).unwrap();

    let session_path = session::session_path(dir.path());
    let mut first = AppState::new(Settings::from_parts(config.font_size, None), false);
    first.session_path = Some(session_path.clone());
    assert_eq!(first.settings.font_size(), 18);
    first.open_file(&doc).unwrap();
    first.settings.set_font_size(24);
    first.save_session();

    let mut second = AppState::new(Settings::from_parts(config.font_size, None), false);
    second.restore_session(session::load(&session_path).unwrap());
    assert_eq!(second.settings.font_size(), 24);
    assert_eq!(second.window_title(), "MindMap - trip.md");
    assert_eq!(second.mindmap.title(), "Trip");
}
