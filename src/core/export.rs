// MindMap - core/export.rs
//
// Serialisation of a mind map: Markdown list (the editor's canonical form),
// nested JSON, and flat CSV.
// Core layer: JSON/CSV write to any Write trait object.

use crate::core::model::{MindMap, NodeId};
use crate::util::constants;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

// =============================================================================
// Markdown list
// =============================================================================

/// Render the tree as an indented Markdown list.
///
/// Each node becomes `"  " * depth + "- " + text`; lines are joined with
/// `\n` and carry no trailing newline. A virtual root is not written: its
/// children start at depth 0. A map without a root renders as "".
pub fn to_markdown(map: &MindMap) -> String {
    let Some(root) = map.root_node() else {
        return String::new();
    };

    let mut lines = Vec::new();
    if root.is_virtual_root() {
        for &child in root.children() {
            push_markdown_lines(map, child, 0, &mut lines);
        }
    } else {
        push_markdown_lines(map, root.id(), 0, &mut lines);
    }
    lines.join("\n")
}

fn push_markdown_lines(map: &MindMap, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(node) = map.node(id) else {
        return;
    };
    lines.push(format!(
        "{}- {}",
        constants::EXPORT_INDENT.repeat(depth),
        node.text()
    ));
    for &child in node.children() {
        push_markdown_lines(map, child, depth + 1, lines);
    }
}

// =============================================================================
// JSON
// =============================================================================

/// Nested JSON shape of one node.
#[derive(Debug, Serialize)]
pub struct ExportNode {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    pub children: Vec<ExportNode>,
}

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub title: String,
    pub root: Option<ExportNode>,
}

fn export_node(map: &MindMap, id: NodeId) -> Option<ExportNode> {
    let node = map.node(id)?;
    Some(ExportNode {
        text: node.text().to_string(),
        font_size: node.font_size(),
        font_color: node.font_color().map(str::to_string),
        children: node
            .children()
            .iter()
            .filter_map(|&c| export_node(map, c))
            .collect(),
    })
}

/// Build the serialisable document for `map`.
pub fn to_export_document(map: &MindMap) -> ExportDocument {
    ExportDocument {
        title: map.title().to_string(),
        root: map.root().and_then(|r| export_node(map, r)),
    }
}

/// Export the tree as pretty-printed nested JSON. Returns the node count.
pub fn export_json<W: Write>(
    map: &MindMap,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, &to_export_document(map)).map_err(|e| {
        ExportError::Json {
            path: export_path.to_path_buf(),
            source: e,
        }
    })?;
    Ok(map.all_nodes().len())
}

// =============================================================================
// CSV
// =============================================================================

/// Export one row per node in pre-order.
///
/// Writes: id, parent_id, depth, text. Returns the number of rows written.
pub fn export_csv<W: Write>(
    map: &MindMap,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["id", "parent_id", "depth", "text"])
        .map_err(csv_err)?;

    let mut count = 0;
    for id in map.all_nodes() {
        let Some(node) = map.node(id) else {
            continue;
        };
        let id_text = id.to_string();
        let parent = node.parent().map(|p| p.to_string()).unwrap_or_default();
        let depth = map.depth(id).unwrap_or_default().to_string();
        csv_writer
            .write_record([id_text.as_str(), parent.as_str(), depth.as_str(), node.text()])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

// =============================================================================
// Format dispatch
// =============================================================================

/// Output formats offered by the File > Export menu and `mindmap convert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Indented Markdown list.
    List,
    Json,
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::List => constants::MARKDOWN_EXTENSION,
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::List => "Markdown list",
            Self::Json => "JSON",
            Self::Csv => "CSV",
        }
    }
}

/// Write `map` to `writer` in `format`. Returns the node count.
///
/// The Markdown list gets a trailing newline so the output is a
/// well-formed text file.
pub fn export<W: Write>(
    map: &MindMap,
    format: ExportFormat,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::List => {
            let mut text = to_markdown(map);
            if !text.is_empty() {
                text.push('\n');
            }
            writer
                .write_all(text.as_bytes())
                .and_then(|()| writer.flush())
                .map_err(|e| ExportError::Io {
                    path: export_path.to_path_buf(),
                    source: e,
                })?;
            Ok(map.all_nodes().len())
        }
        ExportFormat::Json => export_json(map, writer, export_path),
        ExportFormat::Csv => export_csv(map, writer, export_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_document;
    use std::path::PathBuf;

    fn build(texts: &[(&str, Option<usize>)]) -> MindMap {
        // (text, parent index) pairs; the first entry is the root.
        let mut map = MindMap::default();
        let mut ids = Vec::new();
        for (text, parent) in texts {
            let id = map.create_node(*text);
            if let Some(p) = parent {
                map.add_child(ids[*p], id).unwrap();
            }
            ids.push(id);
        }
        map.set_root(ids[0]).unwrap();
        map
    }

    #[test]
    fn test_markdown_empty_map() {
        assert_eq!(to_markdown(&MindMap::default()), "");
    }

    #[test]
    fn test_markdown_single_node() {
        assert_eq!(to_markdown(&build(&[("Root", None)])), "- Root");
    }

    #[test]
    fn test_markdown_nested_tree() {
        let map = build(&[
            ("Project plan", None),
            ("Phase 1: design", Some(0)),
            ("Phase 2: build", Some(0)),
            ("Requirements", Some(1)),
            ("UI design", Some(1)),
        ]);
        let expected = "- Project plan\n  - Phase 1: design\n    - Requirements\n    - UI design\n  - Phase 2: build";
        assert_eq!(to_markdown(&map), expected);
    }

    #[test]
    fn test_markdown_deep_nesting() {
        let map = build(&[
            ("Level 0", None),
            ("Level 1", Some(0)),
            ("Level 2", Some(1)),
            ("Level 3", Some(2)),
        ]);
        assert_eq!(
            to_markdown(&map),
            "- Level 0\n  - Level 1\n    - Level 2\n      - Level 3"
        );
    }

    #[test]
    fn test_markdown_virtual_root_writes_forest() {
        let map = build(&[
            (constants::VIRTUAL_ROOT_TEXT, None),
            ("First", Some(0)),
            ("Second", Some(0)),
            ("Nested", Some(2)),
        ]);
        assert_eq!(to_markdown(&map), "- First\n- Second\n  - Nested");
    }

    #[test]
    fn test_markdown_normalises_headings_into_list() {
        let map = parse_document("# Root\n## A\n### A1\n## B", "Untitled");
        assert_eq!(to_markdown(&map), "- Root\n  - A\n    - A1\n  - B");
    }

    #[test]
    fn test_json_export_nests_children() {
        let mut map = build(&[("Root", None), ("Child", Some(0))]);
        let child = map.node(map.root().unwrap()).unwrap().children()[0];
        map.node_mut(child)
            .unwrap()
            .set_font_color(Some("#FF0000".to_string()));

        let mut buf = Vec::new();
        let count = export_json(&map, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 2);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["root"]["text"], "Root");
        assert_eq!(value["root"]["children"][0]["text"], "Child");
        assert_eq!(value["root"]["children"][0]["font_color"], "#FF0000");
        assert!(value["root"].get("font_size").is_none());
    }

    #[test]
    fn test_csv_export_rows_in_preorder() {
        let map = build(&[("Root", None), ("A", Some(0)), ("B, with comma", Some(0))]);
        let mut buf = Vec::new();
        let count = export_csv(&map, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 3);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "id,parent_id,depth,text");
        assert!(lines[1].ends_with(",,0,Root"), "{}", lines[1]);
        assert!(lines[3].ends_with(",1,\"B, with comma\""), "{}", lines[3]);
    }

    #[test]
    fn test_list_export_ends_with_newline() {
        let map = build(&[("Root", None), ("A", Some(0))]);
        let mut buf = Vec::new();
        let count = export(&map, ExportFormat::List, &mut buf, &PathBuf::from("-")).unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(buf).unwrap(), "- Root\n  - A\n");

        let mut empty = Vec::new();
        export(&MindMap::default(), ExportFormat::List, &mut empty, &PathBuf::from("-")).unwrap();
        assert!(empty.is_empty());
    }
}
