// MindMap - core/parser.rs
//
// Markdown outline parsing into a node tree.
//
// Two outline notations are understood:
//   - list notation:    `- item` / `* item`, nested by indentation
//   - heading notation: `# title` .. `###### title`
// List notation takes priority: headings are only consulted when the text
// contains no list item at all. Every other line is ignored.

use crate::core::model::{MindMap, NodeId};
use crate::util::constants;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Which outline syntax produced a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    List,
    Headings,
}

impl Notation {
    pub fn label(&self) -> &'static str {
        match self {
            Notation::List => "list",
            Notation::Headings => "heading",
        }
    }
}

/// One outline line reduced to its nesting level and trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    pub level: usize,
    pub text: String,
}

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| {
        let pattern = format!(r"^(#{{1,{}}})\s+(.+)$", constants::MAX_HEADING_LEVEL);
        Regex::new(&pattern).expect("heading_regex: invalid regex")
    })
}

fn list_regex() -> &'static Regex {
    static LIST: OnceLock<Regex> = OnceLock::new();
    LIST.get_or_init(|| Regex::new(r"^(\s*)[-*]\s+(.+)$").expect("list_regex: invalid regex"))
}

/// Extract `- item` / `* item` lines with their indentation level.
///
/// Level = indent columns / `LIST_INDENT_WIDTH`, with tabs counting as
/// `TAB_WIDTH` columns.
pub fn extract_list_items(text: &str) -> Vec<OutlineItem> {
    let re = list_regex();
    text.split('\n')
        .filter_map(|line| {
            let caps = re.captures(line)?;
            let columns: usize = caps[1]
                .chars()
                .map(|c| if c == '\t' { constants::TAB_WIDTH } else { 1 })
                .sum();
            Some(OutlineItem {
                level: columns / constants::LIST_INDENT_WIDTH,
                text: caps[2].trim().to_string(),
            })
        })
        .collect()
}

/// Extract `#`-style headings with their level (number of `#`).
pub fn extract_headings(text: &str) -> Vec<OutlineItem> {
    let re = heading_regex();
    text.split('\n')
        .filter_map(|line| {
            let caps = re.captures(line)?;
            Some(OutlineItem {
                level: caps[1].len(),
                text: caps[2].trim().to_string(),
            })
        })
        .collect()
}

/// Decide which notation `text` would be parsed with, if any.
pub fn detect_notation(text: &str) -> Option<Notation> {
    if text.trim().is_empty() {
        return None;
    }
    if !extract_list_items(text).is_empty() {
        Some(Notation::List)
    } else if !extract_headings(text).is_empty() {
        Some(Notation::Headings)
    } else {
        None
    }
}

/// Build a tree from outline items inside `map` and return its root.
///
/// The first item is the root. Each later item attaches to the most recent
/// node at the deepest level strictly shallower than its own, or to the root
/// when no such node is tracked. The nodes are created detached; the caller
/// decides whether to make the returned id the map root.
pub fn build_tree(map: &mut MindMap, items: &[OutlineItem]) -> Option<NodeId> {
    let (first, rest) = items.split_first()?;
    let root = map.create_node(first.text.clone());

    // level -> most recent node at that level
    let mut level_stack: BTreeMap<usize, NodeId> = BTreeMap::new();
    level_stack.insert(first.level, root);

    for item in rest {
        let node = map.create_node(item.text.clone());
        let parent = level_stack
            .range(..item.level)
            .next_back()
            .map(|(_, &id)| id)
            .unwrap_or(root);

        // Fresh nodes cannot form a cycle, so this only fails on a logic bug.
        if let Err(e) = map.add_child(parent, node) {
            tracing::error!(error = %e, "Outline attach failed");
            continue;
        }

        level_stack.retain(|&level, _| level < item.level);
        level_stack.insert(item.level, node);
    }

    Some(root)
}

/// Parse Markdown into `map` and return the root of the new tree.
///
/// Returns `None` for blank text or text with no list items and no headings.
/// Existing nodes in `map` are left untouched.
pub fn parse_into(map: &mut MindMap, text: &str) -> Option<NodeId> {
    let notation = detect_notation(text)?;
    let items = match notation {
        Notation::List => extract_list_items(text),
        Notation::Headings => extract_headings(text),
    };
    let root = build_tree(map, &items);
    tracing::debug!(
        notation = notation.label(),
        items = items.len(),
        "Markdown outline parsed"
    );
    root
}

/// Parse Markdown into a fresh mind map.
///
/// The map title is the root text, or `default_title` when nothing parsed.
pub fn parse_document(text: &str, default_title: &str) -> MindMap {
    let mut map = MindMap::new(default_title);
    if let Some(root) = parse_into(&mut map, text) {
        if map.set_root(root).is_ok() {
            let title = map.root_node().map(|n| n.text().to_string());
            if let Some(title) = title {
                map.set_title(title);
            }
        }
    }
    map
}
