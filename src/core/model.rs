// MindMap - core/model.rs
//
// Core data model: nodes and the mind map that owns them.
// Pure data definitions with no I/O, no UI, no platform dependencies.
//
// Nodes live in an arena keyed by `NodeId`. Parent/child links are stored
// as ids on both sides and are only changed through `MindMap` methods, so
// `child.parent == Some(p)` holds exactly when `p.children` contains `child`.

use crate::util::constants;
use crate::util::error::TreeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Node identity
// =============================================================================

/// Unique identifier of a node within its mind map.
///
/// Ids are never reused, not even after `MindMap::clear`, so a stale id held
/// by the UI can never alias a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw id value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

// =============================================================================
// Node
// =============================================================================

/// A single node of the mind map.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: (i32, i32),
    font_size: Option<u32>,
    font_color: Option<String>,
}

impl Node {
    fn new(id: NodeId, text: String) -> Self {
        Self {
            id,
            text,
            parent: None,
            children: Vec::new(),
            position: (0, 0),
            font_size: None,
            font_color: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Last position written by the layout pass, `(0, 0)` until then.
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }

    /// Per-node font size override (points).
    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: Option<u32>) {
        self.font_size = size;
    }

    /// Per-node font colour override as `#RRGGBB`.
    pub fn font_color(&self) -> Option<&str> {
        self.font_color.as_deref()
    }

    pub fn set_font_color(&mut self, colour: Option<String>) {
        self.font_color = colour;
    }

    /// True when this node is the synthetic root of a forest.
    pub fn is_virtual_root(&self) -> bool {
        self.text == constants::VIRTUAL_ROOT_TEXT
    }
}

// =============================================================================
// MindMap
// =============================================================================

/// A whole mind map: a title, an arena of nodes, and an optional root.
///
/// Nodes can exist detached from the root (freshly created, or removed from
/// their parent). Only nodes reachable from the root are part of the map as
/// far as `all_nodes` and `find_node` are concerned.
#[derive(Debug, Clone)]
pub struct MindMap {
    title: String,
    root: Option<NodeId>,
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new(constants::DEFAULT_TITLE)
    }
}

impl MindMap {
    /// Create an empty mind map with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            root: None,
            nodes: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The root node itself, if any.
    pub fn root_node(&self) -> Option<&Node> {
        self.root.and_then(|id| self.nodes.get(&id))
    }

    /// Make `id` the root. The previous root's subtree stays in the arena
    /// but is no longer reachable.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.ensure_exists(id)?;
        self.root = Some(id);
        Ok(())
    }

    /// Create a detached node and return its id.
    pub fn create_node(&mut self, text: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, text.into()));
        id
    }

    /// Create a detached node carrying font overrides.
    pub fn create_styled_node(
        &mut self,
        text: impl Into<String>,
        font_size: Option<u32>,
        font_color: Option<String>,
    ) -> NodeId {
        let id = self.create_node(text);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.font_size = font_size;
            node.font_color = font_color;
        }
        id
    }

    /// Look up any node in the arena, attached or not.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable access for text, position, and font edits.
    ///
    /// Structural links cannot be changed through this reference.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is detached from it first, so
    /// re-adding a child to its current parent moves it to the end.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.ensure_exists(parent)?;
        self.ensure_exists(child)?;
        if self.is_descendant(child, parent) {
            return Err(TreeError::WouldCreateCycle {
                parent: parent.raw(),
                child: child.raw(),
            });
        }

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old) = self.nodes.get_mut(&old_parent) {
                old.children.retain(|&c| c != child);
            }
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// Returns false, changing nothing, when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(p) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let Some(pos) = p.children.iter().position(|&c| c == child) else {
            return false;
        };
        p.children.remove(pos);
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = None;
        }
        true
    }

    /// Move `node` under `new_parent` (drag-and-drop).
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        self.add_child(new_parent, node)?;
        tracing::debug!(node = %node, parent = %new_parent, "Node reparented");
        Ok(())
    }

    /// True when `node` is `ancestor` or lies in its subtree.
    pub fn is_descendant(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Number of edges between `id` and the top of its tree.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.nodes.get(&id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// All nodes reachable from the root in depth-first pre-order.
    pub fn all_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Find a node reachable from the root.
    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        if self.all_nodes().contains(&id) {
            self.nodes.get(&id)
        } else {
            None
        }
    }

    /// Remove every node. The title is kept.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    fn ensure_exists(&self, id: NodeId) -> Result<(), TreeError> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(TreeError::NodeNotFound { id: id.raw() })
        }
    }
}

// =============================================================================
// Colours
// =============================================================================

/// Parse a `#RRGGBB` colour string into its RGB components.
pub fn parse_hex_colour(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    // from_str_radix alone would accept a sign, e.g. "+1".
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Format RGB components as an uppercase `#RRGGBB` string.
pub fn format_hex_colour(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}
