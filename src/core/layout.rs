// MindMap - core/layout.rs
//
// Horizontal tree layout: the root on the left, children fanned out to the
// right, each subtree vertically centred on its parent.
//
// The layout is pure geometry in scene units (before zoom/pan). Text
// measurement is injected by the caller so the UI can use real font metrics
// while tests use a fixed-width stand-in.

use crate::core::model::{MindMap, Node, NodeId};
use crate::util::constants;

/// Axis-aligned rectangle in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn centre_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Grow by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Bounds {
        Bounds {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }
}

/// Placed node box.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub id: NodeId,
    /// Depth below the drawn top level (0 for roots and forest trees).
    pub depth: usize,
    pub bounds: Bounds,
}

/// Cubic Bezier connector from a parent's right edge to a child's left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub parent: NodeId,
    pub child: NodeId,
    /// start, control 1, control 2, end
    pub points: [(f32, f32); 4],
}

/// Result of laying out a mind map.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    /// Boxes in drawing order (pre-order); later boxes are on top.
    pub boxes: Vec<NodeBox>,
    pub connectors: Vec<Connector>,
    /// Bounding box of all nodes plus `SCENE_MARGIN`; `None` when empty.
    pub scene: Option<Bounds>,
}

impl TreeLayout {
    pub fn box_for(&self, id: NodeId) -> Option<&NodeBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// Topmost node whose box contains the point.
    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeId> {
        self.boxes
            .iter()
            .rev()
            .find(|b| b.bounds.contains(x, y))
            .map(|b| b.id)
    }

    /// Node under the point that `dragged` may be dropped onto.
    ///
    /// The dragged node and its own descendants are skipped: dropping onto
    /// them would detach the subtree from the tree.
    pub fn drop_target_at(
        &self,
        map: &MindMap,
        dragged: NodeId,
        x: f32,
        y: f32,
    ) -> Option<NodeId> {
        self.boxes
            .iter()
            .rev()
            .filter(|b| b.bounds.contains(x, y))
            .map(|b| b.id)
            .find(|&id| !map.is_descendant(dragged, id))
    }
}

/// Height a subtree claims in its parent's column.
///
/// Sum of the children's subtree heights, never less than one leaf. Sibling
/// spacing is deliberately not included here; it is only added when the
/// children are stacked.
pub fn subtree_height(map: &MindMap, id: NodeId) -> f32 {
    let Some(node) = map.node(id) else {
        return constants::LEAF_SUBTREE_HEIGHT;
    };
    if node.children().is_empty() {
        return constants::LEAF_SUBTREE_HEIGHT;
    }
    let total: f32 = node
        .children()
        .iter()
        .map(|&c| subtree_height(map, c))
        .sum();
    total.max(constants::LEAF_SUBTREE_HEIGHT)
}

/// Lay out the whole map.
///
/// `measure(node, depth)` returns the rendered `(width, height)` of a node's
/// text, honouring its font overrides; the box adds `UNDERLINE_ALLOWANCE` to the height.
pub fn compute_layout<F>(map: &MindMap, mut measure: F) -> TreeLayout
where
    F: FnMut(&Node, usize) -> (f32, f32),
{
    let mut layout = TreeLayout::default();
    let Some(root) = map.root_node() else {
        return layout;
    };

    if root.is_virtual_root() {
        let mut current_y = constants::FOREST_START_Y;
        for &child in root.children() {
            let height = subtree_height(map, child);
            place(
                map,
                child,
                constants::LAYOUT_START_X,
                current_y + height / 2.0,
                0,
                &mut measure,
                &mut layout,
            );
            current_y += height + constants::VERTICAL_SPACING;
        }
    } else {
        place(
            map,
            root.id(),
            constants::LAYOUT_START_X,
            constants::ROOT_START_Y,
            0,
            &mut measure,
            &mut layout,
        );
    }

    layout.connectors = connectors(map, &layout.boxes);
    layout.scene = layout
        .boxes
        .iter()
        .map(|b| b.bounds)
        .reduce(|acc, b| acc.union(&b))
        .map(|b| b.expand(constants::SCENE_MARGIN));
    layout
}

/// Place `id` with its left edge at `x`, vertically centred on `centre_y`,
/// then its children to the right.
fn place<F>(
    map: &MindMap,
    id: NodeId,
    x: f32,
    centre_y: f32,
    depth: usize,
    measure: &mut F,
    layout: &mut TreeLayout,
) where
    F: FnMut(&Node, usize) -> (f32, f32),
{
    let Some(node) = map.node(id) else {
        return;
    };
    let (text_w, text_h) = measure(node, depth);
    let height = text_h + constants::UNDERLINE_ALLOWANCE;
    let bounds = Bounds {
        x,
        y: centre_y - height / 2.0,
        width: text_w,
        height,
    };
    layout.boxes.push(NodeBox { id, depth, bounds });

    let children = node.children();
    if children.is_empty() {
        return;
    }

    let heights: Vec<f32> = children.iter().map(|&c| subtree_height(map, c)).collect();
    let total = heights.iter().sum::<f32>()
        + constants::VERTICAL_SPACING * (children.len() - 1) as f32;
    let child_x = bounds.right() + constants::HORIZONTAL_SPACING;

    let mut current_y = centre_y - total / 2.0;
    for (&child, &h) in children.iter().zip(&heights) {
        place(map, child, child_x, current_y + h / 2.0, depth + 1, measure, layout);
        current_y += h + constants::VERTICAL_SPACING;
    }
}

fn connectors(map: &MindMap, boxes: &[NodeBox]) -> Vec<Connector> {
    let mut out = Vec::new();
    for child_box in boxes {
        let Some(parent) = map.node(child_box.id).and_then(|n| n.parent()) else {
            continue;
        };
        // Parents that are not drawn (the virtual root) get no connector.
        let Some(parent_box) = boxes.iter().find(|b| b.id == parent) else {
            continue;
        };

        let start = (
            parent_box.bounds.right() + constants::CONNECTOR_GAP,
            parent_box.bounds.centre_y(),
        );
        let end = (
            child_box.bounds.x - constants::CONNECTOR_GAP,
            child_box.bounds.centre_y(),
        );
        let offset = (end.0 - start.0) * constants::CONNECTOR_CURVATURE;
        out.push(Connector {
            parent,
            child: child_box.id,
            points: [
                start,
                (start.0 + offset, start.1),
                (end.0 - offset, end.1),
                end,
            ],
        });
    }
    out
}

/// Write each box's top-left corner into the node positions.
pub fn apply_positions(map: &mut MindMap, layout: &TreeLayout) {
    for b in &layout.boxes {
        if let Some(node) = map.node_mut(b.id) {
            node.set_position(b.bounds.x.round() as i32, b.bounds.y.round() as i32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_document;

    /// 10 units per character, 20 units of text height.
    fn fixed(node: &Node, _depth: usize) -> (f32, f32) {
        (node.text().chars().count() as f32 * 10.0, 20.0)
    }

    fn layout_of(md: &str) -> (MindMap, TreeLayout) {
        let map = parse_document(md, "Untitled");
        let layout = compute_layout(&map, fixed);
        (map, layout)
    }

    fn bounds_of<'a>(map: &MindMap, layout: &'a TreeLayout, text: &str) -> &'a Bounds {
        let id = map
            .all_nodes()
            .into_iter()
            .find(|&id| map.node(id).unwrap().text() == text)
            .unwrap();
        &layout.box_for(id).unwrap().bounds
    }

    #[test]
    fn test_empty_map_has_empty_layout() {
        let layout = compute_layout(&MindMap::default(), fixed);
        assert!(layout.boxes.is_empty());
        assert!(layout.scene.is_none());
    }

    #[test]
    fn test_single_root_is_centred_at_start() {
        let (map, layout) = layout_of("- root");
        let b = bounds_of(&map, &layout, "root");
        assert_eq!(b.x, 100.0);
        assert_eq!(b.width, 40.0);
        assert_eq!(b.height, 24.0);
        assert_eq!(b.centre_y(), 300.0);
    }

    #[test]
    fn test_subtree_height_ignores_sibling_spacing() {
        let map = parse_document("- r\n  - a\n    - a1\n    - a2\n  - b", "Untitled");
        let root = map.root().unwrap();
        let a = map.node(root).unwrap().children()[0];
        assert_eq!(subtree_height(&map, a), 100.0);
        assert_eq!(subtree_height(&map, root), 150.0);
    }

    #[test]
    fn test_children_stack_to_the_right_with_spacing() {
        let (map, layout) = layout_of("- root\n  - a\n  - b");
        let root = bounds_of(&map, &layout, "root");
        let a = bounds_of(&map, &layout, "a");
        let b = bounds_of(&map, &layout, "b");

        assert_eq!(a.x, root.right() + 120.0);
        assert_eq!(b.x, a.x);
        // total = 50 + 50 + 40 = 140, stacked from 300 - 70 = 230
        assert_eq!(a.centre_y(), 255.0);
        assert_eq!(b.centre_y(), 345.0);
    }

    #[test]
    fn test_connector_geometry() {
        let (map, layout) = layout_of("- root\n  - a");
        let root = bounds_of(&map, &layout, "root");
        let a = bounds_of(&map, &layout, "a");
        assert_eq!(layout.connectors.len(), 1);

        let [start, c1, c2, end] = layout.connectors[0].points;
        assert_eq!(start, (root.right() + 5.0, root.centre_y()));
        assert_eq!(end, (a.x - 5.0, a.centre_y()));
        let offset = (end.0 - start.0) * 0.5;
        assert_eq!(c1, (start.0 + offset, start.1));
        assert_eq!(c2, (end.0 - offset, end.1));
    }

    #[test]
    fn test_virtual_root_lays_out_forest() {
        let mut map = MindMap::default();
        let virt = map.create_node(constants::VIRTUAL_ROOT_TEXT);
        let first = map.create_node("first");
        let second = map.create_node("second");
        map.add_child(virt, first).unwrap();
        map.add_child(virt, second).unwrap();
        map.set_root(virt).unwrap();

        let layout = compute_layout(&map, fixed);
        assert!(layout.box_for(virt).is_none(), "virtual root is not drawn");
        assert!(layout.connectors.is_empty());

        let f = layout.box_for(first).unwrap();
        let s = layout.box_for(second).unwrap();
        assert_eq!(f.bounds.x, 100.0);
        assert_eq!(f.bounds.centre_y(), 125.0);
        assert_eq!(s.bounds.centre_y(), 125.0 + 50.0 + 40.0);
        assert_eq!(f.depth, 0);
    }

    #[test]
    fn test_scene_includes_margin() {
        let (map, layout) = layout_of("- root");
        let b = bounds_of(&map, &layout, "root");
        let scene = layout.scene.unwrap();
        assert_eq!(scene.x, b.x - 100.0);
        assert_eq!(scene.width, b.width + 200.0);
    }

    #[test]
    fn test_hit_testing_and_drop_targets() {
        let (map, layout) = layout_of("- root\n  - a\n    - a1\n  - b");
        let root = map.root().unwrap();
        let a = map.node(root).unwrap().children()[0];
        let a1 = map.node(a).unwrap().children()[0];
        let b = map.node(root).unwrap().children()[1];

        let a1_box = layout.box_for(a1).unwrap().bounds;
        let (cx, cy) = (a1_box.x + 1.0, a1_box.centre_y());
        assert_eq!(layout.node_at(cx, cy), Some(a1));
        assert_eq!(layout.node_at(-500.0, -500.0), None);

        // a1 is inside a's subtree, so it is not a valid target for a.
        assert_eq!(layout.drop_target_at(&map, a, cx, cy), None);
        assert_eq!(layout.drop_target_at(&map, b, cx, cy), Some(a1));
    }

    #[test]
    fn test_apply_positions_writes_top_left() {
        let mut map = parse_document("- root", "Untitled");
        let layout = compute_layout(&map, fixed);
        apply_positions(&mut map, &layout);
        let root = map.root_node().unwrap();
        assert_eq!(root.position(), (100, 288));
    }
}
