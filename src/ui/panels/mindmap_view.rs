// MindMap - ui/panels/mindmap_view.rs
//
// Mind-map canvas (central panel).
//
// The tree is laid out in scene units every frame with real font metrics,
// then drawn through a zoom/pan transform:
//   screen = rect.min + pan + scene * zoom
//
// Input:
//   wheel                 zoom one step per notch (or per ZOOM_SCROLL_PIXELS of
//                         trackpad scroll), anchored at the pointer
//   middle/right drag     pan
//   left drag on a node   reparent onto the node under the pointer

use crate::app::state::{AppState, NodeDrag};
use crate::core::layout::{self, TreeLayout};
use crate::ui::theme;
use egui::{epaint::CubicBezierShape, Color32, FontId, PointerButton, Pos2, Sense, Stroke, Vec2};

/// Scene <-> screen mapping for one frame.
#[derive(Debug, Clone, Copy)]
struct Transform {
    origin: Pos2,
    zoom: f32,
}

impl Transform {
    fn to_screen(self, (x, y): (f32, f32)) -> Pos2 {
        self.origin + Vec2::new(x, y) * self.zoom
    }

    fn to_scene(self, p: Pos2) -> (f32, f32) {
        let v = (p - self.origin) / self.zoom;
        (v.x, v.y)
    }
}

/// Render the canvas filling the available space.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, theme::canvas_bg(state.dark_mode));

    let tree_layout = measure_and_layout(ui, state);
    layout::apply_positions(&mut state.mindmap, &tree_layout);

    handle_zoom(ui, &response, state, rect.min);
    handle_pan(&response, state);

    let transform = Transform {
        origin: rect.min + Vec2::new(state.pan.0, state.pan.1),
        zoom: state.zoom(),
    };
    handle_node_drag(&response, state, &tree_layout, transform);

    if tree_layout.boxes.is_empty() {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Type an outline in the editor to see the mind map.",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    draw(&painter, state, &tree_layout, transform);
}

/// Lay out the current map using the UI's font metrics.
fn measure_and_layout(ui: &egui::Ui, state: &AppState) -> TreeLayout {
    let settings = &state.settings;
    ui.fonts(|fonts| {
        layout::compute_layout(&state.mindmap, |node, _depth| {
            let size = settings.node_font_size(node) as f32;
            let galley = fonts.layout_no_wrap(
                node.text().to_string(),
                FontId::proportional(size),
                Color32::PLACEHOLDER,
            );
            (galley.size().x, galley.size().y)
        })
    })
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, state: &mut AppState, canvas_min: Pos2) {
    let Some(pointer) = response.hover_pos() else {
        return;
    };
    let wheel: Vec<(f32, bool)> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::MouseWheel { unit, delta, .. } => {
                    Some((delta.y, !matches!(unit, egui::MouseWheelUnit::Point)))
                }
                _ => None,
            })
            .collect()
    });
    if wheel.is_empty() {
        return;
    }

    let before = Transform {
        origin: canvas_min + Vec2::new(state.pan.0, state.pan.1),
        zoom: state.zoom(),
    };
    let anchor = before.to_scene(pointer);
    let mut changed = false;
    for (delta, per_notch) in wheel {
        changed |= state.wheel_zoom(delta, per_notch);
    }
    if changed {
        // Keep the scene point under the pointer fixed.
        let zoom = state.zoom();
        state.pan = (
            pointer.x - canvas_min.x - anchor.0 * zoom,
            pointer.y - canvas_min.y - anchor.1 * zoom,
        );
        tracing::trace!(zoom, "Canvas zoomed");
    }
}

fn handle_pan(response: &egui::Response, state: &mut AppState) {
    if response.dragged_by(PointerButton::Middle) || response.dragged_by(PointerButton::Secondary)
    {
        let delta = response.drag_delta();
        state.pan_by(delta.x, delta.y);
    }
}

fn handle_node_drag(
    response: &egui::Response,
    state: &mut AppState,
    tree_layout: &TreeLayout,
    transform: Transform,
) {
    let pointer = response.interact_pointer_pos().map(|p| transform.to_scene(p));

    if response.drag_started_by(PointerButton::Primary) {
        if let Some((x, y)) = pointer {
            state.drag = tree_layout
                .node_at(x, y)
                .and_then(|id| tree_layout.box_for(id))
                .map(|b| NodeDrag {
                    node: b.id,
                    grab_offset: (x - b.bounds.x, y - b.bounds.y),
                    pointer: (x, y),
                    target: None,
                });
        }
    } else if response.dragged_by(PointerButton::Primary) {
        if let (Some(drag), Some((x, y))) = (state.drag.as_mut(), pointer) {
            drag.pointer = (x, y);
            drag.target = tree_layout.drop_target_at(&state.mindmap, drag.node, x, y);
        }
    }

    if response.drag_stopped() && state.drag.is_some() {
        state.finish_drag();
    }

    if state.drag.is_some() {
        response.ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if let Some(p) = response.hover_pos() {
        let (x, y) = transform.to_scene(p);
        if tree_layout.node_at(x, y).is_some() {
            response.ctx.set_cursor_icon(egui::CursorIcon::Grab);
        }
    }
}

fn draw(painter: &egui::Painter, state: &AppState, tree_layout: &TreeLayout, t: Transform) {
    let connector_stroke = Stroke::new(theme::CONNECTOR_WIDTH, theme::CONNECTOR);
    for c in &tree_layout.connectors {
        let points = c.points.map(|p| t.to_screen(p));
        painter.add(CubicBezierShape::from_points_stroke(
            points,
            false,
            Color32::TRANSPARENT,
            connector_stroke,
        ));
    }

    let dragged = state.drag.map(|d| d.node);
    let target = state.drag.and_then(|d| d.target);

    for b in &tree_layout.boxes {
        let Some(node) = state.mindmap.node(b.id) else {
            continue;
        };
        let colour = if Some(b.id) == target {
            theme::DROP_TARGET
        } else if Some(b.id) == dragged {
            theme::DRAG_SOURCE
        } else {
            theme::rgb(state.settings.node_colour(node, b.depth))
        };
        let size = state.settings.node_font_size(node) as f32 * t.zoom;
        let top_left = t.to_screen((b.bounds.x, b.bounds.y));
        draw_label(painter, node.text(), top_left, size, colour);
    }

    // Ghost of the dragged node following the pointer.
    if let Some(drag) = state.drag {
        if let Some(node) = state.mindmap.node(drag.node) {
            let size = state.settings.node_font_size(node) as f32 * t.zoom;
            let top_left = t.to_screen((
                drag.pointer.0 - drag.grab_offset.0,
                drag.pointer.1 - drag.grab_offset.1,
            ));
            draw_label(
                painter,
                node.text(),
                top_left,
                size,
                theme::DRAG_SOURCE.gamma_multiply(0.6),
            );
        }
    }
}

/// Text with an underline, the node's only decoration.
fn draw_label(painter: &egui::Painter, text: &str, top_left: Pos2, size: f32, colour: Color32) {
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(size), colour);
    let width = galley.size().x;
    let bottom = top_left.y + galley.size().y + 1.0;
    painter.galley(top_left, galley, colour);
    painter.line_segment(
        [Pos2::new(top_left.x, bottom), Pos2::new(top_left.x + width, bottom)],
        Stroke::new(theme::UNDERLINE_WIDTH, colour),
    );
}
