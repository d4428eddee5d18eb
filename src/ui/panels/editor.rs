// MindMap - ui/panels/editor.rs
//
// Markdown editor pane (left side panel). Every edit re-parses the text
// into the mind map.

use crate::app::state::AppState;

const PLACEHOLDER: &str = "Type a Markdown list or headings...

List example:
- Project plan
  - Phase 1
    - Task 1

Heading example:
# Root
## Child";

/// Render the editor into the side panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.strong("Markdown");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let nodes = state.mindmap.all_nodes().len();
            if nodes > 0 {
                ui.label(egui::RichText::new(format!("{nodes} nodes")).small().weak());
            }
        });
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("editor_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            let response = ui.add(
                egui::TextEdit::multiline(&mut state.editor_text)
                    .hint_text(PLACEHOLDER)
                    .font(egui::FontId::monospace(state.editor_font_size))
                    .desired_width(f32::INFINITY)
                    .desired_rows(30),
            );
            if response.changed() {
                state.on_text_changed();
            }
        });
}
