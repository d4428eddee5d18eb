// MindMap - ui/panels/settings.rs
//
// Settings dialog: node font size and colour.
// Shown from View > Settings... Changes apply immediately and are persisted
// with the session.

use crate::app::settings::depth_colour;
use crate::app::state::AppState;
use crate::core::model::{format_hex_colour, parse_hex_colour};
use crate::ui::theme;
use crate::util::constants::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE};

/// Render the Settings dialog (if `state.show_settings` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_settings {
        return;
    }

    let mut open = true;
    egui::Window::new("Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.heading("Node font");
            ui.add_space(6.0);

            // -- Size --
            ui.horizontal(|ui| {
                ui.label("Font size:");
                let mut size = state.settings.font_size();
                if ui
                    .add(egui::Slider::new(&mut size, MIN_FONT_SIZE..=MAX_FONT_SIZE).suffix(" pt"))
                    .changed()
                {
                    state.settings.set_font_size(size);
                }
                if size != DEFAULT_FONT_SIZE
                    && ui
                        .small_button("Reset")
                        .on_hover_text(format!("Reset to the default ({DEFAULT_FONT_SIZE} pt)"))
                        .clicked()
                {
                    state.settings.set_font_size(DEFAULT_FONT_SIZE);
                }
            });

            ui.add_space(8.0);

            // -- Colour --
            ui.horizontal(|ui| {
                ui.label("Font colour:");
                match state.settings.font_color().and_then(parse_hex_colour) {
                    Some(rgb) => {
                        let mut colour = rgb;
                        if ui.color_edit_button_srgb(&mut colour).changed() {
                            state
                                .settings
                                .set_font_color(Some(format_hex_colour(colour)));
                        }
                        ui.monospace(format_hex_colour(colour));
                        if ui
                            .small_button("Use depth colours")
                            .on_hover_text("Colour nodes by their depth in the tree")
                            .clicked()
                        {
                            state.settings.set_font_color(None);
                        }
                    }
                    None => {
                        ui.label(egui::RichText::new("by depth").italics());
                        if ui.small_button("Choose\u{2026}").clicked() {
                            state
                                .settings
                                .set_font_color(Some(format_hex_colour(depth_colour(0))));
                        }
                    }
                }
            });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Depth palette:").small().weak());
                for depth in 0..4 {
                    ui.label(egui::RichText::new("\u{25a0}").color(theme::rgb(depth_colour(depth))));
                }
            });
            ui.label(
                egui::RichText::new(
                    "Per-node font settings in a document always take precedence.",
                )
                .small()
                .weak(),
            );
        });

    if !open {
        state.show_settings = false;
        state.save_session();
    }
}
