// MindMap - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the editor, canvas, and dialogs, and owns the file
// dialogs and keyboard shortcuts.

use crate::app::state::AppState;
use crate::core::export::ExportFormat;
use crate::platform::fs::dialog_directory;
use crate::ui;
use egui::{Key, KeyboardShortcut, Modifiers};

const SHORTCUT_NEW: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::N);
const SHORTCUT_OPEN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const SHORTCUT_SAVE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const SHORTCUT_SAVE_AS: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::S);
const SHORTCUT_QUIT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);

/// The MindMap application.
pub struct MindMapApp {
    pub state: AppState,
    /// Last title sent to the viewport, to avoid resending every frame.
    window_title: String,
}

impl MindMapApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            window_title: String::new(),
        }
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new();
        match dialog_directory(self.state.current_file.as_deref()) {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn open(&mut self) {
        let Some(path) = self
            .file_dialog()
            .add_filter("Markdown", &["md", "markdown"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };
        match self.state.open_file(&path) {
            Ok(()) => self.state.save_session(),
            Err(e) => {
                tracing::warn!(error = %e, "Open failed");
                self.state.error_message = Some(format!("Could not open the file.\n\n{e}"));
            }
        }
    }

    fn save(&mut self) {
        match self.state.save() {
            Ok(true) => {}
            Ok(false) => self.save_as(),
            Err(e) => {
                tracing::warn!(error = %e, "Save failed");
                self.state.error_message = Some(format!("Could not save the file.\n\n{e}"));
            }
        }
    }

    fn save_as(&mut self) {
        let Some(path) = self
            .file_dialog()
            .add_filter("Markdown", &["md"])
            .set_file_name(self.state.suggested_file_name("md"))
            .save_file()
        else {
            return;
        };
        match self.state.save_as(&path) {
            Ok(_) => self.state.save_session(),
            Err(e) => {
                tracing::warn!(error = %e, "Save As failed");
                self.state.error_message = Some(format!("Could not save the file.\n\n{e}"));
            }
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let extension = format.extension();
        let Some(path) = self
            .file_dialog()
            .add_filter(format.label(), &[extension])
            .set_file_name(self.state.suggested_file_name(extension))
            .save_file()
        else {
            return;
        };
        if let Err(e) = self.state.export_to(&path, format) {
            tracing::warn!(error = %e, "Export failed");
            self.state.error_message = Some(format!("Export failed.\n\n{e}"));
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Save As before Save: Ctrl+S also matches Ctrl+Shift+S logically.
        let (new, open, save_as, save, quit) = ctx.input_mut(|i| {
            (
                i.consume_shortcut(&SHORTCUT_NEW),
                i.consume_shortcut(&SHORTCUT_OPEN),
                i.consume_shortcut(&SHORTCUT_SAVE_AS),
                i.consume_shortcut(&SHORTCUT_SAVE),
                i.consume_shortcut(&SHORTCUT_QUIT),
            )
        });
        if new {
            self.state.new_document();
        }
        if open {
            self.open();
        }
        if save_as {
            self.save_as();
        } else if save {
            self.save();
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if menu_item(ui, "New", &SHORTCUT_NEW) {
                        self.state.new_document();
                        ui.close_menu();
                    }
                    if menu_item(ui, "Open\u{2026}", &SHORTCUT_OPEN) {
                        ui.close_menu();
                        self.open();
                    }
                    ui.separator();
                    if menu_item(ui, "Save", &SHORTCUT_SAVE) {
                        ui.close_menu();
                        self.save();
                    }
                    if menu_item(ui, "Save As\u{2026}", &SHORTCUT_SAVE_AS) {
                        ui.close_menu();
                        self.save_as();
                    }
                    ui.separator();
                    let has_nodes = self.state.mindmap.root().is_some();
                    ui.add_enabled_ui(has_nodes, |ui| {
                        ui.menu_button("Export", |ui| {
                            for format in [ExportFormat::Json, ExportFormat::Csv] {
                                if ui.button(format!("{}\u{2026}", format.label())).clicked() {
                                    ui.close_menu();
                                    self.export(format);
                                }
                            }
                        });
                    });
                    ui.separator();
                    if menu_item(ui, "Exit", &SHORTCUT_QUIT) {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Settings\u{2026}").clicked() {
                        self.state.show_settings = true;
                        ui.close_menu();
                    }
                    if ui.button("Reset Zoom").clicked() {
                        self.state.reset_zoom();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                if !self.state.warnings.is_empty() {
                    ui.separator();
                    let label = egui::RichText::new(format!(
                        "\u{26a0} {} warning(s)",
                        self.state.warnings.len()
                    ))
                    .color(ui::theme::WARNING_TEXT);
                    let response = ui
                        .add(egui::Label::new(label).sense(egui::Sense::click()))
                        .on_hover_text(self.state.warnings.join("\n"));
                    if response.clicked() {
                        self.state.warnings.clear();
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0}%", self.state.zoom() * 100.0));
                });
            });
        });
    }

    fn error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.error_message.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    dismissed = ui.button("OK").clicked();
                });
            });
        if dismissed {
            self.state.error_message = None;
        }
    }
}

/// Menu button with its shortcut shown on the right.
fn menu_item(ui: &mut egui::Ui, label: &str, shortcut: &KeyboardShortcut) -> bool {
    ui.add(egui::Button::new(label).shortcut_text(ui.ctx().format_shortcut(shortcut)))
        .clicked()
}

impl eframe::App for MindMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        let title = self.state.window_title();
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }

        self.menu_bar(ctx);
        self.status_bar(ctx);

        egui::SidePanel::left("editor_panel")
            .default_width(ui::theme::EDITOR_PANEL_WIDTH)
            .min_width(ui::theme::EDITOR_PANEL_MIN_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui::panels::editor::render(ui, &mut self.state);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                ui::panels::mindmap_view::render(ui, &mut self.state);
            });

        ui::panels::settings::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
        self.error_window(ctx);
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the current session so the next launch can restore it.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session();
    }
}
