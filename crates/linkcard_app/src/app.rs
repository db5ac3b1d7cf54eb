use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use eframe::egui;
use linkcard_core::{update, AppState, Dialog, Effect, Msg, PreviewState, Submission};

use crate::effects::EffectRunner;
use crate::preview;

/// Default output filename shown on first launch.
const DEFAULT_OUTPUT: &str = "linkcard.png";

pub struct LinkCardApp {
    state: AppState,
    runner: EffectRunner,

    // Form widget buffers; their values enter the state machine only on
    // submit, as a Submission.
    url: String,
    output_path: String,
    generate_html: bool,

    preview_texture: Option<egui::TextureHandle>,
}

impl LinkCardApp {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(),
            url: String::new(),
            output_path: DEFAULT_OUTPUT.to_string(),
            generate_html: true,
            preview_texture: None,
        }
    }

    /// Apply a message and run the effects it produced. Effects that finish
    /// synchronously (preview loading) feed follow-up messages back into
    /// the same queue.
    fn dispatch(&mut self, ctx: &egui::Context, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let (state, effects) = update(std::mem::take(&mut self.state), msg);
            self.state = state;
            for effect in effects {
                match effect {
                    Effect::StartGeneration(submission) => self.runner.start(submission),
                    Effect::LoadPreview { path } => {
                        let result = self.load_preview_texture(ctx, &path);
                        inbox.push_back(Msg::PreviewLoaded { path, result });
                    }
                }
            }
        }
    }

    fn load_preview_texture(&mut self, ctx: &egui::Context, path: &str) -> Result<(), String> {
        match preview::load_preview(Path::new(path)) {
            Ok(color_image) => {
                self.preview_texture = Some(ctx.load_texture(
                    "card_preview",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                Ok(())
            }
            Err(message) => {
                self.preview_texture = None;
                Err(message)
            }
        }
    }

    fn browse_output_path(&mut self) {
        let suggested = Path::new(&self.output_path);
        let mut dialog = rfd::FileDialog::new().add_filter("PNG image", &["png"]);
        if let Some(name) = suggested.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        if let Some(dir) = suggested.parent().filter(|dir| dir.is_dir()) {
            dialog = dialog.set_directory(dir);
        }
        // Cancel leaves the field untouched.
        if let Some(chosen) = dialog.save_file() {
            self.output_path = chosen.display().to_string();
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, pending: &mut Vec<Msg>, running: bool) {
        ui.label(egui::RichText::new("URL").strong());
        ui.add(
            egui::TextEdit::singleline(&mut self.url)
                .hint_text("https://example.com/article")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Output file").strong());
        ui.horizontal(|ui| {
            let browse = ui.button("Browse…").clicked();
            ui.add(
                egui::TextEdit::singleline(&mut self.output_path).desired_width(f32::INFINITY),
            );
            if browse {
                self.browse_output_path();
            }
        });
        ui.add_space(8.0);

        ui.checkbox(&mut self.generate_html, "Also write an HTML snippet");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let generate = ui
                .add_enabled(!running, egui::Button::new("Generate link card"))
                .clicked();
            if running {
                ui.spinner();
            }
            if generate {
                pending.push(Msg::SubmitRequested(Submission {
                    url: self.url.clone(),
                    output_path: self.output_path.clone(),
                    generate_html: self.generate_html,
                }));
            }
        });
    }

    fn show_preview(&self, ui: &mut egui::Ui, preview: &PreviewState) {
        match preview {
            PreviewState::Showing { .. } => {
                if let Some(texture) = &self.preview_texture {
                    ui.image((texture.id(), texture.size_vec2()));
                } else {
                    ui.weak("Preview texture was dropped.");
                }
            }
            PreviewState::Failed { message } => {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("Preview unavailable: {message}"),
                );
            }
            PreviewState::Empty => {
                ui.weak("The generated card appears here.");
            }
        }
    }

    fn show_dialog(&self, ctx: &egui::Context, dialog: &Dialog, pending: &mut Vec<Msg>) {
        let (title, body) = match dialog {
            Dialog::InvalidInput { message } => ("Input error".to_string(), message.clone()),
            Dialog::Completed {
                image_path,
                html_path,
            } => {
                let mut body = format!("Link card generated.\n\nImage: {image_path}");
                if let Some(html_path) = html_path {
                    body.push_str(&format!("\nHTML: {html_path}"));
                }
                ("Generation complete".to_string(), body)
            }
            Dialog::GenerationFailed { message } => (
                "Generation error".to_string(),
                format!("Link card generation failed.\n\n{message}"),
            ),
        };

        // A real modal: input to the form underneath is blocked until the
        // user acknowledges the outcome.
        egui::Modal::new(egui::Id::new("outcome_dialog")).show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.heading(title);
            ui.separator();
            ui.label(body);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                pending.push(Msg::DialogDismissed);
            }
        });
    }
}

impl eframe::App for LinkCardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Marshal finished workers onto the UI thread before rendering.
        while let Some(outcome) = self.runner.poll() {
            self.dispatch(ctx, Msg::GenerationFinished(outcome));
        }

        let view = self.state.view();
        let mut pending = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Link Card Studio");
            ui.separator();

            self.show_form(ui, &mut pending, view.running);

            ui.add_space(8.0);
            ui.weak(view.status.as_str());
            ui.separator();

            ui.label(egui::RichText::new("Preview").strong());
            egui::ScrollArea::both().show(ui, |ui| {
                self.show_preview(ui, &view.preview);
            });
        });

        if let Some(dialog) = &view.dialog {
            self.show_dialog(ctx, dialog, &mut pending);
        }

        for msg in pending {
            self.dispatch(ctx, msg);
        }

        // The completion event arrives over a channel; keep polling while a
        // worker is in flight instead of waiting for the next input event.
        if view.running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
