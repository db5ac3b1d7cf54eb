//! Link Card Studio: paste a URL, get a social-sharing card image.

mod app;
mod effects;
mod logging;
mod preview;

use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    logging::initialize();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([700.0, 600.0])
            .with_title("Link Card Studio"),
        ..Default::default()
    };

    eframe::run_native(
        "Link Card Studio",
        options,
        Box::new(|_cc| Ok(Box::new(app::LinkCardApp::new()))),
    )
}
