mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use app::MovieDashboardApp;
use clap::Parser;
use cli::Cli;
use eframe::egui;

fn setup_logging() {
    let mut builder = env_logger::Builder::new();

    builder.filter(None, log::LevelFilter::Info);

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }

    builder.init();
}

fn main() -> eframe::Result {
    setup_logging();
    let config = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movie Dashboard",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the logo from disk.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(MovieDashboardApp::new(config)))
        }),
    )
}
