mod app;
mod color;
mod config;
mod data;
mod state;
mod text;
mod ui;
mod viz;

use std::path::Path;

use app::ZoomboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new("zoomboard.json"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Zoomboard – Course Projects Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(ZoomboardApp::new(config)))),
    )
}
