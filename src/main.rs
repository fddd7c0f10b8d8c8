mod app;
mod color;
mod ui;

use app::GradviewApp;
use eframe::egui;
use gradview::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::info!("Starting dashboard with data file {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Graduate Employability Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(GradviewApp::new(config)))),
    )
}
