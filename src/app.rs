use eframe::egui;

use gradview::config::DashboardConfig;
use gradview::state::DashboardState;

use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GradviewApp {
    pub state: DashboardState,
}

impl GradviewApp {
    /// Build the app and load the configured data file. A failed load leaves
    /// the dashboard running with no data.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = DashboardState::new(config);
        state.load_configured();
        Self { state }
    }
}

impl eframe::App for GradviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, preview, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::kpi_row(ui, &self.state);
                    ui.separator();
                    panels::preview_table(ui, &self.state);
                    ui.separator();
                    plot::charts(ui, &self.state);
                });
        });
    }
}
