use eframe::egui;

use crate::state::{AppState, Mode};
use crate::ui::{panels, presentation, testing};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Wrap a state whose dataset was loaded (or failed to load) at startup.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: mode and data source ----
        egui::SidePanel::left("settings_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.mode {
            Mode::Presentation => {
                presentation::presentation_page(ui, self.state.config.assets_dir.as_deref());
            }
            Mode::Testing => testing::testing_page(ui, &mut self.state),
        });
    }
}
