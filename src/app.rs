use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GeoVizApp {
    pub state: AppState,
}

impl GeoVizApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GeoVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: alerts, axes, statistics ----
        egui::SidePanel::left("analysis_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: raw data ----
        egui::TopBottomPanel::bottom("data_preview")
            .default_height(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::data_preview(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::relationship_plot(ui, &self.state);
        });
    }
}
