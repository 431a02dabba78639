use eframe::egui;

use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FundingDashApp {
    pub state: AppState,
}

impl eframe::App for FundingDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, insights, preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &self.state);
        });
    }
}
