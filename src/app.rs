use eframe::egui;

use crate::state::DashboardState;
use crate::ui::{panels, pie, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: DashboardState,
}

impl DashboardApp {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: load diagnostics ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: selections ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: subscriber table ----
        egui::TopBottomPanel::bottom("table_panel")
            .default_height(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::subscriber_table(ui, &mut self.state.table_view);
            });

        // ---- Right panel: charts ----
        egui::SidePanel::right("chart_panel")
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                let half = ui.available_height() / 2.0;
                ui.allocate_ui(egui::vec2(ui.available_width(), half), |ui| {
                    plot::revenue_bars(ui, &self.state);
                });
                ui.separator();
                pie::pie_chart(ui, &self.state.device_chart);
            });

        // ---- Central panel: map ----
        // Map interactions show up in the charts on the next frame.
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::revenue_map(ui, &mut self.state);
        });
    }
}
