mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::DashboardApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::DashboardState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();

    // The whole dataset is loaded before any UI exists; a failure ends the process.
    let loaded = data::loader::load_csv(&config.source)
        .inspect_err(|e| log::error!("Failed to load subscribers: {e:#}"))
        .with_context(|| format!("loading {}", config.source.display()))?;
    let state = DashboardState::new(loaded, usize::from(config.page_size));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Subscriber Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
