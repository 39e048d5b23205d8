use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use heart_dashboard::app::DashboardApp;
use heart_dashboard::cli::Cli;
use heart_dashboard::config::DashboardConfig;
use heart_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref())?;
    let data_path = cli.data.unwrap_or_else(|| config.dataset_path.clone());

    // Nothing renders unless the whole dataset loads and validates.
    let dashboard = AppState::build_dashboard(&data_path, &config)
        .with_context(|| format!("cannot start with {}", data_path.display()))?;

    if let Some(out) = cli.export {
        return dashboard.export_json(&out);
    }

    let title = config.page_title.clone();
    let state = AppState::new(config, dashboard);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI terminated with an error: {e}"))
}
