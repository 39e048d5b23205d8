use std::path::Path;

use anyhow::Result;

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::data::load_dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Attribute list and cosmetics, fixed for the session.
    pub config: DashboardConfig,

    /// Charts of the loaded dataset.
    pub dashboard: Dashboard,

    /// Index of the selected attribute tab.
    pub active_tab: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dashboard: Dashboard) -> Self {
        Self {
            config,
            dashboard,
            active_tab: 0,
            status_message: None,
        }
    }

    /// Load, validate and render a dataset from `path`.
    pub fn build_dashboard(path: &Path, config: &DashboardConfig) -> Result<Dashboard> {
        let dataset = load_dataset(path, config)?;
        Dashboard::build(path, &dataset, config)
    }

    /// Replace the dashboard with one built from `path`.
    /// On failure the current dashboard stays and the error is shown.
    pub fn reload(&mut self, path: &Path) {
        match Self::build_dashboard(path, &self.config) {
            Ok(dashboard) => {
                self.dashboard = dashboard;
                self.active_tab = 0;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Select a tab, clamped to the available tabs.
    pub fn select_tab(&mut self, index: usize) {
        self.active_tab = index.min(self.dashboard.tabs.len().saturating_sub(1));
    }
}
