use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let dash = &state.dashboard;
        ui.label(format!(
            "{} records from {}",
            dash.record_count,
            dash.source.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Page header
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &AppState) {
    let config = &state.config;
    ui.heading(RichText::new(&config.heading).size(26.0));
    ui.label(&config.intro);
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// Attribute tabs
// ---------------------------------------------------------------------------

/// Tab strip with one tab per attribute, followed by the selected tab.
pub fn attribute_tabs(ui: &mut Ui, state: &mut AppState) {
    let mut selected = state.active_tab;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (i, tab) in state.dashboard.tabs.iter().enumerate() {
            ui.selectable_value(&mut selected, i, &tab.spec.name);
        }
    });
    if selected != state.active_tab {
        state.select_tab(selected);
    }
    ui.separator();

    let Some(tab) = state.dashboard.tabs.get(state.active_tab) else {
        ui.label("No attributes configured.");
        return;
    };
    ui.label(RichText::new(&tab.heading).heading().strong());
    let cells: Vec<(Option<&str>, _)> = tab.charts.iter().map(|c| (None, c)).collect();
    plot::chart_row(ui, &tab.spec.name, &cells);
}

pub fn observation_note(ui: &mut Ui, state: &AppState) {
    ui.add_space(8.0);
    ui.label(&state.config.observation_note);
}

// ---------------------------------------------------------------------------
// Outcome distribution
// ---------------------------------------------------------------------------

/// Observed vs. post-balancing pies, side by side.
pub fn distribution_section(ui: &mut Ui, state: &AppState) {
    let config = &state.config;
    let dist = &state.dashboard.distribution;

    ui.separator();
    ui.label(
        RichText::new(format!("{} Distribution", config.outcome.column))
            .heading()
            .strong(),
    );
    ui.label(&config.balancing.note);

    let after = format!("After {}", config.balancing.method);
    plot::chart_row(
        ui,
        "outcome_distribution",
        &[
            (Some("Original Distribution"), &dist.observed_chart),
            (Some(after.as_str()), &dist.post_balancing_chart),
        ],
    );
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.reload(&path);
    }
}
