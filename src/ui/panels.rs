use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        if state.dataset.is_some() && ui.small_button("Reset").clicked() {
            state.reset_filters();
        }
    });
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the category indices so we can mutate state inside the loop.
    let industries = dataset.industries.clone();
    let stages = dataset.stages.clone();
    let year_bounds = dataset.year_bounds;

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= category_filter(ui, "Industry", &industries, &mut state.filters.industries);
            changed |= category_filter(ui, "Funding Stage", &stages, &mut state.filters.stages);

            if let Some((min_year, max_year)) = year_bounds {
                ui.add_space(4.0);
                ui.strong("Year Range");
                let (mut low, mut high) = state.filters.year_range;
                changed |= ui
                    .add(egui::Slider::new(&mut low, min_year..=max_year).text("from"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut high, min_year..=max_year).text("to"))
                    .changed();
                if high < low {
                    high = low;
                }
                state.filters.year_range = (low, high);
            }
        });

    // Recompute the filtered view only when a widget actually changed.
    if changed {
        state.refilter();
    }
}

/// One collapsible multi-select group with All/None shortcuts. Returns
/// whether the selection changed.
fn category_filter(
    ui: &mut Ui,
    label: &str,
    all_values: &BTreeSet<String>,
    selected: &mut BTreeSet<String>,
) -> bool {
    let mut changed = false;

    let header_text = format!("{label}  ({}/{})", selected.len(), all_values.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = all_values.clone();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for value in all_values {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value).changed() {
                    if checked {
                        selected.insert(value.clone());
                    } else {
                        selected.remove(value);
                    }
                    changed = true;
                }
            }
        });

    changed
}

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
            if ui.button("Export summary…").clicked() {
                export_summary_dialog(state);
                ui.close_menu();
            }
            if ui.button("Close dataset").clicked() {
                state.clear_dataset();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} match the filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open funding data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} funding records, {} industries, {} cities",
                    dataset.len(),
                    dataset.industries.len(),
                    dataset.cities.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Save the current KPIs and grouped aggregates as a JSON file.
pub fn export_summary_dialog(state: &mut AppState) {
    if state.dataset.is_none() {
        state.status_message = Some("Nothing to export: no dataset loaded.".to_string());
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .set_file_name("funding_summary.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        let result = serde_json::to_string_pretty(&state.summary)
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));
        match result {
            Ok(()) => log::info!("Exported summary to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export summary: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
