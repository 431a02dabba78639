use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::ui::charts;

const PREVIEW_ROWS: usize = 50;
const INSIGHT_GREEN: Color32 = Color32::from_rgb(46, 125, 50);

// ---------------------------------------------------------------------------
// Central panel – KPIs, charts, insights, raw data preview
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data file to explore startup funding  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Startup Funding Analysis");
            ui.add_space(8.0);

            kpi_row(ui, state);
            ui.separator();

            if state.summary.count == 0 {
                ui.label(
                    RichText::new("No data available for the selected filters.")
                        .color(Color32::from_rgb(176, 124, 10))
                        .strong(),
                );
                return;
            }

            ui.strong("Funding by Industry");
            charts::funding_by_industry(ui, &state.summary.by_industry);
            ui.add_space(8.0);

            ui.strong("Yearly Funding Trend");
            charts::yearly_trend(ui, &state.summary.by_year);
            ui.add_space(8.0);

            ui.strong("City-wise Funding Distribution");
            charts::city_share_pie(ui, &state.summary.by_city, &state.city_colors);
            ui.separator();

            insights(ui, state);
            ui.separator();

            preview_table(ui, state);
        });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;
    let average = summary
        .average_millions
        .map(|avg| format!("{avg:.2}"))
        .unwrap_or_else(|| "N/A".to_string());
    let mode_industry = summary.mode_industry.as_deref().unwrap_or("N/A");

    ui.columns(4, |cols: &mut [Ui]| {
        kpi(&mut cols[0], "Total Startups", &summary.count.to_string());
        kpi(
            &mut cols[1],
            "Total Funding (Millions)",
            &format!("{:.2}", summary.total_millions),
        );
        kpi(&mut cols[2], "Average Funding (Millions)", &average);
        kpi(&mut cols[3], "Top Industry", mode_industry);
    });
}

fn kpi(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Insights block
// ---------------------------------------------------------------------------

fn insights(ui: &mut Ui, state: &AppState) {
    ui.strong("Business Insights & Recommendations");
    ui.add_space(4.0);

    let summary = &state.summary;
    if let (Some(industry), Some(city), Some(stage)) = (
        summary.top_industry.as_deref(),
        summary.top_city.as_deref(),
        summary.top_stage.as_deref(),
    ) {
        ui.label(
            RichText::new(format!("Top performing industry: {industry}")).color(INSIGHT_GREEN),
        );
        ui.label(RichText::new(format!("Best funding city: {city}")).color(INSIGHT_GREEN));
        ui.label(RichText::new(format!("Most funded stage: {stage}")).color(INSIGHT_GREEN));

        ui.add_space(4.0);
        ui.label("Recommendations:");
        ui.label("• Focus investment in high-growth industries.");
        ui.label("• Expand operations in top-performing cities.");
        ui.label("• Investors should prioritise startups in growth stages.");
        ui.label("• Emerging industries show strong upward trends; consider early investment.");
    }
}

// ---------------------------------------------------------------------------
// Raw data preview
// ---------------------------------------------------------------------------

fn preview_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let shown = state.visible_indices.len().min(PREVIEW_ROWS);
    ui.strong(format!(
        "Raw Data Preview (first {shown} of {} rows)",
        state.visible_indices.len()
    ));
    ui.add_space(4.0);

    // The dashboard already scrolls; let the table take its full height.
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in [
                "Industry",
                "Stage",
                "Year",
                "Funding (M)",
                "Email Domain",
                "City",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for &idx in state.visible_indices.iter().take(PREVIEW_ROWS) {
                let rec = &dataset.records[idx];
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&rec.industry);
                    });
                    row.col(|ui| {
                        ui.label(&rec.stage);
                    });
                    row.col(|ui| {
                        ui.label(rec.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", rec.funding_millions));
                    });
                    row.col(|ui| {
                        ui.label(rec.email_domain.as_deref().unwrap_or("<null>"));
                    });
                    row.col(|ui| {
                        ui.label(&rec.city);
                    });
                });
            }
        });
}
