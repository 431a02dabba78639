use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::color::CategoryColors;

const BAR_COLOR: Color32 = Color32::from_rgb(66, 133, 244);
const LINE_COLOR: Color32 = Color32::from_rgb(52, 168, 83);

// ---------------------------------------------------------------------------
// Funding by industry (bar chart)
// ---------------------------------------------------------------------------

/// Bar chart of summed funding (millions) per industry.
pub fn funding_by_industry(ui: &mut Ui, by_industry: &BTreeMap<String, f64>) {
    let names: Vec<String> = by_industry.keys().cloned().collect();
    let bars: Vec<Bar> = by_industry
        .values()
        .enumerate()
        .map(|(i, &sum)| Bar::new(i as f64, sum).width(0.6))
        .collect();

    Plot::new("funding_by_industry")
        .height(260.0)
        .y_axis_label("Funding (Millions)")
        .x_axis_formatter(move |mark, _range| {
            // Grid marks fall between bars too; label only whole positions.
            if mark.value < -0.01 {
                return String::new();
            }
            let i = mark.value.round() as usize;
            if (mark.value - i as f64).abs() < 0.01 {
                names.get(i).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(BAR_COLOR)
                    .name("Funding by Industry"),
            );
        });
}

// ---------------------------------------------------------------------------
// Yearly funding trend (line chart)
// ---------------------------------------------------------------------------

/// Line chart of summed funding (millions) per year.
pub fn yearly_trend(ui: &mut Ui, by_year: &BTreeMap<i32, f64>) {
    let points: PlotPoints = by_year
        .iter()
        .map(|(&year, &sum)| [year as f64, sum])
        .collect();

    Plot::new("yearly_funding_trend")
        .height(260.0)
        .x_axis_label("Year")
        .y_axis_label("Funding (Millions)")
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .color(LINE_COLOR)
                    .width(2.0)
                    .name("Yearly Funding Trend"),
            );
        });
}

// ---------------------------------------------------------------------------
// City-wise funding distribution (pie chart)
// ---------------------------------------------------------------------------

/// Pie chart of each city's share of the filtered funding total, with a
/// legend listing the percentages.
///
/// egui_plot has no pie primitive, so the slices are painted directly as a
/// triangle fan per slice (robust for slices wider than a half turn).
pub fn city_share_pie(ui: &mut Ui, by_city: &BTreeMap<String, f64>, colors: &CategoryColors) {
    let total: f64 = by_city.values().sum();
    if total <= 0.0 {
        ui.label("No funding volume in the filtered view.");
        return;
    }

    ui.horizontal_top(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(240.0), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.48;

        // Start at 12 o'clock and sweep clockwise.
        let mut angle = -FRAC_PI_2;
        for (city, &value) in by_city {
            let sweep = value / total * TAU;
            let color = colors.color_for(city);
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            for i in 0..steps {
                let a0 = angle + sweep * i as f64 / steps as f64;
                let a1 = angle + sweep * (i + 1) as f64 / steps as f64;
                let p0 = center + Vec2::new(a0.cos() as f32, a0.sin() as f32) * radius;
                let p1 = center + Vec2::new(a1.cos() as f32, a1.sin() as f32) * radius;
                painter.add(Shape::convex_polygon(
                    vec![center, p0, p1],
                    color,
                    Stroke::NONE,
                ));
            }
            angle += sweep;
        }

        ui.add_space(12.0);

        ui.vertical(|ui: &mut Ui| {
            for (city, &value) in by_city {
                let share = value / total * 100.0;
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, colors.color_for(city));
                    ui.label(format!("{city}: {share:.1}%"));
                });
            }
        });
    });
}
