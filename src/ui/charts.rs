use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate;
use crate::data::model::Value;

// ---------------------------------------------------------------------------
// Chart widgets bound to pipeline aggregates
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 240.0;

/// Vertical bar chart of category counts, tooltips carrying each category's
/// share of the aggregate total. A distribution with fewer than two distinct
/// values degrades to an informational message instead of a one-bar chart.
pub fn count_bars(ui: &mut Ui, id: &str, counts: &[(Value, usize)], what: &str) {
    if counts.is_empty() {
        ui.label(format!("No {what} data in the current selection."));
        return;
    }
    if counts.len() < 2 {
        let (value, n) = &counts[0];
        ui.label(format!(
            "All {n} cars in the current selection share one {what}: {value}."
        ));
        return;
    }

    let colors = ColorMap::from_categories(counts.iter().map(|(v, _)| v));
    let shares = aggregate::percentages(counts);
    let bars: Vec<Bar> = counts
        .iter()
        .zip(&shares)
        .enumerate()
        .map(|(i, ((value, n), (_, pct)))| {
            Bar::new(i as f64, *n as f64)
                .width(0.6)
                .name(format!("{value}: {n} ({pct:.1}%)"))
                .fill(colors.color_for(value))
        })
        .collect();

    let labels: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();
    category_plot(ui, id, labels, bars);
}

/// Vertical bar chart of a grouped mean, largest group first.
pub fn mean_bars(ui: &mut Ui, id: &str, entries: &[(String, f64)], what: &str) {
    if entries.is_empty() {
        ui.label(format!("No {what} data in the current selection."));
        return;
    }

    let categories: Vec<Value> = entries
        .iter()
        .map(|(label, _)| Value::String(label.clone()))
        .collect();
    let colors = ColorMap::from_categories(categories.iter());
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, mean))| {
            Bar::new(i as f64, *mean)
                .width(0.6)
                .name(format!("{label}: {mean:.0}"))
                .fill(colors.color_for(&Value::String(label.clone())))
        })
        .collect();

    let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
    category_plot(ui, id, labels, bars);
}

/// Horizontal ranking chart, best entry on top.
pub fn ranking_bars(ui: &mut Ui, id: &str, entries: &[(String, f64)]) {
    if entries.is_empty() {
        ui.label("No data to rank in the current selection.");
        return;
    }

    let n = entries.len();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new((n - 1 - i) as f64, *value)
                .width(0.6)
                .name(format!("{label}: {value:.0}"))
                .fill(Color32::LIGHT_BLUE)
        })
        .collect();

    // Bar positions run bottom-up, so labels are stored reversed.
    let labels: Vec<String> = entries
        .iter()
        .rev()
        .map(|(label, _)| label.clone())
        .collect();
    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .y_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Scatter plot of paired numeric columns.
pub fn scatter(ui: &mut Ui, id: &str, points: Vec<[f64; 2]>, x_label: &str, y_label: &str) {
    if points.is_empty() {
        ui.label("No complete data points in the current selection.");
        return;
    }

    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(2.5)
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

// -- Helpers --

/// Render a static categorical bar chart: interactions off, integer
/// positions labelled with the category names.
fn category_plot(ui: &mut Ui, id: &str, labels: Vec<String>, bars: Vec<Bar>) {
    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn axis_label(labels: &[String], position: f64) -> String {
    let nearest = position.round();
    if (position - nearest).abs() > 0.3 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}
