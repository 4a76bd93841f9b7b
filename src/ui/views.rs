use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate;
use crate::data::model::{columns, Dataset, Record, Value};
use crate::state::{AppState, View};
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Central panel – page dispatch
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    match state.view {
        View::Overview => overview(ui, state),
        View::Explorer => explorer(ui, state),
        View::Compare => compare(ui, state),
    }
}

fn no_dataset(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a dataset to begin  (File → Open…)");
    });
}

// ---------------------------------------------------------------------------
// Overview – headline numbers and full-table distributions
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        no_dataset(ui);
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Car Dashboard — Overview");
            ui.label("Explore the cars dataset: headline numbers, data gaps, and distributions.");
            ui.separator();

            let everything: Vec<usize> = (0..ds.len()).collect();

            ui.horizontal(|ui: &mut Ui| {
                stat_tile(ui, "Cars", ds.len().to_string());
                stat_tile(ui, "Columns", ds.column_names.len().to_string());
                stat_tile(ui, "Companies", distinct_count(ds, columns::COMPANY).to_string());
                stat_tile(ui, "Models", distinct_count(ds, columns::MODEL).to_string());
                if let Some(price) = aggregate::mean(ds, &everything, columns::PRICE) {
                    stat_tile(ui, "Mean price", format!("{price:.0}"));
                }
                if let Some(power) = aggregate::mean(ds, &everything, columns::POWER) {
                    stat_tile(ui, "Mean power", format!("{power:.1}"));
                }
            });
            ui.separator();

            let gaps = aggregate::missing_summary(ds);
            if !gaps.is_empty() {
                egui::CollapsingHeader::new(RichText::new("Missing data").strong())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        missing_table(ui, &gaps);
                    });
                ui.separator();
            }

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("Fuel type distribution");
                if column_guard(&mut cols[0], ds, columns::FUEL_TYPE) {
                    let counts = aggregate::value_counts(ds, &everything, columns::FUEL_TYPE);
                    charts::count_bars(&mut cols[0], "overview_fuel", &counts, "fuel type");
                }

                cols[1].strong("Drivetrain distribution");
                if column_guard(&mut cols[1], ds, columns::DRIVETRAIN) {
                    let counts = aggregate::value_counts(ds, &everything, columns::DRIVETRAIN);
                    charts::count_bars(&mut cols[1], "overview_drivetrain", &counts, "drivetrain");
                }
            });
            ui.add_space(8.0);

            ui.strong("Top companies by variant count");
            if column_guard(ui, ds, columns::COMPANY) {
                let mut counts = aggregate::value_counts(ds, &everything, columns::COMPANY);
                counts.truncate(10);
                let entries: Vec<(String, f64)> = counts
                    .iter()
                    .map(|(v, n)| (v.to_string(), *n as f64))
                    .collect();
                charts::ranking_bars(ui, "overview_companies", &entries);
            }
        });
}

// ---------------------------------------------------------------------------
// Explorer – filtered distributions, rankings, and the matching rows
// ---------------------------------------------------------------------------

fn explorer(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        no_dataset(ui);
        return;
    };

    ui.heading("Cars Explorer");

    let view = &state.visible_indices;
    if view.is_empty() {
        ui.colored_label(
            ui.visuals().warn_fg_color,
            "No cars match the current filters.",
        );
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("{} cars in the current selection.", view.len()));
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("Fuel type distribution");
                if column_guard(&mut cols[0], ds, columns::FUEL_TYPE) {
                    let counts = aggregate::value_counts(ds, view, columns::FUEL_TYPE);
                    charts::count_bars(&mut cols[0], "explorer_fuel", &counts, "fuel type");
                }

                cols[1].strong("Drivetrain distribution");
                if column_guard(&mut cols[1], ds, columns::DRIVETRAIN) {
                    let counts = aggregate::value_counts(ds, view, columns::DRIVETRAIN);
                    charts::count_bars(&mut cols[1], "explorer_drivetrain", &counts, "drivetrain");
                }
            });
            ui.add_space(8.0);

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("Mean price by fuel type");
                if column_guard(&mut cols[0], ds, columns::FUEL_TYPE)
                    && column_guard(&mut cols[0], ds, columns::PRICE)
                {
                    let means = aggregate::grouped_mean(ds, view, columns::FUEL_TYPE, columns::PRICE);
                    let mut entries: Vec<(String, f64)> = means
                        .iter()
                        .map(|(k, v)| (k.to_string(), *v))
                        .collect();
                    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
                    charts::mean_bars(&mut cols[0], "explorer_price_fuel", &entries, "price");
                }

                cols[1].strong("Power vs torque");
                if column_guard(&mut cols[1], ds, columns::POWER)
                    && column_guard(&mut cols[1], ds, columns::TORQUE)
                {
                    let points = aggregate::scatter_pairs(ds, view, columns::POWER, columns::TORQUE);
                    charts::scatter(&mut cols[1], "explorer_power_torque", points, "Power", "Torque");
                }
            });
            ui.add_space(8.0);

            ui.strong("Most expensive in selection");
            if column_guard(ui, ds, columns::PRICE) {
                let top = aggregate::top_n_by_column(ds, view, columns::PRICE, 10, true);
                let entries: Vec<(String, f64)> = top
                    .iter()
                    .filter_map(|&i| {
                        let rec = &ds.records[i];
                        rec.numeric(columns::PRICE).map(|p| (record_label(rec), p))
                    })
                    .collect();
                charts::ranking_bars(ui, "explorer_top_price", &entries);
            }
            ui.separator();

            ui.strong("Matching cars");
            preview_table(ui, ds, view);
        });
}

// ---------------------------------------------------------------------------
// Compare – two variants side by side
// ---------------------------------------------------------------------------

fn compare(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Compare Cars");

    let (labels, column_names) = match &state.dataset {
        Some(ds) => (
            ds.records.iter().map(record_label).collect::<Vec<String>>(),
            ds.column_names.clone(),
        ),
        None => {
            no_dataset(ui);
            return;
        }
    };
    if labels.is_empty() {
        ui.label("The dataset has no cars to compare.");
        return;
    }

    ui.label("Pick two variants to see their specifications side by side.");
    ui.add_space(4.0);

    car_picker(ui, "Left car", &labels, &mut state.compare_left);
    car_picker(ui, "Right car", &labels, &mut state.compare_right);
    ui.separator();

    match (state.compare_left, state.compare_right) {
        (Some(left), Some(right)) => {
            if let Some(ds) = &state.dataset {
                compare_table(ui, ds, &column_names, left, right);
            }
        }
        _ => {
            ui.label("Select both cars to compare.");
        }
    }
}

fn car_picker(ui: &mut Ui, label: &str, labels: &[String], pick: &mut Option<usize>) {
    let current = pick
        .and_then(|i| labels.get(i))
        .cloned()
        .unwrap_or_else(|| "—".to_string());
    egui::ComboBox::from_label(label.to_string())
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for (i, name) in labels.iter().enumerate() {
                if ui.selectable_label(*pick == Some(i), name).clicked() {
                    *pick = Some(i);
                }
            }
        });
}

fn compare_table(ui: &mut Ui, ds: &Dataset, column_names: &[String], left: usize, right: usize) {
    let (Some(a), Some(b)) = (ds.records.get(left), ds.records.get(right)) else {
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Specification");
            });
            header.col(|ui| {
                ui.strong(record_label(a));
            });
            header.col(|ui| {
                ui.strong(record_label(b));
            });
        })
        .body(|mut body| {
            for col in column_names {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(col);
                    });
                    row.col(|ui| {
                        ui.label(a.value(col).to_string());
                    });
                    row.col(|ui| {
                        ui.label(b.value(col).to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// "Company Model Variant" from whichever parts are present.
fn record_label(rec: &Record) -> String {
    let parts: Vec<String> = [columns::COMPANY, columns::MODEL, columns::VARIANT]
        .into_iter()
        .filter_map(|col| rec.present(col))
        .map(Value::to_string)
        .collect();
    if parts.is_empty() {
        "(unnamed)".to_string()
    } else {
        parts.join(" ")
    }
}

fn distinct_count(ds: &Dataset, column: &str) -> usize {
    ds.unique_values.get(column).map_or(0, |vals| vals.len())
}

/// Presence check for a chart's column; renders the skip warning itself.
fn column_guard(ui: &mut Ui, ds: &Dataset, column: &str) -> bool {
    if ds.has_column(column) {
        true
    } else {
        ui.colored_label(
            ui.visuals().warn_fg_color,
            format!("Column \"{column}\" not found in the dataset — chart skipped."),
        );
        false
    }
}

fn stat_tile(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small().weak());
            ui.label(RichText::new(value).heading());
        });
    });
}

fn missing_table(ui: &mut Ui, gaps: &[(String, f64)]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Column");
            });
            header.col(|ui| {
                ui.strong("Missing");
            });
        })
        .body(|mut body| {
            for (col, fraction) in gaps {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(col);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}%", fraction * 100.0));
                    });
                });
            }
        });
}

const PREVIEW_ROWS: usize = 100;

fn preview_table(ui: &mut Ui, ds: &Dataset, indices: &[usize]) {
    let shown = indices.len().min(PREVIEW_ROWS);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(70.0), ds.column_names.len())
        .header(20.0, |mut header| {
            for col in &ds.column_names {
                header.col(|ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, shown, |mut row| {
                let rec = &ds.records[indices[row.index()]];
                for col in &ds.column_names {
                    row.col(|ui| {
                        ui.label(rec.value(col).to_string());
                    });
                }
            });
        });

    if indices.len() > PREVIEW_ROWS {
        ui.label(format!(
            "Showing first {PREVIEW_ROWS} of {} matching cars.",
            indices.len()
        ));
    }
}
