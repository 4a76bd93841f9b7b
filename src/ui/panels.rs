use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::Selection;
use crate::state::{AppState, View};

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
            let can_export = state
                .dataset
                .as_ref()
                .is_some_and(|ds| !ds.is_empty());
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} cars loaded, {} matching filters",
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
// Left side panel – page selector and filter widgets
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Cars Dashboard");
    ui.separator();

    ui.strong("Choose");
    for view in [View::Overview, View::Explorer, View::Compare] {
        ui.selectable_value(&mut state.view, view, view.title());
    }
    ui.separator();

    if state.view == View::Explorer {
        filter_controls(ui, state);
    }
}

/// Company/model selectors plus the Apply action that gates recomputation.
fn filter_controls(ui: &mut Ui, state: &mut AppState) {
    let total = match &state.dataset {
        Some(ds) => ds.len(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong("Filters");
    ui.add_space(2.0);

    // ---- Company selector ----
    let options = state.filter_options();
    let current = state.pending.company.label().to_string();
    let mut picked: Option<Selection> = None;
    egui::ComboBox::from_label("Company")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options.companies {
                if ui.selectable_label(current == *option, option).clicked() {
                    picked = Some(Selection::from_label(option));
                }
            }
        });
    if let Some(company) = picked {
        // May reset the pending model, so the model options below are rebuilt.
        state.set_pending_company(company);
    }

    // ---- Model selector (restricted to the pending company) ----
    let options = state.filter_options();
    let current = state.pending.model.label().to_string();
    let mut picked: Option<Selection> = None;
    egui::ComboBox::from_label("Model")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options.models {
                if ui.selectable_label(current == *option, option).clicked() {
                    picked = Some(Selection::from_label(option));
                }
            }
        });
    if let Some(model) = picked {
        state.pending.model = model;
    }

    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Apply").clicked() {
            state.apply_filters();
        }
        if state.filters_dirty() {
            ui.label(RichText::new("pending").weak().italics());
        }
    });

    ui.label(format!(
        "{} of {total} cars match",
        state.visible_indices.len()
    ));
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open cars dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} cars with columns {:?}",
                    dataset.len(),
                    dataset.column_names
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

fn export_file_dialog(state: &mut AppState) {
    let Some(ds) = state.dataset.as_ref() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered view")
        .set_file_name("cars_filtered.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let message = match crate::data::export::export_to_path(ds, &state.visible_indices, &path) {
            Ok(()) => {
                log::info!(
                    "Exported {} rows to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                format!(
                    "Exported {} rows to {}",
                    state.visible_indices.len(),
                    path.display()
                )
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                format!("Error: {e}")
            }
        };
        state.status_message = Some(message);
    }
}
