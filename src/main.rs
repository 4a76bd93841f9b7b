mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::CarDashApp;
use eframe::egui;
use state::AppState;

/// The dataset read once at startup, relative to the working directory.
const DATA_PATH: &str = "car_cleaned.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The dashboard cannot do anything without its table, so a missing or
    // malformed file aborts startup instead of opening an empty window.
    let dataset = data::loader::load_file(Path::new(DATA_PATH))
        .with_context(|| format!("loading dataset from {DATA_PATH}"))?;
    log::info!(
        "Loaded {} cars with columns {:?}",
        dataset.len(),
        dataset.column_names
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CarDash – Cars Dashboard",
        options,
        Box::new(move |_cc| {
            let mut state = AppState::default();
            state.set_dataset(dataset);
            Ok(Box::new(CarDashApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
