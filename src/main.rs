mod app;
mod state;
mod ui;

use std::path::PathBuf;

use app::GeoVizApp;
use eframe::egui;
use geoviz::analysis::thresholds::ColumnNaming;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional first argument: CSV file to open instead of the default one.
    let cli_path = std::env::args_os().nth(1).map(PathBuf::from);
    let mut state = AppState::new(ColumnNaming::from_env());
    state.load_initial(cli_path.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GeoViz – Geotechnical Data Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(GeoVizApp::new(state)))),
    )
}
