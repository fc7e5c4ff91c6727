mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::StartupLensApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Explore startup funding records: overall trends, startups, investors and sectors.
#[derive(Parser)]
#[command(name = "startup-lens", version, about)]
struct Cli {
    /// Funding file to open on start (.csv, .json or .parquet)
    path: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::default();
    if let Some(path) = &cli.path {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "StartUp Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(StartupLensApp::new(state)))),
    )
}
