mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::DashboardApp;
use config::Config;
use data::loader::load_dataset;
use data::stats::DatasetSummary;
use state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browser CPU/RAM test-run dashboard", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the capture CSV files (overrides the config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Print the per-test summary as JSON and exit without opening a window
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    if cli.summary {
        return print_summary(&config);
    }

    let mut state = AppState::new(config);
    if let Err(e) = state.reload(true) {
        // Shown in the window; keep going so the presentation page still works.
        log::warn!("Starting without data: {e}");
    }

    run_window(state)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("running the dashboard window")
}

fn run_window(state: AppState) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Browser Resource Dashboard",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the presentation figures.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
}

fn print_summary(config: &Config) -> Result<()> {
    let source = config.source();
    let dataset = load_dataset(&source, &config.schema)
        .with_context(|| format!("loading captures from {}", source.dir.display()))?;
    let summary = DatasetSummary::new(&dataset);
    let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
    println!("{json}");
    Ok(())
}
