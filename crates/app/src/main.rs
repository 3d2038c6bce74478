mod state;
mod ui;

use eframe::egui;
use pledgemap_core::config::{load_config, TreemapConfig};
use state::AppState;
use std::path::PathBuf;

struct PledgeMapApp {
    state: AppState,
}

impl PledgeMapApp {
    fn new(_cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PledgeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::draw(&mut self.state, ctx);
    }
}

fn main() -> eframe::Result<()> {
    pledgemap_core::logging::init();

    // Usage: pledgemap-app [dataset.json] [config.json]
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let dataset = args.next();
    let config = match load_config(args.next().as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "could not read config, using defaults");
            TreemapConfig::default()
        }
    };

    let mut state = AppState::new(config);
    if let Some(path) = dataset {
        state.open(path);
    }

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Kickstarter Pledges",
        options,
        Box::new(move |cc| Ok(Box::new(PledgeMapApp::new(cc, state)))),
    )
}
