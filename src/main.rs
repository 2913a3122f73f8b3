mod app;
mod color;
mod config;
mod data;
mod event;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::WeathervaneApp;
use config::WidgetConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let title = config.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(WeathervaneApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}

/// An explicitly given config path must be valid; without one, a missing
/// `weathervane.json` just starts the app with an empty source list.
fn load_config() -> anyhow::Result<WidgetConfig> {
    match std::env::args_os().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            Ok(WidgetConfig::from_file(&path)?)
        }
        None => {
            let default = Path::new("weathervane.json");
            if default.exists() {
                Ok(WidgetConfig::from_file(default)?)
            } else {
                log::info!("no weathervane.json found, starting without sources");
                Ok(WidgetConfig::empty())
            }
        }
    }
}
