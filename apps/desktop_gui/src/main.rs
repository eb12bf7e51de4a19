use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::Theme;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{FlightpathApp, PersistedGuiSettings, SETTINGS_STORAGE_KEY};

/// Phone-sized viewport the screens are laid out for.
const VIEWPORT: [f32; 2] = [375.0, 719.0];

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured and the remembered theme.
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    Theme::parse(raw).ok_or_else(|| format!("unknown theme '{raw}', expected light or dark"))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let settings = match load_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!("{err:#}; falling back to default settings");
            client_core::Settings::default()
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.payment_delay());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Flightpath")
            .with_inner_size(VIEWPORT)
            .with_min_inner_size(VIEWPORT),
        ..Default::default()
    };
    eframe::run_native(
        "Flightpath",
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedGuiSettings>(&text).ok())
            });
            let persisted = match args.theme {
                Some(theme) => Some(PersistedGuiSettings { theme }),
                None => persisted,
            };
            Ok(Box::new(FlightpathApp::new(settings, cmd_tx, ui_rx, persisted)))
        }),
    )
}
