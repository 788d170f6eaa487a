mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use client_core::config::load_settings;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;
use ui::AdlibApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings(None);
    let server_url = settings.server_url.clone();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Ad-lib")
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Ad-lib",
        options,
        Box::new(|_cc| Ok(Box::new(AdlibApp::new(cmd_tx, ui_rx, server_url)))),
    )
}
