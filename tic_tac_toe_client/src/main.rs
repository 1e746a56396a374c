use tic_tac_toe_client::config::{Cli, ClientConfig};
use tic_tac_toe_client::game_app::GameApp;
use tic_tac_toe_client::game_service::{GameBackend, GameService};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = ClientConfig::from_cli(Cli::parse())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let _guard = runtime.enter();

    let service = GameService::new(config.server_url.clone());
    info!("🚀 Using game server at {}", service.server_url());
    let backend: Arc<dyn GameBackend> = Arc::new(service);
    let check_model = config.check_model;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([460.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |cc| Ok(Box::new(GameApp::new(cc, backend, check_model)))),
    )
    .map_err(|e| anyhow!("window closed with error: {e}"))
}
