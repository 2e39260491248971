use std::sync::Arc;

use anyhow::Context;
use room_api::transport::client::HttpTransport;
use tracing::{error, info};
use tracing_appender::rolling;

use crate::{
    client::RoomControlClient, config::AppConfig, state_store::StateStore,
    ui_management::UiManager,
};

mod client;
mod config;
mod state_store;
mod termination;
mod ui_management;

pub(crate) use termination::{create_termination, Interrupted, Terminator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = AppConfig::from_env()?;

    // the terminal belongs to the UI, so diagnostics go to a file
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("could not create log directory {:?}", config.log_dir))?;
    let file_appender = rolling::daily(&config.log_dir, "room-remote.log");
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::INFO)
        .init();

    let transport = HttpTransport::new(&config.room_control_url, config.request_timeout)?;
    info!(
        url = transport.base_url(),
        room = %config.room_name,
        camera_policy = ?config.camera_policy,
        "starting room remote"
    );
    let client = RoomControlClient::new(Arc::new(transport), config.camera_policy);

    let (terminator, mut interrupt_rx) = create_termination();
    let (state_store, state_rx) = StateStore::new(client, config.room_name.clone());
    let (ui_manager, action_rx) = UiManager::new();

    tokio::try_join!(
        state_store.main_loop(terminator, action_rx, interrupt_rx.resubscribe()),
        ui_manager.main_loop(state_rx, interrupt_rx.resubscribe()),
    )?;

    match interrupt_rx.recv().await {
        Ok(Interrupted::UserInt) => info!("exited per user request"),
        Ok(interrupted) => info!(?interrupted, "exited because of an os signal"),
        Err(err) => error!(error = %err, "exited without an interrupt reason"),
    }

    Ok(())
}
