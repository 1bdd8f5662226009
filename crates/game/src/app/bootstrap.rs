use std::io;

use engine::{
    resolve_client_config, spawn_transport, ApiError, HttpEchoApi, LoopConfig, Session,
    StartupError,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::session;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) session: Box<dyn Session>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to start transport worker: {0}")]
    Transport(#[from] io::Error),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Echo Chambers Startup ===");

    let client = resolve_client_config(std::env::args().nth(1))?;
    info!(
        player = %client.player_name,
        backend = %client.backend_url,
        "client_config"
    );

    let api = HttpEchoApi::new(&client.backend_url)?;
    let remote = spawn_transport(Box::new(api))?;
    let session = session::build_session(client.player_name, remote);

    Ok(AppWiring {
        config: LoopConfig::default(),
        session: Box::new(session),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
