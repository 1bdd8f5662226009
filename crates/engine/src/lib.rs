use std::env;

use thiserror::Error;

pub mod app;
pub mod net;

pub use app::{
    run_app, run_app_with_stats, AppError, InputSnapshot, KeyBindings, LoopConfig,
    LoopStatsSnapshot, PlayerAction, Session, SessionCommand, StatsHandle,
};
pub use net::{
    spawn_transport, Ack, ApiError, ChatContext, ChatHistoryEntry, ConversationLine, EchoApi,
    EchoChatRequest, EchoChatResponse, HttpEchoApi, Item, JournalEntry, Mood, NewJournalEntry,
    NewQuickNote, QuickNote, RemoteCommand, RemoteEvent, RemoteHandle, RemoteOutcome, RequestId,
    SaveGame, Spell, SpellGrant, Vec3,
};

pub const BACKEND_ENV_VAR: &str = "ECHO_BACKEND_URL";
pub const PLAYER_NAME_ENV_VAR: &str = "ECHO_PLAYER_NAME";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub player_name: String,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error(
        "no backend endpoint configured.\n\
Set {env_var} to the base URL of the Echo Chambers backend, for example:\n\
Bash/zsh: export {env_var}=\"http://localhost:8000\"\n\
PowerShell: $env:{env_var}=\"http://localhost:8000\""
    )]
    MissingBackendUrl { env_var: &'static str },
    #[error("backend endpoint {value:?} is not an http(s) URL")]
    InvalidBackendUrl { value: String },
    #[error(
        "no player name supplied.\n\
Pass it as the first argument or set {env_var}."
    )]
    MissingPlayerName { env_var: &'static str },
}

pub fn resolve_client_config(cli_player_name: Option<String>) -> Result<ClientConfig, StartupError> {
    let backend_url = read_env(BACKEND_ENV_VAR)?;
    let player_name = match cli_player_name {
        Some(name) => Some(name),
        None => read_env(PLAYER_NAME_ENV_VAR)?,
    };
    config_from_values(backend_url, player_name)
}

fn read_env(var: &'static str) -> Result<Option<String>, StartupError> {
    match env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source) => Err(StartupError::EnvVar { var, source }),
    }
}

fn config_from_values(
    backend_url: Option<String>,
    player_name: Option<String>,
) -> Result<ClientConfig, StartupError> {
    let backend_url = backend_url
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .ok_or(StartupError::MissingBackendUrl {
            env_var: BACKEND_ENV_VAR,
        })?;
    if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
        return Err(StartupError::InvalidBackendUrl { value: backend_url });
    }

    let player_name = player_name
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(StartupError::MissingPlayerName {
            env_var: PLAYER_NAME_ENV_VAR,
        })?;

    Ok(ClientConfig {
        backend_url,
        player_name,
    })
}
