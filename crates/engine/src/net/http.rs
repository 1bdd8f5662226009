use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::dto::{
    Ack, ChatHistoryEntry, EchoChatRequest, EchoChatResponse, JournalEntry, NewJournalEntry,
    NewQuickNote, QuickNote, SaveGame,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("server returned status {status} for {operation}")]
    Status { operation: &'static str, status: u16 },
    #[error("failed to decode {operation} response at {path}: {source}")]
    Decode {
        operation: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Stateless request/response surface of the remote backend; all calls
/// block.
pub trait EchoApi {
    fn save_game(&self, snapshot: &SaveGame) -> Result<Ack, ApiError>;
    fn load_game(&self, player_name: &str) -> Result<SaveGame, ApiError>;
    fn chat_with_echo(&self, request: &EchoChatRequest) -> Result<EchoChatResponse, ApiError>;
    fn chat_history(&self, player_name: &str) -> Result<Vec<ChatHistoryEntry>, ApiError>;
    fn create_journal_entry(&self, entry: &NewJournalEntry) -> Result<Ack, ApiError>;
    fn journal_entries(&self, player_name: &str) -> Result<Vec<JournalEntry>, ApiError>;
    fn create_quick_note(&self, note: &NewQuickNote) -> Result<Ack, ApiError>;
    fn quick_notes(&self, player_name: &str) -> Result<Vec<QuickNote>, ApiError>;
}

pub struct HttpEchoApi {
    client: reqwest::blocking::Client,
    api_base: String,
}

impl HttpEchoApi {
    pub fn new(backend_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self {
            client,
            api_base: format!("{}/api", backend_url.trim_end_matches('/')),
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.api_base, path);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| ApiError::Transport { operation, source })?;
        Self::decode_response(operation, response)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.api_base, path);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|source| ApiError::Transport { operation, source })?;
        Self::decode_response(operation, response)
    }

    fn decode_response<T: DeserializeOwned>(
        operation: &'static str,
        response: reqwest::blocking::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                operation,
                status: status.as_u16(),
            });
        }
        let text = response
            .text()
            .map_err(|source| ApiError::Transport { operation, source })?;
        let mut deserializer = serde_json::Deserializer::from_str(&text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|error| ApiError::Decode {
            operation,
            path: error.path().to_string(),
            source: error.into_inner(),
        })
    }
}

impl EchoApi for HttpEchoApi {
    fn save_game(&self, snapshot: &SaveGame) -> Result<Ack, ApiError> {
        self.post_json("game_save", "game/save", snapshot)
    }

    fn load_game(&self, player_name: &str) -> Result<SaveGame, ApiError> {
        self.get_json("game_load", &format!("game/load/{player_name}"))
    }

    fn chat_with_echo(&self, request: &EchoChatRequest) -> Result<EchoChatResponse, ApiError> {
        self.post_json("chat_echo", "chat/echo", request)
    }

    fn chat_history(&self, player_name: &str) -> Result<Vec<ChatHistoryEntry>, ApiError> {
        self.get_json("chat_history", &format!("chat/history/{player_name}"))
    }

    fn create_journal_entry(&self, entry: &NewJournalEntry) -> Result<Ack, ApiError> {
        self.post_json("journal_create", "journal/entry", entry)
    }

    fn journal_entries(&self, player_name: &str) -> Result<Vec<JournalEntry>, ApiError> {
        self.get_json("journal_entries", &format!("journal/entries/{player_name}"))
    }

    fn create_quick_note(&self, note: &NewQuickNote) -> Result<Ack, ApiError> {
        self.post_json("note_create", "notes/quick", note)
    }

    fn quick_notes(&self, player_name: &str) -> Result<Vec<QuickNote>, ApiError> {
        self.get_json("quick_notes", &format!("notes/quick/{player_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_normalizes_trailing_slash() {
        let api = HttpEchoApi::new("http://localhost:8000/").expect("client");
        assert_eq!(api.api_base, "http://localhost:8000/api");
    }

    #[test]
    fn decode_error_names_the_offending_path() {
        let api_result: Result<SaveGame, ApiError> = {
            let text = r#"{"player_name": "Aria", "position": {"x": "not-a-number"}}"#;
            let mut deserializer = serde_json::Deserializer::from_str(text);
            serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
                ApiError::Decode {
                    operation: "game_load",
                    path: error.path().to_string(),
                    source: error.into_inner(),
                }
            })
        };

        match api_result {
            Err(ApiError::Decode { path, .. }) => assert!(path.contains("position")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
