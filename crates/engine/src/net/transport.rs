use std::io;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use super::dto::{
    Ack, ChatHistoryEntry, EchoChatRequest, EchoChatResponse, JournalEntry, NewJournalEntry,
    NewQuickNote, QuickNote, SaveGame,
};
use super::http::{ApiError, EchoApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone)]
pub enum RemoteCommand {
    SaveGame(Box<SaveGame>),
    LoadGame { player_name: String },
    Chat(Box<EchoChatRequest>),
    FetchChatHistory { player_name: String },
    CreateJournalEntry(NewJournalEntry),
    FetchJournalEntries { player_name: String },
    CreateQuickNote(NewQuickNote),
    FetchQuickNotes { player_name: String },
}

#[derive(Debug)]
pub enum RemoteOutcome {
    Save(Result<Ack, ApiError>),
    Load(Result<Box<SaveGame>, ApiError>),
    Chat(Result<EchoChatResponse, ApiError>),
    ChatHistory(Result<Vec<ChatHistoryEntry>, ApiError>),
    JournalCreated(Result<Ack, ApiError>),
    JournalEntries(Result<Vec<JournalEntry>, ApiError>),
    NoteCreated(Result<Ack, ApiError>),
    QuickNotes(Result<Vec<QuickNote>, ApiError>),
}

#[derive(Debug)]
pub struct RemoteEvent {
    pub request_id: RequestId,
    pub outcome: RemoteOutcome,
}

/// Handle to the single transport worker. Requests are processed
/// strictly in submission order, which keeps overlapping saves of the
/// shared snapshot serialized.
pub struct RemoteHandle {
    commands: Sender<(RequestId, RemoteCommand)>,
    completions: Receiver<RemoteEvent>,
    next_request_id: u64,
    in_flight: usize,
}

impl RemoteHandle {
    pub fn submit(&mut self, command: RemoteCommand) -> RequestId {
        let request_id = RequestId(self.next_request_id);
        self.next_request_id = self.next_request_id.saturating_add(1);
        match self.commands.send((request_id, command)) {
            Ok(()) => {
                self.in_flight = self.in_flight.saturating_add(1);
            }
            Err(_) => {
                // Worker gone; the request is silently lost.
                warn!(request_id = request_id.0, "transport_worker_unavailable");
            }
        }
        request_id
    }

    pub fn drain_completions(&mut self) -> Vec<RemoteEvent> {
        let mut events = Vec::new();
        loop {
            match self.completions.try_recv() {
                Ok(event) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    events.push(event);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

pub fn spawn_transport(api: Box<dyn EchoApi + Send>) -> io::Result<RemoteHandle> {
    let (command_tx, command_rx) = mpsc::channel::<(RequestId, RemoteCommand)>();
    let (completion_tx, completion_rx) = mpsc::channel::<RemoteEvent>();

    thread::Builder::new()
        .name("echo-transport".to_string())
        .spawn(move || worker_loop(api, command_rx, completion_tx))?;

    Ok(RemoteHandle {
        commands: command_tx,
        completions: completion_rx,
        next_request_id: 0,
        in_flight: 0,
    })
}

fn worker_loop(
    api: Box<dyn EchoApi + Send>,
    commands: Receiver<(RequestId, RemoteCommand)>,
    completions: Sender<RemoteEvent>,
) {
    while let Ok((request_id, command)) = commands.recv() {
        let outcome = execute(api.as_ref(), command);
        if completions.send(RemoteEvent {
            request_id,
            outcome,
        })
        .is_err()
        {
            break;
        }
    }
    debug!("transport_worker_stopped");
}

fn execute(api: &dyn EchoApi, command: RemoteCommand) -> RemoteOutcome {
    match command {
        RemoteCommand::SaveGame(snapshot) => RemoteOutcome::Save(api.save_game(&snapshot)),
        RemoteCommand::LoadGame { player_name } => {
            RemoteOutcome::Load(api.load_game(&player_name).map(Box::new))
        }
        RemoteCommand::Chat(request) => RemoteOutcome::Chat(api.chat_with_echo(&request)),
        RemoteCommand::FetchChatHistory { player_name } => {
            RemoteOutcome::ChatHistory(api.chat_history(&player_name))
        }
        RemoteCommand::CreateJournalEntry(entry) => {
            RemoteOutcome::JournalCreated(api.create_journal_entry(&entry))
        }
        RemoteCommand::FetchJournalEntries { player_name } => {
            RemoteOutcome::JournalEntries(api.journal_entries(&player_name))
        }
        RemoteCommand::CreateQuickNote(note) => {
            RemoteOutcome::NoteCreated(api.create_quick_note(&note))
        }
        RemoteCommand::FetchQuickNotes { player_name } => {
            RemoteOutcome::QuickNotes(api.quick_notes(&player_name))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::super::dto::{ChatContext, Mood, Vec3};
    use super::*;

    /// Scripted backend double; every call succeeds with canned data.
    struct FakeApi;

    impl EchoApi for FakeApi {
        fn save_game(&self, _snapshot: &SaveGame) -> Result<Ack, ApiError> {
            Ok(Ack {
                message: "Game saved successfully".to_string(),
            })
        }

        fn load_game(&self, player_name: &str) -> Result<SaveGame, ApiError> {
            Ok(sample_snapshot(player_name))
        }

        fn chat_with_echo(&self, request: &EchoChatRequest) -> Result<EchoChatResponse, ApiError> {
            Ok(EchoChatResponse {
                message: format!("echo: {}", request.message),
                mood_change: None,
                spell_learned: None,
                area_unlocked: None,
            })
        }

        fn chat_history(&self, _player_name: &str) -> Result<Vec<ChatHistoryEntry>, ApiError> {
            Ok(Vec::new())
        }

        fn create_journal_entry(&self, _entry: &NewJournalEntry) -> Result<Ack, ApiError> {
            Ok(Ack {
                message: "Journal entry created successfully".to_string(),
            })
        }

        fn journal_entries(&self, _player_name: &str) -> Result<Vec<JournalEntry>, ApiError> {
            Ok(Vec::new())
        }

        fn create_quick_note(&self, _note: &NewQuickNote) -> Result<Ack, ApiError> {
            Ok(Ack {
                message: "Quick note created successfully".to_string(),
            })
        }

        fn quick_notes(&self, _player_name: &str) -> Result<Vec<QuickNote>, ApiError> {
            Ok(Vec::new())
        }
    }

    fn sample_snapshot(player_name: &str) -> SaveGame {
        SaveGame {
            player_name: player_name.to_string(),
            position: Vec3::default(),
            mood: Mood::Neutral,
            unlocked_areas: vec!["castle_entrance".to_string()],
            inventory: Vec::new(),
            spells: Vec::new(),
            journal_entries: Vec::new(),
            conversation_history: Vec::new(),
            quick_notes: Vec::new(),
            room_decorations: serde_json::Map::new(),
            mini_games_completed: Vec::new(),
            mini_games_unlocked: vec!["retro_shooter_1".to_string()],
            location_names: [("castle_entrance".to_string(), "Castle Entrance".to_string())]
                .into_iter()
                .collect(),
        }
    }

    fn sample_chat_request(message: &str) -> RemoteCommand {
        RemoteCommand::Chat(Box::new(EchoChatRequest {
            player_name: "Aria".to_string(),
            message: message.to_string(),
            context: ChatContext {
                mood: Mood::Neutral,
                location: Vec3::default(),
                spells: Vec::new(),
                unlocked_areas: vec!["castle_entrance".to_string()],
            },
        }))
    }

    fn wait_for_events(handle: &mut RemoteHandle, expected: usize) -> Vec<RemoteEvent> {
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut events = Vec::new();
        while events.len() < expected {
            events.extend(handle.drain_completions());
            if Instant::now() > deadline {
                panic!("timed out waiting for {expected} completions, got {}", events.len());
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        events
    }

    #[test]
    fn completions_preserve_submission_order() {
        let mut handle = spawn_transport(Box::new(FakeApi)).expect("transport");

        let first = handle.submit(RemoteCommand::SaveGame(Box::new(sample_snapshot("Aria"))));
        let second = handle.submit(sample_chat_request("hello"));
        let third = handle.submit(RemoteCommand::LoadGame {
            player_name: "Aria".to_string(),
        });
        assert_eq!(handle.in_flight(), 3);

        let events = wait_for_events(&mut handle, 3);
        assert_eq!(events[0].request_id, first);
        assert_eq!(events[1].request_id, second);
        assert_eq!(events[2].request_id, third);
        assert!(matches!(events[0].outcome, RemoteOutcome::Save(Ok(_))));
        assert!(matches!(events[1].outcome, RemoteOutcome::Chat(Ok(_))));
        assert!(matches!(events[2].outcome, RemoteOutcome::Load(Ok(_))));
        assert_eq!(handle.in_flight(), 0);
    }

    #[test]
    fn drain_is_non_blocking_when_nothing_is_pending() {
        let mut handle = spawn_transport(Box::new(FakeApi)).expect("transport");
        assert!(handle.drain_completions().is_empty());
        assert_eq!(handle.in_flight(), 0);
    }

    #[test]
    fn request_ids_are_monotonically_increasing() {
        let mut handle = spawn_transport(Box::new(FakeApi)).expect("transport");
        let a = handle.submit(sample_chat_request("one"));
        let b = handle.submit(sample_chat_request("two"));
        assert!(b.0 > a.0);
        let _ = wait_for_events(&mut handle, 2);
    }

    #[test]
    fn chat_outcome_carries_the_companion_reply() {
        let mut handle = spawn_transport(Box::new(FakeApi)).expect("transport");
        handle.submit(sample_chat_request("hello"));

        let events = wait_for_events(&mut handle, 1);
        match &events[0].outcome {
            RemoteOutcome::Chat(Ok(response)) => assert_eq!(response.message, "echo: hello"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
