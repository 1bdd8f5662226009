mod dto;
mod http;
mod transport;

pub use dto::{
    Ack, ChatContext, ChatHistoryEntry, ConversationLine, EchoChatRequest, EchoChatResponse, Item,
    JournalEntry, Mood, NewJournalEntry, NewQuickNote, QuickNote, SaveGame, Spell, SpellGrant,
    Vec3,
};
pub use http::{ApiError, EchoApi, HttpEchoApi};
pub use transport::{
    spawn_transport, RemoteCommand, RemoteEvent, RemoteHandle, RemoteOutcome, RequestId,
};
