use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use engine::{
    Ack, ApiError, ChatContext, ChatHistoryEntry, ConversationLine, EchoChatRequest,
    EchoChatResponse, InputSnapshot, Item, JournalEntry, Mood, NewJournalEntry, NewQuickNote,
    PlayerAction, QuickNote, RemoteCommand, RemoteEvent, RemoteHandle, RemoteOutcome, RequestId,
    SaveGame, Session, SessionCommand, Spell, SpellGrant, Vec3,
};
use tracing::{debug, info, warn};

const WALK_SPEED_UNITS_PER_SECOND: f32 = 4.0;
const RUN_SPEED_UNITS_PER_SECOND: f32 = 8.0;
const CROUCH_SPEED_UNITS_PER_SECOND: f32 = 2.0;
const JUMP_IMPULSE_UNITS_PER_SECOND: f32 = 8.0;
const FLY_IMPULSE_UNITS_PER_SECOND: f32 = 10.0;
const SWIM_IMPULSE_UNITS_PER_SECOND: f32 = 5.0;
const GRAVITY_UNITS_PER_SECOND_SQUARED: f32 = -20.0;
const GROUND_LEVEL: f32 = 0.0;
const WATER_BED_LEVEL: f32 = -1.0;
const WATER_SUBMERSION_THRESHOLD: f32 = -0.3;
const PICKUP_RADIUS_UNITS: f32 = 2.0;
const ENERGY_DRAIN_PER_SECOND: f32 = 10.0;
const ENERGY_RECOVERY_PER_SECOND: f32 = 5.0;
const ENERGY_MAX: f32 = 100.0;
const CAMERA_OFFSET_X: f32 = 0.0;
const CAMERA_OFFSET_Y: f32 = 3.0;
const CAMERA_OFFSET_Z: f32 = 5.0;
const CAMERA_LERP_FACTOR: f32 = 0.1;
const AUTOSAVE_INTERVAL_SECONDS: f32 = 30.0;
const ENTRANCE_AREA_ID: &str = "castle_entrance";
const ENTRANCE_DISPLAY_NAME: &str = "Castle Entrance";
const STARTING_MINI_GAME: &str = "retro_shooter_1";
const ECHO_FALLBACK_MESSAGE: &str =
    "I feel a disturbance in our connection... please try speaking to me again.";
const JOURNAL_SAVE_FAILED_NOTICE: &str = "Failed to save journal entry. Please try again.";
const NOTE_SAVE_FAILED_NOTICE: &str = "Failed to save note. Please try again.";
const LOADING_TITLE: &str = "Loading your world...";

include!("types.rs");
include!("world.rs");
include!("store.rs");
include!("controller.rs");
include!("chat.rs");
include!("journal.rs");
include!("session_impl.rs");
include!("util.rs");

pub(crate) fn build_session(player_name: String, remote: RemoteHandle) -> EchoSession {
    EchoSession::new(player_name, remote)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
