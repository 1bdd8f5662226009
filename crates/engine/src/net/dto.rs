use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Neutral,
    Melancholic,
    Radiant,
    Contemplative,
    Peaceful,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Melancholic => "melancholic",
            Mood::Radiant => "radiant",
            Mood::Contemplative => "contemplative",
            Mood::Peaceful => "peaceful",
        }
    }

    // The companion can emit mood words outside the recognized set;
    // callers drop those.
    pub fn from_wire(value: &str) -> Option<Mood> {
        match value {
            "neutral" => Some(Mood::Neutral),
            "melancholic" => Some(Mood::Melancholic),
            "radiant" => Some(Mood::Radiant),
            "contemplative" => Some(Mood::Contemplative),
            "peaceful" => Some(Mood::Peaceful),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub element: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationLine {
    pub id: u64,
    pub message: String,
    #[serde(rename = "isEcho")]
    pub is_echo: bool,
    pub timestamp: String,
}

/// Full snapshot: the client's single state record and, unchanged, the
/// wire body of save/load. Loads overwrite the whole record, no merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub player_name: String,
    pub position: Vec3,
    pub mood: Mood,
    pub unlocked_areas: Vec<String>,
    pub inventory: Vec<Item>,
    pub spells: Vec<Spell>,
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
    pub conversation_history: Vec<ConversationLine>,
    #[serde(default)]
    pub quick_notes: Vec<QuickNote>,
    #[serde(default)]
    pub room_decorations: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub mini_games_completed: Vec<String>,
    #[serde(default)]
    pub mini_games_unlocked: Vec<String>,
    pub location_names: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatContext {
    pub mood: Mood,
    pub location: Vec3,
    pub spells: Vec<Spell>,
    pub unlocked_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoChatRequest {
    pub player_name: String,
    pub message: String,
    pub context: ChatContext,
}

// Spell grants carry no id; the client assigns one on learn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellGrant {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub element: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoChatResponse {
    pub message: String,
    #[serde(default)]
    pub mood_change: Option<String>,
    #[serde(default)]
    pub spell_learned: Option<SpellGrant>,
    #[serde(default)]
    pub area_unlocked: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    #[serde(default)]
    pub id: String,
    pub player_name: String,
    pub message: String,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
    #[serde(default)]
    pub timestamp: String,
}

// The server assigns id and timestamp on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub player_name: String,
    pub title: String,
    pub content: String,
    pub mood: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default)]
    pub id: String,
    pub player_name: String,
    pub title: String,
    pub content: String,
    pub mood: String,
    pub location: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuickNote {
    pub player_name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickNote {
    #[serde(default)]
    pub id: String,
    pub player_name: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_round_trips_through_wire_names() {
        for mood in [
            Mood::Neutral,
            Mood::Melancholic,
            Mood::Radiant,
            Mood::Contemplative,
            Mood::Peaceful,
        ] {
            assert_eq!(Mood::from_wire(mood.as_str()), Some(mood));
        }
        assert_eq!(Mood::from_wire("mysterious"), None);
    }

    #[test]
    fn mood_serializes_as_lowercase_string() {
        let json = serde_json::to_string(&Mood::Melancholic).expect("serialize");
        assert_eq!(json, "\"melancholic\"");
    }

    #[test]
    fn item_kind_serializes_under_type_key() {
        let item = Item {
            id: 7,
            name: "Moonstone Crystal".to_string(),
            kind: "crystal".to_string(),
            description: "A mystical crystal found in the castle grounds.".to_string(),
        };
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["type"], "crystal");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn conversation_line_uses_is_echo_key() {
        let line = ConversationLine {
            id: 1,
            message: "hello".to_string(),
            is_echo: true,
            timestamp: "2025-01-01T00:00:00Z".to_string(),
        };
        let value = serde_json::to_value(&line).expect("serialize");
        assert_eq!(value["isEcho"], true);
    }

    #[test]
    fn chat_response_side_effect_fields_default_to_none() {
        let response: EchoChatResponse =
            serde_json::from_str(r#"{"message":"Welcome, wanderer."}"#).expect("decode");
        assert_eq!(response.message, "Welcome, wanderer.");
        assert!(response.mood_change.is_none());
        assert!(response.spell_learned.is_none());
        assert!(response.area_unlocked.is_none());
    }

    #[test]
    fn save_game_ignores_server_extra_fields() {
        let json = r#"{
            "id": "b2c7...",
            "timestamp": "2025-01-01T00:00:00Z",
            "player_name": "Aria",
            "position": {"x": 1.0, "y": 0.0, "z": -2.0},
            "mood": "peaceful",
            "unlocked_areas": ["castle_entrance"],
            "inventory": [],
            "spells": [],
            "journal_entries": [],
            "conversation_history": [],
            "quick_notes": [],
            "room_decorations": {},
            "mini_games_completed": [],
            "mini_games_unlocked": ["retro_shooter_1"],
            "location_names": {"castle_entrance": "Castle Entrance"}
        }"#;
        let snapshot: SaveGame = serde_json::from_str(json).expect("decode");
        assert_eq!(snapshot.player_name, "Aria");
        assert_eq!(snapshot.mood, Mood::Peaceful);
        assert_eq!(
            snapshot.location_names.get("castle_entrance").map(String::as_str),
            Some("Castle Entrance")
        );
    }
}
