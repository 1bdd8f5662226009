// Seeded from the wall clock, strictly increasing: a removed id never
// recurs within a session.
#[derive(Debug, Clone)]
struct IdAllocator {
    next_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        Self { next_id: seed }
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuTab {
    Settings,
    WorldMap,
    Inventory,
    Journal,
    Conversations,
    Notes,
    Spellbook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PanelState {
    quick_menu_open: bool,
    chat_open: bool,
    active_tab: MenuTab,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            quick_menu_open: false,
            chat_open: false,
            active_tab: MenuTab::Settings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemSeed {
    name: String,
    kind: String,
    description: String,
}

/// Shallow merge: `Some` fields replace wholesale, last write wins.
#[derive(Debug, Clone, Default)]
struct StateUpdate {
    position: Option<Vec3>,
    mood: Option<Mood>,
    unlocked_areas: Option<Vec<String>>,
    inventory: Option<Vec<Item>>,
    spells: Option<Vec<Spell>>,
    conversation_history: Option<Vec<ConversationLine>>,
    location_names: Option<BTreeMap<String, String>>,
    room_decorations: Option<serde_json::Map<String, serde_json::Value>>,
    mini_games_unlocked: Option<Vec<String>>,
    mini_games_completed: Option<Vec<String>>,
}
