/// Single writer of the session's game-state record: every mutation
/// funnels through a named operation here.
struct GameStateStore {
    state: SaveGame,
    ids: IdAllocator,
    autosave_elapsed_seconds: f32,
    load_request: Option<RequestId>,
    loading: bool,
}

impl GameStateStore {
    fn new(player_name: String) -> Self {
        Self {
            state: default_state(player_name),
            ids: IdAllocator::new(),
            autosave_elapsed_seconds: 0.0,
            load_request: None,
            loading: false,
        }
    }

    fn state(&self) -> &SaveGame {
        &self.state
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    // Defaults stay in place until, and unless, the load succeeds.
    fn begin_load(&mut self, remote: &mut RemoteHandle) {
        let request_id = remote.submit(RemoteCommand::LoadGame {
            player_name: self.state.player_name.clone(),
        });
        self.load_request = Some(request_id);
        self.loading = true;
    }

    fn handle_load_result(
        &mut self,
        request_id: RequestId,
        result: Result<Box<SaveGame>, ApiError>,
    ) {
        if self.load_request != Some(request_id) {
            debug!(request_id = request_id.0, "stale_load_result_ignored");
            return;
        }
        self.load_request = None;
        self.loading = false;

        match result {
            Ok(snapshot) => {
                // Full overwrite, not a merge.
                self.state = *snapshot;
                info!(
                    player = %self.state.player_name,
                    areas = self.state.unlocked_areas.len(),
                    items = self.state.inventory.len(),
                    "game_loaded"
                );
            }
            Err(error) => warn!(error = %error, "game_load_failed"),
        }
    }

    fn apply(&mut self, update: StateUpdate) {
        if let Some(position) = update.position {
            self.state.position = position;
        }
        if let Some(mood) = update.mood {
            self.state.mood = mood;
        }
        if let Some(unlocked_areas) = update.unlocked_areas {
            self.state.unlocked_areas = unlocked_areas;
        }
        if let Some(inventory) = update.inventory {
            self.state.inventory = inventory;
        }
        if let Some(spells) = update.spells {
            self.state.spells = spells;
        }
        if let Some(conversation_history) = update.conversation_history {
            self.state.conversation_history = conversation_history;
        }
        if let Some(location_names) = update.location_names {
            self.state.location_names = location_names;
        }
        if let Some(room_decorations) = update.room_decorations {
            self.state.room_decorations = room_decorations;
        }
        if let Some(mini_games_unlocked) = update.mini_games_unlocked {
            self.state.mini_games_unlocked = mini_games_unlocked;
        }
        if let Some(mini_games_completed) = update.mini_games_completed {
            self.state.mini_games_completed = mini_games_completed;
        }
    }

    fn add_to_inventory(&mut self, seed: ItemSeed) -> u64 {
        let id = self.ids.alloc();
        self.state.inventory.push(Item {
            id,
            name: seed.name,
            kind: seed.kind,
            description: seed.description,
        });
        id
    }

    // First match wins; no-op when absent.
    #[allow(dead_code)]
    fn remove_from_inventory(&mut self, id: u64) {
        if let Some(index) = self.state.inventory.iter().position(|item| item.id == id) {
            self.state.inventory.remove(index);
        }
    }

    // No duplicate guard: unlocking twice records twice.
    fn unlock_area(&mut self, area_id: &str, display_name: &str) {
        self.state.unlocked_areas.push(area_id.to_string());
        self.state
            .location_names
            .insert(area_id.to_string(), display_name.to_string());
    }

    fn learn_spell(&mut self, grant: &SpellGrant) -> u64 {
        let id = self.ids.alloc();
        self.state.spells.push(Spell {
            id,
            name: grant.name.clone(),
            description: grant.description.clone(),
            element: grant.element.clone(),
        });
        id
    }

    fn update_mood(&mut self, mood: Mood) {
        self.state.mood = mood;
    }

    fn add_conversation(&mut self, message: &str, is_echo: bool) -> u64 {
        let id = self.ids.alloc();
        self.state.conversation_history.push(ConversationLine {
            id,
            message: message.to_string(),
            is_echo,
            timestamp: utc_timestamp(),
        });
        id
    }

    #[allow(dead_code)]
    fn unlock_mini_game(&mut self, mini_game_id: &str) {
        if !self
            .state
            .mini_games_unlocked
            .iter()
            .any(|id| id == mini_game_id)
        {
            self.state.mini_games_unlocked.push(mini_game_id.to_string());
        }
    }

    #[allow(dead_code)]
    fn complete_mini_game(&mut self, mini_game_id: &str) {
        if !self
            .state
            .mini_games_completed
            .iter()
            .any(|id| id == mini_game_id)
        {
            self.state
                .mini_games_completed
                .push(mini_game_id.to_string());
        }
    }

    // Fire-and-forget: the result only surfaces in the log.
    fn persist(&mut self, remote: &mut RemoteHandle) -> RequestId {
        debug!(player = %self.state.player_name, "save_requested");
        remote.submit(RemoteCommand::SaveGame(Box::new(self.state.clone())))
    }

    fn tick_autosave(&mut self, fixed_dt_seconds: f32, remote: &mut RemoteHandle) {
        self.autosave_elapsed_seconds += fixed_dt_seconds;
        if self.autosave_elapsed_seconds >= AUTOSAVE_INTERVAL_SECONDS {
            self.autosave_elapsed_seconds -= AUTOSAVE_INTERVAL_SECONDS;
            self.persist(remote);
        }
    }

    fn handle_save_result(&self, result: Result<Ack, ApiError>) {
        match result {
            Ok(ack) => debug!(message = %ack.message, "game_saved"),
            Err(error) => warn!(error = %error, "game_save_failed"),
        }
    }
}

fn default_state(player_name: String) -> SaveGame {
    SaveGame {
        player_name,
        position: Vec3::default(),
        mood: Mood::Neutral,
        unlocked_areas: vec![ENTRANCE_AREA_ID.to_string()],
        inventory: Vec::new(),
        spells: Vec::new(),
        journal_entries: Vec::new(),
        conversation_history: Vec::new(),
        quick_notes: Vec::new(),
        room_decorations: serde_json::Map::new(),
        mini_games_completed: Vec::new(),
        mini_games_unlocked: vec![STARTING_MINI_GAME.to_string()],
        location_names: [(
            ENTRANCE_AREA_ID.to_string(),
            ENTRANCE_DISPLAY_NAME.to_string(),
        )]
        .into_iter()
        .collect(),
    }
}
