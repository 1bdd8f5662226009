/// One play session, driven by the fixed-timestep loop on a single
/// thread. The transport worker is the only other thread; its
/// completions are applied at the top of each tick.
pub(crate) struct EchoSession {
    player_name: String,
    remote: RemoteHandle,
    store: GameStateStore,
    rig: PlayerRig,
    world: WorldRegistry,
    chat: ChatSession,
    journals: Journals,
    panels: PanelState,
}

impl EchoSession {
    pub(crate) fn new(player_name: String, remote: RemoteHandle) -> Self {
        let store = GameStateStore::new(player_name.clone());
        let spawn = store.state().position;
        Self {
            player_name,
            remote,
            store,
            rig: PlayerRig::new(spawn),
            world: WorldRegistry::castle_grounds(),
            chat: ChatSession::new(),
            journals: Journals::new(),
            panels: PanelState::default(),
        }
    }

    fn dispatch_completion(&mut self, event: RemoteEvent) {
        match event.outcome {
            RemoteOutcome::Save(result) => self.store.handle_save_result(result),
            RemoteOutcome::Load(result) => {
                self.store.handle_load_result(event.request_id, result)
            }
            RemoteOutcome::Chat(result) => {
                self.chat
                    .handle_chat_result(event.request_id, result, &mut self.store)
            }
            RemoteOutcome::ChatHistory(result) => {
                self.chat.handle_history_result(event.request_id, result)
            }
            RemoteOutcome::JournalCreated(result) => self.journals.handle_entry_created(
                event.request_id,
                result,
                &self.store,
                &mut self.remote,
            ),
            RemoteOutcome::JournalEntries(result) => {
                self.journals.handle_entries_result(event.request_id, result)
            }
            RemoteOutcome::NoteCreated(result) => self.journals.handle_note_created(
                event.request_id,
                result,
                &self.store,
                &mut self.remote,
            ),
            RemoteOutcome::QuickNotes(result) => {
                self.journals.handle_notes_result(event.request_id, result)
            }
        }
    }

    fn apply_panel_toggles(&mut self, input: &InputSnapshot) {
        if input.pressed(PlayerAction::QuickMenu) {
            self.panels.quick_menu_open = !self.panels.quick_menu_open;
        }
        if input.pressed(PlayerAction::Chat) {
            self.panels.chat_open = !self.panels.chat_open;
        }
        if input.pressed(PlayerAction::Journal) {
            self.panels.quick_menu_open = true;
            self.panels.active_tab = MenuTab::Journal;
        }
        if input.pressed(PlayerAction::Inventory) {
            self.panels.quick_menu_open = true;
            self.panels.active_tab = MenuTab::Inventory;
        }
        if input.pressed(PlayerAction::Spells) {
            self.panels.quick_menu_open = true;
            self.panels.active_tab = MenuTab::Spellbook;
        }
        if input.close_pressed() {
            self.panels.quick_menu_open = false;
            self.panels.chat_open = false;
        }
    }
}

/// Operations invoked by the presentation layer and tests.
#[allow(dead_code)]
impl EchoSession {
    pub(crate) fn send_chat(&mut self, text: &str) -> ChatSendOutcome {
        self.chat.send(text, &mut self.store, &mut self.remote)
    }

    pub(crate) fn submit_journal_entry(&mut self, title: &str, content: &str) -> SubmitOutcome {
        self.journals
            .submit_entry(title, content, &self.store, &self.world, &mut self.remote)
    }

    pub(crate) fn submit_quick_note(&mut self, content: &str) -> SubmitOutcome {
        self.journals
            .submit_note(content, &self.store, &mut self.remote)
    }

    pub(crate) fn refresh_chat_history(&mut self) {
        self.chat.refresh_history(&self.store, &mut self.remote);
    }

    pub(crate) fn refresh_journal(&mut self) {
        self.journals.refresh_entries(&self.store, &mut self.remote);
    }

    pub(crate) fn refresh_notes(&mut self) {
        self.journals.refresh_notes(&self.store, &mut self.remote);
    }

    pub(crate) fn save_now(&mut self) {
        self.store.persist(&mut self.remote);
    }

    pub(crate) fn game_state(&self) -> &SaveGame {
        self.store.state()
    }

    pub(crate) fn panels(&self) -> PanelState {
        self.panels
    }

    pub(crate) fn chat_is_typing(&self) -> bool {
        self.chat.is_typing()
    }

    pub(crate) fn remote_chat_history(&self) -> &[ChatHistoryEntry] {
        &self.chat.remote_history
    }

    pub(crate) fn journal_entries(&self) -> &[JournalEntry] {
        &self.journals.entries
    }

    pub(crate) fn quick_notes(&self) -> &[QuickNote] {
        &self.journals.notes
    }

    pub(crate) fn take_notices(&mut self) -> Vec<String> {
        self.journals.take_notices()
    }

    pub(crate) fn remote_in_flight(&self) -> usize {
        self.remote.in_flight()
    }
}

impl Session for EchoSession {
    fn start(&mut self) {
        self.store.begin_load(&mut self.remote);
        info!(player = %self.player_name, "session_started");
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SessionCommand {
        for event in self.remote.drain_completions() {
            self.dispatch_completion(event);
        }

        if input.quit_requested() {
            return SessionCommand::Quit;
        }

        self.apply_panel_toggles(input);

        if !self.store.is_loading() {
            let mut position = self.store.state().position;
            let picked = self
                .rig
                .tick(fixed_dt_seconds, input, &mut position, &mut self.world);
            self.store.apply(StateUpdate {
                position: Some(position),
                ..StateUpdate::default()
            });
            for object in picked {
                info!(item = object.name, "item_collected");
                self.store.add_to_inventory(object.into_item_seed());
            }
        }

        if input.save_pressed() {
            self.store.persist(&mut self.remote);
        }
        self.store.tick_autosave(fixed_dt_seconds, &mut self.remote);

        SessionCommand::None
    }

    fn title(&self) -> Option<String> {
        if self.store.is_loading() {
            return Some(format!("Echo Chambers | {LOADING_TITLE}"));
        }
        let state = self.store.state();
        let typing = if self.chat.is_typing() {
            " | Echo is contemplating..."
        } else {
            ""
        };
        Some(format!(
            "Echo Chambers | {} | ({:.1}, {:.1}, {:.1}) | {}{}",
            state.player_name,
            state.position.x,
            state.position.y,
            state.position.z,
            state.mood.as_str(),
            typing
        ))
    }

    fn shutdown(&mut self) {
        info!(player = %self.player_name, "session_shutdown");
    }
}
