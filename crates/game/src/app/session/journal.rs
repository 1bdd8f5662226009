#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitOutcome {
    Submitted(RequestId),
    EmptyInput,
}

/// Journal entries and quick notes live server-side; this tracks the
/// in-flight writes, cached lists, and failure notices.
struct Journals {
    entry_creates: Vec<RequestId>,
    entry_list_request: Option<RequestId>,
    entries: Vec<JournalEntry>,
    note_creates: Vec<RequestId>,
    note_list_request: Option<RequestId>,
    notes: Vec<QuickNote>,
    notices: Vec<String>,
}

impl Journals {
    fn new() -> Self {
        Self {
            entry_creates: Vec::new(),
            entry_list_request: None,
            entries: Vec::new(),
            note_creates: Vec::new(),
            note_list_request: None,
            notes: Vec::new(),
            notices: Vec::new(),
        }
    }

    // Blank titles or bodies never leave the client.
    fn submit_entry(
        &mut self,
        title: &str,
        content: &str,
        store: &GameStateStore,
        world: &WorldRegistry,
        remote: &mut RemoteHandle,
    ) -> SubmitOutcome {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return SubmitOutcome::EmptyInput;
        }

        let state = store.state();
        let entry = NewJournalEntry {
            player_name: state.player_name.clone(),
            title: title.to_string(),
            content: content.to_string(),
            mood: state.mood.as_str().to_string(),
            location: world.area_for_position(state.position).to_string(),
        };
        let request_id = remote.submit(RemoteCommand::CreateJournalEntry(entry));
        self.entry_creates.push(request_id);
        SubmitOutcome::Submitted(request_id)
    }

    fn submit_note(
        &mut self,
        content: &str,
        store: &GameStateStore,
        remote: &mut RemoteHandle,
    ) -> SubmitOutcome {
        let content = content.trim();
        if content.is_empty() {
            return SubmitOutcome::EmptyInput;
        }

        let note = NewQuickNote {
            player_name: store.state().player_name.clone(),
            content: content.to_string(),
        };
        let request_id = remote.submit(RemoteCommand::CreateQuickNote(note));
        self.note_creates.push(request_id);
        SubmitOutcome::Submitted(request_id)
    }

    fn refresh_entries(&mut self, store: &GameStateStore, remote: &mut RemoteHandle) -> RequestId {
        let request_id = remote.submit(RemoteCommand::FetchJournalEntries {
            player_name: store.state().player_name.clone(),
        });
        self.entry_list_request = Some(request_id);
        request_id
    }

    fn refresh_notes(&mut self, store: &GameStateStore, remote: &mut RemoteHandle) -> RequestId {
        let request_id = remote.submit(RemoteCommand::FetchQuickNotes {
            player_name: store.state().player_name.clone(),
        });
        self.note_list_request = Some(request_id);
        request_id
    }

    fn handle_entry_created(
        &mut self,
        request_id: RequestId,
        result: Result<Ack, ApiError>,
        store: &GameStateStore,
        remote: &mut RemoteHandle,
    ) {
        let Some(index) = self.entry_creates.iter().position(|id| *id == request_id) else {
            return;
        };
        self.entry_creates.remove(index);

        match result {
            Ok(_) => {
                self.refresh_entries(store, remote);
            }
            Err(error) => {
                warn!(error = %error, "journal_entry_create_failed");
                self.notices.push(JOURNAL_SAVE_FAILED_NOTICE.to_string());
            }
        }
    }

    fn handle_note_created(
        &mut self,
        request_id: RequestId,
        result: Result<Ack, ApiError>,
        store: &GameStateStore,
        remote: &mut RemoteHandle,
    ) {
        let Some(index) = self.note_creates.iter().position(|id| *id == request_id) else {
            return;
        };
        self.note_creates.remove(index);

        match result {
            Ok(_) => {
                self.refresh_notes(store, remote);
            }
            Err(error) => {
                warn!(error = %error, "quick_note_create_failed");
                self.notices.push(NOTE_SAVE_FAILED_NOTICE.to_string());
            }
        }
    }

    fn handle_entries_result(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<JournalEntry>, ApiError>,
    ) {
        if self.entry_list_request != Some(request_id) {
            return;
        }
        self.entry_list_request = None;
        match result {
            Ok(entries) => self.entries = entries,
            Err(error) => warn!(error = %error, "journal_entries_fetch_failed"),
        }
    }

    fn handle_notes_result(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<QuickNote>, ApiError>,
    ) {
        if self.note_list_request != Some(request_id) {
            return;
        }
        self.note_list_request = None;
        match result {
            Ok(notes) => self.notes = notes,
            Err(error) => warn!(error = %error, "quick_notes_fetch_failed"),
        }
    }

    fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}
