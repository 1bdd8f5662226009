#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatSendOutcome {
    Sent(RequestId),
    EmptyMessage,
}

/// Bridges player utterances to the remote companion. Overlapping sends
/// are allowed; replies land in completion order.
struct ChatSession {
    pending: Vec<RequestId>,
    history_request: Option<RequestId>,
    remote_history: Vec<ChatHistoryEntry>,
}

impl ChatSession {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
            history_request: None,
            remote_history: Vec::new(),
        }
    }

    fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    fn send(
        &mut self,
        text: &str,
        store: &mut GameStateStore,
        remote: &mut RemoteHandle,
    ) -> ChatSendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ChatSendOutcome::EmptyMessage;
        }

        // Optimistic append; the request may still fail.
        store.add_conversation(trimmed, false);

        let state = store.state();
        let request = EchoChatRequest {
            player_name: state.player_name.clone(),
            message: trimmed.to_string(),
            context: ChatContext {
                mood: state.mood,
                location: state.position,
                spells: state.spells.clone(),
                unlocked_areas: state.unlocked_areas.clone(),
            },
        };
        let request_id = remote.submit(RemoteCommand::Chat(Box::new(request)));
        self.pending.push(request_id);
        ChatSendOutcome::Sent(request_id)
    }

    fn handle_chat_result(
        &mut self,
        request_id: RequestId,
        result: Result<EchoChatResponse, ApiError>,
        store: &mut GameStateStore,
    ) {
        let Some(index) = self.pending.iter().position(|id| *id == request_id) else {
            debug!(request_id = request_id.0, "unknown_chat_completion_ignored");
            return;
        };
        self.pending.remove(index);

        match result {
            Ok(response) => {
                store.add_conversation(&response.message, true);
                // Side effects apply independently; none gates the others.
                if let Some(mood_name) = &response.mood_change {
                    match Mood::from_wire(mood_name) {
                        Some(mood) => store.update_mood(mood),
                        None => debug!(mood = %mood_name, "unrecognized_mood_ignored"),
                    }
                }
                if let Some(grant) = &response.spell_learned {
                    store.learn_spell(grant);
                    info!(spell = %grant.name, "spell_learned");
                }
                if let Some(area_id) = &response.area_unlocked {
                    store.unlock_area(area_id, &display_name_from_area_id(area_id));
                    info!(area = %area_id, "area_unlocked");
                }
            }
            Err(error) => {
                warn!(error = %error, "chat_failed");
                store.add_conversation(ECHO_FALLBACK_MESSAGE, true);
            }
        }
    }

    fn refresh_history(&mut self, store: &GameStateStore, remote: &mut RemoteHandle) -> RequestId {
        let request_id = remote.submit(RemoteCommand::FetchChatHistory {
            player_name: store.state().player_name.clone(),
        });
        self.history_request = Some(request_id);
        request_id
    }

    fn handle_history_result(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<ChatHistoryEntry>, ApiError>,
    ) {
        if self.history_request != Some(request_id) {
            return;
        }
        self.history_request = None;
        match result {
            Ok(entries) => self.remote_history = entries,
            Err(error) => warn!(error = %error, "chat_history_fetch_failed"),
        }
    }
}
