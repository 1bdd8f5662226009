use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    Crouch,
    Run,
    Interact,
    Fly,
    Swim,
    QuickMenu,
    Chat,
    Journal,
    Inventory,
    Spells,
}

pub(crate) const ACTION_COUNT: usize = 15;

impl PlayerAction {
    pub const ALL: [PlayerAction; ACTION_COUNT] = [
        PlayerAction::MoveForward,
        PlayerAction::MoveBackward,
        PlayerAction::MoveLeft,
        PlayerAction::MoveRight,
        PlayerAction::Jump,
        PlayerAction::Crouch,
        PlayerAction::Run,
        PlayerAction::Interact,
        PlayerAction::Fly,
        PlayerAction::Swim,
        PlayerAction::QuickMenu,
        PlayerAction::Chat,
        PlayerAction::Journal,
        PlayerAction::Inventory,
        PlayerAction::Spells,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            PlayerAction::MoveForward => 0,
            PlayerAction::MoveBackward => 1,
            PlayerAction::MoveLeft => 2,
            PlayerAction::MoveRight => 3,
            PlayerAction::Jump => 4,
            PlayerAction::Crouch => 5,
            PlayerAction::Run => 6,
            PlayerAction::Interact => 7,
            PlayerAction::Fly => 8,
            PlayerAction::Swim => 9,
            PlayerAction::QuickMenu => 10,
            PlayerAction::Chat => 11,
            PlayerAction::Journal => 12,
            PlayerAction::Inventory => 13,
            PlayerAction::Spells => 14,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerAction::MoveForward => "Move Forward",
            PlayerAction::MoveBackward => "Move Backward",
            PlayerAction::MoveLeft => "Move Left",
            PlayerAction::MoveRight => "Move Right",
            PlayerAction::Jump => "Jump",
            PlayerAction::Crouch => "Crouch",
            PlayerAction::Run => "Run",
            PlayerAction::Interact => "Interact",
            PlayerAction::Fly => "Fly",
            PlayerAction::Swim => "Swim",
            PlayerAction::QuickMenu => "Quick Menu",
            PlayerAction::Chat => "Chat",
            PlayerAction::Journal => "Journal",
            PlayerAction::Inventory => "Inventory",
            PlayerAction::Spells => "Spells",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: PlayerAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: PlayerAction) -> bool {
        self.down[action.index()]
    }
}

/// Rebindable action-to-key map; session-only, resets on every launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    keys: [KeyCode; ACTION_COUNT],
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            keys: [KeyCode::KeyW; ACTION_COUNT],
        };
        bindings.rebind(PlayerAction::MoveForward, KeyCode::KeyW);
        bindings.rebind(PlayerAction::MoveBackward, KeyCode::KeyS);
        bindings.rebind(PlayerAction::MoveLeft, KeyCode::KeyA);
        bindings.rebind(PlayerAction::MoveRight, KeyCode::KeyD);
        bindings.rebind(PlayerAction::Jump, KeyCode::Space);
        bindings.rebind(PlayerAction::Crouch, KeyCode::KeyC);
        bindings.rebind(PlayerAction::Run, KeyCode::ShiftLeft);
        bindings.rebind(PlayerAction::Interact, KeyCode::KeyE);
        bindings.rebind(PlayerAction::Fly, KeyCode::KeyF);
        bindings.rebind(PlayerAction::Swim, KeyCode::KeyR);
        bindings.rebind(PlayerAction::QuickMenu, KeyCode::KeyM);
        bindings.rebind(PlayerAction::Chat, KeyCode::KeyT);
        bindings.rebind(PlayerAction::Journal, KeyCode::KeyJ);
        bindings.rebind(PlayerAction::Inventory, KeyCode::KeyI);
        bindings.rebind(PlayerAction::Spells, KeyCode::KeyP);
        bindings
    }
}

impl KeyBindings {
    pub fn binding(&self, action: PlayerAction) -> KeyCode {
        self.keys[action.index()]
    }

    pub fn rebind(&mut self, action: PlayerAction, key: KeyCode) {
        self.keys[action.index()] = key;
    }

    // When two actions share a key, the first in declaration order wins.
    pub fn action_for(&self, key: KeyCode) -> Option<PlayerAction> {
        PlayerAction::ALL
            .iter()
            .copied()
            .find(|action| self.keys[action.index()] == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_match_expected_keys() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.binding(PlayerAction::MoveForward), KeyCode::KeyW);
        assert_eq!(bindings.binding(PlayerAction::Jump), KeyCode::Space);
        assert_eq!(bindings.binding(PlayerAction::Run), KeyCode::ShiftLeft);
        assert_eq!(bindings.binding(PlayerAction::Interact), KeyCode::KeyE);
        assert_eq!(bindings.binding(PlayerAction::Spells), KeyCode::KeyP);
    }

    #[test]
    fn every_action_has_a_distinct_default_key() {
        let bindings = KeyBindings::default();
        for action in PlayerAction::ALL {
            assert_eq!(
                bindings.action_for(bindings.binding(action)),
                Some(action),
                "default key for {action:?} resolves to another action"
            );
        }
    }

    #[test]
    fn rebind_replaces_resolution() {
        let mut bindings = KeyBindings::default();
        bindings.rebind(PlayerAction::Interact, KeyCode::KeyQ);

        assert_eq!(bindings.binding(PlayerAction::Interact), KeyCode::KeyQ);
        assert_eq!(
            bindings.action_for(KeyCode::KeyQ),
            Some(PlayerAction::Interact)
        );
        assert_eq!(bindings.action_for(KeyCode::KeyE), None);
    }

    #[test]
    fn shared_key_resolves_to_first_action_in_order() {
        let mut bindings = KeyBindings::default();
        bindings.rebind(PlayerAction::Swim, KeyCode::KeyW);

        assert_eq!(
            bindings.action_for(KeyCode::KeyW),
            Some(PlayerAction::MoveForward)
        );
    }

    #[test]
    fn action_state_set_and_clear() {
        let mut states = ActionStates::default();
        states.set(PlayerAction::Fly, true);
        assert!(states.is_down(PlayerAction::Fly));
        states.set(PlayerAction::Fly, false);
        assert!(!states.is_down(PlayerAction::Fly));
    }
}
