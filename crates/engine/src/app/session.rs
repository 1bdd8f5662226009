use super::input::{ActionStates, PlayerAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    None,
    Quit,
}

/// Per-tick input view: held keys plus the down transitions since the
/// previous tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    save_pressed: bool,
    close_pressed: bool,
    held: ActionStates,
    pressed: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        save_pressed: bool,
        close_pressed: bool,
        held: ActionStates,
        pressed: ActionStates,
    ) -> Self {
        Self {
            quit_requested,
            save_pressed,
            close_pressed,
            held,
            pressed,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn save_pressed(&self) -> bool {
        self.save_pressed
    }

    pub fn close_pressed(&self) -> bool {
        self.close_pressed
    }

    pub fn is_down(&self, action: PlayerAction) -> bool {
        self.held.is_down(action)
    }

    pub fn pressed(&self, action: PlayerAction) -> bool {
        self.pressed.is_down(action)
    }

    pub fn with_action_down(mut self, action: PlayerAction, is_down: bool) -> Self {
        self.held.set(action, is_down);
        self
    }

    pub fn with_action_pressed(mut self, action: PlayerAction, is_pressed: bool) -> Self {
        self.pressed.set(action, is_pressed);
        self
    }

    pub fn with_save_pressed(mut self, save_pressed: bool) -> Self {
        self.save_pressed = save_pressed;
        self
    }

    pub fn with_close_pressed(mut self, close_pressed: bool) -> Self {
        self.close_pressed = close_pressed;
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }
}

pub trait Session {
    fn start(&mut self);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SessionCommand;
    fn title(&self) -> Option<String> {
        None
    }
    fn shutdown(&mut self);
}
