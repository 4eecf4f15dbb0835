use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::entities::MovementKeys;
use crate::session::SessionState;

/// Frames a key counts as held after a press when the terminal never
/// reports releases. Key repeat refreshes it.
const HOLD_FRAMES: u8 = 8;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Left click at a terminal cell (column, row)
    Click(u16, u16),
    StartRound,
    ToggleSound,
    Quit,
}

/// Held state of one movement key.
#[derive(Debug, Default, Clone, Copy)]
struct HeldKey {
    pressed: bool,
    /// Remaining frames for terminals without release events
    ttl: u8,
}

impl HeldKey {
    fn press(&mut self) {
        self.pressed = true;
        self.ttl = HOLD_FRAMES;
    }

    fn release(&mut self) {
        self.pressed = false;
        self.ttl = 0;
    }

    fn is_held(&self, reports_release: bool) -> bool {
        if reports_release {
            self.pressed
        } else {
            self.ttl > 0
        }
    }

    fn decay(&mut self) {
        self.ttl = self.ttl.saturating_sub(1);
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: HeldKey,
    down: HeldKey,
    left: HeldKey,
    right: HeldKey,
}

impl KeyState {
    fn slot(&mut self, code: KeyCode) -> Option<&mut HeldKey> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(&mut self.up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(&mut self.down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(&mut self.left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(&mut self.right),
            _ => None,
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Manages input polling and translates raw terminal events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    reports_release: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputManager {
    /// Creates a new InputManager.
    ///
    /// `reports_release` says whether the terminal delivers key release
    /// events (keyboard enhancement flags). Without them held keys expire.
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_release,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, state: SessionState) -> color_eyre::Result<()> {
        self.begin_frame();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            self.handle_event(event::read()?, state);
        }

        Ok(())
    }

    /// Clears last frame's one-shot actions and ages held keys
    fn begin_frame(&mut self) {
        self.oneshot_actions.clear();
        for key in [
            &mut self.key_state.up,
            &mut self.key_state.down,
            &mut self.key_state.left,
            &mut self.key_state.right,
        ] {
            key.decay();
        }
    }

    /// Feeds a single terminal event
    pub fn handle_event(&mut self, event: Event, state: SessionState) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, state),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::FocusLost => self.key_state.clear(),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if mouse_event.kind == MouseEventKind::Down(MouseButton::Left) {
            self.oneshot_actions
                .push(InputAction::Click(mouse_event.column, mouse_event.row));
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    fn handle_key_event(&mut self, key_event: KeyEvent, state: SessionState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, state),
            KeyEventKind::Repeat => {
                if let Some(key) = self.key_state.slot(key_event.code) {
                    key.press();
                }
            }
            KeyEventKind::Release => {
                if let Some(key) = self.key_state.slot(key_event.code) {
                    key.release();
                }
            }
        }
    }

    /// Handles key press events
    fn handle_key_press(&mut self, key_event: KeyEvent, state: SessionState) {
        // Check for quit keys first (works in any state)
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match state {
            SessionState::Menu => match key_event.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.oneshot_actions.push(InputAction::StartRound);
                }
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    self.oneshot_actions.push(InputAction::ToggleSound);
                }
                _ => {}
            },
            SessionState::Playing => {
                if let Some(key) = self.key_state.slot(key_event.code) {
                    key.press();
                }
            }
        }
    }

    /// Movement keys held this frame
    pub fn movement(&self) -> MovementKeys {
        let held = self.reports_release;
        MovementKeys {
            left: self.key_state.left.is_held(held),
            right: self.key_state.right.is_held(held),
            up: self.key_state.up.is_held(held),
            down: self.key_state.down.is_held(held),
        }
    }

    /// One-shot actions gathered by the last poll
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Drops all held keys, e.g. when a round ends
    pub fn release_all(&mut self) {
        self.key_state.clear();
    }
}
