//! Double-buffered key state tracking

use std::collections::{HashMap, HashSet};

/// Key code tracked by the input system
///
/// Deliberately smaller than the full platform key set: letters, arrows,
/// and the keys the navigation layer binds (modifiers, escape, space).
/// Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Tab,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Arrows
    Left,
    Right,
    Up,
    Down,

    // Modifiers (trackable keys so navigation modes can bind to them)
    Shift,
    Ctrl,
    Alt,

    Other,
}

/// Convert from winit physical key code
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::Space => Self::Space,
            WK::Enter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Tab => Self::Tab,

            WK::KeyA => Self::A,
            WK::KeyB => Self::B,
            WK::KeyC => Self::C,
            WK::KeyD => Self::D,
            WK::KeyE => Self::E,
            WK::KeyF => Self::F,
            WK::KeyG => Self::G,
            WK::KeyH => Self::H,
            WK::KeyI => Self::I,
            WK::KeyJ => Self::J,
            WK::KeyK => Self::K,
            WK::KeyL => Self::L,
            WK::KeyM => Self::M,
            WK::KeyN => Self::N,
            WK::KeyO => Self::O,
            WK::KeyP => Self::P,
            WK::KeyQ => Self::Q,
            WK::KeyR => Self::R,
            WK::KeyS => Self::S,
            WK::KeyT => Self::T,
            WK::KeyU => Self::U,
            WK::KeyV => Self::V,
            WK::KeyW => Self::W,
            WK::KeyX => Self::X,
            WK::KeyY => Self::Y,
            WK::KeyZ => Self::Z,

            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,

            WK::ShiftLeft | WK::ShiftRight => Self::Shift,
            WK::ControlLeft | WK::ControlRight => Self::Ctrl,
            WK::AltLeft | WK::AltRight => Self::Alt,

            _ => Self::Other,
        }
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Two-slot press history for a single key
///
/// `states[0]` is the value pushed by the most recent [`update`](Self::update);
/// `states[1]` is the value `states[0]` held before that call.
#[derive(Debug, Clone, Copy)]
pub struct KeyState {
    code: KeyCode,
    states: [bool; 2],
}

impl KeyState {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            states: [false, false],
        }
    }

    pub fn code(&self) -> KeyCode {
        self.code
    }

    /// Shift the current state into the previous slot, then store `pressed`
    pub fn update(&mut self, pressed: bool) {
        self.states[1] = self.states[0];
        self.states[0] = pressed;
    }

    /// True while the key is held down
    pub fn is_pressed(&self) -> bool {
        self.states[0]
    }

    /// True while the key is up
    pub fn is_released(&self) -> bool {
        !self.states[0]
    }

    /// True for exactly one update after a press is released
    ///
    /// Note this is a release edge, not a press edge, despite the name:
    /// callers that toggle on "click" (cursor lock, quit) fire when the key
    /// comes back up.
    pub fn is_clicked(&self) -> bool {
        !self.states[0] && self.states[1]
    }
}

/// Registry of key trackers, owned by the window core
///
/// Callers address trackers by key code; there is no shared ownership.
/// The window core pushes the platform key state into every tracked key
/// once per frame.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    keys: HashMap<KeyCode, KeyState>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a key; tracking an already-tracked key is a no-op
    pub fn track(&mut self, code: KeyCode) {
        self.keys.entry(code).or_insert_with(|| KeyState::new(code));
    }

    /// Current tracker for a key, if tracked
    pub fn key(&self, code: KeyCode) -> Option<&KeyState> {
        self.keys.get(&code)
    }

    /// Push the current held set into every tracker (one frame step)
    pub fn update_all(&mut self, held: &HashSet<KeyCode>) {
        for (code, state) in &mut self.keys {
            state.update(held.contains(code));
        }
    }

    pub fn tracked_count(&self) -> usize {
        self.keys.len()
    }
}
