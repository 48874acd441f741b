//! Window and input events
//!
//! Events are plain values constructed at dispatch time and dropped after
//! the listeners for their kind have run. The closed variant set is the
//! vocabulary shared by the window core and its listeners.

use std::fmt;

use super::state::{KeyCode, Modifiers};

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Coarse event grouping, queryable from the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Window,
    Buffer,
    Mouse,
    Keyboard,
}

/// Discriminant for listener registration and dispatch-table lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    WindowResize,
    WindowMove,
    WindowFocus,
    BufferResize,
    MouseMove,
    MousePress,
    MouseRelease,
    MouseWheel,
    KeyDown,
    KeyUp,
    KeyTyped,
}

impl EventKind {
    pub fn category(self) -> Category {
        match self {
            Self::WindowResize | Self::WindowMove | Self::WindowFocus => Category::Window,
            Self::BufferResize => Category::Buffer,
            Self::MouseMove | Self::MousePress | Self::MouseRelease | Self::MouseWheel => {
                Category::Mouse
            }
            Self::KeyDown | Self::KeyUp | Self::KeyTyped => Category::Keyboard,
        }
    }
}

/// A single window or input event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Logical window size changed
    WindowResize { width: u32, height: u32 },
    /// Window moved to a new screen position
    WindowMove { x: i32, y: i32 },
    /// Window gained or lost focus
    WindowFocus { focused: bool },
    /// Framebuffer size changed (physical pixels)
    BufferResize { width: u32, height: u32 },
    /// Cursor moved, position in window coordinates
    MouseMove { x: f64, y: f64 },
    /// Mouse button pressed at the given cursor position
    MousePress {
        button: MouseButton,
        mods: Modifiers,
        x: f64,
        y: f64,
    },
    /// Mouse button released at the given cursor position
    MouseRelease {
        button: MouseButton,
        mods: Modifiers,
        x: f64,
        y: f64,
    },
    /// Scroll wheel delta
    MouseWheel { dx: f64, dy: f64 },
    /// Key pressed (or auto-repeated)
    KeyDown {
        key: KeyCode,
        mods: Modifiers,
        repeat: bool,
    },
    /// Key released
    KeyUp { key: KeyCode, mods: Modifiers },
    /// Character produced by a key press
    KeyTyped { ch: char },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::WindowResize { .. } => EventKind::WindowResize,
            Self::WindowMove { .. } => EventKind::WindowMove,
            Self::WindowFocus { .. } => EventKind::WindowFocus,
            Self::BufferResize { .. } => EventKind::BufferResize,
            Self::MouseMove { .. } => EventKind::MouseMove,
            Self::MousePress { .. } => EventKind::MousePress,
            Self::MouseRelease { .. } => EventKind::MouseRelease,
            Self::MouseWheel { .. } => EventKind::MouseWheel,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::KeyUp { .. } => EventKind::KeyUp,
            Self::KeyTyped { .. } => EventKind::KeyTyped,
        }
    }

    pub fn category(&self) -> Category {
        self.kind().category()
    }

    /// Static event name for logs and tests
    pub fn name(&self) -> &'static str {
        match self.kind() {
            EventKind::WindowResize => "window_resize",
            EventKind::WindowMove => "window_move",
            EventKind::WindowFocus => "window_focus",
            EventKind::BufferResize => "buffer_resize",
            EventKind::MouseMove => "mouse_move",
            EventKind::MousePress => "mouse_press",
            EventKind::MouseRelease => "mouse_release",
            EventKind::MouseWheel => "mouse_wheel",
            EventKind::KeyDown => "key_down",
            EventKind::KeyUp => "key_up",
            EventKind::KeyTyped => "key_typed",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowResize { width, height } | Self::BufferResize { width, height } => {
                write!(f, "{} {{ width: {width}, height: {height} }}", self.name())
            }
            Self::WindowMove { x, y } => write!(f, "{} {{ x: {x}, y: {y} }}", self.name()),
            Self::WindowFocus { focused } => {
                write!(f, "{} {{ focused: {focused} }}", self.name())
            }
            Self::MouseMove { x, y } => write!(f, "{} {{ x: {x}, y: {y} }}", self.name()),
            Self::MousePress { button, x, y, .. } | Self::MouseRelease { button, x, y, .. } => {
                write!(
                    f,
                    "{} {{ button: {button:?}, x: {x}, y: {y} }}",
                    self.name()
                )
            }
            Self::MouseWheel { dx, dy } => write!(f, "{} {{ dx: {dx}, dy: {dy} }}", self.name()),
            Self::KeyDown { key, repeat, .. } => {
                write!(f, "{} {{ key: {key:?}, repeat: {repeat} }}", self.name())
            }
            Self::KeyUp { key, .. } => write!(f, "{} {{ key: {key:?} }}", self.name()),
            Self::KeyTyped { ch } => write!(f, "{} {{ ch: {ch:?} }}", self.name()),
        }
    }
}
