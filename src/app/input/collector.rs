//! Translation of winit window events into crate events
//!
//! The collector is the platform-facing edge of the input system: it keeps
//! the small amount of state winit does not hand back (held keys, last
//! cursor position, modifiers, scale factor) and turns each winit
//! `WindowEvent` into zero or more [`Event`] values for dispatch.

use std::collections::HashSet;

use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::events::{Event, MouseButton};
use super::state::{KeyCode, Modifiers};

pub struct EventCollector {
    held: HashSet<KeyCode>,
    modifiers: Modifiers,
    cursor: (f64, f64),
    scale_factor: f64,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            modifiers: Modifiers::default(),
            cursor: (0.0, 0.0),
            scale_factor: 1.0,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Keys currently held down
    pub fn held(&self) -> &HashSet<KeyCode> {
        &self.held
    }

    /// Current keyboard modifiers
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Last seen cursor position in window coordinates
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// Translate one winit event into crate events
    pub fn collect(&mut self, event: &WindowEvent) -> Vec<Event> {
        match event {
            WindowEvent::Resized(size) => self.on_resized(*size),

            WindowEvent::Moved(pos) => vec![Event::WindowMove { x: pos.x, y: pos.y }],

            WindowEvent::Focused(focused) => vec![Event::WindowFocus { focused: *focused }],

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                Vec::new()
            }

            WindowEvent::CursorMoved { position, .. } => {
                vec![self.on_cursor_moved(position.x, position.y)]
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_input(*state, *button).into_iter().collect()
            }

            WindowEvent::MouseWheel { delta, .. } => vec![self.on_wheel(*delta)],

            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = Modifiers {
                    shift: state.state().shift_key(),
                    ctrl: state.state().control_key(),
                    alt: state.state().alt_key(),
                    meta: state.state().super_key(),
                };
                Vec::new()
            }

            WindowEvent::KeyboardInput { event, .. } => self.on_key(
                event.physical_key,
                event.state,
                event.repeat,
                event.text.as_deref(),
            ),

            _ => Vec::new(),
        }
    }

    /// A resize produces both a framebuffer event (physical pixels) and a
    /// window event (logical size)
    fn on_resized(&self, size: PhysicalSize<u32>) -> Vec<Event> {
        let logical = size.to_logical::<f64>(self.scale_factor);
        vec![
            Event::BufferResize {
                width: size.width,
                height: size.height,
            },
            Event::WindowResize {
                width: logical.width as u32,
                height: logical.height as u32,
            },
        ]
    }

    fn on_cursor_moved(&mut self, x: f64, y: f64) -> Event {
        self.cursor = (x, y);
        Event::MouseMove { x, y }
    }

    /// Button events carry the last seen cursor position
    fn on_mouse_input(
        &mut self,
        state: ElementState,
        button: winit::event::MouseButton,
    ) -> Option<Event> {
        let button = match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            _ => return None,
        };
        let (x, y) = self.cursor;
        let mods = self.modifiers;
        Some(match state {
            ElementState::Pressed => Event::MousePress { button, mods, x, y },
            ElementState::Released => Event::MouseRelease { button, mods, x, y },
        })
    }

    /// Line deltas pass through as wheel units; pixel deltas are normalized
    /// to approximate lines
    fn on_wheel(&mut self, delta: MouseScrollDelta) -> Event {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x as f64, y as f64),
            MouseScrollDelta::PixelDelta(pos) => (pos.x / 20.0, pos.y / 20.0),
        };
        Event::MouseWheel { dx, dy }
    }

    /// A key press produces a key-down plus one key-typed event per
    /// character of text the press generated; a release produces a key-up
    fn on_key(
        &mut self,
        physical: PhysicalKey,
        state: ElementState,
        repeat: bool,
        text: Option<&str>,
    ) -> Vec<Event> {
        let key = match physical {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => KeyCode::Other,
        };
        let mut out = Vec::new();
        match state {
            ElementState::Pressed => {
                self.held.insert(key);
                out.push(Event::KeyDown {
                    key,
                    mods: self.modifiers,
                    repeat,
                });
                if let Some(text) = text {
                    out.extend(text.chars().map(|ch| Event::KeyTyped { ch }));
                }
            }
            ElementState::Released => {
                self.held.remove(&key);
                out.push(Event::KeyUp {
                    key,
                    mods: self.modifiers,
                });
            }
        }
        out
    }
}

impl Default for EventCollector {
    fn default() -> Self {
        Self::new()
    }
}
