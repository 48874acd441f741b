//! Window core
//!
//! Owns the native window handle plus everything the input system hangs
//! off it: current geometry, cursor mode, the key-tracker registry, and
//! the event dispatcher. Platform events flow in through
//! [`WindowCore::handle_window_event`]; the per-frame key poll happens in
//! [`WindowCore::poll`].

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowAttributes};

use crate::config::WindowConfig;

use super::input::{
    DispatchError, Event, EventCollector, EventDispatcher, EventKind, KeyCode, KeyRegistry,
    KeyState, ListenerHandle,
};

/// Fatal platform initialization failure
///
/// Surface/context creation is never retried; a failure here terminates
/// the program.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to create platform window: {0}")]
    Creation(#[from] winit::error::OsError),
}

/// Cursor capture state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    Normal,
    Locked,
}

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}

pub struct WindowCore {
    window: Arc<Window>,
    logical_size: (u32, u32),
    buffer_size: (u32, u32),
    position: (i32, i32),
    cursor_mode: CursorMode,
    close_requested: bool,
    keys: KeyRegistry,
    dispatcher: EventDispatcher,
    collector: EventCollector,
}

impl WindowCore {
    /// Wrap a created platform window
    ///
    /// Window creation itself happens on the event loop (`resumed`); a
    /// creation failure there is the fatal [`WindowError`] path.
    pub fn new(window: Arc<Window>) -> Self {
        let scale_factor = window.scale_factor();
        let buffer = window.inner_size();
        let logical = buffer.to_logical::<f64>(scale_factor);
        let position = window
            .outer_position()
            .map(|p| (p.x, p.y))
            .unwrap_or((0, 0));

        let mut collector = EventCollector::new();
        collector.set_scale_factor(scale_factor);

        Self {
            window,
            logical_size: (logical.width as u32, logical.height as u32),
            buffer_size: (buffer.width, buffer.height),
            position,
            cursor_mode: CursorMode::Normal,
            close_requested: false,
            keys: KeyRegistry::new(),
            dispatcher: EventDispatcher::new(),
            collector,
        }
    }

    /// Feed one platform event through translation and dispatch
    ///
    /// Updates window geometry and the held-key set, then invokes the
    /// listeners for each translated event synchronously, in registration
    /// order.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.close_requested = true;
            return;
        }

        for event in self.collector.collect(event) {
            match event {
                Event::WindowResize { width, height } => self.logical_size = (width, height),
                Event::BufferResize { width, height } => self.buffer_size = (width, height),
                Event::WindowMove { x, y } => self.position = (x, y),
                _ => {}
            }
            self.dispatcher.dispatch(&event);
        }
    }

    /// Per-frame key poll: push the current platform key state into every
    /// tracked key's two-slot history
    ///
    /// The platform event queue itself is pumped by the winit event loop,
    /// which delivers events through [`handle_window_event`](Self::handle_window_event)
    /// before this runs.
    pub fn poll(&mut self) {
        self.keys.update_all(self.collector.held());
    }

    /// Start tracking a key so [`poll`](Self::poll) updates it each frame
    pub fn track_key(&mut self, code: KeyCode) {
        self.keys.track(code);
    }

    /// Tracker for a key, if tracked
    pub fn key(&self, code: KeyCode) -> Option<&KeyState> {
        self.keys.key(code)
    }

    pub fn register_listener(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&Event, &mut EventDispatcher) + 'static,
    ) -> ListenerHandle {
        self.dispatcher.register(kind, callback)
    }

    pub fn unregister_listener(&mut self, handle: ListenerHandle) -> Result<(), DispatchError> {
        self.dispatcher.unregister(handle)
    }

    /// Hand the frame to the platform for presentation
    pub fn present(&self) {
        self.window.request_redraw();
    }

    /// Whether the platform has requested the window close
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Grab or release the cursor
    ///
    /// Platforms without true locking fall back to confinement.
    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        let result = match mode {
            CursorMode::Normal => self.window.set_cursor_grab(CursorGrabMode::None),
            CursorMode::Locked => self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined)),
        };
        if let Err(error) = result {
            warn!(%error, ?mode, "cursor grab not applied");
            return;
        }
        self.window.set_cursor_visible(mode == CursorMode::Normal);
        self.cursor_mode = mode;
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub fn logical_size(&self) -> (u32, u32) {
        self.logical_size
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        self.buffer_size
    }

    pub fn window_position(&self) -> (i32, i32) {
        self.position
    }

    /// Framebuffer aspect ratio for the projection update
    pub fn aspect(&self) -> f32 {
        let (width, height) = self.buffer_size;
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}
