//! Main application handler for the viewer

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::config::AppConfig;
use crate::scene::{Camera, CameraController};

use super::input::{Event, EventKind, KeyCode};
use super::window::{CursorMode, WindowCore, WindowError, window_attributes_from_config};

/// Quit on click (release-after-press edge)
const QUIT_KEY: KeyCode = KeyCode::Q;
/// Toggle cursor lock on click
const CURSOR_KEY: KeyCode = KeyCode::L;
/// While held, wheel deltas pan instead of orbiting
const PAN_KEY: KeyCode = KeyCode::Shift;
/// While held, wheel deltas dolly instead of orbiting
const ZOOM_KEY: KeyCode = KeyCode::Ctrl;

/// Viewer application
///
/// Wires the window core's events into the camera controller and drives
/// the per-frame poll/update cycle.
pub struct App {
    config: AppConfig,
    window: Option<WindowCore>,
    controller: Rc<RefCell<CameraController>>,
    /// Elapsed seconds of the previous frame, shared with wheel listeners
    frame_dt: Rc<Cell<f32>>,
    last_update: Option<Instant>,
}

impl App {
    /// Creates a new viewer with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting viewer");
        info!(?config.window, "Window configuration");

        let camera = Camera::from_config(&config.camera);
        let viewport = (config.window.width as f32, config.window.height as f32);
        let controller = CameraController::new(camera, viewport, &config.camera);

        Self {
            config,
            window: None,
            controller: Rc::new(RefCell::new(controller)),
            frame_dt: Rc::new(Cell::new(0.0)),
            last_update: None,
        }
    }

    /// Creates a new viewer with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::default()
        });
        Self::new(config)
    }

    /// Install navigation listeners and tracked keys on a fresh window
    fn wire_input(&self, window: &mut WindowCore) {
        window.track_key(QUIT_KEY);
        window.track_key(CURSOR_KEY);

        let controller = Rc::clone(&self.controller);
        let frame_dt = Rc::clone(&self.frame_dt);
        window.register_listener(EventKind::MouseWheel, move |event, _| {
            if let Event::MouseWheel { dx, dy } = *event {
                controller.borrow_mut().on_wheel(dx, dy, frame_dt.get());
            }
        });

        let controller = Rc::clone(&self.controller);
        window.register_listener(EventKind::KeyDown, move |event, _| {
            if let Event::KeyDown { key, .. } = *event {
                match key {
                    PAN_KEY => controller.borrow_mut().set_pan_held(true),
                    ZOOM_KEY => controller.borrow_mut().set_zoom_held(true),
                    _ => {}
                }
            }
        });

        let controller = Rc::clone(&self.controller);
        window.register_listener(EventKind::KeyUp, move |event, _| {
            if let Event::KeyUp { key, .. } = *event {
                match key {
                    PAN_KEY => controller.borrow_mut().set_pan_held(false),
                    ZOOM_KEY => controller.borrow_mut().set_zoom_held(false),
                    _ => {}
                }
            }
        });

        let controller = Rc::clone(&self.controller);
        window.register_listener(EventKind::BufferResize, move |event, _| {
            if let Event::BufferResize { width, height } = *event {
                controller
                    .borrow_mut()
                    .set_viewport(width as f32, height as f32);
            }
        });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = window_attributes_from_config(&self.config.window);

            match event_loop.create_window(window_attributes) {
                Ok(window) => {
                    let size = window.inner_size();
                    info!(
                        window.width = size.width,
                        window.height = size.height,
                        "Window created successfully"
                    );

                    let mut core = WindowCore::new(std::sync::Arc::new(window));
                    self.wire_input(&mut core);
                    core.present();

                    self.window = Some(core);
                    self.last_update = Some(Instant::now());
                }
                Err(e) => {
                    // Fatal: platform surface creation is never retried
                    let error = WindowError::from(e);
                    error!(%error, "Failed to create window");
                    event_loop.exit();
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &mut self.window else {
            return;
        };

        if let Some(last_update) = self.last_update {
            let now = Instant::now();
            self.frame_dt.set((now - last_update).as_secs_f32());
            self.last_update = Some(now);
        }

        // Push platform key state into every tracked key
        window.poll();

        if window.should_close() {
            info!("Close requested, exiting");
            event_loop.exit();
            return;
        }

        if window.key(QUIT_KEY).is_some_and(|k| k.is_clicked()) {
            info!("Quit key clicked, exiting");
            event_loop.exit();
            return;
        }

        if window.key(CURSOR_KEY).is_some_and(|k| k.is_clicked()) {
            let mode = match window.cursor_mode() {
                CursorMode::Normal => CursorMode::Locked,
                CursorMode::Locked => CursorMode::Normal,
            };
            info!(?mode, "Toggling cursor mode");
            window.set_cursor_mode(mode);
        }

        // Refresh the projection before any consumer reads it this frame
        let aspect = window.aspect();
        let mut controller = self.controller.borrow_mut();
        let fov = controller.camera().fov();
        controller.camera_mut().update_perspective(aspect, fov);
        drop(controller);

        window.present();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = &mut self.window else {
            return;
        };

        window.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                // The render pass is external; it reads view()/projection()
                // from the controller's camera here.
            }
            _ => {}
        }
    }
}
