//! Navigation mode routing for the camera
//!
//! Orbit is the default mode. Pan and zoom are active only while their
//! modifier keys are held; the window's key-down/key-up listeners flip the
//! flags here, so there is no one-frame polling lag. While either modifier
//! is held the arcball is disabled.

use tracing::debug;

use crate::config::CameraConfig;

use super::camera::Camera;

/// Which navigation mode the next wheel delta drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    Orbit,
    Pan,
    Zoom,
}

pub struct CameraController {
    camera: Camera,
    viewport: (f32, f32),
    orbit_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    arcball_enabled: bool,
    pan_held: bool,
    zoom_held: bool,
}

impl CameraController {
    pub fn new(camera: Camera, viewport: (f32, f32), config: &CameraConfig) -> Self {
        Self {
            camera,
            viewport,
            orbit_speed: config.orbit_speed,
            pan_speed: config.pan_speed,
            zoom_speed: config.zoom_speed,
            arcball_enabled: true,
            pan_held: false,
            zoom_held: false,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Viewport size used to normalize orbit deltas
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Current mode; zoom wins over pan when both modifiers are held
    pub fn mode(&self) -> NavMode {
        if self.zoom_held {
            NavMode::Zoom
        } else if self.pan_held {
            NavMode::Pan
        } else {
            NavMode::Orbit
        }
    }

    /// Called from the pan modifier's key-down/key-up listeners
    pub fn set_pan_held(&mut self, held: bool) {
        self.pan_held = held;
        self.update_arcball();
    }

    /// Called from the zoom modifier's key-down/key-up listeners
    pub fn set_zoom_held(&mut self, held: bool) {
        self.zoom_held = held;
        self.update_arcball();
    }

    fn update_arcball(&mut self) {
        let enabled = !self.pan_held && !self.zoom_held;
        if enabled != self.arcball_enabled {
            debug!(enabled, "arcball toggled");
        }
        self.arcball_enabled = enabled;
    }

    /// Route one wheel delta into exactly one navigation update
    pub fn on_wheel(&mut self, dx: f64, dy: f64, dt: f32) {
        let (dx, dy) = (dx as f32, dy as f32);
        match self.mode() {
            NavMode::Zoom => self.camera.zoom(dy, dt, self.zoom_speed),
            NavMode::Pan => self.camera.pan(dx, dy, dt, self.pan_speed),
            NavMode::Orbit => {
                if self.arcball_enabled {
                    self.camera.orbit(dx, dy, self.viewport, self.orbit_speed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn controller() -> CameraController {
        let config = CameraConfig::default();
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::ZERO,
            Vec3::Y,
            45.0,
            0.01,
            1000.0,
        );
        CameraController::new(camera, (640.0, 480.0), &config)
    }

    #[test]
    fn test_orbit_is_default_mode() {
        let controller = controller();
        assert_eq!(controller.mode(), NavMode::Orbit);
    }

    #[test]
    fn test_modifiers_switch_mode_and_back() {
        let mut controller = controller();

        controller.set_pan_held(true);
        assert_eq!(controller.mode(), NavMode::Pan);

        controller.set_zoom_held(true);
        assert_eq!(controller.mode(), NavMode::Zoom);

        controller.set_zoom_held(false);
        assert_eq!(controller.mode(), NavMode::Pan);

        controller.set_pan_held(false);
        assert_eq!(controller.mode(), NavMode::Orbit);
    }

    #[test]
    fn test_wheel_in_pan_mode_moves_target() {
        let mut controller = controller();
        controller.set_pan_held(true);

        controller.on_wheel(2.0, 1.0, 0.016);

        assert_ne!(controller.camera().target(), Vec3::ZERO);
        let eye_delta = controller.camera().position() - Vec3::new(0.0, 0.0, 2.0);
        let target_delta = controller.camera().target() - Vec3::ZERO;
        assert!((eye_delta - target_delta).length() < 1e-5);
    }

    #[test]
    fn test_wheel_in_zoom_mode_keeps_target() {
        let mut controller = controller();
        controller.set_zoom_held(true);

        controller.on_wheel(0.0, -1.0, 0.016);

        assert_eq!(controller.camera().target(), Vec3::ZERO);
        assert!((controller.camera().position() - Vec3::new(0.0, 0.0, 2.0)).length() > 0.0);
    }

    #[test]
    fn test_wheel_in_orbit_mode_keeps_distance() {
        let mut controller = controller();
        controller.on_wheel(30.0, 0.0, 0.016);

        let camera = controller.camera();
        assert_eq!(camera.target(), Vec3::ZERO);
        assert!(((camera.position() - camera.target()).length() - 2.0).abs() < 1e-4);
    }
}
