//! Look-at camera with orbit, pan, and dolly navigation
//!
//! The camera's sources of truth are `position`, `target`, and `up`; the
//! view matrix is recomputed from them on demand and the projection is
//! cached and refreshed once per frame via [`Camera::update_perspective`].
//!
//! Degenerate configurations (`position == target`, or `up` parallel to the
//! view direction) are undefined behavior: the look-at and orbit math will
//! produce NaNs. Callers keep the eye off the pivot.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use crate::config::CameraConfig;

pub const DEFAULT_POSITION: Vec3 = Vec3::new(-2.0, 1.0, -2.0);
pub const DEFAULT_TARGET: Vec3 = Vec3::ZERO;
pub const DEFAULT_UP: Vec3 = Vec3::Y;
pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
pub const DEFAULT_NEAR: f32 = 0.01;
pub const DEFAULT_FAR: f32 = 1000.0;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov: f32,
    near: f32,
    far: f32,
    projection: Mat4,
}

impl Camera {
    /// Create a camera looking from `position` at `target`
    ///
    /// `position` must differ from `target` and `up` must not be parallel
    /// to the view direction.
    pub fn new(position: Vec3, target: Vec3, up: Vec3, fov: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            near,
            far,
            projection: Mat4::IDENTITY,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            Vec3::from_array(config.position),
            Vec3::from_array(config.target),
            Vec3::from_array(config.up),
            config.fov,
            config.near,
            config.far,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// View matrix for the current state
    ///
    /// Pure function of `position`/`target`/`up`; safe to call any number
    /// of times per frame.
    pub fn world_to_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Recompute the cached projection; call once per frame before
    /// consumers read [`projection`](Self::projection)
    pub fn update_perspective(&mut self, aspect: f32, fov: f32) {
        self.fov = fov;
        self.projection = Mat4::perspective_rh(fov.to_radians(), aspect, self.near, self.far);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Orbit the eye around the target
    ///
    /// `dx`/`dy` are wheel deltas; angles are `delta / viewport extent`
    /// scaled by a full turn times `speed`. The horizontal rotation about
    /// the current up axis is applied first; the vertical rotation about
    /// the post-horizontal right axis second. The target does not move.
    pub fn orbit(&mut self, dx: f32, dy: f32, viewport: (f32, f32), speed: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let h_angle = dx / viewport.0 * TAU * speed;
        let v_angle = dy / viewport.1 * TAU * speed;

        let mut offset = self.position - self.target;
        offset = Quat::from_axis_angle(self.up.normalize(), h_angle) * offset;

        let view_dir = -offset.normalize();
        let right = self.up.cross(view_dir).normalize();
        offset = Quat::from_axis_angle(right, v_angle) * offset;

        self.position = self.target + offset;
    }

    /// Dolly the eye along the view direction
    ///
    /// Positive `delta` moves away from the target. The target is fixed.
    pub fn zoom(&mut self, delta: f32, dt: f32, speed: f32) {
        let direction = (self.position - self.target).normalize();
        self.position += direction * delta * speed * dt;
    }

    /// Translate eye and target together, preserving the view direction
    pub fn pan(&mut self, dx: f32, dy: f32, dt: f32, speed: f32) {
        let front = (self.target - self.position).normalize();
        let right = front.cross(self.up).normalize();
        let displacement = (self.up * dy + right * dx) * speed * dt;
        self.position += displacement;
        self.target += displacement;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            DEFAULT_POSITION,
            DEFAULT_TARGET,
            DEFAULT_UP,
            DEFAULT_FOV_DEGREES,
            DEFAULT_NEAR,
            DEFAULT_FAR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (f32, f32) = (640.0, 480.0);
    const EPS: f32 = 1e-4;

    fn test_camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::ZERO,
            Vec3::Y,
            45.0,
            0.01,
            1000.0,
        )
    }

    #[test]
    fn test_orbit_zero_delta_is_identity() {
        let mut camera = test_camera();
        let view_before = camera.world_to_view().to_cols_array();
        let position_before = camera.position();

        camera.orbit(0.0, 0.0, VIEWPORT, 1.0);

        assert_eq!(camera.position(), position_before);
        assert_eq!(camera.target(), Vec3::ZERO);
        assert_eq!(camera.world_to_view().to_cols_array(), view_before);
    }

    #[test]
    fn test_orbit_preserves_distance_to_target() {
        let mut camera = Camera::default();
        let distance = (camera.position() - camera.target()).length();

        camera.orbit(37.0, -12.0, VIEWPORT, 1.0);

        let after = (camera.position() - camera.target()).length();
        assert!((after - distance).abs() < EPS);
        assert_eq!(camera.target(), Vec3::ZERO);
    }

    #[test]
    fn test_orbit_moves_the_eye() {
        let mut camera = test_camera();
        camera.orbit(64.0, 0.0, VIEWPORT, 1.0);
        assert!((camera.position() - Vec3::new(0.0, 0.0, 2.0)).length() > EPS);
    }

    #[test]
    fn test_pan_translates_eye_and_target_identically() {
        let mut camera = Camera::default();
        let position = camera.position();
        let target = camera.target();

        camera.pan(3.0, -1.5, 0.016, 1.0);

        let eye_delta = camera.position() - position;
        let target_delta = camera.target() - target;
        assert!((eye_delta - target_delta).length() < EPS);
        assert!(eye_delta.length() > 0.0);
    }

    #[test]
    fn test_zoom_moves_along_view_direction_only() {
        let mut camera = test_camera();
        let direction = (camera.target() - camera.position()).normalize();

        camera.zoom(-5.0, 0.016, 1.0);

        assert_eq!(camera.target(), Vec3::ZERO);
        let after = (camera.target() - camera.position()).normalize();
        // small steps never flip through the pivot
        assert!((after - direction).length() < EPS);
        assert!((camera.position() - camera.target()).length() < 2.0);
    }

    #[test]
    fn test_world_to_view_is_idempotent() {
        let camera = Camera::default();
        assert_eq!(
            camera.world_to_view().to_cols_array(),
            camera.world_to_view().to_cols_array()
        );
    }

    #[test]
    fn test_update_perspective_refreshes_projection() {
        let mut camera = test_camera();
        assert_eq!(camera.projection(), Mat4::IDENTITY);

        camera.update_perspective(4.0 / 3.0, 45.0);
        let proj = camera.projection();
        let expected_y = 1.0 / (45.0_f32.to_radians() / 2.0).tan();
        assert!((proj.y_axis.y - expected_y).abs() < EPS);
        assert!((proj.x_axis.x - expected_y / (4.0 / 3.0)).abs() < EPS);
    }
}
