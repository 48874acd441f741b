//! Scene state
//!
//! The camera and its navigation controller. The render pass consuming
//! `view`/`projection` lives outside this crate.

pub mod camera;
pub mod controller;

pub use camera::Camera;
pub use controller::{CameraController, NavMode};
