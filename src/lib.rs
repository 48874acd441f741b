//! Gimbal
//!
//! A real-time 3D viewport core built with Rust, winit, and glam:
//! windowing, double-buffered key tracking, listener-based event
//! dispatch, and an orbit/pan/zoom camera.

/// Viewer application - windowing, input handling, and event dispatch
pub mod app;

/// Application configuration profiles
pub mod config;

/// Scene state - camera and navigation controller
pub mod scene;
