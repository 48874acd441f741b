//! Viewer application module
//!
//! Handles windowing, input tracking, and event dispatch.

pub mod input;
mod runner;
mod window;

pub use runner::App;
pub use window::{CursorMode, WindowCore, WindowError, window_attributes_from_config};
