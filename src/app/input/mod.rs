//! Input and event system
//!
//! The window core owns all input state; this module supplies its pieces:
//! - Double-buffered key trackers with press/release/click-edge queries
//! - A closed event vocabulary shared by the window core and listeners
//! - A listener registry dispatching events synchronously, in
//!   registration order, with handle-based removal
//! - A collector translating winit window events into crate events
//!
//! ```text
//! winit WindowEvent → EventCollector → Event
//!                                        ↓
//!                                 EventDispatcher
//!                                 (listeners, in order)
//! ```

mod collector;
mod dispatch;
mod events;
mod state;

pub use collector::EventCollector;
pub use dispatch::{DispatchError, EventDispatcher, Listener, ListenerHandle};
pub use events::{Category, Event, EventKind, MouseButton};
pub use state::{KeyCode, KeyRegistry, KeyState, Modifiers};
