//! Listener registry and synchronous event dispatch
//!
//! Listeners are registered per [`EventKind`] and invoked in registration
//! order. Registration returns an opaque handle; removal takes the handle
//! back, so closures never need to be compared for identity. Both
//! registration and removal are legal from inside a running listener:
//! a listener added mid-dispatch is not invoked until the next dispatch of
//! its kind, and a removal requested mid-dispatch is applied once the
//! current pass completes.

use std::collections::HashMap;

use thiserror::Error;

use super::events::{Event, EventKind};

/// Listener callback
///
/// The dispatcher passes itself back in so listeners can register or
/// unregister other listeners while an event is being delivered.
pub type Listener = Box<dyn FnMut(&Event, &mut EventDispatcher)>;

/// Opaque listener identity returned by [`EventDispatcher::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Handle was never issued, or its listener was already removed
    #[error("invalid listener handle {0:?}")]
    InvalidHandle(ListenerHandle),
}

struct Slot {
    handle: ListenerHandle,
    callback: Listener,
}

/// Per-kind listener lists with deferred structural mutation
pub struct EventDispatcher {
    lists: HashMap<EventKind, Vec<Slot>>,
    /// Kind each live handle is registered under
    handles: HashMap<ListenerHandle, EventKind>,
    next_handle: u64,
    /// Dispatch nesting depth; structural removals are deferred while > 0
    depth: u32,
    deferred_removals: Vec<(EventKind, ListenerHandle)>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            lists: HashMap::new(),
            handles: HashMap::new(),
            next_handle: 0,
            depth: 0,
            deferred_removals: Vec::new(),
        }
    }

    /// Register a listener for one event kind
    ///
    /// Listeners for a kind are invoked in registration order. If called
    /// while an event of `kind` is being dispatched, the new listener joins
    /// the list after the current pass and is not invoked by it.
    pub fn register(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&Event, &mut EventDispatcher) + 'static,
    ) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(handle, kind);
        self.lists.entry(kind).or_default().push(Slot {
            handle,
            callback: Box::new(callback),
        });
        handle
    }

    /// Remove a listener by handle
    ///
    /// A handle that was never issued, or whose listener is already gone,
    /// is a reported error. Removal requested during dispatch is deferred
    /// until the outermost pass completes; the listener may still run once
    /// during the pass that removed it.
    pub fn unregister(&mut self, handle: ListenerHandle) -> Result<(), DispatchError> {
        let kind = self
            .handles
            .remove(&handle)
            .ok_or(DispatchError::InvalidHandle(handle))?;

        if self.depth > 0 {
            self.deferred_removals.push((kind, handle));
        } else {
            self.remove_slot(kind, handle);
        }
        Ok(())
    }

    /// Deliver one event to every listener registered for its kind
    ///
    /// Zero registered listeners is a silent no-op. Listeners run
    /// synchronously on the calling thread, in registration order.
    pub fn dispatch(&mut self, event: &Event) {
        let kind = event.kind();
        // Detach the list so listeners can borrow the dispatcher itself.
        let Some(mut list) = self.lists.remove(&kind) else {
            return;
        };

        self.depth += 1;
        for slot in &mut list {
            (slot.callback)(event, self);
        }
        self.depth -= 1;

        // Listeners registered for this kind during the pass landed in a
        // fresh list; append them so registration order is preserved.
        if let Some(added) = self.lists.remove(&kind) {
            list.extend(added);
        }
        self.lists.insert(kind, list);

        if self.depth == 0 && !self.deferred_removals.is_empty() {
            let removals = std::mem::take(&mut self.deferred_removals);
            for (kind, handle) in removals {
                self.remove_slot(kind, handle);
            }
        }
    }

    /// Number of live listeners for a kind
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.lists.get(&kind).map_or(0, Vec::len)
    }

    fn remove_slot(&mut self, kind: EventKind, handle: ListenerHandle) {
        if let Some(list) = self.lists.get_mut(&kind) {
            list.retain(|slot| slot.handle != handle);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
