//! Scoped listener groups.
//!
//! A [`ListenerGroup`] registers a fixed set of callbacks on one
//! [`EventTarget`] as a single unit and releases them together. Release is
//! idempotent and also happens on drop, so a group can never leak its
//! registrations.
//!
//! Every callback is wrapped so that it checks the group's [`AbortSignal`]
//! first. Once the group is aborted, a callback that the host still happens to
//! invoke (for instance later in the same dispatch pass) does nothing.

use crate::host::{EventTarget, Listener, ListenerId, ListenerOptions, Signal, SignalKind};
use std::cell::Cell;
use std::rc::Rc;

/// Read side of an [`AbortController`].
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    aborted: Rc<Cell<bool>>,
}

impl AbortSignal {
    pub fn aborted(&self) -> bool {
        self.aborted.get()
    }
}

/// Cancellation handle shared by all listeners of a group.
///
/// Clones share the same flag, so a clone can be handed to code that needs
/// to cancel the group from inside one of its own callbacks.
#[derive(Debug, Clone, Default)]
pub struct AbortController {
    signal: AbortSignal,
}

impl AbortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    /// Aborts the signal. Returns `false` if it was already aborted.
    pub fn abort(&self) -> bool {
        !self.signal.aborted.replace(true)
    }

    pub fn is_aborted(&self) -> bool {
        self.signal.aborted()
    }
}

/// A set of listener registrations acquired and released as one unit.
pub struct ListenerGroup<T: EventTarget + ?Sized> {
    target: Rc<T>,
    controller: AbortController,
    registered: Vec<ListenerId>,
}

impl<T: EventTarget + ?Sized> ListenerGroup<T> {
    /// Registers every `(kind, listener)` pair on `target` with the same
    /// `capture`/`passive` flags and a shared abort signal.
    pub fn acquire(
        target: Rc<T>,
        capture: bool,
        passive: bool,
        listeners: impl IntoIterator<Item = (SignalKind, Listener)>,
    ) -> Self {
        let controller = AbortController::new();
        let registered = listeners
            .into_iter()
            .map(|(kind, listener)| {
                let options = ListenerOptions {
                    capture,
                    passive,
                    signal: Some(controller.signal()),
                };
                target.add_event_listener(kind, guarded(controller.signal(), listener), options)
            })
            .collect();

        Self {
            target,
            controller,
            registered,
        }
    }

    /// Aborts the group and removes every registration from the target.
    ///
    /// Returns `false` if the group had already been released.
    pub fn release(&mut self) -> bool {
        let held = !self.registered.is_empty();
        self.controller.abort();
        for id in self.registered.drain(..) {
            self.target.remove_event_listener(id);
        }
        held
    }

    pub fn is_released(&self) -> bool {
        self.controller.is_aborted()
    }

    /// Number of registrations still held.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn controller(&self) -> AbortController {
        self.controller.clone()
    }
}

impl<T: EventTarget + ?Sized> Drop for ListenerGroup<T> {
    fn drop(&mut self) {
        self.release();
    }
}

fn guarded(signal: AbortSignal, mut listener: Listener) -> Listener {
    Box::new(move |event: &mut Signal| {
        if !signal.aborted() {
            listener(event);
        }
    })
}
