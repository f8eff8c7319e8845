//! # Host Boundary
//!
//! The guard never talks to a real editor directly. Everything it needs from
//! the host editing framework is expressed here as small traits, so the same
//! guard can sit on top of a browser DOM binding, a native widget toolkit, or
//! the in-memory fake in [`crate::testing`].
//!
//! | Trait              | Host concept                                  |
//! | ------------------ | --------------------------------------------- |
//! | [`EditorView`]     | a document view's subtree + selector queries  |
//! | [`TitleElement`]   | read/write access to an element's plain text  |
//! | [`EventTarget`]    | listener registration and removal             |
//! | [`TooltipDisplay`] | the inline error popup                        |
//!
//! Signals are plain data ([`Signal`]) that the host hands to each listener by
//! mutable reference, so a listener can stop the rest of the chain from seeing
//! it.

use crate::listener::AbortSignal;
use std::rc::Rc;

/// The four signal types the guard listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    FocusIn,
    Input,
    KeyDown,
    Blur,
}

impl SignalKind {
    /// The DOM event name for this signal.
    pub fn event_name(self) -> &'static str {
        match self {
            SignalKind::FocusIn => "focusin",
            SignalKind::Input => "input",
            SignalKind::KeyDown => "keydown",
            SignalKind::Blur => "blur",
        }
    }
}

/// Where in its propagation path a signal is being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Capturing,
    AtTarget,
    Bubbling,
}

/// A single notification delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub kind: SignalKind,
    pub phase: EventPhase,
    /// Set while an input method composition session is open.
    pub is_composing: bool,
    /// Key name for [`SignalKind::KeyDown`] (`"Enter"`, `"Tab"`, ...).
    pub key: Option<String>,
    /// Legacy numeric key code for [`SignalKind::KeyDown`].
    pub key_code: Option<u32>,
    propagation_stopped: bool,
}

impl Signal {
    pub fn new(kind: SignalKind) -> Self {
        Self {
            kind,
            phase: EventPhase::AtTarget,
            is_composing: false,
            key: None,
            key_code: None,
            propagation_stopped: false,
        }
    }

    pub fn focus_in() -> Self {
        Self::new(SignalKind::FocusIn)
    }

    pub fn input() -> Self {
        Self::new(SignalKind::Input)
    }

    pub fn blur() -> Self {
        Self::new(SignalKind::Blur)
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::new(SignalKind::KeyDown)
        }
    }

    pub fn with_phase(mut self, phase: EventPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn composing(mut self) -> Self {
        self.is_composing = true;
        self
    }

    pub fn with_key_code(mut self, key_code: u32) -> Self {
        self.key_code = Some(key_code);
        self
    }

    /// True when the signal originated on the element it is delivered to,
    /// rather than arriving from a descendant.
    pub fn is_at_target(&self) -> bool {
        self.phase == EventPhase::AtTarget
    }

    /// Keeps every remaining listener, on this element and beyond, from
    /// seeing this signal. Later signals are unaffected.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Callback registered on an [`EventTarget`].
pub type Listener = Box<dyn FnMut(&mut Signal)>;

/// Handle returned by [`EventTarget::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Registration flags, mirroring `AddEventListenerOptions`.
#[derive(Debug, Clone, Default)]
pub struct ListenerOptions {
    pub capture: bool,
    pub passive: bool,
    /// Once aborted, the host must stop delivering to this listener.
    pub signal: Option<AbortSignal>,
}

/// Plain text access to a host element.
pub trait TitleElement {
    /// Upper-case tag name, e.g. `"DIV"`.
    fn node_name(&self) -> String;

    /// Current text, or `None` when the host reports no text node at all.
    fn text_content(&self) -> Option<String>;

    fn set_text_content(&self, text: &str);
}

pub trait EventTarget {
    fn add_event_listener(
        &self,
        kind: SignalKind,
        listener: Listener,
        options: ListenerOptions,
    ) -> ListenerId;

    fn remove_event_listener(&self, id: ListenerId);
}

/// An element the guard can both read and listen on.
pub trait HostElement: TitleElement + EventTarget {}

impl<T: TitleElement + EventTarget + ?Sized> HostElement for T {}

/// The subtree of one open document view.
pub trait EditorView {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn HostElement>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipOptions {
    pub classes: Vec<String>,
    pub placement: String,
}

/// Inline popup used to explain why input was rejected.
pub trait TooltipDisplay {
    fn display(&self, element: &dyn TitleElement, message: &str, options: &TooltipOptions);
}
