//! # Title Edit Guard
//!
//! A [`TitleGuard`] keeps an invalid filename from being committed while the
//! user edits a note's title in place. One guard is attached per open
//! document view and owns everything it registers.
//!
//! The host handles title edits by listening on the title element itself:
//!
//! | Signal    | Host behaviour                                   |
//! | --------- | ------------------------------------------------ |
//! | `input`   | shows its own error for some bad names           |
//! | `keydown` | on a confirm key, saves and jumps to the body    |
//! | `blur`    | saves the file                                   |
//!
//! The guard registers capture listeners on the same element so that it runs
//! first, and reacts as follows:
//!
//! - **focusin**: remembers the current text as the last good title.
//! - **input**: shows a tooltip naming the broken rule and stops the signal.
//!   The text is left alone so the user can keep fixing it. An empty title is
//!   tolerated here; the host refuses to save it anyway.
//! - **confirm key / blur**: if the title is invalid, stops the signal and
//!   puts the last good title back. Otherwise the new title becomes the last
//!   good one.
//!
//! Signals that bubbled up from a descendant and signals sent during an input
//! method composition are ignored.
//!
//! [`TitleGuard::detach`] unregisters all four listeners at once. Dropping the
//! guard does the same.

use crate::config::GuardConfig;
use crate::constants::{IME_PROCESS_KEY_CODE, TITLE_NODE_NAME};
use crate::error::{Result, SafeTitleError};
use crate::filename::{classify, is_invalid, InvalidReason, Verdict};
use crate::host::{EditorView, HostElement, Listener, Signal, SignalKind, TooltipDisplay};
use crate::listener::{AbortController, ListenerGroup};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// Where the guard is in an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPhase {
    /// The title does not have focus.
    Idle,
    /// The title has focus and may be typed into.
    Editing,
    /// An invalid commit is being reverted. Only observable from inside a
    /// signal handling pass.
    Suppressing,
}

struct GuardState {
    element: Rc<dyn HostElement>,
    tooltip: Rc<dyn TooltipDisplay>,
    config: GuardConfig,
    last_good_text: String,
    phase: GuardPhase,
}

impl GuardState {
    /// Stores `text` as the last good title. An invalid value is kept too,
    /// but logged, since it means the host let a bad title through.
    fn remember(&mut self, text: Option<String>) {
        if is_invalid(text.as_deref()) {
            warn!(
                old = %self.last_good_text,
                new = text.as_deref().unwrap_or("null"),
                "replacing last good title with an invalid value"
            );
        }
        self.last_good_text = text.unwrap_or_default();
    }

    fn on_focus_in(&mut self, signal: &mut Signal) {
        if !signal.is_at_target() {
            return;
        }
        debug!("handling focusin");
        self.phase = GuardPhase::Editing;
        let text = self.element.text_content();
        self.remember(text);
    }

    /// Returns the message to show, if the current text should be reported.
    fn on_input(&mut self, signal: &mut Signal) -> Option<&'static str> {
        if !signal.is_at_target() || signal.is_composing {
            return None;
        }
        let reason = match classify(self.element.text_content().as_deref()) {
            Verdict::Valid | Verdict::Invalid(InvalidReason::Empty) => return None,
            Verdict::Invalid(reason) => reason,
        };
        debug!(?reason, "handling input");
        signal.stop_immediate_propagation();
        Some(reason.message())
    }

    fn on_key_down(&mut self, signal: &mut Signal) {
        if !signal.is_at_target()
            || signal.is_composing
            || signal.key_code == Some(IME_PROCESS_KEY_CODE)
        {
            return;
        }
        let confirms = signal
            .key
            .as_deref()
            .is_some_and(|key| self.config.is_confirm_key(key));
        if !confirms {
            return;
        }
        debug!(key = ?signal.key, "handling keydown");
        self.commit(signal, GuardPhase::Editing);
    }

    fn on_blur(&mut self, signal: &mut Signal) {
        if !signal.is_at_target() {
            return;
        }
        debug!("handling blur");
        self.commit(signal, GuardPhase::Idle);
    }

    /// Lets a valid title through, or stops `signal` and restores the last
    /// good title. Returns `true` if the title was reverted.
    fn commit(&mut self, signal: &mut Signal, next: GuardPhase) -> bool {
        let text = self.element.text_content();
        let reverted = if is_invalid(text.as_deref()) {
            self.phase = GuardPhase::Suppressing;
            signal.stop_immediate_propagation();
            self.element.set_text_content(&self.last_good_text);
            true
        } else {
            self.remember(text);
            false
        };
        debug!(event = signal.kind.event_name(), reverted, "committed");
        self.phase = next;
        reverted
    }
}

/// Guards the title element of one document view.
pub struct TitleGuard {
    state: Rc<RefCell<GuardState>>,
    listeners: ListenerGroup<dyn HostElement>,
}

impl TitleGuard {
    /// Locates the title inside `view` and starts guarding it.
    ///
    /// Fails with [`SafeTitleError::TitleNotFound`] if nothing matches the
    /// configured selector or the match is not a `div`. Nothing is registered
    /// in that case.
    pub fn attach(
        view: &dyn EditorView,
        tooltip: Rc<dyn TooltipDisplay>,
        config: &GuardConfig,
    ) -> Result<Self> {
        let element = match view.query_selector(&config.title_selector) {
            Some(element) if element.node_name().eq_ignore_ascii_case(TITLE_NODE_NAME) => element,
            Some(other) => {
                return Err(SafeTitleError::TitleNotFound {
                    found: other.node_name(),
                })
            }
            None => {
                return Err(SafeTitleError::TitleNotFound {
                    found: "null".to_string(),
                })
            }
        };

        let mut state = GuardState {
            element: element.clone(),
            tooltip,
            config: config.clone(),
            last_good_text: String::new(),
            phase: GuardPhase::Idle,
        };
        state.remember(element.text_content());
        let state = Rc::new(RefCell::new(state));

        let listeners = ListenerGroup::acquire(
            element,
            true,
            true,
            [
                (SignalKind::Blur, blur_listener(&state)),
                (SignalKind::FocusIn, focus_in_listener(&state)),
                (SignalKind::Input, input_listener(&state)),
                (SignalKind::KeyDown, key_down_listener(&state)),
            ],
        );
        debug!(listeners = listeners.len(), "title guard attached");

        Ok(Self { state, listeners })
    }

    /// Unregisters every listener. Safe to call more than once; returns
    /// `false` if the guard was already detached.
    pub fn detach(&mut self) -> bool {
        let released = self.listeners.release();
        if released {
            self.state.borrow_mut().phase = GuardPhase::Idle;
            debug!("title guard detached");
        }
        released
    }

    pub fn is_attached(&self) -> bool {
        !self.listeners.is_released()
    }

    /// Handle that silences every listener of this guard at once. Usable from
    /// inside a signal handler; the registrations themselves are removed on
    /// the next [`detach`](Self::detach) or on drop.
    pub fn teardown_handle(&self) -> AbortController {
        self.listeners.controller()
    }

    pub fn last_good_text(&self) -> String {
        self.state.borrow().last_good_text.clone()
    }

    pub fn phase(&self) -> GuardPhase {
        self.state.borrow().phase
    }
}

fn focus_in_listener(state: &Rc<RefCell<GuardState>>) -> Listener {
    let state = Rc::clone(state);
    Box::new(move |signal: &mut Signal| state.borrow_mut().on_focus_in(signal))
}

fn input_listener(state: &Rc<RefCell<GuardState>>) -> Listener {
    let state = Rc::clone(state);
    Box::new(move |signal: &mut Signal| {
        let message = state.borrow_mut().on_input(signal);
        if let Some(message) = message {
            // Not borrowed while the host draws, in case it calls back in.
            let (element, tooltip, options) = {
                let state = state.borrow();
                (
                    state.element.clone(),
                    state.tooltip.clone(),
                    state.config.tooltip_options(),
                )
            };
            tooltip.display(element.as_ref(), message, &options);
        }
    })
}

fn key_down_listener(state: &Rc<RefCell<GuardState>>) -> Listener {
    let state = Rc::clone(state);
    Box::new(move |signal: &mut Signal| state.borrow_mut().on_key_down(signal))
}

fn blur_listener(state: &Rc<RefCell<GuardState>>) -> Listener {
    let state = Rc::clone(state);
    Box::new(move |signal: &mut Signal| state.borrow_mut().on_blur(signal))
}
