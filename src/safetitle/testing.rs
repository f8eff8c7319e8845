//! In-memory stand-ins for the host editor, for tests.
//!
//! [`FakeElement`] behaves like a DOM element as far as the guard can tell:
//! capture listeners run before the rest, a stopped signal reaches no further
//! listeners, aborted or removed listeners are skipped even mid-dispatch.

use crate::host::{
    EditorView, EventTarget, HostElement, Listener, ListenerId, ListenerOptions, Signal,
    SignalKind, TitleElement, TooltipDisplay, TooltipOptions,
};
use crate::listener::AbortSignal;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Registration {
    id: ListenerId,
    kind: SignalKind,
    options: ListenerOptions,
    listener: Rc<RefCell<Listener>>,
}

pub struct FakeElement {
    node_name: String,
    text: RefCell<Option<String>>,
    registrations: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
}

impl FakeElement {
    pub fn new(node_name: &str, text: Option<&str>) -> Self {
        Self {
            node_name: node_name.to_uppercase(),
            text: RefCell::new(text.map(str::to_string)),
            registrations: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn div(text: &str) -> Self {
        Self::new("div", Some(text))
    }

    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    /// Replaces the text without notifying anyone, like a raw DOM write.
    pub fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = Some(text.to_string());
    }

    /// Simulates the user editing the title: the text changes, then an input
    /// signal is dispatched.
    pub fn type_text(&self, text: &str) -> Signal {
        self.set_text(text);
        self.dispatch(Signal::input())
    }

    /// Registers a plain (non-capture) listener, the way the host's own
    /// save handler would be.
    pub fn listen(
        &self,
        kind: SignalKind,
        listener: impl FnMut(&mut Signal) + 'static,
    ) -> ListenerId {
        self.add_event_listener(kind, Box::new(listener), ListenerOptions::default())
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    pub fn registered_options(&self) -> Vec<ListenerOptions> {
        self.registrations
            .borrow()
            .iter()
            .map(|r| r.options.clone())
            .collect()
    }

    pub fn registered_kinds(&self) -> Vec<SignalKind> {
        self.registrations.borrow().iter().map(|r| r.kind).collect()
    }

    /// Delivers `signal` to every matching listener and returns it as the
    /// last listener left it.
    pub fn dispatch(&self, mut signal: Signal) -> Signal {
        let mut chain: Vec<(ListenerId, bool, Option<AbortSignal>, Rc<RefCell<Listener>>)> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.kind == signal.kind)
            .map(|r| {
                (
                    r.id,
                    r.options.capture,
                    r.options.signal.clone(),
                    r.listener.clone(),
                )
            })
            .collect();
        // Stable, so registration order holds within each group.
        chain.sort_by_key(|(_, capture, _, _)| !capture);

        for (id, _, abort, listener) in chain {
            if signal.is_propagation_stopped() {
                break;
            }
            if abort.as_ref().is_some_and(|a| a.aborted()) || !self.is_registered(id) {
                continue;
            }
            let mut listener = listener.borrow_mut();
            (*listener)(&mut signal);
        }
        signal
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.registrations.borrow().iter().any(|r| r.id == id)
    }
}

impl TitleElement for FakeElement {
    fn node_name(&self) -> String {
        self.node_name.clone()
    }

    fn text_content(&self) -> Option<String> {
        self.text()
    }

    fn set_text_content(&self, text: &str) {
        self.set_text(text);
    }
}

impl EventTarget for FakeElement {
    fn add_event_listener(
        &self,
        kind: SignalKind,
        listener: Listener,
        options: ListenerOptions,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.registrations.borrow_mut().push(Registration {
            id,
            kind,
            options,
            listener: Rc::new(RefCell::new(listener)),
        });
        id
    }

    fn remove_event_listener(&self, id: ListenerId) {
        self.registrations.borrow_mut().retain(|r| r.id != id);
    }
}

/// A document view holding elements under fixed selectors.
#[derive(Default)]
pub struct FakeView {
    elements: Vec<(String, Rc<FakeElement>)>,
}

impl FakeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, selector: &str, element: Rc<FakeElement>) -> Self {
        self.elements.push((selector.to_string(), element));
        self
    }

    /// A view whose title element sits under the default title selector.
    pub fn with_title(text: &str) -> (Self, Rc<FakeElement>) {
        let title = Rc::new(FakeElement::div(text));
        let view = Self::new().with_element(crate::constants::TITLE_QUERY_SELECTOR, title.clone());
        (view, title)
    }
}

impl EditorView for FakeView {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn HostElement>> {
        self.elements
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, element)| element.clone() as Rc<dyn HostElement>)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownTooltip {
    pub message: String,
    pub options: TooltipOptions,
}

/// Records every tooltip instead of drawing it.
#[derive(Default)]
pub struct FakeTooltip {
    shown: RefCell<Vec<ShownTooltip>>,
}

impl FakeTooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<ShownTooltip> {
        self.shown.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.shown
            .borrow()
            .iter()
            .map(|t| t.message.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.shown.borrow().len()
    }
}

impl TooltipDisplay for FakeTooltip {
    fn display(&self, _element: &dyn TitleElement, message: &str, options: &TooltipOptions) {
        self.shown.borrow_mut().push(ShownTooltip {
            message: message.to_string(),
            options: options.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_listeners_run_first() {
        let element = FakeElement::div("x");
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = order.clone();
        element.listen(SignalKind::Input, move |_| o.borrow_mut().push("host"));
        let o = order.clone();
        element.add_event_listener(
            SignalKind::Input,
            Box::new(move |_: &mut Signal| o.borrow_mut().push("capture")),
            ListenerOptions {
                capture: true,
                ..Default::default()
            },
        );

        element.dispatch(Signal::input());
        assert_eq!(*order.borrow(), vec!["capture", "host"]);
    }

    #[test]
    fn test_stopped_signal_skips_remaining_listeners() {
        let element = FakeElement::div("x");
        let hits = Rc::new(Cell::new(0));

        element.listen(SignalKind::Blur, |sig| sig.stop_immediate_propagation());
        let h = hits.clone();
        element.listen(SignalKind::Blur, move |_| h.set(h.get() + 1));

        let signal = element.dispatch(Signal::blur());
        assert!(signal.is_propagation_stopped());
        assert_eq!(hits.get(), 0);

        // Only that one signal was cancelled.
        element.listen(SignalKind::Input, {
            let h = hits.clone();
            move |_| h.set(h.get() + 1)
        });
        element.dispatch(Signal::input());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_query_selector() {
        let (view, title) = FakeView::with_title("Note");
        let found = view
            .query_selector(crate::constants::TITLE_QUERY_SELECTOR)
            .unwrap();
        assert_eq!(found.node_name(), "DIV");
        assert_eq!(found.text_content(), title.text());
        assert!(view.query_selector("div.other").is_none());
    }
}
