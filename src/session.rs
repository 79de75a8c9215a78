//! Idempotency guards for page initialization.
//!
//! The detection page re-runs its setup from several triggers (mount
//! effect, tab switches, a periodic style-assertion timer). These guards
//! make that safe: latches ensure one-shot bodies run once, and the
//! binding registry keeps at most one live listener per element/event
//! pair. Missing DOM elements degrade to a console warning - the
//! surrounding markup is an external collaborator and not guaranteed to
//! match.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Key for listeners bound at the document level rather than an element.
pub const DOCUMENT_TARGET: &str = "document";

/// Named one-shot latches.
#[derive(Debug, Default)]
pub struct Latches {
    set: RefCell<HashSet<&'static str>>,
}

impl Latches {
    /// Run `body` only if the named latch is unset. The latch is set
    /// *before* the body runs, so a body that re-enters the same latch
    /// no-ops instead of recursing.
    pub fn run_once(&self, name: &'static str, body: impl FnOnce()) -> bool {
        if !self.set.borrow_mut().insert(name) {
            return false;
        }
        body();
        true
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.set.borrow().contains(name)
    }
}

type BoundHandler = Closure<dyn FnMut(web_sys::Event)>;

/// At most one live handler per (target, event type). Rebinding detaches
/// the previous closure before attaching the new one, so init routines
/// can run any number of times without stacking listeners.
#[derive(Default)]
pub struct BindingRegistry {
    bound: RefCell<HashMap<(String, String), BoundHandler>>,
}

impl BindingRegistry {
    /// Bind `handler` to the element with the given id. Returns whether a
    /// listener is now attached; a missing element logs and returns false
    /// without error.
    pub fn bind_once(
        &self,
        element_id: &str,
        event_type: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> bool {
        let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id))
        else {
            web_sys::console::warn_1(
                &format!("bind_once: no element with id \"{element_id}\"").into(),
            );
            return false;
        };
        self.attach(&element, element_id, event_type, handler)
    }

    /// Bind `handler` at the document level (keyboard shortcuts).
    pub fn bind_document_once(
        &self,
        event_type: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> bool {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return false;
        };
        self.attach(document.as_ref(), DOCUMENT_TARGET, event_type, handler)
    }

    fn attach(
        &self,
        target: &web_sys::EventTarget,
        target_id: &str,
        event_type: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> bool {
        let key = (target_id.to_string(), event_type.to_string());
        if let Some(previous) = self.bound.borrow_mut().remove(&key) {
            let _ = target.remove_event_listener_with_callback(
                event_type,
                previous.as_ref().unchecked_ref(),
            );
        }

        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        if target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::warn_1(
                &format!("bind_once: could not attach {event_type} to \"{target_id}\"").into(),
            );
            return false;
        }
        self.bound.borrow_mut().insert(key, closure);
        true
    }

    pub fn is_bound(&self, target_id: &str, event_type: &str) -> bool {
        self.bound
            .borrow()
            .contains_key(&(target_id.to_string(), event_type.to_string()))
    }
}

/// The guards owned by one page session.
#[derive(Default)]
pub struct SessionGuards {
    pub latches: Latches,
    pub bindings: BindingRegistry,
}

/// Start a repeating timer, at most once per latch name. The closure is
/// leaked deliberately: the interval runs for the rest of the page's
/// life.
pub fn start_interval(
    latches: &Latches,
    latch: &'static str,
    period_ms: i32,
    tick: impl FnMut() + 'static,
) {
    latches.run_once(latch, || {
        let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        if let Some(window) = web_sys::window() {
            let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            );
        }
        closure.forget();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn run_once_executes_exactly_once() {
        let latches = Latches::default();
        let count = Cell::new(0);

        assert!(latches.run_once("init", || count.set(count.get() + 1)));
        assert!(!latches.run_once("init", || count.set(count.get() + 1)));
        assert!(!latches.run_once("init", || count.set(count.get() + 1)));

        assert_eq!(count.get(), 1);
        assert!(latches.is_set("init"));
    }

    #[test]
    fn distinct_latches_are_independent() {
        let latches = Latches::default();
        assert!(latches.run_once("layout", || {}));
        assert!(latches.run_once("events", || {}));
        assert!(!latches.is_set("other"));
    }

    #[test]
    fn latch_is_set_before_the_body_runs() {
        let latches = Latches::default();
        let inner_ran = Cell::new(false);

        latches.run_once("init", || {
            // A re-entrant call during the body must not recurse.
            assert!(!latches.run_once("init", || inner_ran.set(true)));
        });

        assert!(!inner_ran.get());
    }
}
