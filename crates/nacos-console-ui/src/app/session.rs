//! Browser wiring for the session guard.

use crate::app::preferences::LocalSessionStore;
use crate::core::session::{GapThreshold, ListenerSlot, SessionGuard};
use gloo::events::EventListener;
use gloo::utils::window;
use std::cell::RefCell;
use std::rc::Rc;

/// Registered `beforeunload`/`unload` observers; dropping them unregisters both.
pub(crate) struct SessionListeners {
    _before_unload: EventListener,
    _unload: EventListener,
}

thread_local! {
    static LISTENERS: RefCell<ListenerSlot<SessionListeners>> =
        RefCell::new(ListenerSlot::default());
}

#[allow(clippy::cast_possible_truncation)]
fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Attach the session guard to the window, replacing any previous install.
pub(crate) fn install_session_guard(close_gap_ms: i64) {
    let guard = Rc::new(RefCell::new(SessionGuard::new(GapThreshold::new(close_gap_ms))));
    let target = window();

    let before_unload = {
        let guard = Rc::clone(&guard);
        EventListener::new(&target, "beforeunload", move |_| {
            guard.borrow_mut().before_unload(now_ms());
        })
    };
    let unload = EventListener::new(&target, "unload", move |_| {
        let kind = guard.borrow_mut().unload(now_ms(), &LocalSessionStore);
        tracing::debug!(?kind, "window unloaded");
    });

    LISTENERS.with(|slot| {
        slot.borrow_mut().install(SessionListeners {
            _before_unload: before_unload,
            _unload: unload,
        });
    });
}

/// Detach the session guard's observers, if installed.
pub(crate) fn remove_session_guard() {
    LISTENERS.with(|slot| slot.borrow_mut().uninstall());
}
