//! Session guard: purge persisted credentials when the window is closed.
//!
//! # Design
//! - Browsers fire `beforeunload` then `unload` for both reloads and closes; the
//!   guard classifies the pair with a pluggable [`CloseDetector`].
//! - Clearing storage is best-effort and idempotent; failures are logged, never raised.
//! - Listener installation goes through a [`ListenerSlot`] so a remount replaces,
//!   rather than duplicates, the registered observers.

use thiserror::Error;

/// How a page teardown was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeardownKind {
    /// The window or tab is going away; session state must be purged.
    Close,
    /// Reload or in-app navigation; session state is kept.
    Reload,
}

/// Strategy deciding whether a teardown is a close.
pub trait CloseDetector {
    /// Classify a teardown given the `beforeunload` → `unload` gap in milliseconds.
    fn classify(&self, gap_ms: i64) -> TeardownKind;
}

/// Default detector: a gap at or under the threshold is a close.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GapThreshold {
    /// Largest gap still treated as a close.
    pub max_gap_ms: i64,
}

impl GapThreshold {
    /// Build a detector with the given threshold.
    #[must_use]
    pub const fn new(max_gap_ms: i64) -> Self {
        Self { max_gap_ms }
    }
}

impl Default for GapThreshold {
    fn default() -> Self {
        Self::new(5)
    }
}

impl CloseDetector for GapThreshold {
    fn classify(&self, gap_ms: i64) -> TeardownKind {
        if gap_ms.max(0) <= self.max_gap_ms {
            TeardownKind::Close
        } else {
            TeardownKind::Reload
        }
    }
}

/// Failure reported by a persisted session store.
#[derive(Debug, Error)]
#[error("session storage unavailable: {detail}")]
pub struct StorageError {
    /// Backend-specific detail.
    pub detail: String,
}

/// Process-wide persisted key/value store holding session state.
pub trait SessionStore {
    /// Remove every persisted entry.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backing store cannot be reached.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Teardown observer pair state plus the classification strategy.
#[derive(Debug)]
pub struct SessionGuard<D = GapThreshold> {
    detector: D,
    before_unload_at: Option<i64>,
    last_gap_ms: Option<i64>,
}

impl<D: CloseDetector> SessionGuard<D> {
    /// Create a guard around a detector.
    pub const fn new(detector: D) -> Self {
        Self {
            detector,
            before_unload_at: None,
            last_gap_ms: None,
        }
    }

    /// Record the `beforeunload` timestamp.
    pub const fn before_unload(&mut self, now_ms: i64) {
        self.before_unload_at = Some(now_ms);
    }

    /// Handle `unload`: classify the teardown and purge `store` on a close.
    ///
    /// An `unload` with no recorded `beforeunload` is treated as a reload.
    pub fn unload(&mut self, now_ms: i64, store: &dyn SessionStore) -> TeardownKind {
        let Some(started) = self.before_unload_at.take() else {
            self.last_gap_ms = None;
            tracing::debug!("unload without beforeunload; keeping session");
            return TeardownKind::Reload;
        };
        let gap = now_ms.saturating_sub(started);
        self.last_gap_ms = Some(gap);
        let kind = self.detector.classify(gap);
        tracing::debug!(gap_ms = gap, ?kind, "page teardown classified");
        if kind == TeardownKind::Close {
            if let Err(err) = store.clear() {
                tracing::warn!(error = %err, "session purge failed; continuing teardown");
            }
        }
        kind
    }

    /// Gap measured by the most recent `unload`, if any.
    #[must_use]
    pub const fn last_gap_ms(&self) -> Option<i64> {
        self.last_gap_ms
    }
}

/// Single installation point for a set of lifecycle listeners.
///
/// Installing a new handle drops the previous one, which unregisters its observers.
#[derive(Debug)]
pub struct ListenerSlot<H> {
    current: Option<H>,
    installs: u64,
}

impl<H> Default for ListenerSlot<H> {
    fn default() -> Self {
        Self {
            current: None,
            installs: 0,
        }
    }
}

impl<H> ListenerSlot<H> {
    /// Install `handle`, dropping whatever was installed before.
    pub fn install(&mut self, handle: H) {
        self.installs += 1;
        if self.current.replace(handle).is_some() {
            tracing::debug!(installs = self.installs, "replaced session guard listeners");
        }
    }

    /// Drop the installed listeners, if any.
    pub fn uninstall(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<BTreeMap<String, String>>,
        clears: Cell<u32>,
    }

    impl MemoryStore {
        fn seeded() -> Self {
            let store = Self::default();
            store
                .entries
                .borrow_mut()
                .insert("token".to_string(), "abc".to_string());
            store
                .entries
                .borrow_mut()
                .insert("docsite_language".to_string(), "en-US".to_string());
            store
        }
    }

    impl SessionStore for MemoryStore {
        fn clear(&self) -> Result<(), StorageError> {
            self.clears.set(self.clears.get() + 1);
            self.entries.borrow_mut().clear();
            Ok(())
        }
    }

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError {
                detail: "quota".to_string(),
            })
        }
    }

    #[test]
    fn short_gap_clears_storage() {
        let store = MemoryStore::seeded();
        let mut guard = SessionGuard::new(GapThreshold::default());
        guard.before_unload(1_000);
        assert_eq!(guard.unload(1_003, &store), TeardownKind::Close);
        assert!(store.entries.borrow().is_empty());
        assert_eq!(guard.last_gap_ms(), Some(3));
    }

    #[test]
    fn long_gap_keeps_storage() {
        let store = MemoryStore::seeded();
        let mut guard = SessionGuard::new(GapThreshold::default());
        guard.before_unload(1_000);
        assert_eq!(guard.unload(1_400, &store), TeardownKind::Reload);
        assert_eq!(store.entries.borrow().len(), 2);
        assert_eq!(store.clears.get(), 0);
    }

    #[test]
    fn threshold_is_inclusive_and_configurable() {
        let detector = GapThreshold::default();
        assert_eq!(detector.classify(5), TeardownKind::Close);
        assert_eq!(detector.classify(6), TeardownKind::Reload);
        let relaxed = GapThreshold::new(50);
        assert_eq!(relaxed.classify(40), TeardownKind::Close);
    }

    #[test]
    fn backwards_clock_counts_as_zero_gap() {
        assert_eq!(GapThreshold::default().classify(-20), TeardownKind::Close);
    }

    #[test]
    fn clearing_twice_matches_clearing_once() {
        let store = MemoryStore::seeded();
        let mut first = SessionGuard::new(GapThreshold::default());
        let mut second = SessionGuard::new(GapThreshold::default());
        first.before_unload(10);
        second.before_unload(10);
        assert_eq!(first.unload(12, &store), TeardownKind::Close);
        let after_once = store.entries.borrow().clone();
        assert_eq!(second.unload(12, &store), TeardownKind::Close);
        assert_eq!(*store.entries.borrow(), after_once);
        assert!(after_once.is_empty());
        assert_eq!(store.clears.get(), 2);
    }

    #[test]
    fn unload_without_before_unload_is_a_reload() {
        let store = MemoryStore::seeded();
        let mut guard = SessionGuard::new(GapThreshold::default());
        assert_eq!(guard.unload(5, &store), TeardownKind::Reload);
        assert_eq!(store.clears.get(), 0);
        assert_eq!(guard.last_gap_ms(), None);
    }

    #[test]
    fn storage_failure_does_not_block_teardown() {
        let mut guard = SessionGuard::new(GapThreshold::default());
        guard.before_unload(0);
        assert_eq!(guard.unload(1, &BrokenStore), TeardownKind::Close);
    }

    #[test]
    fn custom_detector_replaces_threshold() {
        struct AlwaysReload;
        impl CloseDetector for AlwaysReload {
            fn classify(&self, _gap_ms: i64) -> TeardownKind {
                TeardownKind::Reload
            }
        }
        let store = MemoryStore::seeded();
        let mut guard = SessionGuard::new(AlwaysReload);
        guard.before_unload(0);
        assert_eq!(guard.unload(0, &store), TeardownKind::Reload);
        assert_eq!(store.entries.borrow().len(), 2);
    }

    struct CountedListener(Rc<Cell<i32>>);

    impl CountedListener {
        fn new(live: &Rc<Cell<i32>>) -> Self {
            live.set(live.get() + 1);
            Self(Rc::clone(live))
        }
    }

    impl Drop for CountedListener {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn remount_replaces_listeners_instead_of_stacking() {
        let live = Rc::new(Cell::new(0));
        let mut slot = ListenerSlot::default();
        slot.install(CountedListener::new(&live));
        slot.install(CountedListener::new(&live));
        slot.install(CountedListener::new(&live));
        assert_eq!(live.get(), 1);
        assert_eq!(slot.installs, 3);
        assert!(slot.current.is_some());
        slot.uninstall();
        assert_eq!(live.get(), 0);
        assert!(slot.current.is_none());
    }
}
