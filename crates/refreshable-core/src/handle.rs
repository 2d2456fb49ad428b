#![forbid(unsafe_code)]

//! Completion token handed to a refresh action.
//!
//! A [`RefreshHandle`] wraps the owning [`Refresher`](crate::Refresher)'s
//! `Observable<bool>` — the shared cell itself, not a boolean copy — so
//! mutations through the handle are immediately visible through the
//! coordinator and vice versa. A fresh handle is constructed per refresh
//! attempt and discarded when the action retires it; handles are never
//! reused across refreshes.
//!
//! Construction is `pub(crate)`: only the coordinator builds handles. That
//! is a visibility guarantee, not a runtime check.
//!
//! # Invariants
//!
//! 1. `is_refreshing()` reads the live flag, never a stale snapshot.
//! 2. `end()` is idempotent: ending twice (or while not refreshing) is a
//!    harmless no-op. There is no error state.

use crate::observable::Observable;

/// Token aliasing the triggering coordinator's in-flight flag.
///
/// Consumers call [`end`](RefreshHandle::end) to finish the refresh:
///
/// ```
/// use refreshable_core::{RefreshAction, Refresher};
///
/// let refresher = Refresher::new();
/// refresher.perform(&RefreshAction::new(|handle| {
///     // ...do the refresh work, then:
///     handle.end();
/// }));
/// assert!(!refresher.is_refreshing());
/// ```
#[derive(Clone)]
pub struct RefreshHandle {
    flag: Observable<bool>,
}

impl RefreshHandle {
    pub(crate) fn new(flag: Observable<bool>) -> Self {
        Self { flag }
    }

    /// Whether the refresh this handle belongs to is still in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.flag.get()
    }

    /// End the refresh.
    ///
    /// Sets the shared flag to `false`; the coordinator's subscribers are
    /// notified before this returns. Calling `end` when the flag is already
    /// `false` does nothing.
    pub fn end(&self) {
        self.flag.set(false);
    }
}

impl std::fmt::Debug for RefreshHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshHandle")
            .field("is_refreshing", &self.is_refreshing())
            .finish()
    }
}
