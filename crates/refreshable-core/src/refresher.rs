#![forbid(unsafe_code)]

//! Per-trigger-site refresh coordinator.
//!
//! A [`Refresher`] owns the canonical "is refreshing" boolean for one
//! trigger site and enforces the single-in-flight invariant: a `perform`
//! while a refresh is already running is a silent no-op — no queuing, no
//! error. The flag lives in an [`Observable`] cell; the
//! [`RefreshHandle`](crate::RefreshHandle) passed to the action is a clone
//! of that same cell, so the coordinator's published state and the handle
//! stay synchronized by construction.
//!
//! # Invariants
//!
//! 1. At most one refresh in flight per `Refresher` at a time.
//! 2. The transition to `true` is observable (subscribers notified) before
//!    the action body runs.
//! 3. The transition to `false` is observable immediately after `end()`
//!    returns, whenever the action chooses to call it.
//! 4. Two states only, {idle, refreshing}; no other bookkeeping.
//!
//! # Failure Modes
//!
//! - Action never calls `end()`: the coordinator stays refreshing forever.
//!   Documented possible-stuck state, a contract violation by the action
//!   implementor; the core neither detects nor recovers from it.

use tracing::trace;

use crate::environment::RefreshAction;
use crate::handle::RefreshHandle;
use crate::observable::{Observable, Subscription};

/// Observable refresh-state holder for one trigger site.
///
/// `Clone` shares state: all clones publish the same flag. Typical use from
/// a view rendering the idle phase:
///
/// ```
/// use refreshable_core::{RefreshAction, Refresher};
///
/// let refresher = Refresher::new();
/// let action = RefreshAction::new(|handle| {
///     // kick off the actual work; end now or from a later continuation
///     handle.end();
/// });
///
/// refresher.perform(&action);
/// ```
#[derive(Clone)]
pub struct Refresher {
    is_refreshing: Observable<bool>,
}

impl Refresher {
    /// Create an idle refresher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_refreshing: Observable::new(false),
        }
    }

    /// Whether a refresh is currently in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing.get()
    }

    /// Observe the flag; fires with the new value on every transition.
    ///
    /// This is the hook a host UI uses to re-render wherever the refresher
    /// is displayed. Hold the returned guard for as long as the observation
    /// should live.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&bool) + 'static) -> Subscription {
        self.is_refreshing.subscribe(callback)
    }

    /// Begin a refresh with an environment-supplied action.
    ///
    /// See [`perform_with`](Refresher::perform_with) for the exact contract.
    pub fn perform(&self, action: &RefreshAction) {
        self.perform_with(|handle| action.invoke(handle));
    }

    /// Begin a refresh.
    ///
    /// If a refresh is already in flight this returns immediately without
    /// invoking `action`. Otherwise the flag flips to `true` (subscribers
    /// notified synchronously, before the action body runs), a fresh
    /// [`RefreshHandle`] aliasing this refresher's flag is constructed, and
    /// `action` is invoked with it. The call does not wait for the refresh
    /// to finish: the action may return immediately and call
    /// [`RefreshHandle::end`] from a later continuation.
    pub fn perform_with(&self, action: impl FnOnce(RefreshHandle)) {
        if self.is_refreshing.get() {
            trace!("refresh already in flight, ignoring perform");
            return;
        }
        trace!("refresh started");
        self.is_refreshing.set(true);
        let handle = RefreshHandle::new(self.is_refreshing.clone());
        action(handle);
    }
}

impl Default for Refresher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Refresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refresher")
            .field("is_refreshing", &self.is_refreshing())
            .finish()
    }
}
