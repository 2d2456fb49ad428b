#![forbid(unsafe_code)]

//! Ready-made view rendering one of three refresh phases.
//!
//! [`RefreshableView`] is a convenience consumer of the core contract: it
//! owns one [`Refresher`], reads the nearest refresh action from the
//! environment, and hands the resulting [`RefreshPhase`] to a content
//! function. Custom refresh UI that outgrows it should use [`Refresher`]
//! and the environment directly.

use std::fmt;

use refreshable_core::{Environment, RefreshAction, Refresher};

use crate::View;

/// The state a refresh-aware view renders from.
///
/// A closed set; match exhaustively.
#[derive(Clone)]
pub enum RefreshPhase {
    /// No refresh in progress. Trigger one with
    /// `refresher.perform(&action)`.
    Idle {
        /// Coordinator for this trigger site.
        refresher: Refresher,
        /// The nearest action attached by an ancestor.
        action: RefreshAction,
    },
    /// A refresh is in flight; show a spinner or equivalent.
    Refreshing,
    /// No ancestor attached a refresh action; this view cannot refresh.
    NotSupported,
}

impl RefreshPhase {
    /// Whether this phase is [`RefreshPhase::Refreshing`].
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        matches!(self, RefreshPhase::Refreshing)
    }

    /// Whether refreshing is possible here at all.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, RefreshPhase::NotSupported)
    }
}

impl fmt::Debug for RefreshPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshPhase::Idle { refresher, .. } => f
                .debug_struct("Idle")
                .field("refresher", refresher)
                .finish_non_exhaustive(),
            RefreshPhase::Refreshing => f.write_str("Refreshing"),
            RefreshPhase::NotSupported => f.write_str("NotSupported"),
        }
    }
}

/// View that resolves the current [`RefreshPhase`] and renders content for
/// it.
///
/// ```
/// use refreshable_core::Environment;
/// use refreshable_widgets::{RefreshPhase, RefreshableView, View, ViewExt};
///
/// let view = RefreshableView::new(|phase| match phase {
///     RefreshPhase::Idle { .. } => "pull to refresh",
///     RefreshPhase::Refreshing => "refreshing...",
///     RefreshPhase::NotSupported => "not supported",
/// })
/// .on_refresh(|handle| handle.end());
///
/// assert_eq!(view.body(&Environment::root()), "pull to refresh");
/// ```
pub struct RefreshableView<F> {
    refresher: Refresher,
    content: F,
}

impl<C, F: Fn(RefreshPhase) -> C> RefreshableView<F> {
    /// Create a refreshable view with the given content function.
    ///
    /// The view owns a fresh [`Refresher`]; each `RefreshableView` is its
    /// own trigger site.
    pub fn new(content: F) -> Self {
        Self {
            refresher: Refresher::new(),
            content,
        }
    }

    /// This view's coordinator, for observation or external triggering.
    #[must_use]
    pub fn refresher(&self) -> &Refresher {
        &self.refresher
    }
}

impl<C, F: Fn(RefreshPhase) -> C> View for RefreshableView<F> {
    type Body = C;

    fn body(&self, env: &Environment) -> C {
        let phase = match env.refresh_action() {
            None => RefreshPhase::NotSupported,
            Some(_) if self.refresher.is_refreshing() => RefreshPhase::Refreshing,
            Some(action) => RefreshPhase::Idle {
                refresher: self.refresher.clone(),
                action,
            },
        };
        (self.content)(phase)
    }
}

impl<F> fmt::Debug for RefreshableView<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshableView")
            .field("refresher", &self.refresher)
            .finish_non_exhaustive()
    }
}
