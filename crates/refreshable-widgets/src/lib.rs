#![forbid(unsafe_code)]

//! Refresh-aware view composition on top of `refreshable-core`.
//!
//! The core crate owns the coordination mechanism; this crate is the thin
//! presentation glue: a minimal [`View`] render contract with an explicitly
//! threaded [`Environment`], the [`OnRefresh`] decorator that attaches a
//! refresh action for a subtree, and [`RefreshableView`] which renders one
//! of three phases.

pub mod on_refresh;
pub mod refreshable_view;

pub use on_refresh::OnRefresh;
pub use refreshable_view::{RefreshPhase, RefreshableView};

use refreshable_core::{Environment, RefreshAction, RefreshHandle};

/// A `View` produces its body for a given environment.
///
/// The environment is threaded explicitly through render calls; a host
/// framework with implicit context propagation would supply it. Deriving a
/// child environment inside `body` scopes an override to that subtree.
pub trait View {
    /// What rendering this view yields.
    type Body;

    /// Render the view under `env`.
    fn body(&self, env: &Environment) -> Self::Body;
}

/// Builder-style decorators for any [`View`].
pub trait ViewExt: View + Sized {
    /// Enable a refresh action for this view's subtree.
    ///
    /// Every descendant querying the environment sees `action` as the
    /// nearest refresh action, unless a nested `on_refresh` shadows it.
    fn on_refresh(self, action: impl Fn(RefreshHandle) + 'static) -> OnRefresh<Self> {
        OnRefresh::new(self, RefreshAction::new(action))
    }
}

impl<V: View> ViewExt for V {}
