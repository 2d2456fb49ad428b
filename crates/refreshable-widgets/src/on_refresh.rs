#![forbid(unsafe_code)]

//! Decorator that attaches a refresh action to a view subtree.

use refreshable_core::{Environment, RefreshAction};

use crate::View;

/// Wraps a view and renders it under an environment with the given refresh
/// action attached.
///
/// Usually constructed through [`ViewExt::on_refresh`](crate::ViewExt::on_refresh).
/// The attachment is scoped: siblings of the wrapped view are unaffected,
/// and a nested `OnRefresh` inside the subtree shadows this one.
pub struct OnRefresh<V> {
    inner: V,
    action: RefreshAction,
}

impl<V> OnRefresh<V> {
    /// Decorate `inner` with `action`.
    pub fn new(inner: V, action: RefreshAction) -> Self {
        Self { inner, action }
    }
}

impl<V: View> View for OnRefresh<V> {
    type Body = V::Body;

    fn body(&self, env: &Environment) -> V::Body {
        self.inner
            .body(&env.with_refresh_action(self.action.clone()))
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for OnRefresh<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnRefresh").field("inner", &self.inner).finish()
    }
}
