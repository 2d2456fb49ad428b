#![forbid(unsafe_code)]

//! Tree-scoped propagation of the refresh action from ancestor to descendant.
//!
//! An [`Environment`] is an explicit context object threaded through render
//! calls — a parent-linked chain of immutable scopes, not ambient global
//! state. Attaching a refresh action derives a child environment whose slot
//! shadows any ancestor's for the subtree rendered under it; reading walks
//! the chain and returns the nearest attached action.
//!
//! # Invariants
//!
//! 1. `refresh_action()` on an environment with no attachment up to the root
//!    returns `None` ("not supported") — the designed signal, not an error.
//! 2. Innermost attachment wins: a nested `with_refresh_action` shadows the
//!    outer action for its own subtree only.
//! 3. Deriving a child environment never mutates the parent; siblings
//!    rendered under the parent still see the outer action.
//! 4. Environments are cheap to clone (shared scope chain).

use std::fmt;
use std::rc::Rc;

use crate::handle::RefreshHandle;

/// An application-supplied refresh action.
///
/// The action receives a [`RefreshHandle`] aliasing the triggering
/// [`Refresher`](crate::Refresher)'s in-flight flag. It may return before the
/// refresh is done and call [`RefreshHandle::end`] later from whatever
/// completion path the host provides — but it must always eventually call
/// `end()`, including on its own failure paths; the core never times a
/// refresh out.
#[derive(Clone)]
pub struct RefreshAction {
    f: Rc<dyn Fn(RefreshHandle)>,
}

impl RefreshAction {
    /// Wrap a function as a refresh action.
    pub fn new(f: impl Fn(RefreshHandle) + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    /// Run the action with `handle`.
    pub fn invoke(&self, handle: RefreshHandle) {
        (self.f)(handle);
    }
}

impl fmt::Debug for RefreshAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshAction").finish()
    }
}

struct Scope {
    parent: Option<Rc<Scope>>,
    refresh_action: Option<RefreshAction>,
}

/// Tree-scoped context threaded through render calls.
///
/// The single slot carried today is the optional [`RefreshAction`]; the
/// scope-chain shape is what gives it standard environment semantics
/// (innermost override wins, absent means unset).
#[derive(Clone)]
pub struct Environment {
    scope: Rc<Scope>,
}

impl Environment {
    /// The empty root environment: nothing attached.
    #[must_use]
    pub fn root() -> Self {
        Self {
            scope: Rc::new(Scope {
                parent: None,
                refresh_action: None,
            }),
        }
    }

    /// Derive a child environment with `action` attached.
    ///
    /// Everything rendered under the returned environment sees `action` as
    /// the nearest refresh action, shadowing any ancestor attachment. The
    /// receiver is left untouched.
    #[must_use]
    pub fn with_refresh_action(&self, action: RefreshAction) -> Environment {
        Environment {
            scope: Rc::new(Scope {
                parent: Some(Rc::clone(&self.scope)),
                refresh_action: Some(action),
            }),
        }
    }

    /// The nearest enclosing refresh action, or `None` if no ancestor
    /// attached one.
    #[must_use]
    pub fn refresh_action(&self) -> Option<RefreshAction> {
        let mut scope = Some(&self.scope);
        while let Some(s) = scope {
            if let Some(action) = &s.refresh_action {
                return Some(action.clone());
            }
            scope = s.parent.as_ref();
        }
        None
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        let mut attached = false;
        let mut scope = Some(&self.scope);
        while let Some(s) = scope {
            depth += 1;
            attached |= s.refresh_action.is_some();
            scope = s.parent.as_ref();
        }
        f.debug_struct("Environment")
            .field("depth", &depth)
            .field("refresh_action", &attached)
            .finish()
    }
}
