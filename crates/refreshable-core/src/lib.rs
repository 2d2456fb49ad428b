#![forbid(unsafe_code)]

//! Declarative pull-to-refresh coordination.
//!
//! This crate is the core of a pull-to-refresh abstraction for reactive UIs:
//! an ancestor view advertises "how to refresh", arbitrary descendants
//! discover and trigger it without tight coupling, and a single observable
//! flag per trigger site gates concurrent invocations.
//!
//! Three collaborating pieces:
//!
//! - [`Environment`]: a tree-scoped context channel carrying an optional
//!   [`RefreshAction`] from ancestor to descendants, overridable at any
//!   subtree root.
//! - [`Refresher`]: an observable state holder owned by the triggering view;
//!   it rejects overlapping refreshes and publishes the in-flight flag.
//! - [`RefreshHandle`]: the completion token passed to the action, aliasing
//!   the refresher's own flag; the action calls
//!   [`end()`](RefreshHandle::end) when the work is done.
//!
//! Control flow: an ancestor attaches an action to the environment → a
//! descendant reads it → the descendant's [`Refresher`] flips its flag,
//! builds a handle over that same flag, and invokes the action → the action
//! eventually calls `end()` → every subscriber of the refresher observes the
//! flag drop back to `false`.
//!
//! # Architecture
//!
//! All state lives in [`Observable`] cells: `Rc<RefCell<..>>` single-threaded
//! shared ownership with `Weak` subscriber callbacks, as in the rest of the
//! reactive layer. Handle and refresher are two clones of one
//! `Observable<bool>`, never independent copies — that aliasing is what keeps
//! them synchronized without any explicit bridging.
//!
//! The model is single-threaded and cooperative: `perform` and `end` are
//! synchronous fire-and-forget mutations, nothing blocks or suspends, and
//! there is no scheduler here. An action may do asynchronous work on whatever
//! model the host provides and call `end()` from its continuation, dispatched
//! back onto the host's update context; `Rc` makes the single-threaded
//! contract a compile-time fact.
//!
//! # Invariants
//!
//! 1. At most one refresh in flight per [`Refresher`].
//! 2. The `true` transition is observable before the action runs; the
//!    `false` transition is observable immediately after `end()` returns.
//! 3. Mutations through a handle and through its refresher are views over
//!    one shared cell.
//! 4. An unattached environment reads as `None` — "not supported" is a
//!    value, not an error. No operation in this crate returns an error.

pub mod environment;
pub mod handle;
pub mod observable;
pub mod refresher;

pub use environment::{Environment, RefreshAction};
pub use handle::RefreshHandle;
pub use observable::{Observable, Subscription};
pub use refresher::Refresher;
