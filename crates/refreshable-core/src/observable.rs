#![forbid(unsafe_code)]

//! Shared, version-tracked value cell with change notification.
//!
//! [`Observable<T>`] is the reactive substrate the rest of the crate is built
//! on: `Rc<RefCell<..>>` single-threaded shared ownership, subscriber
//! callbacks held as `Weak` references and cleaned up lazily during
//! notification, and an RAII [`Subscription`] guard that unsubscribes on
//! drop.
//!
//! Cloning an `Observable` shares the cell; this aliasing is load-bearing —
//! a [`RefreshHandle`](crate::RefreshHandle) and its
//! [`Refresher`](crate::Refresher) are two clones of one `Observable<bool>`,
//! never independent copies.
//!
//! # Invariants
//!
//! 1. `version()` increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. Notification runs after the interior borrow is released: callbacks may
//!    read — or set — the observable re-entrantly without panicking.
//!
//! # Failure Modes
//!
//! - Callback panic: propagates to the caller of `set()`; remaining
//!   subscribers for that cycle are not notified.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Box<dyn Fn(&T)>>>,
}

/// A shared observable value.
///
/// `Clone` is shallow: all clones read and write the same cell and notify
/// the same subscribers.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value by reference.
    ///
    /// The borrow is released before `with` returns; do not call `set` from
    /// inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of value-changing mutations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Set a new value, notifying subscribers if it differs from the current
    /// one. Setting an equal value does nothing.
    pub fn set(&self, value: T) {
        let to_notify: Vec<Rc<Box<dyn Fn(&T)>>> = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value.clone();
            inner.version += 1;
            // Prune dead subscribers, then snapshot the live ones so the
            // borrow is not held while callbacks run.
            inner
                .subscribers
                .retain(|weak| weak.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect()
        };
        for callback in to_notify {
            callback(&value);
        }
    }

    /// Subscribe to value changes.
    ///
    /// The callback fires on every value-changing `set`, with the new value.
    /// It is held alive by the returned [`Subscription`]; drop the
    /// subscription to unsubscribe.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: Rc<Box<dyn Fn(&T)>> = Rc::new(Box::new(callback));
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription { _callback: strong }
    }

    /// Whether two observables share the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// RAII guard for an active subscription.
///
/// Dropping the guard releases the callback; it will not fire in any later
/// notification cycle.
pub struct Subscription {
    _callback: Rc<dyn Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_returns_initial_value() {
        let obs = Observable::new(42);
        assert_eq!(obs.get(), 42);
    }

    #[test]
    fn set_updates_value() {
        let obs = Observable::new(1);
        obs.set(2);
        assert_eq!(obs.get(), 2);
    }

    #[test]
    fn clone_shares_cell() {
        let a = Observable::new(0);
        let b = a.clone();
        b.set(7);
        assert_eq!(a.get(), 7, "clones must alias the same storage");
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn version_increments_on_change_only() {
        let obs = Observable::new(0);
        assert_eq!(obs.version(), 0);
        obs.set(1);
        assert_eq!(obs.version(), 1);
        obs.set(1);
        assert_eq!(obs.version(), 1, "equal set must not bump version");
        obs.set(2);
        assert_eq!(obs.version(), 2);
    }

    #[test]
    fn subscriber_sees_new_value() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let _sub = obs.subscribe(move |v| s.set(*v));

        obs.set(5);
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn equal_set_does_not_notify() {
        let obs = Observable::new(3);
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(true));

        obs.set(3);
        assert!(!fired.get(), "equal set must not notify");
    }

    #[test]
    fn subscribers_notified_in_registration_order() {
        let obs = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = Rc::clone(&order);
        let _s1 = obs.subscribe(move |_| o1.borrow_mut().push(1));
        let o2 = Rc::clone(&order);
        let _s2 = obs.subscribe(move |_| o2.borrow_mut().push(2));

        obs.set(1);
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn dropped_subscription_stops_firing() {
        let obs = Observable::new(0);
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        let sub = obs.subscribe(move |_| c.set(c.get() + 1));
        obs.set(1);
        assert_eq!(count.get(), 1);

        drop(sub);
        obs.set(2);
        assert_eq!(count.get(), 1, "callback must not fire after drop");
    }

    #[test]
    fn callback_may_read_observable() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));

        let o = obs.clone();
        let s = Rc::clone(&seen);
        let _sub = obs.subscribe(move |_| s.set(o.get()));

        obs.set(9);
        assert_eq!(seen.get(), 9, "re-entrant read from a callback must work");
    }

    #[test]
    fn callback_may_set_observable() {
        // One re-entrant set: a subscriber that clamps negative values.
        let obs = Observable::new(0);
        let o = obs.clone();
        let _sub = obs.subscribe(move |v| {
            if *v < 0 {
                o.set(0);
            }
        });

        obs.set(-5);
        assert_eq!(obs.get(), 0);
    }

    #[test]
    fn with_reads_by_reference() {
        let obs = Observable::new(String::from("hello"));
        let len = obs.with(|s| s.len());
        assert_eq!(len, 5);
    }
}
