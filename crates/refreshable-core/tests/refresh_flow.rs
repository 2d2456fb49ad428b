//! End-to-end refresh flows across environment, refresher, and handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use proptest::prelude::*;
use refreshable_core::{Environment, RefreshAction, RefreshHandle, Refresher};

/// Action that parks its handle for the test to finish later, counting
/// invocations.
fn parking_action(
    parked: &Rc<RefCell<Option<RefreshHandle>>>,
    invocations: &Rc<Cell<u32>>,
) -> RefreshAction {
    let parked = Rc::clone(parked);
    let invocations = Rc::clone(invocations);
    RefreshAction::new(move |handle| {
        invocations.set(invocations.get() + 1);
        *parked.borrow_mut() = Some(handle);
    })
}

#[test]
fn deferred_completion_and_reuse() {
    let refresher = Refresher::new();
    let parked = Rc::new(RefCell::new(None));
    let invocations = Rc::new(Cell::new(0));

    refresher.perform(&parking_action(&parked, &invocations));
    assert!(refresher.is_refreshing());
    assert_eq!(invocations.get(), 1);

    // "Later": the asynchronous continuation ends the refresh.
    parked.borrow().as_ref().unwrap().end();
    assert!(!refresher.is_refreshing());

    // The guard reset: a second perform runs its action.
    let second_ran = Rc::new(Cell::new(false));
    let s = Rc::clone(&second_ran);
    refresher.perform(&RefreshAction::new(move |handle| {
        s.set(true);
        handle.end();
    }));
    assert!(second_ran.get(), "guard must reset after completion");
}

#[test]
fn overlapping_perform_is_ignored() {
    let refresher = Refresher::new();
    let parked = Rc::new(RefCell::new(None));
    let invocations = Rc::new(Cell::new(0));

    refresher.perform(&parking_action(&parked, &invocations));

    let b_ran = Rc::new(Cell::new(false));
    let b = Rc::clone(&b_ran);
    refresher.perform(&RefreshAction::new(move |_| b.set(true)));

    assert!(!b_ran.get(), "second action must never be invoked");
    assert_eq!(invocations.get(), 1);
    assert!(
        refresher.is_refreshing(),
        "state remains true from the first invocation only"
    );
}

#[test]
fn handle_outlives_action_replacement() {
    // An in-flight refresh is unaffected by the environment's action being
    // replaced: the handle aliases the refresher's state, not the action.
    let refresher = Refresher::new();
    let parked = Rc::new(RefCell::new(None));
    let invocations = Rc::new(Cell::new(0));

    let env = Environment::root().with_refresh_action(parking_action(&parked, &invocations));
    refresher.perform(&env.refresh_action().unwrap());
    assert!(refresher.is_refreshing());

    // The subtree re-renders with a different action attached.
    let env = env.with_refresh_action(RefreshAction::new(|handle| handle.end()));
    assert!(env.refresh_action().is_some());

    // The old handle still ends the old refresh.
    parked.borrow().as_ref().unwrap().end();
    assert!(!refresher.is_refreshing());
}

#[test]
fn observation_tracks_full_lifecycle() {
    let refresher = Refresher::new();
    let transitions = Rc::new(RefCell::new(Vec::new()));
    let t = Rc::clone(&transitions);
    let _sub = refresher.subscribe(move |v| t.borrow_mut().push(*v));

    let parked = Rc::new(RefCell::new(None));
    let invocations = Rc::new(Cell::new(0));
    refresher.perform(&parking_action(&parked, &invocations));
    assert_eq!(*transitions.borrow(), vec![true]);

    parked.borrow().as_ref().unwrap().end();
    assert_eq!(*transitions.borrow(), vec![true, false]);
}

proptest! {
    /// However many times (and whenever) `end` is called, the state converges
    /// to idle and stays there.
    #[test]
    fn end_converges_to_idle(extra_ends in 0usize..16) {
        let refresher = Refresher::new();
        let parked = Rc::new(RefCell::new(None));
        let invocations = Rc::new(Cell::new(0));

        refresher.perform(&parking_action(&parked, &invocations));
        let handle = parked.borrow_mut().take().unwrap();

        handle.end();
        for _ in 0..extra_ends {
            handle.end();
            prop_assert!(!refresher.is_refreshing());
        }
        prop_assert!(!refresher.is_refreshing());
        prop_assert!(!handle.is_refreshing());
    }
}
