#![forbid(unsafe_code)]

//! Shared single-slot values with change notification.
//!
//! [`Observable<T>`] is the storage behind the announcement slot and the
//! active-drag watch. A clone is another handle to the same slot, so a live
//! region and an overlay can each hold one while the coordinator writes.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each value-changing `set`.
//! 2. `set(v)` where `v == current` is a no-op (no version bump, no callbacks).
//! 3. Subscribers run in registration order, outside the interior borrow.
//! 4. Dropping a [`Subscription`] stops delivery; the dead entry is pruned on
//!    the next change.
//!
//! # Failure Modes
//!
//! Calling `set` from inside a subscriber is allowed: the borrow is released
//! before callbacks run. The nested change notifies with the newer value and
//! the outer loop continues with the value it captured.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;
type WeakCallback<T> = Weak<dyn Fn(&T)>;

struct Slot<T> {
    value: T,
    version: u64,
    subscribers: Vec<WeakCallback<T>>,
}

/// A shared, version-tracked value.
pub struct Observable<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .field("version", &slot.version)
            .field("subscribers", &slot.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a slot holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow().value)
    }

    /// Overwrite the value. Returns `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        let (callbacks, snapshot) = {
            let mut slot = self.slot.borrow_mut();
            if slot.value == value {
                return false;
            }
            slot.value = value;
            slot.version += 1;
            slot.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks: Vec<Callback<T>> =
                slot.subscribers.iter().filter_map(Weak::upgrade).collect();
            (callbacks, slot.value.clone())
        };
        for cb in &callbacks {
            cb(&snapshot);
        }
        true
    }

    /// Register `callback` for future changes. Delivery stops when the
    /// returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: Callback<T> = Rc::new(callback);
        self.slot
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of value-changing writes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.slot.borrow().version
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slot.borrow().subscribers.len()
    }

    /// True if both handles point at the same slot.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

/// Keeps a subscriber alive. Drop to unsubscribe.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_reports_change_and_bumps_version() {
        let obs = Observable::new(String::new());
        assert!(obs.set("Dragging item a.".to_string()));
        assert_eq!(obs.version(), 1);
        assert!(!obs.set("Dragging item a.".to_string()));
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn subscribers_see_new_value_in_order() {
        let obs = Observable::new(0u32);
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&log);
        let _s1 = obs.subscribe(move |v| a.borrow_mut().push(('a', *v)));
        let b = Rc::clone(&log);
        let _s2 = obs.subscribe(move |v| b.borrow_mut().push(('b', *v)));

        obs.set(7);
        assert_eq!(*log.borrow(), vec![('a', 7), ('b', 7)]);
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = obs.subscribe(move |_| h.set(h.get() + 1));

        obs.set(1);
        drop(sub);
        obs.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_one_slot() {
        let a = Observable::new(None::<String>);
        let b = a.clone();
        a.set(Some("card-1".to_string()));
        assert_eq!(b.get().as_deref(), Some("card-1"));
        assert!(a.same_slot(&b));
        assert!(!a.same_slot(&Observable::new(None)));
    }

    #[test]
    fn nested_set_from_subscriber_does_not_panic() {
        let obs = Observable::new(0);
        let inner = obs.clone();
        let _sub = obs.subscribe(move |v| {
            if *v == 1 {
                inner.set(2);
            }
        });
        obs.set(1);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 2);
    }

    #[test]
    fn with_borrows_without_clone() {
        let obs = Observable::new(vec![1, 2, 3]);
        assert_eq!(obs.with(|v| v.len()), 3);
    }
}
