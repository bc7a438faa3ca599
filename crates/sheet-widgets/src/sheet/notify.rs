#![forbid(unsafe_code)]

//! Ordered subscriber lists for sheet lifecycle events.
//!
//! # Design
//!
//! A [`Notifier<T>`] keeps subscribers as `Weak` callbacks. Subscribing hands
//! back a [`Subscription`] guard that owns the strong `Rc`; dropping the guard
//! unsubscribes. Callbacks are collected before any of them runs, so a
//! callback that drops its own guard still completes the current round.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. Dead subscribers (dropped guards) are pruned lazily during `notify`.
//! 3. [`Notifier::clear`] forgets every subscriber; later notifications reach
//!    nobody even if guards are still alive.
//!
//! # Failure Modes
//!
//! - **Guard not kept**: a [`Subscription`] dropped immediately (for example
//!   `let _ = sheet.on_dismissed(..)`) unsubscribes at once. Bind it, or hand
//!   it to [`Sheet::retain_subscription`](crate::Sheet::retain_subscription).

use std::rc::{Rc, Weak};

use smallvec::SmallVec;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// Ordered list of weakly held callbacks.
pub struct Notifier<T> {
    subscribers: SmallVec<[CallbackWeak<T>; 2]>,
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self {
            subscribers: SmallVec::new(),
        }
    }
}

impl<T> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}

impl<T: 'static> Notifier<T> {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`; it stays registered while the guard lives.
    pub fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.subscribers.push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Invoke every live subscriber with `value`. Returns how many ran.
    pub fn notify(&mut self, value: &T) -> usize {
        self.subscribers.retain(|w| w.strong_count() > 0);
        let callbacks: SmallVec<[CallbackRc<T>; 2]> =
            self.subscribers.iter().filter_map(Weak::upgrade).collect();
        for cb in &callbacks {
            cb(value);
        }
        callbacks.len()
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Forget every subscriber.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the guard drops the strong callback, so the notifier's weak
/// entry fails to upgrade on the next round.
#[must_use = "dropping a Subscription unsubscribes immediately"]
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
    use std::cell::RefCell;

    #[test]
    fn notifies_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::<u32>::new();
        let l1 = Rc::clone(&log);
        let _a = notifier.subscribe(move |v| l1.borrow_mut().push(("a", *v)));
        let l2 = Rc::clone(&log);
        let _b = notifier.subscribe(move |v| l2.borrow_mut().push(("b", *v)));

        assert_eq!(notifier.notify(&7), 2);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn dropped_guard_unsubscribes() {
        let hits = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::<()>::new();
        let h = Rc::clone(&hits);
        let sub = notifier.subscribe(move |()| *h.borrow_mut() += 1);
        notifier.notify(&());
        drop(sub);
        assert_eq!(notifier.notify(&()), 0);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn clear_forgets_live_subscribers() {
        let hits = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::<()>::new();
        let h = Rc::clone(&hits);
        let _sub = notifier.subscribe(move |()| *h.borrow_mut() += 1);
        notifier.clear();
        assert_eq!(notifier.notify(&()), 0);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn debug_reports_count() {
        let mut notifier = Notifier::<()>::new();
        let _sub = notifier.subscribe(|()| {});
        assert!(format!("{notifier:?}").contains("subscriber_count: 1"));
    }
}
