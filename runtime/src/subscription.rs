//! Listener registry and subscription handles.
//!
//! A [`Subscription`] refers to its listener by id through a weak handle on
//! the store's registry, so it can outlive the store and still be safely
//! unsubscribed.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A store listener: called with no arguments after every dispatch.
pub type Listener = Rc<dyn Fn()>;

/// Listeners captured at the start of a notification pass.
pub(crate) type ListenerSnapshot = SmallVec<[Listener; 4]>;

/// Identifier of one registered listener, unique per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl ListenerRegistry {
    pub(crate) fn insert(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false when the id was not registered (already removed).
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn snapshot(&self) -> ListenerSnapshot {
        self.entries.iter().map(|(_, listener)| Rc::clone(listener)).collect()
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Dropping a `Subscription` does **not** remove the listener; call
/// [`unsubscribe`](Self::unsubscribe), or convert it with
/// [`into_guard`](Self::into_guard) to tie the listener to a scope.
#[derive(Clone)]
#[must_use = "dropping a Subscription keeps the listener registered; use into_guard() for scoped listeners"]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, registry: &Rc<RefCell<ListenerRegistry>>) -> Self {
        Self {
            id,
            registry: Rc::downgrade(registry),
        }
    }

    /// The id of the listener this handle controls
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener from its store.
    ///
    /// Idempotent: calling it again, from any clone of this handle, or after
    /// the store was dropped does nothing. A dispatch already notifying
    /// listeners still calls this one for the current pass.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };

        if registry.borrow_mut().remove(self.id) {
            tracing::trace!(listener = %self.id, "Listener removed");
        }
    }

    /// True while the listener is still registered with a live store
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }

    /// Convert into a guard that unsubscribes when dropped.
    pub fn into_guard(self) -> SubscriptionGuard {
        SubscriptionGuard { subscription: self }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Scoped subscription: the listener stays registered exactly as long as the
/// guard is alive.
///
/// A UI node acquires one on mount and drops it on unmount, so a missed
/// teardown hook cannot leak the listener.
#[derive(Debug)]
#[must_use = "the listener is removed as soon as the guard is dropped"]
pub struct SubscriptionGuard {
    subscription: Subscription,
}

impl SubscriptionGuard {
    /// The underlying subscription handle
    pub const fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
