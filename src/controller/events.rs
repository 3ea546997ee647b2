//! Explicit subscription registry.
//!
//! Observers register a handler for one kind of change and get back a
//! [`SubscriptionId`]. Handing the id back to [`Subscriptions::unsubscribe`]
//! is the only way to stop delivery; there are no implicit lifetimes.
//! Handlers run in registration order.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

pub struct Subscriptions<K, E> {
    next_id: u64,
    entries: Vec<(SubscriptionId, K, Handler<E>)>,
}

impl<K: Copy + PartialEq, E> Subscriptions<K, E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, kind: K, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, kind, Box::new(handler)));
        id
    }

    /// Returns `false` if the id was unknown or already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Deliver `event` to every handler registered for `kind`.
    /// Returns how many handlers ran.
    pub fn emit(&mut self, kind: K, event: &E) -> usize {
        let mut delivered = 0;
        for (_, entry_kind, handler) in self.entries.iter_mut() {
            if *entry_kind == kind {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy + PartialEq, E> Default for Subscriptions<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> fmt::Debug for Subscriptions<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriptions")
            .field("handlers", &self.entries.len())
            .finish()
    }
}
