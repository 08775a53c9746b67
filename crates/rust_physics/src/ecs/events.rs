//! Multi-listener event callbacks
//!
//! Listeners are kept in a slot map, so a handle stays valid when other
//! listeners are removed and a stale handle can never unbind a newer one.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Identifies a bound listener
    pub struct ListenerHandle;
}

type Listener<T> = Box<dyn FnMut(&T) + Send>;

/// A list of callbacks invoked with a shared payload
pub struct Event<T> {
    listeners: SlotMap<ListenerHandle, Listener<T>>,
}

impl<T> Event<T> {
    /// Create an event with no listeners
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
        }
    }

    /// Add a listener
    pub fn bind<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    /// Remove a listener, returning false if it was already gone
    pub fn unbind(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(handle).is_some()
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Invoke every listener with `payload`
    pub fn broadcast(&mut self, payload: &T) {
        for listener in self.listeners.values_mut() {
            listener(payload);
        }
    }

    /// Number of bound listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check whether no listeners are bound
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event").field("listeners", &self.listeners.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_broadcast_reaches_every_listener() {
        let total = Arc::new(AtomicU32::new(0));
        let mut event = Event::<u32>::new();

        for _ in 0..3 {
            let total = Arc::clone(&total);
            event.bind(move |value| {
                total.fetch_add(*value, Ordering::Relaxed);
            });
        }

        event.broadcast(&5);
        assert_eq!(total.load(Ordering::Relaxed), 15);
    }

    #[test]
    fn test_unbind() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut event = Event::<()>::new();

        let counter = Arc::clone(&calls);
        let handle = event.bind(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        assert!(event.unbind(handle));
        assert!(!event.unbind(handle));
        event.broadcast(&());
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert!(event.is_empty());
    }

    #[test]
    fn test_stale_handle_does_not_remove_new_listener() {
        let mut event = Event::<()>::new();
        let old = event.bind(|_| {});
        event.unbind(old);
        let _new = event.bind(|_| {});

        assert!(!event.unbind(old));
        assert_eq!(event.len(), 1);

        event.clear();
        assert!(event.is_empty());
    }
}
