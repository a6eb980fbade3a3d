//! Explicit subscription hub replacing ambient multicast delegates.

/// Handle returned by [`EventHub::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single-threaded publish/subscribe channel. Listeners are invoked in
/// subscription order; unsubscribing mid-stream affects the next emit.
pub struct EventHub<T> {
    next_id: u64,
    listeners: Vec<(u64, Box<dyn FnMut(&T)>)>,
}

impl<T> EventHub<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        SubscriptionId(id)
    }

    /// Returns false when the id was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id.0);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &T) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for EventHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_fire_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hub: EventHub<i32> = EventHub::new();

        let a = Rc::clone(&seen);
        hub.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = Rc::clone(&seen);
        hub.subscribe(move |v| b.borrow_mut().push(("b", *v)));

        hub.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let seen = Rc::new(RefCell::new(0));
        let mut hub: EventHub<()> = EventHub::new();

        let counter = Rc::clone(&seen);
        let id = hub.subscribe(move |_| *counter.borrow_mut() += 1);

        hub.emit(&());
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.emit(&());

        assert_eq!(*seen.borrow(), 1);
        assert!(hub.is_empty());
    }
}
