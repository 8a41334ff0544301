//! Observable State
//!
//! Plain publish/subscribe primitive: a listener list plus notify-on-change.
//! No reactive framework required.

use std::cell::RefCell;
use std::rc::Rc;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { listeners: Vec::new(), next_id: 0 }
    }
}

/// A value channel observers can subscribe to.
///
/// Clones share the same listener list, so a store can hand out
/// subscription points while keeping ownership of the channel.
pub struct Observable<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self { registry: self.registry.clone() }
    }
}

impl<T: 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Observable<T> {
    pub fn new() -> Self {
        Self { registry: Rc::new(RefCell::new(Registry::default())) }
    }

    /// Register a listener. Dropping the returned handle unregisters it.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));

        let weak = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().listeners.retain(|(i, _)| *i != id);
                }
            })),
        }
    }

    /// Notify every current listener.
    ///
    /// The listener list is snapshotted first, so a callback may subscribe
    /// or unsubscribe reentrantly without invalidating the emission.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Handle to a registered listener. Unsubscribes on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Explicitly remove the listener.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constructs_usable_channel() {
        let observable: Observable<u32> = Observable::default();
        let seen = Rc::new(RefCell::new(0));

        let sink = seen.clone();
        let _sub = observable.subscribe(move |v| *sink.borrow_mut() = *v);
        observable.emit(&7);
        assert_eq!(*seen.borrow(), 7);
    }

    #[test]
    fn test_subscribe_and_emit() {
        let observable: Observable<u32> = Observable::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let _sub = observable.subscribe(move |v| sink.borrow_mut().push(*v));

        observable.emit(&1);
        observable.emit(&2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let observable: Observable<u32> = Observable::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let sub = observable.subscribe(move |v| sink.borrow_mut().push(*v));
        observable.emit(&1);
        drop(sub);
        observable.emit(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(observable.listener_count(), 0);
    }

    #[test]
    fn test_reentrant_unsubscribe_during_emit() {
        let observable: Observable<u32> = Observable::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let inner = slot.clone();
        let sub = observable.subscribe(move |_| {
            // Listener removes itself mid-emission.
            if let Some(sub) = inner.borrow_mut().take() {
                sub.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(sub);

        observable.emit(&0);
        observable.emit(&0);
        assert_eq!(observable.listener_count(), 0);
    }
}
