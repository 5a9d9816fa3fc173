//! Modal status notifications
//!
//! The modal layer publishes its mode and pending key buffer here. Updates
//! are coalesced and delivered once per display frame by [`ModalObserver::flush`];
//! listeners stay registered for as long as their [`Subscription`] lives.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::VimMode;

/// Snapshot of the modal layer, for display only
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalStatus {
    pub mode: VimMode,
    /// Keys typed towards an unfinished command, e.g. `2d`
    pub pending: String,
}

type Listener = Box<dyn FnMut(&ModalStatus)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Default)]
pub struct ModalObserver {
    registry: Rc<RefCell<Registry>>,
    latest: ModalStatus,
    delivered: Option<ModalStatus>,
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else { return };
        registry.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
    }
}

impl ModalObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It receives the current status on the next flush.
    ///
    /// Listeners must not subscribe or unsubscribe from inside the callback.
    pub fn subscribe(&mut self, listener: impl FnMut(&ModalStatus) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        self.delivered = None;

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn publish(&mut self, status: ModalStatus) {
        self.latest = status;
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Delivers the latest status if it changed since the last flush.
    /// Returns whether listeners were notified.
    pub fn flush(&mut self) -> bool {
        if self.delivered.as_ref() == Some(&self.latest) {
            return false;
        }
        let mut registry = self.registry.borrow_mut();
        for (_, listener) in registry.listeners.iter_mut() {
            listener(&self.latest);
        }
        self.delivered = Some(self.latest.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<ModalStatus>>>, impl FnMut(&ModalStatus) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |status: &ModalStatus| sink.borrow_mut().push(status.clone()))
    }

    fn status(mode: VimMode, pending: &str) -> ModalStatus {
        ModalStatus { mode, pending: pending.to_string() }
    }

    #[test]
    fn test_updates_coalesce_until_flush() {
        let mut observer = ModalObserver::new();
        let (seen, listener) = recorder();
        let _sub = observer.subscribe(listener);

        observer.publish(status(VimMode::Normal, "d"));
        observer.publish(status(VimMode::Normal, "d2"));
        observer.publish(status(VimMode::Insert, ""));
        assert!(seen.borrow().is_empty());

        assert!(observer.flush());
        assert_eq!(*seen.borrow(), vec![status(VimMode::Insert, "")]);
    }

    #[test]
    fn test_unchanged_status_not_redelivered() {
        let mut observer = ModalObserver::new();
        let (seen, listener) = recorder();
        let _sub = observer.subscribe(listener);

        assert!(observer.flush());
        assert!(!observer.flush());
        observer.publish(ModalStatus::default());
        assert!(!observer.flush());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let mut observer = ModalObserver::new();
        let (seen, listener) = recorder();
        let sub = observer.subscribe(listener);
        assert_eq!(observer.listener_count(), 1);

        drop(sub);
        assert_eq!(observer.listener_count(), 0);

        observer.publish(status(VimMode::Visual, ""));
        observer.flush();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_new_subscriber_gets_current_status() {
        let mut observer = ModalObserver::new();
        observer.publish(status(VimMode::Insert, ""));
        observer.flush();

        let (seen, listener) = recorder();
        let _sub = observer.subscribe(listener);
        assert!(observer.flush());
        assert_eq!(seen.borrow()[0].mode, VimMode::Insert);
    }

    #[test]
    fn test_subscription_outliving_observer() {
        let mut observer = ModalObserver::new();
        let (_seen, listener) = recorder();
        let sub = observer.subscribe(listener);
        drop(observer);
        drop(sub);
    }
}
