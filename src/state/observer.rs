//! Scroll and resize observation.
//!
//! A scroll surface publishes `SurfaceEvent`s; anything interested subscribes
//! and gets back a `Subscription` guard. Dropping the guard unregisters the
//! listener, so a list that is torn down (normally, or by unwinding) never
//! leaves a dangling observer behind on the surface.
//!
//! Everything here is single-threaded: events are dispatched synchronously on
//! the UI thread that owns the surface.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::state::ViewportState;

/// Geometry change reported by a scroll surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    Scrolled { top: f32 },
    Resized { width: f32, height: f32 },
}

type Listener = Box<dyn FnMut(&SurfaceEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    dispatching: bool,
    /// Ids unsubscribed while `listeners` was checked out for dispatch
    removed: Vec<u64>,
}

impl Registry {
    /// Detaches the listeners for `ids` and hands them back to the caller.
    ///
    /// Listeners can own subscriptions of their own, so they must be dropped
    /// after the registry borrow is released.
    fn remove(&mut self, ids: &[u64]) -> Vec<(u64, Listener)> {
        if self.dispatching {
            self.removed.extend_from_slice(ids);
            return Vec::new();
        }
        let (gone, kept) = std::mem::take(&mut self.listeners)
            .into_iter()
            .partition(|(id, _)| ids.contains(id));
        self.listeners = kept;
        gone
    }
}

#[derive(Default)]
struct Shared {
    registry: RefCell<Registry>,
    /// Unsubscriptions that arrived while `registry` was borrowed
    deferred: RefCell<Vec<u64>>,
}

impl Shared {
    fn unsubscribe(&self, id: u64) {
        self.deferred.borrow_mut().push(id);
        self.flush_deferred();
    }

    /// Applies deferred unsubscriptions, including any raised by dropping
    /// the removed listeners. A no-op while the registry is borrowed; the
    /// borrow holder flushes once it lets go.
    fn flush_deferred(&self) {
        loop {
            let Ok(mut registry) = self.registry.try_borrow_mut() else {
                return;
            };
            let ids = std::mem::take(&mut *self.deferred.borrow_mut());
            if ids.is_empty() {
                return;
            }
            let gone = registry.remove(&ids);
            drop(registry);
            drop(gone);
        }
    }
}

/// Event source owned by one scroll surface.
///
/// Cloning yields another handle to the same surface.
#[derive(Clone, Default)]
pub struct SurfaceEvents {
    shared: Rc<Shared>,
}

impl SurfaceEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener until the returned guard is dropped.
    #[must_use = "dropping the subscription unregisters the listener immediately"]
    pub fn subscribe(&self, listener: impl FnMut(&SurfaceEvent) + 'static) -> Subscription {
        let mut registry = self.shared.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Delivers an event to every current listener, in subscription order.
    ///
    /// Listeners may subscribe or drop subscriptions while being notified;
    /// the changes take effect from the next event.
    pub fn emit(&self, event: SurfaceEvent) {
        let mut active = {
            let mut registry = self.shared.registry.borrow_mut();
            registry.dispatching = true;
            std::mem::take(&mut registry.listeners)
        };

        for (_, listener) in active.iter_mut() {
            listener(&event);
        }

        let gone = {
            let mut registry = self.shared.registry.borrow_mut();
            registry.dispatching = false;
            let removed = std::mem::take(&mut registry.removed);
            let (gone, mut kept): (Vec<_>, Vec<_>) = active
                .into_iter()
                .partition(|(id, _)| removed.contains(id));
            kept.append(&mut registry.listeners);
            registry.listeners = kept;
            gone
        };
        drop(gone);
        self.shared.flush_deferred();
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.shared.registry.borrow().listeners.len()
    }
}

/// Guard for a registered listener; unregisters on drop.
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.unsubscribe(self.id);
        }
    }
}

/// Keeps a `ViewportState` in sync with a surface for as long as it lives.
///
/// Holds one scroll subscription and one resize subscription; both are
/// released when the tracker is dropped.
pub struct ViewportTracker {
    latest: Rc<Cell<ViewportState>>,
    changed: Rc<Cell<bool>>,
    _scroll: Subscription,
    _resize: Subscription,
}

impl ViewportTracker {
    /// Attaches to `events`, starting from `initial` geometry.
    pub fn attach(events: &SurfaceEvents, initial: ViewportState) -> Self {
        let latest = Rc::new(Cell::new(initial));
        let changed = Rc::new(Cell::new(true));

        let scroll = {
            let latest = Rc::clone(&latest);
            let changed = Rc::clone(&changed);
            events.subscribe(move |event| {
                if let SurfaceEvent::Scrolled { top } = *event {
                    let mut viewport = latest.get();
                    if viewport.set_scroll_top(top) {
                        latest.set(viewport);
                        changed.set(true);
                    }
                }
            })
        };

        let resize = {
            let latest = Rc::clone(&latest);
            let changed = Rc::clone(&changed);
            events.subscribe(move |event| {
                if let SurfaceEvent::Resized { width, height } = *event {
                    let mut viewport = latest.get();
                    if viewport.set_size(width, height) {
                        latest.set(viewport);
                        changed.set(true);
                    }
                }
            })
        };

        Self {
            latest,
            changed,
            _scroll: scroll,
            _resize: resize,
        }
    }

    /// Most recently observed geometry.
    pub fn viewport(&self) -> ViewportState {
        self.latest.get()
    }

    /// Returns true once per batch of geometry changes.
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_unsubscribes() {
        let events = SurfaceEvents::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            events.subscribe(move |_| hits.set(hits.get() + 1))
        };
        events.emit(SurfaceEvent::Scrolled { top: 1.0 });
        drop(sub);
        events.emit(SurfaceEvent::Scrolled { top: 2.0 });
        assert_eq!(hits.get(), 1);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_during_dispatch() {
        let events = SurfaceEvents::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let sub = {
            let slot = Rc::clone(&slot);
            events.subscribe(move |_| {
                slot.borrow_mut().take();
            })
        };
        let victim = events.subscribe(|_| {});
        *slot.borrow_mut() = Some(victim);

        events.emit(SurfaceEvent::Scrolled { top: 5.0 });
        assert_eq!(events.listener_count(), 1);
        drop(sub);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_dropping_listener_releases_captured_subscription() {
        let events = SurfaceEvents::new();
        let inner = events.subscribe(|_| {});
        let outer = events.subscribe(move |_| {
            let _ = &inner;
        });
        assert_eq!(events.listener_count(), 2);

        drop(outer);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_captured_subscription_released_after_dispatch() {
        let events = SurfaceEvents::new();
        let inner = events.subscribe(|_| {});
        let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let outer = events.subscribe(move |_| {
            let _ = &inner;
        });
        let dropper = {
            let holder = Rc::clone(&holder);
            events.subscribe(move |_| {
                holder.borrow_mut().take();
            })
        };
        *holder.borrow_mut() = Some(outer);

        events.emit(SurfaceEvent::Scrolled { top: 1.0 });
        assert_eq!(events.listener_count(), 1);
        drop(dropper);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_tracker_follows_events() {
        let events = SurfaceEvents::new();
        let tracker = ViewportTracker::attach(&events, ViewportState::new());
        assert_eq!(events.listener_count(), 2);
        assert!(tracker.take_changed());

        events.emit(SurfaceEvent::Resized { width: 400.0, height: 300.0 });
        events.emit(SurfaceEvent::Scrolled { top: 90.0 });
        assert!(tracker.take_changed());
        assert!(!tracker.take_changed());

        let viewport = tracker.viewport();
        assert_eq!(viewport.scroll_top(), 90.0);
        assert_eq!(viewport.container_height(), 300.0);

        // Same value again is not a change
        events.emit(SurfaceEvent::Scrolled { top: 90.0 });
        assert!(!tracker.take_changed());

        drop(tracker);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_surface() {
        let events = SurfaceEvents::new();
        let sub = events.subscribe(|_| {});
        drop(events);
        drop(sub);
    }
}
