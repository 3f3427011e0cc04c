//! Process-wide publish/subscribe channel for decoupled listeners.
//!
//! Events are a closed set (`BusEvent`). Emitting runs every listener
//! registered for that event synchronously, in registration order. An event
//! with no listeners is dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusEvent {
    /// The server rejected the session token
    LoginExpired,
    ThemeDark,
    ThemeLight,
    HiddenSider,
    VisibleSider,
    /// The post list is out of date
    RefreshPost,
}

impl BusEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusEvent::LoginExpired => "login_expired",
            BusEvent::ThemeDark => "theme_dark",
            BusEvent::ThemeLight => "theme_light",
            BusEvent::HiddenSider => "hidden_sider",
            BusEvent::VisibleSider => "visible_sider",
            BusEvent::RefreshPost => "refresh_post",
        }
    }
}

impl fmt::Display for BusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by `EventBus::on`, used to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(BusEvent) + Send + Sync>;

#[derive(Default)]
pub struct EventBus {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, BusEvent, Listener)>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.lock().len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(ListenerId, BusEvent, Listener)>> {
        self.listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn on<F>(&self, event: BusEvent, listener: F) -> ListenerId
    where
        F: Fn(BusEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, event, Arc::new(listener)));
        id
    }

    /// Deregister a listener. Returns false if it was not registered.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, _, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn emit(&self, event: BusEvent) {
        // Snapshot first: listeners may call back into the bus
        let targets: Vec<Listener> = self
            .lock()
            .iter()
            .filter(|(_, e, _)| *e == event)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();

        debug!(event = %event, listeners = targets.len(), "Emitting event");
        for listener in targets {
            listener(event);
        }
    }

    pub fn listener_count(&self, event: BusEvent) -> usize {
        self.lock().iter().filter(|(_, e, _)| *e == event).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(BusEvent) + Send + Sync>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_for_make = Arc::clone(&log);
        let make = move |tag: &str| -> Box<dyn Fn(BusEvent) + Send + Sync> {
            let log = Arc::clone(&log_for_make);
            let tag = tag.to_string();
            Box::new(move |event: BusEvent| log.lock().unwrap().push(format!("{}:{}", tag, event)))
        };
        (log, make)
    }

    #[test]
    fn test_emit_in_registration_order() {
        let bus = EventBus::new();
        let (log, make) = recorder();
        bus.on(BusEvent::LoginExpired, make("first"));
        bus.on(BusEvent::ThemeDark, make("theme"));
        bus.on(BusEvent::LoginExpired, make("second"));

        bus.emit(BusEvent::LoginExpired);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:login_expired", "second:login_expired"]
        );
    }

    #[test]
    fn test_off_removes_only_that_listener() {
        let bus = EventBus::new();
        let (log, make) = recorder();
        let a = bus.on(BusEvent::RefreshPost, make("a"));
        bus.on(BusEvent::RefreshPost, make("b"));

        assert!(bus.off(a));
        assert!(!bus.off(a));
        bus.emit(BusEvent::RefreshPost);
        assert_eq!(*log.lock().unwrap(), vec!["b:refresh_post"]);
        assert_eq!(bus.listener_count(BusEvent::RefreshPost), 1);
    }

    #[test]
    fn test_emit_without_listeners_is_dropped() {
        let bus = EventBus::new();
        bus.emit(BusEvent::VisibleSider);

        // A listener added afterwards does not see the earlier event
        let (log, make) = recorder();
        bus.on(BusEvent::VisibleSider, make("late"));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_listener_may_deregister_itself() {
        let bus = Arc::new(EventBus::new());
        let slot: Arc<Mutex<Option<ListenerId>>> = Arc::new(Mutex::new(None));
        let hits = Arc::new(AtomicU64::new(0));

        let id = {
            let inner_bus = Arc::clone(&bus);
            let slot = Arc::clone(&slot);
            let hits = Arc::clone(&hits);
            bus.on(BusEvent::ThemeLight, move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
                if let Some(id) = *slot.lock().unwrap() {
                    inner_bus.off(id);
                }
            })
        };
        *slot.lock().unwrap() = Some(id);

        bus.emit(BusEvent::ThemeLight);
        bus.emit(BusEvent::ThemeLight);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
