//! Terminal notices.

use std::sync::atomic::{AtomicBool, Ordering};

use nola_core::{BusEvent, EventBus, ListenerId, Notifier};

/// Prints notices on stderr so command output on stdout stays clean.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn line(marker: &str, message: &str) -> String {
        format!("{} {}", marker, message)
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        eprintln!("{}", Self::line("✓", message));
    }

    fn info(&self, message: &str) {
        eprintln!("{}", Self::line("·", message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", Self::line("✗", message));
    }
}

/// Run `on_expired` the first time the session expires in this process.
///
/// Concurrent requests can each report the expiry; one hint is enough.
pub fn on_first_expiry<F>(bus: &EventBus, on_expired: F) -> ListenerId
where
    F: Fn() + Send + Sync + 'static,
{
    let fired = AtomicBool::new(false);
    bus.on(BusEvent::LoginExpired, move |_| {
        if !fired.swap(true, Ordering::SeqCst) {
            on_expired();
        }
    })
}
