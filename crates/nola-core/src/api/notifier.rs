use tracing::{error, info};

/// Capability for showing short notices to the administrator.
///
/// The client core never reaches for a global UI handle; whoever builds the
/// client decides where notices go.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sends notices to the log. Used when nothing better is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(notice = message, "success");
    }

    fn info(&self, message: &str) {
        info!(notice = message, "info");
    }

    fn error(&self, message: &str) {
        error!(notice = message, "error");
    }
}
