use tracing::{error, info, warn};

/// User-facing notifications raised by the hooks.
pub trait Notifier: Send + Sync {
    fn success(&self, title: &str, description: &str);

    fn error(&self, title: &str, description: &str);

    /// Setup problems that block every operation.
    fn config_error(&self, title: &str, description: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, title: &str, description: &str) {
        info!("{} {}", title, description);
    }

    fn error(&self, title: &str, description: &str) {
        error!("{}: {}", title, description);
    }

    fn config_error(&self, title: &str, description: &str) {
        warn!("{}: {}", title, description);
    }
}
