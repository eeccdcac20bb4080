//! Notification seam.
//!
//! Flows report outcomes ("OTP sent successfully!") through a [`Notifier`];
//! how they are shown (toast, terminal line, log) is up to the host.

use tracing::{info, warn};

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(notice = message, "Flow succeeded");
    }

    fn error(&self, message: &str) {
        warn!(notice = message, "Flow failed");
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn success(&self, message: &str) {
        (**self).success(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}
