use makers_core::{NoticeLevel, Notifier};

/// Renders notifications as tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(target: "makers::notice", "{}", message),
            NoticeLevel::Warning => tracing::warn!(target: "makers::notice", "{}", message),
            NoticeLevel::Error => tracing::error!(target: "makers::notice", "{}", message),
        }
    }
}
