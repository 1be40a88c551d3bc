//! Notifications surfaced as tracing events

use tracing::{error, info, warn};

use crate::application::ports::outbound::{Notification, NotificationLevel, NotificationPort};

#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let message = notification.message;
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(target: "startforge_engine::notify", level = ?notification.level, "{}", message)
            }
            NotificationLevel::Warning => warn!(target: "startforge_engine::notify", "{}", message),
            NotificationLevel::Error => error!(target: "startforge_engine::notify", "{}", message),
        }
    }
}
