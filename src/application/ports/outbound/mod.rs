//! Outbound ports - Interfaces that the application requires from external systems

mod notification_port;
mod preset_repository_port;
mod random_port;
mod variable_store_port;

pub use notification_port::{Notification, NotificationLevel, NotificationPort};
pub use preset_repository_port::{PresetRepositoryError, PresetRepositoryPort};
pub use random_port::RandomPort;
pub use variable_store_port::{VariableStoreError, VariableStorePort};
