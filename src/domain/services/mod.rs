//! Domain services - Pure business logic operations

pub mod legacy_migration;
pub mod preset_application;

pub use legacy_migration::{migrate_character, migrate_preset, needs_migration};
pub use preset_application::{apply_preset, find_matching_preset, preset_matches};
