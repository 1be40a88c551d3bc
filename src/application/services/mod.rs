//! Application services - Use case implementations
//!
//! Each service depends only on outbound ports, so the same use cases run
//! against the in-memory store in tests and the SQLite store in production.

pub mod character_service;
pub mod character_sync;
pub mod narrative;
pub mod preset_service;
pub mod preset_transfer_service;

pub use character_service::{CharacterService, CommitOutcome};
pub use character_sync::{CharacterSyncService, SyncError, SyncSummary, WriteMode};
pub use preset_service::{PresetService, SaveOutcome};
pub use preset_transfer_service::{
    ConflictReport, ExportedDocument, ImportConflict, ImportError, ImportResolution,
    ImportResult, PresetExportFile, PresetTransferService,
};
