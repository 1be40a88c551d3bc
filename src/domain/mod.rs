//! Domain layer - Core character-creation model with no I/O
//!
//! This layer contains:
//! - Entities: CharacterConfig, catalog entries, allies, backgrounds, presets
//! - Value Objects: rarity, currency, schema layouts, store operations
//! - Domain Services: pure transformations such as legacy preset migration

pub mod entities;
pub mod services;
pub mod value_objects;
