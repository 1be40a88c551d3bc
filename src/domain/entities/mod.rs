//! Domain entities - Core business objects

mod ally;
mod background;
mod catalog;
mod character;
mod preset;

pub use ally::{Ally, AllyAttributes, AllyEquipment, Ascension, MAX_ASCENSION_ELEMENTS};
pub use background::Background;
pub use catalog::{CatalogEntry, Equipment, Item, Skill};
pub use character::{AttributeBlock, CharacterConfig, PresetCharacter};
pub use preset::{CharacterDraft, CharacterPreset, PresetStorage};
