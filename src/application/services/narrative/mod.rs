//! Narrative generation support

mod prompt_builder;

pub use prompt_builder::{build_character_prompt, GENERATION_INSTRUCTIONS};
