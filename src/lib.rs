//! Localization engine for Daily Lives of My Countryside, an RPG Maker MV game.
//!
//! The convert phase carves [`types::TranslationUnit`]s out of the game's data and quest files for the translation
//! platform. The restore phase splices approved translations back into pristine copies of the same files.

pub(crate) mod constants;
mod functions;
pub use functions::{classify, read_to_string_without_bom};

pub mod config;
pub mod core;
pub mod extract;
pub mod processors;
pub mod restore;
pub mod schema;
pub mod source;
pub mod types;
