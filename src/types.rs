use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive};
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::{io, path::PathBuf, str::FromStr};
use strum_macros::{Display, EnumIs};
use thiserror::Error;

/// Event command codes that carry translatable text.
///
/// 401 - Dialogue line, `parameters[0]` is a string.
///
/// 102 - Choice list, `parameters[0]` is an array of strings.
///
/// Every other code is [`Code::Other`] and only breaks runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIs, FromPrimitive, IntoPrimitive,
)]
#[repr(u16)]
pub enum Code {
    Dialogue = 401,
    Choice = 102,
    #[num_enum(default)]
    Other = 0,
}

/// Shapes of the game files the localization pipeline recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// `Quests.txt`, plain text with `<quest>` blocks.
    Quest,
    /// `Recipes.txt`. Recognized, but neither extracted nor restored.
    Recipes,
    /// `MapXXX.json`.
    Map,
    /// `System.json`.
    System,
    /// `MapInfos.json`.
    MapInfos,
    /// `Items.json`.
    Items,
    /// `Skills.json`.
    Skills,
    /// `CommonEvents.json`.
    CommonEvents,
}

static EXACT_NAMES: phf::Map<&'static str, FileType> = phf_map! {
    "Quests" => FileType::Quest,
    "Recipes" => FileType::Recipes,
    "MapInfos" => FileType::MapInfos,
    "System" => FileType::System,
    "Items" => FileType::Items,
    "Skills" => FileType::Skills,
    "CommonEvents" => FileType::CommonEvents,
};

impl FileType {
    /// Classifies a file by its base name with the extension already stripped.
    ///
    /// Names starting with `Map` are maps, except `MapInfos` and backup copies that contain `Copy`.
    #[must_use]
    pub fn from_stem(stem: &str) -> Option<Self> {
        if let Some(file_type) = EXACT_NAMES.get(stem) {
            return Some(*file_type);
        }

        if stem.starts_with("Map") && !stem.contains("Copy") {
            return Some(Self::Map);
        }

        None
    }

    /// The [`FileFlags`] flag that enables this file type, if it's processable at all.
    #[must_use]
    pub const fn flag(self) -> Option<FileFlags> {
        Some(match self {
            Self::Quest => FileFlags::Quests,
            Self::Map => FileFlags::Map,
            Self::System => FileFlags::System,
            Self::MapInfos => FileFlags::MapInfos,
            Self::Items => FileFlags::Items,
            Self::Skills => FileFlags::Skills,
            Self::CommonEvents => FileFlags::CommonEvents,
            Self::Recipes => return None,
        })
    }
}

bitflags! {
    /// Selects which file types a [`crate::processors::Processor`] handles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileFlags: u8 {
        /// `MapXXX.json` files.
        const Map = 1 << 0;

        /// `CommonEvents.json` file.
        const CommonEvents = 1 << 1;

        /// `System.json` file.
        const System = 1 << 2;

        /// `Items.json` file.
        const Items = 1 << 3;

        /// `Skills.json` file.
        const Skills = 1 << 4;

        /// `MapInfos.json` file.
        const MapInfos = 1 << 5;

        /// `Quests.txt` file.
        const Quests = 1 << 6;
    }
}

impl Default for FileFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for FileFlags {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "map" | "maps" => Self::Map,
            "commonevents" => Self::CommonEvents,
            "system" => Self::System,
            "items" => Self::Items,
            "skills" => Self::Skills,
            "mapinfos" => Self::MapInfos,
            "quest" | "quests" => Self::Quests,
            _ => {
                return Err(
                    "Expected `map`, `commonevents`, `system`, `items`, `skills`, `mapinfos` or `quests`",
                )
            }
        })
    }
}

/// The record exchanged with the translation platform.
///
/// Unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub key: String,
    pub original: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub context: String,
    /// Workflow marker set by the platform. Never interpreted here.
    #[serde(default)]
    pub stage: Option<i64>,
}

impl TranslationUnit {
    #[must_use]
    pub fn new(key: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            original: original.into(),
            ..Default::default()
        }
    }

    /// Sets the translation, dropping it if it's identical to the original.
    #[must_use]
    pub fn translation(mut self, translation: impl Into<String>) -> Self {
        let translation = translation.into();

        if translation != self.original {
            self.translation = translation;
        }

        self
    }

    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// A unit counts as untranslated when the translation is empty or the translator left the original text as is.
    #[must_use]
    pub fn is_untranslated(&self) -> bool {
        self.translation.is_empty() || self.translation == self.original
    }
}

/// Processing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIs, Display)]
pub enum Mode {
    /// Game files to translation unit files.
    #[default]
    Convert,
    /// Approved translation unit files back into game files.
    Restore,
}

/// Counts of files a processing phase wrote and skipped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}: IO error occurred: {1}")]
    Io(PathBuf, io::Error),
    #[error("{path}: Creating directory failed with: {err}")]
    CreateDirFailed { path: PathBuf, err: io::Error },
    #[error("{0}: Parsing JSON data failed with: {1}")]
    JsonParse(PathBuf, serde_json::Error),
    #[error("Serializing JSON data failed with: {0}")]
    JsonWrite(#[from] serde_json::Error),
    #[error("{0} files can't be extracted or restored.")]
    Unsupported(FileType),
    #[error("System translation key `{0}` doesn't match any known entry.")]
    UnknownSystemKey(String),
    #[error("{0}: Game directory doesn't exist.")]
    GameNotFound(PathBuf),
}

impl Error {
    /// Fatal errors abort the whole batch instead of skipping a single file.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::UnknownSystemKey(_) | Self::GameNotFound(_))
    }
}
