//! Typed views over the game data files.
//!
//! Each record keeps every field it doesn't model in a flattened `rest` map, so a document written back holds the same
//! values as the file it was read from, apart from the fields that were changed. Modelled fields are written before
//! the `rest` ones.

use crate::{
    constants::CHOICE_SEPARATOR,
    functions::read_to_string_without_bom,
    types::{Code, Error, FileType},
};
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub type Rest = Map<String, Value>;

/// Keeps a field that is present but `null` apart from a missing one.
fn present<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCommand {
    pub code: u16,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub indent: Option<Value>,
    #[serde(default)]
    pub parameters: Vec<Value>,
    #[serde(flatten)]
    pub rest: Rest,
}

impl EventCommand {
    #[must_use]
    pub fn new(code: u16, parameters: Vec<Value>) -> Self {
        Self {
            code,
            indent: Some(Value::from(0)),
            parameters,
            rest: Rest::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn code(&self) -> Code {
        Code::from(self.code)
    }

    /// Text of a dialogue line, or options of a choice list joined by newlines.
    ///
    /// Returns [`None`] for other commands and for commands whose first parameter has an unexpected shape.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let first = self.parameters.first()?;

        match self.code() {
            Code::Dialogue => first.as_str().map(str::to_owned),
            Code::Choice => self.choices().map(|c| c.join(CHOICE_SEPARATOR)),
            Code::Other => None,
        }
    }

    /// Options of a choice list.
    #[must_use]
    pub fn choices(&self) -> Option<Vec<&str>> {
        self.parameters
            .first()?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// Replaces the text parameter, splitting choice translations back into options on newlines.
    pub fn set_text(&mut self, text: &str) {
        let value = match self.code() {
            Code::Dialogue => Value::from(text),
            Code::Choice => Value::Array(
                text.split(CHOICE_SEPARATOR).map(Value::from).collect(),
            ),
            Code::Other => return,
        };

        match self.parameters.first_mut() {
            Some(first) => *first = value,
            None => self.parameters.push(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    pub list: Vec<EventCommand>,
    #[serde(flatten)]
    pub rest: Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEvent {
    pub id: u32,
    pub name: String,
    pub pages: Vec<EventPage>,
    #[serde(flatten)]
    pub rest: Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub events: Vec<Option<MapEvent>>,
    #[serde(flatten)]
    pub rest: Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonEvent {
    pub id: u32,
    pub name: String,
    pub list: Vec<EventCommand>,
    #[serde(flatten)]
    pub rest: Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terms {
    pub basic: Vec<Option<String>>,
    pub commands: Vec<Option<String>>,
    pub params: Vec<Option<String>>,
    pub messages: IndexMap<String, String>,
    #[serde(flatten)]
    pub rest: Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSystem {
    #[serde(rename = "gameTitle")]
    pub game_title: String,
    pub locale: String,
    #[serde(rename = "skillTypes")]
    pub skill_types: Vec<Option<String>>,
    pub terms: Terms,
    #[serde(flatten)]
    pub rest: Rest,
}

/// A row of `Items.json` or `Skills.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseEntry {
    pub id: u32,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub rest: Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    pub id: u32,
    pub name: String,
    #[serde(flatten)]
    pub rest: Rest,
}

/// A parsed game file of one of the recognized shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Map(GameMap),
    CommonEvents(Vec<Option<CommonEvent>>),
    System(GameSystem),
    Items(Vec<Option<DatabaseEntry>>),
    Skills(Vec<Option<DatabaseEntry>>),
    MapInfos(Vec<Option<MapInfo>>),
    Quests(String),
}

fn parse_json<T: DeserializeOwned>(
    content: &str,
    path: &Path,
) -> Result<T, Error> {
    serde_json::from_str(content)
        .map_err(|err| Error::JsonParse(path.to_path_buf(), err))
}

impl Document {
    /// Reads and parses the file at `path` as `file_type`.
    pub fn load(file_type: FileType, path: &Path) -> Result<Self, Error> {
        let content = read_to_string_without_bom(path)
            .map_err(|err| Error::Io(path.to_path_buf(), err))?;
        Self::parse(file_type, &content, path)
    }

    /// Parses in-memory file contents. `path` is only used in error messages.
    pub fn parse(
        file_type: FileType,
        content: &str,
        path: &Path,
    ) -> Result<Self, Error> {
        Ok(match file_type {
            FileType::Map => Self::Map(parse_json(content, path)?),
            FileType::CommonEvents => {
                Self::CommonEvents(parse_json(content, path)?)
            }
            FileType::System => Self::System(parse_json(content, path)?),
            FileType::Items => Self::Items(parse_json(content, path)?),
            FileType::Skills => Self::Skills(parse_json(content, path)?),
            FileType::MapInfos => Self::MapInfos(parse_json(content, path)?),
            FileType::Quest => Self::Quests(content.to_owned()),
            FileType::Recipes => return Err(Error::Unsupported(file_type)),
        })
    }

    /// Shorthand for [`Document::parse`] without a path.
    pub fn parse_str(
        file_type: FileType,
        content: &str,
    ) -> Result<Self, Error> {
        Self::parse(file_type, content, &PathBuf::new())
    }

    #[must_use]
    pub const fn file_type(&self) -> FileType {
        match self {
            Self::Map(_) => FileType::Map,
            Self::CommonEvents(_) => FileType::CommonEvents,
            Self::System(_) => FileType::System,
            Self::Items(_) => FileType::Items,
            Self::Skills(_) => FileType::Skills,
            Self::MapInfos(_) => FileType::MapInfos,
            Self::Quests(_) => FileType::Quest,
        }
    }

    /// Serializes the document in the form the game reads: compact JSON, or the text as is for quests.
    pub fn to_output(&self) -> Result<String, Error> {
        Ok(match self {
            Self::Map(map) => serde_json::to_string(map)?,
            Self::CommonEvents(events) => serde_json::to_string(events)?,
            Self::System(system) => serde_json::to_string(system)?,
            Self::Items(entries) | Self::Skills(entries) => {
                serde_json::to_string(entries)?
            }
            Self::MapInfos(infos) => serde_json::to_string(infos)?,
            Self::Quests(text) => text.clone(),
        })
    }
}
