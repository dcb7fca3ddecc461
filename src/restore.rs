use crate::{
    constants::{localization::*, *},
    core::{quest_blocks, EventKey},
    schema::{
        CommonEvent, DatabaseEntry, Document, EventCommand, GameMap,
        GameSystem, MapInfo,
    },
    types::{Error, FileType, TranslationUnit},
};
use indexmap::IndexMap;
use log::{debug, warn};
use smallvec::SmallVec;
use std::path::Path;

/// Splices approved translations into a pristine copy of a game file.
///
/// Records whose translation is empty or equal to the original are skipped. Dialogue, choice and system records are
/// only applied while the live document still holds the record's original text at the keyed position; anything else
/// is left untouched.
///
/// # Example
/// ```no_run
/// use dlomc_localization::{restore::Restorer, types::FileType};
/// use std::path::Path;
///
/// let document = Restorer::new()
///     .restore_file(FileType::Items, Path::new("www/data/Items.json"), &[])
///     .unwrap();
/// ```
#[derive(Default)]
pub struct Restorer;

fn translated(
    records: &[TranslationUnit],
) -> impl Iterator<Item = &TranslationUnit> {
    records.iter().filter(|record| !record.is_untranslated())
}

/// Applies `record` to `command` if the command still matches the record.
fn apply_to_command(
    command: Option<&mut EventCommand>,
    key: &EventKey<'_>,
    record: &TranslationUnit,
) {
    let Some(command) = command else {
        debug!("{}: command not found", record.key);
        return;
    };

    if command.code != key.code
        || command.text().as_deref() != Some(record.original.as_str())
    {
        debug!("{}: command text has changed", record.key);
        return;
    }

    command.set_text(&record.translation);
}

fn replace_scalar(value: &mut String, record: &TranslationUnit) {
    if *value == record.original {
        value.clone_from(&record.translation);
    }
}

fn replace_in_list(list: &mut [Option<String>], record: &TranslationUnit) {
    for value in list.iter_mut().flatten() {
        replace_scalar(value, record);
    }
}

impl Restorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Loads the original file at `path` as `file_type` and restores it.
    pub fn restore_file(
        &self,
        file_type: FileType,
        path: &Path,
        records: &[TranslationUnit],
    ) -> Result<Document, Error> {
        let document = Document::load(file_type, path)?;
        self.restore(document, records)
    }

    /// Restores `records` into `document` and returns the patched document.
    ///
    /// The only error is [`Error::UnknownSystemKey`], returned when a `System.json` record has a key no system
    /// entry could have produced.
    pub fn restore(
        &self,
        mut document: Document,
        records: &[TranslationUnit],
    ) -> Result<Document, Error> {
        match &mut document {
            Document::Map(map) => Self::restore_map(map, records),
            Document::CommonEvents(events) => {
                Self::restore_common_events(events, records)
            }
            Document::System(system) => Self::restore_system(system, records)?,
            Document::Items(entries) | Document::Skills(entries) => {
                Self::restore_entries(entries, records)
            }
            Document::MapInfos(infos) => {
                Self::restore_map_infos(infos, records)
            }
            Document::Quests(text) => {
                *text = Self::restore_quests(text, records);
            }
        }

        Ok(document)
    }

    fn restore_map(map: &mut GameMap, records: &[TranslationUnit]) {
        for record in translated(records) {
            if record.key == DISPLAY_NAME_KEY {
                replace_scalar(&mut map.display_name, record);
                continue;
            }

            let Some(key) = EventKey::parse(&record.key, true) else {
                warn!("{}: {BAD_KEY_MSG}", record.key);
                continue;
            };

            let page_index = key.page.unwrap_or_default();

            let command = map
                .events
                .iter_mut()
                .flatten()
                .filter(|event| {
                    event.id == key.event_id && event.name == key.event_name
                })
                .find_map(|event| {
                    event.pages.get_mut(page_index)?.list.get_mut(key.command)
                });

            apply_to_command(command, &key, record);
        }
    }

    fn restore_common_events(
        events: &mut [Option<CommonEvent>],
        records: &[TranslationUnit],
    ) {
        for record in translated(records) {
            let Some(key) = EventKey::parse(&record.key, false) else {
                warn!("{}: {BAD_KEY_MSG}", record.key);
                continue;
            };

            let command = events
                .iter_mut()
                .flatten()
                .filter(|event| {
                    event.id == key.event_id && event.name == key.event_name
                })
                .find_map(|event| event.list.get_mut(key.command));

            apply_to_command(command, &key, record);
        }
    }

    fn restore_system(
        system: &mut GameSystem,
        records: &[TranslationUnit],
    ) -> Result<(), Error> {
        for record in translated(records) {
            let fields: SmallVec<[&str; 3]> =
                record.key.splitn(3, KEY_SEPARATOR).collect();
            let terms = &mut system.terms;

            match fields.as_slice() {
                [GAME_TITLE_KEY] => {
                    replace_scalar(&mut system.game_title, record);
                }
                [LOCALE_KEY] => replace_scalar(&mut system.locale, record),
                [SKILL_TYPES_KEY, _] => {
                    replace_in_list(&mut system.skill_types, record);
                }
                [TERMS_KEY, BASIC_KEY, _] => {
                    replace_in_list(&mut terms.basic, record);
                }
                [TERMS_KEY, COMMANDS_KEY, _] => {
                    replace_in_list(&mut terms.commands, record);
                }
                [TERMS_KEY, PARAMS_KEY, _] => {
                    replace_in_list(&mut terms.params, record);
                }
                [TERMS_KEY, MESSAGES_KEY, _] => {
                    for value in terms.messages.values_mut() {
                        replace_scalar(value, record);
                    }
                }
                _ => return Err(Error::UnknownSystemKey(record.key.clone())),
            }
        }

        Ok(())
    }

    // Entries are matched by id alone, their current text isn't compared to the record's original.
    fn restore_entries(
        entries: &mut [Option<DatabaseEntry>],
        records: &[TranslationUnit],
    ) {
        for record in translated(records) {
            let Some((id, field)) = record.key.split_once('|') else {
                warn!("{}: {BAD_KEY_MSG}", record.key);
                continue;
            };

            let Ok(id) = id.trim().parse::<u32>() else {
                warn!("{}: {BAD_KEY_MSG}", record.key);
                continue;
            };

            for entry in entries.iter_mut().flatten().filter(|e| e.id == id) {
                match field.trim() {
                    NAME_KEY => entry.name.clone_from(&record.translation),
                    DESCRIPTION_KEY => {
                        entry.description.clone_from(&record.translation);
                    }
                    _ => {
                        warn!("{}: {BAD_KEY_MSG}", record.key);
                        break;
                    }
                }
            }
        }
    }

    fn restore_map_infos(
        infos: &mut [Option<MapInfo>],
        records: &[TranslationUnit],
    ) {
        for record in translated(records) {
            let Ok(id) = record.key.trim().parse::<u32>() else {
                warn!("{}: {BAD_KEY_MSG}", record.key);
                continue;
            };

            for info in infos.iter_mut().flatten().filter(|i| i.id == id) {
                info.name.clone_from(&record.translation);
            }
        }
    }

    /// Rebuilds the quest file from its blocks, replacing translated ones. Blocks are joined by a blank line, so
    /// whatever surrounded them in the original file is dropped.
    fn restore_quests(text: &str, records: &[TranslationUnit]) -> String {
        let mut blocks: IndexMap<&str, &str> = IndexMap::new();

        for (block, id) in quest_blocks(text) {
            blocks.insert(id, block);
        }

        for record in translated(records) {
            match blocks.get_mut(record.key.as_str()) {
                Some(block) => *block = record.translation.as_str(),
                None => debug!("{}: {UNKNOWN_QUEST_MSG}", record.key),
            }
        }

        blocks.into_values().collect::<Vec<_>>().join(QUEST_SEPARATOR)
    }
}
