use crate::{
    constants::*,
    core::{quest_blocks, text_commands, EventKey, KnownTranslations},
    schema::{
        CommonEvent, DatabaseEntry, Document, EventCommand, GameMap,
        GameSystem, MapInfo,
    },
    types::{Error, FileType, TranslationUnit},
};
use std::path::Path;

/// Carves translation units out of parsed game files.
///
/// Previously known translations for the same file, if any, pre-fill the `translation` field of the produced units.
/// A pre-filled translation that equals the original text is dropped.
///
/// # Example
/// ```no_run
/// use dlomc_localization::{extract::Extractor, types::FileType};
/// use std::path::Path;
///
/// let units = Extractor::new()
///     .extract_file(FileType::Map, Path::new("www/data/Map001.json"))
///     .unwrap();
/// ```
#[derive(Default)]
pub struct Extractor<'a> {
    known: KnownTranslations<'a>,
}

impl<'a> Extractor<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the previously known translations of the file. [`None`] means there are none.
    #[must_use]
    pub fn known_translations(
        mut self,
        units: Option<&'a [TranslationUnit]>,
    ) -> Self {
        self.known = KnownTranslations::new(units);
        self
    }

    /// Loads the file at `path` as `file_type` and extracts it.
    pub fn extract_file(
        &self,
        file_type: FileType,
        path: &Path,
    ) -> Result<Vec<TranslationUnit>, Error> {
        let document = Document::load(file_type, path)?;
        Ok(self.extract(&document))
    }

    /// Extracts units from a parsed document, in document order.
    #[must_use]
    pub fn extract(&self, document: &Document) -> Vec<TranslationUnit> {
        match document {
            Document::Map(map) => self.extract_map(map),
            Document::CommonEvents(events) => {
                self.extract_common_events(events)
            }
            Document::System(system) => self.extract_system(system),
            Document::Items(entries) | Document::Skills(entries) => {
                self.extract_entries(entries)
            }
            Document::MapInfos(infos) => self.extract_map_infos(infos),
            Document::Quests(text) => self.extract_quests(text),
        }
    }

    fn extract_list(
        &self,
        list: &[EventCommand],
        key: EventKey<'_>,
        context_prefix: Option<&str>,
        units: &mut Vec<TranslationUnit>,
    ) {
        for command in text_commands(list) {
            let key = EventKey {
                command: command.index,
                code: command.code,
                ..key
            };

            let context = match context_prefix {
                Some(prefix) => format!("{prefix}\n{}", command.context),
                None => command.context,
            };

            let translation = self.known.by_original(&command.text);

            units.push(
                TranslationUnit::new(key.to_string(), command.text)
                    .translation(translation)
                    .context(context),
            );
        }
    }

    fn extract_map(&self, map: &GameMap) -> Vec<TranslationUnit> {
        let display_name = TranslationUnit::new(
            DISPLAY_NAME_KEY,
            map.display_name.as_str(),
        )
        .translation(self.known.by_key(DISPLAY_NAME_KEY));

        let context_prefix: String = if display_name.translation.is_empty() {
            map.display_name.clone()
        } else {
            display_name.translation.clone()
        };

        let mut units: Vec<TranslationUnit> = vec![display_name];

        for event in map.events.iter().flatten() {
            for (page_index, page) in event.pages.iter().enumerate() {
                let key = EventKey {
                    event_id: event.id,
                    event_name: &event.name,
                    page: Some(page_index),
                    command: 0,
                    code: 0,
                };

                self.extract_list(
                    &page.list,
                    key,
                    Some(&context_prefix),
                    &mut units,
                );
            }
        }

        units
    }

    fn extract_common_events(
        &self,
        events: &[Option<CommonEvent>],
    ) -> Vec<TranslationUnit> {
        let mut units: Vec<TranslationUnit> = Vec::new();

        for event in events.iter().flatten() {
            let key = EventKey {
                event_id: event.id,
                event_name: &event.name,
                page: None,
                command: 0,
                code: 0,
            };

            self.extract_list(&event.list, key, None, &mut units);
        }

        units
    }

    fn extract_system(&self, system: &GameSystem) -> Vec<TranslationUnit> {
        let mut units: Vec<TranslationUnit> = Vec::new();

        for (key, value) in [
            (GAME_TITLE_KEY, &system.game_title),
            (LOCALE_KEY, &system.locale),
        ] {
            units.push(
                TranslationUnit::new(key, value.as_str())
                    .translation(self.known.by_key(key)),
            );
        }

        let terms = &system.terms;

        for (prefix, list) in [
            (SKILL_TYPES_KEY, &system.skill_types),
            (TERMS_BASIC_PREFIX, &terms.basic),
            (TERMS_COMMANDS_PREFIX, &terms.commands),
            (TERMS_PARAMS_PREFIX, &terms.params),
        ] {
            for (index, value) in list.iter().enumerate() {
                let Some(value) = value.as_deref().filter(|v| !v.is_empty())
                else {
                    continue;
                };

                units.push(
                    TranslationUnit::new(
                        format!("{prefix}{KEY_SEPARATOR}{index}"),
                        value,
                    )
                    .translation(self.known.by_original(value)),
                );
            }
        }

        for (name, value) in &terms.messages {
            let key = format!("{TERMS_MESSAGES_PREFIX}{KEY_SEPARATOR}{name}");
            let translation = self.known.by_key(&key);

            units.push(
                TranslationUnit::new(key, value.as_str())
                    .translation(translation),
            );
        }

        units
    }

    fn extract_entries(
        &self,
        entries: &[Option<DatabaseEntry>],
    ) -> Vec<TranslationUnit> {
        let mut units: Vec<TranslationUnit> = Vec::new();

        for entry in entries.iter().flatten() {
            if entry.name.is_empty() && entry.description.is_empty() {
                continue;
            }

            let context = format!(
                "{}{KEY_SEPARATOR}{}\n{}",
                entry.id, entry.name, entry.description
            );

            for (field, value) in [
                (NAME_KEY, &entry.name),
                (DESCRIPTION_KEY, &entry.description),
            ] {
                if value.is_empty() {
                    continue;
                }

                let key = format!("{}{KEY_SEPARATOR}{field}", entry.id);
                let translation = self.known.by_key(&key);

                units.push(
                    TranslationUnit::new(key, value.as_str())
                        .translation(translation)
                        .context(context.as_str()),
                );
            }
        }

        units
    }

    fn extract_map_infos(
        &self,
        infos: &[Option<MapInfo>],
    ) -> Vec<TranslationUnit> {
        infos
            .iter()
            .flatten()
            .map(|info| {
                let key = info.id.to_string();
                let translation = self.known.by_key(&key);

                TranslationUnit::new(key, info.name.as_str())
                    .translation(translation)
            })
            .collect()
    }

    fn extract_quests(&self, text: &str) -> Vec<TranslationUnit> {
        quest_blocks(text)
            .into_iter()
            .map(|(block, id)| {
                TranslationUnit::new(id, block)
                    .translation(self.known.by_key(id))
            })
            .collect()
    }
}
