use crate::{
    constants::{CHOICE_CONTEXT_SEPARATOR, KEY_SEPARATOR, QUEST_PATTERN},
    schema::EventCommand,
    types::{Code, TranslationUnit},
};
use indexmap::{map::Entry, IndexMap};
use regex::Regex;
use smallvec::SmallVec;
use std::{
    fmt::{self, Display},
    sync::LazyLock,
};

static QUEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(QUEST_PATTERN).unwrap());

/// Translations produced for the same file by an earlier round trip through the platform.
///
/// Lookups never fail: anything unknown resolves to an empty translation.
#[derive(Default)]
pub struct KnownTranslations<'a> {
    by_key: IndexMap<&'a str, &'a str>,
    by_original: IndexMap<&'a str, &'a str>,
}

impl<'a> KnownTranslations<'a> {
    #[must_use]
    pub fn new(units: Option<&'a [TranslationUnit]>) -> Self {
        let mut known = Self::default();

        for unit in units.unwrap_or_default() {
            known.by_key.insert(&unit.key, &unit.translation);

            // The first unit with a given original text wins.
            if let Entry::Vacant(entry) =
                known.by_original.entry(&unit.original)
            {
                entry.insert(&unit.translation);
            }
        }

        known
    }

    #[must_use]
    pub fn by_key(&self, key: &str) -> &'a str {
        self.by_key.get(key).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn by_original(&self, original: &str) -> &'a str {
        self.by_original.get(original).copied().unwrap_or_default()
    }
}

/// Structural coordinates of a dialogue or choice command.
///
/// Formats as `{event_id} | {event_name} | [{page} | ]{command} | {code}`. Map keys carry the page index, common
/// event keys don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey<'a> {
    pub event_id: u32,
    pub event_name: &'a str,
    pub page: Option<usize>,
    pub command: usize,
    pub code: u16,
}

impl<'a> EventKey<'a> {
    /// Parses a key back into coordinates. The event name may itself contain the separator, as it's taken from
    /// whatever is left between the id and the trailing numeric fields.
    #[must_use]
    pub fn parse(key: &'a str, with_page: bool) -> Option<Self> {
        let (event_id, rest) = key.split_once(KEY_SEPARATOR)?;
        let tail_len: usize = if with_page { 3 } else { 2 };

        let fields: SmallVec<[&str; 4]> =
            rest.rsplitn(tail_len + 1, KEY_SEPARATOR).collect();

        if fields.len() != tail_len + 1 {
            return None;
        }

        let page = if with_page {
            Some(fields[2].trim().parse().ok()?)
        } else {
            None
        };

        Some(Self {
            event_id: event_id.trim().parse().ok()?,
            event_name: fields[tail_len],
            page,
            command: fields[1].trim().parse().ok()?,
            code: fields[0].trim().parse().ok()?,
        })
    }
}

impl Display for EventKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}",
            self.event_id, self.event_name
        )?;

        if let Some(page) = self.page {
            write!(f, "{page}{KEY_SEPARATOR}")?;
        }

        write!(f, "{}{KEY_SEPARATOR}{}", self.command, self.code)
    }
}

/// A dialogue or choice command found in an event command list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCommand {
    pub index: usize,
    pub code: u16,
    pub text: String,
    /// Original text of the whole run the command belongs to.
    pub context: String,
}

fn run_context(run: &[EventCommand], code: Code) -> String {
    let lines: Vec<String> = run
        .iter()
        .take_while(|command| command.code() == code)
        .filter_map(|command| match code {
            Code::Choice => command
                .choices()
                .map(|choices| choices.join(CHOICE_CONTEXT_SEPARATOR)),
            _ => command.text(),
        })
        .collect();

    lines.join("\n").trim().to_owned()
}

/// Collects every dialogue and choice command of a list, in order.
///
/// Consecutive commands with the same code form a run, and every command of a run shares the run's context. Any
/// change of code starts a new run.
#[must_use]
pub fn text_commands(list: &[EventCommand]) -> Vec<TextCommand> {
    let mut result: Vec<TextCommand> = Vec::new();
    let mut run_code: Option<Code> = None;
    let mut context: String = String::new();

    for (index, command) in list.iter().enumerate() {
        let code = command.code();

        if code.is_other() {
            run_code = None;
            continue;
        }

        if run_code != Some(code) {
            run_code = Some(code);
            context = run_context(&list[index..], code);
        }

        let Some(text) = command.text() else {
            continue;
        };

        result.push(TextCommand {
            index,
            code: command.code,
            text,
            context: context.clone(),
        });
    }

    result
}

/// Finds every quest block of a quest file as `(block, id)` pairs, in file order.
#[must_use]
pub fn quest_blocks(text: &str) -> Vec<(&str, &str)> {
    QUEST_RE
        .captures_iter(text)
        .filter_map(|captures| {
            Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_key_round_trip_with_page() {
        let key = EventKey {
            event_id: 12,
            event_name: "EV012",
            page: Some(1),
            command: 7,
            code: 401,
        };

        let formatted = key.to_string();
        assert_eq!(formatted, "12 | EV012 | 1 | 7 | 401");
        assert_eq!(EventKey::parse(&formatted, true), Some(key));
    }

    #[test]
    fn event_key_keeps_separator_inside_name() {
        let parsed =
            EventKey::parse("3 | Shop | Night | 4 | 102", false).unwrap();

        assert_eq!(parsed.event_id, 3);
        assert_eq!(parsed.event_name, "Shop | Night");
        assert_eq!(parsed.page, None);
        assert_eq!(parsed.command, 4);
        assert_eq!(parsed.code, 102);
    }

    #[test]
    fn event_key_accepts_empty_name() {
        let parsed = EventKey::parse("5 |  | 0 | 2 | 401", true).unwrap();
        assert_eq!(parsed.event_name, "");
        assert_eq!(parsed.page, Some(0));
    }

    #[test]
    fn event_key_rejects_garbage() {
        assert_eq!(EventKey::parse("displayName", true), None);
        assert_eq!(EventKey::parse("1 | name | x | 401", false), None);
        assert_eq!(EventKey::parse("1 | name | 2 | 401", true), None);
    }

    #[test]
    fn runs_split_on_code_change() {
        let list = vec![
            EventCommand::new(401, vec![json!("a")]),
            EventCommand::new(401, vec![json!("b")]),
            EventCommand::new(102, vec![json!(["x", "y"]), json!(0)]),
            EventCommand::new(401, vec![json!("c")]),
            EventCommand::new(0, vec![]),
        ];

        let commands = text_commands(&list);
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0].context, "a\nb");
        assert_eq!(commands[1].context, "a\nb");
        assert_eq!(commands[2].context, "x | y");
        assert_eq!(commands[2].text, "x\ny");
        assert_eq!(commands[3].context, "c");
        assert_eq!(commands[3].index, 3);
    }

    #[test]
    fn quest_blocks_span_lines() {
        let text =
            "header\n<quest 1:Wood|0|1>\nGather wood.\n</quest>\n\n<quest 12:Ore|2|3>Mine.</quest>";
        let blocks = quest_blocks(text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            ("<quest 1:Wood|0|1>\nGather wood.\n</quest>", "1")
        );
        assert_eq!(blocks[1].1, "12");
    }

    #[test]
    fn known_translations_prefer_first_original() {
        let units = vec![
            TranslationUnit::new("1", "Hello").translation("Bonjour"),
            TranslationUnit::new("2", "Hello").translation("Salut"),
        ];
        let known = KnownTranslations::new(Some(units.as_slice()));

        assert_eq!(known.by_original("Hello"), "Bonjour");
        assert_eq!(known.by_key("2"), "Salut");
        assert_eq!(known.by_key("3"), "");
        assert_eq!(KnownTranslations::new(None).by_original("Hello"), "");
    }
}
