mod common;

use common::*;
use dlomc_localization::{
    extract::Extractor,
    schema::Document,
    types::{FileType, TranslationUnit},
};

fn parse(file_type: FileType, value: &serde_json::Value) -> Document {
    Document::parse_str(file_type, &value.to_string()).unwrap()
}

fn keys(units: &[TranslationUnit]) -> Vec<&str> {
    units.iter().map(|unit| unit.key.as_str()).collect()
}

#[test]
fn map_units() {
    let document = parse(FileType::Map, &map_fixture());
    let units = Extractor::new().extract(&document);

    assert_eq!(
        keys(&units),
        [
            "displayName",
            "1 | EV001 | 0 | 1 | 401",
            "1 | EV001 | 0 | 2 | 401",
            "1 | EV001 | 0 | 3 | 102",
            "1 | EV001 | 0 | 5 | 401",
        ]
    );

    assert_eq!(units[0].original, "Farm");
    assert_eq!(units[0].context, "");
    assert_eq!(units[1].original, "Hello.");
    assert_eq!(units[1].context, "Farm\nHello.\nHow are you?");
    assert_eq!(units[2].context, units[1].context);
    assert_eq!(units[3].original, "Fine\nTired");
    assert_eq!(units[3].context, "Farm\nFine | Tired");
    assert_eq!(units[4].context, "Farm\nGood.");
    assert!(units.iter().all(|unit| unit.translation.is_empty()));
}

#[test]
fn map_context_uses_known_display_name() {
    let document = parse(FileType::Map, &map_fixture());
    let known = vec![
        TranslationUnit::new("displayName", "Farm").translation("Ferme"),
        TranslationUnit::new("1 | EV001 | 0 | 1 | 401", "Hello.")
            .translation("Bonjour."),
    ];

    let units = Extractor::new()
        .known_translations(Some(known.as_slice()))
        .extract(&document);

    assert_eq!(units[0].translation, "Ferme");
    assert_eq!(units[1].translation, "Bonjour.");
    assert_eq!(units[1].context, "Ferme\nHello.\nHow are you?");
    assert_eq!(units[2].translation, "");
}

#[test]
fn dialogue_translations_follow_original_text() {
    // The command moved, but the text is the same.
    let document = parse(FileType::Map, &map_fixture());
    let known = vec![TranslationUnit::new("1 | EV001 | 0 | 9 | 401", "Good.")
        .translation("Bien.")];

    let units = Extractor::new()
        .known_translations(Some(known.as_slice()))
        .extract(&document);

    assert_eq!(units[4].key, "1 | EV001 | 0 | 5 | 401");
    assert_eq!(units[4].translation, "Bien.");
}

#[test]
fn common_event_runs() {
    let document = parse(FileType::CommonEvents, &common_events_fixture());
    let units = Extractor::new().extract(&document);

    assert_eq!(
        keys(&units),
        [
            "1 | Intro | 0 | 401",
            "1 | Intro | 1 | 401",
            "1 | Intro | 2 | 102",
            "1 | Intro | 3 | 401",
        ]
    );

    let contexts: Vec<&str> =
        units.iter().map(|unit| unit.context.as_str()).collect();
    assert_eq!(contexts, ["a\nb", "a\nb", "x | y", "c"]);
}

#[test]
fn extraction_is_idempotent() {
    let document = parse(FileType::Map, &map_fixture());
    let known = vec![TranslationUnit::new("displayName", "Farm")
        .translation("Ferme")];
    let extractor = Extractor::new().known_translations(Some(known.as_slice()));

    let first = serde_json::to_string_pretty(&extractor.extract(&document))
        .unwrap();
    let second = serde_json::to_string_pretty(&extractor.extract(&document))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn known_translation_equal_to_original_is_dropped() {
    let document = parse(FileType::Items, &items_fixture());
    let known = vec![TranslationUnit {
        key: "1 | name".to_owned(),
        original: "Potion".to_owned(),
        translation: "Potion".to_owned(),
        ..Default::default()
    }];

    let units = Extractor::new()
        .known_translations(Some(known.as_slice()))
        .extract(&document);

    assert_eq!(units[0].key, "1 | name");
    assert_eq!(units[0].translation, "");
}

#[test]
fn items_skip_rule() {
    let document = parse(FileType::Items, &items_fixture());
    let units = Extractor::new().extract(&document);

    assert_eq!(
        keys(&units),
        ["1 | name", "1 | description", "3 | description"]
    );
    assert_eq!(units[0].context, "1 | Potion\nHeals a little.");
    assert_eq!(units[1].context, units[0].context);
    assert_eq!(units[2].original, "Only a description.");
    assert_eq!(units[2].context, "3 | \nOnly a description.");
}

#[test]
fn skills_share_item_logic() {
    let document = parse(FileType::Skills, &items_fixture());
    assert_eq!(Extractor::new().extract(&document).len(), 3);
}

#[test]
fn map_infos_by_id() {
    let document = parse(FileType::MapInfos, &map_infos_fixture());
    let known = vec![TranslationUnit::new("2", "Old village name")
        .translation("Village FR")];

    let units = Extractor::new()
        .known_translations(Some(known.as_slice()))
        .extract(&document);

    assert_eq!(keys(&units), ["1", "2"]);
    assert_eq!(units[0].original, "Farm");
    assert_eq!(units[0].translation, "");
    assert_eq!(units[1].translation, "Village FR");
}

#[test]
fn system_units() {
    let document = parse(FileType::System, &system_fixture());
    let units = Extractor::new().extract(&document);

    assert_eq!(
        keys(&units),
        [
            "gameTitle",
            "locale",
            "skillTypes | 1",
            "terms | basic | 0",
            "terms | basic | 1",
            "terms | commands | 0",
            "terms | params | 0",
            "terms | messages | actionFailure",
            "terms | messages | alwaysDash",
        ]
    );
    assert_eq!(units[2].original, "Farming");
    assert_eq!(units[7].original, "There was no effect on %1!");
}

#[test]
fn system_list_entries_follow_original_text() {
    let document = parse(FileType::System, &system_fixture());
    let known = vec![
        TranslationUnit::new("terms | basic | 5", "Lv").translation("Nv"),
        TranslationUnit::new("terms | messages | alwaysDash", "Always Dash")
            .translation("Toujours courir"),
    ];

    let units = Extractor::new()
        .known_translations(Some(known.as_slice()))
        .extract(&document);

    let find = |key: &str| {
        units
            .iter()
            .find(|unit| unit.key == key)
            .map(|unit| unit.translation.as_str())
    };

    assert_eq!(find("terms | basic | 1"), Some("Nv"));
    assert_eq!(find("terms | messages | alwaysDash"), Some("Toujours courir"));
    assert_eq!(find("gameTitle"), Some(""));
}

#[test]
fn quest_units() {
    let document =
        Document::parse_str(FileType::Quest, QUESTS_FIXTURE).unwrap();
    let known = vec![TranslationUnit::new(
        "2",
        "<quest 2:Ore|0|1>\nMine ore.\n</quest>",
    )
    .translation("<quest 2:Minerai|0|1>\nMiner.\n</quest>")];

    let units = Extractor::new()
        .known_translations(Some(known.as_slice()))
        .extract(&document);

    assert_eq!(keys(&units), ["1", "2"]);
    assert_eq!(units[0].original, "<quest 1:Wood|0|1>\nGather wood.\n</quest>");
    assert_eq!(units[0].translation, "");
    assert_eq!(units[1].translation, "<quest 2:Minerai|0|1>\nMiner.\n</quest>");
}

#[test]
fn unmodelled_fields_are_tolerated() {
    let mut map = map_fixture();
    map["events"][1]["pages"][0]["list"][1]["extra"] =
        serde_json::json!({ "a": 1 });
    map["parallaxName"] = serde_json::json!("");

    let document = parse(FileType::Map, &map);
    assert_eq!(Extractor::new().extract(&document).len(), 5);
}

#[test]
fn recipes_are_unsupported() {
    assert!(Document::parse_str(FileType::Recipes, "anything").is_err());
}
