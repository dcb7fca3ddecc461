#![allow(dead_code)]

use serde_json::{json, Value};
use std::{
    collections::BTreeMap,
    fs::{create_dir_all, read_dir, read_to_string, write},
    path::{Path, PathBuf},
};

pub fn map_fixture() -> Value {
    json!({
        "autoplayBgm": false,
        "displayName": "Farm",
        "width": 17,
        "height": 13,
        "events": [
            null,
            {
                "id": 1,
                "name": "EV001",
                "note": "",
                "x": 4,
                "y": 7,
                "pages": [
                    {
                        "conditions": { "switch1Valid": false },
                        "trigger": 0,
                        "list": [
                            { "code": 101, "indent": 0, "parameters": ["Grandpa", 0, 0, 2] },
                            { "code": 401, "indent": 0, "parameters": ["Hello."] },
                            { "code": 401, "indent": 0, "parameters": ["How are you?"] },
                            { "code": 102, "indent": 0, "parameters": [["Fine", "Tired"], 1, 0, 2, 0] },
                            { "code": 402, "indent": 0, "parameters": [0, "Fine"] },
                            { "code": 401, "indent": 1, "parameters": ["Good."] },
                            { "code": 0, "indent": 1, "parameters": [] },
                            { "code": 0, "indent": 0, "parameters": [] }
                        ]
                    }
                ]
            }
        ]
    })
}

pub fn common_events_fixture() -> Value {
    json!([
        null,
        {
            "id": 1,
            "name": "Intro",
            "switchId": 1,
            "trigger": 0,
            "list": [
                { "code": 401, "indent": 0, "parameters": ["a"] },
                { "code": 401, "indent": 0, "parameters": ["b"] },
                { "code": 102, "indent": 0, "parameters": [["x", "y"], 1, 0, 2, 0] },
                { "code": 401, "indent": 0, "parameters": ["c"] },
                { "code": 0, "indent": 0, "parameters": [] }
            ]
        }
    ])
}

pub fn system_fixture() -> Value {
    json!({
        "currencyUnit": "G",
        "gameTitle": "Countryside",
        "locale": "en_US",
        "skillTypes": ["", "Farming"],
        "terms": {
            "basic": ["Level", "Lv", null, ""],
            "commands": ["Fight", null],
            "params": ["Max HP"],
            "messages": {
                "actionFailure": "There was no effect on %1!",
                "alwaysDash": "Always Dash"
            }
        },
        "versionId": 1234
    })
}

pub fn items_fixture() -> Value {
    json!([
        null,
        { "id": 1, "name": "Potion", "description": "Heals a little.", "price": 50 },
        { "id": 2, "name": "", "description": "", "price": 0 },
        { "id": 3, "name": "", "description": "Only a description.", "price": 0 }
    ])
}

pub fn map_infos_fixture() -> Value {
    json!([
        null,
        { "id": 1, "expanded": false, "name": "Farm", "order": 1, "parentId": 0, "scrollX": 0, "scrollY": 0 },
        { "id": 2, "expanded": false, "name": "Village", "order": 2, "parentId": 0, "scrollX": 0, "scrollY": 0 }
    ])
}

pub const QUESTS_FIXTURE: &str =
    "<quest 1:Wood|0|1>\nGather wood.\n</quest>\n<quest 2:Ore|0|1>\nMine ore.\n</quest>\n";

pub fn write_text(path: &Path, content: &str) {
    create_dir_all(path.parent().unwrap()).unwrap();
    write(path, content).unwrap();
}

pub fn write_json(path: &Path, value: &Value) {
    write_text(path, &value.to_string());
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&read_to_string(path).unwrap()).unwrap()
}

/// Every file under `dir`, keyed by its path relative to `dir`.
pub fn read_tree(dir: &Path) -> BTreeMap<PathBuf, String> {
    fn walk(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, String>) {
        for entry in read_dir(dir).unwrap().flatten() {
            let path = entry.path();

            if path.is_dir() {
                walk(root, &path, files);
            } else {
                let relative = path.strip_prefix(root).unwrap().to_path_buf();
                files.insert(relative, read_to_string(&path).unwrap());
            }
        }
    }

    let mut files = BTreeMap::new();
    walk(dir, dir, &mut files);
    files
}
