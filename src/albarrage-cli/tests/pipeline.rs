//! End-to-end pipeline tests against a fixture data tree.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

fn write_json(root: &Path, rel: &str, value: &Value) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read_json(root: &Path, rel: &str) -> Value {
    serde_json::from_str(&fs::read_to_string(root.join(rel)).unwrap()).unwrap()
}

fn write_fixture_tree(root: &Path) {
    write_json(
        root,
        "AzurLaneData/data/ships.json",
        &json!({
            "101": {
                "name": "Z23",
                "skills": [[1000], [1000, 1001]],
                "retro": { "skills": [{ "replace": 1001, "with": 1002 }] }
            },
            "102": {
                "name": "Ayanami",
                "skills": [[1000]],
                "unique_aug": 7,
                "research": [{ "fate": { "skills": [{ "replace": 1000, "with": 1003 }] } }]
            }
        }),
    );
    write_json(
        root,
        "AzurLaneData/data/equipments.json",
        &json!({
            "201": { "name": "Twin 20mm (Type 99)", "skills": [2000] }
        }),
    );
    write_json(
        root,
        "AzurLaneData/data/augments.json",
        &json!({
            "7": {
                "name": "Kagero's Blade",
                "skills": [2000],
                "skill_upgrades": [{ "replace": 1000, "with": 1004 }]
            }
        }),
    );
    write_json(
        root,
        "AzurLaneData/data/skills.json",
        &json!({
            "1000": { "name": "Full Barrage", "type": 1 },
            "2000": { "name": "Anti-Air Mode", "type": 2 }
        }),
    );
    // 1001 and 1003 have no barrage definition and must be dropped
    write_json(
        root,
        "AzurLaneData/data/barrages.json",
        &json!({
            "1000": [{
                "name": "Full Barrage (Niimi)",
                "parts": [
                    { "damage": 10, "count": 4, "ammo": 3 },
                    { "damage": 20, "count": 2 }
                ]
            }],
            "1002": [{ "name": "Retrofit Salvo", "parts": [{ "damage": 5, "count": 1 }] }],
            "1004": [{ "name": "Augment Slash", "parts": [{ "count": 1 }] }],
            "2000": [{ "name": "Flak Burst", "parts": [{ "damage": 7, "count": 3 }] }]
        }),
    );
    // 1000 and 2000 match exactly. 1002 falls back to base id 1000, whose
    // variant has two parts against 1002's one, so that variant is skipped.
    write_json(
        root,
        "src/barrages3.json",
        &json!({
            "1000": [{
                "parts": [
                    { "damage": 20, "count": 2, "targetting": 2 },
                    { "damage": 99, "count": 9, "targetting": 5 }
                ]
            }],
            "2000": [{ "parts": [{ "damage": 7, "count": 3, "targetting": 1 }] }]
        }),
    );
}

#[test]
fn test_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_fixture_tree(root);

    albarrage::pipeline::run(root).unwrap();

    // --- ship catalog ---
    let ships = read_json(root, "output/barrages.json");
    let keys: Vec<&String> = ships.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["1000", "1002", "1004"]);

    let entry = &ships["1000"];
    // both ships grant 1000, names sorted
    assert_eq!(entry["ships"], json!(["Ayanami", "Z23"]));
    assert!(entry.get("equips").is_none());
    // trailing parenthesized suffix moved to its own line
    assert_eq!(entry["barrages"][0]["name"], json!("Full Barrage\n(Niimi)"));

    // targeting: first part has no (damage, count) match -> 0; second -> 2
    let parts = &entry["barrages"][0]["parts"];
    assert_eq!(parts[0]["aim_type"], json!(0));
    assert_eq!(parts[0]["ammo"], json!(3));
    assert_eq!(parts[1]["aim_type"], json!(2));

    // 1002 falls back to base id 1000, but the parts lengths differ:
    // variant skipped, no aim_type written
    assert!(ships["1002"]["barrages"][0]["parts"][0]
        .get("aim_type")
        .is_none());

    // unique augment grant reaches the ship catalog
    assert_eq!(ships["1004"]["ships"], json!(["Ayanami"]));

    // --- item catalog ---
    let items = read_json(root, "output/barrages2.json");
    let keys: Vec<&String> = items.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["2000"]);
    let entry = &items["2000"];
    assert_eq!(
        entry["equips"],
        json!(["Kagero's Blade", "Twin 20mm (Type 99)"])
    );
    assert!(entry.get("ships").is_none());
    assert_eq!(entry["barrages"][0]["parts"][0]["aim_type"], json!(1));

    // --- lua modules ---
    let lua = fs::read_to_string(root.join("output/data.lua")).unwrap();
    assert!(lua.starts_with("local p = {\n"));
    assert!(lua.ends_with("}\n\nreturn p\n"));
    assert!(lua.contains("[\"1000\"] = {"));
    assert!(lua.contains("ships = { \"Ayanami\", \"Z23\" }"));
    assert!(lua.contains("name = \"Full Barrage\\n(Niimi)\""));

    let lua2 = fs::read_to_string(root.join("output/data2.lua")).unwrap();
    assert!(lua2.contains("equips = { \"Kagero's Blade\", \"Twin 20mm (Type 99)\" }"));
}

#[test]
fn test_pipeline_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_fixture_tree(root);

    albarrage::pipeline::run(root).unwrap();
    let first = fs::read_to_string(root.join("output/barrages.json")).unwrap();
    let first_lua = fs::read_to_string(root.join("output/data.lua")).unwrap();

    albarrage::pipeline::run(root).unwrap();
    assert_eq!(
        fs::read_to_string(root.join("output/barrages.json")).unwrap(),
        first
    );
    assert_eq!(
        fs::read_to_string(root.join("output/data.lua")).unwrap(),
        first_lua
    );
}

#[test]
fn test_empty_catalogs() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_json(root, "AzurLaneData/data/ships.json", &json!({}));
    write_json(root, "AzurLaneData/data/equipments.json", &json!({}));
    write_json(root, "AzurLaneData/data/augments.json", &json!({}));
    write_json(root, "AzurLaneData/data/barrages.json", &json!({}));
    write_json(root, "src/barrages3.json", &json!({}));

    albarrage::pipeline::run(root).unwrap();

    assert_eq!(read_json(root, "output/barrages.json"), json!({}));
    assert_eq!(read_json(root, "output/barrages2.json"), json!({}));
    assert_eq!(
        fs::read_to_string(root.join("output/data.lua")).unwrap(),
        "local p = {}\n\nreturn p\n"
    );
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = albarrage::pipeline::run(dir.path()).unwrap_err();
    assert!(err.to_string().contains("ships.json"));
}

#[test]
fn test_export_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_fixture_tree(root);

    let output = root.join("output/data.json");
    albarrage::pipeline::export_parsed(root, &output).unwrap();

    let parsed: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let z23 = parsed["Z23"].as_array().unwrap();
    // base skills come from the last group: 1000 and 1001
    assert_eq!(z23[0]["skillId"], json!(1000));
    assert_eq!(z23[0]["skillName"], json!("Full Barrage"));
    assert_eq!(z23[0]["barrageType"], json!("ship"));
    assert_eq!(z23[2]["skillId"], json!(1002));
    assert_eq!(z23[2]["barrageType"], json!("retrofit"));
    // 1001 has no skill entry and no barrage definition
    assert_eq!(z23[1]["skillName"], json!(null));
    assert_eq!(z23[1]["barrage"], json!(null));

    let equip = parsed["Twin 20mm (Type 99)"].as_array().unwrap();
    assert_eq!(equip[0]["barrageType"], json!("equip"));

    let augment = parsed["Kagero's Blade"].as_array().unwrap();
    assert_eq!(augment[0]["barrageType"], json!("augment"));
}
