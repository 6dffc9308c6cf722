//! The export pipeline: aggregate, patch targeting, render Lua.
//!
//! Stages run strictly in order and talk to each other only through the
//! files under `output/`; a failure partway leaves earlier stages' outputs
//! on disk and later ones unwritten. Paths are fixed relative to the given
//! root so output stays diffable run over run.

use std::fs;
use std::path::Path;

use crate::aggregate::{self, GrantIndex, NameField};
use crate::data::{
    self, AugmentTable, BarrageTable, Catalog, DataError, EquipmentTable, ScrapedTable, ShipTable,
    SkillTable,
};
use crate::lua;
use crate::parsed;
use crate::targeting;

pub const SHIPS_PATH: &str = "AzurLaneData/data/ships.json";
pub const BARRAGES_PATH: &str = "AzurLaneData/data/barrages.json";
pub const AUGMENTS_PATH: &str = "AzurLaneData/data/augments.json";
pub const EQUIPMENTS_PATH: &str = "AzurLaneData/data/equipments.json";
pub const SKILLS_PATH: &str = "AzurLaneData/data/skills.json";
/// Scraped targeting table, checked in next to the scraper that built it.
pub const SCRAPED_PATH: &str = "src/barrages3.json";

pub const OUTPUT_DIR: &str = "output";
pub const SHIP_CATALOG_PATH: &str = "output/barrages.json";
pub const ITEM_CATALOG_PATH: &str = "output/barrages2.json";
pub const SHIP_LUA_PATH: &str = "output/data.lua";
pub const ITEM_LUA_PATH: &str = "output/data2.lua";

/// Run all four stages from `root`.
pub fn run(root: &Path) -> Result<(), DataError> {
    let output_dir = root.join(OUTPUT_DIR);
    fs::create_dir_all(&output_dir).map_err(|source| DataError::CreateDir {
        path: output_dir.display().to_string(),
        source,
    })?;

    create_ship_catalog(root)?;
    create_item_catalog(root)?;
    apply_targeting(root)?;

    render_lua_module(root, SHIP_CATALOG_PATH, SHIP_LUA_PATH)?;
    render_lua_module(root, ITEM_CATALOG_PATH, ITEM_LUA_PATH)?;

    println!("All barrage data written successfully.");
    Ok(())
}

fn create_ship_catalog(root: &Path) -> Result<(), DataError> {
    println!("Creating ship barrages JSON...");

    let ships: ShipTable = data::load_json(root.join(SHIPS_PATH))?;
    let barrages: BarrageTable = data::load_json(root.join(BARRAGES_PATH))?;
    let augments: AugmentTable = data::load_json(root.join(AUGMENTS_PATH))?;

    let index = GrantIndex::from_ships(&ships, &augments);
    let catalog = aggregate::build_catalog(&index, &barrages, NameField::Ships);

    data::save_json(&catalog, root.join(SHIP_CATALOG_PATH))?;
    println!("{SHIP_CATALOG_PATH} written with {} entries.", catalog.len());
    Ok(())
}

fn create_item_catalog(root: &Path) -> Result<(), DataError> {
    println!("Creating equipment and augment barrages JSON...");

    let barrages: BarrageTable = data::load_json(root.join(BARRAGES_PATH))?;
    let augments: AugmentTable = data::load_json(root.join(AUGMENTS_PATH))?;
    let equips: EquipmentTable = data::load_json(root.join(EQUIPMENTS_PATH))?;

    let index = GrantIndex::from_items(&equips, &augments);
    let catalog = aggregate::build_catalog(&index, &barrages, NameField::Equips);

    data::save_json(&catalog, root.join(ITEM_CATALOG_PATH))?;
    println!("{ITEM_CATALOG_PATH} written with {} entries.", catalog.len());
    Ok(())
}

fn apply_targeting(root: &Path) -> Result<(), DataError> {
    println!("Applying targeting data...");

    let scraped: ScrapedTable = data::load_json(root.join(SCRAPED_PATH))?;

    for path in [SHIP_CATALOG_PATH, ITEM_CATALOG_PATH] {
        let full = root.join(path);
        let mut catalog: Catalog = data::load_json(&full)?;
        targeting::patch_catalog(&mut catalog, &scraped)?;
        data::save_json(&catalog, &full)?;
        println!("Patched targeting in {path}");
    }
    Ok(())
}

fn render_lua_module(root: &Path, input: &str, output: &str) -> Result<(), DataError> {
    let value: serde_json::Value = data::load_json(root.join(input))?;
    data::write_text(root.join(output), &lua::render_module(&value))?;
    println!("Lua module written to {output}");
    Ok(())
}

/// Build and write the per-entity parsed-barrage index (see [`parsed`]).
/// Inputs are read relative to `root`; `output` is used as given.
pub fn export_parsed(root: &Path, output: &Path) -> Result<(), DataError> {
    let ships: ShipTable = data::load_json(root.join(SHIPS_PATH))?;
    let equips: EquipmentTable = data::load_json(root.join(EQUIPMENTS_PATH))?;
    let augments: AugmentTable = data::load_json(root.join(AUGMENTS_PATH))?;
    let skills: SkillTable = data::load_json(root.join(SKILLS_PATH))?;
    let barrages: BarrageTable = data::load_json(root.join(BARRAGES_PATH))?;

    let index = parsed::build_parsed_barrages(&ships, &equips, &augments, &skills, &barrages);

    if let Some(dir) = output.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|source| DataError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
        }
    }
    data::save_json(&index, output)?;
    println!("Parsed barrage data written to {}", output.display());
    Ok(())
}
