//! Per-entity parsed-barrage index.
//!
//! Inverts the catalog view: instead of skill id -> granting names, this
//! builds entity name -> the skills it can fire, each joined with its
//! skill metadata and barrage definition and tagged with the grant source.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::{
    AugmentTable, BarrageTable, BarrageVariant, EquipmentTable, Ship, ShipTable, SkillTable,
};

/// Where a skill grant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantSource {
    Ship,
    Retrofit,
    Fate,
    Augment,
    Equip,
}

/// One skill of an entity, joined with its metadata and barrage definition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBarrage {
    pub skill_id: i64,
    pub skill_name: Option<String>,
    pub skill_type: i64,
    pub barrage_type: GrantSource,
    pub barrage: Option<Vec<BarrageVariant>>,
}

/// Skill ids tagged with their grant source, in first-seen order. A later
/// source for the same id overwrites the tag but keeps the position.
#[derive(Debug, Default)]
struct SourceMap {
    entries: Vec<(i64, GrantSource)>,
}

impl SourceMap {
    fn set(&mut self, skill_id: i64, source: GrantSource) {
        if let Some(entry) = self.entries.iter_mut().find(|(id, _)| *id == skill_id) {
            entry.1 = source;
        } else {
            self.entries.push((skill_id, source));
        }
    }
}

/// Base skill ids for a ship: group index 3 when present, else the last
/// group. Groups correspond to limit-break stages and may be null.
fn base_skill_ids(ship: &Ship) -> Vec<i64> {
    let group = if ship.skills.len() > 3 && ship.skills[3].is_array() {
        ship.skills.get(3)
    } else {
        ship.skills.last()
    };
    group
        .and_then(|g| g.as_array())
        .map(|ids| ids.iter().filter_map(serde_json::Value::as_i64).collect())
        .unwrap_or_default()
}

fn make_record(
    skill_id: i64,
    source: GrantSource,
    skills: &SkillTable,
    barrages: &BarrageTable,
) -> ParsedBarrage {
    let info = skills.get(&skill_id.to_string());
    ParsedBarrage {
        skill_id,
        skill_name: info.and_then(|s| s.name.clone()),
        skill_type: info.and_then(|s| s.kind).unwrap_or(0),
        barrage_type: source,
        barrage: barrages.get(&skill_id.to_string()).cloned(),
    }
}

fn ship_sources(ship: &Ship, augments: &AugmentTable) -> SourceMap {
    let mut sources = SourceMap::default();
    for skill_id in base_skill_ids(ship) {
        sources.set(skill_id, GrantSource::Ship);
    }

    if let Some(retro) = &ship.retro {
        for upgrade in &retro.skills {
            if let (Some(_), Some(with)) = (upgrade.replace, upgrade.with) {
                sources.set(with, GrantSource::Retrofit);
            }
        }
    }

    if let Some(research) = &ship.research {
        for level in research {
            let Some(fate) = &level.fate else { continue };
            for upgrade in &fate.skills {
                if let (Some(_), Some(with)) = (upgrade.replace, upgrade.with) {
                    sources.set(with, GrantSource::Fate);
                }
            }
        }
    }

    if let Some(augment_id) = ship.unique_aug {
        if let Some(augment) = augments.get(&augment_id.to_string()) {
            for &skill_id in &augment.skills {
                sources.set(skill_id, GrantSource::Augment);
            }
            for upgrade in &augment.skill_upgrades {
                if let (Some(_), Some(with)) = (upgrade.replace, upgrade.with) {
                    sources.set(with, GrantSource::Augment);
                }
            }
        }
    }

    sources
}

fn flat_records(
    skill_ids: &[i64],
    source: GrantSource,
    skills: &SkillTable,
    barrages: &BarrageTable,
) -> Vec<ParsedBarrage> {
    skill_ids
        .iter()
        .map(|&id| make_record(id, source, skills, barrages))
        .collect()
}

/// Build the full entity-name -> parsed-barrage mapping over ships,
/// equipment, and augments.
pub fn build_parsed_barrages(
    ships: &ShipTable,
    equips: &EquipmentTable,
    augments: &AugmentTable,
    skills: &SkillTable,
    barrages: &BarrageTable,
) -> BTreeMap<String, Vec<ParsedBarrage>> {
    let mut result = BTreeMap::new();

    for ship in ships.values() {
        let records: Vec<ParsedBarrage> = ship_sources(ship, augments)
            .entries
            .iter()
            .map(|&(id, source)| make_record(id, source, skills, barrages))
            .collect();
        result.insert(ship.name.clone(), records);
    }

    for equip in equips.values() {
        result.insert(
            equip.name.clone(),
            flat_records(&equip.skills, GrantSource::Equip, skills, barrages),
        );
    }

    for augment in augments.values() {
        result.insert(
            augment.name.clone(),
            flat_records(&augment.skills, GrantSource::Augment, skills, barrages),
        );
    }

    result
}
