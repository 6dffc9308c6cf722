//! Skill-grant aggregation.
//!
//! Builds the mapping from skill id to the ships or items that grant it,
//! then joins against the barrage table to produce the enriched catalogs.
//! Skill ids with no barrage definition are dropped silently; they are
//! buff-only skills with nothing to display.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::data::{
    AugmentTable, BarrageTable, BarrageVariant, Catalog, CatalogEntry, EquipmentTable, ShipTable,
};

/// Trailing parenthesized suffix, e.g. `"Twin 410mm (Anti-Air)"`.
static TRAILING_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(([^)]+)\)$").expect("valid regex"));

/// Move a trailing parenthesized suffix onto its own line.
///
/// Interior parentheses are left alone; only a suffix at the very end of
/// the name is rewritten, with its content preserved verbatim.
pub fn break_name_suffix(name: &str) -> String {
    TRAILING_PAREN.replace(name, "\n($1)").into_owned()
}

/// Which name field the enriched entries carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    Ships,
    Equips,
}

/// Accumulates skill id -> set of granting entity names.
///
/// An explicit builder rather than ambient state: collectors construct one,
/// record every (skill id, name) association they find, and hand it to
/// [`build_catalog`].
#[derive(Debug, Default)]
pub struct GrantIndex {
    grants: BTreeMap<i64, BTreeSet<String>>,
}

impl GrantIndex {
    /// Record that `name` grants `skill_id`. Re-recording is a no-op, so an
    /// entity granting the same skill through several paths contributes its
    /// name once.
    pub fn record(&mut self, skill_id: i64, name: &str) {
        self.grants
            .entry(skill_id)
            .or_default()
            .insert(name.to_string());
    }

    /// Distinct skill ids seen, ascending.
    pub fn skill_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.grants.keys().copied()
    }

    /// Collect skill grants from every ship: base skill groups, retrofit
    /// grants, research fate grants, and the ship's unique augment's
    /// skill-upgrade grants (looked up in `augments`; skipped if absent).
    pub fn from_ships(ships: &ShipTable, augments: &AugmentTable) -> Self {
        let mut index = Self::default();
        for ship in ships.values() {
            for group in &ship.skills {
                // Groups may be null or non-array placeholders.
                let Some(ids) = group.as_array() else { continue };
                for id in ids.iter().filter_map(Value::as_i64) {
                    index.record(id, &ship.name);
                }
            }

            if let Some(retro) = &ship.retro {
                for upgrade in &retro.skills {
                    if let Some(id) = upgrade.with {
                        index.record(id, &ship.name);
                    }
                }
            }

            if let Some(research) = &ship.research {
                for level in research {
                    let Some(fate) = &level.fate else { continue };
                    for upgrade in &fate.skills {
                        if let Some(id) = upgrade.with {
                            index.record(id, &ship.name);
                        }
                    }
                }
            }

            if let Some(augment_id) = ship.unique_aug {
                if let Some(augment) = augments.get(&augment_id.to_string()) {
                    for upgrade in &augment.skill_upgrades {
                        if let Some(id) = upgrade.with {
                            index.record(id, &ship.name);
                        }
                    }
                }
            }
        }
        index
    }

    /// Collect skill grants from equipment and augment records. Only the
    /// flat `skills` lists count here; augment skill upgrades belong to the
    /// ship pass.
    pub fn from_items(equips: &EquipmentTable, augments: &AugmentTable) -> Self {
        let mut index = Self::default();
        for equip in equips.values() {
            for &id in &equip.skills {
                index.record(id, &equip.name);
            }
        }
        for augment in augments.values() {
            for &id in &augment.skills {
                index.record(id, &augment.name);
            }
        }
        index
    }
}

/// Join a grant index against the barrage table.
///
/// Every skill id with a barrage entry becomes a catalog entry carrying a
/// deep copy of its variants (names reformatted via [`break_name_suffix`])
/// and the sorted, deduplicated granting names under `field`. Skill ids
/// without a barrage entry are omitted.
pub fn build_catalog(index: &GrantIndex, barrages: &BarrageTable, field: NameField) -> Catalog {
    let mut catalog = Catalog::new();
    for (skill_id, names) in &index.grants {
        let key = skill_id.to_string();
        let Some(variants) = barrages.get(&key) else {
            continue;
        };

        let enriched: Vec<BarrageVariant> = variants
            .iter()
            .map(|variant| {
                let mut variant = variant.clone();
                variant.name = break_name_suffix(&variant.name);
                variant
            })
            .collect();

        let names: Vec<String> = names.iter().cloned().collect();
        let entry = match field {
            NameField::Ships => CatalogEntry {
                barrages: enriched,
                ships: Some(names),
                equips: None,
            },
            NameField::Equips => CatalogEntry {
                barrages: enriched,
                ships: None,
                equips: Some(names),
            },
        };
        catalog.insert(key, entry);
    }
    catalog
}
