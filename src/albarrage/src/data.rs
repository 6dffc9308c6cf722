//! Typed models for the AzurLaneData export tables and JSON file I/O.
//!
//! The game exports are loosely shaped: most fields are optional, skill
//! group lists can contain nulls, and barrage parts are a union type where
//! only weapon-like parts carry `damage`/`count`. The models here keep the
//! fields the pipeline reads as typed optionals and preserve everything
//! else through flattened maps so output stays lossless.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors from loading, saving, or reshaping the data tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: String, source: io::Error },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize data for {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },

    #[error("catalog key {key:?} is not a skill id")]
    SkillKey { key: String },
}

// ============================================================================
// Input tables
// ============================================================================

/// Ship id -> ship record, as exported in `ships.json`.
pub type ShipTable = HashMap<String, Ship>;
/// Equipment id -> equipment record, as exported in `equipments.json`.
pub type EquipmentTable = HashMap<String, Equipment>;
/// Augment id -> augment record, as exported in `augments.json`.
pub type AugmentTable = HashMap<String, Augment>;
/// Skill id -> skill record, as exported in `skills.json`.
pub type SkillTable = HashMap<String, Skill>;
/// Skill id -> barrage variants, as exported in `barrages.json`.
pub type BarrageTable = HashMap<String, Vec<BarrageVariant>>;
/// Skill id -> scraped variants carrying `targetting` codes.
pub type ScrapedTable = HashMap<String, Vec<ScrapedVariant>>;

#[derive(Debug, Clone, Deserialize)]
pub struct Ship {
    pub name: String,
    /// Skill id groups, one per limit-break stage. Entries may be null or
    /// otherwise non-array; consumers skip those.
    #[serde(default)]
    pub skills: Vec<Value>,
    #[serde(default)]
    pub retro: Option<Retrofit>,
    #[serde(default)]
    pub research: Option<Vec<ResearchLevel>>,
    #[serde(default)]
    pub unique_aug: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Retrofit {
    #[serde(default)]
    pub skills: Vec<SkillUpgrade>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchLevel {
    #[serde(default)]
    pub fate: Option<FateRewards>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FateRewards {
    #[serde(default)]
    pub skills: Vec<SkillUpgrade>,
}

/// A skill grant entry: `with` is the granted skill id, `replace` the id
/// it supersedes. Either may be absent or null.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillUpgrade {
    #[serde(default)]
    pub with: Option<i64>,
    #[serde(default)]
    pub replace: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Equipment {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Augment {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<i64>,
    #[serde(default)]
    pub skill_upgrades: Vec<SkillUpgrade>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<i64>,
}

// ============================================================================
// Barrage definitions
// ============================================================================

/// One named barrage variant with its ordered sub-components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrageVariant {
    pub name: String,
    pub parts: Vec<BarragePart>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One barrage sub-component. Summon-type parts have no `damage`/`count`,
/// so both stay optional JSON values; unknown fields ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarragePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aim_type: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A variant from the scraped targeting dataset. Structurally parallel to
/// [`BarrageVariant`], but `parts` may be missing entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapedVariant {
    #[serde(default)]
    pub parts: Option<Vec<ScrapedPart>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapedPart {
    #[serde(default)]
    pub damage: Option<Value>,
    #[serde(default)]
    pub count: Option<Value>,
    #[serde(default)]
    pub targetting: Option<i64>,
}

// ============================================================================
// Enriched catalogs
// ============================================================================

/// Skill id string -> enriched entry. The ship catalog fills `ships`, the
/// equipment/augment catalog fills `equips`; one model round-trips both
/// files through the targeting patch.
pub type Catalog = BTreeMap<String, CatalogEntry>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub barrages: Vec<BarrageVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ships: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equips: Option<Vec<String>>,
}

// ============================================================================
// File I/O
// ============================================================================

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

/// Load and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path_string(path),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DataError::Parse {
        path: path_string(path),
        source,
    })
}

/// Serialize a value as indented, key-sorted JSON and write it out.
///
/// The value is routed through [`serde_json::to_value`] first: the default
/// `serde_json::Map` is BTreeMap-backed, so every object level is re-sorted
/// lexically. Output is 2-space indented with non-ASCII left unescaped,
/// which keeps the files diffable across runs.
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), DataError> {
    let path = path.as_ref();
    let value = serde_json::to_value(value).map_err(|source| DataError::Serialize {
        path: path_string(path),
        source,
    })?;
    let text = serde_json::to_string_pretty(&value).map_err(|source| DataError::Serialize {
        path: path_string(path),
        source,
    })?;
    fs::write(path, text).map_err(|source| DataError::Write {
        path: path_string(path),
        source,
    })
}

/// Write plain text (used for the rendered Lua modules).
pub fn write_text(path: impl AsRef<Path>, contents: &str) -> Result<(), DataError> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|source| DataError::Write {
        path: path_string(path),
        source,
    })
}
