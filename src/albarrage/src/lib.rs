//! # albarrage
//!
//! Azur Lane barrage data tooling: turns the static game-data JSON exports
//! into enriched barrage catalogs and wiki-ready Lua data modules.
//!
//! This library provides functionality to:
//! - Aggregate which ships, equipment, and augments grant each skill
//! - Join skill grants against the barrage definition table
//! - Back-fill `aim_type` codes from a separately scraped dataset
//! - Render the resulting catalogs as Lua data modules
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> Result<(), albarrage::DataError> {
//! // Run the full export pipeline from the current directory:
//! // reads AzurLaneData/data/*.json, writes output/barrages*.json
//! // and output/data*.lua.
//! albarrage::pipeline::run(Path::new("."))?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod data;
pub mod lua;
pub mod parsed;
pub mod pipeline;
pub mod targeting;

// Re-export commonly used items
#[doc(inline)]
pub use aggregate::{break_name_suffix, build_catalog, GrantIndex, NameField};
#[doc(inline)]
pub use data::{
    Augment, BarragePart, BarrageVariant, Catalog, CatalogEntry, DataError, Equipment, Ship,
    SkillUpgrade,
};
#[doc(inline)]
pub use lua::{render_module, to_lua};
#[doc(inline)]
pub use parsed::{build_parsed_barrages, GrantSource, ParsedBarrage};
#[doc(inline)]
pub use targeting::{base_skill_id, patch_catalog};
