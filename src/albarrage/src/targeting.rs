//! Back-fills `aim_type` on enriched catalogs from the scraped dataset.
//!
//! The two datasets share no part-level identifiers, so parts are matched
//! structurally: variants pair up by position (requiring an exact `parts`
//! length match), and parts within a paired variant match on equal
//! (damage, count). Duplicate (damage, count) pairs therefore always bind
//! to the first scraped part with those values; this is a known limitation
//! of the heuristic.

use serde_json::Value;

use crate::data::{Catalog, DataError, ScrapedTable, ScrapedVariant};

/// Skill id rounded down to the nearest multiple of 10, used as the
/// fallback lookup key when no exact scraped entry exists.
pub fn base_skill_id(skill_id: i64) -> i64 {
    skill_id / 10 * 10
}

/// Scraped variants for a skill: exact entry first, base-id entry if the
/// exact one is missing or empty.
fn scraped_variants(scraped: &ScrapedTable, skill_id: i64) -> &[ScrapedVariant] {
    let exact = scraped
        .get(&skill_id.to_string())
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    if !exact.is_empty() {
        return exact;
    }
    scraped
        .get(&base_skill_id(skill_id).to_string())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Numeric-aware equality for damage/count values: the source datasets come
/// from dynamic languages where `100 == 100.0`. Missing equals missing.
fn field_eq(a: &Option<Value>, b: &Option<Value>) -> bool {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => a == b,
            }
        }
        _ => a == b,
    }
}

/// Overwrite `aim_type` on every part of every positionally matched variant.
///
/// A variant is skipped entirely (parts untouched, keeping whatever
/// `aim_type` the input carried) when there is no scraped variant at its
/// position, or the scraped variant lacks `parts`, or the part counts
/// differ. Every part of a matched variant gets an `aim_type`: the matched
/// scraped part's `targetting`, or 0 when nothing matches.
pub fn patch_catalog(catalog: &mut Catalog, scraped: &ScrapedTable) -> Result<(), DataError> {
    for (key, entry) in catalog.iter_mut() {
        let skill_id: i64 = key
            .parse()
            .map_err(|_| DataError::SkillKey { key: key.clone() })?;
        let variants = scraped_variants(scraped, skill_id);

        for (variant, scraped_variant) in entry.barrages.iter_mut().zip(variants) {
            let Some(scraped_parts) = &scraped_variant.parts else {
                continue;
            };
            if scraped_parts.len() != variant.parts.len() {
                continue;
            }

            for part in &mut variant.parts {
                let matched = scraped_parts.iter().find(|scraped_part| {
                    field_eq(&scraped_part.damage, &part.damage)
                        && field_eq(&scraped_part.count, &part.count)
                });
                part.aim_type = Some(matched.and_then(|p| p.targetting).unwrap_or(0));
            }
        }
    }
    Ok(())
}
