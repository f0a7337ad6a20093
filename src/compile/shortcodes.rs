//! Shortcode canonicalization.
//!
//! Extra shortcodes are merged into each record's own list, then the list is
//! ranked by edit distance to the record's name so the closest shortcode
//! comes first and becomes the canonical one.

use crate::types::name_from_shortcode;

/// Append every code from `extra` that is not already in `codes`.
///
/// Matching is exact and case-sensitive; first-seen order is kept. Duplicates
/// already present in `codes` are collapsed as well.
pub fn merge_overrides(codes: &[String], extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(codes.len() + extra.len());
    for code in codes.iter().chain(extra) {
        if !merged.contains(code) {
            merged.push(code.clone());
        }
    }
    merged
}

/// `Grinning Face` → `grinning_face`.
pub fn name_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Order `codes` by Levenshtein distance to `name`'s shortcode form.
///
/// The sort is stable: codes at the same distance keep their relative order.
pub fn rank_by_name(codes: Vec<String>, name: &str) -> Vec<String> {
    let target = name_key(name);
    let mut ranked: Vec<(usize, String)> = codes
        .into_iter()
        .map(|code| (strsim::levenshtein(&target, &code), code))
        .collect();
    ranked.sort_by_key(|(distance, _)| *distance);
    ranked.into_iter().map(|(_, code)| code).collect()
}

/// Merge overrides and rank, for one record or variant.
///
/// Ranking only happens when there is a choice to make and a name to rank
/// against.
pub fn canonicalize(codes: &[String], extra: Option<&[String]>, name: Option<&str>) -> Vec<String> {
    let merged = merge_overrides(codes, extra.unwrap_or(&[]));
    match name {
        Some(name) if merged.len() > 1 && !name.is_empty() => rank_by_name(merged, name),
        _ => merged,
    }
}

/// Drop `name` when it is exactly what the canonical shortcode spells.
pub fn suppress_name(name: Option<&str>, canonical: &str) -> Option<String> {
    match name {
        Some(name) if !name.is_empty() && name != name_from_shortcode(canonical) => {
            Some(name.to_string())
        }
        _ => None,
    }
}
