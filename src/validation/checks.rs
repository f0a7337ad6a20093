//! Validation checks for compiled emoji data.
//!
//! Each check takes `&EmojiData` and returns a `ValidationResult`.

use std::collections::{HashMap, HashSet};

use crate::compile::{CollectionCounts, EmojiData};
use crate::types::{Availability, Position};

use super::warning::{Diagnostic, ValidationResult};

/// Every key, parent or variant, paired with its position, shortcodes and mask.
fn items(data: &EmojiData) -> impl Iterator<Item = (&str, Position, &[String], Availability)> {
    data.records.iter().flat_map(|record| {
        record
            .variants
            .iter()
            .map(|v| (v.key.as_str(), v.position, v.shortcodes.as_slice(), v.availability))
            .chain(std::iter::once((
                record.key.as_str(),
                record.position,
                record.shortcodes.as_slice(),
                record.availability,
            )))
    })
}

/// Keys must be unique across records and variants.
pub fn check_unique_keys(data: &EmojiData) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();

    for (key, _, _, _) in items(data) {
        if !seen.insert(key) {
            result.push(
                Diagnostic::error("emojidata::validate::duplicate-key", "key is used more than once")
                    .for_key(key),
            );
        }
    }

    result
}

/// Positions must be unique and inside the grid.
pub fn check_positions(data: &EmojiData) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut owners: HashMap<Position, &str> = HashMap::new();

    for (key, pos, _, _) in items(data) {
        if !data.grid.contains(pos) {
            result.push(
                Diagnostic::error(
                    "emojidata::validate::out-of-grid",
                    format!(
                        "position {} is outside the {}x{} grid",
                        pos, data.grid.cols, data.grid.rows
                    ),
                )
                .for_key(key),
            );
        }
        if let Some(owner) = owners.insert(pos, key) {
            result.push(
                Diagnostic::error(
                    "emojidata::validate::duplicate-position",
                    format!("position {} is also used by {}", pos, owner),
                )
                .for_key(key),
            );
        }
    }

    result
}

/// Shortcode lists must be non-empty and free of duplicates.
pub fn check_shortcodes(data: &EmojiData) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (key, _, codes, _) in items(data) {
        if codes.is_empty() {
            result.push(
                Diagnostic::error("emojidata::validate::no-shortcodes", "has no shortcodes")
                    .for_key(key)
                    .with_help("Add a shortcode for it to the extra shortcodes file"),
            );
            continue;
        }

        let unique: HashSet<&String> = codes.iter().collect();
        if unique.len() != codes.len() {
            result.push(
                Diagnostic::error(
                    "emojidata::validate::duplicate-shortcode",
                    "lists the same shortcode more than once",
                )
                .for_key(key),
            );
        }
    }

    result
}

/// Masks may only use the four collection bits, and the collection totals
/// must agree with them.
pub fn check_availability(data: &EmojiData) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut counts = CollectionCounts::new();

    for (key, _, _, mask) in items(data) {
        if !mask.is_valid() {
            result.push(
                Diagnostic::error(
                    "emojidata::validate::bad-mask",
                    format!("image mask {} has unknown bits set", mask.bits()),
                )
                .for_key(key),
            );
        }
        counts.add(mask);
    }

    if counts != data.counts {
        result.push(Diagnostic::error(
            "emojidata::validate::counts",
            format!(
                "collection totals {:?} do not match the image masks {:?}",
                data.counts, counts
            ),
        ));
    }

    result
}

/// Two decodings of the same build must agree record for record.
pub fn check_equivalent(verbose: &EmojiData, compact: &EmojiData) -> ValidationResult {
    let mut result = ValidationResult::new();

    if verbose.records.len() != compact.records.len() {
        result.error(
            "emojidata::validate::mismatch",
            format!(
                "verbose artifact has {} emoji, compact artifact has {}",
                verbose.records.len(),
                compact.records.len()
            ),
        );
        return result;
    }

    if verbose.counts != compact.counts {
        result.error(
            "emojidata::validate::mismatch",
            "collection totals differ between artifacts",
        );
    }

    if verbose.categories != compact.categories {
        result.error(
            "emojidata::validate::mismatch",
            "category tables differ between artifacts",
        );
    }

    for (a, b) in verbose.records.iter().zip(&compact.records) {
        if a != b {
            result.push(
                Diagnostic::error(
                    "emojidata::validate::mismatch",
                    "record differs between verbose and compact artifacts",
                )
                .for_key(a.key.as_str()),
            );
        }
    }

    result
}
