//! Source loader - reads the dataset, categories and shortcode overrides.
//!
//! The dataset and category table are required; any problem with them is
//! fatal. The override file is optional and a broken one only produces a
//! warning.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{EmojiError, Result};
use crate::types::SourceEmoji;
use crate::validation::{Diagnostic, ValidationResult};

use super::manifest::Manifest;
use super::regional::regional_indicators;

/// Extra shortcodes keyed by source hexcode.
pub type Overrides = HashMap<String, Vec<String>>;

/// Everything the compile pass needs, read from disk.
#[derive(Debug, Clone)]
pub struct Sources {
    /// Dataset records followed by any synthetic records.
    pub emoji: Vec<SourceEmoji>,
    /// The category table, passed through untouched.
    pub categories: Value,
    pub overrides: Overrides,
    /// Recoverable problems found while loading.
    pub warnings: ValidationResult,
}

/// Load every source named by a (resolved) manifest.
pub fn load_sources(manifest: &Manifest) -> Result<Sources> {
    let mut emoji = load_dataset(&manifest.dataset)?;
    if manifest.regional_indicators {
        emoji.extend(regional_indicators());
    }
    check_unique_hexcodes(&emoji)?;

    let categories = load_categories(&manifest.categories)?;

    let mut warnings = ValidationResult::new();
    let overrides = match load_overrides(&manifest.shortcodes) {
        Ok(overrides) => overrides,
        Err(e) => {
            warnings.push(
                Diagnostic::warning(
                    "emojidata::load::shortcodes",
                    format!("Error loading extra shortcodes: {}", e),
                )
                .with_help("Continuing without extra shortcodes"),
            );
            Overrides::new()
        }
    };

    Ok(Sources {
        emoji,
        categories,
        overrides,
        warnings,
    })
}

/// Read the base emoji dataset.
pub fn load_dataset(path: &Path) -> Result<Vec<SourceEmoji>> {
    let source = read_file(path, "dataset")?;
    parse_dataset(&source).map_err(|e| match e {
        EmojiError::Parse { message, help } => EmojiError::Parse {
            message: format!("{}: {}", path.display(), message),
            help,
        },
        other => other,
    })
}

/// Parse the base emoji dataset from a JSON string.
pub fn parse_dataset(source: &str) -> Result<Vec<SourceEmoji>> {
    serde_json::from_str(source).map_err(|e| EmojiError::Parse {
        message: format!("Invalid emoji dataset: {}", e),
        help: Some("Expected an emojibase data.json array".to_string()),
    })
}

/// Read the category table (the `groups` member of emojibase's groups.json).
pub fn load_categories(path: &Path) -> Result<Value> {
    let source = read_file(path, "categories")?;
    parse_categories(&source)
}

pub fn parse_categories(source: &str) -> Result<Value> {
    let mut meta: Value = serde_json::from_str(source).map_err(|e| EmojiError::Parse {
        message: format!("Invalid category metadata: {}", e),
        help: None,
    })?;

    match meta.get_mut("groups") {
        Some(groups) => Ok(groups.take()),
        None => Err(EmojiError::Parse {
            message: "Category metadata has no 'groups' member".to_string(),
            help: Some("Expected emojibase meta/groups.json".to_string()),
        }),
    }
}

/// Read the extra shortcode map.
///
/// Entries whose value is not a list of strings are skipped.
pub fn load_overrides(path: &Path) -> Result<Overrides> {
    let source = read_file(path, "extra shortcodes")?;
    parse_overrides(&source)
}

pub fn parse_overrides(source: &str) -> Result<Overrides> {
    let raw: serde_json::Map<String, Value> =
        serde_json::from_str(source).map_err(|e| EmojiError::Parse {
            message: format!("Invalid extra shortcodes: {}", e),
            help: None,
        })?;

    let mut overrides = Overrides::with_capacity(raw.len());
    for (hexcode, value) in raw {
        if let Ok(codes) = serde_json::from_value::<Vec<String>>(value) {
            overrides.insert(hexcode, codes);
        }
    }
    Ok(overrides)
}

fn check_unique_hexcodes(emoji: &[SourceEmoji]) -> Result<()> {
    let mut seen = HashSet::new();
    let hexcodes = emoji
        .iter()
        .flat_map(|e| std::iter::once(&e.hexcode).chain(e.skins.iter().map(|s| &s.hexcode)));

    for hexcode in hexcodes {
        if !seen.insert(hexcode.to_lowercase()) {
            return Err(EmojiError::Parse {
                message: format!("Duplicate hexcode '{}' in emoji dataset", hexcode),
                help: Some("Every emoji and skin variant needs a distinct hexcode".to_string()),
            });
        }
    }
    Ok(())
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| EmojiError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read {}: {}", what, e),
    })
}
