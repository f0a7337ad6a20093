//! Emoji record types.
//!
//! `SourceEmoji` / `SourceSkin` mirror the emojibase dataset as read from
//! disk. `EmojiRecord` / `VariantRecord` are the compiled, fully populated
//! records that both artifacts are encoded from.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A base emoji as it appears in the source dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceEmoji {
    pub hexcode: String,
    #[serde(default)]
    pub group: Option<u32>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub shortcodes: Vec<String>,
    #[serde(default, rename = "type")]
    pub kind: u32,
    #[serde(default)]
    pub skins: Vec<SourceSkin>,
}

/// A skin-tone variant as it appears in the source dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceSkin {
    pub hexcode: String,
    #[serde(default)]
    pub tone: Value,
    #[serde(default, rename = "type")]
    pub kind: u32,
    #[serde(default)]
    pub shortcodes: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SourceEmoji {
    /// Number of grid cells this emoji occupies (itself plus every skin).
    pub fn cell_count(&self) -> usize {
        1 + self.skins.len()
    }
}

/// A `(column, row)` cell in the sprite grid.
///
/// Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Position {
    pub col: u32,
    pub row: u32,
}

impl Position {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl From<(u32, u32)> for Position {
    fn from((col, row): (u32, u32)) -> Self {
        Self { col, row }
    }
}

impl From<Position> for (u32, u32) {
    fn from(pos: Position) -> Self {
        (pos.col, pos.row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Presence of an emoji's image in each of the four art collections.
///
/// Bit order from most to least significant: Noto, Blobmoji, Twemoji, OpenMoji.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability(u8);

impl Availability {
    pub const NONE: Availability = Availability(0);
    pub const NOTO: Availability = Availability(0b1000);
    pub const BLOB: Availability = Availability(0b0100);
    pub const TWEMOJI: Availability = Availability(0b0010);
    pub const OPENMOJI: Availability = Availability(0b0001);
    pub const ALL: Availability = Availability(0b1111);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Availability) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Availability) {
        self.0 |= other.0;
    }

    /// True when no bits outside the four collections are set.
    pub fn is_valid(self) -> bool {
        self.0 & !Self::ALL.0 == 0
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06b}", self.0)
    }
}

/// A compiled base emoji.
///
/// Field order matches the verbose artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiRecord {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Only present when it cannot be rebuilt from the canonical shortcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "codes")]
    pub shortcodes: Vec<String>,
    #[serde(rename = "type")]
    pub kind: u32,
    #[serde(rename = "pos")]
    pub position: Position,
    #[serde(rename = "images")]
    pub availability: Availability,
    #[serde(
        rename = "versions",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub variants: Vec<VariantRecord>,
}

impl EmojiRecord {
    /// The canonical (first) shortcode.
    pub fn canonical(&self) -> &str {
        self.shortcodes.first().map(String::as_str).unwrap_or("")
    }

    /// The display name, rebuilt from the canonical shortcode when suppressed.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => name_from_shortcode(self.canonical()),
        }
    }
}

/// A compiled skin-tone variant, owned by its parent `EmojiRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub key: String,
    #[serde(rename = "pos")]
    pub position: Position,
    #[serde(rename = "images")]
    pub availability: Availability,
    #[serde(default)]
    pub tone: Value,
    #[serde(rename = "codes")]
    pub shortcodes: Vec<String>,
    #[serde(rename = "type")]
    pub kind: u32,
}

/// `party_parrot` → `PARTY PARROT`.
pub fn name_from_shortcode(code: &str) -> String {
    code.to_uppercase().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_serializes_as_pair() {
        let pos = Position::new(3, 7);
        assert_eq!(serde_json::to_value(pos).unwrap(), json!([3, 7]));
        let back: Position = serde_json::from_value(json!([3, 7])).unwrap();
        assert_eq!(back, pos);
    }

    #[test]
    fn test_availability_bits() {
        let mut mask = Availability::NONE;
        mask.insert(Availability::NOTO);
        mask.insert(Availability::TWEMOJI);
        assert_eq!(mask.bits(), 0b1010);
        assert!(mask.contains(Availability::NOTO));
        assert!(!mask.contains(Availability::BLOB));
        assert_eq!(mask.to_string(), "0b1010");
        assert!(!Availability::from_bits(0b1_0000).is_valid());
    }

    #[test]
    fn test_source_emoji_defaults() {
        let emoji: SourceEmoji =
            serde_json::from_value(json!({"hexcode": "1F600", "annotation": "grinning"})).unwrap();
        assert_eq!(emoji.group, None);
        assert!(emoji.shortcodes.is_empty());
        assert!(emoji.skins.is_empty());
        assert_eq!(emoji.cell_count(), 1);
    }

    #[test]
    fn test_display_name_rebuilt_from_shortcode() {
        let record = EmojiRecord {
            key: "1f99c".to_string(),
            group: Some(0),
            order: Some(1),
            name: None,
            shortcodes: vec!["party_parrot".to_string()],
            kind: 1,
            position: Position::new(0, 0),
            availability: Availability::NONE,
            variants: vec![],
        };
        assert_eq!(record.display_name(), "PARTY PARROT");
    }

    #[test]
    fn test_verbose_record_omits_empty_fields() {
        let record = EmojiRecord {
            key: "1f600".to_string(),
            group: Some(0),
            order: Some(1),
            name: None,
            shortcodes: vec!["grinning".to_string()],
            kind: 1,
            position: Position::new(1, 0),
            availability: Availability::ALL,
            variants: vec![],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("name").is_none());
        assert!(value.get("versions").is_none());
        assert_eq!(value["images"], json!(15));
        assert_eq!(value["pos"], json!([1, 0]));
    }
}
