//! Compact artifact encoding.
//!
//! Every record becomes a fixed-position tuple:
//!
//! ```text
//! [group, order, codes, name, key, [col, row], images, variants, type]
//! ```
//!
//! and every variant:
//!
//! ```text
//! [key, [col, row], images, tone, type, codes]
//! ```
//!
//! A single shortcode is written as a bare string instead of a one-element
//! list, and `0` stands in for an absent name or an empty variant list.
//! `decode` reverses all of this exactly.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::compile::{CollectionCounts, EmojiData, GridSize};
use crate::types::{Availability, EmojiRecord, Position, VariantRecord};

use super::SCHEMA_VERSION;

/// The compact artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactDocument {
    #[serde(rename = "v")]
    pub version: u32,
    #[serde(rename = "n")]
    pub notos: usize,
    #[serde(rename = "b")]
    pub blobs: usize,
    #[serde(rename = "t")]
    pub twemojis: usize,
    #[serde(rename = "o")]
    pub openmojis: usize,
    #[serde(rename = "c")]
    pub categories: Value,
    #[serde(rename = "e")]
    pub records: Vec<CompactRecord>,
}

/// `[group, order, codes, name, key, pos, images, variants, type]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactRecord(
    pub Option<u32>,
    pub Option<u32>,
    pub Shortcodes,
    pub OrZero<String>,
    pub String,
    pub Position,
    pub Availability,
    pub OrZero<Vec<CompactVariant>>,
    pub u32,
);

/// `[key, pos, images, tone, type, codes]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactVariant(
    pub String,
    pub Position,
    pub Availability,
    pub Value,
    pub u32,
    pub Shortcodes,
);

/// A shortcode list, collapsed to a bare string when it has one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shortcodes {
    One(String),
    Many(Vec<String>),
}

impl Shortcodes {
    pub fn collapse(codes: &[String]) -> Self {
        match codes {
            [only] => Shortcodes::One(only.clone()),
            _ => Shortcodes::Many(codes.to_vec()),
        }
    }

    pub fn expand(self) -> Vec<String> {
        match self {
            Shortcodes::One(code) => vec![code],
            Shortcodes::Many(codes) => codes,
        }
    }
}

/// A value, or the sentinel `0` when there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrZero<T> {
    Value(T),
    Zero(Zero),
}

impl<T> OrZero<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            OrZero::Value(value) => Some(value),
            OrZero::Zero(_) => None,
        }
    }
}

impl<T> From<Option<T>> for OrZero<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => OrZero::Value(value),
            None => OrZero::Zero(Zero),
        }
    }
}

/// The literal `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zero;

impl Serialize for Zero {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(0)
    }
}

impl<'de> Deserialize<'de> for Zero {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ZeroVisitor;

        impl Visitor<'_> for ZeroVisitor {
            type Value = Zero;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("the sentinel 0")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Zero, E> {
                if v == 0 {
                    Ok(Zero)
                } else {
                    Err(E::invalid_value(de::Unexpected::Unsigned(v), &self))
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Zero, E> {
                if v == 0 {
                    Ok(Zero)
                } else {
                    Err(E::invalid_value(de::Unexpected::Signed(v), &self))
                }
            }
        }

        deserializer.deserialize_u64(ZeroVisitor)
    }
}

/// Encode compiled data as a compact document.
pub fn encode(data: &EmojiData) -> CompactDocument {
    CompactDocument {
        version: SCHEMA_VERSION,
        notos: data.counts.noto,
        blobs: data.counts.blob,
        twemojis: data.counts.twemoji,
        openmojis: data.counts.openmoji,
        categories: data.categories.clone(),
        records: data.records.iter().map(encode_record).collect(),
    }
}

pub fn encode_record(record: &EmojiRecord) -> CompactRecord {
    let variants: Option<Vec<CompactVariant>> = if record.variants.is_empty() {
        None
    } else {
        Some(record.variants.iter().map(encode_variant).collect())
    };

    CompactRecord(
        record.group,
        record.order,
        Shortcodes::collapse(&record.shortcodes),
        record.name.clone().into(),
        record.key.clone(),
        record.position,
        record.availability,
        variants.into(),
        record.kind,
    )
}

pub fn encode_variant(variant: &VariantRecord) -> CompactVariant {
    CompactVariant(
        variant.key.clone(),
        variant.position,
        variant.availability,
        variant.tone.clone(),
        variant.kind,
        Shortcodes::collapse(&variant.shortcodes),
    )
}

/// Decode a compact document back into compiled data.
///
/// The grid size is not stored; it is recomputed from the item count.
pub fn decode(doc: CompactDocument) -> EmojiData {
    let records: Vec<EmojiRecord> = doc.records.into_iter().map(decode_record).collect();
    let items = records.iter().map(|r| 1 + r.variants.len()).sum();

    EmojiData {
        grid: GridSize::for_count(items),
        counts: CollectionCounts {
            noto: doc.notos,
            blob: doc.blobs,
            twemoji: doc.twemojis,
            openmoji: doc.openmojis,
        },
        categories: doc.categories,
        records,
    }
}

pub fn decode_record(record: CompactRecord) -> EmojiRecord {
    let CompactRecord(group, order, codes, name, key, position, availability, variants, kind) =
        record;

    EmojiRecord {
        key,
        group,
        order,
        name: name.into_option(),
        shortcodes: codes.expand(),
        kind,
        position,
        availability,
        variants: variants
            .into_option()
            .unwrap_or_default()
            .into_iter()
            .map(decode_variant)
            .collect(),
    }
}

pub fn decode_variant(variant: CompactVariant) -> VariantRecord {
    let CompactVariant(key, position, availability, tone, kind, codes) = variant;

    VariantRecord {
        key,
        position,
        availability,
        tone,
        shortcodes: codes.expand(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn wave() -> EmojiData {
        let variant = |key: &str, col, tone: u32, code: &str| VariantRecord {
            key: key.to_string(),
            position: Position::new(col, 0),
            availability: Availability::NONE,
            tone: json!(tone),
            shortcodes: vec![code.to_string()],
            kind: 1,
        };

        EmojiData {
            grid: GridSize { cols: 2, rows: 2 },
            counts: CollectionCounts {
                noto: 1,
                blob: 1,
                twemoji: 1,
                openmoji: 1,
            },
            categories: json!({"1": "people-body"}),
            records: vec![EmojiRecord {
                key: "1f44b".to_string(),
                group: Some(1),
                order: Some(150),
                name: None,
                shortcodes: vec!["waving_hand".to_string(), "wave".to_string()],
                kind: 1,
                position: Position::new(0, 1),
                availability: Availability::ALL,
                variants: vec![
                    variant("1f44b-1f3fb", 0, 1, "wave_tone1"),
                    variant("1f44b-1f3fc", 1, 2, "wave_tone2"),
                ],
            }],
        }
    }

    #[test]
    fn test_compact_wire_format() {
        let json = serde_json::to_string(&encode(&wave())).unwrap();
        insta::assert_snapshot!(json, @r#"{"v":3,"n":1,"b":1,"t":1,"o":1,"c":{"1":"people-body"},"e":[[1,150,["waving_hand","wave"],0,"1f44b",[0,1],15,[["1f44b-1f3fb",[0,0],0,1,1,"wave_tone1"],["1f44b-1f3fc",[1,0],0,2,1,"wave_tone2"]],1]]}"#);
    }

    #[test]
    fn test_single_shortcode_collapses() {
        assert_eq!(
            Shortcodes::collapse(&["grinning".to_string()]),
            Shortcodes::One("grinning".to_string())
        );
        assert_eq!(
            serde_json::to_value(Shortcodes::collapse(&["a".to_string(), "b".to_string()])).unwrap(),
            json!(["a", "b"])
        );
    }

    #[test]
    fn test_name_and_variant_sentinels() {
        let record = EmojiRecord {
            key: "1f99c".to_string(),
            group: Some(3),
            order: Some(5),
            name: Some("Parrot Dancing".to_string()),
            shortcodes: vec!["party_parrot".to_string()],
            kind: 1,
            position: Position::new(4, 2),
            availability: Availability::from_bits(0b1010),
            variants: vec![],
        };

        let value = serde_json::to_value(encode_record(&record)).unwrap();
        assert_eq!(
            value,
            json!([3, 5, "party_parrot", "Parrot Dancing", "1f99c", [4, 2], 10, 0, 1])
        );

        let suppressed = EmojiRecord {
            name: None,
            ..record
        };
        let value = serde_json::to_value(encode_record(&suppressed)).unwrap();
        assert_eq!(value[3], json!(0));
    }

    #[test]
    fn test_missing_group_is_null() {
        let record = EmojiRecord {
            key: "1f3fb".to_string(),
            group: None,
            order: None,
            name: None,
            shortcodes: vec!["tone1".to_string()],
            kind: 1,
            position: Position::new(0, 0),
            availability: Availability::NONE,
            variants: vec![],
        };
        let value = serde_json::to_value(encode_record(&record)).unwrap();
        assert_eq!(value[0], Value::Null);
        assert_eq!(value[1], Value::Null);
    }

    #[test]
    fn test_decode_restores_records() {
        let data = wave();
        let json = serde_json::to_string(&encode(&data)).unwrap();
        let doc: CompactDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(decode(doc), data);
    }

    #[test]
    fn test_decode_accepts_single_element_list() {
        let record: CompactRecord =
            serde_json::from_value(json!([0, 1, ["grinning"], 0, "1f600", [0, 0], 15, 0, 1]))
                .unwrap();
        assert_eq!(decode_record(record).shortcodes, vec!["grinning"]);
    }

    #[test]
    fn test_decode_rejects_nonzero_sentinel() {
        let result: Result<CompactRecord, _> =
            serde_json::from_value(json!([0, 1, "grinning", 0, "1f600", [0, 0], 15, 7, 1]));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_short_tuple() {
        let result: Result<CompactRecord, _> =
            serde_json::from_value(json!([0, 1, "grinning", 0, "1f600"]));
        assert!(result.is_err());
    }
}
