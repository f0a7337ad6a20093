//! Verbose artifact encoding.
//!
//! The verbose document carries the records with every field named, and is
//! pretty-printed with tab indentation for human inspection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compile::{CollectionCounts, EmojiData, GridSize};
use crate::error::{EmojiError, Result};
use crate::types::EmojiRecord;

use super::SCHEMA_VERSION;

/// The verbose artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerboseDocument {
    #[serde(rename = "v")]
    pub version: u32,
    pub notos: usize,
    pub blobs: usize,
    pub twemojis: usize,
    pub openmojis: usize,
    pub categories: Value,
    #[serde(rename = "emoji")]
    pub records: Vec<EmojiRecord>,
}

pub fn encode(data: &EmojiData) -> VerboseDocument {
    VerboseDocument {
        version: SCHEMA_VERSION,
        notos: data.counts.noto,
        blobs: data.counts.blob,
        twemojis: data.counts.twemoji,
        openmojis: data.counts.openmoji,
        categories: data.categories.clone(),
        records: data.records.clone(),
    }
}

pub fn decode(doc: VerboseDocument) -> EmojiData {
    let items = doc.records.iter().map(|r| 1 + r.variants.len()).sum();

    EmojiData {
        grid: GridSize::for_count(items),
        counts: CollectionCounts {
            noto: doc.notos,
            blob: doc.blobs,
            twemoji: doc.twemojis,
            openmoji: doc.openmojis,
        },
        categories: doc.categories,
        records: doc.records,
    }
}

/// Serialize with tab indentation.
pub fn to_pretty_string(doc: &VerboseDocument) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser).map_err(|e| EmojiError::Build {
        message: format!("Failed to serialize emoji data: {}", e),
        help: None,
    })?;
    into_text(buf)
}

fn into_text(buf: Vec<u8>) -> Result<String> {
    String::from_utf8(buf).map_err(|e| EmojiError::Build {
        message: format!("Serialized emoji data is not valid UTF-8: {}", e),
        help: None,
    })
}
