//! Image availability probing.
//!
//! Each art collection names its files after the emoji hexcode, but every
//! collection spells the hexcode its own way. A collection root is listed
//! once up front; probing a hexcode is then a set lookup per collection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::source::CollectionPaths;
use crate::types::Availability;

/// One of the four art collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Noto,
    Blob,
    Twemoji,
    OpenMoji,
}

impl Collection {
    /// All collections, most significant bit first.
    pub const ALL: [Collection; 4] = [
        Collection::Noto,
        Collection::Blob,
        Collection::Twemoji,
        Collection::OpenMoji,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Noto => "noto",
            Collection::Blob => "blobmoji",
            Collection::Twemoji => "twemoji",
            Collection::OpenMoji => "openmoji",
        }
    }

    pub fn bit(self) -> Availability {
        match self {
            Collection::Noto => Availability::NOTO,
            Collection::Blob => Availability::BLOB,
            Collection::Twemoji => Availability::TWEMOJI,
            Collection::OpenMoji => Availability::OPENMOJI,
        }
    }

    /// File name this collection uses for `hexcode`.
    pub fn file_name(self, hexcode: &str) -> String {
        match self {
            Collection::Noto | Collection::Blob => format!("emoji_u{}.png", noto_key(hexcode)),
            Collection::Twemoji => format!("{}.png", hexcode.to_lowercase()),
            Collection::OpenMoji => format!("{}.png", hexcode),
        }
    }
}

/// Noto's spelling of a hexcode.
///
/// Lower-cased, with the emoji presentation selector (`fe0f`) dropped when it
/// directly follows the first code point or ends the sequence, and `_` in
/// place of `-`. Selectors anywhere else are kept.
pub fn noto_key(hexcode: &str) -> String {
    let lower = hexcode.to_lowercase();
    let mut parts: Vec<&str> = lower.split('-').collect();

    if parts.len() > 1 && parts[1] == "fe0f" {
        parts.remove(1);
    }
    if parts.len() > 1 && parts.last() == Some(&"fe0f") {
        parts.pop();
    }

    parts.join("_")
}

/// File names present directly inside one collection root.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    files: HashSet<String>,
    errors: Vec<String>,
}

impl AssetIndex {
    /// List the files in `root`. A missing root yields an empty index.
    ///
    /// Entries that cannot be read are skipped and kept in `errors`.
    pub fn scan(root: &Path) -> Self {
        let mut index = Self::default();

        if !root.is_dir() {
            return index;
        }

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    index.errors.push(e.to_string());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                index.files.insert(name.to_string());
            }
        }

        index
    }

    /// Read errors hit while listing the root.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files.contains(file_name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Checks a hexcode against every collection.
#[derive(Debug, Clone, Default)]
pub struct Prober {
    indexes: [AssetIndex; 4],
    roots: [PathBuf; 4],
}

impl Prober {
    /// Index every collection root.
    pub fn scan(paths: &CollectionPaths) -> Self {
        let roots = [
            paths.noto.clone(),
            paths.blob.clone(),
            paths.twemoji.clone(),
            paths.openmoji.clone(),
        ];
        let indexes = [
            AssetIndex::scan(&roots[0]),
            AssetIndex::scan(&roots[1]),
            AssetIndex::scan(&roots[2]),
            AssetIndex::scan(&roots[3]),
        ];
        Self { indexes, roots }
    }

    pub fn index(&self, collection: Collection) -> &AssetIndex {
        &self.indexes[collection as usize]
    }

    pub fn root(&self, collection: Collection) -> &Path {
        &self.roots[collection as usize]
    }

    /// Which collections have an image for `hexcode`.
    pub fn probe(&self, hexcode: &str) -> Availability {
        let mut mask = Availability::NONE;
        for collection in Collection::ALL {
            if self.index(collection).contains(&collection.file_name(hexcode)) {
                mask.insert(collection.bit());
            }
        }
        mask
    }
}

/// How many records and variants each collection has an image for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCounts {
    pub noto: usize,
    pub blob: usize,
    pub twemoji: usize,
    pub openmoji: usize,
}

impl CollectionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record's mask.
    pub fn add(&mut self, mask: Availability) {
        for collection in Collection::ALL {
            if mask.contains(collection.bit()) {
                *self.get_mut(collection) += 1;
            }
        }
    }

    pub fn get(&self, collection: Collection) -> usize {
        match collection {
            Collection::Noto => self.noto,
            Collection::Blob => self.blob,
            Collection::Twemoji => self.twemoji,
            Collection::OpenMoji => self.openmoji,
        }
    }

    fn get_mut(&mut self, collection: Collection) -> &mut usize {
        match collection {
            Collection::Noto => &mut self.noto,
            Collection::Blob => &mut self.blob,
            Collection::Twemoji => &mut self.twemoji,
            Collection::OpenMoji => &mut self.openmoji,
        }
    }
}
