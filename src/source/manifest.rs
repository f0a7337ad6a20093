//! Project manifest (emojidata.yaml) parsing.
//!
//! The manifest names every input the compiler reads and where both
//! artifacts are written. Relative paths resolve against the directory the
//! manifest lives in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EmojiError, Result};

/// Project manifest loaded from emojidata.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Base emoji dataset (emojibase `data.json`).
    pub dataset: PathBuf,

    /// Category metadata (emojibase `meta/groups.json`).
    pub categories: PathBuf,

    /// Optional map of extra shortcodes keyed by hexcode.
    pub shortcodes: PathBuf,

    /// Root directories of the four art collections.
    pub collections: CollectionPaths,

    /// Artifact locations.
    pub output: OutputPaths,

    /// Append the A-Z regional indicator records.
    pub regional_indicators: bool,
}

/// Root directories of the art collections that get probed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionPaths {
    pub noto: PathBuf,
    pub blob: PathBuf,
    pub twemoji: PathBuf,
    pub openmoji: PathBuf,
}

/// Where the verbose and compact artifacts go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub verbose: PathBuf,
    pub compact: PathBuf,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("sources/emojibase/data.json"),
            categories: PathBuf::from("sources/emojibase/groups.json"),
            shortcodes: PathBuf::from("extra-shortcodes.json"),
            collections: CollectionPaths::default(),
            output: OutputPaths::default(),
            regional_indicators: true,
        }
    }
}

impl Default for CollectionPaths {
    fn default() -> Self {
        Self {
            noto: PathBuf::from("sources/noto/png/128"),
            blob: PathBuf::from("sources/blobmoji/png/128"),
            twemoji: PathBuf::from("sources/twemoji/assets/72x72"),
            openmoji: PathBuf::from("sources/openmoji/color/72x72"),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            verbose: PathBuf::from("emoji.json"),
            compact: PathBuf::from("emoji-compact.json"),
        }
    }
}

impl Manifest {
    /// Load manifest from an emojidata.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EmojiError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| EmojiError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check emojidata.yaml syntax".to_string()),
        })
    }

    /// Render the manifest as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| EmojiError::Build {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Resolve every relative path against `root`.
    pub fn resolve(&self, root: &Path) -> Manifest {
        let join = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        };

        Manifest {
            dataset: join(&self.dataset),
            categories: join(&self.categories),
            shortcodes: join(&self.shortcodes),
            collections: CollectionPaths {
                noto: join(&self.collections.noto),
                blob: join(&self.collections.blob),
                twemoji: join(&self.collections.twemoji),
                openmoji: join(&self.collections.openmoji),
            },
            output: OutputPaths {
                verbose: join(&self.output.verbose),
                compact: join(&self.output.compact),
            },
            regional_indicators: self.regional_indicators,
        }
    }

    /// Move both artifacts into `dir`, keeping their file names.
    pub fn with_output_dir(mut self, dir: &Path) -> Manifest {
        let rehome = |p: &Path| match p.file_name() {
            Some(name) => dir.join(name),
            None => dir.to_path_buf(),
        };
        self.output.verbose = rehome(&self.output.verbose);
        self.output.compact = rehome(&self.output.compact);
        self
    }
}
