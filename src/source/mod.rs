//! Project discovery and source loading.
//!
//! A project is a directory with an optional `emojidata.yaml` manifest.
//! Without a manifest every input is looked up at its conventional path.
//!
//! # Example
//!
//! ```ignore
//! use emojidata::source::discover;
//!
//! let project = discover(".")?;
//! let sources = project.load()?;
//! println!("Loaded {} emoji", sources.emoji.len());
//! ```

mod loader;
mod manifest;
mod regional;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use loader::{
    load_categories, load_dataset, load_overrides, load_sources, parse_categories, parse_dataset,
    parse_overrides, Overrides, Sources,
};
pub use manifest::{CollectionPaths, Manifest, OutputPaths};
pub use regional::{
    regional_indicators, REGIONAL_INDICATOR_BASE, REGIONAL_INDICATOR_GROUP,
    REGIONAL_INDICATOR_ORDER,
};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "emojidata.yaml";

/// A located project with its manifest paths resolved.
#[derive(Debug, Clone)]
pub struct Project {
    /// The project root directory.
    pub root: PathBuf,

    /// The manifest with every path resolved against `root`.
    pub manifest: Manifest,

    /// Whether an emojidata.yaml manifest was found.
    pub has_manifest: bool,
}

impl Project {
    /// Load every source the manifest names.
    pub fn load(&self) -> Result<Sources> {
        load_sources(&self.manifest)
    }
}

/// Locate the project in `root`.
///
/// Uses `root/emojidata.yaml` when present, the default manifest otherwise.
pub fn discover(root: impl AsRef<Path>) -> Result<Project> {
    let root = root.as_ref().to_path_buf();
    let manifest_path = root.join(MANIFEST_FILENAME);

    if manifest_path.exists() {
        discover_manifest(&manifest_path)
    } else {
        Ok(Project {
            manifest: Manifest::default().resolve(&root),
            root,
            has_manifest: false,
        })
    }
}

/// Open a project from an explicit manifest file.
///
/// Paths inside the manifest resolve against the manifest's directory.
pub fn discover_manifest(manifest_path: &Path) -> Result<Project> {
    let root = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let manifest = Manifest::load(manifest_path)?.resolve(&root);

    Ok(Project {
        root,
        manifest,
        has_manifest: true,
    })
}
