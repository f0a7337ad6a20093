//! Artifact emission.
//!
//! Both artifacts are rendered in memory first and only then written, each
//! to a temporary sibling that is renamed into place. Existing artifacts are
//! moved aside to `*.bak` before the renames and moved back if either rename
//! fails, so a failed write leaves the previous pair on disk.

pub mod compact;
pub mod verbose;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::compile::EmojiData;
use crate::error::{EmojiError, Result};
use crate::source::OutputPaths;

pub use compact::{CompactDocument, CompactRecord, CompactVariant, OrZero, Shortcodes};
pub use verbose::VerboseDocument;

/// Schema version written to both artifacts. Readers reject anything else.
pub const SCHEMA_VERSION: u32 = 3;

/// Both artifacts, serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub verbose: String,
    pub compact: String,
}

/// Serialize compiled data into both artifact forms.
pub fn render(data: &EmojiData) -> Result<Artifacts> {
    let verbose = verbose::to_pretty_string(&verbose::encode(data))?;
    let compact = serde_json::to_string(&compact::encode(data)).map_err(|e| EmojiError::Build {
        message: format!("Failed to serialize compact emoji data: {}", e),
        help: None,
    })?;

    Ok(Artifacts { verbose, compact })
}

/// Render and write both artifacts.
pub fn write_artifacts(data: &EmojiData, paths: &OutputPaths) -> Result<Artifacts> {
    let artifacts = render(data)?;

    let staged = [
        (paths.verbose.as_path(), artifacts.verbose.as_str()),
        (paths.compact.as_path(), artifacts.compact.as_str()),
    ];

    let mut temps: Vec<(PathBuf, &Path)> = Vec::with_capacity(staged.len());
    for (path, content) in staged {
        match stage(path, content) {
            Ok(temp) => temps.push((temp, path)),
            Err(e) => {
                discard(&temps);
                return Err(e);
            }
        }
    }

    if let Err(e) = commit(&temps) {
        discard(&temps);
        return Err(e);
    }

    Ok(artifacts)
}

/// Read and decode a verbose artifact.
pub fn read_verbose(path: &Path) -> Result<EmojiData> {
    let value = read_versioned(path)?;
    let doc: VerboseDocument = serde_json::from_value(value).map_err(|e| EmojiError::Parse {
        message: format!("{}: invalid emoji data: {}", path.display(), e),
        help: None,
    })?;
    Ok(verbose::decode(doc))
}

/// Read and decode a compact artifact.
pub fn read_compact(path: &Path) -> Result<EmojiData> {
    let value = read_versioned(path)?;
    let doc: CompactDocument = serde_json::from_value(value).map_err(|e| EmojiError::Parse {
        message: format!("{}: invalid compact emoji data: {}", path.display(), e),
        help: None,
    })?;
    Ok(compact::decode(doc))
}

/// Parse a document and check its schema version before anything else.
fn read_versioned(path: &Path) -> Result<Value> {
    let source = fs::read_to_string(path).map_err(|e| EmojiError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read artifact: {}", e),
    })?;
    let value: Value = serde_json::from_str(&source).map_err(|e| EmojiError::Parse {
        message: format!("{}: {}", path.display(), e),
        help: None,
    })?;

    match value.get("v").and_then(Value::as_u64) {
        Some(v) if v == SCHEMA_VERSION as u64 => Ok(value),
        Some(v) => Err(EmojiError::Validation {
            message: format!(
                "{}: unsupported schema version {} (expected {})",
                path.display(),
                v,
                SCHEMA_VERSION
            ),
            help: Some("Rebuild the artifacts with this version of emojidata".to_string()),
        }),
        None => Err(EmojiError::Validation {
            message: format!("{}: missing schema version", path.display()),
            help: None,
        }),
    }
}

/// Write `content` next to `path` under a temporary name.
fn stage(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| EmojiError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    let temp = sibling(path, ".tmp");
    fs::write(&temp, content).map_err(|e| EmojiError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write artifact: {}", e),
    })?;
    Ok(temp)
}

/// Move every staged file into place, or none of them.
fn commit(temps: &[(PathBuf, &Path)]) -> Result<()> {
    let mut backups: Vec<(PathBuf, &Path)> = Vec::with_capacity(temps.len());
    for (_, path) in temps {
        if !path.is_file() {
            continue;
        }
        let backup = sibling(path, ".bak");
        if let Err(e) = fs::rename(path, &backup) {
            restore(&backups);
            return Err(write_error(path, e));
        }
        backups.push((backup, *path));
    }

    let mut placed: Vec<&Path> = Vec::with_capacity(temps.len());
    for (temp, path) in temps {
        if let Err(e) = fs::rename(temp, path) {
            for path in placed {
                let _ = fs::remove_file(path);
            }
            restore(&backups);
            return Err(write_error(path, e));
        }
        placed.push(*path);
    }

    for (backup, _) in &backups {
        let _ = fs::remove_file(backup);
    }
    Ok(())
}

fn restore(backups: &[(PathBuf, &Path)]) {
    for (backup, path) in backups {
        let _ = fs::rename(backup, path);
    }
}

fn discard(temps: &[(PathBuf, &Path)]) {
    for (temp, _) in temps {
        let _ = fs::remove_file(temp);
    }
}

/// `dir/emoji.json` → `dir/emoji.json<suffix>`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

fn write_error(path: &Path, e: std::io::Error) -> EmojiError {
    EmojiError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write artifact: {}", e),
    }
}
