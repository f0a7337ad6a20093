//! Init command implementation.
//!
//! Writes an `emojidata.yaml` manifest listing the conventional source
//! locations, and reports which of them are already present.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{EmojiError, Result};
use crate::output::{display_path, Printer};
use crate::source::{Manifest, MANIFEST_FILENAME};

/// Initialize an emojidata project by generating emojidata.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing emojidata.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(EmojiError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let manifest = Manifest::default();
    let yaml = manifest.to_yaml()?;

    fs::write(&manifest_path, &yaml).map_err(|e| EmojiError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;
    printer.status("Created", &display_path(&manifest_path));

    let resolved = manifest.resolve(&args.path);
    let inputs = [
        ("dataset", &resolved.dataset),
        ("categories", &resolved.categories),
        ("shortcodes", &resolved.shortcodes),
        ("noto", &resolved.collections.noto),
        ("blobmoji", &resolved.collections.blob),
        ("twemoji", &resolved.collections.twemoji),
        ("openmoji", &resolved.collections.openmoji),
    ];
    for (label, path) in inputs {
        if !path.exists() {
            printer.warning("Missing", &format!("{} {}", label, printer.dim(&display_path(path))));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_default_manifest() {
        let dir = tempdir().unwrap();

        run(
            InitArgs {
                path: dir.path().to_path_buf(),
                force: false,
            },
            &Printer::plain(),
        )
        .unwrap();

        let written = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(written, Manifest::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "dataset: mine.json\n").unwrap();

        let result = run(
            InitArgs {
                path: dir.path().to_path_buf(),
                force: false,
            },
            &Printer::plain(),
        );
        assert!(result.is_err());

        let kept = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(kept, "dataset: mine.json\n");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "dataset: mine.json\n").unwrap();

        run(
            InitArgs {
                path: dir.path().to_path_buf(),
                force: true,
            },
            &Printer::plain(),
        )
        .unwrap();

        let written = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(written.dataset, PathBuf::from("sources/emojibase/data.json"));
    }
}
