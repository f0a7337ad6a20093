//! Validate command implementation.
//!
//! Reads both artifacts back, checks their schema version, decodes the
//! compact form and compares it with the verbose one, then runs the same
//! invariant checks the build does.

use std::path::PathBuf;

use clap::Args;

use crate::emit::{read_compact, read_verbose};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::source::{discover, discover_manifest};
use crate::validation::{check_equivalent, validate_data, ValidationResult};

/// Check previously built artifacts
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Manifest to use instead of <path>/emojidata.yaml
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let project = match &args.manifest {
        Some(path) => discover_manifest(path)?,
        None => discover(&args.path)?,
    };
    let output = &project.manifest.output;

    printer.status("Reading", &display_path(&output.verbose));
    let verbose = read_verbose(&output.verbose)?;
    printer.status("Reading", &display_path(&output.compact));
    let compact = read_compact(&output.compact)?;

    let mut result = ValidationResult::new();
    result.merge(check_equivalent(&verbose, &compact));
    result.merge(validate_data(&verbose));

    printer.diagnostics(&result);
    let result = result.into_result()?;

    printer.status(
        "Valid",
        &format!(
            "{} and {} {}",
            plural(verbose.records.len(), "emoji", "emoji"),
            plural(verbose.variant_count(), "variant", "variants"),
            printer.dim(&plural(result.warning_count(), "warning", "warnings"))
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{CollectionCounts, EmojiData, GridSize};
    use crate::emit::write_artifacts;
    use crate::error::EmojiError;
    use crate::source::OutputPaths;
    use crate::types::{Availability, EmojiRecord, Position};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn data() -> EmojiData {
        EmojiData {
            grid: GridSize { cols: 1, rows: 1 },
            counts: CollectionCounts::new(),
            categories: json!({"0": "smileys-emotion"}),
            records: vec![EmojiRecord {
                key: "1f600".to_string(),
                group: Some(0),
                order: Some(1),
                name: None,
                shortcodes: vec!["grinning".to_string()],
                kind: 1,
                position: Position::new(0, 0),
                availability: Availability::NONE,
                variants: vec![],
            }],
        }
    }

    fn write(dir: &std::path::Path) -> OutputPaths {
        let paths = OutputPaths {
            verbose: dir.join("emoji.json"),
            compact: dir.join("emoji-compact.json"),
        };
        write_artifacts(&data(), &paths).unwrap();
        paths
    }

    fn args(dir: &std::path::Path) -> ValidateArgs {
        ValidateArgs {
            path: dir.to_path_buf(),
            manifest: None,
        }
    }

    #[test]
    fn test_validate_fresh_build() {
        let dir = tempdir().unwrap();
        write(dir.path());

        run(args(dir.path()), &Printer::plain()).unwrap();
    }

    #[test]
    fn test_validate_detects_mismatch() {
        let dir = tempdir().unwrap();
        let paths = write(dir.path());
        fs::write(
            &paths.compact,
            r#"{"v":3,"n":0,"b":0,"t":0,"o":0,"c":{"0":"smileys-emotion"},
                "e":[[0,1,"grin",0,"1f600",[0,0],0,0,1]]}"#,
        )
        .unwrap();

        let err = run(args(dir.path()), &Printer::plain()).unwrap_err();
        assert!(matches!(err, EmojiError::Validation { .. }));
    }

    #[test]
    fn test_validate_rejects_old_schema() {
        let dir = tempdir().unwrap();
        let paths = write(dir.path());
        fs::write(&paths.verbose, r#"{"v":2,"emoji":[]}"#).unwrap();

        let err = run(args(dir.path()), &Printer::plain()).unwrap_err();
        assert!(matches!(err, EmojiError::Validation { .. }));
    }

    #[test]
    fn test_validate_missing_artifacts() {
        let dir = tempdir().unwrap();
        assert!(run(args(dir.path()), &Printer::plain()).is_err());
    }
}
