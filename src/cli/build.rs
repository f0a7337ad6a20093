//! Build command implementation.
//!
//! Loads the sources, runs the compile pass, validates the result and
//! writes both artifacts.

use std::path::PathBuf;

use clap::Args;

use crate::compile::{compile, Collection, EmojiData, GridSize, Prober};
use crate::emit::{write_artifacts, Artifacts};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::source::{discover, discover_manifest, Project};
use crate::validation::validate_data;

/// Compile emoji.json and emoji-compact.json from the sources
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Manifest to use instead of <path>/emojidata.yaml
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Directory to write both artifacts to
    #[arg(long, short)]
    pub out_dir: Option<PathBuf>,

    /// Leave out the regional indicator letters
    #[arg(long)]
    pub no_regional: bool,
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildOutput {
    pub data: EmojiData,
    pub artifacts: Artifacts,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<BuildOutput> {
    let mut project = open_project(&args)?;
    if let Some(dir) = &args.out_dir {
        project.manifest = project.manifest.with_output_dir(dir);
    }
    if args.no_regional {
        project.manifest.regional_indicators = false;
    }

    build_project(&project, printer)
}

fn open_project(args: &BuildArgs) -> Result<Project> {
    match &args.manifest {
        Some(path) => discover_manifest(path),
        None => discover(&args.path),
    }
}

/// Run every stage for a located project.
pub fn build_project(project: &Project, printer: &Printer) -> Result<BuildOutput> {
    let manifest = &project.manifest;

    printer.status("Loading", &display_path(&manifest.dataset));
    let sources = project.load()?;
    printer.diagnostics(&sources.warnings);

    let items: usize = sources.emoji.iter().map(|e| e.cell_count()).sum();
    printer.info(
        "Counted",
        &format!(
            "{} {}",
            plural(sources.emoji.len(), "emoji", "emoji"),
            printer.dim(&format!("({} with variants)", items))
        ),
    );
    let grid = GridSize::for_count(items);
    printer.info(
        "Packing",
        &format!("{}x{} {}", grid.cols, grid.rows, printer.dim(&format!("({} cells)", grid.cells()))),
    );

    let prober = Prober::scan(&manifest.collections);
    for collection in Collection::ALL {
        if let Some((verb, message)) = index_warning(&prober, collection) {
            printer.warning(verb, &message);
        }
    }

    let data = compile(&sources, &prober)?;

    let validation = validate_data(&data).into_result()?;
    printer.diagnostics(&validation);

    for collection in Collection::ALL {
        printer.info(
            "Probed",
            &format!("{} {}", collection.name(), data.counts.get(collection)),
        );
    }

    let artifacts = write_artifacts(&data, &manifest.output)?;
    printer.status("Writing", &printer.cyan(&display_path(&manifest.output.verbose)));
    printer.status("Writing", &printer.cyan(&display_path(&manifest.output.compact)));
    printer.status(
        "Finished",
        &format!(
            "{} and {}",
            plural(data.records.len(), "emoji", "emoji"),
            plural(data.variant_count(), "variant", "variants")
        ),
    );

    Ok(BuildOutput { data, artifacts })
}

/// Warning line for a collection that is empty or could not be fully read.
fn index_warning(prober: &Prober, collection: Collection) -> Option<(&'static str, String)> {
    let index = prober.index(collection);
    let root = display_path(prober.root(collection));
    let first_error = index.errors().first();

    match (index.is_empty(), first_error) {
        (true, None) => Some(("Missing", format!("no {} images in {}", collection.name(), root))),
        (true, Some(error)) => Some((
            "Missing",
            format!("no {} images in {}: {}", collection.name(), root, error),
        )),
        (false, Some(error)) => Some((
            "Skipped",
            format!(
                "{} in {}: {}",
                plural(index.errors().len(), "unreadable entry", "unreadable entries"),
                root,
                error
            ),
        )),
        (false, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{read_compact, read_verbose};
    use crate::source::Manifest;
    use crate::types::{Availability, Position};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const DATASET: &str = r#"[
        {"hexcode": "1F44B", "group": 1, "order": 150, "name": "WAVING HAND",
         "shortcodes": ["wave"], "type": 1,
         "skins": [
            {"hexcode": "1F44B-1F3FB", "tone": 1, "type": 1, "shortcodes": ["wave_tone1"]},
            {"hexcode": "1F44B-1F3FC", "tone": 2, "type": 1, "shortcodes": ["wave_tone2"]}
         ]}
    ]"#;

    fn write_project(root: &Path) {
        fs::create_dir_all(root.join("sources/emojibase")).unwrap();
        fs::write(root.join("sources/emojibase/data.json"), DATASET).unwrap();
        fs::write(
            root.join("sources/emojibase/groups.json"),
            r#"{"groups": {"1": "people-body"}}"#,
        )
        .unwrap();

        let images = [
            ("sources/noto/png/128", "emoji_u1f44b.png"),
            ("sources/blobmoji/png/128", "emoji_u1f44b.png"),
            ("sources/twemoji/assets/72x72", "1f44b.png"),
            ("sources/openmoji/color/72x72", "1F44B.png"),
        ];
        for (dir, file) in images {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join(file), b"").unwrap();
        }
    }

    fn args(root: &Path) -> BuildArgs {
        BuildArgs {
            path: root.to_path_buf(),
            manifest: None,
            out_dir: None,
            no_regional: true,
        }
    }

    #[test]
    fn test_build_single_emoji_with_variants() {
        let dir = tempdir().unwrap();
        write_project(dir.path());

        let output = run(args(dir.path()), &Printer::plain()).unwrap();

        let wave = &output.data.records[0];
        assert_eq!(wave.availability.bits(), 0b1111);
        assert_eq!(wave.variants[0].availability.bits(), 0b0000);
        assert_eq!(wave.variants[1].availability.bits(), 0b0000);
        assert_eq!(wave.variants[0].position, Position::new(0, 0));
        assert_eq!(wave.variants[1].position, Position::new(1, 0));
        assert_eq!(wave.position, Position::new(0, 1));
        assert_eq!(output.data.item_count(), 3);

        assert!(dir.path().join("emoji.json").exists());
        assert!(dir.path().join("emoji-compact.json").exists());
    }

    #[test]
    fn test_build_artifacts_agree() {
        let dir = tempdir().unwrap();
        write_project(dir.path());

        let output = run(
            BuildArgs {
                no_regional: false,
                ..args(dir.path())
            },
            &Printer::plain(),
        )
        .unwrap();

        let verbose = read_verbose(&dir.path().join("emoji.json")).unwrap();
        let compact = read_compact(&dir.path().join("emoji-compact.json")).unwrap();
        assert_eq!(verbose, compact);
        assert_eq!(verbose, output.data);
        assert_eq!(verbose.records.len(), 1 + 26);
    }

    #[test]
    fn test_build_regional_indicators_have_no_name() {
        let dir = tempdir().unwrap();
        write_project(dir.path());
        fs::create_dir_all(dir.path().join("sources/twemoji/assets/72x72")).unwrap();
        fs::write(dir.path().join("sources/twemoji/assets/72x72/1f1e6.png"), b"").unwrap();

        let output = run(
            BuildArgs {
                no_regional: false,
                ..args(dir.path())
            },
            &Printer::plain(),
        )
        .unwrap();

        let letter_a = &output.data.records[1];
        assert_eq!(letter_a.key, "1f1e6");
        assert_eq!(letter_a.name, None);
        assert_eq!(letter_a.shortcodes, vec!["regional_indicator_a"]);
        assert_eq!(letter_a.availability, Availability::TWEMOJI);
    }

    #[test]
    fn test_build_out_dir() {
        let dir = tempdir().unwrap();
        write_project(dir.path());
        let out = dir.path().join("dist");

        run(
            BuildArgs {
                out_dir: Some(out.clone()),
                ..args(dir.path())
            },
            &Printer::plain(),
        )
        .unwrap();

        let compact: Value =
            serde_json::from_str(&fs::read_to_string(out.join("emoji-compact.json")).unwrap())
                .unwrap();
        assert_eq!(compact["v"], 3);
        assert_eq!(compact["n"], 1);
        assert_eq!(compact["c"]["1"], "people-body");
        assert!(!dir.path().join("emoji.json").exists());
    }

    #[test]
    fn test_build_uses_extra_shortcodes() {
        let dir = tempdir().unwrap();
        write_project(dir.path());
        fs::write(
            dir.path().join("extra-shortcodes.json"),
            r#"{"1F44B": ["waving_hand", "wave"]}"#,
        )
        .unwrap();

        let output = run(args(dir.path()), &Printer::plain()).unwrap();
        assert_eq!(output.data.records[0].shortcodes, vec!["waving_hand", "wave"]);
        assert_eq!(output.data.records[0].name, None);
    }

    #[test]
    fn test_build_missing_dataset_writes_nothing() {
        let dir = tempdir().unwrap();
        write_project(dir.path());
        fs::remove_file(dir.path().join("sources/emojibase/data.json")).unwrap();

        assert!(run(args(dir.path()), &Printer::plain()).is_err());
        assert!(!dir.path().join("emoji.json").exists());
        assert!(!dir.path().join("emoji-compact.json").exists());
    }

    fn prober_for(root: &Path) -> Prober {
        Prober::scan(&Manifest::default().resolve(root).collections)
    }

    #[test]
    fn test_index_warning_for_empty_collection() {
        let dir = tempdir().unwrap();
        write_project(dir.path());
        fs::remove_file(dir.path().join("sources/twemoji/assets/72x72/1f44b.png")).unwrap();

        let prober = prober_for(dir.path());
        assert_eq!(index_warning(&prober, Collection::Noto), None);

        let (verb, message) = index_warning(&prober, Collection::Twemoji).unwrap();
        assert_eq!(verb, "Missing");
        assert!(message.starts_with("no twemoji images in "));
    }

    #[cfg(unix)]
    #[test]
    fn test_index_warning_reports_read_errors() {
        let dir = tempdir().unwrap();
        write_project(dir.path());
        let noto = dir.path().join("sources/noto/png/128");
        std::os::unix::fs::symlink(noto.join("gone.png"), noto.join("emoji_u1f600.png")).unwrap();

        let (verb, message) = index_warning(&prober_for(dir.path()), Collection::Noto).unwrap();
        assert_eq!(verb, "Skipped");
        assert!(message.starts_with("1 unreadable entry in "));
        assert!(message.contains("gone.png") || message.contains("emoji_u1f600.png"));
    }
}
