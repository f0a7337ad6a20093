//! emojidata - Emoji metadata compiler
//!
//! Compiles the emojibase dataset, extra shortcodes and the contents of four
//! emoji art collections into the `emoji.json` / `emoji-compact.json`
//! artifacts that sprite-sheet assembly and the other downstream tools read.

pub mod cli;
pub mod compile;
pub mod emit;
pub mod error;
pub mod output;
pub mod source;
pub mod types;
pub mod validation;

pub use compile::{
    compile, CollectionCounts, CompileContext, EmojiData, GridAllocator, GridSize, Prober,
};
pub use emit::{read_compact, read_verbose, render, write_artifacts, Artifacts, SCHEMA_VERSION};
pub use error::{EmojiError, Result};
pub use source::{discover, discover_manifest, load_sources, Manifest, Project, Sources};
pub use types::{Availability, EmojiRecord, Position, SourceEmoji, SourceSkin, VariantRecord};
pub use validation::{validate_data, Diagnostic, Severity, ValidationResult};
