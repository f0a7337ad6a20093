pub mod build;
pub mod completions;
pub mod init;
pub mod validate;

use clap::{Parser, Subcommand};

/// emojidata - Emoji metadata compiler
#[derive(Parser, Debug)]
#[command(name = "emojidata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile emoji.json and emoji-compact.json from the sources
    Build(build::BuildArgs),

    /// Check previously built artifacts
    Validate(validate::ValidateArgs),

    /// Initialize an emojidata project (generates emojidata.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
