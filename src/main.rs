use clap::Parser;
use emojidata::cli::{Cli, Commands};
use emojidata::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => emojidata::cli::build::run(args, &printer).map(|_| ())?,
        Commands::Validate(args) => emojidata::cli::validate::run(args, &printer)?,
        Commands::Init(args) => emojidata::cli::init::run(args, &printer)?,
        Commands::Completions(args) => emojidata::cli::completions::run(args)?,
    }

    Ok(())
}
