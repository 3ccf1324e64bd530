//! chaptrim command-line entry point

use chaptrim_cli::commands::Commands;
use clap::Parser;

/// Remove front matter, back matter and noise from raw text documents
#[derive(Debug, Parser)]
#[command(name = "chaptrim", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
