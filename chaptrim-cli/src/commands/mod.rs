//! CLI command implementations

use clap::Subcommand;

pub mod clean;
pub mod generate_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clean text documents with a cleaning config
    Clean(clean::CleanArgs),

    /// Check a cleaning config and show how each pattern will be matched
    Validate(validate::ValidateArgs),

    /// Write an editable cleaning config template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Clean(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

impl ListCommands {
    fn execute(&self) {
        match self {
            ListCommands::Formats => {
                println!("Available output formats:");
                for format in clean::OutputFormat::ALL {
                    println!("  {:<6} {}", format.name(), format.description());
                }
            }
        }
    }
}
