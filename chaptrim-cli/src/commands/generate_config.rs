//! Generate config command implementation

use anyhow::{Context, Result};
use chaptrim_core::{CleaningSpec, ConfigFormat};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (.toml for TOML, anything else for JSON)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        let format = ConfigFormat::from_path(&self.output);
        println!("Generating cleaning config template...");
        println!("  Format: {}", format.extension());
        println!("  Output file: {}", self.output.display());

        let template = generate_template(format)?;

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the patterns to match your document's headings");
        println!("2. Validate your configuration:");
        println!("   chaptrim validate --config {}", self.output.display());
        println!("3. Use it for cleaning:");
        println!(
            "   chaptrim clean -i book.txt --config {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Template content for `format`
fn generate_template(format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => Ok(TOML_TEMPLATE.to_string()),
        ConfigFormat::Json => Ok(example_spec().render(ConfigFormat::Json)?),
    }
}

fn example_spec() -> CleaningSpec {
    CleaningSpec::builder()
        .before_first_chapter("^Chapter 1")
        .after_last_chapter("^(Bibliography|References)")
        .chapter_separator(r"^Chapter \d+")
        .region("^Exercises", "^Answers")
        .inline_pattern(r"^\d+$")
        .inline_pattern(r"^Figure \d+")
        .build()
}

const TOML_TEMPLATE: &str = r#"# Cleaning configuration
#
# Every pattern is a regular expression searched anywhere in a line (anchor
# with ^ and $). Text that is not a valid expression is matched literally.
# Remove a key to disable that rule.

[remove_patterns]
# Lines before the first match are dropped
before_first_chapter = "^Chapter 1"

# The first match and everything after it are dropped
after_last_chapter = "^(Bibliography|References)"

# Chapter headings; each one closes any open skip region
chapter_separator = "^Chapter \\d+"

# Skip regions: lines from `from` up to (not including) `to` are dropped.
# When several regions open on the same line, the first one wins.
[[remove_patterns.in_chapters]]
from = "^Exercises"
to = "^Answers"

# Lines matching any inline pattern are dropped
[[remove_patterns.inline_patterns]]
pattern = "^\\d+$"

[[remove_patterns.inline_patterns]]
pattern = "^Figure \\d+"
"#;
