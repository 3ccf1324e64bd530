//! Validate command implementation

use anyhow::Result;
use chaptrim_core::{CleaningSpec, MatcherKind, PatternSpec};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the cleaning config to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating cleaning config: {}", self.config.display());

        let spec = match CleaningSpec::from_file(&self.config) {
            Ok(spec) => spec,
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                return Err(anyhow::anyhow!("Validation failed: {}", e));
            }
        };

        println!("✓ Configuration is valid!");
        let report = describe_spec(&spec);
        for line in &report.lines {
            println!("  {line}");
        }
        if !report.warnings.is_empty() {
            println!();
            println!("Warnings:");
            for warning in &report.warnings {
                println!("  ! {warning}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Report {
    lines: Vec<String>,
    warnings: Vec<String>,
}

/// Compile every pattern and describe how it will be matched
fn describe_spec(spec: &CleaningSpec) -> Report {
    let mut report = Report::default();
    if spec.is_empty() {
        report.lines.push("No patterns configured: only blank lines will be removed".to_string());
        return report;
    }

    for (field, pattern) in spec.remove_patterns.fields() {
        let matcher = pattern.compile();
        match matcher.pattern() {
            Some(text) => report.lines.push(format!("{field}: {} {text:?}", matcher.kind())),
            None => report.lines.push(format!("{field}: {}", matcher.kind())),
        }

        match (pattern, matcher.kind()) {
            (PatternSpec::Text(text), MatcherKind::Literal) => report.warnings.push(format!(
                "{field}: {text:?} is not a valid regular expression, matched as plain text"
            )),
            (PatternSpec::Other(value), _) => report
                .warnings
                .push(format!("{field}: non-string value {value} is ignored")),
            _ => {}
        }
    }
    report
}
