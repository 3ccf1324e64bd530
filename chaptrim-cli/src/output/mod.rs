//! Output formatting module

use anyhow::Result;
use chaptrim_core::CleaningStats;

/// One cleaned document as handed to a formatter
#[derive(Debug, Clone, Copy)]
pub struct DocumentOutput<'a> {
    /// Source the document belongs to
    pub source_name: &'a str,
    /// Cleaned text, or `None` when it was written to a directory
    pub text: Option<&'a str>,
    pub stats: &'a CleaningStats,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single cleaned document
    fn format_document(&mut self, document: &DocumentOutput<'_>) -> Result<()>;

    /// Finalize output (e.g., write the JSON report)
    fn finish(&mut self, skipped: &[String]) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
