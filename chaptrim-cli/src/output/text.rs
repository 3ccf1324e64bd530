//! Plain text output formatter

use super::{DocumentOutput, OutputFormatter};
use anyhow::Result;
use std::io::{self, Write};

/// Plain text formatter
///
/// Writes the cleaned text itself, or a one-line summary per document when
/// the text went to an output directory.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, document: &DocumentOutput<'_>) -> Result<()> {
        match document.text {
            Some(text) if text.is_empty() => {}
            Some(text) => writeln!(self.writer, "{text}")?,
            None => {
                let stats = document.stats;
                writeln!(
                    self.writer,
                    "{}: {} -> {} characters, {}/{} lines kept",
                    document.source_name,
                    stats.input_chars,
                    stats.output_chars,
                    stats.kept_lines,
                    stats.input_lines
                )?;
            }
        }
        Ok(())
    }

    fn finish(&mut self, _skipped: &[String]) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaptrim_core::CleaningStats;

    #[test]
    fn test_writes_cleaned_text() {
        let stats = CleaningStats::default();
        let mut formatter = TextFormatter::new(Vec::new());
        for text in ["Глава 1\nТекст.", "", "Глава 2"] {
            formatter
                .format_document(&DocumentOutput {
                    source_name: "book",
                    text: Some(text),
                    stats: &stats,
                })
                .unwrap();
        }
        formatter.finish(&[]).unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(output, "Глава 1\nТекст.\nГлава 2\n");
    }

    #[test]
    fn test_writes_summary_without_text() {
        let stats = CleaningStats {
            input_chars: 120,
            output_chars: 40,
            input_lines: 10,
            kept_lines: 3,
            ..CleaningStats::default()
        };
        let mut formatter = TextFormatter::new(Vec::new());
        formatter
            .format_document(&DocumentOutput {
                source_name: "finance",
                text: None,
                stats: &stats,
            })
            .unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(output, "finance: 120 -> 40 characters, 3/10 lines kept\n");
    }
}
