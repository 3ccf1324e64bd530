//! JSON output formatter

use super::{DocumentOutput, OutputFormatter};
use anyhow::Result;
use chaptrim_core::CleaningStats;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - collects every document and writes one report
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    documents: Vec<DocumentData>,
}

/// Data structure for one document in the JSON report
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentData {
    pub source_name: String,
    /// Cleaned text, omitted when written to an output directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub stats: CleaningStats,
}

/// The complete JSON report
#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    pub documents: Vec<DocumentData>,
    /// Sources without a cleaning config
    pub skipped: Vec<String>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            documents: Vec::new(),
        }
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, document: &DocumentOutput<'_>) -> Result<()> {
        self.documents.push(DocumentData {
            source_name: document.source_name.to_string(),
            text: document.text.map(str::to_string),
            stats: document.stats.clone(),
        });
        Ok(())
    }

    fn finish(&mut self, skipped: &[String]) -> Result<()> {
        let report = Report {
            documents: std::mem::take(&mut self.documents),
            skipped: skipped.to_vec(),
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &report)?;
        } else {
            serde_json::to_writer(&mut self.writer, &report)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_structure() {
        let stats = CleaningStats {
            input_chars: 30,
            output_chars: 12,
            stopped_at_line: Some(4),
            ..CleaningStats::default()
        };
        let mut formatter = JsonFormatter::new(Vec::new(), false);
        formatter
            .format_document(&DocumentOutput {
                source_name: "book",
                text: Some("Глава 1"),
                stats: &stats,
            })
            .unwrap();
        formatter
            .format_document(&DocumentOutput {
                source_name: "other",
                text: None,
                stats: &stats,
            })
            .unwrap();
        formatter.finish(&["orphan".to_string()]).unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);

        let report: Report = serde_json::from_str(&output).unwrap();
        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.documents[0].text.as_deref(), Some("Глава 1"));
        assert_eq!(report.documents[0].stats, stats);
        assert!(report.documents[1].text.is_none());
        assert!(!output.contains("\"text\":null"));
        assert_eq!(report.skipped, vec!["orphan"]);
    }

    #[test]
    fn test_pretty_output() {
        let mut formatter = JsonFormatter::new(Vec::new(), true);
        formatter.finish(&[]).unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        assert!(output.lines().count() > 1);
        assert!(output.contains("\"documents\": []"));
    }
}
