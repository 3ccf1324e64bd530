//! Whole-document cleaning

use crate::classifier::{DropReason, LineClassifier, LineDecision};
use crate::region::RegionConfig;
use crate::spec::CleaningSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size and classification counters for one cleaned document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    /// Characters in the input document
    pub input_chars: usize,
    /// Characters in the cleaned document
    pub output_chars: usize,
    /// Lines in the input document
    pub input_lines: usize,
    /// Lines kept in the output
    pub kept_lines: usize,
    /// Dropped line counts keyed by reason
    pub dropped: BTreeMap<DropReason, usize>,
    /// 1-based line on which the back-matter gate stopped processing
    pub stopped_at_line: Option<usize>,
}

impl CleaningStats {
    fn record_drop(&mut self, reason: DropReason) {
        *self.dropped.entry(reason).or_default() += 1;
    }

    /// Number of lines dropped for `reason`
    pub fn dropped_for(&self, reason: DropReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }

    /// Fraction of the input characters that survived, in `0.0..=1.0`
    pub fn retention_ratio(&self) -> f64 {
        if self.input_chars == 0 {
            1.0
        } else {
            self.output_chars as f64 / self.input_chars as f64
        }
    }
}

/// A cleaned document with its statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedDocument {
    pub text: String,
    pub stats: CleaningStats,
}

/// Cleans documents with a fixed [`RegionConfig`]
///
/// Holds no per-document state, so one processor can clean any number of
/// documents, including concurrently.
#[derive(Debug, Clone, Default)]
pub struct DocumentProcessor {
    config: RegionConfig,
}

impl DocumentProcessor {
    pub fn new(config: RegionConfig) -> Self {
        Self { config }
    }

    /// Compile a specification and wrap it in a processor
    pub fn from_spec(spec: &CleaningSpec) -> Self {
        Self::new(RegionConfig::from_spec(spec))
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// Clean a document, returning only the text
    pub fn process(&self, document: &str) -> String {
        self.process_with_stats(document).text
    }

    /// Clean a document and collect statistics
    ///
    /// Lines are split on `\n` (a preceding `\r` is dropped with it) and the
    /// kept lines are joined with `\n`, without a trailing newline.
    pub fn process_with_stats(&self, document: &str) -> CleanedDocument {
        let mut classifier = LineClassifier::new(&self.config);
        let mut stats = CleaningStats {
            input_chars: document.chars().count(),
            ..CleaningStats::default()
        };
        let mut kept: Vec<&str> = Vec::new();

        for (index, line) in document.lines().enumerate() {
            stats.input_lines += 1;
            match classifier.classify(line) {
                LineDecision::Keep => kept.push(line),
                LineDecision::Drop(reason) => stats.record_drop(reason),
                LineDecision::Stop => {
                    stats.stopped_at_line = Some(index + 1);
                    stats.input_lines += document.lines().skip(index + 1).count();
                    break;
                }
            }
        }

        let text = kept.join("\n");
        stats.kept_lines = kept.len();
        stats.output_chars = text.chars().count();

        log::info!(
            "Original document length: {}, processed document length: {}",
            stats.input_chars,
            stats.output_chars
        );

        CleanedDocument { text, stats }
    }
}

/// Clean `document` with `spec` in one call
pub fn clean(document: &str, spec: &CleaningSpec) -> String {
    DocumentProcessor::from_spec(spec).process(document)
}
