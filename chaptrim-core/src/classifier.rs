//! Per-line state machine
//!
//! Lines are classified strictly in document order. Each check below can end
//! the classification of the current line:
//!
//! 1. front-matter gate (`before_first_chapter`)
//! 2. back-matter gate (`after_last_chapter`), stops the whole document
//! 3. region reset (`chapter_separator`)
//! 4. suppression inside the active region until its `to` matches
//! 5. region entry (`in_chapters[..].from`)
//! 6. inline patterns
//! 7. blank lines

use crate::region::{RegionConfig, RegionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a line was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Before the first chapter
    FrontMatter,
    /// Inside an active skip region
    InRegion,
    /// The line that opened a skip region
    RegionStart,
    /// Matched an inline pattern
    Inline,
    /// Empty after trimming
    Blank,
}

impl DropReason {
    /// All reasons, in check order
    pub const ALL: [DropReason; 5] = [
        DropReason::FrontMatter,
        DropReason::InRegion,
        DropReason::RegionStart,
        DropReason::Inline,
        DropReason::Blank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::FrontMatter => "front_matter",
            DropReason::InRegion => "in_region",
            DropReason::RegionStart => "region_start",
            DropReason::Inline => "inline",
            DropReason::Blank => "blank",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDecision {
    /// Emit the line unchanged
    Keep,
    /// Discard the line and continue
    Drop(DropReason),
    /// Discard this line and every line after it
    Stop,
}

impl LineDecision {
    pub fn is_keep(&self) -> bool {
        matches!(self, LineDecision::Keep)
    }
}

/// Mutable per-document state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessorState {
    pub before_first_chapter_passed: bool,
    pub active_region: Option<RegionId>,
}

impl ProcessorState {
    /// Initial state for a document cleaned with `config`
    ///
    /// Without a `before_first_chapter` matcher there is no front matter, so
    /// the gate starts open.
    pub fn new(config: &RegionConfig) -> Self {
        Self {
            before_first_chapter_passed: !config.before_first_chapter().is_enabled(),
            active_region: None,
        }
    }
}

/// Classifies the lines of a single document
///
/// Owns the document's [`ProcessorState`]; create one per document.
#[derive(Debug)]
pub struct LineClassifier<'a> {
    config: &'a RegionConfig,
    state: ProcessorState,
    stopped: bool,
}

impl<'a> LineClassifier<'a> {
    pub fn new(config: &'a RegionConfig) -> Self {
        Self {
            config,
            state: ProcessorState::new(config),
            stopped: false,
        }
    }

    /// Current state
    pub fn state(&self) -> &ProcessorState {
        &self.state
    }

    /// Whether the back-matter gate has fired
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Classify the next line of the document
    ///
    /// Once [`LineDecision::Stop`] has been returned, every further line is
    /// reported as `Stop` as well.
    pub fn classify(&mut self, line: &str) -> LineDecision {
        if self.stopped {
            return LineDecision::Stop;
        }

        let config = self.config;

        if config.before_first_chapter().matches(line) {
            self.state.before_first_chapter_passed = true;
        }
        if !self.state.before_first_chapter_passed {
            return LineDecision::Drop(DropReason::FrontMatter);
        }

        if config.after_last_chapter().matches(line) {
            self.stopped = true;
            return LineDecision::Stop;
        }

        if config.chapter_separator().matches(line) {
            self.state.active_region = None;
        }

        // A `to` match only lets the line through; the region itself is
        // replaced by the entry scan below.
        if let Some(region) = self.state.active_region.and_then(|id| config.region(id)) {
            if !region.to.matches(line) {
                return LineDecision::Drop(DropReason::InRegion);
            }
        }

        self.state.active_region = config.find_region_start(line);
        if self.state.active_region.is_some() {
            return LineDecision::Drop(DropReason::RegionStart);
        }

        if config.matches_inline(line) {
            return LineDecision::Drop(DropReason::Inline);
        }

        if line.trim().is_empty() {
            return LineDecision::Drop(DropReason::Blank);
        }

        LineDecision::Keep
    }
}
