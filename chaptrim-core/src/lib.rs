//! Pattern-driven document sanitizer
//!
//! Given a raw text document and a declarative [`CleaningSpec`], this crate
//! removes front matter, back matter, inline noise and nested skip regions
//! (exercises, footers, repeated boilerplate) while keeping the chapter text.
//!
//! # Architecture
//!
//! - **Pattern compiler** ([`pattern`]): raw pattern values become matchers;
//!   bad input degrades instead of failing
//! - **Region configuration** ([`region`]): the compiled, immutable rule set
//! - **Line classifier** ([`classifier`]): the per-line state machine
//! - **Document processor** ([`processor`]): runs the classifier over a
//!   document and joins the kept lines
//!
//! # Example
//!
//! ```rust
//! use chaptrim_core::{CleaningSpec, DocumentProcessor};
//!
//! let spec = CleaningSpec::builder()
//!     .before_first_chapter("^Chapter 1")
//!     .after_last_chapter("^Bibliography")
//!     .region("^Exercises", "^Chapter")
//!     .inline_pattern(r"^Page \d+$")
//!     .build();
//!
//! let processor = DocumentProcessor::from_spec(&spec);
//! let text = "Contents\nChapter 1\nBody.\nPage 3\nExercises\n1. Solve.\nChapter 2\nMore.\nBibliography\nSmith";
//!
//! assert_eq!(processor.process(text), "Chapter 1\nBody.\nChapter 2\nMore.");
//! ```

pub mod classifier;
pub mod error;
pub mod pattern;
pub mod processor;
pub mod region;
pub mod spec;

pub use classifier::{DropReason, LineClassifier, LineDecision, ProcessorState};
pub use error::{ConfigError, Result};
pub use pattern::{compile, CompiledMatcher, MatcherKind, PatternSpec};
pub use processor::{clean, CleanedDocument, CleaningStats, DocumentProcessor};
pub use region::{RegionConfig, RegionId, RegionPair};
pub use spec::{
    CleaningSpec, CleaningSpecBuilder, ConfigFormat, InlinePatternSpec, RegionSpec, RemovePatterns,
};
