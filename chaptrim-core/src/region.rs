//! Compiled region configuration

use crate::pattern::{compile, CompiledMatcher};
use crate::spec::CleaningSpec;
use std::fmt;

/// Index of a region pair inside [`RegionConfig::regions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A compiled skip region
#[derive(Debug, Clone, Default)]
pub struct RegionPair {
    /// Opens the region
    pub from: CompiledMatcher,
    /// Lets lines through again once the region is open
    pub to: CompiledMatcher,
}

/// Immutable bundle of matchers derived from a [`CleaningSpec`]
///
/// Cheap to build and `Send + Sync`, so one instance can be shared by every
/// worker cleaning documents of the same source.
#[derive(Debug, Clone, Default)]
pub struct RegionConfig {
    before_first_chapter: CompiledMatcher,
    after_last_chapter: CompiledMatcher,
    chapter_separator: CompiledMatcher,
    regions: Vec<RegionPair>,
    inline_patterns: Vec<CompiledMatcher>,
}

impl RegionConfig {
    /// Compile every pattern of a specification
    pub fn from_spec(spec: &CleaningSpec) -> Self {
        let patterns = &spec.remove_patterns;
        let config = Self {
            before_first_chapter: compile(&patterns.before_first_chapter),
            after_last_chapter: compile(&patterns.after_last_chapter),
            chapter_separator: compile(&patterns.chapter_separator),
            regions: patterns
                .in_chapters
                .iter()
                .map(|region| RegionPair {
                    from: compile(&region.from),
                    to: compile(&region.to),
                })
                .collect(),
            inline_patterns: patterns
                .inline_patterns
                .iter()
                .map(|entry| compile(entry.pattern()))
                .collect(),
        };
        log::debug!(
            "Compiled region config: {} region(s), {} inline pattern(s)",
            config.regions.len(),
            config.inline_patterns.len()
        );
        config
    }

    /// Front-matter gate
    pub fn before_first_chapter(&self) -> &CompiledMatcher {
        &self.before_first_chapter
    }

    /// Back-matter gate
    pub fn after_last_chapter(&self) -> &CompiledMatcher {
        &self.after_last_chapter
    }

    /// Chapter heading that resets the active region
    pub fn chapter_separator(&self) -> &CompiledMatcher {
        &self.chapter_separator
    }

    /// Skip regions in priority order
    pub fn regions(&self) -> &[RegionPair] {
        &self.regions
    }

    /// Look up a region by id
    pub fn region(&self, id: RegionId) -> Option<&RegionPair> {
        self.regions.get(id.0)
    }

    /// Per-line suppression matchers, in configuration order
    pub fn inline_patterns(&self) -> &[CompiledMatcher] {
        &self.inline_patterns
    }

    /// First region (in list order) whose `from` matcher fires on `line`
    pub fn find_region_start(&self, line: &str) -> Option<RegionId> {
        self.regions
            .iter()
            .position(|region| region.from.matches(line))
            .map(RegionId)
    }

    /// Whether any inline pattern fires on `line`
    pub fn matches_inline(&self, line: &str) -> bool {
        self.inline_patterns.iter().any(|matcher| matcher.matches(line))
    }
}

impl From<&CleaningSpec> for RegionConfig {
    fn from(spec: &CleaningSpec) -> Self {
        Self::from_spec(spec)
    }
}
