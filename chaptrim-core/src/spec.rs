//! Declarative cleaning specification
//!
//! This is the schema of a source's metadata document (`meta.json` or
//! `meta.toml`). Only the `remove_patterns` section is interpreted; any other
//! top-level keys are ignored.
//!
//! ```json
//! {
//!   "remove_patterns": {
//!     "before_first_chapter": "^Глава 1",
//!     "after_last_chapter": "^Список литературы",
//!     "chapter_separator": "^Глава \\d+",
//!     "in_chapters": [{ "from": "^Задачи", "to": "^Глава" }],
//!     "inline_patterns": [{ "pattern": "Рис\\. \\d+" }]
//!   }
//! }
//! ```

use crate::error::{ConfigError, Result};
use crate::pattern::PatternSpec;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fs;
use std::path::Path;

/// Cleaning specification for one document source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningSpec {
    /// Line removal rules
    #[serde(default)]
    pub remove_patterns: RemovePatterns,
}

/// Line removal rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemovePatterns {
    /// First line of real content
    #[serde(default, skip_serializing_if = "PatternSpec::is_absent")]
    pub before_first_chapter: PatternSpec,

    /// Start of trailing material
    #[serde(default, skip_serializing_if = "PatternSpec::is_absent")]
    pub after_last_chapter: PatternSpec,

    /// Top-level chapter heading
    #[serde(default, skip_serializing_if = "PatternSpec::is_absent")]
    pub chapter_separator: PatternSpec,

    /// Skip regions inside chapters, in priority order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub in_chapters: Vec<RegionSpec>,

    /// Per-line suppression rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inline_patterns: Vec<InlinePatternSpec>,
}

impl RemovePatterns {
    /// Every pattern with its field path, in configuration order
    pub fn fields(&self) -> Vec<(String, &PatternSpec)> {
        let mut fields = vec![
            ("before_first_chapter".to_string(), &self.before_first_chapter),
            ("after_last_chapter".to_string(), &self.after_last_chapter),
            ("chapter_separator".to_string(), &self.chapter_separator),
        ];
        for (index, region) in self.in_chapters.iter().enumerate() {
            fields.push((format!("in_chapters[{index}].from"), &region.from));
            fields.push((format!("in_chapters[{index}].to"), &region.to));
        }
        for (index, entry) in self.inline_patterns.iter().enumerate() {
            fields.push((format!("inline_patterns[{index}]"), entry.pattern()));
        }
        fields
    }
}

/// A skip region opened by `from` and closed by `to`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    #[serde(default, skip_serializing_if = "PatternSpec::is_absent")]
    pub from: PatternSpec,
    #[serde(default, skip_serializing_if = "PatternSpec::is_absent")]
    pub to: PatternSpec,
}

impl RegionSpec {
    /// Create a region from two patterns
    pub fn new(from: impl Into<PatternSpec>, to: impl Into<PatternSpec>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// An inline pattern entry
///
/// Written either as `{ "pattern": "..." }` or as a bare value. An absent
/// pattern is always written as an empty table, since TOML has no null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InlinePatternSpec {
    /// `{ "pattern": ... }`
    Entry {
        #[serde(default)]
        pattern: PatternSpec,
    },
    /// Bare pattern value
    Bare(PatternSpec),
}

impl InlinePatternSpec {
    /// The pattern this entry carries
    pub fn pattern(&self) -> &PatternSpec {
        match self {
            InlinePatternSpec::Entry { pattern } | InlinePatternSpec::Bare(pattern) => pattern,
        }
    }
}

impl Serialize for InlinePatternSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            InlinePatternSpec::Bare(pattern) if !pattern.is_absent() => pattern.serialize(serializer),
            entry => {
                let pattern = entry.pattern();
                let mut map = serializer.serialize_map(None)?;
                if !pattern.is_absent() {
                    map.serialize_entry("pattern", pattern)?;
                }
                map.end()
            }
        }
    }
}

impl From<&str> for InlinePatternSpec {
    fn from(pattern: &str) -> Self {
        InlinePatternSpec::Entry {
            pattern: PatternSpec::text(pattern),
        }
    }
}

/// Serialization format of a specification file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
        }
    }
}

impl CleaningSpec {
    /// Create a builder
    pub fn builder() -> CleaningSpecBuilder {
        CleaningSpecBuilder::default()
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a document in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Json => Self::from_json_str(content),
            ConfigFormat::Toml => Self::from_toml_str(content),
        }
    }

    /// Load a specification file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, ConfigFormat::from_path(path))
    }

    /// Render in the given format
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ConfigFormat::Toml => Ok(toml::to_string_pretty(self)?),
        }
    }

    /// Write a specification file, choosing the format by extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.render(ConfigFormat::from_path(path))?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether no removal rule is configured
    pub fn is_empty(&self) -> bool {
        self.remove_patterns == RemovePatterns::default()
    }
}

/// Builder for [`CleaningSpec`]
#[derive(Debug, Default)]
pub struct CleaningSpecBuilder {
    patterns: RemovePatterns,
}

impl CleaningSpecBuilder {
    /// Set the first-content marker
    pub fn before_first_chapter(mut self, pattern: impl Into<PatternSpec>) -> Self {
        self.patterns.before_first_chapter = pattern.into();
        self
    }

    /// Set the trailing-material marker
    pub fn after_last_chapter(mut self, pattern: impl Into<PatternSpec>) -> Self {
        self.patterns.after_last_chapter = pattern.into();
        self
    }

    /// Set the chapter heading pattern
    pub fn chapter_separator(mut self, pattern: impl Into<PatternSpec>) -> Self {
        self.patterns.chapter_separator = pattern.into();
        self
    }

    /// Append a skip region
    pub fn region(mut self, from: impl Into<PatternSpec>, to: impl Into<PatternSpec>) -> Self {
        self.patterns.in_chapters.push(RegionSpec::new(from, to));
        self
    }

    /// Append an inline pattern
    pub fn inline_pattern(mut self, pattern: impl Into<PatternSpec>) -> Self {
        self.patterns.inline_patterns.push(InlinePatternSpec::Entry {
            pattern: pattern.into(),
        });
        self
    }

    /// Build the specification
    pub fn build(self) -> CleaningSpec {
        CleaningSpec {
            remove_patterns: self.patterns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_json_document() {
        let spec = CleaningSpec::from_json_str(
            r#"{
                "title": "Основы инвестирования",
                "remove_patterns": {
                    "before_first_chapter": "^Глава 1",
                    "after_last_chapter": "^Список литературы",
                    "chapter_separator": "^Глава",
                    "in_chapters": [
                        {"from": "^Задачи", "to": "^Ответы"},
                        {"from": "^Пример"}
                    ],
                    "inline_patterns": [{"pattern": "Рис\\. \\d+"}, "^\\d+$"]
                }
            }"#,
        )
        .unwrap();

        let patterns = &spec.remove_patterns;
        assert_eq!(patterns.before_first_chapter, PatternSpec::text("^Глава 1"));
        assert_eq!(patterns.in_chapters.len(), 2);
        assert!(patterns.in_chapters[1].to.is_absent());
        assert_eq!(
            patterns.inline_patterns[0].pattern(),
            &PatternSpec::text(r"Рис\. \d+")
        );
        assert_eq!(patterns.inline_patterns[1].pattern(), &PatternSpec::text(r"^\d+$"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let spec = CleaningSpec::from_json_str("{}").unwrap();
        assert!(spec.is_empty());

        let spec = CleaningSpec::from_json_str(r#"{"remove_patterns": {}}"#).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_non_string_patterns_are_preserved() {
        let spec = CleaningSpec::from_json_str(
            r#"{"remove_patterns": {"chapter_separator": 12, "inline_patterns": [{"pattern": null}, {}]}}"#,
        )
        .unwrap();
        assert_eq!(
            spec.remove_patterns.chapter_separator,
            PatternSpec::Other(json!(12))
        );
        assert!(spec.remove_patterns.inline_patterns[0].pattern().is_absent());
        assert!(spec.remove_patterns.inline_patterns[1].pattern().is_absent());
    }

    #[test]
    fn test_absent_inline_patterns_render_as_toml() {
        let spec = CleaningSpec::from_json_str(
            r#"{"remove_patterns": {"inline_patterns": [null, {"pattern": null}, {"pattern": "Рис."}]}}"#,
        )
        .unwrap();
        assert_eq!(
            spec.remove_patterns.inline_patterns[0],
            InlinePatternSpec::Bare(PatternSpec::Absent)
        );

        let toml = spec.render(ConfigFormat::Toml).unwrap();
        let reloaded = CleaningSpec::from_toml_str(&toml).unwrap();
        let patterns: Vec<&PatternSpec> = reloaded
            .remove_patterns
            .inline_patterns
            .iter()
            .map(InlinePatternSpec::pattern)
            .collect();
        assert_eq!(
            patterns,
            [&PatternSpec::Absent, &PatternSpec::Absent, &PatternSpec::text("Рис.")]
        );

        let json = spec.render(ConfigFormat::Json).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&json).unwrap()["remove_patterns"]
                ["inline_patterns"],
            json!([{}, {}, {"pattern": "Рис."}])
        );
    }

    #[test]
    fn test_parse_toml_document() {
        let spec = CleaningSpec::from_toml_str(
            r#"
[remove_patterns]
before_first_chapter = "^Chapter 1"
chapter_separator = "^Chapter"

[[remove_patterns.in_chapters]]
from = "^Exercises"
to = "^Chapter"

[[remove_patterns.inline_patterns]]
pattern = "^Page \\d+$"
"#,
        )
        .unwrap();

        assert_eq!(
            spec.remove_patterns.in_chapters,
            vec![RegionSpec::new("^Exercises", "^Chapter")]
        );
        assert_eq!(spec.remove_patterns.inline_patterns.len(), 1);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            CleaningSpec::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            CleaningSpec::from_toml_str("[remove_patterns"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_builder_and_file_round_trip() {
        let spec = CleaningSpec::builder()
            .before_first_chapter("^Введение")
            .after_last_chapter("^Приложение")
            .chapter_separator("^Глава")
            .region("^Вопросы", "^Глава")
            .inline_pattern("Рис.")
            .build();

        let dir = TempDir::new().unwrap();
        for name in ["meta.json", "meta.toml"] {
            let path = dir.path().join(name);
            spec.save(&path).unwrap();
            assert_eq!(CleaningSpec::from_file(&path).unwrap(), spec);
        }
    }

    #[test]
    fn test_from_file_missing_reports_path() {
        let err = CleaningSpec::from_file(Path::new("/nonexistent/meta.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/meta.json"));
    }

    #[test]
    fn test_fields_follow_configuration_order() {
        let spec = CleaningSpec::builder()
            .before_first_chapter("^Глава 1")
            .region("(", "^Глава")
            .inline_pattern("Рис.")
            .build();
        let fields = spec.remove_patterns.fields();

        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            [
                "before_first_chapter",
                "after_last_chapter",
                "chapter_separator",
                "in_chapters[0].from",
                "in_chapters[0].to",
                "inline_patterns[0]",
            ]
        );
        assert!(fields[1].1.is_absent());
        assert_eq!(fields[3].1, &PatternSpec::text("("));
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/meta.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a/meta.TOML")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a/meta.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a/meta")), ConfigFormat::Json);
    }
}
