//! Pattern compilation with graceful degradation
//!
//! A [`PatternSpec`] is whatever the configuration author wrote. Compiling it
//! never fails: a missing or non-string value becomes a matcher that never
//! fires, and text that is not a valid regular expression is matched as a
//! plain substring instead.
//!
//! Patterns go through `regex` first. Look-around and backreferences, which
//! `regex` does not support, are handed to `fancy_regex`.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Raw pattern value taken from a cleaning specification
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PatternSpec {
    /// Field missing or explicitly null
    #[default]
    Absent,
    /// Textual pattern, either a regular expression or plain text
    Text(String),
    /// Any other value (number, list, object...). Kept so it can be written
    /// back unchanged, but it never matches.
    Other(Value),
}

impl PatternSpec {
    /// Create a textual pattern
    pub fn text(pattern: impl Into<String>) -> Self {
        PatternSpec::Text(pattern.into())
    }

    /// Whether no value was supplied
    pub fn is_absent(&self) -> bool {
        matches!(self, PatternSpec::Absent)
    }

    /// The pattern text, if the value is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PatternSpec::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Compile into an executable matcher
    pub fn compile(&self) -> CompiledMatcher {
        compile(self)
    }
}

impl From<&str> for PatternSpec {
    fn from(pattern: &str) -> Self {
        PatternSpec::text(pattern)
    }
}

impl From<String> for PatternSpec {
    fn from(pattern: String) -> Self {
        PatternSpec::Text(pattern)
    }
}

impl From<Option<String>> for PatternSpec {
    fn from(pattern: Option<String>) -> Self {
        pattern.map_or(PatternSpec::Absent, PatternSpec::Text)
    }
}

impl Serialize for PatternSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PatternSpec::Absent => serializer.serialize_none(),
            PatternSpec::Text(text) => serializer.serialize_str(text),
            PatternSpec::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PatternSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => PatternSpec::Absent,
            Some(Value::String(text)) => PatternSpec::Text(text),
            Some(other) => PatternSpec::Other(other),
        })
    }
}

/// The strategy a compiled matcher uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    /// Never matches
    Disabled,
    /// Regular expression search
    Regex,
    /// Plain substring search
    Literal,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatcherKind::Disabled => "disabled",
            MatcherKind::Regex => "regex",
            MatcherKind::Literal => "literal",
        };
        f.write_str(name)
    }
}

/// Executable line predicate
#[derive(Debug, Clone, Default)]
pub enum CompiledMatcher {
    /// Never matches
    #[default]
    Disabled,
    /// Matches when the expression occurs anywhere in the line
    Regex(Regex),
    /// Like `Regex`, for look-around and backreferences
    Backtracking(fancy_regex::Regex),
    /// Matches when the text occurs anywhere in the line
    Literal(String),
}

impl CompiledMatcher {
    /// Test a line against this matcher
    #[inline]
    pub fn matches(&self, line: &str) -> bool {
        match self {
            CompiledMatcher::Disabled => false,
            CompiledMatcher::Regex(regex) => regex.is_match(line),
            // A backtrack limit overflow counts as no match
            CompiledMatcher::Backtracking(regex) => regex.is_match(line).unwrap_or_else(|err| {
                log::debug!("Pattern {:?} gave up on a line: {err}", regex.as_str());
                false
            }),
            CompiledMatcher::Literal(text) => line.contains(text.as_str()),
        }
    }

    /// Whether this matcher can ever fire
    pub fn is_enabled(&self) -> bool {
        !matches!(self, CompiledMatcher::Disabled)
    }

    /// Matching strategy
    pub fn kind(&self) -> MatcherKind {
        match self {
            CompiledMatcher::Disabled => MatcherKind::Disabled,
            CompiledMatcher::Regex(_) | CompiledMatcher::Backtracking(_) => MatcherKind::Regex,
            CompiledMatcher::Literal(_) => MatcherKind::Literal,
        }
    }

    /// Source text of the pattern, if any
    pub fn pattern(&self) -> Option<&str> {
        match self {
            CompiledMatcher::Disabled => None,
            CompiledMatcher::Regex(regex) => Some(regex.as_str()),
            CompiledMatcher::Backtracking(regex) => Some(regex.as_str()),
            CompiledMatcher::Literal(text) => Some(text),
        }
    }
}

/// Compile a pattern spec into a matcher
///
/// Never fails. Absent and non-string values yield
/// [`CompiledMatcher::Disabled`]; text neither `regex` nor `fancy_regex`
/// accepts (bad syntax, size limits) yields [`CompiledMatcher::Literal`].
pub fn compile(spec: &PatternSpec) -> CompiledMatcher {
    match spec {
        PatternSpec::Absent => {
            log::debug!("Pattern not configured, matcher disabled");
            CompiledMatcher::Disabled
        }
        PatternSpec::Other(value) => {
            log::warn!(
                "Invalid pattern type: {}. Expected a string, matcher disabled",
                value_kind(value)
            );
            CompiledMatcher::Disabled
        }
        PatternSpec::Text(pattern) => match Regex::new(pattern) {
            Ok(regex) => CompiledMatcher::Regex(regex),
            Err(err) => match fancy_regex::Regex::new(pattern) {
                Ok(regex) => {
                    log::debug!("Pattern {pattern:?} needs backtracking: {err}");
                    CompiledMatcher::Backtracking(regex)
                }
                Err(fancy_err) => {
                    log::warn!("Pattern {pattern:?} is not a valid regular expression, matching it literally");
                    log::debug!("Regex error for {pattern:?}: {fancy_err}");
                    CompiledMatcher::Literal(pattern.clone())
                }
            },
        },
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
