use crate::domain::version::StructuredVersion;
use crate::error::{Result, TaggerError};
use regex::Regex;
use std::fmt;

/// Represents a git tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit: Option<String>,
}

impl Tag {
    /// Create a new tag without a known commit
    pub fn new(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit: None,
        }
    }

    /// Create a new tag pointing at `commit`
    pub fn with_commit(name: impl Into<String>, commit: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit: Some(commit.into()),
        }
    }

    /// Parse this tag's version under `prefix`
    pub fn version(&self, prefix: &TagPrefix) -> std::result::Result<StructuredVersion, ParseFailure> {
        prefix.parse(&self.name)
    }
}

/// A tag that did not match the prefix/version pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub tag: String,
    pub reason: String,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag '{}' skipped: {}", self.tag, self.reason)
    }
}

/// Required tag prefix.
///
/// `literal` is written in front of every formatted version; `pattern` is an
/// anchored regex that must match the start of a tag for it to be parsed.
#[derive(Debug, Clone)]
pub struct TagPrefix {
    literal: String,
    pattern: Regex,
}

impl TagPrefix {
    /// Prefix whose match pattern is the literal itself (e.g. `v`)
    pub fn literal(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let pattern = Regex::new(&format!("^{}", regex::escape(&literal)))
            .expect("escaped literal is always a valid regex");
        TagPrefix { literal, pattern }
    }

    /// Prefix formatted as `literal` but matched by a custom `pattern`.
    ///
    /// The pattern is anchored at the start of the tag name if it is not already.
    pub fn with_pattern(literal: impl Into<String>, pattern: &str) -> Result<Self> {
        let anchored = if pattern.starts_with('^') {
            pattern.to_string()
        } else {
            format!("^(?:{})", pattern)
        };
        let pattern = Regex::new(&anchored).map_err(|e| {
            TaggerError::config(format!("Invalid prefix pattern '{}': {}", pattern, e))
        })?;
        Ok(TagPrefix {
            literal: literal.into(),
            pattern,
        })
    }

    /// The literal prepended when formatting
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Strip the prefix and parse the remainder as a version
    pub fn parse(&self, tag: &str) -> std::result::Result<StructuredVersion, ParseFailure> {
        let failure = |reason: String| ParseFailure {
            tag: tag.to_string(),
            reason,
        };

        let matched = self
            .pattern
            .find(tag)
            .filter(|m| m.start() == 0)
            .ok_or_else(|| {
                failure(format!(
                    "does not start with prefix /{}/",
                    self.pattern.as_str()
                ))
            })?;

        StructuredVersion::parse(&tag[matched.end()..]).map_err(failure)
    }

    /// Format a version as a tag name: `v` + `1.2.3-rc.0` -> `v1.2.3-rc.0`
    pub fn format(&self, version: &StructuredVersion) -> String {
        format!("{}{}", self.literal, version)
    }
}

impl Default for TagPrefix {
    fn default() -> Self {
        TagPrefix::literal("v")
    }
}
