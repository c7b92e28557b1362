use regex::Regex;
use std::sync::LazyLock;

/// Conventional commit header: `type(scope)!: description`
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)(?:\(([^)]*)\))?(!?):\s*(.*)$").expect("Invalid header regex")
});

/// Footers that mark a breaking change when no custom list is configured
pub const DEFAULT_BREAKING_INDICATORS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Parse a commit message in the Conventional Commits format
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    /// - non-conventional text (typed as `chore`)
    pub fn parse(message: &str) -> Self {
        Self::parse_with_indicators(message, &DEFAULT_BREAKING_INDICATORS)
    }

    /// Parse with a custom list of breaking-change footer markers
    pub fn parse_with_indicators<S: AsRef<str>>(message: &str, indicators: &[S]) -> Self {
        let has_breaking_footer = indicators
            .iter()
            .any(|indicator| message.contains(indicator.as_ref()));
        let header = message.lines().next().unwrap_or_default().trim();

        match HEADER_REGEX.captures(header) {
            Some(captures) => {
                let group = |i: usize| captures.get(i).map(|m| m.as_str().to_string());
                ParsedCommit {
                    r#type: group(1).unwrap_or_default().to_lowercase(),
                    scope: group(2).filter(|s| !s.is_empty()),
                    description: group(4).unwrap_or_default(),
                    is_breaking_change: group(3).as_deref() == Some("!") || has_breaking_footer,
                }
            }
            // Default: non-conventional commit
            None => ParsedCommit {
                r#type: "chore".to_string(),
                scope: None,
                description: header.to_string(),
                is_breaking_change: has_breaking_footer,
            },
        }
    }
}
