use crate::domain::ParseFailure;
use std::fmt;

/// Warnings that occur when processing git tags near repository boundaries.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest release tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Tag exists but does not match the prefix/version pattern
    UnparsableTag { tag: String, reason: String },
    /// Custom tag is used verbatim although it is not a semantic version
    OverrideNotSemver { tag: String },
    /// Fetch operation failed due to authentication issues
    FetchAuthenticationFailed { remote: String },
    /// Fetch operation failed for another reason
    FetchFailed { remote: String, reason: String },
}

impl From<ParseFailure> for BoundaryWarning {
    fn from(failure: ParseFailure) -> Self {
        BoundaryWarning::UnparsableTag {
            tag: failure.tag,
            reason: failure.reason,
        }
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = current_commit_hash
                    .get(..7)
                    .unwrap_or(current_commit_hash.as_str());
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::OverrideNotSemver { tag } => {
                write!(
                    f,
                    "Custom tag '{}' is not a semantic version; using it as given",
                    tag
                )
            }
            BoundaryWarning::FetchAuthenticationFailed { remote } => {
                write!(
                    f,
                    "Authentication failed when fetching from remote '{}'; using local tags",
                    remote
                )
            }
            BoundaryWarning::FetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch tags from remote '{}': {}; using local tags",
                    remote, reason
                )
            }
        }
    }
}
