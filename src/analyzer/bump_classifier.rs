use crate::config::CommitsConfig;
use crate::domain::{BumpKind, ParsedCommit};
use tracing::debug;

/// Classifies commit messages into the bump kind they warrant
pub struct BumpClassifier {
    config: CommitsConfig,
}

impl BumpClassifier {
    /// Create a new bump classifier
    pub fn new(config: CommitsConfig) -> Self {
        BumpClassifier { config }
    }

    /// Classify a single commit message
    pub fn classify_message(&self, message: &str) -> Option<BumpKind> {
        let parsed =
            ParsedCommit::parse_with_indicators(message, &self.config.breaking_change_indicators);

        if parsed.is_breaking_change {
            Some(BumpKind::Major)
        } else if self.config.minor_types.contains(&parsed.r#type) {
            Some(BumpKind::Minor)
        } else if self.config.patch_types.contains(&parsed.r#type) {
            Some(BumpKind::Patch)
        } else {
            None
        }
    }

    /// Classify commit messages and return the strongest bump they warrant.
    ///
    /// Returns `None` when no commit asks for a release, so the caller can fall
    /// back to the branch's default bump.
    pub fn classify(&self, messages: &[String]) -> Option<BumpKind> {
        let mut strongest: Option<BumpKind> = None;

        for message in messages {
            let Some(kind) = self.classify_message(message) else {
                continue;
            };
            debug!(bump = %kind, commit = %message.lines().next().unwrap_or_default(), "classified commit");

            if strongest.map_or(true, |s| kind.weight() > s.weight()) {
                strongest = Some(kind);
            }

            // If we found a breaking change, we can return early
            if kind == BumpKind::Major {
                break;
            }
        }

        strongest
    }
}
