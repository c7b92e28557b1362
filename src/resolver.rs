//! Tag resolution engine
//!
//! Turns the existing tags of a repository, the channel being built and an
//! already classified bump kind into exactly one next tag. The engine is a
//! pure function over its inputs: no git access, no shared state.

use crate::domain::{
    bump, BumpKind, ChannelRank, NormalVersion, ParseFailure, PreRelease, StructuredVersion, Tag,
    TagPrefix,
};
use crate::error::{Result, TaggerError};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Everything the resolver needs to know about the branch being built
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub prefix: TagPrefix,
    /// `None` on production branches
    pub active_channel: Option<String>,
    /// Bump applied when the commit history does not ask for more
    pub default_bump: BumpKind,
    /// Bump used to open a new channel line on top of a stable release
    pub initial_prerelease_bump: BumpKind,
    /// Raw version string that bypasses resolution entirely
    pub explicit_override: Option<String>,
    pub channel_rank: ChannelRank,
    /// Version used when the repository has no matching tags at all
    pub initial_version: Option<StructuredVersion>,
}

impl ChannelConfig {
    /// Configuration for a production branch
    pub fn production(prefix: TagPrefix) -> Self {
        ChannelConfig {
            prefix,
            active_channel: None,
            default_bump: BumpKind::Patch,
            initial_prerelease_bump: BumpKind::Preminor,
            explicit_override: None,
            channel_rank: ChannelRank::default(),
            initial_version: None,
        }
    }

    /// Configuration for a prerelease branch publishing on `channel`
    pub fn prerelease(prefix: TagPrefix, channel: impl Into<String>) -> Self {
        ChannelConfig {
            active_channel: Some(channel.into()),
            default_bump: BumpKind::Prerelease,
            ..ChannelConfig::production(prefix)
        }
    }

    pub fn with_default_bump(mut self, kind: BumpKind) -> Self {
        self.default_bump = kind;
        self
    }

    pub fn with_initial_prerelease_bump(mut self, kind: BumpKind) -> Self {
        self.initial_prerelease_bump = kind;
        self
    }

    pub fn with_override(mut self, raw: impl Into<String>) -> Self {
        self.explicit_override = Some(raw.into());
        self
    }

    pub fn with_channel_rank(mut self, rank: ChannelRank) -> Self {
        self.channel_rank = rank;
        self
    }

    pub fn with_initial_version(mut self, version: StructuredVersion) -> Self {
        self.initial_version = Some(version);
        self
    }

    /// True when no channel is active
    pub fn is_production(&self) -> bool {
        self.active_channel.is_none()
    }
}

/// A tag whose name parsed under the configured prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    pub name: String,
    pub commit: Option<String>,
    pub version: StructuredVersion,
}

/// Classification of the existing tags relative to the active channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    /// Highest plain release
    pub latest_stable: Option<ParsedTag>,
    /// Highest tag of any kind
    pub latest_overall: Option<ParsedTag>,
    /// Highest tag on the active channel whose normal version is not yet released
    pub open_line: Option<ParsedTag>,
    /// Tags that did not match the prefix/version pattern
    pub skipped: Vec<ParseFailure>,
}

/// How a resolution was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPath {
    /// The explicit override was used verbatim
    Override,
    /// No tags existed; the configured initial version was used
    InitialVersion,
    /// A prerelease was promoted to a plain release
    Promotion,
    /// A stable release was bumped on a production branch
    Release(BumpKind),
    /// The open channel line got its next sequence number
    ContinueLine,
    /// A new channel line was started with the given bump
    NewLine(BumpKind),
}

/// The outcome of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The full tag name, prefix included
    pub tag: String,
    /// Parsed version of the tag; `None` only for overrides that are not versions
    pub version: Option<StructuredVersion>,
    /// The existing tag the new one was derived from
    pub previous: Option<ParsedTag>,
    pub path: ResolutionPath,
}

/// Resolves the next tag for one branch configuration
#[derive(Debug, Clone)]
pub struct TagResolver {
    config: ChannelConfig,
}

impl TagResolver {
    pub fn new(config: ChannelConfig) -> Self {
        TagResolver { config }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Parse `tags` and locate the latest stable, latest overall and open line.
    ///
    /// Independent of the order of `tags`.
    pub fn baseline(&self, tags: &[Tag]) -> Baseline {
        let rank = &self.config.channel_rank;
        let mut parsed = Vec::with_capacity(tags.len());
        let mut skipped = Vec::new();

        for tag in tags {
            match tag.version(&self.config.prefix) {
                Ok(version) => parsed.push(ParsedTag {
                    name: tag.name.clone(),
                    commit: tag.commit.clone(),
                    version,
                }),
                Err(failure) => {
                    debug!(tag = %failure.tag, reason = %failure.reason, "skipping tag");
                    skipped.push(failure);
                }
            }
        }

        let latest_stable = latest(parsed.iter().filter(|t| t.version.is_stable()), rank);
        let latest_overall = latest(parsed.iter(), rank);

        let released: HashSet<NormalVersion> = parsed
            .iter()
            .filter(|t| t.version.is_stable())
            .map(|t| t.version.normal())
            .collect();
        let floor = latest_stable.as_ref().map(|t| t.version.normal());
        let is_spent =
            |normal: NormalVersion| released.contains(&normal) || floor.is_some_and(|f| normal < f);

        let open_line = self.config.active_channel.as_deref().and_then(|channel| {
            latest(
                parsed.iter().filter(|t| {
                    t.version.channel() == Some(channel) && !is_spent(t.version.normal())
                }),
                rank,
            )
        });

        Baseline {
            latest_stable,
            latest_overall,
            open_line,
            skipped,
        }
    }

    /// Resolve the next tag given the classified `bump_kind`.
    ///
    /// # Errors
    /// * `NoBaseVersion` - no matching tags exist and no initial version is configured
    /// * `InvalidBump` - the bump kind cannot be applied to the selected base
    pub fn resolve(&self, tags: &[Tag], bump_kind: BumpKind) -> Result<Resolution> {
        let prefix = &self.config.prefix;

        if let Some(raw) = &self.config.explicit_override {
            if semver::Version::parse(raw).is_err() {
                warn!(custom_tag = %raw, "custom tag is not a valid semantic version, using it verbatim");
            }
            let tag = format!("{}{}", prefix.as_str(), raw);
            info!(tag = %tag, "using custom tag");
            return Ok(Resolution {
                tag,
                version: StructuredVersion::parse(raw).ok(),
                previous: None,
                path: ResolutionPath::Override,
            });
        }

        let baseline = self.baseline(tags);
        debug!(
            latest_stable = ?baseline.latest_stable.as_ref().map(|t| &t.name),
            latest_overall = ?baseline.latest_overall.as_ref().map(|t| &t.name),
            open_line = ?baseline.open_line.as_ref().map(|t| &t.name),
            skipped = baseline.skipped.len(),
            "classified existing tags"
        );

        let (version, previous, path) = match (&baseline.latest_overall, &self.config.active_channel)
        {
            (None, _) => self.resolve_initial()?,
            (Some(latest), None) => self.resolve_production(latest, bump_kind)?,
            (Some(latest), Some(channel)) => {
                self.resolve_prerelease(&baseline, latest, channel, bump_kind)?
            }
        };

        let tag = prefix.format(&version);
        info!(tag = %tag, path = ?path, "resolved next tag");
        Ok(Resolution {
            tag,
            version: Some(version),
            previous,
            path,
        })
    }

    /// Resolve and return only the tag name
    pub fn next_tag(&self, tags: &[Tag], bump_kind: BumpKind) -> Result<String> {
        self.resolve(tags, bump_kind).map(|r| r.tag)
    }

    fn resolve_initial(&self) -> Result<(StructuredVersion, Option<ParsedTag>, ResolutionPath)> {
        let initial = self.config.initial_version.as_ref().ok_or_else(|| {
            TaggerError::no_base_version(match &self.config.active_channel {
                None => "no release tags exist to promote; set a custom tag or an initial version"
                    .to_string(),
                Some(channel) => format!(
                    "no tags exist to start the '{}' channel from; set a custom tag or an initial version",
                    channel
                ),
            })
        })?;

        let version = match (&self.config.active_channel, &initial.pre) {
            (Some(channel), None) => initial.with_pre(PreRelease::start(channel.as_str())),
            _ => initial.clone(),
        };
        Ok((version, None, ResolutionPath::InitialVersion))
    }

    fn resolve_production(
        &self,
        latest: &ParsedTag,
        bump_kind: BumpKind,
    ) -> Result<(StructuredVersion, Option<ParsedTag>, ResolutionPath)> {
        if !latest.version.is_stable() {
            return Ok((
                latest.version.stripped(),
                Some(latest.clone()),
                ResolutionPath::Promotion,
            ));
        }

        // Nothing ahead of the last release: release the bumped version instead
        let version = bump(&latest.version, bump_kind, None)?;
        Ok((
            version,
            Some(latest.clone()),
            ResolutionPath::Release(bump_kind),
        ))
    }

    fn resolve_prerelease(
        &self,
        baseline: &Baseline,
        latest: &ParsedTag,
        channel: &str,
        bump_kind: BumpKind,
    ) -> Result<(StructuredVersion, Option<ParsedTag>, ResolutionPath)> {
        if let Some(open) = &baseline.open_line {
            if open.version.normal() >= latest.version.normal() {
                let version = bump(&open.version, BumpKind::Prerelease, Some(channel))?;
                return Ok((version, Some(open.clone()), ResolutionPath::ContinueLine));
            }
        }

        let base = match &baseline.latest_stable {
            Some(stable) if latest.version.normal() <= stable.version.normal() => stable,
            _ => latest,
        };

        if base.version.is_stable() {
            let kind = self.config.initial_prerelease_bump;
            if matches!(kind, BumpKind::Prerelease | BumpKind::None) {
                return Err(TaggerError::invalid_bump(format!(
                    "'{}' cannot start a '{}' line above release {}",
                    kind, channel, base.version
                )));
            }
            let next = bump(&base.version, kind, Some(channel))?;
            let version = next.stripped().with_pre(PreRelease::start(channel));
            return Ok((version, Some(base.clone()), ResolutionPath::NewLine(kind)));
        }

        // The base is another channel's unreleased line: its normal version
        // already carries a bump, so only bump further when it falls short.
        let pending = base.version.normal();
        let covered = match bump_kind {
            BumpKind::Major => pending.minor == 0 && pending.patch == 0,
            BumpKind::Minor => pending.patch == 0,
            BumpKind::Patch | BumpKind::Prerelease | BumpKind::None => true,
            BumpKind::Premajor | BumpKind::Preminor | BumpKind::Prepatch => false,
        };
        let next = if covered {
            base.version.stripped()
        } else {
            bump(&base.version.stripped(), bump_kind, Some(channel))?.stripped()
        };

        Ok((
            next.with_pre(PreRelease::start(channel)),
            Some(base.clone()),
            ResolutionPath::NewLine(bump_kind),
        ))
    }
}

fn latest<'a>(
    tags: impl Iterator<Item = &'a ParsedTag>,
    rank: &ChannelRank,
) -> Option<ParsedTag> {
    tags.max_by(|a, b| a.version.compare(&b.version, rank))
        .cloned()
}
