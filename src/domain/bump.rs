//! Bump calculation over [`StructuredVersion`]s

use crate::domain::prerelease::PreRelease;
use crate::domain::version::StructuredVersion;
use crate::error::{Result, TaggerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of version increment to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
    Prerelease,
    None,
}

impl BumpKind {
    /// True for `premajor`, `preminor` and `prepatch`
    pub fn is_pre(self) -> bool {
        matches!(
            self,
            BumpKind::Premajor | BumpKind::Preminor | BumpKind::Prepatch
        )
    }

    /// True for `major`, `minor` and `patch`
    pub fn is_plain(self) -> bool {
        matches!(self, BumpKind::Major | BumpKind::Minor | BumpKind::Patch)
    }

    /// Relative weight used to pick the strongest bump across commits
    pub fn weight(self) -> u8 {
        match self {
            BumpKind::Major | BumpKind::Premajor => 3,
            BumpKind::Minor | BumpKind::Preminor => 2,
            BumpKind::Patch | BumpKind::Prepatch => 1,
            BumpKind::Prerelease | BumpKind::None => 0,
        }
    }
}

impl FromStr for BumpKind {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            "premajor" => Ok(BumpKind::Premajor),
            "preminor" => Ok(BumpKind::Preminor),
            "prepatch" => Ok(BumpKind::Prepatch),
            "prerelease" => Ok(BumpKind::Prerelease),
            "none" => Ok(BumpKind::None),
            other => Err(TaggerError::config(format!(
                "Unknown bump kind: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::Premajor => "premajor",
            BumpKind::Preminor => "preminor",
            BumpKind::Prepatch => "prepatch",
            BumpKind::Prerelease => "prerelease",
            BumpKind::None => "none",
        };
        f.write_str(name)
    }
}

/// Bumps a version according to `kind`.
///
/// - **major/minor/patch**: increment the field, zero lower fields, drop the channel
/// - **premajor/preminor/prepatch**: same, then start `channel` at sequence 0
/// - **prerelease**: next sequence on the existing channel line
/// - **none**: identity
///
/// # Errors
/// `InvalidBump` when a `pre*` kind has no channel to start, or when
/// `prerelease` is applied to a plain release.
///
/// # Example
/// ```ignore
/// let v = StructuredVersion::new(1, 2, 3);
/// assert_eq!(bump(&v, BumpKind::Preminor, Some("dev"))?.to_string(), "1.3.0-dev.0");
/// ```
pub fn bump(
    version: &StructuredVersion,
    kind: BumpKind,
    channel: Option<&str>,
) -> Result<StructuredVersion> {
    let overflow = |field: &str| {
        TaggerError::invalid_bump(format!(
            "cannot apply '{}' to {}: {} is already at its maximum",
            kind, version, field
        ))
    };
    let increment = |value: u64, field: &str| value.checked_add(1).ok_or_else(|| overflow(field));

    let bumped = match kind {
        BumpKind::Major | BumpKind::Premajor => {
            StructuredVersion::new(increment(version.major, "major")?, 0, 0)
        }
        BumpKind::Minor | BumpKind::Preminor => StructuredVersion::new(
            version.major,
            increment(version.minor, "minor")?,
            0,
        ),
        BumpKind::Patch | BumpKind::Prepatch => StructuredVersion::new(
            version.major,
            version.minor,
            increment(version.patch, "patch")?,
        ),
        BumpKind::Prerelease => {
            let pre = version.pre.as_ref().ok_or_else(|| {
                TaggerError::invalid_bump(format!(
                    "cannot apply 'prerelease' to {}: it is not on a channel line",
                    version
                ))
            })?;
            let next = pre.next().ok_or_else(|| overflow("the sequence"))?;
            return Ok(version.with_pre(next));
        }
        BumpKind::None => return Ok(version.clone()),
    };

    if kind.is_pre() {
        let channel = channel.ok_or_else(|| {
            TaggerError::invalid_bump(format!(
                "'{}' needs an active channel to start a prerelease line",
                kind
            ))
        })?;
        return Ok(bumped.with_pre(PreRelease::start(channel)));
    }

    Ok(bumped)
}
