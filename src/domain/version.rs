use crate::domain::prerelease::{ChannelRank, PreRelease};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// `MAJOR.MINOR.PATCH[-CHANNEL.SEQUENCE]` with semver numeric identifiers
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-([0-9A-Za-z]+)\.(0|[1-9][0-9]*))?$",
    )
    .expect("Invalid version regex")
});

/// The `major.minor.patch` triple of a version, without any channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl NormalVersion {
    /// Create a new normal version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        NormalVersion {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for NormalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A plain release (`1.2.3`) or a channel prerelease (`1.2.3-rc.0`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuredVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<PreRelease>,
}

impl StructuredVersion {
    /// Create a plain release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        StructuredVersion {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Create a prerelease version on `channel` at `sequence`
    pub fn prerelease(
        major: u64,
        minor: u64,
        patch: u64,
        channel: impl Into<String>,
        sequence: u64,
    ) -> Self {
        StructuredVersion {
            major,
            minor,
            patch,
            pre: Some(PreRelease::new(channel, sequence)),
        }
    }

    /// Parse an unprefixed version string such as `1.2.3` or `0.1.0-dev.4`.
    ///
    /// Returns the reason on failure; prefix handling lives in [`crate::domain::TagPrefix`].
    pub fn parse(s: &str) -> Result<Self, String> {
        let captures = VERSION_REGEX
            .captures(s)
            .ok_or_else(|| format!("'{}' is not MAJOR.MINOR.PATCH[-CHANNEL.SEQUENCE]", s))?;

        let number = |index: usize| -> Result<u64, String> {
            let text = captures.get(index).map(|m| m.as_str()).unwrap_or_default();
            text.parse::<u64>()
                .map_err(|_| format!("numeric component '{}' is out of range", text))
        };

        let major = number(1)?;
        let minor = number(2)?;
        let patch = number(3)?;
        let pre = match captures.get(4) {
            Some(channel) => Some(PreRelease::new(channel.as_str(), number(5)?)),
            None => None,
        };

        Ok(StructuredVersion {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// The channel token, if this is a prerelease
    pub fn channel(&self) -> Option<&str> {
        self.pre.as_ref().map(|p| p.channel.as_str())
    }

    /// The sequence number, if this is a prerelease
    pub fn sequence(&self) -> Option<u64> {
        self.pre.as_ref().map(|p| p.sequence)
    }

    /// True for plain releases
    pub fn is_stable(&self) -> bool {
        self.pre.is_none()
    }

    pub fn normal(&self) -> NormalVersion {
        NormalVersion::new(self.major, self.minor, self.patch)
    }

    /// This version with the prerelease part removed
    pub fn stripped(&self) -> Self {
        StructuredVersion::new(self.major, self.minor, self.patch)
    }

    /// This version's normal part placed on `pre`
    pub fn with_pre(&self, pre: PreRelease) -> Self {
        StructuredVersion {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre: Some(pre),
        }
    }

    /// Semantic-version precedence with an explicit channel rank.
    ///
    /// Normal versions dominate; a stable release outranks any prerelease of the
    /// same normal version; prereleases compare by channel rank, then sequence.
    pub fn compare(&self, other: &Self, rank: &ChannelRank) -> Ordering {
        self.normal()
            .cmp(&other.normal())
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => rank.compare_prerelease(a, b),
            })
    }
}

impl Ord for StructuredVersion {
    /// Precedence with channels in ASCII order
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other, &ChannelRank::default())
    }
}

impl PartialOrd for StructuredVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StructuredVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse_plain() {
        let v = StructuredVersion::parse("1.2.3").unwrap();
        assert_eq!(v, StructuredVersion::new(1, 2, 3));
        assert!(v.is_stable());
        assert_eq!(v.channel(), None);
        assert_eq!(v.sequence(), None);
    }

    #[test]
    fn test_version_parse_prerelease() {
        let v = StructuredVersion::parse("0.1.0-dev.4").unwrap();
        assert_eq!(v, StructuredVersion::prerelease(0, 1, 0, "dev", 4));
        assert_eq!(v.channel(), Some("dev"));
        assert_eq!(v.sequence(), Some(4));
    }

    #[test]
    fn test_version_parse_invalid() {
        for input in [
            "1.2",
            "1.2.3.4",
            "v1.2.3",
            "1.2.3-rc",
            "1.2.3-rc.",
            "1.2.3-.1",
            "1.2.3-rc.x",
            "1.2.3-release-candidate.1",
            "1.2.3-rc.1.2",
            "01.2.3",
            "1.2.3-rc.01",
            "1.2.3+build",
            "-1.2.3",
            "",
        ] {
            assert!(
                StructuredVersion::parse(input).is_err(),
                "'{}' should not parse",
                input
            );
        }
    }

    #[test]
    fn test_version_parse_overflow() {
        let err = StructuredVersion::parse("99999999999999999999999.0.0").unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(StructuredVersion::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(
            StructuredVersion::prerelease(2, 3, 0, "rc", 0).to_string(),
            "2.3.0-rc.0"
        );
    }

    #[test]
    fn test_display_then_parse_is_identity() {
        let versions = [
            StructuredVersion::new(0, 0, 0),
            StructuredVersion::new(10, 20, 30),
            StructuredVersion::prerelease(1, 0, 0, "dev", 0),
            StructuredVersion::prerelease(4, 5, 6, "rc2", 17),
        ];
        for v in versions {
            assert_eq!(StructuredVersion::parse(&v.to_string()).unwrap(), v);
        }
    }

    #[test]
    fn test_normal_version_dominates_channel() {
        let rank = ChannelRank::new(["dev", "rc"]);
        let rc = StructuredVersion::prerelease(1, 0, 0, "rc", 9);
        let dev = StructuredVersion::prerelease(1, 1, 0, "dev", 0);
        assert_eq!(rc.compare(&dev, &rank), Ordering::Less);
    }

    #[test]
    fn test_stable_outranks_prerelease_of_same_normal() {
        let rank = ChannelRank::new(["dev", "rc"]);
        let stable = StructuredVersion::new(1, 0, 0);
        let rc = StructuredVersion::prerelease(1, 0, 0, "rc", 5);
        assert_eq!(stable.compare(&rc, &rank), Ordering::Greater);
        assert_eq!(rc.compare(&stable, &rank), Ordering::Less);
        assert!(stable > rc);
    }

    #[test]
    fn test_channel_rank_applies_before_sequence() {
        let rank = ChannelRank::new(["dev", "rc"]);
        let dev = StructuredVersion::prerelease(0, 2, 0, "dev", 7);
        let rc = StructuredVersion::prerelease(0, 2, 0, "rc", 0);
        assert_eq!(dev.compare(&rc, &rank), Ordering::Less);

        let dev1 = StructuredVersion::prerelease(0, 2, 0, "dev", 1);
        assert_eq!(dev1.compare(&dev, &rank), Ordering::Less);
    }

    #[test]
    fn test_ord_falls_back_to_ascii_channels() {
        let beta = StructuredVersion::prerelease(1, 0, 0, "beta", 0);
        let alpha = StructuredVersion::prerelease(1, 0, 0, "alpha", 3);
        assert!(alpha < beta);
    }

    #[test]
    fn test_compare_order_laws() {
        let rank = ChannelRank::new(["dev", "rc"]);
        let versions = [
            StructuredVersion::new(0, 1, 0),
            StructuredVersion::prerelease(0, 1, 0, "dev", 0),
            StructuredVersion::prerelease(0, 1, 0, "dev", 1),
            StructuredVersion::prerelease(0, 1, 0, "rc", 0),
            StructuredVersion::prerelease(0, 1, 0, "nightly", 3),
            StructuredVersion::new(1, 0, 0),
            StructuredVersion::prerelease(1, 0, 0, "rc", 0),
        ];

        for a in &versions {
            assert_eq!(a.compare(a, &rank), Ordering::Equal);
            for b in &versions {
                let ab = a.compare(b, &rank);
                assert_eq!(ab, b.compare(a, &rank).reverse());
                if ab == Ordering::Equal {
                    assert_eq!(a, b);
                }
                for c in &versions {
                    if ab != Ordering::Greater && b.compare(c, &rank) != Ordering::Greater {
                        assert_ne!(a.compare(c, &rank), Ordering::Greater);
                    }
                }
            }
        }
    }
}
