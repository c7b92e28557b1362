//! Channel prerelease handling
//!
//! A prerelease in this crate is always a named channel plus a sequence number,
//! written `channel.sequence` after the normal version (e.g. `1.2.0-rc.3`).
//! Channels are ordered by an injectable [`ChannelRank`] instead of a fixed list.

use std::cmp::Ordering;
use std::fmt;

/// Returns true if `token` is usable as a channel name (non-empty ASCII alphanumeric).
pub fn is_valid_channel(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A position on a channel line: `dev.0`, `rc.2`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    /// The channel token (e.g. "dev", "rc")
    pub channel: String,
    /// Sequence number within the channel line, starting at 0
    pub sequence: u64,
}

impl PreRelease {
    /// Create a new prerelease position
    pub fn new(channel: impl Into<String>, sequence: u64) -> Self {
        PreRelease {
            channel: channel.into(),
            sequence,
        }
    }

    /// The first position (`sequence = 0`) on a channel
    pub fn start(channel: impl Into<String>) -> Self {
        PreRelease::new(channel, 0)
    }

    /// Returns the next position on the same channel, or `None` once the
    /// sequence is exhausted.
    ///
    /// # Examples
    /// ```ignore
    /// let next = PreRelease::new("dev", 1).next().unwrap();
    /// assert_eq!(next.sequence, 2);
    /// ```
    pub fn next(&self) -> Option<Self> {
        Some(PreRelease {
            channel: self.channel.clone(),
            sequence: self.sequence.checked_add(1)?,
        })
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.channel, self.sequence)
    }
}

/// Total order over channel tokens.
///
/// Ranked channels compare by their position in the list (`["dev", "rc"]` means
/// `dev < rc`). Channels missing from the list rank below every ranked channel
/// and compare among themselves by ASCII. An empty rank is plain ASCII order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRank {
    order: Vec<String>,
}

impl ChannelRank {
    /// Create a rank from channels listed lowest first
    pub fn new<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ChannelRank {
            order: channels.into_iter().map(Into::into).collect(),
        }
    }

    /// Rank position of a channel, if it is ranked
    pub fn position(&self, channel: &str) -> Option<usize> {
        self.order.iter().position(|c| c == channel)
    }

    /// Ranked channels, lowest first
    pub fn channels(&self) -> &[String] {
        &self.order
    }

    /// Compare two channel tokens
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => a.cmp(b),
        }
    }

    /// Compare two prerelease positions: channel first, then sequence
    pub fn compare_prerelease(&self, a: &PreRelease, b: &PreRelease) -> Ordering {
        self.compare(&a.channel, &b.channel)
            .then_with(|| a.sequence.cmp(&b.sequence))
    }
}
