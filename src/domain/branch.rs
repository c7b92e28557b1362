/// A branch being built and the release channel it publishes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    /// `None` for production branches, the prerelease channel otherwise
    pub channel: Option<String>,
}

impl BranchContext {
    /// A production branch: tags it produces are plain releases
    pub fn production(name: impl Into<String>) -> Self {
        BranchContext {
            name: name.into(),
            channel: None,
        }
    }

    /// A prerelease branch publishing on `channel`
    pub fn prerelease(name: impl Into<String>, channel: impl Into<String>) -> Self {
        BranchContext {
            name: name.into(),
            channel: Some(channel.into()),
        }
    }

    /// Check if this is a release (production) branch
    pub fn is_release_branch(&self) -> bool {
        self.channel.is_none()
    }
}
