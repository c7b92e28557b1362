//! Git operations abstraction layer
//!
//! The tag resolver never touches git. Everything it needs from a repository
//! (tags, commit history, tag creation and publication) goes through the
//! [Repository] trait so that the workflow can run against a real repository
//! or an in-memory one.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use release_tagger::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = repo.list_tags()?;
//! let commits = repo.commits_since(None)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Tag;
use crate::error::Result;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

impl CommitInfo {
    /// Commit with an unknown author
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        CommitInfo {
            hash: hash.into(),
            message: message.into(),
            author: "unknown".to_string(),
        }
    }
}

/// Repository operations the release workflow depends on
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across threads.
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to the
/// appropriate [crate::error::TaggerError] variants.
pub trait Repository: Send + Sync {
    /// Name of the checked out branch
    ///
    /// # Returns
    /// * `Err` - If HEAD is detached or unborn
    fn current_branch(&self) -> Result<String>;

    /// Full hash of the commit at HEAD
    fn head_commit(&self) -> Result<String>;

    /// All tags in the repository with the commit they point at.
    ///
    /// No ordering is guaranteed; the resolver derives its own.
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Commits reachable from HEAD but not from `since`, oldest first.
    ///
    /// With `since = None` every commit reachable from HEAD is returned.
    fn commits_since(&self, since: Option<&str>) -> Result<Vec<CommitInfo>>;

    /// Create tag `name` on commit `target`
    ///
    /// # Arguments
    /// * `annotated` - Create an annotated tag carrying `message`; lightweight otherwise
    ///
    /// # Returns
    /// * `Err` - If the tag already exists or `target` is not a commit
    fn create_tag(&self, name: &str, annotated: bool, message: &str, target: &str) -> Result<()>;

    /// Fetch all tags from `remote`
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// Push tag `name` to `remote`
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}
