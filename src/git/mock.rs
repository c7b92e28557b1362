use crate::domain::Tag;
use crate::error::{Result, TaggerError};
use crate::git::{CommitInfo, Repository};
use std::sync::{Mutex, MutexGuard};

/// A tag created through [`MockRepository::create_tag`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTag {
    pub name: String,
    pub annotated: bool,
    pub message: String,
    pub target: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: String,
    commits: Vec<CommitInfo>,
    tags: Vec<Tag>,
    fetch_error: Option<String>,
    created: Mutex<Vec<CreatedTag>>,
    pushed: Mutex<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            branch: "main".to_string(),
            commits: Vec::new(),
            tags: Vec::new(),
            fetch_error: None,
            created: Mutex::new(Vec::new()),
            pushed: Mutex::new(Vec::new()),
        }
    }

    /// Set the checked out branch
    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    /// Append a commit; the last one added is HEAD
    pub fn add_commit(&mut self, info: CommitInfo) {
        self.commits.push(info);
    }

    /// Add a tag pointing at `commit`
    pub fn add_tag(&mut self, name: impl Into<String>, commit: impl Into<String>) {
        self.tags.push(Tag::with_commit(name, commit));
    }

    /// Make `fetch_tags` fail with `message`
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.fetch_error = Some(message.into());
    }

    /// Tags created so far
    pub fn created_tags(&self) -> Vec<CreatedTag> {
        lock(&self.created).map(|c| c.clone()).unwrap_or_default()
    }

    /// `(remote, tag)` pairs pushed so far
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        lock(&self.pushed).map(|p| p.clone()).unwrap_or_default()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| TaggerError::tag("mock repository lock poisoned"))
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn head_commit(&self) -> Result<String> {
        self.commits
            .last()
            .map(|c| c.hash.clone())
            .ok_or_else(|| TaggerError::tag("repository has no commits"))
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut tags = self.tags.clone();
        let created = lock(&self.created)?;
        tags.extend(
            created
                .iter()
                .map(|c| Tag::with_commit(c.name.clone(), c.target.clone())),
        );
        Ok(tags)
    }

    fn commits_since(&self, since: Option<&str>) -> Result<Vec<CommitInfo>> {
        let start = since
            .and_then(|hash| self.commits.iter().position(|c| c.hash == hash))
            .map_or(0, |index| index + 1);
        Ok(self.commits[start..].to_vec())
    }

    fn create_tag(&self, name: &str, annotated: bool, message: &str, target: &str) -> Result<()> {
        if self.list_tags()?.iter().any(|t| t.name == name) {
            return Err(TaggerError::tag(format!("Tag '{}' already exists", name)));
        }
        lock(&self.created)?.push(CreatedTag {
            name: name.to_string(),
            annotated,
            message: message.to_string(),
            target: target.to_string(),
        });
        Ok(())
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        match &self.fetch_error {
            Some(message) => Err(TaggerError::remote(format!(
                "Fetch from '{}' failed: {}",
                remote, message
            ))),
            None => Ok(()),
        }
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        lock(&self.pushed)?.push((remote.to_string(), name.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_head() {
        let mut repo = MockRepository::new();
        assert!(repo.head_commit().is_err());

        repo.add_commit(CommitInfo::new("abc123", "first"));
        repo.add_commit(CommitInfo::new("def456", "second"));
        assert_eq!(repo.head_commit().unwrap(), "def456");
        assert_eq!(repo.current_branch().unwrap(), "main");
    }

    #[test]
    fn test_mock_repository_commits_since() {
        let mut repo = MockRepository::new();
        repo.add_commit(CommitInfo::new("a", "one"));
        repo.add_commit(CommitInfo::new("b", "two"));
        repo.add_commit(CommitInfo::new("c", "three"));

        assert_eq!(repo.commits_since(None).unwrap().len(), 3);
        let since_a = repo.commits_since(Some("a")).unwrap();
        assert_eq!(since_a.len(), 2);
        assert_eq!(since_a[0].hash, "b");
        assert!(repo.commits_since(Some("c")).unwrap().is_empty());
    }

    #[test]
    fn test_mock_repository_records_created_tags() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", "a");

        repo.create_tag("v1.0.1", true, "Release v1.0.1", "b").unwrap();
        assert!(repo.create_tag("v1.0.0", false, "", "b").is_err());

        let created = repo.created_tags();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "v1.0.1");
        assert!(created[0].annotated);
        assert_eq!(repo.list_tags().unwrap().len(), 2);
    }

    #[test]
    fn test_mock_repository_push_and_fetch() {
        let mut repo = MockRepository::default();
        repo.push_tag("origin", "v1.0.0").unwrap();
        assert_eq!(
            repo.pushed_tags(),
            vec![("origin".to_string(), "v1.0.0".to_string())]
        );

        assert!(repo.fetch_tags("origin").is_ok());
        repo.fail_fetch("authentication required");
        assert!(repo.fetch_tags("origin").is_err());
    }
}
