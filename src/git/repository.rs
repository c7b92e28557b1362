use crate::domain::Tag;
use crate::error::{Result, TaggerError};
use crate::git::CommitInfo;
use git2::{Oid, Repository as Git2Repo, Signature, Sort};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn repo(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| TaggerError::tag("repository lock poisoned"))
    }
}

/// Credential callbacks for fetch and push.
///
/// Tries the SSH agent first, then the usual key files in `~/.ssh`, then
/// whatever default credentials libgit2 can find.
fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }

            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }
        }

        // Fall back to default credentials
        git2::Cred::default()
    });
    callbacks
}

fn parse_oid(reference: &str) -> Result<Oid> {
    Oid::from_str(reference)
        .map_err(|e| TaggerError::tag(format!("Invalid commit reference '{}': {}", reference, e)))
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let repo = self.repo()?;
        let head = repo.head()?;

        if !head.is_branch() {
            return Err(TaggerError::tag(
                "HEAD is detached; pass the branch name explicitly",
            ));
        }

        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| TaggerError::tag("Branch name is not valid UTF-8"))
    }

    fn head_commit(&self) -> Result<String> {
        let repo = self.repo()?;
        let commit = repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let repo = self.repo()?;
        let names = repo.tag_names(None)?;
        let mut tags = Vec::with_capacity(names.len());

        for name in names.iter().flatten() {
            // Handles both lightweight and annotated tags
            let commit = repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|r| r.peel_to_commit())
                .map(|c| c.id().to_string());

            match commit {
                Ok(commit) => tags.push(Tag::with_commit(name, commit)),
                Err(e) => {
                    debug!(tag = name, error = %e, "tag does not point at a commit");
                    tags.push(Tag::new(name));
                }
            }
        }

        Ok(tags)
    }

    fn commits_since(&self, since: Option<&str>) -> Result<Vec<CommitInfo>> {
        let repo = self.repo()?;
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push_head()?;

        if let Some(since) = since {
            revwalk.hide(parse_oid(since)?)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            commits.push(CommitInfo {
                hash: commit.id().to_string(),
                message: commit.message().unwrap_or("(empty message)").to_string(),
                author: commit.author().name().unwrap_or("unknown").to_string(),
            });
        }

        Ok(commits)
    }

    fn create_tag(&self, name: &str, annotated: bool, message: &str, target: &str) -> Result<()> {
        let repo = self.repo()?;
        let object = repo
            .find_object(parse_oid(target)?, None)
            .map_err(|e| TaggerError::tag(format!("Cannot find object: {}", e)))?;

        let created = if annotated {
            let tagger = repo
                .signature()
                .or_else(|_| Signature::now("release-tagger", "release-tagger@localhost"))?;
            repo.tag(name, &object, &tagger, message, false)
        } else {
            repo.tag_lightweight(name, &object, false)
        };
        created.map_err(|e| TaggerError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        info!(tag = name, target, annotated, "created tag");
        Ok(())
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        let repo = self.repo()?;
        let mut remote = repo
            .find_remote(remote)
            .map_err(|e| TaggerError::remote(format!("Cannot find remote: {}", e)))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());

        remote
            .fetch(
                &["+refs/tags/*:refs/tags/*"],
                Some(&mut fetch_options),
                None,
            )
            .map_err(|e| TaggerError::remote(format!("Fetch failed: {}", e)))?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let repo = self.repo()?;
        let mut remote = repo
            .find_remote(remote)
            .map_err(|e| TaggerError::remote(format!("Cannot find remote: {}", e)))?;

        let mut callbacks = remote_callbacks();
        // Catch refs the remote rejected
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                warn!(reference = refname, status, "remote rejected reference");
                Err(git2::Error::from_str(&format!("Push failed for {}", refname)))
            }
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    TaggerError::remote(format!("Network error during push: {}", e))
                }
                _ => TaggerError::remote(format!("Failed to push tag '{}': {}", name, e)),
            })?;

        Ok(())
    }
}
