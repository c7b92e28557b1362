//! Main workflow orchestration logic
//!
//! Connects the repository, the commit classifier and the tag resolver. The
//! binary only parses arguments and renders the [WorkflowResult]; everything
//! that decides what gets tagged lives here so it can run against a
//! [crate::git::MockRepository] in tests.

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use crate::analyzer::BumpClassifier;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::BumpKind;
use crate::git::Repository;
use crate::resolver::{ResolutionPath, TagResolver};

/// Arguments for the publish workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Branch to tag; the checked out branch when `None`
    pub branch: Option<String>,

    /// Version string that bypasses resolution
    pub custom_tag: Option<String>,

    /// Remote to fetch from and push to; the configured one when `None`
    pub remote: Option<String>,

    /// Preview mode - don't create tags or push
    pub dry_run: bool,

    /// Keep the tag local even if pushing is enabled in the config
    pub no_push: bool,

    /// Use local tags only even if fetching is enabled in the config
    pub no_fetch: bool,
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The resolved tag
    pub tag: String,

    /// The branch that was tagged
    pub branch: String,

    /// The remote used for fetch and push
    pub remote: String,

    /// Tag the new one was derived from
    pub previous_tag: Option<String>,

    /// Bump kind handed to the resolver
    pub bump: BumpKind,

    /// How the tag was resolved
    pub path: ResolutionPath,

    /// Messages of the commits considered for the bump, oldest first
    pub commits: Vec<String>,

    /// Whether the tag was created locally
    pub created: bool,

    /// Whether the tag was pushed to remote
    pub pushed: bool,

    /// Non-fatal issues met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Remote errors that look like rejected credentials
fn is_authentication_error(message: &str) -> bool {
    let message = message.to_lowercase();
    ["auth", "permission", "credential", "publickey"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Main publish workflow
///
/// Orchestrates the entire tagging process:
/// 1. Build the channel configuration for the branch
/// 2. Fetch tags from the remote (failures only warn)
/// 3. Classify existing tags and collect commits since the latest release
/// 4. Determine the bump kind and resolve the next tag
/// 5. Create and optionally push the tag
///
/// # Arguments
///
/// * `repo` - Repository to read from and tag
/// * `config` - Loaded configuration
/// * `args` - Workflow arguments (branch, custom tag, remote, dry run, push/fetch switches)
///
/// # Returns
///
/// The resolved tag and what was done with it, or the first fatal error
pub fn run_publish_workflow<R: Repository>(
    repo: &R,
    config: &Config,
    args: &PublishWorkflowArgs,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();

    let branch = match &args.branch {
        Some(branch) => branch.clone(),
        None => repo
            .current_branch()
            .context("Cannot determine the branch to tag")?,
    };
    let channel_config = config.channel_config(&branch, args.custom_tag.as_deref())?;
    info!(branch = %branch, channel = ?channel_config.active_channel, "preparing release");

    if let Some(raw) = &channel_config.explicit_override {
        if semver::Version::parse(raw).is_err() {
            warnings.push(BoundaryWarning::OverrideNotSemver {
                tag: format!("{}{}", channel_config.prefix.as_str(), raw),
            });
        }
    }

    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| config.tagging.remote.clone());

    if config.tagging.fetch && !args.no_fetch {
        if let Err(e) = repo.fetch_tags(&remote) {
            let message = e.to_string();
            warn!(remote = %remote, error = %message, "fetch failed, continuing with local tags");
            if is_authentication_error(&message) {
                warnings.push(BoundaryWarning::FetchAuthenticationFailed {
                    remote: remote.clone(),
                });
            } else {
                warnings.push(BoundaryWarning::FetchFailed {
                    remote: remote.clone(),
                    reason: message,
                });
            }
        }
    }

    let tags = repo.list_tags().context("Failed to list tags")?;
    let resolver = TagResolver::new(channel_config);
    let baseline = resolver.baseline(&tags);
    warnings.extend(baseline.skipped.iter().cloned().map(BoundaryWarning::from));

    let since = baseline
        .latest_stable
        .as_ref()
        .and_then(|t| t.commit.as_deref());
    let commits = repo
        .commits_since(since)
        .context("Failed to collect commits since the latest release")?;
    let messages: Vec<String> = commits.into_iter().map(|c| c.message).collect();

    if messages.is_empty() {
        let latest_tag = baseline
            .latest_stable
            .as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "unknown".to_string());
        warnings.push(BoundaryWarning::NoNewCommits {
            latest_tag,
            current_commit_hash: repo.head_commit().unwrap_or_default(),
        });
    }

    let classifier = BumpClassifier::new(config.commits.clone());
    let bump = classifier
        .classify(&messages)
        .unwrap_or(resolver.config().default_bump);
    debug!(bump = %bump, commits = messages.len(), "determined bump kind");

    let resolution = resolver.resolve(&tags, bump)?;
    if tags.iter().any(|t| t.name == resolution.tag) {
        bail!("Tag '{}' already exists", resolution.tag);
    }

    let mut result = WorkflowResult {
        tag: resolution.tag,
        branch,
        remote,
        previous_tag: resolution.previous.map(|t| t.name),
        bump,
        path: resolution.path,
        commits: messages,
        created: false,
        pushed: false,
        warnings,
    };

    if args.dry_run {
        info!(tag = %result.tag, "dry run, not creating tag");
        return Ok(result);
    }

    let head = repo.head_commit().context("Cannot resolve HEAD")?;
    repo.create_tag(
        &result.tag,
        config.tagging.annotated,
        &config.tagging.message_for(&result.tag),
        &head,
    )
    .with_context(|| format!("Failed to create tag '{}'", result.tag))?;
    result.created = true;

    if config.tagging.push && !args.no_push {
        repo.push_tag(&result.remote, &result.tag)
            .with_context(|| format!("Failed to push tag '{}' to '{}'", result.tag, result.remote))?;
        result.pushed = true;
        info!(tag = %result.tag, remote = %result.remote, "pushed tag");
    }

    Ok(result)
}
