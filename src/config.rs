use crate::domain::{
    is_valid_channel, BranchContext, BumpKind, ChannelRank, StructuredVersion, TagPrefix,
};
use crate::error::{Result, TaggerError};
use crate::resolver::ChannelConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "release-tagger.toml";

/// Represents the complete configuration for release-tagger.
///
/// Contains the tag prefix, branch classification, bump defaults, channel
/// ordering, commit classification rules and tagging behavior.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Regex matched against the start of tag names; defaults to the escaped prefix
    #[serde(default)]
    pub prefix_pattern: Option<String>,

    #[serde(default = "default_release_branches")]
    pub release_branches: Vec<String>,

    /// Prerelease branch name -> channel token
    #[serde(default = "default_channels")]
    pub channels: HashMap<String, String>,

    #[serde(default = "default_bump")]
    pub default_bump: BumpKind,

    #[serde(default = "default_prerelease_bump")]
    pub default_prerelease_bump: BumpKind,

    #[serde(default = "default_initial_prerelease_bump")]
    pub initial_prerelease_bump: BumpKind,

    /// Version used when no matching tag exists yet
    #[serde(default)]
    pub initial_version: Option<String>,

    /// Raw version that bypasses resolution
    #[serde(default)]
    pub custom_tag: Option<String>,

    /// Channels from least to most mature
    #[serde(default = "default_channel_rank")]
    pub channel_rank: Vec<String>,

    #[serde(default)]
    pub commits: CommitsConfig,

    #[serde(default)]
    pub tagging: TaggingConfig,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_release_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

fn default_channels() -> HashMap<String, String> {
    let mut channels = HashMap::new();
    channels.insert("develop".to_string(), "dev".to_string());
    channels.insert("release".to_string(), "rc".to_string());
    channels
}

fn default_bump() -> BumpKind {
    BumpKind::Patch
}

fn default_prerelease_bump() -> BumpKind {
    BumpKind::Prerelease
}

fn default_initial_prerelease_bump() -> BumpKind {
    BumpKind::Preminor
}

fn default_channel_rank() -> Vec<String> {
    vec!["dev".to_string(), "rc".to_string()]
}

/// Returns the default list of commit types that trigger minor bumps.
fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default list of commit types that trigger patch bumps.
fn default_patch_types() -> Vec<String> {
    vec!["fix".to_string(), "perf".to_string(), "revert".to_string()]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

/// Configuration for conventional commit classification.
///
/// Breaking changes always map to a major bump; the type lists decide the rest.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitsConfig {
    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        CommitsConfig {
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tag_message() -> String {
    "Release {tag}".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Configuration for how the resolved tag is created and published.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaggingConfig {
    /// Create annotated tags instead of lightweight ones
    #[serde(default = "default_true")]
    pub annotated: bool,

    /// Annotation message; `{tag}` is replaced by the tag name
    #[serde(default = "default_tag_message")]
    pub message: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Fetch remote tags before resolving
    #[serde(default = "default_true")]
    pub fetch: bool,

    /// Push the created tag
    #[serde(default = "default_true")]
    pub push: bool,
}

impl TaggingConfig {
    /// The annotation message for `tag`
    pub fn message_for(&self, tag: &str) -> String {
        self.message.replace("{tag}", tag)
    }
}

impl Default for TaggingConfig {
    fn default() -> Self {
        TaggingConfig {
            annotated: true,
            message: default_tag_message(),
            remote: default_remote(),
            fetch: true,
            push: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_prefix: default_tag_prefix(),
            prefix_pattern: None,
            release_branches: default_release_branches(),
            channels: default_channels(),
            default_bump: default_bump(),
            default_prerelease_bump: default_prerelease_bump(),
            initial_prerelease_bump: default_initial_prerelease_bump(),
            initial_version: None,
            custom_tag: None,
            channel_rank: default_channel_rank(),
            commits: CommitsConfig::default(),
            tagging: TaggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)
            .map_err(|e| TaggerError::config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check for settings the resolver cannot work with
    pub fn validate(&self) -> Result<()> {
        self.prefix()?;

        for (branch, channel) in &self.channels {
            if !is_valid_channel(channel) {
                return Err(TaggerError::config(format!(
                    "Channel '{}' for branch '{}' must be non-empty and alphanumeric",
                    channel, branch
                )));
            }
            if self.release_branches.contains(branch) {
                return Err(TaggerError::config(format!(
                    "Branch '{}' is configured both as a release and a prerelease branch",
                    branch
                )));
            }
        }

        if let Some(channel) = self.channel_rank.iter().find(|c| !is_valid_channel(c)) {
            return Err(TaggerError::config(format!(
                "Channel rank entry '{}' must be non-empty and alphanumeric",
                channel
            )));
        }

        if matches!(
            self.initial_prerelease_bump,
            BumpKind::Prerelease | BumpKind::None
        ) {
            return Err(TaggerError::config(format!(
                "initial_prerelease_bump cannot be '{}': it would not open a new line",
                self.initial_prerelease_bump
            )));
        }

        self.initial_version()?;
        Ok(())
    }

    /// Build the tag prefix from `tag_prefix` and `prefix_pattern`
    pub fn prefix(&self) -> Result<TagPrefix> {
        match &self.prefix_pattern {
            Some(pattern) => TagPrefix::with_pattern(self.tag_prefix.clone(), pattern),
            None => Ok(TagPrefix::literal(self.tag_prefix.clone())),
        }
    }

    /// Parsed `initial_version`, if configured
    pub fn initial_version(&self) -> Result<Option<StructuredVersion>> {
        self.initial_version
            .as_deref()
            .map(|raw| {
                StructuredVersion::parse(raw).map_err(|reason| {
                    TaggerError::config(format!("Invalid initial_version: {}", reason))
                })
            })
            .transpose()
    }

    /// Classify a branch as production or prerelease
    pub fn branch(&self, name: &str) -> Result<BranchContext> {
        if self.release_branches.iter().any(|b| b == name) {
            return Ok(BranchContext::production(name));
        }
        match self.channels.get(name) {
            Some(channel) => Ok(BranchContext::prerelease(name, channel.clone())),
            None => Err(TaggerError::config(format!(
                "Branch '{}' is not configured for tagging",
                name
            ))),
        }
    }

    /// Names of every branch configured for tagging, sorted
    pub fn configured_branches(&self) -> Vec<String> {
        let mut branches: Vec<String> = self
            .release_branches
            .iter()
            .chain(self.channels.keys())
            .cloned()
            .collect();
        branches.sort();
        branches.dedup();
        branches
    }

    /// Build the resolver configuration for `branch`.
    ///
    /// `custom_tag` takes precedence over the configured one.
    pub fn channel_config(&self, branch: &str, custom_tag: Option<&str>) -> Result<ChannelConfig> {
        let context = self.branch(branch)?;
        let prefix = self.prefix()?;

        let mut config = match &context.channel {
            None => ChannelConfig::production(prefix).with_default_bump(self.default_bump),
            Some(channel) => ChannelConfig::prerelease(prefix, channel.clone())
                .with_default_bump(self.default_prerelease_bump),
        }
        .with_initial_prerelease_bump(self.initial_prerelease_bump)
        .with_channel_rank(ChannelRank::new(self.channel_rank.iter().cloned()));

        if let Some(initial) = self.initial_version()? {
            config = config.with_initial_version(initial);
        }

        let custom_tag = custom_tag
            .or(self.custom_tag.as_deref())
            .filter(|t| !t.trim().is_empty());
        if let Some(tag) = custom_tag {
            config = config.with_override(tag.trim());
        }

        Ok(config)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-tagger.toml` in current directory
/// 3. `release-tagger.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
