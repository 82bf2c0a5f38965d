use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Description used when the operator leaves it blank.
pub const DEFAULT_DESCRIPTION: &str = "Created via automated script";

/// Remote name used for the qualified push.
pub const REMOTE: &str = "origin";

/// The single branch this tool manages.
pub const BRANCH: &str = "main";

/// Repository visibility on the hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl Visibility {
    /// Parse operator input: trimmed, case-insensitive; anything other than
    /// `public` or `private` falls back to private.
    pub fn parse_or_private(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "public" => Visibility::Public,
            _ => Visibility::Private,
        }
    }

    /// The `gh repo create` flag for this visibility.
    pub fn flag(self) -> &'static str {
        match self {
            Visibility::Public => "--public",
            Visibility::Private => "--private",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// Everything needed to create the remote repository. Built once by the
/// prompt, consumed once by the new-repository flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSettings {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
}

impl RepoSettings {
    /// Normalize raw operator input. Returns `None` if the trimmed name is empty.
    pub fn from_input(
        name: &str,
        description: &str,
        visibility: &str,
        default_description: &str,
    ) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let description = match description.trim() {
            "" => default_description.to_string(),
            d => d.to_string(),
        };

        Some(Self {
            name: name.to_string(),
            description,
            visibility: Visibility::parse_or_private(visibility),
        })
    }
}

/// Settings from `config.toml`. Every key is optional.
///
/// ```toml
/// [tools]
/// git = "git"
/// gh = "gh"
///
/// [defaults]
/// description = "Created via automated script"
///
/// [host]
/// url = "https://github.com"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PushConfig {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub host: HostConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    #[serde(default = "default_git")]
    pub git: String,
    #[serde(default = "default_gh")]
    pub gh: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: default_git(),
            gh: default_gh(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            description: default_description(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    #[serde(default = "default_host_url")]
    pub url: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            url: default_host_url(),
        }
    }
}

fn default_git() -> String {
    "git".to_string()
}

fn default_gh() -> String {
    "gh".to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_host_url() -> String {
    "https://github.com".to_string()
}

impl PushConfig {
    /// Default location: `<config_dir>/autopush/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("autopush").join("config.toml"))
    }

    /// Load config. An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Parse config from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: PushConfig = toml::from_str(content).context("Invalid config.toml")?;
        tracing::debug!(?config, "loaded config");
        Ok(config)
    }

    /// Public URL of a repository on the configured host.
    pub fn repo_url(&self, owner: &str, name: &str) -> String {
        format!("{}/{}/{}", self.host.url.trim_end_matches('/'), owner, name)
    }
}
