//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.apiscout.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Shared HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// JSONPlaceholder settings.
    #[serde(default)]
    pub todos: TodosConfig,

    /// Reddit settings.
    #[serde(default)]
    pub reddit: RedditConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings shared by both HTTP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request. Reddit throttles the
    /// stock client identity, so keep this descriptive.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!(
        "linux:apiscout:v{} (by /u/apiscout)",
        env!("CARGO_PKG_VERSION")
    )
}

/// JSONPlaceholder endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodosConfig {
    /// Base URL of the JSONPlaceholder API.
    #[serde(default = "default_todos_base_url")]
    pub base_url: String,
}

impl Default for TodosConfig {
    fn default() -> Self {
        Self {
            base_url: default_todos_base_url(),
        }
    }
}

fn default_todos_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

/// Reddit endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// Base URL of the Reddit API.
    #[serde(default = "default_reddit_base_url")]
    pub base_url: String,

    /// Posts requested per listing page. The API caps this at 100; larger
    /// values are clamped by the client.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Titles printed by `reddit top` when `--limit` is not given.
    #[serde(default = "default_top_limit")]
    pub top_limit: u32,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            base_url: default_reddit_base_url(),
            page_size: default_page_size(),
            top_limit: default_top_limit(),
        }
    }
}

fn default_reddit_base_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_top_limit() -> u32 {
    10
}

/// Output settings for the export commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory exported files are written into.
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".apiscout.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only
    /// explicitly provided values override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(timeout) = args.timeout {
            self.http.timeout_seconds = timeout;
        }

        if let Some(ref user_agent) = args.user_agent {
            self.http.user_agent = user_agent.clone();
        }

        if let Some(ref out_dir) = args.out_dir {
            self.output.directory = out_dir.display().to_string();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
