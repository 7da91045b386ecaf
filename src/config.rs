//! Configuration for where the content document lives.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CONTENT_LOADER_BASE, CONTENT_LOADER_PATH,
//!    CONTENT_LOADER_TIMEOUT_SECONDS)
//! 2. Config file (.content-loader/config.yaml)
//! 3. Defaults (current directory, content.json, no timeout)
//!
//! Config file discovery:
//! - Searches current directory and parents for .content-loader/config.yaml
//! - Falls back to ~/.content-loader/config.yaml
//! - A relative local base is resolved against the project root (the parent
//!   of .content-loader/)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;

/// Default resource path, relative to the base
pub const DEFAULT_CONTENT_PATH: &str = "content.json";

pub const ENV_BASE: &str = "CONTENT_LOADER_BASE";
pub const ENV_PATH: &str = "CONTENT_LOADER_PATH";
pub const ENV_TIMEOUT: &str = "CONTENT_LOADER_TIMEOUT_SECONDS";

const CONFIG_DIR: &str = ".content-loader";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentSection {
    /// URL or directory the path is resolved against
    pub base: Option<String>,
    /// Resource path relative to the base
    pub path: Option<String>,
    /// Request timeout in seconds (HTTP only)
    pub timeout_seconds: Option<u64>,
}

/// Where the resource path is resolved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBase {
    /// Remote base, fetched over HTTP
    Url(Url),

    /// Local directory, read from disk
    Dir(PathBuf),
}

impl Default for ContentBase {
    fn default() -> Self {
        ContentBase::Dir(PathBuf::from("."))
    }
}

impl ContentBase {
    /// `http://` and `https://` values are URLs; anything else is a directory
    pub fn parse(value: &str) -> Result<Self> {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(value).with_context(|| format!("Invalid base URL: {}", value))?;
            Ok(ContentBase::Url(url))
        } else {
            Ok(ContentBase::Dir(PathBuf::from(value)))
        }
    }
}

impl std::fmt::Display for ContentBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentBase::Url(url) => write!(f, "{}", url),
            ContentBase::Dir(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Resolved loader configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Base the path is resolved against
    pub base: ContentBase,
    /// Resource path relative to the base
    pub path: String,
    /// Optional request timeout; transport limits apply when absent
    pub timeout_seconds: Option<u64>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base: ContentBase::default(),
            path: DEFAULT_CONTENT_PATH.to_string(),
            timeout_seconds: None,
            config_file: None,
        }
    }
}

impl LoaderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Human-readable resolved location of the document
    pub fn location(&self) -> String {
        match &self.base {
            ContentBase::Url(url) => url
                .join(&self.path)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{}{}", url, self.path)),
            ContentBase::Dir(dir) => dir.join(&self.path).display().to_string(),
        }
    }
}

/// Find config file by searching `start` and its parents, then the home dir
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a base value from the config file against the project root
fn resolve_base(root: &Path, value: &str) -> Result<ContentBase> {
    match ContentBase::parse(value)? {
        ContentBase::Dir(dir) if dir.is_relative() => Ok(ContentBase::Dir(root.join(dir))),
        base => Ok(base),
    }
}

fn parse_timeout(value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT, value))
}

/// Merge env, config file and defaults.
///
/// `env` looks up environment variables; pass `|_| None` to ignore the
/// process environment.
pub fn resolve_config<F>(config_file: Option<PathBuf>, env: F) -> Result<LoaderConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = LoaderConfig {
        config_file: config_file.clone(),
        ..Default::default()
    };

    if let Some(ref config_path) = config_file {
        let file = load_config_file(config_path)?;

        // Project root is the parent of .content-loader/
        let root = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        if let Some(ref base) = file.content.base {
            config.base = resolve_base(root, base)?;
        }
        if let Some(path) = file.content.path {
            config.path = path;
        }
        config.timeout_seconds = file.content.timeout_seconds;
    }

    if let Some(base) = env(ENV_BASE) {
        config.base = ContentBase::parse(&base)?;
    }
    if let Some(path) = env(ENV_PATH) {
        config.path = path;
    }
    if let Some(timeout) = env(ENV_TIMEOUT) {
        config.timeout_seconds = Some(parse_timeout(&timeout)?);
    }

    Ok(config)
}

/// Load configuration from all sources
pub fn load_config() -> Result<LoaderConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve_config(find_config_file(&cwd), |key| std::env::var(key).ok())
}

/// Load configuration from an explicit config file, still honouring env
pub fn load_config_from(path: &Path) -> Result<LoaderConfig> {
    resolve_config(Some(path.to_path_buf()), |key| std::env::var(key).ok())
}
