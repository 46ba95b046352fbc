//! Configuration for BrainCache paths and the backend endpoint.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (BRAINCACHE_HOME, BRAINCACHE_BACKEND)
//! 2. Config file (.braincache/config.yaml)
//! 3. Defaults (~/.braincache, http://localhost:3000)
//!
//! Config file discovery:
//! - Searches current directory and parents for .braincache/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub backend: Option<BackendConfig>,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the content repository API
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Client state directory (relative to config file)
    pub home: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the braincache home (token, thumbnail cache)
    pub home: PathBuf,
    /// Base URL of the backend
    pub backend_url: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Where the session token file lives
    pub fn token_path(&self) -> PathBuf {
        self.home.join("session.json")
    }

    /// Where cached thumbnails live
    pub fn thumbnails_dir(&self) -> PathBuf {
        self.home.join("thumbnails")
    }
}

/// Default backend, matching the development server
const DEFAULT_BACKEND: &str = "http://localhost:3000";

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".braincache").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".braincache");

    let config_file = find_config_file();

    let (home, backend_url) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        let home = if let Ok(env_home) = std::env::var("BRAINCACHE_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            // home is relative to the .braincache/ directory
            let braincache_dir = config_path.parent().unwrap_or(Path::new("."));
            resolve_path(braincache_dir, home_path)
        } else {
            default_home.clone()
        };

        let backend_url = if let Ok(env_backend) = std::env::var("BRAINCACHE_BACKEND") {
            env_backend
        } else {
            config
                .backend
                .and_then(|b| b.url)
                .unwrap_or_else(|| DEFAULT_BACKEND.to_string())
        };

        (home, backend_url)
    } else {
        let home = std::env::var("BRAINCACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let backend_url =
            std::env::var("BRAINCACHE_BACKEND").unwrap_or_else(|_| DEFAULT_BACKEND.to_string());

        (home, backend_url)
    };

    // Trailing slashes break endpoint joining
    let backend_url = backend_url.trim_end_matches('/').to_string();

    Ok(ResolvedConfig {
        home,
        backend_url,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Get the braincache home directory
pub fn braincache_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the backend base URL
pub fn backend_url() -> Result<String> {
    Ok(config()?.backend_url.clone())
}

/// Get the session token path ($BRAINCACHE_HOME/session.json)
pub fn token_path() -> Result<PathBuf> {
    Ok(config()?.token_path())
}

/// Get the thumbnail cache directory
pub fn thumbnails_dir() -> Result<PathBuf> {
    Ok(config()?.thumbnails_dir())
}
