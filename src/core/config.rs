//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.review-analyzer/config.toml`. If missing on first run,
//! a commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{DEFAULT_BASE_URL, SentimentFilter};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub list_limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub default_filter: Option<SentimentFilter>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LIST_LIMIT: u32 = 50;

pub const ENV_API_URL: &str = "REVIEW_API_URL";
pub const ENV_LIST_LIMIT: &str = "REVIEW_LIST_LIMIT";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub list_limit: u32,
    pub default_filter: SentimentFilter,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub list_limit: Option<u32>,
    pub filter: Option<SentimentFilter>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.review-analyzer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".review-analyzer").join("config.toml"))
}

/// Load config from `~/.review-analyzer/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AnalyzerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AnalyzerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AnalyzerConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AnalyzerConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AnalyzerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Review Analyzer Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://127.0.0.1:5000/api"   # Or set REVIEW_API_URL
# list_limit = 50                           # Or set REVIEW_LIST_LIMIT

# [ui]
# default_filter = "all"                    # "all", "positive", "negative", "neutral"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AnalyzerConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &AnalyzerConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env(ENV_API_URL).filter(|v| !v.trim().is_empty()))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // List limit: CLI → env → config → default
    let list_limit = cli
        .list_limit
        .or_else(|| {
            env(ENV_LIST_LIMIT).and_then(|raw| match raw.trim().parse::<u32>() {
                Ok(limit) => Some(limit),
                Err(_) => {
                    warn!("Ignoring invalid {}={:?}", ENV_LIST_LIMIT, raw);
                    None
                }
            })
        })
        .or(config.api.list_limit)
        .unwrap_or(DEFAULT_LIST_LIMIT);

    let default_filter = cli
        .filter
        .or(config.ui.default_filter)
        .unwrap_or_default();

    ResolvedConfig {
        base_url,
        list_limit,
        default_filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&AnalyzerConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.list_limit, DEFAULT_LIST_LIMIT);
        assert_eq!(resolved.default_filter, SentimentFilter::All);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AnalyzerConfig {
            api: ApiConfig {
                base_url: Some("http://reviews.local/api".to_string()),
                list_limit: Some(10),
            },
            ui: UiConfig {
                default_filter: Some(SentimentFilter::Negative),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://reviews.local/api");
        assert_eq!(resolved.list_limit, 10);
        assert_eq!(resolved.default_filter, SentimentFilter::Negative);
    }

    #[test]
    fn test_env_overrides_config() {
        let config = AnalyzerConfig {
            api: ApiConfig {
                base_url: Some("http://from-config/api".to_string()),
                list_limit: Some(10),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            ENV_API_URL => Some("http://from-env/api".to_string()),
            ENV_LIST_LIMIT => Some("20".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env/api");
        assert_eq!(resolved.list_limit, 20);
    }

    #[test]
    fn test_invalid_env_limit_is_ignored() {
        let env = |key: &str| (key == ENV_LIST_LIMIT).then(|| "lots".to_string());
        let resolved = resolve_with_env(&AnalyzerConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.list_limit, DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let env = |key: &str| (key == ENV_API_URL).then(|| "http://from-env/api".to_string());
        let cli = CliOverrides {
            base_url: Some("http://from-cli/api".to_string()),
            list_limit: Some(5),
            filter: Some(SentimentFilter::Positive),
        };
        let config = AnalyzerConfig {
            ui: UiConfig {
                default_filter: Some(SentimentFilter::Neutral),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli/api");
        assert_eq!(resolved.list_limit, 5);
        assert_eq!(resolved.default_filter, SentimentFilter::Positive);
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[api]
base_url = "http://192.168.1.100:5000/api"
list_limit = 100

[ui]
default_filter = "positive"
"#;
        let config: AnalyzerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://192.168.1.100:5000/api")
        );
        assert_eq!(config.api.list_limit, Some(100));
        assert_eq!(config.ui.default_filter, Some(SentimentFilter::Positive));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[api]
list_limit = 5
"#;
        let config: AnalyzerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.list_limit, Some(5));
        assert!(config.api.base_url.is_none());
        assert!(config.ui.default_filter.is_none());
    }

    #[test]
    fn test_bad_filter_is_parse_error() {
        let toml_str = "[ui]\ndefault_filter = \"angry\"\n";
        assert!(toml::from_str::<AnalyzerConfig>(toml_str).is_err());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!(
            "review-analyzer-config-test-{}",
            std::process::id()
        ));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.api.base_url.is_none());

        let generated = fs::read_to_string(&path).unwrap();
        assert!(generated.contains("# base_url"));
        // The generated file is all comments, so it parses to defaults
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.api.list_limit.is_none());

        let _ = fs::remove_dir_all(&dir);
    }
}
