use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "OPENWEATHER_BASE_URL";
pub const DOCS_URL_ENV: &str = "OPENWEATHER_DOCS_URL";

/// Top-level configuration stored on disk. Every field is optional here;
/// [`Config::resolve`] applies environment overrides and defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Weather API base URL; defaults to the public OpenWeather endpoint.
    pub base_url: Option<String>,

    /// Link to the provider documentation shown by `skycast docs`.
    pub docs_url: Option<String>,
}

/// Fully resolved settings, ready to construct a client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    /// Absent docs URL degrades gracefully: a warning is logged at
    /// resolution time and the docs surface is suppressed, not fatal.
    pub docs_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<Settings> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// Environment values override the file; the base URL falls back to
    /// [`DEFAULT_BASE_URL`]; a missing API key is a hard error with a
    /// configuration hint; a missing docs URL is logged and tolerated.
    pub fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<Settings> {
        let api_key = env(API_KEY_ENV)
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `skycast configure`, or set {API_KEY_ENV}."
                )
            })?;

        let base_url = env(BASE_URL_ENV)
            .or_else(|| self.base_url.clone())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let docs_url = env(DOCS_URL_ENV)
            .or_else(|| self.docs_url.clone())
            .filter(|url| !url.trim().is_empty());

        if docs_url.is_none() {
            tracing::warn!("No docs URL configured; `skycast docs` will be unavailable");
        }

        Ok(Settings { api_key, base_url, docs_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn resolve(cfg: &Config, env: HashMap<String, String>) -> Result<Settings> {
        cfg.resolve_with(move |name| env.get(name).cloned())
    }

    #[test]
    fn missing_api_key_is_a_hard_error() {
        let err = resolve(&Config::default(), env_of(&[])).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
        assert!(err.to_string().contains("skycast configure"));
    }

    #[test]
    fn file_values_are_used_when_env_is_empty() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            base_url: Some("https://example.test/api".into()),
            docs_url: Some("https://example.test/docs".into()),
        };

        let settings = resolve(&cfg, env_of(&[])).expect("resolution should succeed");
        assert_eq!(settings.api_key, "FILE_KEY");
        assert_eq!(settings.base_url, "https://example.test/api");
        assert_eq!(settings.docs_url.as_deref(), Some("https://example.test/docs"));
    }

    #[test]
    fn environment_overrides_file() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            base_url: None,
            docs_url: None,
        };

        let env = env_of(&[(API_KEY_ENV, "ENV_KEY"), (BASE_URL_ENV, "https://override.test")]);
        let settings = resolve(&cfg, env).expect("resolution should succeed");
        assert_eq!(settings.api_key, "ENV_KEY");
        assert_eq!(settings.base_url, "https://override.test");
    }

    #[test]
    fn base_url_defaults_and_docs_url_is_optional() {
        let cfg = Config { api_key: Some("KEY".into()), base_url: None, docs_url: None };

        let settings = resolve(&cfg, env_of(&[])).expect("resolution should succeed");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert!(settings.docs_url.is_none());
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let cfg = Config {
            api_key: Some("  ".into()),
            base_url: Some("".into()),
            docs_url: Some(" ".into()),
        };

        let err = resolve(&cfg, env_of(&[])).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: None,
            docs_url: Some("https://openweathermap.org/api".into()),
        };

        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");
        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
        assert!(parsed.base_url.is_none());
        assert_eq!(parsed.docs_url.as_deref(), Some("https://openweathermap.org/api"));
    }
}
