//! Configuration management for Medbill CLI
//!
//! Stores API key, doctor profiles, and default settings in
//! ~/.config/medbill/config.toml. `MEDBILL_API_KEY` and `MEDBILL_BASE_URL`
//! (environment or `.env`) take precedence over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const CONFIG_DIR: &str = "medbill";
const CONFIG_FILE: &str = "config.toml";

pub const API_KEY_ENV: &str = "MEDBILL_API_KEY";
pub const BASE_URL_ENV: &str = "MEDBILL_BASE_URL";

/// Named shortcut for a doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub doctor_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_profile: None,
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (or defaults), without environment overrides
    pub fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    /// Load config with environment overrides applied
    pub fn load() -> Result<Self> {
        let config = Self::load_file()?;
        Ok(config.with_overrides(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(BASE_URL_ENV).ok(),
        ))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Replace key and URL with non-empty override values
    pub fn with_overrides(mut self, api_key: Option<String>, base_url: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Set API key
    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// Add or replace a profile
    pub fn add_profile(&mut self, name: String, doctor_id: Uuid, display_name: Option<String>) {
        self.profiles.insert(
            name,
            Profile {
                doctor_id,
                name: display_name,
            },
        );
    }

    /// Remove a profile, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> bool {
        if self.profiles.remove(name).is_none() {
            return false;
        }
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        true
    }

    /// Set default profile
    pub fn set_default_profile(&mut self, name: String) -> bool {
        if self.profiles.contains_key(&name) {
            self.default_profile = Some(name);
            true
        } else {
            false
        }
    }

    /// Get the active profile (specified or default)
    pub fn get_profile(&self, name: Option<&str>) -> Option<&Profile> {
        let profile_name = name.or(self.default_profile.as_deref())?;
        self.profiles.get(profile_name)
    }

    /// Doctor ID from profile
    pub fn get_doctor_id(&self, profile: Option<&str>) -> Option<Uuid> {
        self.get_profile(profile).map(|p| p.doctor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.base_url, default_base_url());
        assert!(config.api_key.is_none());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_profile_lifecycle() {
        let mut config = Config::default();
        let ana = Uuid::new_v4();
        config.add_profile("ana".into(), ana, Some("Ana Souza".into()));

        assert!(config.get_doctor_id(None).is_none());
        assert!(!config.set_default_profile("bruno".into()));
        assert!(config.set_default_profile("ana".into()));
        assert_eq!(config.get_doctor_id(None), Some(ana));
        assert_eq!(config.get_doctor_id(Some("ana")), Some(ana));
        assert!(config.get_doctor_id(Some("bruno")).is_none());

        assert!(config.remove_profile("ana"));
        assert!(config.default_profile.is_none());
        assert!(!config.remove_profile("ana"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = Config::default();
        config.set_api_key("secret".into());
        config.add_profile("ana".into(), Uuid::new_v4(), None);
        config.set_default_profile("ana".into());

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.api_key.as_deref(), Some("secret"));
        assert_eq!(parsed.profiles, config.profiles);
        assert_eq!(parsed.default_profile.as_deref(), Some("ana"));
    }

    #[test]
    fn test_overrides_ignore_empty_values() {
        let mut config = Config::default();
        config.set_api_key("from-file".into());

        let config = config.with_overrides(Some(" ".into()), Some("https://billing.example".into()));
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.base_url, "https://billing.example");

        let config = config.with_overrides(Some("from-env".into()), None);
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
    }
}
