//! Console connection and wait configuration, read from TOML.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use url::Url;

use crate::version::ApplianceVersion;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Address of the management console
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Version the appliance reports, e.g. "5.9.0.1"
    #[serde(default = "default_appliance_version")]
    pub appliance_version: String,
    #[serde(default)]
    pub user: UserCredential,
    #[serde(default)]
    pub waits: WaitSettings,
}

/// Account the test session logs in with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCredential {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    /// Name shown in the user menu once logged in
    #[serde(default = "default_display_name")]
    pub display_name: String,
}

/// Delays and timeouts of the UI waits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitSettings {
    #[serde(default = "default_poll_delay_ms")]
    pub poll_delay_ms: u64,
    /// How long a page may take to redirect after an action
    #[serde(default = "default_redirect_timeout_secs")]
    pub redirect_timeout_secs: u64,
    #[serde(default = "default_delete_timeout_secs")]
    pub delete_timeout_secs: u64,
    #[serde(default = "default_exists_timeout_secs")]
    pub exists_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://localhost".to_string()
}

fn default_appliance_version() -> String {
    "5.9.0".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "smartvm".to_string()
}

fn default_display_name() -> String {
    "Administrator".to_string()
}

fn default_poll_delay_ms() -> u64 {
    1000
}

fn default_redirect_timeout_secs() -> u64 {
    10
}

fn default_delete_timeout_secs() -> u64 {
    500
}

fn default_exists_timeout_secs() -> u64 {
    1000
}

impl Default for UserCredential {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            display_name: default_display_name(),
        }
    }
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            poll_delay_ms: default_poll_delay_ms(),
            redirect_timeout_secs: default_redirect_timeout_secs(),
            delete_timeout_secs: default_delete_timeout_secs(),
            exists_timeout_secs: default_exists_timeout_secs(),
        }
    }
}

impl WaitSettings {
    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }

    pub fn redirect_timeout(&self) -> Duration {
        Duration::from_secs(self.redirect_timeout_secs)
    }

    pub fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete_timeout_secs)
    }

    pub fn exists_timeout(&self) -> Duration {
        Duration::from_secs(self.exists_timeout_secs)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            appliance_version: default_appliance_version(),
            user: UserCredential::default(),
            waits: WaitSettings::default(),
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|err| anyhow!("Failed to parse console config: {err}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| anyhow!("Failed to read config file {}: {}", path.display(), err))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded console config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        self.version()?;
        if self.waits.poll_delay_ms == 0 {
            return Err(anyhow!("waits.poll_delay_ms must be greater than zero"));
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|err| anyhow!("Invalid base_url '{}': {}", self.base_url, err))
    }

    pub fn version(&self) -> Result<ApplianceVersion> {
        ApplianceVersion::parse(&self.appliance_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_document() -> Result<()> {
        let config = ConsoleConfig::from_toml_str("")?;
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.waits.delete_timeout(), Duration::from_secs(500));
        assert_eq!(config.waits.exists_timeout(), Duration::from_secs(1000));
        assert_eq!(config.user.display_name, "Administrator");
        Ok(())
    }

    #[test]
    fn test_partial_sections() -> Result<()> {
        let config = ConsoleConfig::from_toml_str(
            r#"
            base_url = "https://console.example.com"
            appliance_version = "5.8.3.0"

            [user]
            username = "tester"

            [waits]
            poll_delay_ms = 50
            "#,
        )?;

        assert_eq!(config.base_url()?.host_str(), Some("console.example.com"));
        assert!(config.version()? < ApplianceVersion::parse("5.9")?);
        assert_eq!(config.user.username, "tester");
        assert_eq!(config.user.password, "smartvm");
        assert_eq!(config.waits.poll_delay(), Duration::from_millis(50));
        assert_eq!(config.waits.redirect_timeout_secs, 10);
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(ConsoleConfig::from_toml_str(r#"base_url = "not a url""#).is_err());
        assert!(ConsoleConfig::from_toml_str(r#"appliance_version = "next""#).is_err());
        assert!(ConsoleConfig::from_toml_str("[waits]\npoll_delay_ms = 0").is_err());
    }

    #[test]
    fn test_toml_output_parses_back() -> Result<()> {
        let config = ConsoleConfig::default();
        let parsed = ConsoleConfig::from_toml_str(&config.to_toml_string()?)?;
        assert_eq!(parsed, config);
        Ok(())
    }
}
