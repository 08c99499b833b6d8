//! Configuration management

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::errors::ConfigError;

pub const DEFAULT_DIRECTORY_URL: &str = "https://crymp.net/api/servers";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub directory: DirectoryConfig,
    pub presence: PresenceConfig,
    pub state_server: StateServerConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DirectoryConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PresenceConfig {
    pub refresh_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StateServerConfig {
    pub enabled: bool,
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub discord: Option<DiscordConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscordConfig {
    pub enabled: bool,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "crymp-bot".to_string(),
                prefix: "!".to_string(),
            },
            directory: DirectoryConfig {
                url: DEFAULT_DIRECTORY_URL.to_string(),
                timeout_seconds: 10,
            },
            presence: PresenceConfig {
                refresh_seconds: 30,
            },
            state_server: StateServerConfig {
                enabled: true,
                bind: "0.0.0.0:8080".to_string(),
            },
            adapters: AdaptersConfig {
                discord: Some(DiscordConfig {
                    enabled: false,
                    token: None,
                }),
                console: Some(ConsoleConfig {
                    enabled: true,
                }),
            },
        }
    }
}

impl Config {
    /// Parse only; call `validate` once overrides are applied
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Environment variables override whatever was loaded
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("DISCORD_TOKEN") {
            self.set_discord_token(token);
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Ok(url) = std::env::var("DIRECTORY_URL") {
            self.directory.url = url;
        }

        if let Ok(bind) = std::env::var("STATE_BIND") {
            self.state_server.bind = bind;
        }
    }

    pub fn set_discord_token(&mut self, token: String) {
        let discord = self.adapters.discord.get_or_insert(DiscordConfig {
            enabled: true,
            token: None,
        });
        discord.token = Some(token);
        discord.enabled = true;
    }

    /// Token of an enabled Discord adapter, if any
    pub fn discord_token(&self) -> Option<&str> {
        self.adapters
            .discord
            .as_ref()
            .filter(|d| d.enabled)
            .and_then(|d| d.token.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if self.directory.url.trim().is_empty() {
            return Err(ConfigError::MissingField("directory.url".to_string()));
        }
        if self.presence.refresh_seconds == 0 {
            return Err(ConfigError::InvalidValue("presence.refresh-seconds must be positive".to_string()));
        }
        if self.state_server.enabled {
            self.state_bind()?;
        }
        Ok(())
    }

    pub fn state_bind(&self) -> Result<SocketAddr, ConfigError> {
        self.state_server
            .bind
            .parse()
            .map_err(|e| ConfigError::InvalidValue(format!("state-server.bind {:?}: {}", self.state_server.bind, e)))
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.presence.refresh_seconds)
    }

    pub fn directory_timeout(&self) -> Duration {
        Duration::from_secs(self.directory.timeout_seconds)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.refresh_period(), Duration::from_secs(30));
        assert_eq!(config.directory.url, DEFAULT_DIRECTORY_URL);
        assert_eq!(config.discord_token(), None);
    }

    #[test]
    fn test_load_round_trips_default_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(Config::default().to_yaml().unwrap().as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.state_server.bind, "0.0.0.0:8080");
        assert!(config.adapters.console.unwrap().enabled);
    }

    #[test]
    fn test_load_reads_kebab_case_keys() {
        let yaml = r#"
bot:
  name: test
  prefix: "?"
directory:
  url: http://localhost:9000/api/servers
  timeout-seconds: 3
presence:
  refresh-seconds: 5
state-server:
  enabled: false
  bind: nowhere
adapters:
  discord:
    enabled: true
    token: abc
  console: null
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.directory_timeout(), Duration::from_secs(3));
        assert_eq!(config.discord_token(), Some("abc"));
        assert!(config.adapters.console.is_none());
    }

    #[test]
    fn test_load_defers_validation_to_overrides() {
        let mut config = Config::default();
        config.state_server.bind = "not an address".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();

        let mut config = Config::load(file.path()).unwrap();
        assert!(config.validate().is_err());

        config.state_server.bind = "127.0.0.1:9090".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.presence.refresh_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = Config::default();
        config.state_server.bind = "not an address".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = Config::default();
        config.directory.url = " ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_token_override_enables_discord() {
        let mut config = Config::default();
        config.adapters.discord = None;
        config.set_discord_token("secret".to_string());
        assert_eq!(config.discord_token(), Some("secret"));
    }

    #[test]
    fn test_missing_file_is_a_parse_error() {
        let err = Config::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
