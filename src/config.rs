use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DigestError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Destination mailbox for the digest; also used as the sender address.
    #[serde(default)]
    pub recipient: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            subject: default_subject(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_summary_tokens")]
    pub max_summary_tokens: u16,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_summary_tokens: default_max_summary_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_subject() -> String {
    "Email Summaries".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_summary_tokens() -> u16 {
    150
}

fn default_temperature() -> f32 {
    1.0
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // Missing file falls back to defaults; validation still applies, so
        // a run without a configured recipient fails with a clear message.
        let config = if path.exists() {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                DigestError::ConfigError(format!("Failed to read config file: {}", e))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                DigestError::ConfigError(format!("Failed to parse config file: {}", e))
            })?;

            tracing::info!("Loaded configuration from {:?}", path);
            config
        } else {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DigestError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| DigestError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| DigestError::ConfigError(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.digest.recipient.trim().is_empty() {
            return Err(DigestError::ConfigError(
                "digest.recipient must be set (run init-config to create a config file)"
                    .to_string(),
            ));
        }
        if !self.digest.recipient.contains('@') {
            return Err(DigestError::ConfigError(format!(
                "digest.recipient '{}' is not a valid email address",
                self.digest.recipient
            )));
        }

        if self.summarizer.model.trim().is_empty() {
            return Err(DigestError::ConfigError(
                "summarizer.model must not be empty".to_string(),
            ));
        }
        if self.summarizer.max_summary_tokens == 0 {
            return Err(DigestError::ConfigError(
                "summarizer.max_summary_tokens must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.summarizer.temperature) {
            return Err(DigestError::ConfigError(format!(
                "summarizer.temperature must be between 0.0 and 2.0, got {}",
                self.summarizer.temperature
            )));
        }

        Ok(())
    }

    /// Write an example configuration file with commented defaults
    pub async fn create_example(path: &Path) -> Result<()> {
        let example = r#"# gmail-digest configuration

[digest]
# Destination for the digest email. The same address is used as the sender.
recipient = "you@example.com"
# Subject line of the digest email.
subject = "Email Summaries"

[summarizer]
# Chat-completion model used to summarize each message.
model = "gpt-3.5-turbo"
# Upper bound on generated summary tokens per message.
max_summary_tokens = 150
# Sampling temperature. 1.0 matches the provider default; output is
# non-deterministic.
temperature = 1.0
"#;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DigestError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        tokio::fs::write(path, example)
            .await
            .map_err(|e| DigestError::ConfigError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn valid_config() -> Config {
        Config {
            digest: DigestConfig {
                recipient: "me@example.com".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.digest.subject, "Email Summaries");
        assert_eq!(config.summarizer.model, "gpt-3.5-turbo");
        assert_eq!(config.summarizer.max_summary_tokens, 150);
        assert_eq!(config.summarizer.temperature, 1.0);
    }

    #[test]
    fn test_validate_requires_recipient() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("digest.recipient"));

        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = valid_config();
        config.digest.recipient = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.summarizer.max_summary_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.summarizer.temperature = 2.5;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            "[digest]\nrecipient = \"me@example.com\"\n",
        )
        .await
        .unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.digest.recipient, "me@example.com");
        assert_eq!(config.summarizer.model, "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_load_missing_file_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("digest.recipient"));
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = valid_config();
        config.summarizer.max_summary_tokens = 200;
        config.save(&path).await.unwrap();

        let reloaded = Config::load(&path).await.unwrap();
        assert_eq!(reloaded.summarizer.max_summary_tokens, 200);
        assert_eq!(reloaded.digest.recipient, "me@example.com");
    }

    #[tokio::test]
    async fn test_create_example_parses_and_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        Config::create_example(&path).await.unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.digest.recipient, "you@example.com");
    }
}
