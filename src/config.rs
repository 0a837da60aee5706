//! Configuration management for the resume match client

use crate::error::{Result, ResumeMatchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ANALYZE_PATH: &str = "/analyze";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub analyze_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-match")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let base = self.service.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ResumeMatchError::Configuration(format!(
                "service.base_url must be an http(s) URL, got '{}'",
                self.service.base_url
            )));
        }
        if !self.service.analyze_path.starts_with('/') {
            return Err(ResumeMatchError::Configuration(format!(
                "service.analyze_path must start with '/', got '{}'",
                self.service.analyze_path
            )));
        }
        Ok(())
    }

    /// Override the service address, e.g. from `--endpoint`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.service.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        self.service.base_url.trim_end_matches('/')
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url(), self.service.analyze_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_analyze_endpoint() {
        let config = Config::default();
        assert_eq!(config.analyze_url(), "http://127.0.0.1:5000/analyze");
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_trailing_slash_is_not_doubled() {
        let config = Config::default().with_base_url("http://analysis.local:8080/").unwrap();
        assert_eq!(config.analyze_url(), "http://analysis.local:8080/analyze");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = Config::default().with_base_url("ftp://example.com");
        assert!(matches!(result, Err(ResumeMatchError::Configuration(_))));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Markdown;
        config.output.color_output = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
        assert!(!loaded.output.color_output);
        assert_eq!(loaded.service.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "service = 12").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ResumeMatchError::Configuration(_))));
    }
}
