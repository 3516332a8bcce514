// config.rs - Service configuration from the environment and an optional JSON file
//
// Environment variables win over the config file; the file only fills gaps.
// A missing credential is not an error here: it disables the LLM endpoints.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Optional keys accepted in `config.json`
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub groq_api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Read a config file. A missing file yields `Ok(None)`.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Settings for the hosted completion service
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    /// Configuration with an explicitly supplied credential
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: non_blank(Some(api_key.into())),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Load from the process environment (after `.env`) and the config file.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup("FINBOT_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let file = match FileConfig::read(Path::new(&config_path)) {
            Ok(Some(file)) => {
                tracing::info!("Loaded config file {}", config_path);
                file
            }
            Ok(None) => {
                tracing::debug!("No config file at {}", config_path);
                FileConfig::default()
            }
            Err(e) => {
                tracing::warn!("{}. Ignoring config file.", e);
                FileConfig::default()
            }
        };

        let api_key = non_blank(lookup("GROQ_API_KEY")).or_else(|| non_blank(file.groq_api_key));

        let model = lookup("FINBOT_MODEL")
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = parse_or(lookup("FINBOT_TEMPERATURE"), "FINBOT_TEMPERATURE")
            .or(file.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);

        let base_url = lookup("FINBOT_LLM_BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = parse_or(lookup("FINBOT_LLM_TIMEOUT_SECS"), "FINBOT_LLM_TIMEOUT_SECS")
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            host: lookup("FINBOT_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(lookup("FINBOT_PORT"), "FINBOT_PORT").unwrap_or(8000),
            llm: LlmConfig {
                api_key,
                model,
                temperature,
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str) -> Option<T> {
    let raw = value?;
    match raw.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Invalid value for {}: {:?}, using default", key, raw);
            None
        }
    }
}
