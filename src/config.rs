use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_UPC_API_URL: &str = "https://api.upcitemdb.com/prod/trial/lookup";
const DEFAULT_USDA_API_URL: &str = "https://api.nal.usda.gov/fdc/v1";
const DEFAULT_OPENFDA_API_URL: &str = "https://api.fda.gov/drug/label.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(String),
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: String, reason: String },
    #[error("{name} must be a positive whole number of seconds, got '{value}'")]
    InvalidTimeout { name: String, value: String },
    #[error("unknown LLM provider '{0}', expected 'gemini' or 'openai'")]
    UnknownProvider(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAI,
}

impl ProviderKind {
    fn prefix(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI",
            ProviderKind::OpenAI => "OPENAI",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAI),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAI => "openai",
        })
    }
}

#[derive(Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub models: Vec<String>,
    pub api_url: String,
    pub temperature: f32,
}

// Keeps the API key out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("models", &self.models)
            .field("api_url", &self.api_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ProviderConfig {
    pub fn from_vars<F>(kind: ProviderKind, vars: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = kind.prefix();
        let key_var = format!("{}_API_KEY", prefix);
        let api_key = vars(&key_var).ok_or(ConfigError::Missing(key_var))?;

        let models = vars(&format!("{}_MODELS", prefix))
            .map(|m| {
                m.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|models| !models.is_empty())
            .unwrap_or_else(|| match kind {
                ProviderKind::Gemini => vec!["gemini-1.5-pro-latest".to_string()],
                ProviderKind::OpenAI => vec!["gpt-4-turbo-preview".to_string()],
            });

        let url_var = format!("{}_API_URL", prefix);
        let api_url = vars(&url_var).unwrap_or_else(|| match kind {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta".to_string(),
            ProviderKind::OpenAI => "https://api.openai.com/v1".to_string(),
        });
        let api_url = checked_url(&url_var, api_url)?;

        let temperature = vars(&format!("{}_TEMPERATURE", prefix))
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.7);

        Ok(Self {
            kind,
            api_key,
            models,
            api_url,
            temperature,
        })
    }

    /// The model requests are sent to.
    pub fn model(&self) -> &str {
        self.models.first().map(String::as_str).unwrap_or_default()
    }
}

/// Everything the pipeline needs, injected into each component at construction.
#[derive(Clone)]
pub struct AppConfig {
    pub usda_api_key: String,
    pub upc_api_url: String,
    pub usda_api_url: String,
    pub openfda_api_url: String,
    pub http_timeout: Duration,
    pub analysis_timeout: Duration,
    pub provider: ProviderConfig,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("upc_api_url", &self.upc_api_url)
            .field("usda_api_url", &self.usda_api_url)
            .field("openfda_api_url", &self.openfda_api_url)
            .field("http_timeout", &self.http_timeout)
            .field("analysis_timeout", &self.analysis_timeout)
            .field("provider", &self.provider)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source. Empty values count as unset.
    pub fn from_vars<F>(vars: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = |key: &str| vars(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let usda_api_key = vars("USDA_API_KEY").ok_or_else(|| ConfigError::Missing("USDA_API_KEY".to_string()))?;

        let upc_api_url = checked_url(
            "UPC_API_URL",
            vars("UPC_API_URL").unwrap_or_else(|| DEFAULT_UPC_API_URL.to_string()),
        )?;
        let usda_api_url = checked_url(
            "USDA_API_URL",
            vars("USDA_API_URL").unwrap_or_else(|| DEFAULT_USDA_API_URL.to_string()),
        )?;
        let openfda_api_url = checked_url(
            "OPENFDA_API_URL",
            vars("OPENFDA_API_URL").unwrap_or_else(|| DEFAULT_OPENFDA_API_URL.to_string()),
        )?;

        let http_timeout = timeout_secs("HTTP_TIMEOUT_SECS", vars("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS)?;
        let analysis_timeout = timeout_secs(
            "ANALYSIS_TIMEOUT_SECS",
            vars("ANALYSIS_TIMEOUT_SECS"),
            DEFAULT_ANALYSIS_TIMEOUT_SECS,
        )?;

        let kind = match vars("LLM_PROVIDER") {
            Some(name) => name.parse()?,
            None => ProviderKind::Gemini,
        };
        let provider = ProviderConfig::from_vars(kind, &vars)?;

        Ok(Self {
            usda_api_key,
            upc_api_url,
            usda_api_url,
            openfda_api_url,
            http_timeout,
            analysis_timeout,
            provider,
        })
    }
}

fn checked_url(name: &str, value: String) -> Result<String, ConfigError> {
    Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(value.trim_end_matches('/').to_string())
}

fn timeout_secs(name: &str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_secs(default));
    };
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            name: name.to_string(),
            value,
        }),
    }
}
