use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::observability::LogFormat;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Groq's OpenAI-compatible API root.
const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_GROQ_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MCQ_TEMPERATURE: f32 = 0.7;
const DEFAULT_MCQ_MAX_TOKENS: u32 = 2000;

#[derive(Debug, Clone, Deserialize)]
pub struct QuizgenConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub groq: GroqSettings,
    pub generation: GenerationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqSettings {
    /// Base URL; `/chat/completions` is appended per request.
    pub api_url: String,
    pub api_key: Secret<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl GroqSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub mcq_temperature: f32,
    pub mcq_max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    #[serde(skip)]
    pub format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl QuizgenConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(QuizgenConfig {
            common: common_config,
            groq: GroqSettings {
                api_url: get_env("GROQ_API_URL", Some(DEFAULT_GROQ_API_URL), is_prod)?,
                api_key: Secret::new(get_env("GROQ_API_KEY", None, is_prod)?),
                model: get_env("GROQ_MODEL", Some(DEFAULT_GROQ_MODEL), is_prod)?,
                timeout_secs: get_parsed(
                    "GROQ_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                    is_prod,
                )?,
            },
            generation: GenerationSettings {
                mcq_temperature: get_parsed("MCQ_TEMPERATURE", DEFAULT_MCQ_TEMPERATURE, is_prod)?,
                mcq_max_tokens: get_parsed("MCQ_MAX_TOKENS", DEFAULT_MCQ_MAX_TOKENS, is_prod)?,
            },
            logging: LoggingSettings {
                level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
                format: get_parsed("LOG_FORMAT", LogFormat::Json, is_prod)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

/// Like [`get_env`], but parses the value and rejects anything unparseable.
fn get_parsed<T>(key: &str, default: T, is_prod: bool) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value: {}", key, e))
        }),
        Err(_) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        Err(_) => Ok(default),
    }
}
