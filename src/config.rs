use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// 5 MB request body ceiling
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set in the environment or .env file")]
    MissingVar(&'static str),

    #[error("{var} has an invalid value {value:?}: {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub max_body_bytes: usize,
}

#[derive(Clone)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub model: String,
    pub api_base: String,
    /// Sent as `generationConfig.maxOutputTokens` when set
    pub max_output_tokens: Option<u32>,
    /// Sent as `generationConfig.temperature` when set
    pub temperature: Option<f32>,
}

// Keep the credential out of startup logs
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("gemini_api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup(GEMINI_API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar(GEMINI_API_KEY_VAR))?;

        Ok(Self {
            server: ServerConfig {
                port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
                host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            },
            llm: LLMConfig {
                gemini_api_key,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: lookup("GEMINI_API_BASE")
                    .map(|base| base.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                max_output_tokens: parse_opt(&lookup, "GEMINI_MAX_OUTPUT_TOKENS")?,
                temperature: parse_opt(&lookup, "GEMINI_TEMPERATURE")?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, var)?.unwrap_or(default))
}

fn parse_opt<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => Err(ConfigError::InvalidVar {
                var,
                reason: e.to_string(),
                value,
            }),
        },
        None => Ok(None),
    }
}
