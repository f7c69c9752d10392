use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
///
/// Nothing here is required: a missing `OPENAI_API_KEY` only surfaces when a
/// contract is generated. Malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub session_ttl: Duration,
}

/// Settings for the completion API client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs: u64 = parse_env("LLM_TIMEOUT_SECS", 120)?;
        let max_upload_mb: usize = parse_env("MAX_UPLOAD_MB", 25)?;
        let session_ttl_minutes: u64 = parse_env("SESSION_TTL_MINUTES", 120)?;

        Ok(Config {
            llm: LlmConfig {
                api_key: optional_env("OPENAI_API_KEY"),
                api_base: optional_env("OPENAI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            session_ttl: Duration::from_secs(session_ttl_minutes * 60),
        })
    }
}

/// Returns the variable's value, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by router tests: no credential, small limits.
    pub fn for_tests() -> Self {
        Config {
            llm: LlmConfig {
                api_key: None,
                api_base: DEFAULT_API_BASE.to_string(),
                timeout: Duration::from_secs(5),
            },
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: 1024 * 1024,
            session_ttl: Duration::from_secs(60 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("CONTRACT_API_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("CONTRACT_API_TEST_BAD_TIMEOUT", "soon");
        let result: Result<u64> = parse_env("CONTRACT_API_TEST_BAD_TIMEOUT", 120);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("CONTRACT_API_TEST_BAD_TIMEOUT"));
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("CONTRACT_API_TEST_BLANK_KEY", "   ");
        assert!(optional_env("CONTRACT_API_TEST_BLANK_KEY").is_none());
    }
}
