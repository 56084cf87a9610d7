//! Environment-driven server configuration.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - `OPENAI_API_KEY` presence alone decides whether remote suggestions run.

use habit_core::suggest::remote::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use habit_core::{default_log_level, OpenAiConfig};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "data/habits.json";
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_SUGGEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}=`{}`: {}", self.key, self.value, self.reason)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    /// `None` when no API key is configured.
    pub openai: Option<OpenAiConfig>,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, applying defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = match get("HOST") {
            Some(value) => value.parse::<IpAddr>().map_err(|err| ConfigError {
                key: "HOST",
                value: value.clone(),
                reason: format!("{err}"),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = parse_number(get("PORT"), "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_number(
            get("SUGGEST_TIMEOUT_SECS"),
            "SUGGEST_TIMEOUT_SECS",
            DEFAULT_SUGGEST_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError {
                key: "SUGGEST_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        let openai = get("OPENAI_API_KEY").map(|api_key| OpenAiConfig {
            api_key,
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        });

        Ok(Self {
            host,
            port,
            data_file: get("HABITS_DATA_FILE")
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
                .into(),
            static_dir: get("STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string()),
            log_dir: get("LOG_DIR").map(PathBuf::from),
            openai,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_number<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match value {
        Some(value) => value.parse().map_err(|err: T::Err| ConfigError {
            key,
            value: value.clone(),
            reason: err.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, super::ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.data_file, PathBuf::from("data/habits.json"));
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert!(config.log_dir.is_none());
        assert!(config.openai.is_none());
    }

    #[test]
    fn api_key_enables_remote_provider() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-test"),
            ("SUGGEST_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        let openai = config.openai.unwrap();
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.model, "gpt-test");
        assert_eq!(openai.base_url, "https://api.openai.com/v1");
        assert_eq!(openai.timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("OPENAI_API_KEY", "   "), ("PORT", "")]).unwrap();
        assert!(config.openai.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.key, "PORT");

        let err = config_from(&[("SUGGEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert_eq!(err.key, "SUGGEST_TIMEOUT_SECS");

        let err = config_from(&[("HOST", "not-an-ip")]).unwrap_err();
        assert_eq!(err.key, "HOST");
    }
}
