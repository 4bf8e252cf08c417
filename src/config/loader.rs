use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use url::Url;

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, GroqConfig, LoggingConfig, ServerConfig,
};

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("GROQ_API_KEY").ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let api_url = var("GROQ_API_URL").unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string());
        match Url::parse(&api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    key: "GROQ_API_URL",
                    reason: format!("unsupported scheme `{}`", url.scheme()),
                })
            }
            Err(err) => {
                return Err(ConfigError::Invalid {
                    key: "GROQ_API_URL",
                    reason: err.to_string(),
                })
            }
        }

        let temperature = var("GROQ_TEMPERATURE")
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(0.1);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                key: "GROQ_TEMPERATURE",
                reason: format!("{temperature} is outside 0.0..=2.0"),
            });
        }

        let groq = GroqConfig {
            api_key,
            api_url,
            model: var("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            temperature,
            max_tokens: var("GROQ_MAX_TOKENS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(1024),
            timeout: Duration::from_millis(
                var("GROQ_TIMEOUT_MS")
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(30_000),
            ),
        };

        let bind_addr = var("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                key: "SERVER_ADDR",
                reason: err.to_string(),
            })?;

        let server = ServerConfig {
            bind_addr,
            static_dir: PathBuf::from(var("STATIC_DIR").unwrap_or_else(|| "static".to_string())),
            index_path: PathBuf::from(
                var("INDEX_PATH").unwrap_or_else(|| "templates/index.html".to_string()),
            ),
            max_upload_bytes: var("MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(25 * 1024 * 1024),
        };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            groq,
            server,
            directories,
            logging,
        })
    }
}
