//! Process configuration read from the environment
//!
//! Keys for the upstream services are deliberately not validated: an empty
//! key is passed through and the upstream rejects it on first use. Only the
//! values the process cannot start without (listen address, CORS origin,
//! pool size) are checked here.

use std::net::SocketAddr;
use thiserror::Error;

use crate::llm::ChatModel;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_LLM_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_POOL_SIZE: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Single origin allowed by CORS, without trailing slash
    pub allowed_origin: String,
}

/// Which backing database adapter to build
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    /// Hosted database REST API (`SUPABASE_URL` / `SUPABASE_KEY`)
    Rest { url: String, api_key: String },
    /// Direct Postgres connection (`POSTGRES_URL`)
    Postgres { url: String, max_pool_size: usize },
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: ChatModel,
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns `None` for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let allowed_origin = parse_origin(
            &get("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
        )?;

        let store = match get("POSTGRES_URL") {
            Some(url) => {
                let max_pool_size = match get("POSTGRES_POOL_SIZE") {
                    Some(raw) => raw
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| ConfigError::Invalid {
                            name: "POSTGRES_POOL_SIZE",
                            reason: format!("expected a positive integer, got '{}'", raw),
                        })?,
                    None => DEFAULT_POOL_SIZE,
                };
                StoreConfig::Postgres { url, max_pool_size }
            }
            None => StoreConfig::Rest {
                url: get("SUPABASE_URL").unwrap_or_default(),
                api_key: get("SUPABASE_KEY").unwrap_or_default(),
            },
        };

        let llm = LlmConfig {
            api_base: get("LLM_API_BASE").unwrap_or_else(|| DEFAULT_LLM_API_BASE.to_string()),
            api_key: get("GROQ_API_KEY").unwrap_or_default(),
            model: get("LLM_MODEL")
                .map(|m| ChatModel::from(m.trim()))
                .unwrap_or_default(),
        };

        Ok(Self {
            server: ServerConfig {
                bind_addr,
                allowed_origin,
            },
            store,
            llm,
        })
    }
}

/// Accept `scheme://host[:port]` and return it without a trailing slash
fn parse_origin(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "ALLOWED_ORIGIN",
        reason,
    };

    let url = reqwest::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    let host = url
        .host_str()
        .ok_or_else(|| invalid("missing host".to_string()))?;
    if url.path() != "/" || url.query().is_some() {
        return Err(invalid("an origin has no path or query".to_string()));
    }

    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}
