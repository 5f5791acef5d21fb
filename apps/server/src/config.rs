use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{bail, Context};
use axum::http::HeaderValue;

use crate::auth::decode_secret_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            Ok(LogFormat::Text)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            bail!("unknown log format '{}', expected 'text' or 'json'", s)
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// HS256 key for bearer tokens. `None` runs the server in local mode.
    pub jwt_secret: Option<Vec<u8>>,
    pub jwt_issuer: Option<String>,
    /// Principal used for every request in local mode.
    pub local_user: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = value("BUDGETLY_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .context("Invalid BUDGETLY_LISTEN_ADDR")?;
        let db_path = value("BUDGETLY_DB_PATH").unwrap_or_else(|| "./db/app.db".into());

        let cors_allow: Vec<String> = value("BUDGETLY_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !cors_allow.iter().any(|o| o == "*") {
            for origin in &cors_allow {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin '{}'", origin))?;
            }
        }

        let timeout_ms = value("BUDGETLY_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .parse::<u64>()
            .context("Invalid BUDGETLY_REQUEST_TIMEOUT_MS")?;

        let jwt_secret = value("BUDGETLY_JWT_SECRET")
            .map(|raw| decode_secret_key(&raw))
            .transpose()
            .context("Invalid BUDGETLY_JWT_SECRET")?;
        let jwt_issuer = value("BUDGETLY_JWT_ISSUER").map(|s| s.trim().to_string());
        let local_user = value("BUDGETLY_LOCAL_USER")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "local".into());
        let log_format = value("BUDGETLY_LOG_FORMAT")
            .map(|s| s.trim().parse::<LogFormat>())
            .transpose()
            .context("Invalid BUDGETLY_LOG_FORMAT")?
            .unwrap_or(LogFormat::Text);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            jwt_issuer,
            local_user,
            log_format,
        })
    }
}
