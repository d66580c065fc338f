use anyhow::{Result, anyhow};
use axum::http::HeaderValue;

/// Origin wildcard accepted in `CORS_ALLOWED_ORIGINS`.
pub const ANY_ORIGIN: &str = "*";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let raw = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| ANY_ORIGIN.into());
        Ok(Self {
            cors_allowed_origins: parse_origins(&raw)?,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.is_empty()
            || self.cors_allowed_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            if origin != ANY_ORIGIN && HeaderValue::from_str(origin).is_err() {
                return Err(anyhow!("invalid CORS origin `{}`", origin));
            }
            Ok(origin.to_string())
        })
        .collect()
}
