use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub port: u16,
    pub max_requests_per_ip_per_minute: u32,
    pub upstream_timeout_secs: u64,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY is required")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("PORT must be a valid u16")?,
            max_requests_per_ip_per_minute: std::env::var("MAX_REQUESTS_PER_IP_PER_MINUTE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("MAX_REQUESTS_PER_IP_PER_MINUTE must be a valid u32")?,
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .context("UPSTREAM_TIMEOUT_SECS must be a valid u64")?,
        })
    }
}
