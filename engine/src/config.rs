use anyhow::{Context, Result};

/// Engine configuration. All values come from the environment; the API key
/// is injected into the completion client at construction, never read from
/// a module-level constant.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Client-side budget for one completion call; the in-flight request is
    /// aborted when it elapses.
    pub completion_timeout_secs: u64,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Config {
    /// Load config from a specific .env file, or the default `.env` if None.
    pub fn from_env_file(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => {
                dotenvy::from_filename(p).ok();
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::build_from_env()
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::build_from_env()
    }

    fn build_from_env() -> Result<Self> {
        Ok(Self {
            gemini_api_key: env("GEMINI_API_KEY", ""),
            gemini_model: env("GEMINI_MODEL", "gemini-2.0-flash"),
            completion_timeout_secs: env_u64("COMPLETION_TIMEOUT_SECS", "8")?,
            temperature: env_f32("AI_TEMPERATURE", "0.7")?,
            top_p: env_f32("AI_TOP_P", "0.95")?,
            max_output_tokens: env_u32("AI_MAX_OUTPUT_TOKENS", "2048")?,
        })
    }
}

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: &str) -> Result<u64> {
    let val = env(key, default);
    val.parse()
        .with_context(|| format!("Invalid integer for {key}: {val}"))
}

fn env_u32(key: &str, default: &str) -> Result<u32> {
    let val = env(key, default);
    val.parse()
        .with_context(|| format!("Invalid integer for {key}: {val}"))
}

fn env_f32(key: &str, default: &str) -> Result<f32> {
    let val = env(key, default);
    val.parse()
        .with_context(|| format!("Invalid float for {key}: {val}"))
}
