use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::analyzer::TextCompletion;
use crate::config::Config;
use crate::error::{truncate_for_log, PredictError};

/// Gemini text-completion client. One request per call, no retries; the
/// HTTP client's timeout aborts the in-flight request so nothing leaks past
/// the budget.
pub struct GeminiClient {
    api_key: String,
    model: String,
    timeout: Duration,
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiMessage>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiMessage {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<GeminiPart>>,
}

impl GeminiClient {
    pub fn new(cfg: &Config) -> Result<Self, PredictError> {
        let timeout = Duration::from_secs(cfg.completion_timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictError::Transport(e.to_string()))?;
        Ok(Self {
            api_key: cfg.gemini_api_key.clone(),
            model: cfg.gemini_model.clone(),
            timeout,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_output_tokens: cfg.max_output_tokens,
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl TextCompletion for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, PredictError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let req = GeminiRequest {
            contents: vec![GeminiMessage {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: self.top_p,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PredictError::Timeout(self.timeout)
                } else {
                    PredictError::Transport(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let body = truncate_for_log(&body, 300).to_string();
            return Err(PredictError::Upstream { status, body });
        }

        let data: GeminiResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                PredictError::Timeout(self.timeout)
            } else {
                PredictError::MalformedResponse(e.to_string())
            }
        })?;

        let text = data
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .map(|parts| {
                parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(PredictError::MalformedResponse(
                "completion returned no candidates".into(),
            ));
        }

        debug!("Gemini: {} chars of completion text", text.len());
        Ok(text)
    }
}
