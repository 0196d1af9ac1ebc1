use serde::Deserialize;
use serde_json::Value;

use crate::error::{truncate_for_log, PredictError};
use crate::types::{Outcome, TacticalAnalysis};

pub const SUMMARY_PLACEHOLDER: &str = "Equilibrio previsto tra le due squadre";
pub const REASONING_PLACEHOLDER: &str =
    "Analisi basata sulle quote di mercato e sui dati disponibili.";
pub const TACTICAL_PLACEHOLDER: &str = "Approccio equilibrato previsto.";
pub const KEY_POINT_PLACEHOLDERS: [&str; 3] = [
    "Quote di mercato equilibrate",
    "Forma recente da monitorare",
    "Fattore campo potenzialmente decisivo",
];

pub const CONFIDENCE_MIN: u8 = 60;
pub const CONFIDENCE_MAX: u8 = 90;
pub const CONFIDENCE_DEFAULT: u8 = 70;

/// The AI-provided slice of a Prediction, already validated and coerced.
/// Derived fields (`predictions`, `valueRatings`) are computed afterwards.
#[derive(Debug, Clone)]
pub struct AiDraft {
    pub summary: String,
    pub tactical_analysis: TacticalAnalysis,
    pub key_points: Vec<String>,
    pub ai_prediction: Outcome,
    pub confidence: u8,
    pub reasoning: String,
}

#[derive(Deserialize)]
struct RawTactical {
    #[serde(default)]
    home: Option<String>,
    #[serde(default)]
    away: Option<String>,
}

#[derive(Deserialize)]
struct RawPrediction {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default, rename = "tacticalAnalysis")]
    tactical_analysis: Option<RawTactical>,
    #[serde(default, rename = "keyPoints")]
    key_points: Option<Value>,
    #[serde(default, rename = "aiPrediction")]
    ai_prediction: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Parse raw completion text into a validated draft.
///
/// Only a payload that cannot be read as a JSON object at all is an error;
/// every individual field is coerced to the contract instead of failing the
/// whole request.
pub fn parse(text: &str) -> Result<AiDraft, PredictError> {
    let json_str = extract_json(text);
    let raw: RawPrediction = serde_json::from_str(&json_str).map_err(|e| {
        PredictError::MalformedResponse(format!("{e} | {}", truncate_for_log(&json_str, 200)))
    })?;

    let non_empty = |s: Option<String>, placeholder: &str| -> String {
        match s {
            Some(s) if !s.trim().is_empty() => s,
            _ => placeholder.to_string(),
        }
    };

    let tactical = raw.tactical_analysis.unwrap_or(RawTactical {
        home: None,
        away: None,
    });

    let confidence = raw
        .confidence
        .map(|c| c.round())
        .unwrap_or(CONFIDENCE_DEFAULT as f64)
        .clamp(CONFIDENCE_MIN as f64, CONFIDENCE_MAX as f64) as u8;

    Ok(AiDraft {
        summary: non_empty(raw.summary, SUMMARY_PLACEHOLDER),
        tactical_analysis: TacticalAnalysis {
            home: non_empty(tactical.home, TACTICAL_PLACEHOLDER),
            away: non_empty(tactical.away, TACTICAL_PLACEHOLDER),
        },
        key_points: normalize_key_points(raw.key_points),
        ai_prediction: raw
            .ai_prediction
            .as_deref()
            .and_then(Outcome::from_label)
            .unwrap_or(Outcome::Draw),
        confidence,
        reasoning: non_empty(raw.reasoning, REASONING_PLACEHOLDER),
    })
}

/// Always exactly 3 entries: truncate an over-delivering model, pad an
/// under-delivering one with placeholders.
fn normalize_key_points(value: Option<Value>) -> Vec<String> {
    let mut points: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .take(3)
            .collect(),
        _ => Vec::new(),
    };
    for placeholder in KEY_POINT_PLACEHOLDERS.iter().skip(points.len()) {
        points.push(placeholder.to_string());
    }
    points
}

/// Pull the first balanced JSON object out of free-form model text,
/// tolerating ```json fences around it.
fn extract_json(text: &str) -> String {
    let text = strip_fences(text);
    if let Some(start) = text.find('{') {
        let mut depth = 0;
        for (i, ch) in text[start..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return text[start..=start + i].to_string();
                    }
                }
                _ => {}
            }
        }
    }
    text.to_string()
}

fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
