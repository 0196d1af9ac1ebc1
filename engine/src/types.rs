use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixture as fetched from the stats provider. Immutable for the lifetime
/// of one analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub home_team: String,
    pub away_team: String,
    pub home_id: u32,
    pub away_id: u32,
    pub kickoff: DateTime<Utc>,
    pub venue: Option<String>,
    /// Decimal market odds for home win / draw / away win.
    pub home_odds: f64,
    pub draw_odds: f64,
    pub away_odds: f64,
}

/// One historical meeting between two teams, as returned by the stats source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalMeeting {
    pub date: NaiveDate,
    pub home_id: u32,
    pub away_id: u32,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
}

/// Winner tag on a past meeting, relative to home/away side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeetingWinner {
    Home,
    Away,
    Draw,
}

/// Condensed line for the recent-meetings list shown alongside a prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastMeeting {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub winner: MeetingWinner,
}

/// Aggregate head-to-head record for a team pair. Derived, read-only;
/// built fresh per analysis call and discarded with it.
///
/// Percentage fields are omitted entirely when `total_matches == 0` so a
/// zero-history pair never serializes bogus numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadSummary {
    pub total_matches: u32,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub draws: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_win_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_win_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_percentage: Option<f64>,
    pub avg_goals: f64,
    pub over25_percentage: f64,
    pub btts_percentage: f64,
    /// Most-recent-first, capped at 5 entries.
    pub recent_meetings: Vec<PastMeeting>,
}

impl HeadToHeadSummary {
    /// A zero-history pair counts as "no H2H available" downstream.
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }
}

/// 1X2 outcome. Serializes to the bookmaker labels "1"/"X"/"2".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    #[serde(rename = "1")]
    Home,
    #[serde(rename = "X")]
    Draw,
    #[serde(rename = "2")]
    Away,
}

impl Outcome {
    /// Parse a model-emitted label. Anything outside the closed set is `None`
    /// and the caller coerces to `Draw`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "1" => Some(Outcome::Home),
            "X" | "x" => Some(Outcome::Draw),
            "2" => Some(Outcome::Away),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Home => write!(f, "1"),
            Outcome::Draw => write!(f, "X"),
            Outcome::Away => write!(f, "2"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TacticalAnalysis {
    pub home: String,
    pub away: String,
}

/// Secondary market calls derived from the main prediction. Field names are
/// the dashboard's wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPredictions {
    #[serde(rename = "risultatoEsatto")]
    pub exact_score: String,
    #[serde(rename = "golTotali")]
    pub total_goals: String,
    pub btts: String,
    pub corner: String,
}

/// How favorable a market price looks, 1..=10 plus a coarse tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRating {
    pub rating: u8,
    pub value: ValueTier,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValueTier {
    Alta,
    Media,
    Bassa,
}

impl fmt::Display for ValueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueTier::Alta => write!(f, "Alta"),
            ValueTier::Media => write!(f, "Media"),
            ValueTier::Bassa => write!(f, "Bassa"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRatings {
    pub casa: ValueRating,
    pub pareggio: ValueRating,
    pub trasferta: ValueRating,
}

/// The orchestrator's output contract. Always fully populated, whichever
/// path produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub summary: String,
    pub tactical_analysis: TacticalAnalysis,
    /// Always exactly 3 entries.
    pub key_points: Vec<String>,
    pub ai_prediction: Outcome,
    /// Always within [60, 90].
    pub confidence: u8,
    pub reasoning: String,
    pub predictions: MarketPredictions,
    pub value_ratings: ValueRatings,
    pub venue: String,
    pub real_data: bool,
    #[serde(rename = "hasH2H")]
    pub has_h2h: bool,
    /// True only when the heuristic fallback produced this prediction.
    pub degraded: bool,
}

pub const VENUE_PLACEHOLDER: &str = "Stadio da confermare";
