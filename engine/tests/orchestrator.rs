//! End-to-end orchestrator scenarios with mock collaborators: the AI path,
//! every fallback trigger, and the one hard error.

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};

use calcio_engine::analyzer::TextCompletion;
use calcio_engine::derived::FirstScore;
use calcio_engine::error::PredictError;
use calcio_engine::orchestrator::Orchestrator;
use calcio_engine::stats::StatsSource;
use calcio_engine::types::{HistoricalMeeting, Match, Outcome};

struct CannedAi(&'static str);

impl TextCompletion for CannedAi {
    async fn complete(&self, _prompt: &str) -> Result<String, PredictError> {
        Ok(self.0.to_string())
    }
}

struct TimingOutAi;

impl TextCompletion for TimingOutAi {
    async fn complete(&self, _prompt: &str) -> Result<String, PredictError> {
        Err(PredictError::Timeout(Duration::from_secs(8)))
    }
}

struct FixedStats(Vec<HistoricalMeeting>);

impl StatsSource for FixedStats {
    async fn head_to_head(
        &self,
        _team1_id: u32,
        _team2_id: u32,
    ) -> Result<Vec<HistoricalMeeting>, PredictError> {
        Ok(self.0.clone())
    }
}

struct DownStats;

impl StatsSource for DownStats {
    async fn head_to_head(
        &self,
        _team1_id: u32,
        _team2_id: u32,
    ) -> Result<Vec<HistoricalMeeting>, PredictError> {
        Err(PredictError::Stats("fixtures provider unreachable".into()))
    }
}

fn derby() -> Match {
    Match {
        home_team: "Inter".into(),
        away_team: "Milan".into(),
        home_id: 505,
        away_id: 489,
        kickoff: Utc.with_ymd_and_hms(2026, 3, 8, 19, 45, 0).unwrap(),
        venue: Some("San Siro".into()),
        home_odds: 2.1,
        draw_odds: 3.4,
        away_odds: 3.6,
    }
}

/// 10 meetings: 4 Inter wins, 3 Milan wins, 3 draws, 25 goals (avg 2.5),
/// both teams scored in 6 (60%).
fn derby_history() -> Vec<HistoricalMeeting> {
    let scorelines = [
        (2, 0),
        (2, 1),
        (1, 0),
        (3, 1),
        (0, 1),
        (1, 2),
        (0, 3),
        (1, 1),
        (2, 2),
        (1, 1),
    ];
    scorelines
        .iter()
        .enumerate()
        .map(|(i, &(hg, ag))| HistoricalMeeting {
            date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap() - chrono::Days::new(60 * i as u64),
            home_id: 505,
            away_id: 489,
            home_team: "Inter".into(),
            away_team: "Milan".into(),
            home_goals: hg,
            away_goals: ag,
        })
        .collect()
}

const VALID_AI_JSON: &str = r#"{
    "summary": "Derby equilibrato, pareggio probabile",
    "tacticalAnalysis": {"home": "Possesso palla", "away": "Blocco basso"},
    "keyPoints": ["Storia recente equilibrata", "Poche reti nei derby", "Posta alta"],
    "aiPrediction": "X",
    "confidence": 95,
    "reasoning": "Le ultime stagioni mostrano un sostanziale equilibrio."
}"#;

#[tokio::test]
async fn timeout_with_no_history_degrades_to_odds_fallback() {
    // Scenario A: home odds 2.1 favor the hosts; no H2H on record.
    let orchestrator =
        Orchestrator::new(FixedStats(vec![]), TimingOutAi).with_picker(Box::new(FirstScore));
    let p = orchestrator.analyze(&derby()).await.unwrap();

    assert_eq!(p.ai_prediction, Outcome::Home);
    assert_eq!(p.confidence, 70);
    assert!(!p.has_h2h);
    assert!(p.degraded);
    assert!(p.real_data);
    assert_eq!(p.predictions.total_goals, "Over 2.5");
}

#[tokio::test]
async fn valid_ai_output_is_clamped_and_annotated() {
    // Scenario B: model over-reports confidence 95; parser clamps to 90.
    let orchestrator = Orchestrator::new(FixedStats(derby_history()), CannedAi(VALID_AI_JSON))
        .with_picker(Box::new(FirstScore));
    let p = orchestrator.analyze(&derby()).await.unwrap();

    assert_eq!(p.ai_prediction, Outcome::Draw);
    assert_eq!(p.confidence, 90);
    assert!(p.has_h2h);
    assert!(!p.degraded);
    assert!(p.real_data);
    // avg 2.5 goals clears the 2.3 Over threshold; 60% BTTS is not > 60.
    assert_eq!(p.predictions.total_goals, "Over 2.5");
    assert_eq!(p.predictions.btts, "Probabile");
    assert_eq!(p.venue, "San Siro");
}

#[tokio::test]
async fn non_json_completion_falls_back_but_honors_the_contract() {
    // Scenario C.
    let orchestrator = Orchestrator::new(
        FixedStats(derby_history()),
        CannedAi("I think Inter will probably edge it 2-1."),
    )
    .with_picker(Box::new(FirstScore));
    let p = orchestrator.analyze(&derby()).await.unwrap();

    assert!(p.degraded);
    assert!(p.real_data);
    assert_eq!(p.key_points.len(), 3);
    assert!((60..=90).contains(&p.confidence));
    assert!(matches!(
        p.ai_prediction,
        Outcome::Home | Outcome::Draw | Outcome::Away
    ));
}

#[tokio::test]
async fn stats_source_failure_triggers_fallback() {
    let orchestrator =
        Orchestrator::new(DownStats, CannedAi(VALID_AI_JSON)).with_picker(Box::new(FirstScore));
    let p = orchestrator.analyze(&derby()).await.unwrap();
    assert!(p.degraded);
    assert_eq!(p.ai_prediction, Outcome::Home);
}

#[tokio::test]
async fn empty_history_still_reaches_the_ai_path() {
    // Scenario D downstream: zero meetings is "no H2H", not an error.
    let orchestrator = Orchestrator::new(FixedStats(vec![]), CannedAi(VALID_AI_JSON))
        .with_picker(Box::new(FirstScore));
    let p = orchestrator.analyze(&derby()).await.unwrap();
    assert!(!p.degraded);
    assert!(!p.has_h2h);
    assert_eq!(p.confidence, 90);
    // No H2H defaults: Over 2.5 and Probabile.
    assert_eq!(p.predictions.total_goals, "Over 2.5");
    assert_eq!(p.predictions.btts, "Probabile");
}

#[tokio::test]
async fn blank_team_name_is_a_hard_error() {
    let orchestrator =
        Orchestrator::new(FixedStats(vec![]), CannedAi(VALID_AI_JSON));
    let mut fixture = derby();
    fixture.home_team = "   ".into();

    let err = orchestrator.analyze(&fixture).await.unwrap_err();
    assert!(matches!(err, PredictError::InvalidInput(_)));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn missing_venue_gets_a_placeholder() {
    let mut fixture = derby();
    fixture.venue = None;
    let orchestrator = Orchestrator::new(FixedStats(vec![]), CannedAi(VALID_AI_JSON));
    let p = orchestrator.analyze(&fixture).await.unwrap();
    assert!(!p.venue.is_empty());
}
