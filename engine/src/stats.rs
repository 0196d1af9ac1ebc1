use chrono::NaiveDate;

use crate::error::PredictError;
use crate::types::HistoricalMeeting;

/// Fixtures/statistics provider seam. The engine only needs head-to-head
/// history from it; fixtures, standings and live scores stay behind the
/// dashboard's own data layer.
pub trait StatsSource {
    /// Past meetings between the two teams, most recent first, at most 15.
    fn head_to_head(
        &self,
        team1_id: u32,
        team2_id: u32,
    ) -> impl std::future::Future<Output = Result<Vec<HistoricalMeeting>, PredictError>> + Send;
}

/// Offline sample data, used when no live stats provider is configured so
/// the CLI still produces a full analysis.
#[derive(Debug, Clone, Default)]
pub struct SampleStats;

impl StatsSource for SampleStats {
    async fn head_to_head(
        &self,
        team1_id: u32,
        team2_id: u32,
    ) -> Result<Vec<HistoricalMeeting>, PredictError> {
        // Deterministic synthetic history: sides alternate, scorelines cycle.
        let scorelines = [(2, 1), (1, 1), (0, 2), (3, 1), (1, 0)];
        let meetings = scorelines
            .iter()
            .enumerate()
            .map(|(i, &(hg, ag))| {
                let swap = i % 2 == 1;
                let (home_id, away_id) = if swap {
                    (team2_id, team1_id)
                } else {
                    (team1_id, team2_id)
                };
                HistoricalMeeting {
                    date: NaiveDate::from_ymd_opt(2025, 12, 1)
                        .unwrap_or_default()
                        - chrono::Days::new(90 * i as u64),
                    home_id,
                    away_id,
                    home_team: format!("Team {home_id}"),
                    away_team: format!("Team {away_id}"),
                    home_goals: hg,
                    away_goals: ag,
                }
            })
            .collect();
        Ok(meetings)
    }
}
