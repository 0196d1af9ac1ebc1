use tracing::{debug, info, warn};

use crate::analyzer::TextCompletion;
use crate::derived::{self, RandomScore, ScorePicker};
use crate::error::PredictError;
use crate::fallback;
use crate::h2h;
use crate::parser::{self, AiDraft};
use crate::prompt;
use crate::stats::StatsSource;
use crate::types::{HeadToHeadSummary, Match, Prediction, VENUE_PLACEHOLDER};

/// Top-level prediction coordinator.
///
/// `analyze` either returns a Prediction or a hard `InvalidInput`; every
/// transient failure past input validation (stats source, completion call,
/// response parsing) is absorbed into the heuristic fallback. One attempt
/// per upstream call — the timeout budget is tight enough that a retry
/// would double user-perceived latency for little extra success.
pub struct Orchestrator<S, C> {
    stats: S,
    completion: C,
    picker: Box<dyn ScorePicker>,
}

impl<S, C> Orchestrator<S, C>
where
    S: StatsSource,
    C: TextCompletion,
{
    pub fn new(stats: S, completion: C) -> Self {
        Self {
            stats,
            completion,
            picker: Box::new(RandomScore),
        }
    }

    /// Replace the exact-score randomness source; tests use a fixed pick.
    pub fn with_picker(mut self, picker: Box<dyn ScorePicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Analyze one fixture. Stateless; concurrent calls are independent.
    pub async fn analyze(&self, fixture: &Match) -> Result<Prediction, PredictError> {
        if fixture.home_team.trim().is_empty() || fixture.away_team.trim().is_empty() {
            return Err(PredictError::InvalidInput(
                "home and away team names must be non-empty".into(),
            ));
        }

        match self.ai_path(fixture).await {
            Ok(prediction) => Ok(prediction),
            Err(err) => {
                warn!(
                    "AI analysis failed for {} vs {} ({err}); serving heuristic fallback",
                    fixture.home_team, fixture.away_team
                );
                Ok(fallback::predict(fixture, self.picker.as_ref()))
            }
        }
    }

    async fn ai_path(&self, fixture: &Match) -> Result<Prediction, PredictError> {
        let history = self
            .stats
            .head_to_head(fixture.home_id, fixture.away_id)
            .await?;
        let summary = h2h::summarize(&history, fixture.home_id, fixture.away_id);
        let h2h = (!summary.is_empty()).then_some(&summary);
        debug!(
            "H2H for {} vs {}: {} meetings",
            fixture.home_team, fixture.away_team, summary.total_matches
        );

        let prompt = prompt::build(fixture, h2h);
        let raw = self.completion.complete(&prompt).await?;
        let draft = parser::parse(&raw)?;

        info!(
            "AI prediction for {} vs {}: {} ({}%)",
            fixture.home_team, fixture.away_team, draft.ai_prediction, draft.confidence
        );
        Ok(self.assemble(fixture, draft, h2h))
    }

    fn assemble(
        &self,
        fixture: &Match,
        draft: AiDraft,
        h2h: Option<&HeadToHeadSummary>,
    ) -> Prediction {
        Prediction {
            summary: draft.summary,
            tactical_analysis: draft.tactical_analysis,
            key_points: draft.key_points,
            ai_prediction: draft.ai_prediction,
            confidence: draft.confidence,
            reasoning: draft.reasoning,
            predictions: derived::market_predictions(
                draft.ai_prediction,
                h2h,
                self.picker.as_ref(),
            ),
            value_ratings: derived::value_ratings(fixture, draft.ai_prediction),
            venue: fixture
                .venue
                .clone()
                .unwrap_or_else(|| VENUE_PLACEHOLDER.to_string()),
            real_data: true,
            has_h2h: h2h.is_some(),
            degraded: false,
        }
    }
}
