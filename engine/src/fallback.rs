use crate::derived::{self, ScorePicker};
use crate::types::{
    Match, Outcome, Prediction, TacticalAnalysis, VENUE_PLACEHOLDER,
};

/// Clear favorites are priced under this.
const FAVORITE_ODDS: f64 = 2.2;
/// Draw-leaning matches are priced under this.
const DRAW_ODDS: f64 = 3.0;

/// Deterministic odds-only predictor, used whenever the AI path fails.
///
/// Pure and total: never touches the network, never errors. The narrative
/// fields name the fallback nature so the dashboard can label degraded
/// answers; `degraded` is set for the same reason.
pub fn predict(fixture: &Match, picker: &dyn ScorePicker) -> Prediction {
    let (outcome, confidence) = pick_outcome(fixture);

    let favorite = match outcome {
        Outcome::Home => fixture.home_team.as_str(),
        Outcome::Away => fixture.away_team.as_str(),
        Outcome::Draw => "nessuna delle due",
    };

    Prediction {
        summary: format!(
            "Previsione statistica: favorita {favorite}"
        ),
        tactical_analysis: TacticalAnalysis {
            home: format!(
                "{} proverà a imporre il proprio gioco davanti al pubblico di casa.",
                fixture.home_team
            ),
            away: format!(
                "{} cercherà di colpire in ripartenza.",
                fixture.away_team
            ),
        },
        key_points: vec![
            "Previsione di riserva basata sulle quote di mercato".to_string(),
            format!(
                "Quote 1X2: {:.2} / {:.2} / {:.2}",
                fixture.home_odds, fixture.draw_odds, fixture.away_odds
            ),
            "Analisi AI non disponibile per questa partita".to_string(),
        ],
        ai_prediction: outcome,
        confidence,
        reasoning: "Previsione di riserva calcolata dalle quote di mercato: il servizio di \
                    analisi AI non era raggiungibile."
            .to_string(),
        predictions: derived::market_predictions(outcome, None, picker),
        value_ratings: derived::value_ratings(fixture, outcome),
        venue: fixture
            .venue
            .clone()
            .unwrap_or_else(|| VENUE_PLACEHOLDER.to_string()),
        real_data: true,
        has_h2h: false,
        degraded: true,
    }
}

// Branch table: home-favored 70, away-favored 70, draw-priced 68, toss-up 65.
fn pick_outcome(fixture: &Match) -> (Outcome, u8) {
    if fixture.home_odds < fixture.away_odds && fixture.home_odds < FAVORITE_ODDS {
        (Outcome::Home, 70)
    } else if fixture.away_odds < fixture.home_odds && fixture.away_odds < FAVORITE_ODDS {
        (Outcome::Away, 70)
    } else if fixture.draw_odds < DRAW_ODDS {
        (Outcome::Draw, 68)
    } else {
        (Outcome::Draw, 65)
    }
}
