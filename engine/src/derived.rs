use rand::seq::SliceRandom;

use crate::types::{
    HeadToHeadSummary, Match, MarketPredictions, Outcome, ValueRating, ValueRatings, ValueTier,
};

/// Fixed corner-market label; the dashboard renders it as-is.
pub const CORNER_LABEL: &str = "9-11 corner";

/// Average H2H goals above this get the Over 2.5 label.
const OVER_THRESHOLD: f64 = 2.3;
/// Average H2H goals above this select the high-scoring scoreline list.
const HIGH_SCORING_THRESHOLD: f64 = 2.5;

/// Picks one exact-score string among the plausible candidates for the
/// predicted outcome. Injected so tests can substitute a deterministic stub;
/// the pick is presentational, not a statistical projection.
pub trait ScorePicker: Send + Sync {
    fn pick(&self, candidates: &[&'static str]) -> String;
}

/// Uniform random pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomScore;

impl ScorePicker for RandomScore {
    fn pick(&self, candidates: &[&'static str]) -> String {
        candidates
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("1-1")
            .to_string()
    }
}

/// Always the first candidate; for tests and reproducible runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstScore;

impl ScorePicker for FirstScore {
    fn pick(&self, candidates: &[&'static str]) -> String {
        candidates.first().copied().unwrap_or("1-1").to_string()
    }
}

pub fn exact_score_candidates(outcome: Outcome, high_scoring: bool) -> &'static [&'static str] {
    match (outcome, high_scoring) {
        (Outcome::Home, true) => &["2-1", "3-1", "2-0"],
        (Outcome::Home, false) => &["1-0", "2-0", "2-1"],
        (Outcome::Draw, true) => &["2-2", "1-1", "3-3"],
        (Outcome::Draw, false) => &["1-1", "0-0"],
        (Outcome::Away, true) => &["1-2", "1-3", "0-2"],
        (Outcome::Away, false) => &["0-1", "0-2", "1-2"],
    }
}

/// Secondary market calls derived from the predicted outcome and the H2H
/// profile. With no H2H the defaults lean Over 2.5 / Probabile.
pub fn market_predictions(
    outcome: Outcome,
    h2h: Option<&HeadToHeadSummary>,
    picker: &dyn ScorePicker,
) -> MarketPredictions {
    let high_scoring = h2h.map(|s| s.avg_goals > HIGH_SCORING_THRESHOLD).unwrap_or(false);
    let total_goals = match h2h {
        Some(s) if s.avg_goals > OVER_THRESHOLD => "Over 2.5",
        Some(_) => "Under 2.5",
        None => "Over 2.5",
    };
    let btts = match h2h {
        Some(s) if s.btts_percentage > 60.0 => "Sì",
        Some(s) if s.btts_percentage > 40.0 => "Probabile",
        Some(_) => "No",
        None => "Probabile",
    };

    MarketPredictions {
        exact_score: picker.pick(exact_score_candidates(outcome, high_scoring)),
        total_goals: total_goals.to_string(),
        btts: btts.to_string(),
        corner: CORNER_LABEL.to_string(),
    }
}

/// Value ratings for the three 1X2 prices.
///
/// `base = clamp(10 - (odds - 1) * 1.5, 1, 10)`, +2 capped at 10 on the
/// outcome the model picked; monotonically decreasing in odds by design of
/// the linear term, not a calibrated probability.
pub fn value_ratings(fixture: &Match, predicted: Outcome) -> ValueRatings {
    ValueRatings {
        casa: value_rating(fixture.home_odds, predicted == Outcome::Home),
        pareggio: value_rating(fixture.draw_odds, predicted == Outcome::Draw),
        trasferta: value_rating(fixture.away_odds, predicted == Outcome::Away),
    }
}

fn value_rating(odds: f64, predicted: bool) -> ValueRating {
    let base = (10.0 - (odds - 1.0) * 1.5).clamp(1.0, 10.0);
    let boosted = if predicted { (base + 2.0).min(10.0) } else { base };
    let rating = boosted.round().clamp(1.0, 10.0) as u8;
    let value = if rating >= 7 {
        ValueTier::Alta
    } else if rating >= 5 {
        ValueTier::Media
    } else {
        ValueTier::Bassa
    };
    ValueRating { rating, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::h2h::round1;
    use chrono::{TimeZone, Utc};

    fn fixture(home: f64, draw: f64, away: f64) -> Match {
        Match {
            home_team: "Inter".into(),
            away_team: "Milan".into(),
            home_id: 505,
            away_id: 489,
            kickoff: Utc.with_ymd_and_hms(2026, 3, 8, 19, 45, 0).unwrap(),
            venue: None,
            home_odds: home,
            draw_odds: draw,
            away_odds: away,
        }
    }

    fn summary(avg_goals: f64, btts_pct: f64) -> HeadToHeadSummary {
        HeadToHeadSummary {
            total_matches: 10,
            team1_wins: 4,
            team2_wins: 3,
            draws: 3,
            team1_win_percentage: Some(40.0),
            team2_win_percentage: Some(30.0),
            draw_percentage: Some(30.0),
            avg_goals,
            over25_percentage: 50.0,
            btts_percentage: round1(btts_pct),
            recent_meetings: vec![],
        }
    }

    #[test]
    fn value_rating_follows_the_linear_formula() {
        // odds 2.1 -> 10 - 1.1 * 1.5 = 8.35 -> rounds to 8
        let r = value_rating(2.1, false);
        assert_eq!(r.rating, 8);
        assert_eq!(r.value, ValueTier::Alta);

        // odds 4.0 -> 10 - 4.5 = 5.5 -> 6 -> Media
        let r = value_rating(4.0, false);
        assert_eq!(r.rating, 6);
        assert_eq!(r.value, ValueTier::Media);

        // odds 9.0 -> 10 - 12 = -2 -> clamped to 1 -> Bassa
        let r = value_rating(9.0, false);
        assert_eq!(r.rating, 1);
        assert_eq!(r.value, ValueTier::Bassa);
    }

    #[test]
    fn predicted_outcome_gets_the_bonus_capped_at_ten() {
        // odds 2.1 -> base 8.35, +2 -> 10.35 -> capped to 10
        assert_eq!(value_rating(2.1, true).rating, 10);
        // odds 5.0 -> base 4.0, +2 -> 6 -> Media
        let r = value_rating(5.0, true);
        assert_eq!(r.rating, 6);
        assert_eq!(r.value, ValueTier::Media);
    }

    #[test]
    fn rating_is_monotone_in_odds() {
        let short = value_rating(1.5, false).rating;
        let long = value_rating(3.0, false).rating;
        assert!(short > long, "{short} vs {long}");
    }

    #[test]
    fn ratings_map_onto_the_three_markets() {
        let ratings = value_ratings(&fixture(2.1, 3.4, 3.6), Outcome::Home);
        assert_eq!(ratings.casa.rating, 10); // boosted
        assert!(ratings.casa.rating > ratings.trasferta.rating);
    }

    #[test]
    fn totals_label_thresholds() {
        let picker = FirstScore;
        assert_eq!(
            market_predictions(Outcome::Home, Some(&summary(2.4, 50.0)), &picker).total_goals,
            "Over 2.5"
        );
        assert_eq!(
            market_predictions(Outcome::Home, Some(&summary(2.3, 50.0)), &picker).total_goals,
            "Under 2.5"
        );
        assert_eq!(
            market_predictions(Outcome::Home, None, &picker).total_goals,
            "Over 2.5"
        );
    }

    #[test]
    fn btts_label_thresholds() {
        let picker = FirstScore;
        assert_eq!(
            market_predictions(Outcome::Draw, Some(&summary(2.0, 61.0)), &picker).btts,
            "Sì"
        );
        assert_eq!(
            market_predictions(Outcome::Draw, Some(&summary(2.0, 41.0)), &picker).btts,
            "Probabile"
        );
        assert_eq!(
            market_predictions(Outcome::Draw, Some(&summary(2.0, 40.0)), &picker).btts,
            "No"
        );
        assert_eq!(
            market_predictions(Outcome::Draw, None, &picker).btts,
            "Probabile"
        );
    }

    #[test]
    fn exact_score_matches_the_predicted_outcome() {
        let picker = FirstScore;
        let p = market_predictions(Outcome::Away, Some(&summary(3.0, 50.0)), &picker);
        let (h, a) = p.exact_score.split_once('-').unwrap();
        assert!(a.parse::<u32>().unwrap() > h.parse::<u32>().unwrap());
    }

    #[test]
    fn random_pick_stays_within_candidates() {
        let picker = RandomScore;
        for _ in 0..50 {
            let score = picker.pick(exact_score_candidates(Outcome::Home, false));
            assert!(["1-0", "2-0", "2-1"].contains(&score.as_str()));
        }
    }
}
