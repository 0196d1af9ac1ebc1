use crate::types::{HeadToHeadSummary, HistoricalMeeting, MeetingWinner, PastMeeting};

/// Meetings considered for the aggregate window.
const MAX_WINDOW: usize = 15;
/// Individual lines surfaced next to the prediction.
const MAX_RECENT: usize = 5;

/// Aggregate a head-to-head window for `team1_id` vs `team2_id`.
///
/// A win goes to whichever team id scored more, regardless of which side it
/// played on that day; equal goals count as a draw. A zero-length history
/// yields an all-zero summary with the percentage fields omitted — callers
/// treat that as "no H2H available", never as a division error.
pub fn summarize(
    history: &[HistoricalMeeting],
    team1_id: u32,
    team2_id: u32,
) -> HeadToHeadSummary {
    let window = &history[..history.len().min(MAX_WINDOW)];

    let mut team1_wins = 0u32;
    let mut team2_wins = 0u32;
    let mut draws = 0u32;
    let mut goals = 0u32;
    let mut over25 = 0u32;
    let mut btts = 0u32;

    for meeting in window {
        let (team1_goals, team2_goals) = goals_for(meeting, team1_id, team2_id);
        if team1_goals > team2_goals {
            team1_wins += 1;
        } else if team2_goals > team1_goals {
            team2_wins += 1;
        } else {
            draws += 1;
        }

        let total = meeting.home_goals + meeting.away_goals;
        goals += total;
        if total > 2 {
            over25 += 1;
        }
        if meeting.home_goals >= 1 && meeting.away_goals >= 1 {
            btts += 1;
        }
    }

    let total_matches = window.len() as u32;
    let pct = |count: u32| -> Option<f64> {
        (total_matches > 0).then(|| round1(count as f64 / total_matches as f64 * 100.0))
    };

    HeadToHeadSummary {
        total_matches,
        team1_wins,
        team2_wins,
        draws,
        team1_win_percentage: pct(team1_wins),
        team2_win_percentage: pct(team2_wins),
        draw_percentage: pct(draws),
        avg_goals: if total_matches > 0 {
            round2(goals as f64 / total_matches as f64)
        } else {
            0.0
        },
        over25_percentage: pct(over25).unwrap_or(0.0),
        btts_percentage: pct(btts).unwrap_or(0.0),
        recent_meetings: window
            .iter()
            .take(MAX_RECENT)
            .map(to_past_meeting)
            .collect(),
    }
}

// Goals seen from team1's perspective, whichever side it played on.
fn goals_for(meeting: &HistoricalMeeting, team1_id: u32, team2_id: u32) -> (u32, u32) {
    if meeting.home_id == team1_id || meeting.away_id == team2_id {
        (meeting.home_goals, meeting.away_goals)
    } else {
        (meeting.away_goals, meeting.home_goals)
    }
}

fn to_past_meeting(meeting: &HistoricalMeeting) -> PastMeeting {
    let winner = if meeting.home_goals > meeting.away_goals {
        MeetingWinner::Home
    } else if meeting.away_goals > meeting.home_goals {
        MeetingWinner::Away
    } else {
        MeetingWinner::Draw
    };
    PastMeeting {
        date: meeting.date,
        home_team: meeting.home_team.clone(),
        away_team: meeting.away_team.clone(),
        home_goals: meeting.home_goals,
        away_goals: meeting.away_goals,
        winner,
    }
}

pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meeting(home_id: u32, away_id: u32, hg: u32, ag: u32) -> HistoricalMeeting {
        HistoricalMeeting {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            home_id,
            away_id,
            home_team: format!("Team {home_id}"),
            away_team: format!("Team {away_id}"),
            home_goals: hg,
            away_goals: ag,
        }
    }

    #[test]
    fn wins_and_draws_partition_the_window() {
        let history = vec![
            meeting(1, 2, 2, 0), // team1 win at home
            meeting(2, 1, 0, 1), // team1 win away
            meeting(2, 1, 3, 1), // team2 win at home
            meeting(1, 2, 1, 1), // draw
        ];
        let s = summarize(&history, 1, 2);
        assert_eq!(s.total_matches, 4);
        assert_eq!(s.team1_wins, 2);
        assert_eq!(s.team2_wins, 1);
        assert_eq!(s.draws, 1);
        assert_eq!(s.team1_wins + s.team2_wins + s.draws, s.total_matches);
    }

    #[test]
    fn percentages_sum_to_roughly_one_hundred() {
        let history = vec![
            meeting(1, 2, 2, 0),
            meeting(2, 1, 1, 1),
            meeting(1, 2, 0, 3),
            meeting(2, 1, 2, 2),
            meeting(1, 2, 1, 0),
            meeting(2, 1, 0, 1),
            meeting(1, 2, 2, 1),
        ];
        let s = summarize(&history, 1, 2);
        let sum = s.team1_win_percentage.unwrap()
            + s.team2_win_percentage.unwrap()
            + s.draw_percentage.unwrap();
        assert!((sum - 100.0).abs() <= 0.2, "sum was {sum}");
    }

    #[test]
    fn goal_aggregates() {
        let history = vec![
            meeting(1, 2, 2, 2), // 4 goals, over, btts
            meeting(2, 1, 1, 0), // 1 goal
            meeting(1, 2, 3, 1), // 4 goals, over, btts
            meeting(2, 1, 0, 0), // 0 goals
        ];
        let s = summarize(&history, 1, 2);
        assert_eq!(s.avg_goals, 2.25);
        assert_eq!(s.over25_percentage, 50.0);
        assert_eq!(s.btts_percentage, 50.0);
    }

    #[test]
    fn empty_history_is_not_a_division_error() {
        let s = summarize(&[], 1, 2);
        assert!(s.is_empty());
        assert_eq!(s.total_matches, 0);
        assert!(s.team1_win_percentage.is_none());
        assert!(s.draw_percentage.is_none());
        assert_eq!(s.avg_goals, 0.0);
        assert!(s.recent_meetings.is_empty());
    }

    #[test]
    fn recent_list_is_capped_and_keeps_input_order() {
        let history: Vec<_> = (0..9)
            .map(|i| {
                let mut m = meeting(1, 2, i, 0);
                m.date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
                    - chrono::Days::new(30 * i as u64);
                m
            })
            .collect();
        let s = summarize(&history, 1, 2);
        assert_eq!(s.recent_meetings.len(), 5);
        // Most recent first, as supplied by the source.
        assert!(s.recent_meetings[0].date > s.recent_meetings[4].date);
    }

    #[test]
    fn window_is_capped_at_fifteen() {
        let history: Vec<_> = (0..20).map(|_| meeting(1, 2, 1, 0)).collect();
        let s = summarize(&history, 1, 2);
        assert_eq!(s.total_matches, 15);
        assert_eq!(s.team1_wins, 15);
    }
}
