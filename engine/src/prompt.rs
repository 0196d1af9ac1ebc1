use crate::types::{HeadToHeadSummary, Match};

/// Render the analysis prompt for one fixture. Pure and deterministic.
///
/// The completion endpoint has no structured-output mode, so the output
/// contract (closed 1/X/2 set, 60–90 confidence, exactly 3 key points) is
/// restated in the prompt; the parser still re-validates everything and
/// never trusts the model.
pub fn build(fixture: &Match, h2h: Option<&HeadToHeadSummary>) -> String {
    let mut prompt = format!(
        "MATCH ANALYSIS REQUEST:\n\
        Fixture: {home} vs {away}\n\
        Kickoff: {kickoff}\n\
        Venue: {venue}\n\
        \n\
        MARKET ODDS:\n\
        - Home win ({home}): {home_odds:.2}\n\
        - Draw: {draw_odds:.2}\n\
        - Away win ({away}): {away_odds:.2}\n",
        home = fixture.home_team,
        away = fixture.away_team,
        kickoff = fixture.kickoff.format("%Y-%m-%d %H:%M UTC"),
        venue = fixture.venue.as_deref().unwrap_or("unknown"),
        home_odds = fixture.home_odds,
        draw_odds = fixture.draw_odds,
        away_odds = fixture.away_odds,
    );

    if let Some(summary) = h2h.filter(|s| !s.is_empty()) {
        prompt.push_str(&format!(
            "\nHEAD-TO-HEAD (last {total} meetings):\n\
            - {home} wins: {w1}, {away} wins: {w2}, draws: {d}\n\
            - Average goals per meeting: {avg:.2}\n\
            - Over 2.5 goals: {over:.1}% of meetings\n\
            - Both teams scored: {btts:.1}% of meetings\n",
            total = summary.total_matches,
            home = fixture.home_team,
            away = fixture.away_team,
            w1 = summary.team1_wins,
            w2 = summary.team2_wins,
            d = summary.draws,
            avg = summary.avg_goals,
            over = summary.over25_percentage,
            btts = summary.btts_percentage,
        ));
        for meeting in &summary.recent_meetings {
            prompt.push_str(&format!(
                "- {}: {} {}-{} {}\n",
                meeting.date, meeting.home_team, meeting.home_goals, meeting.away_goals,
                meeting.away_team,
            ));
        }
    } else {
        prompt.push_str("\nHEAD-TO-HEAD: no recent meetings on record.\n");
    }

    prompt.push_str(
        "\nTASK:\n\
        Analyze this fixture as a football betting expert and produce a match \
        prediction.\n\
        \n\
        Output ONLY a JSON object with this exact shape:\n\
        {\"summary\": \"one short sentence\", \
        \"tacticalAnalysis\": {\"home\": \"...\", \"away\": \"...\"}, \
        \"keyPoints\": [\"...\", \"...\", \"...\"], \
        \"aiPrediction\": \"1\", \
        \"confidence\": 72, \
        \"reasoning\": \"...\"}\n\
        \n\
        CONSTRAINTS:\n\
        - aiPrediction must be exactly one of \"1\", \"X\", \"2\"\n\
        - confidence must be an integer between 60 and 90\n\
        - keyPoints must contain exactly 3 entries\n\
        - summary should stay under 60 characters\n\
        - Do NOT wrap the JSON in markdown code blocks.\n",
    );

    prompt
}
