//! Points-table computation.

use crate::models::{Group, Match, StandingsRow};

/// Build the points table for `group`, or across every match when `group`
/// is `None`.
///
/// Teams come from the home/away names of the matches in scope, in order of
/// first appearance, so a team that has not played yet still gets a zero
/// row. Only played matches count. Rows are ordered by points, goal
/// difference and goals scored (all descending); remaining ties keep their
/// first-appearance order.
pub fn compute(matches: &[Match], group: Option<Group>) -> Vec<StandingsRow> {
    let scoped: Vec<&Match> = matches
        .iter()
        .filter(|m| group.map_or(true, |g| m.group == g))
        .collect();

    let mut teams: Vec<&str> = Vec::new();
    for m in &scoped {
        for team in [m.home_team.as_str(), m.away_team.as_str()] {
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
    }

    let mut rows: Vec<StandingsRow> = teams
        .into_iter()
        .map(|team| {
            let mut row = StandingsRow::new(team.to_string());
            for m in scoped.iter().filter(|m| m.played) {
                if let Some((mine, theirs)) = m.score_for(team) {
                    row.record(mine, theirs);
                }
            }
            row
        })
        .collect();

    rows.sort_by(StandingsRow::rank_cmp);
    rows
}

/// True when at least one match in scope has been played.
pub fn has_played(matches: &[Match], group: Option<Group>) -> bool {
    matches
        .iter()
        .any(|m| m.played && group.map_or(true, |g| m.group == g))
}

/// Played matches, most recent entry first.
pub fn results_history(matches: &[Match]) -> Vec<Match> {
    matches.iter().rev().filter(|m| m.played).cloned().collect()
}
