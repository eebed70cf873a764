//! Award leaderboards built on the points table and player stats.

use super::{compute, has_played, CalcError};
use crate::models::{Finalist, Group, Match, PlayerStat, PlayerTotal, StandingsRow};

/// Default size of the golden boot leaderboard.
pub const DEFAULT_TOP_SCORERS: usize = 3;

/// Golden boot: goals summed per (player, team), highest first.
///
/// Players with no goals are left out. Equal totals keep the order in which
/// the player was first recorded.
pub fn top_scorers(stats: &[PlayerStat], limit: Option<usize>) -> Vec<PlayerTotal> {
    leaderboard(stats, limit, |s| s.goals)
}

/// Goalkeeper saves summed per (player, team), highest first.
pub fn top_savers(stats: &[PlayerStat], limit: Option<usize>) -> Vec<PlayerTotal> {
    leaderboard(stats, limit, |s| s.saves)
}

fn leaderboard<F>(stats: &[PlayerStat], limit: Option<usize>, value: F) -> Vec<PlayerTotal>
where
    F: Fn(&PlayerStat) -> u32,
{
    let mut totals: Vec<PlayerTotal> = Vec::new();
    for stat in stats {
        let existing = totals
            .iter_mut()
            .find(|t| t.player_name == stat.player_name && t.team == stat.team);
        match existing {
            Some(total) => total.total = total.total.saturating_add(value(stat)),
            None => totals.push(PlayerTotal {
                player_name: stat.player_name.clone(),
                team: stat.team.clone(),
                total: value(stat),
            }),
        }
    }

    totals.retain(|t| t.total > 0);
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    if let Some(limit) = limit {
        totals.truncate(limit);
    }
    totals
}

/// Golden glove: the team that conceded fewest goals across every match,
/// preferring the one that played more when tied.
///
/// Teams that have not played yet are not eligible.
pub fn best_defense(matches: &[Match]) -> Result<StandingsRow, CalcError> {
    if !has_played(matches, None) {
        return Err(CalcError::empty("no matches have been played"));
    }

    let mut rows: Vec<StandingsRow> = compute(matches, None)
        .into_iter()
        .filter(|r| r.played > 0)
        .collect();
    rows.sort_by(|a, b| {
        a.goals_against
            .cmp(&b.goals_against)
            .then_with(|| b.played.cmp(&a.played))
    });

    rows.into_iter()
        .next()
        .ok_or_else(|| CalcError::empty("no matches have been played"))
}

/// Group winners, one per requested group, in the order given.
pub fn finalists(matches: &[Match], groups: &[Group]) -> Result<Vec<Finalist>, CalcError> {
    groups
        .iter()
        .map(|&group| {
            if !has_played(matches, Some(group)) {
                return Err(CalcError::empty(format!(
                    "Group {} has no played matches yet",
                    group
                )));
            }
            compute(matches, Some(group))
                .into_iter()
                .next()
                .map(|row| Finalist {
                    group,
                    team: row.team.clone(),
                    row,
                })
                .ok_or_else(|| CalcError::empty(format!("Group {} has no table", group)))
        })
        .collect()
}
