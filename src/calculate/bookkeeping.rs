//! Operator edits: team registration, group draw, results and player stats.
//!
//! Every function takes the current collection and returns the updated one;
//! nothing here touches storage.

use chrono::{Days, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;

use super::{finalists, CalcError, MIN_GROUP_SIZE};
use crate::models::{Group, Match, MatchId, MatchUpdate, PlayerStat, TeamEntry};

/// Highest score accepted for one side of a match.
pub const MAX_SCORE: u32 = 20;

/// Highest goals or saves accepted in one player stat entry.
pub const MAX_COUNT: u32 = 10;

/// Add a team to the registry.
pub fn register_team(
    teams: &[TeamEntry],
    name: &str,
    max_teams: usize,
) -> Result<Vec<TeamEntry>, CalcError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CalcError::validation("team name must not be empty"));
    }
    if teams.len() >= max_teams {
        return Err(CalcError::validation(format!(
            "maximum of {} teams reached",
            max_teams
        )));
    }
    if teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
        return Err(CalcError::validation(format!(
            "team '{}' is already registered",
            name
        )));
    }

    let mut updated = teams.to_vec();
    updated.push(TeamEntry::new(name.to_string()));
    Ok(updated)
}

/// Shuffle the registered teams and split them into two groups: the first
/// `group_a_size` go to group A, the rest to group B.
///
/// `required` is the exact number of registered teams needed before a draw.
pub fn draw_groups<R: Rng + ?Sized>(
    teams: &[TeamEntry],
    group_a_size: usize,
    required: usize,
    rng: &mut R,
) -> Result<Vec<TeamEntry>, CalcError> {
    if teams.len() != required {
        return Err(CalcError::validation(format!(
            "exactly {} teams are needed for the draw, {} registered",
            required,
            teams.len()
        )));
    }
    if group_a_size < MIN_GROUP_SIZE || teams.len() < group_a_size + MIN_GROUP_SIZE {
        return Err(CalcError::validation(format!(
            "cannot split {} teams with {} in group A",
            teams.len(),
            group_a_size
        )));
    }

    let mut names: Vec<String> = teams.iter().map(|t| t.name.clone()).collect();
    names.shuffle(rng);

    Ok(names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let group = if i < group_a_size { Group::A } else { Group::B };
            TeamEntry::new(name).in_group(group)
        })
        .collect())
}

/// Enter a final score and mark the match played.
pub fn record_result(
    matches: &[Match],
    id: MatchId,
    home_score: u32,
    away_score: u32,
) -> Result<Vec<Match>, CalcError> {
    let update = MatchUpdate {
        home_score: Some(home_score),
        away_score: Some(away_score),
        played: Some(true),
        ..Default::default()
    };
    update_match(matches, id, &update)
}

/// Apply a field-level edit to one match.
pub fn update_match(
    matches: &[Match],
    id: MatchId,
    update: &MatchUpdate,
) -> Result<Vec<Match>, CalcError> {
    if update.is_empty() {
        return Err(CalcError::validation("nothing to update"));
    }
    for score in [update.home_score, update.away_score].into_iter().flatten() {
        if score > MAX_SCORE {
            return Err(CalcError::validation(format!(
                "score {} is above the maximum of {}",
                score, MAX_SCORE
            )));
        }
    }

    let mut updated = matches.to_vec();
    let target = updated
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| CalcError::validation(format!("no match with id {}", id)))?;
    update.apply(target);
    Ok(updated)
}

/// Append a player statistic row.
///
/// Rows are never merged here; leaderboards sum them per (player, team).
pub fn record_player_stat(
    stats: &[PlayerStat],
    player_name: &str,
    team: &str,
    goals: u32,
    saves: u32,
) -> Result<Vec<PlayerStat>, CalcError> {
    let player_name = player_name.trim();
    let team = team.trim();
    if player_name.is_empty() {
        return Err(CalcError::validation("player name must not be empty"));
    }
    if team.is_empty() {
        return Err(CalcError::validation("team must not be empty"));
    }
    if goals > MAX_COUNT || saves > MAX_COUNT {
        return Err(CalcError::validation(format!(
            "goals and saves are capped at {} per entry",
            MAX_COUNT
        )));
    }
    if goals == 0 && saves == 0 {
        return Err(CalcError::validation("nothing to record: goals and saves are both zero"));
    }

    let mut updated = stats.to_vec();
    updated.push(
        PlayerStat::new(player_name.to_string(), team.to_string())
            .with_goals(goals)
            .with_saves(saves),
    );
    Ok(updated)
}

/// Replace any existing final with a fresh one between the two group
/// winners, dated the day after the last group match.
pub fn schedule_final(matches: &[Match], kickoff: NaiveTime) -> Result<Vec<Match>, CalcError> {
    let winners = finalists(matches, &Group::STAGES)?;
    let (home, away) = match winners.as_slice() {
        [a, b] => (a.team.clone(), b.team.clone()),
        _ => return Err(CalcError::empty("both groups need a winner")),
    };

    let mut updated: Vec<Match> = matches
        .iter()
        .filter(|m| m.group != Group::Final)
        .cloned()
        .collect();

    let last_day = updated
        .iter()
        .map(|m| m.date)
        .max()
        .ok_or_else(|| CalcError::empty("no group matches scheduled"))?;
    let date = last_day.checked_add_days(Days::new(1)).unwrap_or(last_day);
    let id = updated
        .iter()
        .map(|m| m.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| CalcError::validation("no match ids left for the final"))?;

    updated.push(Match::new(id, Group::Final, home, away, date, kickoff));
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn kickoff() -> NaiveTime {
        NaiveTime::from_hms_opt(18, 0, 0).unwrap()
    }

    fn fixture(id: u32, group: Group, home: &str, away: &str, day: u32) -> Match {
        Match::new(
            id,
            group,
            home.to_string(),
            away.to_string(),
            NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            kickoff(),
        )
    }

    fn registry(names: &[&str]) -> Vec<TeamEntry> {
        names.iter().map(|n| TeamEntry::new(n.to_string())).collect()
    }

    #[test]
    fn test_register_team_appends_trimmed() {
        let teams = register_team(&[], "  Lions ", 7).unwrap();
        assert_eq!(teams, vec![TeamEntry::new("Lions".to_string())]);
    }

    #[test]
    fn test_register_team_rejections() {
        let teams = registry(&["Lions", "Tigers"]);

        assert!(matches!(register_team(&teams, "", 7), Err(CalcError::Validation(_))));
        assert!(matches!(register_team(&teams, "lions", 7), Err(CalcError::Validation(_))));
        assert!(matches!(register_team(&teams, "Bears", 2), Err(CalcError::Validation(_))));
    }

    #[test]
    fn test_draw_groups_splits_four_and_three() {
        let teams = registry(&["T1", "T2", "T3", "T4", "T5", "T6", "T7"]);
        let mut rng = StdRng::seed_from_u64(5);

        let drawn = draw_groups(&teams, 4, 7, &mut rng).unwrap();

        assert_eq!(drawn.len(), 7);
        assert_eq!(drawn.iter().filter(|t| t.group == Some(Group::A)).count(), 4);
        assert_eq!(drawn.iter().filter(|t| t.group == Some(Group::B)).count(), 3);
        let mut names: Vec<&str> = drawn.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["T1", "T2", "T3", "T4", "T5", "T6", "T7"]);
    }

    #[test]
    fn test_draw_groups_needs_full_registry() {
        let teams = registry(&["T1", "T2", "T3"]);
        let mut rng = StdRng::seed_from_u64(5);

        let err = draw_groups(&teams, 4, 7, &mut rng).unwrap_err();
        assert!(matches!(err, CalcError::Validation(_)));
    }

    #[test]
    fn test_draw_groups_rejects_lopsided_split() {
        let teams = registry(&["T1", "T2", "T3", "T4"]);
        let mut rng = StdRng::seed_from_u64(5);

        assert!(draw_groups(&teams, 3, 4, &mut rng).is_err());
        assert!(draw_groups(&teams, 2, 4, &mut rng).is_ok());
    }

    #[test]
    fn test_record_result_marks_played() {
        let matches = vec![fixture(1, Group::A, "A", "B", 1), fixture(2, Group::A, "C", "D", 1)];

        let updated = record_result(&matches, 2, 3, 1).unwrap();

        assert!(!updated[0].played);
        assert!(updated[1].played);
        assert_eq!((updated[1].home_score, updated[1].away_score), (3, 1));
        // the input is left alone
        assert!(!matches[1].played);
    }

    #[test]
    fn test_update_match_unknown_id() {
        let matches = vec![fixture(1, Group::A, "A", "B", 1)];
        let err = record_result(&matches, 9, 1, 0).unwrap_err();
        assert_eq!(err, CalcError::validation("no match with id 9"));
    }

    #[test]
    fn test_update_match_empty_patch() {
        let matches = vec![fixture(1, Group::A, "A", "B", 1)];
        assert!(update_match(&matches, 1, &MatchUpdate::default()).is_err());
    }

    #[test]
    fn test_update_match_can_unplay() {
        let matches = vec![fixture(1, Group::A, "A", "B", 1).with_result(2, 2)];
        let update = MatchUpdate {
            played: Some(false),
            ..Default::default()
        };

        let updated = update_match(&matches, 1, &update).unwrap();

        assert!(!updated[0].played);
        assert_eq!(updated[0].home_score, 2);
    }

    #[test]
    fn test_update_match_rejects_score_above_cap() {
        let matches = vec![fixture(1, Group::A, "A", "B", 1)];

        let err = record_result(&matches, 1, u32::MAX, 0).unwrap_err();
        assert!(matches!(err, CalcError::Validation(_)));
        assert!(record_result(&matches, 1, MAX_SCORE + 1, 0).is_err());
        assert!(record_result(&matches, 1, MAX_SCORE, 0).is_ok());
    }

    #[test]
    fn test_record_player_stat_appends() {
        let stats = record_player_stat(&[], "X", "A", 2, 0).unwrap();
        let stats = record_player_stat(&stats, "X", "A", 3, 0).unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].goals, 3);
    }

    #[test]
    fn test_record_player_stat_validation() {
        assert!(record_player_stat(&[], " ", "A", 1, 0).is_err());
        assert!(record_player_stat(&[], "X", "", 1, 0).is_err());
        assert!(record_player_stat(&[], "X", "A", 0, 0).is_err());
        assert!(record_player_stat(&[], "X", "A", u32::MAX, 0).is_err());
        assert!(record_player_stat(&[], "X", "A", 0, MAX_COUNT + 1).is_err());
        assert!(record_player_stat(&[], "X", "A", MAX_COUNT, MAX_COUNT).is_ok());
    }

    #[test]
    fn test_schedule_final() {
        let matches = vec![
            fixture(1, Group::A, "A1", "A2", 1).with_result(1, 0),
            fixture(2, Group::B, "B1", "B2", 3).with_result(0, 2),
            fixture(3, Group::A, "A1", "A3", 2),
        ];

        let updated = schedule_final(&matches, kickoff()).unwrap();
        let final_match = updated.last().unwrap();

        assert_eq!(updated.len(), 4);
        assert_eq!(final_match.group, Group::Final);
        assert_eq!(final_match.id, 4);
        assert_eq!(final_match.home_team, "A1");
        assert_eq!(final_match.away_team, "B2");
        assert_eq!(final_match.date, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert!(!final_match.played);
    }

    #[test]
    fn test_schedule_final_replaces_previous_final() {
        let matches = vec![
            fixture(1, Group::A, "A1", "A2", 1).with_result(1, 0),
            fixture(2, Group::B, "B1", "B2", 1).with_result(2, 0),
            fixture(3, Group::Final, "A2", "B2", 2),
        ];

        let updated = schedule_final(&matches, kickoff()).unwrap();

        let finals: Vec<&Match> = updated.iter().filter(|m| m.group == Group::Final).collect();
        assert_eq!(finals.len(), 1);
        assert_eq!(finals[0].home_team, "A1");
        assert_eq!(finals[0].away_team, "B1");
        assert_eq!(finals[0].id, 3);
    }

    #[test]
    fn test_schedule_final_when_ids_exhausted() {
        let matches = vec![
            fixture(u32::MAX, Group::A, "A1", "A2", 1).with_result(1, 0),
            fixture(2, Group::B, "B1", "B2", 1).with_result(2, 0),
        ];

        let err = schedule_final(&matches, kickoff()).unwrap_err();
        assert!(matches!(err, CalcError::Validation(_)));
    }

    #[test]
    fn test_schedule_final_without_results() {
        let matches = vec![fixture(1, Group::A, "A1", "A2", 1), fixture(2, Group::B, "B1", "B2", 1)];
        assert!(matches!(
            schedule_final(&matches, kickoff()),
            Err(CalcError::EmptyData(_))
        ));
    }
}
