//! Round-robin fixture generation.

use chrono::{Days, Local, NaiveDate, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;

use super::CalcError;
use crate::models::{Group, Match, MatchId};

/// Smallest group that can produce a fixture.
pub const MIN_GROUP_SIZE: usize = 2;

/// Scheduling knobs for a generated fixture list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePolicy {
    /// Matches are spread cyclically over this many consecutive days.
    pub window_days: u32,
    /// Kickoff time given to every generated match.
    pub kickoff: NaiveTime,
}

impl Default for FixturePolicy {
    fn default() -> Self {
        Self {
            window_days: 4,
            kickoff: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Every unordered pair `(i, j)` with `i < j`, in input order. The earlier
/// team plays at home.
pub fn round_robin_pairs(teams: &[String]) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for (i, home) in teams.iter().enumerate() {
        for away in &teams[i + 1..] {
            pairs.push((home.clone(), away.clone()));
        }
    }
    pairs
}

/// Generate the group-stage schedule starting today, in random order.
pub fn generate(group_a: &[String], group_b: &[String]) -> Result<Vec<Match>, CalcError> {
    generate_with(
        group_a,
        group_b,
        &FixturePolicy::default(),
        Local::now().date_naive(),
        &mut rand::thread_rng(),
    )
}

/// Generate the group-stage schedule with an explicit start date and
/// randomness source.
pub fn generate_with<R: Rng + ?Sized>(
    group_a: &[String],
    group_b: &[String],
    policy: &FixturePolicy,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<Match>, CalcError> {
    check_group(Group::A, group_a)?;
    check_group(Group::B, group_b)?;

    let mut pairs: Vec<(Group, (String, String))> = round_robin_pairs(group_a)
        .into_iter()
        .map(|p| (Group::A, p))
        .chain(round_robin_pairs(group_b).into_iter().map(|p| (Group::B, p)))
        .collect();
    pairs.shuffle(rng);

    let window = policy.window_days.max(1) as u64;
    let matches = pairs
        .into_iter()
        .enumerate()
        .map(|(index, (group, (home, away)))| {
            let offset = Days::new(index as u64 % window);
            let date = today.checked_add_days(offset).unwrap_or(today);
            Match::new(
                index as MatchId + 1,
                group,
                home,
                away,
                date,
                policy.kickoff,
            )
        })
        .collect();

    Ok(matches)
}

fn check_group(group: Group, teams: &[String]) -> Result<(), CalcError> {
    if teams.len() < MIN_GROUP_SIZE {
        return Err(CalcError::validation(format!(
            "Group {} needs at least {} teams, got {}",
            group,
            MIN_GROUP_SIZE,
            teams.len()
        )));
    }
    if teams.iter().any(|t| t.trim().is_empty()) {
        return Err(CalcError::validation(format!(
            "Group {} has an empty team name",
            group
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn teams(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn generate_seeded(a: &[String], b: &[String], seed: u64) -> Vec<Match> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_with(a, b, &FixturePolicy::default(), start(), &mut rng).unwrap()
    }

    #[test]
    fn test_round_robin_pairs_order() {
        let pairs = round_robin_pairs(&teams(&["A", "B", "C"]));
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn test_match_count_for_sizes() {
        for (m, n) in [(2, 2), (4, 3), (5, 6), (8, 2)] {
            let a: Vec<String> = (0..m).map(|i| format!("A{}", i)).collect();
            let b: Vec<String> = (0..n).map(|i| format!("B{}", i)).collect();
            let matches = generate_seeded(&a, &b, 7);

            assert_eq!(matches.len(), m * (m - 1) / 2 + n * (n - 1) / 2);
        }
    }

    #[test]
    fn test_generated_matches_are_unplayed_and_partitioned() {
        let a = teams(&["Lions", "Tigers", "Bears", "Wolves"]);
        let b = teams(&["Owls", "Hawks", "Eagles"]);
        let matches = generate_seeded(&a, &b, 42);

        for m in &matches {
            assert!(!m.played);
            assert_eq!((m.home_score, m.away_score), (0, 0));
            let roster = if m.group == Group::A { &a } else { &b };
            assert!(roster.contains(&m.home_team));
            assert!(roster.contains(&m.away_team));
            assert_ne!(m.home_team, m.away_team);
        }
        assert_eq!(matches.iter().filter(|m| m.group == Group::A).count(), 6);
        assert_eq!(matches.iter().filter(|m| m.group == Group::B).count(), 3);
    }

    #[test]
    fn test_no_duplicate_pairs_within_group() {
        let a = teams(&["A1", "A2", "A3", "A4", "A5"]);
        let b = teams(&["B1", "B2"]);
        let matches = generate_seeded(&a, &b, 3);

        let mut seen = HashSet::new();
        for m in &matches {
            let mut pair = [m.home_team.as_str(), m.away_team.as_str()];
            pair.sort();
            assert!(seen.insert((m.group, pair[0].to_string(), pair[1].to_string())));
        }
    }

    #[test]
    fn test_ids_sequential_and_dates_cycle() {
        let a = teams(&["A", "B", "C", "D"]);
        let b = teams(&["E", "F", "G"]);
        let matches = generate_seeded(&a, &b, 11);

        for (index, m) in matches.iter().enumerate() {
            assert_eq!(m.id, index as u32 + 1);
            let expected = start() + Days::new(index as u64 % 4);
            assert_eq!(m.date, expected);
            assert_eq!(m.time, FixturePolicy::default().kickoff);
        }
    }

    #[test]
    fn test_custom_window_and_kickoff() {
        let policy = FixturePolicy {
            window_days: 5,
            kickoff: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
        };
        let a = teams(&["A", "B", "C", "D"]);
        let b = teams(&["E", "F", "G", "H"]);
        let mut rng = StdRng::seed_from_u64(1);
        let matches = generate_with(&a, &b, &policy, start(), &mut rng).unwrap();

        assert_eq!(matches[5].date, start());
        assert_eq!(matches[4].date, start() + Days::new(4));
        assert!(matches.iter().all(|m| m.time == policy.kickoff));
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = teams(&["A", "B", "C", "D"]);
        let b = teams(&["E", "F", "G"]);

        assert_eq!(generate_seeded(&a, &b, 99), generate_seeded(&a, &b, 99));
    }

    #[test]
    fn test_too_few_teams_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_with(
            &teams(&["Solo"]),
            &teams(&["X", "Y"]),
            &FixturePolicy::default(),
            start(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, CalcError::Validation(_)));

        let err = generate(&teams(&["X", "Y"]), &[]).unwrap_err();
        assert!(matches!(err, CalcError::Validation(_)));
    }

    #[test]
    fn test_blank_team_name_rejected() {
        let err = generate(&teams(&["X", "  "]), &teams(&["Y", "Z"])).unwrap_err();
        assert!(matches!(err, CalcError::Validation(_)));
    }

    #[test]
    fn test_generate_uses_thread_rng() {
        let a = teams(&["A", "B", "C"]);
        let b = teams(&["D", "E"]);
        let matches = generate(&a, &b).unwrap();
        assert_eq!(matches.len(), 4);
    }
}
