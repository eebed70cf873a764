//! Convert persisted table rows to model entities.
//!
//! Persisted rows use the flat spreadsheet column names (`MatchID`, `Group`,
//! `H_Score`, ...) and are loosely typed: dates may carry a time part,
//! scores may arrive as strings or floats, `Played` may be `"TRUE"`. All of
//! that is normalised here so the calculation layer only sees typed models.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StorageError;
use crate::models::{Group, Match, PlayerStat};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// One row of the persisted match table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    #[serde(rename = "MatchID", deserialize_with = "lenient_u32")]
    pub match_id: u32,
    #[serde(rename = "Group", deserialize_with = "lenient_string")]
    pub group: String,
    #[serde(rename = "Date", default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(rename = "Time", default, deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(rename = "Home", deserialize_with = "lenient_string")]
    pub home: String,
    #[serde(rename = "Away", deserialize_with = "lenient_string")]
    pub away: String,
    #[serde(rename = "H_Score", default, deserialize_with = "lenient_u32")]
    pub h_score: u32,
    #[serde(rename = "A_Score", default, deserialize_with = "lenient_u32")]
    pub a_score: u32,
    #[serde(rename = "Played", default, deserialize_with = "lenient_bool")]
    pub played: bool,
}

impl From<&Match> for MatchRow {
    fn from(m: &Match) -> Self {
        Self {
            match_id: m.id,
            group: m.group.label().to_string(),
            date: m.date.format(DATE_FORMAT).to_string(),
            time: m.time.format(TIME_FORMAT).to_string(),
            home: m.home_team.clone(),
            away: m.away_team.clone(),
            h_score: m.home_score,
            a_score: m.away_score,
            played: m.played,
        }
    }
}

/// Convert a persisted row to a [`Match`].
///
/// A blank `Time` falls back to `default_time`.
pub fn match_from_row(row: MatchRow, default_time: NaiveTime) -> Result<Match, StorageError> {
    let group: Group = row
        .group
        .parse()
        .map_err(|e| StorageError::MalformedRow(format!("match {}: {}", row.match_id, e)))?;

    let date = parse_date(&row.date).ok_or_else(|| {
        StorageError::MalformedRow(format!("match {}: bad date '{}'", row.match_id, row.date))
    })?;

    let time = if row.time.trim().is_empty() {
        default_time
    } else {
        parse_time(&row.time).ok_or_else(|| {
            StorageError::MalformedRow(format!("match {}: bad time '{}'", row.match_id, row.time))
        })?
    };

    let home = row.home.trim();
    let away = row.away.trim();
    if home.is_empty() || away.is_empty() {
        return Err(StorageError::MalformedRow(format!(
            "match {}: missing team name",
            row.match_id
        )));
    }

    let mut m = Match::new(
        row.match_id,
        group,
        home.to_string(),
        away.to_string(),
        date,
        time,
    );
    m.home_score = row.h_score;
    m.away_score = row.a_score;
    m.played = row.played;
    Ok(m)
}

/// One row of the persisted player statistic table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRow {
    #[serde(rename = "Player", deserialize_with = "lenient_string")]
    pub player: String,
    #[serde(rename = "Team", default, deserialize_with = "lenient_string")]
    pub team: String,
    #[serde(rename = "Goals", default, deserialize_with = "lenient_u32")]
    pub goals: u32,
    #[serde(rename = "Saves", default, deserialize_with = "lenient_u32")]
    pub saves: u32,
}

impl From<&PlayerStat> for PlayerStatRow {
    fn from(stat: &PlayerStat) -> Self {
        Self {
            player: stat.player_name.clone(),
            team: stat.team.clone(),
            goals: stat.goals,
            saves: stat.saves,
        }
    }
}

/// Convert a persisted row to a [`PlayerStat`].
pub fn player_stat_from_row(row: PlayerStatRow) -> Result<PlayerStat, StorageError> {
    let player = row.player.trim();
    if player.is_empty() {
        return Err(StorageError::MalformedRow(
            "player stat without a player name".to_string(),
        ));
    }

    Ok(PlayerStat::new(player.to_string(), row.team.trim().to_string())
        .with_goals(row.goals)
        .with_saves(row.saves))
}

/// Parse a calendar date, tolerating a trailing time part and day-first
/// spreadsheet dates.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(s, "%d/%m/%Y").ok())
}

/// Parse a kickoff time in 24h (`18:00`, `18:00:00`) or 12h (`06:00 PM`)
/// form.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    ["%H:%M", "%H:%M:%S", "%I:%M %p"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!("expected text, got {}", other))),
    }
}

fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    let parsed = match &value {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|f| f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64)
        .map(|f| f.round() as u32)
        .ok_or_else(|| de::Error::custom(format!("expected a count, got {}", value)))
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(d)?;
    match &value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().map_or(false, |f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(true),
            "false" | "no" | "n" | "0" | "" => Ok(false),
            _ => Err(de::Error::custom(format!("expected a flag, got {}", value))),
        },
        _ => Err(de::Error::custom(format!("expected a flag, got {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kickoff() -> NaiveTime {
        NaiveTime::from_hms_opt(18, 0, 0).unwrap()
    }

    #[test]
    fn test_match_row_round_trip() {
        let m = Match::new(
            3,
            Group::B,
            "Owls".to_string(),
            "Hawks".to_string(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
        )
        .with_result(2, 2);

        let row = MatchRow::from(&m);
        assert_eq!(row.date, "2026-03-02");
        assert_eq!(row.time, "20:30");

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"MatchID\":3"));
        assert!(json.contains("\"H_Score\":2"));

        let back: MatchRow = serde_json::from_str(&json).unwrap();
        assert_eq!(match_from_row(back, kickoff()).unwrap(), m);
    }

    #[test]
    fn test_match_row_loose_types() {
        let json = r#"{"MatchID":"7","Group":"A","Date":"2026-03-01 00:00:00","Time":"18:00:00",
            "Home":"Lions","Away":"Tigers","H_Score":"2.0","A_Score":1.0,"Played":"TRUE"}"#;

        let row: MatchRow = serde_json::from_str(json).unwrap();
        let m = match_from_row(row, kickoff()).unwrap();

        assert_eq!(m.id, 7);
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(m.time, kickoff());
        assert_eq!((m.home_score, m.away_score), (2, 1));
        assert!(m.played);
    }

    #[test]
    fn test_match_row_missing_optional_columns() {
        let json = r#"{"MatchID":1,"Group":"Final","Date":"2026-03-05","Home":"A","Away":"B"}"#;

        let row: MatchRow = serde_json::from_str(json).unwrap();
        let m = match_from_row(row, kickoff()).unwrap();

        assert_eq!(m.group, Group::Final);
        assert_eq!(m.time, kickoff());
        assert!(!m.played);
        assert_eq!(m.home_score, 0);
    }

    #[test]
    fn test_match_row_rejects_bad_group_and_date() {
        let bad_group: MatchRow = serde_json::from_str(
            r#"{"MatchID":1,"Group":"Z","Date":"2026-03-01","Home":"A","Away":"B"}"#,
        )
        .unwrap();
        assert!(matches!(
            match_from_row(bad_group, kickoff()),
            Err(StorageError::MalformedRow(_))
        ));

        let bad_date: MatchRow = serde_json::from_str(
            r#"{"MatchID":1,"Group":"A","Date":"soon","Home":"A","Away":"B"}"#,
        )
        .unwrap();
        assert!(match_from_row(bad_date, kickoff()).is_err());
    }

    #[test]
    fn test_match_row_rejects_negative_score() {
        let result: Result<MatchRow, _> = serde_json::from_str(
            r#"{"MatchID":1,"Group":"A","Date":"2026-03-01","Home":"A","Away":"B","H_Score":-1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_player_stat_row_without_saves() {
        let row: PlayerStatRow =
            serde_json::from_str(r#"{"Player":"X","Team":"A","Goals":3}"#).unwrap();
        let stat = player_stat_from_row(row).unwrap();

        assert_eq!(stat.goals, 3);
        assert_eq!(stat.saves, 0);
    }

    #[test]
    fn test_player_stat_row_requires_name() {
        let row: PlayerStatRow = serde_json::from_str(r#"{"Player":" ","Goals":1}"#).unwrap();
        assert!(player_stat_from_row(row).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 9);
        assert_eq!(parse_date("2026-03-09"), expected);
        assert_eq!(parse_date("2026-03-09T00:00:00"), expected);
        assert_eq!(parse_date("09/03/2026"), expected);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_time_formats() {
        let expected = NaiveTime::from_hms_opt(18, 0, 0);
        assert_eq!(parse_time("18:00"), expected);
        assert_eq!(parse_time("18:00:00"), expected);
        assert_eq!(parse_time("06:00 PM"), expected);
        assert_eq!(parse_time("evening"), None);
    }
}
