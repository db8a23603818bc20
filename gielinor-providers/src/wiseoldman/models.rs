//! Wise Old Man v2 response types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Player
// ============================================================================

/// Player record from `GET /players/{username}` and `POST /players/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// WOM player ID.
    pub id: i64,
    /// Lowercase player name.
    pub username: String,
    /// Name with the player's capitalisation.
    pub display_name: String,
    /// Account type (`regular`, `ironman`, `hardcore`, ...).
    #[serde(rename = "type")]
    pub player_type: String,
    /// Account build (`main`, `f2p`, `lvl3`, ...).
    pub build: String,
    /// Tracking status, when reported.
    #[serde(default)]
    pub status: Option<String>,
    /// Total experience.
    #[serde(default)]
    pub exp: i64,
    /// Efficient hours played.
    #[serde(default)]
    pub ehp: f64,
    /// Efficient hours bossed.
    #[serde(default)]
    pub ehb: f64,
    /// When WOM started tracking the player.
    pub registered_at: DateTime<Utc>,
    /// Last update.
    pub updated_at: DateTime<Utc>,
    /// Last time any stat changed.
    #[serde(default)]
    pub last_changed_at: Option<DateTime<Utc>>,
    /// Latest snapshot, included by the player details endpoints.
    #[serde(default)]
    pub latest_snapshot: Option<Snapshot>,
}

impl Player {
    /// Returns the overall level of the latest snapshot, if present.
    pub fn overall_level(&self) -> Option<i64> {
        self.latest_snapshot
            .as_ref()?
            .data
            .skills
            .get("overall")
            .map(|skill| skill.level)
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// A point-in-time record of every tracked metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Snapshot ID.
    pub id: i64,
    /// Owning player ID.
    pub player_id: i64,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    /// When it was imported from another tracker, if it was.
    #[serde(default)]
    pub imported_at: Option<DateTime<Utc>>,
    /// Metric values.
    pub data: SnapshotData,
}

/// Metric values of a snapshot, keyed by metric name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapshotData {
    /// Skills (`overall`, `attack`, ...).
    #[serde(default)]
    pub skills: BTreeMap<String, SkillValue>,
    /// Bosses.
    #[serde(default)]
    pub bosses: BTreeMap<String, BossValue>,
    /// Activities (clue scrolls, minigames).
    #[serde(default)]
    pub activities: BTreeMap<String, ActivityValue>,
    /// Computed metrics (`ehp`, `ehb`).
    #[serde(default)]
    pub computed: BTreeMap<String, ComputedValue>,
}

/// Skill metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillValue {
    /// Metric name.
    pub metric: String,
    /// Experience; `-1` when unranked.
    pub experience: i64,
    /// Hiscore rank; `-1` when unranked.
    pub rank: i64,
    /// Level.
    pub level: i64,
    /// Efficient hours played in this skill.
    #[serde(default)]
    pub ehp: f64,
}

/// Boss metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossValue {
    /// Metric name.
    pub metric: String,
    /// Kill count; `-1` when unranked.
    pub kills: i64,
    /// Hiscore rank.
    pub rank: i64,
    /// Efficient hours bossed on this boss.
    #[serde(default)]
    pub ehb: f64,
}

/// Activity metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityValue {
    /// Metric name.
    pub metric: String,
    /// Score; `-1` when unranked.
    pub score: i64,
    /// Hiscore rank.
    pub rank: i64,
}

/// Computed metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedValue {
    /// Metric name.
    pub metric: String,
    /// Computed value.
    pub value: f64,
    /// Rank.
    pub rank: i64,
}

// ============================================================================
// Snapshot Query
// ============================================================================

/// Time period accepted by the snapshot endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Last five minutes.
    FiveMin,
    /// Last 24 hours.
    Day,
    /// Last 7 days.
    Week,
    /// Last 31 days.
    Month,
    /// Last 365 days.
    Year,
}

impl Period {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiveMin => "five_min",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown period name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown period '{0}' (expected five_min, day, week, month or year)")]
pub struct ParsePeriodError(String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "five_min" | "5min" => Ok(Self::FiveMin),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}

/// Filters for `GET /players/{username}/snapshots`.
///
/// WOM expects either a `period` or a `startDate`/`endDate` range. Absent
/// fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotQuery {
    /// Relative period.
    pub period: Option<Period>,
    /// Range start (`startDate`).
    pub start_date: Option<DateTime<Utc>>,
    /// Range end (`endDate`).
    pub end_date: Option<DateTime<Utc>>,
}

impl SnapshotQuery {
    /// Query for a fixed period.
    pub fn period(period: Period) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }

    /// Query for an explicit date range.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            period: None,
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    pub(crate) fn period_param(&self) -> Option<&'static str> {
        self.period.as_ref().map(Period::as_str)
    }

    pub(crate) fn start_param(&self) -> Option<String> {
        self.start_date.as_ref().map(iso_timestamp)
    }

    pub(crate) fn end_param(&self) -> Option<String> {
        self.end_date.as_ref().map(iso_timestamp)
    }

    /// Cache-key parts, labelled so a start-only and an end-only range
    /// with the same timestamp stay distinct.
    pub(crate) fn cache_parts(&self) -> [Option<String>; 3] {
        [
            self.period_param().map(|p| format!("period={p}")),
            self.start_param().map(|s| format!("start={s}")),
            self.end_param().map(|e| format!("end={e}")),
        ]
    }
}

fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn player_json() -> serde_json::Value {
        json!({
            "id": 1135,
            "username": "zezima",
            "displayName": "Zezima",
            "type": "regular",
            "build": "main",
            "status": "active",
            "exp": 4_600_000_000_i64,
            "ehp": 12_000.5,
            "ehb": 300.25,
            "registeredAt": "2020-04-18T08:57:35.233Z",
            "updatedAt": "2024-02-01T12:00:00.000Z",
            "lastChangedAt": null,
            "latestSnapshot": {
                "id": 9,
                "playerId": 1135,
                "createdAt": "2024-02-01T12:00:00.000Z",
                "importedAt": null,
                "data": {
                    "skills": {
                        "overall": {"metric": "overall", "experience": 4_600_000_000_i64, "rank": 1, "level": 2277, "ehp": 12_000.5}
                    },
                    "bosses": {
                        "zulrah": {"metric": "zulrah", "kills": 500, "rank": 100, "ehb": 12.0}
                    },
                    "activities": {},
                    "computed": {}
                }
            }
        })
    }

    #[test]
    fn test_player_parses() {
        let player: Player = serde_json::from_value(player_json()).unwrap();
        assert_eq!(player.display_name, "Zezima");
        assert_eq!(player.player_type, "regular");
        assert_eq!(player.overall_level(), Some(2277));
        assert!(player.last_changed_at.is_none());
        let snapshot = player.latest_snapshot.unwrap();
        assert_eq!(snapshot.data.bosses["zulrah"].kills, 500);
    }

    #[test]
    fn test_player_missing_type_is_rejected() {
        let mut raw = player_json();
        raw.as_object_mut().unwrap().remove("type");
        assert!(serde_json::from_value::<Player>(raw).is_err());
    }

    #[test]
    fn test_period_round_trip_names() {
        for period in [Period::FiveMin, Period::Day, Period::Week, Period::Month, Period::Year] {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert!("fortnight".parse::<Period>().is_err());
        assert_eq!(serde_json::to_value(Period::FiveMin).unwrap(), json!("five_min"));
    }

    #[test]
    fn test_snapshot_query_params() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let query = SnapshotQuery::between(start, end);
        assert_eq!(query.period_param(), None);
        assert_eq!(query.start_param().as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(query.end_param().as_deref(), Some("2024-01-31T00:00:00.000Z"));

        assert_eq!(SnapshotQuery::period(Period::Week).period_param(), Some("week"));
    }

    #[test]
    fn test_snapshot_cache_parts_are_labelled() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let since = SnapshotQuery {
            start_date: Some(at),
            ..SnapshotQuery::default()
        };
        let until = SnapshotQuery {
            end_date: Some(at),
            ..SnapshotQuery::default()
        };

        assert_eq!(
            since.cache_parts(),
            [None, Some("start=2024-01-01T00:00:00.000Z".to_string()), None]
        );
        assert_ne!(since.cache_parts(), until.cache_parts());
        assert_eq!(
            SnapshotQuery::period(Period::Week).cache_parts()[0].as_deref(),
            Some("period=week")
        );
    }
}
