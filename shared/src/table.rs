//! Tabular representation of leaderboard responses and the processing applied to them.
//!
//! Columns differ between seasons and some of them may be null or fractional,
//! so rows keep the raw JSON object and expose the shared columns as accessors.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Platform, endpoint::PlatformTagging};

const RANK: &str = "rank";
const NAME: &str = "name";
const LEAGUE_NUMBER: &str = "leagueNumber";
const FAME: &str = "fame";
const MULTI_PLATFORM_USER: &str = "multiPlatformUser";

/// One player's entry in a leaderboard.
///
/// Columns are kept exactly as the API sent them, nulls and unknown keys
/// included, and only read through the typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderboardRow {
    columns: Map<String, Value>,
}

impl LeaderboardRow {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &Map<String, Value> {
        &self.columns
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Set a column, keeping its position when it already exists.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.columns.insert(column.to_string(), value.into());
    }

    pub fn rank(&self) -> Option<u64> {
        self.get(RANK).and_then(Value::as_u64)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME).and_then(Value::as_str)
    }

    pub fn league_number(&self) -> Option<f64> {
        self.get(LEAGUE_NUMBER).and_then(Value::as_f64)
    }

    pub fn fame(&self) -> Option<f64> {
        self.get(FAME).and_then(Value::as_f64)
    }

    /// Platform specific account name, empty when missing or null.
    pub fn platform_name(&self, platform: Platform) -> &str {
        self.get(platform.name_column())
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Value of the `<platform>User` indicator, if it has been computed.
    pub fn platform_user(&self, platform: Platform) -> Option<u8> {
        self.flag(platform.user_column())
    }

    pub fn multi_platform_user(&self) -> Option<u8> {
        self.flag(MULTI_PLATFORM_USER)
    }

    fn flag(&self, column: &str) -> Option<u8> {
        self.get(column)
            .and_then(Value::as_u64)
            .and_then(|v| u8::try_from(v).ok())
    }
}

impl From<Map<String, Value>> for LeaderboardRow {
    fn from(columns: Map<String, Value>) -> Self {
        Self::new(columns)
    }
}

/// Column a merged crossplay leaderboard is ordered by, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    LeagueNumber,
    Fame,
}

impl SortKey {
    pub fn value(&self, row: &LeaderboardRow) -> Option<f64> {
        match self {
            SortKey::LeagueNumber => row.league_number(),
            SortKey::Fame => row.fame(),
        }
    }

    /// Descending order, rows without a numeric value last.
    fn compare(&self, a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
        match (self.value(a), self.value(b)) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Platform the positional heuristic attributes to a merged row.
///
/// Each per-platform leaderboard used to be capped, so a row's index in the
/// steam/xbox/psn concatenation was taken as its origin.
pub fn positional_platform(index: usize) -> Option<Platform> {
    match index {
        0..=10_000 => Some(Platform::Steam),
        10_001..=20_000 => Some(Platform::Xbox),
        20_001..=30_000 => Some(Platform::Psn),
        _ => None,
    }
}

/// Ordered rows of a leaderboard, in API order or in merged order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderboardTable {
    rows: Vec<LeaderboardRow>,
}

impl LeaderboardTable {
    pub fn new(rows: Vec<LeaderboardRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<LeaderboardRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeaderboardRow> {
        self.rows.iter()
    }

    /// First row whose display name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&LeaderboardRow> {
        self.rows
            .iter()
            .find(|r| r.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    /// Add the `<platform>User` and `multiPlatformUser` columns derived from the
    /// platform name fields.
    pub fn derive_indicator_columns(mut self) -> Self {
        for row in &mut self.rows {
            let mut total = 0;
            for platform in Platform::ALL {
                let flag = u8::from(!row.platform_name(platform).is_empty());
                row.set(platform.user_column(), flag);
                total += flag;
            }
            row.set(MULTI_PLATFORM_USER, u8::from(total > 1));
        }
        self
    }

    /// Concatenate per-platform results, tag each row with a platform, sort by
    /// `sort_key` descending and re-rank from 1.
    ///
    /// `parts` are concatenated in the given order, which callers keep as
    /// [`Platform::ALL`].
    pub fn merge_crossplay(
        parts: Vec<(Platform, Vec<LeaderboardRow>)>,
        sort_key: SortKey,
        tagging: PlatformTagging,
    ) -> Self {
        let mut rows = Vec::with_capacity(parts.iter().map(|(_, r)| r.len()).sum());
        for (origin, part) in parts {
            tracing::debug!("[MERGE] {} rows from {}", part.len(), origin);
            rows.extend(part.into_iter().map(|row| (origin, row)));
        }

        let mut rows: Vec<LeaderboardRow> = rows
            .into_iter()
            .enumerate()
            .map(|(index, (origin, mut row))| {
                for platform in Platform::ALL {
                    row.set(platform.user_column(), 0u8);
                }
                let tagged = match tagging {
                    PlatformTagging::Positional => positional_platform(index),
                    PlatformTagging::Origin => Some(origin),
                };
                if let Some(platform) = tagged {
                    row.set(platform.user_column(), 1u8);
                }
                row
            })
            .collect();

        // stable: ties keep concatenation order
        rows.sort_by(|a, b| sort_key.compare(a, b));

        for (position, row) in rows.iter_mut().enumerate() {
            row.set(RANK, position as u64 + 1);
        }

        Self { rows }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Vec<LeaderboardRow>> for LeaderboardTable {
    fn from(rows: Vec<LeaderboardRow>) -> Self {
        Self::new(rows)
    }
}

impl IntoIterator for LeaderboardTable {
    type Item = LeaderboardRow;
    type IntoIter = std::vec::IntoIter<LeaderboardRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a LeaderboardTable {
    type Item = &'a LeaderboardRow;
    type IntoIter = std::slice::Iter<'a, LeaderboardRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: Value) -> LeaderboardRow {
        serde_json::from_value(value).unwrap()
    }

    fn named(steam: &str, xbox: &str, psn: &str) -> LeaderboardRow {
        row(json!({
            "name": "Player#0001",
            "steamName": steam,
            "xboxName": xbox,
            "psnName": psn,
        }))
    }

    fn ranked(name: &str, league_number: i64) -> LeaderboardRow {
        row(json!({ "name": name, "leagueNumber": league_number }))
    }

    fn indicators(row: &LeaderboardRow) -> (u8, u8, u8) {
        (
            row.platform_user(Platform::Steam).unwrap(),
            row.platform_user(Platform::Xbox).unwrap(),
            row.platform_user(Platform::Psn).unwrap(),
        )
    }

    fn names(table: &LeaderboardTable) -> Vec<&str> {
        table.iter().map(|r| r.name().unwrap()).collect()
    }

    #[test]
    fn single_platform_player_is_not_multi_platform() {
        let table = LeaderboardTable::new(vec![named("x", "", "")]).derive_indicator_columns();
        let row = &table.rows()[0];

        assert_eq!(indicators(row), (1, 0, 0));
        assert_eq!(row.multi_platform_user(), Some(0));
    }

    #[test]
    fn two_platform_player_is_multi_platform() {
        let table = LeaderboardTable::new(vec![named("x", "y", "")]).derive_indicator_columns();
        let row = &table.rows()[0];

        assert_eq!(indicators(row), (1, 1, 0));
        assert_eq!(row.multi_platform_user(), Some(1));
    }

    #[test]
    fn missing_or_null_platform_names_count_as_empty() {
        let row = row(json!({ "name": "Nobody", "xboxName": null, "psnName": "ps" }));
        let table = LeaderboardTable::new(vec![row]).derive_indicator_columns();

        assert_eq!(indicators(&table.rows()[0]), (0, 0, 1));
        assert_eq!(table.rows()[0].multi_platform_user(), Some(0));
        assert_eq!(table.rows()[0].get("xboxName"), Some(&Value::Null));
    }

    #[test]
    fn merge_keeps_platform_order_and_flags_small_boards_as_steam() {
        let part = |p: &str| (0..5).map(|i| ranked(&format!("{p}{i}"), 0)).collect::<Vec<_>>();
        let table = LeaderboardTable::merge_crossplay(
            vec![
                (Platform::Steam, part("steam")),
                (Platform::Xbox, part("xbox")),
                (Platform::Psn, part("psn")),
            ],
            SortKey::LeagueNumber,
            PlatformTagging::Positional,
        );

        let names = names(&table);
        assert_eq!(&names[..5], ["steam0", "steam1", "steam2", "steam3", "steam4"]);
        assert_eq!(&names[5..10], ["xbox0", "xbox1", "xbox2", "xbox3", "xbox4"]);
        assert_eq!(&names[10..], ["psn0", "psn1", "psn2", "psn3", "psn4"]);
        assert!(table.iter().all(|r| indicators(r) == (1, 0, 0)));
        assert!(table.iter().all(|r| r.multi_platform_user().is_none()));
    }

    #[test]
    fn merge_with_origin_tagging_uses_the_responding_platform() {
        let table = LeaderboardTable::merge_crossplay(
            vec![
                (Platform::Steam, vec![ranked("a", 3)]),
                (Platform::Xbox, vec![ranked("b", 2)]),
                (Platform::Psn, vec![ranked("c", 1)]),
            ],
            SortKey::LeagueNumber,
            PlatformTagging::Origin,
        );

        assert_eq!(indicators(table.find_by_name("a").unwrap()), (1, 0, 0));
        assert_eq!(indicators(table.find_by_name("b").unwrap()), (0, 1, 0));
        assert_eq!(indicators(table.find_by_name("c").unwrap()), (0, 0, 1));
    }

    #[test]
    fn merge_sorts_descending_and_reranks() {
        let table = LeaderboardTable::merge_crossplay(
            vec![
                (Platform::Steam, vec![ranked("a", 4), ranked("b", 9)]),
                (Platform::Xbox, vec![ranked("c", 7), ranked("d", 9)]),
                (Platform::Psn, vec![ranked("e", 1)]),
            ],
            SortKey::LeagueNumber,
            PlatformTagging::Positional,
        );

        let keys: Vec<f64> = table.iter().map(|r| r.league_number().unwrap()).collect();
        assert!(keys.windows(2).all(|w| w[0] >= w[1]));
        let ranks: Vec<u64> = table.iter().map(|r| r.rank().unwrap()).collect();
        assert_eq!(ranks, [1, 2, 3, 4, 5]);
        // ties keep concatenation order
        assert_eq!(names(&table)[..2], ["b", "d"]);
    }

    #[test]
    fn merge_by_fame_accepts_floats_and_puts_missing_fame_last() {
        let table = LeaderboardTable::merge_crossplay(
            vec![
                (
                    Platform::Steam,
                    vec![
                        row(json!({ "name": "a" })),
                        row(json!({ "name": "b", "fame": 10 })),
                    ],
                ),
                (
                    Platform::Xbox,
                    vec![
                        row(json!({ "name": "c", "fame": 1234.5 })),
                        row(json!({ "name": "d", "fame": null })),
                    ],
                ),
                (Platform::Psn, vec![row(json!({ "name": "e", "fame": 10.5 }))]),
            ],
            SortKey::Fame,
            PlatformTagging::Positional,
        );

        assert_eq!(names(&table), ["c", "e", "b", "a", "d"]);
        assert_eq!(table.rows()[0].get("fame"), Some(&json!(1234.5)));
        assert_eq!(table.rows()[3].rank(), Some(4));
    }

    #[test]
    fn positional_ranges_match_platform_caps() {
        assert_eq!(positional_platform(0), Some(Platform::Steam));
        assert_eq!(positional_platform(10_000), Some(Platform::Steam));
        assert_eq!(positional_platform(10_001), Some(Platform::Xbox));
        assert_eq!(positional_platform(20_000), Some(Platform::Xbox));
        assert_eq!(positional_platform(20_001), Some(Platform::Psn));
        assert_eq!(positional_platform(30_000), Some(Platform::Psn));
        assert_eq!(positional_platform(30_001), None);
    }

    #[test]
    fn season_specific_columns_survive_a_round_trip() {
        let raw = json!({
            "rank": 1,
            "change": -2,
            "name": "Player#0001",
            "steamName": "player",
            "xboxName": "",
            "psnName": "",
            "leagueNumber": 21,
            "league": "Ruby",
            "rankScore": 58123
        });

        let row = row(raw.clone());
        assert_eq!(row.rank(), Some(1));
        assert_eq!(row.league_number(), Some(21.0));
        assert_eq!(row.get("league"), Some(&json!("Ruby")));
        assert_eq!(row.get("rankScore"), Some(&json!(58123)));

        let table = LeaderboardTable::new(vec![row]);
        assert_eq!(serde_json::to_value(&table).unwrap(), json!([raw]));

        let exported: Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
        assert_eq!(exported, json!([raw]));
        assert!(table.to_json_pretty().unwrap().contains('\n'));
    }

    #[test]
    fn nulls_and_floats_survive_a_round_trip() {
        let raw = json!([
            { "name": "a", "steamName": null, "xboxName": "", "psnName": "a", "fame": 1234.0 },
            { "name": null, "steamName": "b", "xboxName": null, "psnName": null, "leagueNumber": 2.5 }
        ]);

        let table: LeaderboardTable = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(table.rows()[0].fame(), Some(1234.0));
        assert_eq!(table.rows()[1].name(), None);
        assert_eq!(table.rows()[1].league_number(), Some(2.5));
        assert_eq!(serde_json::to_value(&table).unwrap(), raw);

        let processed = serde_json::to_value(table.derive_indicator_columns()).unwrap();
        assert_eq!(processed[0]["steamName"], Value::Null);
        assert_eq!(processed[0]["psnUser"], json!(1));
        assert_eq!(processed[1]["steamUser"], json!(1));
        assert_eq!(processed[1]["multiPlatformUser"], json!(0));
    }
}
