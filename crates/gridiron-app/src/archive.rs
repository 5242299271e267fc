// Game archive loading and normalization.
//
// Reads the JSON archive (compact or long keys, bare array or `{"games": [..]}`)
// or a flat CSV export, backfills missing betting grades, drops duplicate
// games, and returns the records in chronological order.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use tracing::{debug, info, warn};

use gridiron_core::game::{
    grade_spread, grade_total, GameRecord, OuResult, PrimetimeSlot, SpreadResult, Timezone,
    Weather, Week,
};
use gridiron_core::ParseError;

use crate::config::ArchiveFormat;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("cannot infer archive format of {path}; set data.format to \"json\" or \"csv\"")]
    UnsupportedFormat { path: String },
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

/// Either a bare array of games or an object wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawArchive {
    Games(Vec<serde_json::Value>),
    Wrapped { games: Vec<serde_json::Value> },
}

/// One row of a flat CSV export. Nested blocks (quarters, turnovers,
/// kicking) are JSON-only; everything else has a column.
#[derive(Debug, Deserialize)]
struct RawCsvGame {
    season: i32,
    week: String,
    #[serde(default)]
    date: String,
    #[serde(default, alias = "day")]
    day_of_week: String,
    #[serde(default)]
    kickoff: String,
    #[serde(alias = "home")]
    home_team: String,
    #[serde(alias = "away")]
    away_team: String,
    home_score: u32,
    away_score: u32,
    #[serde(default)]
    playoff: String,
    #[serde(default)]
    primetime: String,
    #[serde(default)]
    spread: Option<f64>,
    #[serde(default)]
    over_under: Option<f64>,
    #[serde(default)]
    spread_result: String,
    #[serde(default)]
    ou_result: String,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    conditions: String,
    #[serde(default)]
    wind: Option<f64>,
    #[serde(default)]
    home_timezone: String,
    #[serde(default)]
    away_timezone: String,
    #[serde(default)]
    home_continuity: Option<f64>,
    #[serde(default)]
    away_continuity: Option<f64>,
}

/// Blank cells and spreadsheet "None" mean not recorded.
fn cell(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty() && trimmed != "None").then_some(trimmed)
}

fn parse_cell<T: FromStr<Err = ParseError>>(raw: &str) -> Result<Option<T>, ParseError> {
    cell(raw).map(str::parse).transpose()
}

impl RawCsvGame {
    fn into_record(self) -> Result<GameRecord, ParseError> {
        let week: Week = self.week.parse()?;
        let date = cell(&self.date)
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| ParseError::Vocabulary {
                    kind: "date",
                    value: d.to_string(),
                })
            })
            .transpose()?;
        let day_of_week = cell(&self.day_of_week)
            .map(|d| {
                d.parse::<Weekday>().map_err(|_| ParseError::Vocabulary {
                    kind: "weekday",
                    value: d.to_string(),
                })
            })
            .transpose()?;
        let is_playoff = cell(&self.playoff)
            .map(|p| match p.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" | "y" => Ok(true),
                "false" | "no" | "0" | "n" => Ok(false),
                _ => Err(ParseError::Vocabulary {
                    kind: "playoff flag",
                    value: p.to_string(),
                }),
            })
            .transpose()?;

        let mut record = GameRecord::new(
            self.season,
            week,
            self.home_team.trim(),
            self.away_team.trim(),
            self.home_score,
            self.away_score,
        );
        record.date = date;
        record.day_of_week = day_of_week.or_else(|| date.map(|d| chrono::Datelike::weekday(&d)));
        record.kickoff = cell(&self.kickoff).map(str::to_string);
        record.is_playoff = is_playoff;
        record.primetime = parse_cell::<PrimetimeSlot>(&self.primetime)?;
        record.spread = self.spread;
        record.over_under = self.over_under;
        record.spread_result = parse_cell::<SpreadResult>(&self.spread_result)?;
        record.ou_result = parse_cell::<OuResult>(&self.ou_result)?;
        record.weather = Weather {
            temperature: self.temperature,
            conditions: cell(&self.conditions).map(str::to_string),
            wind: self.wind,
        };
        record.home_timezone = parse_cell::<Timezone>(&self.home_timezone)?;
        record.away_timezone = parse_cell::<Timezone>(&self.away_timezone)?;
        record.home_continuity = self.home_continuity;
        record.away_continuity = self.away_continuity;
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Grade lines that were posted but never graded.
fn backfill_grades(game: &mut GameRecord) {
    if let (Some(spread), None) = (game.spread, game.spread_result) {
        game.spread_result = Some(grade_spread(game.home_score, game.away_score, spread));
    }
    if let (Some(total), None) = (game.over_under, game.ou_result) {
        game.ou_result = Some(grade_total(game.home_score, game.away_score, total));
    }
}

/// Backfill weekday, primetime slot, and grades, drop repeats of the same (season, date, home, away)
/// keeping the first, and sort chronologically. The sort is stable, so games
/// sharing a key keep their archive order.
pub fn normalize(games: Vec<GameRecord>) -> Vec<GameRecord> {
    let total = games.len();
    let mut seen = HashSet::new();
    let mut unique: Vec<GameRecord> = games
        .into_iter()
        .filter(|g| {
            seen.insert((
                g.season,
                g.date,
                g.home_team_name.clone(),
                g.away_team_name.clone(),
            ))
        })
        .collect();

    let dropped = total - unique.len();
    if dropped > 0 {
        debug!("dropped {} duplicate games", dropped);
    }

    for game in &mut unique {
        game.backfill_schedule();
        backfill_grades(game);
    }
    unique.sort_by_key(|g| g.chronological_key());
    unique
}

// ---------------------------------------------------------------------------
// Reader-based loaders (testable without temp files)
// ---------------------------------------------------------------------------

/// Parse a JSON archive. Individual malformed games are skipped with a
/// warning; a document that is not an archive at all is an error.
pub fn load_json_from_reader<R: Read>(rdr: R) -> Result<Vec<GameRecord>, serde_json::Error> {
    let raw: RawArchive = serde_json::from_reader(rdr)?;
    let values = match raw {
        RawArchive::Games(values) | RawArchive::Wrapped { games: values } => values,
    };

    let mut games = Vec::with_capacity(values.len());
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<GameRecord>(value) {
            Ok(game) => games.push(game),
            Err(e) => warn!("skipping malformed game #{}: {}", i + 1, e),
        }
    }
    Ok(games)
}

/// Parse a CSV export with a header row. Malformed rows are skipped with a
/// warning.
pub fn load_csv_from_reader<R: Read>(rdr: R) -> Result<Vec<GameRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut games = Vec::new();
    for (i, result) in reader.deserialize::<RawCsvGame>().enumerate() {
        match result {
            Ok(raw) => match raw.into_record() {
                Ok(game) => games.push(game),
                Err(e) => warn!("skipping game row {}: {}", i + 1, e),
            },
            Err(e) => warn!("skipping malformed game row: {}", e),
        }
    }
    Ok(games)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

fn resolve_format(path: &Path, format: ArchiveFormat) -> Result<ArchiveFormat, ArchiveError> {
    match format {
        ArchiveFormat::Auto => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            match ext.as_deref() {
                Some("json") => Ok(ArchiveFormat::Json),
                Some("csv") => Ok(ArchiveFormat::Csv),
                _ => Err(ArchiveError::UnsupportedFormat {
                    path: path.display().to_string(),
                }),
            }
        }
        explicit => Ok(explicit),
    }
}

/// Load, normalize, and sort the archive at `path`.
pub fn load_games(path: &Path, format: ArchiveFormat) -> Result<Vec<GameRecord>, ArchiveError> {
    let format = resolve_format(path, format)?;
    let file = std::fs::File::open(path).map_err(|e| ArchiveError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let reader = std::io::BufReader::new(file);

    let games = match format {
        ArchiveFormat::Csv => load_csv_from_reader(reader).map_err(|e| ArchiveError::Csv {
            path: path.display().to_string(),
            source: e,
        })?,
        _ => load_json_from_reader(reader).map_err(|e| ArchiveError::Json {
            path: path.display().to_string(),
            source: e,
        })?,
    };

    let games = normalize(games);
    info!("loaded {} games from {}", games.len(), path.display());
    Ok(games)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_core::game::PlayoffRound;

    #[test]
    fn json_accepts_compact_keys() {
        let json = r#"[
            {"s": 2023, "w": "1", "dt": "2023-09-10", "d": "Sun", "h": "Bears", "a": "Packers",
             "hs": 20, "as": 38, "pt": "", "sp": -1.0, "ou": 42.5, "sr": "Lost", "our": "Over"}
        ]"#;
        let games = load_json_from_reader(json.as_bytes()).unwrap();
        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.season, 2023);
        assert_eq!(game.week, Week::Regular(1));
        assert_eq!(game.day_of_week, Some(Weekday::Sun));
        assert_eq!(game.primetime, None);
        assert_eq!(game.spread_result, Some(SpreadResult::Lost));
        assert_eq!(game.ou_result, Some(OuResult::Over));
    }

    #[test]
    fn json_accepts_long_keys_and_wrapper_object() {
        let json = r#"{"games": [
            {"season": 2022, "week": "SuperBowl", "homeTeamName": "Eagles",
             "awayTeamName": "Chiefs", "homeScore": 35, "awayScore": 38,
             "temperature": 70, "conditions": "Dome"}
        ]}"#;
        let games = load_json_from_reader(json.as_bytes()).unwrap();
        assert_eq!(games[0].week, Week::Playoff(PlayoffRound::Championship));
        assert_eq!(games[0].weather.temperature, Some(70.0));
        assert!(games[0].weather.is_dome());
    }

    #[test]
    fn json_skips_malformed_games() {
        let json = r#"[
            {"s": 2023, "w": "1", "h": "A", "a": "B", "hs": 1, "as": 0},
            {"s": 2023, "w": "Week Zero", "h": "A", "a": "B", "hs": 1, "as": 0},
            {"s": 2023, "w": "2", "h": "A"}
        ]"#;
        let games = load_json_from_reader(json.as_bytes()).unwrap();
        assert_eq!(games.len(), 1);
    }

    #[test]
    fn json_rejects_non_archive_document() {
        assert!(load_json_from_reader("{\"teams\": 3}".as_bytes()).is_err());
    }

    #[test]
    fn csv_rows_become_records() {
        let csv_data = "\
season,week,date,home,away,home_score,away_score,primetime,spread,over_under,conditions,home_timezone,away_timezone
2023,1,2023-09-07,Chiefs,Lions,20,21,TNF,-6.5,53.5,Clear,CT,ET
2023,WildCard,2024-01-13,Texans,Browns,45,14,,2.5,,,,
";
        let games = load_csv_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(games.len(), 2);

        let opener = &games[0];
        assert_eq!(opener.day_of_week, Some(Weekday::Thu));
        assert_eq!(opener.primetime, Some(PrimetimeSlot::ThursdayNight));
        assert_eq!(opener.spread, Some(-6.5));
        assert_eq!(opener.home_timezone, Some(Timezone::Central));
        assert!(!opener.weather.is_dome());

        let playoff = &games[1];
        assert!(playoff.is_playoff_game());
        assert_eq!(playoff.over_under, None);
        assert!(playoff.weather.is_dome());
    }

    #[test]
    fn csv_skips_rows_with_bad_vocabulary() {
        let csv_data = "\
season,week,home,away,home_score,away_score,primetime
2023,1,A,B,10,7,
2023,2,A,B,10,7,Midnight Madness
2023,x,A,B,10,7,
2023,3,A,B,ten,7,
";
        let games = load_csv_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].week, Week::Regular(1));
    }

    #[test]
    fn normalize_backfills_dedups_and_sorts() {
        let date = NaiveDate::from_ymd_opt(2021, 9, 12).unwrap();
        let mut ungraded = GameRecord::new(2021, Week::Regular(1), "A", "B", 24, 20).with_date(date);
        ungraded.spread = Some(-3.0);
        ungraded.over_under = Some(44.0);
        let duplicate = ungraded.clone();
        let earlier = GameRecord::new(2020, Week::Regular(5), "C", "D", 7, 3);

        let games = normalize(vec![ungraded, duplicate, earlier]);
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].season, 2020);
        assert_eq!(games[1].spread_result, Some(SpreadResult::Covered));
        assert_eq!(games[1].ou_result, Some(OuResult::Push));
    }

    #[test]
    fn normalize_keeps_existing_grades() {
        let mut game = GameRecord::new(2021, Week::Regular(1), "A", "B", 24, 20);
        game.spread = Some(-3.0);
        game.spread_result = Some(SpreadResult::Push);
        let games = normalize(vec![game]);
        assert_eq!(games[0].spread_result, Some(SpreadResult::Push));
    }

    #[test]
    fn blank_day_is_derived_from_the_date() {
        let json = r#"[
            {"s": 2020, "w": 1, "d": "", "dt": "2020-09-13", "h": "A", "a": "B", "hs": 20, "as": 17},
            {"s": 2020, "w": 2, "dt": "2020-09-20", "h": "B", "a": "A", "hs": 10, "as": 13}
        ]"#;
        let games = normalize(load_json_from_reader(json.as_bytes()).unwrap());
        assert_eq!(games[0].day_of_week, Some(Weekday::Sun));
        assert_eq!(games[1].day_of_week, Some(Weekday::Sun));

        let rest = gridiron_core::reports::rest::compute_rest(&games);
        assert!(rest.games_with_rest > 0);
    }

    #[test]
    fn primetime_is_detected_from_kickoff() {
        let json = r#"[
            {"s": 2015, "w": 3, "d": "Mon", "dt": "2015-09-28", "tm": "8:30PM", "pt": "",
             "h": "Dallas Cowboys", "a": "Philadelphia Eagles", "hs": 20, "as": 10},
            {"s": 2015, "w": 3, "dt": "2015-09-27", "tm": "8:30PM",
             "h": "Green Bay Packers", "a": "Kansas City Chiefs", "hs": 38, "as": 28},
            {"s": 2015, "w": 3, "d": "Sun", "dt": "2015-09-27", "tm": "1:00PM",
             "h": "Chicago Bears", "a": "Seattle Seahawks", "hs": 0, "as": 26},
            {"s": 2015, "w": 4, "d": "Thu", "dt": "2015-10-01", "tm": "8:25PM", "pt": "MNF",
             "h": "Pittsburgh Steelers", "a": "Baltimore Ravens", "hs": 20, "as": 23}
        ]"#;
        let games = normalize(load_json_from_reader(json.as_bytes()).unwrap());
        let slot = |home: &str| {
            games
                .iter()
                .find(|g| g.home_team_name == home)
                .and_then(|g| g.primetime)
        };
        assert_eq!(slot("Dallas Cowboys"), Some(PrimetimeSlot::MondayNight));
        assert_eq!(slot("Green Bay Packers"), Some(PrimetimeSlot::SundayNight));
        assert_eq!(slot("Chicago Bears"), None);
        // A recorded slot wins over detection.
        assert_eq!(slot("Pittsburgh Steelers"), Some(PrimetimeSlot::MondayNight));
    }

    #[test]
    fn auto_format_follows_extension() {
        assert_eq!(
            resolve_format(Path::new("games.JSON"), ArchiveFormat::Auto).unwrap(),
            ArchiveFormat::Json
        );
        assert_eq!(
            resolve_format(Path::new("games.txt"), ArchiveFormat::Csv).unwrap(),
            ArchiveFormat::Csv
        );
        assert!(matches!(
            resolve_format(Path::new("games.txt"), ArchiveFormat::Auto),
            Err(ArchiveError::UnsupportedFormat { .. })
        ));
    }
}
