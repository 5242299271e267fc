// Integration tests for config + archive loading.
//
// Each test writes a throwaway project directory with `tempfile`, loads it
// through the public API, and runs a command over the result.

use std::fs;
use std::path::Path;

use gridiron_app::archive::{self, ArchiveError};
use gridiron_app::cli::Commands;
use gridiron_app::commands;
use gridiron_app::config::{self, ArchiveFormat};
use gridiron_core::game::SpreadResult;

// ===========================================================================
// Fixtures
// ===========================================================================

const COMPACT_ARCHIVE: &str = r#"[
  {"s":2021,"w":"2","dt":"2021-09-19","d":"Sun","h":"Packers","a":"Lions","hs":35,"as":17,"sp":-11.0,"ou":48.5},
  {"s":2021,"w":"1","dt":"2021-09-12","d":"Sun","h":"Saints","a":"Packers","hs":38,"as":3,"sp":3.5,"ou":49.5,"sr":"Covered","our":"Under"},
  {"s":2021,"w":"1","dt":"2021-09-12","d":"Sun","h":"Saints","a":"Packers","hs":38,"as":3,"sp":3.5,"ou":49.5,"sr":"Covered","our":"Under"},
  {"s":2021,"w":"Division","dt":"2022-01-22","d":"Sat","h":"Packers","a":"49ers","hs":10,"as":13,"pt":"Saturday Primetime"}
]"#;

fn write_project(dir: &Path, archive_name: &str, archive_body: &str) {
    fs::write(dir.join(archive_name), archive_body).unwrap();
    fs::write(
        dir.join(config::CONFIG_FILE),
        format!("[data]\ngames = \"{archive_name}\"\n\n[matchup]\nrecent_games = 1\n"),
    )
    .unwrap();
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn config_points_at_a_loadable_archive() {
    let tmp = tempfile::tempdir().unwrap();
    write_project(tmp.path(), "games.json", COMPACT_ARCHIVE);

    let config = config::load_config_from(tmp.path()).unwrap();
    let games = archive::load_games(&config.data.games, config.data.format).unwrap();

    // Duplicate dropped, sorted by date, grades backfilled.
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].home_team_name, "Saints");
    assert_eq!(games[1].home_team_name, "Packers");
    assert_eq!(games[1].spread_result, Some(SpreadResult::Covered));
    assert!(games[2].is_playoff_game());
}

#[test]
fn csv_archive_loads_by_extension() {
    let tmp = tempfile::tempdir().unwrap();
    write_project(
        tmp.path(),
        "games.csv",
        "season,week,date,home,away,home_score,away_score,spread\n\
         2021,1,2021-09-12,Saints,Packers,38,3,3.5\n\
         2021,2,2021-09-19,Packers,Lions,35,17,-11\n",
    );

    let config = config::load_config_from(tmp.path()).unwrap();
    assert_eq!(config.data.format, ArchiveFormat::Auto);
    let games = archive::load_games(&config.data.games, config.data.format).unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].spread_result, Some(SpreadResult::Covered));
}

#[test]
fn missing_archive_is_an_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = archive::load_games(&tmp.path().join("nope.json"), ArchiveFormat::Auto).unwrap_err();
    assert!(matches!(err, ArchiveError::Io { .. }));
}

#[test]
fn unparseable_archive_is_a_json_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("games.json");
    fs::write(&path, "not json").unwrap();
    let err = archive::load_games(&path, ArchiveFormat::Auto).unwrap_err();
    assert!(matches!(err, ArchiveError::Json { .. }));
}

#[test]
fn empty_archive_still_produces_every_report() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("games.json");
    fs::write(&path, "[]").unwrap();
    let games = archive::load_games(&path, ArchiveFormat::Json).unwrap();
    assert!(games.is_empty());

    let config = config::Config::with_games(path);
    let value = commands::execute(&Commands::Report { name: "all".into() }, &config, &games).unwrap();
    assert!(value.as_object().unwrap().values().all(|v| v.is_object()));
}

// ===========================================================================
// Commands over a loaded archive
// ===========================================================================

#[test]
fn matchup_honors_configured_recent_games() {
    let tmp = tempfile::tempdir().unwrap();
    write_project(tmp.path(), "games.json", COMPACT_ARCHIVE);
    let config = config::load_config_from(tmp.path()).unwrap();
    let games = archive::load_games(&config.data.games, config.data.format).unwrap();

    let cmd = Commands::Matchup {
        team_a: "Packers".into(),
        team_b: "Saints".into(),
        recent: None,
    };
    let value = commands::execute(&cmd, &config, &games).unwrap();
    assert_eq!(value["games"], 1);
    assert_eq!(value["teamBWins"], 1);
    assert_eq!(value["recentGames"].as_array().unwrap().len(), 1);
}

#[test]
fn teams_lists_every_name_once() {
    let tmp = tempfile::tempdir().unwrap();
    write_project(tmp.path(), "games.json", COMPACT_ARCHIVE);
    let config = config::load_config_from(tmp.path()).unwrap();
    let games = archive::load_games(&config.data.games, config.data.format).unwrap();

    let value = commands::execute(&Commands::Teams, &config, &games).unwrap();
    let teams: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(teams, vec!["49ers", "Lions", "Packers", "Saints"]);
}
