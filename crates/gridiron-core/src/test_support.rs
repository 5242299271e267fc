// Game builders shared by unit tests.

use chrono::NaiveDate;

use crate::game::{GameRecord, PlayoffRound, Week};

/// Regular-season game.
pub fn game(season: i32, week: u8, home: &str, away: &str, home_score: u32, away_score: u32) -> GameRecord {
    GameRecord::new(season, Week::Regular(week), home, away, home_score, away_score)
}

/// Playoff game.
pub fn playoff(
    season: i32,
    round: PlayoffRound,
    home: &str,
    away: &str,
    home_score: u32,
    away_score: u32,
) -> GameRecord {
    GameRecord::new(season, Week::Playoff(round), home, away, home_score, away_score)
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// `n` regular-season games in consecutive weeks, dated a week apart from
/// the season's first Sunday in September.
pub fn weekly_series(
    season: i32,
    team: &str,
    opponent: &str,
    scores: &[(u32, u32)],
) -> Vec<GameRecord> {
    let start = ymd(season, 9, 7);
    scores
        .iter()
        .enumerate()
        .map(|(i, &(team_score, opp_score))| {
            game(season, (i + 1) as u8, team, opponent, team_score, opp_score)
                .with_date(start + chrono::Duration::days(7 * i as i64))
        })
        .collect()
}
