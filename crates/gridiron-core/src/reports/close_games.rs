// One-score games: who wins them, and how many went to overtime.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_asc, cmp_f64_desc, pct1, round_to, top_n, Tally};
use crate::game::GameRecord;

const LEADERBOARD_SIZE: usize = 10;
const ONE_SCORE_MARGIN: u64 = 8;
const MIN_CLOSE_GAMES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseGameTeam {
    pub rank: usize,
    pub team: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseGamesReport {
    pub total_games: u32,
    pub close_games: u32,
    pub close_game_pct: String,
    pub overtime_games: u32,
    pub best_records: Vec<CloseGameTeam>,
    pub worst_records: Vec<CloseGameTeam>,
}

/// Final score exceeds the regulation quarter totals.
pub fn went_to_overtime(game: &GameRecord) -> bool {
    game.quarters
        .is_some_and(|q| game.total_points() > q.regulation_total())
}

pub fn compute_close_games(games: &[GameRecord]) -> CloseGamesReport {
    let mut close_games = 0u32;
    let mut overtime_games = 0u32;
    let mut teams: HashMap<&str, Tally> = HashMap::new();

    for game in games {
        if game.home_margin().unsigned_abs() > ONE_SCORE_MARGIN {
            continue;
        }
        close_games += 1;
        if went_to_overtime(game) {
            overtime_games += 1;
        }
        for appearance in game.appearances() {
            teams
                .entry(appearance.team())
                .or_default()
                .push(appearance.outcome());
        }
    }

    let qualified: Vec<(&str, Tally)> = teams
        .into_iter()
        .filter(|(_, tally)| tally.games() >= MIN_CLOSE_GAMES)
        .collect();

    let mut best = qualified.clone();
    best.sort_by(|a, b| {
        cmp_f64_desc(a.1.win_pct(), b.1.win_pct())
            .then_with(|| b.1.games().cmp(&a.1.games()))
            .then_with(|| a.0.cmp(b.0))
    });
    let mut worst = qualified;
    worst.sort_by(|a, b| {
        cmp_f64_asc(a.1.win_pct(), b.1.win_pct())
            .then_with(|| b.1.games().cmp(&a.1.games()))
            .then_with(|| a.0.cmp(b.0))
    });

    CloseGamesReport {
        total_games: games.len() as u32,
        close_games,
        close_game_pct: pct1(close_games, games.len() as u32),
        overtime_games,
        best_records: team_lines(best),
        worst_records: team_lines(worst),
    }
}

fn team_lines(rows: Vec<(&str, Tally)>) -> Vec<CloseGameTeam> {
    top_n(rows, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, (team, tally))| CloseGameTeam {
            rank: i + 1,
            team: team.to_string(),
            games: tally.games(),
            wins: tally.wins,
            losses: tally.losses,
            ties: tally.ties,
            win_pct: round_to(tally.win_pct(), 3),
        })
        .collect()
}
