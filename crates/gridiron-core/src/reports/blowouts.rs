// Lopsided finals.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::top_n;
use crate::game::{GameRecord, Week};

const BIGGEST_MARGINS_SIZE: usize = 15;
const LEADERBOARD_SIZE: usize = 10;
const BLOWOUT_MARGIN: u64 = 21;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlowoutGame {
    pub rank: usize,
    pub season: i32,
    pub week: Week,
    pub winner: String,
    pub loser: String,
    pub margin: u64,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlowoutTeam {
    pub rank: usize,
    pub team: String,
    pub blowout_wins: u32,
    pub blowout_losses: u32,
    pub differential: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlowoutsReport {
    pub blowout_games: u32,
    pub biggest_margins: Vec<BlowoutGame>,
    pub best_differential: Vec<BlowoutTeam>,
}

pub fn compute_blowouts(games: &[GameRecord]) -> BlowoutsReport {
    let mut decided: Vec<&GameRecord> = games.iter().filter(|g| !g.is_tie()).collect();
    decided.sort_by(|a, b| {
        b.home_margin()
            .unsigned_abs()
            .cmp(&a.home_margin().unsigned_abs())
            .then_with(|| a.chronological_key().cmp(&b.chronological_key()))
    });

    let mut teams: HashMap<&str, (u32, u32)> = HashMap::new();
    let mut blowout_games = 0u32;
    for game in &decided {
        if game.home_margin().unsigned_abs() < BLOWOUT_MARGIN {
            continue;
        }
        blowout_games += 1;
        if let (Some(winner), Some(loser)) = (game.winner(), game.loser()) {
            teams.entry(winner).or_default().0 += 1;
            teams.entry(loser).or_default().1 += 1;
        }
    }

    let mut rows: Vec<(&str, u32, u32)> = teams
        .into_iter()
        .map(|(team, (wins, losses))| (team, wins, losses))
        .collect();
    rows.sort_by(|a, b| {
        let diff_a = a.1 as i64 - a.2 as i64;
        let diff_b = b.1 as i64 - b.2 as i64;
        diff_b.cmp(&diff_a).then_with(|| a.0.cmp(b.0))
    });

    BlowoutsReport {
        blowout_games,
        biggest_margins: top_n(decided, BIGGEST_MARGINS_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, game)| {
                let high = game.home_score.max(game.away_score);
                let low = game.home_score.min(game.away_score);
                BlowoutGame {
                    rank: i + 1,
                    season: game.season,
                    week: game.week,
                    winner: game.winner().unwrap_or_default().to_string(),
                    loser: game.loser().unwrap_or_default().to_string(),
                    margin: game.home_margin().unsigned_abs(),
                    score: format!("{high}-{low}"),
                }
            })
            .collect(),
        best_differential: top_n(rows, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, (team, wins, losses))| BlowoutTeam {
                rank: i + 1,
                team: team.to_string(),
                blowout_wins: wins,
                blowout_losses: losses,
                differential: wins as i64 - losses as i64,
            })
            .collect(),
    }
}
