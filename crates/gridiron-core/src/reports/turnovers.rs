// Turnover battle outcomes and team turnover margins.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{bottom_n_reversed, cmp_f64_desc, round_to, safe_div, top_n, RecordLine, Tally};
use crate::game::GameRecord;

const LEADERBOARD_SIZE: usize = 10;
const MIN_TEAM_GAMES: u32 = 5;
const DIFFERENTIAL_BUCKETS: [&str; 3] = ["+1", "+2", "+3+"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferentialLine {
    pub differential: String,
    pub record: RecordLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverMarginEntry {
    pub rank: usize,
    pub team: String,
    pub games: u32,
    pub avg_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoversReport {
    pub games_with_turnovers: u32,
    pub even_games: u32,
    /// Record of the side with fewer giveaways.
    pub battle_winner_record: RecordLine,
    pub by_differential: Vec<DifferentialLine>,
    pub margin_leaders: Vec<TurnoverMarginEntry>,
    pub margin_laggards: Vec<TurnoverMarginEntry>,
}

pub fn compute_turnovers(games: &[GameRecord]) -> TurnoversReport {
    let mut games_with_turnovers = 0u32;
    let mut even_games = 0u32;
    let mut battle = Tally::default();
    let mut buckets = [Tally::default(); 3];
    let mut margins: HashMap<&str, (u32, i64)> = HashMap::new();

    for game in games.iter().filter(|g| g.turnovers.is_some()) {
        games_with_turnovers += 1;

        for appearance in game.appearances() {
            let (Some(takeaways), Some(giveaways)) = (appearance.takeaways(), appearance.giveaways()) else {
                continue;
            };
            let entry = margins.entry(appearance.team()).or_default();
            entry.0 += 1;
            entry.1 += takeaways as i64 - giveaways as i64;
        }

        let winner = game
            .appearances()
            .into_iter()
            .find(|a| a.takeaways() > a.giveaways());
        let Some(winner) = winner else {
            even_games += 1;
            continue;
        };
        let differential =
            winner.takeaways().unwrap_or_default() - winner.giveaways().unwrap_or_default();
        battle.push(winner.outcome());
        let slot = (differential.min(3) - 1) as usize;
        buckets[slot].push(winner.outcome());
    }

    let mut rows: Vec<(&str, u32, f64)> = margins
        .into_iter()
        .filter(|(_, (games, _))| *games >= MIN_TEAM_GAMES)
        .map(|(team, (games, total))| (team, games, safe_div(total as f64, games as f64)))
        .collect();
    rows.sort_by(|a, b| cmp_f64_desc(a.2, b.2).then_with(|| a.0.cmp(b.0)));

    let entry = |i: usize, (team, games, avg): (&str, u32, f64)| TurnoverMarginEntry {
        rank: i + 1,
        team: team.to_string(),
        games,
        avg_margin: round_to(avg, 2),
    };

    TurnoversReport {
        games_with_turnovers,
        even_games,
        battle_winner_record: battle.line(),
        by_differential: DIFFERENTIAL_BUCKETS
            .iter()
            .zip(buckets.iter())
            .map(|(label, tally)| DifferentialLine {
                differential: label.to_string(),
                record: tally.line(),
            })
            .collect(),
        margin_laggards: bottom_n_reversed(&rows, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, row)| entry(i, row))
            .collect(),
        margin_leaders: top_n(rows, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, row)| entry(i, row))
            .collect(),
    }
}
