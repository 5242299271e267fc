// Late-season collapses by teams already out of contention.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_desc, round_to, safe_div, top_n, Tally};
use crate::game::{GameRecord, TeamSeason};

const LEADERBOARD_SIZE: usize = 10;
const EARLY_SEASON_LAST_WEEK: u8 = 12;
const OUT_OF_CONTENTION_PCT: f64 = 0.400;
const MIN_LATE_GAMES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankingEntry {
    pub rank: usize,
    pub team: String,
    pub season: i32,
    pub early_win_pct: f64,
    pub late_win_pct: f64,
    pub tanking_index: f64,
    pub margin_drop: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankingReport {
    pub candidates: u32,
    pub avg_tanking_index: f64,
    pub biggest_collapses: Vec<TankingEntry>,
}

#[derive(Debug, Default)]
struct Half {
    record: Tally,
    margin: i64,
}

impl Half {
    fn avg_margin(&self) -> f64 {
        safe_div(self.margin as f64, self.record.games() as f64)
    }
}

pub fn compute_tanking(games: &[GameRecord]) -> TankingReport {
    let mut seasons: HashMap<TeamSeason, (Half, Half)> = HashMap::new();
    for game in games {
        let Some(week) = game.week.regular_number() else {
            continue;
        };
        if game.is_playoff_game() {
            continue;
        }
        for appearance in game.appearances() {
            let halves = seasons
                .entry(TeamSeason::new(appearance.team(), game.season))
                .or_default();
            let half = if week <= EARLY_SEASON_LAST_WEEK {
                &mut halves.0
            } else {
                &mut halves.1
            };
            half.record.push(appearance.outcome());
            half.margin += appearance.margin();
        }
    }

    let mut rows: Vec<(TeamSeason, f64, f64, f64)> = seasons
        .into_iter()
        .filter(|(_, (early, late))| {
            early.record.games() > 0
                && early.record.win_pct() <= OUT_OF_CONTENTION_PCT
                && late.record.games() >= MIN_LATE_GAMES
        })
        .map(|(key, (early, late))| {
            let early_pct = early.record.win_pct();
            let late_pct = late.record.win_pct();
            (key, early_pct, late_pct, early.avg_margin() - late.avg_margin())
        })
        .collect();

    let index = |row: &(TeamSeason, f64, f64, f64)| row.1 - row.2;
    rows.sort_by(|a, b| {
        cmp_f64_desc(index(a), index(b))
            .then_with(|| cmp_f64_desc(a.3, b.3))
            .then_with(|| a.0.cmp(&b.0))
    });

    let candidates = rows.len() as u32;
    let avg_index = safe_div(rows.iter().map(index).sum(), candidates as f64);

    TankingReport {
        candidates,
        avg_tanking_index: round_to(avg_index, 3),
        biggest_collapses: top_n(rows, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, (key, early, late, drop))| TankingEntry {
                rank: i + 1,
                team: key.team,
                season: key.season,
                early_win_pct: round_to(early, 3),
                late_win_pct: round_to(late, 3),
                tanking_index: round_to(early - late, 3),
                margin_drop: round_to(drop, 1),
            })
            .collect(),
    }
}
