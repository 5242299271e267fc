// How close posted lines came to the final score.
//
// The expected home margin implied by a spread is its negation: a home side
// laying 7 (-7) is expected to win by 7.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::bucket::{bucket_index, spread_bucket, SPREAD_BUCKETS};
use crate::format::{pct1, round_to, safe_div};
use crate::game::{GameRecord, SpreadResult};

const TOTAL_ACCURACY_WINDOW: f64 = 7.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSplit {
    pub label: String,
    pub games: u32,
    pub avg_spread_error: f64,
    pub favorite_cover_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAccuracyReport {
    pub total_games: u32,
    pub games_with_spread: u32,
    pub games_with_total: u32,
    pub avg_spread_error: f64,
    pub avg_total_error: f64,
    /// Share of totals that landed within seven points of the final.
    pub over_under_accuracy: String,
    pub favorite_cover_pct: String,
    pub by_spread: Vec<LineSplit>,
    pub by_season: Vec<LineSplit>,
}

#[derive(Debug, Default, Clone, Copy)]
struct SpreadTally {
    games: u32,
    error: f64,
    favorite_covers: u32,
    favorite_decided: u32,
}

impl SpreadTally {
    fn push(&mut self, game: &GameRecord, spread: f64) {
        self.games += 1;
        self.error += (game.home_margin() as f64 + spread).abs();
        if spread == 0.0 {
            return;
        }
        let favorite_grade = game
            .spread_result
            .map(|r| if spread < 0.0 { r } else { r.invert() });
        match favorite_grade {
            Some(SpreadResult::Covered) => {
                self.favorite_covers += 1;
                self.favorite_decided += 1;
            }
            Some(SpreadResult::Lost) => self.favorite_decided += 1,
            _ => {}
        }
    }

    fn avg_error(&self) -> f64 {
        round_to(safe_div(self.error, self.games as f64), 2)
    }

    fn split(&self, label: String) -> LineSplit {
        LineSplit {
            label,
            games: self.games,
            avg_spread_error: self.avg_error(),
            favorite_cover_pct: pct1(self.favorite_covers, self.favorite_decided),
        }
    }
}

pub fn compute_line_accuracy(games: &[GameRecord]) -> LineAccuracyReport {
    let mut overall = SpreadTally::default();
    let mut buckets = [SpreadTally::default(); 4];
    let mut seasons: BTreeMap<i32, SpreadTally> = BTreeMap::new();
    let mut games_with_total = 0u32;
    let mut total_error = 0.0;
    let mut totals_within_window = 0u32;

    for game in games {
        if let Some(spread) = game.spread {
            overall.push(game, spread);
            if let Some(slot) = bucket_index(&SPREAD_BUCKETS, spread_bucket(spread)) {
                buckets[slot].push(game, spread);
            }
            seasons.entry(game.season).or_default().push(game, spread);
        }
        if let Some(line) = game.over_under {
            games_with_total += 1;
            let miss = (game.total_points() as f64 - line).abs();
            total_error += miss;
            if miss <= TOTAL_ACCURACY_WINDOW {
                totals_within_window += 1;
            }
        }
    }

    LineAccuracyReport {
        total_games: games.len() as u32,
        games_with_spread: overall.games,
        games_with_total,
        avg_spread_error: overall.avg_error(),
        avg_total_error: round_to(safe_div(total_error, games_with_total as f64), 2),
        over_under_accuracy: pct1(totals_within_window, games_with_total),
        favorite_cover_pct: pct1(overall.favorite_covers, overall.favorite_decided),
        by_spread: SPREAD_BUCKETS
            .iter()
            .zip(buckets.iter())
            .map(|(label, tally)| tally.split(label.to_string()))
            .collect(),
        by_season: seasons
            .into_iter()
            .map(|(season, tally)| tally.split(season.to_string()))
            .collect(),
    }
}
