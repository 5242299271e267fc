// League parity per season.
//
// Each team's regular-season win percentage is turned into a share of the
// season's total; Shannon entropy over those shares, normalised by log2(n),
// gives a parity index where 1.0 means every team finished level.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::format::{bottom_n_reversed, cmp_f64_desc, mean_and_std_dev, round_to, safe_div, top_n, Tally};
use crate::game::GameRecord;

const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonParity {
    pub season: i32,
    pub teams: usize,
    pub entropy: f64,
    pub parity_index: f64,
    pub gini: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityReport {
    pub seasons: Vec<SeasonParity>,
    pub most_balanced: Vec<SeasonParity>,
    pub least_balanced: Vec<SeasonParity>,
    pub average_parity: f64,
    pub average_gini: f64,
}

/// Shannon entropy (bits) of the win-percentage shares.
pub fn entropy(win_pcts: &[f64]) -> f64 {
    let total: f64 = win_pcts.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    win_pcts
        .iter()
        .map(|pct| pct / total)
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}

/// Entropy normalised by its maximum `log2(n)`. Fewer than two teams is 0.
pub fn parity_index(win_pcts: &[f64]) -> f64 {
    if win_pcts.len() < 2 {
        return 0.0;
    }
    safe_div(entropy(win_pcts), (win_pcts.len() as f64).log2())
}

/// Gini coefficient of the win percentages (0 = perfectly equal).
pub fn gini(win_pcts: &[f64]) -> f64 {
    let mut sorted = win_pcts.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len() as f64;
    let total: f64 = sorted.iter().sum();
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (2.0 * (i as f64 + 1.0) - n - 1.0) * x)
        .sum();
    safe_div(weighted, n * total)
}

pub fn compute_parity(games: &[GameRecord]) -> ParityReport {
    let mut records: BTreeMap<i32, HashMap<&str, Tally>> = BTreeMap::new();
    for game in games.iter().filter(|g| !g.is_playoff_game()) {
        let season = records.entry(game.season).or_default();
        for appearance in game.appearances() {
            season
                .entry(appearance.team())
                .or_default()
                .push(appearance.outcome());
        }
    }

    let seasons: Vec<SeasonParity> = records
        .into_iter()
        .map(|(season, teams)| {
            let pcts: Vec<f64> = teams.values().map(Tally::win_pct).collect();
            let (_, std_dev) = mean_and_std_dev(&pcts);
            SeasonParity {
                season,
                teams: pcts.len(),
                entropy: round_to(entropy(&pcts), 4),
                parity_index: round_to(parity_index(&pcts), 4),
                gini: round_to(gini(&pcts), 4),
                std_dev: round_to(std_dev, 4),
            }
        })
        .collect();

    let mut by_parity = seasons.clone();
    by_parity.sort_by(|a, b| cmp_f64_desc(a.parity_index, b.parity_index).then_with(|| a.season.cmp(&b.season)));

    let n = seasons.len() as f64;
    let average_parity = safe_div(seasons.iter().map(|s| s.parity_index).sum(), n);
    let average_gini = safe_div(seasons.iter().map(|s| s.gini).sum(), n);

    ParityReport {
        least_balanced: bottom_n_reversed(&by_parity, LEADERBOARD_SIZE),
        most_balanced: top_n(by_parity, LEADERBOARD_SIZE),
        seasons,
        average_parity: round_to(average_parity, 4),
        average_gini: round_to(average_gini, 4),
    }
}
