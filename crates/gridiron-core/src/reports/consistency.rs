// Scoring consistency: a team that scores the same every week rates 1.0.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_asc, cmp_f64_desc, mean_and_std_dev, round_to, top_n};
use crate::game::GameRecord;

const LEADERBOARD_SIZE: usize = 10;
const MIN_GAMES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyEntry {
    pub rank: usize,
    pub team: String,
    pub games: usize,
    pub avg_points: f64,
    pub std_dev: f64,
    pub consistency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub teams: u32,
    pub most_consistent: Vec<ConsistencyEntry>,
    pub least_consistent: Vec<ConsistencyEntry>,
}

/// `1 / (1 + σ)` over points scored.
pub fn consistency_score(points: &[f64]) -> f64 {
    let (_, std_dev) = mean_and_std_dev(points);
    1.0 / (1.0 + std_dev)
}

pub fn compute_consistency(games: &[GameRecord]) -> ConsistencyReport {
    let mut scoring: HashMap<&str, Vec<f64>> = HashMap::new();
    for game in games {
        for appearance in game.appearances() {
            scoring
                .entry(appearance.team())
                .or_default()
                .push(appearance.points_for() as f64);
        }
    }

    let rows: Vec<ConsistencyEntry> = scoring
        .into_iter()
        .filter(|(_, points)| points.len() >= MIN_GAMES)
        .map(|(team, points)| {
            let (mean, std_dev) = mean_and_std_dev(&points);
            ConsistencyEntry {
                rank: 0,
                team: team.to_string(),
                games: points.len(),
                avg_points: round_to(mean, 1),
                std_dev: round_to(std_dev, 2),
                consistency: round_to(consistency_score(&points), 4),
            }
        })
        .collect();

    let mut most = rows.clone();
    most.sort_by(|a, b| cmp_f64_desc(a.consistency, b.consistency).then_with(|| a.team.cmp(&b.team)));
    let mut least = rows;
    least.sort_by(|a, b| cmp_f64_asc(a.consistency, b.consistency).then_with(|| a.team.cmp(&b.team)));

    ConsistencyReport {
        teams: most.len() as u32,
        most_consistent: ranked_top(most),
        least_consistent: ranked_top(least),
    }
}

fn ranked_top(rows: Vec<ConsistencyEntry>) -> Vec<ConsistencyEntry> {
    top_n(rows, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, entry)| ConsistencyEntry { rank: i + 1, ..entry })
        .collect()
}
