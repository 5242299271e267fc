// Roster continuity against regular-season wins.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_desc, round_to, safe_div, top_n};
use crate::game::{GameRecord, Outcome, TeamSeason};

const LEADERBOARD_SIZE: usize = 10;
const HIGH_CONTINUITY: f64 = 75.0;
const LOW_CONTINUITY: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuityBucket {
    pub bucket: String,
    pub team_seasons: u32,
    pub avg_wins: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuityEntry {
    pub rank: usize,
    pub team: String,
    pub season: i32,
    pub continuity: f64,
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterContinuityReport {
    pub team_seasons: u32,
    pub correlation: f64,
    pub high_continuity: ContinuityBucket,
    pub low_continuity: ContinuityBucket,
    pub most_continuous: Vec<ContinuityEntry>,
}

/// Pearson correlation coefficient. 0 when either side has no variance.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        covariance += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    safe_div(covariance, (var_x * var_y).sqrt())
}

#[derive(Debug, Default)]
struct SeasonTotals {
    continuity_sum: f64,
    continuity_games: u32,
    wins: u32,
}

pub fn compute_roster_continuity(games: &[GameRecord]) -> RosterContinuityReport {
    let mut seasons: HashMap<TeamSeason, SeasonTotals> = HashMap::new();
    for game in games.iter().filter(|g| !g.is_playoff_game()) {
        for appearance in game.appearances() {
            let totals = seasons
                .entry(TeamSeason::new(appearance.team(), game.season))
                .or_default();
            if appearance.outcome() == Outcome::Win {
                totals.wins += 1;
            }
            if let Some(value) = appearance.continuity() {
                totals.continuity_sum += value;
                totals.continuity_games += 1;
            }
        }
    }

    let mut rows: Vec<(TeamSeason, f64, u32)> = seasons
        .into_iter()
        .filter(|(_, t)| t.continuity_games > 0)
        .map(|(key, t)| {
            let mean = t.continuity_sum / t.continuity_games as f64;
            (key, mean, t.wins)
        })
        .collect();

    let pairs: Vec<(f64, f64)> = rows.iter().map(|(_, c, w)| (*c, *w as f64)).collect();
    let high = bucket("high", rows.iter().filter(|r| r.1 >= HIGH_CONTINUITY));
    let low = bucket("low", rows.iter().filter(|r| r.1 < LOW_CONTINUITY));

    rows.sort_by(|a, b| cmp_f64_desc(a.1, b.1).then_with(|| a.0.cmp(&b.0)));

    RosterContinuityReport {
        team_seasons: rows.len() as u32,
        correlation: round_to(pearson(&pairs), 3),
        high_continuity: high,
        low_continuity: low,
        most_continuous: top_n(rows, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, (key, continuity, wins))| ContinuityEntry {
                rank: i + 1,
                team: key.team,
                season: key.season,
                continuity: round_to(continuity, 1),
                wins,
            })
            .collect(),
    }
}

fn bucket<'r, I>(label: &str, rows: I) -> ContinuityBucket
where
    I: Iterator<Item = &'r (TeamSeason, f64, u32)>,
{
    let (count, wins) = rows.fold((0u32, 0u32), |(n, w), row| (n + 1, w + row.2));
    ContinuityBucket {
        bucket: label.to_string(),
        team_seasons: count,
        avg_wins: round_to(safe_div(wins as f64, count as f64), 2),
    }
}
