// Outright underdog wins.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::bucket::{bucket_index, spread_bucket, SPREAD_BUCKETS};
use crate::format::{cmp_f64_desc, pct1, top_n};
use crate::game::{GameRecord, Outcome, TeamGame, Week};
use crate::streak::extract_streaks;

const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsetRate {
    pub label: String,
    pub games: u32,
    pub upsets: u32,
    pub upset_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsetEntry {
    pub rank: usize,
    pub season: i32,
    pub week: Week,
    pub underdog: String,
    pub favorite: String,
    pub line: f64,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsetTeamEntry {
    pub rank: usize,
    pub team: String,
    pub upset_wins: u32,
    pub longest_streak: u32,
    /// Total upset wins rather than a trailing run.
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsetsReport {
    pub games_with_line: u32,
    pub total_upsets: u32,
    pub upset_rate: String,
    pub by_spread: Vec<UpsetRate>,
    pub by_season: Vec<UpsetRate>,
    pub biggest_upsets: Vec<UpsetEntry>,
    pub most_upset_wins: Vec<UpsetTeamEntry>,
    pub upset_streaks: Vec<UpsetTeamEntry>,
}

pub fn compute_upsets(games: &[GameRecord]) -> UpsetsReport {
    let mut ordered: Vec<&GameRecord> = games.iter().collect();
    ordered.sort_by_key(|g| g.chronological_key());

    let mut games_with_line = 0u32;
    let mut spread_rows = [(0u32, 0u32); 4];
    let mut season_rows: BTreeMap<i32, (u32, u32)> = BTreeMap::new();
    let mut upsets: Vec<TeamGame<'_>> = Vec::new();
    let mut underdog_runs: HashMap<&str, Vec<bool>> = HashMap::new();

    for game in &ordered {
        let Some(spread) = game.spread.filter(|s| *s != 0.0) else {
            continue;
        };
        games_with_line += 1;
        let Some(underdog) = game.appearances().into_iter().find(TeamGame::is_underdog) else {
            continue;
        };
        let upset = underdog.outcome() == Outcome::Win;

        if let Some(slot) = bucket_index(&SPREAD_BUCKETS, spread_bucket(spread)) {
            spread_rows[slot].0 += 1;
            spread_rows[slot].1 += upset as u32;
        }
        let season = season_rows.entry(game.season).or_default();
        season.0 += 1;
        season.1 += upset as u32;

        underdog_runs.entry(underdog.team()).or_default().push(upset);
        if upset {
            upsets.push(underdog);
        }
    }

    let total_upsets = upsets.len() as u32;

    let mut biggest = upsets.clone();
    biggest.sort_by(|a, b| {
        cmp_f64_desc(
            a.team_spread().unwrap_or_default(),
            b.team_spread().unwrap_or_default(),
        )
        .then_with(|| a.game.chronological_key().cmp(&b.game.chronological_key()))
    });

    let mut per_team: Vec<(&str, u32, u32)> = underdog_runs
        .iter()
        .map(|(team, runs)| {
            let wins = runs.iter().filter(|won| **won).count() as u32;
            (*team, wins, extract_streaks(runs.iter().copied()).longest)
        })
        .filter(|(_, wins, _)| *wins > 0)
        .collect();

    per_team.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let most_upset_wins = team_entries(per_team.clone());
    per_team.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| b.1.cmp(&a.1)).then_with(|| a.0.cmp(b.0)));
    let upset_streaks = team_entries(per_team);

    UpsetsReport {
        games_with_line,
        total_upsets,
        upset_rate: pct1(total_upsets, games_with_line),
        by_spread: SPREAD_BUCKETS
            .iter()
            .zip(spread_rows.iter())
            .map(|(label, (games, upsets))| rate(label.to_string(), *games, *upsets))
            .collect(),
        by_season: season_rows
            .into_iter()
            .map(|(season, (games, upsets))| rate(season.to_string(), games, upsets))
            .collect(),
        biggest_upsets: top_n(biggest, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, underdog)| UpsetEntry {
                rank: i + 1,
                season: underdog.game.season,
                week: underdog.game.week,
                underdog: underdog.team().to_string(),
                favorite: underdog.opponent().to_string(),
                line: underdog.team_spread().unwrap_or_default(),
                score: format!("{}-{}", underdog.points_for(), underdog.points_against()),
            })
            .collect(),
        most_upset_wins,
        upset_streaks,
    }
}

fn rate(label: String, games: u32, upsets: u32) -> UpsetRate {
    UpsetRate {
        label,
        games,
        upsets,
        upset_rate: pct1(upsets, games),
    }
}

fn team_entries(rows: Vec<(&str, u32, u32)>) -> Vec<UpsetTeamEntry> {
    top_n(rows, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, (team, wins, longest))| UpsetTeamEntry {
            rank: i + 1,
            team: team.to_string(),
            upset_wins: wins,
            longest_streak: longest,
            current_streak: wins,
        })
        .collect()
}
