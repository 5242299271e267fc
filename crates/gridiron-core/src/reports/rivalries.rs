// Head-to-head series between every pair of teams that has met.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_asc, cmp_f64_desc, round_to, safe_div, top_n};
use crate::game::GameRecord;

const LEADERBOARD_SIZE: usize = 10;
const MIN_MEETINGS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RivalryEntry {
    pub rank: usize,
    pub team_a: String,
    pub team_b: String,
    pub meetings: u32,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub ties: u32,
    pub avg_total_points: f64,
    /// `|winsA - winsB| / meetings`; 0 is a dead-even series.
    pub imbalance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RivalriesReport {
    pub pairs: usize,
    pub most_played: Vec<RivalryEntry>,
    pub closest_rivalries: Vec<RivalryEntry>,
    pub most_lopsided: Vec<RivalryEntry>,
}

/// Series totals keyed by the alphabetically ordered pair.
#[derive(Debug, Default, Clone, Copy)]
struct Series {
    meetings: u32,
    first_wins: u32,
    second_wins: u32,
    ties: u32,
    total_points: u32,
}

impl Series {
    fn imbalance(&self) -> f64 {
        safe_div(
            (self.first_wins as f64 - self.second_wins as f64).abs(),
            self.meetings as f64,
        )
    }
}

pub fn compute_rivalries(games: &[GameRecord]) -> RivalriesReport {
    let mut series: HashMap<(&str, &str), Series> = HashMap::new();

    for game in games {
        let home = game.home_team_name.as_str();
        let away = game.away_team_name.as_str();
        if home == away {
            continue;
        }
        let key = if home < away { (home, away) } else { (away, home) };
        let entry = series.entry(key).or_default();
        entry.meetings += 1;
        entry.total_points += game.total_points();
        match game.winner() {
            Some(winner) if winner == key.0 => entry.first_wins += 1,
            Some(_) => entry.second_wins += 1,
            None => entry.ties += 1,
        }
    }

    let rows: Vec<((&str, &str), Series)> = series.into_iter().collect();

    let mut most_played = rows.clone();
    most_played.sort_by(|a, b| b.1.meetings.cmp(&a.1.meetings).then_with(|| a.0.cmp(&b.0)));

    let mut closest: Vec<_> = rows
        .iter()
        .filter(|(_, s)| s.meetings >= MIN_MEETINGS)
        .copied()
        .collect();
    closest.sort_by(|a, b| {
        cmp_f64_asc(a.1.imbalance(), b.1.imbalance())
            .then_with(|| b.1.meetings.cmp(&a.1.meetings))
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut lopsided: Vec<_> = rows
        .iter()
        .filter(|(_, s)| s.meetings >= MIN_MEETINGS)
        .copied()
        .collect();
    lopsided.sort_by(|a, b| {
        cmp_f64_desc(a.1.imbalance(), b.1.imbalance())
            .then_with(|| b.1.meetings.cmp(&a.1.meetings))
            .then_with(|| a.0.cmp(&b.0))
    });

    RivalriesReport {
        pairs: rows.len(),
        most_played: entries(most_played),
        closest_rivalries: entries(closest),
        most_lopsided: entries(lopsided),
    }
}

fn entries(rows: Vec<((&str, &str), Series)>) -> Vec<RivalryEntry> {
    top_n(rows, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, ((a, b), s))| RivalryEntry {
            rank: i + 1,
            team_a: a.to_string(),
            team_b: b.to_string(),
            meetings: s.meetings,
            team_a_wins: s.first_wins,
            team_b_wins: s.second_wins,
            ties: s.ties,
            avg_total_points: round_to(safe_div(s.total_points as f64, s.meetings as f64), 1),
            imbalance: round_to(s.imbalance(), 3),
        })
        .collect()
}
