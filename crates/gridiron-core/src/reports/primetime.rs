// Primetime slots against the Sunday-afternoon baseline.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_asc, cmp_f64_desc, fixed, pct1, round_to, safe_div, top_n, Tally};
use crate::game::{GameRecord, OuResult, PrimetimeSlot};

const LEADERBOARD_SIZE: usize = 10;
const MIN_PRIMETIME_GAMES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotLine {
    pub slot: String,
    pub games: u32,
    pub home_win_pct: String,
    pub avg_total_points: String,
    pub over_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimetimeTeam {
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
pub struct PrimetimeReport {
    pub slots: Vec<SlotLine>,
    pub best_primetime_teams: Vec<PrimetimeTeam>,
    pub worst_primetime_teams: Vec<PrimetimeTeam>,
}

#[derive(Debug, Default, Clone, Copy)]
struct SlotTally {
    games: u32,
    home_wins: u32,
    points: u64,
    overs: u32,
    graded_totals: u32,
}

impl SlotTally {
    fn push(&mut self, game: &GameRecord) {
        self.games += 1;
        self.points += game.total_points() as u64;
        if game.home_score > game.away_score {
            self.home_wins += 1;
        }
        if let Some(result) = game.ou_result {
            self.graded_totals += 1;
            if result == OuResult::Over {
                self.overs += 1;
            }
        }
    }

    fn line(&self, slot: &str) -> SlotLine {
        SlotLine {
            slot: slot.to_string(),
            games: self.games,
            home_win_pct: pct1(self.home_wins, self.games),
            avg_total_points: fixed(safe_div(self.points as f64, self.games as f64), 1),
            over_pct: pct1(self.overs, self.graded_totals),
        }
    }
}

fn slot_index(slot: PrimetimeSlot) -> usize {
    PrimetimeSlot::ALL.iter().position(|s| *s == slot).unwrap_or(0)
}

pub fn compute_primetime(games: &[GameRecord]) -> PrimetimeReport {
    let mut slots = [SlotTally::default(); 4];
    let mut regular = SlotTally::default();
    let mut teams: HashMap<&str, Tally> = HashMap::new();

    for game in games {
        let Some(slot) = game.primetime else {
            regular.push(game);
            continue;
        };
        slots[slot_index(slot)].push(game);
        for appearance in game.appearances() {
            teams
                .entry(appearance.team())
                .or_default()
                .push(appearance.outcome());
        }
    }

    let mut lines: Vec<SlotLine> = PrimetimeSlot::ALL
        .iter()
        .zip(slots.iter())
        .map(|(slot, tally)| tally.line(slot.token()))
        .collect();
    lines.push(regular.line("Non-primetime"));

    let qualified: Vec<(&str, Tally)> = teams
        .into_iter()
        .filter(|(_, tally)| tally.games() >= MIN_PRIMETIME_GAMES)
        .collect();
    let mut best = qualified.clone();
    best.sort_by(|a, b| cmp_f64_desc(a.1.win_pct(), b.1.win_pct()).then_with(|| a.0.cmp(b.0)));
    let mut worst = qualified;
    worst.sort_by(|a, b| cmp_f64_asc(a.1.win_pct(), b.1.win_pct()).then_with(|| a.0.cmp(b.0)));

    PrimetimeReport {
        slots: lines,
        best_primetime_teams: team_lines(best),
        worst_primetime_teams: team_lines(worst),
    }
}

fn team_lines(rows: Vec<(&str, Tally)>) -> Vec<PrimetimeTeam> {
    top_n(rows, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, (team, tally))| PrimetimeTeam {
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
