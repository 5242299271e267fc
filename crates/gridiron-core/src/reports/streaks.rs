// All-time streak extraction.
//
// For every team, walk its games in chronological order once per category
// (win, loss, home win, away win, ATS cover, over) and keep two figures: the
// run still open at the end of the history, and the longest run ever.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::top_n;
use crate::game::{GameRecord, OuResult, Outcome, SpreadResult, TeamGame};
use crate::streak::{extract_streaks, StreakSummary};

const LEADERBOARD_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakEntry {
    pub rank: usize,
    pub team: String,
    pub length: u32,
    /// The longest run is still going.
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreaksReport {
    pub teams: usize,
    pub longest_win_streaks: Vec<StreakEntry>,
    pub longest_loss_streaks: Vec<StreakEntry>,
    pub longest_home_win_streaks: Vec<StreakEntry>,
    pub longest_away_win_streaks: Vec<StreakEntry>,
    pub longest_ats_cover_streaks: Vec<StreakEntry>,
    pub longest_over_streaks: Vec<StreakEntry>,
    pub active_win_streaks: Vec<StreakEntry>,
    pub active_loss_streaks: Vec<StreakEntry>,
}

#[derive(Debug, Default)]
struct TeamStreaks {
    win: StreakSummary,
    loss: StreakSummary,
    home_win: StreakSummary,
    away_win: StreakSummary,
    ats_cover: StreakSummary,
    over: StreakSummary,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

pub fn compute_streaks(games: &[GameRecord]) -> StreaksReport {
    let mut ordered: Vec<&GameRecord> = games.iter().collect();
    ordered.sort_by_key(|g| g.chronological_key());

    let mut histories: HashMap<&str, Vec<TeamGame<'_>>> = HashMap::new();
    for game in &ordered {
        for appearance in game.appearances() {
            histories.entry(appearance.team()).or_default().push(appearance);
        }
    }

    let per_team: Vec<(&str, TeamStreaks)> = histories
        .iter()
        .map(|(team, history)| (*team, team_streaks(history)))
        .collect();

    StreaksReport {
        teams: per_team.len(),
        longest_win_streaks: leaderboard(&per_team, |s| s.win, false),
        longest_loss_streaks: leaderboard(&per_team, |s| s.loss, false),
        longest_home_win_streaks: leaderboard(&per_team, |s| s.home_win, false),
        longest_away_win_streaks: leaderboard(&per_team, |s| s.away_win, false),
        longest_ats_cover_streaks: leaderboard(&per_team, |s| s.ats_cover, false),
        longest_over_streaks: leaderboard(&per_team, |s| s.over, false),
        active_win_streaks: leaderboard(&per_team, |s| s.win, true),
        active_loss_streaks: leaderboard(&per_team, |s| s.loss, true),
    }
}

fn team_streaks(history: &[TeamGame<'_>]) -> TeamStreaks {
    TeamStreaks {
        win: extract_streaks(history.iter().map(|e| e.outcome() == Outcome::Win)),
        loss: extract_streaks(history.iter().map(|e| e.outcome() == Outcome::Loss)),
        home_win: extract_streaks(
            history
                .iter()
                .filter(|e| e.is_home)
                .map(|e| e.outcome() == Outcome::Win),
        ),
        away_win: extract_streaks(
            history
                .iter()
                .filter(|e| !e.is_home)
                .map(|e| e.outcome() == Outcome::Win),
        ),
        ats_cover: extract_streaks(
            history
                .iter()
                .filter_map(|e| e.spread_result())
                .map(|r| r == SpreadResult::Covered),
        ),
        over: extract_streaks(
            history
                .iter()
                .filter_map(|e| e.ou_result())
                .map(|r| r == OuResult::Over),
        ),
    }
}

/// Rank teams by the longest (or currently open) run of one category.
fn leaderboard<F>(per_team: &[(&str, TeamStreaks)], pick: F, current_only: bool) -> Vec<StreakEntry>
where
    F: Fn(&TeamStreaks) -> StreakSummary,
{
    let mut rows: Vec<(&str, u32, bool)> = per_team
        .iter()
        .map(|(team, streaks)| {
            let summary = pick(streaks);
            let length = if current_only { summary.current } else { summary.longest };
            let active = summary.current > 0 && summary.current == summary.longest;
            (*team, length, active)
        })
        .filter(|(_, length, _)| *length > 0)
        .collect();

    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    top_n(rows, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, (team, length, active))| StreakEntry {
            rank: i + 1,
            team: team.to_string(),
            length,
            active: current_only || active,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
