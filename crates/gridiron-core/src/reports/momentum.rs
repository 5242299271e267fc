// Streak-conditioned ATS performance.
//
// Before each game, look at the W/L run the team carried into it (within the
// same season) and file the game's spread grade under that run's bucket.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_desc, pct1, top_n, AtsLine, AtsTally};
use crate::game::{GameRecord, Outcome, TeamGame, TeamSeason};

const LEADERBOARD_SIZE: usize = 10;
/// Runs of this length or longer qualify for the streak leaderboards.
const LEADERBOARD_STREAK_LENGTH: u32 = 3;
const MIN_LEADERBOARD_GAMES: u32 = 5;

/// Bucket labels in display order.
pub const MOMENTUM_BUCKETS: [&str; 6] = ["W1", "W2", "W3+", "L1", "L2", "L3+"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumBucket {
    pub streak: String,
    #[serde(flatten)]
    pub ats: AtsLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumLeader {
    pub rank: usize,
    pub team: String,
    pub games: u32,
    pub covers: u32,
    pub cover_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumReport {
    /// Graded team-games that landed in one of the streak buckets.
    pub bucketed_games: u32,
    pub buckets: Vec<MomentumBucket>,
    pub best_win_streak_ats: Vec<MomentumLeader>,
    pub best_loss_streak_ats: Vec<MomentumLeader>,
}

/// The run a team carries into a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveRun {
    kind: Outcome,
    length: u32,
}

impl ActiveRun {
    fn bucket(&self) -> Option<usize> {
        let offset = match self.kind {
            Outcome::Win => 0,
            Outcome::Loss => 3,
            Outcome::Tie => return None,
        };
        let step = match self.length {
            0 => return None,
            1 => 0,
            2 => 1,
            _ => 2,
        };
        Some(offset + step)
    }
}

pub fn compute_momentum(games: &[GameRecord]) -> MomentumReport {
    let mut ordered: Vec<&GameRecord> = games.iter().collect();
    ordered.sort_by_key(|g| g.chronological_key());

    let mut seasons: HashMap<TeamSeason, Vec<TeamGame<'_>>> = HashMap::new();
    for game in &ordered {
        for appearance in game.appearances() {
            seasons
                .entry(TeamSeason::new(appearance.team(), game.season))
                .or_default()
                .push(appearance);
        }
    }

    let mut buckets = [AtsTally::default(); 6];
    let mut win_runs: HashMap<&str, AtsTally> = HashMap::new();
    let mut loss_runs: HashMap<&str, AtsTally> = HashMap::new();
    let mut bucketed_games = 0u32;

    for history in seasons.values() {
        let mut run: Option<ActiveRun> = None;
        for entry in history {
            if let (Some(active), Some(result)) = (run, entry.spread_result()) {
                if let Some(slot) = active.bucket() {
                    bucketed_games += 1;
                    buckets[slot].push(result);
                }
                if active.length >= LEADERBOARD_STREAK_LENGTH {
                    match active.kind {
                        Outcome::Win => win_runs.entry(entry.team()).or_default().push(result),
                        Outcome::Loss => loss_runs.entry(entry.team()).or_default().push(result),
                        Outcome::Tie => {}
                    }
                }
            }

            let outcome = entry.outcome();
            run = match run {
                Some(active) if active.kind == outcome => Some(ActiveRun {
                    kind: outcome,
                    length: active.length + 1,
                }),
                _ => Some(ActiveRun {
                    kind: outcome,
                    length: 1,
                }),
            };
        }
    }

    MomentumReport {
        bucketed_games,
        buckets: MOMENTUM_BUCKETS
            .iter()
            .zip(buckets.iter())
            .map(|(label, tally)| MomentumBucket {
                streak: label.to_string(),
                ats: tally.line(),
            })
            .collect(),
        best_win_streak_ats: leaders(win_runs),
        best_loss_streak_ats: leaders(loss_runs),
    }
}

fn leaders(per_team: HashMap<&str, AtsTally>) -> Vec<MomentumLeader> {
    let mut rows: Vec<(&str, AtsTally)> = per_team
        .into_iter()
        .filter(|(_, tally)| tally.games() >= MIN_LEADERBOARD_GAMES)
        .collect();
    rows.sort_by(|a, b| {
        cmp_f64_desc(a.1.cover_rate(), b.1.cover_rate())
            .then_with(|| b.1.games().cmp(&a.1.games()))
            .then_with(|| a.0.cmp(b.0))
    });

    top_n(rows, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, (team, tally))| MomentumLeader {
            rank: i + 1,
            team: team.to_string(),
            games: tally.games(),
            covers: tally.covers,
            cover_pct: pct1(tally.covers, tally.covers + tally.losses),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::game;

    fn bucket<'r>(report: &'r MomentumReport, label: &str) -> &'r MomentumBucket {
        report.buckets.iter().find(|b| b.streak == label).unwrap()
    }

    #[test]
    fn buckets_use_the_run_carried_into_the_game() {
        // A: W, W, then a graded game on a 2-game win streak.
        let games = vec![
            game(2020, 1, "A", "B", 20, 10),
            game(2020, 2, "A", "C", 20, 10),
            game(2020, 3, "A", "D", 20, 17).with_spread(-3.0),
        ];
        let report = compute_momentum(&games);
        assert_eq!(bucket(&report, "W2").ats.pushes, 1);
        // D's first game of the season has no prior run.
        assert_eq!(report.bucketed_games, 1);
    }

    #[test]
    fn games_after_a_tie_are_not_bucketed() {
        let games = vec![
            game(2020, 1, "A", "B", 17, 17),
            game(2020, 2, "A", "C", 20, 17).with_spread(-3.0),
        ];
        let report = compute_momentum(&games);
        let bucketed: u32 = report
            .buckets
            .iter()
            .map(|b| b.ats.covers + b.ats.losses + b.ats.pushes)
            .sum();
        assert_eq!(bucketed, 0);
        assert_eq!(report.bucketed_games, bucketed);
    }

    #[test]
    fn long_runs_fold_into_three_plus() {
        let mut games: Vec<GameRecord> = (1..=4).map(|w| game(2020, w, "A", "B", 30, 10)).collect();
        games.push(game(2020, 5, "A", "B", 30, 10).with_spread(-3.0));
        let report = compute_momentum(&games);
        assert_eq!(bucket(&report, "W3+").ats.covers, 1);
        assert_eq!(bucket(&report, "L3+").ats.losses, 1);
    }

    #[test]
    fn runs_reset_each_season() {
        let games = vec![
            game(2019, 16, "A", "B", 30, 10),
            game(2019, 17, "A", "B", 30, 10),
            game(2020, 1, "A", "B", 30, 10).with_spread(-3.0),
        ];
        let report = compute_momentum(&games);
        assert_eq!(report.bucketed_games, 0);
    }

    #[test]
    fn leaderboard_requires_three_game_runs_and_sample() {
        let mut games: Vec<GameRecord> = (1..=3).map(|w| game(2020, w, "A", "B", 30, 10)).collect();
        for w in 4..=8 {
            games.push(game(2020, w, "A", "B", 30, 10).with_spread(-3.0));
        }
        let report = compute_momentum(&games);
        assert_eq!(report.best_win_streak_ats.len(), 1);
        let leader = &report.best_win_streak_ats[0];
        assert_eq!(leader.team, "A");
        assert_eq!(leader.games, 5);
        assert_eq!(leader.cover_pct, "100.0");
        assert_eq!(report.best_loss_streak_ats[0].team, "B");
        assert_eq!(report.best_loss_streak_ats[0].cover_pct, "0.0");
    }

    #[test]
    fn empty_input_keeps_all_buckets() {
        let report = compute_momentum(&[]);
        assert_eq!(report.buckets.len(), 6);
        assert!(report.buckets.iter().all(|b| b.ats.games == 0));
        assert!(report.best_win_streak_ats.is_empty());
    }
}
