// Team-seasons that beat or fell short of their Pythagorean expectation.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{bottom_n_reversed, cmp_f64_desc, round_to, safe_div, top_n};
use crate::game::{GameRecord, Outcome, TeamSeason};

const LEADERBOARD_SIZE: usize = 10;
/// Pythagorean exponent tuned for pro football scoring.
pub const PYTHAGOREAN_EXPONENT: f64 = 2.37;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerEntry {
    pub rank: usize,
    pub team: String,
    pub season: i32,
    pub games: u32,
    pub wins: f64,
    pub expected_wins: f64,
    pub difference: f64,
    pub points_for: u32,
    pub points_against: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformersReport {
    pub team_seasons: u32,
    pub over_performers: Vec<PerformerEntry>,
    pub under_performers: Vec<PerformerEntry>,
}

/// Expected wins from points scored and allowed, clamped to `[0, games]`.
pub fn expected_wins(games: u32, points_for: u32, points_against: u32) -> f64 {
    let scored = (points_for as f64).powf(PYTHAGOREAN_EXPONENT);
    let allowed = (points_against as f64).powf(PYTHAGOREAN_EXPONENT);
    let share = safe_div(scored, scored + allowed);
    (games as f64 * share).clamp(0.0, games as f64)
}

#[derive(Debug, Default)]
struct SeasonLine {
    games: u32,
    wins: f64,
    points_for: u32,
    points_against: u32,
}

pub fn compute_performers(games: &[GameRecord]) -> PerformersReport {
    let mut seasons: HashMap<TeamSeason, SeasonLine> = HashMap::new();
    for game in games.iter().filter(|g| !g.is_playoff_game()) {
        for appearance in game.appearances() {
            let line = seasons
                .entry(TeamSeason::new(appearance.team(), game.season))
                .or_default();
            line.games += 1;
            line.points_for += appearance.points_for();
            line.points_against += appearance.points_against();
            line.wins += match appearance.outcome() {
                Outcome::Win => 1.0,
                Outcome::Tie => 0.5,
                Outcome::Loss => 0.0,
            };
        }
    }

    let mut rows: Vec<PerformerEntry> = seasons
        .into_iter()
        .map(|(key, line)| {
            let expected = expected_wins(line.games, line.points_for, line.points_against);
            PerformerEntry {
                rank: 0,
                team: key.team,
                season: key.season,
                games: line.games,
                wins: line.wins,
                expected_wins: round_to(expected, 2),
                difference: round_to(line.wins - expected, 2),
                points_for: line.points_for,
                points_against: line.points_against,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        cmp_f64_desc(a.difference, b.difference)
            .then_with(|| a.season.cmp(&b.season))
            .then_with(|| a.team.cmp(&b.team))
    });

    let under = rerank(bottom_n_reversed(&rows, LEADERBOARD_SIZE));
    PerformersReport {
        team_seasons: rows.len() as u32,
        over_performers: rerank(top_n(rows, LEADERBOARD_SIZE)),
        under_performers: under,
    }
}

fn rerank(mut rows: Vec<PerformerEntry>) -> Vec<PerformerEntry> {
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::game;

    #[test]
    fn expectation_follows_point_share() {
        assert_eq!(expected_wins(16, 300, 300), 8.0);
        assert_eq!(expected_wins(16, 0, 0), 0.0);
        assert_eq!(expected_wins(10, 250, 0), 10.0);
        let strong = expected_wins(17, 450, 300);
        assert!(strong > 8.5 && strong < 17.0);
    }

    #[test]
    fn lucky_close_winners_over_perform() {
        // A wins three one-point games, loses one by 30.
        let games = vec![
            game(2020, 1, "A", "B", 10, 9),
            game(2020, 2, "A", "B", 10, 9),
            game(2020, 3, "A", "B", 10, 9),
            game(2020, 4, "A", "B", 0, 30),
        ];
        let report = compute_performers(&games);
        assert_eq!(report.team_seasons, 2);
        let top = &report.over_performers[0];
        assert_eq!(top.team, "A");
        assert_eq!(top.rank, 1);
        assert!(top.difference > 0.0);
        assert_eq!(report.under_performers[0].team, "B");
        assert_eq!(report.under_performers[0].rank, 1);
    }

    #[test]
    fn empty_input_yields_default() {
        assert_eq!(compute_performers(&[]), PerformersReport::default());
    }
}
