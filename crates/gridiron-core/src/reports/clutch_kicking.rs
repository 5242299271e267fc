// Field goal accuracy in games decided by a field goal or less.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_asc, cmp_f64_desc, pct1, safe_div, top_n};
use crate::game::GameRecord;

const LEADERBOARD_SIZE: usize = 10;
const CLOSE_MARGIN: u64 = 3;
const MIN_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KickerLine {
    pub rank: usize,
    pub team: String,
    pub made: u32,
    pub attempts: u32,
    pub fg_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClutchKickingReport {
    pub close_games: u32,
    pub league_made: u32,
    pub league_attempts: u32,
    pub league_fg_pct: String,
    pub best: Vec<KickerLine>,
    pub worst: Vec<KickerLine>,
}

pub fn compute_clutch_kicking(games: &[GameRecord]) -> ClutchKickingReport {
    let mut close_games = 0u32;
    let mut league = (0u32, 0u32);
    let mut teams: HashMap<&str, (u32, u32)> = HashMap::new();

    for game in games {
        if game.kicking.is_none() || game.home_margin().unsigned_abs() > CLOSE_MARGIN {
            continue;
        }
        close_games += 1;
        for appearance in game.appearances() {
            let Some((made, attempts)) = appearance.field_goals() else {
                continue;
            };
            league.0 += made;
            league.1 += attempts;
            let entry = teams.entry(appearance.team()).or_default();
            entry.0 += made;
            entry.1 += attempts;
        }
    }

    let qualified: Vec<(&str, u32, u32)> = teams
        .into_iter()
        .filter(|(_, (_, attempts))| *attempts >= MIN_ATTEMPTS)
        .map(|(team, (made, attempts))| (team, made, attempts))
        .collect();
    let accuracy = |row: &(&str, u32, u32)| safe_div(row.1 as f64, row.2 as f64);

    let mut best = qualified.clone();
    best.sort_by(|a, b| {
        cmp_f64_desc(accuracy(a), accuracy(b))
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(b.0))
    });
    let mut worst = qualified;
    worst.sort_by(|a, b| {
        cmp_f64_asc(accuracy(a), accuracy(b))
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(b.0))
    });

    ClutchKickingReport {
        close_games,
        league_made: league.0,
        league_attempts: league.1,
        league_fg_pct: pct1(league.0, league.1),
        best: kicker_lines(best),
        worst: kicker_lines(worst),
    }
}

fn kicker_lines(rows: Vec<(&str, u32, u32)>) -> Vec<KickerLine> {
    top_n(rows, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, (team, made, attempts))| KickerLine {
            rank: i + 1,
            team: team.to_string(),
            made,
            attempts,
            fg_pct: pct1(made, attempts),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Kicking;
    use crate::test_support::game;

    fn kicks(home: (u32, u32), away: (u32, u32)) -> Kicking {
        Kicking {
            home_fg_made: home.0,
            home_fg_attempts: home.1,
            away_fg_made: away.0,
            away_fg_attempts: away.1,
        }
    }

    #[test]
    fn only_close_games_count() {
        let games = vec![
            game(2020, 1, "A", "B", 23, 20).with_kicking(kicks((3, 3), (2, 4))),
            game(2020, 2, "A", "B", 30, 10).with_kicking(kicks((3, 3), (1, 1))),
            game(2020, 3, "A", "B", 20, 17),
        ];
        let report = compute_clutch_kicking(&games);
        assert_eq!(report.close_games, 1);
        assert_eq!(report.league_made, 5);
        assert_eq!(report.league_attempts, 7);
        assert_eq!(report.league_fg_pct, "71.4");
        // Neither team reaches the attempt minimum.
        assert!(report.best.is_empty());
    }

    #[test]
    fn best_and_worst_are_sorted_in_opposite_directions() {
        let games = vec![
            game(2020, 1, "A", "B", 23, 20).with_kicking(kicks((5, 5), (2, 5))),
            game(2020, 2, "C", "D", 16, 13).with_kicking(kicks((4, 5), (0, 0))),
        ];
        let report = compute_clutch_kicking(&games);
        let best: Vec<&str> = report.best.iter().map(|k| k.team.as_str()).collect();
        let worst: Vec<&str> = report.worst.iter().map(|k| k.team.as_str()).collect();
        assert_eq!(best, vec!["A", "C", "B"]);
        assert_eq!(worst, vec!["B", "C", "A"]);
        assert_eq!(report.best[0].fg_pct, "100.0");
    }

    #[test]
    fn empty_input_has_zero_totals() {
        let report = compute_clutch_kicking(&[]);
        assert_eq!(report.league_fg_pct, "0.0");
        assert!(report.worst.is_empty());
    }
}
