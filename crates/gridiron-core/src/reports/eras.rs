// Scoring and competitiveness by rules era.

use serde::Serialize;

use crate::format::{fixed, pct1, safe_div};
use crate::game::{GameRecord, OuResult};

const BLOWOUT_MARGIN: u64 = 21;
const ONE_SCORE_MARGIN: u64 = 8;

/// Era label and the first season that belongs to it. Seasons before the
/// first start fold into the first era.
const ERAS: [(&str, i32); 5] = [
    ("1966-1977", 1966),
    ("1978-1993", 1978),
    ("1994-2001", 1994),
    ("2002-2019", 2002),
    ("2020+", 2020),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EraLine {
    pub era: String,
    pub games: u32,
    pub avg_total_points: String,
    pub avg_margin: String,
    pub home_win_pct: String,
    pub tie_pct: String,
    pub blowout_pct: String,
    pub one_score_pct: String,
    pub over_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErasReport {
    pub eras: Vec<EraLine>,
}

#[derive(Debug, Default, Clone, Copy)]
struct EraTally {
    games: u32,
    total_points: u64,
    total_margin: u64,
    home_wins: u32,
    ties: u32,
    blowouts: u32,
    one_score: u32,
    overs: u32,
    graded_totals: u32,
}

/// Index into the era table for a season.
pub fn era_index(season: i32) -> usize {
    ERAS.iter().rposition(|(_, start)| season >= *start).unwrap_or(0)
}

pub fn compute_eras(games: &[GameRecord]) -> ErasReport {
    let mut tallies = [EraTally::default(); 5];

    for game in games {
        let tally = &mut tallies[era_index(game.season)];
        let margin = game.home_margin().unsigned_abs();
        tally.games += 1;
        tally.total_points += game.total_points() as u64;
        tally.total_margin += margin;
        if game.home_score > game.away_score {
            tally.home_wins += 1;
        }
        if game.is_tie() {
            tally.ties += 1;
        }
        if margin >= BLOWOUT_MARGIN {
            tally.blowouts += 1;
        }
        if margin <= ONE_SCORE_MARGIN {
            tally.one_score += 1;
        }
        if let Some(result) = game.ou_result {
            tally.graded_totals += 1;
            if result == OuResult::Over {
                tally.overs += 1;
            }
        }
    }

    ErasReport {
        eras: ERAS
            .iter()
            .zip(tallies.iter())
            .map(|((label, _), t)| EraLine {
                era: label.to_string(),
                games: t.games,
                avg_total_points: fixed(safe_div(t.total_points as f64, t.games as f64), 1),
                avg_margin: fixed(safe_div(t.total_margin as f64, t.games as f64), 1),
                home_win_pct: pct1(t.home_wins, t.games),
                tie_pct: pct1(t.ties, t.games),
                blowout_pct: pct1(t.blowouts, t.games),
                one_score_pct: pct1(t.one_score, t.games),
                over_pct: pct1(t.overs, t.graded_totals),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::game;

    #[test]
    fn seasons_map_to_eras() {
        assert_eq!(era_index(1950), 0);
        assert_eq!(era_index(1977), 0);
        assert_eq!(era_index(1978), 1);
        assert_eq!(era_index(2001), 2);
        assert_eq!(era_index(2019), 3);
        assert_eq!(era_index(2024), 4);
    }

    #[test]
    fn era_lines_aggregate_games() {
        let games = vec![
            game(2021, 1, "A", "B", 35, 10).with_total(40.0),
            game(2022, 1, "A", "B", 20, 17).with_total(40.0),
            game(2023, 1, "A", "B", 10, 10),
        ];
        let report = compute_eras(&games);
        let modern = &report.eras[4];
        assert_eq!(modern.games, 3);
        assert_eq!(modern.avg_total_points, "34.0");
        assert_eq!(modern.home_win_pct, "66.7");
        assert_eq!(modern.tie_pct, "33.3");
        assert_eq!(modern.blowout_pct, "33.3");
        assert_eq!(modern.one_score_pct, "66.7");
        assert_eq!(modern.over_pct, "50.0");
    }

    #[test]
    fn empty_input_lists_every_era() {
        let report = compute_eras(&[]);
        assert_eq!(report.eras.len(), 5);
        assert!(report.eras.iter().all(|e| e.games == 0 && e.home_win_pct == "0.0"));
    }
}
