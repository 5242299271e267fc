// Postseason results and how playoff teams separated themselves in the
// regular season.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::format::{cmp_f64_desc, fixed, pct1, round_to, safe_div, top_n, Tally};
use crate::game::{GameRecord, PlayoffRound, Week};

const LEADERBOARD_SIZE: usize = 10;
const MIN_PLAYOFF_GAMES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLine {
    pub round: String,
    pub games: u32,
    pub home_win_pct: String,
    pub avg_margin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffTeam {
    pub rank: usize,
    pub team: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSeparation {
    pub season: i32,
    pub playoff_teams: u32,
    pub playoff_avg_margin: f64,
    pub non_playoff_avg_margin: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffsReport {
    pub playoff_games: u32,
    pub by_round: Vec<RoundLine>,
    pub best_playoff_records: Vec<PlayoffTeam>,
    pub separation_by_season: Vec<SeasonSeparation>,
    pub average_separation: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct RoundTally {
    games: u32,
    home_wins: u32,
    margin: u64,
}

/// The round of a playoff game. A game flagged as playoff but carrying a
/// regular week number is counted as a wild-card game.
fn round_of(game: &GameRecord) -> PlayoffRound {
    match game.week {
        Week::Playoff(round) => round,
        Week::Regular(_) => PlayoffRound::WildCard,
    }
}

pub fn compute_playoffs(games: &[GameRecord]) -> PlayoffsReport {
    let mut rounds = [RoundTally::default(); 4];
    let mut teams: HashMap<&str, Tally> = HashMap::new();
    let mut playoff_teams: HashMap<i32, HashSet<&str>> = HashMap::new();
    let mut regular_margins: BTreeMap<i32, HashMap<&str, (i64, u32)>> = BTreeMap::new();
    let mut playoff_games = 0u32;

    for game in games {
        if game.is_playoff_game() {
            playoff_games += 1;
            let slot = PlayoffRound::ALL
                .iter()
                .position(|r| *r == round_of(game))
                .unwrap_or(0);
            let tally = &mut rounds[slot];
            tally.games += 1;
            tally.margin += game.home_margin().unsigned_abs();
            if game.home_score > game.away_score {
                tally.home_wins += 1;
            }
            for appearance in game.appearances() {
                teams
                    .entry(appearance.team())
                    .or_default()
                    .push(appearance.outcome());
                playoff_teams
                    .entry(game.season)
                    .or_default()
                    .insert(appearance.team());
            }
        } else {
            let season = regular_margins.entry(game.season).or_default();
            for appearance in game.appearances() {
                let entry = season.entry(appearance.team()).or_default();
                entry.0 += appearance.margin();
                entry.1 += 1;
            }
        }
    }

    let mut records: Vec<(&str, Tally)> = teams
        .into_iter()
        .filter(|(_, tally)| tally.games() >= MIN_PLAYOFF_GAMES)
        .collect();
    records.sort_by(|a, b| {
        cmp_f64_desc(a.1.win_pct(), b.1.win_pct())
            .then_with(|| b.1.wins.cmp(&a.1.wins))
            .then_with(|| a.0.cmp(b.0))
    });

    let separation_by_season: Vec<SeasonSeparation> = regular_margins
        .into_iter()
        .filter_map(|(season, margins)| {
            let qualified = playoff_teams.get(&season)?;
            let mut playoff = Vec::new();
            let mut rest = Vec::new();
            for (team, (margin, games)) in margins {
                let avg = safe_div(margin as f64, games as f64);
                if qualified.contains(team) {
                    playoff.push(avg);
                } else {
                    rest.push(avg);
                }
            }
            if playoff.is_empty() || rest.is_empty() {
                return None;
            }
            let playoff_avg = playoff.iter().sum::<f64>() / playoff.len() as f64;
            let rest_avg = rest.iter().sum::<f64>() / rest.len() as f64;
            Some(SeasonSeparation {
                season,
                playoff_teams: playoff.len() as u32,
                playoff_avg_margin: round_to(playoff_avg, 2),
                non_playoff_avg_margin: round_to(rest_avg, 2),
                gap: round_to(playoff_avg - rest_avg, 2),
            })
        })
        .collect();

    let average_separation = safe_div(
        separation_by_season.iter().map(|s| s.gap).sum(),
        separation_by_season.len() as f64,
    );

    PlayoffsReport {
        playoff_games,
        by_round: PlayoffRound::ALL
            .iter()
            .zip(rounds.iter())
            .map(|(round, tally)| RoundLine {
                round: round.label().to_string(),
                games: tally.games,
                home_win_pct: pct1(tally.home_wins, tally.games),
                avg_margin: fixed(safe_div(tally.margin as f64, tally.games as f64), 1),
            })
            .collect(),
        best_playoff_records: top_n(records, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, (team, tally))| PlayoffTeam {
                rank: i + 1,
                team: team.to_string(),
                games: tally.games(),
                wins: tally.wins,
                losses: tally.losses,
                win_pct: round_to(tally.win_pct(), 3),
            })
            .collect(),
        separation_by_season,
        average_separation: round_to(average_separation, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{game, playoff};

    #[test]
    fn rounds_are_always_listed() {
        let report = compute_playoffs(&[]);
        assert_eq!(report.by_round.len(), 4);
        assert_eq!(report.by_round[0].home_win_pct, "0.0");
        assert!(report.best_playoff_records.is_empty());
        assert_eq!(report.average_separation, 0.0);
    }

    #[test]
    fn home_win_pct_per_round() {
        let games = vec![
            playoff(2020, PlayoffRound::WildCard, "A", "B", 20, 10),
            playoff(2020, PlayoffRound::WildCard, "C", "D", 10, 20),
            playoff(2020, PlayoffRound::Championship, "A", "D", 31, 17),
        ];
        let report = compute_playoffs(&games);
        assert_eq!(report.playoff_games, 3);
        assert_eq!(report.by_round[0].games, 2);
        assert_eq!(report.by_round[0].home_win_pct, "50.0");
        assert_eq!(report.by_round[3].home_win_pct, "100.0");
        assert_eq!(report.by_round[3].avg_margin, "14.0");
    }

    #[test]
    fn playoff_records_need_three_games() {
        let games = vec![
            playoff(2019, PlayoffRound::WildCard, "A", "B", 20, 10),
            playoff(2020, PlayoffRound::WildCard, "A", "C", 20, 10),
            playoff(2021, PlayoffRound::WildCard, "A", "B", 10, 20),
        ];
        let report = compute_playoffs(&games);
        assert_eq!(report.best_playoff_records.len(), 1);
        assert_eq!(report.best_playoff_records[0].team, "A");
        assert_eq!(report.best_playoff_records[0].win_pct, 0.667);
    }

    #[test]
    fn playoff_teams_outscore_the_rest() {
        let games = vec![
            game(2020, 1, "A", "B", 30, 10),
            game(2020, 2, "C", "D", 20, 10),
            playoff(2020, PlayoffRound::WildCard, "A", "C", 24, 17),
        ];
        let report = compute_playoffs(&games);
        let season = &report.separation_by_season[0];
        assert_eq!(season.playoff_teams, 2);
        // Playoff teams average +15, the rest -15.
        assert_eq!(season.playoff_avg_margin, 15.0);
        assert_eq!(season.non_playoff_avg_margin, -15.0);
        assert_eq!(season.gap, 30.0);
        assert_eq!(report.average_separation, 30.0);
    }
}
