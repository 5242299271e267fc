// Home-field advantage by season and by team.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::format::{cmp_f64_desc, fixed, pct1, round_to, safe_div, top_n, Tally};
use crate::game::GameRecord;

const LEADERBOARD_SIZE: usize = 10;
const MIN_SPLIT_GAMES: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonHomeField {
    pub season: i32,
    pub games: u32,
    pub home_win_pct: String,
    pub avg_home_margin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeGapEntry {
    pub rank: usize,
    pub team: String,
    pub home_games: u32,
    pub away_games: u32,
    pub home_win_pct: f64,
    pub away_win_pct: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFieldReport {
    pub games: u32,
    pub home_win_pct: String,
    pub avg_home_margin: String,
    pub by_season: Vec<SeasonHomeField>,
    pub biggest_home_edges: Vec<HomeGapEntry>,
}

#[derive(Debug, Default, Clone, Copy)]
struct SeasonTally {
    games: u32,
    home_wins: u32,
    margin: i64,
}

impl SeasonTally {
    fn push(&mut self, game: &GameRecord) {
        self.games += 1;
        self.margin += game.home_margin();
        if game.home_score > game.away_score {
            self.home_wins += 1;
        }
    }

    fn avg_margin(&self) -> String {
        fixed(safe_div(self.margin as f64, self.games as f64), 1)
    }
}

pub fn compute_home_field(games: &[GameRecord]) -> HomeFieldReport {
    let mut overall = SeasonTally::default();
    let mut seasons: BTreeMap<i32, SeasonTally> = BTreeMap::new();
    let mut teams: HashMap<&str, (Tally, Tally)> = HashMap::new();

    for game in games {
        overall.push(game);
        seasons.entry(game.season).or_default().push(game);
        for appearance in game.appearances() {
            let splits = teams.entry(appearance.team()).or_default();
            let split = if appearance.is_home { &mut splits.0 } else { &mut splits.1 };
            split.push(appearance.outcome());
        }
    }

    let mut gaps: Vec<(&str, Tally, Tally)> = teams
        .into_iter()
        .filter(|(_, (home, away))| home.games() >= MIN_SPLIT_GAMES && away.games() >= MIN_SPLIT_GAMES)
        .map(|(team, (home, away))| (team, home, away))
        .collect();
    gaps.sort_by(|a, b| {
        cmp_f64_desc(a.1.win_pct() - a.2.win_pct(), b.1.win_pct() - b.2.win_pct())
            .then_with(|| a.0.cmp(b.0))
    });

    HomeFieldReport {
        games: overall.games,
        home_win_pct: pct1(overall.home_wins, overall.games),
        avg_home_margin: overall.avg_margin(),
        by_season: seasons
            .into_iter()
            .map(|(season, tally)| SeasonHomeField {
                season,
                games: tally.games,
                home_win_pct: pct1(tally.home_wins, tally.games),
                avg_home_margin: tally.avg_margin(),
            })
            .collect(),
        biggest_home_edges: top_n(gaps, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, (team, home, away))| HomeGapEntry {
                rank: i + 1,
                team: team.to_string(),
                home_games: home.games(),
                away_games: away.games(),
                home_win_pct: round_to(home.win_pct(), 3),
                away_win_pct: round_to(away.win_pct(), 3),
                gap: round_to(home.win_pct() - away.win_pct(), 3),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::game;

    #[test]
    fn seasons_are_listed_in_order() {
        let games = vec![
            game(2021, 1, "A", "B", 10, 20),
            game(2020, 1, "A", "B", 30, 20),
            game(2020, 2, "B", "A", 27, 24),
        ];
        let report = compute_home_field(&games);
        assert_eq!(report.games, 3);
        assert_eq!(report.home_win_pct, "66.7");
        let seasons: Vec<i32> = report.by_season.iter().map(|s| s.season).collect();
        assert_eq!(seasons, vec![2020, 2021]);
        assert_eq!(report.by_season[0].home_win_pct, "100.0");
        assert_eq!(report.by_season[0].avg_home_margin, "6.5");
        assert_eq!(report.by_season[1].avg_home_margin, "-10.0");
    }

    #[test]
    fn home_edges_need_eight_games_each_way() {
        let mut games = Vec::new();
        for w in 1..=8 {
            games.push(game(2020, w, "A", "B", 20, 10));
            games.push(game(2020, w + 8, "B", "A", 20, 10));
        }
        games.push(game(2020, 17, "C", "A", 20, 10));
        let report = compute_home_field(&games);
        // A and B: 8-0 at home, 0-8 (A: 0-9) on the road.
        assert_eq!(report.biggest_home_edges.len(), 2);
        assert_eq!(report.biggest_home_edges[0].team, "A");
        assert_eq!(report.biggest_home_edges[0].gap, 1.0);
        assert_eq!(report.biggest_home_edges[1].team, "B");
    }

    #[test]
    fn empty_input_yields_placeholders() {
        let report = compute_home_field(&[]);
        assert_eq!(report.home_win_pct, "0.0");
        assert_eq!(report.avg_home_margin, "0.0");
        assert!(report.by_season.is_empty());
    }
}
