// Dome versus outdoor games, and how the outdoors splits by cold and wind.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{cmp_f64_desc, fixed, pct1, round_to, safe_div, top_n, Tally};
use crate::game::{GameRecord, OuResult};

const LEADERBOARD_SIZE: usize = 10;
const COLD_MAX_TEMPERATURE: f64 = 32.0;
const WINDY_MIN_SPEED: f64 = 15.0;
const MIN_COLD_GAMES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSplit {
    pub split: String,
    pub games: u32,
    pub avg_total_points: String,
    pub home_win_pct: String,
    pub over_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColdWeatherTeam {
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
pub struct WeatherReport {
    pub splits: Vec<WeatherSplit>,
    pub best_cold_weather_teams: Vec<ColdWeatherTeam>,
}

#[derive(Debug, Default, Clone, Copy)]
struct SplitTally {
    games: u32,
    total_points: u64,
    home_wins: u32,
    overs: u32,
    graded_totals: u32,
}

impl SplitTally {
    fn push(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_points += game.total_points() as u64;
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

    fn line(&self, split: &str) -> WeatherSplit {
        WeatherSplit {
            split: split.to_string(),
            games: self.games,
            avg_total_points: fixed(safe_div(self.total_points as f64, self.games as f64), 1),
            home_win_pct: pct1(self.home_wins, self.games),
            over_pct: pct1(self.overs, self.graded_totals),
        }
    }
}

pub fn compute_weather(games: &[GameRecord]) -> WeatherReport {
    let mut dome = SplitTally::default();
    let mut outdoor = SplitTally::default();
    let mut cold = SplitTally::default();
    let mut windy = SplitTally::default();
    let mut cold_teams: HashMap<&str, Tally> = HashMap::new();

    for game in games {
        if game.weather.is_dome() {
            dome.push(game);
            continue;
        }
        outdoor.push(game);

        if game.weather.temperature.is_some_and(|t| t <= COLD_MAX_TEMPERATURE) {
            cold.push(game);
            for appearance in game.appearances() {
                cold_teams
                    .entry(appearance.team())
                    .or_default()
                    .push(appearance.outcome());
            }
        }
        if game.weather.wind.is_some_and(|w| w >= WINDY_MIN_SPEED) {
            windy.push(game);
        }
    }

    let mut teams: Vec<(&str, Tally)> = cold_teams
        .into_iter()
        .filter(|(_, tally)| tally.games() >= MIN_COLD_GAMES)
        .collect();
    teams.sort_by(|a, b| {
        cmp_f64_desc(a.1.win_pct(), b.1.win_pct())
            .then_with(|| b.1.games().cmp(&a.1.games()))
            .then_with(|| a.0.cmp(b.0))
    });

    WeatherReport {
        splits: vec![
            dome.line("dome"),
            outdoor.line("outdoor"),
            cold.line("cold"),
            windy.line("windy"),
        ],
        best_cold_weather_teams: top_n(teams, LEADERBOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(i, (team, tally))| ColdWeatherTeam {
                rank: i + 1,
                team: team.to_string(),
                games: tally.games(),
                wins: tally.wins,
                losses: tally.losses,
                ties: tally.ties,
                win_pct: round_to(tally.win_pct(), 3),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Weather;
    use crate::test_support::game;

    fn outdoors(temperature: f64, wind: f64) -> Weather {
        Weather {
            temperature: Some(temperature),
            conditions: Some("Clear".to_string()),
            wind: Some(wind),
        }
    }

    #[test]
    fn unrecorded_weather_counts_as_dome() {
        let games = vec![
            game(2020, 1, "A", "B", 20, 10),
            game(2020, 2, "A", "B", 20, 10).with_weather(Weather {
                temperature: Some(72.0),
                conditions: Some("Indoors".to_string()),
                wind: None,
            }),
            game(2020, 3, "A", "B", 10, 20).with_weather(outdoors(50.0, 5.0)),
        ];
        let report = compute_weather(&games);
        assert_eq!(report.splits[0].games, 2);
        assert_eq!(report.splits[0].home_win_pct, "100.0");
        assert_eq!(report.splits[1].games, 1);
    }

    #[test]
    fn cold_and_windy_are_outdoor_subsets() {
        let games = vec![
            game(2020, 1, "A", "B", 20, 10).with_weather(outdoors(32.0, 20.0)),
            game(2020, 2, "A", "B", 20, 10).with_weather(outdoors(33.0, 14.0)),
        ];
        let report = compute_weather(&games);
        assert_eq!(report.splits[2].split, "cold");
        assert_eq!(report.splits[2].games, 1);
        assert_eq!(report.splits[3].games, 1);
    }

    #[test]
    fn cold_weather_teams_need_three_games() {
        let mut games: Vec<GameRecord> = (1..=3)
            .map(|w| game(2020, w, "A", "B", 20, 10).with_weather(outdoors(20.0, 0.0)))
            .collect();
        games.push(game(2020, 4, "C", "D", 20, 10).with_weather(outdoors(20.0, 0.0)));
        let report = compute_weather(&games);
        let teams: Vec<&str> = report
            .best_cold_weather_teams
            .iter()
            .map(|t| t.team.as_str())
            .collect();
        assert_eq!(teams, vec!["A", "B"]);
        assert_eq!(report.best_cold_weather_teams[0].win_pct, 1.0);
    }

    #[test]
    fn empty_input_keeps_all_splits() {
        let report = compute_weather(&[]);
        assert_eq!(report.splits.len(), 4);
        assert!(report.best_cold_weather_teams.is_empty());
    }
}
