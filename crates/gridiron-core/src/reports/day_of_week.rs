// Results by the weekday a game was played on.

use chrono::Weekday;
use serde::Serialize;

use crate::format::{fixed, pct1, safe_div};
use crate::game::GameRecord;

/// Weekdays in football-calendar order, starting Thursday.
const DAYS: [Weekday; 7] = [
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLine {
    pub day: String,
    pub games: u32,
    pub home_win_pct: String,
    pub avg_total_points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeekReport {
    pub days: Vec<DayLine>,
    pub unknown_day: u32,
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn compute_day_of_week(games: &[GameRecord]) -> DayOfWeekReport {
    let mut tallies = [(0u32, 0u32, 0u64); 7];
    let mut unknown_day = 0u32;

    for game in games {
        let Some(slot) = game
            .day_of_week
            .and_then(|day| DAYS.iter().position(|d| *d == day))
        else {
            unknown_day += 1;
            continue;
        };
        let tally = &mut tallies[slot];
        tally.0 += 1;
        if game.home_score > game.away_score {
            tally.1 += 1;
        }
        tally.2 += game.total_points() as u64;
    }

    DayOfWeekReport {
        days: DAYS
            .iter()
            .zip(tallies.iter())
            .map(|(day, (games, home_wins, points))| DayLine {
                day: day_name(*day).to_string(),
                games: *games,
                home_win_pct: pct1(*home_wins, *games),
                avg_total_points: fixed(safe_div(*points as f64, *games as f64), 1),
            })
            .collect(),
        unknown_day,
    }
}
