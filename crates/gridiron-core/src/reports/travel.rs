// Away-team performance by timezone travel.

use serde::Serialize;

use crate::format::{AtsLine, AtsTally, RecordLine, Tally};
use crate::game::GameRecord;

const DIRECTIONS: [&str; 3] = ["east", "west", "none"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelLine {
    pub label: String,
    pub record: RecordLine,
    pub ats: AtsLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelReport {
    pub games_with_timezones: u32,
    pub by_direction: Vec<TravelLine>,
    pub by_zones_crossed: Vec<TravelLine>,
}

#[derive(Debug, Default, Clone, Copy)]
struct TravelTally {
    record: Tally,
    ats: AtsTally,
}

impl TravelTally {
    fn line(&self, label: String) -> TravelLine {
        TravelLine {
            label,
            record: self.record.line(),
            ats: self.ats.line(),
        }
    }
}

/// Hours the away team moved: positive when travelling east.
pub fn timezone_shift(game: &GameRecord) -> Option<i32> {
    let home = game.home_timezone?;
    let away = game.away_timezone?;
    Some(home.utc_offset() - away.utc_offset())
}

pub fn compute_travel(games: &[GameRecord]) -> TravelReport {
    let mut directions = [TravelTally::default(); 3];
    let mut zones = [TravelTally::default(); 4];
    let mut games_with_timezones = 0u32;

    for game in games {
        let Some(shift) = timezone_shift(game) else {
            continue;
        };
        games_with_timezones += 1;

        let [_, away] = game.appearances();
        let direction = match shift.signum() {
            1 => 0,
            -1 => 1,
            _ => 2,
        };
        let crossed = (shift.unsigned_abs() as usize).min(3);
        for tally in [&mut directions[direction], &mut zones[crossed]] {
            tally.record.push(away.outcome());
            if let Some(result) = away.spread_result() {
                tally.ats.push(result);
            }
        }
    }

    TravelReport {
        games_with_timezones,
        by_direction: DIRECTIONS
            .iter()
            .zip(directions.iter())
            .map(|(label, tally)| tally.line(label.to_string()))
            .collect(),
        by_zones_crossed: zones
            .iter()
            .enumerate()
            .map(|(crossed, tally)| tally.line(crossed.to_string()))
            .collect(),
    }
}
