// Days of rest between regular-season games.
//
// Rest is derived from the week number and the weekday: weeks start on
// Tuesday, so a Sunday-to-Sunday gap is 7 days and a Sunday-to-Thursday gap
// is 4.

use std::collections::HashMap;

use chrono::Weekday;
use serde::Serialize;

use crate::format::{AtsLine, AtsTally, RecordLine, Tally};
use crate::game::{GameRecord, TeamGame, TeamSeason};

const REST_ADVANTAGE_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestLine {
    pub category: String,
    pub record: RecordLine,
    pub ats: AtsLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestReport {
    pub games_with_rest: u32,
    pub categories: Vec<RestLine>,
    pub rest_advantage: RestLine,
}

#[derive(Debug, Default)]
struct RestTally {
    record: Tally,
    ats: AtsTally,
}

impl RestTally {
    fn push(&mut self, entry: &TeamGame<'_>) {
        self.record.push(entry.outcome());
        if let Some(result) = entry.spread_result() {
            self.ats.push(result);
        }
    }

    fn line(&self, category: &str) -> RestLine {
        RestLine {
            category: category.to_string(),
            record: self.record.line(),
            ats: self.ats.line(),
        }
    }
}

/// Offset of a weekday within a Tuesday-to-Monday football week.
pub fn week_day_offset(day: Weekday) -> i64 {
    ((day.num_days_from_monday() + 6) % 7) as i64
}

/// `short` (4 or fewer days), `normal` (5 to 8), `long` (9 or more).
pub fn rest_category(days: i64) -> &'static str {
    match days {
        i64::MIN..=4 => "short",
        5..=8 => "normal",
        _ => "long",
    }
}

fn rest_days(previous: &GameRecord, next: &GameRecord) -> Option<i64> {
    let from = previous.week.regular_number()? as i64;
    let to = next.week.regular_number()? as i64;
    let from_day = week_day_offset(previous.day_of_week?);
    let to_day = week_day_offset(next.day_of_week?);
    Some(7 * (to - from) + (to_day - from_day))
}

pub fn compute_rest(games: &[GameRecord]) -> RestReport {
    let mut ordered: Vec<&GameRecord> = games.iter().filter(|g| !g.is_playoff_game()).collect();
    ordered.sort_by_key(|g| g.chronological_key());

    let mut seasons: HashMap<TeamSeason, Vec<(usize, TeamGame<'_>)>> = HashMap::new();
    for (slot, game) in ordered.iter().enumerate() {
        for appearance in game.appearances() {
            seasons
                .entry(TeamSeason::new(appearance.team(), game.season))
                .or_default()
                .push((slot, appearance));
        }
    }

    let mut rest: HashMap<(usize, bool), i64> = HashMap::new();
    let mut short = RestTally::default();
    let mut normal = RestTally::default();
    let mut long = RestTally::default();

    for history in seasons.values() {
        for pair in history.windows(2) {
            let (_, previous) = &pair[0];
            let (slot, next) = &pair[1];
            let Some(days) = rest_days(previous.game, next.game) else {
                continue;
            };
            rest.insert((*slot, next.is_home), days);
            match rest_category(days) {
                "short" => short.push(next),
                "normal" => normal.push(next),
                _ => long.push(next),
            }
        }
    }

    let mut advantage = RestTally::default();
    for (slot, game) in ordered.iter().enumerate() {
        let (Some(home), Some(away)) = (rest.get(&(slot, true)), rest.get(&(slot, false))) else {
            continue;
        };
        for appearance in game.appearances() {
            let (own, other) = if appearance.is_home { (home, away) } else { (away, home) };
            if own - other >= REST_ADVANTAGE_DAYS {
                advantage.push(&appearance);
            }
        }
    }

    RestReport {
        games_with_rest: rest.len() as u32,
        categories: vec![short.line("short"), normal.line("normal"), long.line("long")],
        rest_advantage: advantage.line("advantage"),
    }
}
