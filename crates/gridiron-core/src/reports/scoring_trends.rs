// Season-by-season scoring levels.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::format::{round_to, safe_div};
use crate::game::GameRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonScoring {
    pub season: i32,
    pub games: u32,
    /// Average points scored by one team in one game.
    pub avg_points_per_team: f64,
    pub avg_total_points: f64,
    pub shutouts: u32,
    pub ties: u32,
    pub highest_total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringTrendsReport {
    pub seasons: Vec<SeasonScoring>,
}

#[derive(Debug, Default)]
struct SeasonTally {
    games: u32,
    points: u64,
    shutouts: u32,
    ties: u32,
    highest_total: u32,
}

pub fn compute_scoring_trends(games: &[GameRecord]) -> ScoringTrendsReport {
    let mut seasons: BTreeMap<i32, SeasonTally> = BTreeMap::new();
    for game in games {
        let tally = seasons.entry(game.season).or_default();
        tally.games += 1;
        tally.points += game.total_points() as u64;
        tally.highest_total = tally.highest_total.max(game.total_points());
        if game.home_score == 0 || game.away_score == 0 {
            tally.shutouts += 1;
        }
        if game.is_tie() {
            tally.ties += 1;
        }
    }

    ScoringTrendsReport {
        seasons: seasons
            .into_iter()
            .map(|(season, t)| SeasonScoring {
                season,
                games: t.games,
                avg_points_per_team: round_to(safe_div(t.points as f64, 2.0 * t.games as f64), 1),
                avg_total_points: round_to(safe_div(t.points as f64, t.games as f64), 1),
                shutouts: t.shutouts,
                ties: t.ties,
                highest_total: t.highest_total,
            })
            .collect(),
    }
}
