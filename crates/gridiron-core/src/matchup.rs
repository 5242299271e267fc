// Head-to-head matchup engine.
//
// Finds every meeting between two teams regardless of which side hosted and
// reports the series from team A's point of view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::format::{pct1, round_to, safe_div, RecordLine, Tally};
use crate::game::{GameRecord, Outcome, SpreadResult, Week};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Series wins per decade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecadeSplit {
    pub decade: i32,
    pub games: u32,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub ties: u32,
}

/// Which side the line favored and how often each side covered.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupBetting {
    pub games_with_spread: u32,
    pub team_a_favored: u32,
    pub team_b_favored: u32,
    pub pick_ems: u32,
    pub team_a_favored_covers: u32,
    pub team_b_favored_covers: u32,
    pub team_a_covers: u32,
    pub team_b_covers: u32,
    pub pushes: u32,
    pub team_a_cover_pct: String,
    pub team_b_cover_pct: String,
}

/// One meeting, as listed in the recent-games table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupGame {
    pub season: i32,
    pub week: Week,
    pub date: Option<NaiveDate>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub winner: Option<String>,
}

/// The team that has won the most recent consecutive meetings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStreak {
    pub team: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupResult {
    pub team_a: String,
    pub team_b: String,
    pub games: u32,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub ties: u32,
    pub avg_total_points: f64,
    pub avg_margin: f64,
    pub team_a_home: RecordLine,
    pub team_b_home: RecordLine,
    pub by_decade: Vec<DecadeSplit>,
    pub betting: MatchupBetting,
    pub recent_games: Vec<MatchupGame>,
    pub streak: Option<SeriesStreak>,
}

impl MatchupResult {
    fn empty(team_a: &str, team_b: &str) -> Self {
        Self {
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            games: 0,
            team_a_wins: 0,
            team_b_wins: 0,
            ties: 0,
            avg_total_points: 0.0,
            avg_margin: 0.0,
            team_a_home: RecordLine::default(),
            team_b_home: RecordLine::default(),
            by_decade: Vec::new(),
            betting: MatchupBetting {
                team_a_cover_pct: pct1(0, 0),
                team_b_cover_pct: pct1(0, 0),
                ..Default::default()
            },
            recent_games: Vec::new(),
            streak: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Every meeting between `team_a` and `team_b`, with the `recent_n` latest
/// meetings listed oldest first. Identical or never-met teams produce an
/// empty result.
pub fn matchup(team_a: &str, team_b: &str, games: &[GameRecord], recent_n: usize) -> MatchupResult {
    if team_a == team_b {
        return MatchupResult::empty(team_a, team_b);
    }

    let mut meetings: Vec<&GameRecord> = games
        .iter()
        .filter(|g| {
            (g.home_team_name == team_a && g.away_team_name == team_b)
                || (g.home_team_name == team_b && g.away_team_name == team_a)
        })
        .collect();
    if meetings.is_empty() {
        return MatchupResult::empty(team_a, team_b);
    }
    meetings.sort_by_key(|g| g.chronological_key());

    let mut series = Tally::default();
    let mut a_home = Tally::default();
    let mut b_home = Tally::default();
    let mut total_points = 0u64;
    let mut margin_sum = 0i64;
    let mut decades: BTreeMap<i32, DecadeSplit> = BTreeMap::new();
    let mut betting = MatchupBetting::default();

    for game in &meetings {
        let Some(a) = game.appearance_of(team_a) else {
            continue;
        };
        let outcome = a.outcome();
        series.push(outcome);
        if a.is_home {
            a_home.push(outcome);
        } else {
            b_home.push(opposite(outcome));
        }
        total_points += game.total_points() as u64;
        margin_sum += a.margin();

        let decade = game.season.div_euclid(10) * 10;
        let split = decades.entry(decade).or_insert_with(|| DecadeSplit {
            decade,
            games: 0,
            team_a_wins: 0,
            team_b_wins: 0,
            ties: 0,
        });
        split.games += 1;
        match outcome {
            Outcome::Win => split.team_a_wins += 1,
            Outcome::Loss => split.team_b_wins += 1,
            Outcome::Tie => split.ties += 1,
        }

        if let Some(a_spread) = a.team_spread() {
            betting.games_with_spread += 1;
            let a_result = a.spread_result();
            if a_spread < 0.0 {
                betting.team_a_favored += 1;
                if a_result == Some(SpreadResult::Covered) {
                    betting.team_a_favored_covers += 1;
                }
            } else if a_spread > 0.0 {
                betting.team_b_favored += 1;
                if a_result == Some(SpreadResult::Lost) {
                    betting.team_b_favored_covers += 1;
                }
            } else {
                betting.pick_ems += 1;
            }
            match a_result {
                Some(SpreadResult::Covered) => betting.team_a_covers += 1,
                Some(SpreadResult::Lost) => betting.team_b_covers += 1,
                Some(SpreadResult::Push) => betting.pushes += 1,
                None => {}
            }
        }
    }

    let decided = betting.team_a_covers + betting.team_b_covers;
    betting.team_a_cover_pct = pct1(betting.team_a_covers, decided);
    betting.team_b_cover_pct = pct1(betting.team_b_covers, decided);

    let count = series.games();
    let recent_games = meetings
        .iter()
        .skip(meetings.len().saturating_sub(recent_n))
        .map(|g| MatchupGame {
            season: g.season,
            week: g.week,
            date: g.date,
            home_team: g.home_team_name.clone(),
            away_team: g.away_team_name.clone(),
            home_score: g.home_score,
            away_score: g.away_score,
            winner: g.winner().map(str::to_string),
        })
        .collect();

    MatchupResult {
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        games: count,
        team_a_wins: series.wins,
        team_b_wins: series.losses,
        ties: series.ties,
        avg_total_points: round_to(safe_div(total_points as f64, count as f64), 1),
        avg_margin: round_to(safe_div(margin_sum as f64, count as f64), 1),
        team_a_home: a_home.line(),
        team_b_home: b_home.line(),
        by_decade: decades.into_values().collect(),
        betting,
        recent_games,
        streak: series_streak(&meetings),
    }
}

fn opposite(outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::Win => Outcome::Loss,
        Outcome::Loss => Outcome::Win,
        Outcome::Tie => Outcome::Tie,
    }
}

/// Count back from the latest meeting while the same team keeps winning.
fn series_streak(chronological: &[&GameRecord]) -> Option<SeriesStreak> {
    let latest = chronological.last()?;
    let team = latest.winner()?;
    let count = chronological
        .iter()
        .rev()
        .take_while(|g| g.winner() == Some(team))
        .count() as u32;
    Some(SeriesStreak {
        team: team.to_string(),
        count,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
