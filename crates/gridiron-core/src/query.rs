// Filterable record finder.
//
// Resolves a team or franchise selector through the team index, narrows its
// appearances with an explicit `FilterCriteria`, and rolls the survivors up
// into a `RecordResult`. Filtering never mutates the index; every call
// returns a fresh list.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::error::ParseError;
use crate::format::{fixed, pct1, round_to, safe_div, win_pct_display, AtsLine, AtsTally, Tally};
use crate::franchise::FranchiseMap;
use crate::game::{OuResult, Outcome, PrimetimeSlot, TeamGame, Week};
use crate::index::TeamIndex;

// ---------------------------------------------------------------------------
// Filter vocabulary
// ---------------------------------------------------------------------------

/// Home/away constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Location {
    #[default]
    All,
    Home,
    Away,
}

impl FromStr for Location {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Location::All),
            "home" => Ok(Location::Home),
            "away" | "road" => Ok(Location::Away),
            _ => Err(ParseError::Vocabulary {
                kind: "location",
                value: s.to_string(),
            }),
        }
    }
}

/// Regular season vs. playoff constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameType {
    #[default]
    All,
    Regular,
    Playoffs,
}

impl FromStr for GameType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(GameType::All),
            "regular" | "reg" => Ok(GameType::Regular),
            "playoffs" | "playoff" | "post" => Ok(GameType::Playoffs),
            _ => Err(ParseError::Vocabulary {
                kind: "game type",
                value: s.to_string(),
            }),
        }
    }
}

/// Who the query is about. A franchise selector also turns on franchise
/// matching for the opponent filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSelector {
    Team(String),
    Franchise(String),
}

impl TeamSelector {
    pub fn name(&self) -> &str {
        match self {
            TeamSelector::Team(name) | TeamSelector::Franchise(name) => name,
        }
    }

    pub fn is_franchise(&self) -> bool {
        matches!(self, TeamSelector::Franchise(_))
    }
}

impl fmt::Display for TeamSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional constraints on a team's appearances. Every field left at its
/// default means "no constraint"; an empty set counts as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub location: Location,
    pub season_from: Option<i32>,
    pub season_to: Option<i32>,
    pub weeks: Option<BTreeSet<Week>>,
    pub days: Option<HashSet<Weekday>>,
    /// `None` inside the set selects games without a primetime slot.
    pub primetime: Option<BTreeSet<Option<PrimetimeSlot>>>,
    pub game_type: GameType,
    pub opponent: Option<String>,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Over/under split for the matched games.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OuLine {
    pub overs: u32,
    pub unders: u32,
    pub pushes: u32,
    pub over_pct: String,
}

/// The run of identical results ending at the most recent matched game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStreak {
    pub kind: Outcome,
    pub count: u32,
}

impl fmt::Display for CurrentStreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.count)
    }
}

/// Aggregate record for a filtered query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResult {
    pub team: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_pct: f64,
    pub win_pct_display: String,
    pub points_for: u32,
    pub points_against: u32,
    pub avg_points_for: f64,
    pub avg_points_against: f64,
    pub avg_margin: f64,
    pub avg_margin_display: String,
    pub ats: AtsLine,
    pub ou: OuLine,
    pub current_streak: Option<CurrentStreak>,
}

// ---------------------------------------------------------------------------
// Record finder
// ---------------------------------------------------------------------------

/// Query engine over a prebuilt team index.
#[derive(Debug, Clone, Copy)]
pub struct RecordFinder<'i, 'a> {
    index: &'i TeamIndex<'a>,
    franchises: &'i FranchiseMap,
}

impl<'i, 'a> RecordFinder<'i, 'a> {
    pub fn new(index: &'i TeamIndex<'a>, franchises: &'i FranchiseMap) -> Self {
        Self { index, franchises }
    }

    /// Team names the selector stands for.
    pub fn resolve(&self, selector: &TeamSelector) -> Vec<&'a str> {
        match selector {
            TeamSelector::Team(name) => self
                .index
                .teams()
                .into_iter()
                .filter(|team| *team == name.as_str())
                .collect(),
            TeamSelector::Franchise(name) => self.franchises.names_for(name, self.index),
        }
    }

    /// Matching appearances, in index order.
    pub fn filter(&self, selector: &TeamSelector, filters: &FilterCriteria) -> Vec<TeamGame<'a>> {
        let franchise_mode = selector.is_franchise();
        let matched: Vec<TeamGame<'a>> = self
            .resolve(selector)
            .into_iter()
            .flat_map(|team| self.index.entries(team).iter().copied())
            .filter(|entry| self.matches(entry, filters, franchise_mode))
            .collect();
        debug!(selector = %selector, matched = matched.len(), "filtered team entries");
        matched
    }

    fn matches(&self, entry: &TeamGame<'_>, filters: &FilterCriteria, franchise_mode: bool) -> bool {
        let game = entry.game;

        match filters.location {
            Location::Home if !entry.is_home => return false,
            Location::Away if entry.is_home => return false,
            _ => {}
        }

        if filters.season_from.is_some_and(|from| game.season < from) {
            return false;
        }
        if filters.season_to.is_some_and(|to| game.season > to) {
            return false;
        }

        if let Some(weeks) = filters.weeks.as_ref().filter(|w| !w.is_empty()) {
            if !weeks.contains(&game.week) {
                return false;
            }
        }

        if let Some(days) = filters.days.as_ref().filter(|d| !d.is_empty()) {
            match game.day_of_week {
                Some(day) if days.contains(&day) => {}
                _ => return false,
            }
        }

        if let Some(slots) = filters.primetime.as_ref().filter(|p| !p.is_empty()) {
            if !slots.contains(&game.primetime) {
                return false;
            }
        }

        match filters.game_type {
            GameType::Regular if game.is_playoff_game() => return false,
            GameType::Playoffs if !game.is_playoff_game() => return false,
            _ => {}
        }

        if let Some(opponent) = filters.opponent.as_deref().filter(|o| !o.is_empty()) {
            let actual = entry.opponent();
            let same = actual == opponent
                || (franchise_mode
                    && (self.franchises.franchise_of(actual) == opponent
                        || self.franchises.same_franchise(actual, opponent)));
            if !same {
                return false;
            }
        }

        true
    }

    /// Aggregate record, scoring, betting splits, and current streak.
    pub fn query_record(&self, selector: &TeamSelector, filters: &FilterCriteria) -> RecordResult {
        let entries = self.filter(selector, filters);
        summarize(selector.name(), &entries)
    }
}

/// Roll a list of appearances up into a record.
pub fn summarize(team: &str, entries: &[TeamGame<'_>]) -> RecordResult {
    let mut tally = Tally::default();
    let mut ats = AtsTally::default();
    let (mut overs, mut unders, mut ou_pushes) = (0u32, 0u32, 0u32);
    let (mut points_for, mut points_against) = (0u32, 0u32);

    for entry in entries {
        tally.push(entry.outcome());
        points_for += entry.points_for();
        points_against += entry.points_against();
        if let Some(result) = entry.spread_result() {
            ats.push(result);
        }
        match entry.ou_result() {
            Some(OuResult::Over) => overs += 1,
            Some(OuResult::Under) => unders += 1,
            Some(OuResult::Push) => ou_pushes += 1,
            None => {}
        }
    }

    let games = tally.games();
    let avg_margin = safe_div(points_for as f64 - points_against as f64, games as f64);

    RecordResult {
        team: team.to_string(),
        games,
        wins: tally.wins,
        losses: tally.losses,
        ties: tally.ties,
        win_pct: round_to(tally.win_pct(), 3),
        win_pct_display: win_pct_display(tally.wins, tally.losses, tally.ties),
        points_for,
        points_against,
        avg_points_for: round_to(safe_div(points_for as f64, games as f64), 1),
        avg_points_against: round_to(safe_div(points_against as f64, games as f64), 1),
        avg_margin: round_to(avg_margin, 1),
        avg_margin_display: fixed(avg_margin, 1),
        ats: ats.line(),
        ou: OuLine {
            overs,
            unders,
            pushes: ou_pushes,
            over_pct: pct1(overs, overs + unders),
        },
        current_streak: current_streak(entries),
    }
}

/// Walk back from the most recent game (date descending, then season
/// descending) counting identical outcomes.
pub fn current_streak(entries: &[TeamGame<'_>]) -> Option<CurrentStreak> {
    let mut ordered: Vec<&TeamGame<'_>> = entries.iter().collect();
    ordered.sort_by(|a, b| {
        b.game
            .date
            .cmp(&a.game.date)
            .then_with(|| b.game.season.cmp(&a.game.season))
            .then_with(|| b.game.week.cmp(&a.game.week))
    });

    let first = ordered.first()?.outcome();
    let count = ordered
        .iter()
        .take_while(|entry| entry.outcome() == first)
        .count() as u32;
    Some(CurrentStreak { kind: first, count })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
