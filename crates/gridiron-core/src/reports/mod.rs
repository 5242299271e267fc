// Report generators and the registry that names them.
//
// Each generator is an independent pure function over a slice of game
// records. The registry only maps a name to a generator and serializes the
// result; no generator depends on another's output.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;
use crate::game::GameRecord;

pub mod betting_angles;
pub mod blowouts;
pub mod bounce_back;
pub mod close_games;
pub mod clutch_kicking;
pub mod comebacks;
pub mod consistency;
pub mod day_of_week;
pub mod eras;
pub mod garbage_time;
pub mod home_field;
pub mod line_accuracy;
pub mod momentum;
pub mod parity;
pub mod performers;
pub mod playoffs;
pub mod primetime;
pub mod rest;
pub mod rivalries;
pub mod roster_continuity;
pub mod scoring_trends;
pub mod streaks;
pub mod tanking;
pub mod travel;
pub mod turnovers;
pub mod upsets;
pub mod weather;
pub mod win_probability;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Every report the crate can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
    Streaks,
    Momentum,
    BounceBack,
    Rivalries,
    Parity,
    WinProbability,
    Comebacks,
    GarbageTime,
    Turnovers,
    Upsets,
    Eras,
    ClutchKicking,
    Rest,
    Weather,
    RosterContinuity,
    Tanking,
    Travel,
    BettingAngles,
    LineAccuracy,
    HomeField,
    Performers,
    Consistency,
    CloseGames,
    ScoringTrends,
    Primetime,
    Blowouts,
    Playoffs,
    DayOfWeek,
}

impl ReportKind {
    pub const ALL: [ReportKind; 28] = [
        ReportKind::Streaks,
        ReportKind::Momentum,
        ReportKind::BounceBack,
        ReportKind::Rivalries,
        ReportKind::Parity,
        ReportKind::WinProbability,
        ReportKind::Comebacks,
        ReportKind::GarbageTime,
        ReportKind::Turnovers,
        ReportKind::Upsets,
        ReportKind::Eras,
        ReportKind::ClutchKicking,
        ReportKind::Rest,
        ReportKind::Weather,
        ReportKind::RosterContinuity,
        ReportKind::Tanking,
        ReportKind::Travel,
        ReportKind::BettingAngles,
        ReportKind::LineAccuracy,
        ReportKind::HomeField,
        ReportKind::Performers,
        ReportKind::Consistency,
        ReportKind::CloseGames,
        ReportKind::ScoringTrends,
        ReportKind::Primetime,
        ReportKind::Blowouts,
        ReportKind::Playoffs,
        ReportKind::DayOfWeek,
    ];

    /// Kebab-case name used on the command line and as the output key.
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Streaks => "streaks",
            ReportKind::Momentum => "momentum",
            ReportKind::BounceBack => "bounce-back",
            ReportKind::Rivalries => "rivalries",
            ReportKind::Parity => "parity",
            ReportKind::WinProbability => "win-probability",
            ReportKind::Comebacks => "comebacks",
            ReportKind::GarbageTime => "garbage-time",
            ReportKind::Turnovers => "turnovers",
            ReportKind::Upsets => "upsets",
            ReportKind::Eras => "eras",
            ReportKind::ClutchKicking => "clutch-kicking",
            ReportKind::Rest => "rest",
            ReportKind::Weather => "weather",
            ReportKind::RosterContinuity => "roster-continuity",
            ReportKind::Tanking => "tanking",
            ReportKind::Travel => "travel",
            ReportKind::BettingAngles => "betting-angles",
            ReportKind::LineAccuracy => "line-accuracy",
            ReportKind::HomeField => "home-field",
            ReportKind::Performers => "performers",
            ReportKind::Consistency => "consistency",
            ReportKind::CloseGames => "close-games",
            ReportKind::ScoringTrends => "scoring-trends",
            ReportKind::Primetime => "primetime",
            ReportKind::Blowouts => "blowouts",
            ReportKind::Playoffs => "playoffs",
            ReportKind::DayOfWeek => "day-of-week",
        }
    }
}

impl FromStr for ReportKind {
    type Err = ParseError;

    /// Accepts the kebab-case name, or the same name with underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseError::Vocabulary {
                kind: "report",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn to_value<T: Serialize>(report: T) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(report)
}

/// Run one report and serialize it.
pub fn generate(kind: ReportKind, games: &[GameRecord]) -> Result<serde_json::Value, serde_json::Error> {
    match kind {
        ReportKind::Streaks => to_value(streaks::compute_streaks(games)),
        ReportKind::Momentum => to_value(momentum::compute_momentum(games)),
        ReportKind::BounceBack => to_value(bounce_back::compute_bounce_back(games)),
        ReportKind::Rivalries => to_value(rivalries::compute_rivalries(games)),
        ReportKind::Parity => to_value(parity::compute_parity(games)),
        ReportKind::WinProbability => to_value(win_probability::compute_win_probability(games)),
        ReportKind::Comebacks => to_value(comebacks::compute_comebacks(games)),
        ReportKind::GarbageTime => to_value(garbage_time::compute_garbage_time(games)),
        ReportKind::Turnovers => to_value(turnovers::compute_turnovers(games)),
        ReportKind::Upsets => to_value(upsets::compute_upsets(games)),
        ReportKind::Eras => to_value(eras::compute_eras(games)),
        ReportKind::ClutchKicking => to_value(clutch_kicking::compute_clutch_kicking(games)),
        ReportKind::Rest => to_value(rest::compute_rest(games)),
        ReportKind::Weather => to_value(weather::compute_weather(games)),
        ReportKind::RosterContinuity => to_value(roster_continuity::compute_roster_continuity(games)),
        ReportKind::Tanking => to_value(tanking::compute_tanking(games)),
        ReportKind::Travel => to_value(travel::compute_travel(games)),
        ReportKind::BettingAngles => to_value(betting_angles::compute_betting_angles(games)),
        ReportKind::LineAccuracy => to_value(line_accuracy::compute_line_accuracy(games)),
        ReportKind::HomeField => to_value(home_field::compute_home_field(games)),
        ReportKind::Performers => to_value(performers::compute_performers(games)),
        ReportKind::Consistency => to_value(consistency::compute_consistency(games)),
        ReportKind::CloseGames => to_value(close_games::compute_close_games(games)),
        ReportKind::ScoringTrends => to_value(scoring_trends::compute_scoring_trends(games)),
        ReportKind::Primetime => to_value(primetime::compute_primetime(games)),
        ReportKind::Blowouts => to_value(blowouts::compute_blowouts(games)),
        ReportKind::Playoffs => to_value(playoffs::compute_playoffs(games)),
        ReportKind::DayOfWeek => to_value(day_of_week::compute_day_of_week(games)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_parse_back() {
        let names: HashSet<&str> = ReportKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), ReportKind::ALL.len());
        for kind in ReportKind::ALL {
            assert_eq!(kind.name().parse::<ReportKind>(), Ok(kind));
        }
    }

    #[test]
    fn parsing_is_lenient_about_case_and_underscores() {
        assert_eq!("Bounce_Back".parse::<ReportKind>(), Ok(ReportKind::BounceBack));
        assert!(matches!(
            "nope".parse::<ReportKind>(),
            Err(ParseError::Vocabulary { kind: "report", .. })
        ));
    }

    #[test]
    fn every_report_serializes_on_empty_input() {
        for kind in ReportKind::ALL {
            let value = generate(kind, &[]).unwrap();
            assert!(value.is_object(), "{kind} did not produce an object");
        }
    }
}
