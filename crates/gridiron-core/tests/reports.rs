// Integration tests for the report generators and the record finder.
//
// These go through the public API only: build a small season by hand, run
// reports through the registry, and check the documented contracts (empty
// input, purity, leaderboard ordering, and the worked scenarios).

use chrono::{NaiveDate, Weekday};

use gridiron_core::franchise::FranchiseMap;
use gridiron_core::game::{GameRecord, PrimetimeSlot, SpreadResult, Week};
use gridiron_core::index::TeamIndex;
use gridiron_core::query::{FilterCriteria, RecordFinder, TeamSelector};
use gridiron_core::reports::{self, ReportKind};

// ===========================================================================
// Fixtures
// ===========================================================================

fn game(season: i32, week: u8, home: &str, away: &str, home_score: u32, away_score: u32) -> GameRecord {
    GameRecord::new(season, Week::Regular(week), home, away, home_score, away_score)
}

/// A two-season slate touching every optional block at least once.
fn slate() -> Vec<GameRecord> {
    let teams = ["Bears", "Lions", "Packers", "Vikings"];
    let mut games = Vec::new();
    for season in [2021, 2022] {
        let kickoff = NaiveDate::from_ymd_opt(season, 9, 12).expect("valid date");
        for week in 1..=12u8 {
            let home = teams[(week as usize) % 4];
            let away = teams[(week as usize + 1) % 4];
            let home_score = 10 + (week as u32 * 7 + season as u32) % 25;
            let away_score = 7 + (week as u32 * 11) % 24;
            let mut record = game(season, week, home, away, home_score, away_score)
                .with_date(kickoff + chrono::Duration::days(7 * (week as i64 - 1)))
                .with_spread(if week % 2 == 0 { -3.5 } else { 2.5 })
                .with_total(41.5);
            if week % 4 == 0 {
                record = record.with_primetime(PrimetimeSlot::MondayNight);
            }
            if week % 3 == 0 {
                record = record.with_quarters(
                    [home_score / 4, home_score / 4, home_score / 4, home_score - 3 * (home_score / 4)],
                    [away_score / 4, away_score / 4, away_score / 4, away_score - 3 * (away_score / 4)],
                );
            }
            games.push(record);
        }
    }
    games
}

// ===========================================================================
// Contracts shared by every report
// ===========================================================================

#[test]
fn every_report_handles_empty_input() {
    for kind in ReportKind::ALL {
        let value = reports::generate(kind, &[]).expect("serializes");
        assert!(value.is_object(), "{kind}");
    }
}

#[test]
fn reports_are_idempotent_and_leave_input_untouched() {
    let games = slate();
    let before = games.clone();
    for kind in ReportKind::ALL {
        let first = reports::generate(kind, &games).expect("serializes");
        let second = reports::generate(kind, &games).expect("serializes");
        assert_eq!(first, second, "{kind} is not deterministic");
    }
    assert_eq!(games, before);
}

#[test]
fn input_order_does_not_change_results() {
    let games = slate();
    let mut reversed = games.clone();
    reversed.reverse();
    for kind in [ReportKind::Streaks, ReportKind::Momentum, ReportKind::BounceBack, ReportKind::Rest] {
        assert_eq!(
            reports::generate(kind, &games).expect("serializes"),
            reports::generate(kind, &reversed).expect("serializes"),
            "{kind} depends on input order"
        );
    }
}

#[test]
fn leaderboards_are_capped_and_sorted() {
    let mut games = Vec::new();
    for t in 0..14u8 {
        let team = format!("Team {t:02}");
        for w in 0..(t + 1) {
            games.push(game(2020, w + 1, &team, "Punching Bag", 30, 20 - (w as u32 % 3)));
        }
    }

    let streaks = reports::streaks::compute_streaks(&games);
    assert!(streaks.longest_win_streaks.len() <= 10);
    assert!(streaks
        .longest_win_streaks
        .windows(2)
        .all(|w| w[0].length >= w[1].length));

    let rivalries = reports::rivalries::compute_rivalries(&games);
    assert_eq!(rivalries.most_played.len(), 10);
    assert!(rivalries
        .most_played
        .windows(2)
        .all(|w| w[0].meetings >= w[1].meetings));

    let blowouts = reports::blowouts::compute_blowouts(&games);
    assert!(blowouts.biggest_margins.len() <= 15);
}

#[test]
fn tail_then_reverse_matches_ascending_sort() {
    // Three seasons with distinct parity.
    let mut games = Vec::new();
    for (season, scores) in [(2019, (10, 0)), (2020, (7, 7)), (2021, (10, 0))] {
        games.push(game(season, 1, "A", "B", scores.0, scores.1));
        games.push(game(season, 2, "C", "D", 7, 7));
    }
    let parity = reports::parity::compute_parity(&games);
    let mut ascending = parity.seasons.clone();
    ascending.sort_by(|a, b| {
        a.parity_index
            .partial_cmp(&b.parity_index)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.season.cmp(&a.season))
    });
    let expected: Vec<f64> = ascending.iter().map(|s| s.parity_index).collect();
    let actual: Vec<f64> = parity.least_balanced.iter().map(|s| s.parity_index).collect();
    assert_eq!(actual, expected);
}

// ===========================================================================
// Worked scenarios
// ===========================================================================

#[test]
fn home_underdog_covers_once_and_loses_once() {
    let games = vec![
        game(2020, 1, "Jets", "Bills", 20, 21).with_spread(2.5),
        game(2020, 2, "Jets", "Dolphins", 10, 20).with_spread(2.5),
    ];
    let report = reports::betting_angles::compute_betting_angles(&games);
    assert_eq!(report.home_underdogs.wins, 1);
    assert_eq!(report.home_underdogs.games, 2);
}

#[test]
fn garbage_time_rally_that_misses_the_number() {
    // Up 28-7 at the half; the trailer wins Q4 14-0 but still fails to cover.
    let games = vec![game(2020, 1, "Chiefs", "Broncos", 35, 21)
        .with_quarters([14, 14, 7, 0], [7, 0, 0, 14])
        .with_spread(-10.0)];
    assert_eq!(games[0].spread_result, Some(SpreadResult::Covered));
    let report = reports::garbage_time::compute_garbage_time(&games);
    assert_eq!(report.garbage_time_games, 1);
    assert_eq!(report.garbage_time_non_covers, 1);
    assert_eq!(report.garbage_time_backdoor_covers, 0);
}

#[test]
fn blowout_loss_feeds_the_next_game() {
    let games = vec![
        game(2020, 1, "Giants", "Cowboys", 3, 28),
        game(2020, 2, "Giants", "Eagles", 17, 10),
    ];
    let report = reports::bounce_back::compute_bounce_back(&games);
    assert_eq!(report.after_blowout_loss.record.games, 1);
    assert_eq!(report.after_blowout_loss.record.win_pct, 1.0);
}

#[test]
fn equal_records_are_perfect_parity() {
    assert_eq!(reports::parity::parity_index(&[0.25, 0.25, 0.25, 0.25]), 1.0);

    let games = vec![
        game(2020, 1, "A", "B", 10, 0),
        game(2020, 2, "B", "A", 10, 0),
        game(2020, 1, "C", "D", 10, 0),
        game(2020, 2, "D", "C", 10, 0),
    ];
    let report = reports::parity::compute_parity(&games);
    assert_eq!(report.seasons[0].teams, 4);
    assert_eq!(report.seasons[0].parity_index, 1.0);
}

#[test]
fn closest_rivalries_need_two_meetings() {
    let once = vec![game(2020, 1, "Ravens", "Steelers", 20, 17)];
    assert!(reports::rivalries::compute_rivalries(&once)
        .closest_rivalries
        .is_empty());

    let twice = vec![
        game(2020, 1, "Ravens", "Steelers", 20, 17),
        game(2020, 9, "Steelers", "Ravens", 20, 17),
    ];
    let report = reports::rivalries::compute_rivalries(&twice);
    assert_eq!(report.closest_rivalries.len(), 1);
    assert_eq!(report.closest_rivalries[0].meetings, 2);
}

#[test]
fn a_tie_counts_as_a_game_but_not_a_win_or_loss() {
    let games = vec![game(2020, 1, "Bengals", "Eagles", 23, 23).with_day(Weekday::Sun)];

    let index = TeamIndex::build(&games);
    let franchises = FranchiseMap::new();
    let finder = RecordFinder::new(&index, &franchises);
    let record = finder.query_record(
        &TeamSelector::Team("Bengals".to_string()),
        &FilterCriteria::default(),
    );
    assert_eq!(record.games, 1);
    assert_eq!(record.ties, 1);
    assert_eq!(record.wins + record.losses + record.ties, record.games);

    let streaks = reports::streaks::compute_streaks(&games);
    assert!(streaks.longest_win_streaks.is_empty());
    assert!(streaks.longest_loss_streaks.is_empty());

    let scoring = reports::scoring_trends::compute_scoring_trends(&games);
    assert_eq!(scoring.seasons[0].games, 1);
    assert_eq!(scoring.seasons[0].ties, 1);
}

#[test]
fn missing_optional_fields_only_drop_the_dependent_metric() {
    let games = vec![
        game(2020, 1, "A", "B", 24, 20).with_spread(-3.0).with_total(40.0),
        game(2020, 2, "A", "B", 24, 20),
    ];
    let report = reports::line_accuracy::compute_line_accuracy(&games);
    assert_eq!(report.total_games, 2);
    assert_eq!(report.games_with_spread, 1);
    assert_eq!(report.games_with_total, 1);
}
