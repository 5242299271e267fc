// Shared numeric formatting, safe division, and leaderboard helpers.
//
// Every report fixes its own decimal precision; these helpers only make sure
// that a zero denominator produces a placeholder instead of NaN.

use std::cmp::Ordering;

use serde::Serialize;

use crate::game::{Outcome, SpreadResult};

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// `numerator / denominator`, or 0.0 when the denominator is zero.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Win percentage counting a tie as half a win.
pub fn win_pct(wins: u32, losses: u32, ties: u32) -> f64 {
    let total = wins + losses + ties;
    safe_div(wins as f64 + 0.5 * ties as f64, total as f64)
}

/// Population mean and standard deviation. `(0.0, 0.0)` for an empty slice.
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

// ---------------------------------------------------------------------------
// String formatting
// ---------------------------------------------------------------------------

/// Fixed-decimal string, `"0.000"` style.
pub fn fixed(value: f64, places: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rounded = round_to(value, places as u32);
    // Avoid "-0.0" after rounding a tiny negative value.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.places$}")
}

/// Percentage with one decimal: `pct1(1, 3) == "33.3"`, `"0.0"` for no data.
pub fn pct1(numerator: u32, denominator: u32) -> String {
    fixed(safe_div(numerator as f64 * 100.0, denominator as f64), 1)
}

/// Baseball-style win percentage: `".667"`, `"1.000"`, `".000"` for no games.
pub fn win_pct_display(wins: u32, losses: u32, ties: u32) -> String {
    let pct = win_pct(wins, losses, ties);
    let text = fixed(pct, 3);
    match text.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

// ---------------------------------------------------------------------------
// Ordering and slicing
// ---------------------------------------------------------------------------

/// Descending comparator over f64 that treats NaN as equal.
pub fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Ascending comparator over f64 that treats NaN as equal.
pub fn cmp_f64_asc(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Keep the first `n` items of an already-sorted list.
pub fn top_n<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    items.truncate(n);
    items
}

/// Take the last `n` items of a descending list and reverse them, so the
/// worst entry comes first.
pub fn bottom_n_reversed<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    let start = items.len().saturating_sub(n);
    items[start..].iter().rev().cloned().collect()
}

// ---------------------------------------------------------------------------
// Shared entry shapes
// ---------------------------------------------------------------------------

/// Generic leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub rank: usize,
    pub label: String,
    pub value: f64,
}

/// Assign 1-based ranks to an already-sorted list of `(label, value)` pairs.
pub fn ranked(rows: Vec<(String, f64)>) -> Vec<RankedEntry> {
    rows.into_iter()
        .enumerate()
        .map(|(i, (label, value))| RankedEntry {
            rank: i + 1,
            label,
            value,
        })
        .collect()
}

/// Win/loss/tie accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Tally {
    pub fn push(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn win_pct(&self) -> f64 {
        win_pct(self.wins, self.losses, self.ties)
    }

    /// Serializable snapshot with a 3-decimal win percentage.
    pub fn line(&self) -> RecordLine {
        RecordLine {
            games: self.games(),
            wins: self.wins,
            losses: self.losses,
            ties: self.ties,
            win_pct: round_to(self.win_pct(), 3),
        }
    }
}

/// Serialized W/L/T record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordLine {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_pct: f64,
}

/// Against-the-spread accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtsTally {
    pub covers: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl AtsTally {
    pub fn push(&mut self, result: SpreadResult) {
        match result {
            SpreadResult::Covered => self.covers += 1,
            SpreadResult::Lost => self.losses += 1,
            SpreadResult::Push => self.pushes += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.covers + self.losses + self.pushes
    }

    /// Cover rate over decided (non-push) games.
    pub fn cover_rate(&self) -> f64 {
        safe_div(self.covers as f64, (self.covers + self.losses) as f64)
    }

    pub fn line(&self) -> AtsLine {
        AtsLine {
            games: self.games(),
            covers: self.covers,
            losses: self.losses,
            pushes: self.pushes,
            cover_pct: pct1(self.covers, self.covers + self.losses),
        }
    }
}

/// Serialized ATS record; `coverPct` excludes pushes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsLine {
    pub games: u32,
    pub covers: u32,
    pub losses: u32,
    pub pushes: u32,
    pub cover_pct: String,
}

impl Default for AtsLine {
    fn default() -> Self {
        AtsTally::default().line()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
