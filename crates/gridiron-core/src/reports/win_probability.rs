// How often a lead at the end of a period holds up, by lead size.

use serde::Serialize;

use crate::bucket::{bucket_index, lead_bucket, LEAD_BUCKETS};
use crate::format::{fixed, Tally};
use crate::game::GameRecord;

/// Reporting periods and the quarter each one ends after.
const PERIODS: [(&str, usize); 3] = [("Q1", 1), ("Half", 2), ("Q3", 3)];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadBucketLine {
    pub lead: String,
    pub games: u32,
    pub leader_wins: u32,
    pub leader_losses: u32,
    pub ties: u32,
    pub win_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodLine {
    pub period: String,
    pub buckets: Vec<LeadBucketLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinProbabilityReport {
    pub games_with_quarters: u32,
    pub periods: Vec<PeriodLine>,
}

pub fn compute_win_probability(games: &[GameRecord]) -> WinProbabilityReport {
    let mut tallies = [[Tally::default(); 5]; 3];
    let mut games_with_quarters = 0u32;

    for game in games {
        let Some(quarters) = game.quarters else {
            continue;
        };
        games_with_quarters += 1;
        for (slot, (_, quarter)) in PERIODS.iter().enumerate() {
            let lead = quarters.home_lead_after(*quarter);
            let bucket = lead_bucket(lead.unsigned_abs() as u32)
                .and_then(|label| bucket_index(&LEAD_BUCKETS, label));
            if let Some(bucket) = bucket {
                tallies[slot][bucket].push(game.leader_outcome(lead));
            }
        }
    }

    let periods = PERIODS
        .iter()
        .zip(tallies.iter())
        .map(|((period, _), row)| PeriodLine {
            period: period.to_string(),
            buckets: LEAD_BUCKETS
                .iter()
                .zip(row.iter())
                .map(|(label, tally)| LeadBucketLine {
                    lead: label.to_string(),
                    games: tally.games(),
                    leader_wins: tally.wins,
                    leader_losses: tally.losses,
                    ties: tally.ties,
                    win_pct: fixed(tally.win_pct() * 100.0, 1),
                })
                .collect(),
        })
        .collect();

    WinProbabilityReport {
        games_with_quarters,
        periods,
    }
}
