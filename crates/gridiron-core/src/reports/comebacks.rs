// Comebacks: the biggest deficits a winner climbed out of, and how often
// halftime leads were given away.

use serde::Serialize;

use crate::bucket::{bucket_index, lead_bucket, LEAD_BUCKETS};
use crate::format::{pct1, top_n};
use crate::game::{GameRecord, Outcome, Week};

const LEADERBOARD_SIZE: usize = 10;
const PERIOD_LABELS: [&str; 3] = ["Q1", "Half", "Q3"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComebackEntry {
    pub rank: usize,
    pub season: i32,
    pub week: Week,
    pub winner: String,
    pub loser: String,
    /// Largest deficit at the end of any of Q1, half or Q3.
    pub deficit: u32,
    pub period: String,
    pub final_score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlownLeadLine {
    pub lead: String,
    pub games: u32,
    pub blown: u32,
    pub tied: u32,
    pub blown_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComebacksReport {
    pub comeback_wins: u32,
    pub biggest_comebacks: Vec<ComebackEntry>,
    pub blown_halftime_leads: Vec<BlownLeadLine>,
}

pub fn compute_comebacks(games: &[GameRecord]) -> ComebacksReport {
    let mut comebacks: Vec<(u32, usize, &GameRecord)> = Vec::new();
    let mut halftime = [(0u32, 0u32, 0u32); 5];

    for game in games {
        let Some(quarters) = game.quarters else {
            continue;
        };

        let half_lead = quarters.home_lead_after(2);
        if let Some(slot) = lead_bucket(half_lead.unsigned_abs() as u32)
            .and_then(|label| bucket_index(&LEAD_BUCKETS, label))
        {
            let row = &mut halftime[slot];
            row.0 += 1;
            match game.leader_outcome(half_lead) {
                Outcome::Loss => row.1 += 1,
                Outcome::Tie => row.2 += 1,
                Outcome::Win => {}
            }
        }

        let winner_sign = game.home_margin().signum();
        if winner_sign == 0 {
            continue;
        }
        let deepest = (1..=3)
            .map(|q| (-(quarters.home_lead_after(q) * winner_sign), q - 1))
            .filter(|(deficit, _)| *deficit > 0)
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)));
        if let Some((deficit, period)) = deepest {
            comebacks.push((deficit as u32, period, game));
        }
    }

    let comeback_wins = comebacks.len() as u32;
    comebacks.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.2.chronological_key().cmp(&b.2.chronological_key()))
    });

    let biggest_comebacks = top_n(comebacks, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, (deficit, period, game))| {
            let (winner_score, loser_score) = if game.home_score > game.away_score {
                (game.home_score, game.away_score)
            } else {
                (game.away_score, game.home_score)
            };
            ComebackEntry {
                rank: i + 1,
                season: game.season,
                week: game.week,
                winner: game.winner().unwrap_or_default().to_string(),
                loser: game.loser().unwrap_or_default().to_string(),
                deficit,
                period: PERIOD_LABELS[period].to_string(),
                final_score: format!("{winner_score}-{loser_score}"),
            }
        })
        .collect();

    ComebacksReport {
        comeback_wins,
        biggest_comebacks,
        blown_halftime_leads: LEAD_BUCKETS
            .iter()
            .zip(halftime.iter())
            .map(|(label, (games, blown, tied))| BlownLeadLine {
                lead: label.to_string(),
                games: *games,
                blown: *blown,
                tied: *tied,
                blown_pct: pct1(*blown, *games),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::game;

    #[test]
    fn deepest_hole_is_reported_with_its_period() {
        let games = vec![
            // Away down 21 at the half, wins 28-24.
            game(2020, 1, "A", "B", 24, 28).with_quarters([14, 7, 3, 0], [0, 0, 14, 14]),
            // Home down 3 after Q1, wins.
            game(2020, 2, "C", "D", 17, 10).with_quarters([0, 7, 3, 7], [3, 0, 0, 7]),
        ];
        let report = compute_comebacks(&games);
        assert_eq!(report.comeback_wins, 2);
        let top = &report.biggest_comebacks[0];
        assert_eq!(top.winner, "B");
        assert_eq!(top.deficit, 21);
        assert_eq!(top.period, "Half");
        assert_eq!(top.final_score, "28-24");
        assert_eq!(report.biggest_comebacks[1].deficit, 3);
    }

    #[test]
    fn blown_halftime_leads_are_bucketed() {
        let games = vec![
            game(2020, 1, "A", "B", 24, 28).with_quarters([14, 7, 3, 0], [0, 0, 14, 14]),
            game(2020, 2, "C", "D", 21, 3).with_quarters([14, 7, 0, 0], [0, 0, 3, 0]),
        ];
        let report = compute_comebacks(&games);
        let bucket = report
            .blown_halftime_leads
            .iter()
            .find(|b| b.lead == "15-21")
            .unwrap();
        assert_eq!(bucket.games, 2);
        assert_eq!(bucket.blown, 1);
        assert_eq!(bucket.blown_pct, "50.0");
    }

    #[test]
    fn wire_to_wire_wins_are_not_comebacks() {
        let games = vec![game(2020, 1, "A", "B", 21, 0).with_quarters([7, 7, 7, 0], [0, 0, 0, 0])];
        assert_eq!(compute_comebacks(&games).comeback_wins, 0);
    }

    #[test]
    fn empty_input_keeps_bucket_rows() {
        let report = compute_comebacks(&[]);
        assert!(report.biggest_comebacks.is_empty());
        assert_eq!(report.blown_halftime_leads.len(), 5);
    }
}
