// Garbage-time scoring and backdoor covers.
//
// A game qualifies when one side led by 17+ at the half and the trailing side
// then outscored the leader in the fourth quarter.

use serde::Serialize;

use crate::format::{fixed, pct1, safe_div};
use crate::game::{GameRecord, SpreadResult};

const MIN_HALFTIME_LEAD: u32 = 17;
const LEAD_BANDS: [(&str, u32, u32); 2] = [("15-21", 15, 21), ("22+", 22, u32::MAX)];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalftimeLeadBand {
    pub lead: String,
    pub games: u32,
    pub backdoor_covers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GarbageTimeReport {
    pub games_with_quarters: u32,
    pub garbage_time_games: u32,
    pub garbage_time_non_covers: u32,
    pub garbage_time_backdoor_covers: u32,
    pub garbage_time_pushes: u32,
    pub backdoor_cover_pct: String,
    pub avg_trailer_fourth_quarter_points: String,
    pub by_halftime_lead: Vec<HalftimeLeadBand>,
}

pub fn compute_garbage_time(games: &[GameRecord]) -> GarbageTimeReport {
    let mut games_with_quarters = 0u32;
    let mut garbage = 0u32;
    let mut non_covers = 0u32;
    let mut backdoor = 0u32;
    let mut pushes = 0u32;
    let mut trailer_q4_points = 0u32;
    let mut bands = [(0u32, 0u32); 2];

    for game in games {
        let Some(quarters) = game.quarters else {
            continue;
        };
        games_with_quarters += 1;

        let half_lead = quarters.home_lead_after(2);
        let lead = half_lead.unsigned_abs() as u32;
        if lead < MIN_HALFTIME_LEAD {
            continue;
        }
        let home_trails = half_lead < 0;
        let (trailer_q4, leader_q4) = if home_trails {
            (quarters.home[3], quarters.away[3])
        } else {
            (quarters.away[3], quarters.home[3])
        };
        if trailer_q4 <= leader_q4 {
            continue;
        }

        garbage += 1;
        trailer_q4_points += trailer_q4;

        let trailer_grade = game
            .spread_result
            .map(|r| if home_trails { r } else { r.invert() });
        let covered = trailer_grade == Some(SpreadResult::Covered);
        match trailer_grade {
            Some(SpreadResult::Covered) => backdoor += 1,
            Some(SpreadResult::Lost) => non_covers += 1,
            Some(SpreadResult::Push) => pushes += 1,
            None => {}
        }

        if let Some(slot) = LEAD_BANDS
            .iter()
            .position(|(_, low, high)| (*low..=*high).contains(&lead))
        {
            bands[slot].0 += 1;
            if covered {
                bands[slot].1 += 1;
            }
        }
    }

    GarbageTimeReport {
        games_with_quarters,
        garbage_time_games: garbage,
        garbage_time_non_covers: non_covers,
        garbage_time_backdoor_covers: backdoor,
        garbage_time_pushes: pushes,
        backdoor_cover_pct: pct1(backdoor, backdoor + non_covers),
        avg_trailer_fourth_quarter_points: fixed(safe_div(trailer_q4_points as f64, garbage as f64), 1),
        by_halftime_lead: LEAD_BANDS
            .iter()
            .zip(bands.iter())
            .map(|((label, _, _), (games, covers))| HalftimeLeadBand {
                lead: label.to_string(),
                games: *games,
                backdoor_covers: *covers,
            })
            .collect(),
    }
}
