// How teams fare in the game after a blowout or a nail-biter.

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{AtsLine, AtsTally, RecordLine, Tally};
use crate::game::{GameRecord, TeamGame, TeamSeason};

const BLOWOUT_MARGIN: i64 = 20;
const CLOSE_MARGIN: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BounceBackSplit {
    pub record: RecordLine,
    pub ats: AtsLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BounceBackReport {
    pub after_blowout_loss: BounceBackSplit,
    pub after_blowout_win: BounceBackSplit,
    pub after_close_loss: BounceBackSplit,
    pub after_close_win: BounceBackSplit,
}

#[derive(Debug, Default)]
struct SplitTally {
    record: Tally,
    ats: AtsTally,
}

impl SplitTally {
    fn push(&mut self, next: &TeamGame<'_>) {
        self.record.push(next.outcome());
        if let Some(result) = next.spread_result() {
            self.ats.push(result);
        }
    }

    fn finish(&self) -> BounceBackSplit {
        BounceBackSplit {
            record: self.record.line(),
            ats: self.ats.line(),
        }
    }
}

pub fn compute_bounce_back(games: &[GameRecord]) -> BounceBackReport {
    let mut ordered: Vec<&GameRecord> = games.iter().collect();
    ordered.sort_by_key(|g| g.chronological_key());

    let mut seasons: HashMap<TeamSeason, Vec<TeamGame<'_>>> = HashMap::new();
    for game in &ordered {
        for appearance in game.appearances() {
            seasons
                .entry(TeamSeason::new(appearance.team(), game.season))
                .or_default()
                .push(appearance);
        }
    }

    let mut blowout_loss = SplitTally::default();
    let mut blowout_win = SplitTally::default();
    let mut close_loss = SplitTally::default();
    let mut close_win = SplitTally::default();

    for history in seasons.values() {
        for pair in history.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            let margin = previous.margin();
            if margin <= -BLOWOUT_MARGIN {
                blowout_loss.push(next);
            } else if margin >= BLOWOUT_MARGIN {
                blowout_win.push(next);
            } else if (-CLOSE_MARGIN..0).contains(&margin) {
                close_loss.push(next);
            } else if (1..=CLOSE_MARGIN).contains(&margin) {
                close_win.push(next);
            }
        }
    }

    BounceBackReport {
        after_blowout_loss: blowout_loss.finish(),
        after_blowout_win: blowout_win.finish(),
        after_close_loss: close_loss.finish(),
        after_close_win: close_win.finish(),
    }
}
