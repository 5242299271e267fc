// Classic betting angles and their return at standard -110 pricing.

use serde::Serialize;

use crate::format::{cmp_f64_desc, pct1, ranked, round_to, safe_div, RankedEntry};
use crate::game::{GameRecord, OuResult, SpreadResult, TeamGame};

const BIG_FAVORITE_LINE: f64 = 10.0;
/// Stake needed to win 100 at -110.
const RISK_PER_BET: f64 = 110.0;
const WIN_PER_BET: f64 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AngleTally {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl AngleTally {
    fn push_spread(&mut self, result: SpreadResult) {
        match result {
            SpreadResult::Covered => self.wins += 1,
            SpreadResult::Lost => self.losses += 1,
            SpreadResult::Push => self.pushes += 1,
        }
    }

    /// Profit in units staked: a win returns 100/110, a loss costs 1, a push
    /// returns the stake.
    pub fn units(&self) -> f64 {
        self.wins as f64 * WIN_PER_BET / RISK_PER_BET - self.losses as f64
    }

    /// Units per game bet, in percent. Pushes count as games.
    pub fn roi(&self) -> f64 {
        safe_div(self.units(), (self.wins + self.losses + self.pushes) as f64) * 100.0
    }

    fn line(&self, angle: &str) -> AngleLine {
        AngleLine {
            angle: angle.to_string(),
            games: self.wins + self.losses + self.pushes,
            wins: self.wins,
            losses: self.losses,
            pushes: self.pushes,
            cover_pct: pct1(self.wins, self.wins + self.losses),
            roi: round_to(self.roi(), 1),
            units: round_to(self.units(), 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleLine {
    pub angle: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub cover_pct: String,
    pub roi: f64,
    pub units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BettingAnglesReport {
    pub home_underdogs: AngleLine,
    pub home_favorites: AngleLine,
    pub away_underdogs: AngleLine,
    pub away_favorites: AngleLine,
    pub big_favorites: AngleLine,
    pub primetime_underdogs: AngleLine,
    pub overs: AngleLine,
    pub unders: AngleLine,
    pub ranked_by_roi: Vec<RankedEntry>,
}

#[derive(Debug, Default)]
struct Angles {
    home_underdogs: AngleTally,
    home_favorites: AngleTally,
    away_underdogs: AngleTally,
    away_favorites: AngleTally,
    big_favorites: AngleTally,
    primetime_underdogs: AngleTally,
    overs: AngleTally,
    unders: AngleTally,
}

impl Angles {
    fn push_side(&mut self, side: &TeamGame<'_>) {
        let (Some(line), Some(result)) = (side.team_spread(), side.spread_result()) else {
            return;
        };
        match (side.is_home, side.is_underdog(), side.is_favorite()) {
            (true, true, _) => self.home_underdogs.push_spread(result),
            (true, _, true) => self.home_favorites.push_spread(result),
            (false, true, _) => self.away_underdogs.push_spread(result),
            (false, _, true) => self.away_favorites.push_spread(result),
            _ => {}
        }
        if line <= -BIG_FAVORITE_LINE {
            self.big_favorites.push_spread(result);
        }
        if side.is_underdog() && side.game.primetime.is_some() {
            self.primetime_underdogs.push_spread(result);
        }
    }

    fn push_total(&mut self, result: OuResult) {
        match result {
            OuResult::Over => {
                self.overs.wins += 1;
                self.unders.losses += 1;
            }
            OuResult::Under => {
                self.overs.losses += 1;
                self.unders.wins += 1;
            }
            OuResult::Push => {
                self.overs.pushes += 1;
                self.unders.pushes += 1;
            }
        }
    }
}

pub fn compute_betting_angles(games: &[GameRecord]) -> BettingAnglesReport {
    let mut angles = Angles::default();
    for game in games {
        for side in game.appearances() {
            angles.push_side(&side);
        }
        if let Some(result) = game.ou_result {
            angles.push_total(result);
        }
    }

    let lines = [
        angles.home_underdogs.line("homeUnderdogs"),
        angles.home_favorites.line("homeFavorites"),
        angles.away_underdogs.line("awayUnderdogs"),
        angles.away_favorites.line("awayFavorites"),
        angles.big_favorites.line("bigFavorites"),
        angles.primetime_underdogs.line("primetimeUnderdogs"),
        angles.overs.line("overs"),
        angles.unders.line("unders"),
    ];

    let mut by_roi: Vec<(String, f64)> = lines
        .iter()
        .filter(|line| line.wins + line.losses > 0)
        .map(|line| (line.angle.clone(), line.roi))
        .collect();
    by_roi.sort_by(|a, b| cmp_f64_desc(a.1, b.1).then_with(|| a.0.cmp(&b.0)));

    let [home_underdogs, home_favorites, away_underdogs, away_favorites, big_favorites, primetime_underdogs, overs, unders] =
        lines;

    BettingAnglesReport {
        home_underdogs,
        home_favorites,
        away_underdogs,
        away_favorites,
        big_favorites,
        primetime_underdogs,
        overs,
        unders,
        ranked_by_roi: ranked(by_roi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PrimetimeSlot;
    use crate::test_support::game;

    #[test]
    fn roi_uses_minus_110_pricing() {
        let even = AngleTally {
            wins: 11,
            losses: 10,
            pushes: 0,
        };
        // 11 * 100/110 - 10 = 0.
        assert_eq!(round_to(even.units(), 2), 0.0);
        assert_eq!(round_to(even.roi(), 1), 0.0);
        let unbeaten = AngleTally {
            wins: 1,
            losses: 0,
            pushes: 0,
        };
        assert_eq!(round_to(unbeaten.roi(), 1), 90.9);
        assert_eq!(AngleTally::default().roi(), 0.0);
    }

    #[test]
    fn pushes_dilute_roi() {
        let mostly_pushes = AngleTally {
            wins: 1,
            losses: 0,
            pushes: 3,
        };
        assert_eq!(round_to(mostly_pushes.units(), 2), 0.91);
        assert_eq!(round_to(mostly_pushes.roi(), 1), 22.7);
        assert_eq!(mostly_pushes.line("x").roi, 22.7);
    }

    #[test]
    fn sides_are_sorted_into_angles() {
        let games = vec![
            // Home dog +3 wins outright.
            game(2020, 1, "A", "B", 20, 17).with_spread(3.0).with_total(40.0),
            // Home favorite -10.5 fails to cover, on Sunday night.
            game(2020, 2, "C", "D", 24, 17)
                .with_spread(-10.5)
                .with_total(40.0)
                .with_primetime(PrimetimeSlot::SundayNight),
        ];
        let report = compute_betting_angles(&games);
        assert_eq!(report.home_underdogs.wins, 1);
        assert_eq!(report.away_favorites.losses, 1);
        assert_eq!(report.home_favorites.losses, 1);
        assert_eq!(report.away_underdogs.wins, 1);
        assert_eq!(report.big_favorites.losses, 1);
        assert_eq!(report.primetime_underdogs.wins, 1);
        assert_eq!(report.overs.wins, 1);
        assert_eq!(report.unders.wins, 1);
        assert_eq!(report.home_underdogs.cover_pct, "100.0");
        assert_eq!(report.home_underdogs.units, 0.91);
        assert_eq!(report.home_favorites.units, -1.0);
        assert_eq!(report.ranked_by_roi.first().map(|r| r.value), Some(90.9));
    }

    #[test]
    fn empty_input_has_zeroed_angles() {
        let report = compute_betting_angles(&[]);
        assert_eq!(report.overs.games, 0);
        assert_eq!(report.overs.cover_pct, "0.0");
        assert!(report.ranked_by_roi.is_empty());
    }
}
