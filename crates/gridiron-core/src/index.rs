// Per-team index over a game collection.
//
// Built once per collection and never updated in place: callers rebuild it
// whenever the underlying games change.

use std::collections::HashMap;

use tracing::debug;

use crate::game::{GameRecord, TeamGame};

/// Team name -> every appearance of that team, in collection order.
#[derive(Debug, Clone, Default)]
pub struct TeamIndex<'a> {
    entries: HashMap<&'a str, Vec<TeamGame<'a>>>,
}

impl<'a> TeamIndex<'a> {
    /// Append each game once under the home team and once under the away team.
    pub fn build(games: &'a [GameRecord]) -> Self {
        let mut entries: HashMap<&'a str, Vec<TeamGame<'a>>> = HashMap::new();
        for game in games {
            for appearance in game.appearances() {
                entries.entry(appearance.team()).or_default().push(appearance);
            }
        }
        debug!(games = games.len(), teams = entries.len(), "built team index");
        Self { entries }
    }

    /// Appearances for `team`; empty when the team never played.
    pub fn entries(&self, team: &str) -> &[TeamGame<'a>] {
        self.entries.get(team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, team: &str) -> bool {
        self.entries.contains_key(team)
    }

    /// All indexed team names, sorted.
    pub fn teams(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::game;

    #[test]
    fn each_game_indexed_under_both_teams() {
        let games = vec![
            game(2020, 1, "Bears", "Lions", 20, 10),
            game(2020, 2, "Lions", "Packers", 3, 31),
        ];
        let index = TeamIndex::build(&games);

        assert_eq!(index.len(), 3);
        assert_eq!(index.entries("Lions").len(), 2);
        assert!(!index.entries("Lions")[0].is_home);
        assert!(index.entries("Lions")[1].is_home);
        assert!(index.entries("Bears")[0].is_home);
        assert_eq!(index.teams(), vec!["Bears", "Lions", "Packers"]);
    }

    #[test]
    fn unknown_team_has_no_entries() {
        let index = TeamIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.entries("Nobody").is_empty());
        assert!(!index.contains("Nobody"));
    }
}
