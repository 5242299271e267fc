// Franchise identity across team renames and relocations.

use std::collections::{BTreeMap, BTreeSet};

use crate::index::TeamIndex;

/// Historical names grouped under the franchise they belong to.
const DEFAULT_FRANCHISES: &[(&str, &str)] = &[
    ("Indianapolis Colts", "Colts"),
    ("Baltimore Colts", "Colts"),
    ("Las Vegas Raiders", "Raiders"),
    ("Oakland Raiders", "Raiders"),
    ("Los Angeles Raiders", "Raiders"),
    ("Los Angeles Chargers", "Chargers"),
    ("San Diego Chargers", "Chargers"),
    ("Los Angeles Rams", "Rams"),
    ("St. Louis Rams", "Rams"),
    ("Cleveland Rams", "Rams"),
    ("Tennessee Titans", "Titans"),
    ("Tennessee Oilers", "Titans"),
    ("Houston Oilers", "Titans"),
    ("Arizona Cardinals", "Cardinals"),
    ("Phoenix Cardinals", "Cardinals"),
    ("St. Louis Cardinals", "Cardinals"),
    ("Chicago Cardinals", "Cardinals"),
    ("Washington Commanders", "Washington"),
    ("Washington Football Team", "Washington"),
    ("Washington Redskins", "Washington"),
    ("New England Patriots", "Patriots"),
    ("Boston Patriots", "Patriots"),
    ("Houston Texans", "Texans"),
];

/// Team name -> franchise name. Unmapped names are their own franchise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FranchiseMap {
    names: BTreeMap<String, String>,
}

impl FranchiseMap {
    /// An empty map: every team is its own franchise.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in map of historical NFL names.
    pub fn nfl_default() -> Self {
        Self {
            names: DEFAULT_FRANCHISES
                .iter()
                .map(|(team, franchise)| (team.to_string(), franchise.to_string()))
                .collect(),
        }
    }

    /// Map `team` to `franchise`, replacing any earlier entry.
    pub fn insert(&mut self, team: impl Into<String>, franchise: impl Into<String>) {
        self.names.insert(team.into(), franchise.into());
    }

    /// Merge overrides on top of this map.
    pub fn extend<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (team, franchise) in overrides {
            self.insert(team, franchise);
        }
    }

    pub fn franchise_of<'a>(&'a self, team: &'a str) -> &'a str {
        self.names.get(team).map(String::as_str).unwrap_or(team)
    }

    pub fn same_franchise(&self, a: &str, b: &str) -> bool {
        self.franchise_of(a) == self.franchise_of(b)
    }

    /// Every indexed team name that belongs to `franchise`. A franchise
    /// name that is also a literal team name resolves to that team.
    pub fn names_for<'a>(&self, franchise: &str, index: &TeamIndex<'a>) -> Vec<&'a str> {
        let wanted: BTreeSet<&'a str> = index
            .teams()
            .into_iter()
            .filter(|team| self.franchise_of(team) == franchise || *team == franchise)
            .collect();
        wanted.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
